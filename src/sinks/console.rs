//! Console sink implementation

use crate::core::{LogLevel, LoggerError, Result, Sink, StdlogConfig, TimestampFormat};
#[cfg(feature = "colors")]
use colored::Colorize;
use std::io::{self, Write};

/// Writes `"<timestamp> <LEVEL>: <message>"` lines, to stderr by default.
pub struct ConsoleSink {
    writer: Box<dyn Write + Send>,
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stderr()),
            use_colors: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn from_config(config: &StdlogConfig) -> Self {
        Self::new()
            .with_colors(config.colors)
            .with_timestamp_format(config.timestamp.clone())
    }

    /// Send lines to `writer` instead of stderr
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::new().with_writer(std::io::stdout());
    /// ```
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// Color the level name; ignored without the `colors` feature
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        let level_str = self.level_str(level);
        let timestamp = self.timestamp_format.now();

        if timestamp.is_empty() {
            format!("{}: {}\n", level_str, message)
        } else {
            format!("{} {}: {}\n", timestamp, level_str, message)
        }
    }

    #[cfg(feature = "colors")]
    fn level_str(&self, level: LogLevel) -> String {
        if self.use_colors {
            level.to_str().color(level.color_code()).to_string()
        } else {
            level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "colors"))]
    fn level_str(&self, level: LogLevel) -> String {
        level.to_str().to_string()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, level: LogLevel, message: &str) -> Result<()> {
        let line = self.format_line(level, message);
        self.writer
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::write("console", e.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
