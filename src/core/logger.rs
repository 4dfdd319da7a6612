//! Main logger implementation

use super::{
    caller::CallSite,
    channels::ChannelSet,
    config::LogConfig,
    dispatcher::Dispatcher,
    error::{LoggerError, Result},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    overflow_policy::QueueMode,
    sink::Sink,
    timestamp::TimestampFormat,
};
use crate::sinks::ConsoleSink;
#[cfg(unix)]
use crate::sinks::{SyslogHandle, SyslogSink};
use std::fmt::{self, Write as _};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit shutdown.
/// For custom timeout control, use the `shutdown()` method instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A running logger: per-level queues drained by one dispatch thread that
/// fans every message out to the sinks enabled at initialization.
///
/// Create one at the application root and share it by reference. Dropping
/// it (or calling [`shutdown`](Logger::shutdown)) drains the queues and
/// stops the dispatch thread.
///
/// # Example
///
/// ```
/// use leveled_logger::{warn, LogConfig, LogLevel, Logger};
///
/// let logger = Logger::init(LogConfig::stdlog()).unwrap();
/// logger.set_level(LogLevel::Info);
///
/// warn!(logger, "disk at {}%", 91);
/// ```
pub struct Logger {
    min_level: AtomicU8,
    channels: Option<ChannelSet>,
    dispatch_handle: Option<thread::JoinHandle<()>>,
    #[cfg(unix)]
    syslog: Option<SyslogHandle>,
    drain_grace: Duration,
    sink_names: Vec<String>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Open the sinks enabled in `config` and start dispatching.
    ///
    /// Fails with [`LoggerError::Config`] when no sink is enabled and with
    /// [`LoggerError::SinkUnavailable`] when syslog cannot be reached.
    pub fn init(config: LogConfig) -> Result<Self> {
        Self::with_sinks(config, Vec::new())
    }

    /// Like [`init`](Logger::init), with additional caller-provided sinks.
    pub fn with_sinks(config: LogConfig, extra_sinks: Vec<Box<dyn Sink>>) -> Result<Self> {
        Self::start(config, extra_sinks, None)
    }

    /// `console_writer` replaces stderr for the built-in console sink.
    pub(crate) fn start(
        config: LogConfig,
        extra_sinks: Vec<Box<dyn Sink>>,
        console_writer: Option<Box<dyn io::Write + Send>>,
    ) -> Result<Self> {
        if !config.has_sink() && extra_sinks.is_empty() {
            return Err(LoggerError::config(
                "Logger",
                "at least one sink must be enabled",
            ));
        }
        config.validate_queue()?;
        if cfg!(not(unix)) && config.syslog.enabled {
            return Err(LoggerError::sink_unavailable(
                "syslog",
                "not supported on this platform",
            ));
        }

        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();

        #[cfg(unix)]
        let syslog = if config.syslog.enabled {
            let sink = SyslogSink::connect(&config.syslog)?;
            let handle = sink.handle();
            sinks.push(Box::new(sink));
            Some(handle)
        } else {
            None
        };

        if config.stdlog.enabled {
            let console = ConsoleSink::from_config(&config.stdlog);
            match console_writer {
                Some(writer) => sinks.push(Box::new(console.with_writer(writer))),
                None => sinks.push(Box::new(console)),
            }
        }
        sinks.extend(extra_sinks);
        let sink_names = sinks.iter().map(|sink| sink.name().to_string()).collect();

        let metrics = Arc::new(LoggerMetrics::new());
        let (channels, receivers) = ChannelSet::new(config.queue, Arc::clone(&metrics));
        let handle = Dispatcher::new(sinks, Arc::clone(&metrics))
            .spawn(receivers)
            .map_err(|e| LoggerError::io_operation("spawning dispatch thread", e))?;

        Ok(Self {
            min_level: AtomicU8::new(LogLevel::default() as u8),
            channels: Some(channels),
            dispatch_handle: Some(handle),
            #[cfg(unix)]
            syslog,
            drain_grace: config.drain_grace,
            sink_names,
            metrics,
        })
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use leveled_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .stdlog()
    ///     .min_level(LogLevel::Warn)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.level(), LogLevel::Warn);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    /// Set the minimum level from its numeric value (DEBUG = 0 .. CRIT = 4).
    pub fn set_level_raw(&self, level: u8) -> Result<()> {
        self.set_level(LogLevel::try_from(level)?);
        Ok(())
    }

    pub fn level(&self) -> LogLevel {
        // Only valid discriminants are ever stored
        LogLevel::try_from(self.min_level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Names of the sinks opened at initialization, in dispatch order
    pub fn sink_names(&self) -> &[String] {
        &self.sink_names
    }

    /// True until the logger is shut down
    pub fn is_running(&self) -> bool {
        self.channels.is_some()
    }

    /// Whether a message at `level` would be enqueued right now
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.is_running() && level as u8 >= self.min_level.load(Ordering::Relaxed)
    }

    /// Log `message` verbatim, prefixed with the caller's name.
    pub fn log(&self, level: LogLevel, site: &CallSite, message: impl AsRef<str>) {
        if !self.enabled(level) {
            return;
        }

        let mut line = site.label();
        line.push_str(message.as_ref());
        self.enqueue(level, line);
    }

    /// Format `args` and log the result. Nothing is formatted when `level`
    /// is filtered out.
    pub fn log_fmt(&self, level: LogLevel, site: &CallSite, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        let mut line = site.label();
        if line.write_fmt(args).is_err() {
            eprintln!("[LOGGER ERROR] Failed to format message from '{}'", site);
            return;
        }
        self.enqueue(level, line);
    }

    fn enqueue(&self, level: LogLevel, line: String) {
        if let Some(ref channels) = self.channels {
            channels.send(level, line);
        }
    }

    #[inline]
    pub fn debug(&self, site: &CallSite, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, site, message);
    }

    #[inline]
    pub fn info(&self, site: &CallSite, message: impl AsRef<str>) {
        self.log(LogLevel::Info, site, message);
    }

    #[inline]
    pub fn warn(&self, site: &CallSite, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, site, message);
    }

    #[inline]
    pub fn error(&self, site: &CallSite, message: impl AsRef<str>) {
        self.log(LogLevel::Error, site, message);
    }

    #[inline]
    pub fn crit(&self, site: &CallSite, message: impl AsRef<str>) {
        self.log(LogLevel::Crit, site, message);
    }

    /// Close the syslog connection after waiting the configured drain grace.
    ///
    /// Dispatching continues; later syslog writes are reported as failures.
    /// Fails with [`LoggerError::SinkUnavailable`] if syslog was never
    /// enabled or is already closed.
    #[cfg(unix)]
    pub fn close_syslog(&self) -> Result<()> {
        let handle = self
            .syslog
            .as_ref()
            .ok_or_else(|| LoggerError::sink_unavailable("syslog", "not enabled"))?;

        if !handle.is_open() {
            return Err(LoggerError::sink_unavailable(
                "syslog",
                format!("connection to {} already closed", handle.path().display()),
            ));
        }

        if !self.drain_grace.is_zero() {
            thread::sleep(self.drain_grace);
        }
        handle.close()
    }

    #[cfg(not(unix))]
    pub fn close_syslog(&self) -> Result<()> {
        Err(LoggerError::sink_unavailable("syslog", "not enabled"))
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::{LogConfig, Logger};
    ///
    /// let logger = Logger::init(LogConfig::stdlog()).unwrap();
    ///
    /// // After logging operations...
    /// let metrics = logger.metrics();
    /// println!("Dropped: {}", metrics.dropped());
    /// println!("Sink failures: {}", metrics.write_failures());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Gracefully shutdown the logger with a custom timeout
    ///
    /// Closes the level queues, lets the dispatch thread deliver everything
    /// already enqueued, and waits for it to exit. Log calls made afterwards
    /// are silently dropped.
    ///
    /// # Returns
    ///
    /// `true` if shutdown completed successfully within timeout, `false` otherwise
    ///
    /// # Example
    ///
    /// ```no_run
    /// use leveled_logger::{LogConfig, Logger};
    /// use std::time::Duration;
    ///
    /// let mut logger = Logger::init(LogConfig::stdlog()).unwrap();
    ///
    /// if !logger.shutdown(Duration::from_secs(10)) {
    ///     eprintln!("Warning: Logger shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        // Closing the queues signals the dispatch thread to drain and exit
        drop(self.channels.take());

        let Some(handle) = self.dispatch_handle.take() else {
            return true;
        };

        let start = std::time::Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Dispatch thread panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Dispatch thread did not finish within {:?}. \
                     Some logs may be lost.",
                    timeout
                );
                return false;
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped();
        if dropped > 0 {
            eprintln!("[LOGGER WARNING] Logger shutting down with {} dropped logs", dropped);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use leveled_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .stdlog()
///     .timestamp_format(TimestampFormat::Rfc3339)
///     .queue_mode(QueueMode::Buffered { capacity: 128, overflow: OverflowPolicy::DropNewest })
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    config: LogConfig,
    min_level: LogLevel,
    sinks: Vec<Box<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
            min_level: LogLevel::default(),
            sinks: Vec::new(),
        }
    }

    /// Start from an existing configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable syslog with the given tag
    #[must_use = "builder methods return a new value"]
    pub fn syslog(mut self, identity: impl Into<String>) -> Self {
        self.config.syslog.enabled = true;
        self.config.syslog.identity = identity.into();
        self
    }

    /// Use a specific syslog socket instead of the well-known paths
    #[must_use = "builder methods return a new value"]
    pub fn syslog_socket(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.syslog.socket_path = Some(path.into());
        self
    }

    /// Enable console output
    #[must_use = "builder methods return a new value"]
    pub fn stdlog(mut self) -> Self {
        self.config.stdlog.enabled = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.config.stdlog.colors = use_colors;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.stdlog.timestamp = format;
        self
    }

    /// Add a sink of your own
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_mode(mut self, mode: QueueMode) -> Self {
        self.config.queue = mode;
        self
    }

    /// Wait applied by `close_syslog` before closing the connection
    #[must_use = "builder methods return a new value"]
    pub fn drain_grace(mut self, grace: Duration) -> Self {
        self.config.drain_grace = grace;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        let logger = Logger::with_sinks(self.config, self.sinks)?;
        logger.set_level(self.min_level);
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
