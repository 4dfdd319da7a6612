//! Sink trait for log output destinations

use super::{error::Result, log_level::LogLevel};

/// A backend that accepts fully formatted messages.
///
/// Sinks are owned by the dispatch thread and called one message at a
/// time, so implementations need `Send` but not `Sync`. An error returned
/// from `write` is reported and counted; it never stops dispatching.
///
/// # Example
///
/// ```
/// use leveled_logger::{LogLevel, Result, Sink};
///
/// struct Discard;
///
/// impl Sink for Discard {
///     fn write(&mut self, _level: LogLevel, _message: &str) -> Result<()> {
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "discard"
///     }
/// }
/// ```
pub trait Sink: Send {
    fn write(&mut self, level: LogLevel, message: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
