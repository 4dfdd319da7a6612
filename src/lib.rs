//! # Leveled Logger
//!
//! A leveled logging facility that fans messages out to syslog and the
//! console through per-severity queues drained by one background thread.
//!
//! ## Features
//!
//! - **Five ordered levels**: DEBUG < INFO < WARN < ERROR < CRIT, filtered before formatting
//! - **Caller prefix**: every message starts with the name of the function that logged it
//! - **Fan-out**: each message goes to every sink enabled at initialization
//! - **Backpressure**: unbuffered hand-off by default, optional bounded buffers with drop policies
//!
//! ## Example
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{crit, info, warn};
//!
//! fn main() -> Result<()> {
//!     let logger = Logger::init(LogConfig::stdlog())?;
//!     logger.set_level(LogLevel::Info);
//!
//!     info!(logger, "Server started");
//!     warn!(logger, "disk at {}%", 91);
//!     crit!(logger, "100% literal percent signs pass through");
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallSite, Facility, LogConfig, LogLevel, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, OverflowPolicy, QueueMode, Result, Sink, StdlogConfig, SyslogConfig,
        TimestampFormat, DEFAULT_DRAIN_GRACE, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::ConsoleSink;
}

pub use crate::core::{
    CallSite, Facility, LogConfig, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    OverflowPolicy, QueueMode, Result, Sink, StdlogConfig, SyslogConfig, TimestampFormat,
    DEFAULT_DRAIN_GRACE, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::sinks::ConsoleSink;
#[cfg(unix)]
pub use crate::sinks::{SyslogHandle, SyslogSink};
