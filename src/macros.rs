//! Logging macros that attach the call site and format lazily.
//!
//! With only a message the text is logged verbatim, so `%`, `{` and `}`
//! need no escaping. With arguments the message is a `format!` template,
//! and nothing is formatted when the level is filtered out.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{info, warn};
//!
//! let logger = Logger::init(LogConfig::stdlog()).unwrap();
//!
//! // Verbatim
//! info!(logger, "Server started");
//! info!(logger, "100% done, {braces} kept");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! warn!(logger, "disk at {}%", 91);
//! ```

/// Log a message at a given level.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::init(LogConfig::stdlog()).unwrap();
/// use leveled_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal, $($arg:tt)+) => {
        $logger.log_fmt($level, &$crate::call_site!(), format_args!($fmt, $($arg)+))
    };
    ($logger:expr, $level:expr, $message:expr $(,)?) => {
        $logger.log($level, &$crate::call_site!(), $message)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::init(LogConfig::stdlog()).unwrap();
/// use leveled_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::init(LogConfig::stdlog()).unwrap();
/// use leveled_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::init(LogConfig::stdlog()).unwrap();
/// use leveled_logger::crit;
/// crit!(logger, "Critical system failure");
/// crit!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! crit {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Crit, $($arg)+)
    };
}
