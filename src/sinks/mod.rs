//! Sink implementations

pub mod console;
#[cfg(unix)]
pub mod syslog;

pub use console::ConsoleSink;
#[cfg(unix)]
pub use syslog::{SyslogHandle, SyslogSink};

pub use crate::core::Sink;
