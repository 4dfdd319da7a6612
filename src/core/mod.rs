//! Core logger types and traits

pub mod caller;
pub(crate) mod channels;
pub mod config;
pub(crate) mod dispatcher;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod sink;
pub mod timestamp;

pub use caller::CallSite;
pub use config::{Facility, LogConfig, StdlogConfig, SyslogConfig, DEFAULT_DRAIN_GRACE};
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use overflow_policy::{OverflowPolicy, QueueMode};
pub use sink::Sink;
pub use timestamp::TimestampFormat;
