//! Logger configuration
//!
//! Two independent sink groups (syslog and console) plus queueing options.
//! A configuration is fixed once the logger starts.

use super::{
    error::{LoggerError, Result},
    overflow_policy::QueueMode,
    timestamp::TimestampFormat,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default wait in `close_syslog` before the connection is closed
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Syslog facility codes (RFC 5424 table 1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facility {
    Kern,
    #[default]
    User,
    Daemon,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl Facility {
    pub const fn code(self) -> u8 {
        match self {
            Facility::Kern => 0,
            Facility::User => 1,
            Facility::Daemon => 3,
            Facility::Local0 => 16,
            Facility::Local1 => 17,
            Facility::Local2 => 18,
            Facility::Local3 => 19,
            Facility::Local4 => 20,
            Facility::Local5 => 21,
            Facility::Local6 => 22,
            Facility::Local7 => 23,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyslogConfig {
    pub enabled: bool,
    /// Tag attached to every syslog record
    pub identity: String,
    pub facility: Facility,
    /// Explicit socket; the platform's well-known paths are tried when unset
    pub socket_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StdlogConfig {
    pub enabled: bool,
    pub colors: bool,
    pub timestamp: TimestampFormat,
}

/// Full logger configuration
///
/// # Example
///
/// ```
/// use leveled_logger::LogConfig;
///
/// let config = LogConfig::from_json(
///     r#"{ "syslog": { "enabled": false }, "stdlog": { "enabled": true } }"#,
/// ).unwrap();
/// assert!(config.stdlog.enabled);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub syslog: SyslogConfig,
    pub stdlog: StdlogConfig,
    pub queue: QueueMode,
    pub drain_grace: Duration,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            syslog: SyslogConfig::default(),
            stdlog: StdlogConfig::default(),
            queue: QueueMode::default(),
            drain_grace: DEFAULT_DRAIN_GRACE,
        }
    }
}

impl LogConfig {
    /// Console output only
    pub fn stdlog() -> Self {
        Self {
            stdlog: StdlogConfig {
                enabled: true,
                ..StdlogConfig::default()
            },
            ..Self::default()
        }
    }

    /// Syslog output only, tagged with `identity`
    pub fn syslog(identity: impl Into<String>) -> Self {
        Self {
            syslog: SyslogConfig {
                enabled: true,
                identity: identity.into(),
                ..SyslogConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when at least one built-in sink is enabled
    pub fn has_sink(&self) -> bool {
        self.syslog.enabled || self.stdlog.enabled
    }

    /// Check the configuration on its own, before any sink is opened.
    pub fn validate(&self) -> Result<()> {
        if !self.has_sink() {
            return Err(LoggerError::config(
                "LogConfig",
                "neither syslog nor stdlog is enabled",
            ));
        }
        self.validate_queue()
    }

    pub(crate) fn validate_queue(&self) -> Result<()> {
        if let QueueMode::Buffered { capacity: 0, .. } = self.queue {
            return Err(LoggerError::config(
                "QueueMode",
                "buffered queues need a capacity of at least 1",
            ));
        }
        Ok(())
    }
}
