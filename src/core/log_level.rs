//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log message. Ordering drives filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[repr(u8)]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Crit = 4,
}

impl LogLevel {
    /// Number of levels; also the number of per-level queues.
    pub const COUNT: usize = 5;

    /// All levels, lowest first.
    pub const ALL: [LogLevel; LogLevel::COUNT] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Crit,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Crit => "CRIT",
        }
    }

    /// Position of this level's queue in the channel set.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Syslog severity code (RFC 5424 table 2).
    pub const fn syslog_severity(self) -> u8 {
        match self {
            LogLevel::Debug => 7,
            LogLevel::Info => 6,
            LogLevel::Warn => 4,
            LogLevel::Error => 3,
            LogLevel::Crit => 2,
        }
    }

    #[cfg(feature = "colors")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Crit => BrightRed,
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = LoggerError;

    fn try_from(value: u8) -> Result<Self, LoggerError> {
        LogLevel::ALL
            .get(value as usize)
            .copied()
            .ok_or(LoggerError::InvalidLevel(value))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" | "ERR" => Ok(LogLevel::Error),
            "CRIT" | "CRITICAL" => Ok(LogLevel::Crit),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Crit);
        assert_eq!(LogLevel::default(), LogLevel::Debug);
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(LogLevel::try_from(2).unwrap(), LogLevel::Warn);
        assert!(matches!(
            LogLevel::try_from(5),
            Err(LoggerError::InvalidLevel(5))
        ));
    }

    #[test]
    fn test_syslog_severity_mapping() {
        let codes: Vec<u8> = LogLevel::ALL.iter().map(|l| l.syslog_severity()).collect();
        assert_eq!(codes, vec![7, 6, 4, 3, 2]);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("Critical".parse::<LogLevel>().unwrap(), LogLevel::Crit);
        assert!("fatal".parse::<LogLevel>().is_err());
    }
}
