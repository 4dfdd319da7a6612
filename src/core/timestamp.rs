//! Timestamp formatting for console output

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp prefix written in front of console lines
///
/// # Examples
///
/// ```
/// use leveled_logger::TimestampFormat;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
/// assert_eq!(TimestampFormat::StdLog.format(&at), "2024/03/09 07:05:01");
/// assert_eq!(TimestampFormat::None.format(&at), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2024/03/09 07:05:01`, local time
    #[default]
    StdLog,

    /// ISO 8601 with milliseconds and offset: `2024-03-09T07:05:01.123+01:00`
    Iso8601,

    /// RFC 3339: `2024-03-09T07:05:01+01:00`
    Rfc3339,

    /// Unix timestamp in seconds
    Unix,

    /// Any strftime-compatible format string
    Custom(String),

    /// No timestamp
    None,
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::StdLog => datetime.format("%Y/%m/%d %H:%M:%S").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
            TimestampFormat::None => String::new(),
        }
    }

    /// Format the current local time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }
}

/// RFC 3164 timestamp used in syslog headers: `Mar  9 07:05:01`
pub(crate) fn rfc3164(datetime: &DateTime<Local>) -> String {
    datetime.format("%b %e %H:%M:%S").to_string()
}
