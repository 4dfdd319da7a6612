//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    Config { component: String, message: String },

    /// A sink's transport could not be opened or is already closed
    #[error("Sink '{sink}' unavailable: {message}")]
    SinkUnavailable { sink: String, message: String },

    /// A sink rejected a message at dispatch time
    #[error("Sink '{sink}' failed to write: {message}")]
    Write { sink: String, message: String },

    /// Raw severity outside the fixed enumeration
    #[error("Invalid log level: {0}")]
    InvalidLevel(u8),

    /// IO error with context
    #[error("IO error while {operation}: {source}")]
    IoOperation {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Config {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink unavailable error
    pub fn sink_unavailable(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkUnavailable {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a write error
    pub fn write(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Write {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("Logger", "no sink enabled");
        assert!(matches!(err, LoggerError::Config { .. }));

        let err = LoggerError::sink_unavailable("syslog", "not open");
        assert!(matches!(err, LoggerError::SinkUnavailable { .. }));

        let err = LoggerError::write("console", "broken pipe");
        assert!(matches!(err, LoggerError::Write { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("Logger", "no sink enabled");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for Logger: no sink enabled"
        );

        let err = LoggerError::sink_unavailable("syslog", "connection already closed");
        assert_eq!(
            err.to_string(),
            "Sink 'syslog' unavailable: connection already closed"
        );

        assert_eq!(LoggerError::InvalidLevel(9).to_string(), "Invalid log level: 9");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no socket");
        let err = LoggerError::io_operation("connecting to syslog", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("connecting to syslog"));
        assert!(err.to_string().contains("no socket"));
    }
}
