//! Error types for the logger system
//!
//! None of these ever reach code that submits log entries. They travel
//! between the internal components and end up in metrics and diagnostics.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Every append attempt failed; the line was abandoned
    #[error("Giving up on '{path}' after {attempts} attempts: {source}")]
    WriteAttemptsExhausted {
        path: String,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    /// The queue refused an item
    #[error("Failed to enqueue log item: {0}")]
    QueueFailure(String),

    /// The queue was closed; `discarded` items were lost by this call
    #[error("Queue closed, {discarded} log items discarded")]
    QueueClosed { discarded: usize },

    /// Logger already stopped
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// Writer lock could not be taken in time
    #[error("Failed to acquire writer lock for '{path}'")]
    FileLockError { path: String },

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an exhausted-retries error
    pub fn attempts_exhausted(
        path: impl Into<String>,
        attempts: u32,
        source: std::io::Error,
    ) -> Self {
        LoggerError::WriteAttemptsExhausted {
            path: path.into(),
            attempts,
            source,
        }
    }

    /// Create a queue failure error
    pub fn queue<S: Into<String>>(msg: S) -> Self {
        LoggerError::QueueFailure(msg.into())
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }
}
