//! Log entry structure

use super::format;
use super::log_priority::LogPriority;
use super::sender::LogSender;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Text captured from an error at submission time
///
/// Holds the error's own message and the messages of its `source()` chain,
/// outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub causes: Vec<String>,
}

impl ErrorDetail {
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: error.to_string(),
            causes,
        }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            causes: Vec::new(),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for cause in &self.causes {
            write!(f, " <- caused by: {}", cause)?;
        }
        Ok(())
    }
}

/// One log event. Fields are fixed once the entry has been submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    priority: LogPriority,
    message: String,
    timestamp: DateTime<Local>,
    sender: LogSender,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorDetail>,
}

impl LogEntry {
    pub fn new(
        priority: LogPriority,
        sender: impl Into<LogSender>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            message: message.into(),
            timestamp: Local::now(),
            sender: sender.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: &(dyn Error + 'static)) -> Self {
        self.error = Some(ErrorDetail::from_error(error));
        self
    }

    pub fn with_error_detail(mut self, detail: ErrorDetail) -> Self {
        self.error = Some(detail);
        self
    }

    /// Override the capture time
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[inline]
    pub fn priority(&self) -> LogPriority {
        self.priority
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    #[inline]
    pub fn sender(&self) -> &LogSender {
        &self.sender
    }

    #[inline]
    pub fn error(&self) -> Option<&ErrorDetail> {
        self.error.as_ref()
    }

    /// An entry with nothing to say: blank message and no error
    pub fn is_blank(&self) -> bool {
        self.message.trim().is_empty() && self.error.is_none()
    }

    /// The single line this entry occupies in the log file
    pub fn render(&self) -> String {
        format::render_line(self)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "disk unplugged")
        }
    }

    impl Error for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "save failed")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_new_entry_captures_fields() {
        let before = Local::now();
        let entry = LogEntry::new(LogPriority::Important, "X", "hello");
        let after = Local::now();

        assert_eq!(entry.priority(), LogPriority::Important);
        assert_eq!(entry.sender().display_name(), "X");
        assert_eq!(entry.message(), "hello");
        assert!(entry.error().is_none());
        assert!(entry.timestamp() >= before && entry.timestamp() <= after);
    }

    #[test]
    fn test_error_chain_is_captured() {
        let entry = LogEntry::new(LogPriority::Important, "io", "").with_error(&Outer(Inner));
        let detail = entry.error().expect("error attached");

        assert_eq!(detail.message, "save failed");
        assert_eq!(detail.causes, vec!["disk unplugged".to_string()]);
        assert_eq!(detail.to_string(), "save failed <- caused by: disk unplugged");
    }

    #[test]
    fn test_blank_entries() {
        assert!(LogEntry::new(LogPriority::Middle, LogSender::Unknown, "").is_blank());
        assert!(LogEntry::new(LogPriority::Middle, LogSender::Unknown, "  \t").is_blank());
        assert!(!LogEntry::new(LogPriority::Middle, LogSender::Unknown, "x").is_blank());

        let with_error = LogEntry::new(LogPriority::Middle, LogSender::Unknown, "")
            .with_error_detail(ErrorDetail::from_message("boom"));
        assert!(!with_error.is_blank());
    }

    #[test]
    fn test_serialization_skips_missing_error() {
        let entry = LogEntry::new(LogPriority::Debug, "X", "m");
        let json = serde_json::to_string(&entry).expect("serialize");
        assert!(!json.contains("error"));
        assert!(json.contains("\"DEBUG\""));
    }
}
