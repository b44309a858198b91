//! Line format of the log file
//!
//! Every entry occupies exactly one line with tab-separated fields:
//!
//! ```text
//! 08.01.2025 10:30:45.123 \t[IMPORTANT] \t(net) \tconnection lost \t Exception: timed out
//! ```
//!
//! Sender, message and error text are escaped so that neither tabs nor line
//! breaks leak into the output, which keeps [`parse_line`] an exact inverse
//! of [`render_line`].

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::log_priority::LogPriority;
use chrono::NaiveDateTime;

/// strftime pattern of the leading timestamp (`DD.MM.YYYY HH:MM:SS.mmm`)
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S%.3f";

/// Line written when a logger starts a new session
pub const SESSION_SEPARATOR: &str = "___________________________________________________";

/// Prefix of the optional error field
pub const EXCEPTION_LABEL: &str = "Exception: ";

const FIELD_SEPARATOR: &str = " \t";

/// Render an entry as one log line, without the trailing newline
pub fn render_line(entry: &LogEntry) -> String {
    let mut line = format!(
        "{ts}{sep}[{priority}]{sep}({sender}){sep}{message}",
        ts = entry.timestamp().format(TIMESTAMP_FORMAT),
        sep = FIELD_SEPARATOR,
        priority = entry.priority(),
        sender = escape_field(entry.sender().display_name()),
        message = escape_field(entry.message()),
    );

    if let Some(error) = entry.error() {
        line.push_str(FIELD_SEPARATOR);
        line.push(' ');
        line.push_str(EXCEPTION_LABEL);
        line.push_str(&escape_field(&error.to_string()));
    }

    line
}

/// Fields recovered from a rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub timestamp: NaiveDateTime,
    pub priority: LogPriority,
    pub sender: String,
    pub message: String,
    pub exception: Option<String>,
}

/// Split a rendered line back into its fields
pub fn parse_line(line: &str) -> Result<ParsedLine> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 4 && fields.len() != 5 {
        return Err(malformed(format!("expected 4 or 5 fields, found {}", fields.len())));
    }

    let timestamp_field = fields[0]
        .strip_suffix(' ')
        .ok_or_else(|| malformed("timestamp field"))?;
    let timestamp = NaiveDateTime::parse_from_str(timestamp_field, TIMESTAMP_FORMAT)
        .map_err(|e| malformed(format!("timestamp '{}': {}", timestamp_field, e)))?;

    let priority = fields[1]
        .strip_prefix('[')
        .and_then(|f| f.strip_suffix("] "))
        .ok_or_else(|| malformed("priority field"))?
        .parse::<LogPriority>()
        .map_err(malformed)?;

    let sender = fields[2]
        .strip_prefix('(')
        .and_then(|f| f.strip_suffix(") "))
        .ok_or_else(|| malformed("sender field"))?;

    let (message, exception) = if fields.len() == 5 {
        let message = fields[3]
            .strip_suffix(' ')
            .ok_or_else(|| malformed("message field"))?;
        let exception = fields[4]
            .strip_prefix(' ')
            .and_then(|f| f.strip_prefix(EXCEPTION_LABEL))
            .ok_or_else(|| malformed("exception field"))?;
        (message, Some(unescape_field(exception)))
    } else {
        (fields[3], None)
    };

    Ok(ParsedLine {
        timestamp,
        priority,
        sender: unescape_field(sender),
        message: unescape_field(message),
        exception,
    })
}

fn malformed(message: impl Into<String>) -> LoggerError {
    LoggerError::formatter("line", message)
}

/// Escape backslashes, tabs and line breaks
pub fn escape_field(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Inverse of [`escape_field`]; unknown escapes are kept as written
pub fn unescape_field(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => unescaped.push('\\'),
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some('t') => unescaped.push('\t'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_entry::ErrorDetail;
    use crate::core::sender::LogSender;
    use chrono::{Local, TimeZone};

    fn fixed_entry(priority: LogPriority, sender: &str, message: &str) -> LogEntry {
        // 2025-01-08 10:30:45.123 local time
        let timestamp = Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123);
        LogEntry::new(priority, sender, message).with_timestamp(timestamp)
    }

    #[test]
    fn test_render_without_error() {
        let entry = fixed_entry(LogPriority::Important, "X", "bye");
        assert_eq!(
            render_line(&entry),
            "08.01.2025 10:30:45.123 \t[IMPORTANT] \t(X) \tbye"
        );
    }

    #[test]
    fn test_render_with_error() {
        let entry = fixed_entry(LogPriority::Always, "db", "query failed")
            .with_error_detail(ErrorDetail::from_message("timeout"));
        assert_eq!(
            render_line(&entry),
            "08.01.2025 10:30:45.123 \t[ALWAYS] \t(db) \tquery failed \t Exception: timeout"
        );
    }

    #[test]
    fn test_render_unknown_sender() {
        let entry = LogEntry::new(LogPriority::Middle, LogSender::Unknown, "started");
        assert!(render_line(&entry).contains(" \t(UNKNOWN) \t"));
    }

    #[test]
    fn test_render_escapes_line_breaks() {
        let entry = fixed_entry(LogPriority::Middle, "X", "first\nsecond\tthird");
        let line = render_line(&entry);
        assert!(!line.contains('\n'));
        assert!(line.ends_with("first\\nsecond\\tthird"));
    }

    #[test]
    fn test_parse_recovers_fields() {
        let entry = fixed_entry(LogPriority::Often, "in\tput", "key C:\\temp\\new pressed ")
            .with_error_detail(ErrorDetail::from_message("bad\nkey"));
        let parsed = parse_line(&render_line(&entry)).expect("parse");

        assert_eq!(parsed.priority, LogPriority::Often);
        assert_eq!(parsed.sender, "in\tput");
        assert_eq!(parsed.message, "key C:\\temp\\new pressed ");
        assert_eq!(parsed.exception.as_deref(), Some("bad\nkey"));
        assert_eq!(
            parsed.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            "08.01.2025 10:30:45.123"
        );
    }

    #[test]
    fn test_parse_empty_message() {
        let entry = fixed_entry(LogPriority::Middle, "X", "");
        let parsed = parse_line(&render_line(&entry)).expect("parse");
        assert_eq!(parsed.message, "");
        assert_eq!(parsed.exception, None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_line(SESSION_SEPARATOR).is_err());
        assert!(parse_line("a\tb\tc\td").is_err());
        assert!(parse_line("08.01.2025 10:30:45.123 \t[LOUD] \t(X) \tm").is_err());
    }

    #[test]
    fn test_escape_roundtrip() {
        let samples = ["", "plain", "\\", "\\n literal", "tab\there", "cr\r\nlf", "trail\\"];
        for sample in samples {
            assert_eq!(unescape_field(&escape_field(sample)), sample);
        }
    }

    #[test]
    fn test_separator_is_51_underscores() {
        assert_eq!(SESSION_SEPARATOR.len(), 51);
        assert!(SESSION_SEPARATOR.chars().all(|c| c == '_'));
    }
}
