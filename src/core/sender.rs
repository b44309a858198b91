//! Identification of the party that submitted a log entry

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when nothing is known about the sender
pub const UNKNOWN_SENDER: &str = "UNKNOWN";

/// Who submitted a log entry.
///
/// Strings are used verbatim. Anything else is identified by its type name,
/// stripped of module path and generic parameters.
///
/// # Example
///
/// ```
/// use rust_queue_logger::LogSender;
///
/// struct Connection;
///
/// assert_eq!(LogSender::from("net").display_name(), "net");
/// assert_eq!(LogSender::of::<Connection>().display_name(), "Connection");
/// assert_eq!(LogSender::Unknown.display_name(), "UNKNOWN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogSender {
    /// Literal name supplied by the caller
    Name(String),
    /// Short type name of the sending value
    Type(String),
    #[default]
    Unknown,
}

impl LogSender {
    pub fn named(name: impl Into<String>) -> Self {
        LogSender::Name(name.into())
    }

    /// Identify the sender by the type `T`
    pub fn of<T: ?Sized>() -> Self {
        LogSender::Type(short_type_name(std::any::type_name::<T>()).to_string())
    }

    /// Identify the sender by the type of `value`
    pub fn of_val<T: ?Sized>(_value: &T) -> Self {
        Self::of::<T>()
    }

    pub fn display_name(&self) -> &str {
        match self {
            LogSender::Name(name) => name,
            LogSender::Type(name) => name,
            LogSender::Unknown => UNKNOWN_SENDER,
        }
    }
}

/// `my_app::net::Connection<alloc::string::String>` becomes `Connection`
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl fmt::Display for LogSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl From<&str> for LogSender {
    fn from(name: &str) -> Self {
        LogSender::Name(name.to_string())
    }
}

impl From<String> for LogSender {
    fn from(name: String) -> Self {
        LogSender::Name(name)
    }
}

impl From<&String> for LogSender {
    fn from(name: &String) -> Self {
        LogSender::Name(name.clone())
    }
}

impl<S: Into<LogSender>> From<Option<S>> for LogSender {
    fn from(sender: Option<S>) -> Self {
        sender.map_or(LogSender::Unknown, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Renderer;
    #[allow(dead_code)]
    struct Wrapper<T>(T);

    #[test]
    fn test_literal_names_are_kept() {
        assert_eq!(LogSender::from("X").display_name(), "X");
        assert_eq!(LogSender::from(String::from("audio")).display_name(), "audio");
        assert_eq!(LogSender::named("").display_name(), "");
    }

    #[test]
    fn test_type_names_are_shortened() {
        assert_eq!(LogSender::of::<Renderer>().display_name(), "Renderer");
        assert_eq!(LogSender::of::<Wrapper<String>>().display_name(), "Wrapper");
        assert_eq!(LogSender::of_val(&42u32).display_name(), "u32");
        assert_eq!(LogSender::of::<str>().display_name(), "str");
    }

    #[test]
    fn test_unknown_sender() {
        assert_eq!(LogSender::default().display_name(), UNKNOWN_SENDER);
        assert_eq!(LogSender::from(None::<&str>), LogSender::Unknown);
        assert_eq!(LogSender::from(Some("net")), LogSender::Name("net".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(LogSender::of::<Renderer>().to_string(), "Renderer");
        assert_eq!(LogSender::Unknown.to_string(), "UNKNOWN");
    }
}
