//! Log priority definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry. Lower values are more important.
///
/// A logger writes an entry when its priority is less than or equal to the
/// configured threshold, so raising the threshold makes the log more verbose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum LogPriority {
    /// Should never happen; always written
    Always = 0,
    /// Rare events such as recoverable errors
    Important = 2,
    /// Regular events such as process starts
    #[default]
    Middle = 4,
    /// Frequent events such as input handling
    Often = 6,
    /// Very frequent events, only useful while debugging
    Debug = 8,
}

impl LogPriority {
    /// All priorities, most important first
    pub const ALL: [LogPriority; 5] = [
        LogPriority::Always,
        LogPriority::Important,
        LogPriority::Middle,
        LogPriority::Often,
        LogPriority::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogPriority::Always => "ALWAYS",
            LogPriority::Important => "IMPORTANT",
            LogPriority::Middle => "MIDDLE",
            LogPriority::Often => "OFTEN",
            LogPriority::Debug => "DEBUG",
        }
    }

    #[inline]
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Look up a priority by its numeric value
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.value() == value)
    }

    /// Whether an entry with this priority passes `threshold`
    #[inline]
    pub fn is_within(&self, threshold: LogPriority) -> bool {
        *self <= threshold
    }
}

impl fmt::Display for LogPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALWAYS" => Ok(LogPriority::Always),
            "IMPORTANT" => Ok(LogPriority::Important),
            "MIDDLE" => Ok(LogPriority::Middle),
            "OFTEN" => Ok(LogPriority::Often),
            "DEBUG" => Ok(LogPriority::Debug),
            _ => Err(format!("Invalid log priority: '{}'", s)),
        }
    }
}
