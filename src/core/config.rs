//! Logger configuration and log file readiness

use super::error::{LoggerError, Result};
use super::log_priority::LogPriority;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// File name used when no path is configured
pub const DEFAULT_LOG_FILE_NAME: &str = "log.log";

/// Construction-time settings of a [`Logger`](crate::Logger)
///
/// Every field is optional when deserializing.
///
/// # Example
///
/// ```
/// use rust_queue_logger::{LoggerConfig, LogPriority};
///
/// let config = LoggerConfig::from_json_str(
///     r#"{ "log_path": "/tmp/app/log.log", "threshold": "IMPORTANT" }"#,
/// ).unwrap();
/// assert_eq!(config.threshold, LogPriority::Important);
/// assert!(config.session_separator);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Log file; created together with its directory when missing
    pub log_path: PathBuf,
    /// Most verbose priority still written
    pub threshold: LogPriority,
    /// Write a separator line when the logger starts
    pub session_separator: bool,
    /// Report absorbed failures on stderr
    pub diagnostics: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            threshold: LogPriority::default(),
            session_separator: true,
            diagnostics: cfg!(debug_assertions),
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_path.as_os_str().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "log_path must not be empty"));
        }
        if self.log_path.file_name().is_none() {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("log_path '{}' does not name a file", self.log_path.display()),
            ));
        }
        Ok(())
    }
}

/// `log.log` in the directory of the running executable
///
/// Falls back to the working directory when the executable path cannot be
/// determined.
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_LOG_FILE_NAME)
}

/// Make sure the log file and its directory exist
///
/// Existing files are opened in append mode only, so their content is never
/// truncated.
pub fn ensure_log_file(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.file_name().is_none() {
        return Err(LoggerError::file_appender(
            path.display().to_string(),
            "path does not name a file",
        ));
    }
    if path.is_file() {
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                format!("cannot create '{}'", parent.display()),
                e,
            )
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            LoggerError::file_appender(path.display().to_string(), format!("cannot create: {}", e))
        })?;
    Ok(())
}

/// Settings the worker reads on every item
///
/// Values are read without snapshotting, so a change applies to the next
/// item handled.
#[derive(Debug)]
pub(crate) struct SharedConfig {
    log_path: RwLock<PathBuf>,
    threshold: RwLock<LogPriority>,
}

impl SharedConfig {
    pub(crate) fn new(log_path: PathBuf, threshold: LogPriority) -> Self {
        Self {
            log_path: RwLock::new(log_path),
            threshold: RwLock::new(threshold),
        }
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.log_path.read().clone()
    }

    pub(crate) fn set_log_path(&self, path: PathBuf) {
        *self.log_path.write() = path;
    }

    pub(crate) fn threshold(&self) -> LogPriority {
        *self.threshold.read()
    }

    pub(crate) fn set_threshold(&self, threshold: LogPriority) {
        *self.threshold.write() = threshold;
    }
}
