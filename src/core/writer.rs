//! Retrying append path
//!
//! Wraps an [`Appender`] with the writer lock and a fixed retry budget. A
//! failed attempt is assumed to be a sharing conflict: the file is
//! re-validated, the writer sleeps briefly and tries again.

use super::appender::Appender;
use super::config::ensure_log_file;
use super::error::{LoggerError, Result};
use parking_lot::Mutex;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Total append attempts per line
pub const MAX_WRITE_ATTEMPTS: u32 = 10;

/// Pause between two append attempts
pub const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Longest wait for the writer lock
pub const WRITER_LOCK_TIMEOUT: Duration = Duration::from_millis(200);

/// What happened to a line handed to [`RetryingWriter::append`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Line is in the file; `attempts` is at least 1
    Written { attempts: u32 },
    /// Line was blank, nothing to do
    Skipped,
}

pub struct RetryingWriter {
    appender: Box<dyn Appender>,
    lock: Mutex<()>,
}

impl RetryingWriter {
    pub fn new(appender: Box<dyn Appender>) -> Self {
        Self {
            appender,
            lock: Mutex::new(()),
        }
    }

    pub fn appender_name(&self) -> &str {
        self.appender.name()
    }

    /// Append one line to the file at `path`
    ///
    /// Returns [`LoggerError::FileLockError`] when the writer lock cannot be
    /// taken within [`WRITER_LOCK_TIMEOUT`] and
    /// [`LoggerError::WriteAttemptsExhausted`] after [`MAX_WRITE_ATTEMPTS`]
    /// failed attempts. Either way the line is abandoned.
    pub fn append(&self, path: &Path, line: &str) -> Result<AppendOutcome> {
        if line.trim().is_empty() {
            return Ok(AppendOutcome::Skipped);
        }

        let _guard = self
            .lock
            .try_lock_for(WRITER_LOCK_TIMEOUT)
            .ok_or_else(|| LoggerError::file_lock(path.display().to_string()))?;

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.appender.append(path, line) {
                Ok(()) => return Ok(AppendOutcome::Written { attempts }),
                Err(e) if attempts >= MAX_WRITE_ATTEMPTS => {
                    return Err(LoggerError::attempts_exhausted(
                        path.display().to_string(),
                        attempts,
                        e,
                    ));
                }
                Err(_) => {
                    // The directory may have been removed underneath us
                    let _ = ensure_log_file(path);
                    thread::sleep(RETRY_INTERVAL);
                }
            }
        }
    }
}
