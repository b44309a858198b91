//! Appender trait for the log file destination

use std::io;
use std::path::Path;

/// One attempt at appending a rendered line to the log file.
///
/// Implementations open, write and close on every call so that other
/// handles on the file are never locked out between writes. An `Err` is
/// treated as a transient conflict and retried by
/// [`RetryingWriter`](crate::core::RetryingWriter).
pub trait Appender: Send + Sync {
    fn append(&self, path: &Path, line: &str) -> io::Result<()>;
    fn name(&self) -> &str;
}
