//! File appender implementation

use crate::core::Appender;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Appends to the log file under an exclusive advisory lock
///
/// The lock is taken with `try_lock_exclusive`, so a handle held by another
/// writer (in this or another process) surfaces as a `WouldBlock` error
/// instead of blocking the worker.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileAppender;

impl FileAppender {
    pub fn new() -> Self {
        FileAppender
    }

    fn write_locked(file: &mut File, line: &str) -> io::Result<()> {
        let mut output = String::with_capacity(line.len() + 1);
        output.push_str(line);
        output.push('\n');
        file.write_all(output.as_bytes())?;
        file.flush()
    }
}

impl Appender for FileAppender {
    fn append(&self, path: &Path, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        FileExt::try_lock_exclusive(&file)?;

        let result = Self::write_locked(&mut file, line);
        let _ = FileExt::unlock(&file);
        result
    }

    fn name(&self) -> &str {
        "file"
    }
}
