//! Appender implementations

pub mod file;

pub use file::FileAppender;

// Re-export trait for convenience
pub use crate::core::Appender;
