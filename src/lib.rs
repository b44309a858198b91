//! # Rust Queue Logger
//!
//! A best-effort asynchronous logger that appends one line per entry to a
//! single local text file.
//!
//! ## Features
//!
//! - **Non-blocking submission**: callers only enqueue; one background
//!   thread does all file I/O
//! - **Priority threshold**: entries more verbose than the configured
//!   [`LogPriority`] are skipped
//! - **Retrying appends**: sharing conflicts on the log file are retried a
//!   bounded number of times, then the entry is dropped
//! - **Never fails the host**: no submission call returns an error or panics
//!
//! ```no_run
//! use rust_queue_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(Logger::builder().log_path("/tmp/myapp/log.log").build());
//! logger.important("startup", "configuration loaded");
//! logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::FileAppender;
    pub use crate::core::{
        Appender, ErrorDetail, LogEntry, LogPriority, LogSender, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Result, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

pub use appenders::FileAppender;
pub use core::{
    Appender, ErrorDetail, LogEntry, LogPriority, LogSender, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, ParsedLine, Result, WorkerState, DEFAULT_SHUTDOWN_TIMEOUT,
    SESSION_SEPARATOR,
};
