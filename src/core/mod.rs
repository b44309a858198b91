//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod log_entry;
pub mod log_priority;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod sender;
pub mod worker;
pub mod writer;

pub use appender::Appender;
pub use config::{default_log_path, ensure_log_file, LoggerConfig, DEFAULT_LOG_FILE_NAME};
pub use error::{LoggerError, Result};
pub use format::{parse_line, render_line, ParsedLine, SESSION_SEPARATOR, TIMESTAMP_FORMAT};
pub use log_entry::{ErrorDetail, LogEntry};
pub use log_priority::LogPriority;
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use queue::{EntryQueue, QueueItem};
pub use sender::LogSender;
pub use worker::{ItemHandler, Worker, WorkerState};
pub use writer::{AppendOutcome, RetryingWriter, MAX_WRITE_ATTEMPTS, RETRY_INTERVAL, WRITER_LOCK_TIMEOUT};
