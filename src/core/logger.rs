//! Main logger implementation

use super::{
    appender::Appender,
    config::{ensure_log_file, LoggerConfig, SharedConfig},
    diagnostics::{Diagnostics, Severity},
    error::LoggerError,
    format::SESSION_SEPARATOR,
    log_entry::LogEntry,
    log_priority::LogPriority,
    metrics::LoggerMetrics,
    queue::{EntryQueue, QueueItem},
    sender::LogSender,
    worker::{ItemHandler, Worker, WorkerState},
    writer::{AppendOutcome, RetryingWriter},
};
use crate::appenders::FileAppender;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit shutdown.
/// For custom timeout control, use the `shutdown()` method instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything the worker needs to turn a queue item into a file line
struct Pipeline {
    config: Arc<SharedConfig>,
    writer: RetryingWriter,
    metrics: Arc<LoggerMetrics>,
    diagnostics: Arc<Diagnostics>,
}

impl Pipeline {
    fn write(&self, line: &str) {
        let path = self.config.log_path();
        match self.writer.append(&path, line) {
            Ok(AppendOutcome::Written { attempts }) => {
                self.metrics.record_written();
                if attempts > 1 {
                    self.metrics.record_retries(u64::from(attempts - 1));
                }
            }
            Ok(AppendOutcome::Skipped) => {}
            Err(e) => {
                self.metrics.record_dropped();
                self.diagnostics.report(
                    Severity::Error,
                    format!(
                        "Cannot write to log file through {} appender: {}",
                        self.writer.appender_name(),
                        e
                    ),
                );
            }
        }
    }
}

impl ItemHandler for Pipeline {
    fn handle(&self, item: QueueItem) {
        match item {
            QueueItem::Raw(text) => self.write(&text),
            QueueItem::Entry(entry) => {
                if !entry.priority().is_within(self.config.threshold()) {
                    self.metrics.record_filtered();
                    return;
                }
                self.write(&entry.render());
            }
        }
    }

    fn on_panic(&self, message: &str) {
        self.metrics.record_handling_failure();
        self.metrics.record_dropped();
        self.diagnostics.report(
            Severity::Critical,
            format!("Log entry handling panicked: {}. The worker continues.", message),
        );
    }
}

/// Asynchronous, best-effort file logger
///
/// Submission methods queue the entry and return immediately; a single
/// background thread filters entries by priority and appends them to the
/// log file. Nothing that goes wrong on the way is reported to the caller:
/// failures are counted in [`metrics`](Logger::metrics) and, when enabled,
/// printed to stderr.
///
/// Construct one logger at application startup and share it, typically as
/// an `Arc<Logger>`.
///
/// # Example
///
/// ```no_run
/// use rust_queue_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .log_path("/var/log/myapp/log.log")
///     .threshold(LogPriority::Important)
///     .build();
///
/// logger.log(LogPriority::Middle, "X", "hello"); // filtered
/// logger.log(LogPriority::Important, "X", "bye"); // written
///
/// logger.shutdown(Duration::from_secs(1));
/// ```
pub struct Logger {
    config: Arc<SharedConfig>,
    queue: Arc<EntryQueue>,
    worker: Worker<Pipeline>,
    metrics: Arc<LoggerMetrics>,
    diagnostics: Arc<Diagnostics>,
    closed: AtomicBool,
}

impl Logger {
    /// Logger with the default configuration
    ///
    /// Writes to `log.log` next to the running executable with threshold
    /// [`LogPriority::Middle`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    #[must_use]
    pub fn from_config(config: LoggerConfig) -> Self {
        Self::with_appender(config, Box::new(FileAppender::new()))
    }

    fn with_appender(config: LoggerConfig, appender: Box<dyn Appender>) -> Self {
        let diagnostics = Arc::new(Diagnostics::new(config.diagnostics));
        if let Err(e) = config.validate() {
            diagnostics.report(Severity::Warning, e);
        }

        let shared = Arc::new(SharedConfig::new(config.log_path.clone(), config.threshold));
        let metrics = Arc::new(LoggerMetrics::new());
        let queue = Arc::new(EntryQueue::new());
        let pipeline = Arc::new(Pipeline {
            config: Arc::clone(&shared),
            writer: RetryingWriter::new(appender),
            metrics: Arc::clone(&metrics),
            diagnostics: Arc::clone(&diagnostics),
        });

        let logger = Self {
            config: shared,
            worker: Worker::new(Arc::clone(&queue), pipeline),
            queue,
            metrics,
            diagnostics,
            closed: AtomicBool::new(false),
        };

        logger.check_log_file(&config.log_path);
        if config.session_separator {
            logger.enqueue(QueueItem::Raw(SESSION_SEPARATOR.to_string()));
        }
        logger
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn enqueue(&self, item: QueueItem) -> bool {
        if self.closed.load(Ordering::Acquire) {
            self.metrics.record_dropped();
            return false;
        }

        if let Err(e) = self.worker.ensure_running() {
            self.metrics.record_dropped();
            self.diagnostics
                .report(Severity::Error, format!("Log worker unavailable: {}", e));
            return false;
        }

        match self.queue.enqueue(item) {
            Ok(()) => true,
            Err(LoggerError::QueueClosed { discarded }) => {
                self.metrics.record_dropped_many(discarded as u64);
                false
            }
            Err(e) => {
                self.metrics.record_dropped();
                self.diagnostics.report(Severity::Error, e);
                false
            }
        }
    }

    fn check_log_file(&self, path: &Path) -> bool {
        match ensure_log_file(path) {
            Ok(()) => true,
            Err(e) => {
                self.diagnostics.report(Severity::Warning, e);
                false
            }
        }
    }

    /// Queue a pre-built entry
    ///
    /// Entries with a blank message and no error are ignored.
    pub fn submit(&self, entry: LogEntry) {
        if entry.is_blank() {
            return;
        }
        self.enqueue(QueueItem::Entry(entry));
    }

    pub fn log(
        &self,
        priority: LogPriority,
        sender: impl Into<LogSender>,
        message: impl Into<String>,
    ) {
        self.submit(LogEntry::new(priority, sender, message));
    }

    pub fn log_with_error(
        &self,
        priority: LogPriority,
        sender: impl Into<LogSender>,
        message: impl Into<String>,
        error: &(dyn Error + 'static),
    ) {
        self.submit(LogEntry::new(priority, sender, message).with_error(error));
    }

    /// Log `message` with [`LogPriority::Middle`] and no sender
    pub fn log_message(&self, message: impl Into<String>) {
        self.log(LogPriority::Middle, LogSender::Unknown, message);
    }

    /// Log an error with [`LogPriority::Important`] and no message
    pub fn log_error(&self, sender: impl Into<LogSender>, error: &(dyn Error + 'static)) {
        self.log_with_error(LogPriority::Important, sender, String::new(), error);
    }

    /// Log an error with no message
    pub fn log_priority_error(
        &self,
        priority: LogPriority,
        sender: impl Into<LogSender>,
        error: &(dyn Error + 'static),
    ) {
        self.log_with_error(priority, sender, String::new(), error);
    }

    #[inline]
    pub fn always(&self, sender: impl Into<LogSender>, message: impl Into<String>) {
        self.log(LogPriority::Always, sender, message);
    }

    #[inline]
    pub fn important(&self, sender: impl Into<LogSender>, message: impl Into<String>) {
        self.log(LogPriority::Important, sender, message);
    }

    #[inline]
    pub fn middle(&self, sender: impl Into<LogSender>, message: impl Into<String>) {
        self.log(LogPriority::Middle, sender, message);
    }

    #[inline]
    pub fn often(&self, sender: impl Into<LogSender>, message: impl Into<String>) {
        self.log(LogPriority::Often, sender, message);
    }

    #[inline]
    pub fn debug(&self, sender: impl Into<LogSender>, message: impl Into<String>) {
        self.log(LogPriority::Debug, sender, message);
    }

    pub fn log_path(&self) -> PathBuf {
        self.config.log_path()
    }

    /// Point the logger at another file
    ///
    /// The file and its directory are created when missing. Returns whether
    /// the file is ready; the new path is used either way, starting with the
    /// next item the worker writes.
    pub fn set_log_path(&self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        self.config.set_log_path(path.clone());
        self.check_log_file(&path)
    }

    pub fn threshold(&self) -> LogPriority {
        self.config.threshold()
    }

    /// Change the most verbose priority still written
    ///
    /// Applies to entries the worker handles from now on, including ones
    /// already queued.
    pub fn set_threshold(&self, threshold: LogPriority) {
        self.config.set_threshold(threshold);
    }

    pub fn set_diagnostics(&self, enabled: bool) {
        self.diagnostics.set_enabled(enabled);
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Get the number of dropped entries
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Items submitted but not yet handled by the worker
    pub fn pending_count(&self) -> usize {
        self.queue.pending()
    }

    pub fn worker_state(&self) -> WorkerState {
        self.worker.state()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Wait until every queued item has been handled
    ///
    /// Returns `false` if items are still pending after `timeout`.
    pub fn flush(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        loop {
            if self.queue.pending() == 0 {
                return true;
            }
            if start.elapsed() >= timeout || self.worker.state() != WorkerState::Running {
                return self.queue.pending() == 0;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    /// Stop accepting entries, drain the queue and join the worker
    ///
    /// Waits at most `timeout` for the queue to drain. Entries still queued
    /// after that are dropped and counted. Calling it again is a no-op that
    /// returns `true`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_queue_logger::{Logger, DEFAULT_SHUTDOWN_TIMEOUT};
    ///
    /// let logger = Logger::new();
    /// logger.log_message("Important message");
    ///
    /// if !logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT) {
    ///     eprintln!("Warning: Logger shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&self, timeout: Duration) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return true;
        }

        let report = self.worker.stop(timeout);
        if report.abandoned > 0 {
            self.metrics.record_dropped_many(report.abandoned as u64);
        }

        if !report.drained {
            self.diagnostics.report(
                Severity::Warning,
                format!(
                    "Log worker did not finish within {:?}; {} entries dropped",
                    timeout, report.abandoned
                ),
            );
        }
        report.drained
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            self.diagnostics.report(
                Severity::Warning,
                format!(
                    "Logger shutting down with {} dropped entries (drop rate: {:.2}%)",
                    dropped,
                    self.metrics.drop_rate()
                ),
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use rust_queue_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .log_path("/tmp/myapp/log.log")
///     .threshold(LogPriority::Debug)
///     .session_separator(false)
///     .build();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    appender: Option<Box<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            appender: None,
        }
    }

    /// Start from a loaded configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, threshold: LogPriority) -> Self {
        self.config.threshold = threshold;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn session_separator(mut self, enabled: bool) -> Self {
        self.config.session_separator = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn diagnostics(mut self, enabled: bool) -> Self {
        self.config.diagnostics = enabled;
        self
    }

    /// Replace the file appender, e.g. to write through another mechanism
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let appender = self
            .appender
            .unwrap_or_else(|| Box::new(FileAppender::new()));
        Logger::with_appender(self.config, appender)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
