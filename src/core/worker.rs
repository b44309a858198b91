//! Background thread draining the entry queue

use super::error::{LoggerError, Result};
use super::queue::{EntryQueue, QueueItem};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long the worker waits for an item before re-checking its flags
pub const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Name of the worker thread
pub const WORKER_THREAD_NAME: &str = "log-queue-worker";

/// Consumer side of the queue
pub trait ItemHandler: Send + Sync + 'static {
    fn handle(&self, item: QueueItem);

    /// Called when `handle` panicked; the item is lost
    fn on_panic(&self, _message: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    NotStarted,
    Running,
    Stopped,
}

struct Slot {
    state: WorkerState,
    handle: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct Signals {
    /// Cleared to request a drain-then-exit
    run: AtomicBool,
    /// Set to request an exit after the current item
    abort: AtomicBool,
}

/// Result of [`Worker::stop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopReport {
    /// Worker exited and was joined within the timeout
    pub drained: bool,
    /// Items still queued when the worker was given up on
    pub abandoned: usize,
}

/// Single background consumer of an [`EntryQueue`]
///
/// The thread is spawned lazily by [`ensure_running`](Worker::ensure_running).
/// Start and stop go through one lock, so concurrent callers never spawn a
/// second thread.
pub struct Worker<H: ItemHandler> {
    queue: Arc<EntryQueue>,
    handler: Arc<H>,
    signals: Arc<Signals>,
    slot: Mutex<Slot>,
}

impl<H: ItemHandler> Worker<H> {
    pub fn new(queue: Arc<EntryQueue>, handler: Arc<H>) -> Self {
        Self {
            queue,
            handler,
            signals: Arc::new(Signals::default()),
            slot: Mutex::new(Slot {
                state: WorkerState::NotStarted,
                handle: None,
            }),
        }
    }

    pub fn state(&self) -> WorkerState {
        self.slot.lock().state
    }

    /// Start the thread unless it is already running
    ///
    /// A thread that died while running is replaced. Fails with
    /// [`LoggerError::LoggerStopped`] once [`stop`](Worker::stop) was called.
    pub fn ensure_running(&self) -> Result<()> {
        let mut slot = self.slot.lock();
        match slot.state {
            WorkerState::Stopped => return Err(LoggerError::LoggerStopped),
            WorkerState::Running => {
                let alive = slot.handle.as_ref().is_some_and(|h| !h.is_finished());
                if alive {
                    return Ok(());
                }
            }
            WorkerState::NotStarted => {}
        }

        self.signals.run.store(true, Ordering::SeqCst);
        self.signals.abort.store(false, Ordering::SeqCst);

        let queue = Arc::clone(&self.queue);
        let handler = Arc::clone(&self.handler);
        let signals = Arc::clone(&self.signals);
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || Self::run(&queue, handler.as_ref(), &signals))
            .map_err(|e| LoggerError::io_operation("spawning log worker", "thread spawn failed", e))?;

        slot.handle = Some(handle);
        slot.state = WorkerState::Running;
        Ok(())
    }

    fn run(queue: &EntryQueue, handler: &H, signals: &Signals) {
        while !signals.abort.load(Ordering::SeqCst) {
            match queue.dequeue_timeout(POLL_INTERVAL) {
                Some(item) => {
                    let result = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(item)));
                    queue.complete();
                    if let Err(panic_info) = result {
                        let message = if let Some(s) = panic_info.downcast_ref::<&str>() {
                            s.to_string()
                        } else if let Some(s) = panic_info.downcast_ref::<String>() {
                            s.clone()
                        } else {
                            "Unknown panic".to_string()
                        };
                        handler.on_panic(&message);
                    }
                }
                None => {
                    if !signals.run.load(Ordering::SeqCst) {
                        break;
                    }
                }
            }
        }
    }

    /// Stop the worker, letting it drain the queue for at most `timeout`
    ///
    /// When the timeout elapses the worker is told to exit after its current
    /// item. The queue is then closed and everything still in it is
    /// discarded. Stopping is final.
    pub fn stop(&self, timeout: Duration) -> StopReport {
        let handle = {
            let mut slot = self.slot.lock();
            slot.state = WorkerState::Stopped;
            slot.handle.take()
        };
        self.signals.run.store(false, Ordering::SeqCst);

        let Some(handle) = handle else {
            return StopReport {
                drained: true,
                abandoned: self.close_queue(),
            };
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                let drained = handle.join().is_ok();
                return StopReport {
                    drained,
                    abandoned: self.close_queue(),
                };
            }

            if start.elapsed() >= timeout {
                self.signals.abort.store(true, Ordering::SeqCst);
                return StopReport {
                    drained: false,
                    abandoned: self.close_queue(),
                };
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(1));
        }
    }

    fn close_queue(&self) -> usize {
        self.queue.close();
        self.queue.discard()
    }
}

impl<H: ItemHandler> Drop for Worker<H> {
    fn drop(&mut self) {
        // A detached thread drains what is left and exits on its own
        self.signals.run.store(false, Ordering::SeqCst);
    }
}
