//! Unbounded FIFO hand-off between producers and the background worker

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{fence, AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Something waiting to be written
#[derive(Debug, Clone, PartialEq)]
pub enum QueueItem {
    /// Filtered by priority, rendered with the line format
    Entry(LogEntry),
    /// Written verbatim, never filtered
    Raw(String),
}

impl From<LogEntry> for QueueItem {
    fn from(entry: LogEntry) -> Self {
        QueueItem::Entry(entry)
    }
}

/// Multi-producer, single-consumer queue of [`QueueItem`]s
///
/// The queue owns both ends of its channel, so it never disconnects while
/// it is alive. `pending` counts items from `enqueue` until the consumer
/// reports them handled through `complete`.
///
/// After [`close`](EntryQueue::close) every item is either refused or
/// discarded, and each lost item is reported exactly once: by the
/// `discard` that removed it or by the `enqueue` that was refused.
pub struct EntryQueue {
    sender: Sender<QueueItem>,
    receiver: Receiver<QueueItem>,
    pending: AtomicUsize,
    closed: AtomicBool,
}

impl EntryQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            pending: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Append an item
    ///
    /// Fails with [`LoggerError::QueueClosed`] once the queue is closed. An
    /// item that raced the close is taken back out together with anything
    /// else still buffered; `discarded` tells how many items this call lost.
    pub fn enqueue(&self, item: impl Into<QueueItem>) -> Result<()> {
        if self.is_closed() {
            return Err(LoggerError::QueueClosed { discarded: 1 });
        }

        self.pending.fetch_add(1, Ordering::AcqRel);
        if let Err(e) = self.sender.try_send(item.into()) {
            self.pending.fetch_sub(1, Ordering::AcqRel);
            return Err(LoggerError::queue(e.to_string()));
        }

        // Pairs with the fence in `close`: either this load sees the close or
        // the closing side's `discard` sees the item
        fence(Ordering::SeqCst);
        if self.is_closed() {
            return Err(LoggerError::QueueClosed {
                discarded: self.discard(),
            });
        }
        Ok(())
    }

    /// Refuse all further items
    ///
    /// Items already buffered stay until dequeued or discarded.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        fence(Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Take the oldest item without waiting
    pub fn dequeue(&self) -> Option<QueueItem> {
        self.receiver.try_recv().ok()
    }

    /// Take the oldest item, waiting at most `timeout` for one to arrive
    pub fn dequeue_timeout(&self, timeout: Duration) -> Option<QueueItem> {
        match self.receiver.recv_timeout(timeout) {
            Ok(item) => Some(item),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Mark one dequeued item as fully handled
    pub fn complete(&self) {
        let _ = self
            .pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
    }

    /// Items still buffered in the channel
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Items enqueued but not yet completed, including one being handled
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Discard everything still buffered and return how many items were lost
    pub fn discard(&self) -> usize {
        let mut discarded = 0;
        while self.receiver.try_recv().is_ok() {
            self.complete();
            discarded += 1;
        }
        discarded
    }
}

impl Default for EntryQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_priority::LogPriority;
    use std::sync::Arc;
    use std::thread;

    fn entry(message: &str) -> QueueItem {
        QueueItem::Entry(LogEntry::new(LogPriority::Middle, "test", message))
    }

    fn text_of(item: QueueItem) -> String {
        match item {
            QueueItem::Entry(entry) => entry.message().to_string(),
            QueueItem::Raw(text) => text,
        }
    }

    #[test]
    fn test_fifo_order() {
        let queue = EntryQueue::new();
        queue.enqueue(entry("a")).expect("enqueue");
        queue.enqueue(QueueItem::Raw("b".into())).expect("enqueue");
        queue.enqueue(entry("c")).expect("enqueue");
        assert_eq!(queue.len(), 3);

        let drained: Vec<String> = std::iter::from_fn(|| queue.dequeue()).map(text_of).collect();
        assert_eq!(drained, vec!["a", "b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_on_empty_queue() {
        let queue = EntryQueue::new();
        assert!(queue.dequeue().is_none());
        assert!(queue.dequeue_timeout(Duration::from_millis(5)).is_none());
    }

    #[test]
    fn test_pending_tracks_completion() {
        let queue = EntryQueue::new();
        queue.enqueue(entry("a")).expect("enqueue");
        queue.enqueue(entry("b")).expect("enqueue");
        assert_eq!(queue.pending(), 2);

        let _ = queue.dequeue();
        assert_eq!(queue.pending(), 2, "dequeued but not yet handled");
        queue.complete();
        assert_eq!(queue.pending(), 1);

        // Completing more than was enqueued never underflows
        queue.complete();
        queue.complete();
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_discard() {
        let queue = EntryQueue::new();
        for i in 0..5 {
            queue.enqueue(entry(&i.to_string())).expect("enqueue");
        }
        assert_eq!(queue.discard(), 5);
        assert_eq!(queue.pending(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_timeout_wakes_on_enqueue() {
        let queue = Arc::new(EntryQueue::new());
        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                queue.enqueue(entry("late")).expect("enqueue");
            })
        };

        let item = queue.dequeue_timeout(Duration::from_secs(5));
        producer.join().expect("producer thread");
        assert_eq!(item.map(text_of).as_deref(), Some("late"));
    }

    #[test]
    fn test_concurrent_producers_keep_their_own_order() {
        let queue = Arc::new(EntryQueue::new());
        let handles: Vec<_> = (0..4)
            .map(|producer| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..250 {
                        queue
                            .enqueue(entry(&format!("{}:{}", producer, i)))
                            .expect("enqueue");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("producer thread");
        }

        let mut last_seen = [None::<u32>; 4];
        let mut total = 0;
        while let Some(item) = queue.dequeue() {
            let text = text_of(item);
            let (producer, seq) = text.split_once(':').expect("producer:seq");
            let producer: usize = producer.parse().expect("producer id");
            let seq: u32 = seq.parse().expect("sequence number");
            if let Some(prev) = last_seen[producer] {
                assert!(seq > prev, "producer {} out of order", producer);
            }
            last_seen[producer] = Some(seq);
            total += 1;
        }
        assert_eq!(total, 1000);
    }

    #[test]
    fn test_closed_queue_refuses_items() {
        let queue = EntryQueue::new();
        queue.enqueue(entry("kept")).expect("enqueue");
        queue.close();

        let err = queue.enqueue(entry("late")).expect_err("queue is closed");
        assert!(matches!(err, LoggerError::QueueClosed { discarded: 1 }));
        assert_eq!(queue.len(), 1, "buffered items survive the close");
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn test_every_item_is_accounted_for_across_close() {
        for _ in 0..50 {
            let queue = Arc::new(EntryQueue::new());
            let producers: Vec<_> = (0..4)
                .map(|producer| {
                    let queue = Arc::clone(&queue);
                    thread::spawn(move || {
                        let mut accepted = 0usize;
                        let mut lost = 0usize;
                        for i in 0..200 {
                            match queue.enqueue(entry(&format!("{}:{}", producer, i))) {
                                Ok(()) => accepted += 1,
                                Err(LoggerError::QueueClosed { discarded }) => lost += discarded,
                                Err(e) => panic!("unexpected error: {}", e),
                            }
                        }
                        (accepted, lost)
                    })
                })
                .collect();

            // Consumer takes a few, then the queue is closed and drained
            let mut handled = 0usize;
            for _ in 0..100 {
                if queue.dequeue_timeout(Duration::from_micros(50)).is_some() {
                    queue.complete();
                    handled += 1;
                }
            }
            queue.close();
            let mut lost = queue.discard();

            let mut accepted = 0usize;
            for producer in producers {
                let (ok, refused) = producer.join().expect("producer thread");
                accepted += ok;
                lost += refused;
            }
            lost += queue.discard();

            assert_eq!(handled + lost, 800, "accepted {}", accepted);
            assert_eq!(queue.pending(), 0);
        }
    }
}
