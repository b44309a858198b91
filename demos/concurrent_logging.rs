//! Concurrent logging example
//!
//! Demonstrates many threads sharing one logger.
//!
//! Run with: cargo run --example concurrent_logging

use rust_queue_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    println!("=== Rust Queue Logger - Concurrent Logging Example ===\n");

    let log_path = std::env::temp_dir().join("rust_queue_logger_concurrent.log");
    let logger = Arc::new(
        Logger::builder()
            .log_path(&log_path)
            .threshold(LogPriority::Middle)
            .build(),
    );

    let start = Instant::now();
    let handles: Vec<_> = (0..10)
        .map(|id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..100 {
                    logger.middle(format!("worker-{}", id), format!("Task {} complete", i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
    println!("Submitted 1000 entries in {:?}", start.elapsed());
    println!("Pending after submission: {}", logger.pending_count());

    let drained = logger.shutdown(Duration::from_secs(10));
    println!("Drained before timeout: {}", drained);
    println!("Lines written: {}", logger.metrics().lines_written());
    println!("Dropped: {}", logger.dropped_count());
    println!("Log file: {}", log_path.display());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
