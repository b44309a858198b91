//! Basic logger usage example
//!
//! Demonstrates priorities, senders, errors and the threshold filter.
//!
//! Run with: cargo run --example basic_usage

use rust_queue_logger::prelude::*;
use rust_queue_logger::{debug, important};
use std::time::Duration;

struct Database;

fn main() -> Result<()> {
    println!("=== Rust Queue Logger - Basic Usage Example ===\n");

    let log_path = std::env::temp_dir().join("rust_queue_logger_basic.log");
    let logger = Logger::builder()
        .log_path(&log_path)
        .threshold(LogPriority::Often)
        .build();

    println!("1. Logging at different priorities:");
    logger.always("main", "Application started");
    logger.important("main", "Configuration loaded");
    logger.middle("main", "Listening for requests");
    logger.often("main", "Heartbeat");
    logger.debug("main", "Debug details (filtered at OFTEN)");

    println!("2. Naming the sender by type:");
    logger.important(LogSender::of::<Database>(), "Connection pool ready");
    logger.log_message("A message without a sender");

    println!("3. Logging errors:");
    let error = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.json missing");
    logger.log_with_error(LogPriority::Important, "config", "Using defaults", &error);
    logger.log_error("config", &error);

    println!("4. Changing the threshold at runtime:");
    logger.set_threshold(LogPriority::Debug);
    debug!(logger, "main", "Debug details (visible now), attempt {}", 2);
    important!(logger, "main", "Shutting down");

    logger.shutdown(Duration::from_secs(5));

    println!("\nLog file {}:\n", log_path.display());
    print!("{}", std::fs::read_to_string(&log_path)?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
