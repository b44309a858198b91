//! File logging example
//!
//! Demonstrates JSON configuration, switching the log file and metrics.
//!
//! Run with: cargo run --example file_logging

use rust_queue_logger::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Queue Logger - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("rust_queue_logger_demo");
    let first = dir.join("first.log");
    let second = dir.join("nested").join("second.log");

    let json = format!(
        r#"{{ "log_path": {}, "threshold": "IMPORTANT", "session_separator": true }}"#,
        serde_json::to_string(&first)?
    );
    let config = LoggerConfig::from_json_str(&json)?;

    println!("1. Logging with configuration loaded from JSON:");
    let logger = Logger::from_config(config);
    logger.important("app", "Written to the first file");
    logger.middle("app", "Filtered: MIDDLE is above IMPORTANT");
    logger.flush(Duration::from_secs(5));

    println!("2. Switching to a file in a directory that does not exist yet:");
    if logger.set_log_path(&second) {
        logger.important("app", "Written to the second file");
    }

    println!("3. Processing some items:");
    for i in 1..=5 {
        logger.always("worker", format!("Processing item {}/5", i));
    }

    logger.shutdown(Duration::from_secs(5));

    let metrics = logger.metrics();
    println!("\nMetrics:");
    println!("  lines written: {}", metrics.lines_written());
    println!("  filtered:      {}", metrics.filtered_count());
    println!("  dropped:       {}", metrics.dropped_count());
    println!("  write retries: {}", metrics.write_retries());

    for path in [&first, &second] {
        println!("\n{}:", path.display());
        print!("{}", std::fs::read_to_string(path)?);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
