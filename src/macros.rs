//! Logging macros for ergonomic log message formatting.
//!
//! Each macro takes the logger, a sender and `format!`-style arguments.
//!
//! # Examples
//!
//! ```no_run
//! use rust_queue_logger::prelude::*;
//! use rust_queue_logger::important;
//!
//! let logger = Logger::new();
//!
//! let port = 8080;
//! important!(logger, "server", "listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```no_run
/// # use rust_queue_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_queue_logger::log;
/// log!(logger, LogPriority::Middle, "db", "Simple message");
/// log!(logger, LogPriority::Always, "db", "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $priority:expr, $sender:expr, $($arg:tt)+) => {
        $logger.log($priority, $sender, format!($($arg)+))
    };
}

/// Log an `ALWAYS` message.
#[macro_export]
macro_rules! always {
    ($logger:expr, $sender:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogPriority::Always, $sender, $($arg)+)
    };
}

/// Log an `IMPORTANT` message.
///
/// # Examples
///
/// ```no_run
/// # use rust_queue_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_queue_logger::important;
/// important!(logger, "net", "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! important {
    ($logger:expr, $sender:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogPriority::Important, $sender, $($arg)+)
    };
}

/// Log a `MIDDLE` message.
#[macro_export]
macro_rules! middle {
    ($logger:expr, $sender:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogPriority::Middle, $sender, $($arg)+)
    };
}

/// Log an `OFTEN` message.
#[macro_export]
macro_rules! often {
    ($logger:expr, $sender:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogPriority::Often, $sender, $($arg)+)
    };
}

/// Log a `DEBUG` message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $sender:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogPriority::Debug, $sender, $($arg)+)
    };
}
