//! Stderr channel for failures the logger absorbs
//!
//! A logger cannot report its own problems through itself, and submission
//! calls never return errors, so anything that goes wrong on the worker
//! side ends up here when diagnostics are enabled.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
    Critical,
}

impl Severity {
    fn tag(&self) -> &'static str {
        match self {
            Severity::Warning => "LOGGER WARNING",
            Severity::Error => "LOGGER ERROR",
            Severity::Critical => "LOGGER CRITICAL",
        }
    }
}

#[derive(Debug)]
pub struct Diagnostics {
    enabled: AtomicBool,
}

impl Diagnostics {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn report(&self, severity: Severity, message: impl fmt::Display) {
        if self.is_enabled() {
            eprintln!("[{}] {}", Self::styled_tag(severity), message);
        }
    }

    #[cfg(feature = "console")]
    fn styled_tag(severity: Severity) -> String {
        use colored::Colorize;
        match severity {
            Severity::Warning => severity.tag().yellow().to_string(),
            Severity::Error => severity.tag().red().to_string(),
            Severity::Critical => severity.tag().bright_red().bold().to_string(),
        }
    }

    #[cfg(not(feature = "console"))]
    fn styled_tag(severity: Severity) -> String {
        severity.tag().to_string()
    }
}
