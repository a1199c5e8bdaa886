//! Tagged console logging for txlens
//!
//! Provides a compact structured logging API:
//! - Tag + log-type prefix columns for scannable output
//! - Standard levels (Error/Warning/Info/Debug)
//! - Per-module debug gating via --debug-<module> flags
//!
//! ## Usage
//!
//! ```rust
//! use txlens::logger::{self, LogTag};
//!
//! logger::info(LogTag::Rpc, "Using endpoint https://...");
//! logger::debug(LogTag::Cache, "cache hit"); // Only with --debug-cache
//! ```

use crate::arguments;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 8;
const LOG_TYPE_WIDTH: usize = 14;

/// Module tags for log line categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    Rpc,
    Transactions,
    Cache,
    System,
}

impl LogTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::Rpc => "RPC",
            LogTag::Transactions => "TXNS",
            LogTag::Cache => "CACHE",
            LogTag::System => "SYSTEM",
        }
    }

    /// Whether debug-level output is enabled for this tag
    fn debug_enabled(&self) -> bool {
        match self {
            LogTag::Rpc => arguments::is_debug_rpc_enabled(),
            LogTag::Transactions => arguments::is_debug_transactions_enabled(),
            LogTag::Cache => arguments::is_debug_cache_enabled(),
            LogTag::System => arguments::is_any_debug_enabled(),
        }
    }

    fn colored_tag(&self) -> ColoredString {
        let padded = format!("{:<width$}", self.as_str(), width = TAG_WIDTH);
        match self {
            LogTag::Rpc => padded.bright_green(),
            LogTag::Transactions => padded.cyan(),
            LogTag::Cache => padded.magenta(),
            LogTag::System => padded.blue(),
        }
    }
}

/// Log level definitions, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Check if a log message should be displayed
///
/// Errors and warnings are always shown; debug requires the matching
/// --debug-<module> flag for the tag.
fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    match level {
        LogLevel::Error | LogLevel::Warning | LogLevel::Info => true,
        LogLevel::Debug => tag.debug_enabled(),
    }
}

/// Format and output a log message with aligned tag and type columns
pub fn log(tag: LogTag, log_type: &str, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();
    let type_str = format!("{:<width$}", log_type, width = LOG_TYPE_WIDTH);
    let line = format!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        tag.colored_tag(),
        type_str.bold(),
        message
    );
    print_stdout_safe(&line);
}

fn log_at(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }
    log(tag, level.as_str(), message);
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    log_at(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    log_at(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    log_at(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (gated by --debug-<module> for the tag)
pub fn debug(tag: LogTag, message: &str) {
    log_at(tag, LogLevel::Debug, message);
}

/// Print to stdout, ignoring broken pipes so piped commands exit quietly
fn print_stdout_safe(line: &str) {
    let mut out = stdout();
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
    let _ = out.flush();
}
