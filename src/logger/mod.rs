//! Structured logging for lockwatch
//!
//! This module provides a small tag-based logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via --debug-<tag> flags
//! - Dual output: colored console + `logs/lockwatch.log`
//!
//! ## Usage
//!
//! ```rust
//! use lockwatch::logger::{self, LogTag};
//!
//! logger::error(LogTag::Rpc, "Connection failed");
//! logger::info(LogTag::Scanner, "Scan finished");
//! logger::debug(LogTag::Holders, "Fold details"); // Only with --debug-holders
//! logger::verbose(LogTag::Escrow, "Raw bytes");   // Only with --verbose
//! ```
//!
//! Call `logger::init()` once at startup before logging.

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger from the process arguments and open the file sink
pub fn init() {
    config::init_from_args();

    if config::get_logger_config().file_logging {
        file::init_file_logging();
    }
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown even with --quiet)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (normal operation, hidden by --quiet)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the --debug-<tag> flag for this tag was given.
///
/// # Example
/// ```rust
/// use lockwatch::logger::{self, LogTag};
///
/// // Only shown with --debug-rpc
/// logger::debug(LogTag::Rpc, "getProgramAccounts returned 42 accounts");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (--verbose or --verbose-<tag>)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush all pending log writes
///
/// Call this during shutdown to ensure all logs are written to disk.
pub fn flush() {
    file::flush_file_logging();
}
