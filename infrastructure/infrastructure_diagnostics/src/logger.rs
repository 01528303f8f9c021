//! Process-global diagnostic logger
//!
//! Provides a level-gated logging facade with a pluggable record sink.
//! The default sink writes to stderr; tests install a recording sink
//! through the same [`LogSink`] capability trait instead of inspecting
//! the logger's concrete type.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, RwLock};

use crate::log_level::LogLevel;

/// Consumer of diagnostic records
///
/// Implemented by anything that wants to receive records passing the
/// level threshold: the stderr sink in production, a recording sink in
/// tests.
pub trait LogSink: Send + Sync {
    /// Consume one diagnostic record
    fn consume(&self, level: LogLevel, origin: &str, message: &str);
}

/// Default sink writing records to stderr
struct StderrSink;

impl LogSink for StderrSink {
    fn consume(&self, level: LogLevel, origin: &str, message: &str) {
        eprintln!("[{}] {}: {}", level.display_text(), origin, message);
    }
}

/// Active level threshold, stored as the raw enum discriminant
static LOG_LEVEL_THRESHOLD: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

lazy_static::lazy_static! {
    static ref ACTIVE_SINK: RwLock<Arc<dyn LogSink>> = RwLock::new(Arc::new(StderrSink));
}

/// Diagnostic logging facade
///
/// All state is process-global; components log through the associated
/// functions without holding a logger instance.
pub struct Logger;

impl Logger {
    /// Set the level threshold; records above it are dropped
    pub fn set_log_level(level: LogLevel) {
        LOG_LEVEL_THRESHOLD.store(level as u8, Ordering::Relaxed);
    }

    /// Get the active level threshold
    pub fn log_level() -> LogLevel {
        LogLevel::from_u8(LOG_LEVEL_THRESHOLD.load(Ordering::Relaxed))
    }

    /// Replace the active sink
    ///
    /// Returns the previously active sink so a test can restore it.
    pub fn set_sink(sink: Arc<dyn LogSink>) -> Arc<dyn LogSink> {
        match ACTIVE_SINK.write() {
            Ok(mut active) => std::mem::replace(&mut *active, sink),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), sink),
        }
    }

    /// Emit one record if it passes the level threshold
    pub fn log(level: LogLevel, origin: &str, message: &str) {
        if level == LogLevel::Off || level > Self::log_level() {
            return;
        }
        let sink = match ACTIVE_SINK.read() {
            Ok(active) => Arc::clone(&active),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        };
        sink.consume(level, origin, message);
    }

    /// Emit a fatal record
    pub fn fatal(origin: &str, message: &str) {
        Self::log(LogLevel::Fatal, origin, message);
    }

    /// Emit an error record
    pub fn error(origin: &str, message: &str) {
        Self::log(LogLevel::Error, origin, message);
    }

    /// Emit a warning record
    pub fn warn(origin: &str, message: &str) {
        Self::log(LogLevel::Warn, origin, message);
    }

    /// Emit an info record
    pub fn info(origin: &str, message: &str) {
        Self::log(LogLevel::Info, origin, message);
    }

    /// Emit a debug record
    pub fn debug(origin: &str, message: &str) {
        Self::log(LogLevel::Debug, origin, message);
    }

    /// Emit a trace record
    pub fn trace(origin: &str, message: &str) {
        Self::log(LogLevel::Trace, origin, message);
    }
}
