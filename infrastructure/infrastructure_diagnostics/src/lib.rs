//! Infrastructure Layer: Diagnostic Logging Building Blocks
//!
//! This crate provides the minimal logging facility the transport's
//! building blocks report through:
//! - LogLevel (severity scale with bounded name tables)
//! - Logger (process-global level-gated facade)
//! - LogSink (capability trait for pluggable record consumers)
//!
//! Components log non-fatal resource problems here instead of panicking;
//! everything that must be handled is still returned as an error value.

pub mod log_level;
pub mod logger;

pub use log_level::{LogLevel, LOG_LEVEL_COUNT};
pub use logger::{LogSink, Logger};
