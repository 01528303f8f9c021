//! Log level definitions
//!
//! Provides the severity scale used to gate diagnostic output.

use std::fmt;

/// Severity of a diagnostic record
///
/// `Off` is only meaningful as a threshold (suppress everything); records
/// themselves carry one of the six concrete severities.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Threshold value suppressing all output
    Off = 0,
    /// Unrecoverable condition, the component cannot continue
    Fatal,
    /// Operation failed, the component continues degraded
    Error,
    /// Unexpected condition that was recovered from
    Warn,
    /// Normal lifecycle information
    Info,
    /// Detail useful when chasing a misbehaviour
    Debug,
    /// Finest-grained tracing output
    Trace,
}

/// Number of log levels, bounds the parallel name tables
pub const LOG_LEVEL_COUNT: usize = 7;

static LOG_LEVEL_NAMES: [&str; LOG_LEVEL_COUNT] =
    ["OFF", "FATAL", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"];

static LOG_LEVEL_DISPLAY_TEXT: [&str; LOG_LEVEL_COUNT] =
    ["", "Fatal", "Error", "Warn", "Info", "Debug", "Trace"];

impl LogLevel {
    /// Get the name of the level
    pub fn as_str(self) -> &'static str {
        LOG_LEVEL_NAMES[self as usize]
    }

    /// Get the short text a console sink prefixes records with
    pub fn display_text(self) -> &'static str {
        LOG_LEVEL_DISPLAY_TEXT[self as usize]
    }

    /// Convert a raw threshold value back into a level
    ///
    /// Values outside the valid range fall back to `Off`, suppressing
    /// output rather than amplifying it.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Fatal,
            2 => LogLevel::Error,
            3 => LogLevel::Warn,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            6 => LogLevel::Trace,
            _ => LogLevel::Off,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::Off.as_str(), "OFF");
        assert_eq!(LogLevel::Fatal.as_str(), "FATAL");
        assert_eq!(LogLevel::Error.as_str(), "ERROR");
        assert_eq!(LogLevel::Warn.as_str(), "WARN");
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Debug.as_str(), "DEBUG");
        assert_eq!(LogLevel::Trace.as_str(), "TRACE");
    }

    #[test]
    fn test_display_text() {
        assert_eq!(LogLevel::Off.display_text(), "");
        assert_eq!(LogLevel::Fatal.display_text(), "Fatal");
        assert_eq!(LogLevel::Trace.display_text(), "Trace");
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Off < LogLevel::Fatal);
        assert!(LogLevel::Fatal < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }

    #[test]
    fn test_from_u8_round_trip() {
        for level in [
            LogLevel::Off,
            LogLevel::Fatal,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert_eq!(LogLevel::from_u8(level as u8), level);
        }
    }

    #[test]
    fn test_from_u8_out_of_range_suppresses() {
        assert_eq!(LogLevel::from_u8(7), LogLevel::Off);
        assert_eq!(LogLevel::from_u8(255), LogLevel::Off);
    }

    #[test]
    fn test_count_bounds_name_tables() {
        assert_eq!(LOG_LEVEL_NAMES.len(), LOG_LEVEL_COUNT);
        assert_eq!(LOG_LEVEL_DISPLAY_TEXT.len(), LOG_LEVEL_COUNT);
        assert_eq!(LogLevel::Trace as usize, LOG_LEVEL_COUNT - 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", LogLevel::Warn), "WARN");
    }
}
