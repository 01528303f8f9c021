//! Integration tests for infrastructure_diagnostics crate
//!
//! These tests verify the logger facade end to end with a sink installed
//! through the public capability trait.

use std::sync::{Arc, Mutex};

use infrastructure_diagnostics::{LogLevel, LogSink, Logger};

#[derive(Default)]
struct CapturingSink {
    lines: Mutex<Vec<String>>,
}

impl LogSink for CapturingSink {
    fn consume(&self, level: LogLevel, origin: &str, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("[{}] {}: {}", level.display_text(), origin, message));
    }
}

// One test function: logger state is process-global.
#[test]
fn test_logger_end_to_end() {
    let sink = Arc::new(CapturingSink::default());
    Logger::set_sink(sink.clone());
    Logger::set_log_level(LogLevel::Debug);

    Logger::warn("mutex", "destroying a mutex which is still locked");
    Logger::debug("port", "port 17 marked for destruction");
    Logger::trace("port", "dropped, threshold is Debug");

    let lines = sink.lines.lock().unwrap().clone();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "[Warn] mutex: destroying a mutex which is still locked"
    );
    assert_eq!(lines[1], "[Debug] port: port 17 marked for destruction");

    // raising the threshold to Off silences everything
    Logger::set_log_level(LogLevel::Off);
    Logger::fatal("mutex", "not recorded");
    assert_eq!(sink.lines.lock().unwrap().len(), 2);
}
