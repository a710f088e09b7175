//! Emitted line layout tests

use pretty_assertions::assert_eq;
use tests::{parse_line, CaptureWriter, TIMESTAMP, TIMESTAMP_WITH_TIMEZONE};
use xlog_core::{Logger, Severity};

#[test]
fn test_line_columns() {
    let writer = CaptureWriter::new();
    let logger = Logger::with_writer(writer.clone(), Severity::Debug, false);

    let line = line!() + 1;
    xlog_core::error!(logger: &logger, "disk {} at {}%", "/dev/sda1", 97);

    let lines = writer.lines();
    assert_eq!(lines.len(), 1);
    let parsed = parse_line(&lines[0]).expect("line does not match layout");
    assert_eq!(parsed.level, "E");
    assert_eq!(parsed.pid, std::process::id());
    assert_eq!(parsed.file, "line_format.rs");
    assert_eq!(parsed.line, line);
    assert_eq!(parsed.message, "disk /dev/sda1 at 97%");
    assert!(TIMESTAMP.is_match(&parsed.timestamp), "{}", parsed.timestamp);
}

#[test]
fn test_timestamp_with_timezone() {
    let writer = CaptureWriter::new();
    let logger = Logger::with_writer(writer.clone(), Severity::Debug, true);

    xlog_core::info!(logger: &logger, "tz");

    let lines = writer.lines();
    let parsed = parse_line(&lines[0]).expect("line does not match layout");
    assert!(
        TIMESTAMP_WITH_TIMEZONE.is_match(&parsed.timestamp),
        "{}",
        parsed.timestamp
    );
    assert!(!TIMESTAMP.is_match(&parsed.timestamp));
}

#[test]
fn test_one_line_per_call() {
    let writer = CaptureWriter::new();
    let logger = Logger::with_writer(writer.clone(), Severity::Debug, false);

    for i in 0..10 {
        xlog_core::debug!(logger: &logger, "event {}", i);
    }

    let messages: Vec<String> = writer
        .lines()
        .iter()
        .filter_map(|l| parse_line(l))
        .map(|p| p.message)
        .collect();
    let expected: Vec<String> = (0..10).map(|i| format!("event {}", i)).collect();
    assert_eq!(messages, expected);
}

#[test]
fn test_threshold_boundaries() {
    for (threshold, passing) in [
        (Severity::Debug, vec!["D", "I", "W", "E"]),
        (Severity::Info, vec!["I", "W", "E"]),
        (Severity::Warn, vec!["W", "E"]),
        (Severity::Error, vec!["E"]),
    ] {
        let writer = CaptureWriter::new();
        let logger = Logger::with_writer(writer.clone(), threshold, false);

        xlog_core::debug!(logger: &logger, "d");
        xlog_core::info!(logger: &logger, "i");
        xlog_core::warn!(logger: &logger, "w");
        xlog_core::error!(logger: &logger, "e");

        let levels: Vec<String> = writer
            .lines()
            .iter()
            .filter_map(|l| parse_line(l))
            .map(|p| p.level)
            .collect();
        assert_eq!(levels, passing, "threshold {}", threshold);
    }
}
