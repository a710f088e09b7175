//! Level parsing tests

use pretty_assertions::assert_eq;
use xlog_core::{log_level_to_string, parse_log_level, Severity, UNKNOWN_LEVEL};

#[test]
fn test_round_trip_for_every_severity() {
    for severity in Severity::ALL {
        let name = log_level_to_string(severity.into());
        assert_eq!(parse_log_level(name), severity);
    }
}

#[test]
fn test_names() {
    let names: Vec<&str> = (0..4).map(log_level_to_string).collect();
    assert_eq!(names, vec!["debug", "info", "warn", "error"]);
}

#[test]
fn test_unknown_values_have_sentinel_name() {
    for level in [-1, 4, 42, i32::MIN, i32::MAX] {
        assert_eq!(log_level_to_string(level), UNKNOWN_LEVEL);
    }
    assert_eq!(UNKNOWN_LEVEL, "unknown level");
}

#[test]
fn test_parsing_ignores_case() {
    assert_eq!(parse_log_level("ERROR"), Severity::Error);
    assert_eq!(parse_log_level("Error"), Severity::Error);
    assert_eq!(parse_log_level("error"), Severity::Error);
    assert_eq!(parse_log_level("DeBuG"), Severity::Debug);
}

#[test]
fn test_unrecognized_names_fall_back_to_info() {
    assert_eq!(parse_log_level("bogus"), Severity::Info);
    assert_eq!(parse_log_level(""), Severity::Info);
    assert_eq!(parse_log_level(" error "), Severity::Info);
}
