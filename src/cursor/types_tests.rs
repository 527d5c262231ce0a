//! Tests for cursor types

use super::*;

#[test]
fn test_index_kind_names() {
    assert_eq!(IndexKind::Depth.start_name(), "startIndex");
    assert_eq!(IndexKind::Depth.end_name(), "endIndex");
    assert_eq!(IndexKind::Time.start_name(), "startDateTimeIndex");
    assert_eq!(IndexKind::Time.end_name(), "endDateTimeIndex");
}

#[test]
fn test_only_depth_copies_attributes() {
    assert!(IndexKind::Depth.copies_attributes());
    assert!(!IndexKind::Time.copies_attributes());
}

#[test]
fn test_depth_retained_set() {
    for name in ["indexType", "direction", "startIndex", "endIndex"] {
        assert!(IndexKind::Depth.retains(name), "{} should be retained", name);
    }
    for name in ["startDateTimeIndex", "endDateTimeIndex", "logCurveInfo", "logData"] {
        assert!(!IndexKind::Depth.retains(name), "{} should be dropped", name);
    }
}

#[test]
fn test_time_retained_set() {
    for name in ["indexType", "direction", "startDateTimeIndex", "endDateTimeIndex"] {
        assert!(IndexKind::Time.retains(name), "{} should be retained", name);
    }
    for name in ["startIndex", "endIndex", "logCurveInfo"] {
        assert!(!IndexKind::Time.retains(name), "{} should be dropped", name);
    }
}

#[test]
fn test_depth_regression_detection() {
    assert!(IndexKind::Depth.is_regression("250", "100"));
    assert!(!IndexKind::Depth.is_regression("100", "250"));
    assert!(!IndexKind::Depth.is_regression("250", "250"));
    assert!(!IndexKind::Depth.is_regression(" 1.5 ", "2"));
}

#[test]
fn test_time_regression_detection() {
    assert!(IndexKind::Time.is_regression("2023-01-02T00:00:00Z", "2023-01-01T00:00:00Z"));
    assert!(!IndexKind::Time.is_regression("2023-01-01T00:00:00Z", "2023-01-02T00:00:00Z"));
    // Same instant in different offsets
    assert!(!IndexKind::Time.is_regression("2023-01-01T02:00:00+02:00", "2023-01-01T00:00:00Z"));
}

#[test]
fn test_unparseable_values_never_regress() {
    assert!(!IndexKind::Depth.is_regression("abc", "1"));
    assert!(!IndexKind::Time.is_regression("yesterday", "2023-01-01T00:00:00Z"));
    assert!(!IndexKind::Depth.is_regression("", "1"));
    assert!(!IndexKind::Depth.is_regression("1", ""));
}

#[test]
fn test_stop_update_into_empty_query() {
    let update = CursorUpdate::Stop(StopReason::MissingEndIndex);
    assert_eq!(update.into_query(), "");
}

#[test]
fn test_continue_update_into_query() {
    let update = CursorUpdate::Continue("<logs/>".to_string());
    assert_eq!(update.into_query(), "<logs/>");
}

#[test]
fn test_stop_reason_descriptions_are_distinct() {
    let reasons = [
        StopReason::UnsupportedObjectType,
        StopReason::MissingQueryLog,
        StopReason::MissingResultLog,
        StopReason::MissingEndIndex,
        StopReason::CheckpointRegressed,
    ];
    let mut descriptions: Vec<&str> = reasons.iter().map(|r| r.description()).collect();
    descriptions.sort();
    descriptions.dedup();
    assert_eq!(descriptions.len(), reasons.len());
}
