//! Tests for error types

use std::path::PathBuf;

use lcs_perf::Error;

#[test]
fn test_no_data_error() {
    let error = Error::NoData(PathBuf::from("logsmpi"));
    let error_str = format!("{error}");
    assert!(error_str.contains("No usable measurements"));
    assert!(error_str.contains("logsmpi"));
    assert!(error_str.contains("run file template"));
}

#[test]
fn test_invalid_config_error() {
    let error = Error::InvalidConfig("runs must be positive".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid configuration"));
    assert!(error_str.contains("runs must be positive"));
}

#[test]
fn test_malformed_log_error() {
    let error = Error::MalformedLog {
        path: PathBuf::from("logs/100/2/7.log"),
        reason: "missing `Score` field".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Malformed log"));
    assert!(error_str.contains("logs/100/2/7.log"));
    assert!(error_str.contains("Score"));
}

#[test]
fn test_other_error() {
    let error = Error::Other("custom error message".to_string());
    assert_eq!(format!("{error}"), "custom error message");
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("file not found"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}

#[test]
fn test_pattern_error_conversion() {
    let regex_error = regex::Regex::new("(unclosed").unwrap_err();
    let error: Error = regex_error.into();
    assert!(format!("{error}").contains("Log pattern error"));
}

#[test]
fn test_error_debug() {
    let error = Error::InvalidConfig("debug test".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("InvalidConfig"));
}
