//! # Models Module Unit Tests / Models 模块单元测试
//!
//! Unit tests for `EntryResult` and the failure-phase taxonomy.
//!
//! `EntryResult` 和失败阶段分类的单元测试。

use pipeline_runner::core::config::{MatrixEntry, OsFamily};
use pipeline_runner::core::models::{EntryResult, FailurePhase};
use std::time::Duration;

fn sample_entry() -> MatrixEntry {
    MatrixEntry {
        os: OsFamily::Linux,
        runtime: "3.6".to_string(),
        env: Some("TOXENV=py36".to_string()),
    }
}

#[test]
fn test_passed_result_is_not_a_failure() {
    let result = EntryResult::Passed {
        entry: sample_entry(),
        output: "ok\n".to_string(),
        duration: Duration::from_secs(1),
        after_success_ok: true,
    };

    assert!(!result.is_failure());
    assert!(!result.has_after_success_warning());
    assert_eq!(result.entry_label(), "linux/3.6");
    assert_eq!(result.get_duration(), Some(Duration::from_secs(1)));
    assert_eq!(result.get_failure_phase(), None);
    assert_eq!(result.get_status_class(), "status-Passed");
}

#[test]
fn test_passed_with_upload_warning_still_passes() {
    let result = EntryResult::Passed {
        entry: sample_entry(),
        output: String::new(),
        duration: Duration::from_millis(120),
        after_success_ok: false,
    };

    // An after_success failure is surfaced as a warning, never a failure.
    assert!(!result.is_failure());
    assert!(result.has_after_success_warning());
    assert_eq!(result.get_status_class(), "status-Passed-Warning");
}

#[test]
fn test_failed_result() {
    let result = EntryResult::Failed {
        entry: sample_entry(),
        output: "boom\n".to_string(),
        phase: FailurePhase::Script,
        duration: Duration::from_secs(2),
    };

    assert!(result.is_failure());
    assert!(!result.has_after_success_warning());
    assert_eq!(result.get_failure_phase(), Some(FailurePhase::Script));
    assert_eq!(result.get_output(), "boom\n");
    assert_eq!(result.get_status_class(), "status-Failed");
}

#[test]
fn test_skipped_result() {
    let result = EntryResult::Skipped;

    assert!(!result.is_failure());
    assert_eq!(result.entry_label(), "Skipped");
    assert_eq!(result.get_duration(), None);
    assert_eq!(result.get_output(), "");
    assert_eq!(result.get_status_class(), "status-Skipped");
}

#[test]
fn test_status_strings_in_english() {
    let passed = EntryResult::Passed {
        entry: sample_entry(),
        output: String::new(),
        duration: Duration::ZERO,
        after_success_ok: true,
    };
    let warned = EntryResult::Passed {
        entry: sample_entry(),
        output: String::new(),
        duration: Duration::ZERO,
        after_success_ok: false,
    };
    let failed = EntryResult::Failed {
        entry: sample_entry(),
        output: String::new(),
        phase: FailurePhase::Install,
        duration: Duration::ZERO,
    };

    assert_eq!(passed.get_status_str("en"), "Passed");
    assert_eq!(warned.get_status_str("en"), "Passed (upload warning)");
    assert_eq!(failed.get_status_str("en"), "Failed");
    assert_eq!(EntryResult::Skipped.get_status_str("en"), "Skipped");
}

#[test]
fn test_failure_phase_display_names() {
    assert_eq!(FailurePhase::Provision.display_name("en"), "Provision");
    assert_eq!(FailurePhase::Install.display_name("en"), "Install");
    assert_eq!(FailurePhase::Script.display_name("en"), "Script");
}

#[test]
fn test_entry_result_json_serialization() {
    let result = EntryResult::Failed {
        entry: sample_entry(),
        output: "step failed\n".to_string(),
        phase: FailurePhase::Install,
        duration: Duration::from_secs(3),
    };

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"Failed\""));
    assert!(json.contains("\"Install\""));
    assert!(json.contains("\"linux\""));
}
