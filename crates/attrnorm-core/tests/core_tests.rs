use attrnorm_core::{
    FailureKind, NormalizeConfig, NormalizeError, Outcome, ResetFailure, RunReport,
};
use std::path::PathBuf;

#[test]
fn test_report_json_shape() {
    let mut report = RunReport::new("/work");
    report.record_success("/work/a.txt");
    report.record_failure(
        "/work/b.txt",
        ResetFailure::new(FailureKind::PermissionDenied, "Operation not permitted"),
    );

    let json = serde_json::to_value(&report).unwrap();
    let outcomes = json["outcomes"].as_array().unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0]["path"], "/work/a.txt");
    assert_eq!(outcomes[0]["status"], "success");
    assert_eq!(outcomes[1]["status"], "failure");
    assert_eq!(outcomes[1]["kind"], "permission_denied");
    assert_eq!(outcomes[1]["message"], "Operation not permitted");

    // Nothing skipped, so the field is left out
    assert!(json.get("skipped").is_none());
}

#[test]
fn test_report_from_json() {
    let json = r#"{
        "root": "/work",
        "outcomes": [
            { "path": "/work/a.txt", "status": "success" },
            { "path": "/work/b.txt", "status": "failure", "kind": "not_found", "message": "gone" }
        ],
        "elapsed": { "secs": 0, "nanos": 5000 }
    }"#;

    let report: RunReport = serde_json::from_str(json).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.failed(), 1);
    assert!(report.skipped.is_empty());
    assert_eq!(
        report.outcome_for("/work/b.txt"),
        Some(&Outcome::Failure(ResetFailure::new(FailureKind::NotFound, "gone")))
    );
}

#[test]
fn test_config_from_json_defaults() {
    let config: NormalizeConfig = serde_json::from_str(r#"{ "root": "/work" }"#).unwrap();
    assert_eq!(config.root, PathBuf::from("/work"));
    assert!(!config.skip_unreadable_dirs);
}

#[test]
fn test_failure_display() {
    let failure = ResetFailure::new(FailureKind::PermissionDenied, "denied");
    assert_eq!(failure.to_string(), "Permission denied: denied");
}

#[test]
fn test_root_not_found_message() {
    let err = NormalizeError::RootNotFound {
        path: PathBuf::from("/no/such/dir"),
    };
    assert_eq!(err.to_string(), "Root directory not found: /no/such/dir");
}
