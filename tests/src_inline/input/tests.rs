use super::*;
use crate::input::document::{DocumentFormat, detect_format};

fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_detect_format() {
    assert_eq!(detect_format(Path::new("a.json")), Some(DocumentFormat::Json));
    assert_eq!(detect_format(Path::new("a.YML")), Some(DocumentFormat::Yaml));
    assert_eq!(detect_format(Path::new("a.yaml")), Some(DocumentFormat::Yaml));
    assert_eq!(detect_format(Path::new("a.xlsx")), None);
    assert_eq!(detect_format(Path::new("answers")), None);
}

#[test]
fn test_period_resolution() {
    let mut meta = AssessmentMeta {
        date: "2025-03-14".to_string(),
        ..AssessmentMeta::default()
    };
    assert_eq!(meta.resolve_period().as_deref(), Some("2025-03"));
    meta.period = Some("2025-Q1".to_string());
    assert_eq!(meta.resolve_period().as_deref(), Some("2025-Q1"));
    meta.period = Some("  ".to_string());
    assert_eq!(meta.resolve_period().as_deref(), Some("2025-03"));
    assert_eq!(period_from_date("March 2025"), None);
    assert_eq!(period_from_date("2025"), None);
}

#[test]
fn test_load_answers_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "answers.json",
        r#"{
          "metadata": {"organization": "Acme", "assessor_name": "R. Vega", "date": "2025-03-14"},
          "responses": {
            "T0-Q1": {"answer": 4, "evidence": "runbook"},
            "T0-Q2": true,
            "T0-Q3": "3",
            "T0-Q4": {"answer": "We keep a wiki"},
            "T1-Q1": null,
            "T1-Q2": {"evidence": "none yet"}
          }
        }"#,
    );
    let answers = load_answers(&path).unwrap();
    assert_eq!(answers.meta.organization, "Acme");
    assert_eq!(answers.len(), 4);
    assert_eq!(answers.get("T0-Q1"), Some(&RawAnswer::Number(4.0)));
    assert_eq!(answers.get("T0-Q2"), Some(&RawAnswer::Bool(true)));
    assert_eq!(answers.get("T0-Q3"), Some(&RawAnswer::Text("3".to_string())));
    assert_eq!(answers.get("T1-Q1"), None);
    assert_eq!(answers.get("T1-Q2"), None);
}

#[test]
fn test_load_answers_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "answers.yaml",
        concat!(
            "metadata:\n  organization: Acme\n  period: 2025-Q2\n",
            "responses:\n  T0-Q1: 2\n  T0-Q2:\n    answer: no\n",
        ),
    );
    let answers = load_answers(&path).unwrap();
    assert_eq!(answers.meta.resolve_period().as_deref(), Some("2025-Q2"));
    assert_eq!(answers.get("T0-Q1"), Some(&RawAnswer::Number(2.0)));
    let ids: Vec<&str> = answers.question_ids().collect();
    assert_eq!(ids, vec!["T0-Q1", "T0-Q2"]);
}

#[test]
fn test_load_answers_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "answers.json", "{ not json");
    let err = load_answers(&path).unwrap_err();
    assert!(matches!(err, InputError::Document(DocumentError::Json { .. })));

    let err = load_answers(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, InputError::Document(DocumentError::Io { .. })));

    let path = write(&dir, "answers.txt", "{}");
    let err = load_answers(&path).unwrap_err();
    assert!(matches!(
        err,
        InputError::Document(DocumentError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_load_criterion_scores() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "scores.json",
        r#"{"metadata": {"date": "2025-04-01"}, "criteria": {"t0_rules": 3.5, "t0_docs": 2.0}}"#,
    );
    let input = load_criterion_scores(&path).unwrap();
    assert_eq!(input.scores.len(), 2);
    assert_eq!(input.scores["t0_rules"], 3.5);
    assert_eq!(input.meta.resolve_period().as_deref(), Some("2025-04"));

    let empty = write(&dir, "empty.json", r#"{"criteria": {}}"#);
    let err = load_criterion_scores(&empty).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}
