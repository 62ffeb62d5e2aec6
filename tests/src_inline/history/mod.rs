use super::*;
use crate::fixtures::{criterion, snapshot};

fn snap(period: &str, overall: f64) -> Snapshot {
    let mut s = snapshot(period, "R. Vega", Vec::new(), vec![criterion("Testing", overall)]);
    s.overall_score = overall;
    s
}

#[test]
fn test_upsert_keeps_periods_ascending() {
    let mut history = History::new();
    assert_eq!(history.upsert(snap("2025-03", 3.0)), UpsertOutcome::Inserted);
    assert_eq!(history.upsert(snap("2024-09", 2.0)), UpsertOutcome::Inserted);
    assert_eq!(history.upsert(snap("2024-12", 2.5)), UpsertOutcome::Inserted);
    let periods: Vec<&str> = history.snapshots().iter().map(|s| s.period.as_str()).collect();
    assert_eq!(periods, vec!["2024-09", "2024-12", "2025-03"]);
    assert_eq!(history.latest().unwrap().period, "2025-03");
    assert_eq!(history.previous().unwrap().period, "2024-12");
}

#[test]
fn test_upsert_same_period_replaces_in_place() {
    let mut history = History::new();
    history.upsert(snap("2024-12", 2.5));
    history.upsert(snap("2025-03", 3.0));
    assert_eq!(history.upsert(snap("2024-12", 3.9)), UpsertOutcome::Replaced);
    assert_eq!(history.len(), 2);
    assert_eq!(history.get("2024-12").unwrap().overall_score, 3.9);
    assert_eq!(history.snapshots()[0].period, "2024-12");
}

#[test]
fn test_upsert_is_idempotent() {
    let mut once = History::new();
    once.upsert(snap("2024-12", 2.5));
    once.upsert(snap("2025-03", 3.0));
    let mut twice = once.clone();
    twice.upsert(snap("2025-03", 3.0));
    assert_eq!(once, twice);
}

#[test]
fn test_from_snapshots_last_entry_wins() {
    let history = History::from_snapshots(vec![
        snap("2025-03", 3.0),
        snap("2024-12", 2.5),
        snap("2025-03", 3.4),
    ]);
    assert_eq!(history.len(), 2);
    assert_eq!(history.latest().unwrap().overall_score, 3.4);
}

#[test]
fn test_single_snapshot_has_no_previous() {
    let history = History::from_snapshots(vec![snap("2025-03", 3.0)]);
    assert!(history.previous().is_none());
    assert!(History::new().latest().is_none());
    assert!(History::new().is_empty());
}
