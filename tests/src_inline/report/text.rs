use super::*;
use crate::fixtures::{answers, criterion, sample_rubric, snapshot, tier};
use crate::history::History;
use crate::model::answers::RawAnswer;
use crate::model::levels::Status;
use crate::model::thresholds::ScoringThresholds;
use crate::pipeline::run_assessment;
use crate::pipeline::stage4_snapshot::SnapshotMeta;
use crate::trend::analyze;

#[test]
fn test_scorecard_lists_tiers_and_flags() {
    let rubric = sample_rubric();
    let set = answers(&[
        ("T0-Q1", RawAnswer::Number(4.0)),
        ("T0-Q3", RawAnswer::Number(3.0)),
        ("T0-Q4", RawAnswer::Text("We keep a wiki".to_string())),
    ]);
    let meta = SnapshotMeta {
        period: "2025-03".to_string(),
        org: "Acme".to_string(),
        assessor: "R. Vega".to_string(),
        assessment_type: "self".to_string(),
    };
    let assessment = run_assessment(
        &rubric,
        &set,
        None,
        &meta,
        &ScoringThresholds::default_v1(),
    )
    .unwrap();
    let text = render_scorecard_text(&assessment);

    assert!(text.contains("Organization: Acme"));
    assert!(text.contains("Achieved tier: Tier 0: Foundation"));
    assert!(text.contains("--- Foundation (3.50/5.0, Managed, Pass, Complete) ---"));
    assert!(text.contains("  Rule Review: 4.00 (Managed, Pass)"));
    assert!(text.contains("Text answers pending review:"));
    assert!(text.contains("T0-Q4 (t0_docs): We keep a wiki"));
    assert!(text.contains("Incomplete criteria"));
}

#[test]
fn test_trend_text_baseline() {
    let history = History::from_snapshots(vec![snapshot(
        "2025-03",
        "R. Vega",
        vec![tier("tier_0", Some(0), 2.5, Status::BelowTarget)],
        vec![criterion("Testing", 2.5)],
    )]);
    let report = analyze(&history, &ScoringThresholds::default_v1()).unwrap();
    let text = render_trend_text(&report);
    assert!(text.contains("Baseline established"));
    assert!(text.contains("  tier_0: 2.50 (Below Target)"));
    assert!(text.contains("  Testing: 2.50 (below target)"));
}

#[test]
fn test_trend_text_with_previous_period() {
    let history = History::from_snapshots(vec![
        snapshot(
            "2024-12",
            "R. Vega",
            vec![tier("tier_0", Some(0), 2.0, Status::BelowTarget)],
            vec![criterion("Testing", 2.0), criterion("Docs", 3.5)],
        ),
        snapshot(
            "2025-03",
            "K. Obi",
            vec![tier("tier_0", Some(0), 3.5, Status::Pass)],
            vec![criterion("Testing", 3.5), criterion("Docs", 3.0)],
        ),
    ]);
    let report = analyze(&history, &ScoringThresholds::default_v1()).unwrap();
    let text = render_trend_text(&report);
    assert!(text.contains("Compared with: 2024-12"));
    assert!(text.contains("WARNING: assessor changed"));
    assert!(text.contains("  tier_0: 2.00 -> 3.50 (+1.50, improving)"));
    assert!(text.contains("  Testing: +1.50"));
    assert!(text.contains("  Docs: 3.00 (regressed -0.50)"));
}
