use super::*;

#[test]
fn test_status_threshold_is_inclusive() {
    assert_eq!(Status::from_score(3.0, 3.0), Status::Pass);
    assert_eq!(Status::from_score(2.99, 3.0), Status::BelowTarget);
}

#[test]
fn test_status_vocabulary_serializes_exactly() {
    assert_eq!(serde_json::to_string(&Status::Pass).unwrap(), "\"Pass\"");
    assert_eq!(
        serde_json::to_string(&Status::BelowTarget).unwrap(),
        "\"Below Target\""
    );
    let parsed: Progression = serde_json::from_str("\"In Progress\"").unwrap();
    assert_eq!(parsed, Progression::InProgress);
    assert_eq!(
        serde_json::to_string(&Progression::NotStarted).unwrap(),
        "\"Not Started\""
    );
}

#[test]
fn test_level_is_nearest_whole_level() {
    assert_eq!(MaturityLevel::from_score(1.0), MaturityLevel::Initial);
    assert_eq!(MaturityLevel::from_score(1.49), MaturityLevel::Initial);
    assert_eq!(MaturityLevel::from_score(2.51), MaturityLevel::Defined);
    assert_eq!(MaturityLevel::from_score(3.0), MaturityLevel::Defined);
    assert_eq!(MaturityLevel::from_score(4.51), MaturityLevel::Optimized);
    assert_eq!(MaturityLevel::from_score(5.0), MaturityLevel::Optimized);
    assert_eq!(MaturityLevel::from_number(6), None);
}

#[test]
fn test_level_halves_round_to_even() {
    assert_eq!(MaturityLevel::from_score(1.5), MaturityLevel::Repeatable);
    assert_eq!(MaturityLevel::from_score(2.5), MaturityLevel::Repeatable);
    assert_eq!(MaturityLevel::from_score(3.5), MaturityLevel::Managed);
    assert_eq!(MaturityLevel::from_score(4.5), MaturityLevel::Managed);
}

#[test]
fn test_section_inferred_from_tier_id() {
    assert_eq!(Section::infer_from_tier_id("tier_3"), Section::Core);
    assert_eq!(
        Section::infer_from_tier_id("enrichment_process"),
        Section::Enrichment
    );
}

#[test]
fn test_unknown_labels_load_leniently() {
    let status: Status = serde_json::from_str("\"N/A\"").unwrap();
    assert_eq!(status, Status::BelowTarget);
    let section: Section = serde_json::from_str("\"Tier 0\"").unwrap();
    assert_eq!(section, Section::Core);
    let section: Section = serde_json::from_str("\"Enrichment\"").unwrap();
    assert_eq!(section, Section::Enrichment);
    let progression: Progression = serde_json::from_str("\"n/a\"").unwrap();
    assert_eq!(progression, Progression::NotStarted);
}

#[test]
fn test_spreadsheet_status_markers_are_ignored() {
    let status: Status = serde_json::from_str("\"\u{2713} Pass\"").unwrap();
    assert_eq!(status, Status::Pass);
    let status: Status = serde_json::from_str("\"\u{2717} Below Target\"").unwrap();
    assert_eq!(status, Status::BelowTarget);
    let progression: Progression = serde_json::from_str("\"\u{25cf} In Progress\"").unwrap();
    assert_eq!(progression, Progression::InProgress);
}
