use std::path::Path;

use crate::input::document::{DocumentFormat, parse_document};
use crate::input::{AnswerSet, AssessmentMeta};
use crate::model::answers::RawAnswer;
use crate::model::levels::{MaturityLevel, Progression, Section, Status};
use crate::model::scores::{CriterionScore, TierScore};
use crate::model::snapshot::{Completion, Snapshot};
use crate::model::thresholds::ScoringThresholds;
use crate::rubric::RubricModel;
use crate::rubric::defs::{QuestionnaireFile, RubricFile};
use crate::rubric::loader::build_model;

pub const RUBRIC_JSON: &str = r#"{
  "tiers": [
    {"id": "tier_0", "name": "Foundation", "criteria": [
      {"id": "t0_rules", "name": "Rule Review", "weight": 1.0,
       "levels": {"1": {"qualitative": "Ad hoc"}, "3": {"qualitative": "Scheduled"}}},
      {"id": "t0_docs", "name": "Documentation", "weight": 1.0}
    ]},
    {"id": "tier_1", "name": "Basic", "criteria": [
      {"id": "t1_testing", "name": "Testing", "weight": 2.0},
      {"id": "t1_metrics", "name": "Metrics", "weight": 1.0}
    ]},
    {"id": "tier_2", "name": "Intermediate", "criteria": [
      {"id": "t2_automation", "name": "Automation"}
    ]},
    {"id": "enrichment_people", "name": "People", "criteria": [
      {"id": "en_training", "name": "Training", "weight": 1.0}
    ]}
  ]
}"#;

pub const QUESTIONNAIRE_JSON: &str = r#"{
  "questions": [
    {"id": "T0-Q1", "criterion": "t0_rules", "type": "scale"},
    {"id": "T0-Q2", "criterion": "t0_rules", "type": "checklist", "scoring": {"yes_value": 4}},
    {"id": "T0-Q3", "criterion": "t0_docs", "type": "scale"},
    {"id": "T0-Q4", "criterion": "t0_docs", "type": "text", "question": "Describe your docs"},
    {"id": "T1-Q1", "criterion": "t1_testing", "type": "scale"},
    {"id": "T1-Q2", "criterion": "t1_metrics", "type": "checklist"},
    {"id": "T2-Q1", "criterion": "t2_automation", "type": "text"},
    {"id": "EN-Q1", "criterion": "en_training", "type": "scale"}
  ]
}"#;

pub fn rubric_file() -> RubricFile {
    parse_document(RUBRIC_JSON, DocumentFormat::Json, Path::new("rubric.json")).unwrap()
}

pub fn questionnaire_file() -> QuestionnaireFile {
    parse_document(
        QUESTIONNAIRE_JSON,
        DocumentFormat::Json,
        Path::new("questionnaire.json"),
    )
    .unwrap()
}

pub fn sample_rubric() -> RubricModel {
    build_model(
        rubric_file(),
        questionnaire_file(),
        &ScoringThresholds::default_v1(),
    )
    .unwrap()
}

pub fn answers(pairs: &[(&str, RawAnswer)]) -> AnswerSet {
    let mut set = AnswerSet::new(AssessmentMeta {
        organization: "Acme".to_string(),
        assessor_name: "R. Vega".to_string(),
        date: "2025-03-14".to_string(),
        assessment_type: "self".to_string(),
        ..AssessmentMeta::default()
    });
    for (qid, answer) in pairs {
        set.insert(*qid, answer.clone());
    }
    set
}

pub fn criterion(name: &str, score: f64) -> CriterionScore {
    CriterionScore {
        id: name.to_ascii_lowercase(),
        criterion: name.to_string(),
        category: "Foundation".to_string(),
        tier_id: "tier_0".to_string(),
        section: Section::Core,
        score,
        level: MaturityLevel::from_score(score).as_str().to_string(),
        status: Status::from_score(score, 3.0),
        scored_questions: 1,
        total_questions: 1,
        external_scores: false,
    }
}

pub fn tier(id: &str, rank: Option<u32>, score: f64, status: Status) -> TierScore {
    TierScore {
        id: id.to_string(),
        name: id.to_string(),
        section: if rank.is_some() {
            Section::Core
        } else {
            Section::Enrichment
        },
        rank,
        score,
        level: MaturityLevel::from_score(score).as_str().to_string(),
        status,
        progression: Progression::NotStarted,
    }
}

pub fn snapshot(
    period: &str,
    assessor: &str,
    tiers: Vec<TierScore>,
    criteria: Vec<CriterionScore>,
) -> Snapshot {
    Snapshot {
        period: period.to_string(),
        org: "Acme".to_string(),
        assessor: assessor.to_string(),
        assessment_type: "self".to_string(),
        overall_score: 3.0,
        achieved_tier: "Tier 0: Foundation".to_string(),
        completion: Completion::from_counts(8, 8),
        tiers,
        criteria,
    }
}
