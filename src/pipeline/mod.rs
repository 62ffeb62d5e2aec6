pub mod stage1_questions;
pub mod stage2_criteria;
pub mod stage3_tiers;
pub mod stage4_snapshot;

use crate::error::ScoreError;
use crate::input::{AnswerSet, CriterionScoreInput};
use crate::model::snapshot::{Completion, Snapshot};
use crate::model::thresholds::ScoringThresholds;
use crate::rubric::RubricModel;
use crate::scorer::TextScorer;
use stage1_questions::{ReviewItem, Stage1Inputs, run_stage1};
use stage2_criteria::{build_criterion_score, run_stage2};
use stage3_tiers::run_stage3;
use stage4_snapshot::{SnapshotMeta, Stage4Inputs, run_stage4};

#[derive(Debug)]
pub struct Assessment {
    pub snapshot: Snapshot,
    pub issues: Vec<ScoreError>,
    pub pending_review: Vec<ReviewItem>,
    pub unanswered: Vec<String>,
    pub incomplete: Vec<String>,
}

pub fn run_assessment(
    rubric: &RubricModel,
    answers: &AnswerSet,
    text_scorer: Option<&dyn TextScorer>,
    meta: &SnapshotMeta,
    thresholds: &ScoringThresholds,
) -> Result<Assessment, ScoreError> {
    for qid in answers.question_ids() {
        if rubric.question(qid).is_none() {
            tracing::warn!(question = %qid, "response for unknown question ignored");
        }
    }
    let stage1 = run_stage1(&Stage1Inputs {
        rubric,
        answers,
        text_scorer,
        thresholds,
    });
    let answered = stage1.outcomes.iter().filter(|o| o.is_answered()).count();
    let completion = Completion::from_counts(answered as u32, stage1.outcomes.len() as u32);
    let unanswered = stage1
        .outcomes
        .iter()
        .filter(|o| !o.is_answered())
        .map(|o| o.question_id.clone())
        .collect::<Vec<_>>();

    let stage2 = run_stage2(rubric, &stage1.outcomes, thresholds);
    let stage3 = run_stage3(rubric, &stage2.scores, thresholds);

    let mut issues = stage1.issues;
    issues.extend(stage2.issues);
    issues.extend(stage3.issues);

    let unscored = stage2.scores.is_empty();
    let snapshot = run_stage4(Stage4Inputs {
        rubric,
        meta,
        criteria: stage2.scores,
        tiers: stage3.tiers,
        achieved: &stage3.achieved,
        completion,
        thresholds,
    })
    .map_err(|err| name_unscored(err, unscored, &stage2.incomplete))?;

    tracing::info!(
        period = %snapshot.period,
        overall = snapshot.overall_score,
        achieved = %snapshot.achieved_tier,
        issues = issues.len(),
        pending_review = stage1.pending_review.len(),
        "assessment scored"
    );

    Ok(Assessment {
        snapshot,
        issues,
        pending_review: stage1.pending_review,
        unanswered,
        incomplete: stage2.incomplete,
    })
}

pub fn run_preaggregated(
    rubric: &RubricModel,
    input: &CriterionScoreInput,
    meta: &SnapshotMeta,
    thresholds: &ScoringThresholds,
) -> Result<Assessment, ScoreError> {
    let mut issues = Vec::new();
    let mut criteria = Vec::new();
    let mut incomplete = Vec::new();

    for criterion in rubric.criteria() {
        match input.scores.get(&criterion.id) {
            Some(&score) if thresholds.in_range(score) => criteria.push(build_criterion_score(
                rubric,
                criterion,
                score,
                (0, 0),
                false,
                thresholds,
            )),
            Some(&score) => {
                issues.push(ScoreError::InvalidCriterionScore {
                    criterion: criterion.id.clone(),
                    reason: format!("score {score} is outside 1-5"),
                });
                incomplete.push(criterion.id.clone());
            }
            None => incomplete.push(criterion.id.clone()),
        }
    }
    for id in input.scores.keys() {
        if rubric.criterion(id).is_none() {
            issues.push(ScoreError::InvalidCriterionScore {
                criterion: id.clone(),
                reason: "not defined in the rubric".to_string(),
            });
        }
    }

    let completion =
        Completion::from_counts(criteria.len() as u32, rubric.criteria().len() as u32);
    let stage3 = run_stage3(rubric, &criteria, thresholds);
    issues.extend(stage3.issues);

    let unscored = criteria.is_empty();
    let snapshot = run_stage4(Stage4Inputs {
        rubric,
        meta,
        criteria,
        tiers: stage3.tiers,
        achieved: &stage3.achieved,
        completion,
        thresholds,
    })
    .map_err(|err| name_unscored(err, unscored, &incomplete))?;

    Ok(Assessment {
        snapshot,
        issues,
        pending_review: Vec::new(),
        unanswered: Vec::new(),
        incomplete,
    })
}

fn name_unscored(err: ScoreError, unscored: bool, incomplete: &[String]) -> ScoreError {
    match err {
        ScoreError::InvalidWeights { .. } if unscored => ScoreError::InvalidWeights {
            scope: format!(
                "overall score (no scored criteria; incomplete: {})",
                incomplete.join(", ")
            ),
        },
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
