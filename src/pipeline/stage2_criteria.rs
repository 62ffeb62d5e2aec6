use crate::error::ScoreError;
use crate::model::levels::{MaturityLevel, Status};
use crate::model::scores::{CriterionScore, round2};
use crate::model::thresholds::ScoringThresholds;
use crate::pipeline::stage1_questions::{QuestionOutcome, QuestionStatus};
use crate::rubric::{Criterion, RubricModel};

#[derive(Debug, Default)]
pub struct Stage2Output {
    pub scores: Vec<CriterionScore>,
    pub incomplete: Vec<String>,
    pub issues: Vec<ScoreError>,
}

pub fn run_stage2(
    rubric: &RubricModel,
    outcomes: &[QuestionOutcome],
    thresholds: &ScoringThresholds,
) -> Stage2Output {
    let mut out = Stage2Output::default();

    for criterion in rubric.criteria() {
        let members = outcomes
            .iter()
            .filter(|o| o.criterion_id == criterion.id)
            .collect::<Vec<_>>();
        match score_criterion(rubric, criterion, &members, thresholds) {
            Ok(score) => out.scores.push(score),
            Err(err) => {
                tracing::debug!(criterion = %criterion.id, error = %err, "criterion excluded");
                out.incomplete.push(criterion.id.clone());
                out.issues.push(err);
            }
        }
    }

    out
}

pub fn score_criterion(
    rubric: &RubricModel,
    criterion: &Criterion,
    outcomes: &[&QuestionOutcome],
    thresholds: &ScoringThresholds,
) -> Result<CriterionScore, ScoreError> {
    let scored = outcomes.iter().filter_map(|o| o.score()).collect::<Vec<_>>();
    if scored.is_empty() {
        let pending_review = outcomes
            .iter()
            .filter(|o| o.status == QuestionStatus::PendingReview)
            .count();
        return Err(ScoreError::IncompleteCriterion {
            criterion: criterion.id.clone(),
            pending_review,
        });
    }

    let mean = scored.iter().sum::<f64>() / scored.len() as f64;
    let external = outcomes.iter().any(|o| o.external);
    Ok(build_criterion_score(
        rubric,
        criterion,
        mean,
        (scored.len() as u32, outcomes.len() as u32),
        external,
        thresholds,
    ))
}

pub fn build_criterion_score(
    rubric: &RubricModel,
    criterion: &Criterion,
    score: f64,
    (scored_questions, total_questions): (u32, u32),
    external_scores: bool,
    thresholds: &ScoringThresholds,
) -> CriterionScore {
    let score = round2(score.clamp(thresholds.min_score, thresholds.max_score));
    let category = rubric
        .tier(&criterion.tier_id)
        .map(|t| t.name.clone())
        .unwrap_or_default();
    CriterionScore {
        id: criterion.id.clone(),
        criterion: criterion.name.clone(),
        category,
        tier_id: criterion.tier_id.clone(),
        section: criterion.section,
        score,
        level: MaturityLevel::from_score(score).as_str().to_string(),
        status: Status::from_score(score, thresholds.pass_score),
        scored_questions,
        total_questions,
        external_scores,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_criteria.rs"]
mod tests;
