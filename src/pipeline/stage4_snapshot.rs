use crate::error::ScoreError;
use crate::model::scores::{CriterionScore, TierScore, round2, weighted_mean};
use crate::model::snapshot::{Completion, Snapshot};
use crate::model::thresholds::ScoringThresholds;
use crate::pipeline::stage3_tiers::AchievedTier;
use crate::rubric::RubricModel;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotMeta {
    pub period: String,
    pub org: String,
    pub assessor: String,
    pub assessment_type: String,
}

pub struct Stage4Inputs<'a> {
    pub rubric: &'a RubricModel,
    pub meta: &'a SnapshotMeta,
    pub criteria: Vec<CriterionScore>,
    pub tiers: Vec<TierScore>,
    pub achieved: &'a AchievedTier,
    pub completion: Completion,
    pub thresholds: &'a ScoringThresholds,
}

pub fn run_stage4(inputs: Stage4Inputs<'_>) -> Result<Snapshot, ScoreError> {
    let overall = overall_score(&inputs.criteria, inputs.rubric)?;
    let overall = round2(overall.clamp(inputs.thresholds.min_score, inputs.thresholds.max_score));

    Ok(Snapshot {
        period: inputs.meta.period.clone(),
        org: inputs.meta.org.clone(),
        assessor: inputs.meta.assessor.clone(),
        assessment_type: inputs.meta.assessment_type.clone(),
        overall_score: overall,
        achieved_tier: inputs.achieved.label().to_string(),
        completion: inputs.completion,
        tiers: inputs.tiers,
        criteria: inputs.criteria,
    })
}

// core and enrichment criteria alike
pub fn overall_score(
    criterion_scores: &[CriterionScore],
    rubric: &RubricModel,
) -> Result<f64, ScoreError> {
    let pairs = criterion_scores
        .iter()
        .map(|c| (c.score, rubric.weight_of(&c.id).unwrap_or(0.0)));
    weighted_mean(pairs).ok_or_else(|| ScoreError::InvalidWeights {
        scope: "overall score".to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_snapshot.rs"]
mod tests;
