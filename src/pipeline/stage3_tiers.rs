use crate::error::ScoreError;
use crate::model::levels::{MaturityLevel, Progression, Section, Status};
use crate::model::scores::{CriterionScore, TierScore, round2, weighted_mean};
use crate::model::thresholds::ScoringThresholds;
use crate::rubric::{RubricModel, Tier};

pub const BELOW_FOUNDATION: &str = "Below Foundation";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AchievedTier {
    Tier { id: String, label: String, rank: u32 },
    BelowFoundation,
}

impl AchievedTier {
    pub fn rank(&self) -> Option<u32> {
        match self {
            AchievedTier::Tier { rank, .. } => Some(*rank),
            AchievedTier::BelowFoundation => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AchievedTier::Tier { label, .. } => label,
            AchievedTier::BelowFoundation => BELOW_FOUNDATION,
        }
    }
}

#[derive(Debug)]
pub struct Stage3Output {
    pub tiers: Vec<TierScore>,
    pub achieved: AchievedTier,
    pub issues: Vec<ScoreError>,
}

pub fn run_stage3(
    rubric: &RubricModel,
    criterion_scores: &[CriterionScore],
    thresholds: &ScoringThresholds,
) -> Stage3Output {
    let mut tiers = Vec::with_capacity(rubric.tiers().len());
    let mut issues = Vec::new();

    for tier in rubric.tiers() {
        match score_tier(rubric, tier, criterion_scores, thresholds) {
            Ok(score) => tiers.push(score),
            Err(err) => {
                tracing::debug!(tier = %tier.id, error = %err, "tier not scored");
                issues.push(err);
            }
        }
    }

    let achieved = achieved_tier(&tiers);
    if let AchievedTier::Tier { id, rank, .. } = &achieved {
        tracing::debug!(tier = %id, rank, "achieved tier");
    }
    for score in &mut tiers {
        let any_member_pass = criterion_scores
            .iter()
            .any(|c| c.tier_id == score.id && c.status.is_pass());
        score.progression = tier_progression(score, achieved.rank(), any_member_pass);
    }

    Stage3Output {
        tiers,
        achieved,
        issues,
    }
}

// passes only when every member is scored and passes, whatever the mean
pub fn score_tier(
    rubric: &RubricModel,
    tier: &Tier,
    criterion_scores: &[CriterionScore],
    thresholds: &ScoringThresholds,
) -> Result<TierScore, ScoreError> {
    let mut pairs = Vec::with_capacity(tier.criteria.len());
    let mut all_pass = true;
    for criterion in rubric.criteria_by_tier(&tier.id) {
        match criterion_scores.iter().find(|c| c.id == criterion.id) {
            Some(score) => {
                pairs.push((score.score, criterion.weight));
                all_pass &= score.status.is_pass();
            }
            None => all_pass = false,
        }
    }

    let mean = weighted_mean(pairs).ok_or_else(|| ScoreError::InvalidWeights {
        scope: format!("tier {}", tier.id),
    })?;
    let score = round2(mean.clamp(thresholds.min_score, thresholds.max_score));

    Ok(TierScore {
        id: tier.id.clone(),
        name: tier.name.clone(),
        section: tier.section,
        rank: tier.rank,
        score,
        level: MaturityLevel::from_score(score).as_str().to_string(),
        status: if all_pass {
            Status::Pass
        } else {
            Status::BelowTarget
        },
        progression: Progression::NotStarted,
    })
}

// a missing rank breaks the chain like a failing one
pub fn achieved_tier(tier_scores: &[TierScore]) -> AchievedTier {
    let mut core = tier_scores
        .iter()
        .filter(|t| t.section == Section::Core)
        .filter_map(|t| t.rank.map(|rank| (rank, t)))
        .collect::<Vec<_>>();
    core.sort_by_key(|(rank, _)| *rank);

    let mut achieved = AchievedTier::BelowFoundation;
    let mut expected = 0u32;
    for (rank, tier) in core {
        if rank != expected || !tier.status.is_pass() {
            break;
        }
        achieved = AchievedTier::Tier {
            id: tier.id.clone(),
            label: format!("Tier {rank}: {}", tier.name),
            rank,
        };
        expected += 1;
    }
    achieved
}

pub fn tier_progression(
    tier: &TierScore,
    achieved_rank: Option<u32>,
    any_member_pass: bool,
) -> Progression {
    let fallback = if any_member_pass {
        Progression::InProgress
    } else {
        Progression::NotStarted
    };
    match (tier.section, tier.rank) {
        (Section::Core, Some(rank)) => {
            let next = achieved_rank.map_or(0, |r| r + 1);
            if achieved_rank.is_some_and(|r| rank <= r) {
                Progression::Complete
            } else if rank == next {
                Progression::Current
            } else {
                fallback
            }
        }
        _ => {
            if tier.status.is_pass() {
                Progression::Complete
            } else {
                fallback
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_tiers.rs"]
mod tests;
