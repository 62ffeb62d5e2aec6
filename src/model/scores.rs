use serde::{Deserialize, Serialize};

use crate::model::levels::{Progression, Section, Status};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScore {
    #[serde(default)]
    pub id: String,
    pub criterion: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tier_id: String,
    #[serde(default)]
    pub section: Section,
    pub score: f64,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub scored_questions: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub external_scores: bool,
}

impl CriterionScore {
    // entries without ids fall back to tier name plus criterion name
    pub fn same_criterion(&self, other: &CriterionScore) -> bool {
        if !self.id.is_empty() && !other.id.is_empty() {
            return self.id == other.id;
        }
        if !self.category.is_empty()
            && !other.category.is_empty()
            && self.category != other.category
        {
            return false;
        }
        self.criterion == other.criterion
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierScore {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub section: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub score: f64,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub progression: Progression,
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn weighted_mean<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut sum = 0.0;
    let mut total_weight = 0.0;
    for (score, weight) in pairs {
        sum += score * weight;
        total_weight += weight;
    }
    if total_weight > 0.0 {
        Some(sum / total_weight)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/scores.rs"]
mod tests;
