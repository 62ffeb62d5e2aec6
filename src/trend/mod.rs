pub mod analyzer;

use serde::Serialize;

use crate::model::levels::Status;
use crate::model::scores::CriterionScore;
use crate::model::snapshot::Snapshot;

pub use analyzer::analyze;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Regressing,
    Unchanged,
}

impl Trend {
    pub fn classify(delta: f64, threshold: f64) -> Self {
        if delta > threshold {
            Trend::Improving
        } else if delta < -threshold {
            Trend::Regressing
        } else {
            Trend::Unchanged
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Regressing => "regressing",
            Trend::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDelta {
    pub previous: f64,
    pub current: f64,
    pub delta: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDelta {
    pub id: String,
    pub name: String,
    pub previous: f64,
    pub current: f64,
    pub delta: f64,
    pub trend: Trend,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionDelta {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub criterion: String,
    pub category: String,
    pub previous: f64,
    pub current: f64,
    pub delta: f64,
    pub trend: Trend,
}

impl CriterionDelta {
    pub fn refers_to(&self, score: &CriterionScore) -> bool {
        self.id == score.id && self.category == score.category && self.criterion == score.criterion
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDelta {
    pub overall: ScoreDelta,
    pub tiers: Vec<TierDelta>,
    pub criteria: Vec<CriterionDelta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AttentionReason {
    Regression,
    BelowTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttentionItem {
    pub criterion: String,
    pub category: String,
    pub score: f64,
    pub delta: Option<f64>,
    pub reason: AttentionReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub current_period: String,
    pub previous_period: Option<String>,
    pub baseline: bool,
    pub assessor_changed: bool,
    pub current: Snapshot,
    pub previous_achieved_tier: Option<String>,
    pub delta: Option<SnapshotDelta>,
    pub biggest_improvements: Vec<CriterionDelta>,
    pub needs_attention: Vec<AttentionItem>,
}

#[cfg(test)]
#[path = "../../tests/src_inline/trend/mod.rs"]
mod tests;
