use serde::{Deserialize, Serialize};

use crate::model::scores::{CriterionScore, TierScore, round2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(rename = "date", alias = "period")]
    pub period: String,
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub assessor: String,
    #[serde(rename = "type", default)]
    pub assessment_type: String,
    pub overall_score: f64,
    #[serde(default)]
    pub achieved_tier: String,
    #[serde(default)]
    pub completion: Completion,
    #[serde(default)]
    pub tiers: Vec<TierScore>,
    #[serde(default)]
    pub criteria: Vec<CriterionScore>,
}

impl Snapshot {
    pub fn matching_criterion(&self, other: &CriterionScore) -> Option<&CriterionScore> {
        self.criteria.iter().find(|c| c.same_criterion(other))
    }

    pub fn tier(&self, id: &str) -> Option<&TierScore> {
        self.tiers.iter().find(|t| t.id == id)
    }
}

/// Older history files store completion as `"12 / 40"` or a bare
/// percentage; all forms load into the same struct.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "CompletionRepr")]
pub struct Completion {
    pub answered: u32,
    pub total: u32,
    pub percent: f64,
}

impl Completion {
    pub fn from_counts(answered: u32, total: u32) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            round2(answered as f64 * 100.0 / total as f64)
        };
        Self {
            answered,
            total,
            percent,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CompletionRepr {
    Detailed {
        #[serde(default)]
        answered: u32,
        #[serde(default)]
        total: u32,
        percent: f64,
    },
    Percent(f64),
    Text(String),
}

impl From<CompletionRepr> for Completion {
    fn from(value: CompletionRepr) -> Self {
        match value {
            CompletionRepr::Detailed {
                answered,
                total,
                percent,
            } => Completion {
                answered,
                total,
                percent,
            },
            CompletionRepr::Percent(percent) => Completion {
                answered: 0,
                total: 0,
                percent,
            },
            CompletionRepr::Text(text) => parse_completion_text(&text),
        }
    }
}

fn parse_completion_text(text: &str) -> Completion {
    let trimmed = text.trim();
    if let Some((answered, total)) = trimmed.split_once('/') {
        if let (Ok(answered), Ok(total)) = (
            answered.trim().parse::<u32>(),
            total.trim().parse::<u32>(),
        ) {
            return Completion::from_counts(answered, total);
        }
    }
    let percent = trimmed
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .unwrap_or(0.0);
    Completion {
        answered: 0,
        total: 0,
        percent,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/snapshot.rs"]
mod tests;
