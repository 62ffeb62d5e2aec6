use std::fmt;

use serde::{Deserialize, Serialize};

// unknown labels in older snapshots (e.g. `N/A`) load as `Below Target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Status {
    #[serde(rename = "Pass")]
    Pass,
    #[default]
    #[serde(rename = "Below Target")]
    BelowTarget,
}

impl Status {
    pub fn from_score(score: f64, pass_score: f64) -> Self {
        if score >= pass_score {
            Status::Pass
        } else {
            Status::BelowTarget
        }
    }

    pub fn is_pass(self) -> bool {
        self == Status::Pass
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "Pass",
            Status::BelowTarget => "Below Target",
        }
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        if strip_marker(&value).eq_ignore_ascii_case("pass") {
            Status::Pass
        } else {
            Status::BelowTarget
        }
    }
}

// spreadsheet exports prefix labels with a check mark or cross
fn strip_marker(value: &str) -> &str {
    value
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim()
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Progression {
    #[serde(rename = "Complete")]
    Complete,
    #[serde(rename = "Current")]
    Current,
    #[serde(rename = "In Progress")]
    InProgress,
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
}

impl Progression {
    pub fn as_str(self) -> &'static str {
        match self {
            Progression::Complete => "Complete",
            Progression::Current => "Current",
            Progression::InProgress => "In Progress",
            Progression::NotStarted => "Not Started",
        }
    }
}

impl From<String> for Progression {
    fn from(value: String) -> Self {
        match strip_marker(&value).to_ascii_lowercase().as_str() {
            "complete" => Progression::Complete,
            "current" => Progression::Current,
            "in progress" => Progression::InProgress,
            _ => Progression::NotStarted,
        }
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Section {
    #[default]
    Core,
    Enrichment,
}

impl Section {
    pub fn infer_from_tier_id(tier_id: &str) -> Self {
        if tier_id.starts_with("enrichment") {
            Section::Enrichment
        } else {
            Section::Core
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Core => "core",
            Section::Enrichment => "enrichment",
        }
    }
}

impl From<String> for Section {
    fn from(value: String) -> Self {
        Section::infer_from_tier_id(&value.trim().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MaturityLevel {
    Initial = 1,
    Repeatable = 2,
    Defined = 3,
    Managed = 4,
    Optimized = 5,
}

impl MaturityLevel {
    // halves round to even: 2.5 is Repeatable, 3.5 is Managed
    pub fn from_score(score: f64) -> Self {
        let level = score.clamp(1.0, 5.0).round_ties_even() as u8;
        Self::from_number(level).unwrap_or(MaturityLevel::Initial)
    }

    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(MaturityLevel::Initial),
            2 => Some(MaturityLevel::Repeatable),
            3 => Some(MaturityLevel::Defined),
            4 => Some(MaturityLevel::Managed),
            5 => Some(MaturityLevel::Optimized),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MaturityLevel::Initial => "Initial",
            MaturityLevel::Repeatable => "Repeatable",
            MaturityLevel::Defined => "Defined",
            MaturityLevel::Managed => "Managed",
            MaturityLevel::Optimized => "Optimized",
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/levels.rs"]
mod tests;
