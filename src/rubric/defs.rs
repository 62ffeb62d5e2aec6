use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::levels::Section;

#[derive(Debug, Clone, Deserialize)]
pub struct RubricFile {
    pub tiers: Vec<TierDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TierDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub section: Option<Section>,
    #[serde(default)]
    pub criteria: Vec<CriterionDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CriterionDef {
    pub id: String,
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub levels: BTreeMap<u8, LevelDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LevelDef {
    #[serde(default)]
    pub qualitative: String,
    #[serde(default)]
    pub quantitative: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionnaireFile {
    pub questions: Vec<QuestionDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDef {
    pub id: String,
    pub criterion: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub scoring: Option<ScoringDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Scale,
    Checklist,
    Text,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringDef {
    #[serde(default)]
    pub yes_value: Option<f64>,
}

fn default_weight() -> f64 {
    1.0
}
