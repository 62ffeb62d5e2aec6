use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

pub mod defs;
pub mod loader;

use crate::input::document::DocumentError;
use crate::model::levels::{MaturityLevel, Section};
pub use defs::LevelDef;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuestionKind {
    Scale,
    Checklist { yes_value: f64 },
    Text,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: String,
    pub criterion_id: String,
    pub kind: QuestionKind,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct Criterion {
    pub id: String,
    pub name: String,
    pub tier_id: String,
    pub section: Section,
    pub weight: f64,
    pub levels: BTreeMap<u8, LevelDef>,
}

#[derive(Debug, Clone)]
pub struct Tier {
    pub id: String,
    pub name: String,
    pub section: Section,
    // None for enrichment tiers
    pub rank: Option<u32>,
    pub criteria: Vec<String>,
}

impl Tier {
    pub fn label(&self) -> String {
        match self.rank {
            Some(rank) => format!("Tier {rank}: {}", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RubricError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("criterion {criterion} has invalid weight {weight}")]
    InvalidWeight { criterion: String, weight: f64 },
    #[error("tier {tier} has no criteria")]
    EmptyTier { tier: String },
    #[error("question {question} references unknown criterion {criterion}")]
    UnknownCriterion { question: String, criterion: String },
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("question {question} has checklist yes value {value} outside 1-5")]
    InvalidYesValue { question: String, value: f64 },
    #[error("criterion {criterion} defines level {level} outside 1-5")]
    InvalidLevel { criterion: String, level: u8 },
    #[error("rubric {0} defines no tiers")]
    NoTiers(PathBuf),
}

#[derive(Debug, Clone)]
pub struct RubricModel {
    tiers: Vec<Tier>,
    criteria: Vec<Criterion>,
    questions: Vec<Question>,
    tier_index: BTreeMap<String, usize>,
    criterion_index: BTreeMap<String, usize>,
    question_index: BTreeMap<String, usize>,
}

impl RubricModel {
    pub fn new(
        tiers: Vec<Tier>,
        criteria: Vec<Criterion>,
        questions: Vec<Question>,
    ) -> Result<Self, RubricError> {
        let tier_index = index_by(&tiers, "tier", |t| &t.id)?;
        let criterion_index = index_by(&criteria, "criterion", |c| &c.id)?;
        let question_index = index_by(&questions, "question", |q| &q.id)?;

        for tier in &tiers {
            if tier.criteria.is_empty() {
                return Err(RubricError::EmptyTier {
                    tier: tier.id.clone(),
                });
            }
        }
        for criterion in &criteria {
            if !criterion.weight.is_finite() || criterion.weight < 0.0 {
                return Err(RubricError::InvalidWeight {
                    criterion: criterion.id.clone(),
                    weight: criterion.weight,
                });
            }
            if let Some(&level) = criterion
                .levels
                .keys()
                .find(|l| MaturityLevel::from_number(**l).is_none())
            {
                return Err(RubricError::InvalidLevel {
                    criterion: criterion.id.clone(),
                    level,
                });
            }
        }
        for question in &questions {
            if !criterion_index.contains_key(&question.criterion_id) {
                return Err(RubricError::UnknownCriterion {
                    question: question.id.clone(),
                    criterion: question.criterion_id.clone(),
                });
            }
            if let QuestionKind::Checklist { yes_value } = question.kind {
                if !(1.0..=5.0).contains(&yes_value) {
                    return Err(RubricError::InvalidYesValue {
                        question: question.id.clone(),
                        value: yes_value,
                    });
                }
            }
        }

        Ok(Self {
            tiers,
            criteria,
            questions,
            tier_index,
            criterion_index,
            question_index,
        })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn tier(&self, id: &str) -> Option<&Tier> {
        self.tier_index.get(id).map(|&i| &self.tiers[i])
    }

    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criterion_index.get(id).map(|&i| &self.criteria[i])
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.question_index.get(id).map(|&i| &self.questions[i])
    }

    pub fn criteria_by_tier<'a>(&'a self, tier_id: &str) -> impl Iterator<Item = &'a Criterion> {
        let ids = self
            .tier(tier_id)
            .map(|t| t.criteria.as_slice())
            .unwrap_or(&[]);
        ids.iter().filter_map(|id| self.criterion(id))
    }

    pub fn weight_of(&self, criterion_id: &str) -> Option<f64> {
        self.criterion(criterion_id).map(|c| c.weight)
    }

    pub fn mapping_for(&self, question_id: &str) -> Option<QuestionKind> {
        self.question(question_id).map(|q| q.kind)
    }

    pub fn questions_for<'a>(
        &'a self,
        criterion_id: &'a str,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions
            .iter()
            .filter(move |q| q.criterion_id == criterion_id)
    }

    pub fn core_tiers(&self) -> impl Iterator<Item = &Tier> {
        let mut core = self
            .tiers
            .iter()
            .filter(|t| t.section == Section::Core)
            .collect::<Vec<_>>();
        core.sort_by_key(|t| t.rank);
        core.into_iter()
    }
}

fn index_by<T>(
    items: &[T],
    kind: &'static str,
    key: impl Fn(&T) -> &String,
) -> Result<BTreeMap<String, usize>, RubricError> {
    let mut index = BTreeMap::new();
    for (i, item) in items.iter().enumerate() {
        let id = key(item);
        if index.insert(id.clone(), i).is_some() {
            return Err(RubricError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(index)
}

#[cfg(test)]
#[path = "../../tests/src_inline/rubric/tests.rs"]
mod tests;
