use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub mod document;

use crate::model::answers::RawAnswer;
use document::{DocumentError, read_document};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssessmentMeta {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub assessor_name: String,
    #[serde(default)]
    pub assessor_role: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub assessment_type: String,
}

impl AssessmentMeta {
    pub fn resolve_period(&self) -> Option<String> {
        if let Some(period) = self.period.as_deref().map(str::trim) {
            if !period.is_empty() {
                return Some(period.to_string());
            }
        }
        period_from_date(&self.date)
    }
}

pub fn period_from_date(date: &str) -> Option<String> {
    let date = date.trim();
    let prefix = date.get(..7)?;
    let bytes = prefix.as_bytes();
    let shape_ok = bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(u8::is_ascii_digit);
    if shape_ok {
        Some(prefix.to_string())
    } else {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    pub meta: AssessmentMeta,
    responses: BTreeMap<String, RawAnswer>,
}

impl AnswerSet {
    pub fn new(meta: AssessmentMeta) -> Self {
        Self {
            meta,
            responses: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, question_id: impl Into<String>, answer: RawAnswer) {
        self.responses.insert(question_id.into(), answer);
    }

    pub fn get(&self, question_id: &str) -> Option<&RawAnswer> {
        self.responses.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.responses.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CriterionScoreInput {
    pub meta: AssessmentMeta,
    pub scores: BTreeMap<String, f64>,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Deserialize)]
struct ResponseFile {
    #[serde(default)]
    metadata: AssessmentMeta,
    #[serde(default)]
    responses: BTreeMap<String, ResponseEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseEntry {
    Detailed { answer: Option<RawAnswer> },
    Bare(Option<RawAnswer>),
}

#[derive(Deserialize)]
struct CriterionScoreFile {
    #[serde(default)]
    metadata: AssessmentMeta,
    criteria: BTreeMap<String, f64>,
}

pub fn load_answers(path: &Path) -> Result<AnswerSet, InputError> {
    let file: ResponseFile = read_document(path)?;
    let answers = answer_set_from_file(file);
    tracing::info!(
        path = %path.display(),
        responses = answers.len(),
        "loaded assessment responses"
    );
    Ok(answers)
}

fn answer_set_from_file(file: ResponseFile) -> AnswerSet {
    let mut answers = AnswerSet::new(file.metadata);
    for (qid, entry) in file.responses {
        let answer = match entry {
            ResponseEntry::Detailed { answer, .. } => answer,
            ResponseEntry::Bare(answer) => answer,
        };
        // null answers count as unanswered
        if let Some(answer) = answer {
            answers.insert(qid, answer);
        }
    }
    answers
}

pub fn load_criterion_scores(path: &Path) -> Result<CriterionScoreInput, InputError> {
    let file: CriterionScoreFile = read_document(path)?;
    if file.criteria.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "{} lists no criterion scores",
            path.display()
        )));
    }
    tracing::info!(
        path = %path.display(),
        criteria = file.criteria.len(),
        "loaded pre-aggregated criterion scores"
    );
    Ok(CriterionScoreInput {
        meta: file.metadata,
        scores: file.criteria,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
