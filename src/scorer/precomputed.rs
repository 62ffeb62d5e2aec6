use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;
use crate::input::document::read_document;
use crate::scorer::{TextContext, TextScorer};

// criterion-level scores are averaged and used only when the question has none
#[derive(Debug, Clone, Default)]
pub struct PrecomputedTextScores {
    scores: BTreeMap<String, f64>,
    by_criterion: BTreeMap<String, Vec<f64>>,
}

#[derive(Deserialize)]
struct AnalysisFile {
    #[serde(default)]
    text_scores: Vec<TextScoreEntry>,
}

#[derive(Deserialize)]
struct TextScoreEntry {
    id: String,
    #[serde(default)]
    criterion: Option<String>,
    score: f64,
}

impl PrecomputedTextScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(mut self, question_id: impl Into<String>, score: f64) -> Self {
        self.scores.insert(question_id.into(), score);
        self
    }

    pub fn with_criterion_score(mut self, criterion_id: impl Into<String>, score: f64) -> Self {
        self.by_criterion
            .entry(criterion_id.into())
            .or_default()
            .push(score);
        self
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        let file: AnalysisFile = read_document(path)?;
        let out = file
            .text_scores
            .into_iter()
            .fold(Self::new(), |acc, entry| {
                let acc = match entry.criterion {
                    Some(criterion) => acc.with_criterion_score(criterion, entry.score),
                    None => acc,
                };
                acc.with_score(entry.id, entry.score)
            });
        tracing::info!(
            path = %path.display(),
            scores = out.len(),
            "loaded external text scores"
        );
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }
}

impl TextScorer for PrecomputedTextScores {
    fn score_text(&self, context: &TextContext<'_>, _text: &str) -> Option<f64> {
        if let Some(score) = self.scores.get(&context.question.id) {
            return Some(*score);
        }
        let scores = self.by_criterion.get(&context.criterion.id)?;
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/scorer/precomputed.rs"]
mod tests;
