use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnswerFault {
    #[error("scale value {value} is outside 1-5")]
    ScaleOutOfRange { value: f64 },
    #[error("expected a number, got {found}")]
    NotNumeric { found: String },
    #[error("expected yes/no, got {found}")]
    NotBoolean { found: String },
    #[error("expected free text, got {found}")]
    NotText { found: String },
    #[error("text answer has no external score")]
    MissingExternalScore,
    #[error("external text score {value} is outside 1-5")]
    ExternalScoreOutOfRange { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("invalid answer for question {question}: {fault}")]
    InvalidAnswer { question: String, fault: AnswerFault },
    #[error("criterion {criterion} has no scorable questions ({pending_review} awaiting review)")]
    IncompleteCriterion {
        criterion: String,
        pending_review: usize,
    },
    #[error("weights for {scope} sum to zero")]
    InvalidWeights { scope: String },
    #[error("criterion {criterion}: {reason}")]
    InvalidCriterionScore { criterion: String, reason: String },
    #[error("trend analysis requested with an empty history")]
    EmptyHistory,
}

impl ScoreError {
    pub fn is_pending_review(&self) -> bool {
        matches!(
            self,
            ScoreError::InvalidAnswer {
                fault: AnswerFault::MissingExternalScore,
                ..
            }
        )
    }
}
