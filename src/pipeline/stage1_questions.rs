use crate::error::{AnswerFault, ScoreError};
use crate::input::AnswerSet;
use crate::model::answers::{Answer, RawAnswer};
use crate::model::thresholds::ScoringThresholds;
use crate::rubric::{Criterion, Question, QuestionKind, RubricModel};
use crate::scorer::{TextContext, TextScorer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuestionStatus {
    Scored(f64),
    Unanswered,
    PendingReview,
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub criterion_id: String,
    pub status: QuestionStatus,
    pub external: bool,
}

impl QuestionOutcome {
    pub fn score(&self) -> Option<f64> {
        match self.status {
            QuestionStatus::Scored(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.status != QuestionStatus::Unanswered
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    pub question_id: String,
    pub criterion_id: String,
    pub answer: String,
}

pub struct Stage1Inputs<'a> {
    pub rubric: &'a RubricModel,
    pub answers: &'a AnswerSet,
    pub text_scorer: Option<&'a dyn TextScorer>,
    pub thresholds: &'a ScoringThresholds,
}

#[derive(Debug, Default)]
pub struct Stage1Output {
    pub outcomes: Vec<QuestionOutcome>,
    pub pending_review: Vec<ReviewItem>,
    pub issues: Vec<ScoreError>,
}

pub fn run_stage1(inputs: &Stage1Inputs<'_>) -> Stage1Output {
    let mut out = Stage1Output::default();

    for question in inputs.rubric.questions() {
        let Some(criterion) = inputs.rubric.criterion(&question.criterion_id) else {
            continue;
        };
        let raw = inputs.answers.get(&question.id).filter(|raw| !raw.is_blank());
        let (status, external) = match raw {
            None => (QuestionStatus::Unanswered, false),
            Some(raw) => {
                let scored = resolve_answer(question, criterion, raw, inputs.text_scorer)
                    .and_then(|answer| {
                        let external = matches!(
                            answer,
                            Answer::Text {
                                external_score: Some(_),
                                ..
                            }
                        );
                        score_question(question, &answer, inputs.thresholds)
                            .map(|score| (score, external))
                    });
                match scored {
                    Ok((score, external)) => (QuestionStatus::Scored(score), external),
                    Err(err) if err.is_pending_review() => {
                        out.pending_review.push(ReviewItem {
                            question_id: question.id.clone(),
                            criterion_id: question.criterion_id.clone(),
                            answer: raw_text(raw),
                        });
                        (QuestionStatus::PendingReview, false)
                    }
                    Err(err) => {
                        tracing::debug!(question = %question.id, error = %err, "answer rejected");
                        out.issues.push(err);
                        (QuestionStatus::Invalid, false)
                    }
                }
            }
        };
        out.outcomes.push(QuestionOutcome {
            question_id: question.id.clone(),
            criterion_id: question.criterion_id.clone(),
            status,
            external,
        });
    }

    out
}

pub fn resolve_answer(
    question: &Question,
    criterion: &Criterion,
    raw: &RawAnswer,
    text_scorer: Option<&dyn TextScorer>,
) -> Result<Answer, ScoreError> {
    let fault = |fault: AnswerFault| ScoreError::InvalidAnswer {
        question: question.id.clone(),
        fault,
    };

    match question.kind {
        QuestionKind::Scale => match raw {
            RawAnswer::Number(n) => Ok(Answer::Scale(*n)),
            RawAnswer::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Answer::Scale)
                .map_err(|_| fault(AnswerFault::NotNumeric { found: raw.describe() })),
            RawAnswer::Bool(_) => Err(fault(AnswerFault::NotNumeric {
                found: raw.describe(),
            })),
        },
        QuestionKind::Checklist { .. } => match raw {
            RawAnswer::Bool(b) => Ok(Answer::Checklist(*b)),
            RawAnswer::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" | "y" => Ok(Answer::Checklist(true)),
                "no" | "false" | "n" => Ok(Answer::Checklist(false)),
                _ => Err(fault(AnswerFault::NotBoolean {
                    found: raw.describe(),
                })),
            },
            RawAnswer::Number(_) => Err(fault(AnswerFault::NotBoolean {
                found: raw.describe(),
            })),
        },
        QuestionKind::Text => match raw {
            RawAnswer::Text(s) => {
                let external_score = text_scorer.and_then(|scorer| {
                    scorer.score_text(
                        &TextContext {
                            question,
                            criterion,
                        },
                        s,
                    )
                });
                Ok(Answer::Text {
                    raw: s.clone(),
                    external_score,
                })
            }
            _ => Err(fault(AnswerFault::NotText {
                found: raw.describe(),
            })),
        },
    }
}

pub fn score_question(
    question: &Question,
    answer: &Answer,
    thresholds: &ScoringThresholds,
) -> Result<f64, ScoreError> {
    let fault = |fault: AnswerFault| ScoreError::InvalidAnswer {
        question: question.id.clone(),
        fault,
    };

    match (question.kind, answer) {
        (QuestionKind::Scale, Answer::Scale(value)) => {
            if thresholds.in_range(*value) {
                Ok(*value)
            } else {
                Err(fault(AnswerFault::ScaleOutOfRange { value: *value }))
            }
        }
        (QuestionKind::Checklist { yes_value }, Answer::Checklist(yes)) => {
            Ok(if *yes { yes_value } else { thresholds.no_value })
        }
        (
            QuestionKind::Text,
            Answer::Text {
                external_score: Some(value),
                ..
            },
        ) => {
            if thresholds.in_range(*value) {
                Ok(*value)
            } else {
                Err(fault(AnswerFault::ExternalScoreOutOfRange { value: *value }))
            }
        }
        (QuestionKind::Text, Answer::Text { .. }) => Err(fault(AnswerFault::MissingExternalScore)),
        (QuestionKind::Scale, other) => Err(fault(AnswerFault::NotNumeric {
            found: describe_answer(other),
        })),
        (QuestionKind::Checklist { .. }, other) => Err(fault(AnswerFault::NotBoolean {
            found: describe_answer(other),
        })),
        (QuestionKind::Text, other) => Err(fault(AnswerFault::NotText {
            found: describe_answer(other),
        })),
    }
}

fn describe_answer(answer: &Answer) -> String {
    match answer {
        Answer::Scale(v) => format!("scale {v}"),
        Answer::Checklist(b) => format!("checklist {b}"),
        Answer::Text { raw, .. } => format!("text {raw:?}"),
    }
}

fn raw_text(raw: &RawAnswer) -> String {
    match raw {
        RawAnswer::Text(s) => s.clone(),
        other => other.describe(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_questions.rs"]
mod tests;
