use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawAnswer {
    pub fn describe(&self) -> String {
        match self {
            RawAnswer::Bool(b) => format!("boolean {b}"),
            RawAnswer::Number(n) => format!("number {n}"),
            RawAnswer::Text(s) => format!("text {s:?}"),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, RawAnswer::Text(s) if s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Scale(f64),
    Checklist(bool),
    Text {
        raw: String,
        external_score: Option<f64>,
    },
}
