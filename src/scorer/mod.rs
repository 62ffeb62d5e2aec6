pub mod precomputed;

use crate::rubric::{Criterion, Question};

pub use precomputed::PrecomputedTextScores;

#[derive(Debug, Clone, Copy)]
pub struct TextContext<'a> {
    pub question: &'a Question,
    pub criterion: &'a Criterion,
}

/// `None` leaves the answer pending review.
pub trait TextScorer {
    fn score_text(&self, context: &TextContext<'_>, text: &str) -> Option<f64>;
}
