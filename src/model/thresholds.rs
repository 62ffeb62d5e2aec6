#[derive(Debug, Clone)]
pub struct ScoringThresholds {
    pub pass_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub default_yes_value: f64,
    pub no_value: f64,
    pub tier_delta: f64,
    pub criterion_delta: f64,
    pub top_k: usize,
}

impl ScoringThresholds {
    pub fn default_v1() -> Self {
        Self {
            pass_score: 3.0,
            min_score: 1.0,
            max_score: 5.0,
            default_yes_value: 3.0,
            no_value: 1.0,
            tier_delta: 0.1,
            criterion_delta: 0.05,
            top_k: 5,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn in_range(&self, score: f64) -> bool {
        score.is_finite() && score >= self.min_score && score <= self.max_score
    }
}
