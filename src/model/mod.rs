pub mod answers;
pub mod levels;
pub mod scores;
pub mod snapshot;
pub mod thresholds;
