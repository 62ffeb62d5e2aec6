pub mod store;

use crate::model::snapshot::Snapshot;

pub use store::{load_history, save_history};

// ascending by period, at most one snapshot per period
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    // later entries win when a period repeats
    pub fn from_snapshots(snapshots: Vec<Snapshot>) -> Self {
        let mut history = Self::new();
        for snapshot in snapshots {
            history.upsert(snapshot);
        }
        history
    }

    pub fn upsert(&mut self, snapshot: Snapshot) -> UpsertOutcome {
        if let Some(existing) = self
            .snapshots
            .iter_mut()
            .find(|s| s.period == snapshot.period)
        {
            *existing = snapshot;
            return UpsertOutcome::Replaced;
        }
        self.snapshots.push(snapshot);
        self.snapshots.sort_by(|a, b| a.period.cmp(&b.period));
        UpsertOutcome::Inserted
    }

    pub fn get(&self, period: &str) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.period == period)
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn previous(&self) -> Option<&Snapshot> {
        let n = self.snapshots.len();
        if n >= 2 {
            self.snapshots.get(n - 2)
        } else {
            None
        }
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/history/mod.rs"]
mod tests;
