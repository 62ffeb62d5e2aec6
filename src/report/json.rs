use crate::model::snapshot::Snapshot;
use crate::trend::TrendReport;

pub fn render_snapshot_json(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

pub fn render_trend_json(report: &TrendReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
