use crate::error::ScoreError;
use crate::history::History;
use crate::model::scores::round2;
use crate::model::snapshot::Snapshot;
use crate::model::thresholds::ScoringThresholds;
use crate::trend::{
    AttentionItem, AttentionReason, CriterionDelta, ScoreDelta, SnapshotDelta, TierDelta, Trend,
    TrendReport,
};

pub fn analyze(
    history: &History,
    thresholds: &ScoringThresholds,
) -> Result<TrendReport, ScoreError> {
    if history.is_empty() {
        return Err(ScoreError::EmptyHistory);
    }
    let current = history.latest().ok_or(ScoreError::EmptyHistory)?;
    let k = thresholds.top_k;

    let Some(previous) = history.previous() else {
        tracing::info!(period = %current.period, "baseline established");
        return Ok(TrendReport {
            current_period: current.period.clone(),
            previous_period: None,
            baseline: true,
            assessor_changed: false,
            current: current.clone(),
            previous_achieved_tier: None,
            delta: None,
            biggest_improvements: Vec::new(),
            needs_attention: needs_attention(&[], current, thresholds, k),
        });
    };

    let assessor_changed = current.assessor != previous.assessor;
    if assessor_changed {
        tracing::warn!(
            previous = %previous.assessor,
            current = %current.assessor,
            "assessor changed between periods; deltas may reflect rater differences"
        );
    }

    let diff = delta(current, previous, thresholds);
    let biggest = biggest_improvements(&diff.criteria, k);
    let attention = needs_attention(&diff.criteria, current, thresholds, k);

    Ok(TrendReport {
        current_period: current.period.clone(),
        previous_period: Some(previous.period.clone()),
        baseline: false,
        assessor_changed,
        current: current.clone(),
        previous_achieved_tier: Some(previous.achieved_tier.clone()),
        delta: Some(diff),
        biggest_improvements: biggest,
        needs_attention: attention,
    })
}

// items present in only one snapshot are left out
pub fn delta(
    current: &Snapshot,
    previous: &Snapshot,
    thresholds: &ScoringThresholds,
) -> SnapshotDelta {
    let overall_delta = round2(current.overall_score - previous.overall_score);
    let overall = ScoreDelta {
        previous: previous.overall_score,
        current: current.overall_score,
        delta: overall_delta,
        trend: Trend::classify(overall_delta, thresholds.tier_delta),
    };

    let tiers = current
        .tiers
        .iter()
        .filter_map(|cur| {
            let prev = previous.tier(&cur.id)?;
            let d = round2(cur.score - prev.score);
            Some(TierDelta {
                id: cur.id.clone(),
                name: cur.name.clone(),
                previous: prev.score,
                current: cur.score,
                delta: d,
                trend: Trend::classify(d, thresholds.tier_delta),
                status: cur.status,
            })
        })
        .collect();

    let criteria = current
        .criteria
        .iter()
        .filter_map(|cur| {
            let prev = previous.matching_criterion(cur)?;
            let d = round2(cur.score - prev.score);
            Some(CriterionDelta {
                id: cur.id.clone(),
                criterion: cur.criterion.clone(),
                category: cur.category.clone(),
                previous: prev.score,
                current: cur.score,
                delta: d,
                trend: Trend::classify(d, thresholds.criterion_delta),
            })
        })
        .collect();

    SnapshotDelta {
        overall,
        tiers,
        criteria,
    }
}

pub fn biggest_improvements(deltas: &[CriterionDelta], k: usize) -> Vec<CriterionDelta> {
    let mut improving = deltas
        .iter()
        .filter(|d| d.trend == Trend::Improving)
        .cloned()
        .collect::<Vec<_>>();
    improving.sort_by(|a, b| {
        b.delta
            .total_cmp(&a.delta)
            .then_with(|| a.criterion.cmp(&b.criterion))
    });
    improving.truncate(k);
    improving
}

pub fn needs_attention(
    deltas: &[CriterionDelta],
    current: &Snapshot,
    thresholds: &ScoringThresholds,
    k: usize,
) -> Vec<AttentionItem> {
    let mut regressions = deltas
        .iter()
        .filter(|d| d.trend == Trend::Regressing)
        .collect::<Vec<_>>();
    regressions.sort_by(|a, b| {
        a.delta
            .total_cmp(&b.delta)
            .then_with(|| a.criterion.cmp(&b.criterion))
    });
    regressions.truncate(k);

    let mut out = regressions
        .iter()
        .map(|d| AttentionItem {
            criterion: d.criterion.clone(),
            category: d.category.clone(),
            score: d.current,
            delta: Some(d.delta),
            reason: AttentionReason::Regression,
        })
        .collect::<Vec<_>>();
    if out.len() >= k {
        return out;
    }

    let mut below = current
        .criteria
        .iter()
        .filter(|c| c.score < thresholds.pass_score && !regressions.iter().any(|d| d.refers_to(c)))
        .collect::<Vec<_>>();
    below.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.criterion.cmp(&b.criterion))
    });

    let remaining = k - out.len();
    out.extend(below.into_iter().take(remaining).map(|c| AttentionItem {
        criterion: c.criterion.clone(),
        category: c.category.clone(),
        score: c.score,
        delta: deltas.iter().find(|d| d.refers_to(c)).map(|d| d.delta),
        reason: AttentionReason::BelowTarget,
    }));
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/trend/analyzer.rs"]
mod tests;
