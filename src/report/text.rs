use std::fmt::Write;

use crate::pipeline::Assessment;
use crate::report::{format_delta, format_score};
use crate::trend::{AttentionReason, TrendReport};

pub fn render_scorecard_text(assessment: &Assessment) -> String {
    let s = &assessment.snapshot;
    let mut out = String::new();

    out.push_str("Maturity Assessment Scorecard\n");
    out.push_str("=============================\n\n");
    let _ = writeln!(out, "Organization: {}", s.org);
    let _ = writeln!(out, "Assessor: {}", s.assessor);
    let _ = writeln!(out, "Period: {}", s.period);
    let _ = writeln!(out, "Type: {}", s.assessment_type);
    let _ = writeln!(out, "Overall score: {}/5.0", format_score(s.overall_score));
    let _ = writeln!(out, "Achieved tier: {}", s.achieved_tier);
    let _ = writeln!(
        out,
        "Completion: {} / {} ({}%)",
        s.completion.answered,
        s.completion.total,
        format_score(s.completion.percent)
    );
    out.push('\n');

    for tier in &s.tiers {
        let _ = writeln!(
            out,
            "--- {} ({}/5.0, {}, {}, {}) ---",
            tier.name,
            format_score(tier.score),
            tier.level,
            tier.status,
            tier.progression
        );
        for c in s.criteria.iter().filter(|c| c.tier_id == tier.id) {
            let _ = writeln!(
                out,
                "  {}: {} ({}, {})",
                c.criterion,
                format_score(c.score),
                c.level,
                c.status
            );
        }
    }

    if !assessment.incomplete.is_empty() {
        out.push_str("\nIncomplete criteria (excluded from aggregates):\n");
        for id in &assessment.incomplete {
            let _ = writeln!(out, "  {id}");
        }
    }
    if !assessment.pending_review.is_empty() {
        out.push_str("\nText answers pending review:\n");
        for item in &assessment.pending_review {
            let _ = writeln!(
                out,
                "  {} ({}): {}",
                item.question_id, item.criterion_id, item.answer
            );
        }
    }
    if !assessment.issues.is_empty() {
        out.push_str("\nIssues:\n");
        for issue in &assessment.issues {
            let _ = writeln!(out, "  {issue}");
        }
    }

    out
}

pub fn render_trend_text(report: &TrendReport) -> String {
    let mut out = String::new();

    out.push_str("Maturity Trend Report\n");
    out.push_str("=====================\n\n");
    let _ = writeln!(out, "Current period: {}", report.current_period);
    let _ = writeln!(
        out,
        "Overall score: {}/5.0",
        format_score(report.current.overall_score)
    );
    let _ = writeln!(out, "Achieved tier: {}", report.current.achieved_tier);

    match (&report.previous_period, &report.delta) {
        (Some(previous), Some(delta)) => {
            let _ = writeln!(out, "Compared with: {previous}");
            if let Some(tier) = &report.previous_achieved_tier {
                let _ = writeln!(out, "Previous tier: {tier}");
            }
            let _ = writeln!(
                out,
                "Overall change: {} ({})",
                format_delta(delta.overall.delta),
                delta.overall.trend.as_str()
            );
            if report.assessor_changed {
                out.push_str("WARNING: assessor changed since the previous period\n");
            }
            out.push_str("\nTier changes:\n");
            for t in &delta.tiers {
                let _ = writeln!(
                    out,
                    "  {}: {} -> {} ({}, {})",
                    t.name,
                    format_score(t.previous),
                    format_score(t.current),
                    format_delta(t.delta),
                    t.trend.as_str()
                );
            }
        }
        _ => {
            out.push_str("Baseline established: no earlier period to compare against\n");
            out.push_str("\nTier scores:\n");
            for t in &report.current.tiers {
                let _ = writeln!(out, "  {}: {} ({})", t.name, format_score(t.score), t.status);
            }
        }
    }

    if !report.biggest_improvements.is_empty() {
        out.push_str("\nBiggest improvements:\n");
        for d in &report.biggest_improvements {
            let _ = writeln!(out, "  {}: {}", d.criterion, format_delta(d.delta));
        }
    }
    if !report.needs_attention.is_empty() {
        out.push_str("\nNeeds attention:\n");
        for item in &report.needs_attention {
            let detail = match (item.reason, item.delta) {
                (AttentionReason::Regression, Some(d)) => format!("regressed {}", format_delta(d)),
                _ => "below target".to_string(),
            };
            let _ = writeln!(
                out,
                "  {}: {} ({detail})",
                item.criterion,
                format_score(item.score)
            );
        }
    }

    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
