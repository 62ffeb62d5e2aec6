mod error;
mod history;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod rubric;
mod scorer;
mod trend;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::history::{UpsertOutcome, load_history, save_history};
use crate::input::{AssessmentMeta, load_answers, load_criterion_scores};
use crate::model::thresholds::ScoringThresholds;
use crate::pipeline::stage4_snapshot::SnapshotMeta;
use crate::pipeline::{Assessment, run_assessment, run_preaggregated};
use crate::report::json::{render_snapshot_json, render_trend_json};
use crate::report::text::{render_scorecard_text, render_trend_text};
use crate::rubric::QuestionKind;
use crate::rubric::loader::load_rubric;
use crate::scorer::{PrecomputedTextScores, TextScorer};

#[derive(Debug, Parser)]
#[command(
    name = "maturity-scorecard",
    version,
    about = "Score maturity-model assessments and track tier progression"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load and validate rubric and questionnaire definitions.
    Validate(DefinitionArgs),
    /// Score one assessment and optionally record it in a history file.
    Score(ScoreArgs),
    /// Compare the latest snapshots in a history file.
    Trend(TrendArgs),
}

#[derive(Debug, Args)]
struct DefinitionArgs {
    #[arg(long)]
    rubric: PathBuf,
    #[arg(long)]
    questionnaire: PathBuf,
}

#[derive(Debug, Args)]
struct ScoreArgs {
    #[command(flatten)]
    definitions: DefinitionArgs,
    /// Response document (JSON or YAML).
    #[arg(long, conflicts_with = "criterion_scores", required_unless_present = "criterion_scores")]
    answers: Option<PathBuf>,
    /// Pre-aggregated criterion scores instead of raw answers.
    #[arg(long)]
    criterion_scores: Option<PathBuf>,
    /// External scores for free-text answers.
    #[arg(long)]
    text_scores: Option<PathBuf>,
    /// Reporting period; defaults to the response metadata.
    #[arg(long)]
    period: Option<String>,
    /// History file to upsert the snapshot into.
    #[arg(long)]
    history: Option<PathBuf>,
    #[arg(long)]
    json_out: Option<PathBuf>,
    /// Print the snapshot as JSON instead of the text scorecard.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct TrendArgs {
    #[arg(long)]
    history: PathBuf,
    #[arg(long, default_value_t = 5)]
    top_k: usize,
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(err) = run(cli.command) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Validate(args) => run_validate(&args),
        Command::Score(args) => run_score(&args),
        Command::Trend(args) => run_trend(&args),
    }
}

fn run_validate(args: &DefinitionArgs) -> Result<(), String> {
    let thresholds = ScoringThresholds::default_v1();
    let rubric =
        load_rubric(&args.rubric, &args.questionnaire, &thresholds).map_err(|e| e.to_string())?;
    println!(
        "rubric ok: {} tiers ({} core), {} criteria, {} questions",
        rubric.tiers().len(),
        rubric.core_tiers().count(),
        rubric.criteria().len(),
        rubric.questions().len()
    );
    for tier in rubric.tiers() {
        let criteria = rubric.criteria_by_tier(&tier.id).collect::<Vec<_>>();
        let questions = criteria
            .iter()
            .map(|c| rubric.questions_for(&c.id).count())
            .sum::<usize>();
        println!(
            "  {} [{}]: {} criteria, {} questions",
            tier.label(),
            tier.section.as_str(),
            criteria.len(),
            questions
        );
    }
    let text_questions = rubric
        .questions()
        .iter()
        .filter(|q| rubric.mapping_for(&q.id) == Some(QuestionKind::Text))
        .collect::<Vec<_>>();
    if !text_questions.is_empty() {
        println!("  {} text questions need external scores:", text_questions.len());
        for q in text_questions {
            println!("    {} ({}): {}", q.id, q.criterion_id, q.prompt);
        }
    }
    Ok(())
}

fn run_score(args: &ScoreArgs) -> Result<(), String> {
    let thresholds = ScoringThresholds::default_v1();
    let rubric = load_rubric(
        &args.definitions.rubric,
        &args.definitions.questionnaire,
        &thresholds,
    )
    .map_err(|e| e.to_string())?;

    let assessment = match (&args.answers, &args.criterion_scores) {
        (Some(path), _) => {
            let answers = load_answers(path).map_err(|e| e.to_string())?;
            let meta = snapshot_meta(&answers.meta, args.period.as_deref())?;
            let text_scores = match &args.text_scores {
                Some(p) => Some(PrecomputedTextScores::load(p).map_err(|e| e.to_string())?),
                None => None,
            };
            let scorer = text_scores.as_ref().map(|s| s as &dyn TextScorer);
            run_assessment(&rubric, &answers, scorer, &meta, &thresholds)
                .map_err(|e| e.to_string())?
        }
        (None, Some(path)) => {
            let input = load_criterion_scores(path).map_err(|e| e.to_string())?;
            let meta = snapshot_meta(&input.meta, args.period.as_deref())?;
            run_preaggregated(&rubric, &input, &meta, &thresholds).map_err(|e| e.to_string())?
        }
        (None, None) => return Err("provide --answers or --criterion-scores".to_string()),
    };

    for issue in &assessment.issues {
        tracing::warn!("{issue}");
    }

    if let Some(path) = &args.json_out {
        write_snapshot(&assessment, path)?;
    }
    if let Some(path) = &args.history {
        record_in_history(&assessment, path)?;
    }

    if args.json {
        let json = render_snapshot_json(&assessment.snapshot).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        print!("{}", render_scorecard_text(&assessment));
    }
    Ok(())
}

fn run_trend(args: &TrendArgs) -> Result<(), String> {
    let thresholds = ScoringThresholds::default_v1().with_top_k(args.top_k);
    let history = load_history(&args.history).map_err(|e| e.to_string())?;
    let report = trend::analyze(&history, &thresholds).map_err(|e| e.to_string())?;
    if args.json {
        let json = render_trend_json(&report).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        print!("{}", render_trend_text(&report));
    }
    Ok(())
}

fn snapshot_meta(meta: &AssessmentMeta, period: Option<&str>) -> Result<SnapshotMeta, String> {
    let period = match period {
        Some(p) => p.to_string(),
        None => meta.resolve_period().ok_or_else(|| {
            "no reporting period: pass --period or set metadata.period / metadata.date (YYYY-MM-DD)"
                .to_string()
        })?,
    };
    Ok(SnapshotMeta {
        period,
        org: meta.organization.clone(),
        assessor: meta.assessor_name.clone(),
        assessment_type: meta.assessment_type.clone(),
    })
}

fn write_snapshot(assessment: &Assessment, path: &Path) -> Result<(), String> {
    let json = render_snapshot_json(&assessment.snapshot).map_err(|e| e.to_string())?;
    fs::write(path, json + "\n").map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "snapshot written");
    Ok(())
}

fn record_in_history(assessment: &Assessment, path: &Path) -> Result<(), String> {
    let mut history = load_history(path).map_err(|e| e.to_string())?;
    if let Some(prior) = history.get(&assessment.snapshot.period) {
        tracing::info!(
            period = %prior.period,
            previous_overall = prior.overall_score,
            "period already recorded; latest run replaces it"
        );
    }
    let outcome = history.upsert(assessment.snapshot.clone());
    save_history(&history, path).map_err(|e| e.to_string())?;
    let action = match outcome {
        UpsertOutcome::Inserted => "inserted",
        UpsertOutcome::Replaced => "replaced",
    };
    tracing::info!(
        path = %path.display(),
        period = %assessment.snapshot.period,
        entries = history.len(),
        "{action} snapshot in history"
    );
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
