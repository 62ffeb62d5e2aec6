use std::path::Path;

use crate::input::document::read_document;
use crate::model::levels::Section;
use crate::model::thresholds::ScoringThresholds;
use crate::rubric::defs::{QuestionDef, QuestionType, QuestionnaireFile, RubricFile};
use crate::rubric::{Criterion, Question, QuestionKind, RubricError, RubricModel, Tier};

pub fn load_rubric(
    rubric_path: &Path,
    questionnaire_path: &Path,
    thresholds: &ScoringThresholds,
) -> Result<RubricModel, RubricError> {
    let rubric: RubricFile = read_document(rubric_path)?;
    let questionnaire: QuestionnaireFile = read_document(questionnaire_path)?;
    if rubric.tiers.is_empty() {
        return Err(RubricError::NoTiers(rubric_path.to_path_buf()));
    }

    let model = build_model(rubric, questionnaire, thresholds)?;
    tracing::info!(
        rubric = %rubric_path.display(),
        questionnaire = %questionnaire_path.display(),
        tiers = model.tiers().len(),
        criteria = model.criteria().len(),
        questions = model.questions().len(),
        "loaded rubric"
    );
    Ok(model)
}

pub fn build_model(
    rubric: RubricFile,
    questionnaire: QuestionnaireFile,
    thresholds: &ScoringThresholds,
) -> Result<RubricModel, RubricError> {
    let mut tiers = Vec::with_capacity(rubric.tiers.len());
    let mut criteria = Vec::new();

    for def in rubric.tiers {
        let section = def
            .section
            .unwrap_or_else(|| Section::infer_from_tier_id(&def.id));
        let mut member_ids = Vec::with_capacity(def.criteria.len());
        for c in def.criteria {
            if c
                .levels
                .values()
                .any(|l| l.qualitative.trim().is_empty() && l.quantitative.trim().is_empty())
            {
                tracing::warn!(criterion = %c.id, "level without a description");
            }
            member_ids.push(c.id.clone());
            criteria.push(Criterion {
                id: c.id,
                name: c.name,
                tier_id: def.id.clone(),
                section,
                weight: c.weight,
                levels: c.levels,
            });
        }

        tiers.push(Tier {
            id: def.id,
            name: def.name,
            section,
            rank: None,
            criteria: member_ids,
        });
    }
    assign_core_ranks(&mut tiers);

    let questions = questionnaire
        .questions
        .into_iter()
        .map(|q| map_question(q, thresholds))
        .collect();

    RubricModel::new(tiers, criteria, questions)
}

// tier id order (`tier_2` before `tier_10`), not file order
fn assign_core_ranks(tiers: &mut [Tier]) {
    let mut core = tiers
        .iter_mut()
        .filter(|t| t.section == Section::Core)
        .collect::<Vec<_>>();
    core.sort_by(|a, b| {
        id_sort_key(&a.id)
            .cmp(&id_sort_key(&b.id))
            .then_with(|| a.id.cmp(&b.id))
    });
    for (rank, tier) in core.into_iter().enumerate() {
        tier.rank = Some(rank as u32);
    }
}

fn id_sort_key(id: &str) -> (&str, Option<u64>) {
    let prefix_len = id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (prefix, digits) = id.split_at(prefix_len);
    (prefix, digits.parse().ok())
}

fn map_question(def: QuestionDef, thresholds: &ScoringThresholds) -> Question {
    let kind = match def.kind {
        QuestionType::Scale => QuestionKind::Scale,
        QuestionType::Checklist => QuestionKind::Checklist {
            yes_value: def
                .scoring
                .and_then(|s| s.yes_value)
                .unwrap_or(thresholds.default_yes_value),
        },
        QuestionType::Text => QuestionKind::Text,
    };
    Question {
        id: def.id,
        criterion_id: def.criterion,
        kind,
        prompt: def.question,
    }
}
