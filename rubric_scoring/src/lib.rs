mod aggregate;
mod config;
mod dataset;
mod record;

use log::debug;

use std::collections::HashMap;

pub use crate::aggregate::*;
pub use crate::config::*;
pub use crate::dataset::*;
pub use crate::record::*;

/// The outcome of scoring one interaction against a rubric.
///
/// `per_question` preserves the rubric order and contains one entry per
/// rubric question, even when the awarded weight is 0. This keeps a column
/// for every question when the outcome is later flattened into a record.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoreOutcome {
    pub per_question: Vec<(String, u32)>,
    pub total: u32,
}

impl ScoreOutcome {
    pub fn empty() -> ScoreOutcome {
        ScoreOutcome {
            per_question: Vec::new(),
            total: 0,
        }
    }
}

/// Evaluates a set of per-question answers against the rubric registered
/// for (area, channel).
///
/// The function is total: it never fails. Unknown (area, channel)
/// combinations yield an empty outcome, answers for questions outside the
/// rubric are ignored, and a missing answer counts as "does not meet".
///
/// A true `critical_error` flag short-circuits the evaluation before the
/// answers are consulted: every rubric question is awarded 0 and the total
/// is 0.
pub fn score(
    catalog: &RubricCatalog,
    area: &str,
    channel: &str,
    answers: &HashMap<String, bool>,
    critical_error: bool,
) -> ScoreOutcome {
    let rubric = catalog.rubric(area, channel);
    if rubric.is_empty() {
        debug!("score: no rubric registered for {} / {}", area, channel);
        return ScoreOutcome::empty();
    }

    if critical_error {
        debug!(
            "score: critical error flagged for {} / {}, zeroing {} questions",
            area,
            channel,
            rubric.len()
        );
        return ScoreOutcome {
            per_question: rubric.iter().map(|(q, _)| (q.clone(), 0)).collect(),
            total: 0,
        };
    }

    let mut per_question: Vec<(String, u32)> = Vec::with_capacity(rubric.len());
    let mut total: u32 = 0;
    for (question, weight) in rubric.iter() {
        let met = answers.get(question).copied().unwrap_or(false);
        let contribution = if met { *weight } else { 0 };
        total += contribution;
        per_question.push((question.clone(), contribution));
    }
    debug!(
        "score: {} / {} total {} over {} questions",
        area,
        channel,
        total,
        per_question.len()
    );
    ScoreOutcome {
        per_question,
        total,
    }
}
