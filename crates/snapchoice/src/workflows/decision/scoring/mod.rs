mod ranking;
mod reasoning;
mod rules;

pub use ranking::{compare_ranked, rank, Ranking, ValidationError};
pub use reasoning::{generate_reasoning, ReasoningTemplate};
pub use rules::{calculate_confidence, calculate_score, format_score, MAX_CONFIDENCE};

use super::domain::{Advisory, Decision, RankedResult};
use tracing::debug;

/// Stateless evaluator turning a decision into a ranked recommendation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, decision: &Decision) -> Result<RankedResult, ValidationError> {
        let Ranking {
            options,
            low_differentiation,
            close_scores,
        } = rank(&decision.options)?;

        let mut advisories = Vec::new();
        if decision.context.trim().is_empty() {
            advisories.push(Advisory::MissingContext);
        }
        if low_differentiation {
            advisories.push(Advisory::LowDifferentiation);
        }
        if close_scores {
            advisories.push(Advisory::CloseScores);
        }

        // `rank` guarantees at least two entries.
        let (winner, runner_up) = (&options[0], &options[1]);
        let confidence = calculate_confidence(winner.score, runner_up.score);
        let reasoning = generate_reasoning(winner);

        debug!(
            winner = %winner.name,
            score = winner.score,
            confidence,
            options = options.len(),
            "decision scored"
        );

        Ok(RankedResult {
            options,
            confidence,
            reasoning,
            advisories,
        })
    }
}
