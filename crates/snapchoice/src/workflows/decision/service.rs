use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::codec::{CorruptStateError, ShareError, StateCodec};
use super::domain::{Decision, RankedResult};
use super::history::{HistoryEntry, HistoryError, HistoryLog, KeyValueStore};
use super::scoring::{ScoringEngine, ValidationError};

/// Service composing the scoring engine, share codec, and decision history.
pub struct DecisionService<S> {
    engine: ScoringEngine,
    codec: StateCodec,
    history: HistoryLog<S>,
}

/// A share link together with the bare token it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedDecision {
    pub token: String,
    pub url: String,
}

/// How a restore request was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RestoreOutcome {
    /// No token supplied; the blank decision is used.
    Fresh,
    Loaded,
    /// The token was rejected and the blank decision is used instead.
    Corrupt { detail: String },
}

impl RestoreOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            RestoreOutcome::Fresh => None,
            RestoreOutcome::Loaded => Some("Shared decision loaded!"),
            RestoreOutcome::Corrupt { .. } => Some(CorruptStateError::USER_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestoredDecision {
    pub decision: Decision,
    pub outcome: RestoreOutcome,
}

impl<S> DecisionService<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S, codec: StateCodec) -> Self {
        Self::with_history(HistoryLog::new(store), codec)
    }

    pub fn with_history(history: HistoryLog<S>, codec: StateCodec) -> Self {
        Self {
            engine: ScoringEngine::new(),
            codec,
            history,
        }
    }

    pub fn codec(&self) -> &StateCodec {
        &self.codec
    }

    /// Score a decision and log the winner to history.
    pub fn recommend(&self, decision: &Decision) -> Result<RankedResult, DecisionServiceError> {
        self.recommend_at(decision, Utc::now())
    }

    pub fn recommend_at(
        &self,
        decision: &Decision,
        now: DateTime<Utc>,
    ) -> Result<RankedResult, DecisionServiceError> {
        let result = self.engine.evaluate(decision)?;

        if let Some(entry) = HistoryEntry::from_result(&decision.context, &result, now) {
            // A failed history write never fails the run.
            if let Err(err) = self.history.record(entry) {
                warn!(error = %err, "failed to record decision history");
            }
        }

        info!(
            confidence = result.confidence,
            advisories = result.advisories.len(),
            "recommendation produced"
        );
        Ok(result)
    }

    pub fn share(&self, decision: &Decision) -> Result<SharedDecision, DecisionServiceError> {
        let token = self.codec.encode(decision)?;
        let url = format!("{}#{token}", self.codec.base_url());
        Ok(SharedDecision { token, url })
    }

    /// Decode a share token strictly.
    pub fn load_shared(&self, token: &str) -> Result<Decision, DecisionServiceError> {
        Ok(self.codec.decode(token)?)
    }

    /// Decode a share token, falling back to the blank decision. A corrupt
    /// token is never partially applied.
    pub fn restore(&self, token: Option<&str>) -> RestoredDecision {
        let token = token.map(str::trim).unwrap_or_default();
        if token.is_empty() || token == "#" {
            return RestoredDecision {
                decision: Decision::blank(),
                outcome: RestoreOutcome::Fresh,
            };
        }

        match self.codec.decode(token) {
            Ok(decision) => RestoredDecision {
                decision,
                outcome: RestoreOutcome::Loaded,
            },
            Err(err) => {
                warn!(error = %err, "failed to restore shared decision");
                RestoredDecision {
                    decision: Decision::blank(),
                    outcome: RestoreOutcome::Corrupt {
                        detail: err.to_string(),
                    },
                }
            }
        }
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>, DecisionServiceError> {
        Ok(self.history.entries()?)
    }

    pub fn example(&self) -> Decision {
        Decision::example()
    }
}

/// Error raised by the decision service.
#[derive(Debug, thiserror::Error)]
pub enum DecisionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Share(#[from] ShareError),
    #[error(transparent)]
    Corrupt(#[from] CorruptStateError),
    #[error(transparent)]
    History(#[from] HistoryError),
}
