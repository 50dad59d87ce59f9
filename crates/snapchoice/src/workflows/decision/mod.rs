//! Decision scoring workflow: rank rated options, explain the winner, share
//! the input state as a URL token, and keep a short history of results.

pub mod codec;
pub mod domain;
pub mod history;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use codec::{CorruptStateError, ShareError, StateCodec, DEFAULT_MAX_URL_LENGTH};
pub use domain::{
    Advisory, Decision, DecisionFull, OptionInput, RankedResult, Rating, RawRating, ScoredOption,
    MAX_NAME_CHARS, MAX_OPTIONS, MIN_OPTIONS,
};
pub use history::{
    HistoryEntry, HistoryError, HistoryLog, KeyValueStore, StoreError, HISTORY_CAPACITY,
    HISTORY_NAMESPACE,
};
pub use router::{decision_router, RecommendationView, RestoreRequest, RestoreView};
pub use scoring::{
    calculate_confidence, calculate_score, generate_reasoning, rank, ScoringEngine,
    ValidationError,
};
pub use service::{
    DecisionService, DecisionServiceError, RestoreOutcome, RestoredDecision, SharedDecision,
};
pub use store::{JsonFileStore, MemoryStore};
