//! SnapChoice decision engine.
//!
//! Scores up to five rated options, ranks them with a deterministic tie-break,
//! explains the winner, and round-trips the full input state through a
//! shareable URL fragment token. A rolling history of recent results is kept
//! in a key-value store.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
