use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::decision::domain::{Decision, OptionInput, Rating, ScoredOption};
use crate::workflows::decision::history::{HistoryEntry, KeyValueStore, StoreError};
use crate::workflows::decision::scoring::calculate_score;
use crate::workflows::decision::{DecisionService, MemoryStore, StateCodec};

pub(super) const SCORE_EPSILON: f64 = 1e-9;

pub(super) fn example_decision() -> Decision {
    Decision::example()
}

pub(super) fn pick_a_path() -> Decision {
    Decision::new(
        "Pick a path",
        vec![
            OptionInput::rated("A", 9, 8, 4),
            OptionInput::rated("B", 4, 9, 8),
        ],
    )
}

pub(super) fn named(names: &[&str]) -> Vec<OptionInput> {
    names
        .iter()
        .map(|name| OptionInput::rated(*name, 5, 5, 5))
        .collect()
}

pub(super) fn scored(name: &str, urgency: u8, importance: u8, difficulty: u8) -> ScoredOption {
    let (urgency, importance, difficulty) = (
        Rating::from(urgency),
        Rating::from(importance),
        Rating::from(difficulty),
    );
    ScoredOption {
        name: name.to_string(),
        urgency,
        importance,
        difficulty,
        score: calculate_score(urgency, importance, difficulty),
    }
}

pub(super) fn assert_score(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < SCORE_EPSILON,
        "expected score {expected}, got {actual}"
    );
}

pub(super) fn fixed_time(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::minutes(offset_minutes)
}

pub(super) fn history_entry(context: &str, minutes: i64) -> HistoryEntry {
    HistoryEntry {
        context: context.to_string(),
        winner: format!("winner of {context}"),
        score: 7.5,
        timestamp: fixed_time(minutes),
    }
}

pub(super) fn memory_service() -> DecisionService<Arc<MemoryStore>> {
    DecisionService::new(Arc::new(MemoryStore::default()), StateCodec::default())
}

pub(super) fn service_with_codec(codec: StateCodec) -> DecisionService<Arc<MemoryStore>> {
    DecisionService::new(Arc::new(MemoryStore::default()), codec)
}

/// Store that reads fine but refuses every write.
#[derive(Default)]
pub(super) struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read-only".to_string()))
    }
}

pub(super) fn json_request(method: &str, uri: &str, body: &impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("payload serializes")))
        .expect("request builds")
}

pub(super) fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("body is json");
    (status, value)
}
