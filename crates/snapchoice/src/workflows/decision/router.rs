use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::codec::ShareError;
use super::domain::{Decision, RankedResult, ScoredOption};
use super::history::KeyValueStore;
use super::scoring::format_score;
use super::service::{DecisionService, DecisionServiceError, RestoreOutcome};

/// Router builder exposing HTTP endpoints for scoring, sharing, and history.
pub fn decision_router<S>(service: Arc<DecisionService<S>>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route("/api/v1/decisions/recommend", post(recommend_handler::<S>))
        .route("/api/v1/decisions/share", post(share_handler::<S>))
        .route("/api/v1/decisions/restore", post(restore_handler::<S>))
        .route("/api/v1/decisions/history", get(history_handler::<S>))
        .route("/api/v1/decisions/example", get(example_handler::<S>))
        .with_state(service)
}

/// Recommendation as returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub winner: String,
    pub score_label: String,
    pub confidence: u8,
    pub reasoning: String,
    pub low_differentiation: bool,
    pub close_scores: bool,
    pub messages: Vec<&'static str>,
    pub ranked: Vec<ScoredOption>,
}

impl From<RankedResult> for RecommendationView {
    fn from(result: RankedResult) -> Self {
        let low_differentiation = result.low_differentiation();
        let close_scores = result.close_scores();
        let messages = result
            .advisories
            .iter()
            .map(|advisory| advisory.message())
            .collect();
        let (winner, score_label) = result
            .winner()
            .map(|winner| {
                (
                    winner.name.clone(),
                    format!("Score: {} / 10", format_score(winner.score)),
                )
            })
            .unwrap_or_default();

        Self {
            winner,
            score_label,
            confidence: result.confidence,
            reasoning: result.reasoning,
            low_differentiation,
            close_scores,
            messages,
            ranked: result.options,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestoreRequest {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestoreView {
    pub decision: Decision,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub(crate) async fn recommend_handler<S>(
    State(service): State<Arc<DecisionService<S>>>,
    axum::Json(decision): axum::Json<Decision>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.recommend(&decision) {
        Ok(result) => {
            (StatusCode::OK, axum::Json(RecommendationView::from(result))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn share_handler<S>(
    State(service): State<Arc<DecisionService<S>>>,
    axum::Json(decision): axum::Json<Decision>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.share(&decision) {
        Ok(shared) => (StatusCode::OK, axum::Json(shared)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn restore_handler<S>(
    State(service): State<Arc<DecisionService<S>>>,
    axum::Json(request): axum::Json<RestoreRequest>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let restored = service.restore(request.token.as_deref());
    let view = RestoreView {
        loaded: restored.outcome == RestoreOutcome::Loaded,
        message: restored.outcome.message(),
        decision: restored.decision,
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn history_handler<S>(State(service): State<Arc<DecisionService<S>>>) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.history() {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn example_handler<S>(State(service): State<Arc<DecisionService<S>>>) -> Response
where
    S: KeyValueStore + 'static,
{
    (StatusCode::OK, axum::Json(service.example())).into_response()
}

pub(crate) fn error_status(err: &DecisionServiceError) -> StatusCode {
    match err {
        DecisionServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DecisionServiceError::Share(ShareError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
        DecisionServiceError::Corrupt(_) => StatusCode::BAD_REQUEST,
        DecisionServiceError::Share(ShareError::Serialize(_))
        | DecisionServiceError::History(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: DecisionServiceError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (error_status(&err), axum::Json(payload)).into_response()
}
