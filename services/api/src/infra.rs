use metrics_exporter_prometheus::PrometheusHandle;
use snapchoice::config::AppConfig;
use snapchoice::workflows::decision::{
    DecisionService, JsonFileStore, OptionInput, RawRating, StateCodec,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type FileBackedService = DecisionService<Arc<JsonFileStore>>;

pub(crate) fn build_service(config: &AppConfig) -> FileBackedService {
    let store = Arc::new(JsonFileStore::new(config.history.store_path.clone()));
    let codec = StateCodec::new(config.share.base_url.clone(), config.share.max_url_length);
    DecisionService::new(store, codec)
}

/// Parses `NAME[:URGENCY:IMPORTANCE:DIFFICULTY]`. The name may itself contain colons.
pub(crate) fn parse_option(raw: &str) -> Result<OptionInput, String> {
    let mut parts: Vec<&str> = raw.rsplitn(4, ':').collect();
    parts.reverse();

    match parts.as_slice() {
        [name, urgency, importance, difficulty] => Ok(OptionInput {
            name: name.to_string(),
            urgency: Some(parse_rating(urgency)),
            importance: Some(parse_rating(importance)),
            difficulty: Some(parse_rating(difficulty)),
        }),
        [_] => Ok(OptionInput::rated(raw, 5, 5, 5)),
        _ => Err(format!(
            "expected NAME or NAME:URGENCY:IMPORTANCE:DIFFICULTY, got '{raw}'"
        )),
    }
}

fn parse_rating(raw: &str) -> RawRating {
    raw.trim()
        .parse::<i64>()
        .map(RawRating::Whole)
        .unwrap_or_else(|_| RawRating::Text(raw.to_string()))
}
