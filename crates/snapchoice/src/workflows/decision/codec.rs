//! Share-token codec.
//!
//! A decision travels as `percent-escape(base64(json))` placed after the `#`
//! of a share URL. Decoding reverses each stage and checks the shape before
//! anything is handed back, so a token is either restored whole or rejected.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;

use super::domain::{Decision, MAX_OPTIONS};

/// Longest share URL the codec will produce, for address-bar compatibility.
pub const DEFAULT_MAX_URL_LENGTH: usize = 2000;

/// Failure to produce a share link. Never affects the in-memory decision.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error(
        "Decision is too large to share via URL. Try reducing option names. \
         ({length} characters, limit {limit})"
    )]
    TooLarge { length: usize, limit: usize },
    #[error("Failed to generate share link: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Any decode failure, whichever stage it happened in.
#[derive(Debug, thiserror::Error)]
pub enum CorruptStateError {
    #[error("share token is not valid percent-encoding: {0}")]
    Escaping(#[from] std::string::FromUtf8Error),
    #[error("share token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("share token does not hold UTF-8 text: {0}")]
    Text(#[source] std::string::FromUtf8Error),
    #[error("share token does not hold valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("share token has the wrong shape: {0}")]
    Shape(String),
}

impl CorruptStateError {
    /// Message shown to the user when falling back to a fresh decision.
    pub const USER_MESSAGE: &'static str = "Could not load shared link. It might be corrupted.";
}

/// Serializes a decision into a fragment-safe token. No length check.
pub fn encode(decision: &Decision) -> Result<String, ShareError> {
    let json = serde_json::to_string(decision)?;
    let encoded = STANDARD.encode(json.as_bytes());
    Ok(urlencoding::encode(&encoded).into_owned())
}

/// Restores a decision from a token, with or without its leading `#`.
pub fn decode(token: &str) -> Result<Decision, CorruptStateError> {
    let token = token.trim();
    let token = token.strip_prefix('#').unwrap_or(token);

    let unescaped = urlencoding::decode(token)?;
    let bytes = STANDARD.decode(unescaped.as_bytes())?;
    let text = String::from_utf8(bytes).map_err(CorruptStateError::Text)?;
    let value: Value = serde_json::from_str(&text).map_err(CorruptStateError::Syntax)?;

    check_shape(&value)?;
    serde_json::from_value(value).map_err(|err| CorruptStateError::Shape(err.to_string()))
}

fn check_shape(value: &Value) -> Result<(), CorruptStateError> {
    let object = value
        .as_object()
        .ok_or_else(|| CorruptStateError::Shape("expected an object".to_string()))?;

    match object.get("context") {
        Some(Value::String(_)) => {}
        _ => return Err(CorruptStateError::Shape("missing context".to_string())),
    }

    let options = object
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| CorruptStateError::Shape("missing options sequence".to_string()))?;
    if options.len() > MAX_OPTIONS {
        return Err(CorruptStateError::Shape(format!(
            "{} options exceeds the limit of {MAX_OPTIONS}",
            options.len()
        )));
    }
    if !options.iter().all(Value::is_object) {
        return Err(CorruptStateError::Shape(
            "options must be objects".to_string(),
        ));
    }

    Ok(())
}

/// Builds share links against a fixed page address.
#[derive(Debug, Clone)]
pub struct StateCodec {
    base_url: String,
    max_url_length: usize,
}

impl StateCodec {
    pub fn new(base_url: impl Into<String>, max_url_length: usize) -> Self {
        Self {
            base_url: base_url.into(),
            max_url_length,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_url_length(&self) -> usize {
        self.max_url_length
    }

    /// Token for `decision`, refused when the full link would pass the limit.
    pub fn encode(&self, decision: &Decision) -> Result<String, ShareError> {
        let token = encode(decision)?;
        let length = self.base_url.len() + 1 + token.len();
        if length > self.max_url_length {
            return Err(ShareError::TooLarge {
                length,
                limit: self.max_url_length,
            });
        }
        Ok(token)
    }

    pub fn share_url(&self, decision: &Decision) -> Result<String, ShareError> {
        let token = self.encode(decision)?;
        Ok(format!("{}#{token}", self.base_url))
    }

    pub fn decode(&self, token: &str) -> Result<Decision, CorruptStateError> {
        decode(token)
    }
}

impl Default for StateCodec {
    fn default() -> Self {
        Self::new("http://127.0.0.1:3000/", DEFAULT_MAX_URL_LENGTH)
    }
}
