//! Wire format of the iTunes Search API.
//!
//! Both `/search` and `/lookup` answer with the same envelope:
//!
//! ```json
//! { "resultCount": 2, "results": [ { "trackId": 1, ... }, ... ] }
//! ```
//!
//! Rejected requests carry `{ "errorMessage": "..." }` instead, usually with a
//! 400 status, occasionally with 200.

use appfind_core::{CatalogError, Software};
use reqwest::StatusCode;
use serde::Deserialize;

/// Longest slice of a non-JSON error body echoed back to the user.
const BODY_SNIPPET_LEN: usize = 120;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default)]
    pub result_count: usize,
    #[serde(default)]
    pub results: Vec<Software>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_message: String,
}

/// Turn a status and raw body into a result list or a [`CatalogError`].
pub fn decode(status: StatusCode, body: &str) -> Result<Vec<Software>, CatalogError> {
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
            message: error_message(status, body),
        });
    }

    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| CatalogError::Decode(e.to_string()))?;

    if let Some(msg) = envelope.error_message {
        return Err(CatalogError::Api(msg));
    }
    if envelope.result_count != envelope.results.len() {
        tracing::debug!(
            result_count = envelope.result_count,
            decoded = envelope.results.len(),
            "itunes: resultCount disagrees with results"
        );
    }
    Ok(envelope.results)
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        return err.error_message;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('<') {
        return trimmed.chars().take(BODY_SNIPPET_LEN).collect();
    }
    status.canonical_reason().unwrap_or("request failed").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
