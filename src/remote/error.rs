//! Error conversion for the accounts API.
//!
//! Failed responses carry a human-readable message that must reach the
//! user unchanged, so the body is inspected for the API's message field
//! before falling back to the status line.

use std::fmt;

use crate::error::ContasError;

/// JSON fields the API may use for its error message
const MESSAGE_FIELDS: &[&str] = &["message", "mensagem", "error", "erro"];

/// Longest raw body echoed back as a message
const MAX_RAW_MESSAGE_CHARS: usize = 200;

/// Error returned by the accounts API
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code
    pub status: reqwest::StatusCode,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Build from a non-success response, consuming its body
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::new(status, extract_message(status, &body))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ApiError> for ContasError {
    fn from(error: ApiError) -> Self {
        ContasError::Provider(error.message)
    }
}

/// Pick the most useful message out of an error response body
pub fn extract_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(body)
    {
        let message = MESSAGE_FIELDS
            .iter()
            .filter_map(|name| fields.get(*name))
            .find_map(|value| value.as_str())
            .map(str::trim)
            .filter(|message| !message.is_empty());
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') && !trimmed.starts_with('<') {
        return trimmed.chars().take(MAX_RAW_MESSAGE_CHARS).collect();
    }

    format!(
        "HTTP {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}
