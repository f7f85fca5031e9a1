//! Mapping of HTTP failures into [`AppError`].

use reqwest::StatusCode;
use serde::Deserialize;

use datahub_core::AppError;
use datahub_core::error::ErrorKind;

/// Error body returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub message: String,
    /// Error family reported by the backend (`rest`, `validation`, ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Offending field for validation errors.
    #[serde(default)]
    pub field: Option<String>,
}

/// Error kind for a non-success status.
pub fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status.as_u16() {
        400 => ErrorKind::Validation,
        401 => ErrorKind::Authentication,
        403 => ErrorKind::Authorization,
        404 => ErrorKind::NotFound,
        409 => ErrorKind::Conflict,
        _ => ErrorKind::ExternalService,
    }
}

/// Build the error for a failed response from its status and body text.
pub fn from_response(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("Request failed with status {status}")
            } else {
                trimmed.to_string()
            }
        });
    AppError::new(kind_for_status(status), message)
}

/// Wrap a transport-level failure.
pub fn transport(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        "The server did not respond in time".to_string()
    } else if err.is_connect() {
        "Could not connect to the server".to_string()
    } else if err.is_decode() {
        format!("Unexpected response from the server: {err}")
    } else {
        format!("Request failed: {err}")
    };
    AppError::with_source(ErrorKind::ExternalService, message, err)
}
