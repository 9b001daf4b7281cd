//! Error types for the relay
//!
//! Every failure a forwarder can hit is a [`RelayError`]. Which HTTP status a
//! caller sees for it is decided in exactly one place, [`ErrorPolicy::status_for`].

use std::str::FromStr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Relay-level errors
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing URL or API Key")]
    MissingCredentials,

    #[error("Method not supported: {0}")]
    UnsupportedMethod(String),

    #[error("Invalid request envelope: {0}")]
    InvalidEnvelope(#[from] serde_json::Error),

    #[error("Invalid target URL: {0}")]
    InvalidUrl(String),

    #[error("API key cannot be sent as a header value")]
    InvalidHeader,

    #[error("{0}")]
    Upstream(#[from] reqwest::Error),
}

impl RelayError {
    /// Whether this error belongs to the catch-all transport bucket
    ///
    /// Anything that is not a presence check or a method check is treated as
    /// an upstream/transport failure: malformed envelopes, unparsable URLs,
    /// DNS/connect/timeout errors.
    pub fn is_transport_failure(&self) -> bool {
        !matches!(
            self,
            RelayError::MissingCredentials | RelayError::UnsupportedMethod(_)
        )
    }

    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MissingCredentials => "missing_credentials",
            RelayError::UnsupportedMethod(_) => "unsupported_method",
            RelayError::InvalidEnvelope(_) => "invalid_envelope",
            RelayError::InvalidUrl(_) => "invalid_url",
            RelayError::InvalidHeader => "invalid_header",
            RelayError::Upstream(_) => "upstream",
        }
    }

    /// Render this error as a response using the given status policy
    pub fn into_response_with(self, policy: ErrorPolicy) -> Response {
        let status = policy.status_for(&self);
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// How transport failures are reported to the caller
///
/// `Lenient` keeps the historical behaviour of answering `200 OK` with an
/// `{"error": ...}` body. `Strict` reports them as `502 Bad Gateway`.
/// Presence and method failures are 400 and 405 under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    #[default]
    Lenient,
    Strict,
}

impl ErrorPolicy {
    /// Decide the HTTP status for a relay error
    pub fn status_for(&self, error: &RelayError) -> StatusCode {
        match error {
            RelayError::MissingCredentials => StatusCode::BAD_REQUEST,
            RelayError::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => match self {
                ErrorPolicy::Lenient => StatusCode::OK,
                ErrorPolicy::Strict => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ErrorPolicy::Lenient),
            "strict" => Ok(ErrorPolicy::Strict),
            other => Err(format!("unknown error policy '{}'", other)),
        }
    }
}

/// Result type alias for convenience
pub type RelayResult<T> = Result<T, RelayError>;
