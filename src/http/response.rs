//! Error translation for the client-facing surface.
//!
//! Maps each downstream failure kind to an HTTP status:
//! - server error / retry exhaustion → 500
//! - client error → 404
//! - timeout → 504 Gateway Timeout
//! - transport or decode failure → 502 Bad Gateway
//! - unclassified status → passed through verbatim

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::client::ClientError;

/// JSON error body returned to gateway callers.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u32,
    pub message: String,
}

/// Renders a [`ClientError`] as an HTTP response. Handlers return this via
/// `?` so no failure path can leave the translation out.
#[derive(Debug)]
pub struct ApiError(pub ClientError);

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            ClientError::UpstreamServer { .. } | ClientError::RetryExhausted => (
                StatusCode::INTERNAL_SERVER_ERROR,
                101,
                "Unable to fetch users from downstream service",
            ),
            ClientError::UpstreamClient { .. } => (
                StatusCode::NOT_FOUND,
                102,
                "User resource not found downstream",
            ),
            ClientError::Timeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                103,
                "Downstream service timed out",
            ),
            ClientError::UnexpectedStatus { status } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                100,
                "Downstream returned an unexpected status",
            ),
            ClientError::Decode(_) | ClientError::Transport(_) | ClientError::BaseUrl(_) => (
                StatusCode::BAD_GATEWAY,
                100,
                "Unable to reach downstream service",
            ),
        };

        tracing::error!(error = %self.0, status = %status, "Translating downstream failure");

        (
            status,
            Json(ErrorResponse {
                code,
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}
