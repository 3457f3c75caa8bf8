//! Error types for the edge proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

use crate::models::ErrorResponse;

// == Proxy Error Enum ==
/// Unified error type for the edge proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The configured origin URL cannot be used
    #[error("Invalid origin URL '{url}': {reason}")]
    InvalidOrigin { url: String, reason: String },

    /// The client request could not be read
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The origin could not be reached or the exchange failed
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The origin response body could not be read in full
    #[error("{0}")]
    BodyRead(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Status code reported to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidOrigin { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::BodyRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        warn!(%status, error = %message, "request failed");

        let body = Json(ErrorResponse::new(message));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the edge proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ProxyError::InvalidRequest("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProxyError::BodyRead("eof".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ProxyError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_read_message_is_verbatim() {
        let err = ProxyError::BodyRead("connection reset".into());
        assert_eq!(err.to_string(), "connection reset");
    }

    #[tokio::test]
    async fn test_into_response_json_body() {
        let response = ProxyError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Internal error: boom");
    }
}
