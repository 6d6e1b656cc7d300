use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use event_bus::PublishError;

use crate::models::ErrorResponse;

/// Errors surfaced to HTTP callers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("failed to publish event: {0}")]
    Publish(#[from] PublishError),
}

impl ApiError {
    /// Serialization failures are ours (500); transport failures mean the bus
    /// is unreachable (503)
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Publish(PublishError::Serialization(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Publish(PublishError::Transport { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
