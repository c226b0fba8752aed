use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use value_study::{ConfigError, DecodeError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Viewport session not found")]
    SessionNotFound,

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Decode(_) => StatusCode::BAD_REQUEST,
            ApiError::Config(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::Render(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
