use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Non-2xx response from an upstream API, with the parsed error body.
    #[error("upstream error ({status}): {body}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    Ai(String),

    #[error("malformed upstream payload: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid slot: {0}")]
    InvalidSlot(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::Ai(_) => StatusCode::BAD_GATEWAY,
            AppError::Decode(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidSlot(_) => StatusCode::BAD_REQUEST,
        };

        // Upstream error bodies are surfaced close to verbatim.
        let body = match &self {
            AppError::Upstream { body, .. } => {
                serde_json::json!({ "error": self.to_string(), "upstream": body })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        (status, axum::Json(body)).into_response()
    }
}
