use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use chess_core::{MoveError, PositionError};
use uci_engine::{EngineError, ParseDifficultyError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidPosition(#[from] PositionError),

    #[error(transparent)]
    IllegalMove(#[from] MoveError),

    #[error(transparent)]
    InvalidDifficulty(#[from] ParseDifficultyError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Error getting engine move")]
    EngineUnavailable,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidPosition(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::IllegalMove(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::InvalidDifficulty(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::EngineUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error getting engine move".to_string(),
            ),
            AppError::Engine(e) => {
                tracing::error!("Engine error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Engine failure".to_string(),
                )
            }
            AppError::Anyhow(e) => {
                tracing::error!("Unexpected error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
