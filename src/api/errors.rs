use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::ChessError;

/// Structured API error that serializes to JSON.
#[derive(Debug)]
pub enum ApiError {
    GameNotFound(String),
    PieceNotFound(String),
    InvalidRequest(String),
    IllegalMove(String),
    GameOver(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::GameNotFound(id) => (
                StatusCode::NOT_FOUND,
                "GAME_NOT_FOUND",
                format!("Game not found: {id}"),
            ),
            ApiError::PieceNotFound(square) => (
                StatusCode::NOT_FOUND,
                "PIECE_NOT_FOUND",
                format!("No piece at {square}"),
            ),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            ApiError::IllegalMove(msg) => (StatusCode::BAD_REQUEST, "ILLEGAL_MOVE", msg),
            ApiError::GameOver(msg) => (
                StatusCode::BAD_REQUEST,
                "GAME_OVER",
                format!("Game is already over: {msg}"),
            ),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChessError> for ApiError {
    fn from(err: ChessError) -> Self {
        match err {
            ChessError::NotFound(square) => ApiError::PieceNotFound(square),
            ChessError::InvalidRequest(_) => ApiError::InvalidRequest(err.to_string()),
            ChessError::IllegalMove { .. } => ApiError::IllegalMove(err.to_string()),
        }
    }
}
