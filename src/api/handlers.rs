use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::engine::notation::{encode_move, parse_coord};
use crate::engine::types::{ChessError, Move, Pos};

use super::errors::ApiError;
use super::models::{GameResponse, HealthResponse, MoveListResponse, MoveRequest, game_to_response};
use super::state::{GameEntry, SharedState, generate_game_id};

// =========================================================================
// Health
// =========================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: "chess-api".to_string(),
        uptime,
    })
}

// =========================================================================
// Create Game
// =========================================================================

/// POST /api/games
pub async fn create_game(State(state): State<SharedState>) -> (StatusCode, Json<GameResponse>) {
    let mut games = state.games.write().await;

    let mut id = generate_game_id();
    while games.contains_key(&id) {
        id = generate_game_id();
    }

    let entry = GameEntry::new();
    let response = game_to_response(&id, &entry);
    tracing::info!(game_id = %id, "created game");
    games.insert(id, entry);

    (StatusCode::CREATED, Json(response))
}

// =========================================================================
// Get Game
// =========================================================================

/// GET /api/games/{id}
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let games = state.games.read().await;
    let entry = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;
    Ok(Json(game_to_response(&id, entry)))
}

// =========================================================================
// List Piece Moves
// =========================================================================

/// GET /api/games/{id}/pieces/{pos}/moves
pub async fn piece_moves(
    State(state): State<SharedState>,
    Path((id, square)): Path<(String, String)>,
) -> Result<Json<MoveListResponse>, ApiError> {
    let games = state.games.read().await;
    let entry = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    let pos = parse_coord(&square)?;
    let moves = entry.board.moves_from(pos)?;

    Ok(Json(MoveListResponse {
        moves: moves.iter().map(encode_move).collect(),
    }))
}

// =========================================================================
// Execute Move
// =========================================================================

/// POST /api/games/{id}/moves
///
/// The boundary owns legality: the requested destination must appear in the
/// generator's playable output for the piece, and only the side to move may
/// move. Once checkmate or stalemate is set, the game absorbs no further
/// moves.
pub async fn make_move(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(input): Json<MoveRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let mut games = state.games.write().await;
    let entry = games
        .get_mut(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;
    let board = &mut entry.board;

    if board.status().is_game_over() {
        return Err(ApiError::GameOver(board.status().as_str().to_string()));
    }

    let from = parse_coord(&input.from)?;
    let to_str = input
        .to
        .as_deref()
        .ok_or_else(|| ApiError::InvalidRequest("missing destination square".into()))?;
    let to = parse_coord(to_str)?;

    let mover_color = board
        .piece_at(from)
        .ok_or_else(|| ApiError::from(ChessError::NotFound(from.to_coord())))?
        .color;
    if mover_color != board.turn() {
        return Err(illegal(from, to, "not this side's turn"));
    }

    let mv: Move = board
        .moves_from(from)?
        .into_iter()
        .find(|m| m.to == to && m.is_playable())
        .ok_or_else(|| illegal(from, to, "destination is not a legal move"))?;

    // A client-named capture target must match the generator's.
    if let Some(capture) = &input.capture {
        let capture = parse_coord(capture)?;
        if mv.capture_target != Some(capture) {
            return Err(illegal(from, to, "capture target does not match"));
        }
    }

    tracing::info!(game_id = %id, from = %from, to = %to, "applying move");
    match mv.capture_target {
        Some(target) => board.apply_capture(from, &mv, target),
        None => board.apply_move(from, &mv),
    }

    if board.status().is_game_over() {
        tracing::info!(game_id = %id, status = board.status().as_str(), "game over");
    }

    Ok(Json(game_to_response(&id, entry)))
}

fn illegal(from: Pos, to: Pos, reason: &str) -> ApiError {
    ApiError::from(ChessError::IllegalMove {
        from: from.to_coord(),
        to: to.to_coord(),
        reason: reason.to_string(),
    })
}
