use serde::{Deserialize, Serialize};

use super::state::GameEntry;
use crate::engine::types::Color;

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub from: String,
    /// Destination square. Optional in the wire format; a missing value is
    /// rejected as an invalid request.
    pub to: Option<String>,
    /// Square of the piece to capture, when the client names one.
    pub capture: Option<String>,
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub engine: String,
    pub uptime: u64,
}

/// Full game snapshot: grid, turn, and derived state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: String,
    /// 8×8 grid, rank 8 first. Pieces are labels like "wP", "bK".
    pub board: Vec<Vec<Option<String>>>,
    pub current_turn: String,
    pub status: String,
    pub check: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_king: Option<String>,
    pub checkers: Vec<String>,
    pub checkmate: bool,
    pub stalemate: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveListResponse {
    pub moves: Vec<String>,
}

// ---------------------------------------------------------------------------
// Snapshot assembly
// ---------------------------------------------------------------------------

/// Build the snapshot response for one registry entry.
pub fn game_to_response(id: &str, entry: &GameEntry) -> GameResponse {
    let board = &entry.board;

    let grid: Vec<Vec<Option<String>>> = board
        .cells()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    cell.map(|(color, kind)| {
                        let c = match color {
                            Color::White => 'w',
                            Color::Black => 'b',
                        };
                        format!("{c}{}", kind.label())
                    })
                })
                .collect()
        })
        .collect();

    let check = board.check_info();

    GameResponse {
        id: id.to_string(),
        board: grid,
        current_turn: board.turn().to_string(),
        status: board.status().as_str().to_string(),
        check: check.is_some(),
        checked_king: check.map(|c| c.king.to_coord()),
        checkers: board.checkers().iter().map(|p| p.to_coord()).collect(),
        checkmate: board.is_checkmate(),
        stalemate: board.is_stalemate(),
        created_at: entry.created_at.to_rfc3339(),
    }
}
