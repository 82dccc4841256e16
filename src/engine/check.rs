//! Check, checkmate, and stalemate resolution.
//!
//! Check itself is discovered during the attack-map rebuild (an entry
//! capturing a king). This module derives everything downstream of that
//! fact: the block-or-capture squares for a single checker, and the two
//! terminal states.

use crate::engine::board::Board;
use crate::engine::movegen::{self, GenMode};
use crate::engine::types::{Color, Move, PieceKind, Pos};

/// The king currently in check and the pieces delivering it.
#[derive(Clone, Debug)]
pub struct CheckInfo {
    pub king: Pos,
    /// Color of the checked king.
    pub color: Color,
    pub checkers: Vec<Pos>,
}

/// Squares strictly between the king and a single checker along the attack
/// line. Empty for a knight (jumps cannot be blocked) and for any adjacent
/// checker.
pub fn blocking_squares(board: &Board, king: Pos, checker: Pos) -> Vec<Pos> {
    if board
        .piece_at(checker)
        .is_some_and(|p| p.kind == PieceKind::Knight)
    {
        return Vec::new();
    }

    let dx = (checker.x as i8 - king.x as i8).signum();
    let dy = (checker.y as i8 - king.y as i8).signum();

    let mut squares = Vec::new();
    let mut cur = king;
    loop {
        let Some(next) = cur.offset(dx, dy) else { break };
        cur = next;
        if cur == checker {
            break;
        }
        squares.push(cur);
    }
    squares
}

/// The allowed responses for the checked side: block squares plus the
/// checker's own square. Empty under double check — only the king can
/// resolve that.
pub fn allowed_squares(board: &Board, info: &CheckInfo) -> Vec<Pos> {
    match info.checkers.as_slice() {
        [single] => {
            let mut squares = blocking_squares(board, info.king, *single);
            squares.push(*single);
            squares
        }
        _ => Vec::new(),
    }
}

/// Does `color` have any playable legal move in the current position?
pub fn has_playable_move(board: &Board, color: Color) -> bool {
    board.pieces(color).iter().any(|piece| {
        movegen::piece_moves(board, piece, GenMode::Legal)
            .iter()
            .any(Move::is_playable)
    })
}

// =========================================================================
// Tests
// =========================================================================
