//! Pin detection.
//!
//! A piece is pinned when a sliding enemy piece's ray passes through exactly
//! that one piece before reaching its king. Pins are recomputed from scratch
//! on every rebuild; the board additionally drops stale records when the
//! pinner, the pinned piece, or the king moves.

use crate::engine::board::Board;
use crate::engine::movegen::{DIAGONAL_DIRS, STRAIGHT_DIRS};
use crate::engine::types::{Color, PieceKind, Pos};

/// A recorded pin: `pinned` sits between `pinner` and its own king.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pin {
    pub pinned: Pos,
    pub pinner: Pos,
    /// Color of the pinned side.
    pub color: Color,
}

/// Scan every sliding piece's rays for pins.
pub fn find_pins(board: &Board) -> Vec<Pin> {
    let mut pins = Vec::new();
    for color in [Color::White, Color::Black] {
        for piece in board.pieces(color) {
            let dir_sets: &[&[(i8, i8)]] = match piece.kind {
                PieceKind::Rook => &[&STRAIGHT_DIRS],
                PieceKind::Bishop => &[&DIAGONAL_DIRS],
                PieceKind::Queen => &[&STRAIGHT_DIRS, &DIAGONAL_DIRS],
                _ => continue,
            };
            for dirs in dir_sets {
                for &(dx, dy) in *dirs {
                    if let Some(pin) = scan_ray(board, piece.pos, piece.color, dx, dy) {
                        pins.push(pin);
                    }
                }
            }
        }
    }
    pins
}

/// Walk one ray from a slider: a single enemy non-king piece followed by the
/// enemy king is a pin; anything else is not.
fn scan_ray(board: &Board, from: Pos, attacker: Color, dx: i8, dy: i8) -> Option<Pin> {
    let mut cur = from;
    let mut shield: Option<Pos> = None;

    loop {
        cur = cur.offset(dx, dy)?;
        let Some(piece) = board.piece_at(cur) else {
            continue;
        };
        if piece.color == attacker {
            return None;
        }
        match (shield, piece.kind) {
            // First enemy piece on the ray; a bare king here is check, not a pin.
            (None, PieceKind::King) => return None,
            (None, _) => shield = Some(cur),
            // Second piece: only the enemy king behind the shield pins it.
            (Some(pinned), PieceKind::King) => {
                return Some(Pin {
                    pinned,
                    pinner: from,
                    color: piece.color,
                });
            }
            (Some(_), _) => return None,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
