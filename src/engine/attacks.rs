//! Per-color attacked-square cache.
//!
//! The map is rebuilt in full after every move — no incremental updates,
//! correctness over performance. Entries are bucketed per attacker kind,
//! and friendly-blocked squares are kept as attackable: a piece defends its
//! own pieces, which is exactly what stops a king from capturing a defended
//! attacker. Pawn buckets hold only diagonal entries; pushes never attack.
//!
//! Check is discovered here as a side effect: any entry capturing a king.

use crate::engine::board::Board;
use crate::engine::check::CheckInfo;
use crate::engine::movegen::{self, GenMode};
use crate::engine::types::{Color, PieceKind, Pos};

/// One attacked-square record.
#[derive(Clone, Copy, Debug)]
pub struct AttackEntry {
    pub square: Pos,
    /// Position of the attacking piece at rebuild time.
    pub attacker: Pos,
    pub attackable: bool,
    pub friendly_blocked: bool,
    pub pawn_diagonal: bool,
}

/// Attacked squares per color, bucketed per attacker piece kind.
#[derive(Clone, Debug)]
pub struct AttackMap {
    entries: [[Vec<AttackEntry>; PieceKind::COUNT]; 2],
}

impl AttackMap {
    pub fn new() -> Self {
        AttackMap {
            entries: std::array::from_fn(|_| std::array::from_fn(|_| Vec::new())),
        }
    }

    /// Rebuild coverage for the whole board and report any king under
    /// attack.
    pub fn build(board: &Board) -> (AttackMap, Option<CheckInfo>) {
        let mut map = AttackMap::new();
        let mut check: Option<CheckInfo> = None;

        for color in [Color::White, Color::Black] {
            for piece in board.pieces(color) {
                let mut entries = Vec::new();
                for mv in movegen::piece_moves(board, piece, GenMode::Attack) {
                    // Pawns threaten only their diagonals.
                    if piece.kind == PieceKind::Pawn && !(mv.is_attackable && mv.is_pawn_diagonal)
                    {
                        continue;
                    }

                    if mv.is_capture
                        && let Some(target) = mv.capture_target
                        && let Some(victim) = board.piece_at(target)
                        && victim.kind == PieceKind::King
                    {
                        match &mut check {
                            Some(info) if info.king == victim.pos => {
                                info.checkers.push(piece.pos)
                            }
                            _ => {
                                check = Some(CheckInfo {
                                    king: victim.pos,
                                    color: victim.color,
                                    checkers: vec![piece.pos],
                                })
                            }
                        }
                    }

                    entries.push(AttackEntry {
                        square: mv.to,
                        attacker: piece.pos,
                        attackable: mv.is_attackable,
                        friendly_blocked: mv.is_friendly_blocked,
                        pawn_diagonal: mv.is_pawn_diagonal,
                    });
                }
                map.entries[color.index()][piece.kind.index()].extend(entries);
            }
        }

        (map, check)
    }

    /// All entries recorded for one color, across every kind bucket.
    pub fn entries(&self, color: Color) -> impl Iterator<Item = &AttackEntry> {
        self.entries[color.index()].iter().flatten()
    }

    /// First piece of `by` with an attackable entry on `square`.
    pub fn attacker_of(&self, square: Pos, by: Color) -> Option<Pos> {
        self.entries(by)
            .find(|e| e.square == square && e.attackable)
            .map(|e| e.attacker)
    }

    /// Is `square` covered by any attackable entry of `by`?
    pub fn is_attacked(&self, square: Pos, by: Color) -> bool {
        self.attacker_of(square, by).is_some()
    }
}

impl Default for AttackMap {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
