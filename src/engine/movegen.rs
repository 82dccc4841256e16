//! Per-piece move enumeration.
//!
//! Generation runs in one of two modes:
//!
//! - [`GenMode::Attack`] feeds the attack map rebuild. It ignores pins and
//!   check restrictions and the king emits every in-bounds neighbour, so the
//!   output is raw square coverage.
//! - [`GenMode::Legal`] answers move queries and terminal-state detection.
//!   It applies the pin-line restriction, the block-or-capture restriction
//!   while the mover's side is in check, and king safety against the
//!   opponent's attack map.
//!
//! Rays stop at the first occupied square: a friendly occupant yields a
//! non-playable marker, an enemy occupant a capture. The one exception is an
//! enemy king, where the scan records the capture and continues one extra
//! square so the king cannot retreat along the checking ray.

use crate::engine::board::Board;
use crate::engine::types::{Color, Move, Piece, PieceKind, Pos};

pub const STRAIGHT_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL_DIRS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2),
];

/// Generation mode, see the module docs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenMode {
    Attack,
    Legal,
}

/// Enumerate the full move list for one piece: playable moves mixed with
/// coverage markers. Callers filter with [`Move::is_playable`].
pub fn piece_moves(board: &Board, piece: &Piece, mode: GenMode) -> Vec<Move> {
    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, piece, mode, &mut moves),
        PieceKind::Knight => knight_moves(board, piece, mode, &mut moves),
        PieceKind::Bishop => ray_moves(board, piece, &DIAGONAL_DIRS, mode, &mut moves),
        PieceKind::Rook => ray_moves(board, piece, &STRAIGHT_DIRS, mode, &mut moves),
        PieceKind::Queen => {
            ray_moves(board, piece, &STRAIGHT_DIRS, mode, &mut moves);
            ray_moves(board, piece, &DIAGONAL_DIRS, mode, &mut moves);
        }
        PieceKind::King => {
            king_moves(board, piece, mode, &mut moves);
            if mode == GenMode::Legal {
                castle_moves(board, piece, &mut moves);
            }
        }
    }
    moves
}

// =========================================================================
// Check restriction
// =========================================================================

/// Destination restriction while the mover's side is in check. Never applies
/// to the king itself — the king escapes check by moving, not blocking.
enum CheckFilter<'a> {
    /// Not in check (or attack mode): every destination admitted.
    Open,
    /// Single check: only squares that block the line or capture the checker.
    Allowed(&'a [Pos]),
    /// Double check: no non-king move can resolve it.
    Blocked,
}

impl CheckFilter<'_> {
    fn admits(&self, to: Pos) -> bool {
        match self {
            CheckFilter::Open => true,
            CheckFilter::Allowed(squares) => squares.contains(&to),
            CheckFilter::Blocked => false,
        }
    }

    /// A capture is also admitted when its target is a checker, even if the
    /// landing square differs (en passant against a checking pawn).
    fn admits_capture(&self, board: &Board, to: Pos, target: Pos) -> bool {
        match self {
            CheckFilter::Open => true,
            CheckFilter::Allowed(squares) => {
                squares.contains(&to) || board.checkers().contains(&target)
            }
            CheckFilter::Blocked => false,
        }
    }

    fn blocks_all(&self) -> bool {
        matches!(self, CheckFilter::Blocked)
    }
}

fn check_filter<'a>(board: &'a Board, piece: &Piece, mode: GenMode) -> CheckFilter<'a> {
    if mode == GenMode::Attack || piece.kind == PieceKind::King {
        return CheckFilter::Open;
    }
    match board.check_info() {
        Some(info) if info.color == piece.color => {
            let allowed = board.allowed_blocks(piece.color);
            if allowed.is_empty() {
                CheckFilter::Blocked
            } else {
                CheckFilter::Allowed(allowed)
            }
        }
        _ => CheckFilter::Open,
    }
}

// =========================================================================
// Pin restriction
// =========================================================================

/// A pinned piece may only move along the line connecting its king and the
/// pinning piece (including capturing the pinner).
fn pin_admits(board: &Board, piece: &Piece, to: Pos, mode: GenMode) -> bool {
    if mode == GenMode::Attack {
        return true;
    }
    match piece.pinned_by {
        Some(pinner) => on_shared_line(board.king_pos(piece.color), pinner, to),
        None => true,
    }
}

/// Are three squares on one straight or diagonal line?
pub fn on_shared_line(a: Pos, b: Pos, c: Pos) -> bool {
    if a.x == b.x && b.x == c.x {
        return true;
    }
    if a.y == b.y && b.y == c.y {
        return true;
    }
    let diagonal =
        |p: Pos, q: Pos| (p.x as i8 - q.x as i8).abs() == (p.y as i8 - q.y as i8).abs();
    diagonal(a, b) && diagonal(a, c) && diagonal(b, c)
}

// =========================================================================
// Sliding pieces
// =========================================================================

fn ray_moves(board: &Board, piece: &Piece, dirs: &[(i8, i8)], mode: GenMode, moves: &mut Vec<Move>) {
    let filter = check_filter(board, piece, mode);
    if filter.blocks_all() {
        return;
    }

    for &(dx, dy) in dirs {
        let mut cur = piece.pos;
        loop {
            let Some(next) = cur.offset(dx, dy) else { break };
            cur = next;

            if !pin_admits(board, piece, cur, mode) {
                // The ray still ends at the first occupied square.
                if board.piece_at(cur).is_some() {
                    break;
                }
                continue;
            }

            match board.piece_at(cur) {
                Some(other) if other.color == piece.color => {
                    moves.push(Move::friendly(cur));
                    break;
                }
                Some(other) => {
                    if filter.admits_capture(board, cur, other.pos) {
                        moves.push(Move::capture(cur, other.pos));
                    }
                    if other.kind == PieceKind::King {
                        // One square beyond the king, so it cannot step back
                        // along the ray.
                        if let Some(beyond) = cur.offset(dx, dy) {
                            moves.push(Move::plain(beyond));
                        }
                    }
                    break;
                }
                None => {
                    if filter.admits(cur) {
                        moves.push(Move::plain(cur));
                    }
                }
            }
        }
    }
}

// =========================================================================
// Knight
// =========================================================================

fn knight_moves(board: &Board, piece: &Piece, mode: GenMode, moves: &mut Vec<Move>) {
    let filter = check_filter(board, piece, mode);
    if filter.blocks_all() {
        return;
    }

    for &(dx, dy) in &KNIGHT_OFFSETS {
        let Some(to) = piece.pos.offset(dx, dy) else {
            continue;
        };
        if !pin_admits(board, piece, to, mode) {
            continue;
        }
        match board.piece_at(to) {
            Some(other) if other.color == piece.color => moves.push(Move::friendly(to)),
            Some(other) => {
                if filter.admits_capture(board, to, other.pos) {
                    moves.push(Move::capture(to, other.pos));
                }
            }
            None => {
                if filter.admits(to) {
                    moves.push(Move::plain(to));
                }
            }
        }
    }
}

// =========================================================================
// King
// =========================================================================

fn king_moves(board: &Board, piece: &Piece, mode: GenMode, moves: &mut Vec<Move>) {
    for dx in -1i8..=1 {
        for dy in -1i8..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let Some(to) = piece.pos.offset(dx, dy) else {
                continue;
            };
            match board.piece_at(to) {
                Some(other) if other.color == piece.color => moves.push(Move::friendly(to)),
                Some(other) => {
                    // Never capture into a defended square.
                    if mode == GenMode::Legal && board.attacker_at(to, piece.color).is_some() {
                        continue;
                    }
                    moves.push(Move::capture(to, other.pos));
                }
                None => {
                    if mode == GenMode::Legal && board.attacker_at(to, piece.color).is_some() {
                        continue;
                    }
                    moves.push(Move::plain(to));
                }
            }
        }
    }
}

/// Castling: king and rook unmoved, king not in check, path toward the rook
/// clear, and no attacked square within two files of the king's start (the
/// squares the king actually crosses).
fn castle_moves(board: &Board, king: &Piece, moves: &mut Vec<Move>) {
    if king.has_moved() {
        return;
    }
    if board
        .check_info()
        .is_some_and(|info| info.color == king.color)
    {
        return;
    }

    for dir in [-1i8, 1] {
        let mut cur = king.pos;
        let mut steps = 0u8;
        loop {
            let Some(next) = cur.offset(dir, 0) else { break };
            cur = next;
            steps += 1;

            if steps <= 2 && board.attacker_at(cur, king.color).is_some() {
                break;
            }
            if let Some(other) = board.piece_at(cur) {
                if other.color == king.color
                    && other.kind == PieceKind::Rook
                    && !other.has_moved()
                    && let Some(dest) = king.pos.offset(2 * dir, 0)
                {
                    moves.push(Move::castle(dest, other.pos));
                }
                // Anything occupied ends the scan, rook or not.
                break;
            }
        }
    }
}

// =========================================================================
// Pawn
// =========================================================================

fn pawn_moves(board: &Board, piece: &Piece, mode: GenMode, moves: &mut Vec<Move>) {
    let filter = check_filter(board, piece, mode);
    if filter.blocks_all() {
        return;
    }

    let forward: i8 = if piece.color == Color::Black { 1 } else { -1 };
    let promo_row: u8 = if piece.color == Color::Black { 7 } else { 0 };

    // Diagonals: capture, en passant, or a coverage marker.
    for dx in [-1i8, 1] {
        let Some(to) = piece.pos.offset(dx, forward) else {
            continue;
        };
        if !pin_admits(board, piece, to, mode) {
            continue;
        }

        let occupant = board.piece_at(to);
        if let Some(other) = occupant
            && other.color != piece.color
        {
            if filter.admits_capture(board, to, other.pos) {
                let mv = Move::pawn_capture(to, other.pos);
                moves.push(if to.y == promo_row { mv.promoting() } else { mv });
            }
            continue;
        }

        // En passant: an enemy pawn beside us that just double-stepped, with
        // the landing square free.
        let beside = piece.pos.offset(dx, 0).and_then(|b| board.piece_at(b));
        if occupant.is_none()
            && let Some(target) =
                beside.filter(|p| p.color != piece.color && p.en_passant_eligible())
        {
            if filter.admits_capture(board, to, target.pos) {
                moves.push(Move::en_passant(to, target.pos));
            }
            continue;
        }

        // Empty or friendly-occupied diagonal: the square is still covered.
        if filter.admits(to) {
            moves.push(Move::pawn_diagonal(to));
        }
    }

    // Forward pushes: one square, or two on the pawn's first move. Blocked
    // by any occupant; pushes never capture.
    let reach = if piece.initial_move() { 2 } else { 1 };
    let mut to = piece.pos;
    for _ in 0..reach {
        let Some(next) = to.offset(0, forward) else { break };
        to = next;
        if board.piece_at(to).is_some() {
            break;
        }
        if !pin_admits(board, piece, to, mode) {
            continue;
        }
        if filter.admits(to) {
            let mv = Move::pawn_push(to);
            moves.push(if to.y == promo_row { mv.promoting() } else { mv });
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
