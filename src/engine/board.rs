//! Board state: the 8×8 grid, the authoritative piece collections, and the
//! derived structures recomputed after every move.
//!
//! The grid is a fast occupancy view; the per-color piece vectors are the
//! authoritative data. The two never diverge. Move application performs no
//! validation and no rollback: the caller confirms legality against the
//! generator's output first, then every application succeeds. After each
//! apply the attack map, pins, check bookkeeping, and terminal flags are
//! rebuilt from scratch.

use crate::engine::attacks::AttackMap;
use crate::engine::check::{self, CheckInfo};
use crate::engine::movegen::{self, GenMode};
use crate::engine::pins::{self, Pin};
use crate::engine::types::{ChessError, Color, GameStatus, Move, Piece, PieceKind, PieceState, Pos};

/// Back-rank layout, files a through h.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A complete board with derived state.
#[derive(Clone, Debug)]
pub struct Board {
    /// Occupancy grid, `grid[y][x]`. Row 0 is Black's back rank.
    grid: [[Option<(Color, PieceKind)>; 8]; 8],
    /// Authoritative piece data, one vector per color.
    pieces: [Vec<Piece>; 2],
    turn: Color,

    attacks: AttackMap,
    pins: Vec<Pin>,
    check: Option<CheckInfo>,
    /// Squares that resolve a single check, per defending color.
    allowed_blocks: [Vec<Pos>; 2],
    checkmate: bool,
    stalemate: bool,
}

impl Board {
    // -----------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------

    /// An empty board with no pieces and no derived state. Used with
    /// [`Board::place`] and [`Board::rebuild`] to set up custom positions.
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
            pieces: [Vec::new(), Vec::new()],
            turn: Color::White,
            attacks: AttackMap::new(),
            pins: Vec::new(),
            check: None,
            allowed_blocks: [Vec::new(), Vec::new()],
            checkmate: false,
            stalemate: false,
        }
    }

    /// The standard opening position, White to move, derived state built.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (x, &kind) in BACK_RANK.iter().enumerate() {
            let x = x as u8;
            board.place(Color::Black, kind, Pos::new(x, 0));
            board.place(Color::Black, PieceKind::Pawn, Pos::new(x, 1));
            board.place(Color::White, PieceKind::Pawn, Pos::new(x, 6));
            board.place(Color::White, kind, Pos::new(x, 7));
        }
        board.rebuild();
        board
    }

    /// Put a new piece on an empty square. Derived state is stale until the
    /// next [`Board::rebuild`].
    pub fn place(&mut self, color: Color, kind: PieceKind, pos: Pos) {
        debug_assert!(
            self.grid[pos.y as usize][pos.x as usize].is_none(),
            "square {pos} already occupied"
        );
        self.grid[pos.y as usize][pos.x as usize] = Some((color, kind));
        self.pieces[color.index()].push(Piece::new(color, kind, pos));
    }

    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Occupancy grid view, row 0 first (Black's back rank).
    pub fn cells(&self) -> &[[Option<(Color, PieceKind)>; 8]; 8] {
        &self.grid
    }

    pub fn pieces(&self, color: Color) -> &[Piece] {
        &self.pieces[color.index()]
    }

    /// The piece on `pos`, if any. The grid rejects empty squares in O(1).
    pub fn piece_at(&self, pos: Pos) -> Option<&Piece> {
        let (color, _) = self.grid[pos.y as usize][pos.x as usize]?;
        self.pieces[color.index()].iter().find(|p| p.pos == pos)
    }

    fn piece_index_at(&self, pos: Pos) -> Option<(Color, usize)> {
        let (color, _) = self.grid[pos.y as usize][pos.x as usize]?;
        self.pieces[color.index()]
            .iter()
            .position(|p| p.pos == pos)
            .map(|i| (color, i))
    }

    fn find_king(&self, color: Color) -> Option<Pos> {
        self.pieces[color.index()]
            .iter()
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.pos)
    }

    /// Position of `color`'s king. Exactly one king per color is assumed.
    pub fn king_pos(&self, color: Color) -> Pos {
        self.find_king(color).expect("king must exist")
    }

    /// An opposing piece threatening `pos`, from `for_color`'s point of
    /// view. Used for king safety and castling transit checks.
    pub fn attacker_at(&self, pos: Pos, for_color: Color) -> Option<Pos> {
        self.attacks.attacker_of(pos, !for_color)
    }

    pub fn attacks(&self) -> &AttackMap {
        &self.attacks
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn check_info(&self) -> Option<&CheckInfo> {
        self.check.as_ref()
    }

    /// Squares of the pieces currently giving check; empty when not in
    /// check.
    pub fn checkers(&self) -> &[Pos] {
        self.check.as_ref().map(|c| c.checkers.as_slice()).unwrap_or(&[])
    }

    /// Block-or-capture squares for `color` while it is in single check.
    pub fn allowed_blocks(&self, color: Color) -> &[Pos] {
        &self.allowed_blocks[color.index()]
    }

    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    pub fn status(&self) -> GameStatus {
        if self.checkmate {
            GameStatus::Checkmate
        } else if self.stalemate {
            GameStatus::Stalemate
        } else if self.check.is_some() {
            GameStatus::Check
        } else {
            GameStatus::Active
        }
    }

    /// Full move list for the piece on `pos`; fails when the square is
    /// empty. Entries mix playable moves and coverage markers.
    pub fn moves_from(&self, pos: Pos) -> Result<Vec<Move>, ChessError> {
        let piece = self
            .piece_at(pos)
            .ok_or_else(|| ChessError::NotFound(pos.to_coord()))?;
        Ok(movegen::piece_moves(self, piece, GenMode::Legal))
    }

    // -----------------------------------------------------------------
    // Move application
    // -----------------------------------------------------------------

    /// Apply a move. The caller has already confirmed `mv` against the
    /// generator's output; an unoccupied `from` is a programming error.
    ///
    /// Side effects always run in full: grid and piece mutation, turn flip,
    /// full recomputation of attack map, pins, check, and terminal flags.
    pub fn apply_move(&mut self, from: Pos, mv: &Move) {
        let (color, idx) = self
            .piece_index_at(from)
            .unwrap_or_else(|| panic!("apply_move: no piece at {from}\n{self}"));
        let to = mv.to;
        let kind = self.pieces[color.index()][idx].kind;

        self.invalidate_pins(from);
        self.check = None;
        self.allowed_blocks = [Vec::new(), Vec::new()];

        // A double-stepped pawn becomes capturable en passant for one ply,
        // but only when an enemy pawn stands beside the landing square.
        let double_step = kind == PieceKind::Pawn && from.y.abs_diff(to.y) == 2;
        let ep_eligible = double_step && self.enemy_pawn_beside(to, color);

        let new_kind = if mv.is_promotion { PieceKind::Queen } else { kind };

        self.grid[from.y as usize][from.x as usize] = None;
        self.grid[to.y as usize][to.x as usize] = Some((color, new_kind));

        let piece = &mut self.pieces[color.index()][idx];
        piece.pos = to;
        piece.kind = new_kind;
        piece.state = match piece.state {
            PieceState::Pawn { .. } if mv.is_promotion => PieceState::Plain,
            PieceState::Pawn { .. } => PieceState::Pawn {
                initial_move: false,
                en_passant_eligible: ep_eligible,
            },
            PieceState::Mover { .. } => PieceState::Mover { has_moved: true },
            PieceState::Plain => PieceState::Plain,
        };

        // Castling relocates the paired rook onto the square the king
        // crossed.
        if mv.is_castle
            && let Some(rook_from) = mv.castle_partner
        {
            let dir = (to.x as i8 - from.x as i8).signum();
            let rook_to = from
                .offset(dir, 0)
                .unwrap_or_else(|| panic!("castle from {from} has no rook destination"));
            self.relocate_rook(rook_from, rook_to, color);
        }

        // The opponent's en-passant window closed with this ply.
        self.expire_en_passant(!color);

        self.turn = !self.turn;
        self.rebuild();
    }

    /// Remove `target` from the board, then apply the move. Used for every
    /// capture; for en passant `target` differs from the destination.
    pub fn apply_capture(&mut self, from: Pos, mv: &Move, target: Pos) {
        let (color, idx) = self
            .piece_index_at(target)
            .unwrap_or_else(|| panic!("apply_capture: no piece at {target}\n{self}"));
        self.grid[target.y as usize][target.x as usize] = None;
        self.pieces[color.index()].remove(idx);
        self.apply_move(from, mv);
    }

    // -----------------------------------------------------------------
    // Application helpers
    // -----------------------------------------------------------------

    /// Drop pin records invalidated by the piece about to move off `mover`:
    /// the pinner itself, the pinned piece, or the pinned side's king.
    fn invalidate_pins(&mut self, mover: Pos) {
        let kings = [self.find_king(Color::White), self.find_king(Color::Black)];
        let pins = std::mem::take(&mut self.pins);
        for pin in pins {
            let king_moved = kings[pin.color.index()] == Some(mover);
            if pin.pinner == mover || pin.pinned == mover || king_moved {
                if let Some((c, i)) = self.piece_index_at(pin.pinned) {
                    self.pieces[c.index()][i].pinned_by = None;
                }
            } else {
                self.pins.push(pin);
            }
        }
    }

    fn enemy_pawn_beside(&self, pos: Pos, color: Color) -> bool {
        [-1i8, 1].iter().any(|&dx| {
            pos.offset(dx, 0)
                .and_then(|p| self.piece_at(p))
                .is_some_and(|p| p.color != color && p.kind == PieceKind::Pawn)
        })
    }

    fn expire_en_passant(&mut self, color: Color) {
        for piece in &mut self.pieces[color.index()] {
            if let PieceState::Pawn {
                initial_move,
                en_passant_eligible: true,
            } = piece.state
            {
                piece.state = PieceState::Pawn {
                    initial_move,
                    en_passant_eligible: false,
                };
            }
        }
    }

    fn relocate_rook(&mut self, from: Pos, to: Pos, color: Color) {
        let (c, idx) = self
            .piece_index_at(from)
            .unwrap_or_else(|| panic!("castle: no rook at {from}\n{self}"));
        debug_assert_eq!(c, color, "castle rook color mismatch");
        self.grid[from.y as usize][from.x as usize] = None;
        self.grid[to.y as usize][to.x as usize] = Some((color, PieceKind::Rook));
        let rook = &mut self.pieces[c.index()][idx];
        rook.pos = to;
        rook.state = PieceState::Mover { has_moved: true };
    }

    // -----------------------------------------------------------------
    // Recomputation
    // -----------------------------------------------------------------

    /// Recompute every derived structure from the grid and piece
    /// collections: attack map, pins, check bookkeeping, terminal flags.
    pub fn rebuild(&mut self) {
        for side in &mut self.pieces {
            for piece in side.iter_mut() {
                piece.pinned_by = None;
            }
        }
        self.pins.clear();
        self.check = None;
        self.allowed_blocks = [Vec::new(), Vec::new()];
        self.checkmate = false;
        self.stalemate = false;

        let (attacks, check) = AttackMap::build(self);
        self.attacks = attacks;
        self.check = check;

        let pins = pins::find_pins(self);
        for pin in &pins {
            if let Some((c, i)) = self.piece_index_at(pin.pinned) {
                self.pieces[c.index()][i].pinned_by = Some(pin.pinner);
            }
        }
        self.pins = pins;

        if let Some(info) = self.check.clone() {
            self.allowed_blocks[info.color.index()] = check::allowed_squares(self, &info);
            if !check::has_playable_move(self, info.color) {
                self.checkmate = true;
            }
        } else if self.find_king(self.turn).is_some() && !check::has_playable_move(self, self.turn)
        {
            self.stalemate = true;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl std::fmt::Display for Board {
    /// Text grid with rank 8 at the top, for debugging and panic context.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..8usize {
            write!(f, "{} ", 8 - y)?;
            for x in 0..8usize {
                let ch = match self.grid[y][x] {
                    Some((color, kind)) => kind.to_char(color),
                    None => '.',
                };
                write!(f, "{ch}")?;
                if x < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
