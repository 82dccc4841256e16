use std::fmt;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Index for array lookups: White=0, Black=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Number of piece kinds.
    pub const COUNT: usize = 6;

    /// Index for array lookups: Pawn=0 .. King=5.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Does this kind move along rays?
    #[inline]
    pub fn is_sliding(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Uppercase letter used in board labels ("wP", "bK", …).
    pub fn label(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Single uppercase letter for white, lowercase for black.
    pub fn to_char(self, color: Color) -> char {
        match color {
            Color::White => self.label(),
            Color::Black => self.label().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn"),
            PieceKind::Knight => write!(f, "knight"),
            PieceKind::Bishop => write!(f, "bishop"),
            PieceKind::Rook => write!(f, "rook"),
            PieceKind::Queen => write!(f, "queen"),
            PieceKind::King => write!(f, "king"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A square on the board. `x` is the file (0 = 'a'); `y` is the row index,
/// with row 0 the back rank of Black (whose pawns move toward increasing
/// `y`). Display mapping: file = 'a' + x, rank = 8 - y, so (4, 6) is "e2".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    #[inline]
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < 8 && y < 8, "position out of range: ({x}, {y})");
        Pos { x, y }
    }

    /// Step by a signed offset, `None` when the result leaves the board.
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Pos> {
        let x = self.x as i8 + dx;
        let y = self.y as i8 + dy;
        if (0..8).contains(&x) && (0..8).contains(&y) {
            Some(Pos::new(x as u8, y as u8))
        } else {
            None
        }
    }

    /// Parse coordinate notation like "e2".
    pub fn from_coord(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'0');
        if file < 8 && (1..=8).contains(&rank) {
            Some(Pos::new(file, 8 - rank))
        } else {
            None
        }
    }

    /// Convert to coordinate notation like "e2".
    pub fn to_coord(self) -> String {
        let file = (b'a' + self.x) as char;
        let rank = (b'0' + (8 - self.y)) as char;
        format!("{file}{rank}")
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coord())
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// Kind-specific mutable state. Promotion swaps the whole variant, so no
/// pawn-only field ever outlives the pawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceState {
    /// Pawns track their double-step right and the one-ply window in which
    /// they can be captured en passant.
    Pawn {
        initial_move: bool,
        en_passant_eligible: bool,
    },
    /// Rooks and kings track whether they have moved (castling rights).
    Mover { has_moved: bool },
    /// Knights, bishops, and queens carry no extra state.
    Plain,
}

impl PieceState {
    pub fn for_kind(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => PieceState::Pawn {
                initial_move: true,
                en_passant_eligible: false,
            },
            PieceKind::Rook | PieceKind::King => PieceState::Mover { has_moved: false },
            _ => PieceState::Plain,
        }
    }
}

/// A piece on the board. Pieces are identified by their position; the board
/// guarantees at most one piece per square. `pinned_by` holds the pinning
/// piece's position — a lookup key, not an owning reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub pos: Pos,
    pub state: PieceState,
    pub pinned_by: Option<Pos>,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, pos: Pos) -> Self {
        Piece {
            color,
            kind,
            pos,
            state: PieceState::for_kind(kind),
            pinned_by: None,
        }
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pinned_by.is_some()
    }

    /// Whether the piece has ever moved. Only meaningful for kings, rooks,
    /// and pawns; stateless pieces report `false`.
    pub fn has_moved(&self) -> bool {
        match self.state {
            PieceState::Mover { has_moved } => has_moved,
            PieceState::Pawn { initial_move, .. } => !initial_move,
            PieceState::Plain => false,
        }
    }

    /// Pawn double-step right still available.
    pub fn initial_move(&self) -> bool {
        matches!(self.state, PieceState::Pawn { initial_move: true, .. })
    }

    /// Pawn may be captured en passant on this ply.
    pub fn en_passant_eligible(&self) -> bool {
        matches!(
            self.state,
            PieceState::Pawn {
                en_passant_eligible: true,
                ..
            }
        )
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// One entry in a piece's move list: a destination plus facet flags. The
/// list mixes playable moves with coverage markers (friendly-blocked squares,
/// pawn diagonals without a target); callers filter with [`Move::is_playable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub to: Pos,
    pub is_capture: bool,
    pub is_friendly_blocked: bool,
    pub is_attackable: bool,
    pub is_pawn_diagonal: bool,
    pub is_en_passant: bool,
    pub is_promotion: bool,
    pub is_castle: bool,
    /// Position of the piece removed by this move. Differs from `to` for
    /// en passant.
    pub capture_target: Option<Pos>,
    /// Position of the rook paired with a castle move.
    pub castle_partner: Option<Pos>,
}

impl Move {
    fn blank(to: Pos) -> Self {
        Move {
            to,
            is_capture: false,
            is_friendly_blocked: false,
            is_attackable: false,
            is_pawn_diagonal: false,
            is_en_passant: false,
            is_promotion: false,
            is_castle: false,
            capture_target: None,
            castle_partner: None,
        }
    }

    /// A move onto an empty square.
    pub fn plain(to: Pos) -> Self {
        Move {
            is_attackable: true,
            ..Move::blank(to)
        }
    }

    /// A capture of the piece standing on `target`.
    pub fn capture(to: Pos, target: Pos) -> Self {
        Move {
            is_capture: true,
            is_attackable: true,
            capture_target: Some(target),
            ..Move::blank(to)
        }
    }

    /// A square blocked by a friendly piece. Never playable, but recorded:
    /// it marks the square as defended.
    pub fn friendly(to: Pos) -> Self {
        Move {
            is_friendly_blocked: true,
            is_attackable: true,
            ..Move::blank(to)
        }
    }

    /// A pawn push. Pushes do not attack.
    pub fn pawn_push(to: Pos) -> Self {
        Move::blank(to)
    }

    /// A pawn's diagonal without a capturable target: coverage only.
    pub fn pawn_diagonal(to: Pos) -> Self {
        Move {
            is_attackable: true,
            is_pawn_diagonal: true,
            ..Move::blank(to)
        }
    }

    /// A pawn capturing diagonally.
    pub fn pawn_capture(to: Pos, target: Pos) -> Self {
        Move {
            is_capture: true,
            is_attackable: true,
            is_pawn_diagonal: true,
            capture_target: Some(target),
            ..Move::blank(to)
        }
    }

    /// An en passant capture: the captured pawn sits beside the mover, not
    /// on the destination square.
    pub fn en_passant(to: Pos, target: Pos) -> Self {
        Move {
            is_capture: true,
            is_attackable: true,
            is_en_passant: true,
            capture_target: Some(target),
            ..Move::blank(to)
        }
    }

    /// A castle: the king's two-square shift paired with `rook`.
    pub fn castle(to: Pos, rook: Pos) -> Self {
        Move {
            is_castle: true,
            castle_partner: Some(rook),
            ..Move::blank(to)
        }
    }

    /// Mark this move as promoting (pawn reaching the far rank).
    pub fn promoting(mut self) -> Self {
        self.is_promotion = true;
        self
    }

    /// Whether a human could actually play this entry. Friendly markers and
    /// bare pawn diagonals are coverage bookkeeping, not moves.
    pub fn is_playable(&self) -> bool {
        if self.is_friendly_blocked {
            return false;
        }
        if self.is_pawn_diagonal && !self.is_capture {
            return false;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// Current status of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }

    pub fn is_game_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChessError
// ---------------------------------------------------------------------------

/// Domain errors surfaced to the boundary layer.
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("no piece at {0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("illegal move from {from} to {to}: {reason}")]
    IllegalMove {
        from: String,
        to: String,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_toggle() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn color_display_and_index() {
        assert_eq!(Color::White.to_string(), "white");
        assert_eq!(Color::Black.to_string(), "black");
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Black.index(), 1);
    }

    #[test]
    fn piece_kind_indices() {
        assert_eq!(PieceKind::ALL.len(), PieceKind::COUNT);
        for (i, &kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn piece_kind_sliding() {
        assert!(PieceKind::Bishop.is_sliding());
        assert!(PieceKind::Rook.is_sliding());
        assert!(PieceKind::Queen.is_sliding());
        assert!(!PieceKind::Pawn.is_sliding());
        assert!(!PieceKind::Knight.is_sliding());
        assert!(!PieceKind::King.is_sliding());
    }

    #[test]
    fn piece_kind_chars() {
        assert_eq!(PieceKind::Knight.to_char(Color::White), 'N');
        assert_eq!(PieceKind::Knight.to_char(Color::Black), 'n');
        assert_eq!(PieceKind::King.label(), 'K');
    }

    #[test]
    fn pos_coord_mapping() {
        assert_eq!(Pos::from_coord("a8"), Some(Pos::new(0, 0)));
        assert_eq!(Pos::from_coord("a1"), Some(Pos::new(0, 7)));
        assert_eq!(Pos::from_coord("h8"), Some(Pos::new(7, 0)));
        assert_eq!(Pos::from_coord("e2"), Some(Pos::new(4, 6)));
        assert_eq!(Pos::new(4, 6).to_coord(), "e2");
    }

    #[test]
    fn pos_coord_round_trip() {
        for x in 0..8 {
            for y in 0..8 {
                let pos = Pos::new(x, y);
                assert_eq!(Pos::from_coord(&pos.to_coord()), Some(pos));
            }
        }
    }

    #[test]
    fn pos_from_coord_invalid() {
        assert_eq!(Pos::from_coord(""), None);
        assert_eq!(Pos::from_coord("e"), None);
        assert_eq!(Pos::from_coord("e9"), None);
        assert_eq!(Pos::from_coord("e0"), None);
        assert_eq!(Pos::from_coord("i4"), None);
        assert_eq!(Pos::from_coord("e22"), None);
    }

    #[test]
    fn pos_offset_bounds() {
        assert_eq!(Pos::new(0, 0).offset(-1, 0), None);
        assert_eq!(Pos::new(7, 7).offset(1, 1), None);
        assert_eq!(Pos::new(3, 3).offset(1, -1), Some(Pos::new(4, 2)));
    }

    #[test]
    fn piece_state_defaults() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn, Pos::new(0, 6));
        assert!(pawn.initial_move());
        assert!(!pawn.en_passant_eligible());
        assert!(!pawn.has_moved());

        let rook = Piece::new(Color::White, PieceKind::Rook, Pos::new(0, 7));
        assert!(!rook.has_moved());

        let knight = Piece::new(Color::White, PieceKind::Knight, Pos::new(1, 7));
        assert_eq!(knight.state, PieceState::Plain);
        assert!(!knight.is_pinned());
    }

    #[test]
    fn playable_filter() {
        let to = Pos::new(3, 3);
        let target = Pos::new(3, 3);
        assert!(Move::plain(to).is_playable());
        assert!(Move::capture(to, target).is_playable());
        assert!(Move::pawn_push(to).is_playable());
        assert!(Move::pawn_capture(to, target).is_playable());
        assert!(Move::en_passant(to, Pos::new(3, 4)).is_playable());
        assert!(Move::castle(to, Pos::new(7, 7)).is_playable());
        assert!(!Move::friendly(to).is_playable());
        assert!(!Move::pawn_diagonal(to).is_playable());
    }

    #[test]
    fn promoting_sets_flag_only() {
        let mv = Move::pawn_push(Pos::new(4, 0)).promoting();
        assert!(mv.is_promotion);
        assert!(mv.is_playable());
        assert!(!mv.is_capture);
    }

    #[test]
    fn capture_records_target() {
        let mv = Move::en_passant(Pos::new(3, 2), Pos::new(3, 3));
        assert_eq!(mv.capture_target, Some(Pos::new(3, 3)));
        assert_ne!(mv.capture_target, Some(mv.to));
    }

    #[test]
    fn error_display() {
        let err = ChessError::IllegalMove {
            from: "e2".into(),
            to: "e5".into(),
            reason: "destination is not a legal move".into(),
        };
        assert!(err.to_string().contains("e2"));
        assert!(err.to_string().contains("e5"));
    }

    #[test]
    fn game_status_strings() {
        assert_eq!(GameStatus::Active.as_str(), "active");
        assert_eq!(GameStatus::Check.as_str(), "check");
        assert!(GameStatus::Checkmate.is_game_over());
        assert!(GameStatus::Stalemate.is_game_over());
        assert!(!GameStatus::Check.is_game_over());
    }
}
