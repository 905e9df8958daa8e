//! The fundamental and simple types of `chess_rules`.

use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::ops::{BitOr, Not};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{self, ErrorKind};

///////////////
// Constants //
///////////////
pub const NUM_FILES: usize = 8; // A, B, C, D, E, F, G, H
pub const NUM_RANKS: usize = 8; // 1, 2, 3, 4, 5, 6, 7, 8
pub const NUM_SQUARES: usize = NUM_FILES * NUM_RANKS;

// 6 Black, 6 White of Pawn, Knight, Bishop, Rook, Queen, King.
pub const NUM_PIECE_KINDS: usize = 12;

// Most legal moves known in any reachable chess position.
pub const MAX_MOVES: usize = 218;

// Upper bound of pseudo-legal moves: 15 non-king pieces of at most 27 moves each,
// plus 8 king steps and 2 castles.
pub const MAX_PSEUDO_MOVES: usize = 15 * 27 + 10;

/// Halfmoves without a capture or pawn move after which a fifty-move draw may be claimed.
pub const FIFTY_MOVE_HALFMOVES: MoveCount = 100;

/// Largest move counter accepted from FEN or `Position::new`.
/// Counters advance by at most one per ply from there, far below `MoveCount::MAX`.
pub const MAX_MOVE_COUNTER: MoveCount = u16::MAX as MoveCount;

/// Occurrences of the same reduced position after which a repetition draw may be claimed.
pub const REPETITION_DRAW_COUNT: usize = 3;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Type of the halfmove clock and fullmove number.
pub type MoveCount = u32;

/// Color of a piece, or the player who owns it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

/// The closed set of chess piece kinds.
/// Variant order is fixed, discriminants index tables.
/// Must be contiguous and start from 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub(crate) color: Color,
    pub(crate) piece_kind: PieceKind,
}

/// Castling rights still available to each side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Castling(u8);

/// Single rights and their unions.
impl Castling {
    pub const W_KING: Castling = Castling(0b00000001);
    pub const W_QUEEN: Castling = Castling(0b00000010);
    pub const B_KING: Castling = Castling(0b00000100);
    pub const B_QUEEN: Castling = Castling(0b00001000);
    pub const W_SIDE: Castling = Castling(Self::W_KING.0 | Self::W_QUEEN.0);
    pub const B_SIDE: Castling = Castling(Self::B_KING.0 | Self::B_QUEEN.0);
    pub const ALL: Castling = Castling(Self::W_SIDE.0 | Self::B_SIDE.0);
    pub const NONE: Castling = Castling(0u8);
    pub const ENUMERATIONS: usize = 16; // 16 possibilities for castling rights.
}

/// Enum variant order and discriminant must be contiguous, start from 0,
/// and be in ascending order ABCDEFGH.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[rustfmt::skip]
#[repr(u8)]
pub enum File {
    A, B, C, D, E, F, G, H = 7u8,
}

/// Enum variant order and discriminant must be contiguous, start from 0,
/// and be in ascending order 12345678.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[rustfmt::skip]
#[repr(u8)]
pub enum Rank {
    R1, R2, R3, R4, R5, R6, R7, R8 = 7u8,
}

/// Square
/// The 64 squares, A1 first and H8 last.
/// `Square::A1 as u8` is the square's index, counted little-endian rank-file:
/// A1 = 0, H1 = 7, A2 = 8, H8 = 63.
/// Discriminants double as array indices, so variant order is fixed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[rustfmt::skip]
#[repr(u8)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8 = 63u8,
}

/// The special role a move plays in the position it was generated for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    /// Moved to an empty square, no special rules involved.
    Normal,
    /// Captured the enemy piece standing on the destination square.
    Capture,
    /// Pawn captured a double-pushed pawn by moving behind it.
    EnPassant,
    /// King castled towards the h-file rook.
    CastleKingside,
    /// King castled towards the a-file rook.
    CastleQueenside,
    /// Pawn advanced two squares from its starting rank.
    DoublePawnPush,
    /// Pawn reached the last rank, with or without a capture.
    Promotion,
}

/// Move
/// A fully resolved chess half move, or "ply", in context of the position
/// it was generated for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) promotion: Option<PieceKind>,
    pub(crate) kind: MoveKind,
}

/// CoordinateMove
/// Pure Algebraic Coordinate Notation of a move, such as `e2e4` or `e7e8q`.
/// It names squares only, so it needs a position to become a `Move`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

////////////////////
// Implementations //
////////////////////

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Letter used in FEN.
    pub const fn to_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn iter() -> impl Iterator<Item = Color> {
        Self::ALL.into_iter()
    }

    /// Direction a pawn of this color advances in, as a rank delta.
    pub const fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this color's king and rooks at the start of a game.
    pub const fn home_rank(&self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }

    /// Rank this color's pawns start on, and may double push from.
    pub const fn pawn_rank(&self) -> Rank {
        match self {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        }
    }

    /// Rank this color's pawns promote on.
    pub const fn promotion_rank(&self) -> Rank {
        match self {
            Color::White => Rank::R8,
            Color::Black => Rank::R1,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Not for &Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        Color::not(*self)
    }
}

impl From<Color> for char {
    fn from(color: Color) -> Self {
        color.to_char()
    }
}

impl TryFrom<char> for Color {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            _ => Err((ErrorKind::ParseColorMalformed, "char is not w|b").into()),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Uppercase letter, as for a white piece in FEN.
    pub const fn to_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn iter() -> impl Iterator<Item = PieceKind> {
        Self::ALL.into_iter()
    }
}

impl Piece {
    pub const fn new(color: Color, piece_kind: PieceKind) -> Self {
        Piece { color, piece_kind }
    }
    /// Immutable Getters.
    pub const fn color(&self) -> Color {
        self.color
    }
    pub const fn piece_kind(&self) -> PieceKind {
        self.piece_kind
    }

    pub const fn to_char(&self) -> char {
        match self.color {
            Color::White => self.piece_kind.to_char(),
            Color::Black => self.piece_kind.to_char().to_ascii_lowercase(),
        }
    }
}

impl From<(Color, PieceKind)> for Piece {
    fn from((color, piece_kind): (Color, PieceKind)) -> Self {
        Self::new(color, piece_kind)
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        piece.to_char()
    }
}

impl TryFrom<char> for Piece {
    type Error = error::Error;
    fn try_from(value: char) -> error::Result<Self> {
        let color = match value.is_ascii_uppercase() {
            true => Color::White,
            false => Color::Black,
        };
        let piece_kind = match value.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'R' => PieceKind::Rook,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => {
                return Err((
                    ErrorKind::ParsePieceMalformed,
                    format!("'{value}' is not in PRNBQKprnbqk"),
                )
                    .into())
            }
        };
        Ok(Piece { color, piece_kind })
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl Castling {
    /// All four rights.
    pub const fn start_position() -> Self {
        Self::ALL
    }

    /// Raw bit mask.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// True when no right remains.
    pub const fn is_none(&self) -> bool {
        self.0 == 0u8
    }

    /// True if every right in `rights` is held.
    pub fn has(&self, rights: Castling) -> bool {
        debug_assert!(rights.is_mask_valid());
        self.0 & rights.0 == rights.0
    }

    /// True if at least one right in `rights` is held.
    pub fn has_any(&self, rights: Castling) -> bool {
        debug_assert!(rights.is_mask_valid());
        self.0 & rights.0 != 0
    }

    /// Grant `rights`.
    pub fn set(&mut self, rights: Castling) {
        debug_assert!(rights.is_mask_valid());
        self.0 |= rights.0;
    }

    /// Drop `rights`.
    pub fn clear(&mut self, rights: Castling) {
        debug_assert!(rights.is_mask_valid());
        self.0 &= !rights.0;
    }

    /// Clear both rights of `color`.
    pub fn clear_color(&mut self, color: Color) {
        self.clear(Self::for_color(color));
    }

    /// Both rights of a single color.
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::White => Self::W_SIDE,
            Color::Black => Self::B_SIDE,
        }
    }

    /// Rights lost when a piece leaves or arrives on `square`.
    /// Only king and rook origin squares carry rights.
    pub const fn revoked_by(square: Square) -> Self {
        match square {
            Square::E1 => Self::W_SIDE,
            Square::H1 => Self::W_KING,
            Square::A1 => Self::W_QUEEN,
            Square::E8 => Self::B_SIDE,
            Square::H8 => Self::B_KING,
            Square::A8 => Self::B_QUEEN,
            _ => Self::NONE,
        }
    }

    /// True if no bits outside the four rights are set.
    pub const fn is_mask_valid(&self) -> bool {
        self.0 <= Self::ALL.0
    }
}

/// Defaults to every right, as in the start position.
impl Default for Castling {
    fn default() -> Self {
        Self::start_position()
    }
}

impl BitOr for Castling {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Displays as the FEN castling field.
impl Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut castling_str = String::with_capacity(4);

        if self.is_none() {
            castling_str.push('-');
        } else {
            if self.has(Self::W_KING) {
                castling_str.push('K');
            }
            if self.has(Self::W_QUEEN) {
                castling_str.push('Q');
            }
            if self.has(Self::B_KING) {
                castling_str.push('k');
            }
            if self.has(Self::B_QUEEN) {
                castling_str.push('q');
            }
        }
        f.write_str(&castling_str)
    }
}

/// Castling ::= '-' | ['K'] ['Q'] ['k'] ['q']
/// Each right may appear at most once, in the order shown.
impl FromStr for Castling {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        if s == "-" {
            return Ok(Castling::NONE);
        }
        if s.is_empty() || s.len() > 4 {
            return Err((ErrorKind::ParseCastlingMalformed, "expected - or 1 to 4 of KQkq").into());
        }

        let mut castling_rights = Castling::NONE;
        for ch in s.chars() {
            let right = match ch {
                'K' => Self::W_KING,
                'Q' => Self::W_QUEEN,
                'k' => Self::B_KING,
                'q' => Self::B_QUEEN,
                _ => {
                    return Err((
                        ErrorKind::ParseCastlingMalformed,
                        format!("'{ch}' not of -KQkq"),
                    )
                        .into())
                }
            };
            // Bits ascend in KQkq order, so a right no greater than the mask so far is out of order.
            if right.0 <= castling_rights.0 {
                return Err((
                    ErrorKind::ParseCastlingMalformed,
                    format!("'{ch}' repeated or out of KQkq order"),
                )
                    .into());
            }
            castling_rights.set(right);
        }
        Ok(castling_rights)
    }
}

impl File {
    pub const ALL: [File; NUM_FILES] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// File enum variants cover all u8 values from 0-7 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        if (value as usize) < NUM_FILES {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }
    /// Lowercase file letter.
    pub const fn to_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl Rank {
    pub const ALL: [Rank; NUM_RANKS] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Rank enum variants cover all u8 values from 0-7 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        if (value as usize) < NUM_RANKS {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }
    pub const fn to_char(&self) -> char {
        (b'1' + *self as u8) as char
    }
}

impl TryFrom<char> for File {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'a'..='h' => Ok(Self::ALL[(ch as u8 - b'a') as usize]),
            _ => Err((ErrorKind::ParseFileMalformed, "file char not of abcdefgh").into()),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            '1'..='8' => Ok(Self::ALL[(ch as u8 - b'1') as usize]),
            _ => Err((ErrorKind::ParseRankMalformed, "rank char not of 12345678").into()),
        }
    }
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

impl Square {
    #[rustfmt::skip]
    pub const ALL: [Square; NUM_SQUARES] = {
        use Square::*;
        [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ]
    };

    /// Square enum variants cover all u8 values from 0-63 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        if (value as usize) < NUM_SQUARES {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    pub const fn new(file: File, rank: Rank) -> Self {
        Self::ALL[rank as usize * NUM_FILES + file as usize]
    }

    pub fn iter() -> impl Iterator<Item = Square> {
        Self::ALL.into_iter()
    }

    /// Index of square in 0-63, A1 = 0.
    pub const fn idx(&self) -> usize {
        *self as usize
    }

    pub const fn file(&self) -> File {
        File::ALL[self.file_u8() as usize]
    }

    pub const fn rank(&self) -> Rank {
        Rank::ALL[self.rank_u8() as usize]
    }

    /// File index, 0 for A through 7 for H.
    pub const fn file_u8(&self) -> u8 {
        *self as u8 % NUM_FILES as u8
    }

    /// Rank index, 0 for the first rank through 7 for the eighth.
    pub const fn rank_u8(&self) -> u8 {
        *self as u8 / NUM_FILES as u8
    }

    /// Returns the square displaced by the given file and rank deltas,
    /// or None if it would fall off the board.
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file_u8() as i8 + file_delta;
        let rank = self.rank_u8() as i8 + rank_delta;
        if file < 0 || file >= NUM_FILES as i8 || rank < 0 || rank >= NUM_RANKS as i8 {
            None
        } else {
            Some(Self::ALL[rank as usize * NUM_FILES + file as usize])
        }
    }

    /// One rank up, if still on the board.
    pub const fn increment_rank(&self) -> Option<Self> {
        self.offset(0, 1)
    }

    /// One rank down, if still on the board.
    pub const fn decrement_rank(&self) -> Option<Self> {
        self.offset(0, -1)
    }

    /// Returns true for light squares such as H1 and A8, false for dark squares such as A1.
    pub const fn is_light(&self) -> bool {
        (self.file_u8() + self.rank_u8()) % 2 == 1
    }
}

impl From<(File, Rank)> for Square {
    fn from((file, rank): (File, Rank)) -> Self {
        Self::new(file, rank)
    }
}

/// Square::= <fileLetter><rankNumber>
impl FromStr for Square {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let mut chars = s.chars();
        let file = File::try_from(chars.next().ok_or(ErrorKind::ParseSquareMalformed)?)?;
        let rank = Rank::try_from(chars.next().ok_or(ErrorKind::ParseSquareMalformed)?)?;
        if chars.next().is_some() {
            return Err((ErrorKind::ParseSquareMalformed, format!("trailing characters in {s}")).into());
        }
        Ok(Square::new(file, rank))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl Move {
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            promotion,
            kind,
        }
    }

    // Immutable Getters
    pub const fn from(&self) -> Square {
        self.from
    }
    pub const fn to(&self) -> Square {
        self.to
    }
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// The coordinate form of this move, dropping its kind.
    pub const fn coordinates(&self) -> CoordinateMove {
        CoordinateMove::new(self.from, self.to, self.promotion)
    }

    /// Returns true if this move is either castling move.
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    /// Returns true if the move is flagged as a capture.
    /// Promotions are flagged `Promotion` whether or not they capture.
    pub const fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::EnPassant)
    }
}

impl PartialEq<CoordinateMove> for Move {
    fn eq(&self, other: &CoordinateMove) -> bool {
        self.coordinates() == *other
    }
}

impl From<Move> for CoordinateMove {
    fn from(move_: Move) -> Self {
        move_.coordinates()
    }
}

/// # Example
/// Move { from: A7, to: B8, promotion: Some(Queen), .. } -> `a7b8q`.
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.coordinates())
    }
}

impl CoordinateMove {
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }
}

/// Parses long algebraic coordinates such as `e2e4` or `e7e8q`.
/// CoordinateMove ::= <square><square>[q|r|b|n]
impl FromStr for CoordinateMove {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err((ErrorKind::ParseMoveMalformed, format!("{s:?} is not 4 or 5 characters")).into());
        }
        let from: Square = s[0..2].parse()?;
        let to: Square = s[2..4].parse()?;

        let promotion = match s.chars().nth(4) {
            None => None,
            Some('q') => Some(PieceKind::Queen),
            Some('r') => Some(PieceKind::Rook),
            Some('b') => Some(PieceKind::Bishop),
            Some('n') => Some(PieceKind::Knight),
            Some(ch) => {
                return Err((
                    ErrorKind::ParseMoveMalformed,
                    format!("promotion '{ch}' not of qrbn"),
                )
                    .into())
            }
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl Display for CoordinateMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece_kind) = self.promotion {
            f.write_char(piece_kind.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PieceKind::*;
    use Square::*;

    #[test]
    fn logical_not_color() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn castling_logical_ops() {
        let mut cr = Castling::default();
        assert!(cr.has(Castling::ALL));
        assert!(cr.has(Castling::W_SIDE));
        assert!(cr.has(Castling::B_SIDE));
        assert!(!cr.is_none());

        cr.clear(Castling::W_KING);
        assert!(!cr.has(Castling::ALL));
        assert!(!cr.has(Castling::W_KING));
        assert!(cr.has(Castling::W_QUEEN));
        assert!(!cr.has(Castling::W_SIDE));
        assert!(cr.has_any(Castling::W_SIDE));
        assert!(cr.has(Castling::B_SIDE));

        cr.clear_color(Color::Black);
        assert!(!cr.has_any(Castling::B_SIDE));
        assert!(cr.has(Castling::W_QUEEN));

        cr.clear(Castling::W_QUEEN);
        assert!(cr.is_none());
    }

    #[test]
    fn castling_revoked_by_corners() {
        assert_eq!(Castling::revoked_by(E1), Castling::W_SIDE);
        assert_eq!(Castling::revoked_by(H1), Castling::W_KING);
        assert_eq!(Castling::revoked_by(A8), Castling::B_QUEEN);
        assert_eq!(Castling::revoked_by(E4), Castling::NONE);
    }

    #[test]
    fn castling_to_from_string() {
        assert_eq!(Castling::from_str("-").unwrap(), Castling::NONE);
        assert_eq!(Castling::from_str("K").unwrap(), Castling::W_KING);
        assert_eq!(
            Castling::from_str("Kk").unwrap(),
            Castling::W_KING | Castling::B_KING
        );
        assert_eq!(Castling::from_str("KQkq").unwrap(), Castling::ALL);
        assert_eq!(
            Castling::from_str("Qq").unwrap(),
            Castling::W_QUEEN | Castling::B_QUEEN
        );
        assert_eq!(Castling::ALL.to_string(), "KQkq");
        assert_eq!(Castling::NONE.to_string(), "-");

        assert!(Castling::from_str("").is_err());
        assert!(Castling::from_str("x").is_err());
        assert!(Castling::from_str("KK").is_err());
        assert!(Castling::from_str("kK").is_err());
        assert!(Castling::from_str("qk").is_err());
        assert!(Castling::from_str("KQkq-").is_err());
        assert!(Castling::from_str("K-").is_err());
    }

    #[test]
    fn square_to_from_string() {
        let a1 = Square::from_str("a1").unwrap();
        let b7 = Square::from_str("b7").unwrap();
        let h8: Square = "h8".parse().unwrap();
        assert_eq!(a1, A1);
        assert_eq!(b7, B7);
        assert_eq!(h8, H8);
        assert_eq!(a1.to_string(), "a1");
        assert_eq!(b7.to_string(), "b7");
        assert_eq!(h8.to_string(), "h8");

        for invalid in ["A1", "X3", "a$", "g", "", "a11", "i1", "a0"] {
            assert!(Square::from_str(invalid).is_err(), "{invalid}");
        }
    }

    #[test]
    fn square_to_from_file_rank() {
        use File::*;
        use Rank::*;
        for (file, rank, square) in [(A, R1, A1), (A, R7, A7), (H, R8, H8), (E, R4, E4)] {
            let sq = Square::from((file, rank));
            assert_eq!(sq, square);
            assert_eq!(sq.file(), file);
            assert_eq!(sq.rank(), rank);
            assert_eq!(sq.file_u8(), file as u8);
            assert_eq!(sq.rank_u8(), rank as u8);
        }
    }

    #[test]
    fn square_index_matches_discriminant() {
        for (idx, square) in Square::iter().enumerate() {
            assert_eq!(square.idx(), idx);
            assert_eq!(Square::from_u8(idx as u8), Some(square));
        }
        assert_eq!(Square::from_u8(64), None);
    }

    #[test]
    fn square_offsets_stay_on_board() {
        assert_eq!(E4.offset(1, 2), Some(F6));
        assert_eq!(E4.offset(-2, -1), Some(C3));
        assert_eq!(A1.offset(-1, 0), None);
        assert_eq!(H8.offset(0, 1), None);
        assert_eq!(H4.offset(1, 0), None);
        assert_eq!(B4.increment_rank(), Some(B5));
        assert_eq!(A1.decrement_rank(), None);
        assert_eq!(D8.increment_rank(), None);
    }

    #[test]
    fn square_colors() {
        assert!(!A1.is_light());
        assert!(H1.is_light());
        assert!(A8.is_light());
        assert!(!H8.is_light());
        assert!(!E5.is_light());
    }

    #[test]
    fn parse_coordinate_move() {
        let coords: CoordinateMove = "a1b2".parse().unwrap();
        assert_eq!(coords, CoordinateMove::new(A1, B2, None));

        let coords: CoordinateMove = "h7h8q".parse().unwrap();
        assert_eq!(coords, CoordinateMove::new(H7, H8, Some(Queen)));
        assert_eq!(coords.to_string(), "h7h8q");

        for invalid in ["", "e2", "e2e", "e2e4qq", "e2e9", "e7e8k", "e7e8Q", "z2e4"] {
            let err = CoordinateMove::from_str(invalid).unwrap_err();
            assert!(err.is_malformed_input(), "{invalid}");
        }
    }

    #[test]
    fn move_displays_as_coordinates() {
        let move_ = Move::new(A7, B8, Some(Knight), MoveKind::Promotion);
        assert_eq!(move_.to_string(), "a7b8n");
        assert_eq!(move_, CoordinateMove::new(A7, B8, Some(Knight)));

        let castle = Move::new(E1, G1, None, MoveKind::CastleKingside);
        assert!(castle.is_castle());
        assert!(!castle.is_capture());
        assert_eq!(castle.to_string(), "e1g1");
    }

    #[test]
    fn file_rank_chars() {
        assert_eq!(File::A.to_char(), 'a');
        assert_eq!(File::H.to_char(), 'h');
        assert_eq!(Rank::R1.to_char(), '1');
        assert_eq!(Rank::R8.to_char(), '8');
        assert_eq!(File::try_from('c').unwrap(), File::C);
        assert_eq!(Rank::try_from('6').unwrap(), Rank::R6);
        assert!(File::try_from('i').is_err());
        assert!(Rank::try_from('9').is_err());
        assert_eq!(File::from_u8(8), None);
        assert_eq!(Rank::from_u8(7), Some(Rank::R8));
    }

    #[test]
    fn piece_chars() {
        let black_knight = Piece::try_from('n').unwrap();
        assert_eq!(black_knight, Piece::new(Color::Black, Knight));
        assert_eq!(black_knight.to_string(), "n");
        assert_eq!(Piece::new(Color::White, Queen).to_char(), 'Q');
        assert!(Piece::try_from('x').is_err());
    }
}
