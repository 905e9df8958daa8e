//! Various lookup tables useful for move generation.

use crate::coretypes::{Castling, Color, MoveKind, Square, Square::*, NUM_SQUARES};

/// A (file delta, rank delta) step on the board.
pub type Offset = (i8, i8);

pub const KNIGHT_OFFSETS: [Offset; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [Offset; 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// North, East, South, West.
pub const ROOK_DIRECTIONS: [Offset; 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
/// North-East, South-East, South-West, North-West.
pub const BISHOP_DIRECTIONS: [Offset; 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

///////////////////////////////////
// Pre-generated move/attack Lookup
//
// Destination squares of each stepping piece type on an otherwise empty board.
// Arrays are indexed by Square's discriminant, unused slots are None.

type Targets = [Option<Square>; 8];

// Single Piece, Square Indexed, Symmetrical, Attacks == pseudo-legal Moves
const KNIGHT_TARGETS: [Targets; NUM_SQUARES] = generate_targets(&KNIGHT_OFFSETS);
// Single Piece, Square Indexed, Symmetrical, Attacks == pseudo-legal Moves
const KING_TARGETS: [Targets; NUM_SQUARES] = generate_targets(&KING_OFFSETS);

/// Squares a knight on `square` attacks.
pub fn knight_targets(square: Square) -> impl Iterator<Item = Square> {
    KNIGHT_TARGETS[square.idx()].into_iter().flatten()
}

/// Squares a king on `square` attacks.
pub fn king_targets(square: Square) -> impl Iterator<Item = Square> {
    KING_TARGETS[square.idx()].into_iter().flatten()
}

const fn generate_targets(offsets: &[Offset; 8]) -> [Targets; NUM_SQUARES] {
    let mut table: [Targets; NUM_SQUARES] = [[None; 8]; NUM_SQUARES];
    let mut idx = 0;
    while idx < NUM_SQUARES {
        let square = Square::ALL[idx];
        let mut count = 0;
        let mut i = 0;
        while i < offsets.len() {
            if let Some(target) = square.offset(offsets[i].0, offsets[i].1) {
                table[idx][count] = Some(target);
                count += 1;
            }
            i += 1;
        }
        idx += 1;
    }
    table
}

//////////////////////
// Castling geometry

/// Fixed squares involved in one of the four castling moves.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CastleRule {
    pub right: Castling,
    pub kind: MoveKind,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook, all must be empty.
    pub between: &'static [Square],
    /// Squares the king crosses and lands on, none may be attacked.
    pub king_path: [Square; 2],
}

static CASTLE_RULES: [CastleRule; 4] = [
    CastleRule {
        right: Castling::W_KING,
        kind: MoveKind::CastleKingside,
        king_from: E1,
        king_to: G1,
        rook_from: H1,
        rook_to: F1,
        between: &[F1, G1],
        king_path: [F1, G1],
    },
    CastleRule {
        right: Castling::W_QUEEN,
        kind: MoveKind::CastleQueenside,
        king_from: E1,
        king_to: C1,
        rook_from: A1,
        rook_to: D1,
        between: &[D1, C1, B1],
        king_path: [D1, C1],
    },
    CastleRule {
        right: Castling::B_KING,
        kind: MoveKind::CastleKingside,
        king_from: E8,
        king_to: G8,
        rook_from: H8,
        rook_to: F8,
        between: &[F8, G8],
        king_path: [F8, G8],
    },
    CastleRule {
        right: Castling::B_QUEEN,
        kind: MoveKind::CastleQueenside,
        king_from: E8,
        king_to: C8,
        rook_from: A8,
        rook_to: D8,
        between: &[D8, C8, B8],
        king_path: [D8, C8],
    },
];

/// Both castling rules of a color, king side first.
pub fn castle_rules(color: Color) -> &'static [CastleRule] {
    match color {
        Color::White => &CASTLE_RULES[0..2],
        Color::Black => &CASTLE_RULES[2..4],
    }
}

/// The castling rule matching a move kind for a color, None for non-castling kinds.
pub fn castle_rule(color: Color, kind: MoveKind) -> Option<&'static CastleRule> {
    castle_rules(color).iter().find(|rule| rule.kind == kind)
}
