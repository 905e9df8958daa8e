//! Holds Position struct, the most important data structure for the rules.
//! Position represents a chess position.

use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::boardrepr::Mailbox;
use crate::coretypes::{
    Castling, Color, Move, MoveCount, MoveKind, Piece, Rank, Square, MAX_MOVE_COUNTER,
};
use crate::coretypes::{Color::*, PieceKind::*};
use crate::error::{Error, ErrorKind, Result};
use crate::fen::Fen;
use crate::movegen as mg;

/// Undo
/// The state a move overwrites that cannot be derived from the move itself.
/// Returned by `apply_raw`, and sufficient to exactly reverse it with `undo_raw`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Undo {
    pub(crate) captured: Option<Piece>,
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmoves: MoveCount,
}

impl Undo {
    /// Piece removed by the move, including a pawn captured en passant.
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }
    pub const fn castling(&self) -> Castling {
        self.castling
    }
    pub const fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub const fn halfmoves(&self) -> MoveCount {
        self.halfmoves
    }
}

/// struct Position
/// A complete data set that can represent any chess position.
/// # Members:
/// * pieces - a square-centric container of all chess pieces.
/// * side_to_move - Color of player whose turn it is.
/// * castling - Castling rights for both players.
/// * en_passant - Square skipped by a pawn double push on the previous move, if any.
/// * halfmoves - Tracker for 50 move draw rule. Resets after capture/pawn move.
/// * fullmoves - Starts at 1, increments after each black player's move.
/// * kings - Cached square of each color's king, indexed by Color.
///
/// With the `serde` feature, a Position serializes as its FEN string.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Position {
    pub(crate) pieces: Mailbox,
    pub(crate) side_to_move: Color,
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmoves: MoveCount,
    pub(crate) fullmoves: MoveCount,
    pub(crate) kings: [Square; 2],
}

impl Position {
    /// Standard chess start position.
    pub fn start_position() -> Self {
        Self {
            pieces: Mailbox::start_position(),
            side_to_move: Color::White,
            castling: Castling::start_position(),
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
            kings: [Square::E1, Square::E8],
        }
    }

    /// Create a Position from its parts, rejecting any that describe
    /// a board which cannot arise in a game of chess.
    pub fn new(
        pieces: Mailbox,
        side_to_move: Color,
        castling: Castling,
        en_passant: Option<Square>,
        halfmoves: MoveCount,
        fullmoves: MoveCount,
    ) -> Result<Self> {
        if halfmoves > MAX_MOVE_COUNTER || fullmoves > MAX_MOVE_COUNTER {
            return Err((
                ErrorKind::PositionMalformed,
                format!("move counters are limited to {MAX_MOVE_COUNTER}"),
            )
                .into());
        }
        let kings = locate_kings(&pieces, ErrorKind::PositionMalformed)?;
        let position = Self {
            pieces,
            side_to_move,
            castling,
            en_passant,
            halfmoves,
            fullmoves,
            kings,
        };
        position.check_invariants(ErrorKind::PositionMalformed)?;
        Ok(position)
    }

    /// Const getters.
    pub fn pieces(&self) -> &Mailbox {
        &self.pieces
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling(&self) -> Castling {
        self.castling
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub fn halfmoves(&self) -> MoveCount {
        self.halfmoves
    }
    pub fn fullmoves(&self) -> MoveCount {
        self.fullmoves
    }

    /// Returns the piece on a square, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces[square]
    }

    /// Returns the square of a color's king.
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color as usize]
    }

    /// Returns true if any piece of color `by` attacks `square`.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        mg::is_square_attacked(&self.pieces, square, by)
    }

    /// Returns true if active player's king is in any check.
    pub fn is_in_check(&self) -> bool {
        self.is_color_in_check(self.side_to_move)
    }

    /// Returns true if the king of `color` is attacked.
    pub fn is_color_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), !color)
    }

    /// Counts and returns number of checks on current player's king.
    pub fn num_active_king_checks(&self) -> usize {
        let king = self.king_square(self.side_to_move);
        mg::attackers(&self.pieces, king, !self.side_to_move).count()
    }

    /// Returns true if neither side has material to force checkmate.
    /// That is K v K, K and one minor piece v K, or kings with any
    /// number of bishops that all stand on the same square color.
    pub fn has_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut light_bishops = 0;
        let mut dark_bishops = 0;

        for (square, piece) in self.pieces.occupied() {
            match piece.piece_kind() {
                King => (),
                Pawn | Rook | Queen => return false,
                Knight => knights += 1,
                Bishop if square.is_light() => light_bishops += 1,
                Bishop => dark_bishops += 1,
            }
        }

        let minors = knights + light_bishops + dark_bishops;
        minors <= 1 || (knights == 0 && (light_bishops == 0 || dark_bishops == 0))
    }

    /// Re-checks every invariant of a Position.
    /// A Position reached only through legal moves never fails this.
    pub fn validate(&self) -> Result<()> {
        let kings = locate_kings(&self.pieces, ErrorKind::InconsistentState)?;
        if kings != self.kings {
            return Err((ErrorKind::InconsistentState, "cached king squares out of date").into());
        }
        self.check_invariants(ErrorKind::InconsistentState)
    }

    /// Checks all invariants except king count, reporting violations as `kind`.
    fn check_invariants(&self, kind: ErrorKind) -> Result<()> {
        for (square, piece) in self.pieces.occupied() {
            if piece.piece_kind() == Pawn && (square.rank() == Rank::R1 || square.rank() == Rank::R8) {
                return Err((kind, format!("pawn on back rank {square}")).into());
            }
        }

        for color in Color::iter() {
            for rule in mg::tables::castle_rules(color) {
                let consistent = self.pieces[rule.king_from] == Some(Piece::new(color, King))
                    && self.pieces[rule.rook_from] == Some(Piece::new(color, Rook));
                if self.castling.has(rule.right) && !consistent {
                    return Err((
                        kind,
                        format!("castling right {} without king and rook in place", rule.right),
                    )
                        .into());
                }
            }
        }

        if let Some(ep) = self.en_passant {
            let us = self.side_to_move;
            let expected_rank = match us {
                White => Rank::R6,
                Black => Rank::R3,
            };
            let pushed_pawn = ep.offset(0, -us.forward()).and_then(|square| self.pieces[square]);
            let origin_empty = ep
                .offset(0, us.forward())
                .map_or(false, |square| self.pieces[square].is_none());

            if ep.rank() != expected_rank
                || self.pieces[ep].is_some()
                || !origin_empty
                || pushed_pawn != Some(Piece::new(!us, Pawn))
            {
                return Err((kind, format!("impossible en passant target {ep}")).into());
            }
        }

        if self.fullmoves == 0 {
            return Err((kind, "fullmoves must start from 1").into());
        }

        if self.is_color_in_check(!self.side_to_move) {
            return Err((kind, "side not to move is in check").into());
        }

        Ok(())
    }

    /// Apply a move to self, in place.
    /// `apply_raw` does not check if the move is legal or not,
    /// it simply executes it while assuming legality.
    /// Returns the state needed to reverse the move with `undo_raw`.
    pub fn apply_raw(&mut self, move_: Move) -> Undo {
        let us = self.side_to_move;
        let mut undo = Undo {
            captured: None,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmoves: self.halfmoves,
        };

        let moving = self.pieces.take(move_.from);
        debug_assert!(moving.is_some(), "no piece to move on {}", move_.from);
        let Some(moving) = moving else {
            return undo;
        };

        undo.captured = match move_.kind {
            MoveKind::EnPassant => self.pieces.take(en_passant_victim(move_)),
            _ => self.pieces.take(move_.to),
        };

        // If promoting, set promoting piece. Otherwise set active piece.
        self.pieces[move_.to] = match move_.promotion {
            Some(promotion) => Some(Piece::new(us, promotion)),
            None => Some(moving),
        };
        if moving.piece_kind() == King {
            self.kings[us as usize] = move_.to;
        }

        if let Some(rule) = mg::tables::castle_rule(us, move_.kind) {
            let rook = self.pieces.take(rule.rook_from);
            self.pieces[rule.rook_to] = rook;
        }

        // Any move touching a king or rook origin square retires its rights for good.
        self.castling
            .clear(Castling::revoked_by(move_.from) | Castling::revoked_by(move_.to));

        self.en_passant = match move_.kind {
            MoveKind::DoublePawnPush => move_.from.offset(0, us.forward()),
            _ => None,
        };

        if moving.piece_kind() == Pawn || undo.captured.is_some() {
            self.halfmoves = 0;
        } else {
            self.halfmoves += 1;
        }
        if us == Black {
            self.fullmoves += 1;
        }
        self.side_to_move = !us;

        undo
    }

    /// Undo the application of a move, in place.
    /// `move_` and `undo` must be the last move applied with `apply_raw` and its result.
    pub fn undo_raw(&mut self, move_: Move, undo: Undo) {
        let us = !self.side_to_move;
        self.side_to_move = us;
        if us == Black {
            self.fullmoves -= 1;
        }
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmoves = undo.halfmoves;

        if let Some(rule) = mg::tables::castle_rule(us, move_.kind) {
            let rook = self.pieces.take(rule.rook_to);
            self.pieces[rule.rook_from] = rook;
        }

        let placed = self.pieces.take(move_.to);
        let moving = match move_.promotion {
            Some(_) => Some(Piece::new(us, Pawn)),
            None => placed,
        };
        self.pieces[move_.from] = moving;
        if moving.map(|piece| piece.piece_kind()) == Some(King) {
            self.kings[us as usize] = move_.from;
        }

        match move_.kind {
            MoveKind::EnPassant => self.pieces[en_passant_victim(move_)] = undo.captured,
            _ => self.pieces[move_.to] = undo.captured,
        }
    }

    /// Generates a new Position from applying move on current Position.
    pub fn make_move(&self, move_: Move) -> Self {
        let mut position = *self;
        position.apply_raw(move_);
        position
    }
}

/// The square of the pawn removed by an en passant capture,
/// beside the capturing pawn and behind its destination.
fn en_passant_victim(move_: Move) -> Square {
    Square::new(move_.to.file(), move_.from.rank())
}

/// Finds each color's single king, indexed by Color.
fn locate_kings(pieces: &Mailbox, kind: ErrorKind) -> Result<[Square; 2]> {
    let mut kings = [None, None];
    for color in Color::iter() {
        let mut squares = pieces.squares_of(Piece::new(color, King));
        kings[color as usize] = match (squares.next(), squares.next()) {
            (Some(square), None) => Some(square),
            _ => None,
        };
    }
    match kings {
        [Some(white), Some(black)] => Ok([white, black]),
        _ => Err((kind, "each side must have exactly one king").into()),
    }
}

/// Defaults to standard chess start position.
impl Default for Position {
    fn default() -> Self {
        Self::start_position()
    }
}

/// Displays pretty-printed chess board and Fen string representing Position.
impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n Fen: {}\n", self.pieces, self.to_fen())
    }
}

/// A Position converts to its FEN string.
impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_fen()
    }
}

/// Parses a FEN string into a Position.
impl TryFrom<String> for Position {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> {
        Self::parse_fen(&s)
    }
}
