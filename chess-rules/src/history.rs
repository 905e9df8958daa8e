//! History of the moves applied in a game, used for undo and repetition detection.

use std::hash::{Hash, Hasher};

use crate::boardrepr::Mailbox;
use crate::coretypes::{Castling, Color, Move, PieceKind, Square};
use crate::error::{ErrorKind, Result};
use crate::position::{Position, Undo};
use crate::zobrist::HashKind;

/// PositionKey is the reduced form of a position that takes part in repetition:
/// piece placement, side to move, castling rights and en passant target.
/// Move counters are left out.
///
/// Keys compare their Zobrist hash first, then every exact field,
/// so two keys are equal only if their positions really are.
#[derive(Debug, Copy, Clone)]
pub struct PositionKey {
    hash: HashKind,
    placement: Mailbox,
    side_to_move: Color,
    castling: Castling,
    en_passant: Option<Square>,
}

impl PositionKey {
    /// Create a key from a position and its precomputed hash.
    pub fn new(position: &Position, hash: HashKind) -> Self {
        Self {
            hash,
            placement: *position.pieces(),
            side_to_move: position.side_to_move(),
            castling: position.castling(),
            en_passant: position.en_passant(),
        }
    }

    pub fn hash(&self) -> HashKind {
        self.hash
    }
    pub fn placement(&self) -> &Mailbox {
        &self.placement
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
}

impl PartialEq for PositionKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.placement == other.placement
    }
}

impl Eq for PositionKey {}

impl Hash for PositionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

/// A single applied move, the state it overwrote,
/// and the key of the position it was applied to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Entry {
    pub move_: Move,
    pub undo: Undo,
    pub key: PositionKey,
}

/// History primary use is for tracking repeated positions for threefold repetition,
/// and for reverting moves in order.
/// It is stateful, in that functions assume the next interaction comes from the next
/// possible move in a played game.
///
/// It contains every applied move with the key of the position before it,
/// and the indices of positions which cannot be repeated in future positions.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct History {
    entries: Vec<Entry>,        // All applied moves in order.
    unrepeatables: Vec<usize>,  // Stack of previous heads.
    head: usize,                // First entry whose position may still recur.
}

impl History {
    /// Create a new empty History.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move, the state it overwrote, and the key of the position before it.
    /// If the move is irreversible, every recorded position becomes unrepeatable.
    pub fn record(&mut self, move_: Move, undo: Undo, key: PositionKey) {
        let irreversible = is_irreversible(&move_, &undo, &key);
        self.entries.push(Entry { move_, undo, key });

        if irreversible {
            self.unrepeatables.push(self.head);
            self.head = self.entries.len();
        }
    }

    /// Removes and returns the most recent entry. If it was irreversible,
    /// the previous head of repeatable positions is restored.
    pub fn pop(&mut self) -> Result<(Move, Undo, PositionKey)> {
        let entry = self.entries.pop().ok_or(ErrorKind::EmptyHistory)?;

        if self.head > self.entries.len() {
            self.head = self.unrepeatables.pop().unwrap_or(0);
        }
        Ok((entry.move_, entry.undo, entry.key))
    }

    /// Counts how many recorded positions equal `key`.
    /// Only positions after the most recent irreversible move are checked.
    /// All positions before it cannot reoccur.
    pub fn count_occurrences(&self, key: &PositionKey) -> usize {
        self.entries[self.head..]
            .iter()
            .filter(|entry| entry.key == *key)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.entries.last().map(|entry| entry.move_)
    }

    /// Iterator over applied moves, oldest first.
    pub fn moves(&self) -> impl DoubleEndedIterator<Item = Move> + ExactSizeIterator + '_ {
        self.entries.iter().map(|entry| entry.move_)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// A move is irreversible if no later position can equal any position before it:
/// captures, pawn moves, and moves that lose a castling right.
fn is_irreversible(move_: &Move, undo: &Undo, key: &PositionKey) -> bool {
    let pawn_moved = key.placement[move_.from()].map(|piece| piece.piece_kind()) == Some(PieceKind::Pawn);
    let rights_lost = undo
        .castling()
        .has_any(Castling::revoked_by(move_.from()) | Castling::revoked_by(move_.to()));

    undo.captured().is_some() || pawn_moved || rights_lost
}
