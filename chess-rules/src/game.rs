//! Game structure, the rule engine driving a Position through legal moves.

use std::str::FromStr;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::coretypes::{CoordinateMove, Move};
use crate::error::{self, ErrorKind};
use crate::fen::Fen;
use crate::history::{History, PositionKey};
use crate::movegen as mg;
use crate::movelist::MoveList;
use crate::position::Position;
use crate::status::GameStatus;
use crate::zobrist::{HashKind, ZobristTable};

/// Game contains information for an in progress game:
/// The base position the game started from, the sequence of moves that were
/// played, and the current position.
///
/// The status, legal moves and repetition count are re-derived after every
/// apply and undo, and are never changed any other way.
#[derive(Debug, Clone)]
pub struct Game {
    base_position: Position,
    position: Position,
    history: History,
    ztable: Arc<ZobristTable>,
    hash: HashKind,
    legal_moves: MoveList,
    repetitions: usize,
    status: GameStatus,
}

impl Game {
    /// Create a new game in the standard chess start position.
    pub fn new() -> Self {
        Self::from(Position::start_position())
    }

    /// Create a new game from a FEN string.
    pub fn from_fen(s: &str) -> error::Result<Self> {
        Position::parse_fen(s).map(Self::from)
    }

    /// Create a new game whose Zobrist table is generated from `seed`,
    /// so hashes are reproducible across runs.
    pub fn with_seed(position: Position, seed: u64) -> Self {
        Self::with_table(position, ZobristTable::with_seed(seed))
    }

    /// Create a new Game from a base position and a sequence of moves.
    /// This generates the current position by applying the sequence of moves to the base.
    /// If a move in the sequence is illegal, Err is returned.
    pub fn with_moves(base_position: Position, moves: &[Move]) -> error::Result<Self> {
        let mut game = Self::from(base_position);
        for move_ in moves {
            game.apply(*move_)?;
        }
        Ok(game)
    }

    fn with_table(position: Position, ztable: ZobristTable) -> Self {
        let hash = ztable.generate_hash(&position);
        let mut game = Self {
            base_position: position,
            position,
            history: History::new(),
            ztable: Arc::new(ztable),
            hash,
            legal_moves: MoveList::new(),
            repetitions: 1,
            status: GameStatus::Ongoing,
        };
        game.refresh();
        debug!("new game from {}, status {}", position.to_fen(), game.status);
        game
    }

    /// Immutable getters.
    pub fn position(&self) -> &Position {
        &self.position
    }
    pub fn base_position(&self) -> &Position {
        &self.base_position
    }
    pub fn status(&self) -> GameStatus {
        self.status
    }
    pub fn history(&self) -> &History {
        &self.history
    }
    /// Zobrist hash of the current position.
    pub fn hash(&self) -> HashKind {
        self.hash
    }

    /// Iterator over the moves applied since the base position, in order.
    pub fn moves(&self) -> impl DoubleEndedIterator<Item = Move> + ExactSizeIterator + '_ {
        self.history.moves()
    }

    /// Number of halfmoves applied since the base position.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Occurrences of the current reduced position in this game, itself included.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Reduced form of the current position used for repetition.
    pub fn key(&self) -> PositionKey {
        PositionKey::new(&self.position, self.hash)
    }

    /// Every legal move of the side to move. Empty after checkmate or stalemate.
    pub fn legal_moves(&self) -> MoveList {
        self.legal_moves.clone()
    }

    /// Returns true if `move_` may be applied to the current position.
    pub fn is_legal(&self, move_: Move) -> bool {
        self.legal_moves.contains(&move_)
    }

    /// Apply a legal move to the current position.
    /// Moves stay available after a draw becomes claimable, ending play is up to the caller.
    pub fn apply(&mut self, move_: Move) -> error::Result<()> {
        if !self.is_legal(move_) {
            warn!("rejected illegal move {move_} in {}", self.position.to_fen());
            return Err((
                ErrorKind::IllegalMove,
                format!("{move_} in {}", self.position.to_fen()),
            )
                .into());
        }

        let key = self.key();
        let undo = self.position.apply_raw(move_);
        self.ztable
            .update_hash(&mut self.hash, &self.position, move_, undo);
        debug_assert_eq!(self.hash, self.ztable.generate_hash(&self.position));
        debug_assert!(self.position.validate().is_ok());

        self.history.record(move_, undo, key);
        self.refresh();
        debug!("applied {move_}, status {}", self.status);
        Ok(())
    }

    /// Parse a coordinate move and apply it, returning the resolved move.
    pub fn apply_text(&mut self, text: &str) -> error::Result<Move> {
        let move_ = self.parse_move(text)?;
        self.apply(move_)?;
        Ok(move_)
    }

    /// Revert the most recently applied move, returning it.
    pub fn undo(&mut self) -> error::Result<Move> {
        let (move_, undo, key) = self.history.pop().map_err(|err| {
            warn!("undo requested with no moves applied");
            err
        })?;

        self.position.undo_raw(move_, undo);
        self.hash = key.hash();
        debug_assert_eq!(self.hash, self.ztable.generate_hash(&self.position));
        debug_assert_eq!(self.key(), key);

        self.refresh();
        debug!("undid {move_}, status {}", self.status);
        Ok(move_)
    }

    /// Resolve coordinate notation against the current legal moves.
    pub fn parse_move(&self, text: &str) -> error::Result<Move> {
        let coords = CoordinateMove::from_str(text)?;
        resolve_move(coords, &self.legal_moves)
    }

    /// Re-derive legal moves, repetitions and status from position and history.
    fn refresh(&mut self) {
        let previous = self.status;
        self.legal_moves = mg::legal_moves(&self.position);
        self.repetitions = 1 + self.history.count_occurrences(&self.key());
        self.status = GameStatus::classify(
            &self.position,
            !self.legal_moves.is_empty(),
            self.repetitions,
        );

        if self.status.is_terminal() && self.status != previous {
            info!("game reached {} at ply {}", self.status, self.ply());
        }
    }
}

/// Resolve coordinate notation against the legal moves of a position.
/// Text that is not coordinate notation is malformed input. Well formed text
/// naming no legal move, including a missing or unneeded promotion letter, is illegal.
pub fn parse_move(text: &str, position: &Position) -> error::Result<Move> {
    let coords = CoordinateMove::from_str(text)?;
    resolve_move(coords, &mg::legal_moves(position))
}

fn resolve_move(coords: CoordinateMove, legal_moves: &[Move]) -> error::Result<Move> {
    legal_moves
        .iter()
        .copied()
        .find(|move_| *move_ == coords)
        .ok_or_else(|| (ErrorKind::IllegalMove, format!("{coords} is not legal")).into())
}

/// Convert a position to a Game with no past moves.
impl From<Position> for Game {
    fn from(position: Position) -> Self {
        Self::with_table(position, ZobristTable::new())
    }
}

/// Defaults to a new game in the standard start position.
impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
