//! Classification of a game's current state.

use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coretypes::{FIFTY_MOVE_HALFMOVES, REPETITION_DRAW_COUNT};
use crate::position::Position;

/// The state of a game after the most recent move.
/// Derived from the position and history, never stored independently of them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    /// Side to move has legal moves and is not in check, no draw applies.
    Ongoing,
    /// Side to move is in check and has legal moves.
    Check,
    /// Side to move is in check and has no legal moves. The other side won.
    Checkmate,
    /// Side to move is not in check and has no legal moves.
    Stalemate,
    /// 100 halfmoves passed without a capture or pawn move. Claimable.
    DrawFiftyMove,
    /// Current reduced position occurred at least three times. Claimable.
    DrawRepetition,
    /// Neither side can possibly deliver checkmate.
    DrawInsufficientMaterial,
}

impl GameStatus {
    /// Classify a position.
    ///
    /// # Arguments
    /// `position`: The current position.
    /// `has_legal_moves`: Whether the side to move has any legal move.
    /// `repetitions`: Occurrences of the current reduced position, itself included.
    pub fn classify(position: &Position, has_legal_moves: bool, repetitions: usize) -> Self {
        let in_check = position.is_in_check();

        match (in_check, has_legal_moves) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) if position.halfmoves() >= FIFTY_MOVE_HALFMOVES => GameStatus::DrawFiftyMove,
            (false, true) if repetitions >= REPETITION_DRAW_COUNT => GameStatus::DrawRepetition,
            (false, true) if position.has_insufficient_material() => {
                GameStatus::DrawInsufficientMaterial
            }
            (false, true) => GameStatus::Ongoing,
        }
    }

    /// Returns true if the game has reached a result.
    /// Fifty-move and repetition draws count, though they still have to be claimed.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    /// Returns true for draws a player may claim but that do not end play by themselves.
    pub const fn is_claimable_draw(&self) -> bool {
        matches!(self, GameStatus::DrawFiftyMove | GameStatus::DrawRepetition)
    }

    /// Returns true for every drawn status, claimable or not.
    pub const fn is_draw(&self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawFiftyMove
                | GameStatus::DrawRepetition
                | GameStatus::DrawInsufficientMaterial
        )
    }

    /// Returns true if the side to move is in check, including checkmate.
    pub const fn is_check(&self) -> bool {
        matches!(self, GameStatus::Check | GameStatus::Checkmate)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::DrawFiftyMove => "draw by fifty-move rule",
            GameStatus::DrawRepetition => "draw by threefold repetition",
            GameStatus::DrawInsufficientMaterial => "draw by insufficient material",
        }
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn classify(fen: &str, has_legal_moves: bool, repetitions: usize) -> GameStatus {
        GameStatus::classify(&Position::parse_fen(fen).unwrap(), has_legal_moves, repetitions)
    }

    #[test]
    fn classification_order() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(classify(start, true, 1), GameStatus::Ongoing);
        assert_eq!(classify(start, true, 3), GameStatus::DrawRepetition);
        assert_eq!(classify(start, true, 2), GameStatus::Ongoing);

        // Check outranks every draw.
        let checked = "4k3/8/8/8/8/8/8/r3K3 w - - 100 80";
        assert_eq!(classify(checked, true, 3), GameStatus::Check);
        assert_eq!(classify(checked, false, 1), GameStatus::Checkmate);

        // Fifty-move outranks repetition and insufficient material.
        let bare = "4k3/8/8/8/8/8/8/4K3 w - - 100 80";
        assert_eq!(classify(bare, true, 3), GameStatus::DrawFiftyMove);
        assert_eq!(classify(bare, false, 1), GameStatus::Stalemate);

        let bare = "4k3/8/8/8/8/8/8/4K3 w - - 99 80";
        assert_eq!(classify(bare, true, 1), GameStatus::DrawInsufficientMaterial);
        assert_eq!(classify(bare, true, 3), GameStatus::DrawRepetition);
    }

    #[test]
    fn status_helpers() {
        assert!(GameStatus::Checkmate.is_terminal());
        assert!(GameStatus::Stalemate.is_terminal());
        assert!(GameStatus::DrawInsufficientMaterial.is_terminal());
        assert!(GameStatus::DrawFiftyMove.is_terminal());
        assert!(GameStatus::DrawRepetition.is_terminal());
        assert!(!GameStatus::Check.is_terminal());
        assert!(!GameStatus::Ongoing.is_terminal());

        assert!(GameStatus::DrawFiftyMove.is_claimable_draw());
        assert!(GameStatus::DrawRepetition.is_claimable_draw());
        assert!(!GameStatus::Stalemate.is_claimable_draw());

        assert!(GameStatus::Stalemate.is_draw());
        assert!(!GameStatus::Checkmate.is_draw());
        assert!(!GameStatus::Ongoing.is_draw());

        assert!(GameStatus::Checkmate.is_check());
        assert!(GameStatus::Check.is_check());
        assert!(!GameStatus::Stalemate.is_check());
        assert_eq!(GameStatus::Checkmate.to_string(), "checkmate");
    }
}
