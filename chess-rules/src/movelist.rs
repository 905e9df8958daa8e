//! MoveList types used in Chess Rules.
//!
//! The underlying type of MoveList may change at any time during
//! pre-1.0 development, so a MoveList type alias makes changes easy.

use arrayvec::ArrayVec;

use crate::coretypes::{Move, MAX_MOVES, MAX_PSEUDO_MOVES};

/// MoveList is a container that can hold at most `MAX_MOVES`, the most number of legal moves per any chess position.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// PseudoMoveList holds moves that may still leave the mover's king attacked,
/// so it is sized to the most pseudo-legal moves any piece set can produce.
pub type PseudoMoveList = ArrayVec<Move, MAX_PSEUDO_MOVES>;
