//! Performance Test
//!
//! [Perft](https://www.chessprogramming.org/Perft)
//!
//! A simple debugging and testing function used to count
//! the number of nodes at a specific depth.

use std::ops::{Add, AddAssign};
use std::panic;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use log::trace;

use crate::coretypes::Move;
use crate::movegen::legal_moves;
use crate::movelist::MoveList;
use crate::position::Position;

/// Debugging information about results of perft test.
/// nodes: Number of nodes at lowest depth of perft.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PerftInfo {
    pub nodes: u64,
}

impl PerftInfo {
    fn new(nodes: u64) -> Self {
        PerftInfo { nodes }
    }
}

impl Add for PerftInfo {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        PerftInfo {
            nodes: self.nodes + rhs.nodes,
        }
    }
}

impl AddAssign for PerftInfo {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
    }
}

// Count the number of nodes at a certain depth.
// This ignores higher terminal nodes.
// In other words, it counts the number of paths to the given depth.
pub fn perft(mut position: Position, ply: u32, threads: usize) -> PerftInfo {
    // Guard easy to calculate inputs.
    if ply == 0 {
        // Ever only 1 position at 0 ply.
        return PerftInfo::new(1);
    } else if ply <= 2 || threads <= 1 {
        // Simple enough to not require threads, or single threaded.
        return perft_recurse(&mut position, ply);
    }
    debug_assert!(ply > 2);
    debug_assert!(threads > 1);

    let root_moves = legal_moves(&position);
    // Guard no moves to search.
    if root_moves.is_empty() {
        return PerftInfo::new(0);
    }

    let root_moves = Arc::new(Mutex::new(root_moves));

    // Create threads to process partitioned moves. Each owns a copy of the position.
    let handles: Vec<_> = (0..threads)
        .map(|worker| {
            let root_moves = Arc::clone(&root_moves);
            thread::spawn(move || perft_executor(worker, position, ply, root_moves))
        })
        .collect();

    // Wait for all handles to finish. A panicking worker panics the caller too.
    handles
        .into_iter()
        .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
        .fold(PerftInfo::default(), Add::add)
}

/// Count the nodes below each legal move of `position`.
/// Useful for locating the subtree where two move generators disagree.
pub fn perft_divide(mut position: Position, ply: u32) -> Vec<(Move, u64)> {
    if ply == 0 {
        return Vec::new();
    }

    legal_moves(&position)
        .into_iter()
        .map(|move_| {
            let undo = position.apply_raw(move_);
            let nodes = match ply {
                1 => 1,
                _ => perft_recurse(&mut position, ply - 1).nodes,
            };
            position.undo_raw(move_, undo);
            (move_, nodes)
        })
        .collect()
}

/// perft_executor works by stealing one move at a time from given moves list and running perft on that move.
/// When there are no moves left to steal, this function returns the data it has collected.
/// params:
/// worker - index of this worker, for tracing.
/// position - position to evaluate moves on.
/// ply - ply of provided position. Must be greater than 1.
/// moves - synchronous access to list of moves to steal from. Moves must be valid for given position.
fn perft_executor(
    worker: usize,
    mut position: Position,
    ply: u32,
    moves: Arc<Mutex<MoveList>>,
) -> PerftInfo {
    debug_assert!(ply > 1);
    let steal = || {
        moves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    };
    let mut perft_info = PerftInfo::new(0);

    while let Some(move_) = steal() {
        let undo = position.apply_raw(move_);
        let move_info = perft_recurse(&mut position, ply - 1);
        position.undo_raw(move_, undo);

        trace!("perft worker {worker}: {move_} -> {}", move_info.nodes);
        perft_info += move_info;
    }

    perft_info
}

/// Ply must be non-zero.
fn perft_recurse(position: &mut Position, ply: u32) -> PerftInfo {
    debug_assert_ne!(ply, 0);
    let moves = legal_moves(position);
    if ply == 1 {
        // If we reach the depth before the end,
        // return the count of legal moves.
        PerftInfo::new(moves.len() as u64)
    } else {
        let mut perft_info = PerftInfo::new(0);
        for move_ in moves {
            let undo = position.apply_raw(move_);
            perft_info += perft_recurse(position, ply - 1);
            position.undo_raw(move_, undo);
        }
        perft_info
    }
}
