//! Ray walks for sliding pieces.

use crate::boardrepr::Mailbox;
use crate::coretypes::{Piece, Square};
use crate::movegen::tables::Offset;

/// Iterator over the squares leaving an origin in a single direction,
/// origin exclusive, until the edge of the board.
#[derive(Debug, Clone)]
pub struct Ray {
    next: Option<Square>,
    direction: Offset,
}

impl Iterator for Ray {
    type Item = Square;
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.offset(self.direction.0, self.direction.1);
        Some(current)
    }
}

/// Returns a ray from `origin` exclusive, ignoring occupancy.
pub fn ray(origin: Square, direction: Offset) -> Ray {
    Ray {
        next: origin.offset(direction.0, direction.1),
        direction,
    }
}

/// Walks a ray and returns the first occupied square with its piece,
/// or None if the ray reaches the edge of the board unobstructed.
pub fn first_blocker(pieces: &Mailbox, origin: Square, direction: Offset) -> Option<(Square, Piece)> {
    ray(origin, direction).find_map(|square| pieces[square].map(|piece| (square, piece)))
}
