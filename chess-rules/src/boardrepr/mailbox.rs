//! Square-centric board, see [mailbox](https://www.chessprogramming.org/Mailbox).
//!
//! One slot per square, each empty or holding a single piece.

use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

use crate::coretypes::{Color, Piece, PieceKind, Square, NUM_FILES, NUM_RANKS, NUM_SQUARES};

/// Piece placement indexed by Square.
/// Mailbox is Square-Centric, meaning it indexes by square to get a piece.
/// Index starts at A1.
/// A1 = idx 0
/// B1 = idx 1
/// A2 = idx 8
/// H8 = idx 63
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Mailbox {
    board: [Option<Piece>; Self::SIZE],
}

impl Mailbox {
    pub const FILES: usize = NUM_FILES;
    pub const RANKS: usize = NUM_RANKS;
    pub const SIZE: usize = NUM_SQUARES;

    /// Board with every square empty.
    pub const fn new() -> Self {
        Mailbox {
            board: [None; Mailbox::SIZE],
        }
    }

    /// Standard initial placement.
    pub fn start_position() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; NUM_FILES] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut mb = Self::new();

        for color in Color::iter() {
            for (file, piece_kind) in BACK_RANK.into_iter().enumerate() {
                mb.board[color.home_rank() as usize * NUM_FILES + file] =
                    Some(Piece::new(color, piece_kind));
                mb.board[color.pawn_rank() as usize * NUM_FILES + file] =
                    Some(Piece::new(color, Pawn));
            }
        }

        mb
    }

    pub fn board(&self) -> &[Option<Piece>; Self::SIZE] {
        &self.board
    }

    /// Removes and returns the piece on a square, leaving it empty.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.board[square.idx()].take()
    }

    /// Iterator over every occupied square and its piece, from A1 to H8.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |square| self[square].map(|piece| (square, piece)))
    }

    /// Iterator over every square holding exactly `piece`.
    pub fn squares_of(&self, piece: Piece) -> impl Iterator<Item = Square> + '_ {
        self.occupied()
            .filter(move |(_, other)| *other == piece)
            .map(|(square, _)| square)
    }

    /// Bordered text board with file and rank labels, eighth rank on top.
    pub fn pretty(&self) -> String {
        const RANK_SEP: &str = "+---+---+---+---+---+---+---+---+\n";
        let mut pretty = String::with_capacity(626);

        pretty.push_str(RANK_SEP);
        for rank in (0..Self::RANKS).rev() {
            pretty.push_str("| ");

            for file in 0..Self::FILES {
                pretty.push(match self.board[rank * Self::FILES + file] {
                    Some(piece) => char::from(piece),
                    None => ' ',
                });
                pretty.push_str(" | ");
            }
            pretty.push_str(&(rank + 1).to_string());
            pretty.push('\n');
            pretty.push_str(RANK_SEP);
        }
        pretty.push_str("  a   b   c   d   e   f   g   h\n");

        pretty
    }
}

impl Index<Square> for Mailbox {
    type Output = Option<Piece>;
    fn index(&self, square: Square) -> &Self::Output {
        &self.board[square.idx()]
    }
}

impl IndexMut<Square> for Mailbox {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.board[square.idx()]
    }
}

/// Defaults to the initial placement.
impl Default for Mailbox {
    fn default() -> Self {
        Mailbox::start_position()
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Color::*;
    use PieceKind::*;
    use Square::*;

    #[test]
    fn start_position_layout() {
        let mb = Mailbox::start_position();
        assert_eq!(mb[A1], Some(Piece::new(White, Rook)));
        assert_eq!(mb[D1], Some(Piece::new(White, Queen)));
        assert_eq!(mb[E1], Some(Piece::new(White, King)));
        assert_eq!(mb[G2], Some(Piece::new(White, Pawn)));
        assert_eq!(mb[E8], Some(Piece::new(Black, King)));
        assert_eq!(mb[B8], Some(Piece::new(Black, Knight)));
        assert_eq!(mb[C7], Some(Piece::new(Black, Pawn)));
        assert_eq!(mb[E4], None);
        assert_eq!(mb.occupied().count(), 32);
        assert_eq!(mb.squares_of(Piece::new(Black, Pawn)).count(), 8);
        assert_eq!(
            mb.squares_of(Piece::new(White, Bishop)).collect::<Vec<_>>(),
            vec![C1, F1]
        );
    }

    #[test]
    fn take_empties_square() {
        let mut mb = Mailbox::start_position();
        assert_eq!(mb.take(G1), Some(Piece::new(White, Knight)));
        assert_eq!(mb[G1], None);
        assert_eq!(mb.take(G1), None);
    }

    #[test]
    fn pretty_start_position() {
        let pretty = Mailbox::start_position().pretty();
        let mut lines = pretty.lines();
        assert_eq!(lines.next(), Some("+---+---+---+---+---+---+---+---+"));
        assert_eq!(lines.next(), Some("| r | n | b | q | k | b | n | r | 8"));
        assert_eq!(pretty.lines().last(), Some("  a   b   c   d   e   f   g   h"));
        assert_eq!(pretty.len(), 626);
    }
}
