//! Zobrist Hashing

use std::collections::HashSet;
use std::ops::Index;

use rand::prelude::*;

use crate::coretypes::{Castling, Color, File, Move, MoveKind, Piece, PieceKind, Square};
use crate::coretypes::{NUM_FILES, NUM_PIECE_KINDS, NUM_SQUARES};
use crate::movegen::tables;
use crate::position::{Position, Undo};

/// Zobrist hash value.
pub type HashKind = u64;

/// Keys for [Zobrist hashing](https://www.chessprogramming.org/Zobrist_Hashing),
/// xored together to hash the reduced form of a position.
///
/// Every piece on every square has a key.
/// One key marks Black to move.
/// Every castling rights combination has a key.
/// Every en passant file has a key.
///
/// Move counters are not hashed, as they do not take part in repetition.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ZobristTable {
    piece_hash: [[HashKind; NUM_SQUARES]; NUM_PIECE_KINDS],
    ep_hash: [HashKind; NUM_FILES],
    castling_hash: [HashKind; Castling::ENUMERATIONS],
    player_hash: HashKind,
}

impl ZobristTable {
    const TOGGLE_PLAYER: Color = Color::Black;

    /// Table seeded from system entropy. Hashes differ between runs.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Table generated from `seed`. Equal seeds give equal tables.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Fill every key from `rng`.
    fn with_rng(mut rng: StdRng) -> Self {
        // Values must be distinct and non-zero.
        let mut used_values = HashSet::new();
        let mut unique_value = move || loop {
            let value: HashKind = rng.gen();
            // insert returns false if value was already in set.
            if value != 0 && used_values.insert(value) {
                break value;
            }
        };

        let mut piece_hash = [[HashKind::default(); NUM_SQUARES]; NUM_PIECE_KINDS];
        let mut ep_hash = [HashKind::default(); NUM_FILES];
        let mut castling_hash = [HashKind::default(); Castling::ENUMERATIONS];

        for item in piece_hash
            .iter_mut()
            .flatten()
            .chain(ep_hash.iter_mut())
            .chain(castling_hash.iter_mut())
        {
            *item = unique_value();
        }
        let player_hash = unique_value();

        Self {
            piece_hash,
            ep_hash,
            castling_hash,
            player_hash,
        }
    }

    /// Generate a hash value of a position from scratch in context of this ZobristTable.
    pub fn generate_hash(&self, position: &Position) -> HashKind {
        let mut hash = HashKind::default();

        // Pieces.
        for (square, piece) in position.pieces().occupied() {
            hash ^= self[(piece, square)];
        }

        // En passant file, if any.
        if let Some(ep_square) = position.en_passant() {
            hash ^= self[ep_square.file()];
        }

        // Hash castling rights.
        hash ^= self[position.castling()];

        // Only Black to move is keyed, so a move toggles one value.
        if position.side_to_move() == ZobristTable::TOGGLE_PLAYER {
            hash ^= self.player_hash;
        }

        hash
    }

    /// Update a hash from a Position with a move already applied, the move,
    /// and the Undo returned when it was applied.
    /// The update is its own inverse: applying it twice restores the original hash.
    ///
    /// # Arguments
    /// `hash`: Updated in place.
    /// `position`: The Position after `move_` was applied.
    /// `move_`: The Move that was applied to some position.
    /// `undo`: The state saved by applying `move_`.
    pub fn update_hash(&self, hash: &mut HashKind, position: &Position, move_: Move, undo: Undo) {
        let moved_player = !position.side_to_move();
        let passive_player = position.side_to_move();

        // Side to move flips on every move.
        *hash ^= self.player_hash;
        // Every rights combination has a key, including none, so both sides are toggled.
        *hash ^= self[undo.castling()];
        *hash ^= self[position.castling()];

        // Old and new en passant files.
        if let Some(ep_square) = undo.en_passant() {
            *hash ^= self[ep_square.file()];
        }
        if let Some(ep_square) = position.en_passant() {
            *hash ^= self[ep_square.file()];
        }

        // Toggle moved piece on both squares. A promoted piece left as a pawn.
        let Some(to_piece) = position.piece_at(move_.to()) else {
            debug_assert!(false, "moved piece missing from {}", move_.to());
            return;
        };
        let to_piece_kind = to_piece.piece_kind();
        let from_piece_kind = match move_.promotion() {
            Some(_) => PieceKind::Pawn,
            None => to_piece_kind,
        };
        *hash ^= self[(Piece::new(moved_player, from_piece_kind), move_.from())];
        *hash ^= self[(Piece::new(moved_player, to_piece_kind), move_.to())];

        // Toggle passive player's captured piece, which is behind the target for en-passant.
        if let Some(captured) = undo.captured() {
            debug_assert_eq!(captured.color(), passive_player);
            let captured_square = match move_.kind() {
                MoveKind::EnPassant => Square::new(move_.to().file(), move_.from().rank()),
                _ => move_.to(),
            };
            *hash ^= self[(captured, captured_square)];
        }

        // Castling also moves the rook.
        if let Some(rule) = tables::castle_rule(moved_player, move_.kind()) {
            let castled_rook = Piece::new(moved_player, PieceKind::Rook);
            *hash ^= self[(castled_rook, rule.rook_from)];
            *hash ^= self[(castled_rook, rule.rook_to)];
        }
    }
}

/// Defaults to an entropy-seeded table.
impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Key of a piece standing on a square.
impl Index<(Piece, Square)> for ZobristTable {
    type Output = HashKind;
    fn index(&self, (piece, square): (Piece, Square)) -> &Self::Output {
        &self.piece_hash[zobrist_offset(piece)][square.idx()]
    }
}

// En passant file key.
impl Index<File> for ZobristTable {
    type Output = HashKind;
    fn index(&self, index: File) -> &Self::Output {
        &self.ep_hash[index as usize]
    }
}

// Castling rights key.
impl Index<Castling> for ZobristTable {
    type Output = HashKind;
    fn index(&self, index: Castling) -> &Self::Output {
        &self.castling_hash[index.bits() as usize]
    }
}

/// Get the completely qualified table index for a piece.
/// White pieces take the first block of 6, Black the second.
const fn zobrist_offset(piece: Piece) -> usize {
    piece.color() as usize * PieceKind::ALL.len() + piece.piece_kind() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::{CoordinateMove, Square::*};
    use crate::fen::Fen;
    use crate::movegen::legal_moves;

    fn find_move(position: &Position, coords: CoordinateMove) -> Move {
        legal_moves(position)
            .into_iter()
            .find(|move_| *move_ == coords)
            .unwrap()
    }

    fn test_before_and_after(table: ZobristTable, before: Position, after: Position, coords: CoordinateMove) {
        let hash_before = table.generate_hash(&before);
        let hash_after = table.generate_hash(&after);

        // Regeneration is deterministic.
        assert_eq!(hash_before, table.generate_hash(&before));
        assert_eq!(hash_after, table.generate_hash(&after));
        assert_ne!(hash_before, hash_after);

        // Incremental update agrees with regeneration.
        let mut pos = before;
        let mut hash = hash_before;
        let legal_move = find_move(&pos, coords);
        let undo = pos.apply_raw(legal_move);
        table.update_hash(&mut hash, &pos, legal_move, undo);
        assert_eq!(pos.to_fen(), after.to_fen());
        assert_eq!(hash, hash_after);

        // A second update reverts the first.
        table.update_hash(&mut hash, &pos, legal_move, undo);
        assert_eq!(hash, hash_before);

        // And a third reapplies it.
        table.update_hash(&mut hash, &pos, legal_move, undo);
        assert_eq!(hash, hash_after);
    }

    #[test]
    fn hash_start_position() {
        let table = ZobristTable::new();
        let start_position = Position::start_position();
        let queens_pawn_game =
            Position::parse_fen("rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 1").unwrap();

        test_before_and_after(table, start_position, queens_pawn_game, CoordinateMove::new(D2, D4, None));
    }

    #[test]
    fn hash_en_passant_position() {
        let table = ZobristTable::with_seed(7);
        let pos_before =
            Position::parse_fen("rnbqkbnr/pp1p1ppp/8/2pPp3/8/8/PPP1PPPP/RNBQKBNR w KQkq e6 0 3")
                .unwrap();
        let pos_after =
            Position::parse_fen("rnbqkbnr/pp1p1ppp/4P3/2p5/8/8/PPP1PPPP/RNBQKBNR b KQkq - 0 3")
                .unwrap();

        test_before_and_after(table, pos_before, pos_after, CoordinateMove::new(D5, E6, None));
    }

    #[test]
    fn hash_castling_position() {
        let table = ZobristTable::new();
        let pos_before = Position::parse_fen(
            "rnb1k1nr/pp3ppp/3bp3/q2p4/2Pp4/2NBPN2/PP3PPP/R1BQK2R w KQkq - 0 7",
        )
        .unwrap();
        let pos_after =
            Position::parse_fen("rnb1k1nr/pp3ppp/3bp3/q2p4/2Pp4/2NBPN2/PP3PPP/R1BQ1RK1 b kq - 1 7")
                .unwrap();

        test_before_and_after(table, pos_before, pos_after, CoordinateMove::new(E1, G1, None));
    }

    #[test]
    fn hash_promotion_capture_position() {
        let table = ZobristTable::with_seed(11);
        let pos_before = Position::parse_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let pos_after = Position::parse_fen("1Q2k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();

        test_before_and_after(
            table,
            pos_before,
            pos_after,
            CoordinateMove::new(A7, B8, Some(PieceKind::Queen)),
        );
    }

    #[test]
    fn seeded_tables_are_reproducible() {
        let position = Position::start_position();
        let first = ZobristTable::with_seed(1234);
        let second = ZobristTable::with_seed(1234);
        let other = ZobristTable::with_seed(4321);
        assert_eq!(first, second);
        assert_eq!(first.generate_hash(&position), second.generate_hash(&position));
        assert_ne!(first.generate_hash(&position), other.generate_hash(&position));
    }

    #[test]
    fn table_values_are_unique() {
        let table = ZobristTable::with_seed(99);
        let mut values: HashSet<HashKind> = table.piece_hash.iter().flatten().copied().collect();
        values.extend(table.ep_hash);
        values.extend(table.castling_hash);
        values.insert(table.player_hash);
        assert_eq!(values.len(), NUM_PIECE_KINDS * NUM_SQUARES + NUM_FILES + Castling::ENUMERATIONS + 1);
    }
}
