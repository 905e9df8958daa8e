//! Move generation and attack detection on a mailbox board.
//!
//! Moves are first generated pseudo-legally: every piece moves by its own
//! rules without regard for the safety of its king. Legal moves are the
//! pseudo-legal moves that, once applied to a private copy of the position,
//! do not leave the mover's king attacked.

use crate::boardrepr::Mailbox;
use crate::coretypes::{Color, Move, MoveKind, Piece, PieceKind, PieceKind::*, Square};
use crate::movelist::{MoveList, PseudoMoveList};
use crate::position::Position;

pub mod rays;
pub mod tables;

use tables::{Offset, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};

/// Returns every legal move for the side to move of `position`.
/// Order is unspecified.
pub fn legal_moves(position: &Position) -> MoveList {
    let us = position.side_to_move();
    let mut scratch = *position;

    pseudo_legal_moves(position)
        .into_iter()
        .filter(|&move_| {
            let undo = scratch.apply_raw(move_);
            let king_safe = !scratch.is_color_in_check(us);
            scratch.undo_raw(move_, undo);
            king_safe
        })
        .collect()
}

/// Returns every pseudo-legal move for the side to move of `position`.
/// Pseudo-legal moves follow piece movement and occupancy rules, but may
/// leave the mover's own king attacked. Castling moves are fully checked.
pub fn pseudo_legal_moves(position: &Position) -> PseudoMoveList {
    let mut moves = PseudoMoveList::new();
    let us = position.side_to_move();
    let pieces = position.pieces();

    for (from, piece) in pieces.occupied().filter(|(_, piece)| piece.color() == us) {
        match piece.piece_kind() {
            Pawn => pawn_pseudo_moves(&mut moves, position, from),
            Knight => step_pseudo_moves(&mut moves, pieces, us, from, tables::knight_targets(from)),
            King => step_pseudo_moves(&mut moves, pieces, us, from, tables::king_targets(from)),
            Bishop => slide_pseudo_moves(&mut moves, pieces, us, from, &BISHOP_DIRECTIONS),
            Rook => slide_pseudo_moves(&mut moves, pieces, us, from, &ROOK_DIRECTIONS),
            Queen => {
                slide_pseudo_moves(&mut moves, pieces, us, from, &ROOK_DIRECTIONS);
                slide_pseudo_moves(&mut moves, pieces, us, from, &BISHOP_DIRECTIONS);
            }
        }
    }
    castling_pseudo_moves(&mut moves, position);

    moves
}

// *_pseudo_moves:
// append pseudo legal moves for a single piece, including pushes and
// captures. These moves do not consider check, but they do consider occupancy.

/// Generate all pseudo-legal moves for the pawn on `from` and append to move list.
/// Pushes require empty squares, a double push starts from the pawn's
/// starting rank, and diagonal moves need an enemy piece or the en passant target.
fn pawn_pseudo_moves(moves: &mut PseudoMoveList, position: &Position, from: Square) {
    let us = position.side_to_move();
    let forward = us.forward();
    let pieces = position.pieces();

    if let Some(single) = from.offset(0, forward) {
        if pieces[single].is_none() {
            push_pawn_move(moves, us, from, single, MoveKind::Normal);

            if from.rank() == us.pawn_rank() {
                if let Some(double) = single.offset(0, forward) {
                    if pieces[double].is_none() {
                        moves.push(Move::new(from, double, None, MoveKind::DoublePawnPush));
                    }
                }
            }
        }
    }

    for file_delta in [-1, 1] {
        if let Some(target) = from.offset(file_delta, forward) {
            match pieces[target] {
                Some(piece) if piece.color() != us => {
                    push_pawn_move(moves, us, from, target, MoveKind::Capture)
                }
                None if position.en_passant() == Some(target) => {
                    moves.push(Move::new(from, target, None, MoveKind::EnPassant))
                }
                _ => (),
            }
        }
    }
}

/// A pawn landing on its last rank expands into one move per promotion kind.
fn push_pawn_move(moves: &mut PseudoMoveList, us: Color, from: Square, to: Square, kind: MoveKind) {
    if to.rank() == us.promotion_rank() {
        for promotion in PieceKind::PROMOTIONS {
            moves.push(Move::new(from, to, Some(promotion), MoveKind::Promotion));
        }
    } else {
        moves.push(Move::new(from, to, None, kind));
    }
}

/// Generate moves for knights and kings, which step to a fixed set of targets.
fn step_pseudo_moves(
    moves: &mut PseudoMoveList,
    pieces: &Mailbox,
    us: Color,
    from: Square,
    targets: impl Iterator<Item = Square>,
) {
    for to in targets {
        match pieces[to] {
            None => moves.push(Move::new(from, to, None, MoveKind::Normal)),
            Some(piece) if piece.color() != us => {
                moves.push(Move::new(from, to, None, MoveKind::Capture))
            }
            Some(_) => (),
        }
    }
}

/// Generate moves for sliding pieces, walking each direction until the first piece.
fn slide_pseudo_moves(
    moves: &mut PseudoMoveList,
    pieces: &Mailbox,
    us: Color,
    from: Square,
    directions: &[Offset],
) {
    for &direction in directions {
        for to in rays::ray(from, direction) {
            match pieces[to] {
                None => moves.push(Move::new(from, to, None, MoveKind::Normal)),
                Some(piece) => {
                    if piece.color() != us {
                        moves.push(Move::new(from, to, None, MoveKind::Capture));
                    }
                    break;
                }
            }
        }
    }
}

/// Generate castling moves and append to move list.
/// Castling requires the matching right, king and rook on their original
/// squares, nothing between them, and the king neither in check nor passing
/// through or landing on an attacked square.
fn castling_pseudo_moves(moves: &mut PseudoMoveList, position: &Position) {
    let us = position.side_to_move();
    let them = !us;
    let pieces = position.pieces();

    for rule in tables::castle_rules(us) {
        let available = position.castling().has(rule.right)
            && pieces[rule.king_from] == Some(Piece::new(us, King))
            && pieces[rule.rook_from] == Some(Piece::new(us, Rook))
            && rule.between.iter().all(|&square| pieces[square].is_none())
            && !position.is_square_attacked(rule.king_from, them)
            && rule
                .king_path
                .iter()
                .all(|&square| !position.is_square_attacked(square, them));

        if available {
            moves.push(Move::new(rule.king_from, rule.king_to, None, rule.kind));
        }
    }
}

// *_attackers:
// take a target square and return the squares of all pieces of one color
// that attack it. Attacks ignore whether the attacker is itself pinned.

/// Returns true if any piece of color `by` attacks `target`.
pub fn is_square_attacked(pieces: &Mailbox, target: Square, by: Color) -> bool {
    attackers(pieces, target, by).next().is_some()
}

/// Squares of all pieces of color `by` attacking `target`.
pub fn attackers(pieces: &Mailbox, target: Square, by: Color) -> impl Iterator<Item = Square> + '_ {
    pawn_attackers(pieces, target, by)
        .chain(knight_attackers(pieces, target, by))
        .chain(king_attackers(pieces, target, by))
        .chain(slider_attackers(pieces, target, by))
}

/// Squares of pawns of color `by` attacking `target`. Pawns attack diagonally forward only.
pub fn pawn_attackers(pieces: &Mailbox, target: Square, by: Color) -> impl Iterator<Item = Square> + '_ {
    let pawn = Some(Piece::new(by, Pawn));
    [-1, 1]
        .into_iter()
        .filter_map(move |file_delta| target.offset(file_delta, -by.forward()))
        .filter(move |&square| pieces[square] == pawn)
}

/// Squares of knights of color `by` attacking `target`.
pub fn knight_attackers(pieces: &Mailbox, target: Square, by: Color) -> impl Iterator<Item = Square> + '_ {
    let knight = Some(Piece::new(by, Knight));
    tables::knight_targets(target).filter(move |&square| pieces[square] == knight)
}

/// Squares of the king of color `by` if it is adjacent to `target`.
pub fn king_attackers(pieces: &Mailbox, target: Square, by: Color) -> impl Iterator<Item = Square> + '_ {
    let king = Some(Piece::new(by, King));
    tables::king_targets(target).filter(move |&square| pieces[square] == king)
}

/// Squares of bishops, rooks and queens of color `by` with a clear line to `target`.
pub fn slider_attackers(pieces: &Mailbox, target: Square, by: Color) -> impl Iterator<Item = Square> + '_ {
    let straight = ROOK_DIRECTIONS.into_iter().map(|direction| (direction, Rook));
    let diagonal = BISHOP_DIRECTIONS.into_iter().map(|direction| (direction, Bishop));

    straight.chain(diagonal).filter_map(move |(direction, line_kind)| {
        let (square, piece) = rays::first_blocker(pieces, target, direction)?;
        let kind = piece.piece_kind();
        (piece.color() == by && (kind == line_kind || kind == Queen)).then_some(square)
    })
}
