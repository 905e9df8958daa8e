//! Forsyth-Edwards Notation, a standard notation for describing a chess position.
//! <https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation>
//!
//! Example:
//! Starting Chess FEN = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//!
//! Fen ::= <placement> ' ' <side to move> ' ' <castling> ' ' <en passant> ' ' <halfmoves> ' ' <fullmoves>

use std::convert::TryFrom;
use std::str::FromStr;

use crate::boardrepr::Mailbox;
use crate::coretypes::{Castling, Color, File, MoveCount, Piece, Rank, Square, NUM_FILES, NUM_RANKS};
use crate::error::{Error, ErrorKind, Result};
use crate::position::Position;

/// Number of space separated fields in a complete FEN string.
const NUM_FIELDS: usize = 6;

/// Allows conversion of a chess structure to and from a FEN string.
pub trait Fen: Sized {
    /// Attempt to parse a Fen string into implementing type.
    fn parse_fen(s: &str) -> Result<Self>;

    /// Returns the Fen string representation of implementing type.
    fn to_fen(&self) -> String;
}

impl Fen for Position {
    /// Every rejection, of syntax or of an impossible board, is `FenMalformed`.
    fn parse_fen(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != NUM_FIELDS {
            return Err((
                ErrorKind::FenMalformed,
                format!("expected {NUM_FIELDS} fields, found {}", fields.len()),
            )
                .into());
        }

        let pieces = parse_placement(fields[0])?;
        let side_to_move = parse_side_to_move(fields[1])?;
        let castling = parse_castling(fields[2])?;
        let en_passant = parse_en_passant(fields[3])?;
        let halfmoves = parse_move_counter(fields[4])?;
        let fullmoves = parse_move_counter(fields[5])?;
        if fullmoves == 0 {
            return Err((ErrorKind::FenMalformed, "fullmoves must be at least 1").into());
        }

        Position::new(pieces, side_to_move, castling, en_passant, halfmoves, fullmoves)
            .map_err(|err| Error::new(ErrorKind::FenMalformed, err))
    }

    fn to_fen(&self) -> String {
        let en_passant = match self.en_passant() {
            Some(square) => square.to_string(),
            None => String::from("-"),
        };
        format!(
            "{} {} {} {} {} {}",
            placement_to_fen(self.pieces()),
            self.side_to_move(),
            self.castling(),
            en_passant,
            self.halfmoves(),
            self.fullmoves(),
        )
    }
}

/// Parse a complete FEN string into a Position.
pub fn parse(s: &str) -> Result<Position> {
    Position::parse_fen(s)
}

/// Format a Position as a complete FEN string.
pub fn format(position: &Position) -> String {
    position.to_fen()
}

/// Placement ::= <rank8> '/' <rank7> ... '/' <rank1>
/// Each rank holds piece letters and digits 1-8 for runs of empty squares,
/// and together they must cover exactly 8 files.
fn parse_placement(s: &str) -> Result<Mailbox> {
    let ranks: Vec<&str> = s.split('/').collect();
    if ranks.len() != NUM_RANKS {
        return Err((
            ErrorKind::FenMalformed,
            format!("expected {NUM_RANKS} ranks, found {}", ranks.len()),
        )
            .into());
    }

    let mut pieces = Mailbox::new();
    // FEN lists rank 8 first.
    for (rank_str, rank) in ranks.into_iter().zip((0..NUM_RANKS).rev()) {
        let mut file: usize = 0;

        for ch in rank_str.chars() {
            if let Some(empties) = ch.to_digit(10).filter(|n| (1..=8).contains(n)) {
                file += empties as usize;
            } else {
                let piece = Piece::try_from(ch).map_err(|err| Error::new(ErrorKind::FenMalformed, err))?;
                if file >= NUM_FILES {
                    return Err((ErrorKind::FenMalformed, format!("rank {} too long", rank + 1)).into());
                }
                pieces[Square::new(File::ALL[file], Rank::ALL[rank])] = Some(piece);
                file += 1;
            }

            if file > NUM_FILES {
                return Err((ErrorKind::FenMalformed, format!("rank {} too long", rank + 1)).into());
            }
        }

        if file != NUM_FILES {
            return Err((
                ErrorKind::FenMalformed,
                format!("rank {} covers {file} files", rank + 1),
            )
                .into());
        }
    }

    Ok(pieces)
}

fn parse_side_to_move(s: &str) -> Result<Color> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Color::try_from(ch).map_err(|err| Error::new(ErrorKind::FenMalformed, err)),
        _ => Err((ErrorKind::FenMalformed, "side to move must be w or b").into()),
    }
}

fn parse_castling(s: &str) -> Result<Castling> {
    Castling::from_str(s).map_err(|err| Error::new(ErrorKind::FenMalformed, err))
}

fn parse_en_passant(s: &str) -> Result<Option<Square>> {
    match s {
        "-" => Ok(None),
        _ => Square::from_str(s)
            .map(Some)
            .map_err(|err| Error::new(ErrorKind::FenMalformed, err)),
    }
}

/// Counters are plain unsigned decimal numbers.
fn parse_move_counter(s: &str) -> Result<MoveCount> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err((ErrorKind::FenMalformed, format!("counter {s:?} is not a number")).into());
    }
    s.parse::<MoveCount>()
        .map_err(|err| Error::new(ErrorKind::FenMalformed, err))
}

fn placement_to_fen(pieces: &Mailbox) -> String {
    let mut placement = String::with_capacity(64 + 7);

    for rank in (0..NUM_RANKS).rev() {
        let mut empties = 0;
        for file in 0..NUM_FILES {
            match pieces.board()[rank * NUM_FILES + file] {
                Some(piece) => {
                    if empties > 0 {
                        placement.push_str(&empties.to_string());
                        empties = 0;
                    }
                    placement.push(char::from(piece));
                }
                None => empties += 1,
            }
        }
        if empties > 0 {
            placement.push_str(&empties.to_string());
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    placement
}
