//! Chess Rules error type.

use std::error;
use std::fmt::{self, Display};
use std::result;

/// Chess Rules generic result type.
pub type Result<T> = result::Result<T, Error>;

/// A list specifying general errors for the rules core.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Square parse string malformed.
    ParseSquareMalformed,
    /// File parse string malformed.
    ParseFileMalformed,
    /// Rank parse string malformed.
    ParseRankMalformed,
    /// Color parse string malformed.
    ParseColorMalformed,
    /// Piece parse string malformed.
    ParsePieceMalformed,
    /// Castling parse string malformed.
    ParseCastlingMalformed,
    /// Coordinate move string malformed.
    ParseMoveMalformed,
    /// Fen string malformed, or describes a board that cannot exist.
    FenMalformed,
    /// Position parts describe a board that cannot exist.
    PositionMalformed,

    /// A move was provided which is not in the legal move set of the current position.
    IllegalMove,
    /// Undo was requested but no move has been applied.
    EmptyHistory,
    /// An internal invariant was violated. Always a bug, never bad input.
    InconsistentState,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ParseSquareMalformed => "parse square malformed",
            ErrorKind::ParseFileMalformed => "parse file malformed",
            ErrorKind::ParseRankMalformed => "parse rank malformed",
            ErrorKind::ParseColorMalformed => "parse color malformed",
            ErrorKind::ParsePieceMalformed => "parse piece malformed",
            ErrorKind::ParseCastlingMalformed => "parse castling malformed",
            ErrorKind::ParseMoveMalformed => "parse move malformed",
            ErrorKind::FenMalformed => "fen malformed",
            ErrorKind::PositionMalformed => "position malformed",

            ErrorKind::IllegalMove => "illegal move",
            ErrorKind::EmptyHistory => "empty history",
            ErrorKind::InconsistentState => "inconsistent state",
        }
    }

    /// Returns true for every kind produced by rejecting external text or layouts.
    pub const fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ErrorKind::ParseSquareMalformed
                | ErrorKind::ParseFileMalformed
                | ErrorKind::ParseRankMalformed
                | ErrorKind::ParseColorMalformed
                | ErrorKind::ParsePieceMalformed
                | ErrorKind::ParseCastlingMalformed
                | ErrorKind::ParseMoveMalformed
                | ErrorKind::FenMalformed
                | ErrorKind::PositionMalformed
        )
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary and general error type for the rules core.
#[derive(Debug)]
pub enum Error {
    Simple(ErrorKind),
    Message(ErrorKind, String),
    Custom(ErrorKind, Box<dyn error::Error + Send + Sync>),
}

impl Error {
    pub fn new<E>(error_kind: ErrorKind, inner_error: E) -> Self
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Self::Custom(error_kind, inner_error.into())
    }

    /// Returns the kind of this error, regardless of any attached context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Simple(error_kind)
            | Error::Message(error_kind, _)
            | Error::Custom(error_kind, _) => *error_kind,
        }
    }

    /// Shorthand for `self.kind().is_malformed_input()`.
    pub fn is_malformed_input(&self) -> bool {
        self.kind().is_malformed_input()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Simple(error_kind) => {
                write!(f, "{error_kind}")
            }
            Error::Message(error_kind, string) => {
                write!(f, "{error_kind}: {string}")
            }
            Error::Custom(error_kind, ref box_error) => {
                write!(f, "{error_kind}, error: {}", *box_error)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Custom(_, box_error) => Some(box_error.as_ref()),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(error_kind: ErrorKind) -> Self {
        Self::Simple(error_kind)
    }
}

impl<S: ToString> From<(ErrorKind, S)> for Error {
    fn from((error_kind, stringable): (ErrorKind, S)) -> Self {
        Self::Message(error_kind, stringable.to_string())
    }
}
