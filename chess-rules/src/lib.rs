pub mod boardrepr;
pub mod coretypes;
pub mod error;
pub mod fen;
pub mod game;
pub mod history;
pub mod movegen;
pub mod movelist;
pub mod perft;
pub mod position;
pub mod status;
pub mod zobrist;

pub use coretypes::{CoordinateMove, Move, MoveKind};
pub use error::{Error, ErrorKind, Result};
pub use fen::Fen;
pub use game::{parse_move, Game};
pub use history::{History, PositionKey};
pub use movegen::legal_moves;
pub use movelist::MoveList;
pub use position::{Position, Undo};
pub use status::GameStatus;
pub use zobrist::ZobristTable;
