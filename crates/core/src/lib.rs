//! Stadium core crate - board, piece and move types shared by the engine,
//! the bot bridge and the arena.

mod board;
mod moves;
mod piece;
mod state;

pub use board::{Board, Cell};
pub use moves::{Move, SpinType};
pub use piece::{ActivePiece, ParsePieceError, Piece, Rotation, Turn};
pub use state::GameState;
