//! Read-only snapshot of one player's side of a match.

use crate::{ActivePiece, Board, Piece};
use serde::{Deserialize, Serialize};

/// What a renderer, a record sink or a bot handshake needs to see of a player.
/// Produced by the engine; never fed back into it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current: ActivePiece,
    pub hold: Option<Piece>,
    pub queue: Vec<Piece>,
    pub b2b: u32,
    pub combo: u32,
    pub garbage_meter: u32,
}

impl GameState {
    pub fn new(current: Piece, queue: Vec<Piece>) -> Self {
        Self {
            board: Board::new(),
            current: ActivePiece::spawn(current),
            hold: None,
            queue,
            b2b: 0,
            combo: 0,
            garbage_meter: 0,
        }
    }

    /// Current piece followed by the queue, as a bot expects to receive it.
    pub fn lookahead(&self) -> Vec<Piece> {
        std::iter::once(self.current.kind)
            .chain(self.queue.iter().copied())
            .collect()
    }

    pub fn back_to_back(&self) -> bool {
        self.b2b != 0
    }
}
