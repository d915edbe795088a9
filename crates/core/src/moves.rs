//! Move and spin type definitions.

use crate::{ActivePiece, Piece, Rotation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinType {
    #[default]
    None,
    Mini,
    Full,
}

/// A final placement chosen for one side.
///
/// Whether the placement goes through the hold slot is decided by the engine
/// from the piece kind; `hold_used` records what the move generator saw.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub hold_used: bool,
    pub spin_type: SpinType,
}

impl Move {
    pub fn new(piece: Piece, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            piece,
            rotation,
            x,
            y,
            hold_used: false,
            spin_type: SpinType::None,
        }
    }

    pub fn with_spin(mut self, spin_type: SpinType) -> Self {
        self.spin_type = spin_type;
        self
    }

    pub fn with_hold(mut self) -> Self {
        self.hold_used = true;
        self
    }

    /// Same kind, rotation and position.
    pub fn same_placement(&self, other: &Move) -> bool {
        self.piece == other.piece
            && self.rotation == other.rotation
            && self.x == other.x
            && self.y == other.y
    }

    pub fn to_piece(&self) -> ActivePiece {
        ActivePiece {
            kind: self.piece,
            rotation: self.rotation,
            x: self.x,
            y: self.y,
            spin: self.spin_type,
        }
    }
}

impl From<ActivePiece> for Move {
    fn from(piece: ActivePiece) -> Self {
        Self {
            piece: piece.kind,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
            hold_used: false,
            spin_type: piece.spin,
        }
    }
}
