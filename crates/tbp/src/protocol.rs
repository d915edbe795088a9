//! TBP message types.
//!
//! Literals come straight from the core enums' serde names: pieces are
//! `"S"`..`"I"`, orientations `"north"`..`"west"`, spins `"none"`, `"mini"`,
//! `"full"`. Anything else fails to deserialize.

use serde::{Deserialize, Serialize};
use stadium_core::{Board, Cell, GameState, Move, Piece, Rotation, SpinType};

// ============== Frontend -> Bot ==============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrontendMessage {
    Start(Start),
    Suggest,
    Play {
        #[serde(rename = "move")]
        mv: TbpMove,
    },
    NewPiece {
        piece: Piece,
    },
    Stop,
    Quit,
}

/// One board cell as TBP spells it: a piece letter, or `G` for garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TbpCell {
    S,
    Z,
    J,
    L,
    T,
    O,
    I,
    G,
}

impl TbpCell {
    pub fn from_cell(cell: Cell) -> Option<Self> {
        match cell {
            Cell::Empty => None,
            Cell::Garbage => Some(TbpCell::G),
            Cell::Piece(piece) => Some(match piece {
                Piece::S => TbpCell::S,
                Piece::Z => TbpCell::Z,
                Piece::J => TbpCell::J,
                Piece::L => TbpCell::L,
                Piece::T => TbpCell::T,
                Piece::O => TbpCell::O,
                Piece::I => TbpCell::I,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Start {
    pub hold: Option<Piece>,
    /// Current piece first, then the preview queue.
    pub queue: Vec<Piece>,
    pub combo: u32,
    pub back_to_back: bool,
    /// 40 rows of 10 cells, row 0 at the bottom.
    pub board: Vec<Vec<Option<TbpCell>>>,
}

impl Start {
    pub fn from_state(state: &GameState) -> Self {
        let board = (0..Board::HEIGHT)
            .map(|y| {
                (0..Board::WIDTH)
                    .map(|x| TbpCell::from_cell(state.board.cell(x, y)))
                    .collect()
            })
            .collect();
        Self {
            hold: state.hold,
            queue: state.lookahead(),
            combo: state.combo,
            back_to_back: state.back_to_back(),
            board,
        }
    }
}

// ============== Bot -> Frontend ==============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotMessage {
    Info(BotInfo),
    Suggestion {
        moves: Vec<TbpMove>,
    },
    Error {
        reason: String,
    },
}

impl BotMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            BotMessage::Info(_) => "info",
            BotMessage::Suggestion { .. } => "suggestion",
            BotMessage::Error { .. } => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfo {
    pub name: String,
    pub version: String,
    pub author: String,
    #[serde(default)]
    pub features: Vec<String>,
}

// ============== Shared ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "type")]
    pub kind: Piece,
    pub orientation: Rotation,
    pub x: i8,
    pub y: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TbpMove {
    pub location: Location,
    pub spin: SpinType,
}

impl From<&Move> for TbpMove {
    fn from(mv: &Move) -> Self {
        Self {
            location: Location {
                kind: mv.piece,
                orientation: mv.rotation,
                x: mv.x,
                y: mv.y,
            },
            spin: mv.spin_type,
        }
    }
}

impl From<TbpMove> for Move {
    fn from(mv: TbpMove) -> Self {
        let loc = mv.location;
        Move::new(loc.kind, loc.orientation, loc.x, loc.y).with_spin(mv.spin)
    }
}
