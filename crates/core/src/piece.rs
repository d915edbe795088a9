//! Piece kinds, rotation states and the active (movable) piece value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::moves::SpinType;

/// The seven tetromino kinds. Serialised as the single-letter TBP literal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    S,
    Z,
    J,
    L,
    T,
    O,
    I,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

/// Direction of a quarter turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    pub fn turn(self, turn: Turn) -> Self {
        match turn {
            Turn::Clockwise => self.cw(),
            Turn::CounterClockwise => self.ccw(),
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Letter table shared by `as_char` and `FromStr`.
const LETTERS: [(Piece, char); 7] = [
    (Piece::S, 'S'),
    (Piece::Z, 'Z'),
    (Piece::J, 'J'),
    (Piece::L, 'L'),
    (Piece::T, 'T'),
    (Piece::O, 'O'),
    (Piece::I, 'I'),
];

/// North-facing shapes, indexed by `Piece as usize`.
const BASE_SHAPES: [[(i8, i8); 4]; 7] = [
    [(-1, 0), (0, 0), (0, 1), (1, 1)],  // S
    [(-1, 1), (0, 1), (0, 0), (1, 0)],  // Z
    [(-1, 0), (0, 0), (1, 0), (-1, 1)], // J
    [(-1, 0), (0, 0), (1, 0), (1, 1)],  // L
    [(-1, 0), (0, 0), (1, 0), (0, 1)],  // T
    [(0, 0), (1, 0), (0, 1), (1, 1)],   // O
    [(-1, 0), (0, 0), (1, 0), (2, 0)],  // I
];

/// Every (piece, rotation) shape, derived from `BASE_SHAPES` by repeated
/// clockwise quarter turns `(x, y) -> (y, -x)`.
const MINO_TABLE: [[[(i8, i8); 4]; 4]; 7] = {
    let mut table = [[[(0i8, 0i8); 4]; 4]; 7];
    let mut piece = 0;
    while piece < 7 {
        let mut shape = BASE_SHAPES[piece];
        let mut rot = 0;
        while rot < 4 {
            table[piece][rot] = shape;
            let mut i = 0;
            while i < 4 {
                let (x, y) = shape[i];
                shape[i] = (y, -x);
                i += 1;
            }
            rot += 1;
        }
        piece += 1;
    }
    table
};

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
        Piece::T,
        Piece::O,
        Piece::I,
    ];

    pub const SPAWN_X: i8 = 4;
    pub const SPAWN_Y: i8 = 19;

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Mino offsets for this piece at the given rotation, relative to the pivot.
    /// Every shape contains the pivot `(0, 0)`.
    #[inline(always)]
    pub fn minos(self, rot: Rotation) -> [(i8, i8); 4] {
        MINO_TABLE[self.index()][rot.index()]
    }

    pub fn as_char(self) -> char {
        LETTERS[self.index()].1
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown piece literal {0:?}")]
pub struct ParsePieceError(pub String);

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => LETTERS
                .iter()
                .find(|(_, letter)| *letter == c)
                .map(|(piece, _)| *piece)
                .ok_or_else(|| ParsePieceError(s.to_string())),
            _ => Err(ParsePieceError(s.to_string())),
        }
    }
}

/// A piece on (or above) the board: kind, rotation, pivot position and the
/// spin classification earned by the last successful movement.
///
/// Minos are never stored; they are read from the shape table for the current
/// `(kind, rotation)` so a rotation change always carries the matching shape.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: Piece,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub spin: SpinType,
}

impl ActivePiece {
    /// Fresh piece at the spawn position facing north.
    pub fn spawn(kind: Piece) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: Piece::SPAWN_X,
            y: Piece::SPAWN_Y,
            spin: SpinType::None,
        }
    }

    pub fn new(kind: Piece, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
            spin: SpinType::None,
        }
    }

    #[inline(always)]
    pub fn minos(&self) -> [(i8, i8); 4] {
        self.kind.minos(self.rotation)
    }

    /// Absolute board coordinates of the four minos.
    #[inline]
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.minos().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_north_minos() {
        let m = Piece::T.minos(Rotation::North);
        assert!(m.contains(&(0, 1)));
        assert!(m.contains(&(-1, 0)));
        assert!(m.contains(&(0, 0)));
        assert!(m.contains(&(1, 0)));
    }

    #[test]
    fn test_t_east_points_right() {
        let m = Piece::T.minos(Rotation::East);
        assert!(m.contains(&(1, 0)));
        assert!(m.contains(&(0, 1)));
        assert!(m.contains(&(0, -1)));
    }

    #[test]
    fn test_i_south_is_shifted_left() {
        let m = Piece::I.minos(Rotation::South);
        for cell in [(1, 0), (0, 0), (-1, 0), (-2, 0)] {
            assert!(m.contains(&cell));
        }
    }

    #[test]
    fn test_four_turns_round_trip() {
        for piece in Piece::ALL {
            let mut rot = Rotation::North;
            for _ in 0..4 {
                rot = rot.cw();
            }
            assert_eq!(piece.minos(rot), piece.minos(Rotation::North));
        }
    }

    #[test]
    fn test_every_shape_contains_pivot() {
        for piece in Piece::ALL {
            for rot in Rotation::ALL {
                assert!(piece.minos(rot).contains(&(0, 0)), "{piece:?} {rot:?}");
            }
        }
    }

    #[test]
    fn test_rotation_cw() {
        assert_eq!(Rotation::North.cw(), Rotation::East);
        assert_eq!(Rotation::East.cw(), Rotation::South);
        assert_eq!(Rotation::South.cw(), Rotation::West);
        assert_eq!(Rotation::West.cw(), Rotation::North);
    }

    #[test]
    fn test_rotation_ccw() {
        assert_eq!(Rotation::North.ccw(), Rotation::West);
        assert_eq!(Rotation::West.ccw(), Rotation::South);
    }

    #[test]
    fn test_letters_round_trip() {
        for piece in Piece::ALL {
            let letter = piece.to_string();
            assert_eq!(letter.parse::<Piece>(), Ok(piece));
        }
        let err = "X".parse::<Piece>().unwrap_err();
        assert_eq!(err.to_string(), "unknown piece literal \"X\"");
        assert!("TT".parse::<Piece>().is_err());
    }

    #[test]
    fn test_serde_literals() {
        assert_eq!(serde_json::to_string(&Piece::T).unwrap(), "\"T\"");
        assert_eq!(
            serde_json::to_string(&Rotation::West).unwrap(),
            "\"west\""
        );
        assert!(serde_json::from_str::<Rotation>("\"up\"").is_err());
    }

    #[test]
    fn test_spawn() {
        let p = ActivePiece::spawn(Piece::L);
        assert_eq!((p.x, p.y), (4, 19));
        assert_eq!(p.rotation, Rotation::North);
        assert_eq!(p.spin, SpinType::None);
    }
}
