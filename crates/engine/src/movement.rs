//! Rotation and movement logic with kick application.

use crate::collision::{collides, collides_at};
use crate::kicks::{get_kicks, KICK_COUNT};
use stadium_core::{ActivePiece, Board, Piece, Rotation, SpinType, Turn};

/// One input the move generator can apply to a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement {
    ShiftLeft,
    ShiftRight,
    RotateCw,
    RotateCcw,
    SonicDrop,
}

impl Movement {
    pub const ALL: [Movement; 5] = [
        Movement::ShiftLeft,
        Movement::ShiftRight,
        Movement::RotateCw,
        Movement::RotateCcw,
        Movement::SonicDrop,
    ];
}

/// Result of a rotation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationResult {
    pub piece: ActivePiece,
    pub kick_index: usize,
}

/// Corner offsets per rotation: two front corners then two back corners.
const T_CORNERS: [[(i8, i8); 4]; 4] = [
    [(-1, 1), (1, 1), (1, -1), (-1, -1)],  // N
    [(1, 1), (1, -1), (-1, -1), (-1, 1)],  // E
    [(1, -1), (-1, -1), (-1, 1), (1, 1)],  // S
    [(-1, -1), (-1, 1), (1, 1), (1, -1)],  // W
];

/// Try to turn a piece, testing each kick in order.
/// Returns None if every candidate collides; the input is never modified.
pub fn try_rotate(board: &Board, piece: &ActivePiece, turn: Turn) -> Option<RotationResult> {
    let to = piece.rotation.turn(turn);
    let kicks = get_kicks(piece.kind, piece.rotation, to);

    for (kick_index, (dx, dy)) in kicks.into_iter().enumerate() {
        let mut rotated = ActivePiece::new(piece.kind, to, piece.x + dx, piece.y + dy);
        if collides(board, &rotated) {
            continue;
        }
        rotated.spin = classify_spin(board, &rotated, kick_index);
        return Some(RotationResult {
            piece: rotated,
            kick_index,
        });
    }

    None
}

/// Try to move piece horizontally. A successful shift clears the spin.
pub fn try_shift(board: &Board, piece: &ActivePiece, dx: i8) -> Option<ActivePiece> {
    if collides_at(board, piece.kind, piece.rotation, piece.x + dx, piece.y) {
        return None;
    }
    Some(ActivePiece::new(piece.kind, piece.rotation, piece.x + dx, piece.y))
}

/// Rows the piece can fall before landing, read straight from the column bits.
pub fn drop_distance(board: &Board, piece: &ActivePiece) -> i8 {
    debug_assert!(!collides(board, piece));
    piece
        .cells()
        .iter()
        .map(|&(x, y)| {
            let below = board.column(x as usize) & ((1u64 << y) - 1);
            let floor = (u64::BITS - below.leading_zeros()) as i8;
            y - floor
        })
        .min()
        .unwrap_or(0)
}

/// Instant drop to the landing row. A piece already resting on the stack
/// comes back unchanged.
///
/// Spin belongs to the last movement only: a drop that moves the piece clears
/// it, so rotating in mid-air and then dropping never scores as a spin. Engines
/// that carry the rotation's spin through the drop classify these placements
/// differently.
pub fn sonic_drop(board: &Board, piece: &ActivePiece) -> ActivePiece {
    let distance = drop_distance(board, piece);
    if distance == 0 {
        return *piece;
    }
    ActivePiece::new(piece.kind, piece.rotation, piece.x, piece.y - distance)
}

/// Apply one movement in place. Returns false, leaving the piece untouched,
/// when the movement is blocked.
pub fn process_movement(board: &Board, piece: &mut ActivePiece, movement: Movement) -> bool {
    let next = match movement {
        Movement::ShiftLeft => try_shift(board, piece, -1),
        Movement::ShiftRight => try_shift(board, piece, 1),
        Movement::RotateCw => try_rotate(board, piece, Turn::Clockwise).map(|r| r.piece),
        Movement::RotateCcw => {
            try_rotate(board, piece, Turn::CounterClockwise).map(|r| r.piece)
        }
        Movement::SonicDrop => Some(sonic_drop(board, piece)).filter(|p| *p != *piece),
    };
    match next {
        Some(next) => {
            *piece = next;
            true
        }
        None => false,
    }
}

fn classify_spin(board: &Board, piece: &ActivePiece, kick_index: usize) -> SpinType {
    if piece.kind != Piece::T {
        return SpinType::None;
    }
    detect_tspin(board, piece.rotation, piece.x, piece.y, kick_index)
}

/// Detect T-spin using the front/back corner rule.
/// Corners outside the board count as filled.
pub(crate) fn detect_tspin(
    board: &Board,
    rotation: Rotation,
    x: i8,
    y: i8,
    kick_index: usize,
) -> SpinType {
    let [a, b, c, d] = T_CORNERS[rotation.index()].map(|(dx, dy)| board.occupied(x + dx, y + dy));

    if a && b && (c || d) {
        SpinType::Full
    } else if (a || b) && c && d {
        if kick_index == KICK_COUNT - 1 {
            SpinType::Full
        } else {
            SpinType::Mini
        }
    } else {
        SpinType::None
    }
}
