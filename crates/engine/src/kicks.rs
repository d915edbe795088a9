//! SRS offset tables for piece rotation.
//!
//! Each rotation state owns five offsets. Rotating from `from` to `to` tests
//! the candidates `offset[from][i] - offset[to][i]` in order.

use stadium_core::{Piece, Rotation};

type OffsetTable = [[(i8, i8); 5]; 4];

/// J, L, S, T and Z share one table.
const JLSTZ_OFFSETS: OffsetTable = [
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],    // N
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],   // E
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],    // S
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)], // W
];

/// Only the first entry differs per state; the O piece never really kicks,
/// the offsets just keep it from wobbling.
const O_OFFSETS: OffsetTable = [
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, -1), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(-1, -1), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(-1, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
];

const I_OFFSETS: OffsetTable = [
    [(0, 0), (-1, 0), (2, 0), (-1, 0), (2, 0)],
    [(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],
    [(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)],
    [(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],
];

pub const KICK_COUNT: usize = 5;

fn offsets(piece: Piece) -> &'static OffsetTable {
    match piece {
        Piece::I => &I_OFFSETS,
        Piece::O => &O_OFFSETS,
        _ => &JLSTZ_OFFSETS,
    }
}

/// Candidate translations for a rotation transition, in test order.
pub fn get_kicks(piece: Piece, from: Rotation, to: Rotation) -> [(i8, i8); KICK_COUNT] {
    let table = offsets(piece);
    let prev = &table[from.index()];
    let next = &table[to.index()];
    std::array::from_fn(|i| (prev[i].0 - next[i].0, prev[i].1 - next[i].1))
}
