//! Legal placement generation.
//!
//! Breadth-first search from the spawn state over shifts, rotations and sonic
//! drops. A reached state is a placement when one row lower would collide.

use std::collections::VecDeque;

use crate::collision::{collides, is_grounded};
use crate::movement::{process_movement, Movement};
use stadium_core::{ActivePiece, Board, Move, Piece};

const STATE_COUNT: usize = 4 * Board::WIDTH * Board::HEIGHT * 7;

/// Seen-set over every (rotation, x, y, kind) a piece can legally occupy.
struct Visited([u64; STATE_COUNT.div_ceil(64)]);

impl Visited {
    fn new() -> Self {
        Self([0; STATE_COUNT.div_ceil(64)])
    }

    #[inline(always)]
    fn index(piece: &ActivePiece) -> usize {
        // any non-colliding state has its pivot on the board
        debug_assert!((0..Board::WIDTH as i8).contains(&piece.x));
        debug_assert!((0..Board::HEIGHT as i8).contains(&piece.y));
        let (x, y) = (piece.x as usize, piece.y as usize);
        piece.rotation.index() + 4 * (x + Board::WIDTH * (y + Board::HEIGHT * piece.kind.index()))
    }

    /// Marks the state, returning true the first time it is seen.
    #[inline(always)]
    fn insert(&mut self, piece: &ActivePiece) -> bool {
        let i = Self::index(piece);
        let (word, bit) = (i / 64, 1u64 << (i % 64));
        let fresh = self.0[word] & bit == 0;
        self.0[word] |= bit;
        fresh
    }
}

/// Every reachable resting placement of `kind`, each `(rotation, x, y)` once.
/// Empty when the spawn state is already blocked.
pub fn generate_placements(board: &Board, kind: Piece) -> Vec<Move> {
    let mut moves = Vec::new();
    let spawn = ActivePiece::spawn(kind);
    if collides(board, &spawn) {
        return moves;
    }

    let mut visited = Visited::new();
    let mut queue = VecDeque::new();
    visited.insert(&spawn);
    queue.push_back(spawn);

    while let Some(state) = queue.pop_front() {
        if is_grounded(board, &state) {
            moves.push(Move::from(state));
        }
        for movement in Movement::ALL {
            let mut next = state;
            if process_movement(board, &mut next, movement) && visited.insert(&next) {
                queue.push_back(next);
            }
        }
    }

    moves
}

/// Placements for the current piece plus, flagged with `hold_used`, those of
/// the piece a hold would bring in (the held piece, or the queue front when
/// the hold slot is empty).
pub fn generate_moves_with_hold(
    board: &Board,
    current: Piece,
    hold: Option<Piece>,
    queue: &[Piece],
) -> Vec<Move> {
    let mut moves = generate_placements(board, current);

    match hold.or_else(|| queue.first().copied()) {
        Some(swap) if swap != current => {
            moves.extend(
                generate_placements(board, swap)
                    .into_iter()
                    .map(Move::with_hold),
            );
        }
        _ => {}
    }

    moves
}

pub fn count_placements(board: &Board, kind: Piece) -> usize {
    generate_placements(board, kind).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use stadium_core::{Rotation, SpinType};

    fn key(m: &Move) -> (Piece, Rotation, i8, i8) {
        (m.piece, m.rotation, m.x, m.y)
    }

    #[test]
    fn test_generate_moves_empty_board() {
        let board = Board::new();
        let moves = generate_placements(&board, Piece::T);
        assert!(!moves.is_empty());
        for m in &moves {
            assert!(is_grounded(&board, &m.to_piece()));
            assert!(!collides(&board, &m.to_piece()));
        }
    }

    #[test]
    fn test_empty_board_counts() {
        let board = Board::new();
        // T: 8 + 9 + 8 + 9 columns across its four rotations
        assert_eq!(count_placements(&board, Piece::T), 34);
        // O: every rotation lands on the same 9 squares but at distinct pivots
        assert_eq!(count_placements(&board, Piece::O), 36);
        // I: 7 horizontal and 10 vertical per orientation pair
        assert_eq!(count_placements(&board, Piece::I), 34);
    }

    #[test]
    fn test_no_duplicates() {
        let mut board = Board::new();
        for x in 0..9 {
            board.set(x, 0, true);
        }
        board.set(2, 3, true);
        for kind in Piece::ALL {
            let moves = generate_placements(&board, kind);
            let unique: HashSet<_> = moves.iter().map(key).collect();
            assert_eq!(unique.len(), moves.len(), "{kind:?}");
        }
    }

    #[test]
    fn test_all_rotations_present() {
        let board = Board::new();
        let moves = generate_placements(&board, Piece::T);
        for rot in Rotation::ALL {
            assert!(moves.iter().any(|m| m.rotation == rot));
        }
    }

    #[test]
    fn test_blocked_spawn_has_no_moves() {
        let mut board = Board::new();
        board.set(4, 19, true);
        assert!(generate_placements(&board, Piece::T).is_empty());
    }

    #[test]
    fn test_tspin_slot_is_found() {
        let mut board = Board::new();
        for y in 0..2 {
            for x in 0..Board::WIDTH {
                if !(x == 4 || (y == 1 && (x == 3 || x == 5))) {
                    board.set(x, y, true);
                }
            }
        }
        board.set(3, 2, true);
        board.set(2, 2, true);
        let moves = generate_placements(&board, Piece::T);
        let tsd = moves
            .iter()
            .find(|m| m.rotation == Rotation::South && m.x == 4 && m.y == 1)
            .expect("slot reachable");
        assert_eq!(tsd.spin_type, SpinType::Full);
    }

    #[test]
    fn test_generate_with_hold() {
        let board = Board::new();
        let moves = generate_moves_with_hold(&board, Piece::T, Some(Piece::I), &[]);
        let t_moves = moves
            .iter()
            .filter(|m| m.piece == Piece::T && !m.hold_used)
            .count();
        let i_moves = moves
            .iter()
            .filter(|m| m.piece == Piece::I && m.hold_used)
            .count();
        assert_eq!(t_moves, 34);
        assert_eq!(i_moves, 34);
    }

    #[test]
    fn test_hold_falls_back_to_queue_front() {
        let board = Board::new();
        let moves = generate_moves_with_hold(&board, Piece::T, None, &[Piece::O, Piece::I]);
        assert!(moves.iter().any(|m| m.piece == Piece::O && m.hold_used));
        assert!(!moves.iter().any(|m| m.piece == Piece::I));
    }

    #[test]
    fn test_same_kind_hold_is_skipped() {
        let board = Board::new();
        let moves = generate_moves_with_hold(&board, Piece::T, Some(Piece::T), &[]);
        assert_eq!(moves.len(), 34);
        assert!(moves.iter().all(|m| !m.hold_used));
    }
}
