//! collision detection - walls, floor, other blocks

use stadium_core::{ActivePiece, Board, Piece, Rotation};

/// does this shape at (x, y) hit a wall, the floor, the ceiling or a block?
#[inline(always)]
pub fn collides_at(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> bool {
    piece
        .minos(rotation)
        .iter()
        .any(|&(dx, dy)| board.occupied(x + dx, y + dy))
}

#[inline(always)]
pub fn collides(board: &Board, piece: &ActivePiece) -> bool {
    collides_at(board, piece.kind, piece.rotation, piece.x, piece.y)
}

/// can we place here? (just !collides)
pub fn can_place(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> bool {
    !collides_at(board, piece, rotation, x, y)
}

/// A placement rests on something: one row lower would collide.
#[inline]
pub fn is_grounded(board: &Board, piece: &ActivePiece) -> bool {
    collides_at(board, piece.kind, piece.rotation, piece.x, piece.y - 1)
}

#[inline]
pub fn hard_drop_y(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> i8 {
    let mut landing_y = y;
    while !collides_at(board, piece, rotation, x, landing_y - 1) {
        landing_y -= 1;
    }
    landing_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_collision_empty_board() {
        let board = Board::new();
        assert!(!collides_at(&board, Piece::T, Rotation::North, 4, 1));
        assert!(!collides(&board, &ActivePiece::spawn(Piece::I)));
    }

    #[test]
    fn test_collision_with_wall() {
        let board = Board::new();
        assert!(collides_at(&board, Piece::T, Rotation::North, 0, 1));
        assert!(collides_at(&board, Piece::I, Rotation::North, 8, 1));
        assert!(!collides_at(&board, Piece::I, Rotation::North, 7, 1));
    }

    #[test]
    fn test_collision_with_floor() {
        let board = Board::new();
        // T North at y=0 sits on row 0 and row 1
        assert!(!collides_at(&board, Piece::T, Rotation::North, 4, 0));
        // T South reaches down to y=-1
        assert!(collides_at(&board, Piece::T, Rotation::South, 4, 0));
    }

    #[test]
    fn test_collision_with_ceiling() {
        let board = Board::new();
        assert!(collides_at(&board, Piece::T, Rotation::North, 4, 39));
        assert!(!collides_at(&board, Piece::T, Rotation::North, 4, 38));
    }

    #[test]
    fn test_collision_with_filled_cell() {
        let mut board = Board::new();
        board.set(4, 0, true);
        assert!(collides_at(&board, Piece::T, Rotation::North, 4, 0));
        assert!(!collides_at(&board, Piece::T, Rotation::North, 4, 1));
    }

    #[test]
    fn test_grounded() {
        let board = Board::new();
        assert!(is_grounded(&board, &ActivePiece::new(Piece::T, Rotation::North, 4, 0)));
        assert!(!is_grounded(&board, &ActivePiece::new(Piece::T, Rotation::North, 4, 1)));
    }

    #[test]
    fn test_hard_drop() {
        let board = Board::new();
        let y = hard_drop_y(&board, Piece::T, Rotation::North, 4, 20);
        assert_eq!(y, 0);
    }

    #[test]
    fn test_hard_drop_with_obstacle() {
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            board.set(x, 5, true);
        }
        let y = hard_drop_y(&board, Piece::T, Rotation::North, 4, 20);
        assert_eq!(y, 6);
    }
}
