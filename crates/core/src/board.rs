//! board representation - column-major u64s for fast bitwise ops
//! three tint planes ride along so every filled cell remembers its origin

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ActivePiece, Piece};

/// What occupies a single cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Cell {
    Empty,
    Piece(Piece),
    Garbage,
}

/// Tint code for garbage; piece tints are `Piece as u8` (0..=6).
const GARBAGE_TINT: u8 = 7;

/// 10x40 board using column-major u64 bitfields.
/// Each column uses 40 bits (rows 0-39).
/// Row 0 is bottom, Row 39 is top (only 0-19 visible).
///
/// `tint[p]` holds bit `p` of each occupied cell's 3-bit tint. Unoccupied cells
/// always have all tint bits clear.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct Board {
    cols: [u64; Board::WIDTH],
    tint: [[u64; Board::WIDTH]; 3],
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 40;
    pub const VISIBLE_HEIGHT: usize = 20;

    /// Bits that exist in a column.
    pub const COLUMN_MASK: u64 = (1u64 << Self::HEIGHT) - 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        (self.cols[x] >> y) & 1 == 1
    }

    /// Signed lookup; anything outside the board reads as filled.
    #[inline(always)]
    pub fn occupied(&self, x: i8, y: i8) -> bool {
        if !(0..Self::WIDTH as i8).contains(&x) || !(0..Self::HEIGHT as i8).contains(&y) {
            return true;
        }
        (self.cols[x as usize] >> y) & 1 == 1
    }

    /// Raw cell write. Filled cells written this way are tinted as garbage.
    pub fn set(&mut self, x: usize, y: usize, filled: bool) {
        let cell = if filled { Cell::Garbage } else { Cell::Empty };
        self.set_cell(x, y, cell);
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        let mask = 1u64 << y;
        let tint = match cell {
            Cell::Empty => {
                self.cols[x] &= !mask;
                for plane in &mut self.tint {
                    plane[x] &= !mask;
                }
                return;
            }
            Cell::Piece(piece) => piece as u8,
            Cell::Garbage => GARBAGE_TINT,
        };
        self.cols[x] |= mask;
        for (bit, plane) in self.tint.iter_mut().enumerate() {
            if (tint >> bit) & 1 == 1 {
                plane[x] |= mask;
            } else {
                plane[x] &= !mask;
            }
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if !self.get(x, y) {
            return Cell::Empty;
        }
        let tint = (0..3).fold(0u8, |acc, bit| {
            acc | ((((self.tint[bit][x] >> y) & 1) as u8) << bit)
        });
        match tint {
            GARBAGE_TINT => Cell::Garbage,
            t => Cell::Piece(Piece::ALL[t as usize]),
        }
    }

    /// Write all four minos of a piece. The caller guarantees the piece fits.
    pub fn set_piece(&mut self, piece: &ActivePiece) {
        for (x, y) in piece.cells() {
            debug_assert!(
                !self.occupied(x, y),
                "placing {piece:?} over a filled cell ({x}, {y})"
            );
            if (0..Self::WIDTH as i8).contains(&x) && (0..Self::HEIGHT as i8).contains(&y) {
                self.set_cell(x as usize, y as usize, Cell::Piece(piece.kind));
            }
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        (self.full_rows() >> y) & 1 == 1
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        (0..Self::WIDTH).all(|x| (self.cols[x] >> y) & 1 == 0)
    }

    /// Every column empty - a perfect clear.
    pub fn is_empty(&self) -> bool {
        self.cols.iter().all(|&col| col == 0)
    }

    /// Bitmask of rows with all ten cells filled.
    #[inline]
    fn full_rows(&self) -> u64 {
        self.cols.iter().fold(Self::COLUMN_MASK, |acc, &col| acc & col)
    }

    /// Remove every full row and let the rows above fall. Returns the count.
    pub fn clear_lines(&mut self) -> u8 {
        let full = self.full_rows();
        if full == 0 {
            return 0;
        }
        for x in 0..Self::WIDTH {
            self.cols[x] = remove_rows(self.cols[x], full);
            for plane in &mut self.tint {
                plane[x] = remove_rows(plane[x], full);
            }
        }
        full.count_ones() as u8
    }

    /// Push everything up by `lines` and fill the new bottom rows with garbage,
    /// leaving `hole` open in every one of them. Cells pushed past the top of
    /// the storage are lost.
    pub fn add_garbage(&mut self, lines: usize, hole: usize) {
        if lines == 0 {
            return;
        }
        let lines = lines.min(Self::HEIGHT);
        let fill = (1u64 << lines) - 1;
        let shift = |col: u64| (col << lines) & Self::COLUMN_MASK;
        for x in 0..Self::WIDTH {
            self.cols[x] = shift(self.cols[x]);
            for plane in &mut self.tint {
                plane[x] = shift(plane[x]);
            }
            if x != hole {
                self.cols[x] |= fill;
                for plane in &mut self.tint {
                    plane[x] |= fill;
                }
            }
        }
    }

    /// Get raw row data for collision detection
    pub fn row(&self, y: usize) -> u16 {
        (0..Self::WIDTH).fold(0u16, |acc, x| acc | (((self.cols[x] >> y) & 1) as u16) << x)
    }

    /// Rows 0..20 as 10-bit bitmaps, bottom first.
    pub fn visible_rows(&self) -> [u16; Self::VISIBLE_HEIGHT] {
        std::array::from_fn(|y| self.row(y))
    }

    /// Get raw column data for fast height calculation
    #[inline]
    pub fn column(&self, x: usize) -> u64 {
        self.cols[x]
    }

    /// Get all columns as slice - for fast board operations
    #[inline]
    pub fn columns(&self) -> &[u64; 10] {
        &self.cols
    }

    /// Index of the first empty row above the stack in column `x`.
    pub fn height(&self, x: usize) -> usize {
        64 - self.cols[x].leading_zeros() as usize
    }
}

/// Delete the bits of `rows` from `col`, sliding higher bits down.
#[inline]
fn remove_rows(col: u64, rows: u64) -> u64 {
    let mut col = col;
    let mut remaining = rows;
    // top-down so lower indices stay valid
    while remaining != 0 {
        let y = 63 - remaining.leading_zeros() as usize;
        let lower = col & ((1u64 << y) - 1);
        let upper = col >> (y + 1);
        col = lower | (upper << y);
        remaining &= !(1u64 << y);
    }
    col
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut rows = [0u16; Board::HEIGHT];
        for (y, row) in rows.iter_mut().enumerate() {
            *row = self.row(y);
        }
        rows.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    /// Occupancy only; every filled cell comes back tinted as garbage.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let vec: Vec<u16> = Vec::deserialize(deserializer)?;
        if vec.len() != Board::HEIGHT {
            return Err(serde::de::Error::custom("expected 40 rows"));
        }
        let mut board = Board::new();
        for (y, &value) in vec.iter().enumerate() {
            for x in 0..Board::WIDTH {
                if (value >> x) & 1 == 1 {
                    board.set(x, y, true);
                }
            }
        }
        Ok(board)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..Self::VISIBLE_HEIGHT).rev() {
            for x in 0..Self::WIDTH {
                match self.cell(x, y) {
                    Cell::Empty => write!(f, "  ")?,
                    Cell::Garbage => write!(f, "##")?,
                    Cell::Piece(p) => write!(f, "{p}{p}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
