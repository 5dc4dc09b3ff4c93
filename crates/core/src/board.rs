//! Board module - the 10x20 well
//!
//! Cells live in a flat row-major array (`y * WIDTH + x`) so the board never allocates.
//! Coordinates: x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the well (y < 0) are legal for a falling piece but never stored.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices removed by one line clear pass.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Collision test for a shape whose frame's top-left corner sits at `(x, y)`.
    ///
    /// A filled shape cell collides when its column is outside the well, when its row
    /// is at or below the floor, or when it lands on an occupied cell. Cells above the
    /// well (row < 0) only collide with the side walls.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().any(|(dx, dy)| {
            let px = x.saturating_add(dx);
            let py = y.saturating_add(dy);
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_none())
    }

    /// Remove every full row, shifting the rows above down and inserting empty rows
    /// at the top. Returns the removed row indices, bottom to top, as they were
    /// numbered before the clear.
    ///
    /// Two-pointer compaction: equivalent to removing each full row and re-checking
    /// the same index, without moving any row more than once.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * WIDTH;
                    self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
                }
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        cleared
    }

    /// Write the filled cells of `shape` at `(x, y)` with the piece's tag.
    ///
    /// Cells above the well are dropped. Returns how many cells were written.
    pub fn lock_shape(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.cells() {
            let py = y + dy;
            if py < 0 {
                continue;
            }
            if self.set(x + dx, py, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a whole row with one kind.
    pub fn fill_row(&mut self, y: usize, kind: PieceKind) {
        if y < HEIGHT {
            self.cells[y * WIDTH..(y + 1) * WIDTH].fill(Some(kind));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn cells_above_the_well_only_hit_walls() {
        let board = Board::new();
        let t = Shape::from_kind(PieceKind::T);
        // Frame fully above the board is fine as long as columns are in range.
        assert!(!board.collides(&t, 3, -3));
        assert!(board.collides(&t, -1, -3));
        assert!(board.collides(&t, 8, -3));
    }

    #[test]
    fn floor_collision() {
        let board = Board::new();
        let o = Shape::from_kind(PieceKind::O);
        assert!(!board.collides(&o, 0, 18));
        assert!(board.collides(&o, 0, 19));
    }

    #[test]
    fn occupied_cell_collision() {
        let mut board = Board::new();
        board.set(4, 10, Some(PieceKind::Z));
        let o = Shape::from_kind(PieceKind::O);
        assert!(board.collides(&o, 3, 9));
        assert!(!board.collides(&o, 5, 9));
    }

    #[test]
    fn clear_compacts_non_adjacent_rows() {
        let mut board = Board::new();
        board.fill_row(19, PieceKind::I);
        board.set(0, 18, Some(PieceKind::T));
        board.fill_row(17, PieceKind::L);
        board.set(9, 16, Some(PieceKind::S));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(9, 18), Some(Some(PieceKind::S)));
        assert!(board.is_row_empty(0));
        assert!(board.is_row_empty(17));
    }

    #[test]
    fn lock_shape_discards_hidden_rows() {
        let mut board = Board::new();
        // J at y=-1: its top cell is above the well.
        let j = Shape::from_kind(PieceKind::J);
        let written = board.lock_shape(&j, 3, -1, PieceKind::J);
        assert_eq!(written, 3);
        assert_eq!(board.get(3, 0), Some(Some(PieceKind::J)));
        assert_eq!(board.get(4, 0), Some(Some(PieceKind::J)));
        assert_eq!(board.get(5, 0), Some(Some(PieceKind::J)));
    }
}
