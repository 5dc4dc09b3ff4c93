//! Pieces module - tetromino shapes as 4x4 matrices
//!
//! Every canonical layout is embedded top-left into a 4x4 frame, so a quarter turn
//! is a plain matrix transform with no reshaping: cell `(row, col)` moves to
//! `(col, N - 1 - row)` for a clockwise turn.

use crate::types::{PieceKind, RotateDir, SHAPE_SIZE};

/// Occupancy grid of a piece, indexed `[row][col]`.
type ShapeMatrix = [[bool; SHAPE_SIZE]; SHAPE_SIZE];

const X: bool = true;
const O: bool = false;

/// A piece shape inside its 4x4 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: ShapeMatrix,
}

impl Shape {
    /// Spawn layout for a piece kind
    pub fn from_kind(kind: PieceKind) -> Self {
        let rows = match kind {
            PieceKind::I => [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]],
            PieceKind::J => [[X, O, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
            PieceKind::L => [[O, O, X, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
            PieceKind::O => [[X, X, O, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
            PieceKind::S => [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
            PieceKind::T => [[O, X, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
            PieceKind::Z => [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]],
        };
        Self { rows }
    }

    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        row < SHAPE_SIZE && col < SHAPE_SIZE && self.rows[row][col]
    }

    /// Occupied cells as `(col, row)` offsets from the frame's top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter(|(_, &filled)| filled)
                .map(move |(col, _)| (col as i8, row as i8))
        })
    }

    /// Quarter turn clockwise.
    pub fn rotated_cw(&self) -> Self {
        let n = SHAPE_SIZE;
        let mut rows = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        for (row, line) in self.rows.iter().enumerate() {
            for (col, &filled) in line.iter().enumerate() {
                rows[col][n - 1 - row] = filled;
            }
        }
        Self { rows }
    }

    /// Quarter turn in the given direction. Counter-clockwise is three clockwise turns.
    pub fn rotated(&self, dir: RotateDir) -> Self {
        match dir {
            RotateDir::Cw => self.rotated_cw(),
            RotateDir::Ccw => self.rotated_cw().rotated_cw().rotated_cw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(Shape::from_kind(kind).cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn kinds_have_distinct_layouts() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(Shape::from_kind(*a), Shape::from_kind(*b));
            }
        }
    }

    #[test]
    fn clockwise_maps_row_col_to_col_mirrored_row() {
        // T: row 0 col 1 is filled, so rotated (1, 3) must be filled.
        let t = Shape::from_kind(PieceKind::T).rotated_cw();
        assert!(t.is_filled(3, 1));
        // Row 1 (0..3) becomes column 2.
        assert!(t.is_filled(2, 0));
        assert!(t.is_filled(2, 1));
        assert!(t.is_filled(2, 2));
        assert_eq!(t.cells().count(), 4);
    }

    #[test]
    fn four_turns_is_identity() {
        for kind in PieceKind::ALL {
            let s = Shape::from_kind(kind);
            let back = s.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(s, back);
        }
    }

    #[test]
    fn ccw_undoes_cw() {
        for kind in PieceKind::ALL {
            let s = Shape::from_kind(kind);
            assert_eq!(s.rotated(RotateDir::Cw).rotated(RotateDir::Ccw), s);
        }
    }

    #[test]
    fn i_piece_turns_vertical() {
        let i = Shape::from_kind(PieceKind::I).rotated_cw();
        let cells: Vec<_> = i.cells().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }
}
