//! Pieces module - tetromino catalog and matrix rotation
//!
//! Every shape is an immutable occupancy matrix of at most 4x4 cells.
//! Rotating a shape produces a new value; the catalog entries are constants
//! and can never be modified through an active piece.

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, RotateDirection, Rotation, MAX_SHAPE_SIZE};

type Mask = [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

/// Occupancy matrix of a piece in one rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    kind: PieceKind,
    rotation: Rotation,
    width: u8,
    height: u8,
    mask: Mask,
}

const fn row(bits: [u8; 4]) -> [bool; MAX_SHAPE_SIZE] {
    [bits[0] != 0, bits[1] != 0, bits[2] != 0, bits[3] != 0]
}

const fn catalog_entry(kind: PieceKind, size: u8, rows: [[u8; 4]; 4]) -> Shape {
    Shape {
        kind,
        rotation: Rotation::North,
        width: size,
        height: size,
        mask: [row(rows[0]), row(rows[1]), row(rows[2]), row(rows[3])],
    }
}

const I_SHAPE: Shape = catalog_entry(
    PieceKind::I,
    4,
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const J_SHAPE: Shape = catalog_entry(
    PieceKind::J,
    3,
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const L_SHAPE: Shape = catalog_entry(
    PieceKind::L,
    3,
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const O_SHAPE: Shape = catalog_entry(
    PieceKind::O,
    2,
    [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const S_SHAPE: Shape = catalog_entry(
    PieceKind::S,
    3,
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const T_SHAPE: Shape = catalog_entry(
    PieceKind::T,
    3,
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const Z_SHAPE: Shape = catalog_entry(
    PieceKind::Z,
    3,
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

/// Catalog shape (North rotation) for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

impl Shape {
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Matrix width in columns
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Matrix height in rows
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the matrix cell at (col, row) is occupied
    pub fn is_filled(&self, col: u8, row: u8) -> bool {
        col < self.width && row < self.height && self.mask[row as usize][col as usize]
    }

    /// Iterate occupied cells as (col, row) offsets from the matrix origin
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height).flat_map(move |r| {
            (0..self.width)
                .filter(move |&c| self.mask[r as usize][c as usize])
                .map(move |c| (c as i32, r as i32))
        })
    }

    /// Quarter turn clockwise: transpose, then reverse each row
    pub fn rotated_cw(&self) -> Shape {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut mask = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        // New matrix is h wide and w tall.
        for (r, out_row) in mask.iter_mut().enumerate().take(w) {
            for (c, out) in out_row.iter_mut().enumerate().take(h) {
                *out = self.mask[h - 1 - c][r];
            }
        }
        Shape {
            kind: self.kind,
            rotation: self.rotation.rotate_cw(),
            width: self.height,
            height: self.width,
            mask,
        }
    }

    /// Quarter turn counter-clockwise: transpose, then reverse the row order
    pub fn rotated_ccw(&self) -> Shape {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut mask = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, out_row) in mask.iter_mut().enumerate().take(w) {
            for (c, out) in out_row.iter_mut().enumerate().take(h) {
                *out = self.mask[c][w - 1 - r];
            }
        }
        Shape {
            kind: self.kind,
            rotation: self.rotation.rotate_ccw(),
            width: self.height,
            height: self.width,
            mask,
        }
    }

    pub fn rotated(&self, direction: RotateDirection) -> Shape {
        match direction {
            RotateDirection::Clockwise => self.rotated_cw(),
            RotateDirection::CounterClockwise => self.rotated_ccw(),
        }
    }

    /// Number of occupied cells (always 4 for catalog shapes)
    pub fn filled_count(&self) -> usize {
        self.cells().count()
    }
}

/// Spawn column for a shape on a board of `columns` width: top-center
pub fn spawn_column(columns: u16, shape: &Shape) -> i32 {
    (columns / 2) as i32 - (shape.width() / 2) as i32
}
