//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is either empty or
//! holds the identity of the shape that was locked there.
//! Uses a flat row-major vector; the dimensions are fixed at construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::types::{Cell, PieceKind};

/// The game board with flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` is empty, a piece letter (`i`, `j`, `l`, `o`, `s`, `t`, `z`, any
    /// case) is a locked cell of that shape, `#` is a locked `I` cell.
    /// The width is taken from the first row; shorter rows are padded empty.
    pub fn from_pattern(rows: &[&str]) -> Self {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u16;
        let mut board = Self::new(width, rows.len() as u16);
        for (y, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate().take(width as usize) {
                let cell = match ch {
                    '#' => Some(PieceKind::I),
                    c => PieceKind::from_str(&c.to_string()),
                };
                board.set(x as i32, y as i32, cell);
            }
        }
        board
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(|cell| cell.is_some())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(|cell| cell.is_none())
    }

    /// Number of occupied cells on the whole board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Remove every full row, compacting the rest downward and padding
    /// empty rows at the top. The relative order of kept rows is preserved.
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        // Scan from bottom to top
        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Write every `(x, y)` cell as `kind`, then clear full rows.
    ///
    /// Callers validate the placement with the collision check first, so the
    /// cells written are always empty and in bounds; cells above the top
    /// edge are dropped. Returns the number of rows cleared by this lock.
    pub fn lock_and_clear(
        &mut self,
        cells: impl IntoIterator<Item = (i32, i32)>,
        kind: PieceKind,
    ) -> usize {
        for (x, y) in cells {
            debug_assert!(!self.is_occupied(x, y), "lock overwrote ({x}, {y})");
            self.set(x, y, Some(kind));
        }
        self.clear_full_rows()
    }

    /// Export identity tags (0 = empty) row-major into `out`, reusing its allocation
    pub fn write_u8_grid(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|c| c.map(|k| k.id()).unwrap_or(0)));
    }
}
