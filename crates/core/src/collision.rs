//! Collision check shared by every move, rotation, drop and spawn.

use crate::board::Board;
use crate::pieces::Shape;

/// Whether `shape` may sit with its top-left corner at (`x`, `y`).
///
/// A placement is illegal when any occupied cell is left of column 0, right
/// of the last column, below the last row, or on an occupied board cell.
/// Cells above the board (negative rows) are only bounded horizontally.
/// Pure; never mutates the board.
pub fn is_legal(board: &Board, shape: &Shape, x: i32, y: i32) -> bool {
    let width = board.width() as i32;
    let height = board.height() as i32;

    shape.cells().all(|(dx, dy)| {
        let (cx, cy) = (x + dx, y + dy);
        if cx < 0 || cx >= width || cy >= height {
            return false;
        }
        cy < 0 || !board.is_occupied(cx, cy)
    })
}
