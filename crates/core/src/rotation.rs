//! Rotation with horizontal kick search.
//!
//! The rotated matrix is first tried at the current origin. If that collides,
//! the origin column is nudged by the cumulative deltas `+1, -2, +3, -4, ...`
//! (net offsets `+1, -1, +2, -2, ...`) until a legal spot is found. Deltas
//! larger than the rotated matrix width are never applied; the rotation is
//! then rejected and the caller keeps its piece exactly as it was.

use crate::board::Board;
use crate::collision::is_legal;
use crate::game_state::ActivePiece;
use crate::types::RotateDirection;

/// Horizontal deltas tried after a blocked rotation, applied cumulatively
pub fn kick_deltas(width: u8) -> impl Iterator<Item = i32> {
    (1..=width as i32).map(|k| if k % 2 == 1 { k } else { -k })
}

/// Rotate `piece` one quarter turn, kicking sideways if needed.
///
/// Returns the new piece, or `None` when no tried position is legal.
/// `piece` itself is never modified.
pub fn try_rotate(
    board: &Board,
    piece: &ActivePiece,
    direction: RotateDirection,
) -> Option<ActivePiece> {
    let shape = piece.shape.rotated(direction);
    let mut x = piece.x;

    if is_legal(board, &shape, x, piece.y) {
        return Some(ActivePiece { shape, ..*piece });
    }

    for delta in kick_deltas(shape.width()) {
        x += delta;
        if is_legal(board, &shape, x, piece.y) {
            return Some(ActivePiece { shape, x, ..*piece });
        }
    }

    None
}
