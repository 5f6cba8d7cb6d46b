use serde::{Deserialize, Serialize};

use crate::game_state::ActivePiece;
use crate::pieces::Shape;
use crate::types::{PieceKind, PlayState, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
    pub shape: Shape,
}

impl ActiveSnapshot {
    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            x: value.x,
            y: value.y,
            shape: value.shape,
        }
    }
}

/// Read-only view of a game, safe to hand to renderers and serializers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub columns: u16,
    pub rows: u16,
    /// Row-major identity tags, 0 = empty, 1..=7 = [`PieceKind::id`]
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would lock at after a hard drop
    pub ghost_y: Option<i32>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub state: PlayState,
    pub gravity_interval_ms: u32,
    pub games_played: u32,
}

impl GameSnapshot {
    /// Identity tag at (x, y); 0 when empty or out of bounds
    pub fn cell(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.columns as i32 || y >= self.rows as i32 {
            return 0;
        }
        self.board[y as usize * self.columns as usize + x as usize]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            columns: 0,
            rows: 0,
            board: Vec::new(),
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            score: 0,
            level: 1,
            lines: 0,
            state: PlayState::Falling,
            gravity_interval_ms: 0,
            games_played: 0,
        }
    }
}
