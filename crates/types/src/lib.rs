//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! They are plain data with no game logic, usable from the engine, the terminal
//! host, or any other embedding (tests, scripted drivers, serializers).
//!
//! # Board Dimensions
//!
//! The board size is chosen per game. The defaults describe the classic
//! playfield:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Rows above the board (negative row indices) are legal for a piece that is
//! still entering from the top.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Clock cadence of the runtime (~60 FPS) |
//! | `DEFAULT_BASE_GRAVITY_MS` | 1000 | Gravity interval at level 1 |
//! | `DEFAULT_MIN_GRAVITY_MS` | 100 | Floor for the gravity interval |
//!
//! The gravity interval at level `L` is `max(min, base / L)`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, Rotation};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.id(), 6);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_COLUMNS: u16 = 10;

/// Default board height in cells
pub const DEFAULT_ROWS: u16 = 20;

/// Clock cadence used by the runtime (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (one row per second)
pub const DEFAULT_BASE_GRAVITY_MS: u32 = 1000;

/// Lower clamp for the gravity interval
pub const DEFAULT_MIN_GRAVITY_MS: u32 = 100;

/// Cumulative score needed per level step
pub const DEFAULT_LEVEL_SCORE_STEP: u32 = 1000;

/// Points per cleared line, multiplied by level
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Largest edge of any shape matrix in the catalog
pub const MAX_SHAPE_SIZE: usize = 4;

/// The seven tetromino shapes
///
/// The declaration order is the catalog order and defines the identity tag
/// returned by [`PieceKind::id`]: I=1, J=2, L=3, O=4, S=5, T=6, Z=7.
/// Tag 0 is reserved for an empty board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Stable identity tag (1..=7) used for board cells and coloring
    pub fn id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]; 0 and unknown tags map to `None`
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(4), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Rotation state of a piece relative to its catalog orientation
///
/// - **North**: catalog (spawn) orientation
/// - **East**: one clockwise quarter turn
/// - **South**: half turn
/// - **West**: one counter-clockwise quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotate(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotate_ccw(),
        }
    }
}

/// Direction of a single quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Player and host commands
///
/// These are the only inputs the engine accepts besides clock ticks.
/// Illegal moves and rotations are rejected silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// One manual gravity step (locks if the piece cannot move down)
    SoftDrop,
    /// Drop to the lowest legal row and lock immediately
    HardDrop,
    /// Rotate 90° clockwise with horizontal kick search
    RotateCw,
    /// Rotate 90° counter-clockwise with horizontal kick search
    RotateCcw,
    /// Suspend gravity and movement
    Pause,
    /// Leave the paused state
    Resume,
    /// Discard the current game and start over
    NewGame,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATECCW"), Some(Command::RotateCcw));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "newgame" => Some(Command::NewGame),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::NewGame => "newGame",
        }
    }

    /// Whether the command manipulates the falling piece
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Command::MoveLeft
                | Command::MoveRight
                | Command::SoftDrop
                | Command::HardDrop
                | Command::RotateCw
                | Command::RotateCcw
        )
    }
}

/// Externally visible state of a game
///
/// Spawning, locking and clearing happen synchronously inside a single
/// command or tick, so they never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayState {
    #[default]
    Falling,
    Paused,
    GameOver,
}

/// Event emitted after a piece locks.
///
/// Hosts may consume it once to drive sound, flashes, or logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    pub level_after: u32,
    /// The next piece could not be placed.
    pub game_over: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell of the given shape
pub type Cell = Option<PieceKind>;
