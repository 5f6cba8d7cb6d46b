//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens on the board lives here: the shape
//! catalog, the collision oracle, kick rotation, line clearing, scoring and
//! the falling-piece state machine. Nothing in this crate performs I/O or
//! reads a clock; time only enters through [`GameState::tick`].
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid of locked cells with row clearing
//! - [`collision`]: whether a shape fits at a position
//! - [`config`]: validated game configuration
//! - [`game_state`]: active piece, scoring and play state
//! - [`pieces`]: shape catalog and matrix rotation
//! - [`rng`]: seeded uniform piece selection with preview
//! - [`rotation`]: horizontal kick search
//! - [`scoring`]: line points, levels and gravity speed
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, GameState};
//! use blockfall_types::{Command, PieceKind};
//!
//! let mut game = GameState::new(EngineConfig::new(8, 4, 1000).unwrap()).unwrap();
//! game.script_pieces([PieceKind::O]);
//! game.start();
//!
//! game.apply_command(Command::HardDrop);
//! assert_eq!(game.board().occupied_count(), 4);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use collision::is_legal;
pub use config::{ConfigError, EngineConfig};
pub use game_state::{ActivePiece, GameState};
pub use pieces::{get_shape, Shape};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, get_gravity_interval_ms};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
