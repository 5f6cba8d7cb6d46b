//! Terminal rendering for a running game.
//!
//! Views draw a [`core::GameSnapshot`] into a [`FrameBuffer`]; the
//! [`TerminalRenderer`] writes frames to the terminal, sending only the cells
//! that changed since the previous frame. Nothing here touches game state.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Layout, Viewport};
pub use renderer::{encode_changes, encode_full, TerminalRenderer};
