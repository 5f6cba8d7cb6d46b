//! Terminal input mapping.
//!
//! Turns `crossterm` key events into abstract [`crate::types::Command`]s.
//! There is no auto-repeat handling here; terminals deliver their own key
//! repeat and the engine treats every command independently.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
