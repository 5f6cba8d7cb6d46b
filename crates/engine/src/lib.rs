//! Engine boundary: serialized intents and the async runtime around a game.
//!
//! [`Engine`] is the synchronous surface (`new_game`, `tick`, `command`,
//! `snapshot`) for hosts that already own a loop. [`EngineRuntime`] and
//! [`spawn_engine`] run the same engine on tokio, where a gravity clock task
//! and input producers share one channel into a single consumer task.

pub mod queue;
pub mod runtime;

pub use queue::{Engine, Intent};
pub use runtime::{
    spawn_engine, spawn_engine_with, EngineError, EngineHandle, EngineRuntime, RuntimeOptions,
};
