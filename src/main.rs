//! Terminal host for the blockfall engine (default binary).
//!
//! The engine runs on its own tokio runtime with its gravity clock; this
//! thread only reads keys, forwards commands and draws published snapshots.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::info;

use blockfall::core::{EngineConfig, GameSnapshot};
use blockfall::engine::{EngineHandle, EngineRuntime};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = EngineConfig::from_env().context("invalid BLOCKFALL_* configuration")?;
    let runtime = EngineRuntime::start(config).context("failed to start engine")?;
    info!(
        "starting {}x{} game, gravity {}ms",
        config.columns, config.rows, config.base_gravity_ms
    );

    let mut term = TerminalRenderer::stdout();
    term.enter()?;

    let result = run(&mut term, runtime.handle());

    // Always try to restore terminal state.
    let _ = term.leave();
    runtime.shutdown(Duration::from_millis(200));
    result
}

fn run(term: &mut TerminalRenderer, engine: EngineHandle) -> Result<()> {
    let view = GameView::default();
    let frame_time = Duration::from_millis(TICK_MS as u64);
    let mut snap = GameSnapshot::default();
    let mut frame = FrameBuffer::new(0, 0);

    loop {
        engine.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut frame);
        term.present(&mut frame)?;

        if !event::poll(frame_time)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(command) = handle_key_event(key, snap.state) {
                    engine.blocking_command(command)?;
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
