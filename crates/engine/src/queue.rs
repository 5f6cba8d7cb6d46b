//! Serialized intent queue around one [`GameState`].
//!
//! Gravity ticks and player commands are both intents. They are applied one at
//! a time, in arrival order, by whoever owns the [`Engine`]; nothing else can
//! reach the game state.

use std::collections::VecDeque;

use blockfall_core::{ConfigError, EngineConfig, GameSnapshot, GameState};
use blockfall_types::{Command, LockEvent, PieceKind};

/// One request to mutate the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Milliseconds elapsed on the host clock
    Tick(u32),
    Command(Command),
}

#[derive(Debug, Clone)]
pub struct Engine {
    game: GameState,
    pending: VecDeque<Intent>,
}

impl Engine {
    /// Validate `config` and start a game with its first piece spawned.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let mut game = GameState::new(config)?;
        game.start();
        Ok(Self::from_game(game))
    }

    /// `newGame(columns, rows, baseGravityIntervalMs)`: defaults for everything else.
    pub fn new_game(columns: u16, rows: u16, base_gravity_ms: u32) -> Result<Self, ConfigError> {
        Self::new(EngineConfig::new(columns, rows, base_gravity_ms)?)
    }

    /// Wrap a prepared game (pre-filled board, scripted pieces). Starts it if
    /// the caller has not.
    pub fn from_game(mut game: GameState) -> Self {
        game.start();
        Self {
            game,
            pending: VecDeque::new(),
        }
    }

    /// Advance the clock. Returns true if a gravity step was applied.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.pump();
        self.apply(Intent::Tick(elapsed_ms))
    }

    /// Apply a player command. Returns true if it was accepted.
    pub fn command(&mut self, command: Command) -> bool {
        self.pump();
        self.apply(Intent::Command(command))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    /// Queue an intent without applying it
    pub fn submit(&mut self, intent: Intent) {
        self.pending.push_back(intent);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Apply every queued intent in arrival order. Returns how many changed the game.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(intent) = self.pending.pop_front() {
            if self.apply(intent) {
                applied += 1;
            }
        }
        applied
    }

    pub(crate) fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Tick(ms) => self.game.tick(ms),
            Intent::Command(command) => self.game.apply_command(command),
        }
    }

    /// Force the next spawned pieces
    pub fn script_pieces(&mut self, kinds: impl IntoIterator<Item = PieceKind>) {
        self.game.script_pieces(kinds);
    }

    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.game.take_last_event()
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }
}
