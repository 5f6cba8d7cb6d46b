//! Game state module - the falling piece state machine
//!
//! Ties together the board, the piece catalog, the randomizer and scoring.
//! A game moves through `Spawning -> Falling -> Locking -> Clearing ->
//! Spawning` until a freshly spawned piece collides, which ends it. Spawning,
//! locking and clearing complete inside the single tick or command that
//! triggers them, so only `Falling`, `Paused` and `GameOver` are observable.

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::board::Board;
use crate::collision::is_legal;
use crate::config::{ConfigError, EngineConfig};
use crate::pieces::{get_shape, spawn_column, Shape};
use crate::rotation::try_rotate;
use crate::rng::PieceQueue;
use crate::scoring::{calculate_level, calculate_line_score, get_gravity_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

const MAX_CELLS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// The falling piece: current matrix plus the board position of its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Catalog orientation at the top-center of a board `columns` wide
    pub fn spawn(kind: PieceKind, columns: u16) -> Self {
        let shape = get_shape(kind);
        Self {
            x: spawn_column(columns, &shape),
            y: 0,
            shape,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    pub fn rotation(&self) -> Rotation {
        self.shape.rotation()
    }

    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> ArrayVec<(i32, i32), MAX_CELLS> {
        self.shape
            .cells()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    pub fn fits(&self, board: &Board) -> bool {
        is_legal(board, &self.shape, self.x, self.y)
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Option<ActivePiece>,
    piece_queue: PieceQueue,
    score: u32,
    level: u32,
    lines: u32,
    gravity_timer_ms: u32,
    state: PlayState,
    started: bool,
    /// Increments on every new game after the first.
    games_played: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a game on an empty board. Call [`GameState::start`] to spawn the
    /// first piece.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.columns, config.rows),
            active: None,
            piece_queue: PieceQueue::new(config.seed),
            score: 0,
            level: 1,
            lines: 0,
            gravity_timer_ms: 0,
            state: PlayState::Falling,
            started: false,
            games_played: 0,
            last_event: None,
            config,
        })
    }

    /// Create a game on a pre-filled board.
    ///
    /// The board's dimensions replace `columns`/`rows` from `config`.
    pub fn from_board(config: EngineConfig, board: Board) -> Result<Self, ConfigError> {
        let config = EngineConfig {
            columns: board.width(),
            rows: board.height(),
            ..config
        };
        let mut state = Self::new(config)?;
        state.board = board;
        Ok(state)
    }

    /// Spawn the first piece. No-op once started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn paused(&self) -> bool {
        self.state == PlayState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.state == PlayState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn next_piece(&self) -> PieceKind {
        self.piece_queue.peek()
    }

    /// Force the next spawned pieces, in order, ahead of the randomizer.
    pub fn script_pieces(&mut self, kinds: impl IntoIterator<Item = PieceKind>) {
        for kind in kinds {
            self.piece_queue.push_scripted(kind);
        }
    }

    /// Milliseconds accumulated toward the next gravity step
    pub fn gravity_timer_ms(&self) -> u32 {
        self.gravity_timer_ms
    }

    /// Current gravity interval based on level
    pub fn gravity_interval_ms(&self) -> u32 {
        get_gravity_interval_ms(
            self.level,
            self.config.base_gravity_ms,
            self.config.min_gravity_ms,
        )
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.columns = self.board.width();
        out.rows = self.board.height();
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.piece_queue.peek();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.state = self.state;
        out.gravity_interval_ms = self.gravity_interval_ms();
        out.games_played = self.games_played;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece from the queue; ends the game if it does not fit.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.piece_queue.draw();
        let piece = ActivePiece::spawn(kind, self.board.width());

        if !piece.fits(&self.board) {
            self.active = None;
            self.state = PlayState::GameOver;
            info!(
                "game over: {:?} blocked at spawn (score {}, level {}, lines {})",
                kind, self.score, self.level, self.lines
            );
            return false;
        }

        debug!("spawned {:?} at ({}, {})", kind, piece.x, piece.y);
        self.active = Some(piece);
        self.gravity_timer_ms = 0;
        true
    }

    /// Try to move the active piece; illegal moves change nothing
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if moved.fits(&self.board) {
            self.active = Some(moved);
            return true;
        }

        false
    }

    /// Rotate the active piece with horizontal kicks.
    ///
    /// When no kicked position fits, the piece keeps its previous matrix,
    /// rotation and position.
    pub fn try_rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&self.board, &active, direction) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// One row of gravity: move down, or lock when blocked.
    ///
    /// Returns true if the piece moved, false if it locked.
    pub fn step_down(&mut self) -> bool {
        self.gravity_timer_ms = 0;
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// Drop the active piece to the lowest legal row and lock it.
    ///
    /// Returns the number of rows fallen. Terminates within the board height.
    pub fn hard_drop(&mut self) -> u32 {
        if self.active.is_none() {
            return 0;
        }

        let mut distance = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }

        self.lock_piece();
        distance
    }

    /// Lock the active piece, clear full rows, score, and spawn the next piece
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let lines_cleared = self.board.lock_and_clear(active.cells(), active.kind()) as u32;

        let points = calculate_line_score(lines_cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines_cleared);

        let level = calculate_level(self.score, self.config.level_score_step).max(self.level);
        if level > self.level {
            info!("level {} -> {} at score {}", self.level, level, self.score);
            self.level = level;
        }

        debug!(
            "locked {:?} at ({}, {}): {} line(s), +{} points",
            active.kind(),
            active.x,
            active.y,
            lines_cleared,
            points
        );

        let spawned = self.spawn_piece();

        self.last_event = Some(LockEvent {
            lines_cleared,
            points,
            level_after: self.level,
            game_over: !spawned,
        });
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Row the active piece would lock at after a hard drop
    pub fn ghost_y(&self) -> Option<i32> {
        let mut ghost = self.active?;
        while ghost.shifted(0, 1).fits(&self.board) {
            ghost = ghost.shifted(0, 1);
        }
        Some(ghost.y)
    }

    /// Advance the gravity clock.
    ///
    /// Applies at most one gravity step per call, when the accumulated time
    /// reaches the current interval. Ignored unless falling.
    /// Returns true when a gravity step was applied.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.started || self.state != PlayState::Falling || self.active.is_none() {
            return false;
        }

        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);
        if self.gravity_timer_ms < self.gravity_interval_ms() {
            return false;
        }

        self.step_down();
        true
    }

    /// Discard the current game and start a new one with the same configuration.
    ///
    /// The randomizer keeps running, so consecutive games get different pieces.
    pub fn new_game(&mut self) {
        self.board = Board::new(self.config.columns, self.config.rows);
        self.active = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.gravity_timer_ms = 0;
        self.state = PlayState::Falling;
        self.last_event = None;
        if self.started {
            self.games_played = self.games_played.wrapping_add(1);
        }
        info!("new game ({}x{})", self.config.columns, self.config.rows);
        self.started = true;
        self.spawn_piece();
    }

    /// Apply a command.
    ///
    /// Returns true if the command was accepted and changed the game.
    /// After game over only `NewGame` is accepted; while paused only `Resume`
    /// and `NewGame` are.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match (self.state, command) {
            (_, Command::NewGame) => {
                self.new_game();
                true
            }
            _ if !self.started => false,
            (PlayState::GameOver, _) => false,
            (PlayState::Paused, Command::Resume) => {
                self.state = PlayState::Falling;
                true
            }
            (PlayState::Paused, _) => false,
            (PlayState::Falling, Command::Pause) => {
                self.state = PlayState::Paused;
                true
            }
            (PlayState::Falling, Command::Resume) => false,
            (PlayState::Falling, Command::MoveLeft) => self.try_move(-1, 0),
            (PlayState::Falling, Command::MoveRight) => self.try_move(1, 0),
            (PlayState::Falling, Command::RotateCw) => self.try_rotate(RotateDirection::Clockwise),
            (PlayState::Falling, Command::RotateCcw) => {
                self.try_rotate(RotateDirection::CounterClockwise)
            }
            (PlayState::Falling, Command::SoftDrop) => {
                if self.active.is_none() {
                    return false;
                }
                self.step_down();
                true
            }
            (PlayState::Falling, Command::HardDrop) => {
                if self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
        }
    }
}
