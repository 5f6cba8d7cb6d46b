//! Async engine runtime.
//!
//! One consumer task owns the [`Engine`]. A gravity clock task and any number
//! of [`EngineHandle`]s feed it intents through a single bounded channel; after
//! each intent that changes the game the consumer publishes a fresh snapshot
//! on a watch channel, so readers only ever see complete states.

use std::time::Duration;

use log::{debug, info};
use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use blockfall_core::{ConfigError, EngineConfig, GameSnapshot};
use blockfall_types::{Command, PlayState, TICK_MS};

use crate::queue::{Engine, Intent};

const DEFAULT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("engine has stopped")]
    Closed,
    #[error("engine queue is full")]
    Busy,
}

#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Gravity clock period; `None` leaves ticking to the caller.
    pub tick: Option<Duration>,
    pub queue_capacity: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            tick: Some(Duration::from_millis(TICK_MS as u64)),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Cloneable producer/reader side of a running engine.
///
/// The engine stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Intent>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
}

impl EngineHandle {
    pub async fn command(&self, command: Command) -> Result<(), EngineError> {
        self.send(Intent::Command(command)).await
    }

    /// Advance the clock by hand (used when the runtime has no clock task).
    pub async fn tick(&self, elapsed_ms: u32) -> Result<(), EngineError> {
        self.send(Intent::Tick(elapsed_ms)).await
    }

    async fn send(&self, intent: Intent) -> Result<(), EngineError> {
        self.tx.send(intent).await.map_err(|_| EngineError::Closed)
    }

    /// Enqueue without waiting; fails with [`EngineError::Busy`] when the queue is full.
    pub fn try_command(&self, command: Command) -> Result<(), EngineError> {
        self.tx
            .try_send(Intent::Command(command))
            .map_err(|err| match err {
                mpsc::error::TrySendError::Full(_) => EngineError::Busy,
                mpsc::error::TrySendError::Closed(_) => EngineError::Closed,
            })
    }

    /// Blocking enqueue for synchronous hosts. Must not be called from async code.
    pub fn blocking_command(&self, command: Command) -> Result<(), EngineError> {
        self.tx
            .blocking_send(Intent::Command(command))
            .map_err(|_| EngineError::Closed)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Copy the latest snapshot into `out`, reusing its allocation
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clone_from(&self.snapshot_rx.borrow());
    }

    /// Wait for a snapshot newer than the last one seen through this handle
    pub async fn changed(&mut self) -> Result<GameSnapshot, EngineError> {
        self.snapshot_rx
            .changed()
            .await
            .map_err(|_| EngineError::Closed)?;
        Ok(self.snapshot_rx.borrow_and_update().clone())
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Spawn a game from `config` on the current tokio runtime, with the gravity clock.
pub fn spawn_engine(config: EngineConfig) -> Result<EngineHandle, EngineError> {
    let engine = Engine::new(config)?;
    Ok(spawn_engine_with(engine, RuntimeOptions::default()).0)
}

/// Spawn a prepared engine on the current tokio runtime.
///
/// Returns the handle and the consumer task, which finishes once every
/// handle is dropped.
pub fn spawn_engine_with(engine: Engine, options: RuntimeOptions) -> (EngineHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(options.queue_capacity.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

    if let Some(period) = options.tick {
        tokio::spawn(run_clock(tx.downgrade(), snapshot_rx.clone(), period));
    }
    let consumer = tokio::spawn(run_consumer(engine, rx, snapshot_tx));

    (EngineHandle { tx, snapshot_rx }, consumer)
}

async fn run_consumer(
    mut engine: Engine,
    mut rx: mpsc::Receiver<Intent>,
    snapshot_tx: watch::Sender<GameSnapshot>,
) {
    while let Some(intent) = rx.recv().await {
        let changed = engine.apply(intent);
        if let Some(event) = engine.take_last_event() {
            debug!("lock event: {:?}", event);
        }
        // Rejected commands still publish so waiters observe the outcome.
        if changed || matches!(intent, Intent::Command(_)) {
            snapshot_tx.send_modify(|snapshot| engine.snapshot_into(snapshot));
        }
    }
    debug!("engine consumer stopped");
}

async fn run_clock(
    tx: mpsc::WeakSender<Intent>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
    period: Duration,
) {
    let elapsed_ms = period.as_millis().min(u32::MAX as u128) as u32;
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        let Some(tx) = tx.upgrade() else {
            break;
        };
        if snapshot_rx.borrow().state != PlayState::Falling {
            continue;
        }
        // A full queue drops the tick rather than stacking gravity.
        if let Err(mpsc::error::TrySendError::Closed(_)) = tx.try_send(Intent::Tick(elapsed_ms)) {
            break;
        }
    }
    debug!("engine clock stopped");
}

/// An engine running on its own tokio runtime, for synchronous hosts.
pub struct EngineRuntime {
    rt: Runtime,
    handle: EngineHandle,
}

impl EngineRuntime {
    pub fn start(config: EngineConfig) -> Result<Self, EngineError> {
        Self::start_with(Engine::new(config)?, RuntimeOptions::default())
    }

    pub fn start_with(engine: Engine, options: RuntimeOptions) -> Result<Self, EngineError> {
        let rt = Runtime::new()?;
        let (handle, _consumer) = {
            let _guard = rt.enter();
            spawn_engine_with(engine, options)
        };
        info!("engine runtime started");
        Ok(Self { rt, handle })
    }

    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    pub fn command(&self, command: Command) -> Result<(), EngineError> {
        self.handle.blocking_command(command)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.handle.snapshot()
    }

    /// Stop the clock and consumer, waiting up to `timeout` for them to finish
    pub fn shutdown(self, timeout: Duration) {
        let Self { rt, handle } = self;
        drop(handle);
        rt.shutdown_timeout(timeout);
    }
}
