use std::time::Duration;

use blockfall::core::{Board, EngineConfig, GameState};
use blockfall::engine::{spawn_engine, spawn_engine_with, Engine, EngineError, RuntimeOptions};
use blockfall::types::{Command, PieceKind, PlayState};

fn manual_clock() -> RuntimeOptions {
    RuntimeOptions {
        tick: None,
        ..RuntimeOptions::default()
    }
}

#[tokio::test]
async fn spawn_engine_rejects_bad_config() {
    let err = spawn_engine(EngineConfig {
        rows: 0,
        ..EngineConfig::default()
    })
    .unwrap_err();
    assert!(matches!(err, EngineError::Config(_)), "{err}");
}

#[tokio::test]
async fn producers_share_one_ordered_queue() {
    let mut game = GameState::new(EngineConfig::new(8, 4, 1000).unwrap()).unwrap();
    game.script_pieces([PieceKind::O, PieceKind::T]);
    let (mut reader, _task) = spawn_engine_with(Engine::from_game(game), manual_clock());

    let input = reader.clone();
    let clock = reader.clone();
    input.command(Command::MoveLeft).await.unwrap();
    clock.tick(1000).await.unwrap();
    input.command(Command::HardDrop).await.unwrap();

    let mut snap = reader.snapshot();
    while snap.active.map(|a| a.kind) != Some(PieceKind::T) {
        snap = tokio::time::timeout(Duration::from_secs(2), reader.changed())
            .await
            .unwrap()
            .unwrap();
    }
    // Left, down one, then dropped: O locked at columns 2..=3 on the floor.
    assert_eq!(snap.cell(2, 3), PieceKind::O.id());
    assert_eq!(snap.cell(3, 2), PieceKind::O.id());
    assert_eq!(snap.cell(4, 3), 0);
}

#[tokio::test]
async fn game_over_is_published() {
    let board = Board::from_pattern(&["........", "...##...", "...##...", "...##..."]);
    let mut game = GameState::from_board(EngineConfig::default(), board).unwrap();
    game.script_pieces([PieceKind::O, PieceKind::O]);
    let (handle, _task) = spawn_engine_with(Engine::from_game(game), manual_clock());

    assert_eq!(handle.snapshot().state, PlayState::GameOver);
    handle.command(Command::NewGame).await.unwrap();

    let mut handle = handle;
    let snap = handle.changed().await.unwrap();
    assert_eq!(snap.state, PlayState::Falling);
    assert_eq!(snap.games_played, 1);
}

#[tokio::test]
async fn try_command_reports_busy_queue() {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let (handle, _task) = spawn_engine_with(
        engine,
        RuntimeOptions {
            tick: None,
            queue_capacity: 1,
        },
    );

    // The consumer cannot run until this task yields, so the second send
    // finds the single slot taken.
    handle.try_command(Command::MoveLeft).unwrap();
    assert!(matches!(
        handle.try_command(Command::MoveLeft),
        Err(EngineError::Busy)
    ));
}

#[test]
fn sync_host_round_trip() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let mut handle = rt.block_on(async {
        let mut game = GameState::new(EngineConfig::new(8, 4, 1000).unwrap()).unwrap();
        game.script_pieces([PieceKind::O]);
        spawn_engine_with(Engine::from_game(game), manual_clock()).0
    });

    rt.block_on(handle.command(Command::Pause)).unwrap();
    let snap = rt.block_on(handle.changed()).unwrap();
    assert_eq!(snap.state, PlayState::Paused);

    // tokio-test drives futures that need no reactor.
    assert_eq!(tokio_test::block_on(async { handle.snapshot() }).state, PlayState::Paused);
}
