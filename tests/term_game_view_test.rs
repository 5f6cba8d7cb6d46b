use blockfall::core::{Board, EngineConfig, GameState};
use blockfall::engine::Engine;
use blockfall::term::{FrameBuffer, GameView, Rgb, Viewport};
use blockfall::types::{Command, PieceKind};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = Engine::new_game(10, 20, 1000).unwrap().snapshot();
    let view = GameView::default();

    // 10 cells x 2 chars + border = 22 wide, 20 rows + border = 22 tall.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_two_chars_wide() {
    let mut game = GameState::from_board(
        EngineConfig::default(),
        Board::from_pattern(&["....", "....", "l..."]),
    )
    .unwrap();
    game.start();
    let mut snap = game.snapshot();
    snap.active = None;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, Viewport::new(10, 5));
    let row = 1 + 2;
    assert_eq!(fb.get(1, row).unwrap().ch, '█');
    assert_eq!(fb.get(2, row).unwrap().ch, '█');
    assert_eq!(fb.get(1, row).unwrap().style.fg, Rgb::for_piece(PieceKind::L));
}

#[test]
fn term_view_draws_active_and_ghost() {
    let mut game = GameState::new(EngineConfig::new(8, 6, 1000).unwrap()).unwrap();
    game.script_pieces([PieceKind::O]);
    game.start();
    let snap = game.snapshot();
    assert_eq!(snap.ghost_y, Some(4));

    let view = GameView::default();
    let viewport = Viewport::new(18, 8);
    let layout = view.layout(&snap, viewport);
    let fb = view.render(&snap, viewport);

    // O at columns 3..=4: active on rows 0..=1, ghost on rows 4..=5.
    let sx = layout.frame_x + 1 + 3 * 2;
    assert_eq!(fb.get(sx, layout.frame_y + 1).unwrap().ch, '█');
    assert_eq!(fb.get(sx, layout.frame_y + 1 + 4).unwrap().ch, '░');
    assert_eq!(fb.get(sx, layout.frame_y + 1 + 2).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = Engine::new_game(10, 20, 1000).unwrap().snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let text = screen_text(&fb);
    assert!(text.contains("NEXT"));
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("LINES"));
}

#[test]
fn term_view_shows_overlays() {
    let mut engine = Engine::new_game(10, 20, 1000).unwrap();
    let view = GameView::default();
    let viewport = Viewport::new(60, 24);

    engine.command(Command::Pause);
    assert!(screen_text(&view.render(&engine.snapshot(), viewport)).contains("PAUSED"));

    engine.command(Command::Resume);
    assert!(!screen_text(&view.render(&engine.snapshot(), viewport)).contains("PAUSED"));

    while engine.command(Command::HardDrop) {}
    assert!(screen_text(&view.render(&engine.snapshot(), viewport)).contains("GAME OVER"));
}

#[test]
fn term_view_centers_board_on_tall_viewports() {
    let snap = Engine::new_game(10, 20, 1000).unwrap().snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // (30 - 22) / 2 = 4
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}
