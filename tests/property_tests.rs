//! Property tests: placements stay legal and rotation has order four

use proptest::prelude::*;

use blockfall::core::pieces::get_shape;
use blockfall::core::{EngineConfig, GameState};
use blockfall::types::{Command, PieceKind};

fn any_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn any_command() -> impl Strategy<Value = Command> {
    prop::sample::select(vec![
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::RotateCw,
        Command::RotateCcw,
        Command::Pause,
        Command::Resume,
    ])
}

#[derive(Debug, Clone)]
enum Step {
    Tick(u32),
    Command(Command),
}

fn any_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (1u32..2000).prop_map(Step::Tick),
        any_command().prop_map(Step::Command),
    ]
}

proptest! {
    #[test]
    fn four_turns_restore_the_matrix(kind in any_kind(), clockwise in any::<bool>()) {
        let shape = get_shape(kind);
        let mut turned = shape;
        for _ in 0..4 {
            turned = if clockwise { turned.rotated_cw() } else { turned.rotated_ccw() };
        }
        prop_assert_eq!(turned, shape);
    }

    #[test]
    fn active_piece_never_leaves_bounds_or_overlaps(
        seed in any::<u32>(),
        columns in 4u16..14,
        rows in 4u16..24,
        steps in prop::collection::vec(any_step(), 0..300),
    ) {
        let config = EngineConfig::new(columns, rows, 200).unwrap().with_seed(seed);
        let mut game = GameState::new(config).unwrap();
        game.start();

        for step in steps {
            match step {
                Step::Tick(ms) => { game.tick(ms); }
                Step::Command(command) => { game.apply_command(command); }
            }

            if let Some(active) = game.active() {
                for (x, y) in active.cells() {
                    prop_assert!(x >= 0 && x < columns as i32, "x={} out of 0..{}", x, columns);
                    prop_assert!(y < rows as i32, "y={} below floor {}", y, rows);
                    if y >= 0 {
                        prop_assert!(!game.board().is_occupied(x, y), "overlap at ({}, {})", x, y);
                    }
                }
            }
            for y in 0..rows as usize {
                prop_assert!(!game.board().is_row_full(y), "full row {} left on board", y);
            }
        }
    }

    #[test]
    fn hard_drop_distance_is_bounded_by_height(
        seed in any::<u32>(),
        moves in prop::collection::vec(any_command(), 0..20),
    ) {
        let mut game = GameState::new(EngineConfig::default().with_seed(seed)).unwrap();
        game.start();
        for command in moves {
            if command != Command::HardDrop && command != Command::Pause {
                game.apply_command(command);
            }
        }
        if game.active().is_some() {
            let distance = game.hard_drop();
            prop_assert!(distance <= game.config().rows as u32);
        }
    }

    #[test]
    fn score_and_level_never_decrease(
        seed in any::<u32>(),
        steps in prop::collection::vec(any_step(), 0..300),
    ) {
        let mut game = GameState::new(EngineConfig::new(6, 8, 100).unwrap().with_seed(seed)).unwrap();
        game.start();
        let (mut score, mut level) = (0, 1);
        for step in steps {
            match step {
                Step::Tick(ms) => { game.tick(ms); }
                Step::Command(command) => { game.apply_command(command); }
            }
            prop_assert!(game.score() >= score);
            prop_assert!(game.level() >= level);
            score = game.score();
            level = game.level();
        }
    }
}
