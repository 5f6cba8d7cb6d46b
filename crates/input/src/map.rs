//! Key mapping from terminal events to engine commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{Command, PlayState};

/// Map a key press to a command for a game currently in `state`.
///
/// `p` toggles: it pauses a falling game and resumes a paused one.
/// Key releases are ignored, and so are piece movements unless the game
/// is falling.
pub fn handle_key_event(key: KeyEvent, state: PlayState) -> Option<Command> {
    let command = map_key(key, state)?;
    if command.is_movement() && state != PlayState::Falling {
        return None;
    }
    Some(command)
}

fn map_key(key: KeyEvent, state: PlayState) -> Option<Command> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let ch = match key.code {
        KeyCode::Left => return Some(Command::MoveLeft),
        KeyCode::Right => return Some(Command::MoveRight),
        KeyCode::Down => return Some(Command::SoftDrop),
        KeyCode::Up => return Some(Command::RotateCw),
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };

    match ch {
        'h' | 'a' => Some(Command::MoveLeft),
        'l' | 'd' => Some(Command::MoveRight),
        'j' | 's' => Some(Command::SoftDrop),
        'k' | 'w' => Some(Command::RotateCw),
        'z' | 'y' => Some(Command::RotateCcw),
        ' ' => Some(Command::HardDrop),
        'p' => match state {
            PlayState::Paused => Some(Command::Resume),
            _ => Some(Command::Pause),
        },
        'r' => Some(Command::NewGame),
        _ => None,
    }
}

/// Check if key should quit the host.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> Option<Command> {
        handle_key_event(KeyEvent::from(code), PlayState::Falling)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(press(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(press(KeyCode::Down), Some(Command::SoftDrop));

        assert_eq!(press(KeyCode::Char('H')), Some(Command::MoveLeft));
        assert_eq!(press(KeyCode::Char('a')), Some(Command::MoveLeft));
        assert_eq!(press(KeyCode::Char('D')), Some(Command::MoveRight));
        assert_eq!(press(KeyCode::Char('j')), Some(Command::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(press(KeyCode::Up), Some(Command::RotateCw));
        assert_eq!(press(KeyCode::Char('W')), Some(Command::RotateCw));
        assert_eq!(press(KeyCode::Char('z')), Some(Command::RotateCcw));
        assert_eq!(press(KeyCode::Char('Y')), Some(Command::RotateCcw));
    }

    #[test]
    fn test_drop_and_game_keys() {
        assert_eq!(press(KeyCode::Char(' ')), Some(Command::HardDrop));
        assert_eq!(press(KeyCode::Char('r')), Some(Command::NewGame));
        assert_eq!(press(KeyCode::Char('x')), None);
        assert_eq!(press(KeyCode::Enter), None);
    }

    #[test]
    fn test_pause_key_toggles() {
        let p = KeyEvent::from(KeyCode::Char('p'));
        assert_eq!(handle_key_event(p, PlayState::Falling), Some(Command::Pause));
        assert_eq!(handle_key_event(p, PlayState::Paused), Some(Command::Resume));
        // Rejected by the engine after game over, but still a valid request.
        assert_eq!(handle_key_event(p, PlayState::GameOver), Some(Command::Pause));
    }

    #[test]
    fn test_movement_dropped_unless_falling() {
        for state in [PlayState::Paused, PlayState::GameOver] {
            for code in [KeyCode::Left, KeyCode::Up, KeyCode::Char(' '), KeyCode::Char('z')] {
                assert_eq!(handle_key_event(KeyEvent::from(code), state), None);
            }
            let r = KeyEvent::from(KeyCode::Char('r'));
            assert_eq!(handle_key_event(r, state), Some(Command::NewGame));
        }
    }

    #[test]
    fn test_release_and_control_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release, PlayState::Falling), None);

        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_s, PlayState::Falling), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
