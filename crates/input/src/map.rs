//! Key mapping from terminal events to game actions.
//!
//! | keys | action |
//! |------|--------|
//! | arrows, `w a s d` | move up/left/down/right |
//! | `y u b n` | move up-left/up-right/down-left/down-right |
//! | `z` | undo |
//! | `p` | pause/resume |
//! | `r` | restart level |
//! | `Enter` | next level (after completing one) |
//! | `1` `2` | select level |

use crate::types::{Direction, GameAction, LevelId};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let KeyCode::Char(c) = key.code else {
        return match key.code {
            KeyCode::Up => Some(GameAction::Move(Direction::Up)),
            KeyCode::Down => Some(GameAction::Move(Direction::Down)),
            KeyCode::Left => Some(GameAction::Move(Direction::Left)),
            KeyCode::Right => Some(GameAction::Move(Direction::Right)),
            KeyCode::Enter => Some(GameAction::NextLevel),
            _ => None,
        };
    };

    match c.to_ascii_lowercase() {
        // Orthogonal
        'w' => Some(GameAction::Move(Direction::Up)),
        's' => Some(GameAction::Move(Direction::Down)),
        'a' => Some(GameAction::Move(Direction::Left)),
        'd' => Some(GameAction::Move(Direction::Right)),

        // Diagonal
        'y' => Some(GameAction::Move(Direction::UpLeft)),
        'u' => Some(GameAction::Move(Direction::UpRight)),
        'b' => Some(GameAction::Move(Direction::DownLeft)),
        'n' => Some(GameAction::Move(Direction::DownRight)),

        'z' => Some(GameAction::Undo),
        'p' => Some(GameAction::Pause),
        'r' => Some(GameAction::Restart),

        digit @ '1'..='9' => {
            let number = digit.to_digit(10)? as u8;
            LevelId::from_number(number).map(GameAction::SelectLevel)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn press(c: char) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(KeyCode::Char(c)))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::Move(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::Move(Direction::Up))
        );
        assert_eq!(press('S'), Some(GameAction::Move(Direction::Down)));
        assert_eq!(press('d'), Some(GameAction::Move(Direction::Right)));
    }

    #[test]
    fn test_diagonal_keys() {
        assert_eq!(press('y'), Some(GameAction::Move(Direction::UpLeft)));
        assert_eq!(press('u'), Some(GameAction::Move(Direction::UpRight)));
        assert_eq!(press('B'), Some(GameAction::Move(Direction::DownLeft)));
        assert_eq!(press('n'), Some(GameAction::Move(Direction::DownRight)));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(press('z'), Some(GameAction::Undo));
        assert_eq!(press('p'), Some(GameAction::Pause));
        assert_eq!(press('R'), Some(GameAction::Restart));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(GameAction::NextLevel)
        );
        assert_eq!(press('x'), None);
    }

    #[test]
    fn test_level_keys() {
        assert_eq!(press('1'), Some(GameAction::SelectLevel(LevelId::One)));
        assert_eq!(press('2'), Some(GameAction::SelectLevel(LevelId::Two)));
        assert_eq!(press('3'), None);
    }

    #[test]
    fn test_release_and_ctrl_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('w'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release), None);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
