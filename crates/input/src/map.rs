//! Key mapping from terminal events to game actions.

use crate::types::{Column, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Play column bound to a key (`h j k l`, either case)
pub fn column_for_key(code: KeyCode) -> Option<Column> {
    match code {
        KeyCode::Char(c) => Column::from_key(c),
        _ => None,
    }
}

/// Map stateless keys to game actions.
///
/// Column keys are not handled here: their actions depend on held state and
/// belong to [`InputHandler`](crate::InputHandler).
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_column_keys() {
        assert_eq!(column_for_key(KeyCode::Char('h')), Some(Column::H));
        assert_eq!(column_for_key(KeyCode::Char('J')), Some(Column::J));
        assert_eq!(column_for_key(KeyCode::Char('k')), Some(Column::K));
        assert_eq!(column_for_key(KeyCode::Char('L')), Some(Column::L));
        assert_eq!(column_for_key(KeyCode::Left), None);
        assert_eq!(column_for_key(KeyCode::Char('a')), None);
    }

    #[test]
    fn test_restart_key() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(GameAction::Restart)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(GameAction::Restart)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('h'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
