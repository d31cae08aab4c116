//! Press/hold input handler for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;
use tui_rhythm_core::Lcg;

use crate::map::column_for_key;
use crate::types::{Column, GameAction};

// Without release events a held key only shows up as auto-repeat presses, so
// a column is considered released once repeats stop for this long.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 600;

#[derive(Debug, Clone)]
struct ColumnInput {
    held: bool,
    idle_ms: u32,
    sequence: Lcg,
}

/// Tracks held columns and the per-column random sequences.
#[derive(Debug, Clone)]
pub struct InputHandler {
    columns: [ColumnInput; 4],
    key_release_timeout_ms: u32,
    release_events: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            columns: Column::ALL.map(|c| ColumnInput {
                held: false,
                idle_ms: 0,
                sequence: Lcg::new(c.seed()),
            }),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Whether the terminal reports key releases; when it does the timeout is unused
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn is_held(&self, column: Column) -> bool {
        self.columns[column.index()].held
    }

    /// Press or auto-repeat. Only the first press of a held column yields an action.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let column = column_for_key(code)?;
        let input = &mut self.columns[column.index()];
        input.idle_ms = 0;
        if input.held {
            return None;
        }
        input.held = true;
        let random = input.sequence.next_unit();
        log::trace!("press {column:?} r={random:.4}");
        Some(GameAction::PressNote { column, random })
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameAction> {
        let column = column_for_key(code)?;
        self.release(column)
    }

    /// Advance the release timers, returning timed-out releases
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 4> {
        let mut actions = ArrayVec::<GameAction, 4>::new();
        if self.release_events {
            return actions;
        }

        for column in Column::ALL {
            let input = &mut self.columns[column.index()];
            if !input.held {
                continue;
            }
            input.idle_ms = input.idle_ms.saturating_add(elapsed_ms);
            if input.idle_ms > self.key_release_timeout_ms {
                if let Some(action) = self.release(column) {
                    actions.push(action);
                }
            }
        }
        actions
    }

    /// Forget held keys without emitting releases
    pub fn clear_held(&mut self) {
        for input in &mut self.columns {
            input.held = false;
            input.idle_ms = 0;
        }
    }

    fn release(&mut self, column: Column) -> Option<GameAction> {
        let input = &mut self.columns[column.index()];
        if !input.held {
            return None;
        }
        input.held = false;
        input.idle_ms = 0;
        Some(GameAction::HoldTail { column })
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_of(action: Option<GameAction>) -> f64 {
        match action {
            Some(GameAction::PressNote { random, .. }) => random,
            other => panic!("expected a press, got {other:?}"),
        }
    }

    #[test]
    fn test_first_press_uses_column_sequence() {
        let mut handler = InputHandler::new();

        let h = random_of(handler.handle_key_press(KeyCode::Char('h')));
        let j = random_of(handler.handle_key_press(KeyCode::Char('j')));
        assert!((h - 0.999988502822811).abs() < 1e-12);
        assert!((j - 0.027740156756592915).abs() < 1e-12);
    }

    #[test]
    fn test_repeats_are_filtered() {
        let mut handler = InputHandler::new();

        assert!(handler.handle_key_press(KeyCode::Char('k')).is_some());
        assert!(handler.handle_key_press(KeyCode::Char('k')).is_none());
        assert!(handler.handle_key_press(KeyCode::Char('K')).is_none());
        assert!(handler.is_held(Column::K));
    }

    #[test]
    fn test_release_emits_hold_tail_once() {
        let mut handler = InputHandler::new();
        handler.handle_key_press(KeyCode::Char('l'));

        assert_eq!(
            handler.handle_key_release(KeyCode::Char('l')),
            Some(GameAction::HoldTail { column: Column::L })
        );
        assert_eq!(handler.handle_key_release(KeyCode::Char('l')), None);
        assert_eq!(handler.handle_key_release(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_sequence_continues_after_release() {
        let mut handler = InputHandler::new();
        let first = random_of(handler.handle_key_press(KeyCode::Char('h')));
        handler.handle_key_release(KeyCode::Char('h'));
        let second = random_of(handler.handle_key_press(KeyCode::Char('h')));

        let mut expected = Lcg::new(Column::H.seed());
        assert_eq!(first, expected.next_unit());
        assert_eq!(second, expected.next_unit());
    }

    #[test]
    fn test_timeout_releases_without_events() {
        let mut handler = InputHandler::new().with_key_release_timeout_ms(100);
        handler.handle_key_press(KeyCode::Char('j'));

        assert!(handler.update(60).is_empty());
        // A repeat keeps the key held.
        handler.handle_key_press(KeyCode::Char('j'));
        assert!(handler.update(60).is_empty());

        let released = handler.update(60);
        assert_eq!(released.as_slice(), &[GameAction::HoldTail { column: Column::J }]);
        assert!(!handler.is_held(Column::J));
    }

    #[test]
    fn test_no_timeout_with_release_events() {
        let mut handler = InputHandler::new()
            .with_key_release_timeout_ms(10)
            .with_release_events(true);
        handler.handle_key_press(KeyCode::Char('h'));

        assert!(handler.update(1_000).is_empty());
        assert!(handler.is_held(Column::H));
    }

    #[test]
    fn test_clear_held() {
        let mut handler = InputHandler::new();
        handler.handle_key_press(KeyCode::Char('h'));
        handler.clear_held();

        assert!(!handler.is_held(Column::H));
        assert!(handler.handle_key_press(KeyCode::Char('h')).is_some());
    }
}
