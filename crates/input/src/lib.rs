//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. The
//! [`InputHandler`] turns raw press/repeat/release events into one
//! `PressNote` per key press and one `HoldTail` per release, falling back to a
//! timeout on terminals that never report releases.

pub mod handler;
pub mod map;

pub use tui_rhythm_types as types;

pub use handler::InputHandler;
pub use map::{column_for_key, handle_key_event, should_quit};
