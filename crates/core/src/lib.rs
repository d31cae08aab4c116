//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rhythm game rules as a reducer over an immutable
//! state. It has **zero dependencies** on terminals, audio, or I/O:
//!
//! - **Deterministic**: the same action sequence always yields the same states
//! - **Total**: every action is accepted in every state; invalid ones are no-ops
//! - **Testable**: rules are exercised directly through [`GameState::apply`]
//!
//! # Module Structure
//!
//! - [`game_state`]: the state aggregate, its transitions and their outboxes
//! - [`rng`]: hash sequence used for filler notes
//! - [`scoring`]: score rounding and multiplier growth
//! - [`snapshot`]: plain-data view consumed by renderers
//!
//! # Game Rules
//!
//! - Markers fall one canvas unit per tick towards the hit line at `y = 350`
//! - A press within `NOTE_RADIUS` of the line is a **hit** (score, streak)
//! - A press within twice that is an **align** (score only, note cut short)
//! - Anything else plays a synthesized filler note
//! - A marker that falls past the line is a **miss**: streak and multiplier reset
//! - Every tenth consecutive hit raises the multiplier by 0.2
//! - Long notes leave a sustain tail; releasing as it drains scores once more
//!
//! # Example
//!
//! ```
//! use tui_rhythm_core::GameState;
//! use tui_rhythm_types::{Column, GameAction, Instrument, Marker, NoteData, CANVAS_BORDER};
//!
//! let note = NoteData::from_midi(true, Instrument::Piano, 100, 60, 0.0, 0.5);
//! let marker = Marker::spawn(0, note, Column::H).at(CANVAS_BORDER - 1.0);
//!
//! let state = GameState::new().apply(GameAction::AddMarker(marker)).state;
//! let t = state.apply(GameAction::PressNote { column: Column::H, random: 0.5 });
//!
//! assert_eq!(t.state.hit_score(), 1.0);
//! assert_eq!(t.state.streak(), 1);
//! assert_eq!(t.outbox.play_exit, vec![note]);
//! ```

pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_rhythm_types as types;

// Re-export commonly used types for convenience
pub use game_state::{filler_note, GameState, Outbox, Phase, Transition};
pub use rng::Lcg;
pub use scoring::{next_multiplier, rounded_sum};
pub use snapshot::{GameSnapshot, MarkerSnapshot, TailSnapshot};
