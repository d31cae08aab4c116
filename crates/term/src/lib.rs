//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids
//! widget/layout libraries and renders into a plain framebuffer that is then
//! diffed and flushed to the terminal.
//!
//! - [`game_view`]: snapshot to framebuffer, pure and unit-testable
//! - [`renderer`]: framebuffer to crossterm command stream
//! - [`fb`]: cells, colors and text helpers
//! - [`throttle`]: frame pacing

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod throttle;

pub use tui_rhythm_core as core;
pub use tui_rhythm_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{lane_color, FieldRect, GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
pub use throttle::{fingerprint, RenderThrottle};
