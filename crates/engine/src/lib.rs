//! Engine module - everything around the pure core
//!
//! The core crate knows the rules; this crate runs them against a song:
//!
//! - [`schedule`]: score file loading and validation
//! - [`driver`]: timed spawns and the end-of-song signal
//! - [`session`]: the action fold, sound routing and high-score submission
//! - [`sound`]: the sound capability and its implementations
//! - [`highscore`]: best-score persistence
//! - [`config`]: environment-driven runtime settings

pub mod config;
pub mod driver;
pub mod highscore;
pub mod schedule;
pub mod session;
pub mod sound;

pub use tui_rhythm_types as types;

pub use config::{Cli, GameConfig};
pub use driver::ScheduleDriver;
pub use highscore::{high_score, HighScoreStore};
pub use schedule::Song;
pub use session::Session;
pub use sound::{LogSound, RecordingSound, SilentSound, SoundEngine, SoundEvent};
