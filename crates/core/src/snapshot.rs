//! Read-only view of the game state for renderers.

use crate::types::{Column, Marker, Tail};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSnapshot {
    pub column: Column,
    pub y: f64,
    pub has_tail: bool,
}

impl From<&Marker> for MarkerSnapshot {
    fn from(value: &Marker) -> Self {
        Self {
            column: value.column,
            y: value.y,
            has_tail: value.has_tail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailSnapshot {
    pub column: Column,
    pub y1: f64,
    pub y2: f64,
    pub played: bool,
}

impl From<&Tail> for TailSnapshot {
    fn from(value: &Tail) -> Self {
        Self {
            column: value.column,
            y1: value.y1,
            y2: value.y2,
            played: value.has_played,
        }
    }
}

/// Everything a frame needs, reusable across frames
///
/// `high_score` and `flashes` are not part of the game state; the session
/// fills them in after [`GameState::snapshot_into`](crate::GameState::snapshot_into).
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub markers: Vec<MarkerSnapshot>,
    pub tails: Vec<TailSnapshot>,
    /// Columns where a body just left the playfield
    pub flashes: [bool; 4],
    pub hit_score: f64,
    pub miss_score: u32,
    pub multiplier: f64,
    pub streak: u32,
    pub high_score: f64,
    pub game_end: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_end
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            tails: Vec::new(),
            flashes: [false; 4],
            hit_score: 0.0,
            miss_score: 0,
            multiplier: 1.0,
            streak: 0,
            high_score: 0.0,
            game_end: false,
        }
    }
}
