//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, sound output).
//!
//! # Playfield Geometry
//!
//! Positions live on a logical canvas, independent of the terminal size:
//!
//! - **Width**: 200 units, four columns at 20%, 40%, 60% and 80%
//! - **Height**: 400 units, markers spawn at `y = 0` and fall downwards
//! - **Hit line**: `y = 350` (`CANVAS_BORDER`)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 5 | Fixed timestep interval |
//! | `FRAME_MS` | 16 | Minimum interval between rendered frames |
//! | `NOTE_SPEED` | 1 | Canvas units travelled per tick |
//! | `TAIL_MIN_DURATION_S` | 1 | Notes longer than this get a sustain tail |
//!
//! A marker therefore needs `350 * 5 = 1750ms` to reach the hit line.
//!
//! # Scoring Constants
//!
//! - `DEFAULT_MULTIPLIER`: 1.0, restored on every miss
//! - `MULTIPLIER_INCREMENT`: 0.2, applied every `STREAK_STEP` (10) hits
//!
//! # Examples
//!
//! ```
//! use tui_rhythm_types::{Column, Instrument, NOTE_RADIUS};
//!
//! let column = Column::from_key('k').unwrap();
//! assert_eq!(column, Column::K);
//! assert_eq!(column.x_percent(), 60);
//!
//! assert_eq!(Instrument::from_str("piano"), Some(Instrument::Piano));
//! assert_eq!(NOTE_RADIUS, 14.0);
//! ```

pub mod action;
pub mod note;

pub use action::GameAction;
pub use note::{BodyId, BodyRef, Marker, NoteData, PlayNote, Tail};

/// Fixed timestep interval in milliseconds
pub const TICK_MS: u32 = 5;

/// Minimum interval between two rendered frames (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// Logical canvas width
pub const CANVAS_WIDTH: f64 = 200.0;

/// Logical canvas height
pub const CANVAS_HEIGHT: f64 = 400.0;

/// Vertical position of the hit line
pub const CANVAS_BORDER: f64 = 350.0;

/// Marker radius (7% of the canvas width)
pub const NOTE_RADIUS: f64 = 14.0;

/// Distance travelled by every falling body per tick
pub const NOTE_SPEED: f64 = 1.0;

/// Notes lasting longer than this (seconds) spawn a sustain tail
pub const TAIL_MIN_DURATION_S: f64 = 1.0;

/// Largest MIDI value (velocity and pitch)
pub const MIDI_MAX_VALUE: u8 = 127;

/// Raw MIDI velocity used for synthesized filler notes
pub const DEFAULT_VELOCITY: u8 = 8;

pub const DEFAULT_MULTIPLIER: f64 = 1.0;

pub const MULTIPLIER_INCREMENT: f64 = 0.2;

/// The multiplier grows each time the streak reaches a multiple of this
pub const STREAK_STEP: u32 = 10;

pub const STARTING_SCORE: f64 = 0.0;

pub const STARTING_STREAK: u32 = 0;


/// The four play columns
///
/// Each column sits at a fixed horizontal percentage of the canvas and is
/// played with one key:
/// - **H**: 20%, limegreen
/// - **J**: 40%, red
/// - **K**: 60%, blue
/// - **L**: 80%, yellow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    H,
    J,
    K,
    L,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::H, Column::J, Column::K, Column::L];

    /// Zero-based column index (left to right)
    pub fn index(&self) -> usize {
        match self {
            Column::H => 0,
            Column::J => 1,
            Column::K => 2,
            Column::L => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Horizontal position as a percentage of the canvas width
    pub fn x_percent(&self) -> u8 {
        20 * (self.index() as u8 + 1)
    }

    /// Starting seed of the per-column random sequence
    pub fn seed(&self) -> u64 {
        self.index() as u64
    }

    /// Lowercase key character bound to this column
    pub fn key(&self) -> char {
        match self {
            Column::H => 'h',
            Column::J => 'j',
            Column::K => 'k',
            Column::L => 'l',
        }
    }

    /// Parse a key character (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_rhythm_types::Column;
    ///
    /// assert_eq!(Column::from_key('H'), Some(Column::H));
    /// assert_eq!(Column::from_key('l'), Some(Column::L));
    /// assert_eq!(Column::from_key('r'), None);
    /// ```
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'h' => Some(Column::H),
            'j' => Some(Column::J),
            'k' => Some(Column::K),
            'l' => Some(Column::L),
            _ => None,
        }
    }
}

/// Sample instruments a note can be played with
///
/// The string forms match the sample library names used in score files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    BassElectric,
    Bassoon,
    Cello,
    Clarinet,
    Contrabass,
    Flute,
    FrenchHorn,
    GuitarAcoustic,
    GuitarElectric,
    GuitarNylon,
    Harmonium,
    Harp,
    Organ,
    Piano,
    Saxophone,
    Trombone,
    Trumpet,
    Tuba,
    Violin,
    Xylophone,
}

impl Instrument {
    pub const ALL: [Instrument; 20] = [
        Instrument::BassElectric,
        Instrument::Bassoon,
        Instrument::Cello,
        Instrument::Clarinet,
        Instrument::Contrabass,
        Instrument::Flute,
        Instrument::FrenchHorn,
        Instrument::GuitarAcoustic,
        Instrument::GuitarElectric,
        Instrument::GuitarNylon,
        Instrument::Harmonium,
        Instrument::Harp,
        Instrument::Organ,
        Instrument::Piano,
        Instrument::Saxophone,
        Instrument::Trombone,
        Instrument::Trumpet,
        Instrument::Tuba,
        Instrument::Violin,
        Instrument::Xylophone,
    ];

    /// Instrument at `index`, clamped to the last entry
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Parse a sample library name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|i| i.as_str() == lower)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::BassElectric => "bass-electric",
            Instrument::Bassoon => "bassoon",
            Instrument::Cello => "cello",
            Instrument::Clarinet => "clarinet",
            Instrument::Contrabass => "contrabass",
            Instrument::Flute => "flute",
            Instrument::FrenchHorn => "french-horn",
            Instrument::GuitarAcoustic => "guitar-acoustic",
            Instrument::GuitarElectric => "guitar-electric",
            Instrument::GuitarNylon => "guitar-nylon",
            Instrument::Harmonium => "harmonium",
            Instrument::Harp => "harp",
            Instrument::Organ => "organ",
            Instrument::Piano => "piano",
            Instrument::Saxophone => "saxophone",
            Instrument::Trombone => "trombone",
            Instrument::Trumpet => "trumpet",
            Instrument::Tuba => "tuba",
            Instrument::Violin => "violin",
            Instrument::Xylophone => "xylophone",
        }
    }
}
