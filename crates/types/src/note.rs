//! Note schedule entries and the falling bodies derived from them.

use std::fmt;

use crate::{
    Column, Instrument, CANVAS_BORDER, MIDI_MAX_VALUE, NOTE_RADIUS, NOTE_SPEED, TAIL_MIN_DURATION_S,
    TICK_MS,
};

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One entry of the musical score
///
/// Times are in seconds from the start of the song. `velocity` is already
/// normalised to `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteData {
    pub user_played: bool,
    pub instrument: Instrument,
    pub velocity: f64,
    pub pitch: u8,
    pub start: f64,
    pub end: f64,
}

impl NoteData {
    /// Build a note from raw MIDI values, normalising velocity by 127.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_rhythm_types::{Instrument, NoteData};
    ///
    /// let note = NoteData::from_midi(true, Instrument::Piano, 127, 60, 0.5, 1.0);
    /// assert_eq!(note.velocity, 1.0);
    /// assert_eq!(note.duration(), 0.5);
    /// ```
    pub fn from_midi(
        user_played: bool,
        instrument: Instrument,
        velocity: u8,
        pitch: u8,
        start: f64,
        end: f64,
    ) -> Self {
        Self {
            user_played,
            instrument,
            velocity: f64::from(velocity) / f64::from(MIDI_MAX_VALUE),
            pitch,
            start,
            end,
        }
    }

    /// Length of the note in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the note is long enough to need a sustain tail
    pub fn has_tail(&self) -> bool {
        self.duration() > TAIL_MIN_DURATION_S
    }

    /// Scientific pitch notation for the MIDI pitch (`60` is `C4`)
    ///
    /// ```
    /// use tui_rhythm_types::{Instrument, NoteData};
    ///
    /// let note = NoteData::from_midi(false, Instrument::Harp, 64, 69, 0.0, 1.0);
    /// assert_eq!(note.note_name(), "A4");
    /// ```
    pub fn note_name(&self) -> String {
        let octave = i32::from(self.pitch / 12) - 1;
        format!("{}{}", NOTE_NAMES[usize::from(self.pitch % 12)], octave)
    }
}

/// Identity of a rendered body
///
/// Marker ids are assigned in spawn order; a tail shares the number of the
/// marker it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyId {
    Marker(u32),
    Tail(u32),
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyId::Marker(n) => write!(f, "circle{n}"),
            BodyId::Tail(n) => write!(f, "circle{n}tail"),
        }
    }
}

/// A body that left the playfield, as reported to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyRef {
    pub id: BodyId,
    pub column: Column,
}

/// A falling marker the player has to hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub id: BodyId,
    pub note: NoteData,
    pub radius: f64,
    pub column: Column,
    pub y: f64,
    pub has_tail: bool,
}

impl Marker {
    /// Create marker number `n` at the top of the playfield
    pub fn spawn(n: u32, note: NoteData, column: Column) -> Self {
        Self {
            id: BodyId::Marker(n),
            note,
            radius: NOTE_RADIUS,
            column,
            y: 0.0,
            has_tail: note.has_tail(),
        }
    }

    /// Place the marker at `y` (mainly for tests and replays)
    pub fn at(self, y: f64) -> Self {
        Self { y, ..self }
    }

    /// Absolute distance between the marker centre and the hit line
    pub fn distance_from_border(&self) -> f64 {
        (self.y - CANVAS_BORDER).abs()
    }

    /// The marker one tick further down
    pub fn advanced(self) -> Self {
        Self {
            y: self.y + NOTE_SPEED,
            ..self
        }
    }

    pub fn body_ref(&self) -> BodyRef {
        BodyRef {
            id: self.id,
            column: self.column,
        }
    }
}

/// A sustain bar trailing a long marker
///
/// `y1` is the leading edge (closest to the hit line) and `y2` the trailing
/// edge; `y2 <= y1` always holds. `length` is the part of the bar that has
/// not yet crossed the hit line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tail {
    pub id: BodyId,
    pub note: NoteData,
    pub column: Column,
    pub y1: f64,
    pub y2: f64,
    pub length: f64,
    pub has_played: bool,
}

impl Tail {
    /// Derive the tail of a marker at the moment the marker spawns
    pub fn from_marker(marker: &Marker) -> Self {
        let n = match marker.id {
            BodyId::Marker(n) | BodyId::Tail(n) => n,
        };
        let duration_ms = marker.note.duration() * 1000.0;
        let length = duration_ms * NOTE_SPEED / f64::from(TICK_MS) + CANVAS_BORDER;
        Self {
            id: BodyId::Tail(n),
            note: marker.note,
            column: marker.column,
            y1: marker.y,
            y2: trailing_edge(length),
            length,
            has_played: false,
        }
    }

    /// The tail one tick further down
    ///
    /// The leading edge stops at the hit line while the remaining length
    /// drains through it.
    pub fn advanced(self) -> Self {
        let length = self.length - NOTE_SPEED;
        let y1 = if self.y1 < CANVAS_BORDER {
            self.y1 + NOTE_SPEED
        } else {
            self.y1
        };
        Self {
            y1,
            y2: trailing_edge(length),
            length,
            ..self
        }
    }

    pub fn played(self) -> Self {
        Self {
            has_played: true,
            ..self
        }
    }

    pub fn body_ref(&self) -> BodyRef {
        BodyRef {
            id: self.id,
            column: self.column,
        }
    }
}

fn trailing_edge(length: f64) -> f64 {
    if length > CANVAS_BORDER {
        0.0
    } else {
        CANVAS_BORDER - length
    }
}

/// A note the player does not play: invisible, but audible at the hit line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayNote {
    pub note: NoteData,
    pub y: f64,
}

impl PlayNote {
    pub fn spawn(note: NoteData) -> Self {
        Self { note, y: 0.0 }
    }

    pub fn advanced(self) -> Self {
        Self {
            y: self.y + NOTE_SPEED,
            ..self
        }
    }
}
