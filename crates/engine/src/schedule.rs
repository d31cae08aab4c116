//! Score files: one note per CSV line.
//!
//! ```text
//! user_played,instrument,velocity,pitch,start,end
//! True,piano,90,60,0.5,0.75
//! False,cello,64,48,0.5,2.0
//! ```
//!
//! The first line is a header and is always skipped. Velocity and pitch are
//! raw MIDI values; times are seconds from the start of the song.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::types::{
    Column, Instrument, NoteData, CANVAS_BORDER, MIDI_MAX_VALUE, NOTE_SPEED, TICK_MS,
};

const FIELD_COUNT: usize = 6;

/// A parsed score, notes in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    notes: Vec<NoteData>,
    min_pitch: u8,
    max_pitch: u8,
}

impl Song {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read score file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid score file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut notes = Vec::new();
        for (i, line) in text.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let note = parse_line(line).with_context(|| format!("line {}", i + 1))?;
            notes.push(note);
        }
        Self::from_notes(notes)
    }

    pub fn from_notes(notes: Vec<NoteData>) -> Result<Self> {
        if notes.is_empty() {
            bail!("score contains no notes");
        }
        let (min_pitch, max_pitch) = notes
            .iter()
            .filter(|n| n.user_played)
            .fold(None, |range: Option<(u8, u8)>, n| match range {
                None => Some((n.pitch, n.pitch)),
                Some((lo, hi)) => Some((lo.min(n.pitch), hi.max(n.pitch))),
            })
            .ok_or_else(|| anyhow!("score contains no player notes"))?;

        Ok(Self {
            notes,
            min_pitch,
            max_pitch,
        })
    }

    pub fn notes(&self) -> &[NoteData] {
        &self.notes
    }

    pub fn player_note_count(&self) -> usize {
        self.notes.iter().filter(|n| n.user_played).count()
    }

    /// Lowest and highest pitch among player notes
    pub fn pitch_range(&self) -> (u8, u8) {
        (self.min_pitch, self.max_pitch)
    }

    /// Column for a player pitch: the player range split into four buckets
    pub fn column_for(&self, pitch: u8) -> Column {
        let offset = f64::from(pitch.saturating_sub(self.min_pitch));
        let span = f64::from(self.max_pitch - self.min_pitch) + 1.0;
        let bucket = (offset / span * Column::ALL.len() as f64).floor() as usize;
        Column::from_index(bucket).unwrap_or(Column::L)
    }

    /// Song clock at which the game ends: the last note has had time to fall
    pub fn end_time_ms(&self) -> u64 {
        let last_end = self.notes.iter().map(|n| n.end).fold(0.0, f64::max);
        let travel_ms = CANVAS_BORDER * f64::from(TICK_MS) / NOTE_SPEED;
        (last_end * 1000.0 + travel_ms).ceil() as u64
    }
}

fn parse_line(line: &str) -> Result<NoteData> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        bail!("expected {FIELD_COUNT} fields, found {}", fields.len());
    }

    let user_played = match fields[0].to_ascii_lowercase().as_str() {
        "true" => true,
        "false" => false,
        other => bail!("user_played must be True or False, got {other:?}"),
    };
    let instrument = Instrument::from_str(fields[1])
        .ok_or_else(|| anyhow!("unknown instrument {:?}", fields[1]))?;
    let velocity = parse_midi(fields[2], "velocity")?;
    let pitch = parse_midi(fields[3], "pitch")?;
    let start = parse_time(fields[4], "start")?;
    let end = parse_time(fields[5], "end")?;
    if end < start {
        bail!("end {end} is before start {start}");
    }

    Ok(NoteData::from_midi(
        user_played,
        instrument,
        velocity,
        pitch,
        start,
        end,
    ))
}

fn parse_midi(field: &str, name: &str) -> Result<u8> {
    let value: u8 = field
        .parse()
        .with_context(|| format!("{name} is not a MIDI value: {field:?}"))?;
    if value > MIDI_MAX_VALUE {
        bail!("{name} {value} exceeds {MIDI_MAX_VALUE}");
    }
    Ok(value)
}

fn parse_time(field: &str, name: &str) -> Result<f64> {
    let value: f64 = field
        .parse()
        .with_context(|| format!("{name} is not a number: {field:?}"))?;
    if !value.is_finite() || value < 0.0 {
        bail!("{name} must be a non-negative time, got {field}");
    }
    Ok(value)
}
