//! Sound output capability.
//!
//! The game never talks to an audio device directly: every transition hands
//! its notes to a [`SoundEngine`], which the binary picks at startup.

use crate::types::NoteData;

pub trait SoundEngine {
    /// Fire a note for its own duration
    fn play(&mut self, note: &NoteData);
    /// Begin a sustain that lasts until [`stop`](Self::stop)
    fn start(&mut self, note: &NoteData);
    fn stop(&mut self, note: &NoteData);
}

impl<S: SoundEngine + ?Sized> SoundEngine for Box<S> {
    fn play(&mut self, note: &NoteData) {
        (**self).play(note)
    }

    fn start(&mut self, note: &NoteData) {
        (**self).start(note)
    }

    fn stop(&mut self, note: &NoteData) {
        (**self).stop(note)
    }
}

/// Writes every sound command to the log
#[derive(Debug, Default)]
pub struct LogSound;

impl SoundEngine for LogSound {
    fn play(&mut self, note: &NoteData) {
        log::debug!(
            "play {} {} vel={:.2} dur={:.3}s",
            note.instrument.as_str(),
            note.note_name(),
            note.velocity,
            note.duration()
        );
    }

    fn start(&mut self, note: &NoteData) {
        log::debug!(
            "start {} {} vel={:.2}",
            note.instrument.as_str(),
            note.note_name(),
            note.velocity
        );
    }

    fn stop(&mut self, note: &NoteData) {
        log::debug!("stop {} {}", note.instrument.as_str(), note.note_name());
    }
}

/// Discards every command
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSound;

impl SoundEngine for SilentSound {
    fn play(&mut self, _note: &NoteData) {}

    fn start(&mut self, _note: &NoteData) {}

    fn stop(&mut self, _note: &NoteData) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundEvent {
    Play(NoteData),
    Start(NoteData),
    Stop(NoteData),
}

/// Keeps every command in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingSound {
    events: Vec<SoundEvent>,
}

impl RecordingSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SoundEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Sustains started and not yet stopped
    pub fn sustaining(&self) -> Vec<NoteData> {
        let mut open: Vec<NoteData> = Vec::new();
        for event in &self.events {
            match event {
                SoundEvent::Start(n) => open.push(*n),
                SoundEvent::Stop(n) => {
                    if let Some(i) = open.iter().position(|o| o == n) {
                        open.remove(i);
                    }
                }
                SoundEvent::Play(_) => {}
            }
        }
        open
    }
}

impl SoundEngine for RecordingSound {
    fn play(&mut self, note: &NoteData) {
        self.events.push(SoundEvent::Play(*note));
    }

    fn start(&mut self, note: &NoteData) {
        self.events.push(SoundEvent::Start(*note));
    }

    fn stop(&mut self, note: &NoteData) {
        self.events.push(SoundEvent::Stop(*note));
    }
}
