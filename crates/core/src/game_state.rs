//! Game state module - the pure transition engine
//!
//! [`GameState`] is a single aggregate that is consumed by every transition
//! and replaced by the one returned in [`Transition`]. Nothing is mutated
//! behind the caller's back: side effects meant for the renderer and the
//! sound engine come back as data in an [`Outbox`].

use crate::scoring::{next_multiplier, rounded_sum};
use crate::types::*;

/// Number of sample instruments a filler note can pick from
const INSTRUMENT_COUNT: usize = Instrument::ALL.len();

/// Presses within this distance of the hit line register at all
pub const ALIGN_WINDOW: f64 = NOTE_RADIUS * 2.0;

/// Presses within this distance of the hit line are full hits
pub const HIT_WINDOW: f64 = NOTE_RADIUS;

/// Gameplay phase, derived from the `game_end` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Ended,
}

/// Side effects produced by a single transition
///
/// Every transition returns a fresh outbox; nothing carries over from the
/// previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outbox {
    /// Bodies removed from the playfield
    pub exited: Vec<BodyRef>,
    /// Notes to fire once
    pub play_exit: Vec<NoteData>,
    /// Sustains to start
    pub start_play: Vec<NoteData>,
    /// Sustains to stop
    pub stop_play: Vec<NoteData>,
}

impl Outbox {
    pub fn is_empty(&self) -> bool {
        self.exited.is_empty()
            && self.play_exit.is_empty()
            && self.start_play.is_empty()
            && self.stop_play.is_empty()
    }
}

/// Result of applying one action: the next state plus its side effects
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub outbox: Outbox,
}

impl Transition {
    /// A transition without side effects
    pub fn quiet(state: GameState) -> Self {
        Self {
            state,
            outbox: Outbox::default(),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    game_end: bool,
    hit_score: f64,
    miss_score: u32,
    multiplier: f64,
    streak: u32,
    markers: Vec<Marker>,
    tails: Vec<Tail>,
    /// Background notes: never drawn, played when they reach the hit line.
    play_notes: Vec<PlayNote>,
}

impl GameState {
    /// The starting state: no bodies, zero score, multiplier 1
    pub fn new() -> Self {
        Self {
            game_end: false,
            hit_score: STARTING_SCORE,
            miss_score: 0,
            multiplier: DEFAULT_MULTIPLIER,
            streak: STARTING_STREAK,
            markers: Vec::new(),
            tails: Vec::new(),
            play_notes: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_end {
            Phase::Ended
        } else {
            Phase::Playing
        }
    }

    pub fn game_end(&self) -> bool {
        self.game_end
    }

    pub fn hit_score(&self) -> f64 {
        self.hit_score
    }

    pub fn miss_score(&self) -> u32 {
        self.miss_score
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn tails(&self) -> &[Tail] {
        &self.tails
    }

    pub fn play_notes(&self) -> &[PlayNote] {
        &self.play_notes
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        use crate::snapshot::{MarkerSnapshot, TailSnapshot};

        out.markers.clear();
        out.markers
            .extend(self.markers.iter().map(MarkerSnapshot::from));
        out.tails.clear();
        out.tails.extend(self.tails.iter().map(TailSnapshot::from));
        out.hit_score = self.hit_score;
        out.miss_score = self.miss_score;
        out.multiplier = self.multiplier;
        out.streak = self.streak;
        out.game_end = self.game_end;
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a game action, producing the next state
    ///
    /// Once the game has ended only `Restart` (and a repeated `EndGame`)
    /// are honoured; everything else leaves the state untouched.
    pub fn apply(self, action: GameAction) -> Transition {
        if self.phase() == Phase::Ended
            && !matches!(action, GameAction::Restart | GameAction::EndGame)
        {
            return Transition::quiet(self);
        }

        match action {
            GameAction::Tick { .. } => self.tick(),
            GameAction::AddMarker(marker) => {
                let mut markers = self.markers;
                markers.push(marker);
                Transition::quiet(Self { markers, ..self })
            }
            GameAction::AddBackgroundNote(note) => {
                let mut play_notes = self.play_notes;
                play_notes.push(note);
                Transition::quiet(Self { play_notes, ..self })
            }
            GameAction::AddTail(tail) => {
                let mut tails = self.tails;
                tails.push(tail);
                Transition::quiet(Self { tails, ..self })
            }
            GameAction::PressNote { column, random } => self.press_note(column, random),
            GameAction::HoldTail { column } => self.hold_tail(column),
            GameAction::Restart => self.restart(),
            GameAction::EndGame => Transition::quiet(Self {
                game_end: true,
                ..self
            }),
        }
    }

    /// Move every body one step and retire the ones past the hit line
    fn tick(self) -> Transition {
        let (markers, missed): (Vec<Marker>, Vec<Marker>) = self
            .markers
            .into_iter()
            .partition(|m| m.y <= CANVAS_BORDER);
        let (play_notes, sounded): (Vec<PlayNote>, Vec<PlayNote>) = self
            .play_notes
            .into_iter()
            .partition(|n| n.y <= CANVAS_BORDER);
        let (tails, expired): (Vec<Tail>, Vec<Tail>) = self
            .tails
            .into_iter()
            .partition(|t| t.y2 <= CANVAS_BORDER);

        let missed_count = missed.len() as u32;
        let (streak, multiplier) = if missed_count > 0 {
            (STARTING_STREAK, DEFAULT_MULTIPLIER)
        } else {
            (self.streak, self.multiplier)
        };

        let outbox = Outbox {
            exited: missed
                .iter()
                .map(Marker::body_ref)
                .chain(expired.iter().map(Tail::body_ref))
                .collect(),
            play_exit: sounded.into_iter().map(|n| n.note).collect(),
            start_play: Vec::new(),
            stop_play: expired
                .iter()
                .filter(|t| !t.has_played)
                .map(|t| t.note)
                .collect(),
        };

        Transition {
            state: Self {
                markers: markers.into_iter().map(Marker::advanced).collect(),
                tails: tails.into_iter().map(Tail::advanced).collect(),
                play_notes: play_notes.into_iter().map(PlayNote::advanced).collect(),
                miss_score: self.miss_score + missed_count,
                streak,
                multiplier,
                ..self
            },
            outbox,
        }
    }

    /// Classify a key press as hit, align or miss
    fn press_note(self, column: Column, random: f64) -> Transition {
        // A tail sitting on the hit line owns the column until it drains.
        let tail_blocks = self
            .tails
            .iter()
            .any(|t| t.column == column && t.y1 >= CANVAS_BORDER);
        if tail_blocks {
            return Transition::quiet(self);
        }

        let in_window = |m: &&Marker, window: f64| {
            m.column == column && m.distance_from_border() <= window
        };
        let hit = farthest_along(self.markers.iter().filter(|m| in_window(m, HIT_WINDOW)));
        let aligned = farthest_along(self.markers.iter().filter(|m| in_window(m, ALIGN_WINDOW)));

        match (hit, aligned) {
            (Some(marker), _) => self.handle_hit(marker),
            (None, Some(marker)) => self.handle_align(marker, random),
            (None, None) => self.handle_miss(random),
        }
    }

    fn handle_hit(self, marker: Marker) -> Transition {
        if marker.has_tail {
            return self.start_sustain(marker);
        }

        let hit_score = rounded_sum(self.hit_score, self.multiplier);
        let multiplier = next_multiplier(self.multiplier, self.streak);
        let streak = self.streak + 1;
        let markers = without(self.markers, &marker);

        Transition {
            state: Self {
                markers,
                hit_score,
                multiplier,
                streak,
                ..self
            },
            outbox: Outbox {
                exited: vec![marker.body_ref()],
                play_exit: vec![marker.note],
                ..Outbox::default()
            },
        }
    }

    fn handle_align(self, marker: Marker, random: f64) -> Transition {
        if marker.has_tail {
            return self.start_sustain(marker);
        }

        // Off-centre presses still score, but the note is cut short.
        let note = NoteData {
            start: 0.0,
            end: unit(random) / 2.0,
            ..marker.note
        };
        let hit_score = rounded_sum(self.hit_score, self.multiplier);
        let markers = without(self.markers, &marker);

        Transition {
            state: Self {
                markers,
                hit_score,
                ..self
            },
            outbox: Outbox {
                exited: vec![marker.body_ref()],
                play_exit: vec![note],
                ..Outbox::default()
            },
        }
    }

    fn handle_miss(self, random: f64) -> Transition {
        Transition {
            state: self,
            outbox: Outbox {
                play_exit: vec![filler_note(random)],
                ..Outbox::default()
            },
        }
    }

    /// A long marker reached the hit line: its sound starts, score waits for release
    fn start_sustain(self, marker: Marker) -> Transition {
        let markers = without(self.markers, &marker);
        Transition {
            state: Self { markers, ..self },
            outbox: Outbox {
                exited: vec![marker.body_ref()],
                start_play: vec![marker.note],
                ..Outbox::default()
            },
        }
    }

    /// Key release: close a sustain, scoring it when released on time
    fn hold_tail(self, column: Column) -> Transition {
        let near_border = |y: f64| (y - CANVAS_BORDER).abs() <= ALIGN_WINDOW;
        let leaving = |t: &Tail| t.column == column && near_border(t.y2);
        let aligned = |t: &Tail| t.column == column && near_border(t.y1);

        if self.tails.iter().any(|t| leaving(t) && !t.has_played) {
            let (tails, stop_play) = release(self.tails, leaving);
            let hit_score = rounded_sum(self.hit_score, self.multiplier);
            let multiplier = next_multiplier(self.multiplier, self.streak);
            return Transition {
                state: Self {
                    tails,
                    hit_score,
                    multiplier,
                    ..self
                },
                outbox: Outbox {
                    stop_play,
                    ..Outbox::default()
                },
            };
        }

        if self.tails.iter().any(|t| aligned(t) && !t.has_played) {
            // Released too early: the sound stops but nothing is earned.
            let (tails, stop_play) = release(self.tails, aligned);
            return Transition {
                state: Self { tails, ..self },
                outbox: Outbox {
                    stop_play,
                    ..Outbox::default()
                },
            };
        }

        Transition::quiet(self)
    }

    /// Back to the starting state, clearing every body in flight
    fn restart(self) -> Transition {
        let exited = self
            .markers
            .iter()
            .map(Marker::body_ref)
            .chain(self.tails.iter().map(Tail::body_ref))
            .collect();
        let stop_play = self.tails.iter().map(|t| t.note).collect();

        Transition {
            state: Self::new(),
            outbox: Outbox {
                exited,
                stop_play,
                ..Outbox::default()
            },
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the candidate farthest down the playfield; later entries win ties
fn farthest_along<'a>(candidates: impl Iterator<Item = &'a Marker>) -> Option<Marker> {
    candidates
        .reduce(|a, b| if a.y > b.y { a } else { b })
        .copied()
}

fn without(mut markers: Vec<Marker>, marker: &Marker) -> Vec<Marker> {
    markers.retain(|m| m.id != marker.id);
    markers
}

/// Mark matching unplayed tails as played, returning the notes to silence
fn release(tails: Vec<Tail>, matches: impl Fn(&Tail) -> bool) -> (Vec<Tail>, Vec<NoteData>) {
    let mut stop_play = Vec::new();
    let tails = tails
        .into_iter()
        .map(|t| {
            if matches(&t) && !t.has_played {
                stop_play.push(t.note);
                t.played()
            } else {
                t
            }
        })
        .collect();
    (tails, stop_play)
}

fn unit(random: f64) -> f64 {
    if random.is_nan() {
        0.0
    } else {
        random.abs().min(1.0)
    }
}

/// Synthesize the note played for a press that matched nothing
///
/// Instrument, pitch and duration all derive from the same unit value, so a
/// given random sequence always produces the same filler melody.
pub fn filler_note(random: f64) -> NoteData {
    let r = unit(random);
    let index = ((r * INSTRUMENT_COUNT as f64).ceil() as i64 - 1).unsigned_abs() as usize;
    let pitch = (r * f64::from(MIDI_MAX_VALUE) * 0.75).floor() as u8;
    NoteData::from_midi(
        false,
        Instrument::from_index(index),
        DEFAULT_VELOCITY,
        pitch,
        0.0,
        r / 2.0,
    )
}
