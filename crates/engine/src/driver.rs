//! Schedule driver: turns a [`Song`] into timed spawn actions.

use crate::schedule::Song;
use crate::types::{GameAction, Marker, PlayNote, Tail};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spawn {
    at_ms: f64,
    action: SpawnKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SpawnKind {
    /// A player marker; its tail (if any) spawns in the same instant
    Player(Marker),
    Background(PlayNote),
}

/// Emits spawns as the song clock passes each note's start time
///
/// Markers are numbered in spawn order, so ids are stable for a given song
/// and restart from zero after [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct ScheduleDriver {
    spawns: Vec<Spawn>,
    cursor: usize,
    end_ms: u64,
    ended: bool,
}

impl ScheduleDriver {
    pub fn new(song: &Song) -> Self {
        let mut spawns: Vec<Spawn> = song
            .notes()
            .iter()
            .map(|note| Spawn {
                at_ms: note.start * 1000.0,
                action: if note.user_played {
                    SpawnKind::Player(Marker::spawn(0, *note, song.column_for(note.pitch)))
                } else {
                    SpawnKind::Background(PlayNote::spawn(*note))
                },
            })
            .collect();
        // Stable: notes sharing a start time keep their file order.
        spawns.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));

        let mut next_id = 0;
        for spawn in &mut spawns {
            if let SpawnKind::Player(marker) = &mut spawn.action {
                *marker = Marker::spawn(next_id, marker.note, marker.column);
                next_id += 1;
            }
        }

        Self {
            spawns,
            cursor: 0,
            end_ms: song.end_time_ms(),
            ended: false,
        }
    }

    /// Push every action due at `clock_ms` onto `out`
    pub fn due_into(&mut self, clock_ms: u64, out: &mut Vec<GameAction>) {
        let now = clock_ms as f64;
        while let Some(spawn) = self.spawns.get(self.cursor) {
            if spawn.at_ms > now {
                break;
            }
            match spawn.action {
                SpawnKind::Player(marker) => {
                    out.push(GameAction::AddMarker(marker));
                    if marker.has_tail {
                        out.push(GameAction::AddTail(Tail::from_marker(&marker)));
                    }
                }
                SpawnKind::Background(note) => out.push(GameAction::AddBackgroundNote(note)),
            }
            self.cursor += 1;
        }

        if !self.ended && clock_ms >= self.end_ms {
            self.ended = true;
            out.push(GameAction::EndGame);
        }
    }

    /// Rewind to the start of the song
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.ended = false;
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn remaining(&self) -> usize {
        self.spawns.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.ended
    }
}
