//! Session: the single owner of the game state.
//!
//! A session folds the ordered action stream into [`GameState`], hands each
//! outbox to the sound engine and keeps the bookkeeping the pure core has no
//! business knowing about: the song clock, the high score and the hit-line
//! flashes shown by the renderer.

use log::{debug, info, warn};
use tui_rhythm_core::{GameSnapshot, GameState, Outbox, Phase, Transition};

use crate::driver::ScheduleDriver;
use crate::highscore::HighScoreStore;
use crate::schedule::Song;
use crate::sound::SoundEngine;
use crate::types::{GameAction, TICK_MS};

/// How long a column's hit line stays lit after a press takes a body
pub const FLASH_MS: u32 = 120;

pub struct Session<S: SoundEngine> {
    state: GameState,
    driver: ScheduleDriver,
    sound: S,
    store: HighScoreStore,
    clock_ms: u64,
    pending_ms: u64,
    flash_ms: [u32; 4],
    spawn_buf: Vec<GameAction>,
}

impl<S: SoundEngine> Session<S> {
    pub fn new(song: &Song, sound: S, mut store: HighScoreStore) -> Self {
        if let Err(e) = store.load() {
            warn!("high score unavailable: {e:#}");
        }
        info!(
            "session ready: {} notes ({} to play), ends at {}ms, best {:.1}",
            song.notes().len(),
            song.player_note_count(),
            song.end_time_ms(),
            store.best()
        );

        Self {
            state: GameState::new(),
            driver: ScheduleDriver::new(song),
            sound,
            store,
            clock_ms: 0,
            pending_ms: 0,
            flash_ms: [0; 4],
            spawn_buf: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn high_score(&self) -> f64 {
        self.store.best()
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut S {
        &mut self.sound
    }

    /// Apply one action and route its side effects
    pub fn dispatch(&mut self, action: GameAction) -> Outbox {
        let was_playing = self.state.phase() == Phase::Playing;

        let Transition { state, outbox } = std::mem::take(&mut self.state).apply(action);
        self.state = state;

        for note in &outbox.play_exit {
            self.sound.play(note);
        }
        for note in &outbox.start_play {
            self.sound.start(note);
        }
        for note in &outbox.stop_play {
            self.sound.stop(note);
        }
        // Only a press lights the line; missed and drained bodies leave dark.
        if let GameAction::PressNote { .. } = action {
            for body in &outbox.exited {
                self.flash_ms[body.column.index()] = FLASH_MS;
            }
        }

        if action.is_player_input() && !outbox.is_empty() {
            debug!(
                "{} -> score {:.1} x{:.1} streak {}",
                action.name(),
                self.state.hit_score(),
                self.state.multiplier(),
                self.state.streak()
            );
        }

        match action {
            GameAction::Restart => self.rewind(),
            GameAction::EndGame if was_playing => self.finish(),
            _ => {}
        }

        outbox
    }

    /// Run every whole tick contained in `elapsed_ms`, carrying the remainder
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.pending_ms += elapsed_ms;
        let tick = u64::from(TICK_MS);
        while self.pending_ms >= tick {
            self.pending_ms -= tick;
            self.step();
        }
    }

    /// One fixed tick: due spawns first, then the tick itself
    pub fn step(&mut self) {
        let mut due = std::mem::take(&mut self.spawn_buf);
        self.driver.due_into(self.clock_ms, &mut due);
        for action in due.drain(..) {
            self.dispatch(action);
        }
        self.spawn_buf = due;

        self.dispatch(GameAction::Tick {
            elapsed: u64::from(TICK_MS),
        });
        self.clock_ms += u64::from(TICK_MS);

        for flash in &mut self.flash_ms {
            *flash = flash.saturating_sub(TICK_MS);
        }
    }

    /// Fill the render snapshot for the current frame
    pub fn frame_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
        out.high_score = self.store.best();
        for (lit, ms) in out.flashes.iter_mut().zip(self.flash_ms) {
            *lit = ms > 0;
        }
    }

    fn rewind(&mut self) {
        self.driver.reset();
        self.clock_ms = 0;
        self.pending_ms = 0;
        self.flash_ms = [0; 4];
        info!("restart");
    }

    fn finish(&mut self) {
        let score = self.state.hit_score();
        match self.store.submit(score) {
            Ok(best) => info!(
                "game over: score {score:.1}, misses {}, best {best:.1}",
                self.state.miss_score()
            ),
            Err(e) => warn!("failed to save high score: {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::{RecordingSound, SoundEvent};
    use crate::types::{Column, CANVAS_BORDER};

    fn song() -> Song {
        Song::parse(
            "user_played,instrument,velocity,pitch,start,end\n\
             True,piano,90,60,0,0.5\n\
             False,cello,60,40,0,0.4\n",
        )
        .unwrap()
    }

    fn session() -> Session<RecordingSound> {
        Session::new(&song(), RecordingSound::new(), HighScoreStore::in_memory())
    }

    /// Ticks for a body spawned at clock 0 to sit exactly on the hit line
    const TICKS_TO_BORDER: u64 = CANVAS_BORDER as u64;

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut s = session();
        s.advance(12);
        assert_eq!(s.clock_ms(), 10);
        s.advance(3);
        assert_eq!(s.clock_ms(), 15);

        let marker = s.state().markers()[0];
        assert_eq!(marker.y, 3.0);
    }

    #[test]
    fn test_hit_on_the_line() {
        let mut s = session();
        for _ in 0..TICKS_TO_BORDER {
            s.step();
        }
        assert_eq!(s.state().markers()[0].y, CANVAS_BORDER);

        let outbox = s.dispatch(GameAction::PressNote {
            column: Column::H,
            random: 0.5,
        });
        assert_eq!(outbox.exited.len(), 1);
        assert_eq!(s.state().hit_score(), 1.0);

        let mut snap = GameSnapshot::default();
        s.frame_into(&mut snap);
        assert!(snap.flashes[0]);
        assert!(snap.markers.is_empty());
    }

    #[test]
    fn test_background_note_reaches_sound_engine() {
        let mut s = session();
        for _ in 0..=TICKS_TO_BORDER {
            s.step();
        }
        assert!(s.sound().events().is_empty());
        s.step();

        let events = s.sound().events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SoundEvent::Play(n) if !n.user_played));
    }

    #[test]
    fn test_flash_fades() {
        let mut s = session();
        for _ in 0..TICKS_TO_BORDER {
            s.step();
        }
        s.dispatch(GameAction::PressNote {
            column: Column::H,
            random: 0.5,
        });
        s.advance(u64::from(FLASH_MS));

        let mut snap = GameSnapshot::default();
        s.frame_into(&mut snap);
        assert_eq!(snap.flashes, [false; 4]);
    }

    #[test]
    fn test_missed_marker_leaves_line_dark() {
        let mut s = session();
        for _ in 0..TICKS_TO_BORDER + 2 {
            s.step();
        }
        assert_eq!(s.state().miss_score(), 1);

        let mut snap = GameSnapshot::default();
        s.frame_into(&mut snap);
        assert_eq!(snap.flashes, [false; 4]);
    }

    #[test]
    fn test_game_end_submits_high_score() {
        let mut s = session();
        for _ in 0..TICKS_TO_BORDER {
            s.step();
        }
        s.dispatch(GameAction::PressNote {
            column: Column::H,
            random: 0.5,
        });

        // 0.5s of song plus the fall time.
        s.advance(500 + 1750);
        assert_eq!(s.phase(), Phase::Ended);
        assert_eq!(s.high_score(), 1.0);

        let frozen = s.state().clone();
        s.advance(100);
        assert_eq!(s.state(), &frozen);
    }

    #[test]
    fn test_restart_rewinds_the_song() {
        let mut s = session();
        s.advance(400);
        s.dispatch(GameAction::Restart);

        assert_eq!(s.clock_ms(), 0);
        assert_eq!(s.state(), &GameState::new());

        s.step();
        assert_eq!(s.state().markers().len(), 1);
        assert_eq!(s.state().play_notes().len(), 1);
    }
}
