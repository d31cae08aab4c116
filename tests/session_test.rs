//! Whole-song runs through the session with recorded sound.

use std::fs;

use tui_rhythm::core::{GameSnapshot, Phase};
use tui_rhythm::engine::{HighScoreStore, RecordingSound, Session, Song, SoundEvent};
use tui_rhythm::types::{GameAction, CANVAS_BORDER};

const SONG: &str = "user_played,instrument,velocity,pitch,start,end
True,piano,100,60,0.0,0.3
True,piano,100,64,0.5,0.8
True,piano,100,67,1.0,1.3
True,piano,100,72,1.5,1.8
False,contrabass,70,36,0.0,1.6
";

fn song() -> Song {
    Song::parse(SONG).unwrap()
}

/// Step the session, pressing every marker that sits exactly on the hit line
fn play_perfectly(session: &mut Session<RecordingSound>) {
    while session.phase() == Phase::Playing {
        let due: Vec<_> = session
            .state()
            .markers()
            .iter()
            .filter(|m| m.y == CANVAS_BORDER)
            .map(|m| m.column)
            .collect();
        for column in due {
            session.dispatch(GameAction::PressNote {
                column,
                random: 0.5,
            });
            session.dispatch(GameAction::HoldTail { column });
        }
        session.step();
    }
}

#[test]
fn perfect_run_scores_every_note() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.json");
    let mut session = Session::new(
        &song(),
        RecordingSound::new(),
        HighScoreStore::new(Some(path.clone())),
    );

    play_perfectly(&mut session);

    let state = session.state();
    assert_eq!(state.hit_score(), 4.0);
    assert_eq!(state.streak(), 4);
    assert_eq!(state.miss_score(), 0);

    // 1.8s of song plus the 1.75s fall.
    assert_eq!(session.clock_ms(), 3555);

    let plays = session
        .sound()
        .events()
        .iter()
        .filter(|e| matches!(e, SoundEvent::Play(_)))
        .count();
    assert_eq!(plays, 5);

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["high_score"], 4.0);
}

#[test]
fn idle_run_misses_everything() {
    let mut session = Session::new(&song(), RecordingSound::new(), HighScoreStore::in_memory());
    session.advance(10_000);

    let state = session.state();
    assert_eq!(state.phase(), Phase::Ended);
    assert_eq!(state.miss_score(), 4);
    assert_eq!(state.hit_score(), 0.0);
    assert_eq!(session.high_score(), 0.0);
}

#[test]
fn high_score_survives_a_worse_game() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.json");

    let mut first = Session::new(
        &song(),
        RecordingSound::new(),
        HighScoreStore::new(Some(path.clone())),
    );
    play_perfectly(&mut first);

    let mut second = Session::new(
        &song(),
        RecordingSound::new(),
        HighScoreStore::new(Some(path.clone())),
    );
    assert_eq!(second.high_score(), 4.0);
    second.advance(10_000);
    assert_eq!(second.high_score(), 4.0);

    let mut snap = GameSnapshot::default();
    second.frame_into(&mut snap);
    assert!(snap.game_end);
    assert_eq!(snap.high_score, 4.0);
}

#[test]
fn restart_mid_song_replays_from_the_top() {
    let mut session = Session::new(&song(), RecordingSound::new(), HighScoreStore::in_memory());
    session.advance(1_200);
    let spawned = session.state().markers().len();
    assert_eq!(spawned, 3);

    session.dispatch(GameAction::Restart);
    assert!(session.state().markers().is_empty());
    session.sound_mut().take_events();

    play_perfectly(&mut session);
    assert_eq!(session.state().hit_score(), 4.0);

    // The replay sounds every note exactly once.
    let events = session.sound_mut().take_events();
    let plays = events
        .iter()
        .filter(|e| matches!(e, SoundEvent::Play(_)))
        .count();
    assert_eq!(plays, 5);
    assert!(session.sound().events().is_empty());
}
