use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_rhythm::core::{GameSnapshot, GameState};
use tui_rhythm::engine::{HighScoreStore, Session, SilentSound, Song};
use tui_rhythm::term::{FrameBuffer, GameView, Viewport};
use tui_rhythm::types::{Column, GameAction, Instrument, Marker, NoteData, Tail};

fn busy_state() -> GameState {
    let mut state = GameState::new();
    for i in 0..64u32 {
        let note = NoteData::from_midi(true, Instrument::Piano, 90, 60, 0.0, 0.4 + f64::from(i % 3));
        let column = Column::ALL[(i % 4) as usize];
        let marker = Marker::spawn(i, note, column).at(f64::from(i * 5));
        state = state.apply(GameAction::AddMarker(marker)).state;
        if marker.has_tail {
            state = state.apply(GameAction::AddTail(Tail::from_marker(&marker))).state;
        }
    }
    state
}

fn bench_tick(c: &mut Criterion) {
    let state = busy_state();

    c.bench_function("tick_64_bodies", |b| {
        b.iter(|| black_box(state.clone().apply(GameAction::Tick { elapsed: 5 })))
    });
}

fn bench_press(c: &mut Criterion) {
    let state = busy_state();

    c.bench_function("press_note", |b| {
        b.iter(|| {
            black_box(state.clone().apply(GameAction::PressNote {
                column: Column::K,
                random: black_box(0.5),
            }))
        })
    });
}

fn bench_song_run(c: &mut Criterion) {
    let mut csv = String::from("user_played,instrument,velocity,pitch,start,end\n");
    for i in 0..200 {
        let start = f64::from(i) * 0.25;
        csv.push_str(&format!(
            "{},piano,90,{},{start},{}\n",
            if i % 5 == 0 { "False" } else { "True" },
            48 + i % 24,
            start + 0.2
        ));
    }
    let song = Song::parse(&csv).unwrap();

    c.bench_function("session_full_song", |b| {
        b.iter(|| {
            let mut session = Session::new(&song, SilentSound, HighScoreStore::in_memory());
            session.advance(black_box(60_000));
            black_box(session.state().miss_score())
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = busy_state();
    let snap: GameSnapshot = state.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(100, 42);
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            view.render_into(black_box(&snap), vp, &mut fb);
        })
    });
}

criterion_group!(benches, bench_tick, bench_press, bench_song_run, bench_render);
criterion_main!(benches);
