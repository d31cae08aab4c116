use tui_rhythm::core::{GameSnapshot, GameState, MarkerSnapshot};
use tui_rhythm::engine::{HighScoreStore, RecordingSound, Session, Song};
use tui_rhythm::term::{lane_color, FrameBuffer, GameView, Viewport};
use tui_rhythm::types::Column;

fn screen(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new().snapshot();
    let view = GameView::default();

    // 20 inner columns plus border => 22 wide; 22 rows leave a 20-row field.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_centers_field_on_tall_viewports() {
    let snap = GameState::new().snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 60));

    // Field is capped at 40 rows (+2 border): (60 - 42) / 2 = 9.
    assert_eq!(fb.get(0, 9).unwrap().ch, '┌');
    assert_eq!(fb.get(0, 50).unwrap().ch, '└');
}

#[test]
fn term_view_labels_the_hit_line() {
    let snap = GameState::new().snapshot();
    let text = screen(&GameView::default().render(&snap, Viewport::new(80, 42)));
    let labels: Vec<&str> = text
        .lines()
        .filter(|l| l.contains('H') && l.contains('J') && l.contains('K') && l.contains('L'))
        .collect();
    assert!(!labels.is_empty());
}

#[test]
fn term_view_draws_session_frame() {
    let song = Song::parse(
        "user_played,instrument,velocity,pitch,start,end\n\
         True,piano,100,60,0,0.3\n\
         True,piano,100,72,0,0.3\n",
    )
    .unwrap();
    let mut session = Session::new(&song, RecordingSound::new(), HighScoreStore::in_memory());
    session.advance(500);

    let mut snap = GameSnapshot::default();
    session.frame_into(&mut snap);
    assert_eq!(snap.markers.len(), 2);

    let view = GameView::default();
    let vp = Viewport::new(80, 42);
    let fb = view.render(&snap, vp);
    let field = view.layout(vp).unwrap();

    for column in [Column::H, Column::L] {
        let row = field.row_for(100.0).unwrap();
        let cell = fb.get(field.lane_x(column), row).unwrap();
        assert_eq!(cell.ch, '●');
        assert_eq!(cell.style.fg, lane_color(column));
    }
}

#[test]
fn term_view_reuses_framebuffer_across_sizes() {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    snap.markers.push(MarkerSnapshot {
        column: Column::J,
        y: 10.0,
        has_tail: true,
    });

    let mut fb = FrameBuffer::new(0, 0);
    view.render_into(&snap, Viewport::new(80, 42), &mut fb);
    assert!(screen(&fb).contains('◆'));

    view.render_into(&snap, Viewport::new(40, 20), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 20));
    assert!(screen(&fb).contains('◆'));
}
