//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The logical canvas is scaled vertically to the available rows; lanes sit
//! at the columns' horizontal percentages of a fixed-width field.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Column, CANVAS_BORDER, CANVAS_HEIGHT};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Fewer rows than this and the field is replaced by a notice.
pub const MIN_FIELD_ROWS: u16 = 10;

const FIELD_BG: Rgb = Rgb::new(18, 18, 26);

/// Lane color of a column
pub fn lane_color(column: Column) -> Rgb {
    match column {
        Column::H => Rgb::new(50, 205, 50),
        Column::J => Rgb::new(220, 50, 50),
        Column::K => Rgb::new(65, 105, 225),
        Column::L => Rgb::new(240, 220, 60),
    }
}

/// Where the field landed in the last render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRect {
    /// Top-left corner of the border
    pub x: u16,
    pub y: u16,
    /// Inner size
    pub width: u16,
    pub height: u16,
}

impl FieldRect {
    /// Terminal column of a lane centre
    pub fn lane_x(&self, column: Column) -> u16 {
        self.x + 1 + self.width * u16::from(column.x_percent()) / 100
    }

    /// Terminal row of canvas height `y`, if it is inside the field
    pub fn row_for(&self, y: f64) -> Option<u16> {
        if !(0.0..CANVAS_HEIGHT).contains(&y) {
            return None;
        }
        let row = (y / CANVAS_HEIGHT * f64::from(self.height)).floor() as u16;
        Some(self.y + 1 + row.min(self.height - 1))
    }

    pub fn hit_row(&self) -> u16 {
        self.row_for(CANVAS_BORDER).unwrap_or(self.y + self.height)
    }
}

/// A lightweight terminal renderer for the rhythm game.
pub struct GameView {
    /// Inner field width in terminal columns.
    field_w: u16,
    /// Upper bound on field rows; taller terminals get margins.
    max_rows: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Lanes at 20/40/60/80% of 20 columns land four columns apart.
        Self {
            field_w: 20,
            max_rows: 40,
        }
    }
}

impl GameView {
    pub fn new(field_w: u16, max_rows: u16) -> Self {
        Self {
            field_w: field_w.max(10),
            max_rows: max_rows.max(MIN_FIELD_ROWS),
        }
    }

    /// Field placement for a viewport, or `None` when it does not fit
    pub fn layout(&self, viewport: Viewport) -> Option<FieldRect> {
        let rows = viewport.height.saturating_sub(2).min(self.max_rows);
        let frame_w = self.field_w + 2;
        if rows < MIN_FIELD_ROWS || viewport.width < frame_w {
            return None;
        }

        // Leave room for the side panel when the terminal is wide enough.
        let panel_w = 22;
        let total_w = frame_w + panel_w;
        let x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            0
        };
        let y = (viewport.height - rows - 2) / 2;

        Some(FieldRect {
            x,
            y,
            width: self.field_w,
            height: rows,
        })
    }

    /// Render the current frame into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let Some(field) = self.layout(viewport) else {
            let style = CellStyle::default().bold();
            fb.put_str(0, 0, "terminal too small", style);
            return;
        };

        fb.fill_rect(
            field.x + 1,
            field.y + 1,
            field.width,
            field.height,
            ' ',
            CellStyle::default().on(FIELD_BG),
        );
        self.draw_border(fb, field);
        self.draw_lanes(fb, field);
        self.draw_hit_line(fb, snap, field);

        for tail in &snap.tails {
            let x = field.lane_x(tail.column);
            let (Some(top), Some(bottom)) = (
                field.row_for(tail.y2.max(0.0)),
                field.row_for(tail.y1.min(CANVAS_BORDER)),
            ) else {
                continue;
            };
            let color = lane_color(tail.column);
            let style = if tail.played {
                CellStyle::fg(color.scaled(35)).on(FIELD_BG)
            } else {
                CellStyle::fg(color.scaled(80)).on(FIELD_BG)
            };
            for row in top..=bottom {
                fb.put_char(x, row, '┃', style);
            }
        }

        for marker in &snap.markers {
            let Some(row) = field.row_for(marker.y) else {
                continue;
            };
            let x = field.lane_x(marker.column);
            let style = CellStyle::fg(lane_color(marker.column)).on(FIELD_BG).bold();
            let body = if marker.has_tail { '◆' } else { '●' };
            fb.put_char(x - 1, row, '(', style);
            fb.put_char(x, row, body, style);
            fb.put_char(x + 1, row, ')', style);
        }

        self.draw_side_panel(fb, snap, viewport, field);

        if snap.game_end {
            self.draw_overlay_text(fb, field, "GAME OVER", "r: restart  q: quit");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, field: FieldRect) {
        let style = CellStyle::fg(Rgb::new(200, 200, 200));
        let (x, y) = (field.x, field.y);
        let (w, h) = (field.width + 2, field.height + 2);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_lanes(&self, fb: &mut FrameBuffer, field: FieldRect) {
        for column in Column::ALL {
            let x = field.lane_x(column);
            let style = CellStyle::fg(lane_color(column).scaled(30)).on(FIELD_BG);
            for row in field.y + 1..field.hit_row() {
                fb.put_char(x, row, '·', style);
            }
        }
    }

    fn draw_hit_line(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, field: FieldRect) {
        let row = field.hit_row();
        let line = CellStyle::fg(Rgb::new(160, 160, 170)).on(FIELD_BG);
        fb.fill_rect(field.x + 1, row, field.width, 1, '─', line);

        for column in Column::ALL {
            let x = field.lane_x(column);
            let color = lane_color(column);
            let flash = snap.flashes[column.index()];
            let target = if flash {
                CellStyle::fg(Rgb::WHITE).on(color).bold()
            } else {
                CellStyle::fg(color).on(FIELD_BG)
            };
            fb.put_char(x - 1, row, '[', target);
            fb.put_char(x, row, if flash { '*' } else { '○' }, target);
            fb.put_char(x + 1, row, ']', target);

            let label_row = row + 2;
            if label_row <= field.y + field.height {
                let label = CellStyle::fg(color).on(FIELD_BG).bold();
                fb.put_char(x, label_row, column.key().to_ascii_uppercase(), label);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        field: FieldRect,
    ) {
        let panel_x = field.x + field.width + 4;
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let dim = CellStyle { dim: true, ..value };

        let mut y = field.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_tenths(panel_x, y + 1, snap.hit_score, value);
        y += 3;

        fb.put_str(panel_x, y, "MULTIPLIER", label);
        let x = fb.put_str(panel_x, y + 1, "x", value);
        fb.put_tenths(x, y + 1, snap.multiplier, value);
        y += 3;

        fb.put_str(panel_x, y, "STREAK", label);
        fb.put_u32(panel_x, y + 1, snap.streak, value);
        y += 3;

        fb.put_str(panel_x, y, "MISSES", label);
        fb.put_u32(panel_x, y + 1, snap.miss_score, value);
        y += 3;

        fb.put_str(panel_x, y, "BEST", label);
        fb.put_tenths(panel_x, y + 1, snap.high_score.max(snap.hit_score), value);
        y += 3;

        if y + 3 < viewport.height {
            fb.put_str(panel_x, y, "h j k l  play", dim);
            fb.put_str(panel_x, y + 1, "r        restart", dim);
            fb.put_str(panel_x, y + 2, "q        quit", dim);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, field: FieldRect, text: &str, hint: &str) {
        let mid_y = field.y + (field.height + 2) / 2;
        let style = CellStyle::fg(Rgb::WHITE).bold();
        for (dy, line) in [(0u16, text), (1, hint)] {
            let w = line.chars().count() as u16;
            let x = field.x + (field.width + 2).saturating_sub(w) / 2;
            fb.put_str(x, mid_y + dy, line, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MarkerSnapshot, TailSnapshot};

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        fb.row(y).iter().map(|c| c.ch).collect()
    }

    fn screen(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| row_text(fb, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn layout_scales_canvas_to_rows() {
        let view = GameView::default();
        let field = view.layout(Viewport::new(80, 42)).unwrap();

        assert_eq!(field.height, 40);
        assert_eq!(field.row_for(0.0), Some(field.y + 1));
        assert_eq!(field.hit_row(), field.y + 1 + 35);
        assert_eq!(field.row_for(CANVAS_HEIGHT), None);
        assert_eq!(field.row_for(-1.0), None);
    }

    #[test]
    fn lanes_are_evenly_spaced() {
        let field = GameView::default().layout(Viewport::new(80, 30)).unwrap();
        let xs: Vec<u16> = Column::ALL.iter().map(|c| field.lane_x(*c)).collect();
        assert_eq!(xs[1] - xs[0], 4);
        assert_eq!(xs[2] - xs[1], 4);
        assert_eq!(xs[3] - xs[2], 4);
    }

    #[test]
    fn too_small_viewport_shows_notice() {
        let fb = GameView::default().render(&GameSnapshot::default(), Viewport::new(30, 8));
        assert!(row_text(&fb, 0).starts_with("terminal too small"));
    }

    #[test]
    fn marker_is_drawn_in_its_lane() {
        let view = GameView::default();
        let vp = Viewport::new(80, 42);
        let field = view.layout(vp).unwrap();

        let mut snap = GameSnapshot::default();
        snap.markers.push(MarkerSnapshot {
            column: Column::K,
            y: 100.0,
            has_tail: false,
        });
        let fb = view.render(&snap, vp);

        let row = field.row_for(100.0).unwrap();
        let cell = fb.get(field.lane_x(Column::K), row).unwrap();
        assert_eq!(cell.ch, '●');
        assert_eq!(cell.style.fg, lane_color(Column::K));
    }

    #[test]
    fn tail_bar_spans_its_edges() {
        let view = GameView::default();
        let vp = Viewport::new(80, 42);
        let field = view.layout(vp).unwrap();

        let mut snap = GameSnapshot::default();
        snap.tails.push(TailSnapshot {
            column: Column::H,
            y1: 200.0,
            y2: 100.0,
            played: false,
        });
        let fb = view.render(&snap, vp);

        let x = field.lane_x(Column::H);
        for y in [100.0, 150.0, 200.0] {
            assert_eq!(fb.get(x, field.row_for(y).unwrap()).unwrap().ch, '┃');
        }
        let above = field.row_for(100.0).unwrap() - 1;
        assert_ne!(fb.get(x, above).unwrap().ch, '┃');
    }

    #[test]
    fn flash_lights_the_target() {
        let view = GameView::default();
        let vp = Viewport::new(80, 42);
        let field = view.layout(vp).unwrap();

        let mut snap = GameSnapshot::default();
        snap.flashes[Column::J.index()] = true;
        let fb = view.render(&snap, vp);

        let lit = fb.get(field.lane_x(Column::J), field.hit_row()).unwrap();
        assert_eq!(lit.ch, '*');
        assert_eq!(lit.style.bg, lane_color(Column::J));
        let idle = fb.get(field.lane_x(Column::H), field.hit_row()).unwrap();
        assert_eq!(idle.ch, '○');
    }

    #[test]
    fn side_panel_shows_score() {
        let mut snap = GameSnapshot::default();
        snap.hit_score = 12.4;
        snap.multiplier = 1.4;
        snap.streak = 17;
        snap.miss_score = 3;
        snap.high_score = 20.0;
        let text = screen(&GameView::default().render(&snap, Viewport::new(80, 42)));

        assert!(text.contains("SCORE"));
        assert!(text.contains("12.4"));
        assert!(text.contains("x1.4"));
        assert!(text.contains("17"));
        assert!(text.contains("20.0"));
    }

    #[test]
    fn game_over_overlay() {
        let mut snap = GameSnapshot::default();
        let vp = Viewport::new(80, 42);
        assert!(!screen(&GameView::default().render(&snap, vp)).contains("GAME OVER"));

        snap.game_end = true;
        assert!(screen(&GameView::default().render(&snap, vp)).contains("GAME OVER"));
    }
}
