//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previous one and only changed runs of cells
//! are written. On terminals that speak the kitty keyboard protocol the
//! renderer also asks for key release events, which the input handler needs
//! to end sustains precisely.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    release_events: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            release_events: false,
        }
    }

    /// Whether the terminal agreed to report key releases
    pub fn release_events(&self) -> bool {
        self.release_events
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        // Must be asked before switching screens.
        let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if enhanced {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        self.release_events = enhanced;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.release_events {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.release_events = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame; afterwards it
    /// holds the previous frame and can be rendered into again without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            other => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = other.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the terminal's current style so runs only emit changes
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn new() -> Self {
        Self { style: None }
    }

    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            apply_style_into(out, cell.style)?;
            self.style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::new();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for &cell in fb.row(y) {
            pen.print(out, cell)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the runs that differ between two same-sized frames.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::new();
    let mut wrote = false;

    for (y, start, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(start, y))?;
        let row = next.row(y);
        for &cell in &row[usize::from(start)..usize::from(start + len)] {
            pen.print(out, cell)?;
        }
        wrote = true;
    }

    if wrote {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// `(row, start, len)` of every maximal run of changed cells
pub fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    (0..next.height()).flat_map(move |y| {
        let a = prev.row(y);
        let b = next.row(y);
        let mut runs = Vec::new();
        let mut x = 0;
        while x < b.len() {
            if a.get(x) == Some(&b[x]) {
                x += 1;
                continue;
            }
            let start = x;
            while x < b.len() && a.get(x) != Some(&b[x]) {
                x += 1;
            }
            runs.push((y, start as u16, (x - start) as u16));
        }
        runs
    })
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
