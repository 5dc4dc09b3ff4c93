//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame and every frame after a size change are full redraws; otherwise
//! only runs of changed cells are written. Both paths go through a [`Pen`] that
//! tracks the terminal's current style and emits only what changed between cells.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }
}

impl TerminalRenderer {
    /// Current terminal size.
    pub fn viewport(&self) -> Result<Viewport> {
        let (width, height) = terminal::size()?;
        Ok(Viewport::new(width, height))
    }

    /// Raw mode, alternate screen, hidden cursor, no line wrap.
    ///
    /// Raw mode is dropped again if the screen setup cannot be written.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.last = None;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if let Err(err) = self.flush_buf() {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(())
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call more than once.
    ///
    /// Raw mode is always disabled, even when the restore sequence fails to write.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        let written = self.flush_buf();
        terminal::disable_raw_mode()?;
        written
    }

    /// Force the next draw to be a full redraw (after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame. The renderer diffs
    /// against the previous frame and swaps buffers, so the caller gets the old one
    /// back for reuse without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }

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

/// Encode a full-frame redraw into `out`: clear, then every row as one run.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        pen.run(out, fb, 0, y, fb.width())?;
    }
    pen.finish(out)
}

/// Encode only the cells of `next` that differ from `prev`.
///
/// Identical frames encode to nothing. Frames of different sizes fall back to a
/// full redraw.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }

    let mut pen = Pen::default();
    for y in 0..next.height() {
        let mut from = 0;
        while let Some((x, len)) = next_changed_run(prev, next, y, from) {
            pen.run(out, next, x, y, len)?;
            from = x + len;
        }
    }
    pen.finish(out)
}

/// First run of differing cells in row `y` at or after column `from`, as `(x, len)`.
fn next_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    y: u16,
    from: u16,
) -> Option<(u16, u16)> {
    let w = next.width();
    let differs = |x: u16| prev.get(x, y) != next.get(x, y);
    let start = (from..w).find(|&x| differs(x))?;
    let end = (start..w).find(|&x| !differs(x)).unwrap_or(w);
    Some((start, end - start))
}

/// Style state of the terminal while a frame is being encoded.
///
/// SGR 0 clears colours as well as attributes, so an attribute change resets first
/// and then re-sends both colours. A colour-only change sends just that colour.
#[derive(Debug, Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn run(
        &mut self,
        out: &mut Vec<u8>,
        fb: &FrameBuffer,
        x: u16,
        y: u16,
        len: u16,
    ) -> Result<()> {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = fb.get(x + dx, y).unwrap_or_default();
            self.set_style(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = match self.style.replace(style) {
            Some(prev) if prev == style => return Ok(()),
            Some(prev) if prev.bold == style.bold && prev.dim == style.dim => prev,
            _ => {
                out.queue(SetAttribute(Attribute::Reset))?;
                if style.bold {
                    out.queue(SetAttribute(Attribute::Bold))?;
                }
                if style.dim {
                    out.queue(SetAttribute(Attribute::Dim))?;
                }
                out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
                out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
                return Ok(());
            }
        };

        if prev.fg != style.fg {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if prev.bg != style.bg {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        Ok(())
    }

    /// Leave the terminal unstyled. Writes nothing if no cell was drawn.
    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
