//! Flushes framebuffers to a terminal, repainting only cells that changed.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Rgb, Style};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Last frame shown; `None` forces a full repaint.
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`TerminalRenderer::enter`]
    pub fn leave(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next frame (after a resize)
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `frame`, then hand the previously shown buffer back through it
    /// so the caller can draw the next frame without allocating.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.shown.as_mut() {
            Some(shown) if shown.width() == frame.width() && shown.height() == frame.height() => {
                encode_changes(shown, frame, &mut self.buf)?;
                std::mem::swap(shown, frame);
                return self.flush();
            }
            _ => {}
        }
        encode_full(frame, &mut self.buf)?;
        self.shown = Some(frame.clone());
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Encode a clear plus every cell of `frame` into `out`
pub fn encode_full(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = None;
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..frame.width() {
            let glyph = frame.get(x, y).unwrap_or_default();
            print_glyph(out, &mut pen, glyph.ch, glyph.style)?;
        }
    }
    out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the runs of cells that differ between `shown` and `next`.
///
/// Both buffers must have the same dimensions.
pub fn encode_changes(shown: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = None;
    let mut dirty = false;
    for y in 0..next.height() {
        let mut cursor_at = None;
        for x in 0..next.width() {
            let glyph = next.get(x, y).unwrap_or_default();
            if shown.get(x, y) == Some(glyph) {
                continue;
            }
            if cursor_at != Some(x) {
                out.queue(cursor::MoveTo(x, y))?;
            }
            print_glyph(out, &mut pen, glyph.ch, glyph.style)?;
            cursor_at = Some(x + 1);
            dirty = true;
        }
    }
    if dirty {
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn print_glyph(out: &mut Vec<u8>, pen: &mut Option<Style>, ch: char, style: Style) -> Result<()> {
    if *pen != Some(style) {
        out.queue(SetAttribute(Attribute::Reset))?
            .queue(SetForegroundColor(color(style.fg)))?
            .queue(SetBackgroundColor(color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        *pen = Some(style);
    }
    out.queue(Print(ch))?;
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
