//! GameView: draws a `GameSnapshot` into a framebuffer.
//!
//! Pure; no terminal I/O happens here. Board dimensions come from the
//! snapshot, so any board size the engine accepts can be displayed.

use std::fmt::Write as _;

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{PieceKind, PlayState};

const PANEL_WIDTH: u16 = 14;
const PANEL_GAP: u16 = 2;

const WELL_BG: Rgb = Rgb::new(24, 24, 32);
const BORDER: Style = Style::fg(Rgb::new(190, 190, 200));
const LABEL: Style = Style::fg(Rgb::new(140, 140, 150));
const VALUE: Style = Style::fg(Rgb::new(240, 240, 240)).bold();
const GRID: Style = Style::fg(Rgb::new(60, 60, 72)).on(WELL_BG);
const BANNER: Style = Style::fg(Rgb::new(255, 255, 255)).on(Rgb::new(90, 20, 20)).bold();

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

/// Screen placement of the well (border included) and the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub panel_x: u16,
}

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell; 2 roughly squares the cells.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let frame_w = snap.columns.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = snap.rows.saturating_add(2);
        let total_w = frame_w.saturating_add(PANEL_GAP + PANEL_WIDTH);
        let frame_x = viewport.width.saturating_sub(total_w) / 2;
        let frame_y = viewport.height.saturating_sub(frame_h) / 2;
        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            panel_x: frame_x.saturating_add(frame_w).saturating_add(PANEL_GAP),
        }
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let layout = self.layout(snap, viewport);
        self.draw_well(fb, snap, &layout);

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost = Style::fg(Rgb::for_piece(active.kind)).on(WELL_BG).dim();
            for (dx, dy) in active.shape.cells() {
                self.draw_cell(fb, snap, &layout, active.x + dx, ghost_y + dy, '░', ghost);
            }
        }
        if let Some(active) = snap.active {
            let style = Style::fg(Rgb::for_piece(active.kind)).on(WELL_BG);
            for (x, y) in active.cells() {
                self.draw_cell(fb, snap, &layout, x, y, '█', style);
            }
        }

        self.draw_panel(fb, snap, &layout);

        match snap.state {
            PlayState::Paused => self.draw_banner(fb, &layout, &["PAUSED", "p: resume"]),
            PlayState::GameOver => self.draw_banner(fb, &layout, &["GAME OVER", "r: new game"]),
            PlayState::Falling => {}
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_well(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let x0 = layout.frame_x;
        let y0 = layout.frame_y;
        let right = x0.saturating_add(layout.frame_w - 1);
        let bottom = y0.saturating_add(layout.frame_h - 1);

        for x in x0.saturating_add(1)..right.min(fb.width()) {
            fb.put(x, y0, '─', BORDER);
            fb.put(x, bottom, '─', BORDER);
        }
        for y in y0.saturating_add(1)..bottom.min(fb.height()) {
            fb.put(x0, y, '│', BORDER);
            fb.put(right, y, '│', BORDER);
        }
        fb.put(x0, y0, '┌', BORDER);
        fb.put(right, y0, '┐', BORDER);
        fb.put(x0, bottom, '└', BORDER);
        fb.put(right, bottom, '┘', BORDER);

        // Only the part of the board that lands inside the framebuffer.
        let visible_cols = (fb.width().saturating_sub(x0) / self.cell_w).saturating_add(1);
        let visible_rows = fb.height().saturating_sub(y0);
        for y in 0..snap.rows.min(visible_rows) as i32 {
            for x in 0..snap.columns.min(visible_cols) as i32 {
                match PieceKind::from_id(snap.cell(x, y)) {
                    Some(kind) => {
                        let style = Style::fg(Rgb::for_piece(kind)).on(WELL_BG);
                        self.draw_cell(fb, snap, layout, x, y, '█', style);
                    }
                    None => self.draw_cell(fb, snap, layout, x, y, '·', GRID),
                }
            }
        }
    }

    /// Screen position of the left column of board cell (x, y), if it fits in a `u16`
    fn cell_origin(&self, layout: &Layout, x: i32, y: i32) -> Option<(u16, u16)> {
        let sx = u32::from(layout.frame_x) + 1 + u32::try_from(x).ok()? * u32::from(self.cell_w);
        let sy = u32::from(layout.frame_y) + 1 + u32::try_from(y).ok()?;
        Some((u16::try_from(sx).ok()?, u16::try_from(sy).ok()?))
    }

    /// Paint board cell (x, y); the grid dot only fills the first column.
    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        layout: &Layout,
        x: i32,
        y: i32,
        ch: char,
        style: Style,
    ) {
        if x >= snap.columns as i32 || y >= snap.rows as i32 {
            return;
        }
        let Some((sx, sy)) = self.cell_origin(layout, x, y) else {
            return;
        };
        for i in 0..self.cell_w {
            let glyph = if ch == '·' && i > 0 { ' ' } else { ch };
            fb.put(sx.saturating_add(i), sy, glyph, style);
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let x = layout.panel_x;
        let mut y = layout.frame_y;

        fb.text(x, y, "NEXT", LABEL);
        let next = get_shape(snap.next);
        let color = Style::fg(Rgb::for_piece(snap.next));
        for (dx, dy) in next.cells() {
            let px = x.saturating_add(dx as u16 * self.cell_w);
            for i in 0..self.cell_w {
                fb.put(px.saturating_add(i), y + 1 + dy as u16, '█', color);
            }
        }
        y += 2 + next.height() as u16;

        let mut number = String::with_capacity(12);
        for (label, value) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            number.clear();
            let _ = write!(number, "{}", value);
            fb.text(x, y, label, LABEL);
            fb.text(x, y + 1, &number, VALUE);
            y += 3;
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, layout: &Layout, lines: &[&str]) {
        let mid = layout.frame_y + layout.frame_h / 2;
        let top = mid.saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let w = line.chars().count() as u16;
            let x = layout.frame_x.saturating_add(layout.frame_w.saturating_sub(w) / 2);
            let style = if i == 0 { BANNER } else { LABEL };
            fb.text(x, top + i as u16, line, style);
        }
    }
}
