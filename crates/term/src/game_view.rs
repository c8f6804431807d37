//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer};
use crate::palette::Palette;
use crate::types::{BusyPhase, SessionState};

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

const BLOCK: char = '█';
const GHOST: char = '░';
const DOT: char = '·';

/// Side panel width including its gap from the board frame.
const PANEL_W: u16 = 14;

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    palette: Palette,
    controls_hint: Option<&'static str>,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(2, 1)
    }
}

/// Top-left of the board frame and its size, in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            palette: Palette::default(),
            controls_hint: None,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Show a one-line key summary under the board.
    pub fn with_controls_hint(mut self, hint: &'static str) -> Self {
        self.controls_hint = Some(hint);
        self
    }

    pub fn hide_controls_hint(&mut self) {
        self.controls_hint = None;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let p = &self.palette;
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(p.label, p.background).cell(' '));

        let frame_w = snap.width as u16 * self.cell_w + 2;
        let frame_h = snap.height as u16 * self.cell_h + 2;
        let total_w = frame_w + PANEL_W;
        let frame = Frame {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            w: frame_w,
            h: frame_h,
        };

        self.draw_border(fb, frame, CellStyle::new(p.border, p.background));

        let dot = CellStyle::new(p.grid, p.board).dim();
        for y in 0..snap.height as i8 {
            for x in 0..snap.width as i8 {
                match snap.cell(x, y) {
                    Some(tag) => {
                        let style = CellStyle::new(self.palette.piece(tag), p.board);
                        self.fill_board_cell(fb, frame, x, y, BLOCK, style);
                    }
                    None => self.fill_board_cell(fb, frame, x, y, DOT, dot),
                }
            }
        }

        if let Some(tag) = snap.active_color {
            let ghost = CellStyle::new(self.palette.piece(tag), p.board).dim();
            for &(x, y) in snap.ghost.iter() {
                if !snap.is_active_cell(x, y) {
                    self.fill_board_cell(fb, frame, x, y, GHOST, ghost);
                }
            }
            let active = CellStyle::new(self.palette.piece(tag), p.board).bold();
            for &(x, y) in snap.active.iter() {
                self.fill_board_cell(fb, frame, x, y, BLOCK, active);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);
        self.draw_overlay(fb, snap, frame);

        if let Some(hint) = self.controls_hint {
            let y = frame.y.saturating_add(frame.h);
            if y < viewport.height {
                let w = hint.chars().count() as u16;
                let x = viewport.width.saturating_sub(w) / 2;
                fb.put_str(x, y, hint, CellStyle::new(p.label, p.background).dim());
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }
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

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || y < 0 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let p = &self.palette;
        let label = CellStyle::new(p.label, p.background).bold();
        let value = CellStyle::new(p.counter, p.background);

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("BEST", snap.best_score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(kind) = snap.next {
            let style = CellStyle::new(p.piece(kind.color()), p.background);
            for &(dx, dy) in snap.next_cells.iter() {
                let px = panel_x + dx as u16 * 2;
                let py = y + dy as u16;
                fb.fill_rect(px, py, 2, 1, BLOCK, style);
            }
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let mut countdown = [0u8; 10];
        let (line1, line2): (&str, Option<&str>) = match (snap.state, snap.busy) {
            (SessionState::NotStarted, _) => ("PRESS ENTER", None),
            (SessionState::Paused, _) => ("PAUSED", Some("P TO RESUME")),
            (SessionState::GameOver, Some(BusyPhase::Finalizing)) => ("GAME OVER", None),
            (SessionState::GameOver, _) => ("GAME OVER", Some("PRESS ENTER")),
            (SessionState::Playing, Some(BusyPhase::Countdown)) => {
                let secs = snap.countdown_secs().unwrap_or(0);
                ("READY", Some(format_small(secs, &mut countdown)))
            }
            (SessionState::Playing, _) => return,
        };

        let p = &self.palette;
        let style = CellStyle::new(p.overlay, p.background).bold();
        let mid_y = frame.y.saturating_add(frame.h / 2);
        self.put_centered(fb, frame, mid_y.saturating_sub(1), line1, style);
        if let Some(text) = line2 {
            self.put_centered(fb, frame, mid_y.saturating_add(1), text, style);
        }
    }

    fn put_centered(&self, fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}

/// Format `value` into `buf` without allocating. Ten digits hold any `u32`.
fn format_small(value: u32, buf: &mut [u8; 10]) -> &str {
    let mut n = value;
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    std::str::from_utf8(&buf[start..]).unwrap_or("")
}
