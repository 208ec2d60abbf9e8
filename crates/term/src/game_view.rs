//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. Board row 7 is drawn at the top.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, Position, BOARD_COLS, BOARD_ROWS, UNDO_CAPACITY};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame landed in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Terminal view of one level.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps squares roughly square.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let w = BOARD_COLS as u16 * self.cell_w + 2;
        let h = BOARD_ROWS as u16 * self.cell_h + 2;
        // Leave one row under the frame for the message line.
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h + 1) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLS {
                let pos = Position { row, col };
                let bits = snap.board[row as usize][col as usize];
                let cell = Cell::from_bits(bits).unwrap_or_default();
                let (ch, style) = cell_glyph(cell, snap, pos);
                self.fill_cell_rect(fb, frame, pos, ch, style);
            }
        }

        if snap.player_visible {
            let style = CellStyle::new(Rgb::new(250, 220, 60), PLAY_BG).bold();
            self.fill_cell_rect(fb, frame, snap.player, '@', style);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if let Some(message) = snap.message {
            let style = CellStyle::new(Rgb::new(240, 200, 120), PANEL_BG);
            fb.put_str(frame.x, frame.y.saturating_add(frame.h), message, style);
        }

        if snap.paused {
            self.draw_overlay(fb, frame, "PAUSED", None);
        } else if snap.solved {
            self.draw_overlay(fb, frame, "LEVEL COMPLETE", Some(snap.score));
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

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        pos: Position,
        ch: char,
        style: CellStyle,
    ) {
        let screen_row = (BOARD_ROWS - 1 - pos.row) as u16;
        let px = frame.x + 1 + pos.col as u16 * self.cell_w;
        let py = frame.y + 1 + screen_row * self.cell_h;
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
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y += 1;
        match snap.level {
            Some(level) => fb.put_u32(panel_x, y, level.number() as u32, value),
            None => fb.put_str(panel_x, y, "-", value),
        };
        y += 2;

        fb.put_str(panel_x, y, "STEPS", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.steps, value);
        y += 2;

        fb.put_str(panel_x, y, "TIME", label);
        y += 1;
        let x = fb.put_u32(panel_x, y, snap.seconds / 60, value);
        let x = fb.put_str(x, y, ":", value);
        if snap.seconds % 60 < 10 {
            fb.put_char(x, y, '0', value);
            fb.put_u32(x + 1, y, snap.seconds % 60, value);
        } else {
            fb.put_u32(x, y, snap.seconds % 60, value);
        }
        y += 2;

        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.score, value);
        y += 2;

        fb.put_str(panel_x, y, "UNDO", label);
        y += 1;
        let x = fb.put_u32(panel_x, y, snap.undo_available as u32, value);
        let x = fb.put_str(x, y, "/", value.dim());
        fb.put_u32(x, y, UNDO_CAPACITY as u32, value.dim());
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, text: &str, score: Option<u32>) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, style);

        if let Some(score) = score {
            let x = frame.x.saturating_add(frame.w.saturating_sub(12) / 2);
            let x = fb.put_str(x, mid_y + 1, "SCORE ", style);
            fb.put_u32(x, mid_y + 1, score, style);

            let hint = "ENTER: NEXT LEVEL";
            let x = frame.x.saturating_add(frame.w.saturating_sub(hint.len() as u16) / 2);
            fb.put_str(x, mid_y + 2, hint, style.dim());
        }
    }
}

/// Glyph and style for one board square, before the player is drawn.
fn cell_glyph(cell: Cell, snap: &GameSnapshot, pos: Position) -> (char, CellStyle) {
    let room = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
    match cell {
        Cell::Room => ('·', room),
        Cell::Wall => ('█', CellStyle::new(Rgb::new(140, 140, 150), PLAY_BG)),
        Cell::Box => ('▒', CellStyle::new(Rgb::new(200, 140, 70), PLAY_BG)),
        Cell::Target if snap.targets_visible => {
            ('◇', CellStyle::new(Rgb::new(220, 80, 80), PLAY_BG).bold())
        }
        Cell::Target => ('·', room),
        Cell::BoxOnTarget if snap.push_animation == Some(pos) => {
            ('▓', CellStyle::new(Rgb::new(30, 30, 40), Rgb::new(100, 220, 120)).bold())
        }
        Cell::BoxOnTarget => ('▓', CellStyle::new(Rgb::new(100, 220, 120), PLAY_BG)),
    }
}
