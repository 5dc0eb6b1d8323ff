//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::animation::SlideAnimation;
use crate::core::GameSnapshot;
use crate::fb::{format_u32, CellStyle, FrameBuffer, Rgb};
use crate::types::GRID_SIZE;

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

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    /// Columns between neighbouring tiles.
    gap_x: u16,
    /// Rows between neighbouring tiles.
    gap_y: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 keeps tiles roughly square and fits a 4-digit value with padding.
        Self {
            cell_w: 7,
            cell_h: 3,
            gap_x: 1,
            gap_y: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

const BOARD_BG: Rgb = Rgb::new(119, 110, 101);
const EMPTY_BG: Rgb = Rgb::new(150, 140, 130);
const DARK_TEXT: Rgb = Rgb::new(60, 55, 50);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Distance in columns between the origins of horizontally adjacent tiles.
    pub fn pitch_x(&self) -> u16 {
        self.cell_w + self.gap_x
    }

    /// Distance in rows between the origins of vertically adjacent tiles.
    pub fn pitch_y(&self) -> u16 {
        self.cell_h + self.gap_y
    }

    fn frame_size(&self) -> (u16, u16) {
        let n = GRID_SIZE as u16;
        let inner_w = n * self.cell_w + (n + 1) * self.gap_x;
        let inner_h = n * self.cell_h + (n + 1) * self.gap_y;
        (inner_w + 2, inner_h + 2)
    }

    fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Top-left terminal cell of the tile at `col`, `row`.
    pub fn tile_origin(&self, viewport: Viewport, col: u16, row: u16) -> (u16, u16) {
        let (fx, fy) = self.frame_origin(viewport);
        (
            fx + 1 + self.gap_x + col * self.pitch_x(),
            fy + 1 + self.gap_y + row * self.pitch_y(),
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_frame_into(snap, None, viewport, fb);
    }

    /// Render with an in-flight slide. Tiles come from the slide's pre-move grid
    /// while the panel reflects the committed snapshot.
    pub fn render_frame_into(
        &self,
        snap: &GameSnapshot,
        slide: Option<&SlideAnimation>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let board = CellStyle::new(BOARD_BG, BOARD_BG);

        fb.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, ' ', board);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..GRID_SIZE as u16 {
            for col in 0..GRID_SIZE as u16 {
                let (x, y) = self.tile_origin(viewport, col, row);
                self.draw_tile(fb, x as i32, y as i32, 0);
            }
        }

        match slide {
            Some(anim) => self.draw_slide(fb, anim, viewport),
            None => {
                for (row, line) in snap.grid.iter().enumerate() {
                    for (col, &value) in line.iter().enumerate() {
                        if value != 0 {
                            let (x, y) = self.tile_origin(viewport, col as u16, row as u16);
                            self.draw_tile(fb, x as i32, y as i32, value);
                        }
                    }
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.won() {
            self.draw_overlay_text(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                "YOU WIN!",
                "c: continue  n: new game",
            );
        } else if snap.game_over {
            self.draw_overlay_text(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                "GAME OVER",
                "n: new game",
            );
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_frame(
        &self,
        snap: &GameSnapshot,
        slide: Option<&SlideAnimation>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_frame_into(snap, slide, viewport, &mut fb);
        fb
    }

    fn draw_slide(&self, fb: &mut FrameBuffer, anim: &SlideAnimation, viewport: Viewport) {
        let from = anim.from_grid().rows();
        for (row, line) in from.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 && !anim.is_moving(col as u8, row as u8) {
                    let (x, y) = self.tile_origin(viewport, col as u16, row as u16);
                    self.draw_tile(fb, x as i32, y as i32, value);
                }
            }
        }

        let pitch_x = self.pitch_x() as i32;
        let pitch_y = self.pitch_y() as i32;
        for m in anim.movements() {
            let (x, y) = self.tile_origin(viewport, m.start.col as u16, m.start.row as u16);
            let (dx, dy) = if m.direction.is_horizontal() {
                (anim.shift(m, pitch_x), 0)
            } else {
                (0, anim.shift(m, pitch_y))
            };
            self.draw_tile(fb, x as i32 + dx, y as i32 + dy, m.start_value);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    /// Draw one tile with its top-left at `x`, `y`. A zero value draws an empty slot.
    fn draw_tile(&self, fb: &mut FrameBuffer, x: i32, y: i32, value: u32) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        let style = tile_style(value);
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);
        if value == 0 {
            return;
        }

        let mut digits = [0u8; 10];
        let len = format_u32(value, &mut digits) as u16;
        let tx = x + self.cell_w.saturating_sub(len) / 2;
        let ty = y + self.cell_h / 2;
        fb.put_u32(tx, ty, value, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = value.dim();

        let mut y = start_y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("BEST", snap.best_score),
            ("GOAL", snap.winning_tile),
            ("MOVES", snap.moves),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, v, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "arrows move", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "u undo", if snap.can_undo { value } else { hint });
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "n new game", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "q quit", hint);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        title: &str,
        subtitle: &str,
    ) {
        let band = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        let mid_y = start_y.saturating_add(frame_h / 2).saturating_sub(1);
        fb.fill_rect(start_x + 1, mid_y, frame_w.saturating_sub(2), 3, ' ', band);

        for (dy, text, style) in [(0, title, band.bold()), (2, subtitle, band.dim())] {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, mid_y + dy, text, style);
        }
    }
}

fn tile_style(value: u32) -> CellStyle {
    let (bg, fg) = match value {
        0 => (EMPTY_BG, EMPTY_BG),
        2 => (Rgb::new(238, 228, 218), DARK_TEXT),
        4 => (Rgb::new(237, 224, 200), DARK_TEXT),
        8 => (Rgb::new(242, 177, 121), LIGHT_TEXT),
        16 => (Rgb::new(245, 149, 99), LIGHT_TEXT),
        32 => (Rgb::new(246, 124, 95), LIGHT_TEXT),
        64 => (Rgb::new(246, 94, 59), LIGHT_TEXT),
        128 => (Rgb::new(237, 207, 114), LIGHT_TEXT),
        256 => (Rgb::new(237, 204, 97), LIGHT_TEXT),
        512 => (Rgb::new(237, 200, 80), LIGHT_TEXT),
        1024 => (Rgb::new(237, 197, 63), LIGHT_TEXT),
        2048 => (Rgb::new(237, 194, 46), LIGHT_TEXT),
        _ => (Rgb::new(60, 58, 50), LIGHT_TEXT),
    };
    let style = CellStyle::new(fg, bg);
    if value >= 8 {
        style.bold()
    } else {
        style
    }
}
