//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the bordered playfield (each cell `cell_w` columns
//! wide), then a side panel with TIME, LEVEL, LINES, SCORE, the NEXT piece and
//! the most recent log lines.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Block, Color};

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

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
/// Columns of side panel needed before it is drawn at all.
const MIN_PANEL_W: u16 = 12;
/// Rows reserved for the NEXT preview (tallest piece is six blocks).
const NEXT_ROWS: u16 = 6;

/// A lightweight terminal renderer for the polyomino game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    log_lines: usize,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            log_lines: 5,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Number of log lines shown in the side panel (0 hides the section).
    pub fn with_log_lines(mut self, lines: usize) -> Self {
        self.log_lines = lines;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let field_w = clamp_u16(snap.width) * self.cell_w;
        let field_h = clamp_u16(snap.height) * self.cell_h;
        let frame_w = field_w + 2;
        let frame_h = field_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + MIN_PANEL_W + 2) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(0, 200, 200), PANEL_BG);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            field_w,
            field_h,
            ' ',
            CellStyle::new(FIELD_BG, FIELD_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Placed cells.
        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x, y) {
                    Some(color) => self.draw_field_cell(fb, start_x, start_y, x, y, color),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        // Active piece; rows above the top edge are not drawn.
        for block in &snap.active {
            if block.pos.y >= 0 && block.pos.x >= 0 && block.pos.x < snap.width {
                self.draw_field_cell(fb, start_x, start_y, block.pos.x, block.pos.y, block.color);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["GAME OVER", "r: restart"]);
        } else if snap.paused {
            draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn cell_origin(&self, start_x: u16, start_y: u16, x: i32, y: i32) -> (u16, u16) {
        (
            start_x + 1 + clamp_u16(x) * self.cell_w,
            start_y + 1 + clamp_u16(y) * self.cell_h,
        )
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: i32, y: i32) {
        let (px, py) = self.cell_origin(start_x, start_y, x, y);
        let style = CellStyle::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, '·', style);
    }

    fn draw_field_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i32,
        y: i32,
        color: Color,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, x, y);
        let style = CellStyle::new(block_rgb(color), FIELD_BG).bold();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < MIN_PANEL_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(0, 200, 200), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG);
        let rule = CellStyle::new(Rgb::new(0, 120, 120), PANEL_BG);

        let mut y = start_y;
        let section = |fb: &mut FrameBuffer, y: &mut u16, name: &str| {
            fb.put_str(panel_x, *y, name, label);
            *y = y.saturating_add(1);
        };

        section(fb, &mut y, "TIME");
        fb.put_clock(panel_x, y, snap.elapsed_ms, value);
        y = y.saturating_add(1);
        fb.hline(panel_x, y, panel_w.min(MIN_PANEL_W), '─', rule);
        y = y.saturating_add(1);

        for (name, n) in [("LEVEL", snap.level), ("LINES", snap.lines), ("SCORE", snap.score)] {
            section(fb, &mut y, name);
            fb.put_u32(panel_x, y, n, value);
            y = y.saturating_add(1);
            fb.hline(panel_x, y, panel_w.min(MIN_PANEL_W), '─', rule);
            y = y.saturating_add(1);
        }

        section(fb, &mut y, "NEXT");
        draw_preview(fb, panel_x, y, self.cell_w, &snap.next);
        y = y.saturating_add(NEXT_ROWS);

        if self.log_lines == 0 || y >= viewport.height {
            return;
        }
        fb.hline(panel_x, y, panel_w.min(MIN_PANEL_W), '─', rule);
        y = y.saturating_add(1);
        let dim = value.dim();
        for line in snap.recent_log(self.log_lines) {
            if y >= viewport.height {
                break;
            }
            fb.put_str_max(panel_x, y, line, panel_w, dim);
            y = y.saturating_add(1);
        }
    }
}

/// Draw a piece from its local blocks with the top-left cell at `(x, y)`.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, cell_w: u16, blocks: &[Block]) {
    let min_x = blocks.iter().map(|b| b.pos.x).min().unwrap_or(0);
    let min_y = blocks.iter().map(|b| b.pos.y).min().unwrap_or(0);
    for block in blocks {
        let col = clamp_u16(block.pos.x - min_x) * cell_w;
        let row = clamp_u16(block.pos.y - min_y);
        let style = CellStyle::new(block_rgb(block.color), PANEL_BG).bold();
        fb.hline(x.saturating_add(col), y.saturating_add(row), cell_w, '█', style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '╔', style);
    fb.put_char(x + w - 1, y, '╗', style);
    fb.put_char(x, y + h - 1, '╚', style);
    fb.put_char(x + w - 1, y + h - 1, '╝', style);

    fb.hline(x + 1, y, w - 2, '═', style);
    fb.hline(x + 1, y + h - 1, w - 2, '═', style);
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '║', style);
        fb.put_char(x + w - 1, y + dy, '║', style);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(120, 0, 0)).bold();
    let top = y.saturating_add(h / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
        fb.put_str(tx, top.saturating_add(i as u16), text, style);
    }
}

/// Terminal color for a block.
pub fn block_rgb(color: Color) -> Rgb {
    match color {
        Color::Blue => Rgb::new(80, 120, 240),
        Color::Red => Rgb::new(230, 70, 70),
        Color::Green => Rgb::new(90, 210, 110),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Magenta => Rgb::new(210, 100, 220),
        Color::White => Rgb::new(235, 235, 235),
    }
}

fn clamp_u16(v: i32) -> u16 {
    v.clamp(0, i32::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn panel_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_placed_cell_uses_block_color() {
        let mut snap = GameSnapshot::default();
        snap.cells[(24 * snap.width) as usize] = Some(Color::Red);

        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, Viewport::new(80, 30));

        // Field starts at column 1 of the frame; bottom row is y = 25.
        let start_x = (80 - (15 * 2 + 2 + MIN_PANEL_W + 2)) / 2;
        let cell = fb.get(start_x + 1, 25).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, block_rgb(Color::Red));
    }

    #[test]
    fn test_active_above_top_is_hidden() {
        let mut snap = GameSnapshot::default();
        snap.active.push(Block::new(0, -1, Color::Green));
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, Viewport::new(80, 30));
        let green = block_rgb(Color::Green);
        assert!(fb
            .cells()
            .iter()
            .all(|c| !(c.ch == '█' && c.style.fg == green)));
    }

    #[test]
    fn test_panel_sections_and_overlay() {
        let mut snap = GameSnapshot::default();
        snap.score = 1200;
        snap.game_over = true;
        snap.elapsed_ms = 61_000;
        snap.log = vec!["GAME OVER".into()];

        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        let text = panel_text(&fb);
        for label in ["TIME", "LEVEL", "LINES", "SCORE", "NEXT", "1200", "01:01"] {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(text.contains("r: restart"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, Viewport::new(3, 2));
        assert_eq!(fb.cells().len(), 6);
    }
}
