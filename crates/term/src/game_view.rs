//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so every frame can be checked in unit tests.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

pub const PAGE_BG: Rgb = Rgb::from_hex(0x0b0c10);
pub const WELL_BG: Rgb = Rgb::from_hex(0x0f1116);

const GHOST_ALPHA_PCT: u8 = 25;
/// Game over dims the well to 40% brightness before printing the message.
const GAME_OVER_SHADE_PCT: u8 = 60;

const PAUSED_TEXT: &str = "PAUSED";
const GAME_OVER_TEXT: &str = "Game Over";
const LEVEL_UP_TEXT: &str = "LEVEL UP";

const HELP: [&str; 7] = [
    "←/→ move",
    "↓ soft drop",
    "␣ hard drop",
    "↑/x rotate",
    "z rotate ccw",
    "p pause",
    "r restart",
];

/// Display color of a piece kind.
pub const fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::from_hex(0x00ffff),
        PieceKind::J => Rgb::from_hex(0x4169e1),
        PieceKind::L => Rgb::from_hex(0xffa500),
        PieceKind::O => Rgb::from_hex(0xffd700),
        PieceKind::S => Rgb::from_hex(0x32cd32),
        PieceKind::T => Rgb::from_hex(0xba55d3),
        PieceKind::Z => Rgb::from_hex(0xff4d4d),
    }
}

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

/// Terminal rectangle occupied by the bordered well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// Renders the well, the side panel and overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Where the bordered well lands in `viewport`, centered.
    pub fn well_rect(&self, viewport: Viewport) -> WellRect {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        WellRect {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Allocation-free once the framebuffer has its size; callers reuse it across frames.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PAGE_BG).cell(' '));

        let well = self.well_rect(viewport);
        let border = CellStyle::new(Rgb::new(90, 94, 110), PAGE_BG);
        self.draw_border(fb, well, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_block(fb, well, x as i8, y as i8, *kind),
                    None => {
                        let empty = CellStyle::new(WELL_BG, WELL_BG);
                        self.fill_cell_rect(fb, well, x as u16, y as u16, ' ', empty);
                    }
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let tint = WELL_BG.blend(Rgb::new(255, 255, 255), GHOST_ALPHA_PCT);
            let ghost = CellStyle::new(tint, WELL_BG).dim();
            for (dx, dy) in active.shape.cells() {
                let x = active.x + dx;
                let y = ghost_y + dy;
                if in_well(x, y) {
                    self.fill_cell_rect(fb, well, x as u16, y as u16, '░', ghost);
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                self.draw_block(fb, well, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, well);

        if snap.game_over {
            self.shade_well(fb, well);
            self.draw_overlay_text(fb, well, GAME_OVER_TEXT);
        } else if snap.paused {
            self.draw_overlay_text(fb, well, PAUSED_TEXT);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, well: WellRect, style: CellStyle) {
        let WellRect { x, y, w, h } = well;
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

    /// A filled block in the piece's color. Cells above the well are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, well: WellRect, x: i8, y: i8, kind: PieceKind) {
        if !in_well(x, y) {
            return;
        }
        let style = CellStyle::new(piece_color(kind), WELL_BG).bold();
        self.fill_cell_rect(fb, well, x as u16, y as u16, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        well: WellRect,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = well.x + 1 + cell_x * self.cell_w;
        let py = well.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn shade_well(&self, fb: &mut FrameBuffer, well: WellRect) {
        let black = Rgb::new(0, 0, 0);
        for y in well.y + 1..well.y + well.h - 1 {
            for x in well.x + 1..well.x + well.w - 1 {
                fb.update(x, y, |cell| {
                    cell.style.fg = cell.style.fg.blend(black, GAME_OVER_SHADE_PCT);
                    cell.style.bg = cell.style.bg.blend(black, GAME_OVER_SHADE_PCT);
                });
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        well: WellRect,
    ) {
        let panel_x = well.x.saturating_add(well.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PAGE_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PAGE_BG);
        let hint = value.dim();

        let mut y = well.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x, y + 1, snap.drop_interval_ms, value);
        let digits = snap.drop_interval_ms.max(1).ilog10() as u16 + 1;
        fb.put_str(panel_x + digits, y + 1, "ms", hint);
        y = y.saturating_add(3);

        // Last lock: piece letter in its colour, then the points its clear earned.
        if let Some(event) = snap.last_lock {
            fb.put_str(panel_x, y, "LAST", label);
            let block = CellStyle::new(piece_color(event.kind), PAGE_BG).bold();
            fb.put_char(panel_x, y + 1, event.kind.letter(), block);
            fb.put_char(panel_x + 2, y + 1, '+', value);
            fb.put_u32(panel_x + 3, y + 1, event.line_clear_score, value);
            if event.leveled_up {
                fb.put_str(panel_x, y + 2, LEVEL_UP_TEXT, label);
            }
        }
        y = y.saturating_add(4);

        for line in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, well: WellRect, text: &str) {
        let mid_y = well.y.saturating_add(well.h / 2);
        let text_w = text.chars().count() as u16;
        let x = well.x.saturating_add(well.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn in_well(x: i8, y: i8) -> bool {
    (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y)
}
