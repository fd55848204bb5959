//! PuzzleView: maps a `core::PuzzleSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O) and renders entirely from the snapshot, so
//! every frame is a function of board state. Each tile is painted with its
//! own window into a color field derived from the level's opaque texture id,
//! the terminal stand-in for slicing a picture into tiles: the color travels
//! with the tile, so a scrambled board looks scrambled.
//!
//! The view also owns hit-testing: translating a terminal mouse position
//! into a board slot index is a presentation concern, and the board never
//! sees anything but the resulting index.

use crate::core::PuzzleSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::BoardEvent;

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

/// Per-frame UI state that lives outside the board snapshot.
#[derive(Debug, Clone, Copy)]
pub struct HudView<'a> {
    /// Slot under the keyboard cursor.
    pub cursor: Option<usize>,
    /// Slots whose tiles could slide right now.
    pub movable: &'a [usize],
    /// Unlocked level count, for the side panel.
    pub unlocked: usize,
    pub level_count: usize,
    /// Most recent feedback cue, if still fresh.
    pub flash: Option<BoardEvent>,
}

impl Default for HudView<'_> {
    fn default() -> Self {
        Self {
            cursor: None,
            movable: &[],
            unlocked: 1,
            level_count: 1,
            flash: None,
        }
    }
}

/// A lightweight terminal renderer for the puzzle board.
pub struct PuzzleView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for PuzzleView {
    fn default() -> Self {
        // 6x3 keeps tiles roughly square in common terminal fonts and
        // leaves room for a centered two-digit label.
        Self {
            cell_w: 6,
            cell_h: 3,
        }
    }
}

impl PuzzleView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_size(&self, size: usize) -> (u16, u16) {
        (
            size as u16 * self.cell_w + 2,
            size as u16 * self.cell_h + 2,
        )
    }

    fn frame_origin(&self, size: usize, viewport: Viewport) -> (u16, u16) {
        let (fw, fh) = self.frame_size(size);
        (
            viewport.width.saturating_sub(fw) / 2,
            viewport.height.saturating_sub(fh) / 2,
        )
    }

    /// Translate a terminal mouse position into the board slot under it.
    pub fn hit_test(
        &self,
        size: usize,
        viewport: Viewport,
        column: u16,
        row: u16,
    ) -> Option<usize> {
        if size == 0 {
            return None;
        }
        let (ox, oy) = self.frame_origin(size, viewport);
        let inner_x = column.checked_sub(ox + 1)?;
        let inner_y = row.checked_sub(oy + 1)?;
        let col = (inner_x / self.cell_w) as usize;
        let r = (inner_y / self.cell_h) as usize;
        if col >= size || r >= size {
            return None;
        }
        Some(r * size + col)
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it only reallocates when
    /// the terminal size changes.
    pub fn render_into(
        &self,
        snap: &PuzzleSnapshot,
        hud: &HudView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());
        if snap.size == 0 {
            return;
        }

        let (ox, oy) = self.frame_origin(snap.size, viewport);
        let (fw, fh) = self.frame_size(snap.size);

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        self.draw_border(fb, ox, oy, fw, fh, border);

        let seed = texture_seed(&snap.texture);
        let empty_identity = snap.cells.len().saturating_sub(1) as u16;

        for (slot, &identity) in snap.cells.iter().enumerate() {
            let row = slot / snap.size;
            let col = slot % snap.size;
            let px = ox + 1 + col as u16 * self.cell_w;
            let py = oy + 1 + row as u16 * self.cell_h;

            let style = if identity == empty_identity {
                let style = CellStyle {
                    fg: Rgb::new(70, 70, 80),
                    bg: Rgb::new(24, 24, 32),
                    bold: false,
                    dim: true,
                };
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
                style
            } else {
                let home = identity as usize;
                let bg = tile_rgb(seed, home / snap.size, home % snap.size, snap.size);
                let style = CellStyle {
                    fg: contrast_fg(bg),
                    bg,
                    bold: hud.movable.contains(&slot),
                    dim: false,
                };
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

                let label = identity as u32 + 1;
                let lw = decimal_width(label);
                let lx = px + self.cell_w.saturating_sub(lw) / 2;
                let ly = py + self.cell_h / 2;
                fb.put_u32(lx, ly, label, style);
                style
            };

            if hud.cursor == Some(slot) {
                let marker = CellStyle {
                    fg: Rgb::new(255, 255, 255),
                    bg: style.bg,
                    bold: true,
                    dim: false,
                };
                let my = py + self.cell_h / 2;
                fb.put_char(px, my, '[', marker);
                fb.put_char(px + self.cell_w - 1, my, ']', marker);
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, ox, oy, fw);

        if snap.pending_shuffle_ms.is_some() {
            self.draw_overlay_text(fb, ox, oy, fw, fh, "GET READY");
        } else if snap.solved {
            self.draw_overlay_text(fb, ox, oy, fw, fh, "SOLVED!");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &PuzzleSnapshot, hud: &HudView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
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

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &PuzzleSnapshot,
        hud: &HudView,
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
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let hint = CellStyle { dim: true, ..value };

        let mut y = start_y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        put_pair(
            fb,
            panel_x,
            y,
            snap.level_index as u32 + 1,
            '/',
            hud.level_count as u32,
            value,
        );
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SIZE", label);
        y = y.saturating_add(1);
        put_pair(
            fb,
            panel_x,
            y,
            snap.size as u32,
            'x',
            snap.size as u32,
            value,
        );
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TEXTURE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &snap.texture, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "UNLOCKED", label);
        y = y.saturating_add(1);
        put_pair(
            fb,
            panel_x,
            y,
            hud.unlocked as u32,
            '/',
            hud.level_count as u32,
            value,
        );
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, state_label(snap), value);
        y = y.saturating_add(2);

        if let Some(event) = hud.flash {
            fb.put_str(panel_x, y, flash_label(event), label);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ENTER TAP", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "R RESTART N NEXT", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "Q QUIT", hint);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn state_label(snap: &PuzzleSnapshot) -> &'static str {
    if snap.solved {
        "SOLVED"
    } else if snap.pending_shuffle_ms.is_some() {
        "READY"
    } else if snap.started {
        "PLAY"
    } else {
        "WAITING"
    }
}

fn flash_label(event: BoardEvent) -> &'static str {
    match event {
        BoardEvent::MoveApplied => "TILE SLID",
        BoardEvent::MoveRejected => "NO ROOM",
        BoardEvent::Solved => "PUZZLE SOLVED",
    }
}

/// `a`, a separator, then `b`, without allocating.
fn put_pair(fb: &mut FrameBuffer, x: u16, y: u16, a: u32, sep: char, b: u32, style: CellStyle) {
    fb.put_u32(x, y, a, style);
    let w = decimal_width(a);
    fb.put_char(x + w, y, sep, style);
    fb.put_u32(x + w + 1, y, b, style);
}

fn decimal_width(mut value: u32) -> u16 {
    let mut width = 1;
    while value >= 10 {
        value /= 10;
        width += 1;
    }
    width
}

/// Stable 32-bit hash of the opaque texture id (FNV-1a).
fn texture_seed(texture: &str) -> u32 {
    let mut hash: u32 = 0x811C_9DC5;
    for byte in texture.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// The tile's home-position window into the level's color field: two anchor
/// colors derived from the texture id, blended along the grid diagonal.
fn tile_rgb(seed: u32, home_row: usize, home_col: usize, size: usize) -> Rgb {
    let a = anchor_rgb(seed, 0x00C0_FFEE);
    let b = anchor_rgb(seed, 0x0BA5_EBA1);
    let num = home_row + home_col;
    let den = 2 * (size - 1).max(1);
    Rgb::new(
        lerp_channel(a.r, b.r, num, den),
        lerp_channel(a.g, b.g, num, den),
        lerp_channel(a.b, b.b, num, den),
    )
}

fn anchor_rgb(seed: u32, salt: u32) -> Rgb {
    let mixed = (seed ^ salt).wrapping_mul(0x9E37_79B9);
    Rgb::new(
        70 + ((mixed >> 8) & 0x7F) as u8,
        70 + ((mixed >> 16) & 0x7F) as u8,
        70 + ((mixed >> 24) & 0x7F) as u8,
    )
}

fn lerp_channel(a: u8, b: u8, num: usize, den: usize) -> u8 {
    let a = a as i32;
    let b = b as i32;
    (a + (b - a) * num as i32 / den as i32) as u8
}

fn contrast_fg(bg: Rgb) -> Rgb {
    let luminance = (2 * bg.r as u32 + 3 * bg.g as u32 + bg.b as u32) / 6;
    if luminance > 140 {
        Rgb::new(16, 16, 16)
    } else {
        Rgb::new(240, 240, 240)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_snapshot(size: usize) -> PuzzleSnapshot {
        PuzzleSnapshot {
            size,
            cells: (0..size * size).map(|c| c as u16).collect(),
            empty_index: size * size - 1,
            started: true,
            locked: false,
            solved: false,
            moves: 0,
            pending_shuffle_ms: None,
            level_index: 0,
            texture: "meadow".to_string(),
        }
    }

    fn row_string(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width())
            .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect()
    }

    fn contains_text(fb: &FrameBuffer, needle: &str) -> bool {
        (0..fb.height()).any(|y| row_string(fb, y).contains(needle))
    }

    #[test]
    fn test_hit_test_round_trip() {
        let view = PuzzleView::default();
        let viewport = Viewport::new(100, 36);
        let size = 3;
        let (ox, oy) = view.frame_origin(size, viewport);

        for slot in 0..size * size {
            let row = slot / size;
            let col = slot % size;
            // Center of the slot's rectangle.
            let x = ox + 1 + col as u16 * view.cell_w + view.cell_w / 2;
            let y = oy + 1 + row as u16 * view.cell_h + view.cell_h / 2;
            assert_eq!(view.hit_test(size, viewport, x, y), Some(slot));
        }
    }

    #[test]
    fn test_hit_test_outside_board() {
        let view = PuzzleView::default();
        let viewport = Viewport::new(100, 36);
        assert_eq!(view.hit_test(3, viewport, 0, 0), None);
        assert_eq!(view.hit_test(3, viewport, 79, 23), None);
        assert_eq!(view.hit_test(0, viewport, 40, 12), None);
    }

    #[test]
    fn test_render_shows_tile_labels_but_not_the_empty_tile() {
        let view = PuzzleView::default();
        let snap = identity_snapshot(3);
        let fb = view.render(&snap, &HudView::default(), Viewport::new(100, 36));

        // Tiles 1..=8 are labeled; the empty tile (identity 8, label "9")
        // never is.
        for label in ["1", "2", "8"] {
            assert!(contains_text(&fb, label), "missing label {}", label);
        }
        assert!(!contains_text(&fb, "9"));
    }

    #[test]
    fn test_render_panel_and_state() {
        let view = PuzzleView::default();
        let snap = identity_snapshot(3);
        let hud = HudView {
            unlocked: 2,
            level_count: 6,
            ..HudView::default()
        };
        let fb = view.render(&snap, &hud, Viewport::new(100, 36));

        assert!(contains_text(&fb, "LEVEL"));
        assert!(contains_text(&fb, "MOVES"));
        assert!(contains_text(&fb, "meadow"));
        assert!(contains_text(&fb, "2/6"));
        assert!(contains_text(&fb, "PLAY"));
    }

    #[test]
    fn test_render_overlays() {
        let view = PuzzleView::default();
        let viewport = Viewport::new(100, 36);

        let mut snap = identity_snapshot(3);
        snap.started = false;
        snap.locked = true;
        snap.pending_shuffle_ms = Some(500);
        let fb = view.render(&snap, &HudView::default(), viewport);
        assert!(contains_text(&fb, "GET READY"));
        assert!(contains_text(&fb, "READY"));

        let mut snap = identity_snapshot(3);
        snap.solved = true;
        snap.locked = true;
        let fb = view.render(&snap, &HudView::default(), viewport);
        assert!(contains_text(&fb, "SOLVED!"));
    }

    #[test]
    fn test_render_flash_cue() {
        let view = PuzzleView::default();
        let snap = identity_snapshot(3);
        let hud = HudView {
            flash: Some(BoardEvent::MoveRejected),
            ..HudView::default()
        };
        let fb = view.render(&snap, &hud, Viewport::new(100, 36));
        assert!(contains_text(&fb, "NO ROOM"));
    }

    #[test]
    fn test_tile_colors_differ_per_texture() {
        let a = tile_rgb(texture_seed("meadow"), 0, 0, 3);
        let b = tile_rgb(texture_seed("harbor"), 0, 0, 3);
        assert_ne!(a, b);
    }

    #[test]
    fn test_tile_colors_form_a_gradient() {
        let seed = texture_seed("meadow");
        let first = tile_rgb(seed, 0, 0, 4);
        let last = tile_rgb(seed, 3, 3, 4);
        let anchor_b = anchor_rgb(seed, 0x0BA5_EBA1);
        assert_ne!(first, last);
        assert_eq!(last, anchor_b);
    }

    #[test]
    fn test_decimal_width() {
        assert_eq!(decimal_width(0), 1);
        assert_eq!(decimal_width(9), 1);
        assert_eq!(decimal_width(10), 2);
        assert_eq!(decimal_width(255), 3);
    }
}
