//! Software-rendered visualizer using `minifb`.
//!
//! In simulation mode the window is also the frame source: every window
//! update is one frame, sampled from the mouse and the pinch key.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ DISTANCE: 87                                             │
//! │                                                          │
//! │              (o) index tip      ┼ pointer                │
//! │                \ |  hand skeleton                        │
//! │                 (o) thumb tip                            │
//! │                                                          │
//! │ status bar: clicks · pinch state · frame                 │
//! │ key legend                                               │
//! └──────────────────────────────────────────────────────────┘
//! ```

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use pinch_pointer::io::{FrameSource, Overlay, StopSignal};
use pinch_pointer::{ControlError, FrameReport, PinchState, ScreenPoint, ScreenSpace, HAND_CONNECTIONS};

use crate::error::AppError;
use crate::source::SimFrame;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:     usize = 960;
pub const WIN_H:     usize = 540;
const STATUS_H:      usize = 36;
const STATUS_Y:      usize = WIN_H - STATUS_H;
const TIP_RADIUS:    usize = 8;
const JOINT_RADIUS:  usize = 2;
const FLASH_FRAMES:  u8    = 8;
const BG_COLOR:      u32   = 0xFF1A1A2E;
const TEXT_BG:       u32   = 0xFF0F3460;
const INDEX_COLOR:   u32   = 0xFF3B82F6;  // blue
const THUMB_COLOR:   u32   = 0xFF22C55E;  // green
const LINK_COLOR:    u32   = 0xFF888888;
const BONE_COLOR:    u32   = 0xFF4B5563;
const POINTER_COLOR: u32   = 0xFFFFFFFF;
const PINCH_COLOR:   u32   = 0xFFFFD700;  // gold
const NO_HAND_COLOR: u32   = 0xFFE94560;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    stop:   StopSignal,
    /// Space the reports' coordinates live in; scaled down to the window.
    target: ScreenSpace,
    clicks: u64,
    flash:  u8,
}

impl Visualizer {
    pub fn new(stop: StopSignal) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Hand Mouse — pinch to click",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            stop,
            target: Self::window_space()?,
            clicks: 0,
            flash:  0,
        })
    }

    /// Target space of a pointer that lives inside this window.
    pub fn window_space() -> Result<ScreenSpace, ControlError> {
        ScreenSpace::new(WIN_W as u32, WIN_H as u32)
    }

    /// Space the control loop maps into, for scaling overlay coordinates.
    pub fn set_target(&mut self, target: ScreenSpace) {
        self.target = target;
    }

    fn to_window(&self, p: ScreenPoint) -> (usize, usize) {
        let sx = WIN_W as f64 / self.target.width()  as f64;
        let sy = WIN_H as f64 / self.target.height() as f64;
        (
            ((p.x as f64 * sx) as usize).min(WIN_W - 1),
            ((p.y as f64 * sy) as usize).min(WIN_H - 1),
        )
    }

    fn poll_quit(&mut self) {
        if !self.window.is_open()
            || self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
        {
            self.stop.request();
        }
    }

    fn draw(&mut self, report: &FrameReport) {
        self.buf.fill(BG_COLOR);

        if report.clicked() {
            self.clicks += 1;
            self.flash = FLASH_FRAMES;
        }

        match report.hand {
            Some(hand) => {
                let (ix, iy) = self.to_window(hand.index_tip);
                let (tx, ty) = self.to_window(hand.thumb_tip);
                let (px, py) = self.to_window(hand.pointer);

                for (a, b) in HAND_CONNECTIONS {
                    let (ax, ay) = self.to_window(hand.skeleton[a.index()]);
                    let (bx, by) = self.to_window(hand.skeleton[b.index()]);
                    self.draw_line(ax, ay, bx, by, BONE_COLOR);
                }
                for joint in hand.skeleton {
                    let (jx, jy) = self.to_window(joint);
                    self.fill_circle(jx, jy, JOINT_RADIUS, BONE_COLOR);
                }

                let link = if report.state == PinchState::Pinched { PINCH_COLOR } else { LINK_COLOR };
                self.draw_line(ix, iy, tx, ty, link);
                self.fill_circle(ix, iy, TIP_RADIUS, INDEX_COLOR);
                self.fill_circle(tx, ty, TIP_RADIUS, THUMB_COLOR);
                self.draw_crosshair(px, py, 10, POINTER_COLOR);
                if self.flash > 0 {
                    let r = TIP_RADIUS + 2 * (FLASH_FRAMES - self.flash) as usize;
                    self.draw_ring(px, py, r, PINCH_COLOR);
                }

                let readout = format!("DISTANCE: {}", hand.distance as i64);
                self.draw_label(&readout, 10, 10, 0xFFEEEEEE);
            }
            None => {
                self.draw_label("NO HAND", 10, 10, NO_HAND_COLOR);
            }
        }
        self.flash = self.flash.saturating_sub(1);

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, STATUS_H, TEXT_BG);
        let state = match report.state {
            PinchState::Idle    => "OPEN",
            PinchState::Pinched => "PINCHED",
        };
        let status = format!("CLICKS: {}   STATE: {}   FRAME: {}", self.clicks, state, report.frame);
        self.draw_label(&status, 10, STATUS_Y + 8, 0xFFEEEEEE);
        self.draw_label(
            "MOUSE=INDEX TIP  SPACE/LEFT BUTTON=PINCH  Q/ESC=QUIT",
            10, WIN_H - 12, 0xFF888888,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(WIN_H) {
            for col in x..(x+w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    fn fill_circle(&mut self, cx: usize, cy: usize, r: usize, color: u32) {
        let (cx, cy, r) = (cx as isize, cy as isize, r as isize);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx*dx + dy*dy <= r*r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn draw_ring(&mut self, cx: usize, cy: usize, r: usize, color: u32) {
        let (cx, cy, r) = (cx as isize, cy as isize, r as isize);
        let inner = (r - 1) * (r - 1);
        for dy in -r..=r {
            for dx in -r..=r {
                let d = dx*dx + dy*dy;
                if d <= r*r && d >= inner {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn draw_crosshair(&mut self, cx: usize, cy: usize, arm: usize, color: u32) {
        let (cx, cy, arm) = (cx as isize, cy as isize, arm as isize);
        for d in -arm..=arm {
            self.set_pixel(cx + d, cy, color);
            self.set_pixel(cx, cy + d, color);
        }
    }

    fn draw_line(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, color: u32) {
        let (x0, y0, x1, y1) = (x0 as f32, y0 as f32, x1 as f32, y1 as f32);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.set_pixel(x.round() as isize, y.round() as isize, color);
        }
    }

    /// Minimal bitmap font — 3×5 characters.
    /// Each character is encoded as 5 rows × 3 bits.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel((cx + col) as isize, (y + row) as isize, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W { break; }
        }
    }
}

impl FrameSource for Visualizer {
    type Frame = SimFrame;

    /// `None` once the window has been closed.
    fn next_frame(&mut self) -> Option<SimFrame> {
        if !self.window.is_open() { return None; }

        let cursor = self.window.get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x / WIN_W as f32, y / WIN_H as f32));
        let pinching = self.window.get_mouse_down(MouseButton::Left)
            || self.window.is_key_down(Key::Space);
        Some(SimFrame { cursor, pinching })
    }
}

impl<F> Overlay<F> for Visualizer {
    fn render(&mut self, _frame: &F, report: &FrameReport) {
        self.draw(report);
        self.poll_quit();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_character_has_a_glyph() {
        let fallback = char_glyph('\u{1}');
        let labels = "DISTANCE: NO HAND CLICKS STATE OPEN PINCHED FRAME 0123456789 \
                      MOUSE=INDEX TIP SPACE/LEFT BUTTON=PINCH Q/ESC=QUIT";
        for ch in labels.chars().filter(|c| *c != ' ') {
            assert_ne!(char_glyph(ch), fallback, "missing glyph for {:?}", ch);
        }
    }

    #[test]
    fn digits_are_distinguishable() {
        let digits: Vec<[u8; 5]> = ('0'..='9').map(char_glyph).collect();
        for (i, a) in digits.iter().enumerate() {
            for (j, b) in digits.iter().enumerate().skip(i + 1) {
                assert_ne!(a, b, "digits {} and {} render the same", i, j);
            }
        }
    }
}
