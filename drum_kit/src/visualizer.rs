//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────┬──────┬──────┬──────┬──────┐
//! │ Kick │Snare │HiHat │ Tom  │ Clap │   ← one band per zone, with
//! │  ◯   │ ▭    │  ≂   │  ◯   │ ▭▭  │     an instrument silhouette
//! │      │      │      │      │      │
//! │    • finger markers, ◌ pulses    │
//! ├──────┴──────┴──────┴──────┴──────┤
//! │ status bar / key legend          │
//! └──────────────────────────────────┘
//! ```
//!
//! The window doubles as the simulation input device: mouse position and a
//! few keys are forwarded to the [`SimHandSource`](crate::tracking) over a
//! channel, mirroring how the payload flows the other way.

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use std::sync::mpsc::Sender;

use tap_engine::{Finger, RenderPayload, Zone};

use crate::tracking::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 1280;
pub const WIN_H: usize = 720;
const STATUS_Y: usize = WIN_H - 48;
const MARKER_RADIUS: i32 = 10;
const BG_COLOR: u32 = 0xFF1A1A2E;
const BAND_EVEN: u32 = 0xFF20203A;
const BAND_ODD: u32 = 0xFF1C1C33;
const BAND_BORDER: u32 = 0xFF3A3A5C;
const TEXT_BG: u32 = 0xFF0F3460;

/// Silhouette color for a zone, keyed by its instrument name.
fn zone_art_color(name: &str) -> u32 {
    match name {
        "Kick" => 0xFFFF8C69,
        "Snare" => 0xFFFFE65A,
        "HiHat" => 0xFF78E696,
        "Tom" => 0xFF78AAFF,
        "Clap" => 0xFFE696FF,
        _ => 0xFFDCDCDC,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    sim_tx: Sender<SimInput>,
    lifted: bool,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, String> {
        let mut window = Window::new(
            "Drum Kit — fingertip taps",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            lifted: false,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll window input and forward it as [`SimInput`] events.
    /// Returns false when the user quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }

        let one_shot = |w: &Window, k: Key| w.is_key_pressed(k, KeyRepeat::No);

        if one_shot(&self.window, Key::Q) || one_shot(&self.window, Key::Escape) {
            return false;
        }

        const FINGER_KEYS: [(Key, Finger); 5] = [
            (Key::Key1, Finger::Thumb),
            (Key::Key2, Finger::Index),
            (Key::Key3, Finger::Middle),
            (Key::Key4, Finger::Ring),
            (Key::Key5, Finger::Pinky),
        ];
        for (key, finger) in FINGER_KEYS {
            if one_shot(&self.window, key) {
                let _ = self.sim_tx.send(SimInput::SelectFinger(finger));
            }
        }

        // Space lifts the hand while held.
        let lifted = self.window.is_key_down(Key::Space);
        if lifted != self.lifted {
            self.lifted = lifted;
            let _ = self.sim_tx.send(SimInput::Lift(lifted));
        }

        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let _ = self.sim_tx.send(SimInput::Pointer {
                x: mx / WIN_W as f32,
                y: my / WIN_H as f32,
            });
        }

        true
    }

    /// Render one frame from the engine's payload snapshot.
    pub fn render(&mut self, payload: &RenderPayload, status: &str) {
        self.buf.fill(BG_COLOR);

        // ── Zone bands with instrument silhouettes ────────────────────────
        for (i, zone) in payload.zones.iter().enumerate() {
            self.draw_zone_band(zone, i);
        }

        // ── Tap pulses (under the markers) ────────────────────────────────
        for pulse in &payload.pulses {
            self.draw_circle(pulse.x, pulse.y, pulse.radius, pulse.color);
            if pulse.radius > 1 {
                self.draw_circle(pulse.x, pulse.y, pulse.radius - 1, pulse.color);
            }
        }

        // ── Finger markers ────────────────────────────────────────────────
        for marker in &payload.markers {
            self.fill_circle(marker.x, marker.y, MARKER_RADIUS, marker.color);
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        self.draw_text(status, 10, STATUS_Y + 8, 2, 0xFFEEEEEE);
        self.draw_text(
            "mouse=fingertip  1-5=pick finger  space=lift  q=quit",
            10,
            WIN_H - 14,
            1,
            0xFF888888,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Zone band ─────────────────────────────────────────────────────────

    fn draw_zone_band(&mut self, zone: &Zone, index: usize) {
        let x0 = zone.x_min.max(0) as usize;
        let x1 = (zone.x_max.max(0) as usize).min(WIN_W);
        if x1 <= x0 {
            return;
        }
        let w = x1 - x0;
        let fill = if index % 2 == 0 { BAND_EVEN } else { BAND_ODD };

        self.fill_rect(x0, 0, w, STATUS_Y, fill);
        self.draw_border(x0, 0, w, STATUS_Y, BAND_BORDER);
        self.draw_text(&zone.name, x0 + 12, 14, 3, zone_art_color(&zone.name));
        self.draw_instrument_art(zone, x0 as i32, x1 as i32);
    }

    /// Simple silhouettes so the lanes read as drum pads.
    fn draw_instrument_art(&mut self, zone: &Zone, x0: i32, x1: i32) {
        let color = zone_art_color(&zone.name);
        let cx = (x0 + x1) / 2;
        let cy = STATUS_Y as i32 / 2;
        let width = x1 - x0;

        match zone.name.as_str() {
            "Kick" => {
                let r = width / 5;
                self.draw_circle(cx, cy + 40, r + 30, color);
                self.draw_circle(cx, cy + 40, r, color);
                self.draw_line(cx + r + 40, cy - 20, cx + r + 80, cy - 80, color);
            }
            "Snare" => {
                let dw = width / 2;
                let dh = 70;
                self.draw_rect_outline(cx - dw / 2, cy - dh / 2, dw, dh, color);
                self.draw_line(cx - dw / 2, cy - dh / 2, cx - dw / 2, cy - dh / 2 - 40, color);
                self.draw_line(cx + dw / 2, cy - dh / 2, cx + dw / 2, cy - dh / 2 - 40, color);
            }
            "HiHat" => {
                let r = width / 4;
                self.draw_line(cx, 100, cx, cy + 60, color);
                self.draw_ellipse(cx, cy - 10, r, r / 3, color);
                self.draw_ellipse(cx, cy + 20, r + 15, (r + 15) / 3, color);
            }
            "Tom" => {
                let r = width / 4;
                self.draw_circle(cx, cy, r, color);
                self.draw_circle(cx, cy, r - 15, color);
                self.draw_line(cx - r, cy + 30, cx - r - 30, cy + 90, color);
                self.draw_line(cx + r, cy + 30, cx + r + 30, cy + 90, color);
            }
            "Clap" => {
                let pw = width * 35 / 100;
                let ph = 60;
                self.draw_rect_outline(cx - pw, cy - ph / 2, pw - 20, ph, color);
                self.draw_rect_outline(cx + 20, cy - ph / 2, pw - 20, ph, color);
                self.draw_line(cx - 20, cy + ph / 2, cx + 20, cy - ph / 2, color);
            }
            _ => {
                // Unnamed instrument: a plain pad outline.
                self.draw_rect_outline(cx - width / 4, cy - 40, width / 2, 80, color);
            }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for col in x..(x + w).min(WIN_W) {
            if y < WIN_H {
                self.buf[y * WIN_W + col] = color;
            }
            if y + h - 1 < WIN_H {
                self.buf[(y + h - 1) * WIN_W + col] = color;
            }
        }
        for row in y..(y + h).min(WIN_H) {
            if x < WIN_W {
                self.buf[row * WIN_W + x] = color;
            }
            if x + w - 1 < WIN_W {
                self.buf[row * WIN_W + x + w - 1] = color;
            }
        }
    }

    fn draw_rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        if w <= 0 || h <= 0 {
            return;
        }
        for col in x..x + w {
            self.set_pixel(col, y, color);
            self.set_pixel(col, y + h - 1, color);
        }
        for row in y..y + h {
            self.set_pixel(x, row, color);
            self.set_pixel(x + w - 1, row, color);
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    /// Midpoint circle outline.
    fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        if r <= 0 {
            self.set_pixel(cx, cy, color);
            return;
        }
        let mut x = r;
        let mut y = 0;
        let mut err = 1 - r;
        while x >= y {
            for &(px, py) in &[
                (cx + x, cy + y),
                (cx - x, cy + y),
                (cx + x, cy - y),
                (cx - x, cy - y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx + y, cy - x),
                (cx - y, cy - x),
            ] {
                self.set_pixel(px, py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Parametric ellipse outline (good enough for cymbals).
    fn draw_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: u32) {
        let steps = (4 * (rx + ry)).max(16);
        for i in 0..steps {
            let a = i as f32 / steps as f32 * 2.0 * std::f32::consts::PI;
            let x = cx + (rx as f32 * a.cos()) as i32;
            let y = cy + (ry as f32 * a.sin()) as i32;
            self.set_pixel(x, y, color);
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Scaled 3×5 bitmap-font text.
    fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.set_pixel(
                                    (cx + col * scale + sx) as i32,
                                    (y + row * scale + sy) as i32,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > WIN_W {
                break;
            }
        }
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
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' => [0b111, 0b101, 0b111, 0b001, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
