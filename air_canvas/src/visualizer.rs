//! Windowed presenter using `minifb`.
//!
//! Layout (one window doubles as editor viewport and camera view):
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ [CLEAR]                 overlay (mirrored)   │
//! │          sketch strokes                      │
//! │                 ◦ hand markers, halo, laser  │
//! │ status: tool / perf        key legend        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The overlay frame is painted in camera space; presentation samples it
//! mirrored (camera preview convention) and scaled to the window, skipping
//! fully transparent pixels so the sketch underneath shows through.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use std::sync::mpsc::Sender;

use crate::capabilities::HostEvent;
use crate::sim::SharedInput;
use crate::surface::Frame;
use pointer_bridge::DwellZone;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 960;
pub const WIN_H: usize = 540;
const BG_COLOR: u32 = 0xFF1A1A2E;
const STROKE_COLOR: u32 = 0xFFE5E7EB;
const BUTTON_BG: u32 = 0xFF0F3460;
const BUTTON_TEXT: u32 = 0xFFFFD700;
const STATUS_COLOR: u32 = 0xFF888888;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    event_tx: Sender<HostEvent>,
    last_size: (usize, usize),
}

impl Visualizer {
    pub fn new(event_tx: Sender<HostEvent>) -> Result<Self, String> {
        let mut window = Window::new(
            "Air Canvas — gesture-driven sketching",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            event_tx,
            last_size: (WIN_W, WIN_H),
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll window input: mouse into the shared sim state, keys into host
    /// events. Returns false when the app should quit.
    pub fn poll_input(&mut self, input: &SharedInput) -> bool {
        if !self.window.is_open() {
            return false;
        }
        if self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
        {
            return false;
        }
        if self.window.is_key_pressed(Key::C, KeyRepeat::No) {
            let _ = self.event_tx.send(HostEvent::ClearRequested);
        }

        let size = self.window.get_size();
        if size != self.last_size {
            self.last_size = size;
            let _ = self
                .event_tx
                .send(HostEvent::ViewportResized(size.0 as f32, size.1 as f32));
        }

        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let mut st = input.borrow_mut();
            st.mouse_x = mx / size.0 as f32;
            st.mouse_y = my / size.1 as f32;
            st.left_down = self.window.get_mouse_down(MouseButton::Left);
            st.right_down = self.window.get_mouse_down(MouseButton::Right);
        }

        true
    }

    /// Present one frame: sketch underlay, clear button, mirrored overlay,
    /// status line.
    pub fn present(
        &mut self,
        overlay: &Frame,
        strokes: &[Vec<(f32, f32)>],
        live_stroke: &[(f32, f32)],
        clear_zone: &DwellZone,
        tool: &str,
        low_performance: bool,
    ) -> Result<(), String> {
        let (w, h) = self.window.get_size();
        if self.buf.len() != w * h {
            self.buf.resize(w * h, BG_COLOR);
        }
        self.buf.fill(BG_COLOR);

        // ── Sketch strokes (Dispatch Space == window space) ───────────────
        for stroke in strokes {
            self.draw_polyline(stroke, STROKE_COLOR, w, h);
        }
        self.draw_polyline(live_stroke, STROKE_COLOR, w, h);

        // ── Clear button under the dwell zone ─────────────────────────────
        self.fill_rect(
            clear_zone.left as usize,
            clear_zone.top as usize,
            (clear_zone.right - clear_zone.left) as usize,
            (clear_zone.bottom - clear_zone.top) as usize,
            BUTTON_BG,
            w,
            h,
        );
        self.draw_label(
            "CLEAR",
            clear_zone.left as usize + 10,
            clear_zone.top as usize + 14,
            BUTTON_TEXT,
            w,
            h,
        );

        // ── Overlay, mirrored and scaled ──────────────────────────────────
        for wy in 0..h {
            let sy = wy * overlay.height / h;
            for wx in 0..w {
                // Horizontal flip: camera-preview convention
                let sx = (w - 1 - wx) * overlay.width / w;
                let px = overlay.pixels[sy * overlay.width + sx];
                if px >> 24 != 0 {
                    self.buf[wy * w + wx] = px | 0xFF000000;
                }
            }
        }

        // ── Status + legend ───────────────────────────────────────────────
        let status = if low_performance {
            format!("tool: {}   perf: low", tool)
        } else {
            format!("tool: {}", tool)
        };
        self.draw_label(&status, 10, h.saturating_sub(32), 0xFFEEEEEE, w, h);
        self.draw_label(
            "hold left=draw  right=cycle tool  hover clear=wipe  c=clear  q=quit",
            10,
            h.saturating_sub(16),
            STATUS_COLOR,
            w,
            h,
        );

        self.window
            .update_with_buffer(&self.buf, w, h)
            .map_err(|e| e.to_string())
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn draw_polyline(&mut self, points: &[(f32, f32)], color: u32, w: usize, h: usize) {
        if points.is_empty() {
            return;
        }
        if points.len() == 1 {
            self.set_pixel(points[0].0 as isize, points[0].1 as isize, color, w, h);
            return;
        }
        for seg in points.windows(2) {
            let (x0, y0) = seg[0];
            let (x1, y1) = seg[1];
            let steps = ((x1 - x0).abs().max((y1 - y0).abs()).ceil() as usize).max(1);
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                let x = (x0 + (x1 - x0) * t) as isize;
                let y = (y0 + (y1 - y0) * t) as isize;
                // 2px-wide stroke
                self.set_pixel(x, y, color, w, h);
                self.set_pixel(x + 1, y, color, w, h);
                self.set_pixel(x, y + 1, color, w, h);
            }
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, rw: usize, rh: usize, color: u32, w: usize, h: usize) {
        for row in y..(y + rh).min(h) {
            for col in x..(x + rw).min(w) {
                self.buf[row * w + col] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32, w: usize, h: usize) {
        if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h {
            self.buf[y as usize * w + x as usize] = color;
        }
    }

    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32, w: usize, h: usize) {
        crate::surface::draw_text_into(&mut self.buf, w, h, x as i32, y as i32, text, color);
    }
}
