//! Software render surface and raster primitives.
//!
//! The feedback overlay paints into a plain ARGB pixel buffer that the
//! host presents (mirrored) once per tick. Everything here is bounds-
//! guarded; painting off-screen is a no-op, not an error.

// ════════════════════════════════════════════════════════════════════════════
// Frame — the 2D drawable
// ════════════════════════════════════════════════════════════════════════════

/// An ARGB pixel buffer of known size, cleared and fully repainted once
/// per tick.
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Frame {
            width,
            height,
            pixels: vec![0u32; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    #[inline]
    pub fn set_px(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    /// Alpha-blend `color` over the existing pixel. `alpha` in [0,1]
    /// scales on top of the color's own alpha channel.
    pub fn blend_px(&mut self, x: i32, y: i32, color: u32, alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (xu, yu) = (x as usize, y as usize);
        if xu >= self.width || yu >= self.height {
            return;
        }
        let a = ((color >> 24) & 0xFF) as f32 / 255.0 * alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let idx = yu * self.width + xu;
        let dst = self.pixels[idx];
        let mix = |s: u32, d: u32| -> u32 {
            (s as f32 * a + d as f32 * (1.0 - a)).round() as u32 & 0xFF
        };
        let r = mix((color >> 16) & 0xFF, (dst >> 16) & 0xFF);
        let g = mix((color >> 8) & 0xFF, (dst >> 8) & 0xFF);
        let b = mix(color & 0xFF, dst & 0xFF);
        // Result opacity saturates toward opaque as layers stack.
        let da = ((dst >> 24) & 0xFF) as f32 / 255.0;
        let out_a = ((a + da * (1.0 - a)) * 255.0).round() as u32 & 0xFF;
        self.pixels[idx] = (out_a << 24) | (r << 16) | (g << 8) | b;
    }

    // ── shapes ────────────────────────────────────────────────────────────

    /// Filled disc with optional translucency.
    pub fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, color: u32, alpha: f32) {
        let r = radius.max(0.0);
        let r2 = r * r;
        let (x0, x1) = ((cx - r).floor() as i32, (cx + r).ceil() as i32);
        let (y0, y1) = ((cy - r).floor() as i32, (cy + r).ceil() as i32);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_px(x, y, color, alpha);
                }
            }
        }
    }

    /// Ring (circle outline) of the given stroke thickness.
    pub fn draw_ring(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32, color: u32, alpha: f32) {
        let outer = radius + thickness * 0.5;
        let inner = (radius - thickness * 0.5).max(0.0);
        let (o2, i2) = (outer * outer, inner * inner);
        let (x0, x1) = ((cx - outer).floor() as i32, (cx + outer).ceil() as i32);
        let (y0, y1) = ((cy - outer).floor() as i32, (cy + outer).ceil() as i32);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let d2 = dx * dx + dy * dy;
                if d2 <= o2 && d2 >= i2 {
                    self.blend_px(x, y, color, alpha);
                }
            }
        }
    }

    /// Partial ring from 12 o'clock, clockwise through `fraction` of a
    /// full turn. Used for the dwell progress arc.
    pub fn draw_arc(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32, fraction: f32, color: u32) {
        let steps = (radius * std::f32::consts::TAU).ceil().max(12.0) as usize;
        let end = (steps as f32 * fraction.clamp(0.0, 1.0)) as usize;
        for i in 0..end {
            let theta = i as f32 / steps as f32 * std::f32::consts::TAU - std::f32::consts::FRAC_PI_2;
            let x = cx + radius * theta.cos();
            let y = cy + radius * theta.sin();
            self.fill_disc(x, y, thickness * 0.5, color, 1.0);
        }
    }

    /// Stamp discs along a polyline for a thick, soft stroke.
    pub fn stroke_polyline(&mut self, points: &[(f32, f32)], width: f32, color: u32, alpha: f32) {
        if points.len() == 1 {
            let (x, y) = points[0];
            self.fill_disc(x, y, width * 0.5, color, alpha);
            return;
        }
        for seg in points.windows(2) {
            let (x0, y0) = seg[0];
            let (x1, y1) = seg[1];
            let dx = x1 - x0;
            let dy = y1 - y0;
            let dist = (dx * dx + dy * dy).sqrt().max(1.0);
            let steps = (dist / (width * 0.35).max(1.0)).ceil() as i32;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                self.fill_disc(x0 + dx * t, y0 + dy * t, width * 0.5, color, alpha);
            }
        }
    }

    /// Filled rectangle with rounded corners — the label backdrop.
    pub fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, corner: f32, color: u32, alpha: f32) {
        let c = corner.min(w * 0.5).min(h * 0.5);
        for py in y.floor() as i32..(y + h).ceil() as i32 {
            for px in x.floor() as i32..(x + w).ceil() as i32 {
                let fx = px as f32;
                let fy = py as f32;
                // Distance from the nearest corner centre, when inside a
                // corner square; elsewhere the point is inside the body.
                let ox = if fx < x + c {
                    x + c - fx
                } else if fx > x + w - c {
                    fx - (x + w - c)
                } else {
                    0.0
                };
                let oy = if fy < y + c {
                    y + c - fy
                } else if fy > y + h - c {
                    fy - (y + h - c)
                } else {
                    0.0
                };
                if ox * ox + oy * oy <= c * c {
                    self.blend_px(px, py, color, alpha);
                }
            }
        }
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Draw `text` with the 5×7 bitmap font (uppercased), top-left at
    /// (x, y). Unknown characters are skipped.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: u32) {
        draw_text_into(&mut self.pixels, self.width, self.height, x, y, text, color);
    }

    /// Pixel width of `text` in the 5×7 font.
    pub fn text_width(text: &str) -> i32 {
        text.chars().count() as i32 * 6 - 1
    }
}

/// Font rasterizer over a bare pixel slice, shared with the window
/// presenter which paints outside any [`Frame`].
pub fn draw_text_into(
    pixels: &mut [u32],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    text: &str,
    color: u32,
) {
    let mut cx = x;
    for ch in text.chars() {
        if let Some(rows) = glyph5x7(ch.to_ascii_uppercase()) {
            for (ry, bits) in rows.iter().enumerate() {
                for rx in 0..5i32 {
                    if bits & (1 << (4 - rx)) != 0 {
                        let (px, py) = (cx + rx, y + ry as i32);
                        if px >= 0 && py >= 0 && (px as usize) < width && (py as usize) < height {
                            pixels[py as usize * width + px as usize] = color;
                        }
                    }
                }
            }
        }
        cx += 6; // 5 px glyph + 1 px gap
    }
}

// ════════════════════════════════════════════════════════════════════════════
// 5×7 bitmap font — uppercase, digits, light punctuation
// ════════════════════════════════════════════════════════════════════════════

fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    let g = match ch {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00001, 0b00001, 0b00001, 0b00001, 0b10001, 0b10001, 0b01110],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b01010, 0b10001],
        'Y' => [0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0, 0, 0, 0, 0, 0, 0],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        _ => return None,
    };
    Some(g)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
