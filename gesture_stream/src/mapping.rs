//! Dual-space coordinate mapping.
//!
//! The feedback canvas is mirrored at the presentation layer, so Render
//! Space takes the normalized coordinates as-is. The editor viewport is
//! not mirrored, so Dispatch Space flips x explicitly. Keeping the two
//! mappings distinct is the whole point: collapse them and either the
//! markers or the strokes come out backwards.
//!
//! Both functions are total over `[0,1]²` and deliberately do not clamp;
//! out-of-range landmarks yield off-screen pixels, which callers treat as
//! "outside the UI".

use crate::landmarks::NormPoint;

/// Map into Render Space: pixels on the (presentation-mirrored) feedback
/// canvas. No manual flip — the presenter's mirror already compensates.
pub fn render_point(p: NormPoint, canvas_w: f32, canvas_h: f32) -> (f32, f32) {
    (p.x * canvas_w, p.y * canvas_h)
}

/// Map into Dispatch Space: pixels in the unmirrored viewport the editor's
/// pointer input expects. The horizontal flip is required here.
pub fn dispatch_point(p: NormPoint, viewport_w: f32, viewport_h: f32) -> (f32, f32) {
    ((1.0 - p.x) * viewport_w, p.y * viewport_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 1280.0;
    const H: f32 = 720.0;

    #[test]
    fn mapping_duality() {
        for i in 0..=10 {
            for j in 0..=10 {
                let p = NormPoint::new(i as f32 / 10.0, j as f32 / 10.0);
                let (rx, ry) = render_point(p, W, H);
                let (dx, dy) = dispatch_point(p, W, H);
                assert!((rx - p.x * W).abs() < 1e-4);
                assert!((ry - p.y * H).abs() < 1e-4);
                assert!((dx - (1.0 - p.x) * W).abs() < 1e-4);
                assert!((dy - p.y * H).abs() < 1e-4);
                // x coordinates only coincide on the mirror axis
                if (p.x - 0.5).abs() > 1e-6 {
                    assert_ne!(rx, dx, "x={} should differ between spaces", p.x);
                }
            }
        }
    }

    #[test]
    fn centre_is_the_fixed_point() {
        let p = NormPoint::new(0.5, 0.25);
        let (rx, _) = render_point(p, W, H);
        let (dx, _) = dispatch_point(p, W, H);
        assert_eq!(rx, dx);
    }

    #[test]
    fn out_of_range_is_not_clamped() {
        let p = NormPoint::new(1.2, -0.1);
        let (rx, ry) = render_point(p, W, H);
        let (dx, _) = dispatch_point(p, W, H);
        assert!(rx > W);
        assert!(ry < 0.0);
        assert!(dx < 0.0);
    }
}
