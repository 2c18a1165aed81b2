//! Feedback overlay: hand markers, laser trail, per-slot halos and
//! labels, dwell progress, particles.
//!
//! Layer order per tick (later occludes earlier):
//!
//! | layer    | content                                             |
//! |----------|-----------------------------------------------------|
//! | markers  | raw landmark dots per hand, handedness-colored      |
//! | laser    | three concentric strokes along the drawing session  |
//! | halos    | easing ring + text label with rounded backdrop      |
//! | dwell    | progress arc at the activation zone centre          |
//! | particles| burst survivors, faded and drifting                 |
//!
//! Slot identity is the per-frame hand index — a hand briefly lost and
//! re-detected one slot later is a new entry and re-bursts.

use std::collections::HashMap;

use gesture_stream::{render_point, GestureLabel, GestureResult, HandObservation, NormPoint};

use crate::particles::ParticleField;
use crate::surface::Frame;

/// Entry grace window before an unseen slot is deleted.
pub const GRACE_MS: f64 = 400.0;
/// Halo entry-animation duration.
pub const ENTRY_ANIM_MS: f64 = 250.0;
/// Particles spawned per new entry.
pub const BURST_COUNT: usize = 18;
/// Halo ring radius at entry; eases toward 1.5x.
pub const HALO_BASE_RADIUS: f32 = 26.0;

const MARKER_RADIUS: f32 = 5.0;
const LASER_COLOR: u32 = 0xFFFF0000;

fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

// ════════════════════════════════════════════════════════════════════════════
// OverlayEntry
// ════════════════════════════════════════════════════════════════════════════

struct OverlayEntry {
    label: GestureLabel,
    point: NormPoint,
    start_ms: f64,
    last_seen_ms: f64,
    color: u32,
    text: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Overlay
// ════════════════════════════════════════════════════════════════════════════

pub struct Overlay {
    entries: HashMap<usize, OverlayEntry>,
    particles: ParticleField,
}

impl Overlay {
    pub fn new(particle_seed: u32) -> Self {
        Overlay {
            entries: HashMap::new(),
            particles: ParticleField::new(particle_seed),
        }
    }

    #[cfg(test)]
    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Feed one hand slot's classification for this tick. A slot whose
    /// label changed gets a fresh entry and a particle burst at its
    /// render-space position; an unchanged label only refreshes
    /// `last_seen` and the position.
    pub fn observe(
        &mut self,
        slot: usize,
        result: &GestureResult,
        hand: &HandObservation,
        now_ms: f64,
        frame: &Frame,
        particle_cap: usize,
    ) {
        let point = match (result.label, result.tracking_point) {
            (GestureLabel::None, _) | (_, Option::None) => return,
            (_, Some(p)) => p,
        };

        match self.entries.get_mut(&slot) {
            Some(entry) if entry.label == result.label => {
                // Monotonic by contract: ticks only move forward.
                entry.last_seen_ms = now_ms;
                entry.point = point;
            }
            _ => {
                let color = hand.handedness.marker_color();
                self.entries.insert(
                    slot,
                    OverlayEntry {
                        label: result.label,
                        point,
                        start_ms: now_ms,
                        last_seen_ms: now_ms,
                        color,
                        text: result.label.display_name().to_string(),
                    },
                );
                let (px, py) = render_point(point, frame.width as f32, frame.height as f32);
                self.particles
                    .burst(px, py, BURST_COUNT, color, now_ms, particle_cap);
            }
        }
    }

    /// Drop entries unseen beyond the grace window.
    pub fn prune(&mut self, now_ms: f64) {
        self.entries
            .retain(|_, e| now_ms - e.last_seen_ms <= GRACE_MS);
    }

    // ── layers ────────────────────────────────────────────────────────────

    /// Layer 1: raw landmark markers for every tracked hand.
    pub fn draw_markers(&self, frame: &mut Frame, hands: &[HandObservation]) {
        let (w, h) = (frame.width as f32, frame.height as f32);
        for hand in hands {
            let color = hand.handedness.marker_color();
            for kp in &hand.keypoints {
                let (x, y) = render_point(*kp, w, h);
                frame.fill_disc(x, y, MARKER_RADIUS, color, 1.0);
                frame.draw_ring(x, y, MARKER_RADIUS, 1.5, 0xFFFFFFFF, 1.0);
            }
        }
    }

    /// Layer 2: laser trail along the active drawing session. Skipped
    /// entirely in low-performance mode (caller's responsibility).
    pub fn draw_laser(&self, frame: &mut Frame, session: &[NormPoint]) {
        if session.is_empty() {
            return;
        }
        let (w, h) = (frame.width as f32, frame.height as f32);
        let pts: Vec<(f32, f32)> = session.iter().map(|p| render_point(*p, w, h)).collect();
        // Wide glow, medium body, thin core
        frame.stroke_polyline(&pts, 14.0, LASER_COLOR, 0.18);
        frame.stroke_polyline(&pts, 7.0, LASER_COLOR, 0.45);
        frame.stroke_polyline(&pts, 3.0, LASER_COLOR, 1.0);
    }

    /// Layer 3: halo rings and text labels for live entries.
    pub fn draw_halos(&self, frame: &mut Frame, now_ms: f64) {
        let (w, h) = (frame.width as f32, frame.height as f32);
        for entry in self.entries.values() {
            let (x, y) = render_point(entry.point, w, h);
            let t = ease_out_quad(((now_ms - entry.start_ms) / ENTRY_ANIM_MS) as f32);
            let radius = HALO_BASE_RADIUS * (1.0 + 0.5 * t);
            frame.draw_ring(x, y, radius, 3.0, entry.color, 0.9);

            if !entry.text.is_empty() {
                let tw = Frame::text_width(&entry.text);
                let bx = x - tw as f32 * 0.5 - 6.0;
                let by = y - radius - 22.0;
                frame.fill_rounded_rect(bx, by, tw as f32 + 12.0, 15.0, 5.0, 0xFF111827, 0.85);
                frame.draw_text((bx + 6.0) as i32, (by + 4.0) as i32, &entry.text, 0xFFFFFFFF);
            }
        }
    }

    /// Layer 4: dwell progress arc at the given render-space centre.
    pub fn draw_dwell_progress(&self, frame: &mut Frame, cx: f32, cy: f32, progress: f32) {
        if progress <= 0.0 {
            return;
        }
        frame.draw_ring(cx, cy, 20.0, 2.0, 0xFFFFFFFF, 0.25);
        frame.draw_arc(cx, cy, 20.0, 3.0, progress, 0xFFF59E0B);
    }

    /// Layer 5: particle physics step + paint.
    pub fn step_particles(&mut self, frame: &mut Frame, now_ms: f64, particle_cap: usize) {
        self.particles.step_and_render(frame, now_ms, particle_cap);
    }

    pub fn live_particles(&self) -> usize {
        self.particles.live_count()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_stream::{Handedness, LANDMARK_COUNT};

    fn hand() -> HandObservation {
        HandObservation {
            keypoints: vec![NormPoint { x: 0.5, y: 0.5 }; LANDMARK_COUNT],
            handedness: Handedness::Right,
        }
    }

    fn pinch_at(x: f32, y: f32) -> GestureResult {
        GestureResult {
            label: GestureLabel::IndexPinch,
            tracking_point: Some(NormPoint { x, y }),
        }
    }

    #[test]
    fn new_entry_bursts_once() {
        let mut ov = Overlay::new(1);
        let frame = Frame::new(640, 480);
        let h = hand();

        ov.observe(0, &pinch_at(0.5, 0.5), &h, 0.0, &frame, 300);
        let after_first = ov.live_particles();
        assert_eq!(after_first, BURST_COUNT);

        // Same label on later ticks: refresh, no re-burst
        ov.observe(0, &pinch_at(0.52, 0.5), &h, 16.0, &frame, 300);
        ov.observe(0, &pinch_at(0.54, 0.5), &h, 32.0, &frame, 300);
        assert_eq!(ov.live_particles(), after_first);
        assert_eq!(ov.entry_count(), 1);
    }

    #[test]
    fn label_change_rebursts() {
        let mut ov = Overlay::new(1);
        let frame = Frame::new(640, 480);
        let h = hand();

        ov.observe(0, &pinch_at(0.5, 0.5), &h, 0.0, &frame, 300);
        let middle = GestureResult {
            label: GestureLabel::MiddlePinch,
            tracking_point: Some(NormPoint { x: 0.5, y: 0.5 }),
        };
        ov.observe(0, &middle, &h, 16.0, &frame, 300);
        assert_eq!(ov.live_particles(), 2 * BURST_COUNT);
    }

    #[test]
    fn none_label_is_ignored() {
        let mut ov = Overlay::new(1);
        let frame = Frame::new(640, 480);
        ov.observe(0, &GestureResult::none(), &hand(), 0.0, &frame, 300);
        assert_eq!(ov.entry_count(), 0);
        assert_eq!(ov.live_particles(), 0);
    }

    #[test]
    fn last_seen_never_decreases_while_entry_lives() {
        let mut ov = Overlay::new(1);
        let frame = Frame::new(640, 480);
        let h = hand();

        let mut prev = f64::MIN;
        // Includes a same-timestamp refresh at 16 ms
        for now in [0.0, 16.0, 16.0, 48.0] {
            ov.observe(0, &pinch_at(0.5, 0.5), &h, now, &frame, 300);
            let seen = ov.entries.get(&0).unwrap().last_seen_ms;
            assert!(seen >= prev, "last_seen went backwards: {} < {}", seen, prev);
            prev = seen;
        }
        assert_eq!(prev, 48.0);
    }

    #[test]
    fn grace_window_prunes_stale_entries() {
        let mut ov = Overlay::new(1);
        let frame = Frame::new(640, 480);
        ov.observe(0, &pinch_at(0.5, 0.5), &hand(), 0.0, &frame, 300);

        ov.prune(GRACE_MS); // exactly at the edge: kept
        assert_eq!(ov.entry_count(), 1);
        ov.prune(GRACE_MS + 1.0);
        assert_eq!(ov.entry_count(), 0);
    }

    #[test]
    fn slots_are_independent() {
        let mut ov = Overlay::new(1);
        let frame = Frame::new(640, 480);
        ov.observe(0, &pinch_at(0.3, 0.5), &hand(), 0.0, &frame, 300);
        ov.observe(1, &pinch_at(0.7, 0.5), &hand(), 0.0, &frame, 300);
        assert_eq!(ov.entry_count(), 2);
        assert_eq!(ov.live_particles(), 2 * BURST_COUNT);
    }

    #[test]
    fn ease_out_quad_shape() {
        assert!((ease_out_quad(0.0) - 0.0).abs() < f32::EPSILON);
        assert!((ease_out_quad(1.0) - 1.0).abs() < f32::EPSILON);
        assert!(ease_out_quad(0.5) > 0.5); // front-loaded
        assert!((ease_out_quad(2.0) - 1.0).abs() < f32::EPSILON); // clamped
    }
}
