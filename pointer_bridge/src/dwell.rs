//! Dwell activation — sustained presence inside a zone fires an action.
//!
//! A single activation zone (the clear button, in the shipped app) is
//! registered once with a bound callback. Every tick the trigger sees the
//! current tracking points in Dispatch Space; hover timing is zone-scoped,
//! not hand-scoped — several hands inside the zone count as one presence.
//! Leaving the zone resets the count immediately; there is no grace
//! period. A cooldown keeps a lingering hand from re-firing back-to-back.

// ════════════════════════════════════════════════════════════════════════════
// DwellZone
// ════════════════════════════════════════════════════════════════════════════

/// A rectangular activation zone in Dispatch Space, expanded by `margin`
/// on every side when testing containment.
#[derive(Clone, Copy, Debug)]
pub struct DwellZone {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub margin: f32,
    pub threshold_ms: f64,
    pub cooldown_ms: f64,
}

impl DwellZone {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left - self.margin
            && x <= self.right + self.margin
            && y >= self.top - self.margin
            && y <= self.bottom + self.margin
    }

    /// Centre of the unexpanded rectangle, for feedback rendering.
    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DwellTrigger
// ════════════════════════════════════════════════════════════════════════════

/// Per-tick outcome, consumed by the overlay for progress feedback.
#[derive(Clone, Copy, Debug)]
pub struct DwellStatus {
    pub inside: bool,
    /// `min(1, elapsed / threshold)`; 0 when nothing hovers.
    pub progress: f32,
    pub fired: bool,
}

pub struct DwellTrigger {
    zone: DwellZone,
    action: Box<dyn FnMut()>,
    /// 0 means "no hover in progress".
    hover_start_ms: f64,
    last_trigger_ms: f64,
}

impl DwellTrigger {
    pub fn new(zone: DwellZone, action: Box<dyn FnMut()>) -> Self {
        DwellTrigger {
            zone,
            action,
            hover_start_ms: 0.0,
            // Pre-expired so the first dwell is not blocked by the cooldown.
            last_trigger_ms: -zone.cooldown_ms,
        }
    }

    pub fn zone(&self) -> &DwellZone {
        &self.zone
    }

    /// Evaluate this tick's tracking points (Dispatch Space pixels).
    pub fn tick(&mut self, points: &[(f32, f32)], now_ms: f64) -> DwellStatus {
        let inside = points.iter().any(|&(x, y)| self.zone.contains(x, y));

        if !inside {
            // Leaving at any point restarts the count from zero.
            self.hover_start_ms = 0.0;
            return DwellStatus {
                inside: false,
                progress: 0.0,
                fired: false,
            };
        }

        if self.hover_start_ms == 0.0 {
            self.hover_start_ms = now_ms;
        }
        let elapsed = now_ms - self.hover_start_ms;
        let progress = (elapsed / self.zone.threshold_ms).min(1.0) as f32;

        let mut fired = false;
        if elapsed >= self.zone.threshold_ms && now_ms - self.last_trigger_ms > self.zone.cooldown_ms
        {
            (self.action)();
            self.hover_start_ms = 0.0;
            self.last_trigger_ms = now_ms;
            fired = true;
        }

        DwellStatus {
            inside: true,
            progress,
            fired,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
