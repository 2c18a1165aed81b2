//! Hand observations as emitted by the recognition capability.
//!
//! One observation per detected hand per tick: 21 landmark positions in
//! Normalized Landmark Space plus a handedness label. Observations are
//! immutable within a tick; nothing here carries state across ticks.

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices — 21-point hand model
// ════════════════════════════════════════════════════════════════════════════

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks in a well-formed observation.
pub const LANDMARK_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// NormPoint — a point in Normalized Landmark Space
// ════════════════════════════════════════════════════════════════════════════

/// A point in `[0,1]²`, origin top-left, non-mirrored camera space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
}

impl NormPoint {
    pub fn new(x: f32, y: f32) -> Self {
        NormPoint { x, y }
    }

    /// Euclidean distance, still in normalized units.
    pub fn distance_to(&self, other: &NormPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between two landmarks (the tracking point of a pinch).
    pub fn midpoint(&self, other: &NormPoint) -> NormPoint {
        NormPoint {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handedness
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Feedback marker color for this hand (packed ARGB).
    pub fn marker_color(&self) -> u32 {
        match self {
            Handedness::Left => 0xFF3B82F6,  // blue
            Handedness::Right => 0xFF10B981, // green
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandObservation
// ════════════════════════════════════════════════════════════════════════════

/// One hand as seen by the recognizer for a single tick.
#[derive(Clone, Debug)]
pub struct HandObservation {
    pub keypoints: Vec<NormPoint>,
    pub handedness: Handedness,
}

impl HandObservation {
    pub fn new(keypoints: Vec<NormPoint>, handedness: Handedness) -> Self {
        HandObservation {
            keypoints,
            handedness,
        }
    }

    /// True when all 21 landmarks are present.
    pub fn is_complete(&self) -> bool {
        self.keypoints.len() >= LANDMARK_COUNT
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = NormPoint::new(0.0, 0.0);
        let b = NormPoint::new(0.3, 0.4);
        assert!((a.distance_to(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn midpoint_is_halfway() {
        let a = NormPoint::new(0.2, 0.6);
        let b = NormPoint::new(0.4, 0.2);
        let m = a.midpoint(&b);
        assert!((m.x - 0.3).abs() < 1e-6);
        assert!((m.y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn marker_colors_opaque_and_distinct() {
        let l = Handedness::Left.marker_color();
        let r = Handedness::Right.marker_color();
        assert_eq!(l >> 24, 0xFF);
        assert_eq!(r >> 24, 0xFF);
        assert_ne!(l, r);
    }

    #[test]
    fn short_observation_is_incomplete() {
        let obs = HandObservation::new(vec![NormPoint::new(0.5, 0.5); 5], Handedness::Left);
        assert!(!obs.is_complete());
    }
}
