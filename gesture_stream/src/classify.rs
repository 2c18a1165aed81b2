//! Gesture classification from landmark geometry.
//!
//! Pure per call: one `HandObservation` in, one `GestureResult` out, no
//! state retained between hands or ticks. Labels come from fingertip
//! proximity — a pinch is a thumb tip close to another fingertip, and its
//! tracking point is the midpoint of the two tips.

use crate::landmarks::{HandObservation, NormPoint, INDEX_TIP, MIDDLE_TIP, THUMB_TIP};

/// Maximum thumb-to-fingertip distance (normalized units) that still
/// counts as a pinch. Tuned for comfortable contact at 640×480 capture.
pub const PINCH_MAX_DIST: f32 = 0.05;

// ════════════════════════════════════════════════════════════════════════════
// GestureLabel / GestureResult
// ════════════════════════════════════════════════════════════════════════════

/// Discrete classification of a hand's configuration in a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureLabel {
    /// No recognized configuration.
    None,
    /// Thumb tip and index tip pinched together — continuous draw intent.
    IndexPinch,
    /// Thumb tip and middle tip pinched together — tool-cycle intent.
    MiddlePinch,
}

impl GestureLabel {
    pub fn display_name(&self) -> &'static str {
        match self {
            GestureLabel::None => "",
            GestureLabel::IndexPinch => "draw",
            GestureLabel::MiddlePinch => "tool",
        }
    }
}

/// Classification output for one hand in one tick.
///
/// `tracking_point` is present only when the gesture has a meaningful
/// continuous manipulation point (the pinch midpoint).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureResult {
    pub label: GestureLabel,
    pub tracking_point: Option<NormPoint>,
}

impl GestureResult {
    /// The "nothing detected" result — what downstream sees when the
    /// recognizer fails or finds no hands.
    pub fn none() -> Self {
        GestureResult {
            label: GestureLabel::None,
            tracking_point: None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify one observation. Malformed observations (fewer than 21
/// landmarks) classify as `None` rather than panicking. When both pinches
/// are geometrically satisfied, the index pinch wins.
pub fn classify(obs: &HandObservation) -> GestureResult {
    if !obs.is_complete() {
        return GestureResult::none();
    }

    let thumb = obs.keypoints[THUMB_TIP];
    let index = obs.keypoints[INDEX_TIP];
    let middle = obs.keypoints[MIDDLE_TIP];

    if thumb.distance_to(&index) < PINCH_MAX_DIST {
        return GestureResult {
            label: GestureLabel::IndexPinch,
            tracking_point: Some(thumb.midpoint(&index)),
        };
    }

    if thumb.distance_to(&middle) < PINCH_MAX_DIST {
        return GestureResult {
            label: GestureLabel::MiddlePinch,
            tracking_point: Some(thumb.midpoint(&middle)),
        };
    }

    GestureResult::none()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
