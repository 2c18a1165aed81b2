//! External capability seams.
//!
//! The gesture model and the camera are collaborators, not code we own:
//! the pipeline sees one trait each and nothing more. Host notifications
//! (viewport resize, manual clear) arrive as [`HostEvent`]s over an `mpsc`
//! channel drained once per loop iteration, so the core never queries
//! host-specific APIs directly.

use gesture_stream::HandObservation;

use crate::error::Error;

// ════════════════════════════════════════════════════════════════════════════
// HandRecognizer
// ════════════════════════════════════════════════════════════════════════════

/// The recognition capability: given the current frame's timestamp,
/// produce the set of hand observations — or fail.
///
/// Failure is transient by contract; the tick loop treats it as an empty
/// observation set and never retries within the same cycle.
pub trait HandRecognizer {
    fn recognize(&mut self, frame_ts_ms: f64) -> Result<Vec<HandObservation>, Error>;
}

// ════════════════════════════════════════════════════════════════════════════
// VideoSource
// ════════════════════════════════════════════════════════════════════════════

/// The acquisition capability. The core never blocks on readiness — it
/// no-ops ticks until `ready()` reports true — and never mutates the
/// source; setup and teardown happen out-of-band.
pub trait VideoSource {
    fn ready(&self) -> bool;

    /// Timestamp (ms) of the frame currently available. Used for
    /// duplicate-frame suppression: an unchanged value means the frame
    /// was already processed.
    fn current_frame_ts(&self) -> f64;
}

// ════════════════════════════════════════════════════════════════════════════
// HostEvent
// ════════════════════════════════════════════════════════════════════════════

/// Notifications the host pushes at the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The editor viewport changed size (dispatch-space pixels).
    ViewportResized(f32, f32),
    /// Manual clear fallback (e.g. an on-screen button) — same action the
    /// dwell zone is bound to, fired immediately.
    ClearRequested,
}
