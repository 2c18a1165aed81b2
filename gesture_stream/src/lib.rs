//! # gesture_stream
//!
//! The pure leaf of the air-drawing pipeline: hand-landmark observations,
//! pinch-gesture classification, and the dual-space coordinate mapping.
//!
//! ## Gesture → intent mapping
//!
//! | Gesture | Geometry | Intent |
//! |---|---|---|
//! | Index pinch | thumb tip ↔ index tip within pinch distance | draw at pinch midpoint |
//! | Middle pinch | thumb tip ↔ middle tip within pinch distance | cycle editor tool |
//! | (none) | anything else | release / idle |
//!
//! ## Coordinate spaces
//!
//! Landmarks arrive in **Normalized Landmark Space** (`[0,1]²`, origin
//! top-left, non-mirrored camera space) and must be mapped twice:
//!
//! * **Render Space** — pixels on the feedback canvas, which is itself
//!   mirrored at the presentation layer, so no flip here.
//! * **Dispatch Space** — pixels in the unmirrored viewport the editor
//!   expects, so an explicit horizontal flip is required.
//!
//! Collapsing the two produces a draw that looks right but acts backwards,
//! or vice versa. Both mappings are total over their inputs and never
//! clamp: off-range landmarks map to off-screen pixels, which downstream
//! treats as "outside the UI", not as an error.

pub mod classify;
pub mod landmarks;
pub mod mapping;

pub use classify::{classify, GestureLabel, GestureResult, PINCH_MAX_DIST};
pub use landmarks::{
    HandObservation, Handedness, NormPoint, INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, PINKY_TIP,
    RING_TIP, THUMB_TIP, WRIST,
};
pub use mapping::{dispatch_point, render_point};
