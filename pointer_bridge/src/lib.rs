//! # pointer_bridge
//!
//! Turns the per-tick gesture stream into low-frequency discrete editor
//! interactions:
//!
//! * [`synth::PointerSynthesizer`] — the Idle/Drawing state machine that
//!   emits `pointer_down` / `pointer_move` / `pointer_up` in Dispatch
//!   Space, with a jitter gate against hand tremor and edge-triggered tool
//!   cycling on the middle pinch.
//! * [`dwell::DwellTrigger`] — proximity-plus-time activation of a bound
//!   action against a registered rectangular zone.
//!
//! The editor itself is an injected capability ([`editor::Editor`]); this
//! crate never resolves a global drawing surface. All timing flows in as
//! `f64` milliseconds from the host clock, so every property here is
//! testable with synthetic time.

pub mod dwell;
pub mod editor;
pub mod synth;

pub use dwell::{DwellStatus, DwellTrigger, DwellZone};
pub use editor::{Editor, ModifierKeys, NullEditor, PointerEvent, PointerEventKind};
pub use synth::{PointerSynthesizer, JITTER_EPSILON, TOOL_CYCLE};
