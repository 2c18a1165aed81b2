//! # air_canvas
//!
//! Camera-gesture control for a vector drawing surface. Hand-landmark
//! observations stream in once per display tick; the pipeline classifies
//! them into discrete intents and replays those intents as pointer
//! interactions against an editor, while a feedback overlay mirrors the
//! same stream back to the user.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Thumb–index pinch | Draw: pointer down, move while held, up on release |
//! | Thumb–middle pinch | Cycle the active tool (edge-triggered) |
//! | Hover over the clear zone 600 ms | Wipe the canvas |
//!
//! ## Coordinate spaces
//!
//! Landmarks arrive in normalized camera space, `[0,1]²`, non-mirrored.
//! Feedback renders at `x·W` (the presenter mirrors the whole canvas, so
//! markers track the on-screen hand); editor dispatch flips explicitly at
//! `(1−x)·W` so strokes land where the user sees their hand.
//!
//! ## Simulation mode
//!
//! No camera ships with the binary: the mouse drives a synthetic hand.
//! Hold the left button to pinch-draw, the right to cycle tools, hover
//! the CLEAR button to dwell-wipe. `c` clears immediately, `q` quits.

pub mod app;
pub mod capabilities;
pub mod error;
pub mod overlay;
pub mod particles;
pub mod scheduler;
pub mod sim;
pub mod surface;
pub mod visualizer;
