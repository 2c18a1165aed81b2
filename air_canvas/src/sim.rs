//! Mouse-driven simulation backends.
//!
//! No camera or gesture model ships with the binary; the demo drives the
//! full pipeline from the pointer instead. The mouse position becomes a
//! synthetic 21-landmark hand, the left button an index pinch, the right
//! button a middle pinch. The synthetic video source ticks at a webcam-ish
//! 30 Hz so duplicate-frame suppression stays exercised.
//!
//! Coordinates: the hand is emitted at `x = 1 - mouse_x` so that after the
//! mirrored presentation the markers sit under the cursor, and the
//! dispatch-space flip lands back on window coordinates.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use gesture_stream::{HandObservation, Handedness, NormPoint, INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, THUMB_TIP};
use pointer_bridge::{Editor, ModifierKeys, PointerEvent, PointerEventKind};

use crate::capabilities::{HandRecognizer, VideoSource};
use crate::error::Error;

const SIM_FRAME_RATE_HZ: f64 = 30.0;

// ════════════════════════════════════════════════════════════════════════════
// SimInputState
// ════════════════════════════════════════════════════════════════════════════

/// Mouse state polled by the window loop, shared with the recognizer.
#[derive(Default)]
pub struct SimInputState {
    /// Normalized window position, [0,1]².
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub left_down: bool,
    pub right_down: bool,
}

pub type SharedInput = Rc<RefCell<SimInputState>>;

// ════════════════════════════════════════════════════════════════════════════
// SimRecognizer
// ════════════════════════════════════════════════════════════════════════════

/// Synthesizes one right hand from the shared mouse state.
pub struct SimRecognizer {
    input: SharedInput,
}

impl SimRecognizer {
    pub fn new(input: SharedInput) -> Self {
        SimRecognizer { input }
    }
}

impl HandRecognizer for SimRecognizer {
    fn recognize(&mut self, _frame_ts_ms: f64) -> Result<Vec<HandObservation>, Error> {
        let input = self.input.borrow();
        // Clamp the hand centre only; the fan offsets stay intact so the
        // fingertip spread survives at the window edges (clamping each
        // point would collapse tips onto the thumb and fake a pinch).
        // Off-range landmarks are fine — the mappings are total.
        let cx = (1.0 - input.mouse_x).clamp(0.0, 1.0); // pre-flip, see module doc
        let cy = input.mouse_y.clamp(0.0, 1.0);

        // A relaxed open hand: tips fanned out well past the pinch
        // threshold unless a button pulls one onto the thumb.
        let mut keypoints = Vec::with_capacity(LANDMARK_COUNT);
        for i in 0..LANDMARK_COUNT {
            let spread = i as f32 * 0.012;
            keypoints.push(NormPoint {
                x: cx + spread - 0.12,
                y: cy + 0.08,
            });
        }
        let pinch = NormPoint { x: cx, y: cy };
        keypoints[THUMB_TIP] = pinch;
        if input.left_down {
            keypoints[INDEX_TIP] = pinch;
        }
        if input.right_down {
            keypoints[MIDDLE_TIP] = pinch;
        }

        Ok(vec![HandObservation {
            keypoints,
            handedness: Handedness::Right,
        }])
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimVideoSource
// ════════════════════════════════════════════════════════════════════════════

/// Wall-clock frames quantized to the simulated camera rate; consecutive
/// queries within one frame period report the same timestamp.
pub struct SimVideoSource {
    start: Instant,
}

impl SimVideoSource {
    pub fn new() -> Self {
        SimVideoSource {
            start: Instant::now(),
        }
    }
}

impl Default for SimVideoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoSource for SimVideoSource {
    fn ready(&self) -> bool {
        true
    }

    fn current_frame_ts(&self) -> f64 {
        let period = 1000.0 / SIM_FRAME_RATE_HZ;
        let elapsed = self.start.elapsed().as_secs_f64() * 1000.0;
        (elapsed / period).floor() * period
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SketchEditor
// ════════════════════════════════════════════════════════════════════════════

/// A minimal stroke-recording editor standing in for a full vector
/// editor. Dispatch Space pixels in, polylines out.
#[derive(Default)]
pub struct SketchEditor {
    pub strokes: Vec<Vec<(f32, f32)>>,
    pub current: Vec<(f32, f32)>,
    pub tool: String,
    pub button_held: bool,
}

impl SketchEditor {
    pub fn new() -> Self {
        SketchEditor {
            strokes: Vec::new(),
            current: Vec::new(),
            tool: "draw".to_string(),
            button_held: false,
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current.clear();
    }
}

/// Shared handle implementing the editor capability; the app, the dwell
/// action, and the window loop all hold clones.
#[derive(Clone)]
pub struct SharedSketch(pub Rc<RefCell<SketchEditor>>);

impl SharedSketch {
    pub fn new() -> Self {
        SharedSketch(Rc::new(RefCell::new(SketchEditor::new())))
    }
}

impl Default for SharedSketch {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor for SharedSketch {
    fn dispatch(&mut self, event: PointerEvent) {
        let mut ed = self.0.borrow_mut();
        match event.kind {
            PointerEventKind::Down => {
                ed.button_held = true;
                ed.current = vec![(event.x, event.y)];
            }
            PointerEventKind::Move => {
                if ed.button_held {
                    ed.current.push((event.x, event.y));
                }
            }
            PointerEventKind::Up => {
                ed.button_held = false;
                if !ed.current.is_empty() {
                    let stroke = std::mem::take(&mut ed.current);
                    ed.strokes.push(stroke);
                }
            }
        }
    }

    fn current_tool(&self) -> String {
        self.0.borrow().tool.clone()
    }

    fn set_current_tool(&mut self, tool: &str) {
        self.0.borrow_mut().tool = tool.to_string();
    }

    fn is_primary_button_held(&self) -> bool {
        self.0.borrow().button_held
    }

    fn held_modifiers(&self) -> ModifierKeys {
        ModifierKeys::default()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
