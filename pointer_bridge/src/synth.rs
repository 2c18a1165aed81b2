//! Pointer-event synthesis — the Idle/Drawing state machine.
//!
//! One synthesizer instance exists system-wide, matching the single
//! tracked hand the pipeline is configured for; it owns the single active
//! drawing session. Each tick it consumes the tracked hand's gesture
//! result and the editor's current input state, and emits at most one
//! pointer event:
//!
//! * `Idle → Drawing` on an index pinch with a tracking point: one
//!   `pointer_down` (unless the editor already reports the primary button
//!   held — consecutive qualifying ticks must not double-fire).
//! * While `Drawing`: samples closer than [`JITTER_EPSILON`] to the last
//!   buffered point are dropped — hand tremor must not flood the editor —
//!   otherwise the point is buffered and a `pointer_move` goes out with
//!   the editor's held modifiers.
//! * `Drawing → Idle` on any other label (or no hands at all): one
//!   `pointer_up` at the last buffered point, then the session clears.
//!
//! Tool cycling is independent of drawing state and strictly
//! edge-triggered: the middle pinch advances the tool once per transition,
//! never while held.

use gesture_stream::mapping::dispatch_point;
use gesture_stream::{GestureLabel, GestureResult, NormPoint};

use crate::editor::{Editor, PointerEvent, PointerEventKind};

/// Minimum normalized-space travel between buffered samples. Steps below
/// this are tremor, not intent.
pub const JITTER_EPSILON: f32 = 0.0005;

/// Fixed tool order the middle pinch cycles through (wrapping).
pub const TOOL_CYCLE: [&str; 5] = ["select", "hand", "draw", "eraser", "geo"];

// ════════════════════════════════════════════════════════════════════════════
// PointerSynthesizer
// ════════════════════════════════════════════════════════════════════════════

pub struct PointerSynthesizer {
    /// The active drawing session: append-only while drawing, cleared on
    /// the transition back to idle.
    session: Vec<NormPoint>,
    drawing: bool,
    /// Previous tick's label, for edge-triggered tool cycling.
    prev_label: GestureLabel,
    viewport_w: f32,
    viewport_h: f32,
}

impl PointerSynthesizer {
    pub fn new(viewport_w: f32, viewport_h: f32) -> Self {
        PointerSynthesizer {
            session: Vec::new(),
            drawing: false,
            prev_label: GestureLabel::None,
            viewport_w,
            viewport_h,
        }
    }

    /// Host viewport changed (resize subscription).
    pub fn set_viewport(&mut self, w: f32, h: f32) {
        self.viewport_w = w;
        self.viewport_h = h;
    }

    /// Points of the in-progress session, for the laser trail.
    pub fn session_points(&self) -> &[NormPoint] {
        &self.session
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Consume one tick's gesture result for the tracked hand.
    pub fn tick(&mut self, result: &GestureResult, editor: &mut dyn Editor) {
        self.cycle_tool_on_edge(result.label, editor);

        match (result.label, result.tracking_point) {
            (GestureLabel::IndexPinch, Some(point)) => self.advance_stroke(point, editor),
            _ => self.end_stroke(editor),
        }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    fn advance_stroke(&mut self, point: NormPoint, editor: &mut dyn Editor) {
        if !self.drawing {
            self.session.push(point);
            self.drawing = true;
            // Consecutive qualifying ticks while the editor already holds
            // the button must not emit a second down.
            if !editor.is_primary_button_held() {
                let (x, y) = dispatch_point(point, self.viewport_w, self.viewport_h);
                editor.dispatch(PointerEvent::primary(PointerEventKind::Down, x, y));
            }
            return;
        }

        let last = self.session[self.session.len() - 1];
        if point.distance_to(&last) < JITTER_EPSILON {
            return; // tremor — no dispatch, no buffer append
        }

        self.session.push(point);
        let (x, y) = dispatch_point(point, self.viewport_w, self.viewport_h);
        let mut event = PointerEvent::primary(PointerEventKind::Move, x, y);
        event.modifiers = editor.held_modifiers();
        editor.dispatch(event);
    }

    fn end_stroke(&mut self, editor: &mut dyn Editor) {
        if !self.drawing {
            return;
        }
        if let Some(last) = self.session.last().copied() {
            let (x, y) = dispatch_point(last, self.viewport_w, self.viewport_h);
            editor.dispatch(PointerEvent::primary(PointerEventKind::Up, x, y));
        }
        self.session.clear();
        self.drawing = false;
    }

    // ── tool cycling ──────────────────────────────────────────────────────

    /// Advance the tool once per transition *to* a middle pinch. The
    /// previous-label register updates on every change, so holding the
    /// pinch never re-fires.
    fn cycle_tool_on_edge(&mut self, label: GestureLabel, editor: &mut dyn Editor) {
        if label == self.prev_label {
            return;
        }
        self.prev_label = label;

        if label != GestureLabel::MiddlePinch {
            return;
        }

        let current = editor.current_tool();
        let next = match TOOL_CYCLE.iter().position(|t| *t == current) {
            Some(i) => TOOL_CYCLE[(i + 1) % TOOL_CYCLE.len()],
            None => TOOL_CYCLE[0], // unknown tool resets to the list head
        };
        editor.set_current_tool(next);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ModifierKeys;

    const W: f32 = 1000.0;
    const H: f32 = 800.0;

    /// Records every dispatch and mimics the editor's button bookkeeping:
    /// the primary button reads as held between down and up.
    struct RecordingEditor {
        events: Vec<PointerEvent>,
        tool: String,
        modifiers: ModifierKeys,
    }

    impl RecordingEditor {
        fn new(tool: &str) -> Self {
            RecordingEditor {
                events: Vec::new(),
                tool: tool.to_string(),
                modifiers: ModifierKeys::default(),
            }
        }

        fn kinds(&self) -> Vec<PointerEventKind> {
            self.events.iter().map(|e| e.kind).collect()
        }

        fn count(&self, kind: PointerEventKind) -> usize {
            self.events.iter().filter(|e| e.kind == kind).count()
        }
    }

    impl Editor for RecordingEditor {
        fn dispatch(&mut self, event: PointerEvent) {
            self.events.push(event);
        }
        fn current_tool(&self) -> String {
            self.tool.clone()
        }
        fn set_current_tool(&mut self, tool: &str) {
            self.tool = tool.to_string();
        }
        fn is_primary_button_held(&self) -> bool {
            match self.events.last() {
                Some(e) => e.kind != PointerEventKind::Up,
                None => false,
            }
        }
        fn held_modifiers(&self) -> ModifierKeys {
            self.modifiers
        }
    }

    fn pinch_at(x: f32, y: f32) -> GestureResult {
        GestureResult {
            label: GestureLabel::IndexPinch,
            tracking_point: Some(NormPoint::new(x, y)),
        }
    }

    fn middle_pinch() -> GestureResult {
        GestureResult {
            label: GestureLabel::MiddlePinch,
            tracking_point: Some(NormPoint::new(0.5, 0.5)),
        }
    }

    #[test]
    fn jitter_gate_stationary_pinch() {
        let mut synth = PointerSynthesizer::new(W, H);
        let mut ed = RecordingEditor::new("draw");

        for _ in 0..10 {
            synth.tick(&pinch_at(0.5, 0.5), &mut ed);
        }
        synth.tick(&GestureResult::none(), &mut ed);

        assert_eq!(ed.count(PointerEventKind::Down), 1);
        assert_eq!(ed.count(PointerEventKind::Move), 0);
        assert_eq!(ed.count(PointerEventKind::Up), 1);

        // Up lands at the dispatch-space image of (0.5, 0.5)
        let up = ed.events.last().unwrap();
        assert!((up.x - (1.0 - 0.5) * W).abs() < 1e-3);
        assert!((up.y - 0.5 * H).abs() < 1e-3);
    }

    #[test]
    fn motion_passes_through_gate() {
        let mut synth = PointerSynthesizer::new(W, H);
        let mut ed = RecordingEditor::new("draw");

        for i in 0..5 {
            synth.tick(&pinch_at(0.10 + i as f32 * 0.01, 0.5), &mut ed);
        }

        assert_eq!(ed.count(PointerEventKind::Down), 1);
        assert_eq!(ed.count(PointerEventKind::Move), 4);
        assert_eq!(synth.session_points().len(), 5);
    }

    #[test]
    fn down_suppressed_when_button_already_held() {
        let mut synth = PointerSynthesizer::new(W, H);
        let mut ed = RecordingEditor::new("draw");
        // Pre-seed a down so the editor reports the button as held.
        ed.dispatch(PointerEvent::primary(PointerEventKind::Down, 0.0, 0.0));

        synth.tick(&pinch_at(0.3, 0.3), &mut ed);
        assert_eq!(ed.count(PointerEventKind::Down), 1); // only the seed
        assert!(synth.is_drawing());
    }

    #[test]
    fn up_fires_even_when_hands_vanish() {
        let mut synth = PointerSynthesizer::new(W, H);
        let mut ed = RecordingEditor::new("draw");

        synth.tick(&pinch_at(0.2, 0.2), &mut ed);
        synth.tick(&GestureResult::none(), &mut ed); // recognizer lost the hand

        assert_eq!(ed.kinds(), vec![PointerEventKind::Down, PointerEventKind::Up]);
        assert!(synth.session_points().is_empty());
    }

    #[test]
    fn switching_to_middle_pinch_ends_stroke() {
        let mut synth = PointerSynthesizer::new(W, H);
        let mut ed = RecordingEditor::new("draw");

        synth.tick(&pinch_at(0.2, 0.2), &mut ed);
        synth.tick(&pinch_at(0.3, 0.2), &mut ed);
        synth.tick(&middle_pinch(), &mut ed);

        assert_eq!(ed.count(PointerEventKind::Up), 1);
        assert!(!synth.is_drawing());
    }

    #[test]
    fn move_carries_held_modifiers() {
        let mut synth = PointerSynthesizer::new(W, H);
        let mut ed = RecordingEditor::new("draw");
        ed.modifiers = ModifierKeys {
            ctrl: false,
            alt: false,
            shift: true,
        };

        synth.tick(&pinch_at(0.10, 0.5), &mut ed);
        synth.tick(&pinch_at(0.20, 0.5), &mut ed);

        let mv = ed
            .events
            .iter()
            .find(|e| e.kind == PointerEventKind::Move)
            .unwrap();
        assert!(mv.modifiers.shift);
    }

    #[test]
    fn tool_cycle_is_edge_triggered() {
        let mut synth = PointerSynthesizer::new(W, H);
        let mut ed = RecordingEditor::new("select");

        let seq = [
            GestureResult::none(),
            middle_pinch(),
            middle_pinch(),
            pinch_at(0.5, 0.5),
            middle_pinch(),
        ];
        let mut tools = Vec::new();
        for r in &seq {
            synth.tick(r, &mut ed);
            tools.push(ed.current_tool());
        }

        // Fires on frame 2 and frame 5 only
        assert_eq!(tools, vec!["select", "hand", "hand", "hand", "draw"]);
    }

    #[test]
    fn tool_cycle_wraps() {
        let mut synth = PointerSynthesizer::new(W, H);
        let mut ed = RecordingEditor::new("geo");

        synth.tick(&middle_pinch(), &mut ed);
        assert_eq!(ed.current_tool(), "select");
    }

    #[test]
    fn unknown_tool_resets_to_list_head() {
        let mut synth = PointerSynthesizer::new(W, H);
        let mut ed = RecordingEditor::new("laser");

        synth.tick(&middle_pinch(), &mut ed);
        assert_eq!(ed.current_tool(), "select");
    }

    #[test]
    fn pinch_without_point_ends_stroke() {
        let mut synth = PointerSynthesizer::new(W, H);
        let mut ed = RecordingEditor::new("draw");

        synth.tick(&pinch_at(0.4, 0.4), &mut ed);
        synth.tick(
            &GestureResult {
                label: GestureLabel::IndexPinch,
                tracking_point: None,
            },
            &mut ed,
        );

        assert_eq!(ed.count(PointerEventKind::Up), 1);
    }
}
