//! Application core — the per-tick pipeline.
//!
//! One tick, invoked once per host display-refresh cycle:
//!
//! ```text
//!   streaming? ──▶ source ready? ──▶ scheduler.admit ──▶ recognize
//!        │              │                  │                 │
//!       no-op          no-op            rejected          classify
//!                                                            │
//!                       dispatch (synth) ◀── dwell ◀─────────┤
//!                                                            │
//!                              overlay repaint ◀─────────────┘
//! ```
//!
//! All mutable pipeline state lives here and is touched only by `tick`;
//! there is no second thread. A missing collaborator (no dwell zone
//! registered, editor capability absent) skips that feature for the tick
//! instead of failing it.

use std::sync::mpsc;
use std::time::Instant;

use gesture_stream::{classify, GestureResult};
use pointer_bridge::{DwellStatus, DwellTrigger, DwellZone, Editor, PointerSynthesizer};

use crate::capabilities::{HandRecognizer, HostEvent, VideoSource};
use crate::error::Error;
use crate::overlay::Overlay;
use crate::scheduler::FrameScheduler;
use crate::sim::{SharedInput, SharedSketch, SimRecognizer, SimVideoSource};
use crate::surface::Frame;
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Tuning knobs, fixed at startup. Not persisted.
#[derive(Clone, Copy, Debug)]
pub struct AppConfig {
    /// Render Space (overlay canvas) size in pixels.
    pub canvas_w: usize,
    pub canvas_h: usize,
    /// Dispatch Space (editor viewport) size in pixels.
    pub viewport_w: f32,
    pub viewport_h: f32,
    pub particle_seed: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            canvas_w: 640,
            canvas_h: 480,
            viewport_w: 960.0,
            viewport_h: 540.0,
            particle_seed: 0xC0FFEE,
        }
    }
}

/// Default clear-button zone in Dispatch Space, top-left corner.
pub fn default_clear_zone() -> DwellZone {
    DwellZone {
        left: 24.0,
        top: 24.0,
        right: 120.0,
        bottom: 72.0,
        margin: 36.0,
        threshold_ms: 600.0,
        cooldown_ms: 1200.0,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AirCanvasApp
// ════════════════════════════════════════════════════════════════════════════

pub struct AirCanvasApp {
    config: AppConfig,
    streaming: bool,
    scheduler: FrameScheduler,
    synth: PointerSynthesizer,
    dwell: Option<DwellTrigger>,
    dwell_status: DwellStatus,
    overlay: Overlay,
    frame: Frame,
    recognizer: Box<dyn HandRecognizer>,
    video: Box<dyn VideoSource>,
    editor: Box<dyn Editor>,
    /// Bound to the same effect as the dwell action; fired immediately on
    /// an external clear request.
    clear_action: Option<Box<dyn FnMut()>>,
}

impl AirCanvasApp {
    pub fn new(
        config: AppConfig,
        recognizer: Box<dyn HandRecognizer>,
        video: Box<dyn VideoSource>,
        editor: Box<dyn Editor>,
    ) -> Self {
        AirCanvasApp {
            streaming: true,
            scheduler: FrameScheduler::new(),
            synth: PointerSynthesizer::new(config.viewport_w, config.viewport_h),
            dwell: None,
            dwell_status: DwellStatus {
                inside: false,
                progress: 0.0,
                fired: false,
            },
            overlay: Overlay::new(config.particle_seed),
            frame: Frame::new(config.canvas_w, config.canvas_h),
            recognizer,
            video,
            editor,
            clear_action: None,
            config,
        }
    }

    /// Register the dwell-to-clear zone with its bound action.
    pub fn register_dwell(&mut self, zone: DwellZone, action: Box<dyn FnMut()>) {
        self.dwell = Some(DwellTrigger::new(zone, action));
    }

    /// Action for the host's immediate clear request (keyboard/button
    /// fallback). Typically the same effect the dwell zone is bound to.
    pub fn set_clear_action(&mut self, action: Box<dyn FnMut()>) {
        self.clear_action = Some(action);
    }

    pub fn set_streaming(&mut self, on: bool) {
        self.streaming = on;
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::ViewportResized(w, h) => {
                self.config.viewport_w = w;
                self.config.viewport_h = h;
                self.synth.set_viewport(w, h);
            }
            HostEvent::ClearRequested => {
                if let Some(action) = self.clear_action.as_mut() {
                    action();
                }
            }
        }
    }

    /// One host tick. Returns true when a full pipeline cycle ran (useful
    /// to skip presenting an unchanged frame).
    pub fn tick(&mut self, now_ms: f64) -> bool {
        // Level-triggered cancellation: checked before anything else.
        if !self.streaming {
            return false;
        }
        if !self.video.ready() {
            return false;
        }
        let frame_ts = self.video.current_frame_ts();
        if !self.scheduler.admit(now_ms, frame_ts) {
            return false;
        }

        // Sensing failure is "no hands this tick", never an error.
        let hands = self.recognizer.recognize(frame_ts).unwrap_or_default();
        let results: Vec<GestureResult> = hands.iter().map(classify).collect();

        // Dispatch: the first slot is the tracked hand. An empty tick
        // still runs the synthesizer so an in-flight stroke terminates.
        let tracked = results.first().cloned().unwrap_or_else(GestureResult::none);
        self.synth.tick(&tracked, self.editor.as_mut());

        // Dwell sees every slot's tracking point.
        if let Some(dwell) = self.dwell.as_mut() {
            let points: Vec<(f32, f32)> = results
                .iter()
                .filter_map(|r| r.tracking_point)
                .map(|p| {
                    gesture_stream::dispatch_point(p, self.config.viewport_w, self.config.viewport_h)
                })
                .collect();
            self.dwell_status = dwell.tick(&points, now_ms);
        }

        // Overlay state and full repaint.
        let cap = self.scheduler.perf().particle_cap;
        for (slot, (result, hand)) in results.iter().zip(hands.iter()).enumerate() {
            self.overlay
                .observe(slot, result, hand, now_ms, &self.frame, cap);
        }
        self.overlay.prune(now_ms);

        self.frame.clear();
        self.overlay.draw_markers(&mut self.frame, &hands);
        if !self.scheduler.perf().low_performance {
            self.overlay
                .draw_laser(&mut self.frame, self.synth.session_points());
        }
        self.overlay.draw_halos(&mut self.frame, now_ms);
        if let Some(dwell) = self.dwell.as_ref() {
            let (cx, cy) = self.dwell_center_render_space(dwell.zone());
            self.overlay
                .draw_dwell_progress(&mut self.frame, cx, cy, self.dwell_status.progress);
        }
        self.overlay.step_particles(&mut self.frame, now_ms, cap);
        true
    }

    /// The zone lives in Dispatch Space; the arc is painted in Render
    /// Space. Undo the horizontal flip, then scale to canvas pixels.
    fn dwell_center_render_space(&self, zone: &DwellZone) -> (f32, f32) {
        let (dx, dy) = zone.center();
        let norm_x = 1.0 - dx / self.config.viewport_w;
        let norm_y = dy / self.config.viewport_h;
        (
            norm_x * self.frame.width as f32,
            norm_y * self.frame.height as f32,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run — wire the simulation backends to a window and loop
// ════════════════════════════════════════════════════════════════════════════

pub fn run(config: AppConfig) -> Result<(), Error> {
    let input: SharedInput = Default::default();
    let sketch = SharedSketch::new();
    let (event_tx, event_rx) = mpsc::channel();

    let mut viz = Visualizer::new(event_tx).map_err(Error::WindowInit)?;
    let mut app = AirCanvasApp::new(
        config,
        Box::new(SimRecognizer::new(input.clone())),
        Box::new(SimVideoSource::new()),
        Box::new(sketch.clone()),
    );

    // Dwell and the host's keyboard fallback bind the same effect.
    let zone = default_clear_zone();
    let dwell_target = sketch.clone();
    app.register_dwell(zone, Box::new(move || dwell_target.0.borrow_mut().clear()));
    let key_target = sketch.clone();
    app.set_clear_action(Box::new(move || key_target.0.borrow_mut().clear()));

    let start = Instant::now();
    while viz.poll_input(&input) {
        for event in event_rx.try_iter() {
            app.handle_event(event);
        }
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;
        app.tick(now_ms);

        let editor = sketch.0.borrow();
        viz.present(
            app.frame(),
            &editor.strokes,
            &editor.current,
            &zone,
            &editor.tool,
            app.scheduler().perf().low_performance,
        )
        .map_err(Error::WindowUpdate)?;
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_stream::{HandObservation, Handedness, NormPoint, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};
    use pointer_bridge::{ModifierKeys, PointerEvent, PointerEventKind};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::error::Error;

    /// Observations to replay, one entry per recognize call; `None` marks
    /// a transient failure.
    struct ScriptedRecognizer {
        script: Vec<Option<Vec<HandObservation>>>,
        cursor: usize,
    }

    impl HandRecognizer for ScriptedRecognizer {
        fn recognize(&mut self, _frame_ts_ms: f64) -> Result<Vec<HandObservation>, Error> {
            let step = self.script.get(self.cursor).cloned().flatten();
            self.cursor += 1;
            match step {
                Some(hands) => Ok(hands),
                None => Err(Error::Recognizer("model timeout".into())),
            }
        }
    }

    struct TickingVideo {
        ready: bool,
        ts: Cell<f64>,
    }

    impl VideoSource for TickingVideo {
        fn ready(&self) -> bool {
            self.ready
        }
        fn current_frame_ts(&self) -> f64 {
            // Fresh frame on every query, so admission is rate-bound only
            self.ts.set(self.ts.get() + 1.0);
            self.ts.get()
        }
    }

    #[derive(Default)]
    struct EventLog {
        events: Vec<PointerEvent>,
        tool: String,
    }

    struct SharedLogEditor(Rc<RefCell<EventLog>>);

    impl Editor for SharedLogEditor {
        fn dispatch(&mut self, event: PointerEvent) {
            self.0.borrow_mut().events.push(event);
        }
        fn current_tool(&self) -> String {
            self.0.borrow().tool.clone()
        }
        fn set_current_tool(&mut self, tool: &str) {
            self.0.borrow_mut().tool = tool.to_string();
        }
        fn is_primary_button_held(&self) -> bool {
            matches!(
                self.0.borrow().events.last().map(|e| e.kind),
                Some(PointerEventKind::Down) | Some(PointerEventKind::Move)
            )
        }
        fn held_modifiers(&self) -> ModifierKeys {
            ModifierKeys::default()
        }
    }

    fn pinching_hand(x: f32, y: f32) -> HandObservation {
        let mut keypoints = vec![NormPoint { x: 0.9, y: 0.9 }; LANDMARK_COUNT];
        keypoints[THUMB_TIP] = NormPoint { x, y };
        keypoints[INDEX_TIP] = NormPoint { x: x + 0.01, y };
        HandObservation {
            keypoints,
            handedness: Handedness::Right,
        }
    }

    fn app_with(script: Vec<Option<Vec<HandObservation>>>) -> (AirCanvasApp, Rc<RefCell<EventLog>>) {
        let log = Rc::new(RefCell::new(EventLog {
            events: Vec::new(),
            tool: "draw".to_string(),
        }));
        let app = AirCanvasApp::new(
            AppConfig::default(),
            Box::new(ScriptedRecognizer { script, cursor: 0 }),
            Box::new(TickingVideo {
                ready: true,
                ts: Cell::new(0.0),
            }),
            Box::new(SharedLogEditor(log.clone())),
        );
        (app, log)
    }

    #[test]
    fn pinch_tick_dispatches_pointer_down() {
        let (mut app, log) = app_with(vec![Some(vec![pinching_hand(0.4, 0.5)])]);
        assert!(app.tick(0.0));
        let events = &log.borrow().events;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, PointerEventKind::Down);
        // Dispatch Space: pinch midpoint x = 0.405, flipped
        assert!((events[0].x - (1.0 - 0.405) * 960.0).abs() < 0.5);
    }

    #[test]
    fn recognizer_failure_ends_the_stroke() {
        let (mut app, log) = app_with(vec![
            Some(vec![pinching_hand(0.4, 0.5)]),
            None, // transient failure → treated as no hands
        ]);
        assert!(app.tick(0.0));
        assert!(app.tick(20.0));
        let kinds: Vec<_> = log.borrow().events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![PointerEventKind::Down, PointerEventKind::Up]);
    }

    #[test]
    fn streaming_off_is_a_noop() {
        let (mut app, log) = app_with(vec![Some(vec![pinching_hand(0.4, 0.5)])]);
        app.set_streaming(false);
        assert!(!app.tick(0.0));
        assert!(log.borrow().events.is_empty());
    }

    #[test]
    fn unready_source_is_a_noop() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut app = AirCanvasApp::new(
            AppConfig::default(),
            Box::new(ScriptedRecognizer {
                script: vec![Some(vec![pinching_hand(0.4, 0.5)])],
                cursor: 0,
            }),
            Box::new(TickingVideo {
                ready: false,
                ts: Cell::new(0.0),
            }),
            Box::new(SharedLogEditor(log.clone())),
        );
        assert!(!app.tick(0.0));
        assert!(log.borrow().events.is_empty());
    }

    #[test]
    fn external_clear_fires_bound_action() {
        let (mut app, _log) = app_with(vec![]);
        let cleared = Rc::new(Cell::new(0u32));
        let c = cleared.clone();
        app.set_clear_action(Box::new(move || c.set(c.get() + 1)));
        app.handle_event(HostEvent::ClearRequested);
        app.handle_event(HostEvent::ClearRequested);
        assert_eq!(cleared.get(), 2);
    }

    #[test]
    fn dwell_fires_after_sustained_presence() {
        // Hand pinching at norm (0.925, 0.0889): dispatch → (72, 48),
        // the centre of the default clear zone.
        let hand = pinching_hand(0.92, 0.0889);
        let script = (0..40).map(|_| Some(vec![hand.clone()])).collect();
        let (mut app, _log) = app_with(script);

        let cleared = Rc::new(Cell::new(0u32));
        let c = cleared.clone();
        app.register_dwell(default_clear_zone(), Box::new(move || c.set(c.get() + 1)));

        // 700 ms of ticks at 20 ms spacing
        for i in 0..=35 {
            app.tick(i as f64 * 20.0);
        }
        assert_eq!(cleared.get(), 1);
    }

    #[test]
    fn viewport_resize_rescales_dispatch() {
        let (mut app, log) = app_with(vec![Some(vec![pinching_hand(0.4, 0.5)])]);
        app.handle_event(HostEvent::ViewportResized(1920.0, 1080.0));
        app.tick(0.0);
        let events = &log.borrow().events;
        assert!((events[0].x - (1.0 - 0.405) * 1920.0).abs() < 1.0);
        assert!((events[0].y - 0.5 * 1080.0).abs() < 0.5);
    }
}
