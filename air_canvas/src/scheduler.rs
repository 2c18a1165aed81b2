//! Frame admission and performance adaptation.
//!
//! The host calls [`FrameScheduler::admit`] once per display-refresh tick;
//! the scheduler decides whether classification and dispatch run this
//! cycle. Two rejections exist: the video frame was already processed
//! (duplicate-frame suppression), or not enough time has passed since the
//! last accepted tick (rate limiting, independent of host refresh
//! cadence).
//!
//! Throughput is measured over 250 ms windows of host ticks. A window
//! below 36 ticks/s flips low-performance mode: inference drops to the
//! 30 Hz period and the particle cap shrinks. The check re-evaluates
//! every window with no debounce — the mode may flap around the
//! threshold, which only affects cosmetic density.

/// Measurement window for achieved throughput.
pub const RATE_WINDOW_MS: f64 = 250.0;
/// Ticks/s below which low-performance mode engages.
pub const LOW_RATE_THRESHOLD: f64 = 36.0;
/// Nominal inference rate.
pub const TARGET_RATE_HZ: f64 = 60.0;
/// Degraded inference rate.
pub const LOW_RATE_HZ: f64 = 30.0;
/// Live-particle cap, full and degraded.
pub const PARTICLE_CAP: usize = 300;
pub const PARTICLE_CAP_LOW: usize = 80;

// ════════════════════════════════════════════════════════════════════════════
// PerformanceState
// ════════════════════════════════════════════════════════════════════════════

/// Process-wide performance mode, owned by the scheduler; the overlay
/// reads the particle cap and the tick loop reads the laser-skip flag.
#[derive(Clone, Copy, Debug)]
pub struct PerformanceState {
    pub measured_rate: f64,
    pub low_performance: bool,
    pub detect_interval_ms: f64,
    pub particle_cap: usize,
}

impl Default for PerformanceState {
    fn default() -> Self {
        PerformanceState {
            measured_rate: TARGET_RATE_HZ,
            low_performance: false,
            detect_interval_ms: 1000.0 / TARGET_RATE_HZ,
            particle_cap: PARTICLE_CAP,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameScheduler
// ════════════════════════════════════════════════════════════════════════════

pub struct FrameScheduler {
    perf: PerformanceState,
    /// Timestamp of the last video frame actually processed.
    last_video_ts: Option<f64>,
    /// Host time of the last accepted tick.
    last_accept_ms: Option<f64>,
    window_start_ms: Option<f64>,
    window_ticks: u32,
}

impl FrameScheduler {
    pub fn new() -> Self {
        FrameScheduler {
            perf: PerformanceState::default(),
            last_video_ts: None,
            last_accept_ms: None,
            window_start_ms: None,
            window_ticks: 0,
        }
    }

    pub fn perf(&self) -> &PerformanceState {
        &self.perf
    }

    /// Gate one host tick. Returns true when classification + dispatch
    /// should run this cycle.
    pub fn admit(&mut self, now_ms: f64, video_frame_ts: f64) -> bool {
        self.measure(now_ms);

        // 1. Duplicate-frame suppression: never re-run classification on
        //    a frame that was already processed.
        if self.last_video_ts == Some(video_frame_ts) {
            return false;
        }

        // 2. Rate limiting against the current detect interval.
        if let Some(last) = self.last_accept_ms {
            if now_ms - last < self.perf.detect_interval_ms {
                return false;
            }
        }

        self.last_video_ts = Some(video_frame_ts);
        self.last_accept_ms = Some(now_ms);
        true
    }

    /// Window accounting over host ticks. Host cadence — not the accepted
    /// subset — is the throughput signal, so rejected ticks count too.
    fn measure(&mut self, now_ms: f64) {
        let start = match self.window_start_ms {
            Some(s) => s,
            None => {
                self.window_start_ms = Some(now_ms);
                self.window_ticks = 1;
                return;
            }
        };

        let elapsed = now_ms - start;
        if elapsed >= RATE_WINDOW_MS && elapsed > 0.0 {
            self.perf.measured_rate = self.window_ticks as f64 * 1000.0 / elapsed;
            if self.perf.measured_rate < LOW_RATE_THRESHOLD {
                self.perf.low_performance = true;
                self.perf.detect_interval_ms = 1000.0 / LOW_RATE_HZ;
                self.perf.particle_cap = PARTICLE_CAP_LOW;
            } else {
                self.perf.low_performance = false;
                self.perf.detect_interval_ms = 1000.0 / TARGET_RATE_HZ;
                self.perf.particle_cap = PARTICLE_CAP;
            }
            self.window_start_ms = Some(now_ms);
            self.window_ticks = 0;
        }

        self.window_ticks += 1;
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
