use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick (or since the last reset), in
    /// milliseconds.
    pub elapsed_ms: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Elapsed time is reported as measured. [`FrameClock::with_clamps`] opts into
/// bounding it, for simulations that must not see zero or huge steps after a
/// stall.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    clamps: Option<(Duration, Duration)>,
}

impl FrameClock {
    /// Creates an unclamped clock with its baseline at "now".
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            clamps: None,
        }
    }

    /// Creates a clock whose elapsed time is clamped to `[dt_min, dt_max]`.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            clamps: Some((dt_min, dt_max)),
            ..Self::new()
        }
    }

    /// Moves the baseline to now and restarts the frame counter.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.frame_index = 0;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let mut dt = now.saturating_duration_since(self.last);

        if let Some((dt_min, dt_max)) = self.clamps {
            dt = dt.clamp(dt_min, dt_max);
        }

        self.last = now;

        let ft = FrameTime {
            elapsed_ms: dt.as_secs_f64() * 1000.0,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
