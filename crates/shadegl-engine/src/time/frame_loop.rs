use super::frame_clock::FrameClock;

/// Observable state of a [`FrameLoop`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// No callback installed; arriving frames are ignored.
    Idle,
    /// A callback runs on every presented frame.
    Running,
}

struct Running<C> {
    clock: FrameClock,
    /// `None` while the callback is lent out to a tick in progress.
    callback: Option<C>,
}

/// Callback lent out for one frame by [`FrameLoop::begin_tick`].
pub struct Tick<C> {
    pub elapsed_ms: f64,
    pub callback: C,
    epoch: u64,
}

/// Idle/Running state machine behind the per-frame animation callback.
///
/// The loop never schedules anything itself. `start` and `end_tick` report
/// whether the owner must ask the host for a frame; at most one request is
/// outstanding at a time, so ticks never overlap or double up.
///
/// The callback is moved out for the duration of a tick so the owner can hand
/// it mutable access to itself. Calling `start` or `stop` during that window
/// bumps the epoch, and `end_tick` then drops the stale callback instead of
/// reinstalling it.
pub struct FrameLoop<C> {
    running: Option<Running<C>>,
    epoch: u64,
    frame_pending: bool,
}

impl<C> Default for FrameLoop<C> {
    fn default() -> Self {
        Self {
            running: None,
            epoch: 0,
            frame_pending: false,
        }
    }
}

impl<C> FrameLoop<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        if self.running.is_some() {
            LoopState::Running
        } else {
            LoopState::Idle
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Whether a frame has been requested and not yet delivered.
    #[inline]
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Installs `callback` and resets the time baseline to now.
    ///
    /// Replaces the callback of an already running loop. Returns `true` when
    /// the owner must request a frame.
    pub fn start(&mut self, callback: C) -> bool {
        self.epoch = self.epoch.wrapping_add(1);
        self.running = Some(Running {
            clock: FrameClock::new(),
            callback: Some(callback),
        });
        self.claim_frame()
    }

    /// Transitions to Idle. Returns whether the loop was running.
    pub fn stop(&mut self) -> bool {
        self.epoch = self.epoch.wrapping_add(1);
        self.running.take().is_some()
    }

    /// Consumes a delivered frame.
    ///
    /// Returns the elapsed time and the callback to run, or `None` when the
    /// loop is idle or a tick is already in progress.
    pub fn begin_tick(&mut self) -> Option<Tick<C>> {
        self.frame_pending = false;

        let running = self.running.as_mut()?;
        let callback = running.callback.take()?;
        let time = running.clock.tick();

        Some(Tick {
            elapsed_ms: time.elapsed_ms,
            callback,
            epoch: self.epoch,
        })
    }

    /// Gives back the callback lent out by [`begin_tick`](Self::begin_tick).
    ///
    /// Returns `true` when the owner must request the next frame.
    pub fn end_tick(&mut self, tick: Tick<C>) -> bool {
        if tick.epoch == self.epoch {
            if let Some(running) = self.running.as_mut() {
                running.callback = Some(tick.callback);
            }
        }

        self.running.is_some() && self.claim_frame()
    }

    fn claim_frame(&mut self) -> bool {
        if self.frame_pending {
            false
        } else {
            self.frame_pending = true;
            true
        }
    }
}
