//! The playback clock: the sole driver of what is "now".

/// Clock states. Seeking is not a resident state — `seek` is an
/// instantaneous transition that is legal from any state and leaves the
/// state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Time pinned at 0 or the last value, not advancing.
    Stopped,
    /// Time advances monotonically from tick deltas, capped at the total.
    Playing,
}

/// A single shared time value advanced by the cooperative tick.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    current: f64,
    total: f64,
    state: ClockState,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self {
            current: 0.0,
            total: 0.0,
            state: ClockState::Stopped,
        }
    }

    /// Current playhead time, seconds.
    pub fn current_time(&self) -> f64 {
        self.current
    }

    /// Total timeline duration the clock is bounded by.
    pub fn total_duration(&self) -> f64 {
        self.total
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == ClockState::Playing
    }

    /// Update the clock's bound when the timeline's derived duration
    /// changes. The playhead is re-clamped; a timeline shrinking under a
    /// playing clock stops it at the new end.
    pub fn set_total_duration(&mut self, total: f64) {
        self.total = total.max(0.0);
        if self.current >= self.total {
            self.current = self.total;
            if self.total > 0.0 {
                self.state = ClockState::Stopped;
            }
        }
    }

    /// Start playing. A no-op on an empty timeline; pressing play at the
    /// end of a finished run restarts from zero.
    pub fn play(&mut self) {
        if self.total <= 0.0 {
            return;
        }
        if self.current >= self.total {
            self.current = 0.0;
        }
        self.state = ClockState::Playing;
    }

    /// Stop advancing; time holds its value.
    pub fn pause(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Jump to a time, clamped to `[0, total]`. Legal in any state; the
    /// state is unchanged.
    pub fn seek(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        self.current = time.clamp(0.0, self.total);
    }

    /// Advance by a wall-clock delta while playing. Reaching the end stops
    /// the run, holding time at the end. Returns the new current time.
    pub fn advance(&mut self, delta: f64) -> f64 {
        if self.state == ClockState::Playing && delta.is_finite() && delta > 0.0 {
            self.current += delta;
            if self.current >= self.total {
                self.current = self.total;
                self.state = ClockState::Stopped;
            }
        }
        self.current
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}
