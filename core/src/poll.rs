//! Poll scheduler: decides which ticks query the probe.

/// Time accumulator that fires at most once per tick.
///
/// The interval is trusted to be in range; clamping happens at the
/// configuration boundary (`IndicatorConfig::sanitized`).
#[derive(Debug, Clone, PartialEq)]
pub struct PollTimer {
    interval_secs: f64,
    accumulated_secs: f64,
}

impl PollTimer {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval_secs,
            accumulated_secs: 0.0,
        }
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    pub fn accumulated_secs(&self) -> f64 {
        self.accumulated_secs
    }

    pub fn set_interval(&mut self, interval_secs: f64) {
        self.interval_secs = interval_secs;
    }

    /// Arm the timer so the next tick fires immediately
    pub fn preset(&mut self) {
        self.accumulated_secs = self.interval_secs;
    }

    pub fn clear(&mut self) {
        self.accumulated_secs = 0.0;
    }

    /// Advance by `delta_secs`. Returns true if a poll is due.
    ///
    /// Fires once no matter how many intervals elapsed; the remainder is
    /// discarded rather than carried over.
    pub fn tick(&mut self, delta_secs: f64) -> bool {
        self.accumulated_secs += delta_secs.max(0.0);
        if self.accumulated_secs >= self.interval_secs {
            self.accumulated_secs = 0.0;
            return true;
        }
        false
    }
}
