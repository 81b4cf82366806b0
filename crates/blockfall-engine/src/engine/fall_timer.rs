use std::time::Duration;

/// Cancelable gravity trigger driven by explicit elapsed time.
///
/// The timer never reads a clock. Callers feed it elapsed time with
/// [`FallTimer::advance`] and poll [`FallTimer::take_due`]. Accumulated time
/// is capped at one interval, so at most one tick is ever pending; a slow
/// frame does not produce a burst of catch-up ticks.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::FallTimer;
///
/// let mut timer = FallTimer::new();
/// timer.arm(Duration::from_millis(800));
///
/// timer.advance(Duration::from_millis(500));
/// assert!(!timer.take_due());
/// timer.advance(Duration::from_secs(10));
/// assert!(timer.take_due());
/// assert!(!timer.take_due());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallTimer {
    interval: Option<Duration>,
    elapsed: Duration,
}

impl FallTimer {
    /// Creates a disarmed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Starts (or restarts) the timer with the given interval.
    pub fn arm(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.elapsed = Duration::ZERO;
    }

    /// Stops the timer and drops any accumulated time.
    pub fn cancel(&mut self) {
        self.interval = None;
        self.elapsed = Duration::ZERO;
    }

    /// Changes the interval of an armed timer, dropping accumulated time.
    ///
    /// A disarmed timer stays disarmed.
    pub fn reschedule(&mut self, interval: Duration) {
        if self.interval.is_some() {
            self.arm(interval);
        }
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Adds `elapsed` to the accumulated time. Ignored while disarmed.
    pub fn advance(&mut self, elapsed: Duration) {
        if let Some(interval) = self.interval {
            self.elapsed = self.elapsed.saturating_add(elapsed).min(interval);
        }
    }

    /// Consumes the pending tick, if any.
    pub fn take_due(&mut self) -> bool {
        match self.interval {
            Some(interval) if self.elapsed >= interval => {
                self.elapsed -= interval;
                true
            }
            _ => false,
        }
    }
}
