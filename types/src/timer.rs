use std::time::Duration;

/// A host-driven countdown.
///
/// Time only moves when the owner calls [`DelayTimer::advance`], so the timer
/// works the same under a browser frame loop, a replay, or a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayTimer {
    elapsed: Duration,
    duration: Duration,
}

impl DelayTimer {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
