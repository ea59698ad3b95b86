use std::time::Duration;

/// Tracks frame time: a monotonic tick counter and total elapsed time.
///
/// The fixed frame delta drives headless runs; real-time callers report
/// their own measured delta through [`FrameClock::advance_by`].
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick: u64,
    frame_delta: Duration,
    elapsed: Duration,
}

impl FrameClock {
    /// Create a clock at tick 0 with the given fixed frame length.
    pub fn new(frame_delta: Duration) -> Self {
        Self {
            tick: 0,
            frame_delta,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by one fixed frame. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.advance_by(self.frame_delta)
    }

    /// Advance by one frame of length `dt`. Returns the new tick number.
    pub fn advance_by(&mut self, dt: Duration) -> u64 {
        self.tick += 1;
        self.elapsed += dt;
        self.tick
    }

    /// Current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Total time across all ticks.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The fixed frame length.
    pub fn frame_delta(&self) -> Duration {
        self.frame_delta
    }
}
