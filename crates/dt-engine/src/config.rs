use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::ledger::HistoryLedger;

/// Tuning for a [`DiceEngine`](crate::DiceEngine).
///
/// Every field has a default, so a JSON config file only needs the settings
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// How long the die free-spins before the outcome is drawn, in milliseconds.
    pub spin_duration_ms: u64,
    /// Frames per second of the fixed-step clock used by `tick()`.
    pub frame_rate: f32,
    /// Per-tick multiplier applied to the free-spin velocity (0..1).
    pub spin_decay: f32,
    /// Fraction of the remaining angle covered per settle tick (0..1).
    pub settle_rate: f32,
    /// Largest per-axis angle, in radians, still considered converged.
    pub tolerance: f32,
    /// Upper bound on each axis of the initial spin velocity, in rad/s.
    pub max_spin_speed: f32,
    /// How many completed rolls the history keeps.
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spin_duration_ms: 2000,
            frame_rate: 60.0,
            spin_decay: 0.992,
            settle_rate: 0.05,
            tolerance: 1e-3,
            max_spin_speed: 4.0,
            history_capacity: HistoryLedger::DEFAULT_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Accepted range for `frame_rate`, in frames per second.
    pub const FRAME_RATE_RANGE: RangeInclusive<f32> = 1.0..=1000.0;

    /// Smallest accepted `tolerance`. Below this an f32 pose a few radians
    /// from zero can no longer resolve the remaining gap.
    pub const MIN_TOLERANCE: f32 = 1e-5;

    /// Set the RNG seed for reproducible rolls.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set how long the die spins before the outcome is drawn.
    pub fn with_spin_duration(mut self, duration: Duration) -> Self {
        self.spin_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the fixed-step frame rate.
    pub fn with_frame_rate(mut self, fps: f32) -> Self {
        self.frame_rate = fps;
        self
    }

    /// Set the per-tick spin velocity decay.
    pub fn with_spin_decay(mut self, decay: f32) -> Self {
        self.spin_decay = decay;
        self
    }

    /// Set the per-tick settle fraction.
    pub fn with_settle_rate(mut self, rate: f32) -> Self {
        self.settle_rate = rate;
        self
    }

    /// Set the convergence tolerance in radians.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum initial spin speed per axis.
    pub fn with_max_spin_speed(mut self, speed: f32) -> Self {
        self.max_spin_speed = speed;
        self
    }

    /// Set the number of history entries retained.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// The spin duration as a [`Duration`].
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    /// Length of one fixed-step frame.
    pub fn frame_delta(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.frame_rate)
    }

    /// Upper bound on the fixed-step frames one roll needs to spin and then
    /// settle from the farthest possible pose.
    pub fn frame_budget(&self) -> u64 {
        let spin = (self.spin_duration().as_secs_f32() * self.frame_rate).ceil();
        let settle = ((self.tolerance / std::f32::consts::PI).ln()
            / (1.0 - self.settle_rate).ln())
        .ceil();
        spin.max(0.0) as u64 + settle.max(0.0) as u64 + 4
    }

    /// Check every setting is within range.
    pub fn validate(&self) -> ConfigResult<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigResult<()> {
            Err(ConfigError::Invalid {
                field,
                reason: reason.into(),
            })
        }

        if !Self::FRAME_RATE_RANGE.contains(&self.frame_rate) {
            return invalid(
                "frame_rate",
                format!(
                    "must be between {} and {} frames per second",
                    Self::FRAME_RATE_RANGE.start(),
                    Self::FRAME_RATE_RANGE.end()
                ),
            );
        }
        if !(self.spin_decay > 0.0 && self.spin_decay < 1.0) {
            return invalid("spin_decay", "must be between 0 and 1 (exclusive)");
        }
        if !(self.settle_rate > 0.0 && self.settle_rate < 1.0) {
            return invalid("settle_rate", "must be between 0 and 1 (exclusive)");
        }
        if !(self.tolerance.is_finite() && self.tolerance >= Self::MIN_TOLERANCE) {
            return invalid(
                "tolerance",
                format!("must be at least {:e} radians", Self::MIN_TOLERANCE),
            );
        }
        if !(self.max_spin_speed.is_finite() && self.max_spin_speed > 0.0) {
            return invalid("max_spin_speed", "must be a positive number");
        }
        if self.history_capacity == 0 {
            return invalid("history_capacity", "must keep at least one entry");
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
