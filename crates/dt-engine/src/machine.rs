use std::time::Duration;

use rand::Rng;

use dt_core::{DiceError, DiceResult, RollOutcome, RollPhase, RollRequest};

use crate::generator::OutcomeGenerator;

/// The current roll, with the data each phase owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RollState {
    /// Nothing rolled yet, or the last roll was reset.
    #[default]
    Idle,
    /// The die is spinning; the outcome has not been drawn.
    Spinning {
        /// The frozen request being rolled.
        request: RollRequest,
        /// Spin time accumulated so far.
        elapsed: Duration,
    },
    /// The outcome is drawn and the die is turning to show it.
    Settling {
        /// The frozen request being rolled.
        request: RollRequest,
        /// The drawn outcome, not yet displayed.
        outcome: RollOutcome,
    },
    /// The die is at rest showing the outcome.
    Settled {
        /// The request that was rolled.
        request: RollRequest,
        /// The displayed outcome.
        outcome: RollOutcome,
    },
}

impl RollState {
    /// The phase tag of this state.
    pub fn phase(&self) -> RollPhase {
        match self {
            Self::Idle => RollPhase::Idle,
            Self::Spinning { .. } => RollPhase::Spinning,
            Self::Settling { .. } => RollPhase::Settling,
            Self::Settled { .. } => RollPhase::Settled,
        }
    }

    /// The request of the current or last roll.
    pub fn request(&self) -> Option<&RollRequest> {
        match self {
            Self::Idle => None,
            Self::Spinning { request, .. }
            | Self::Settling { request, .. }
            | Self::Settled { request, .. } => Some(request),
        }
    }

    /// The drawn outcome, once the spin has finished.
    pub fn outcome(&self) -> Option<&RollOutcome> {
        match self {
            Self::Settling { outcome, .. } | Self::Settled { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

/// A phase change produced by a machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    /// Phase before the transition.
    pub from: RollPhase,
    /// Phase after the transition.
    pub to: RollPhase,
}

impl std::fmt::Display for PhaseChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Idle → Spinning → Settling → Settled, driven by elapsed frame time.
#[derive(Debug, Clone)]
pub struct RollMachine {
    state: RollState,
    spin_duration: Duration,
}

impl RollMachine {
    /// An idle machine that spins for `spin_duration` before drawing.
    pub fn new(spin_duration: Duration) -> Self {
        Self {
            state: RollState::Idle,
            spin_duration,
        }
    }

    /// The current state.
    pub fn state(&self) -> &RollState {
        &self.state
    }

    /// The current phase.
    pub fn phase(&self) -> RollPhase {
        self.state.phase()
    }

    /// How long each roll spins.
    pub fn spin_duration(&self) -> Duration {
        self.spin_duration
    }

    /// Start rolling `request`, dropping any displayed outcome.
    ///
    /// Only allowed from Idle or Settled. While a roll is in flight this
    /// returns [`DiceError::RollAlreadyInProgress`] and changes nothing.
    pub fn begin(&mut self, request: RollRequest) -> DiceResult<PhaseChange> {
        let from = self.phase();
        if !from.accepts_begin() {
            return Err(DiceError::RollAlreadyInProgress(from));
        }
        self.state = RollState::Spinning {
            request,
            elapsed: Duration::ZERO,
        };
        Ok(PhaseChange {
            from,
            to: RollPhase::Spinning,
        })
    }

    /// Add `dt` of spin time. Once the spin duration is reached the outcome
    /// is drawn from `generator` and the machine moves to Settling.
    ///
    /// Outside Spinning this does nothing, so the outcome is drawn exactly
    /// once per roll.
    pub fn elapse<R: Rng>(
        &mut self,
        dt: Duration,
        generator: &mut OutcomeGenerator<R>,
    ) -> Option<PhaseChange> {
        let RollState::Spinning { request, elapsed } = &mut self.state else {
            return None;
        };
        *elapsed += dt;
        if *elapsed < self.spin_duration {
            return None;
        }
        let outcome = generator.evaluate(request);
        let RollState::Spinning { request, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        self.state = RollState::Settling { request, outcome };
        Some(PhaseChange {
            from: RollPhase::Spinning,
            to: RollPhase::Settling,
        })
    }

    /// Mark the settle as finished. Only moves Settling to Settled.
    pub fn converge(&mut self) -> Option<PhaseChange> {
        if !matches!(self.state, RollState::Settling { .. }) {
            return None;
        }
        let RollState::Settling { request, outcome } = std::mem::take(&mut self.state) else {
            return None;
        };
        self.state = RollState::Settled { request, outcome };
        Some(PhaseChange {
            from: RollPhase::Settling,
            to: RollPhase::Settled,
        })
    }

    /// Drop the current roll from any phase. Returns `None` when already idle.
    pub fn reset(&mut self) -> Option<PhaseChange> {
        let from = self.phase();
        if from == RollPhase::Idle {
            return None;
        }
        self.state = RollState::Idle;
        Some(PhaseChange {
            from,
            to: RollPhase::Idle,
        })
    }
}
