//! Roll engine for Dicetower.
//!
//! Drives a single roll through its lifecycle on a cooperative frame clock:
//! the die free-spins, the outcome is drawn once the spin time has elapsed,
//! the orientation settles onto the rolled face, and the completed outcome
//! is appended to a bounded history. Everything runs on one thread; the
//! caller owns the loop and calls [`DiceEngine::tick`] once per frame.

/// Fixed-step frame clock.
pub mod clock;
/// Engine configuration and its validation.
pub mod config;
/// The `DiceEngine` facade consumed by presentation layers.
pub mod engine;
/// Error types for configuration loading.
pub mod error;
/// Observer hooks for phase, orientation, and outcome updates.
pub mod event;
/// Uniform outcome generation.
pub mod generator;
/// Bounded, newest-first roll history.
pub mod ledger;
/// The roll lifecycle state machine.
pub mod machine;
/// Free-spin and settle orientation recurrences.
pub mod resolver;

/// Re-export of [`clock::FrameClock`].
pub use clock::FrameClock;
/// Re-export of [`config::EngineConfig`].
pub use config::EngineConfig;
/// Re-export of [`engine::DiceEngine`].
pub use engine::DiceEngine;
/// Re-exports of [`error::ConfigError`] and [`error::ConfigResult`].
pub use error::{ConfigError, ConfigResult};
/// Re-export of [`event::Observers`].
pub use event::Observers;
/// Re-export of [`generator::OutcomeGenerator`].
pub use generator::OutcomeGenerator;
/// Re-exports of [`ledger::HistoryEntry`] and [`ledger::HistoryLedger`].
pub use ledger::{HistoryEntry, HistoryLedger};
/// Re-exports of [`machine::RollMachine`], [`machine::RollState`], and [`machine::PhaseChange`].
pub use machine::{PhaseChange, RollMachine, RollState};
/// Re-exports of [`resolver::Motion`] and [`resolver::OrientationResolver`].
pub use resolver::{Motion, OrientationResolver};
