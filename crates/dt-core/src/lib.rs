//! Core types for Dicetower: the die catalog, face orientations, and the
//! value objects that flow through a roll.
//!
//! This crate holds no randomness and no clock. It defines what a die is,
//! which orientation shows each face on top, and the frozen request/outcome
//! values that the engine in `dt-engine` passes between its components.

/// Static die catalog and per-face orientation tables.
pub mod catalog;
/// Error types used throughout the workspace.
pub mod error;
/// Euler orientations and angular velocities.
pub mod orientation;
/// Completed roll outcomes.
pub mod outcome;
/// The phase of the roll lifecycle.
pub mod phase;
/// Dice groups and validated roll requests.
pub mod request;

/// Re-export catalog types.
pub use catalog::{DieKind, DieKindInfo, DieSpec, Face};
/// Re-export error types.
pub use error::{DiceError, DiceResult};
/// Re-export orientation types.
pub use orientation::{AngularVelocity, Orientation};
/// Re-export outcome types.
pub use outcome::{GroupResult, RollOutcome};
/// Re-export the phase enum.
pub use phase::RollPhase;
/// Re-export request types.
pub use request::{DiceGroup, RequestGroup, RollRequest};
