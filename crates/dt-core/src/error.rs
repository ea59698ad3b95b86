use crate::catalog::DieKind;
use crate::phase::RollPhase;

/// Alias for `Result<T, DiceError>`.
pub type DiceResult<T> = Result<T, DiceError>;

/// Errors that can occur while composing, rolling, or settling dice.
///
/// Every variant is recoverable: none of them leave the roll engine or the
/// history ledger in an inconsistent state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// A dice group referenced a die id that is not in the catalog.
    #[error("unknown die: \"{0}\"")]
    InvalidDie(String),

    /// A dice group asked for a number of dice outside the allowed range.
    #[error("invalid count {count} for {die} (expected 1..={max})")]
    InvalidCount {
        /// The die id of the offending group.
        die: String,
        /// The rejected count.
        count: u32,
        /// The largest count a single group may hold.
        max: u32,
    },

    /// An orientation lookup asked for a face the die does not have.
    #[error("{die} has no face {face}")]
    UnknownFace {
        /// The die whose face table was searched.
        die: DieKind,
        /// The missing face value.
        face: u32,
    },

    /// A roll was started while another one was still in flight.
    #[error("a roll is already in progress ({0})")]
    RollAlreadyInProgress(RollPhase),

    /// A roll request was composed without any dice.
    #[error("a roll needs at least one die")]
    EmptyRequest,

    /// A dice expression such as `2d6` could not be parsed.
    #[error("invalid dice expression: \"{0}\"")]
    InvalidExpression(String),
}
