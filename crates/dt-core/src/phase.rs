use serde::{Deserialize, Serialize};

/// Where the single in-flight roll is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RollPhase {
    /// No active roll and nothing displayed.
    #[default]
    Idle,
    /// The die is free-spinning; no result exists yet.
    Spinning,
    /// The result is known and the orientation is converging on its face.
    Settling,
    /// The result is displayed. A new roll may begin from here.
    Settled,
}

impl RollPhase {
    /// Whether a roll is currently in flight (spinning or settling).
    pub fn is_rolling(self) -> bool {
        matches!(self, Self::Spinning | Self::Settling)
    }

    /// Whether a new roll may begin from this phase.
    pub fn accepts_begin(self) -> bool {
        !self.is_rolling()
    }
}

impl std::fmt::Display for RollPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Spinning => write!(f, "spinning"),
            Self::Settling => write!(f, "settling"),
            Self::Settled => write!(f, "settled"),
        }
    }
}
