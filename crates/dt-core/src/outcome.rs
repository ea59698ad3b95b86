//! Completed roll outcomes.

use serde::{Deserialize, Serialize};

use crate::catalog::DieKind;

/// The individual results for one group of a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupResult {
    /// The die kind rolled.
    pub die: DieKind,
    /// One value per die, in roll order.
    pub results: Vec<u32>,
}

impl GroupResult {
    /// Sum of this group's values.
    pub fn sum(&self) -> i64 {
        self.results.iter().map(|v| i64::from(*v)).sum()
    }
}

impl std::fmt::Display for GroupResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .results
            .iter()
            .map(|v| self.die.format_value(*v))
            .collect();
        write!(f, "{}: {}", self.die, values.join(", "))
    }
}

/// The immutable result of one completed roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    groups: Vec<GroupResult>,
    modifier: i32,
    total: i64,
}

impl RollOutcome {
    /// Build an outcome; the total is every result plus the modifier.
    pub fn new(groups: Vec<GroupResult>, modifier: i32) -> Self {
        let total = groups.iter().map(GroupResult::sum).sum::<i64>() + i64::from(modifier);
        Self {
            groups,
            modifier,
            total,
        }
    }

    /// Per-group breakdown in request order.
    pub fn groups(&self) -> &[GroupResult] {
        &self.groups
    }

    /// The modifier that was applied.
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Sum of all dice plus the modifier.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Sum of all dice without the modifier.
    pub fn dice_total(&self) -> i64 {
        self.total - i64::from(self.modifier)
    }

    /// The first die's first result: the face the renderer settles on.
    pub fn primary_face(&self) -> Option<(DieKind, u32)> {
        let group = self.groups.first()?;
        group.results.first().map(|v| (group.die, *v))
    }

    /// One-line breakdown, e.g. `d6: 3, 5  d4: 2  Modifier: +3`.
    pub fn breakdown(&self) -> String {
        let mut parts: Vec<String> = self.groups.iter().map(GroupResult::to_string).collect();
        if self.modifier != 0 {
            parts.push(format!("Modifier: {:+}", self.modifier));
        }
        parts.join("  ")
    }
}
