//! Dice groups and validated roll requests.

use serde::{Deserialize, Serialize};

use crate::catalog::DieKind;
use crate::error::{DiceError, DiceResult};

/// One line of a roll expression while it is being composed, e.g. `3d6`.
///
/// The die id is kept as the raw string the user picked; it is resolved
/// against the catalog when the request is composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceGroup {
    /// Die id such as `"d6"`.
    pub die_id: String,
    /// How many dice of this kind to roll.
    pub count: u32,
}

impl DiceGroup {
    /// Create a group from a die id and a count.
    pub fn new(die_id: impl Into<String>, count: u32) -> Self {
        Self {
            die_id: die_id.into(),
            count,
        }
    }

    /// Parse a group written as `NdX` or `dX` (e.g. `2d6`, `d20`, `1d%`).
    ///
    /// Only the shape is checked here. Unknown dice and zero counts are
    /// rejected later by [`RollRequest::compose`].
    pub fn parse(expr: &str) -> DiceResult<Self> {
        let trimmed = expr.trim().to_lowercase();
        let invalid = || DiceError::InvalidExpression(expr.to_string());
        let (count, die) = trimmed.split_once('d').ok_or_else(invalid)?;
        if die.is_empty() {
            return Err(invalid());
        }
        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().map_err(|_| invalid())?
        };
        Ok(Self::new(format!("d{die}"), count))
    }

    /// Check this group against the catalog and freeze it.
    pub fn resolve(&self) -> DiceResult<RequestGroup> {
        let die = DieKind::from_id(&self.die_id)?;
        if !(1..=RollRequest::MAX_DICE_PER_GROUP).contains(&self.count) {
            return Err(DiceError::InvalidCount {
                die: self.die_id.clone(),
                count: self.count,
                max: RollRequest::MAX_DICE_PER_GROUP,
            });
        }
        Ok(RequestGroup {
            die,
            count: self.count,
        })
    }
}

/// A validated group inside a frozen [`RollRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestGroup {
    /// The resolved die kind.
    pub die: DieKind,
    /// How many dice of this kind to roll (at least one).
    pub count: u32,
}

impl std::fmt::Display for RequestGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)
    }
}

/// An ordered set of dice groups plus a flat modifier, frozen for one roll.
///
/// A `RollRequest` can only be built through [`RollRequest::compose`], so
/// every value of this type names known dice with valid counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollRequest {
    groups: Vec<RequestGroup>,
    modifier: i32,
}

impl RollRequest {
    /// Upper bound on dice in one group.
    pub const MAX_DICE_PER_GROUP: u32 = 999;

    /// Validate `groups` against the catalog and freeze them with `modifier`.
    pub fn compose(groups: &[DiceGroup], modifier: i32) -> DiceResult<Self> {
        if groups.is_empty() {
            return Err(DiceError::EmptyRequest);
        }
        let groups = groups
            .iter()
            .map(DiceGroup::resolve)
            .collect::<DiceResult<Vec<_>>>()?;
        Ok(Self { groups, modifier })
    }

    /// The groups in the order they were specified.
    pub fn groups(&self) -> &[RequestGroup] {
        &self.groups
    }

    /// The flat modifier added to the dice sum.
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// The die whose first result is shown by the renderer.
    pub fn primary_die(&self) -> DieKind {
        self.groups[0].die
    }

    /// Total number of dice across all groups.
    pub fn dice_count(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Smallest total this request can produce.
    pub fn min_total(&self) -> i64 {
        self.bound(DieKind::min_value)
    }

    /// Largest total this request can produce.
    pub fn max_total(&self) -> i64 {
        self.bound(DieKind::max_value)
    }

    fn bound(&self, face: fn(DieKind) -> u32) -> i64 {
        let dice: i64 = self
            .groups
            .iter()
            .map(|g| i64::from(g.count) * i64::from(face(g.die)))
            .sum();
        dice + i64::from(self.modifier)
    }

    /// Human-readable roll expression, e.g. `2d20 + 1d6 + 3`.
    pub fn expression(&self) -> String {
        let mut out = self
            .groups
            .iter()
            .map(RequestGroup::to_string)
            .collect::<Vec<_>>()
            .join(" + ");
        match self.modifier {
            0 => {}
            m if m > 0 => out.push_str(&format!(" + {m}")),
            m => out.push_str(&format!(" - {}", m.unsigned_abs())),
        }
        out
    }
}

impl std::fmt::Display for RollRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression())
    }
}
