use std::collections::VecDeque;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dt_core::{RollOutcome, RollRequest};

/// One completed roll as kept in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique id of this entry.
    pub id: Uuid,
    /// The request's expression, e.g. `2d6 + 3`.
    pub expression: String,
    /// The completed outcome.
    pub outcome: RollOutcome,
    /// When the roll settled.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// An entry for `outcome` of `request`, stamped now.
    pub fn new(request: &RollRequest, outcome: RollOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            expression: request.expression(),
            outcome,
            timestamp: Utc::now(),
        }
    }

    /// The timestamp as local wall-clock time, `HH:MM:SS`.
    pub fn display_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// Bounded roll history, newest first.
///
/// Entries only ever enter at the front; once the ledger is full the oldest
/// entry falls off the back. Timestamps never go backwards in append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl HistoryLedger {
    /// Number of entries kept when no capacity is configured.
    pub const DEFAULT_CAPACITY: usize = 10;

    /// An empty ledger holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert `entry` as the newest. Returns the evicted oldest entry when
    /// the ledger was full.
    pub fn append(&mut self, mut entry: HistoryEntry) -> Option<HistoryEntry> {
        if let Some(newest) = self.entries.front()
            && entry.timestamp < newest.timestamp
        {
            entry.timestamp = newest.timestamp;
        }
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// Stamp and append a completed roll. Returns the new entry.
    pub fn record(&mut self, request: &RollRequest, outcome: RollOutcome) -> &HistoryEntry {
        self.append(HistoryEntry::new(request, outcome));
        &self.entries[0]
    }

    /// A snapshot of every entry, newest first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Iterate entries newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been rolled yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Export the history as plain text, newest first.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Roll History\n============\n\n");
        for entry in &self.entries {
            out.push_str(&format!(
                "[{}] {} = {}\n",
                entry.display_time(),
                entry.expression,
                entry.outcome.total()
            ));
            out.push_str(&format!("  {}\n\n", entry.outcome.breakdown()));
        }
        out
    }
}
