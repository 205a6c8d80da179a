//! Shared storage of raw draws between `store` and `reuse` tables.

use std::collections::HashMap;

use crate::strategy::RollResult;
use crate::table::TableName;

/// Raw (pre-filter) draws keyed by the name of the table that stored them.
#[derive(Debug, Clone, Default)]
pub struct RollCache {
    rolls: HashMap<TableName, RollResult>,
}

impl RollCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The draw stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&RollResult> {
        self.rolls.get(name)
    }

    /// Store a draw, returning the value it overwrote.
    pub fn store(&mut self, name: TableName, raw: RollResult) -> Option<RollResult> {
        log::trace!("caching draw {raw} for \"{name}\"");
        self.rolls.insert(name, raw)
    }

    /// Remove the draw stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<RollResult> {
        self.rolls.remove(name)
    }

    /// Whether a draw is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.rolls.contains_key(name)
    }

    /// Drop every stored draw.
    pub fn clear(&mut self) {
        self.rolls.clear();
    }

    /// Number of stored draws.
    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }
}
