//! Table definitions and their data entries.

use std::borrow::Borrow;
use std::ops::RangeInclusive;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::strategy::{Fetcher, Filter, Roller};

/// The interned name of a table. Cloning shares the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TableName(Arc<str>);

impl TableName {
    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TableName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TableName {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for TableName {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<TableName> for String {
    fn from(value: TableName) -> Self {
        value.0.to_string()
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The selector values a weighted entry answers to.
///
/// In table files a key is written as a single integer, an array of
/// integers, or `{ "from": a, "to": b }` for an inclusive range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightKey {
    /// Exactly one selector value.
    Value(i64),
    /// An explicit set of selector values.
    Set(Vec<i64>),
    /// An inclusive numeric range.
    Range {
        /// Lowest matching value.
        from: i64,
        /// Highest matching value.
        to: i64,
    },
}

impl WeightKey {
    /// Whether `selector` falls under this key.
    pub fn contains(&self, selector: i64) -> bool {
        match self {
            Self::Value(v) => *v == selector,
            Self::Set(values) => values.contains(&selector),
            Self::Range { from, to } => (*from..=*to).contains(&selector),
        }
    }
}

impl From<i64> for WeightKey {
    fn from(value: i64) -> Self {
        Self::Value(value)
    }
}

impl From<Vec<i64>> for WeightKey {
    fn from(values: Vec<i64>) -> Self {
        Self::Set(values)
    }
}

impl<const N: usize> From<[i64; N]> for WeightKey {
    fn from(values: [i64; N]) -> Self {
        Self::Set(values.to_vec())
    }
}

impl From<RangeInclusive<i64>> for WeightKey {
    fn from(range: RangeInclusive<i64>) -> Self {
        Self::Range {
            from: *range.start(),
            to: *range.end(),
        }
    }
}

/// One row of table data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// Plain or template text, selected by position.
    Text(String),
    /// Text selected when the selector falls under `when`.
    Weighted {
        /// The selector values this entry answers to.
        when: WeightKey,
        /// The entry content.
        text: String,
    },
}

impl Entry {
    /// Build a weighted entry.
    pub fn weighted(when: impl Into<WeightKey>, text: impl Into<String>) -> Self {
        Self::Weighted {
            when: when.into(),
            text: text.into(),
        }
    }

    /// The entry content, regardless of how it is keyed.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Weighted { text, .. } => text,
        }
    }

    /// The weight key, if this is a weighted entry.
    pub fn weight(&self) -> Option<&WeightKey> {
        match self {
            Self::Text(_) => None,
            Self::Weighted { when, .. } => Some(when),
        }
    }

    /// Whether this entry is keyed by a weight rather than position.
    pub fn is_weighted(&self) -> bool {
        self.weight().is_some()
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Entry {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Behavior and flags applied when a table is registered.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Produces the raw draw from the table data.
    pub roller: Roller,
    /// Reduces the raw draw to a selector.
    pub filter: Filter,
    /// Maps the selector to an entry.
    pub fetcher: Fetcher,
    /// Hide the table from public listings.
    pub private: bool,
    /// Cache this table's raw draw under its own name.
    pub store: bool,
    /// Take the raw draw cached by another table instead of rolling.
    pub reuse: Option<TableName>,
}

impl TableOptions {
    /// Set the roller.
    pub fn with_roller(mut self, roller: Roller) -> Self {
        self.roller = roller;
        self
    }

    /// Set the filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the fetcher.
    pub fn with_fetcher(mut self, fetcher: Fetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Mark the table as private.
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Cache the raw draw for reuse by other tables.
    pub fn with_store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }

    /// Reuse the raw draw stored by `source`.
    pub fn with_reuse(mut self, source: impl Into<TableName>) -> Self {
        self.reuse = Some(source.into());
        self
    }
}

/// A registered table. Immutable once registered; replaced wholesale by
/// registering the same name again.
#[derive(Debug, Clone)]
pub struct TableDefinition {
    /// Unique table name.
    pub name: TableName,
    /// Ordered table entries.
    pub data: Vec<Entry>,
    /// Produces the raw draw.
    pub roller: Roller,
    /// Reduces the raw draw to a selector.
    pub filter: Filter,
    /// Maps the selector to an entry.
    pub fetcher: Fetcher,
    /// Hidden from public listings.
    pub private: bool,
    /// Caches the raw draw under `name`.
    pub store: bool,
    /// Source table whose cached draw is reused.
    pub reuse: Option<TableName>,
}

impl TableDefinition {
    /// Build a definition from data and options.
    pub fn new<E>(
        name: impl Into<TableName>,
        data: impl IntoIterator<Item = E>,
        options: TableOptions,
    ) -> Self
    where
        E: Into<Entry>,
    {
        let TableOptions {
            roller,
            filter,
            fetcher,
            private,
            store,
            reuse,
        } = options;
        Self {
            name: name.into(),
            data: data.into_iter().map(Into::into).collect(),
            roller,
            filter,
            fetcher,
            private,
            store,
            reuse,
        }
    }
}
