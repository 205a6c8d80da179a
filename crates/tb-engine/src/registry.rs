//! The table registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{EngineError, EngineResult};
use crate::table::{Entry, TableDefinition, TableName, TableOptions};

/// Anything a table can be looked up by.
#[derive(Debug, Clone)]
pub enum TableRef {
    /// An already resolved definition, returned as-is.
    Definition(Arc<TableDefinition>),
    /// An interned table name.
    Name(TableName),
    /// A plain string, coerced to a name.
    Text(String),
    /// A literal constant that evaluates to itself.
    Integer(i64),
}

impl From<Arc<TableDefinition>> for TableRef {
    fn from(value: Arc<TableDefinition>) -> Self {
        Self::Definition(value)
    }
}

impl From<TableName> for TableRef {
    fn from(value: TableName) -> Self {
        Self::Name(value)
    }
}

impl From<&TableName> for TableRef {
    fn from(value: &TableName) -> Self {
        Self::Name(value.clone())
    }
}

impl From<&str> for TableRef {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TableRef {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for TableRef {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl TryFrom<&serde_json::Value> for TableRef {
    type Error = EngineError;

    /// Accept strings and integers; every other JSON kind is rejected.
    fn try_from(value: &serde_json::Value) -> EngineResult<Self> {
        use serde_json::Value;

        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .ok_or_else(|| EngineError::InvalidReference(format!("number {n}"))),
            Value::Null => Err(EngineError::InvalidReference("null".into())),
            Value::Bool(b) => Err(EngineError::InvalidReference(format!("boolean {b}"))),
            Value::Array(_) => Err(EngineError::InvalidReference("array".into())),
            Value::Object(_) => Err(EngineError::InvalidReference("object".into())),
        }
    }
}

/// The result of a successful lookup.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// A registered table.
    Table(Arc<TableDefinition>),
    /// A constant standing in for a table.
    Constant(i64),
}

/// A table that reuses the draw of a table that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DanglingReuse {
    /// The table with the broken `reuse` option.
    pub table: TableName,
    /// The source it names.
    pub missing: TableName,
}

impl std::fmt::Display for DanglingReuse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "table \"{}\" reuses unknown table \"{}\"",
            self.table, self.missing
        )
    }
}

/// Every registered table, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tables: HashMap<TableName, Arc<TableDefinition>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any table with the same name.
    pub fn register<E>(
        &mut self,
        name: impl Into<TableName>,
        data: impl IntoIterator<Item = E>,
        options: TableOptions,
    ) where
        E: Into<Entry>,
    {
        self.insert(TableDefinition::new(name, data, options));
    }

    /// Register a prebuilt definition, replacing any table with the same name.
    pub fn insert(&mut self, table: TableDefinition) {
        let name = table.name.clone();
        if self.tables.insert(name.clone(), Arc::new(table)).is_some() {
            log::debug!("replaced table \"{name}\"");
        } else {
            log::trace!("registered table \"{name}\"");
        }
    }

    /// Remove a table, returning its definition.
    pub fn remove(&mut self, name: &str) -> Option<Arc<TableDefinition>> {
        self.tables.remove(name)
    }

    /// Get a table by exact name.
    pub fn get(&self, name: &str) -> Option<Arc<TableDefinition>> {
        self.tables.get(name).cloned()
    }

    /// Get a table by exact name, failing if it is not registered.
    pub fn require(&self, name: &str) -> EngineResult<Arc<TableDefinition>> {
        self.get(name)
            .ok_or_else(|| EngineError::Lookup(name.to_string()))
    }

    /// Whether a table with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Resolve a reference.
    ///
    /// Returns `Ok(None)` for an unknown name when `allow_missing` is set,
    /// and [`EngineError::Lookup`] otherwise.
    pub fn lookup(
        &self,
        reference: impl Into<TableRef>,
        allow_missing: bool,
    ) -> EngineResult<Option<Lookup>> {
        let found = match reference.into() {
            TableRef::Definition(table) => return Ok(Some(Lookup::Table(table))),
            TableRef::Integer(n) => return Ok(Some(Lookup::Constant(n))),
            TableRef::Name(name) => self.get(name.as_str()).ok_or_else(|| name.to_string()),
            TableRef::Text(text) => self.get(&text).ok_or(text),
        };

        match found {
            Ok(table) => Ok(Some(Lookup::Table(table))),
            Err(_) if allow_missing => Ok(None),
            Err(name) => Err(EngineError::Lookup(name)),
        }
    }

    /// Names of all tables not marked private, sorted.
    pub fn list_public(&self) -> Vec<TableName> {
        let mut names: Vec<TableName> = self
            .tables
            .values()
            .filter(|t| !t.private)
            .map(|t| t.name.clone())
            .collect();
        names.sort();
        names
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<TableName> {
        let mut names: Vec<TableName> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Find tables whose `reuse` source is not registered.
    pub fn validate(&self) -> Vec<DanglingReuse> {
        let mut issues: Vec<DanglingReuse> = self
            .tables
            .values()
            .filter_map(|t| {
                let source = t.reuse.as_ref()?;
                (!self.contains(source.as_str())).then(|| DanglingReuse {
                    table: t.name.clone(),
                    missing: source.clone(),
                })
            })
            .collect();
        issues.sort();
        issues
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no tables are registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
