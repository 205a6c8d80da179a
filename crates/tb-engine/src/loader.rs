//! Loading table definitions from JSON files.
//!
//! ```json
//! {
//!   "tables": [
//!     { "name": "oracle-roll", "roller": { "dice": "1d6" }, "store": true, "private": true },
//!     { "name": "answer", "reuse": "oracle-roll",
//!       "data": [ { "when": [1, 2, 3], "text": "No" },
//!                 { "when": { "from": 4, "to": 6 }, "text": "Yes" } ] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::registry::Registry;
use crate::strategy::{Fetcher, Filter, Roller};
use crate::table::{Entry, TableDefinition, TableName, TableOptions};

/// A parsed table file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableFile {
    /// Table definitions, registered in order.
    pub tables: Vec<TableSpec>,
}

/// One table as written in a table file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSpec {
    /// Table name.
    pub name: TableName,
    /// Table entries.
    #[serde(default)]
    pub data: Vec<Entry>,
    /// Roller; defaults to a uniform row pick.
    #[serde(default)]
    pub roller: Roller,
    /// Filter; defaults to summing the draw.
    #[serde(default)]
    pub filter: Filter,
    /// Fetcher; defaults to position or weight lookup.
    #[serde(default)]
    pub fetcher: Fetcher,
    /// Hide from public listings.
    #[serde(default)]
    pub private: bool,
    /// Cache the raw draw under this table's name.
    #[serde(default)]
    pub store: bool,
    /// Reuse another table's cached draw.
    #[serde(default)]
    pub reuse: Option<TableName>,
}

impl From<TableSpec> for TableDefinition {
    fn from(spec: TableSpec) -> Self {
        let options = TableOptions {
            roller: spec.roller,
            filter: spec.filter,
            fetcher: spec.fetcher,
            private: spec.private,
            store: spec.store,
            reuse: spec.reuse,
        };
        TableDefinition::new(spec.name, spec.data, options)
    }
}

impl TableFile {
    /// Parse a table file from JSON text.
    pub fn from_json(source: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read and parse a table file.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_json(&source)?;
        log::debug!(
            "loaded {} table(s) from {}",
            file.tables.len(),
            path.display()
        );
        Ok(file)
    }

    /// Register every table, later entries replacing earlier ones with the
    /// same name. Returns the number of tables registered.
    pub fn register_into(self, registry: &mut Registry) -> usize {
        let count = self.tables.len();
        for spec in self.tables {
            registry.insert(spec.into());
        }
        count
    }
}
