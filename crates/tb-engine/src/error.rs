//! Error types for the table engine.

use std::path::PathBuf;

use crate::table::TableName;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while registering or evaluating tables.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A table reference did not match any registered table.
    #[error("no table named \"{0}\"")]
    Lookup(String),

    /// A lookup was attempted with a value that cannot name a table.
    #[error("invalid table reference: {0}")]
    InvalidReference(String),

    /// Table evaluation nested deeper than the configured limit.
    #[error("recursion limit of {limit} exceeded while rolling \"{table}\"")]
    DepthExceeded {
        /// The table being entered when the limit was hit.
        table: TableName,
        /// The configured maximum depth.
        limit: usize,
    },

    /// A table file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A dice roller could not roll.
    #[error(transparent)]
    Dice(#[from] tb_dice::DiceError),

    /// A table file was not valid JSON or did not match the table schema.
    #[error("invalid table file: {0}")]
    TableFile(#[from] serde_json::Error),
}
