//! Random table engine for Tabula.
//!
//! Tables are registered by name in a [`Registry`]. Rolling a table runs a
//! draw, filter, and fetch pipeline, and the fetched entry is resolved as a
//! template whose `${...}` placeholders may name other tables or dice
//! expressions. Tables can share one draw through the [`RollCache`] using
//! the `store` and `reuse` options.

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod session;
pub mod strategy;
pub mod table;
pub mod template;

pub use cache::RollCache;
pub use config::EngineConfig;
pub use context::EvalContext;
pub use error::{EngineError, EngineResult};
pub use loader::{TableFile, TableSpec};
pub use registry::{DanglingReuse, Lookup, Registry, TableRef};
pub use report::{LogReporter, Reporter};
pub use session::TableSession;
pub use strategy::{Fetcher, Filter, RollResult, Roller};
pub use table::{Entry, TableDefinition, TableName, TableOptions, WeightKey};
