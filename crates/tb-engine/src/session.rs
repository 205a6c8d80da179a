//! Top-level evaluation sessions.
//!
//! `TableSession` owns a registry, a roll cache, and an RNG, and is the
//! usual entry point: register or load tables, then call
//! [`TableSession::evaluate`] with free-form text.

use std::path::Path;

use rand::rngs::StdRng;

use crate::cache::RollCache;
use crate::config::EngineConfig;
use crate::context::EvalContext;
use crate::error::EngineResult;
use crate::loader::TableFile;
use crate::pipeline;
use crate::registry::{Registry, TableRef};
use crate::report::Reporter;
use crate::table::{Entry, TableName, TableOptions};
use crate::template;

/// A registry plus the mutable state needed to evaluate against it.
pub struct TableSession {
    registry: Registry,
    cache: RollCache,
    rng: StdRng,
    config: EngineConfig,
    reporter: Option<Box<dyn Reporter>>,
}

impl TableSession {
    /// Create a session with an empty registry.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_registry(Registry::new(), config)
    }

    /// Create a session around an existing registry.
    pub fn with_registry(registry: Registry, config: EngineConfig) -> Self {
        Self {
            registry,
            cache: RollCache::new(),
            rng: config.rng(),
            config,
            reporter: None,
        }
    }

    /// Get the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get the registry for registering or removing tables.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Get the roll cache.
    pub fn cache(&self) -> &RollCache {
        &self.cache
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Send every successful evaluation to `reporter`.
    pub fn set_reporter(&mut self, reporter: impl Reporter + 'static) {
        self.reporter = Some(Box::new(reporter));
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
        self.registry.register(name, data, options);
    }

    /// Load a table file and register its tables. Returns how many were
    /// registered.
    pub fn load_file(&mut self, path: &Path) -> EngineResult<usize> {
        Ok(TableFile::load(path)?.register_into(&mut self.registry))
    }

    /// Names of public tables, sorted.
    pub fn list_public(&self) -> Vec<TableName> {
        self.registry.list_public()
    }

    /// Resolve free-form text: a bare table name, a dice expression, or a
    /// template with `${...}` placeholders.
    ///
    /// Bare input is trimmed before lookup. Templates keep their text
    /// outside placeholders exactly, whitespace included.
    pub fn evaluate(&mut self, text: &str) -> EngineResult<String> {
        let text = if text.contains(template::OPEN) {
            text
        } else {
            text.trim()
        };
        let result = {
            let mut ctx = self.context();
            template::evaluate(&mut ctx, text)
        };
        self.finish(text, result)
    }

    /// Roll one table directly. Unlike [`evaluate`](Self::evaluate), an
    /// unknown name is an error rather than literal text.
    pub fn roll(&mut self, reference: impl Into<TableRef>) -> EngineResult<String> {
        let reference = reference.into();
        let label = match &reference {
            TableRef::Definition(table) => table.name.to_string(),
            TableRef::Name(name) => name.to_string(),
            TableRef::Text(text) => text.clone(),
            TableRef::Integer(n) => n.to_string(),
        };
        let result = match self.registry.lookup(reference, false) {
            Ok(Some(found)) => {
                let mut ctx = self.context();
                pipeline::evaluate_lookup(&mut ctx, found)
            }
            Ok(None) => Ok(String::new()),
            Err(err) => Err(err),
        };
        self.finish(&label, result)
    }

    fn context(&mut self) -> EvalContext<'_> {
        EvalContext::new(&self.registry, &mut self.cache, &mut self.rng)
            .with_max_depth(self.config.max_depth)
    }

    fn finish(&mut self, original: &str, result: EngineResult<String>) -> EngineResult<String> {
        if self.config.scope_cache {
            self.cache.clear();
        }
        let output = result?;
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report(original, &output);
        }
        Ok(output)
    }
}

impl Default for TableSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
