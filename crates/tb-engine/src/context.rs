//! State threaded through one evaluation.

use rand::rngs::StdRng;

use crate::cache::RollCache;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{EngineError, EngineResult};
use crate::registry::Registry;
use crate::table::TableName;

/// Everything an evaluation reads or mutates, passed explicitly so that
/// separate sessions never share state.
pub struct EvalContext<'a> {
    /// Tables available to placeholders and `reuse` options.
    pub registry: &'a Registry,
    /// Raw draws shared between `store` and `reuse` tables.
    pub cache: &'a mut RollCache,
    /// Source of every random draw.
    pub rng: &'a mut StdRng,
    max_depth: usize,
    depth: usize,
}

impl<'a> EvalContext<'a> {
    /// Create a context with the default depth limit.
    pub fn new(registry: &'a Registry, cache: &'a mut RollCache, rng: &'a mut StdRng) -> Self {
        Self {
            registry,
            cache,
            rng,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    /// Set the depth limit (at least 1).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a nested table evaluation.
    pub(crate) fn descend(&mut self, table: &TableName) -> EngineResult<()> {
        if self.depth >= self.max_depth {
            return Err(EngineError::DepthExceeded {
                table: table.clone(),
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave a nested table evaluation.
    pub(crate) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
