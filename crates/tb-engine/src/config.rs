//! Configuration for a table session.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Default limit on nested table evaluations.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for a [`TableSession`](crate::TableSession).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Maximum nesting of table evaluations before failing.
    pub max_depth: usize,
    /// Clear the roll cache after every top-level evaluation.
    pub scope_cache: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_depth: DEFAULT_MAX_DEPTH,
            scope_cache: true,
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the nesting limit (at least 1).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Choose whether the roll cache is cleared between top-level calls.
    pub fn with_cache_scope(mut self, scope_cache: bool) -> Self {
        self.scope_cache = scope_cache;
        self
    }

    /// Build the RNG described by this config.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
        assert!(cfg.scope_cache);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_seed(123)
            .with_max_depth(8)
            .with_cache_scope(false);
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.max_depth, 8);
        assert!(!cfg.scope_cache);
    }

    #[test]
    fn depth_clamped() {
        assert_eq!(EngineConfig::default().with_max_depth(0).max_depth, 1);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let cfg = EngineConfig::default().with_seed(7);
        let a: u64 = cfg.rng().random();
        let b: u64 = cfg.rng().random();
        assert_eq!(a, b);
    }
}
