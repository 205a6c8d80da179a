//! Error types for dice notation.

/// Errors that can occur while parsing or rolling a dice expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// The text does not follow the `[N]dM` grammar.
    #[error("malformed dice expression: \"{0}\"")]
    Malformed(String),

    /// The expression asks for zero dice.
    #[error("dice count must be positive")]
    ZeroCount,

    /// The expression asks for zero-sided dice.
    #[error("dice must have at least one side")]
    ZeroSides,

    /// Too many dice to keep each value.
    #[error("cannot keep {count} individual dice (limit {limit})")]
    PoolTooLarge {
        /// Dice requested.
        count: u32,
        /// The largest pool allowed.
        limit: u32,
    },
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
