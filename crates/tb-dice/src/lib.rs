//! Compact dice notation for Tabula.
//!
//! Parses expressions of the form `[N]dM` (for example `d20`, `2d6`) and
//! rolls them with a seedable RNG. The grammar is intentionally strict:
//! lowercase `d`, ASCII digits only, no whitespace, and both the count and
//! the number of sides must be positive.

pub mod error;
pub mod expr;
pub mod roll;

pub use error::{DiceError, DiceResult};
pub use expr::{DiceExpr, MAX_POOL};
pub use roll::DiceRoll;
