//! Dice expression parsing and rolling.

use std::str::FromStr;

use once_cell::sync::Lazy;
use rand::Rng;
use rand::rngs::StdRng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};
use crate::roll::DiceRoll;

/// Largest number of dice [`DiceExpr::roll`] will keep individually.
///
/// [`DiceExpr::roll_total`] has no such limit since it never stores the
/// individual values.
pub const MAX_POOL: u32 = 1_000;

static DICE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]*)d([0-9]+)$").unwrap());

/// A parsed `[N]dM` expression: `count` dice with `sides` faces each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceExpr {
    /// Number of dice to roll (at least 1).
    pub count: u32,
    /// Number of faces on each die (at least 1).
    pub sides: u32,
}

impl DiceExpr {
    /// Create an expression, rejecting zero counts and zero sides.
    pub fn new(count: u32, sides: u32) -> DiceResult<Self> {
        if count == 0 {
            return Err(DiceError::ZeroCount);
        }
        if sides == 0 {
            return Err(DiceError::ZeroSides);
        }
        Ok(Self { count, sides })
    }

    /// Parse dice notation, returning `None` for anything outside the grammar.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Smallest possible total.
    pub fn min_total(&self) -> u64 {
        u64::from(self.count)
    }

    /// Largest possible total.
    pub fn max_total(&self) -> u64 {
        u64::from(self.count) * u64::from(self.sides)
    }

    /// Check that the dice can be kept individually.
    pub fn check_pool(&self) -> DiceResult<()> {
        if self.count > MAX_POOL {
            return Err(DiceError::PoolTooLarge {
                count: self.count,
                limit: MAX_POOL,
            });
        }
        Ok(())
    }

    /// Roll every die independently, keeping each value.
    ///
    /// Fails for more than [`MAX_POOL`] dice.
    pub fn roll(&self, rng: &mut StdRng) -> DiceResult<DiceRoll> {
        self.check_pool()?;
        let values = (0..self.count)
            .map(|_| rng.random_range(1..=self.sides))
            .collect();
        Ok(DiceRoll {
            expr: *self,
            values,
        })
    }

    /// Roll and return only the sum. Works for any count.
    pub fn roll_total(&self, rng: &mut StdRng) -> u64 {
        if self.sides == 1 {
            return u64::from(self.count);
        }
        (0..self.count).fold(0, |total, _| {
            total + u64::from(rng.random_range(1..=self.sides))
        })
    }
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> DiceResult<Self> {
        let malformed = || DiceError::Malformed(s.to_string());
        let caps = DICE_RE.captures(s).ok_or_else(malformed)?;

        let count = match &caps[1] {
            "" => 1,
            digits => digits.parse::<u32>().map_err(|_| malformed())?,
        };
        let sides = caps[2].parse::<u32>().map_err(|_| malformed())?;

        Self::new(count, sides)
    }
}

impl TryFrom<String> for DiceExpr {
    type Error = DiceError;

    fn try_from(value: String) -> DiceResult<Self> {
        value.parse()
    }
}

impl From<DiceExpr> for String {
    fn from(value: DiceExpr) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}
