//! Dice roll results and aggregation.

use crate::expr::DiceExpr;

/// The outcome of rolling a [`DiceExpr`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceRoll {
    /// The expression that was rolled.
    pub expr: DiceExpr,
    /// Individual die values, in roll order.
    pub values: Vec<u32>,
}

impl DiceRoll {
    /// Sum of all die values.
    pub fn total(&self) -> u64 {
        self.values.iter().map(|v| u64::from(*v)).sum()
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_roll(sides: u32, values: &[u32]) -> DiceRoll {
        DiceRoll {
            expr: DiceExpr {
                count: values.len() as u32,
                sides,
            },
            values: values.to_vec(),
        }
    }

    #[test]
    fn total() {
        assert_eq!(make_roll(20, &[15, 8]).total(), 23);
    }

    #[test]
    fn empty_roll() {
        let r = make_roll(6, &[]);
        assert_eq!(r.total(), 0);
        assert_eq!(r.to_string(), "[] = 0");
    }

    #[test]
    fn display() {
        assert_eq!(make_roll(6, &[3, 5]).to_string(), "[3, 5] = 8");
    }
}
