//! Pluggable roll behavior: rollers, filters, and fetchers.
//!
//! Every table carries one of each. The defaults pick a row uniformly
//! ([`Roller::Row`]), sum the draw into a selector ([`Filter::Sum`]), and
//! look the selector up by position or weight ([`Fetcher::Default`]).
//! Each strategy also has a `Custom` variant wrapping a shared closure for
//! tables built in code; custom strategies cannot be loaded from files.

use std::sync::Arc;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Deserializer};
use tb_dice::DiceExpr;

use crate::error::EngineResult;
use crate::table::Entry;

/// A value flowing through roller, filter, and fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RollResult {
    /// A single integer, usually a selector.
    Integer(i64),
    /// A raw sequence of integers, usually individual dice.
    Sequence(Vec<i64>),
    /// Nothing was drawn.
    #[default]
    Empty,
}

impl RollResult {
    /// True for `Empty` and for an empty sequence.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Integer(_) => false,
            Self::Sequence(values) => values.is_empty(),
            Self::Empty => true,
        }
    }

    /// All integers carried by this result.
    pub fn values(&self) -> Vec<i64> {
        match self {
            Self::Integer(n) => vec![*n],
            Self::Sequence(values) => values.clone(),
            Self::Empty => Vec::new(),
        }
    }

    /// Sum of all integers, or `None` when empty.
    pub fn sum(&self) -> Option<i64> {
        if self.is_empty() {
            return None;
        }
        Some(
            self.values()
                .into_iter()
                .fold(0_i64, |acc, n| acc.saturating_add(n)),
        )
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Sequence(values) => {
                let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", values.join(", "))
            }
            Self::Empty => Ok(()),
        }
    }
}

/// Closure producing a raw draw from table data.
pub type RollFn = Arc<dyn Fn(&[Entry], &mut StdRng) -> RollResult + Send + Sync>;

/// Closure reducing a raw draw to a selector.
pub type FilterFn = Arc<dyn Fn(&RollResult) -> RollResult + Send + Sync>;

/// Closure mapping table data and a selector to entry text.
pub type FetchFn = Arc<dyn Fn(&[Entry], &RollResult, &mut StdRng) -> Option<String> + Send + Sync>;

/// Produces a table's raw draw.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Roller {
    /// Pick a row number uniformly from `1..=data.len()`.
    #[default]
    Row,
    /// Roll dice, keeping each die as a separate value.
    #[serde(deserialize_with = "dice_pool")]
    Dice(DiceExpr),
    /// Always produce the same values.
    Fixed(Vec<i64>),
    /// A closure supplied in code.
    #[serde(skip)]
    Custom(RollFn),
}

impl Roller {
    /// Wrap a closure as a roller.
    pub fn custom(
        f: impl Fn(&[Entry], &mut StdRng) -> RollResult + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Produce a raw draw for `data`.
    pub fn roll(&self, data: &[Entry], rng: &mut StdRng) -> EngineResult<RollResult> {
        let raw = match self {
            Self::Row => pick_row(data, rng),
            Self::Dice(expr) => {
                let roll = expr.roll(rng)?;
                log::trace!("{expr} rolled {roll}");
                RollResult::Sequence(roll.values.into_iter().map(i64::from).collect())
            }
            Self::Fixed(values) => RollResult::Sequence(values.clone()),
            Self::Custom(f) => f(data, rng),
        };
        Ok(raw)
    }
}

/// Dice rollers keep every die, so oversized pools are rejected on load.
fn dice_pool<'de, D>(deserializer: D) -> Result<DiceExpr, D::Error>
where
    D: Deserializer<'de>,
{
    let expr = DiceExpr::deserialize(deserializer)?;
    expr.check_pool().map_err(serde::de::Error::custom)?;
    Ok(expr)
}

impl std::fmt::Debug for Roller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row => write!(f, "Row"),
            Self::Dice(expr) => write!(f, "Dice({expr})"),
            Self::Fixed(values) => f.debug_tuple("Fixed").field(values).finish(),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl std::fmt::Display for Roller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Dice(expr) => write!(f, "{expr}"),
            Self::Fixed(_) => write!(f, "fixed"),
            Self::Custom(_) => write!(f, "custom"),
        }
    }
}

/// Reduces a raw draw to the selector handed to the fetcher.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Sum every value into one integer.
    #[default]
    Sum,
    /// Pass the raw draw through unchanged.
    Keep,
    /// Keep the highest value.
    Highest,
    /// Keep the lowest value.
    Lowest,
    /// A closure supplied in code.
    #[serde(skip)]
    Custom(FilterFn),
}

impl Filter {
    /// Wrap a closure as a filter.
    pub fn custom(f: impl Fn(&RollResult) -> RollResult + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Reduce `raw` to a selector.
    pub fn apply(&self, raw: &RollResult) -> RollResult {
        match self {
            Self::Sum => raw.sum().map_or(RollResult::Empty, RollResult::Integer),
            Self::Keep => raw.clone(),
            Self::Highest => raw
                .values()
                .into_iter()
                .max()
                .map_or(RollResult::Empty, RollResult::Integer),
            Self::Lowest => raw
                .values()
                .into_iter()
                .min()
                .map_or(RollResult::Empty, RollResult::Integer),
            Self::Custom(f) => f(raw),
        }
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sum => write!(f, "Sum"),
            Self::Keep => write!(f, "Keep"),
            Self::Highest => write!(f, "Highest"),
            Self::Lowest => write!(f, "Lowest"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Maps a selector to the entry text it picks.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fetcher {
    /// Weighted lookup when the data has weighted entries, otherwise a
    /// 1-based position lookup.
    #[default]
    Default,
    /// A closure supplied in code.
    #[serde(skip)]
    Custom(FetchFn),
}

impl Fetcher {
    /// Wrap a closure as a fetcher.
    pub fn custom(
        f: impl Fn(&[Entry], &RollResult, &mut StdRng) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Fetch the entry picked by `selector`, or `None` if nothing matches.
    pub fn fetch(&self, data: &[Entry], selector: &RollResult, rng: &mut StdRng) -> Option<String> {
        match self {
            Self::Default => fetch_entry(data, selector, rng),
            Self::Custom(f) => f(data, selector, rng),
        }
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "Default"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

fn pick_row(data: &[Entry], rng: &mut StdRng) -> RollResult {
    if data.is_empty() {
        return RollResult::Empty;
    }
    let rows = i64::try_from(data.len()).unwrap_or(i64::MAX);
    RollResult::Sequence(vec![rng.random_range(1..=rows)])
}

fn fetch_entry(data: &[Entry], selector: &RollResult, rng: &mut StdRng) -> Option<String> {
    let Some(selector) = selector.sum() else {
        // No selector: any entry will do.
        if data.is_empty() {
            return None;
        }
        return Some(data[rng.random_range(0..data.len())].text().to_string());
    };

    if data.iter().any(Entry::is_weighted) {
        return data
            .iter()
            .find(|entry| entry.weight().is_some_and(|w| w.contains(selector)))
            .map(|entry| entry.text().to_string());
    }

    let position = usize::try_from(selector).ok()?.checked_sub(1)?;
    data.get(position).map(|entry| entry.text().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use rand::SeedableRng;
    use tb_dice::DiceError;

    fn rows(texts: &[&str]) -> Vec<Entry> {
        texts.iter().map(|t| Entry::from(*t)).collect()
    }

    #[test]
    fn row_roller_stays_within_data() {
        let mut rng = StdRng::seed_from_u64(42);
        let data = rows(&["a", "b", "c"]);
        for _ in 0..50 {
            let RollResult::Sequence(values) = Roller::Row.roll(&data, &mut rng).unwrap() else {
                panic!("row roller should produce a sequence");
            };
            assert_eq!(values.len(), 1);
            assert!((1..=3).contains(&values[0]));
        }
    }

    #[test]
    fn row_roller_on_empty_data_is_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(Roller::Row.roll(&[], &mut rng).unwrap(), RollResult::Empty);
    }

    #[test]
    fn dice_roller_keeps_each_die() {
        let mut rng = StdRng::seed_from_u64(7);
        let roller = Roller::Dice(DiceExpr::parse("3d6").unwrap());
        let values = roller.roll(&[], &mut rng).unwrap().values();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| (1..=6).contains(v)));
    }

    #[test]
    fn dice_roller_refuses_oversized_pools() {
        let mut rng = StdRng::seed_from_u64(7);
        let roller = Roller::Dice(DiceExpr::parse("4000000000d6").unwrap());
        let err = roller.roll(&[], &mut rng).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Dice(DiceError::PoolTooLarge { count: 4_000_000_000, .. })
        ));
        assert!(serde_json::from_str::<Roller>(r#"{"dice": "4000000000d6"}"#).is_err());
        assert!(serde_json::from_str::<Roller>(r#"{"dice": "1000d6"}"#).is_ok());
    }

    #[test]
    fn filters_reduce_draws() {
        let raw = RollResult::Sequence(vec![2, 5, 3]);
        assert_eq!(Filter::Sum.apply(&raw), RollResult::Integer(10));
        assert_eq!(Filter::Keep.apply(&raw), raw);
        assert_eq!(Filter::Highest.apply(&raw), RollResult::Integer(5));
        assert_eq!(Filter::Lowest.apply(&raw), RollResult::Integer(2));
        assert_eq!(Filter::Sum.apply(&RollResult::Integer(4)), RollResult::Integer(4));
    }

    #[test]
    fn filters_keep_empty_draws_empty() {
        for filter in [Filter::Sum, Filter::Highest, Filter::Lowest] {
            assert!(filter.apply(&RollResult::Empty).is_empty());
            assert!(filter.apply(&RollResult::Sequence(Vec::new())).is_empty());
        }
    }

    #[test]
    fn custom_filter_runs_closure() {
        let double = Filter::custom(|raw| {
            raw.sum()
                .map_or(RollResult::Empty, |n| RollResult::Integer(n * 2))
        });
        assert_eq!(
            double.apply(&RollResult::Sequence(vec![1, 2])),
            RollResult::Integer(6)
        );
    }

    #[test]
    fn default_fetch_by_position() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = rows(&["first", "second"]);
        let fetch = |n| {
            Fetcher::Default.fetch(&data, &RollResult::Integer(n), &mut StdRng::seed_from_u64(1))
        };
        assert_eq!(fetch(1).as_deref(), Some("first"));
        assert_eq!(fetch(2).as_deref(), Some("second"));
        assert_eq!(fetch(0), None);
        assert_eq!(fetch(3), None);
        assert_eq!(fetch(-1), None);
        assert_eq!(
            Fetcher::Default
                .fetch(&data, &RollResult::Sequence(vec![1, 1]), &mut rng)
                .as_deref(),
            Some("second")
        );
    }

    #[test]
    fn default_fetch_by_weight() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = vec![
            Entry::weighted([2_i64], "A"),
            Entry::weighted([3_i64, 4, 5], "B"),
            Entry::weighted(6_i64..=12, "C"),
        ];
        let mut fetch = |n| Fetcher::Default.fetch(&data, &RollResult::Integer(n), &mut rng);
        assert_eq!(fetch(2).as_deref(), Some("A"));
        assert_eq!(fetch(4).as_deref(), Some("B"));
        assert_eq!(fetch(12).as_deref(), Some("C"));
        assert_eq!(fetch(1), None);
        assert_eq!(fetch(13), None);
    }

    #[test]
    fn default_fetch_without_selector_picks_any_entry() {
        let mut rng = StdRng::seed_from_u64(3);
        let data = rows(&["x", "y"]);
        for _ in 0..20 {
            let picked = Fetcher::Default.fetch(&data, &RollResult::Empty, &mut rng);
            assert!(matches!(picked.as_deref(), Some("x" | "y")));
        }
        assert_eq!(Fetcher::Default.fetch(&[], &RollResult::Empty, &mut rng), None);
    }

    #[test]
    fn strategies_deserialize_from_names() {
        let roller: Roller = serde_json::from_str(r#"{"dice": "2d6"}"#).unwrap();
        assert_eq!(roller.to_string(), "2d6");
        let roller: Roller = serde_json::from_str(r#""row""#).unwrap();
        assert!(matches!(roller, Roller::Row));
        let roller: Roller = serde_json::from_str(r#"{"fixed": [4]}"#).unwrap();
        assert!(matches!(roller, Roller::Fixed(ref v) if *v == vec![4_i64]));
        let filter: Filter = serde_json::from_str(r#""highest""#).unwrap();
        assert!(matches!(filter, Filter::Highest));
        let fetcher: Fetcher = serde_json::from_str(r#""default""#).unwrap();
        assert!(matches!(fetcher, Fetcher::Default));
        assert!(serde_json::from_str::<Filter>(r#""custom""#).is_err());
    }

    #[test]
    fn roll_result_display() {
        assert_eq!(RollResult::Integer(7).to_string(), "7");
        assert_eq!(RollResult::Sequence(vec![1, 6]).to_string(), "[1, 6]");
        assert_eq!(RollResult::Empty.to_string(), "");
    }
}
