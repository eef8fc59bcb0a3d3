//! Level scalar lookup and level ranges.
//!
//! Every stat formula multiplies by a level-indexed scalar (the
//! "CP multiplier"). The values are game data: this crate never computes
//! them, it only looks them up through the [`LevelScalar`] trait.
//! [`CpmTable`] is the stock table-backed implementation.
//!
//! Levels are whole or half numbers. Internally they are handled as a
//! count of half steps so that walking a range never accumulates float
//! error.

use crate::error::LevelError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Convert a level to a count of half steps (`level * 2`).
///
/// Returns `None` for negative levels and for anything that is not a
/// multiple of 0.5.
pub(crate) fn half_steps(level: f64) -> Option<u32> {
    let doubled = level * 2.0;
    if !doubled.is_finite() || doubled < 0.0 || doubled.fract() != 0.0 {
        return None;
    }
    Some(doubled as u32)
}

fn level_from_half_steps(steps: u32) -> f64 {
    f64::from(steps) / 2.0
}

/// A level-indexed multiplier used by both the HP and CP formulas.
///
/// Implementations must be non-decreasing in the level; the IV search's
/// stamina pruning relies on it only through the HP formula, but CP
/// projections across levels assume it as well.
pub trait LevelScalar: Send + Sync {
    /// The multiplier for `level`, or `None` if the level is not covered.
    fn try_multiplier(&self, level: f64) -> Option<f64>;

    /// The multiplier for `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level` is not covered. Asking for an unknown level is a
    /// caller bug; clamp or validate with [`LevelRange::validate`] first.
    fn multiplier(&self, level: f64) -> f64 {
        match self.try_multiplier(level) {
            Some(multiplier) => multiplier,
            None => panic!("level {level} is outside the level table"),
        }
    }
}

/// Table-backed [`LevelScalar`].
///
/// Deserializes from a JSON object keyed by level:
///
/// ```rust
/// use ivdex::{CpmTable, LevelScalar};
///
/// let table = CpmTable::from_json(r#"{"1": 0.094, "1.5": 0.1351374318, "2": 0.16639787}"#).unwrap();
/// assert_eq!(table.multiplier(1.5), 0.1351374318);
/// assert_eq!(table.try_multiplier(2.5), None);
/// assert_eq!(table.max_level(), Some(2.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct CpmTable {
    /// Multiplier per level, keyed by half steps.
    multipliers: BTreeMap<u32, f64>,
}

impl CpmTable {
    /// Build a table from `(level, multiplier)` pairs.
    ///
    /// Levels must be multiples of 0.5 and multipliers must be positive
    /// and non-decreasing with the level. Each level may appear once;
    /// `1` and `1.0` count as the same level.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, LevelError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut multipliers = BTreeMap::new();
        for (level, multiplier) in pairs {
            let steps = half_steps(level).ok_or(LevelError::NotHalfStep(level))?;
            if !(multiplier > 0.0) {
                return Err(LevelError::NonPositiveMultiplier { level, multiplier });
            }
            if multipliers.insert(steps, multiplier).is_some() {
                return Err(LevelError::DuplicateLevel(level));
            }
        }

        let mut previous: Option<f64> = None;
        for (&steps, &multiplier) in &multipliers {
            if let Some(prev) = previous {
                if multiplier < prev {
                    return Err(LevelError::Decreasing {
                        level: level_from_half_steps(steps),
                    });
                }
            }
            previous = Some(multiplier);
        }

        Ok(Self { multipliers })
    }

    /// Decode a table from a JSON object of `"level": multiplier` entries.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        serde_json::from_str(json).map_err(|e| LevelError::Parse(e.to_string()))
    }

    /// Lowest level in the table.
    pub fn min_level(&self) -> Option<f64> {
        self.multipliers
            .keys()
            .next()
            .map(|&steps| level_from_half_steps(steps))
    }

    /// Highest level in the table.
    pub fn max_level(&self) -> Option<f64> {
        self.multipliers
            .keys()
            .next_back()
            .map(|&steps| level_from_half_steps(steps))
    }

    /// All levels in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = f64> + '_ {
        self.multipliers
            .keys()
            .map(|&steps| level_from_half_steps(steps))
    }

    /// Number of levels in the table.
    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    /// Whether the table has no levels.
    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

impl TryFrom<BTreeMap<String, f64>> for CpmTable {
    type Error = LevelError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut pairs = Vec::with_capacity(raw.len());
        for (key, multiplier) in raw {
            let level: f64 = key
                .trim()
                .parse()
                .map_err(|_| LevelError::Parse(format!("level key {key:?} is not a number")))?;
            pairs.push((level, multiplier));
        }
        Self::from_pairs(pairs)
    }
}

impl LevelScalar for CpmTable {
    fn try_multiplier(&self, level: f64) -> Option<f64> {
        half_steps(level).and_then(|steps| self.multipliers.get(&steps).copied())
    }
}

/// An inclusive range of candidate levels, walked in 0.5 steps.
///
/// # Examples
///
/// ```rust
/// use ivdex::LevelRange;
///
/// let range = LevelRange::new(20.0, 21.0).unwrap();
/// assert_eq!(range.levels().collect::<Vec<_>>(), vec![20.0, 20.5, 21.0]);
///
/// // A single-level range yields that level exactly once.
/// let single = LevelRange::single(20.0).unwrap();
/// assert_eq!(single.levels().count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelRange {
    min: f64,
    max: f64,
}

impl LevelRange {
    /// Create a range. Both ends must be multiples of 0.5 and `min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, LevelError> {
        half_steps(min).ok_or(LevelError::NotHalfStep(min))?;
        half_steps(max).ok_or(LevelError::NotHalfStep(max))?;
        if min > max {
            return Err(LevelError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// A range covering exactly one level.
    pub fn single(level: f64) -> Result<Self, LevelError> {
        Self::new(level, level)
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound (inclusive).
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether the range is a single level.
    pub fn is_single(&self) -> bool {
        self.min == self.max
    }

    /// Every level in the range, ascending, both ends included.
    pub fn levels(&self) -> impl Iterator<Item = f64> {
        // Both ends were checked in `new`.
        let lo = half_steps(self.min).unwrap_or(0);
        let hi = half_steps(self.max).unwrap_or(0);
        (lo..=hi).map(level_from_half_steps)
    }

    /// Check that every level in the range is covered by `scalar`.
    pub fn validate(&self, scalar: &impl LevelScalar) -> Result<(), LevelError> {
        match self.levels().find(|&level| scalar.try_multiplier(level).is_none()) {
            Some(level) => Err(LevelError::UnknownLevel(level)),
            None => Ok(()),
        }
    }
}
