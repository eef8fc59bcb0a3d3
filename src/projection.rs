//! CP and HP projection.
//!
//! The game's stat formulas, as pure functions of base stats, IVs and a
//! level multiplier:
//!
//! ```text
//! cp = max(10, floor((atk + atkIV) * sqrt(def + defIV) * sqrt(sta + staIV) * cpm^2 / 10))
//! hp = max(10, floor((sta + staIV) * cpm))
//! ```

use crate::iv::IvCombination;
use crate::level::LevelScalar;
use serde::{Deserialize, Serialize};

/// Lowest CP or HP the game ever shows.
pub const STAT_FLOOR: u32 = 10;

/// A variant's base attack, defense and stamina.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub attack: u32,
    pub defense: u32,
    pub stamina: u32,
}

impl BaseStats {
    /// Create base stats from attack, defense and stamina.
    pub fn new(attack: u32, defense: u32, stamina: u32) -> Self {
        Self {
            attack,
            defense,
            stamina,
        }
    }
}

/// The per-level part of the CP formula, `multiplier^2 * 0.1`.
pub fn cp_factor(multiplier: f64) -> f64 {
    multiplier.powi(2) * 0.1
}

/// CP for a precomputed [`cp_factor`].
pub fn cp_with_factor(base: &BaseStats, iv: &IvCombination, factor: f64) -> u32 {
    let attack = f64::from(base.attack + u32::from(iv.attack));
    let defense = f64::from(base.defense + u32::from(iv.defense));
    let stamina = f64::from(base.stamina + u32::from(iv.stamina));
    let raw = (attack * defense.sqrt() * stamina.sqrt() * factor).floor();
    (raw as u32).max(STAT_FLOOR)
}

/// CP for the given multiplier.
pub fn cp_with_multiplier(base: &BaseStats, iv: &IvCombination, multiplier: f64) -> u32 {
    cp_with_factor(base, iv, cp_factor(multiplier))
}

/// HP for the given multiplier.
pub fn hp_with_multiplier(base_stamina: u32, stamina_iv: u8, multiplier: f64) -> u32 {
    let raw = (f64::from(base_stamina + u32::from(stamina_iv)) * multiplier).floor();
    (raw as u32).max(STAT_FLOOR)
}

/// CP of a creature with `base` stats and `iv` at `level`.
///
/// # Panics
///
/// Panics if `level` is not covered by `scalar`.
///
/// # Examples
///
/// ```rust
/// use ivdex::{cp, BaseStats, CpmTable, IvCombination};
///
/// let table = CpmTable::from_pairs([(20.0, 0.5974)]).unwrap();
/// let base = BaseStats::new(120, 100, 90);
/// assert_eq!(cp(&base, &IvCombination::new(10, 8, 7), 20.0, &table), 474);
/// ```
pub fn cp(base: &BaseStats, iv: &IvCombination, level: f64, scalar: &impl LevelScalar) -> u32 {
    cp_with_multiplier(base, iv, scalar.multiplier(level))
}

/// HP of a creature with `base_stamina` and `stamina_iv` at `level`.
///
/// # Panics
///
/// Panics if `level` is not covered by `scalar`.
pub fn hp(base_stamina: u32, stamina_iv: u8, level: f64, scalar: &impl LevelScalar) -> u32 {
    hp_with_multiplier(base_stamina, stamina_iv, scalar.multiplier(level))
}

/// An inclusive CP interval with `min <= max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpRange {
    pub min: u32,
    pub max: u32,
}

impl CpRange {
    /// Build a range from two bounds in either order.
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Whether `cp` falls inside the range.
    pub fn contains(&self, cp: u32) -> bool {
        self.min <= cp && cp <= self.max
    }
}

/// CP range at `level` spanned by a low and a high IV combination.
///
/// Returns `CpRange { min: 0, max: 0 }` if either combination or the base
/// stats are missing, if the level is negative, or if the level is not
/// covered by `scalar`. That value is a fallback, not a real range.
pub fn cp_range_at_level(
    base: Option<&BaseStats>,
    low: Option<&IvCombination>,
    high: Option<&IvCombination>,
    level: f64,
    scalar: &impl LevelScalar,
) -> CpRange {
    let (Some(base), Some(low), Some(high)) = (base, low, high) else {
        return CpRange::default();
    };
    if level < 0.0 {
        return CpRange::default();
    }
    let Some(multiplier) = scalar.try_multiplier(level) else {
        return CpRange::default();
    };
    CpRange::new(
        cp_with_multiplier(base, low, multiplier),
        cp_with_multiplier(base, high, multiplier),
    )
}
