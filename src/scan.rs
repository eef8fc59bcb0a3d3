//! Scan results.
//!
//! A `ScanResult` pairs what was read off the screen (variant, HP, CP and
//! a candidate level range) with the IV combinations found to explain it.
//! It is filled by [`IvSolver::scan`](crate::IvSolver::scan) and can be
//! cleared and refilled when the inputs are corrected.

use crate::ids::VariantId;
use crate::iv::IvCombination;
use crate::level::{LevelRange, LevelScalar};
use crate::projection::{cp_range_at_level, hp_with_multiplier, CpRange};
use crate::species::Variant;
use std::collections::HashSet;

/// Inputs and results of one IV scan.
///
/// Combinations are kept in discovery order and recorded once each, even
/// when the same triple matches at several levels. A scan result has a
/// single writer; share it only after the search is done.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub variant: VariantId,
    pub observed_hp: u32,
    pub observed_cp: u32,
    pub level_range: LevelRange,
    combinations: Vec<IvCombination>,
    seen: HashSet<IvCombination>,
}

impl ScanResult {
    /// A scan with no combinations recorded yet.
    pub fn new(variant: VariantId, observed_hp: u32, observed_cp: u32, level_range: LevelRange) -> Self {
        Self {
            variant,
            observed_hp,
            observed_cp,
            level_range,
            combinations: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Record a combination. Returns `false` if it was already recorded.
    pub fn add_iv_combination(&mut self, iv: IvCombination) -> bool {
        if !self.seen.insert(iv) {
            return false;
        }
        self.combinations.push(iv);
        true
    }

    /// Drop every recorded combination, keeping the inputs.
    pub fn clear(&mut self) {
        self.combinations.clear();
        self.seen.clear();
    }

    /// Recorded combinations, in discovery order.
    pub fn combinations(&self) -> &[IvCombination] {
        &self.combinations
    }

    /// Take the recorded combinations, in discovery order.
    pub fn into_combinations(self) -> Vec<IvCombination> {
        self.combinations
    }

    /// Whether `iv` has been recorded.
    pub fn contains(&self, iv: &IvCombination) -> bool {
        self.seen.contains(iv)
    }

    /// Number of recorded combinations.
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    /// No combination explains the observation.
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Lowest stamina IV among recorded combinations.
    pub fn stamina_low(&self) -> Option<u8> {
        self.combinations.iter().map(|iv| iv.stamina).min()
    }

    /// Highest stamina IV among recorded combinations.
    pub fn stamina_high(&self) -> Option<u8> {
        self.combinations.iter().map(|iv| iv.stamina).max()
    }

    /// The combination with the lowest IV total (first found wins ties).
    pub fn lowest_combination(&self) -> Option<&IvCombination> {
        self.combinations.iter().min_by_key(|iv| iv.total())
    }

    /// The combination with the highest IV total (first found wins ties).
    pub fn highest_combination(&self) -> Option<&IvCombination> {
        self.combinations
            .iter()
            .reduce(|best, iv| if iv.total() > best.total() { iv } else { best })
    }

    /// Mean perfection percentage over recorded combinations.
    pub fn average_percent(&self) -> Option<f64> {
        if self.combinations.is_empty() {
            return None;
        }
        let sum: f64 = self
            .combinations
            .iter()
            .map(|iv| f64::from(iv.percent_perfect()))
            .sum();
        Some(sum / self.combinations.len() as f64)
    }
}

/// HP of `variant` at `level`, using the scan's stamina IVs.
///
/// When the scan leaves the stamina IV ambiguous this is the rounded
/// average of the HP at the lowest and highest recorded stamina.
///
/// # Panics
///
/// Panics if the scan recorded no combinations, or if `level` is not
/// covered by `scalar`.
pub fn hp_at_level(scan: &ScanResult, level: f64, variant: &Variant, scalar: &impl LevelScalar) -> u32 {
    let (Some(low), Some(high)) = (scan.stamina_low(), scan.stamina_high()) else {
        panic!("hp_at_level called on a scan with no IV combinations");
    };
    let multiplier = scalar.multiplier(level);
    let base_stamina = variant.base_stats().stamina;
    let low_hp = hp_with_multiplier(base_stamina, low, multiplier);
    let high_hp = hp_with_multiplier(base_stamina, high, multiplier);
    (f64::from(low_hp + high_hp) / 2.0).round() as u32
}

/// CP range of `variant` at `level` between the scan's lowest and highest
/// combinations. Falls back to `(0, 0)` like [`cp_range_at_level`].
pub fn cp_range_for_scan(
    scan: &ScanResult,
    variant: &Variant,
    level: f64,
    scalar: &impl LevelScalar,
) -> CpRange {
    cp_range_at_level(
        Some(variant.base_stats()),
        scan.lowest_combination(),
        scan.highest_combination(),
        level,
        scalar,
    )
}
