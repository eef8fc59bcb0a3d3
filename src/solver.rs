//! IV deduction.
//!
//! Finds every `(attack, defense, stamina)` IV triple that reproduces an
//! observed HP and CP at some level in a candidate range.
//!
//! For each level the stamina IV is tried from 0 upwards. HP never
//! decreases as stamina grows, so the first stamina whose HP overshoots
//! ends the level. Each stamina whose HP matches exactly gets the full
//! 16x16 attack/defense sweep against the CP formula.

use crate::ids::VariantId;
use crate::iv::{IvCombination, MAX_IV};
use crate::level::{LevelRange, LevelScalar};
use crate::projection::{cp_factor, cp_range_at_level, cp_with_factor, hp_with_multiplier, BaseStats, CpRange};
use crate::scan::{cp_range_for_scan, hp_at_level, ScanResult};
use crate::species_graph::SpeciesGraph;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Scan one level, calling `found` for each matching combination in
/// stamina, defense, attack order.
fn scan_level<F>(base: &BaseStats, observed_hp: u32, observed_cp: u32, multiplier: f64, found: &mut F)
where
    F: FnMut(IvCombination),
{
    let factor = cp_factor(multiplier);

    for stamina in 0..=MAX_IV {
        let hp = hp_with_multiplier(base.stamina, stamina, multiplier);
        if hp > observed_hp {
            break;
        }
        if hp != observed_hp {
            continue;
        }
        for defense in 0..=MAX_IV {
            for attack in 0..=MAX_IV {
                let iv = IvCombination {
                    attack,
                    defense,
                    stamina,
                };
                if cp_with_factor(base, &iv, factor) == observed_cp {
                    found(iv);
                }
            }
        }
    }
}

/// Every IV combination consistent with `observed_hp` and `observed_cp`
/// for a creature with `base` stats at some level in `range`.
///
/// Results are deduplicated and in discovery order. An empty result means
/// no combination explains the observation.
///
/// # Panics
///
/// Panics if a level in `range` is not covered by `scalar`.
///
/// # Examples
///
/// ```rust
/// use ivdex::{deduce, BaseStats, CpmTable, IvCombination, LevelRange};
///
/// let table = CpmTable::from_pairs([(20.0, 0.5974)]).unwrap();
/// let base = BaseStats::new(120, 100, 90);
/// let found = deduce(&base, 57, 474, &LevelRange::single(20.0).unwrap(), &table);
/// assert!(found.contains(&IvCombination::new(10, 8, 7)));
/// ```
pub fn deduce(
    base: &BaseStats,
    observed_hp: u32,
    observed_cp: u32,
    range: &LevelRange,
    scalar: &impl LevelScalar,
) -> Vec<IvCombination> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for level in range.levels() {
        scan_level(base, observed_hp, observed_cp, scalar.multiplier(level), &mut |iv| {
            if seen.insert(iv) {
                found.push(iv);
            }
        });
    }
    found
}

/// IV deduction and projection against a species graph and level table.
///
/// Holds only shared references, so any number of solvers can run over
/// the same graph at once.
pub struct IvSolver<'a, L: LevelScalar> {
    graph: &'a SpeciesGraph,
    scalar: &'a L,
}

impl<'a, L: LevelScalar> IvSolver<'a, L> {
    /// Create a solver over `graph` using `scalar` for level multipliers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ivdex::{CpmTable, IvSolver, SpeciesGraph};
    ///
    /// let graph = SpeciesGraph::from_json("[]").unwrap();
    /// let table = CpmTable::from_pairs([(1.0, 0.094)]).unwrap();
    /// let solver = IvSolver::new(&graph, &table);
    /// assert!(solver.graph().pokedex().is_empty());
    /// ```
    pub fn new(graph: &'a SpeciesGraph, scalar: &'a L) -> Self {
        Self { graph, scalar }
    }

    /// The species graph this solver reads base stats from.
    pub fn graph(&self) -> &'a SpeciesGraph {
        self.graph
    }

    /// The level table this solver uses.
    pub fn scalar(&self) -> &'a L {
        self.scalar
    }

    /// Clear `scan` and refill it with every consistent IV combination.
    ///
    /// # Panics
    ///
    /// Panics if the scan's variant is not in the graph or a level in its
    /// range is not covered by the level table.
    pub fn scan(&self, scan: &mut ScanResult) {
        scan.clear();
        let base = *self.graph.variant(scan.variant).base_stats();
        let (observed_hp, observed_cp) = (scan.observed_hp, scan.observed_cp);
        let range = scan.level_range;

        for level in range.levels() {
            let multiplier = self.scalar.multiplier(level);
            let before = scan.len();
            scan_level(&base, observed_hp, observed_cp, multiplier, &mut |iv| {
                scan.add_iv_combination(iv);
            });
            trace!(level, new_combinations = scan.len() - before, "scanned level");
        }

        debug!(
            variant = %scan.variant,
            hp = scan.observed_hp,
            cp = scan.observed_cp,
            min_level = scan.level_range.min(),
            max_level = scan.level_range.max(),
            matches = scan.len(),
            "deduced IV combinations"
        );
    }

    /// Every IV combination of `variant` consistent with the observation.
    pub fn deduce(
        &self,
        variant: VariantId,
        observed_hp: u32,
        observed_cp: u32,
        range: LevelRange,
    ) -> Vec<IvCombination> {
        let mut scan = ScanResult::new(variant, observed_hp, observed_cp, range);
        self.scan(&mut scan);
        scan.into_combinations()
    }

    /// CP range of `variant` at `level` between two IV combinations.
    pub fn cp_range_at_level(
        &self,
        variant: VariantId,
        low: Option<&IvCombination>,
        high: Option<&IvCombination>,
        level: f64,
    ) -> CpRange {
        let base = self.graph.try_variant(variant).map(|v| v.base_stats());
        cp_range_at_level(base, low, high, level, self.scalar)
    }

    /// CP range of `variant` at `level` spanned by the scan's results.
    pub fn cp_range_for_scan(&self, scan: &ScanResult, variant: VariantId, level: f64) -> CpRange {
        cp_range_for_scan(scan, self.graph.variant(variant), level, self.scalar)
    }

    /// HP of `variant` at `level` given the scan's stamina IVs.
    ///
    /// # Panics
    ///
    /// Panics if the scan recorded no combinations.
    pub fn hp_at_level(&self, scan: &ScanResult, level: f64, variant: VariantId) -> u32 {
        hp_at_level(scan, level, self.graph.variant(variant), self.scalar)
    }
}
