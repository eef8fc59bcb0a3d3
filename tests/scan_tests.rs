use ivdex::projection::{cp_factor, cp_with_factor, hp_with_multiplier};
use ivdex::*;
use proptest::prelude::*;
use std::collections::HashSet;

/// Whole-level multipliers for levels 1 through 40.
const WHOLE_LEVELS: [f64; 40] = [
    0.094, 0.16639787, 0.21573247, 0.25572005, 0.29024988, 0.3210876, 0.34921268, 0.37523559,
    0.39956728, 0.42250001, 0.44310755, 0.46279839, 0.48168495, 0.49985844, 0.51739395,
    0.53435433, 0.55079269, 0.56675452, 0.58227891, 0.59740001, 0.61215729, 0.62656713,
    0.64065295, 0.65443563, 0.667934, 0.68116492, 0.69414365, 0.70688421, 0.71939909, 0.7317,
    0.73776948, 0.74378943, 0.74976104, 0.75568551, 0.76156384, 0.76739717, 0.7731865,
    0.77893275, 0.78463697, 0.79030001,
];

/// Level table from 1 to 40 with half levels interpolated the way the game does.
fn cpm_table() -> CpmTable {
    let mut pairs = Vec::new();
    for (i, &multiplier) in WHOLE_LEVELS.iter().enumerate() {
        let level = (i + 1) as f64;
        pairs.push((level, multiplier));
        if let Some(&next) = WHOLE_LEVELS.get(i + 1) {
            let half = ((multiplier * multiplier + next * next) / 2.0).sqrt();
            pairs.push((level + 0.5, half));
        }
    }
    CpmTable::from_pairs(pairs).unwrap()
}

fn graph() -> SpeciesGraph {
    SpeciesGraph::from_json(include_str!("fixtures/species.json")).unwrap()
}

/// Every combination at every level, no pruning.
fn brute_force(
    base: &BaseStats,
    observed_hp: u32,
    observed_cp: u32,
    range: &LevelRange,
    table: &CpmTable,
) -> HashSet<IvCombination> {
    let mut found = HashSet::new();
    for level in range.levels() {
        let multiplier = table.multiplier(level);
        let factor = cp_factor(multiplier);
        for stamina in 0..=MAX_IV {
            for defense in 0..=MAX_IV {
                for attack in 0..=MAX_IV {
                    let iv = IvCombination::new(attack, defense, stamina);
                    if hp_with_multiplier(base.stamina, stamina, multiplier) == observed_hp
                        && cp_with_factor(base, &iv, factor) == observed_cp
                    {
                        found.insert(iv);
                    }
                }
            }
        }
    }
    found
}

/// Test the worked example: base 120/100/90 at level 20 with IVs 10/8/7.
#[test]
fn test_worked_example() {
    let table = CpmTable::from_pairs([(20.0, 0.5974)]).unwrap();
    let base = BaseStats::new(120, 100, 90);
    let iv = IvCombination::new(10, 8, 7);

    let observed_hp = hp(base.stamina, iv.stamina(), 20.0, &table);
    assert_eq!(observed_hp, 57);
    let observed_cp = cp(&base, &iv, 20.0, &table);

    let found = deduce(&base, observed_hp, observed_cp, &LevelRange::single(20.0).unwrap(), &table);
    assert!(found.contains(&iv));
}

/// Test a full scan through the solver against the fixture graph.
#[test]
fn test_solver_scan() {
    let graph = graph();
    let table = cpm_table();
    let solver = IvSolver::new(&graph, &table);

    let jolteon = graph.species_by_number(135).unwrap().normal_form();
    let base = *graph.variant(jolteon).base_stats();
    let iv = IvCombination::new(13, 4, 9);
    let observed_hp = hp(base.stamina, iv.stamina(), 25.0, &table);
    let observed_cp = cp(&base, &iv, 25.0, &table);

    let mut scan = ScanResult::new(jolteon, observed_hp, observed_cp, LevelRange::new(24.0, 26.0).unwrap());
    solver.scan(&mut scan);

    assert!(scan.contains(&iv));
    assert!(!scan.is_empty());
    let low = scan.stamina_low().unwrap();
    let high = scan.stamina_high().unwrap();
    assert!(low <= iv.stamina() && iv.stamina() <= high);

    let as_set: HashSet<_> = scan.combinations().iter().copied().collect();
    let expected = brute_force(&base, observed_hp, observed_cp, &scan.level_range, &table);
    assert_eq!(as_set, expected);
}

/// Test rescanning after the inputs change replaces the old results.
#[test]
fn test_rescan_clears_previous_results() {
    let graph = graph();
    let table = cpm_table();
    let solver = IvSolver::new(&graph, &table);
    let eevee = graph.species_by_number(133).unwrap().normal_form();
    let base = *graph.variant(eevee).base_stats();

    let first = IvCombination::new(15, 15, 15);
    let mut scan = ScanResult::new(
        eevee,
        hp(base.stamina, first.stamina(), 30.0, &table),
        cp(&base, &first, 30.0, &table),
        LevelRange::single(30.0).unwrap(),
    );
    solver.scan(&mut scan);
    assert!(scan.contains(&first));

    let second = IvCombination::new(0, 0, 0);
    scan.observed_hp = hp(base.stamina, second.stamina(), 30.0, &table);
    scan.observed_cp = cp(&base, &second, 30.0, &table);
    solver.scan(&mut scan);
    assert!(scan.contains(&second));
    assert!(!scan.contains(&first));
}

/// Test the solver matches the free function and repeats identically.
#[test]
fn test_deduce_is_idempotent() {
    let graph = graph();
    let table = cpm_table();
    let solver = IvSolver::new(&graph, &table);
    let vaporeon = graph.species_by_number(134).unwrap().normal_form();
    let range = LevelRange::new(18.0, 22.0).unwrap();

    let first = solver.deduce(vaporeon, 160, 1500, range);
    let second = solver.deduce(vaporeon, 160, 1500, range);
    assert_eq!(first, second);

    let base = graph.variant(vaporeon).base_stats();
    assert_eq!(first, deduce(base, 160, 1500, &range, &table));
}

/// Test HP projection averages the low and high stamina readings.
#[test]
fn test_hp_at_level() {
    let graph = graph();
    let table = cpm_table();
    let solver = IvSolver::new(&graph, &table);
    let caterpie = graph.species_by_number(10).unwrap().normal_form();

    let mut scan = ScanResult::new(caterpie, 1, 1, LevelRange::single(20.0).unwrap());
    scan.add_iv_combination(IvCombination::new(0, 0, 0));
    scan.add_iv_combination(IvCombination::new(0, 0, 15));

    let low = hp(128, 0, 30.0, &table);
    let high = hp(128, 15, 30.0, &table);
    let expected = (f64::from(low + high) / 2.0).round() as u32;
    assert_eq!(solver.hp_at_level(&scan, 30.0, caterpie), expected);

    // A single stamina gives an exact answer.
    scan.clear();
    scan.add_iv_combination(IvCombination::new(3, 3, 7));
    assert_eq!(solver.hp_at_level(&scan, 30.0, caterpie), hp(128, 7, 30.0, &table));
}

/// Test HP projection refuses an empty scan.
#[test]
#[should_panic(expected = "no IV combinations")]
fn test_hp_at_level_empty_scan_panics() {
    let graph = graph();
    let table = cpm_table();
    let caterpie = graph.species_by_number(10).unwrap().normal_form();
    let scan = ScanResult::new(caterpie, 1, 1, LevelRange::single(20.0).unwrap());
    IvSolver::new(&graph, &table).hp_at_level(&scan, 30.0, caterpie);
}

/// Test CP range projection from a scan and the (0, 0) fallbacks.
#[test]
fn test_cp_range_projection() {
    let graph = graph();
    let table = cpm_table();
    let solver = IvSolver::new(&graph, &table);
    let espeon = graph.species_by_number(196).unwrap().normal_form();
    let base = *graph.variant(espeon).base_stats();

    let mut scan = ScanResult::new(espeon, 1, 1, LevelRange::single(20.0).unwrap());
    scan.add_iv_combination(IvCombination::new(15, 14, 15));
    scan.add_iv_combination(IvCombination::new(2, 3, 1));

    let range = solver.cp_range_for_scan(&scan, espeon, 40.0);
    assert_eq!(range.min, cp(&base, &IvCombination::new(2, 3, 1), 40.0, &table));
    assert_eq!(range.max, cp(&base, &IvCombination::new(15, 14, 15), 40.0, &table));

    let empty = ScanResult::new(espeon, 1, 1, LevelRange::single(20.0).unwrap());
    assert_eq!(solver.cp_range_for_scan(&empty, espeon, 40.0), CpRange::default());
    assert_eq!(
        solver.cp_range_at_level(espeon, Some(&IvCombination::MAX), Some(&IvCombination::MIN), -0.5),
        CpRange::default()
    );
}

/// Test independent scans can run on several threads over one graph.
#[test]
fn test_concurrent_scans() {
    let graph = graph();
    let table = cpm_table();

    std::thread::scope(|scope| {
        let handles: Vec<_> = graph
            .pokedex()
            .iter()
            .map(|species| {
                let graph = &graph;
                let table = &table;
                let variant = species.normal_form();
                scope.spawn(move || {
                    let base = *graph.variant(variant).base_stats();
                    let iv = IvCombination::new(7, 7, 7);
                    let observed_hp = hp(base.stamina, iv.stamina(), 15.0, table);
                    let observed_cp = cp(&base, &iv, 15.0, table);
                    IvSolver::new(graph, table)
                        .deduce(variant, observed_hp, observed_cp, LevelRange::single(15.0).unwrap())
                        .contains(&iv)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}

/// Test the upgrade cost table end to end.
#[test]
fn test_upgrade_cost() {
    assert_eq!(upgrade_cost(11.0, 10.0, false), UpgradeCost { stardust: 2000, candy: 2 });
    assert_eq!(upgrade_cost(1.5, 1.0, false), UpgradeCost { stardust: 200, candy: 1 });

    let to_forty = upgrade_cost(40.0, 1.0, false);
    let lucky = upgrade_cost(40.0, 1.0, true);
    assert_eq!(lucky.candy, to_forty.candy);
    assert_eq!(lucky.stardust, to_forty.stardust / 2);
}

/// Test stored IVs only enter a scan through the range check.
#[test]
fn test_decoded_ivs_are_range_checked() {
    let stored = r#"[{"attack":15,"defense":15,"stamina":15},{"attack":200,"defense":200,"stamina":200}]"#;
    assert!(serde_json::from_str::<Vec<IvCombination>>(stored).is_err());

    let stored = r#"[{"attack":15,"defense":15,"stamina":15},{"attack":0,"defense":0,"stamina":0}]"#;
    let ivs: Vec<IvCombination> = serde_json::from_str(stored).unwrap();
    let butterfree = graph().species_by_number(12).unwrap().normal_form();
    let mut scan = ScanResult::new(butterfree, 100, 1000, LevelRange::single(20.0).unwrap());
    for iv in ivs {
        scan.add_iv_combination(iv);
    }
    assert_eq!(scan.highest_combination().map(|iv| iv.total()), Some(45));
    assert_eq!(scan.average_percent(), Some(50.0));
}

/// Test a level table spelling one level twice is rejected on every load.
#[test]
fn test_level_table_duplicate_keys_rejected() {
    let json = r#"{"1": 0.094, "1.0": 0.5, "1.5": 0.2}"#;
    for _ in 0..100 {
        assert!(matches!(CpmTable::from_json(json), Err(LevelError::Parse(_))));
    }
}

fn level_strategy() -> impl Strategy<Value = f64> {
    (2u32..=80).prop_map(|steps| f64::from(steps) / 2.0)
}

fn base_strategy() -> impl Strategy<Value = BaseStats> {
    (1u32..=350, 1u32..=350, 1u32..=500).prop_map(|(a, d, s)| BaseStats::new(a, d, s))
}

fn iv_strategy() -> impl Strategy<Value = IvCombination> {
    (0..=MAX_IV, 0..=MAX_IV, 0..=MAX_IV).prop_map(|(a, d, s)| IvCombination::new(a, d, s))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// HP never drops as the stamina IV grows.
    #[test]
    fn prop_hp_monotonic_in_stamina(base in base_strategy(), level in level_strategy()) {
        let table = cpm_table();
        for stamina in 0..MAX_IV {
            prop_assert!(hp(base.stamina, stamina, level, &table) <= hp(base.stamina, stamina + 1, level, &table));
        }
    }

    /// Pruning never loses a combination the brute-force search finds.
    #[test]
    fn prop_pruned_matches_brute_force(
        base in base_strategy(),
        iv in iv_strategy(),
        true_level in level_strategy(),
        below in 0u32..=3,
        above in 0u32..=3,
    ) {
        let table = cpm_table();
        let observed_hp = hp(base.stamina, iv.stamina(), true_level, &table);
        let observed_cp = cp(&base, &iv, true_level, &table);
        let min = (true_level - f64::from(below) / 2.0).max(1.0);
        let max = (true_level + f64::from(above) / 2.0).min(40.0);
        let range = LevelRange::new(min, max).unwrap();

        let found = deduce(&base, observed_hp, observed_cp, &range, &table);
        let as_set: HashSet<_> = found.iter().copied().collect();
        prop_assert_eq!(as_set.len(), found.len());
        prop_assert!(as_set.contains(&iv));
        prop_assert_eq!(as_set, brute_force(&base, observed_hp, observed_cp, &range, &table));
    }

    /// Pruning also agrees with brute force on arbitrary observations.
    #[test]
    fn prop_pruned_matches_brute_force_random_observation(
        base in base_strategy(),
        observed_hp in 10u32..=400,
        observed_cp in 10u32..=4000,
        level in level_strategy(),
    ) {
        let table = cpm_table();
        let range = LevelRange::single(level).unwrap();
        let found: HashSet<_> = deduce(&base, observed_hp, observed_cp, &range, &table).into_iter().collect();
        prop_assert_eq!(found, brute_force(&base, observed_hp, observed_cp, &range, &table));
    }

    /// CP ranges are always ordered.
    #[test]
    fn prop_cp_range_ordered(base in base_strategy(), a in iv_strategy(), b in iv_strategy(), level in level_strategy()) {
        let range = cp_range_at_level(Some(&base), Some(&a), Some(&b), level, &cpm_table());
        prop_assert!(range.min <= range.max);
    }

    /// Lucky never costs more stardust.
    #[test]
    fn prop_lucky_never_costs_more(from in level_strategy(), extra in 0u32..=40) {
        let goal = (from + f64::from(extra) / 2.0).min(40.0);
        let normal = upgrade_cost(goal, from, false);
        let lucky = upgrade_cost(goal, from, true);
        prop_assert!(lucky.stardust <= normal.stardust);
        prop_assert_eq!(lucky.candy, normal.candy);
    }
}
