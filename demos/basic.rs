//! Basic example: deduce IVs from an observed HP and CP
//!
//! This example demonstrates:
//! - Loading species data and a level table
//! - Scanning a creature over a candidate level range
//! - Projecting CP and HP at a higher level
//! - Pricing the power-up and the evolution

use ivdex::*;

const SPECIES: &str = r#"[
  { "number": 10, "family": "CATERPIE", "name": "CATERPIE", "displayName": "Caterpie", "candy": 12,
    "forms": [{ "form": "NORMAL", "baseAttack": 55, "baseDefense": 55, "baseStamina": 128, "types": ["BUG"] }] },
  { "number": 11, "family": "CATERPIE", "name": "METAPOD", "displayName": "Metapod", "candy": 50, "devolution": 10,
    "forms": [{ "form": "NORMAL", "baseAttack": 45, "baseDefense": 80, "baseStamina": 137, "types": ["BUG"],
                "devolution": ["NORMAL"] }] },
  { "number": 12, "family": "CATERPIE", "name": "BUTTERFREE", "displayName": "Butterfree", "devolution": 11,
    "forms": [{ "form": "NORMAL", "baseAttack": 167, "baseDefense": 137, "baseStamina": 155,
                "types": ["BUG", "FLYING"], "devolution": ["NORMAL"] }] }
]"#;

const LEVELS: &str = r#"{
  "19": 0.58227891, "19.5": 0.58978466, "20": 0.59740001, "20.5": 0.60482365,
  "21": 0.61215729, "25": 0.667934, "30": 0.7317
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let graph = SpeciesGraph::from_json(SPECIES)?;
    let table = CpmTable::from_json(LEVELS)?;
    let solver = IvSolver::new(&graph, &table);

    let butterfree = graph
        .species_by_number(12)
        .ok_or("Butterfree missing from data")?
        .normal_form();
    let variant = graph.variant(butterfree);

    // Pretend the screen showed the stats of a 12/9/14 Butterfree at level 20.
    let truth = IvCombination::new(12, 9, 14);
    let observed_hp = hp(variant.base_stats().stamina, truth.stamina(), 20.0, &table);
    let observed_cp = cp(variant.base_stats(), &truth, 20.0, &table);
    println!("Observed {}: HP {}, CP {}", variant.display_name(), observed_hp, observed_cp);

    let range = LevelRange::new(19.0, 21.0)?;
    range.validate(&table)?;
    let mut scan = ScanResult::new(butterfree, observed_hp, observed_cp, range);
    solver.scan(&mut scan);

    println!("\n=== Possible IVs ({}) ===", scan.len());
    for iv in scan.combinations() {
        println!("  {} ({}%)", iv, iv.percent_perfect());
    }
    if let Some(average) = scan.average_percent() {
        println!("Average: {:.1}%", average);
    }

    println!("\n=== At level 30 ===");
    let range = solver.cp_range_for_scan(&scan, butterfree, 30.0);
    println!("CP: {} - {}", range.min, range.max);
    println!("HP: {}", solver.hp_at_level(&scan, 30.0, butterfree));

    let cost = upgrade_cost(30.0, 20.0, false);
    println!("Power-up 20 -> 30: {} stardust, {} candy", cost.stardust, cost.candy);

    let caterpie = graph
        .species_by_number(10)
        .ok_or("Caterpie missing from data")?
        .normal_form();
    println!(
        "\nEvolving Caterpie into Butterfree: {} candy",
        graph.candy_cost(caterpie, butterfree)
    );

    Ok(())
}
