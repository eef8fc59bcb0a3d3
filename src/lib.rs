//! # ivdex - Deterministic IV Deduction Engine
//!
//! Works out a captured creature's hidden individual values (IVs) from what
//! the game shows: its HP, its CP and a rough level estimate. Provides:
//! - **IV deduction** over the bounded 16x16x16 IV space across a range of
//!   candidate levels
//! - **Projections** of CP and HP at any level
//! - **A species graph** of species, forms and evolution links
//! - **Costs** of evolving (candy) and powering up (candy and stardust)
//!
//! ## Core Concepts
//!
//! ### Pipeline
//!
//! ```text
//! [species JSON] → [SpeciesGraph] ─┐
//! [level table]  → [CpmTable]    ──┼→ [IvSolver] → [ScanResult]
//! [HP, CP, levels] ────────────────┘
//! ```
//!
//! 1. The **graph** is built once from data and is read-only afterwards
//! 2. The **level table** supplies the per-level multiplier the formulas need
//! 3. The **solver** fills a scan result with every consistent IV triple
//!
//! Everything is deterministic: the same inputs always give the same
//! combinations in the same order.
//!
//! ## Example
//!
//! ```rust
//! use ivdex::*;
//!
//! let graph = SpeciesGraph::from_json(r#"[
//!   { "number": 1, "family": "BULBASAUR", "name": "BULBASAUR", "candy": 25,
//!     "forms": [{ "form": "NORMAL", "baseAttack": 118, "baseDefense": 111, "baseStamina": 128 }] }
//! ]"#).unwrap();
//! let table = CpmTable::from_pairs([(20.0, 0.5974), (20.5, 0.60482365)]).unwrap();
//!
//! let bulbasaur = graph.species_by_number(1).unwrap().normal_form();
//! let solver = IvSolver::new(&graph, &table);
//!
//! let observed_hp = hp(128, 7, 20.0, &table);
//! let observed_cp = cp(&BaseStats::new(118, 111, 128), &IvCombination::new(10, 8, 7), 20.0, &table);
//!
//! let mut scan = ScanResult::new(bulbasaur, observed_hp, observed_cp, LevelRange::new(20.0, 20.5).unwrap());
//! solver.scan(&mut scan);
//! assert!(scan.contains(&IvCombination::new(10, 8, 7)));
//! ```
//!
//! ## Modules
//!
//! - [`ids`] - Species and variant identifiers
//! - [`data`] - Species data input
//! - [`species`] - Species and variant records
//! - [`species_graph`] - The species graph and its queries
//! - [`graph`] - Evolution DAG validation
//! - [`level`] - Level scalar lookup and level ranges
//! - [`iv`] - IV triples
//! - [`projection`] - CP and HP formulas
//! - [`solver`] - IV deduction
//! - [`scan`] - Scan results
//! - [`cost`] - Power-up cost
//! - [`error`] - Error types

pub mod cost;
pub mod data;
pub mod error;
pub mod graph;
pub mod ids;
pub mod iv;
pub mod level;
pub mod projection;
pub mod scan;
pub mod solver;
pub mod species;
pub mod species_graph;

// Re-export main types for convenience
pub use error::{GraphError, IvError, LevelError};
pub use ids::{SpeciesId, VariantId};
pub use iv::{IvCombination, MAX_IV};
pub use level::{CpmTable, LevelRange, LevelScalar};
pub use scan::ScanResult;
pub use solver::{deduce, IvSolver};
pub use species::{Species, Variant, NORMAL_FORM};
pub use species_graph::SpeciesGraph;

pub use cost::{try_upgrade_cost, upgrade_cost, UpgradeCost};
pub use data::{FormEntry, SpeciesEntry};
pub use projection::{cp, cp_range_at_level, hp, BaseStats, CpRange};
pub use scan::{cp_range_for_scan, hp_at_level};
