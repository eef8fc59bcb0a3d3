//! Error types for graph construction and level handling.
//!
//! Everything that can go wrong while loading species data is a
//! `GraphError`; everything that can go wrong while building a level
//! scalar table or validating a level range is a `LevelError`. Decoding
//! an out-of-range IV triple is an `IvError`. The IV search itself has no
//! error path.

use crate::ids::SpeciesId;
use thiserror::Error;

/// Format a cycle path as a readable string.
fn format_cycle_path(path: &[SpeciesId]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors that can occur while building a [`SpeciesGraph`](crate::SpeciesGraph).
///
/// Any of these means the graph could not be built at all; there is no
/// partially built graph to fall back on.
///
/// # Examples
///
/// ```rust
/// use ivdex::{GraphError, SpeciesId};
///
/// let err = GraphError::NoForms(SpeciesId(10));
/// assert_eq!(err.to_string(), "Species #10 declares no forms");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// The species data could not be decoded.
    #[error("Invalid species data: {0}")]
    Parse(String),

    /// Two entries share the same species number.
    #[error("Duplicate species: {0}")]
    DuplicateSpecies(SpeciesId),

    /// A species names a devolution that is not in the data set.
    #[error("Species {species} devolves into unknown species {devolution}")]
    UnknownDevolution {
        species: SpeciesId,
        devolution: SpeciesId,
    },

    /// A species has an empty form list.
    #[error("Species {0} declares no forms")]
    NoForms(SpeciesId),

    /// A species must have exactly one `NORMAL` form.
    #[error("Species {species} has {count} normal forms, expected exactly one")]
    NormalFormCount { species: SpeciesId, count: usize },

    /// The devolution relation loops back on itself.
    ///
    /// The path is closed: the first and last entries are the same species.
    #[error("Evolution cycle detected: {}", format_cycle_path(.path))]
    Cycle { path: Vec<SpeciesId> },
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Parse(err.to_string())
    }
}

/// Errors raised when building a level scalar table or a level range.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LevelError {
    /// Levels are whole or half numbers only.
    #[error("Level {0} is not a multiple of 0.5")]
    NotHalfStep(f64),

    /// The level is not covered by the scalar table.
    #[error("Level {0} is not in the level table")]
    UnknownLevel(f64),

    /// A range whose lower end is above its upper end.
    #[error("Level range is inverted: {min} > {max}")]
    InvertedRange { min: f64, max: f64 },

    /// Multipliers must be positive.
    #[error("Multiplier {multiplier} for level {level} is not positive")]
    NonPositiveMultiplier { level: f64, multiplier: f64 },

    /// Two table entries resolve to the same level, e.g. `"1"` and `"1.0"`.
    #[error("Level {0} appears more than once in the level table")]
    DuplicateLevel(f64),

    /// Multipliers must not decrease as the level goes up.
    #[error("Multiplier for level {level} is lower than for the level below it")]
    Decreasing { level: f64 },

    /// The level table could not be decoded.
    #[error("Invalid level table: {0}")]
    Parse(String),
}

/// Errors raised when decoding an IV triple.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IvError {
    /// Every IV must be in `0..=15`.
    #[error("IV out of range: {attack}/{defense}/{stamina}")]
    OutOfRange { attack: u8, defense: u8, stamina: u8 },
}
