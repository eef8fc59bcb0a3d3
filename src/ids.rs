//! Identifier types for graph records.
//!
//! Species are addressed by their pokedex-style number. Variants are
//! addressed by their position in the graph's variant arena, so a
//! `VariantId` is only meaningful for the graph that minted it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Species identifier, the national-dex-like number from the data set.
///
/// # Examples
///
/// ```rust
/// use ivdex::SpeciesId;
///
/// let id = SpeciesId(133);
/// assert_eq!(id.to_string(), "#133");
/// assert_eq!(SpeciesId::from(133), id);
/// ```
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SpeciesId(pub u32);

impl SpeciesId {
    /// The raw number.
    pub fn number(self) -> u32 {
        self.0
    }
}

impl From<u32> for SpeciesId {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a variant (species form) inside a [`SpeciesGraph`](crate::SpeciesGraph).
///
/// Handed out by the graph during construction; variants are stored in
/// data order, so ids are stable for the lifetime of the graph.
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VariantId(pub(crate) usize);

impl VariantId {
    /// Position of this variant in the graph's variant list.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "variant {}", self.0)
    }
}
