//! Species and variant records.
//!
//! Both are immutable once the [`SpeciesGraph`](crate::SpeciesGraph) that
//! owns them has been built. Relationships are stored as ids into the
//! graph's arenas rather than as references.

use crate::ids::{SpeciesId, VariantId};
use crate::projection::BaseStats;

/// Internal key of the default form.
pub const NORMAL_FORM: &str = "NORMAL";

/// One species, shared by all of its forms.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub(crate) id: SpeciesId,
    pub(crate) family: String,
    pub(crate) internal_name: String,
    pub(crate) display_name: String,
    pub(crate) candy_to_evolve: u32,
    pub(crate) has_multiple_forms: bool,
    pub(crate) devolution: Option<SpeciesId>,
    pub(crate) evolutions: Vec<SpeciesId>,
    pub(crate) forms: Vec<VariantId>,
    pub(crate) normal_form: VariantId,
}

impl Species {
    /// Pokedex number of this species.
    pub fn id(&self) -> SpeciesId {
        self.id
    }

    /// Candy family key.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Upper-case data key, e.g. `"BUTTERFREE"`.
    pub fn internal_name(&self) -> &str {
        &self.internal_name
    }

    /// Human-readable name, e.g. `"Butterfree"`.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Candy needed to evolve this species into its next stage.
    pub fn candy_to_evolve(&self) -> u32 {
        self.candy_to_evolve
    }

    /// Whether any species in this family has more than one form.
    pub fn has_multiple_forms(&self) -> bool {
        self.has_multiple_forms
    }

    /// The species one evolution step below, if any.
    pub fn devolution(&self) -> Option<SpeciesId> {
        self.devolution
    }

    /// Species one evolution step above, in data order.
    pub fn evolutions(&self) -> &[SpeciesId] {
        &self.evolutions
    }

    /// Every form of this species, normal form included, in data order.
    pub fn forms(&self) -> &[VariantId] {
        &self.forms
    }

    /// The form whose key is [`NORMAL_FORM`].
    pub fn normal_form(&self) -> VariantId {
        self.normal_form
    }

    /// The only form, if the species has exactly one.
    pub fn single_form(&self) -> Option<VariantId> {
        match self.forms.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Whether `variant` is one of this species' forms.
    pub fn has_form(&self, variant: VariantId) -> bool {
        self.forms.contains(&variant)
    }

    /// Whether this species sits at the root of its evolution tree.
    pub fn is_base(&self) -> bool {
        self.devolution.is_none()
    }

    /// Whether the candy for this family is named after this species.
    pub fn is_candy_species(&self) -> bool {
        self.family == self.internal_name
    }
}

/// One form of a species, with its own base stats and form-level
/// evolution edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub(crate) id: VariantId,
    pub(crate) species: SpeciesId,
    pub(crate) form_name: String,
    pub(crate) internal_form_name: String,
    pub(crate) display_name: String,
    pub(crate) base: BaseStats,
    pub(crate) types: Vec<String>,
    pub(crate) candy_to_evolve: u32,
    pub(crate) evolutions: Vec<VariantId>,
    pub(crate) devolutions: Vec<VariantId>,
}

impl Variant {
    /// Id of this form in the owning graph.
    pub fn id(&self) -> VariantId {
        self.id
    }

    /// Owning species.
    pub fn species(&self) -> SpeciesId {
        self.species
    }

    /// Readable form name, e.g. `"Alolan"`.
    ///
    /// Falls back to the internal key when the data gives no readable name.
    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    /// Form key from the data, e.g. `"ALOLA"`.
    pub fn internal_form_name(&self) -> &str {
        &self.internal_form_name
    }

    /// Whether this is the species' default form.
    pub fn is_normal_form(&self) -> bool {
        self.internal_form_name == NORMAL_FORM
    }

    /// Species name, suffixed with ` - <form>` when the family has
    /// several forms.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Base attack, defense and stamina of this form.
    pub fn base_stats(&self) -> &BaseStats {
        &self.base
    }

    /// Elemental types, in data order.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Copy of the owning species' candy cost.
    pub fn candy_to_evolve(&self) -> u32 {
        self.candy_to_evolve
    }

    /// Forms this form evolves into.
    pub fn evolutions(&self) -> &[VariantId] {
        &self.evolutions
    }

    /// Forms this form evolves from.
    pub fn devolutions(&self) -> &[VariantId] {
        &self.devolutions
    }
}

/// Display name of a form: the species name alone, or `"<species> - <form>"`
/// when the family has several forms.
pub(crate) fn variant_display_name(species_name: &str, form_name: &str, multiple: bool) -> String {
    if multiple {
        format!("{species_name} - {form_name}")
    } else {
        species_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(forms: Vec<VariantId>) -> Species {
        Species {
            id: SpeciesId(52),
            family: "MEOWTH".to_string(),
            internal_name: "MEOWTH".to_string(),
            display_name: "Meowth".to_string(),
            candy_to_evolve: 50,
            has_multiple_forms: forms.len() > 1,
            devolution: None,
            evolutions: Vec::new(),
            normal_form: forms[0],
            forms,
        }
    }

    #[test]
    fn test_single_form() {
        assert_eq!(species(vec![VariantId(0)]).single_form(), Some(VariantId(0)));
        assert_eq!(species(vec![VariantId(0), VariantId(1)]).single_form(), None);
    }

    #[test]
    fn test_candy_species_and_base() {
        let s = species(vec![VariantId(0)]);
        assert!(s.is_candy_species());
        assert!(s.is_base());
        assert!(s.has_form(VariantId(0)));
        assert!(!s.has_form(VariantId(1)));
    }

    #[test]
    fn test_variant_display_name() {
        assert_eq!(variant_display_name("Meowth", "Alolan", true), "Meowth - Alolan");
        assert_eq!(variant_display_name("Meowth", "Normal", false), "Meowth");
    }
}
