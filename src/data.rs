//! Species data input.
//!
//! Serde model of the species stats asset: one [`SpeciesEntry`] per
//! species, each carrying its forms. Keys are camelCase in JSON:
//!
//! ```json
//! [
//!   {
//!     "number": 10, "family": "CATERPIE", "name": "CATERPIE", "candy": 12,
//!     "forms": [
//!       { "form": "NORMAL", "baseAttack": 55, "baseDefense": 55, "baseStamina": 128 }
//!     ]
//!   }
//! ]
//! ```

use crate::ids::SpeciesId;
use serde::{Deserialize, Serialize};

/// One species as it appears in the data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesEntry {
    /// Pokedex-style number, unique across the data set.
    pub number: u32,

    /// Candy family key; species sharing it share a candy pool.
    pub family: String,

    /// Stable internal name.
    pub name: String,

    /// Localized name, defaults to `name`.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Number of the species one evolution step below, if any.
    #[serde(default)]
    pub devolution: Option<u32>,

    /// Candy needed to evolve this species into its next stage.
    #[serde(default)]
    pub candy: u32,

    pub forms: Vec<FormEntry>,
}

impl SpeciesEntry {
    /// The species id this entry describes.
    pub fn id(&self) -> SpeciesId {
        SpeciesId(self.number)
    }
}

/// One form (variant) of a species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEntry {
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_stamina: u32,

    /// Internal form key, `NORMAL` for the default form.
    pub form: String,

    /// Localized form name, defaults to `form`.
    #[serde(default)]
    pub form_name: Option<String>,

    #[serde(default)]
    pub types: Vec<String>,

    /// Form keys of the devolved species this form descends from.
    #[serde(default)]
    pub devolution: Vec<String>,
}

/// Decode a species data set from JSON.
pub fn parse_entries(json: &str) -> Result<Vec<SpeciesEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_entry() {
        let json = r#"[{
            "number": 10, "family": "CATERPIE", "name": "CATERPIE", "candy": 12,
            "forms": [{ "form": "NORMAL", "baseAttack": 55, "baseDefense": 55, "baseStamina": 128 }]
        }]"#;
        let entries = parse_entries(json).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.id(), SpeciesId(10));
        assert_eq!(entry.devolution, None);
        assert_eq!(entry.display_name, None);
        assert_eq!(entry.forms[0].base_stamina, 128);
        assert!(entry.forms[0].devolution.is_empty());
    }

    #[test]
    fn test_parse_full_form() {
        let json = r#"{
            "form": "ALOLA", "formName": "Alolan", "baseAttack": 110, "baseDefense": 97,
            "baseStamina": 155, "types": ["ELECTRIC", "PSYCHIC"], "devolution": ["NORMAL"]
        }"#;
        let form: FormEntry = serde_json::from_str(json).unwrap();
        assert_eq!(form.form_name.as_deref(), Some("Alolan"));
        assert_eq!(form.types, vec!["ELECTRIC", "PSYCHIC"]);
        assert_eq!(form.devolution, vec!["NORMAL"]);
    }

    #[test]
    fn test_parse_rejects_missing_stats() {
        let json = r#"[{ "number": 1, "family": "A", "name": "A", "forms": [{ "form": "NORMAL" }] }]"#;
        assert!(parse_entries(json).is_err());
    }
}
