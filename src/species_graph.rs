//! The species graph.
//!
//! Provides `SpeciesGraph`, the immutable forest of species and their
//! forms linked by evolution and devolution edges. It is built once from
//! [`SpeciesEntry`] data and then only read: every query takes `&self`, so
//! one graph can be shared across threads without locking.
//!
//! Species live in one arena and variants in another. Edges are stored as
//! ids ([`SpeciesId`], [`VariantId`]) on both ends, which keeps the
//! back-pointers without reference cycles.

use crate::data::{parse_entries, SpeciesEntry};
use crate::error::GraphError;
use crate::graph::EvolutionDag;
use crate::ids::{SpeciesId, VariantId};
use crate::projection::BaseStats;
use crate::species::{variant_display_name, Species, Variant, NORMAL_FORM};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Immutable species/forms/evolution graph.
///
/// # Examples
///
/// ```rust
/// use ivdex::SpeciesGraph;
///
/// let json = r#"[
///   { "number": 10, "family": "CATERPIE", "name": "CATERPIE", "candy": 12,
///     "forms": [{ "form": "NORMAL", "baseAttack": 55, "baseDefense": 55, "baseStamina": 128 }] },
///   { "number": 11, "family": "CATERPIE", "name": "METAPOD", "candy": 50, "devolution": 10,
///     "forms": [{ "form": "NORMAL", "baseAttack": 45, "baseDefense": 80, "baseStamina": 137,
///                 "devolution": ["NORMAL"] }] },
///   { "number": 12, "family": "CATERPIE", "name": "BUTTERFREE", "devolution": 11,
///     "forms": [{ "form": "NORMAL", "baseAttack": 167, "baseDefense": 137, "baseStamina": 155,
///                 "devolution": ["NORMAL"] }] }
/// ]"#;
///
/// let graph = SpeciesGraph::from_json(json).unwrap();
/// let caterpie = graph.species_by_number(10).unwrap().normal_form();
/// let butterfree = graph.species_by_number(12).unwrap().normal_form();
///
/// assert_eq!(graph.candy_cost(caterpie, butterfree), 62);
/// assert_eq!(graph.evolution_line(butterfree).len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SpeciesGraph {
    /// Species in data order.
    species: Vec<Species>,

    /// Position of each species in `species`.
    index: HashMap<SpeciesId, usize>,

    /// All forms of all species, in data order.
    variants: Vec<Variant>,
}

impl SpeciesGraph {
    /// Decode species data from JSON and build the graph.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let entries = parse_entries(json)?;
        Self::build(entries)
    }

    /// Build the graph from species entries.
    ///
    /// Fails without producing a graph if any entry is malformed, refers to
    /// a species that doesn't exist, or if the devolution links form a
    /// cycle.
    pub fn build(entries: Vec<SpeciesEntry>) -> Result<Self, GraphError> {
        // A family with any multi-form member shows form names for all members.
        let multiple_form_families: HashSet<&str> = entries
            .iter()
            .filter(|entry| entry.forms.len() > 1)
            .map(|entry| entry.family.as_str())
            .collect();

        let mut species: Vec<Species> = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());
        let mut variants: Vec<Variant> = Vec::new();

        for entry in &entries {
            let id = entry.id();
            if index.contains_key(&id) {
                return Err(GraphError::DuplicateSpecies(id));
            }
            if entry.forms.is_empty() {
                return Err(GraphError::NoForms(id));
            }
            let normal_count = entry
                .forms
                .iter()
                .filter(|form| form.form == NORMAL_FORM)
                .count();
            let normal_pos = match entry.forms.iter().position(|form| form.form == NORMAL_FORM) {
                Some(pos) if normal_count == 1 => pos,
                _ => {
                    return Err(GraphError::NormalFormCount {
                        species: id,
                        count: normal_count,
                    })
                }
            };

            let multiple = multiple_form_families.contains(entry.family.as_str());
            let display_name = entry
                .display_name
                .clone()
                .unwrap_or_else(|| entry.name.clone());

            let first_variant = variants.len();
            let mut forms = Vec::with_capacity(entry.forms.len());
            for form in &entry.forms {
                let variant_id = VariantId(variants.len());
                let form_name = form.form_name.clone().unwrap_or_else(|| form.form.clone());
                variants.push(Variant {
                    id: variant_id,
                    species: id,
                    display_name: variant_display_name(&display_name, &form_name, multiple),
                    form_name,
                    internal_form_name: form.form.clone(),
                    base: BaseStats::new(form.base_attack, form.base_defense, form.base_stamina),
                    types: form.types.clone(),
                    candy_to_evolve: entry.candy,
                    evolutions: Vec::new(),
                    devolutions: Vec::new(),
                });
                forms.push(variant_id);
            }

            index.insert(id, species.len());
            species.push(Species {
                id,
                family: entry.family.clone(),
                internal_name: entry.name.clone(),
                display_name,
                candy_to_evolve: entry.candy,
                has_multiple_forms: multiple,
                devolution: None,
                evolutions: Vec::new(),
                forms,
                normal_form: VariantId(first_variant + normal_pos),
            });
        }

        let mut dag = EvolutionDag::new();
        for (child_idx, entry) in entries.iter().enumerate() {
            let child_id = entry.id();
            dag.add_node(child_id);

            let Some(devolution) = entry.devolution.map(SpeciesId) else {
                continue;
            };
            let parent_idx = *index
                .get(&devolution)
                .ok_or(GraphError::UnknownDevolution {
                    species: child_id,
                    devolution,
                })?;

            species[child_idx].devolution = Some(devolution);
            species[parent_idx].evolutions.push(child_id);
            dag.add_edge(devolution, child_id);

            // Form-level edges only where the child form names the parent form.
            for (form, &child_variant) in entry.forms.iter().zip(&species[child_idx].forms) {
                for &parent_variant in &species[parent_idx].forms {
                    let parent_key = &variants[parent_variant.0].internal_form_name;
                    if form.devolution.iter().any(|key| key == parent_key) {
                        variants[child_variant.0].devolutions.push(parent_variant);
                        variants[parent_variant.0].evolutions.push(child_variant);
                    }
                }
            }
        }

        dag.detect_cycles()?;

        debug!(
            species = species.len(),
            variants = variants.len(),
            evolution_edges = dag.edge_count(),
            evolution_trees = dag.roots().len(),
            "built species graph"
        );

        Ok(Self {
            species,
            index,
            variants,
        })
    }

    /// Look up a species.
    pub fn try_species(&self, id: SpeciesId) -> Option<&Species> {
        self.index.get(&id).map(|&idx| &self.species[idx])
    }

    /// Look up a species.
    ///
    /// # Panics
    ///
    /// Panics if the species is not in the graph.
    pub fn species(&self, id: SpeciesId) -> &Species {
        self.try_species(id)
            .unwrap_or_else(|| panic!("species {id} is not in the graph"))
    }

    /// Look up a species by its pokedex number.
    pub fn species_by_number(&self, number: u32) -> Option<&Species> {
        self.try_species(SpeciesId(number))
    }

    /// Look up a variant.
    pub fn try_variant(&self, id: VariantId) -> Option<&Variant> {
        self.variants.get(id.0)
    }

    /// Look up a variant.
    ///
    /// # Panics
    ///
    /// Panics if the id was not minted by this graph.
    pub fn variant(&self, id: VariantId) -> &Variant {
        self.try_variant(id)
            .unwrap_or_else(|| panic!("{id} is not in the graph"))
    }

    /// The species a variant belongs to.
    pub fn species_of(&self, variant: VariantId) -> &Species {
        self.species(self.variant(variant).species)
    }

    /// All species, in data order.
    pub fn pokedex(&self) -> &[Species] {
        &self.species
    }

    /// All variants, in data order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Species whose name is printed on their family's candy.
    pub fn candy_species(&self) -> impl Iterator<Item = &Species> {
        self.species.iter().filter(|species| species.is_candy_species())
    }

    /// Display name of every variant, in variant order.
    pub fn variant_names(&self) -> Vec<&str> {
        self.variants
            .iter()
            .map(|variant| variant.display_name())
            .collect()
    }

    /// The form of `species` with the given (display) form name.
    pub fn form_by_name(&self, species: SpeciesId, form_name: &str) -> Option<&Variant> {
        self.try_species(species)?
            .forms
            .iter()
            .map(|&id| self.variant(id))
            .find(|variant| variant.form_name == form_name)
    }

    /// The root of the evolution tree `species` belongs to.
    pub fn lowest_evolution(&self, species: SpeciesId) -> SpeciesId {
        let mut current = self.species(species);
        while let Some(devolution) = current.devolution {
            current = self.species(devolution);
        }
        current.id
    }

    /// Number of evolution steps between `species` and its root.
    ///
    /// A species with no devolution has depth 0.
    pub fn evolution_depth(&self, species: SpeciesId) -> usize {
        match self.species(species).devolution {
            Some(devolution) => self.evolution_depth(devolution) + 1,
            None => 0,
        }
    }

    /// The form-level evolution line containing `variant`.
    ///
    /// Devolutions come first, furthest ancestor first, then the variant,
    /// then its evolutions: all direct evolutions in data order, followed
    /// by the evolutions of each of them in turn.
    pub fn evolution_line(&self, variant: VariantId) -> Vec<VariantId> {
        let mut line = Vec::new();
        self.prepend_devolutions(variant, &mut line);
        line.push(variant);
        self.append_evolutions(variant, &mut line);
        line
    }

    fn prepend_devolutions(&self, variant: VariantId, line: &mut Vec<VariantId>) {
        let devolutions = &self.variant(variant).devolutions;
        line.splice(0..0, devolutions.iter().copied());
        for &devolution in devolutions {
            self.prepend_devolutions(devolution, line);
        }
    }

    fn append_evolutions(&self, variant: VariantId, line: &mut Vec<VariantId>) {
        let evolutions = &self.variant(variant).evolutions;
        line.extend(evolutions.iter().copied());
        for &evolution in evolutions {
            self.append_evolutions(evolution, line);
        }
    }

    /// The species-level evolution line of `species`.
    ///
    /// Starts at the lowest evolution, then lists each direct evolution
    /// followed by that evolution's own evolutions. Only two stages past
    /// the root are expanded.
    pub fn species_evolution_line(&self, species: SpeciesId) -> Vec<SpeciesId> {
        let root = self.species(self.lowest_evolution(species));

        let mut line = vec![root.id];
        for &second in &root.evolutions {
            line.push(second);
            line.extend(self.species(second).evolutions.iter().copied());
        }
        line
    }

    /// Every form of every species in the species-level evolution line.
    pub fn evolution_forms(&self, variant: VariantId) -> Vec<VariantId> {
        self.species_evolution_line(self.variant(variant).species)
            .into_iter()
            .flat_map(|species| self.species(species).forms.iter().copied())
            .collect()
    }

    /// Whether `candidate` is a direct form-level evolution of `of`.
    pub fn is_next_evolution_of(&self, candidate: VariantId, of: VariantId) -> bool {
        self.variant(of).evolutions.contains(&candidate)
    }

    /// Whether both variants belong to the same species-level evolution line.
    pub fn in_same_evolution_chain(&self, a: VariantId, b: VariantId) -> bool {
        let other = self.variant(b).species;
        self.species_evolution_line(self.variant(a).species)
            .contains(&other)
    }

    /// Total candy to evolve `start` into `end`.
    ///
    /// Walks down from `end`'s species through its devolutions, adding the
    /// candy cost of each species passed through, until reaching the
    /// species that owns `start`. Returns 0 when `start` is not found below
    /// `end`; that 0 means "no evolution path", not "free".
    pub fn candy_cost(&self, start: VariantId, end: VariantId) -> u32 {
        let mut cost = 0;
        let mut current = self.species_of(end);
        while !current.has_form(start) {
            let Some(devolution) = current.devolution else {
                debug!(%start, %end, "no evolution path between variants, candy cost is 0");
                return 0;
            };
            current = self.species(devolution);
            cost += current.candy_to_evolve;
        }
        cost
    }
}
