//! Species catalog oracle.
//!
//! The catalog is the read-only source of every species a roster can spawn or
//! a monster can evolve into. [`SpeciesCatalog`] resolves serializable
//! [`SpeciesSpec`] records into shared [`SpeciesDescriptor`]s, linking each
//! evolution target by reference.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{SpeciesDescriptor, SpeciesSpec};
use crate::stats::FormulaError;

/// Read-only access to species definitions.
pub trait SpeciesOracle: Send + Sync {
    /// Returns the species with the given name, if known.
    fn species(&self, name: &str) -> Option<Arc<SpeciesDescriptor>>;

    /// Returns every species in catalog order.
    fn all_species(&self) -> &[Arc<SpeciesDescriptor>];

    /// Returns the species that may appear on a freshly selected roster.
    fn spawnable(&self) -> Vec<Arc<SpeciesDescriptor>> {
        self.all_species()
            .iter()
            .filter(|species| species.can_be_spawned())
            .cloned()
            .collect()
    }
}

/// Errors raised while resolving a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("species '{0}' is defined more than once")]
    DuplicateSpecies(String),

    #[error("species '{species}' evolves into unknown species '{target}'")]
    UnknownEvolution { species: String, target: String },

    #[error("evolution chain of species '{0}' loops back on itself")]
    EvolutionCycle(String),

    #[error("species '{species}' has a malformed {stat} formula: {source}")]
    Formula {
        species: String,
        stat: crate::stats::StatKind,
        #[source]
        source: FormulaError,
    },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateSpecies(_) => "CATALOG_DUPLICATE_SPECIES",
            Self::UnknownEvolution { .. } => "CATALOG_UNKNOWN_EVOLUTION",
            Self::EvolutionCycle(_) => "CATALOG_EVOLUTION_CYCLE",
            Self::Formula { .. } => "CATALOG_FORMULA",
        }
    }
}

/// In-memory species catalog.
#[derive(Clone, Debug, Default)]
pub struct SpeciesCatalog {
    species: Vec<Arc<SpeciesDescriptor>>,
    by_name: HashMap<String, usize>,
}

impl SpeciesCatalog {
    /// Resolves a list of specs into a catalog.
    ///
    /// Fails on duplicate names, unknown or cyclic evolution targets and on
    /// complex-stat formulas with a malformed stack shape.
    pub fn new(specs: Vec<SpeciesSpec>) -> Result<Self, CatalogError> {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            if index.insert(spec.name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateSpecies(spec.name.clone()));
            }
            validate_formulas(spec)?;
        }

        let mut resolved: Vec<Option<Arc<SpeciesDescriptor>>> = vec![None; specs.len()];
        for i in 0..specs.len() {
            let mut visiting = Vec::new();
            resolve(i, &specs, &index, &mut resolved, &mut visiting)?;
        }

        let species = resolved.into_iter().flatten().collect();
        Ok(Self {
            species,
            by_name: index,
        })
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl SpeciesOracle for SpeciesCatalog {
    fn species(&self, name: &str) -> Option<Arc<SpeciesDescriptor>> {
        self.by_name
            .get(name)
            .and_then(|&i| self.species.get(i))
            .cloned()
    }

    fn all_species(&self) -> &[Arc<SpeciesDescriptor>] {
        &self.species
    }
}

fn validate_formulas(spec: &SpeciesSpec) -> Result<(), CatalogError> {
    use strum::IntoEnumIterator;

    for stat in crate::stats::StatKind::iter() {
        spec.complex_stats
            .formula(stat)
            .validate()
            .map_err(|source| CatalogError::Formula {
                species: spec.name.clone(),
                stat,
                source,
            })?;
    }
    Ok(())
}

/// Resolves spec `i`, resolving its evolution chain first.
fn resolve(
    i: usize,
    specs: &[SpeciesSpec],
    index: &HashMap<String, usize>,
    resolved: &mut [Option<Arc<SpeciesDescriptor>>],
    visiting: &mut Vec<usize>,
) -> Result<Arc<SpeciesDescriptor>, CatalogError> {
    if let Some(done) = &resolved[i] {
        return Ok(done.clone());
    }
    let spec = &specs[i];
    if visiting.contains(&i) {
        return Err(CatalogError::EvolutionCycle(spec.name.clone()));
    }
    visiting.push(i);

    let evolution = match &spec.evolution {
        Some(target) => {
            let &target_index =
                index
                    .get(target)
                    .ok_or_else(|| CatalogError::UnknownEvolution {
                        species: spec.name.clone(),
                        target: target.clone(),
                    })?;
            Some(resolve(target_index, specs, index, resolved, visiting)?)
        }
        None => None,
    };

    visiting.pop();
    let descriptor = Arc::new(SpeciesDescriptor::from_spec(spec, evolution));
    resolved[i] = Some(descriptor.clone());
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Element;
    use crate::stats::StatBlock;

    fn spec(name: &str) -> SpeciesSpec {
        SpeciesSpec::fixed(name, &[Element::Water], StatBlock::new(4, 4, 4, 20))
    }

    #[test]
    fn links_evolution_chain() {
        let catalog = SpeciesCatalog::new(vec![
            spec("Aquariuma").with_evolution("Marititan"),
            spec("Marititan").with_evolution("Leviatitan").spawnable(false),
            spec("Leviatitan").spawnable(false),
        ])
        .unwrap();

        let base = catalog.species("Aquariuma").unwrap();
        let middle = base.evolution().unwrap();
        assert_eq!(middle.name(), "Marititan");
        assert_eq!(middle.evolution().unwrap().name(), "Leviatitan");
        assert!(Arc::ptr_eq(middle, &catalog.species("Marititan").unwrap()));
    }

    #[test]
    fn keeps_catalog_order() {
        let catalog = SpeciesCatalog::new(vec![
            spec("Gustwing").with_evolution("Stormeagle"),
            spec("Stormeagle").spawnable(false),
            spec("Frostbite"),
        ])
        .unwrap();
        let names: Vec<&str> = catalog.all_species().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["Gustwing", "Stormeagle", "Frostbite"]);
        let spawnable: Vec<String> = catalog
            .spawnable()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(spawnable, ["Gustwing", "Frostbite"]);
    }

    #[test]
    fn rejects_duplicates() {
        let err = SpeciesCatalog::new(vec![spec("Vineon"), spec("Vineon")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateSpecies("Vineon".into()));
    }

    #[test]
    fn rejects_unknown_evolution() {
        let err = SpeciesCatalog::new(vec![spec("Vineon").with_evolution("Nowhere")]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownEvolution { .. }));
    }

    #[test]
    fn rejects_cycles() {
        let err = SpeciesCatalog::new(vec![
            spec("Ouroboros").with_evolution("Serpent"),
            spec("Serpent").with_evolution("Ouroboros"),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::EvolutionCycle(_)));
        assert_eq!(err.error_code(), "CATALOG_EVOLUTION_CYCLE");
    }

    #[test]
    fn rejects_malformed_formulas() {
        let mut bad = spec("Glitch");
        bad.complex_stats.defense = "level +".parse().unwrap();
        let err = SpeciesCatalog::new(vec![bad]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Formula {
                stat: crate::stats::StatKind::Defense,
                ..
            }
        ));
    }
}
