//! Species catalog loader.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tower_core::{SpeciesCatalog, SpeciesSpec};

use crate::loaders::{LoadResult, read_file};

/// Species catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesFile {
    pub species: Vec<SpeciesSpec>,
}

/// Loader for species catalogs from RON files.
pub struct SpeciesLoader;

impl SpeciesLoader {
    /// Load and resolve a species catalog from a RON file.
    ///
    /// Evolution targets are resolved and every complex-stat formula is
    /// checked for a well-formed stack shape before the catalog is returned.
    pub fn load(path: &Path) -> LoadResult<SpeciesCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in species catalog {}", path.display()))
    }

    /// Parse and resolve a species catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<SpeciesCatalog> {
        let file: SpeciesFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species catalog RON: {}", e))?;
        let catalog = SpeciesCatalog::new(file.species).context("Invalid species catalog")?;
        Ok(catalog)
    }
}

/// The compiled-in species catalog.
pub fn builtin_catalog() -> LoadResult<SpeciesCatalog> {
    SpeciesLoader::parse(crate::BUILTIN_SPECIES)
}

#[cfg(test)]
mod tests {
    use tower_core::{Element, Monster, SpeciesOracle, StatMode};

    use super::*;

    #[test]
    fn builtin_catalog_resolves() {
        let catalog = builtin_catalog().unwrap();
        assert!(!catalog.spawnable().is_empty());

        let flamikin = catalog.species("Flamikin").unwrap();
        assert!(flamikin.elements().has(Element::Fire));
        let chain: Vec<&str> = std::iter::successors(Some(&flamikin), |s| s.evolution())
            .map(|s| s.name())
            .collect();
        assert_eq!(chain, ["Flamikin", "Infernoth", "Infernox"]);
    }

    #[test]
    fn builtin_stats_are_sane_in_both_modes() {
        let catalog = builtin_catalog().unwrap();
        for species in catalog.all_species() {
            for mode in [StatMode::Simple, StatMode::Complex] {
                let mut monster = Monster::new(species.clone(), mode).unwrap();
                for _ in 0..20 {
                    let before = monster.max_hp().unwrap();
                    assert!(before > 0, "{} has no health", species.name());
                    monster.level_up().unwrap();
                    assert!(monster.max_hp().unwrap() >= before);
                }
            }
        }
    }

    #[test]
    fn evolved_forms_are_not_spawnable() {
        let catalog = builtin_catalog().unwrap();
        for species in catalog.all_species() {
            if let Some(target) = species.evolution() {
                assert!(!target.can_be_spawned(), "{} is spawnable", target.name());
            }
        }
    }

    #[test]
    fn rejects_malformed_formula() {
        let content = r#"(
            species: [(
                name: "Glitch",
                elements: [normal],
                spawnable: true,
                simple_stats: (attack: 1, defense: 1, speed: 1, max_hp: 1),
                complex_stats: (attack: "1", defense: "1", speed: "1 +", max_hp: "1"),
            )],
        )"#;
        let err = SpeciesLoader::parse(content).unwrap_err();
        assert!(format!("{err:#}").contains("speed"));
    }

    #[test]
    fn rejects_unknown_evolution() {
        let content = r#"(
            species: [(
                name: "Orphan",
                elements: [normal],
                spawnable: true,
                evolution: Some("Nobody"),
                simple_stats: (attack: 1, defense: 1, speed: 1, max_hp: 1),
                complex_stats: (attack: "1", defense: "1", speed: "1", max_hp: "1"),
            )],
        )"#;
        let err = SpeciesLoader::parse(content).unwrap_err();
        assert!(format!("{err:#}").contains("Nobody"));
    }
}
