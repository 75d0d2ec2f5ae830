//! Roster selection strategies.
//!
//! A roster is populated exactly once, by one strategy:
//! - **Random**: uniform draws over spawnable species, team size uniform in
//!   `1..=TEAM_LIMIT`
//! - **Provided**: an explicit ordered list of species names
//! - **Manual**: interactive prompting, not supported by the core

use crate::config::GameConfig;
use crate::env::{RngOracle, SpeciesOracle};
use crate::stats::StatMode;

use super::roster::{Roster, RosterError, SortKey, TeamMode};

/// Selection strategy tag.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SelectionMode {
    Random,
    Manual,
    Provided,
}

impl SelectionMode {
    pub fn from_tag(tag: &str) -> Result<Self, RosterError> {
        tag.parse().map_err(|_| {
            RosterError::InvalidConfiguration(format!("selection mode '{tag}' not supported"))
        })
    }
}

/// How a new roster picks its members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Random,
    Manual,
    Provided(Vec<String>),
}

impl Selection {
    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Random => SelectionMode::Random,
            Self::Manual => SelectionMode::Manual,
            Self::Provided(_) => SelectionMode::Provided,
        }
    }
}

/// Everything a roster needs besides the selection itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosterSpec {
    pub mode: TeamMode,
    pub sort_key: Option<SortKey>,
    pub stat_mode: StatMode,
}

impl RosterSpec {
    pub fn new(mode: TeamMode) -> Self {
        Self {
            mode,
            sort_key: None,
            stat_mode: StatMode::default(),
        }
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub fn stat_mode(mut self, stat_mode: StatMode) -> Self {
        self.stat_mode = stat_mode;
        self
    }
}

impl Roster {
    /// Builds a roster using one selection strategy.
    pub fn select(
        spec: RosterSpec,
        selection: &Selection,
        catalog: &dyn SpeciesOracle,
        rng: &mut dyn RngOracle,
    ) -> Result<Self, RosterError> {
        match selection {
            Selection::Random => Self::random(spec, catalog, rng),
            Selection::Provided(names) => Self::provided(spec, names, catalog),
            Selection::Manual => Err(RosterError::InvalidConfiguration(
                "manual selection requires interactive input and is not supported".to_string(),
            )),
        }
    }

    /// Random team: size uniform in `1..=TEAM_LIMIT`, each member drawn
    /// uniformly from the spawnable species.
    pub fn random(
        spec: RosterSpec,
        catalog: &dyn SpeciesOracle,
        rng: &mut dyn RngOracle,
    ) -> Result<Self, RosterError> {
        let mut roster = Self::new(spec.mode, spec.sort_key)?;
        let spawnable = catalog.spawnable();
        if spawnable.is_empty() {
            return Err(RosterError::InvalidConfiguration(
                "catalog has no spawnable species".to_string(),
            ));
        }

        let team_size = rng.range(1, GameConfig::TEAM_LIMIT as u32);
        for _ in 0..team_size {
            let species = spawnable[rng.index(spawnable.len())].clone();
            roster.enlist(species, spec.stat_mode)?;
        }
        Ok(roster)
    }

    /// Team built from species names, added in the given order.
    pub fn provided<S: AsRef<str>>(
        spec: RosterSpec,
        names: &[S],
        catalog: &dyn SpeciesOracle,
    ) -> Result<Self, RosterError> {
        if names.is_empty() {
            return Err(RosterError::InvalidConfiguration(
                "no provided monsters".to_string(),
            ));
        }

        let mut roster = Self::new(spec.mode, spec.sort_key)?;
        for name in names {
            let name = name.as_ref();
            let species = catalog
                .species(name)
                .ok_or_else(|| RosterError::UnknownSpecies(name.to_string()))?;
            if !species.can_be_spawned() {
                return Err(RosterError::InvalidConfiguration(format!(
                    "species '{name}' cannot be spawned"
                )));
            }
            roster.enlist(species, spec.stat_mode)?;
        }
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, SpeciesCatalog};
    use crate::state::species::{Element, SpeciesSpec};
    use crate::stats::StatBlock;

    fn catalog() -> SpeciesCatalog {
        SpeciesCatalog::new(vec![
            SpeciesSpec::fixed("Flamikin", &[Element::Fire], StatBlock::new(6, 4, 3, 8))
                .with_evolution("Infernoth"),
            SpeciesSpec::fixed("Infernoth", &[Element::Fire], StatBlock::new(12, 8, 7, 15))
                .spawnable(false),
            SpeciesSpec::fixed("Aquariuma", &[Element::Water], StatBlock::new(5, 6, 2, 8)),
            SpeciesSpec::fixed("Gustwing", &[Element::Flying], StatBlock::new(4, 2, 8, 6)),
        ])
        .unwrap()
    }

    fn names(roster: &Roster) -> Vec<String> {
        roster.iter().map(|m| m.name().to_string()).collect()
    }

    #[test]
    fn provided_front_reverses_order() {
        let roster = Roster::provided(
            RosterSpec::new(TeamMode::Front),
            &["Flamikin", "Aquariuma", "Gustwing"],
            &catalog(),
        )
        .unwrap();
        assert_eq!(names(&roster), ["Gustwing", "Aquariuma", "Flamikin"]);
        assert_eq!(roster.lineup().len(), 3);
    }

    #[test]
    fn provided_back_keeps_order() {
        let roster = Roster::provided(
            RosterSpec::new(TeamMode::Back),
            &["Flamikin", "Aquariuma", "Gustwing"],
            &catalog(),
        )
        .unwrap();
        assert_eq!(names(&roster), ["Flamikin", "Aquariuma", "Gustwing"]);
    }

    #[test]
    fn provided_optimise_sorts_by_key() {
        let roster = Roster::provided(
            RosterSpec::new(TeamMode::Optimise).sorted_by(SortKey::Speed),
            &["Flamikin", "Aquariuma", "Gustwing"],
            &catalog(),
        )
        .unwrap();
        assert_eq!(names(&roster), ["Gustwing", "Flamikin", "Aquariuma"]);
    }

    #[test]
    fn provided_rejects_bad_names() {
        let catalog = catalog();
        let spec = RosterSpec::new(TeamMode::Back);
        assert_eq!(
            Roster::provided(spec, &["Missingno"], &catalog).unwrap_err(),
            RosterError::UnknownSpecies("Missingno".into())
        );
        assert!(matches!(
            Roster::provided(spec, &["Infernoth"], &catalog),
            Err(RosterError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Roster::provided::<&str>(spec, &[], &catalog),
            Err(RosterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn provided_rejects_oversized_teams() {
        let names = ["Flamikin"; 7];
        assert_eq!(
            Roster::provided(RosterSpec::new(TeamMode::Back), &names, &catalog()).unwrap_err(),
            RosterError::RosterFull { capacity: 6 }
        );
    }

    #[test]
    fn random_selection_is_seeded_and_spawnable() {
        let catalog = catalog();
        let spec = RosterSpec::new(TeamMode::Back);
        for seed in 0..50 {
            let a = Roster::random(spec, &catalog, &mut PcgRng::new(seed)).unwrap();
            let b = Roster::random(spec, &catalog, &mut PcgRng::new(seed)).unwrap();
            assert_eq!(names(&a), names(&b));
            assert!((1..=6).contains(&a.len()));
            assert!(a.iter().all(|m| m.species().can_be_spawned()));
            assert_eq!(a.lineup().len(), a.len());
        }
    }

    #[test]
    fn manual_selection_is_unsupported() {
        let err = Roster::select(
            RosterSpec::new(TeamMode::Back),
            &Selection::Manual,
            &catalog(),
            &mut PcgRng::new(1),
        )
        .unwrap_err();
        assert!(matches!(err, RosterError::InvalidConfiguration(_)));
        assert!(SelectionMode::from_tag("telepathic").is_err());
        assert_eq!(SelectionMode::from_tag("provided"), Ok(SelectionMode::Provided));
    }

    #[test]
    fn regenerate_rebuilds_from_lineup() {
        let catalog = catalog();
        let mut roster = Roster::provided(
            RosterSpec::new(TeamMode::Front),
            &["Flamikin", "Aquariuma"],
            &catalog,
        )
        .unwrap();

        let mut out = roster.retrieve().unwrap();
        out.take_damage(3);
        out.level_up().unwrap();
        let evolved = roster.retrieve().unwrap().evolve().unwrap();
        drop((out, evolved));
        assert!(roster.is_empty());

        roster.regenerate().unwrap();
        assert_eq!(names(&roster), ["Aquariuma", "Flamikin"]);
        assert!(roster.iter().all(|m| m.level() == 1 && Ok(m.hp()) == m.max_hp()));
    }
}
