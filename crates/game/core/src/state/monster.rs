//! Monster instances.

use std::fmt;
use std::sync::Arc;

use crate::stats::{FormulaError, StatKind, StatMode};

use super::species::SpeciesDescriptor;

/// A single monster: species reference plus mutable level and HP.
///
/// HP is signed. A monster may sit at or below zero between taking a hit and
/// being removed from play; only the sign matters ([`Monster::alive`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    species: Arc<SpeciesDescriptor>,
    mode: StatMode,
    level: u32,
    original_level: u32,
    hp: i64,
}

impl Monster {
    /// Spawns a monster at level 1 with full HP.
    pub fn new(species: Arc<SpeciesDescriptor>, mode: StatMode) -> Result<Self, FormulaError> {
        Self::at_level(species, mode, 1)
    }

    /// Spawns a monster at `level` with full HP. Its original level is `level`.
    pub fn at_level(
        species: Arc<SpeciesDescriptor>,
        mode: StatMode,
        level: u32,
    ) -> Result<Self, FormulaError> {
        let level = level.max(1);
        let mut monster = Self {
            species,
            mode,
            level,
            original_level: level,
            hp: 0,
        };
        monster.hp = monster.max_hp()?;
        Ok(monster)
    }

    pub fn species(&self) -> &Arc<SpeciesDescriptor> {
        &self.species
    }

    pub fn name(&self) -> &str {
        self.species.name()
    }

    pub fn mode(&self) -> StatMode {
        self.mode
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn original_level(&self) -> u32 {
        self.original_level
    }

    pub fn hp(&self) -> i64 {
        self.hp
    }

    /// Subtracts `amount` from HP. HP may become negative.
    pub fn take_damage(&mut self, amount: i64) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn stat(&self, kind: StatKind) -> Result<i64, FormulaError> {
        self.species.provider(self.mode).get(kind, self.level)
    }

    pub fn attack(&self) -> Result<i64, FormulaError> {
        self.stat(StatKind::Attack)
    }

    pub fn defense(&self) -> Result<i64, FormulaError> {
        self.stat(StatKind::Defense)
    }

    pub fn speed(&self) -> Result<i64, FormulaError> {
        self.stat(StatKind::Speed)
    }

    pub fn max_hp(&self) -> Result<i64, FormulaError> {
        self.stat(StatKind::MaxHp)
    }

    pub fn alive(&self) -> bool {
        self.hp > 0
    }

    /// Damage taken so far at the current level.
    pub fn damage_taken(&self) -> Result<i64, FormulaError> {
        Ok(self.max_hp()? - self.hp)
    }

    /// Gains one level, keeping the absolute damage taken.
    ///
    /// Max HP is assumed non-decreasing in level. The result is still capped
    /// at the new maximum so a non-monotonic formula cannot break the HP
    /// invariant.
    pub fn level_up(&mut self) -> Result<(), FormulaError> {
        let damage = self.damage_taken()?;
        self.level += 1;
        let max_hp = self.max_hp()?;
        self.hp = (max_hp - damage).min(max_hp);
        Ok(())
    }

    pub fn ready_to_evolve(&self) -> bool {
        self.level != self.original_level && self.species.evolution().is_some()
    }

    /// Consumes this monster and returns its evolved form.
    ///
    /// The evolved monster keeps the level and the absolute damage taken, and
    /// its original level is the evolution level. A species without an
    /// evolution target returns the monster unchanged.
    pub fn evolve(self) -> Result<Self, FormulaError> {
        let Some(target) = self.species.evolution().cloned() else {
            return Ok(self);
        };
        let damage = self.damage_taken()?;
        let mut evolved = Self::at_level(target, self.mode, self.level)?;
        let max_hp = evolved.hp;
        evolved.hp = (max_hp - damage).min(max_hp);
        Ok(evolved)
    }

    /// Resets to level 1 with full HP.
    pub fn restore(&mut self) -> Result<(), FormulaError> {
        self.level = 1;
        self.original_level = 1;
        self.hp = self.max_hp()?;
        Ok(())
    }
}

impl fmt::Display for Monster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LV.{} {}, {} HP", self.level, self.name(), self.hp)
    }
}
