//! Stat sources for monsters.
//!
//! Every species carries two stat sources. Simple mode reads a fixed
//! [`StatBlock`]; complex mode evaluates a [`FormulaStats`] set against the
//! monster's current level. [`StatProvider`] is the borrowed view a monster
//! dispatches through.

use super::formula::{Formula, FormulaError};

/// The four stats every monster exposes.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
    MaxHp,
}

/// Which of its species' stat sources a monster reads.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatMode {
    /// Fixed values regardless of level.
    #[default]
    Simple,
    /// Level-parameterized formulas.
    Complex,
}

/// Fixed stat values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub max_hp: i64,
}

impl StatBlock {
    pub const fn new(attack: i64, defense: i64, speed: i64, max_hp: i64) -> Self {
        Self {
            attack,
            defense,
            speed,
            max_hp,
        }
    }

    pub const fn get(&self, kind: StatKind) -> i64 {
        match kind {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::MaxHp => self.max_hp,
        }
    }
}

/// One postfix formula per stat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaStats {
    pub attack: Formula,
    pub defense: Formula,
    pub speed: Formula,
    pub max_hp: Formula,
}

impl FormulaStats {
    pub fn new(attack: Formula, defense: Formula, speed: Formula, max_hp: Formula) -> Self {
        Self {
            attack,
            defense,
            speed,
            max_hp,
        }
    }

    /// Formulas that ignore the level and reproduce a fixed block.
    pub fn from_block(block: &StatBlock) -> Self {
        Self::new(
            Formula::constant(block.attack),
            Formula::constant(block.defense),
            Formula::constant(block.speed),
            Formula::constant(block.max_hp),
        )
    }

    pub fn formula(&self, kind: StatKind) -> &Formula {
        match kind {
            StatKind::Attack => &self.attack,
            StatKind::Defense => &self.defense,
            StatKind::Speed => &self.speed,
            StatKind::MaxHp => &self.max_hp,
        }
    }

    /// Static stack-shape check of all four formulas.
    pub fn validate(&self) -> Result<(), FormulaError> {
        self.attack.validate()?;
        self.defense.validate()?;
        self.speed.validate()?;
        self.max_hp.validate()
    }
}

/// Borrowed stat source selected by a monster's [`StatMode`].
#[derive(Clone, Copy, Debug)]
pub enum StatProvider<'a> {
    Fixed(&'a StatBlock),
    Formula(&'a FormulaStats),
}

impl StatProvider<'_> {
    /// Resolves one stat. The level is only consulted by formulas.
    pub fn get(&self, kind: StatKind, level: u32) -> Result<i64, FormulaError> {
        match self {
            Self::Fixed(block) => Ok(block.get(kind)),
            Self::Formula(formulas) => formulas.formula(kind).evaluate(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn growth() -> FormulaStats {
        FormulaStats::new(
            "level 2 * 5 +".parse().unwrap(),
            "level 3 +".parse().unwrap(),
            "7".parse().unwrap(),
            "level 10 * 40 +".parse().unwrap(),
        )
    }

    #[test]
    fn fixed_ignores_level() {
        let block = StatBlock::new(5, 4, 3, 20);
        let provider = StatProvider::Fixed(&block);
        for kind in StatKind::iter() {
            assert_eq!(provider.get(kind, 1), provider.get(kind, 50));
        }
        assert_eq!(provider.get(StatKind::MaxHp, 9), Ok(20));
    }

    #[test]
    fn formula_tracks_level() {
        let stats = growth();
        let provider = StatProvider::Formula(&stats);
        assert_eq!(provider.get(StatKind::Attack, 1), Ok(7));
        assert_eq!(provider.get(StatKind::Attack, 4), Ok(13));
        assert_eq!(provider.get(StatKind::MaxHp, 2), Ok(60));
        assert_eq!(provider.get(StatKind::Speed, 99), Ok(7));
    }

    #[test]
    fn from_block_matches_fixed() {
        let block = StatBlock::new(9, 2, 11, 33);
        let stats = FormulaStats::from_block(&block);
        for kind in StatKind::iter() {
            assert_eq!(
                StatProvider::Formula(&stats).get(kind, 3),
                Ok(block.get(kind))
            );
        }
    }

    #[test]
    fn validate_reports_first_bad_formula() {
        let mut stats = growth();
        assert!(stats.validate().is_ok());
        stats.speed = "1 2".parse().unwrap();
        assert_eq!(
            stats.validate(),
            Err(FormulaError::LeftoverStack { depth: 2 })
        );
    }
}
