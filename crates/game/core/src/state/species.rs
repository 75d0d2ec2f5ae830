//! Species identity.
//!
//! A species is data, not a type: every monster points at a shared
//! [`SpeciesDescriptor`] that carries its name, elements, spawnability,
//! evolution target and both stat sources.

use std::sync::Arc;

use bitflags::bitflags;

use crate::stats::{FormulaStats, StatBlock, StatMode, StatProvider};

/// Elemental affinity of a species.
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
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    Fire,
    Water,
    Grass,
    Bug,
    Dragon,
    Electric,
    Fighting,
    Flying,
    Ghost,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Fairy,
    Dark,
    Steel,
}

impl Element {
    /// The single-bit set for this element.
    pub const fn flag(self) -> ElementSet {
        ElementSet::from_bits_truncate(1 << self as u32)
    }
}

bitflags! {
    /// Set of elements, one bit per [`Element`] in declaration order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ElementSet: u32 {
        const FIRE     = 1 << 0;
        const WATER    = 1 << 1;
        const GRASS    = 1 << 2;
        const BUG      = 1 << 3;
        const DRAGON   = 1 << 4;
        const ELECTRIC = 1 << 5;
        const FIGHTING = 1 << 6;
        const FLYING   = 1 << 7;
        const GHOST    = 1 << 8;
        const GROUND   = 1 << 9;
        const ICE      = 1 << 10;
        const NORMAL   = 1 << 11;
        const POISON   = 1 << 12;
        const PSYCHIC  = 1 << 13;
        const ROCK     = 1 << 14;
        const FAIRY    = 1 << 15;
        const DARK     = 1 << 16;
        const STEEL    = 1 << 17;
    }
}

impl ElementSet {
    pub fn has(&self, element: Element) -> bool {
        self.contains(element.flag())
    }

    /// Elements in this set, in declaration order.
    pub fn elements(&self) -> Vec<Element> {
        use strum::IntoEnumIterator;
        Element::iter().filter(|e| self.has(*e)).collect()
    }
}

impl FromIterator<Element> for ElementSet {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ElementSet::empty(), |set, element| set | element.flag())
    }
}

/// Serializable species record, as written in catalog data files.
///
/// The evolution target is referenced by name; [`crate::env::SpeciesCatalog`]
/// resolves it into a shared descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub elements: Vec<Element>,
    pub spawnable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub evolution: Option<String>,
    pub simple_stats: StatBlock,
    pub complex_stats: FormulaStats,
}

impl SpeciesSpec {
    /// Spec with identical simple and complex stats and no evolution.
    pub fn fixed(name: impl Into<String>, elements: &[Element], stats: StatBlock) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            elements: elements.to_vec(),
            spawnable: true,
            evolution: None,
            simple_stats: stats,
            complex_stats: FormulaStats::from_block(&stats),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_evolution(mut self, target: impl Into<String>) -> Self {
        self.evolution = Some(target.into());
        self
    }

    pub fn with_complex_stats(mut self, stats: FormulaStats) -> Self {
        self.complex_stats = stats;
        self
    }

    pub fn spawnable(mut self, spawnable: bool) -> Self {
        self.spawnable = spawnable;
        self
    }
}

/// Resolved species shared by every monster of that species.
#[derive(Debug, PartialEq, Eq)]
pub struct SpeciesDescriptor {
    name: String,
    description: String,
    elements: ElementSet,
    spawnable: bool,
    evolution: Option<Arc<SpeciesDescriptor>>,
    simple_stats: StatBlock,
    complex_stats: FormulaStats,
}

impl SpeciesDescriptor {
    /// Builds a descriptor from a spec and its already resolved evolution.
    pub fn from_spec(spec: &SpeciesSpec, evolution: Option<Arc<SpeciesDescriptor>>) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            elements: spec.elements.iter().copied().collect(),
            spawnable: spec.spawnable,
            evolution,
            simple_stats: spec.simple_stats,
            complex_stats: spec.complex_stats.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn elements(&self) -> ElementSet {
        self.elements
    }

    pub fn can_be_spawned(&self) -> bool {
        self.spawnable
    }

    pub fn evolution(&self) -> Option<&Arc<SpeciesDescriptor>> {
        self.evolution.as_ref()
    }

    pub fn simple_stats(&self) -> &StatBlock {
        &self.simple_stats
    }

    pub fn complex_stats(&self) -> &FormulaStats {
        &self.complex_stats
    }

    /// Stat source for the given mode.
    pub fn provider(&self, mode: StatMode) -> StatProvider<'_> {
        match mode {
            StatMode::Simple => StatProvider::Fixed(&self.simple_stats),
            StatMode::Complex => StatProvider::Formula(&self.complex_stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn element_flags_are_distinct() {
        let all: ElementSet = Element::iter().collect();
        assert_eq!(all, ElementSet::all());
        assert_eq!(all.bits().count_ones() as usize, Element::COUNT);
    }

    #[test]
    fn element_set_membership() {
        let set: ElementSet = [Element::Fire, Element::Flying].into_iter().collect();
        assert!(set.has(Element::Fire));
        assert!(set.has(Element::Flying));
        assert!(!set.has(Element::Water));
        assert_eq!(set.elements(), vec![Element::Fire, Element::Flying]);
    }

    #[test]
    fn element_parses_case_insensitively() {
        assert_eq!("Psychic".parse::<Element>(), Ok(Element::Psychic));
        assert_eq!(Element::Steel.to_string(), "steel");
    }

    #[test]
    fn descriptor_selects_provider() {
        let spec = SpeciesSpec::fixed("Rockodile", &[Element::Rock], StatBlock::new(5, 8, 3, 20))
            .with_complex_stats(FormulaStats::new(
                "level 5 +".parse().unwrap(),
                "8".parse().unwrap(),
                "3".parse().unwrap(),
                "level 20 *".parse().unwrap(),
            ));
        let descriptor = SpeciesDescriptor::from_spec(&spec, None);
        assert_eq!(
            descriptor
                .provider(StatMode::Simple)
                .get(crate::stats::StatKind::Attack, 4),
            Ok(5)
        );
        assert_eq!(
            descriptor
                .provider(StatMode::Complex)
                .get(crate::stats::StatKind::Attack, 4),
            Ok(9)
        );
        assert!(descriptor.elements().has(Element::Rock));
        assert!(descriptor.evolution().is_none());
    }
}
