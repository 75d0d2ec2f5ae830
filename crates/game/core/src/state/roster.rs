//! Roster container.
//!
//! A roster holds up to [`GameConfig::TEAM_LIMIT`] monsters. Position 0 is
//! always the next monster sent into battle. Where `add` places a monster
//! depends on the [`TeamMode`]:
//!
//! | Mode     | add()                                                   |
//! |----------|---------------------------------------------------------|
//! | Front    | position 0, everything else shifts back                 |
//! | Back     | appended at the end                                     |
//! | Optimise | before the first member with a strictly smaller key     |
//!
//! `retrieve` removes position 0 in every mode. Members live in a
//! capacity-checked ring buffer, so Front and Back insertion and retrieval are
//! O(1); Optimise insertion is a linear scan.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::{FormulaError, StatKind, StatMode};

use super::monster::Monster;
use super::species::SpeciesDescriptor;

/// Insertion discipline of a roster.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TeamMode {
    Front,
    Back,
    /// Kept in descending order of the roster's [`SortKey`].
    Optimise,
}

impl TeamMode {
    /// Parses a mode tag, rejecting unknown tags as a configuration error.
    pub fn from_tag(tag: &str) -> Result<Self, RosterError> {
        tag.parse()
            .map_err(|_| RosterError::InvalidConfiguration(format!("team mode '{tag}' not supported")))
    }
}

/// Monster attribute ordering an `Optimise` roster.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortKey {
    /// Current HP.
    Hp,
    Attack,
    Defense,
    Speed,
    Level,
}

impl SortKey {
    pub fn from_tag(tag: &str) -> Result<Self, RosterError> {
        tag.parse()
            .map_err(|_| RosterError::InvalidConfiguration(format!("sort key '{tag}' not supported")))
    }

    /// Key value of `monster` under this ordering.
    pub fn key(self, monster: &Monster) -> Result<i64, FormulaError> {
        match self {
            Self::Hp => Ok(monster.hp()),
            Self::Attack => monster.stat(StatKind::Attack),
            Self::Defense => monster.stat(StatKind::Defense),
            Self::Speed => monster.stat(StatKind::Speed),
            Self::Level => Ok(i64::from(monster.level())),
        }
    }
}

/// Errors raised by roster construction and mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("cannot retrieve from an empty roster")]
    EmptyRoster,

    #[error("roster is already at maximum capacity ({capacity})")]
    RosterFull { capacity: usize },

    #[error("invalid roster configuration: {0}")]
    InvalidConfiguration(String),

    #[error("species '{0}' is not in the catalog")]
    UnknownSpecies(String),

    #[error(transparent)]
    Stat(#[from] FormulaError),
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyRoster => ErrorSeverity::Internal,
            Self::RosterFull { .. } | Self::InvalidConfiguration(_) | Self::UnknownSpecies(_) => {
                ErrorSeverity::Validation
            }
            Self::Stat(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "ROSTER_EMPTY",
            Self::RosterFull { .. } => "ROSTER_FULL",
            Self::InvalidConfiguration(_) => "ROSTER_INVALID_CONFIGURATION",
            Self::UnknownSpecies(_) => "ROSTER_UNKNOWN_SPECIES",
            Self::Stat(err) => err.error_code(),
        }
    }
}

/// Fixed-capacity ordered team of monsters.
#[derive(Clone, Debug)]
pub struct Roster {
    mode: TeamMode,
    sort_key: Option<SortKey>,
    members: VecDeque<Monster>,
    /// Species the roster was selected from, in selection order.
    lineup: Vec<Arc<SpeciesDescriptor>>,
    stat_mode: StatMode,
    lives: u32,
}

impl Roster {
    pub const CAPACITY: usize = GameConfig::TEAM_LIMIT;

    /// Creates an empty roster.
    ///
    /// `Optimise` requires a sort key; the other modes ignore it.
    pub fn new(mode: TeamMode, sort_key: Option<SortKey>) -> Result<Self, RosterError> {
        if mode == TeamMode::Optimise && sort_key.is_none() {
            return Err(RosterError::InvalidConfiguration(
                "optimise mode requires a sort key".to_string(),
            ));
        }
        Ok(Self {
            mode,
            sort_key,
            members: VecDeque::with_capacity(Self::CAPACITY),
            lineup: Vec::new(),
            stat_mode: StatMode::default(),
            lives: 0,
        })
    }

    pub fn mode(&self) -> TeamMode {
        self.mode
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    pub fn stat_mode(&self) -> StatMode {
        self.stat_mode
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= Self::CAPACITY
    }

    /// Members from the front (next out) to the back.
    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.members.iter()
    }

    /// Member at `position`, counted from the front.
    pub fn get(&self, position: usize) -> Option<&Monster> {
        self.members.get(position)
    }

    pub fn lineup(&self) -> &[Arc<SpeciesDescriptor>] {
        &self.lineup
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    /// Removes one life, never dropping below zero.
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Inserts a monster according to the team mode.
    pub fn add(&mut self, monster: Monster) -> Result<(), RosterError> {
        if self.is_full() {
            return Err(RosterError::RosterFull {
                capacity: Self::CAPACITY,
            });
        }

        match self.mode {
            TeamMode::Front => self.members.push_front(monster),
            TeamMode::Back => self.members.push_back(monster),
            TeamMode::Optimise => {
                let key = self.key_of(&monster)?;
                let mut position = 0;
                while position < self.members.len() && self.key_of(&self.members[position])? >= key
                {
                    position += 1;
                }
                self.members.insert(position, monster);
            }
        }
        Ok(())
    }

    /// Removes and returns the front monster.
    pub fn retrieve(&mut self) -> Result<Monster, RosterError> {
        self.members.pop_front().ok_or(RosterError::EmptyRoster)
    }

    /// Reorders members without changing membership.
    ///
    /// - Front: swaps the front with the middle member.
    /// - Back: swaps the front half with the back half, then applies the
    ///   midpoint fix-up for rosters of four or more.
    /// - Optimise: stable sort ascending by key (the opposite of insertion
    ///   order).
    pub fn special(&mut self) -> Result<(), RosterError> {
        let len = self.members.len();
        let middle = len / 2;

        match self.mode {
            TeamMode::Front => {
                if len > 0 {
                    self.members.swap(0, middle);
                }
            }
            TeamMode::Back => {
                for i in 0..middle {
                    self.members.swap(i, len - i - 1);
                }
                if middle > 1 {
                    if len % 2 == 0 {
                        self.members.swap(middle, len - 1);
                    } else {
                        self.members.swap(middle + 1, len - 1);
                    }
                }
            }
            TeamMode::Optimise => {
                let keys = self
                    .members
                    .iter()
                    .map(|monster| self.key_of(monster))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut keyed: Vec<(i64, Monster)> =
                    keys.into_iter().zip(self.members.drain(..)).collect();
                keyed.sort_by_key(|(key, _)| *key);
                self.members.extend(keyed.into_iter().map(|(_, monster)| monster));
            }
        }
        Ok(())
    }

    /// Restores the roster for another contest: level 1 and full HP for
    /// everyone.
    ///
    /// A roster with a recorded lineup is rebuilt from it, which also returns
    /// monsters that fainted, swapped out or evolved. A roster populated only
    /// through [`Roster::add`] restores its current members in place.
    pub fn regenerate(&mut self) -> Result<(), RosterError> {
        if self.lineup.is_empty() {
            for monster in self.members.iter_mut() {
                monster.restore()?;
            }
            if self.mode == TeamMode::Optimise {
                let members: Vec<Monster> = self.members.drain(..).collect();
                for monster in members {
                    self.add(monster)?;
                }
            }
            return Ok(());
        }

        self.members.clear();
        let lineup = self.lineup.clone();
        for species in lineup {
            let monster = Monster::new(species, self.stat_mode)?;
            self.add(monster)?;
        }
        Ok(())
    }

    /// Spawns a level 1 monster of `species`, adds it and records it in the lineup.
    pub(crate) fn enlist(
        &mut self,
        species: Arc<SpeciesDescriptor>,
        stat_mode: StatMode,
    ) -> Result<(), RosterError> {
        self.stat_mode = stat_mode;
        let monster = Monster::new(species.clone(), stat_mode)?;
        self.add(monster)?;
        self.lineup.push(species);
        Ok(())
    }

    fn key_of(&self, monster: &Monster) -> Result<i64, FormulaError> {
        match self.sort_key {
            Some(key) => key.key(monster),
            None => Ok(0),
        }
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, monster) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{monster}")?;
        }
        write!(f, "]")
    }
}
