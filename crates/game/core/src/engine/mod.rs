//! Contest resolution.
//!
//! [`Battle`] resolves one contest between two rosters. Each round runs the
//! same fixed pipeline inside a [`BattleSession`]:
//!
//! ```text
//! choose actions -> resolve in speed order -> chip damage -> level up
//!     -> evolve -> replace fainted -> check result
//! ```
//!
//! The session owns the two active monsters; everything else stays in the
//! rosters, which the session borrows exclusively for the whole contest.

mod errors;
mod policy;
mod session;

pub use errors::BattleError;
pub use policy::{Action, ActionPolicy, DefaultPolicy};
pub use session::BattleSession;

use crate::config::GameConfig;
use crate::state::Roster;

/// One of the two sides of a contest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    #[strum(serialize = "team 1")]
    Team1,
    #[strum(serialize = "team 2")]
    Team2,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Team1, Side::Team2];

    pub const fn opponent(self) -> Self {
        match self {
            Self::Team1 => Self::Team2,
            Self::Team2 => Self::Team1,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Team1 => 0,
            Self::Team2 => 1,
        }
    }
}

/// Terminal state of a contest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BattleResult {
    Team1,
    Team2,
    Draw,
}

impl BattleResult {
    /// Result for a contest won by `side`.
    pub const fn win(side: Side) -> Self {
        match side {
            Side::Team1 => Self::Team1,
            Side::Team2 => Self::Team2,
        }
    }

    pub const fn winner(self) -> Option<Side> {
        match self {
            Self::Team1 => Some(Side::Team1),
            Self::Team2 => Some(Side::Team2),
            Self::Draw => None,
        }
    }
}

/// Contest resolver.
///
/// Holds the round cap and one [`ActionPolicy`] per side. A single `Battle`
/// can resolve any number of contests.
pub struct Battle {
    max_rounds: u32,
    policies: [Box<dyn ActionPolicy>; 2],
}

impl Battle {
    /// Creates a resolver using [`DefaultPolicy`] for both sides.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            max_rounds: config.max_rounds,
            policies: [Box::new(DefaultPolicy), Box::new(DefaultPolicy)],
        }
    }

    /// Replaces the policy used by `side`.
    pub fn with_policy(mut self, side: Side, policy: impl ActionPolicy + 'static) -> Self {
        self.policies[side.index()] = Box::new(policy);
        self
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn policy(&self, side: Side) -> &dyn ActionPolicy {
        self.policies[side.index()].as_ref()
    }

    /// Resolves one full contest. Both rosters must be non-empty.
    ///
    /// Rosters are left depleted; regenerate them before reuse.
    pub fn battle(
        &self,
        team1: &mut Roster,
        team2: &mut Roster,
    ) -> Result<BattleResult, BattleError> {
        tracing::debug!(%team1, %team2, "contest start");
        let mut session = BattleSession::start(self, team1, team2)?;
        loop {
            if let Some(result) = session.step()? {
                tracing::debug!(%result, rounds = session.round(), "contest over");
                return Ok(result);
            }
        }
    }
}

impl Default for Battle {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("max_rounds", &self.max_rounds)
            .finish_non_exhaustive()
    }
}
