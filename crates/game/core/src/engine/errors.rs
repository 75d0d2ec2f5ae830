//! Error types for contest resolution.

use crate::error::{ErrorSeverity, GameError};
use crate::state::RosterError;
use crate::stats::FormulaError;

use super::Side;

/// Errors surfaced while resolving a contest.
///
/// Every variant names the side whose roster or monster failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("{side} roster: {source}")]
    Roster {
        side: Side,
        #[source]
        source: RosterError,
    },

    #[error("{side} active monster: {source}")]
    Stat {
        side: Side,
        #[source]
        source: FormulaError,
    },
}

impl BattleError {
    pub(crate) fn roster(side: Side) -> impl FnOnce(RosterError) -> Self {
        move |source| Self::Roster { side, source }
    }

    pub(crate) fn stat(side: Side) -> impl FnOnce(FormulaError) -> Self {
        move |source| Self::Stat { side, source }
    }

    pub fn side(&self) -> Side {
        match self {
            Self::Roster { side, .. } | Self::Stat { side, .. } => *side,
        }
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Roster { source, .. } => source.severity(),
            Self::Stat { source, .. } => source.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Roster { source, .. } => source.error_code(),
            Self::Stat { source, .. } => source.error_code(),
        }
    }
}
