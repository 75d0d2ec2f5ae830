//! Action selection.
//!
//! Each side picks its action at the start of a round, before either action
//! resolves. The choice is delegated to an [`ActionPolicy`] so callers can
//! plug in smarter (or scripted) behaviour.

use crate::state::Monster;
use crate::stats::FormulaError;

/// What a side does with its round.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Action {
    /// Hit the opposing active monster.
    Attack,
    /// Withdraw the active monster for the next one in the roster. The
    /// outgoing monster takes no further part in the contest.
    Swap,
}

/// Chooses an action for the active monster.
pub trait ActionPolicy: Send + Sync {
    fn choose(&self, current: &Monster, opponent: &Monster) -> Result<Action, FormulaError>;
}

/// Attacks when at least as fast or at least as healthy as the opponent,
/// swaps otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultPolicy;

impl ActionPolicy for DefaultPolicy {
    fn choose(&self, current: &Monster, opponent: &Monster) -> Result<Action, FormulaError> {
        if current.speed()? >= opponent.speed()? || current.hp() >= opponent.hp() {
            Ok(Action::Attack)
        } else {
            Ok(Action::Swap)
        }
    }
}

impl<F> ActionPolicy for F
where
    F: Fn(&Monster, &Monster) -> Result<Action, FormulaError> + Send + Sync,
{
    fn choose(&self, current: &Monster, opponent: &Monster) -> Result<Action, FormulaError> {
        self(current, opponent)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::state::{Element, SpeciesDescriptor, SpeciesSpec};
    use crate::stats::{StatBlock, StatMode};

    fn monster(speed: i64, max_hp: i64) -> Monster {
        let spec = SpeciesSpec::fixed("Dummy", &[Element::Normal], StatBlock::new(1, 1, speed, max_hp));
        Monster::new(Arc::new(SpeciesDescriptor::from_spec(&spec, None)), StatMode::Simple).unwrap()
    }

    #[test]
    fn default_policy_attacks_when_faster_or_healthier() {
        let policy = DefaultPolicy;
        assert_eq!(policy.choose(&monster(5, 1), &monster(5, 9)), Ok(Action::Attack));
        assert_eq!(policy.choose(&monster(1, 9), &monster(5, 9)), Ok(Action::Attack));
        assert_eq!(policy.choose(&monster(1, 8), &monster(5, 9)), Ok(Action::Swap));
    }

    #[test]
    fn closures_are_policies() {
        let always_swap =
            |_: &Monster, _: &Monster| -> Result<Action, FormulaError> { Ok(Action::Swap) };
        assert_eq!(always_swap.choose(&monster(9, 9), &monster(1, 1)), Ok(Action::Swap));
    }
}
