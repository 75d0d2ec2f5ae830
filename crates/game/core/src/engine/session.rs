//! Round-by-round contest state.

use tracing::{debug, warn};

use crate::combat::{apply_damage, calculate_damage};
use crate::state::{Monster, Roster, RosterError};

use super::{Action, Battle, BattleError, BattleResult, Side};

/// One contest in progress.
///
/// Active monsters have already been retrieved from their rosters and are
/// owned here. A side whose roster ran dry holds no active monster, which
/// counts as fainted.
pub struct BattleSession<'a> {
    battle: &'a Battle,
    rosters: [&'a mut Roster; 2],
    active: [Option<Monster>; 2],
    round: u32,
}

impl<'a> BattleSession<'a> {
    /// Starts a contest by sending out the front monster of each roster.
    pub fn start(
        battle: &'a Battle,
        team1: &'a mut Roster,
        team2: &'a mut Roster,
    ) -> Result<Self, BattleError> {
        let mut session = Self {
            battle,
            rosters: [team1, team2],
            active: [None, None],
            round: 0,
        };
        for side in Side::BOTH {
            session.send_out(side)?;
        }
        Ok(session)
    }

    /// Rounds completed so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn active(&self, side: Side) -> Option<&Monster> {
        self.active[side.index()].as_ref()
    }

    pub fn roster(&self, side: Side) -> &Roster {
        &*self.rosters[side.index()]
    }

    /// Plays one round. Returns the result once the contest is over.
    pub fn step(&mut self) -> Result<Option<BattleResult>, BattleError> {
        if self.round >= self.battle.max_rounds() {
            warn!(rounds = self.round, "round cap reached, contest drawn");
            return Ok(Some(BattleResult::Draw));
        }

        for side in Side::BOTH {
            if self.active[side.index()].is_none() {
                self.send_out(side)?;
            }
        }

        let actions = [self.choose(Side::Team1)?, self.choose(Side::Team2)?];
        for side in self.initiative()? {
            if !self.is_alive(side) {
                debug!(round = self.round, %side, "fainted before acting");
                continue;
            }
            self.resolve(side, actions[side.index()])?;
        }

        if self.is_alive(Side::Team1) && self.is_alive(Side::Team2) {
            for side in Side::BOTH {
                self.chip(side);
            }
        }
        match [self.is_alive(Side::Team1), self.is_alive(Side::Team2)] {
            [true, false] => self.level_up(Side::Team1)?,
            [false, true] => self.level_up(Side::Team2)?,
            _ => {}
        }

        for side in Side::BOTH {
            self.evolve(side)?;
        }
        for side in Side::BOTH {
            if !self.is_alive(side) {
                self.replace(side)?;
            }
        }

        let result = match [self.is_alive(Side::Team1), self.is_alive(Side::Team2)] {
            [false, false] => Some(BattleResult::Draw),
            [false, true] => Some(BattleResult::Team2),
            [true, false] => Some(BattleResult::Team1),
            [true, true] => None,
        };
        self.round += 1;
        Ok(result)
    }

    fn monster(&self, side: Side) -> Result<&Monster, BattleError> {
        self.active[side.index()]
            .as_ref()
            .ok_or(RosterError::EmptyRoster)
            .map_err(BattleError::roster(side))
    }

    fn is_alive(&self, side: Side) -> bool {
        self.active[side.index()]
            .as_ref()
            .is_some_and(Monster::alive)
    }

    fn send_out(&mut self, side: Side) -> Result<(), BattleError> {
        let monster = self.rosters[side.index()]
            .retrieve()
            .map_err(BattleError::roster(side))?;
        debug!(round = self.round, %side, %monster, "sent out");
        self.active[side.index()] = Some(monster);
        Ok(())
    }

    fn choose(&self, side: Side) -> Result<Action, BattleError> {
        let current = self.monster(side)?;
        let opponent = self.monster(side.opponent())?;
        self.battle
            .policy(side)
            .choose(current, opponent)
            .map_err(BattleError::stat(side))
    }

    /// Strictly faster side first; ties go to team 1.
    fn initiative(&self) -> Result<[Side; 2], BattleError> {
        let speed1 = self
            .monster(Side::Team1)?
            .speed()
            .map_err(BattleError::stat(Side::Team1))?;
        let speed2 = self
            .monster(Side::Team2)?
            .speed()
            .map_err(BattleError::stat(Side::Team2))?;
        if speed2 > speed1 {
            Ok([Side::Team2, Side::Team1])
        } else {
            Ok(Side::BOTH)
        }
    }

    fn resolve(&mut self, side: Side, action: Action) -> Result<(), BattleError> {
        match action {
            Action::Swap if !self.rosters[side.index()].is_empty() => self.swap(side),
            Action::Swap => {
                debug!(round = self.round, %side, "nothing to swap in, attacking instead");
                self.attack(side)
            }
            Action::Attack => self.attack(side),
        }
    }

    fn attack(&mut self, side: Side) -> Result<(), BattleError> {
        let target = side.opponent();
        let attack = self
            .monster(side)?
            .attack()
            .map_err(BattleError::stat(side))?;
        let defense = self
            .monster(target)?
            .defense()
            .map_err(BattleError::stat(target))?;
        let damage = calculate_damage(attack, defense);

        if let Some(defender) = self.active[target.index()].as_mut() {
            apply_damage(defender, damage);
            debug!(round = self.round, %side, damage, defender = %defender, "attack");
        }
        Ok(())
    }

    fn swap(&mut self, side: Side) -> Result<(), BattleError> {
        let outgoing = self.active[side.index()].take();
        if let Some(outgoing) = &outgoing {
            debug!(round = self.round, %side, %outgoing, "withdrawn");
        }
        self.send_out(side)
    }

    fn chip(&mut self, side: Side) {
        if let Some(monster) = self.active[side.index()].as_mut() {
            monster.take_damage(1);
        }
    }

    fn level_up(&mut self, side: Side) -> Result<(), BattleError> {
        if let Some(monster) = self.active[side.index()].as_mut() {
            monster.level_up().map_err(BattleError::stat(side))?;
            debug!(round = self.round, %side, %monster, "level up");
        }
        Ok(())
    }

    fn evolve(&mut self, side: Side) -> Result<(), BattleError> {
        let slot = &mut self.active[side.index()];
        if !slot.as_ref().is_some_and(Monster::ready_to_evolve) {
            return Ok(());
        }
        if let Some(monster) = slot.take() {
            let evolved = monster.evolve().map_err(BattleError::stat(side))?;
            debug!(round = self.round, %side, %evolved, "evolved");
            *slot = Some(evolved);
        }
        Ok(())
    }

    fn replace(&mut self, side: Side) -> Result<(), BattleError> {
        if let Some(fainted) = self.active[side.index()].take() {
            debug!(round = self.round, %side, %fainted, "fainted");
        }
        if self.rosters[side.index()].is_empty() {
            debug!(round = self.round, %side, "no monsters left");
            return Ok(());
        }
        self.send_out(side)
    }
}
