//! The battle tower: a ladder of contests with lives.
//!
//! The player roster fights a rotation of opponent rosters. Every roster gets
//! a life count drawn from `[min_lives, max_lives]` when it enters the tower;
//! a roster entering with no lives never plays. After each contest:
//!
//! - the loser loses one life (a draw costs nobody anything)
//! - both rosters are regenerated to level 1 and full HP
//! - a beaten opponent rejoins the back of the rotation while it has lives
//!   left and the next opponent steps up; after a loss or a draw the player
//!   rematches the same opponent
//!
//! The ladder ends when the player is out of lives or every opponent is.
//! Contests are deterministic once both rosters are regenerated, so a drawn
//! rematch would draw forever: one draw stalemates the ladder and ends it.

use std::collections::VecDeque;

use tracing::info;

use crate::config::GameConfig;
use crate::engine::{Battle, BattleError, BattleResult};
use crate::env::{RngOracle, SpeciesOracle};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ElementSet, Roster, RosterError, RosterSpec, TeamMode};

/// Errors raised by the tower.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TowerError {
    #[error("no battles remaining")]
    LadderExhausted,

    #[error("player team has not been set")]
    NoPlayerTeam,

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

impl GameError for TowerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LadderExhausted => ErrorSeverity::Expected,
            Self::NoPlayerTeam => ErrorSeverity::Validation,
            Self::Battle(err) => err.severity(),
            Self::Roster(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LadderExhausted => "TOWER_LADDER_EXHAUSTED",
            Self::NoPlayerTeam => "TOWER_NO_PLAYER_TEAM",
            Self::Battle(err) => err.error_code(),
            Self::Roster(err) => err.error_code(),
        }
    }
}

/// Outcome of one ladder round.
///
/// Life counts are the ones both rosters carried into the contest, before the
/// loser was charged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LadderRound {
    /// 1-based round number.
    pub round: u32,
    pub result: BattleResult,
    /// Index of the opponent in [`BattleTower::opponents`].
    pub opponent: usize,
    pub player_lives: u32,
    pub opponent_lives: u32,
}

/// Ladder of contests between one player roster and rotating opponents.
pub struct BattleTower<R: RngOracle> {
    battle: Battle,
    config: GameConfig,
    rng: R,
    player: Option<Roster>,
    opponents: Vec<Roster>,
    /// Opponent the player faces next, kept after a player loss or a draw.
    current: Option<usize>,
    rotation: VecDeque<usize>,
    rounds: u32,
    drawn: bool,
}

impl<R: RngOracle> BattleTower<R> {
    pub fn new(battle: Battle, config: GameConfig, rng: R) -> Self {
        Self {
            battle,
            config,
            rng,
            player: None,
            opponents: Vec::new(),
            current: None,
            rotation: VecDeque::new(),
            rounds: 0,
            drawn: false,
        }
    }

    /// Installs the player roster, regenerated, with freshly drawn lives.
    pub fn set_my_team(&mut self, team: Roster) -> Result<(), TowerError> {
        let team = self.enter(team)?;
        info!(lives = team.lives(), %team, "player team set");
        self.player = Some(team);
        Ok(())
    }

    /// Generates `count` random Back-mode opponents from `catalog`.
    pub fn generate_teams(
        &mut self,
        count: usize,
        catalog: &dyn SpeciesOracle,
    ) -> Result<(), TowerError> {
        for _ in 0..count {
            let team = Roster::random(RosterSpec::new(TeamMode::Back), catalog, &mut self.rng)?;
            self.add_opponent(team)?;
        }
        Ok(())
    }

    /// Adds an opponent to the back of the rotation, with freshly drawn lives.
    ///
    /// An opponent that draws no lives is kept in [`Self::opponents`] but
    /// never joins the rotation.
    pub fn add_opponent(&mut self, team: Roster) -> Result<(), TowerError> {
        let team = self.enter(team)?;
        info!(
            opponent = self.opponents.len(),
            lives = team.lives(),
            %team,
            "opponent joined"
        );
        if team.lives() > 0 {
            self.rotation.push_back(self.opponents.len());
        }
        self.opponents.push(team);
        Ok(())
    }

    pub fn player(&self) -> Option<&Roster> {
        self.player.as_ref()
    }

    pub fn opponents(&self) -> &[Roster] {
        &self.opponents
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds
    }

    /// True while the player has lives, some opponent still has lives and
    /// the ladder is not stalemated.
    pub fn battles_remaining(&self) -> bool {
        self.player.as_ref().is_some_and(|player| player.lives() > 0)
            && (self.current.is_some() || !self.rotation.is_empty())
            && !self.stalemated()
    }

    /// The last contest was drawn, so the rematch would draw again.
    pub fn stalemated(&self) -> bool {
        self.drawn
    }

    /// Index of the opponent the next contest is against, if one is waiting.
    pub fn current_opponent(&self) -> Option<usize> {
        self.current.or_else(|| self.rotation.front().copied())
    }

    /// Plays the next contest of the ladder.
    pub fn next_battle(&mut self) -> Result<LadderRound, TowerError> {
        if self.player.is_none() {
            return Err(TowerError::NoPlayerTeam);
        }
        if !self.battles_remaining() {
            return Err(TowerError::LadderExhausted);
        }
        let player = self.player.as_mut().ok_or(TowerError::NoPlayerTeam)?;
        let index = match self.current.take() {
            Some(index) => index,
            None => self
                .rotation
                .pop_front()
                .ok_or(TowerError::LadderExhausted)?,
        };
        let opponent = &mut self.opponents[index];

        let player_lives = player.lives();
        let opponent_lives = opponent.lives();
        let result = self.battle.battle(player, opponent)?;

        match result {
            BattleResult::Team1 => {
                opponent.lose_life();
                if opponent.lives() > 0 {
                    self.rotation.push_back(index);
                }
            }
            BattleResult::Team2 => {
                player.lose_life();
                self.current = Some(index);
            }
            BattleResult::Draw => self.current = Some(index),
        }
        self.drawn = result == BattleResult::Draw;
        player.regenerate()?;
        opponent.regenerate()?;

        self.rounds += 1;
        info!(
            round = self.rounds,
            %result,
            opponent = index,
            player_lives = player.lives(),
            opponent_lives = opponent.lives(),
            "ladder round"
        );
        Ok(LadderRound {
            round: self.rounds,
            result,
            opponent: index,
            player_lives,
            opponent_lives,
        })
    }

    /// Elements that appear on no roster in the tower, player included.
    pub fn out_of_meta(&self) -> ElementSet {
        let present = self
            .player
            .iter()
            .chain(&self.opponents)
            .flat_map(|team| {
                team.lineup()
                    .iter()
                    .map(|species| species.elements())
                    .chain(team.iter().map(|monster| monster.species().elements()))
            })
            .fold(ElementSet::empty(), |set, elements| set | elements);
        ElementSet::all().difference(present)
    }

    fn enter(&mut self, mut team: Roster) -> Result<Roster, TowerError> {
        if team.lineup().is_empty() {
            return Err(RosterError::InvalidConfiguration(
                "tower rosters must be built by a selection strategy".to_string(),
            )
            .into());
        }
        team.regenerate()?;
        team.set_lives(self.rng.range(self.config.min_lives, self.config.max_lives));
        Ok(team)
    }
}

impl<R: RngOracle> Iterator for BattleTower<R> {
    type Item = Result<LadderRound, TowerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.battles_remaining() {
            return None;
        }
        Some(self.next_battle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, SpeciesCatalog};
    use crate::state::{Element, SpeciesSpec};
    use crate::stats::StatBlock;

    fn catalog() -> SpeciesCatalog {
        SpeciesCatalog::new(vec![
            SpeciesSpec::fixed("Titan", &[Element::Rock], StatBlock::new(50, 10, 9, 60)),
            SpeciesSpec::fixed("Minnow", &[Element::Water], StatBlock::new(1, 0, 1, 5)),
            SpeciesSpec::fixed("Ember", &[Element::Fire], StatBlock::new(1, 0, 1, 5)),
            SpeciesSpec::fixed("Pillow", &[Element::Normal], StatBlock::new(0, 0, 1, 1_000)),
        ])
        .unwrap()
    }

    fn team(names: &[&str]) -> Roster {
        Roster::provided(RosterSpec::new(TeamMode::Back), names, &catalog()).unwrap()
    }

    fn tower(config: GameConfig) -> BattleTower<PcgRng> {
        BattleTower::new(Battle::new(&config), config, PcgRng::new(7))
    }

    #[test]
    fn single_loss_ends_a_one_life_ladder() {
        let mut tower = tower(GameConfig::with_lives(1, 1));
        tower.set_my_team(team(&["Minnow"])).unwrap();
        tower.add_opponent(team(&["Titan"])).unwrap();
        assert!(tower.battles_remaining());

        let round = tower.next_battle().unwrap();
        assert_eq!(round.result, BattleResult::Team2);
        assert_eq!((round.player_lives, round.opponent_lives), (1, 1));
        assert!(!tower.battles_remaining());
        assert_eq!(tower.next_battle(), Err(TowerError::LadderExhausted));
        assert!(tower.next_battle().unwrap_err().severity().is_expected());
    }

    #[test]
    fn opponents_rotate_until_out_of_lives() {
        let mut tower = tower(GameConfig::with_lives(2, 2));
        tower.set_my_team(team(&["Titan"])).unwrap();
        tower.add_opponent(team(&["Minnow"])).unwrap();
        tower.add_opponent(team(&["Ember", "Minnow"])).unwrap();

        let rounds: Vec<LadderRound> = tower.by_ref().collect::<Result<_, _>>().unwrap();
        let order: Vec<usize> = rounds.iter().map(|r| r.opponent).collect();
        assert_eq!(order, [0, 1, 0, 1]);
        assert!(rounds.iter().all(|r| r.result == BattleResult::Team1));
        assert_eq!(
            rounds.iter().map(|r| r.opponent_lives).collect::<Vec<_>>(),
            [2, 2, 1, 1]
        );
        assert_eq!(tower.player().unwrap().lives(), 2);
        assert_eq!(tower.rounds_played(), 4);
    }

    #[test]
    fn rosters_are_regenerated_between_rounds() {
        let mut tower = tower(GameConfig::with_lives(3, 3));
        tower.set_my_team(team(&["Titan", "Minnow"])).unwrap();
        tower.add_opponent(team(&["Ember", "Minnow"])).unwrap();

        tower.next_battle().unwrap();
        let player = tower.player().unwrap();
        assert_eq!(player.len(), 2);
        assert!(player.iter().all(|m| m.level() == 1 && Ok(m.hp()) == m.max_hp()));
        assert_eq!(tower.opponents()[0].len(), 2);
    }

    #[test]
    fn draw_costs_no_lives() {
        let config = GameConfig::with_lives(1, 1).with_max_rounds(20);
        let mut tower = tower(config);
        tower.set_my_team(team(&["Pillow"])).unwrap();
        tower.add_opponent(team(&["Pillow"])).unwrap();

        let round = tower.next_battle().unwrap();
        assert_eq!(round.result, BattleResult::Draw);
        assert_eq!(tower.player().unwrap().lives(), 1);
        assert_eq!(tower.opponents()[0].lives(), 1);

        // the rematch would draw again
        assert!(tower.stalemated());
        assert!(!tower.battles_remaining());
        assert_eq!(tower.next_battle(), Err(TowerError::LadderExhausted));
    }

    #[test]
    fn player_rematches_after_a_loss() {
        let mut tower = tower(GameConfig::with_lives(2, 2));
        tower.set_my_team(team(&["Minnow"])).unwrap();
        tower.add_opponent(team(&["Titan"])).unwrap();
        tower.add_opponent(team(&["Minnow"])).unwrap();

        let first = tower.next_battle().unwrap();
        assert_eq!((first.result, first.opponent), (BattleResult::Team2, 0));
        assert_eq!(tower.current_opponent(), Some(0));

        let second = tower.next_battle().unwrap();
        assert_eq!((second.result, second.opponent), (BattleResult::Team2, 0));
        assert_eq!((second.player_lives, second.opponent_lives), (1, 2));
        assert!(!tower.battles_remaining());
    }

    #[test]
    fn win_moves_on_and_draw_stalemates() {
        let config = GameConfig::with_lives(2, 2).with_max_rounds(20);
        let mut tower = tower(config);
        tower.set_my_team(team(&["Pillow"])).unwrap();
        tower.add_opponent(team(&["Minnow"])).unwrap();
        tower.add_opponent(team(&["Pillow"])).unwrap();

        let win = tower.next_battle().unwrap();
        assert_eq!((win.result, win.opponent), (BattleResult::Team1, 0));
        assert!(!tower.stalemated());
        assert_eq!(tower.current_opponent(), Some(1));

        let draw = tower.next_battle().unwrap();
        assert_eq!((draw.result, draw.opponent), (BattleResult::Draw, 1));
        assert!(tower.stalemated());
        assert_eq!(tower.current_opponent(), Some(1));
        assert!(tower.next().is_none());
    }

    #[test]
    fn opponent_without_lives_never_plays() {
        let mut tower = tower(GameConfig::with_lives(0, 0));
        tower.set_my_team(team(&["Titan"])).unwrap();
        if let Some(player) = tower.player.as_mut() {
            player.set_lives(1);
        }
        tower.add_opponent(team(&["Minnow"])).unwrap();

        assert_eq!(tower.opponents()[0].lives(), 0);
        assert_eq!(tower.current_opponent(), None);
        assert!(!tower.battles_remaining());
        assert_eq!(tower.next_battle(), Err(TowerError::LadderExhausted));
        assert_eq!(tower.rounds_played(), 0);
    }

    #[test]
    fn generated_teams_are_seeded() {
        let catalog = catalog();
        let build = || {
            let mut tower = tower(GameConfig::default());
            tower.set_my_team(team(&["Titan"])).unwrap();
            tower.generate_teams(4, &catalog).unwrap();
            tower
        };
        let (a, b) = (build(), build());
        assert_eq!(a.opponents().len(), 4);
        for (left, right) in a.opponents().iter().zip(b.opponents()) {
            assert_eq!(left.to_string(), right.to_string());
            assert_eq!(left.lives(), right.lives());
            assert!((2..=10).contains(&left.lives()));
            assert_eq!(left.mode(), TeamMode::Back);
        }
    }

    #[test]
    fn out_of_meta_lists_unused_elements() {
        let mut tower = tower(GameConfig::default());
        tower.set_my_team(team(&["Ember"])).unwrap();
        tower.add_opponent(team(&["Minnow", "Titan"])).unwrap();

        let missing = tower.out_of_meta();
        assert!(!missing.has(Element::Fire));
        assert!(!missing.has(Element::Water));
        assert!(!missing.has(Element::Rock));
        assert!(missing.has(Element::Grass));
        assert_eq!(missing.elements().len(), 15);
    }

    #[test]
    fn needs_a_player_and_selected_rosters() {
        let mut tower = tower(GameConfig::default());
        assert_eq!(tower.next_battle(), Err(TowerError::NoPlayerTeam));
        assert!(tower.next().is_none());

        let bare = Roster::new(TeamMode::Back, None).unwrap();
        assert!(matches!(
            tower.set_my_team(bare),
            Err(TowerError::Roster(RosterError::InvalidConfiguration(_)))
        ));
    }
}
