//! Ladder runs.
//!
//! A run builds the player roster and the opponents from one derived seed,
//! then plays the tower to exhaustion.

use anyhow::{Context, Result};
use serde::Serialize;
use tower_core::{
    Battle, BattleTower, Element, GameConfig, LadderRound, PcgRng, Roster, RosterSpec, Selection,
    SpeciesCatalog, compute_seed,
};

/// Everything needed to reproduce one ladder.
#[derive(Debug, Clone)]
pub struct LadderSettings {
    pub seed: u64,
    pub opponents: usize,
    pub selection: Selection,
    pub roster: RosterSpec,
}

/// Who was left standing when the ladder ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerCleared,
    PlayerDefeated,
    /// The player drew with the opponent it would have to rematch.
    Stalemate,
}

/// Result of one complete ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LadderReport {
    pub run: u64,
    pub seed: u64,
    pub player_team: String,
    pub opponent_teams: Vec<String>,
    pub rounds: Vec<LadderRound>,
    pub player_lives: u32,
    pub outcome: Outcome,
    pub out_of_meta: Vec<Element>,
}

/// Plays run number `run` of a batch to completion.
pub fn run_ladder(
    catalog: &SpeciesCatalog,
    config: &GameConfig,
    settings: &LadderSettings,
    run: u64,
) -> Result<LadderReport> {
    let seed = compute_seed(settings.seed, run);
    let mut rng = PcgRng::new(seed);
    let player = Roster::select(settings.roster, &settings.selection, catalog, &mut rng)
        .context("Failed to build player team")?;

    let mut tower = BattleTower::new(Battle::new(config), config.clone(), rng);
    tower.set_my_team(player)?;
    tower
        .generate_teams(settings.opponents, catalog)
        .context("Failed to generate opponent teams")?;

    let player_team = lineup(tower.player());
    let opponent_teams = tower.opponents().iter().map(|team| lineup(Some(team))).collect();
    let out_of_meta = tower.out_of_meta().elements();

    let mut rounds = Vec::new();
    for round in tower.by_ref() {
        rounds.push(round.with_context(|| format!("Ladder run {run} failed"))?);
    }

    let player_lives = tower.player().map_or(0, Roster::lives);
    let outcome = if player_lives == 0 {
        Outcome::PlayerDefeated
    } else if tower.stalemated() {
        Outcome::Stalemate
    } else {
        Outcome::PlayerCleared
    };
    tracing::info!(run, seed, rounds = rounds.len(), ?outcome, "ladder finished");

    Ok(LadderReport {
        run,
        seed,
        player_team,
        opponent_teams,
        rounds,
        player_lives,
        outcome,
        out_of_meta,
    })
}

fn lineup(team: Option<&Roster>) -> String {
    team.map(|team| {
        team.lineup()
            .iter()
            .map(|species| species.name())
            .collect::<Vec<_>>()
            .join(", ")
    })
    .unwrap_or_default()
}
