//! Report printing.

use std::io::Write;

use anyhow::Result;
use tower_core::{BattleResult, SpeciesOracle};

use crate::cli::Format;
use crate::ladder::LadderReport;

pub fn write_report(out: &mut impl Write, report: &LadderReport, format: Format) -> Result<()> {
    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string(report)?)?,
        Format::Text => write_text(out, report)?,
    }
    Ok(())
}

fn write_text(out: &mut impl Write, report: &LadderReport) -> std::io::Result<()> {
    writeln!(
        out,
        "run {} (seed {}): player [{}] vs {} opponents",
        report.run,
        report.seed,
        report.player_team,
        report.opponent_teams.len()
    )?;
    for (i, team) in report.opponent_teams.iter().enumerate() {
        writeln!(out, "  opponent {i}: [{team}]")?;
    }
    for round in &report.rounds {
        let verdict = match round.result {
            BattleResult::Team1 => "player won",
            BattleResult::Team2 => "player lost",
            BattleResult::Draw => "draw",
        };
        writeln!(
            out,
            "  round {:>3}: {verdict} against opponent {} (lives {} vs {})",
            round.round, round.opponent, round.player_lives, round.opponent_lives
        )?;
    }

    let missing: Vec<String> = report.out_of_meta.iter().map(ToString::to_string).collect();
    writeln!(
        out,
        "  outcome: {:?} with {} lives left; out of meta: {}",
        report.outcome,
        report.player_lives,
        if missing.is_empty() {
            "none".to_string()
        } else {
            missing.join(", ")
        }
    )
}

pub fn write_species(out: &mut impl Write, catalog: &dyn SpeciesOracle) -> Result<()> {
    for species in catalog.all_species() {
        let elements: Vec<String> = species
            .elements()
            .elements()
            .iter()
            .map(ToString::to_string)
            .collect();
        let stats = species.simple_stats();
        write!(
            out,
            "{:<14} [{}] atk {} def {} spd {} hp {}",
            species.name(),
            elements.join(", "),
            stats.attack,
            stats.defense,
            stats.speed,
            stats.max_hp
        )?;
        if let Some(target) = species.evolution() {
            write!(out, " -> {}", target.name())?;
        }
        if !species.can_be_spawned() {
            write!(out, " (evolution only)")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
