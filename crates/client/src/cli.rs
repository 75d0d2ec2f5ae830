//! Command-line arguments.
//!
//! Every run option can also come from the environment (after `.env` is
//! loaded), so batch jobs can be configured without long command lines.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tower_core::{Selection, SortKey, StatMode, TeamMode};

/// Monster battle tower simulator
#[derive(Debug, Parser)]
#[command(name = "tower")]
#[command(about = "Simulates monster battle tower ladders", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding `species.ron` and `config.toml` (built-in content otherwise)
    #[arg(long, global = true, env = "TOWER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Also write logs to a file in the platform cache directory
    #[arg(long, global = true, env = "TOWER_LOG_FILE")]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one or more tower ladders
    Run(RunArgs),

    /// List the species in the catalog
    Species,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Base seed; each run derives its own seed from it
    #[arg(long, env = "TOWER_SEED", default_value_t = 129_371)]
    pub seed: u64,

    /// Number of random opponent teams in the tower
    #[arg(long, env = "TOWER_OPPONENTS", default_value_t = 3)]
    pub opponents: usize,

    /// Number of independent ladders to run
    #[arg(long, default_value_t = 1)]
    pub runs: u64,

    /// Player team discipline: front, back or optimise
    #[arg(long, default_value = "back", value_parser = TeamMode::from_tag)]
    pub team_mode: TeamMode,

    /// Sort key for the optimise discipline: hp, attack, defense, speed or level
    #[arg(long, value_parser = SortKey::from_tag)]
    pub sort_key: Option<SortKey>,

    /// Stat source for the player team: simple or complex
    #[arg(long, default_value = "simple", value_parser = parse_stat_mode)]
    pub stat_mode: StatMode,

    /// Species for the player team, in order (random team when omitted)
    #[arg(long = "team", value_delimiter = ',')]
    pub team: Vec<String>,

    /// Override the contest round cap
    #[arg(long)]
    pub max_rounds: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

impl RunArgs {
    pub fn selection(&self) -> Selection {
        if self.team.is_empty() {
            Selection::Random
        } else {
            Selection::Provided(self.team.clone())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

fn parse_stat_mode(tag: &str) -> Result<StatMode, String> {
    tag.parse()
        .map_err(|_| format!("stat mode '{tag}' not supported (simple, complex)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> RunArgs {
        let cli = Cli::try_parse_from(["tower", "run"].iter().chain(args)).unwrap();
        match cli.command {
            Command::Run(args) => args,
            Command::Species => panic!("expected run"),
        }
    }

    #[test]
    fn defaults() {
        let args = run_args(&[]);
        assert_eq!(args.opponents, 3);
        assert_eq!(args.team_mode, TeamMode::Back);
        assert_eq!(args.stat_mode, StatMode::Simple);
        assert_eq!(args.selection(), Selection::Random);
        assert_eq!(args.format, Format::Text);
    }

    #[test]
    fn provided_team_and_modes() {
        let args = run_args(&[
            "--team",
            "Flamikin,Gustwing",
            "--team-mode",
            "optimise",
            "--sort-key",
            "speed",
            "--stat-mode",
            "complex",
            "--format",
            "json",
        ]);
        assert_eq!(
            args.selection(),
            Selection::Provided(vec!["Flamikin".into(), "Gustwing".into()])
        );
        assert_eq!(args.team_mode, TeamMode::Optimise);
        assert_eq!(args.sort_key, Some(SortKey::Speed));
        assert_eq!(args.stat_mode, StatMode::Complex);
        assert_eq!(args.format, Format::Json);
    }

    #[test]
    fn rejects_unknown_modes() {
        assert!(Cli::try_parse_from(["tower", "run", "--team-mode", "sideways"]).is_err());
        assert!(Cli::try_parse_from(["tower", "run", "--stat-mode", "chaotic"]).is_err());
    }
}
