//! Battle tower client binary.
//!
//! Composition root: loads `.env`, parses arguments, sets up logging, loads
//! content (a data directory or the built-in catalog) and runs the requested
//! command.
//!
//! # Examples
//!
//! ```bash
//! # one ladder with a random team
//! cargo run -p tower-client -- run
//!
//! # five ladders, fixed team, JSON lines, attack-by-attack narration on stderr
//! RUST_LOG=tower_core=debug cargo run -p tower-client -- \
//!     run --runs 5 --team Flamikin,Gustwing --format json
//! ```

mod cli;
mod dirs;
mod ladder;
mod logging;
mod report;

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tower_content::{ConfigLoader, ContentFactory, builtin_catalog};
use tower_core::{GameConfig, RosterSpec, SpeciesCatalog};

use cli::{Cli, Command, RunArgs};
use ladder::{LadderSettings, run_ladder};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging(cli.log_file)?;

    let (config, catalog) = load_content(&cli)?;
    tracing::debug!(species = catalog.len(), ?config, "content loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Species => report::write_species(&mut out, &catalog)?,
        Command::Run(args) => run(&mut out, args, config, &catalog)?,
    }
    out.flush()?;
    Ok(())
}

fn load_content(cli: &Cli) -> Result<(GameConfig, SpeciesCatalog)> {
    match &cli.data_dir {
        Some(dir) => {
            tracing::info!("Loading content from {}", dir.display());
            let factory = ContentFactory::new(dir);
            Ok((factory.load_config()?, factory.load_species()?))
        }
        None => Ok((ConfigLoader::builtin()?, builtin_catalog()?)),
    }
}

fn run(
    out: &mut impl Write,
    args: &RunArgs,
    mut config: GameConfig,
    catalog: &SpeciesCatalog,
) -> Result<()> {
    if let Some(max_rounds) = args.max_rounds {
        config = config.with_max_rounds(max_rounds);
    }

    let mut roster = RosterSpec::new(args.team_mode).stat_mode(args.stat_mode);
    if let Some(key) = args.sort_key {
        roster = roster.sorted_by(key);
    }
    let settings = LadderSettings {
        seed: args.seed,
        opponents: args.opponents,
        selection: args.selection(),
        roster,
    };

    tracing::info!(
        seed = args.seed,
        runs = args.runs,
        opponents = args.opponents,
        "Starting tower"
    );
    for run in 0..args.runs {
        let report = run_ladder(catalog, &config, &settings, run)?;
        report::write_report(out, &report, args.format)?;
    }
    Ok(())
}
