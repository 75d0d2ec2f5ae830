//! Deterministic monster battle rules.
//!
//! `tower-core` defines the canonical rules (stats, monsters, rosters, the
//! contest engine and the battle tower) and exposes pure APIs that content
//! loaders and clients build on. Randomness and species data arrive through
//! the oracles in [`env`], so every run replays exactly from its seed.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;
pub mod tower;

pub use combat::{apply_damage, calculate_damage};
pub use config::GameConfig;
pub use engine::{
    Action, ActionPolicy, Battle, BattleError, BattleResult, BattleSession, DefaultPolicy, Side,
};
pub use env::{CatalogError, PcgRng, RngOracle, SpeciesCatalog, SpeciesOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Element, ElementSet, Monster, Roster, RosterError, RosterSpec, Selection, SelectionMode,
    SortKey, SpeciesDescriptor, SpeciesSpec, TeamMode,
};
pub use stats::{
    Formula, FormulaError, FormulaStats, Operator, StatBlock, StatKind, StatMode, StatProvider,
    Token,
};
pub use tower::{BattleTower, LadderRound, TowerError};
