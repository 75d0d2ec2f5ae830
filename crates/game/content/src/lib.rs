//! Data-driven content definitions and loaders.
//!
//! This crate houses the static tower content and the loaders for its data
//! files:
//! - Species catalog (data-driven via RON)
//! - Tower configuration (data-driven via TOML)
//!
//! A default catalog and configuration are compiled in, so a client can run
//! without a data directory.
//!
//! All loaders use tower-core types directly with serde for RON/TOML
//! deserialization.

/// Built-in species catalog, RON.
pub const BUILTIN_SPECIES: &str = include_str!("../data/species.ron");

/// Built-in tower configuration, TOML.
pub const BUILTIN_CONFIG: &str = include_str!("../data/config.toml");

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, SpeciesLoader, builtin_catalog};
