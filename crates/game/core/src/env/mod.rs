//! Traits describing read-only simulation inputs.
//!
//! Oracles expose the species catalog and the random source. Rosters and the
//! tower receive them explicitly so every run is reproducible from its seed
//! and its catalog.
mod catalog;
mod rng;

pub use catalog::{CatalogError, SpeciesCatalog, SpeciesOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};
