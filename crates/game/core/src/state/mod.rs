//! Simulation state: species identity, monsters and rosters.
//!
//! Species are shared, immutable data. Monsters and rosters are the only
//! mutable state, and the battle engine mutates them exclusively through the
//! operations defined here.
pub mod monster;
pub mod roster;
pub mod selection;
pub mod species;

pub use monster::Monster;
pub use roster::{Roster, RosterError, SortKey, TeamMode};
pub use selection::{RosterSpec, Selection, SelectionMode};
pub use species::{Element, ElementSet, SpeciesDescriptor, SpeciesSpec};
