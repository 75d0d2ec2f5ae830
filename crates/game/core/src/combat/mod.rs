//! Combat resolution.
//!
//! Pure functions only: the battle engine decides who attacks whom, this
//! module decides how much it hurts.
//!
//! - `calculate_damage`: attack vs defense, exact rational arithmetic
//! - `apply_damage`: HP reduction (may drop below zero)

pub mod damage;

pub use damage::{apply_damage, calculate_damage};
