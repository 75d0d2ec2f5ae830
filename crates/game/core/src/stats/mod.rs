//! Stat system.
//!
//! Monsters resolve attack, defense, speed and max HP through one of two
//! sources:
//!
//! ```text
//! [ StatBlock    ]  simple mode: constants
//! [ FormulaStats ]  complex mode: postfix formulas over `level`
//! ```
//!
//! Both are pure: the same level always yields the same values.

pub mod formula;
pub mod provider;

pub use formula::{Formula, FormulaError, Operator, Token};
pub use provider::{FormulaStats, StatBlock, StatKind, StatMode, StatProvider};
