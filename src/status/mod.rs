//! Status effects: definitions, per-unit stack lists and the engine that
//! applies them.
//!
//! ## Components
//!
//! - `StatusDefinition` / `StatusTable`: static per-kind data
//! - `StatusList`: ordered stacks carried by each combatant
//! - `StatusEngine`: stacking, damage folds and turn ticks

pub mod definition;
pub mod list;
pub mod engine;

pub use definition::{DamageRule, Polarity, Stacking, StatusDefinition, StatusId, StatusTable, TickRule};
pub use list::{StatusList, StatusStack};
pub use engine::StatusEngine;
