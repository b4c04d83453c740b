//! Core battle types: units, state, RNG, configuration and errors.
//!
//! These are the building blocks the rest of the crate shares. Content
//! (cards, roles, enemies) is supplied from outside through registries
//! rather than baked in here.

pub mod entity;
pub mod combatant;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use entity::{Side, UnitId};
pub use combatant::{Combatant, DamageOutcome};
pub use rng::GameRng;
pub use config::{BattleConfig, Timings};
pub use error::{BattleError, ConfigError, EffectError, HookError};
pub use state::{BattleState, ManaPool, Phase, TurnCounters};
