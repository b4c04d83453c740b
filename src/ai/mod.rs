//! Enemy decision engine.
//!
//! ## Components
//!
//! - `IntentKind` / `Intent`: the telegraphed action
//! - `Condition`: rule predicates over the enemy and battle
//! - `Behavior`: rules, pattern cycle, fallback pool and overrides
//! - `EnemyPlanner`: turns a behavior into the next intent
//! - `EnemyDefinition`: static per-kind data and HP scaling

pub mod intent;
pub mod condition;
pub mod behavior;
pub mod planner;
pub mod enemy;

pub use intent::{AiMemory, Intent, IntentKind};
pub use condition::{Comparator, Condition, Metric, Predicate};
pub use behavior::{ActionOverride, Behavior, Magnitude, OverrideValue, PatternSlot, Rule};
pub use planner::{EnemyPlanner, PlanContext};
pub use enemy::{EnemyDefinition, Encounter};
