//! Behavior rule conditions.
//!
//! Conditions are data where possible (`Compare`, `All`, `Any`) so enemy
//! behavior can be loaded from JSON. `Predicate` covers anything else with a
//! closure and is code-only.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::Combatant;
use crate::status::StatusId;

use super::planner::PlanContext;

/// A number read off the planning enemy or the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// `hp / max_hp` of the enemy.
    HpFraction,
    /// Stacks of a status on the enemy.
    Stacks(StatusId),
    /// Current turn number.
    Turn,
}

impl Metric {
    #[must_use]
    pub fn read(self, enemy: &Combatant, ctx: &PlanContext) -> f64 {
        match self {
            Metric::HpFraction => enemy.hp_fraction(),
            Metric::Stacks(status) => enemy.statuses.get(status) as f64,
            Metric::Turn => f64::from(ctx.turn),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = ">")]
    Gt,
}

impl Comparator {
    #[must_use]
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparator::Lt => lhs < rhs,
            Comparator::Le => lhs <= rhs,
            Comparator::Eq => (lhs - rhs).abs() < f64::EPSILON,
            Comparator::Ge => lhs >= rhs,
            Comparator::Gt => lhs > rhs,
        }
    }
}

/// Closure condition.
#[derive(Clone)]
pub struct Predicate(pub Arc<dyn Fn(&Combatant, &PlanContext) -> bool + Send + Sync>);

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// When a behavior rule fires.
///
/// ```
/// use rust_cadence::ai::{Comparator, Condition, Metric};
/// use rust_cadence::status::StatusId;
///
/// let enraged: Condition = serde_json::from_str(
///     r#"{"compare": {"metric": {"stacks": 2}, "op": ">=", "threshold": 6}}"#,
/// ).unwrap();
/// assert_eq!(enraged, Condition::compare(Metric::Stacks(StatusId::STRENGTH), Comparator::Ge, 6.0));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Compare {
        metric: Metric,
        op: Comparator,
        threshold: f64,
    },
    /// Every inner condition holds. Empty is true.
    All(Vec<Condition>),
    /// Some inner condition holds. Empty is false.
    Any(Vec<Condition>),
    #[serde(skip)]
    Predicate(Predicate),
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Condition::Compare { metric: m1, op: o1, threshold: t1 },
                Condition::Compare { metric: m2, op: o2, threshold: t2 },
            ) => m1 == m2 && o1 == o2 && t1 == t2,
            (Condition::All(a), Condition::All(b)) | (Condition::Any(a), Condition::Any(b)) => a == b,
            (Condition::Predicate(a), Condition::Predicate(b)) => Arc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

impl Condition {
    #[must_use]
    pub fn compare(metric: Metric, op: Comparator, threshold: f64) -> Self {
        Condition::Compare { metric, op, threshold }
    }

    /// Wrap a closure.
    #[must_use]
    pub fn predicate(f: impl Fn(&Combatant, &PlanContext) -> bool + Send + Sync + 'static) -> Self {
        Condition::Predicate(Predicate(Arc::new(f)))
    }

    #[must_use]
    pub fn evaluate(&self, enemy: &Combatant, ctx: &PlanContext) -> bool {
        match self {
            Condition::Compare { metric, op, threshold } => op.compare(metric.read(enemy, ctx), *threshold),
            Condition::All(inner) => inner.iter().all(|c| c.evaluate(enemy, ctx)),
            Condition::Any(inner) => inner.iter().any(|c| c.evaluate(enemy, ctx)),
            Condition::Predicate(p) => (p.0)(enemy, ctx),
        }
    }
}
