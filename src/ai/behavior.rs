//! Enemy behavior descriptions.
//!
//! A `Behavior` is evaluated in three layers:
//!
//! 1. `rules`: the first rule whose condition holds picks the action
//! 2. `pattern`: a cycle of slots, each fixed or a weighted choice
//! 3. `actions`: a uniform pick when there is no pattern
//!
//! `overrides` then reshapes the chosen action's intent (kind, icon or
//! magnitude) per enemy kind.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::Combatant;

use super::condition::Condition;
use super::intent::IntentKind;

/// A priority rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub condition: Condition,
    pub action: PatternSlot,
}

/// One step of a pattern cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSlot {
    Fixed(IntentKind),
    /// `(action, weight)` pairs. Weights need not sum to one.
    Weighted(Vec<(IntentKind, f64)>),
}

impl From<IntentKind> for PatternSlot {
    fn from(kind: IntentKind) -> Self {
        PatternSlot::Fixed(kind)
    }
}

/// Intent magnitude computed from the enemy and the level-scaled base.
#[derive(Clone)]
pub struct Magnitude(pub Arc<dyn Fn(&Combatant, i64) -> i64 + Send + Sync>);

impl std::fmt::Debug for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Magnitude(..)")
    }
}

/// How an override sets the intent value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideValue {
    /// Keep the template value.
    #[default]
    Inherit,
    Fixed(i64),
    /// Percentage of the enemy's max HP, floored.
    PercentMaxHp(i64),
    #[serde(skip)]
    Computed(Magnitude),
}

impl PartialEq for OverrideValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OverrideValue::Inherit, OverrideValue::Inherit) => true,
            (OverrideValue::Fixed(a), OverrideValue::Fixed(b))
            | (OverrideValue::PercentMaxHp(a), OverrideValue::PercentMaxHp(b)) => a == b,
            (OverrideValue::Computed(a), OverrideValue::Computed(b)) => Arc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

impl OverrideValue {
    /// Resolve against the enemy. `template` is the value the action would
    /// have without the override; `base` is the level-scaled attack base.
    #[must_use]
    pub fn resolve(&self, enemy: &Combatant, base: i64, template: i64) -> i64 {
        match self {
            OverrideValue::Inherit => template,
            OverrideValue::Fixed(v) => *v,
            OverrideValue::PercentMaxHp(pct) => enemy.max_hp * pct / 100,
            OverrideValue::Computed(m) => (m.0)(enemy, base),
        }
    }
}

/// Per-action customization of the planned intent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionOverride {
    /// Resolve as a different kind.
    pub kind: Option<IntentKind>,
    pub icon: Option<String>,
    pub value: OverrideValue,
}

impl ActionOverride {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_kind(mut self, kind: IntentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: OverrideValue) -> Self {
        self.value = value;
        self
    }
}

/// Decision data for one enemy kind.
///
/// ```
/// use rust_cadence::ai::{Behavior, IntentKind};
///
/// let json = r#"{
///     "pattern": ["attack", "attack", "atk_heavy", [["def", 0.5], ["buff", 0.5]]]
/// }"#;
/// let behavior: Behavior = serde_json::from_str(json).unwrap();
/// assert_eq!(behavior.pattern.len(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Behavior {
    pub rules: Vec<Rule>,
    pub pattern: Vec<PatternSlot>,
    /// Uniform fallback pool when `pattern` is empty. Empty means attack.
    pub actions: Vec<IntentKind>,
    pub overrides: FxHashMap<IntentKind, ActionOverride>,
}

impl Behavior {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a priority rule (builder pattern).
    #[must_use]
    pub fn rule(mut self, condition: Condition, action: impl Into<PatternSlot>) -> Self {
        self.rules.push(Rule { condition, action: action.into() });
        self
    }

    /// Append a fixed pattern slot (builder pattern).
    #[must_use]
    pub fn then(mut self, kind: IntentKind) -> Self {
        self.pattern.push(PatternSlot::Fixed(kind));
        self
    }

    /// Append a weighted pattern slot (builder pattern).
    #[must_use]
    pub fn then_weighted(mut self, choices: Vec<(IntentKind, f64)>) -> Self {
        self.pattern.push(PatternSlot::Weighted(choices));
        self
    }

    /// Set the uniform fallback pool (builder pattern).
    #[must_use]
    pub fn with_actions(mut self, actions: Vec<IntentKind>) -> Self {
        self.actions = actions;
        self
    }

    /// Customize one action (builder pattern).
    #[must_use]
    pub fn with_override(mut self, action: IntentKind, custom: ActionOverride) -> Self {
        self.overrides.insert(action, custom);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UnitId;

    #[test]
    fn test_builder() {
        let behavior = Behavior::new()
            .then(IntentKind::Attack)
            .then_weighted(vec![(IntentKind::HeavyAttack, 0.7), (IntentKind::Fortify, 0.3)])
            .with_override(IntentKind::Heal, ActionOverride::new().with_value(OverrideValue::Fixed(12)));

        assert_eq!(behavior.pattern[0], PatternSlot::Fixed(IntentKind::Attack));
        assert!(matches!(behavior.pattern[1], PatternSlot::Weighted(ref c) if c.len() == 2));
        assert!(behavior.overrides.contains_key(&IntentKind::Heal));
    }

    #[test]
    fn test_override_values() {
        let enemy = Combatant::enemy(UnitId::new(0), "boss", "Boss", 200);
        assert_eq!(OverrideValue::Inherit.resolve(&enemy, 6, 9), 9);
        assert_eq!(OverrideValue::Fixed(4).resolve(&enemy, 6, 9), 4);
        assert_eq!(OverrideValue::PercentMaxHp(15).resolve(&enemy, 6, 9), 30);

        let doubled = OverrideValue::Computed(Magnitude(Arc::new(|_, base| base * 2)));
        assert_eq!(doubled.resolve(&enemy, 6, 9), 12);
    }

    #[test]
    fn test_override_json() {
        let json = r#"{"overrides": {"cleanse": {"icon": "ui/purge", "value": {"percent_max_hp": 10}}}}"#;
        let behavior: Behavior = serde_json::from_str(json).unwrap();
        let custom = &behavior.overrides[&IntentKind::Cleanse];
        assert_eq!(custom.icon.as_deref(), Some("ui/purge"));
        assert_eq!(custom.value, OverrideValue::PercentMaxHp(10));
    }
}
