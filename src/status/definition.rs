//! Status definitions - static per-kind status data.
//!
//! A `StatusDefinition` describes how one kind of status behaves: whether
//! stacks accumulate or clamp to a flag, and up to four lifecycle rules.
//! The rules are data, not code, so the whole table can be authored as JSON
//! and the decay policy stays a per-kind choice (vulnerable decrements by
//! one each turn end, weakened clears outright).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Unique identifier for a status kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusId(pub u16);

impl StatusId {
    /// Incoming damage x1.5, decays by one stack each turn end.
    pub const VULNERABLE: Self = Self(1);
    /// Outgoing damage +stacks.
    pub const STRENGTH: Self = Self(2);
    /// Inert counter consumed by detonation effects.
    pub const RESONANCE: Self = Self(3);
    /// Skip the next action; cleared at turn start.
    pub const STUNNED: Self = Self(4);
    /// Outgoing damage -stacks until turn end.
    pub const WEAKENED: Self = Self(5);

    /// Create a new status ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for StatusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Status({})", self.0)
    }
}

/// How repeated applications combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stacking {
    /// Amounts add up.
    #[default]
    Accumulate,
    /// Present or absent; the stack is always exactly 1.
    Flag,
}

/// Whether the status helps or hurts its bearer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Polarity {
    #[default]
    Buff,
    Debuff,
}

/// What a turn-start or turn-end tick does to the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickRule {
    /// Remove this many stacks.
    Decrement(i64),
    /// Remove the status entirely.
    Clear,
}

impl TickRule {
    /// Stack count after the tick. Zero or less means removed.
    #[must_use]
    pub fn apply(self, stacks: i64) -> i64 {
        match self {
            TickRule::Decrement(n) => stacks - n,
            TickRule::Clear => 0,
        }
    }
}

/// How a status rewrites a damage value passing through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageRule {
    /// Add the stack count.
    AddStacks,
    /// Subtract the stack count.
    SubtractStacks,
    /// Multiply by `percent / 100`, rounding down.
    ScalePercent(i64),
}

impl DamageRule {
    /// Fold one damage value through this rule.
    #[must_use]
    pub fn apply(self, damage: i64, stacks: i64) -> i64 {
        match self {
            DamageRule::AddStacks => damage + stacks,
            DamageRule::SubtractStacks => damage - stacks,
            DamageRule::ScalePercent(percent) => (damage * percent).div_euclid(100),
        }
    }
}

/// Static definition of one status kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinition {
    pub id: StatusId,

    /// Stable lookup key ("vulnerable", "strength", ...).
    pub key: String,

    /// Display name.
    pub name: String,

    #[serde(default)]
    pub stacking: Stacking,

    #[serde(default)]
    pub polarity: Polarity,

    #[serde(default)]
    pub on_turn_start: Option<TickRule>,

    #[serde(default)]
    pub on_turn_end: Option<TickRule>,

    /// Applied when the bearer is the damage source.
    #[serde(default)]
    pub on_deal_damage: Option<DamageRule>,

    /// Applied when the bearer is the damage target.
    #[serde(default)]
    pub on_receive_damage: Option<DamageRule>,
}

impl StatusDefinition {
    /// Create an accumulating buff with no lifecycle rules.
    #[must_use]
    pub fn new(id: StatusId, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
            stacking: Stacking::Accumulate,
            polarity: Polarity::Buff,
            on_turn_start: None,
            on_turn_end: None,
            on_deal_damage: None,
            on_receive_damage: None,
        }
    }

    /// Make the status a flag (builder pattern).
    #[must_use]
    pub fn flag(mut self) -> Self {
        self.stacking = Stacking::Flag;
        self
    }

    /// Mark the status harmful (builder pattern).
    #[must_use]
    pub fn debuff(mut self) -> Self {
        self.polarity = Polarity::Debuff;
        self
    }

    /// Set the turn-start tick (builder pattern).
    #[must_use]
    pub fn on_turn_start(mut self, rule: TickRule) -> Self {
        self.on_turn_start = Some(rule);
        self
    }

    /// Set the turn-end tick (builder pattern).
    #[must_use]
    pub fn on_turn_end(mut self, rule: TickRule) -> Self {
        self.on_turn_end = Some(rule);
        self
    }

    /// Set the outgoing damage rule (builder pattern).
    #[must_use]
    pub fn on_deal_damage(mut self, rule: DamageRule) -> Self {
        self.on_deal_damage = Some(rule);
        self
    }

    /// Set the incoming damage rule (builder pattern).
    #[must_use]
    pub fn on_receive_damage(mut self, rule: DamageRule) -> Self {
        self.on_receive_damage = Some(rule);
        self
    }

    #[must_use]
    pub fn is_flag(&self) -> bool {
        self.stacking == Stacking::Flag
    }
}

/// Lookup table of status definitions.
#[derive(Clone, Debug, Default)]
pub struct StatusTable {
    statuses: FxHashMap<StatusId, StatusDefinition>,
    by_key: FxHashMap<String, StatusId>,
}

impl StatusTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The five statuses every battle understands.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register(
            StatusDefinition::new(StatusId::VULNERABLE, "vulnerable", "Vulnerable")
                .debuff()
                .on_receive_damage(DamageRule::ScalePercent(150))
                .on_turn_end(TickRule::Decrement(1)),
        );
        table.register(
            StatusDefinition::new(StatusId::STRENGTH, "strength", "Strength")
                .on_deal_damage(DamageRule::AddStacks),
        );
        table.register(StatusDefinition::new(StatusId::RESONANCE, "resonance", "Resonance").debuff());
        table.register(
            StatusDefinition::new(StatusId::STUNNED, "stunned", "Stunned")
                .flag()
                .debuff()
                .on_turn_start(TickRule::Clear),
        );
        table.register(
            StatusDefinition::new(StatusId::WEAKENED, "weakened", "Weakened")
                .debuff()
                .on_deal_damage(DamageRule::SubtractStacks)
                .on_turn_end(TickRule::Clear),
        );
        table
    }

    /// Parse a table from a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let defs: Vec<StatusDefinition> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for def in defs {
            table.register(def);
        }
        Ok(table)
    }

    /// Register a definition, replacing any previous one with the same id.
    pub fn register(&mut self, def: StatusDefinition) {
        self.by_key.insert(def.key.clone(), def.id);
        self.statuses.insert(def.id, def);
    }

    #[must_use]
    pub fn get(&self, id: StatusId) -> Option<&StatusDefinition> {
        self.statuses.get(&id)
    }

    /// Look up a status id by key.
    #[must_use]
    pub fn id_of(&self, key: &str) -> Option<StatusId> {
        self.by_key.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_rules() {
        assert_eq!(DamageRule::AddStacks.apply(10, 3), 13);
        assert_eq!(DamageRule::SubtractStacks.apply(10, 3), 7);
        assert_eq!(DamageRule::ScalePercent(150).apply(13, 1), 19);
        assert_eq!(DamageRule::ScalePercent(150).apply(5, 4), 7);
    }

    #[test]
    fn test_tick_rules() {
        assert_eq!(TickRule::Decrement(1).apply(2), 1);
        assert_eq!(TickRule::Decrement(1).apply(1), 0);
        assert_eq!(TickRule::Clear.apply(9), 0);
    }

    #[test]
    fn test_standard_table() {
        let table = StatusTable::standard();
        assert_eq!(table.len(), 5);
        assert!(table.get(StatusId::STUNNED).unwrap().is_flag());
        assert_eq!(table.id_of("weakened"), Some(StatusId::WEAKENED));
        assert_eq!(table.id_of("missing"), None);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "id": 9, "key": "poise", "name": "Poise", "stacking": "Flag",
              "on_turn_end": "Clear" }
        ]"#;
        let table = StatusTable::from_json(json).unwrap();
        let poise = table.get(StatusId::new(9)).unwrap();
        assert!(poise.is_flag());
        assert_eq!(poise.on_turn_end, Some(TickRule::Clear));
        assert_eq!(poise.polarity, Polarity::Buff);
    }
}
