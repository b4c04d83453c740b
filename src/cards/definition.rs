//! Card definitions - static card data.
//!
//! `CardDefinition` holds everything the battle needs to play a card: its
//! cost, kind, base value, which performers must be standing, and the
//! ordered list of effect descriptors it resolves.
//!
//! Cards in piles are just `CardId`s resolved against the `CardRegistry`.

use serde::{Deserialize, Serialize};

use crate::effects::EffectDescriptor;

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What kind of card this is. Drives targeting and hook filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    #[serde(alias = "atk")]
    Attack,
    #[serde(alias = "def")]
    Defend,
    Skill,
    Buff,
    Debuff,
    #[serde(alias = "spec")]
    Special,
    /// Needs two named performers standing.
    Duo,
    /// Needs three named performers standing.
    Trio,
}

impl CardKind {
    /// Whether the card waits for the player to pick an enemy.
    #[must_use]
    pub const fn is_targeted(self) -> bool {
        matches!(self, CardKind::Attack | CardKind::Debuff | CardKind::Special)
    }

    /// Small stable code, used by extensions that track streaks in
    /// integer battle variables.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            CardKind::Attack => 1,
            CardKind::Defend => 2,
            CardKind::Skill => 3,
            CardKind::Buff => 4,
            CardKind::Debuff => 5,
            CardKind::Special => 6,
            CardKind::Duo => 7,
            CardKind::Trio => 8,
        }
    }
}

/// Broad tag used by scaling rules (crescendo counts attack-tagged plays).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTag {
    #[default]
    #[serde(alias = "atk")]
    Attack,
    #[serde(alias = "def")]
    Defend,
    Buff,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_cadence::cards::{CardDefinition, CardId, CardKind};
/// use rust_cadence::effects::EffectDescriptor;
///
/// let strike = CardDefinition::new(CardId::new(1), "Strike", CardKind::Attack)
///     .with_cost(1)
///     .with_value(6)
///     .with_effect(EffectDescriptor::damage());
///
/// assert!(strike.kind.is_targeted());
/// assert_eq!(strike.effects.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    pub name: String,

    pub cost: i64,

    pub kind: CardKind,

    #[serde(default)]
    pub tag: CardTag,

    /// Base value inherited by effects that carry no explicit value.
    #[serde(default)]
    pub value: i64,

    /// Role key of the performer who plays this card. `None` for common
    /// cards anyone can play.
    #[serde(default)]
    pub owner: Option<String>,

    /// Role keys that must all be standing (duo and trio cards).
    #[serde(default)]
    pub requires: Vec<String>,

    #[serde(default)]
    pub effects: Vec<EffectDescriptor>,
}

impl CardDefinition {
    /// Create a new zero-cost card with no effects.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        let tag = match kind {
            CardKind::Defend => CardTag::Defend,
            CardKind::Skill | CardKind::Buff => CardTag::Buff,
            _ => CardTag::Attack,
        };
        Self {
            id,
            name: name.into(),
            cost: 0,
            kind,
            tag,
            value: 0,
            owner: None,
            requires: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Set the mana cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    /// Set the base value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    /// Set the tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: CardTag) -> Self {
        self.tag = tag;
        self
    }

    /// Set the owning role (builder pattern).
    #[must_use]
    pub fn owned_by(mut self, role: impl Into<String>) -> Self {
        self.owner = Some(role.into());
        self
    }

    /// Require a role to be standing (builder pattern).
    #[must_use]
    pub fn requiring(mut self, role: impl Into<String>) -> Self {
        self.requires.push(role.into());
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: EffectDescriptor) -> Self {
        self.effects.push(effect);
        self
    }
}
