//! Hook kinds and their payloads.
//!
//! Hooks come in two flavors. Event hooks carry a `HookEvent` that every
//! listener sees in turn (and may edit, e.g. raising a card's trigger
//! count). Value hooks carry a `ValueQuery` and fold a number through every
//! listener.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::UnitId;

/// Every extension point the battle exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookKind {
    // === Events ===
    /// Battle entered Prepare. Roles adjust mana and draw here.
    BattleInit,
    /// First player turn is starting.
    BattleStart,
    /// A player turn is starting.
    TurnStart,
    /// A card was paid for and left the hand.
    CardPlay,
    /// Every trigger of a card has resolved.
    AfterCardPlay,
    /// Enemies are about to act.
    EnemyTurnStart,
    /// An ally just fell.
    AllyDeath,
    /// A hit landed on any unit.
    DamageDealt,

    // === Values ===
    ModifyCardCost,
    ModifyDamage,
    ModifyHitCount,
    ModifyTurnMana,
    ModifyBlockRetain,
}

impl HookKind {
    /// Whether the kind is folded with `process_value`.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            HookKind::ModifyCardCost
                | HookKind::ModifyDamage
                | HookKind::ModifyHitCount
                | HookKind::ModifyTurnMana
                | HookKind::ModifyBlockRetain
        )
    }
}

/// Payload of the `CardPlay` hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlay {
    pub card: CardId,
    pub caster: Option<UnitId>,
    pub target_index: usize,
    /// How many times the effect list will run. Listeners may raise it.
    pub triggers: u32,
}

/// Event payloads, one variant per event hook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookEvent {
    BattleInit,
    BattleStart,
    TurnStart { turn: u32 },
    CardPlay(CardPlay),
    AfterCardPlay { card: CardId, caster: Option<UnitId>, target_index: usize },
    EnemyTurnStart { turn: u32 },
    AllyDeath { victim: UnitId, killer: Option<UnitId> },
    DamageDealt { source: Option<UnitId>, target: UnitId, amount: i64, lethal: bool },
}

impl HookEvent {
    #[must_use]
    pub const fn kind(&self) -> HookKind {
        match self {
            HookEvent::BattleInit => HookKind::BattleInit,
            HookEvent::BattleStart => HookKind::BattleStart,
            HookEvent::TurnStart { .. } => HookKind::TurnStart,
            HookEvent::CardPlay(_) => HookKind::CardPlay,
            HookEvent::AfterCardPlay { .. } => HookKind::AfterCardPlay,
            HookEvent::EnemyTurnStart { .. } => HookKind::EnemyTurnStart,
            HookEvent::AllyDeath { .. } => HookKind::AllyDeath,
            HookEvent::DamageDealt { .. } => HookKind::DamageDealt,
        }
    }
}

/// Value pipeline queries, one variant per value hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueQuery {
    /// Mana cost of a card about to be played.
    CardCost { card: CardId },
    /// Base value of a card about to resolve.
    Damage { card: CardId, caster: Option<UnitId> },
    /// Hits of a multi-hit effect. `base` is the unmodified count.
    HitCount { card: Option<CardId>, base: u32 },
    /// Mana granted at the start of a turn.
    TurnMana { turn: u32 },
    /// Minimum block an ally keeps through turn-start decay.
    BlockRetain { unit: UnitId },
}

impl ValueQuery {
    #[must_use]
    pub const fn kind(&self) -> HookKind {
        match self {
            ValueQuery::CardCost { .. } => HookKind::ModifyCardCost,
            ValueQuery::Damage { .. } => HookKind::ModifyDamage,
            ValueQuery::HitCount { .. } => HookKind::ModifyHitCount,
            ValueQuery::TurnMana { .. } => HookKind::ModifyTurnMana,
            ValueQuery::BlockRetain { .. } => HookKind::ModifyBlockRetain,
        }
    }
}

/// Owner of a set of listeners, used for bulk removal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(pub String);

impl SourceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
