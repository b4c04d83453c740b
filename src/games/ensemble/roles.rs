//! Performers: stats, starting decks and passive hooks.

use std::sync::Arc;

use crate::battle::Battle;
use crate::cards::{CardId, CardKind};
use crate::hooks::{event_fn, value_fn, HookKind, HookListener, HookRegistry, ValueQuery};

/// Static data for one performer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub hp: i64,
    /// Card ids added to the shared deck.
    pub deck: &'static [u32],
    /// One-line passive summary for the roster screen.
    pub passive: &'static str,
}

impl RoleDefinition {
    /// The role's starting cards.
    pub fn starting_deck(&self) -> impl Iterator<Item = CardId> + '_ {
        self.deck.iter().copied().map(CardId::new)
    }

    /// Hook source id the passive registers under.
    #[must_use]
    pub fn source(&self) -> String {
        format!("role.{}", self.key)
    }
}

pub const ROLES: &[RoleDefinition] = &[
    RoleDefinition { key: "pianist", name: "Phantasm Arbiter", hp: 60, deck: &[1, 19, 30], passive: "Mana cap +1" },
    RoleDefinition { key: "violinist", name: "Silverstring Saint", hp: 50, deck: &[5, 20, 31], passive: "Draw +1 per turn" },
    RoleDefinition { key: "vocalist", name: "Requiem Cantor", hp: 45, deck: &[8, 9, 10], passive: "Party heals 5 before each enemy turn" },
    RoleDefinition { key: "cellist", name: "Lowtone Warden", hp: 75, deck: &[11, 12, 13], passive: "Starts with 8 block" },
    RoleDefinition { key: "brass", name: "Daybreak Herald", hp: 70, deck: &[14, 15, 16], passive: "Attacks costing 2+ deal +5" },
    RoleDefinition { key: "flutist", name: "Windwalker", hp: 45, deck: &[24, 25, 26], passive: "First card each turn is free" },
    RoleDefinition { key: "percussionist", name: "Thunder Striker", hp: 70, deck: &[27, 28, 29], passive: "Attacks deal +2" },
    RoleDefinition { key: "conductor", name: "Soulweaver", hp: 55, deck: &[21, 22, 23], passive: "Ensemble cards cost 1 less" },
];

/// Look a role up by key.
#[must_use]
pub fn role(key: &str) -> Option<&'static RoleDefinition> {
    ROLES.iter().find(|r| r.key == key)
}

fn passive(key: &str) -> Option<(HookKind, Arc<dyn HookListener<Battle>>)> {
    let hook = match key {
        "pianist" => (
            HookKind::BattleInit,
            event_fn(|battle: &mut Battle, _| {
                battle.state_mut().mana.max += 1;
                Ok(())
            }),
        ),
        "violinist" => (
            HookKind::BattleInit,
            event_fn(|battle: &mut Battle, _| {
                battle.state_mut().mana.per_turn_draw += 1;
                Ok(())
            }),
        ),
        "vocalist" => (
            HookKind::EnemyTurnStart,
            event_fn(|battle: &mut Battle, _| {
                battle.heal_all(5);
                Ok(())
            }),
        ),
        "cellist" => (
            HookKind::BattleStart,
            event_fn(|battle: &mut Battle, _| {
                if let Some(me) = battle.state().ally_by_key("cellist") {
                    battle.grant_block(me, 8);
                }
                Ok(())
            }),
        ),
        "brass" => (
            HookKind::ModifyDamage,
            value_fn(|battle: &Battle, query, value| {
                let ValueQuery::Damage { card, .. } = query else {
                    return None;
                };
                let card = battle.cards().get(*card)?;
                (card.kind == CardKind::Attack && card.cost >= 2).then_some(value + 5)
            }),
        ),
        "flutist" => (
            HookKind::ModifyCardCost,
            value_fn(|battle: &Battle, _, _| (!battle.state().counters.first_card_played).then_some(0)),
        ),
        "percussionist" => (
            HookKind::ModifyDamage,
            value_fn(|battle: &Battle, query, value| {
                let ValueQuery::Damage { card, .. } = query else {
                    return None;
                };
                (battle.cards().kind_of(*card) == Some(CardKind::Attack)).then_some(value + 2)
            }),
        ),
        "conductor" => (
            HookKind::ModifyCardCost,
            value_fn(|battle: &Battle, query, cost| {
                let ValueQuery::CardCost { card } = query else {
                    return None;
                };
                matches!(battle.cards().kind_of(*card), Some(CardKind::Duo | CardKind::Trio))
                    .then_some((cost - 1).max(0))
            }),
        ),
        _ => return None,
    };
    Some(hook)
}

/// Register the passive of role `key`. Returns false for unknown roles.
pub fn register_passive(hooks: &mut HookRegistry<Battle>, key: &str) -> bool {
    match (role(key), passive(key)) {
        (Some(def), Some((kind, listener))) => {
            hooks.register(kind, def.source(), listener, 0);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_a_passive() {
        for role in ROLES {
            assert!(passive(role.key).is_some(), "{} has no passive", role.key);
            assert_eq!(role.deck.len(), 3);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(role("cellist").map(|r| r.hp), Some(75));
        assert!(role("kazooist").is_none());
    }

    #[test]
    fn test_register_unknown_role() {
        let mut hooks = HookRegistry::new();
        assert!(!register_passive(&mut hooks, "kazooist"));
        assert!(hooks.is_empty());
        assert!(register_passive(&mut hooks, "flutist"));
        assert_eq!(hooks.count(HookKind::ModifyCardCost), 1);
    }
}
