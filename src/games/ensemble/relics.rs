//! Relics: passive listeners picked up between battles.

use std::sync::Arc;

use async_trait::async_trait;

use crate::battle::Battle;
use crate::cards::CardKind;
use crate::core::error::HookError;
use crate::core::Side;
use crate::hooks::{event_fn, value_fn, HookEvent, HookKind, HookListener, HookRegistry, ValueQuery};
use crate::status::StatusId;

/// Static data for one relic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelicDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl RelicDefinition {
    #[must_use]
    pub fn source(&self) -> String {
        format!("relic.{}", self.key)
    }
}

pub const RELICS: &[RelicDefinition] = &[
    RelicDefinition { key: "metronome", name: "Metronome", description: "The first attack each turn plays twice" },
    RelicDefinition { key: "rosin", name: "Rosin", description: "Every hit applies 1 vulnerable" },
    RelicDefinition { key: "baton", name: "Baton", description: "+1 mana on the first turn" },
    RelicDefinition { key: "tuning_fork", name: "Tuning Fork", description: "Keep up to 10 block between turns" },
    RelicDefinition { key: "sheet_music", name: "Ancient Score", description: "Starting cards are one level higher" },
    RelicDefinition { key: "beethoven_ear", name: "Deafened Cochlea", description: "Double damage below 30% HP" },
    RelicDefinition { key: "paganini_string", name: "Snapped String", description: "First attack costs 1 less but deals 2 to its performer" },
    RelicDefinition { key: "mozart_quill", name: "Requiem Quill", description: "When an ally falls, deal 30 true damage" },
    RelicDefinition { key: "bach_lens", name: "Fugue Lens", description: "Three cards of one kind in a row: draw 1, +1 mana" },
    RelicDefinition { key: "liszt_bullet", name: "Magic Bullet", description: "Multi-hit attacks hit once more" },
];

/// Relics that change setup instead of registering hooks.
pub const SHEET_MUSIC: &str = "sheet_music";

#[must_use]
pub fn relic(key: &str) -> Option<&'static RelicDefinition> {
    RELICS.iter().find(|r| r.key == key)
}

const MOZART_USED: &str = "relic.mozart_quill.used";
const BACH_KIND: &str = "relic.bach_lens.kind";
const BACH_STREAK: &str = "relic.bach_lens.streak";

/// Self-damage on the first attack each turn.
struct SnappedString;

#[async_trait]
impl HookListener<Battle> for SnappedString {
    async fn on_event(&self, battle: &mut Battle, event: &mut HookEvent) -> Result<(), HookError> {
        let HookEvent::CardPlay(play) = event else {
            return Ok(());
        };
        let first_attack =
            battle.cards().kind_of(play.card) == Some(CardKind::Attack) && battle.state().counters.attacks_played == 1;
        if let (true, Some(performer)) = (first_attack, play.caster) {
            battle.damage_ally(None, performer, 2, true).await;
        }
        Ok(())
    }

    fn on_value(&self, battle: &Battle, query: &ValueQuery, cost: i64) -> Result<Option<i64>, HookError> {
        let ValueQuery::CardCost { card } = query else {
            return Ok(None);
        };
        let discounted =
            battle.cards().kind_of(*card) == Some(CardKind::Attack) && battle.state().counters.attacks_played == 0;
        Ok(discounted.then_some(cost - 1))
    }
}

/// Thirty piercing damage the first time an ally falls.
struct RequiemQuill;

#[async_trait]
impl HookListener<Battle> for RequiemQuill {
    async fn on_event(&self, battle: &mut Battle, _event: &mut HookEvent) -> Result<(), HookError> {
        if battle.state().battle_var(MOZART_USED) > 0 {
            return Ok(());
        }
        let Some(index) = battle.state().first_living_enemy() else {
            return Ok(());
        };
        battle.state_mut().set_battle_var(MOZART_USED, 1);
        battle.damage_enemy(None, index, 30, true).await;
        Ok(())
    }
}

/// Rewards three plays of the same card kind in a row.
struct FugueLens;

#[async_trait]
impl HookListener<Battle> for FugueLens {
    async fn on_event(&self, battle: &mut Battle, event: &mut HookEvent) -> Result<(), HookError> {
        let HookEvent::AfterCardPlay { card, caster, .. } = *event else {
            return Ok(());
        };
        let code = battle
            .cards()
            .kind_of(card)
            .ok_or_else(|| HookError::Listener(format!("unknown {card}")))?
            .code();
        let state = battle.state_mut();
        let streak = if state.battle_var(BACH_KIND) == code {
            state.battle_var(BACH_STREAK) + 1
        } else {
            1
        };
        state.set_battle_var(BACH_KIND, code);
        if streak < 3 {
            state.set_battle_var(BACH_STREAK, streak);
            return Ok(());
        }
        state.set_battle_var(BACH_STREAK, 0);
        battle.draw_cards(1).await;
        battle.gain_mana(1, caster);
        Ok(())
    }
}

fn listeners(key: &str) -> Vec<(HookKind, Arc<dyn HookListener<Battle>>)> {
    match key {
        "metronome" => vec![(
            HookKind::CardPlay,
            event_fn(|battle: &mut Battle, event| {
                if let HookEvent::CardPlay(play) = event {
                    let attack = battle.cards().kind_of(play.card) == Some(CardKind::Attack);
                    if attack && battle.state().counters.attacks_played == 1 {
                        play.triggers += 1;
                    }
                }
                Ok(())
            }),
        )],
        "rosin" => vec![(
            HookKind::DamageDealt,
            event_fn(|battle: &mut Battle, event| {
                let HookEvent::DamageDealt { source: Some(source), target, amount, .. } = *event else {
                    return Ok(());
                };
                let from_party = battle.unit(source).is_some_and(|u| u.side == Side::Ally);
                let on_enemy = battle.unit(target).is_some_and(|u| u.side == Side::Enemy);
                if from_party && on_enemy && amount > 0 {
                    battle.add_status(target, StatusId::VULNERABLE, 1);
                }
                Ok(())
            }),
        )],
        "baton" => vec![(
            HookKind::ModifyTurnMana,
            value_fn(|_: &Battle, query, mana| matches!(query, ValueQuery::TurnMana { turn: 1 }).then_some(mana + 1)),
        )],
        "tuning_fork" => vec![(
            HookKind::ModifyBlockRetain,
            value_fn(|_: &Battle, _, retain| Some(retain.max(10))),
        )],
        "beethoven_ear" => vec![(
            HookKind::ModifyDamage,
            value_fn(|battle: &Battle, query, value| {
                let ValueQuery::Damage { caster: Some(caster), .. } = query else {
                    return None;
                };
                let desperate = battle.unit(*caster).is_some_and(|u| u.hp_fraction() < 0.3);
                desperate.then_some(value * 2)
            }),
        )],
        "paganini_string" => {
            let string: Arc<dyn HookListener<Battle>> = Arc::new(SnappedString);
            vec![(HookKind::ModifyCardCost, Arc::clone(&string)), (HookKind::CardPlay, string)]
        }
        "mozart_quill" => {
            let quill: Arc<dyn HookListener<Battle>> = Arc::new(RequiemQuill);
            vec![(HookKind::AllyDeath, quill)]
        }
        "bach_lens" => {
            let lens: Arc<dyn HookListener<Battle>> = Arc::new(FugueLens);
            vec![(HookKind::AfterCardPlay, lens)]
        }
        "liszt_bullet" => vec![(
            HookKind::ModifyHitCount,
            value_fn(|_: &Battle, query, hits| {
                matches!(query, ValueQuery::HitCount { base, .. } if *base > 1).then_some(hits + 1)
            }),
        )],
        _ => Vec::new(),
    }
}

/// Register every listener of relic `key`. Returns false for unknown
/// relics.
pub fn register_relic(hooks: &mut HookRegistry<Battle>, key: &str) -> bool {
    let Some(def) = relic(key) else {
        return false;
    };
    for (kind, listener) in listeners(key) {
        hooks.register(kind, def.source(), listener, 0);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_relic_is_known() {
        for def in RELICS {
            assert_eq!(relic(def.key), Some(def));
            if def.key != SHEET_MUSIC {
                assert!(!listeners(def.key).is_empty(), "{} registers nothing", def.key);
            }
        }
    }

    #[test]
    fn test_paganini_registers_two_hooks_under_one_source() {
        let mut hooks = HookRegistry::new();
        assert!(register_relic(&mut hooks, "paganini_string"));
        assert_eq!(hooks.count(HookKind::ModifyCardCost), 1);
        assert_eq!(hooks.count(HookKind::CardPlay), 1);
        assert_eq!(hooks.unregister_all(&"relic.paganini_string".into()), 2);
    }

    #[test]
    fn test_unknown_relic() {
        let mut hooks = HookRegistry::<Battle>::new();
        assert!(!register_relic(&mut hooks, "kazoo"));
    }
}
