//! Hook system integration tests.
//!
//! These tests verify hooks reach the battle at the documented points and
//! that value pipelines shape costs, damage and turn mana.

use std::sync::{Arc, Mutex};

use rust_cadence::ai::{Behavior, EnemyDefinition, Encounter, IntentKind};
use rust_cadence::battle::{Battle, BattleContent, InstantScheduler};
use rust_cadence::cards::{CardDefinition, CardId, CardKind, CardRegistry};
use rust_cadence::core::{BattleConfig, BattleError, UnitId};
use rust_cadence::effects::{CustomEffectRegistry, EffectDescriptor};
use rust_cadence::hooks::{event_fn, value_fn, HookEvent, HookHost, HookKind, SourceId};
use rust_cadence::status::StatusTable;

const HEAVY: CardId = CardId::new(1);

fn content() -> BattleContent {
    let mut cards = CardRegistry::new();
    cards.register(
        CardDefinition::new(HEAVY, "Heavy", CardKind::Attack)
            .with_cost(2)
            .with_value(8)
            .with_effect(EffectDescriptor::damage()),
    );
    BattleContent::new(cards, StatusTable::standard(), CustomEffectRegistry::new())
}

fn brute() -> EnemyDefinition {
    EnemyDefinition::new("brute", "Brute", 1.0, Behavior::new().then(IntentKind::Attack))
}

fn battle() -> (Battle, UnitId) {
    let mut battle = Battle::new(BattleConfig::default(), content()).with_scheduler(Arc::new(InstantScheduler));
    let ally = battle.add_ally("cellist", "Cellist", 40);
    battle.add_enemy(&brute(), Encounter::Normal);
    battle.set_deck_ordered(vec![HEAVY; 8]);
    (battle, ally)
}

/// Test lifecycle events fire in order with the right payloads.
#[tokio::test]
async fn test_lifecycle_order() {
    let (mut battle, _) = battle();
    let seen = Arc::new(Mutex::new(Vec::new()));
    for kind in [HookKind::BattleInit, HookKind::BattleStart, HookKind::TurnStart, HookKind::EnemyTurnStart] {
        let seen = Arc::clone(&seen);
        battle.hooks_mut().register(
            kind,
            "journal",
            event_fn(move |_: &mut Battle, event| {
                seen.lock().unwrap().push(format!("{:?}", event.kind()));
                Ok(())
            }),
            0,
        );
    }

    battle.prepare().await.unwrap();
    battle.begin().await.unwrap();
    battle.end_turn().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec!["BattleInit", "BattleStart", "TurnStart", "EnemyTurnStart", "TurnStart"]
    );
}

/// Test cost modifiers fold in priority order and the result floors at 0.
#[tokio::test]
async fn test_card_cost_floor() {
    let (mut battle, _) = battle();
    battle.hooks_mut().register(HookKind::ModifyCardCost, "discount", value_fn(|_: &Battle, _, c| Some(c - 5)), 0);
    battle.prepare().await.unwrap();
    battle.begin().await.unwrap();

    assert_eq!(battle.card_cost(HEAVY), 0);
    battle.play_card(0, 0).await.unwrap();
    assert_eq!(battle.state().mana.current, 3);
}

/// Test ModifyDamage shapes the card value before the multiplier.
#[tokio::test]
async fn test_damage_modifier() {
    let (mut battle, _) = battle();
    battle.hooks_mut().register(HookKind::ModifyDamage, "double", value_fn(|_: &Battle, _, v| Some(v * 2)), 0);
    battle.hooks_mut().register(HookKind::ModifyDamage, "plus", value_fn(|_: &Battle, _, v| Some(v + 1)), 10);
    battle.prepare().await.unwrap();
    battle.begin().await.unwrap();

    battle.play_card(0, 0).await.unwrap();

    // (8 + 1) * 2
    assert_eq!(battle.state().enemy(0).unwrap().hp, 38 - 18);
}

/// Test the turn-mana pipeline sets mana at turn start.
#[tokio::test]
async fn test_turn_mana_pipeline() {
    let (mut battle, _) = battle();
    battle.hooks_mut().register(HookKind::ModifyTurnMana, "surge", value_fn(|_: &Battle, _, m| Some(m + 2)), 0);
    battle.prepare().await.unwrap();
    battle.begin().await.unwrap();

    assert_eq!(battle.state().mana.current, 5);
    battle.play_card(0, 0).await.unwrap();
    assert_eq!(battle.state().mana.current, 3);
}

/// Test DamageDealt reports hits on allies and AllyDeath fires once.
#[tokio::test]
async fn test_damage_and_death_events() {
    let mut battle = Battle::new(BattleConfig::default(), content()).with_scheduler(Arc::new(InstantScheduler));
    battle.add_ally("vocalist", "Vocalist", 50);
    let front = battle.add_ally("cellist", "Cellist", 4);
    battle.add_enemy(&brute(), Encounter::Normal);
    battle.set_deck_ordered(vec![HEAVY; 8]);

    let deaths = Arc::new(Mutex::new(Vec::new()));
    let hits = Arc::new(Mutex::new(Vec::new()));
    {
        let deaths = Arc::clone(&deaths);
        battle.hooks_mut().register(
            HookKind::AllyDeath,
            "mourner",
            event_fn(move |_: &mut Battle, event| {
                if let HookEvent::AllyDeath { victim, .. } = event {
                    deaths.lock().unwrap().push(*victim);
                }
                Ok(())
            }),
            0,
        );
        let hits = Arc::clone(&hits);
        battle.hooks_mut().register(
            HookKind::DamageDealt,
            "scorer",
            event_fn(move |_: &mut Battle, event| {
                if let HookEvent::DamageDealt { target, amount, lethal, .. } = event {
                    hits.lock().unwrap().push((*target, *amount, *lethal));
                }
                Ok(())
            }),
            0,
        );
    }

    battle.prepare().await.unwrap();
    battle.begin().await.unwrap();
    battle.end_turn().await.unwrap();

    assert_eq!(*deaths.lock().unwrap(), vec![front]);
    assert_eq!(*hits.lock().unwrap(), vec![(front, 4, true)]);
    assert!(!battle.is_over());
    assert_eq!(battle.state().front_ally().map(|id| battle.unit(id).unwrap().key.clone()), Some("vocalist".into()));
}

/// Test a failing listener is skipped and the battle carries on.
#[tokio::test]
async fn test_failing_listener_is_isolated() {
    let (mut battle, _) = battle();
    battle.hooks_mut().register(
        HookKind::TurnStart,
        "broken",
        event_fn(|_: &mut Battle, _| Err(rust_cadence::core::HookError::Listener("boom".into()))),
        10,
    );
    battle.hooks_mut().register(
        HookKind::TurnStart,
        "healthy",
        event_fn(|battle: &mut Battle, _| {
            battle.state_mut().set_turn_var("healthy", 1);
            Ok(())
        }),
        0,
    );

    battle.prepare().await.unwrap();
    battle.begin().await.unwrap();

    assert_eq!(battle.state().turn_var("healthy"), 1);
}

/// Test removing an owner drops every listener it registered.
#[tokio::test]
async fn test_unregister_owner() {
    let (mut battle, _) = battle();
    let owner = SourceId::new("relic.cursed");
    battle.hooks_mut().register(HookKind::ModifyCardCost, owner.clone(), value_fn(|_: &Battle, _, c| Some(c + 9)), 0);
    battle.hooks_mut().register(HookKind::ModifyDamage, owner.clone(), value_fn(|_: &Battle, _, v| Some(v + 9)), 0);

    assert_eq!(battle.hooks_mut().unregister_all(&owner), 2);
    assert!(battle.hooks().is_empty());

    battle.prepare().await.unwrap();
    battle.begin().await.unwrap();
    assert_eq!(battle.card_cost(HEAVY), 2);
    battle.play_card(0, 0).await.unwrap();
    assert_eq!(
        battle.play_card(0, 0).await,
        Err(BattleError::InsufficientMana { cost: 2, available: 1 })
    );
}
