//! Effect processor integration tests.
//!
//! These tests play real cards through a battle and check that every
//! descriptor goes through the damage pipeline and the hook points.

use std::sync::Arc;

use rust_cadence::ai::{Behavior, EnemyDefinition, Encounter, IntentKind};
use rust_cadence::battle::{Battle, BattleContent, InstantScheduler, Pause, RecordingScheduler};
use rust_cadence::cards::{CardDefinition, CardId, CardKind, CardRegistry};
use rust_cadence::core::{BattleConfig, UnitId};
use rust_cadence::effects::{CustomEffectRegistry, EffectDescriptor, TargetScope};
use rust_cadence::hooks::{event_fn, HookEvent, HookKind};
use rust_cadence::status::{StatusId, StatusTable};

const STRIKE: CardId = CardId::new(1);
const LANCE: CardId = CardId::new(2);
const MEDLEY: CardId = CardId::new(3);
const SWEEP: CardId = CardId::new(4);
const VOLLEY: CardId = CardId::new(5);

fn cards() -> CardRegistry {
    let mut cards = CardRegistry::new();
    cards.register(
        CardDefinition::new(STRIKE, "Strike", CardKind::Attack)
            .with_cost(1)
            .with_value(10)
            .with_effect(EffectDescriptor::damage()),
    );
    cards.register(
        CardDefinition::new(LANCE, "Lance", CardKind::Attack)
            .with_cost(1)
            .with_value(10)
            .with_effect(EffectDescriptor::damage().piercing()),
    );
    cards.register(
        CardDefinition::new(MEDLEY, "Medley", CardKind::Attack)
            .with_cost(1)
            .with_value(6)
            .with_effect(EffectDescriptor::damage())
            .with_effect(EffectDescriptor::block().with_value(4))
            .with_effect(EffectDescriptor::draw(1)),
    );
    cards.register(
        CardDefinition::new(SWEEP, "Sweep", CardKind::Attack)
            .with_cost(1)
            .with_value(5)
            .with_effect(EffectDescriptor::damage().target(TargetScope::All)),
    );
    cards.register(
        CardDefinition::new(VOLLEY, "Volley", CardKind::Attack)
            .with_cost(1)
            .with_value(3)
            .with_effect(EffectDescriptor::damage().hits(3)),
    );
    cards
}

fn dummy() -> EnemyDefinition {
    // 38 HP at party level 1
    EnemyDefinition::new("dummy", "Dummy", 1.0, Behavior::new().then(IntentKind::Defend))
}

/// Battle in the player phase with `deck` in hand (five cards).
async fn ready(deck: Vec<CardId>, enemies: usize) -> (Battle, UnitId) {
    let content = BattleContent::new(cards(), StatusTable::standard(), CustomEffectRegistry::new());
    let mut battle = Battle::new(BattleConfig::default(), content).with_scheduler(Arc::new(InstantScheduler));
    let ally = battle.add_ally("pianist", "Pianist", 60);
    for _ in 0..enemies {
        battle.add_enemy(&dummy(), Encounter::Normal);
    }
    battle.set_deck_ordered(deck);
    battle.prepare().await.unwrap();
    battle.begin().await.unwrap();
    (battle, ally)
}

fn enemy_hp(battle: &Battle, index: usize) -> i64 {
    battle.state().enemy(index).unwrap().hp
}

/// Test strength then vulnerable: 10 -> 13 -> 19.
#[tokio::test]
async fn test_damage_pipeline_order() {
    let (mut battle, ally) = ready(vec![STRIKE; 5], 1).await;
    let enemy = battle.state().enemy_id(0).unwrap();
    battle.add_status(ally, StatusId::STRENGTH, 3);
    battle.add_status(enemy, StatusId::VULNERABLE, 1);

    battle.play_card(0, 0).await.unwrap();

    assert_eq!(enemy_hp(&battle, 0), 38 - 19);
    assert_eq!(battle.state().mana.current, 2);
}

/// Test block absorbs before HP and piercing skips it.
#[tokio::test]
async fn test_block_and_pierce() {
    let (mut battle, _) = ready(vec![STRIKE, LANCE, STRIKE, STRIKE, STRIKE], 1).await;
    let enemy = battle.state().enemy_id(0).unwrap();
    battle.state_mut().unit_mut(enemy).unwrap().block = 6;

    let strike = battle.state().piles.hand().iter().position(|&c| c == STRIKE).unwrap();
    battle.play_card(strike, 0).await.unwrap();
    assert_eq!(battle.state().enemy(0).unwrap().block, 0);
    assert_eq!(enemy_hp(&battle, 0), 38 - 4);

    battle.state_mut().unit_mut(enemy).unwrap().block = 6;
    let lance = battle.state().piles.hand().iter().position(|&c| c == LANCE).unwrap();
    battle.play_card(lance, 0).await.unwrap();
    assert_eq!(battle.state().enemy(0).unwrap().block, 6);
    assert_eq!(enemy_hp(&battle, 0), 38 - 14);
}

/// Test every descriptor of a card resolves exactly once.
#[tokio::test]
async fn test_each_effect_resolves_once() {
    let (mut battle, ally) = ready(vec![MEDLEY; 6], 1).await;
    assert_eq!(battle.state().piles.hand().len(), 5);

    battle.play_card(0, 0).await.unwrap();

    assert_eq!(enemy_hp(&battle, 0), 38 - 6);
    assert_eq!(battle.unit(ally).unwrap().block, 4);
    // one played, one drawn
    assert_eq!(battle.state().piles.hand().len(), 5);
    assert_eq!(battle.state().piles.discard_pile(), &[MEDLEY]);
}

/// Test area damage fans out over every living enemy.
#[tokio::test]
async fn test_area_damage_hits_all_living() {
    let (mut battle, _) = ready(vec![SWEEP; 5], 3).await;
    let downed = battle.state().enemy_id(1).unwrap();
    {
        let unit = battle.state_mut().unit_mut(downed).unwrap();
        unit.hp = 0;
        unit.dead = true;
    }

    battle.play_card(0, 0).await.unwrap();

    assert_eq!(enemy_hp(&battle, 0), 33);
    assert_eq!(enemy_hp(&battle, 1), 0);
    assert_eq!(enemy_hp(&battle, 2), 33);
}

/// Test a hook raising the trigger count replays the whole effect list
/// with a stagger pause between rounds.
#[tokio::test]
async fn test_double_trigger() {
    let recorder = Arc::new(RecordingScheduler::new());
    let content = BattleContent::new(cards(), StatusTable::standard(), CustomEffectRegistry::new());
    let mut battle = Battle::new(BattleConfig::default(), content).with_scheduler(recorder.clone());
    battle.add_ally("pianist", "Pianist", 60);
    battle.add_enemy(&dummy(), Encounter::Normal);
    battle.set_deck_ordered(vec![VOLLEY; 5]);
    battle.hooks_mut().register(
        HookKind::CardPlay,
        "echo",
        event_fn(|_: &mut Battle, event| {
            if let HookEvent::CardPlay(play) = event {
                play.triggers += 1;
            }
            Ok(())
        }),
        0,
    );
    battle.prepare().await.unwrap();
    battle.begin().await.unwrap();

    battle.play_card(0, 0).await.unwrap();

    // 3 hits x 3 damage, twice
    assert_eq!(enemy_hp(&battle, 0), 38 - 18);
    assert_eq!(recorder.count(Pause::TriggerStagger), 1);
    assert_eq!(recorder.count(Pause::HitInterval), 4);
    assert!(!battle.state().processing);
}

/// Test a ModifyHitCount listener adds hits to multi-hit damage.
#[tokio::test]
async fn test_hit_count_hook() {
    let (mut battle, _) = ready(vec![VOLLEY; 5], 1).await;
    battle.hooks_mut().register(
        HookKind::ModifyHitCount,
        "extra",
        rust_cadence::hooks::value_fn(|_: &Battle, _, hits| Some(hits + 1)),
        0,
    );

    battle.play_card(0, 0).await.unwrap();

    assert_eq!(enemy_hp(&battle, 0), 38 - 12);
}
