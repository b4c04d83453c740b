//! Turn state machine integration tests.
//!
//! These tests drive whole turns: player input, the enemy phase and the
//! terminal states.

use std::sync::Arc;

use rust_cadence::ai::{Behavior, EnemyDefinition, Encounter, IntentKind};
use rust_cadence::battle::{Battle, BattleContent, InstantScheduler, Notice, SelectOutcome};
use rust_cadence::cards::{CardDefinition, CardId, CardKind, CardRegistry};
use rust_cadence::core::{BattleConfig, BattleError, Phase, UnitId};
use rust_cadence::effects::{CustomEffectRegistry, EffectDescriptor, TargetScope};
use rust_cadence::games::ensemble;
use rust_cadence::status::{StatusId, StatusTable};

const STRIKE: CardId = CardId::new(1);
const GUARD: CardId = CardId::new(2);
const FINALE: CardId = CardId::new(3);
const WAVE: CardId = CardId::new(4);

fn content() -> BattleContent {
    let mut cards = CardRegistry::new();
    cards.register(
        CardDefinition::new(STRIKE, "Strike", CardKind::Attack)
            .with_cost(1)
            .with_value(10)
            .with_effect(EffectDescriptor::damage()),
    );
    cards.register(
        CardDefinition::new(GUARD, "Guard", CardKind::Defend)
            .with_cost(1)
            .with_value(5)
            .with_effect(EffectDescriptor::block()),
    );
    cards.register(
        CardDefinition::new(FINALE, "Finale", CardKind::Attack)
            .with_cost(4)
            .with_value(40)
            .with_effect(EffectDescriptor::damage()),
    );
    cards.register(
        CardDefinition::new(WAVE, "Wave", CardKind::Attack)
            .with_cost(1)
            .with_value(2)
            .with_effect(EffectDescriptor::damage().target(TargetScope::All)),
    );
    BattleContent::new(cards, StatusTable::standard(), CustomEffectRegistry::new())
}

/// An enemy that always attacks for 6 (party level 1).
fn brute(hp_scale: f64) -> EnemyDefinition {
    EnemyDefinition::new("brute", "Brute", hp_scale, Behavior::new().then(IntentKind::Attack))
}

fn setup(ally_hp: i64, enemy_scale: f64, deck: Vec<CardId>) -> (Battle, UnitId, UnitId) {
    let mut battle = Battle::new(BattleConfig::default(), content()).with_scheduler(Arc::new(InstantScheduler));
    let ally = battle.add_ally("cellist", "Cellist", ally_hp);
    let enemy = battle.add_enemy(&brute(enemy_scale), Encounter::Normal);
    battle.set_deck_ordered(deck);
    (battle, ally, enemy)
}

async fn start(battle: &mut Battle) {
    battle.prepare().await.unwrap();
    battle.begin().await.unwrap();
}

/// Test the opening turn: phase, mana, hand and the first intent.
#[tokio::test]
async fn test_opening_turn() {
    let (mut battle, _, enemy) = setup(50, 1.0, vec![STRIKE; 8]);
    assert_eq!(battle.phase(), Phase::Idle);

    battle.prepare().await.unwrap();
    assert_eq!(battle.phase(), Phase::Prepare);
    let intent = battle.unit(enemy).unwrap().intent.clone().unwrap();
    assert_eq!((intent.kind, intent.value), (IntentKind::Attack, 6));

    battle.begin().await.unwrap();
    assert_eq!(battle.phase(), Phase::Player);
    assert_eq!(battle.state().turn, 1);
    assert_eq!(battle.state().mana.current, 3);
    assert_eq!(battle.state().piles.hand().len(), 5);
    assert!(!battle.state().processing);
}

/// Test input is refused outside the player phase.
#[tokio::test]
async fn test_wrong_phase() {
    let (mut battle, _, _) = setup(50, 1.0, vec![STRIKE; 8]);
    assert_eq!(
        battle.end_turn().await,
        Err(BattleError::WrongPhase { actual: Phase::Idle })
    );
    assert_eq!(battle.begin().await, Err(BattleError::WrongPhase { actual: Phase::Idle }));
}

/// Test input is refused while the lock is held.
#[tokio::test]
async fn test_busy_lock() {
    let (mut battle, _, _) = setup(50, 1.0, vec![STRIKE; 8]);
    start(&mut battle).await;
    battle.state_mut().processing = true;

    assert_eq!(battle.play_card(0, 0).await, Err(BattleError::Busy));
    assert_eq!(battle.end_turn().await, Err(BattleError::Busy));
    assert_eq!(battle.select_card(0).await, Err(BattleError::Busy));
    assert_eq!(battle.state().piles.hand().len(), 5);
}

/// Test a card the party cannot afford is rejected with no side effects.
#[tokio::test]
async fn test_insufficient_mana() {
    let (mut battle, _, enemy) = setup(50, 1.0, vec![FINALE; 6]);
    start(&mut battle).await;

    assert_eq!(
        battle.play_card(0, 0).await,
        Err(BattleError::InsufficientMana { cost: 4, available: 3 })
    );
    assert_eq!(battle.state().mana.current, 3);
    assert_eq!(battle.state().piles.hand().len(), 5);
    assert_eq!(battle.unit(enemy).unwrap().hp, 38);
    assert!(!battle.state().processing);
}

/// Test select and target: toggling, explicit dead targets and fallback.
#[tokio::test]
async fn test_select_and_target() {
    let mut battle = Battle::new(BattleConfig::default(), content()).with_scheduler(Arc::new(InstantScheduler));
    battle.add_ally("cellist", "Cellist", 50);
    let first = battle.add_enemy(&brute(1.0), Encounter::Normal);
    battle.add_enemy(&brute(1.0), Encounter::Normal);
    battle.set_deck_ordered(vec![STRIKE; 8]);
    start(&mut battle).await;

    assert_eq!(battle.target_enemy(None).await, Err(BattleError::NothingSelected));
    assert_eq!(battle.select_card(0).await, Ok(SelectOutcome::Selected));
    assert_eq!(battle.select_card(0).await, Ok(SelectOutcome::Deselected));
    assert_eq!(battle.select_card(0).await, Ok(SelectOutcome::Selected));

    {
        let unit = battle.state_mut().unit_mut(first).unwrap();
        unit.hp = 0;
        unit.dead = true;
    }
    assert_eq!(battle.target_enemy(Some(0)).await, Err(BattleError::InvalidTarget(0)));
    assert_eq!(battle.state().selected, Some(0));

    battle.target_enemy(None).await.unwrap();
    assert_eq!(battle.state().enemy(1).unwrap().hp, 28);
    assert_eq!(battle.state().selected, None);
}

/// Test the hovered enemy wins over the first living one.
#[tokio::test]
async fn test_hovered_target() {
    let mut battle = Battle::new(BattleConfig::default(), content()).with_scheduler(Arc::new(InstantScheduler));
    battle.add_ally("cellist", "Cellist", 50);
    battle.add_enemy(&brute(1.0), Encounter::Normal);
    battle.add_enemy(&brute(1.0), Encounter::Normal);
    battle.set_deck_ordered(vec![STRIKE; 8]);
    start(&mut battle).await;

    battle.select_card(0).await.unwrap();
    battle.hover_enemy(Some(1));
    battle.target_enemy(None).await.unwrap();

    assert_eq!(battle.state().enemy(0).unwrap().hp, 38);
    assert_eq!(battle.state().enemy(1).unwrap().hp, 28);
}

/// Test a non-targeted card plays as soon as it is selected.
#[tokio::test]
async fn test_untargeted_card_plays_on_select() {
    let (mut battle, ally, _) = setup(50, 1.0, vec![GUARD; 6]);
    start(&mut battle).await;

    assert_eq!(battle.select_card(0).await, Ok(SelectOutcome::Played));
    assert_eq!(battle.unit(ally).unwrap().block, 5);
    assert_eq!(battle.state().mana.current, 2);
}

/// Test a full round trip: enemy attack, block decay and the next turn.
#[tokio::test]
async fn test_enemy_turn_round_trip() {
    let (mut battle, ally, _) = setup(50, 1.0, vec![GUARD; 12]);
    start(&mut battle).await;
    battle.play_card(0, 0).await.unwrap();
    battle.play_card(0, 0).await.unwrap();

    battle.end_turn().await.unwrap();

    // 10 block soaks the 6 hit, then halves at turn start
    let cellist = battle.unit(ally).unwrap();
    assert_eq!(cellist.hp, 50);
    assert_eq!(cellist.block, 2);
    assert_eq!(battle.phase(), Phase::Player);
    assert_eq!(battle.state().turn, 2);
    assert_eq!(battle.state().mana.current, 3);
    assert_eq!(battle.state().piles.hand().len(), 5);
    assert!(!battle.state().processing);
}

/// Test a stunned enemy skips its action and recovers next turn.
#[tokio::test]
async fn test_stunned_enemy_skips() {
    let (mut battle, ally, enemy) = setup(50, 1.0, vec![STRIKE; 12]);
    start(&mut battle).await;
    battle.add_status(enemy, StatusId::STUNNED, 1);

    battle.end_turn().await.unwrap();
    assert_eq!(battle.unit(ally).unwrap().hp, 50);
    assert!(!battle.unit(enemy).unwrap().statuses.contains(StatusId::STUNNED));

    battle.end_turn().await.unwrap();
    assert_eq!(battle.unit(ally).unwrap().hp, 44);
}

/// Test killing the last enemy wins and returns every card to the draw pile.
#[tokio::test]
async fn test_victory() {
    let (mut battle, _, _) = setup(50, 0.2, vec![STRIKE; 8]);
    let mut notices = battle.subscribe();
    start(&mut battle).await;

    battle.play_card(0, 0).await.unwrap();

    assert_eq!(battle.phase(), Phase::Victory);
    assert!(battle.is_over());
    assert_eq!(battle.state().piles.draw_pile().len(), 8);
    assert!(battle.state().piles.hand().is_empty());
    assert!(battle.state().piles.discard_pile().is_empty());
    assert!(!battle.state().processing);
    assert_eq!(battle.play_card(0, 0).await, Err(BattleError::WrongPhase { actual: Phase::Victory }));

    let mut cheered = false;
    while let Ok(notice) = notices.try_recv() {
        cheered |= notice == Notice::PlaySound("victory".into());
    }
    assert!(cheered);
}

/// Test losing the last ally ends the battle in defeat.
#[tokio::test]
async fn test_defeat() {
    let (mut battle, ally, _) = setup(5, 1.0, vec![STRIKE; 8]);
    start(&mut battle).await;

    battle.end_turn().await.unwrap();

    assert_eq!(battle.phase(), Phase::Defeat);
    assert!(battle.unit(ally).unwrap().dead);
    assert_eq!(battle.state().turn, 1);
    assert_eq!(battle.end_turn().await, Err(BattleError::WrongPhase { actual: Phase::Defeat }));
}

/// Test area damage finishing the last enemies wins once.
#[tokio::test]
async fn test_area_finish() {
    let mut battle = Battle::new(BattleConfig::default(), content()).with_scheduler(Arc::new(InstantScheduler));
    battle.add_ally("cellist", "Cellist", 50);
    battle.add_enemy(&brute(0.05), Encounter::Normal);
    battle.add_enemy(&brute(0.05), Encounter::Normal);
    battle.set_deck_ordered(vec![WAVE; 8]);
    start(&mut battle).await;

    // floor(38 * 0.05) = 1 HP each
    battle.select_card(0).await.unwrap();
    battle.target_enemy(None).await.unwrap();

    assert_eq!(battle.phase(), Phase::Victory);
}

/// Test formation swaps only while preparing.
#[tokio::test]
async fn test_formation_swap() {
    let mut battle = Battle::new(BattleConfig::default(), content()).with_scheduler(Arc::new(InstantScheduler));
    let back = battle.add_ally("vocalist", "Vocalist", 45);
    let front = battle.add_ally("cellist", "Cellist", 75);
    battle.add_enemy(&brute(1.0), Encounter::Normal);
    battle.set_deck_ordered(vec![STRIKE; 8]);

    assert!(battle.swap_allies(0, 1).is_err());
    battle.prepare().await.unwrap();
    assert_eq!(battle.state().front_ally(), Some(front));
    battle.swap_allies(0, 1).unwrap();
    assert_eq!(battle.state().front_ally(), Some(back));
    assert_eq!(battle.swap_allies(0, 7), Err(BattleError::InvalidFormation(0, 7)));
}

/// Route engine logs to the test output. `RUST_LOG=rust_cadence=debug`
/// shows every phase transition.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test the shipped ensemble runs several turns without getting stuck.
#[tokio::test]
async fn test_ensemble_smoke() {
    init_tracing();
    let mut battle = ensemble::new_battle(
        BattleConfig::default().with_seed(11),
        &["vocalist", "pianist", "cellist"],
        &["metronome", "tuning_fork", "rosin"],
    )
    .with_scheduler(Arc::new(InstantScheduler));
    ensemble::spawn(&mut battle, "discord", Encounter::Normal);
    start(&mut battle).await;

    let cellist = battle.state().ally_by_key("cellist").unwrap();
    assert_eq!(battle.unit(cellist).unwrap().block, 8);
    assert_eq!(battle.state().mana.current, 4);

    for _ in 0..8 {
        if battle.is_over() {
            break;
        }
        let mut index = battle.state().piles.hand().len();
        while index > 0 && !battle.is_over() {
            index -= 1;
            let aim = battle.state().first_living_enemy().unwrap_or(0);
            let _ = battle.play_card(index, aim).await;
        }
        if !battle.is_over() {
            battle.end_turn().await.unwrap();
        }
        assert!(!battle.state().processing);
    }

    let total = battle.state().piles.total();
    assert_eq!(total, 9);
}
