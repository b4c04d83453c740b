//! The battle: turn state machine, card play and the mutation primitives
//! every effect goes through.
//!
//! ## Flow
//!
//! ```text
//! Idle --prepare--> Prepare --begin--> Player <--> (card resolution)
//!                                        |
//!                                    end_turn
//!                                        v
//!                                    EnemyTurn --> Player --> ... --> Victory | Defeat
//! ```
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use rust_cadence::battle::{Battle, BattleContent, InstantScheduler};
//! use rust_cadence::core::{BattleConfig, Phase};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let mut battle = Battle::new(BattleConfig::default(), BattleContent::default())
//!     .with_scheduler(Arc::new(InstantScheduler));
//! battle.add_ally("pianist", "Pianist", 60);
//!
//! battle.prepare().await.unwrap();
//! battle.begin().await.unwrap();
//! assert_eq!(battle.phase(), Phase::Player);
//! assert_eq!(battle.state().turn, 1);
//! # });
//! ```
//!
//! Mutations made by cards, enemies and extensions all go through the
//! methods in `actions` so the damage pipeline, hooks and terminal checks
//! are applied uniformly.

pub mod scheduler;
pub mod notice;
mod actions;
mod flow;
mod play;

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::broadcast;

use crate::ai::{Behavior, Encounter, EnemyDefinition, PlanContext};
use crate::cards::{CardDefinition, CardId, CardRegistry};
use crate::core::{BattleConfig, BattleState, Combatant, GameRng, Phase, Side, UnitId};
use crate::effects::CustomEffectRegistry;
use crate::hooks::{HookHost, HookRegistry, ValueQuery};
use crate::status::{StatusEngine, StatusTable};

pub use notice::{LogCategory, Notice, NoticeBus};
pub use play::SelectOutcome;
pub use scheduler::{InstantScheduler, Pause, RecordingScheduler, Scheduler, Step, TokioScheduler};

/// Read-only content tables shared by battles.
#[derive(Clone, Debug)]
pub struct BattleContent {
    pub cards: Arc<CardRegistry>,
    pub statuses: Arc<StatusTable>,
    pub customs: Arc<CustomEffectRegistry>,
}

impl Default for BattleContent {
    fn default() -> Self {
        Self::new(CardRegistry::new(), StatusTable::standard(), CustomEffectRegistry::new())
    }
}

impl BattleContent {
    #[must_use]
    pub fn new(cards: CardRegistry, statuses: StatusTable, customs: CustomEffectRegistry) -> Self {
        Self {
            cards: Arc::new(cards),
            statuses: Arc::new(statuses),
            customs: Arc::new(customs),
        }
    }
}

/// One battle instance.
pub struct Battle {
    state: BattleState,
    config: BattleConfig,
    cards: Arc<CardRegistry>,
    status: StatusEngine,
    customs: Arc<CustomEffectRegistry>,
    behaviors: FxHashMap<UnitId, Arc<Behavior>>,
    hooks: HookRegistry<Battle>,
    scheduler: Arc<dyn Scheduler>,
    notices: NoticeBus,
    rng: GameRng,
}

impl HookHost for Battle {
    fn hooks(&self) -> &HookRegistry<Self> {
        &self.hooks
    }
}

impl Battle {
    /// Create an idle battle. Pauses use real time until another scheduler
    /// is installed.
    #[must_use]
    pub fn new(config: BattleConfig, content: BattleContent) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            state: BattleState::new(config.starting_mana, config.draw_per_turn),
            status: StatusEngine::new(content.statuses),
            cards: content.cards,
            customs: content.customs,
            behaviors: FxHashMap::default(),
            hooks: HookRegistry::new(),
            scheduler: Arc::new(TokioScheduler),
            notices: NoticeBus::new(),
            rng,
            config,
        }
    }

    /// Replace the scheduler (builder pattern).
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BattleState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn status_engine(&self) -> &StatusEngine {
        &self.status
    }

    #[must_use]
    pub fn customs(&self) -> &CustomEffectRegistry {
        &self.customs
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry<Battle> {
        &mut self.hooks
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    #[must_use]
    pub fn notices(&self) -> &NoticeBus {
        &self.notices
    }

    /// Subscribe to presentation notices.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Victory or defeat reached.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Combatant> {
        self.state.unit(id)
    }

    // === Setup ===

    /// Add an ally at the end of the formation, which is the front line.
    pub fn add_ally(&mut self, key: impl Into<String>, name: impl Into<String>, max_hp: i64) -> UnitId {
        let (key, name) = (key.into(), name.into());
        self.state.add_unit(Side::Ally, |id| Combatant::ally(id, key, name, max_hp))
    }

    /// Spawn an enemy scaled for the party level and encounter tier.
    pub fn add_enemy(&mut self, definition: &EnemyDefinition, encounter: Encounter) -> UnitId {
        let max_hp = definition.max_hp(self.config.party_level, encounter);
        let id = self.state.add_unit(Side::Enemy, |id| {
            Combatant::enemy(id, definition.key.clone(), definition.name.clone(), max_hp)
        });
        self.behaviors.insert(id, Arc::clone(&definition.behavior));
        id
    }

    /// Replace the behavior of an enemy.
    pub fn set_behavior(&mut self, enemy: UnitId, behavior: Arc<Behavior>) {
        self.behaviors.insert(enemy, behavior);
    }

    /// Load the deck into the draw pile and shuffle it.
    pub fn set_deck(&mut self, deck: Vec<CardId>) {
        self.state.piles.set_deck(deck);
        self.state.piles.shuffle_draw(&mut self.rng);
    }

    /// Load the deck in the given order. The last card is drawn first.
    pub fn set_deck_ordered(&mut self, deck: Vec<CardId>) {
        self.state.piles.set_deck(deck);
    }

    // === Derived values ===

    #[must_use]
    pub fn card_level(&self, card: CardId) -> u32 {
        self.config.card_level(card)
    }

    /// Effective cost through `ModifyCardCost`, floored at 0.
    #[must_use]
    pub fn card_cost(&self, card: CardId) -> i64 {
        let base = self.cards.get(card).map_or(0, |def| def.cost);
        self.hooks.process_value(self, &ValueQuery::CardCost { card }, base).max(0)
    }

    /// Whether the performers a card needs are standing.
    #[must_use]
    pub fn is_card_playable(&self, card: &CardDefinition) -> bool {
        let standing = |role: &str| {
            self.state
                .ally_by_key(role)
                .and_then(|id| self.state.unit(id))
                .is_some_and(Combatant::is_alive)
        };
        if !card.requires.is_empty() {
            return card.requires.iter().all(|role| standing(role.as_str()));
        }
        card.owner.as_deref().map_or(true, standing)
    }

    #[must_use]
    pub fn plan_context(&self) -> PlanContext {
        PlanContext {
            turn: self.state.turn,
            party_level: self.config.party_level,
        }
    }

    // === Plumbing ===

    pub(crate) fn notify(&self, notice: Notice) {
        self.notices.publish(notice);
    }

    pub(crate) fn log(&self, message: impl Into<String>, category: LogCategory) {
        self.notices.publish(Notice::log(message, category));
    }

    /// Suspend for a pause with its configured duration.
    pub async fn pause(&self, pause: Pause) {
        self.pause_for(pause, pause.millis(&self.config.timings)).await;
    }

    /// Suspend for a pause with an explicit duration.
    pub async fn pause_for(&self, pause: Pause, millis: u64) {
        self.scheduler.pause(Step { pause, millis }).await;
    }
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("phase", &self.state.phase)
            .field("turn", &self.state.turn)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
