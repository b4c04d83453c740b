//! # rust-cadence
//!
//! Combat core for a turn-based, party-based musical deckbuilder.
//!
//! ## Design Principles
//!
//! 1. **Content Outside the Engine**: Cards, statuses, custom effects,
//!    roles, relics and enemies are data or listeners registered at setup.
//!    The battle knows none of them by name.
//!
//! 2. **One Mutation Path**: Every HP, block, mana and status change goes
//!    through the battle's primitives so status modifiers and hooks see it.
//!
//! 3. **Time Is Injected**: Pacing pauses go through a `Scheduler`. Tests
//!    use an instant one; presentation uses real time.
//!
//! ## Architecture
//!
//! - **Hooks**: Typed event and value hooks with priorities and owners.
//!   Events dispatch sequentially; values fold left in priority order.
//!
//! - **Effects**: Cards are ordered lists of descriptors interpreted one
//!   at a time. Non-declarative behavior is a `CustomEffect` strategy.
//!
//! - **Enemy AI**: Rules, then a pattern cycle, then a fallback pool,
//!   producing a telegraphed intent one turn ahead.
//!
//! - **Presentation**: The battle publishes `Notice`s on a broadcast bus.
//!   Nothing in the core waits on a listener.
//!
//! ## Modules
//!
//! - `core`: Units, battle state, RNG, configuration, errors
//! - `zones`: Draw, hand and discard piles
//! - `cards`: Card definitions and registry
//! - `status`: Status definitions and the status engine
//! - `hooks`: Hook registry and dispatch
//! - `effects`: Effect descriptors, processor and custom strategies
//! - `ai`: Enemy intents and planning
//! - `battle`: Turn state machine, card play and mutation primitives
//! - `games`: Shipped content

pub mod core;
pub mod zones;
pub mod cards;
pub mod status;
pub mod hooks;
pub mod effects;
pub mod ai;
pub mod battle;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Side, UnitId,
    Combatant, DamageOutcome,
    GameRng,
    BattleConfig, Timings,
    BattleError, ConfigError, EffectError, HookError,
    BattleState, ManaPool, Phase, TurnCounters,
};

pub use crate::zones::{CardPiles, Pile};

pub use crate::cards::{CardDefinition, CardId, CardKind, CardRegistry, CardTag};

pub use crate::status::{StatusDefinition, StatusEngine, StatusId, StatusTable};

pub use crate::hooks::{
    HookEvent, HookKind, ValueQuery, SourceId,
    HookListener, HookRegistry, HookHost,
    trigger, event_fn, value_fn,
};

pub use crate::effects::{
    EffectDescriptor, EffectKind, TargetScope,
    CustomEffect, CustomEffectId, CustomEffectRegistry,
    Cast, EffectProcessor,
};

pub use crate::ai::{
    Behavior, Condition, EnemyDefinition, EnemyPlanner, Encounter,
    Intent, IntentKind, PlanContext,
};

pub use crate::battle::{
    Battle, BattleContent,
    Notice, NoticeBus, LogCategory,
    Scheduler, InstantScheduler, TokioScheduler, RecordingScheduler, Pause,
    SelectOutcome,
};
