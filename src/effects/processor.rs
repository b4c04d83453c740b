//! Effect processor.
//!
//! Interprets one `EffectDescriptor` at a time against a battle. Each kind
//! has a fixed handler; every handler mutates the battle only through its
//! primitives (`damage_enemy`, `grant_block`, `draw_cards`, ...), so
//! statuses and hooks see every change.
//!
//! A missing target skips that effect only. The rest of the card's list
//! still runs.

use tracing::{debug, error, warn};

use crate::battle::{Battle, Notice, Pause};
use crate::cards::CardId;
use crate::core::error::EffectError;
use crate::core::UnitId;

use super::custom::CustomContext;
use super::descriptor::{EffectDescriptor, EffectKind, TargetScope};

/// The play an effect belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cast {
    pub card: Option<CardId>,
    pub caster: Option<UnitId>,
    /// Enemy roster index the play is aimed at.
    pub target_index: usize,
    /// Card value after `ModifyDamage` and the multiplier.
    pub card_value: i64,
    pub multiplier: f64,
    pub level: u32,
}

impl Cast {
    /// A cast with no card behind it, aimed at enemy 0.
    #[must_use]
    pub fn bare(caster: Option<UnitId>, value: i64) -> Self {
        Self {
            card: None,
            caster,
            target_index: 0,
            card_value: value,
            multiplier: 1.0,
            level: 0,
        }
    }

    #[must_use]
    pub fn at(mut self, target_index: usize) -> Self {
        self.target_index = target_index;
        self
    }
}

pub struct EffectProcessor;

impl EffectProcessor {
    /// Resolve the effect's value, honor its delay, expand area effects and
    /// run the handler.
    pub async fn apply(battle: &mut Battle, effect: &EffectDescriptor, cast: &Cast) {
        let value = effect.resolve_value(cast.card_value, cast.multiplier);

        if let Some(delay) = effect.delay_ms.filter(|&ms| ms > 0) {
            battle.pause_for(Pause::EffectDelay, delay).await;
            if battle.is_over() {
                return;
            }
        }

        if effect.target == TargetScope::All && effect.kind.fans_out() {
            for index in battle.state().living_enemies() {
                if battle.is_over() {
                    break;
                }
                if !battle.state().is_enemy_alive(index) {
                    continue;
                }
                Self::execute(battle, effect, &cast.at(index), value).await;
            }
            return;
        }

        Self::execute(battle, effect, cast, value).await;
    }

    /// Run the handler for the effect's kind with an already-resolved
    /// value.
    pub async fn execute(battle: &mut Battle, effect: &EffectDescriptor, cast: &Cast, value: i64) {
        match &effect.kind {
            EffectKind::Damage => Self::damage(battle, effect, cast, value).await,

            EffectKind::Heal => {
                if effect.target == TargetScope::All {
                    battle.heal_all(value);
                } else {
                    battle.heal_lowest(value);
                }
                if let Some(vfx) = &effect.vfx {
                    battle.notices().publish(Notice::SpawnVfx { vfx: vfx.clone(), target: None });
                }
            }

            EffectKind::Block => {
                let target = match effect.target {
                    TargetScope::All => {
                        battle.grant_block_all(value);
                        None
                    }
                    TargetScope::Caster => cast.caster.or_else(|| battle.state().front_ally()),
                    TargetScope::Single | TargetScope::Front => battle.state().front_ally(),
                };
                if let Some(id) = target {
                    battle.grant_block(id, value);
                }
                if let Some(vfx) = &effect.vfx {
                    battle.notices().publish(Notice::SpawnVfx { vfx: vfx.clone(), target });
                }
            }

            EffectKind::Draw => {
                let count = usize::try_from(value).unwrap_or(0);
                battle.draw_cards(count).await;
            }

            EffectKind::Mana => battle.gain_mana(value, cast.caster),

            EffectKind::Status { status, message } => {
                let Some(target) = Self::status_target(battle, effect.target, cast) else {
                    debug!(status = %status, index = cast.target_index, "status target missing, skipped");
                    return;
                };
                battle.add_status(target, *status, value);
                if let Some(text) = message {
                    battle.notices().publish(Notice::Toast(text.clone()));
                }
            }

            EffectKind::Vfx { id } => {
                let target = match effect.target {
                    TargetScope::Caster => cast.caster,
                    TargetScope::Front => battle.state().front_ally(),
                    TargetScope::All => None,
                    TargetScope::Single => battle.state().enemy_id(cast.target_index),
                };
                battle.notices().publish(Notice::SpawnVfx { vfx: id.clone(), target });
            }

            EffectKind::Toast { message } => battle.notices().publish(Notice::Toast(message.clone())),

            EffectKind::Custom { id } => {
                let Some(strategy) = battle.customs().get(*id) else {
                    warn!(custom = %id, "unknown custom effect, skipped");
                    return;
                };
                let ctx = CustomContext {
                    card: cast.card,
                    caster: cast.caster,
                    value,
                    multiplier: cast.multiplier,
                    target_index: cast.target_index,
                    level: cast.level,
                };
                match strategy.apply(battle, &ctx).await {
                    Ok(()) => {}
                    Err(EffectError::MissingTarget(index)) => {
                        debug!(custom = strategy.name(), index, "custom effect target missing, skipped");
                    }
                    Err(err) => error!(custom = strategy.name(), error = %err, "custom effect failed"),
                }
            }
        }
    }

    async fn damage(battle: &mut Battle, effect: &EffectDescriptor, cast: &Cast, value: i64) {
        let base = effect.hits.unwrap_or(1).max(1);
        let hits = battle.hit_count(cast.card, base);
        let interval = effect.interval_ms.unwrap_or(battle.config().timings.hit_interval);

        for hit in 0..hits {
            if battle.is_over() {
                break;
            }
            battle.damage_enemy(cast.caster, cast.target_index, value, effect.pierce).await;
            if let Some(vfx) = &effect.vfx {
                let target = battle.state().enemy_id(cast.target_index);
                battle.notices().publish(Notice::SpawnVfx { vfx: vfx.clone(), target });
            }
            if hit + 1 < hits {
                battle.pause_for(Pause::HitInterval, interval).await;
            }
        }
    }

    fn status_target(battle: &Battle, scope: TargetScope, cast: &Cast) -> Option<UnitId> {
        let state = battle.state();
        match scope {
            TargetScope::Caster => cast.caster.filter(|&id| state.unit(id).is_some_and(|u| u.is_alive())),
            TargetScope::Front => state.front_ally(),
            TargetScope::Single | TargetScope::All => state
                .enemy_id(cast.target_index)
                .filter(|_| state.is_enemy_alive(cast.target_index)),
        }
    }
}
