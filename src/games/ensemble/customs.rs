//! Custom effect strategies used by the ensemble card pool.

use async_trait::async_trait;

use crate::battle::{Battle, Notice, Pause};
use crate::cards::CardKind;
use crate::core::error::EffectError;
use crate::core::UnitId;
use crate::effects::{CustomContext, CustomEffect, CustomEffectId, CustomEffectRegistry};
use crate::status::StatusId;

pub const DETONATE: CustomEffectId = CustomEffectId::new(10);
pub const BLOCK_STRIKE: CustomEffectId = CustomEffectId::new(12);
pub const CRESCENDO: CustomEffectId = CustomEffectId::new(17);
pub const VARIATION: CustomEffectId = CustomEffectId::new(18);
pub const POLYPHONY: CustomEffectId = CustomEffectId::new(19);
pub const DOUBLE_STOP: CustomEffectId = CustomEffectId::new(20);
pub const UPBEAT: CustomEffectId = CustomEffectId::new(21);
pub const WEAKEN: CustomEffectId = CustomEffectId::new(22);
pub const FLUTTER: CustomEffectId = CustomEffectId::new(24);
pub const BREATH: CustomEffectId = CustomEffectId::new(25);
pub const RETAIN: CustomEffectId = CustomEffectId::new(29);
pub const HAND_SCALE: CustomEffectId = CustomEffectId::new(30);
pub const ADAGIO: CustomEffectId = CustomEffectId::new(104);

/// All strategies the card table references.
#[must_use]
pub fn custom_effects() -> CustomEffectRegistry {
    CustomEffectRegistry::new()
        .with(DETONATE, Detonate)
        .with(BLOCK_STRIKE, BlockStrike)
        .with(CRESCENDO, Crescendo)
        .with(VARIATION, Variation)
        .with(POLYPHONY, Polyphony)
        .with(DOUBLE_STOP, DoubleStop)
        .with(UPBEAT, Upbeat)
        .with(WEAKEN, Weaken)
        .with(FLUTTER, Flutter)
        .with(BREATH, Breath)
        .with(RETAIN, Retain)
        .with(HAND_SCALE, HandScale)
        .with(ADAGIO, Adagio)
}

fn scaled(amount: i64, multiplier: f64) -> i64 {
    (amount as f64 * multiplier).ceil() as i64
}

/// Id of the living enemy the card was aimed at.
fn living_target(battle: &Battle, ctx: &CustomContext) -> Result<UnitId, EffectError> {
    battle
        .state()
        .enemy_id(ctx.target_index)
        .filter(|&id| battle.unit(id).is_some_and(|u| u.is_alive()))
        .ok_or(EffectError::MissingTarget(ctx.target_index))
}

/// Hit the target `hits` times for `value`, pausing between hits.
async fn flurry(battle: &mut Battle, ctx: &CustomContext, hits: u32, value: i64) {
    for hit in 0..hits {
        if battle.is_over() {
            break;
        }
        if hit > 0 {
            battle.pause(Pause::HitInterval).await;
        }
        battle.damage_enemy(ctx.caster, ctx.target_index, value, false).await;
    }
}

/// Consume the target's resonance for `stacks * value` damage.
struct Detonate;

#[async_trait]
impl CustomEffect for Detonate {
    fn name(&self) -> &'static str {
        "detonate"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        let target = living_target(battle, ctx)?;
        let stacks = battle
            .unit(target)
            .map_or(0, |u| battle.status_engine().get_stack(u, StatusId::RESONANCE));
        let damage = stacks * ctx.value;
        battle.damage_enemy(ctx.caster, ctx.target_index, damage, false).await;
        battle.remove_status(target, StatusId::RESONANCE);
        battle.notices().publish(Notice::Shake);
        Ok(())
    }
}

/// Damage equal to the caster's block.
struct BlockStrike;

#[async_trait]
impl CustomEffect for BlockStrike {
    fn name(&self) -> &'static str {
        "block_strike"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        living_target(battle, ctx)?;
        let block = ctx.caster.and_then(|id| battle.unit(id)).map_or(0, |u| u.block);
        let damage = scaled(block, ctx.multiplier);
        battle.damage_enemy(ctx.caster, ctx.target_index, damage, false).await;
        battle.notices().publish(Notice::Shake);
        Ok(())
    }
}

/// Damage grows with every attack-tagged play this battle.
struct Crescendo;

#[async_trait]
impl CustomEffect for Crescendo {
    fn name(&self) -> &'static str {
        "crescendo"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        living_target(battle, ctx)?;
        let bonus = scaled(i64::from(battle.state().crescendo), ctx.multiplier);
        battle.damage_enemy(ctx.caster, ctx.target_index, ctx.value + bonus, false).await;
        Ok(())
    }
}

/// Boost the multiplier of the next card played.
struct Variation;

#[async_trait]
impl CustomEffect for Variation {
    fn name(&self) -> &'static str {
        "variation"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        let bonus = 0.5 + 0.1 * f64::from(ctx.level);
        battle.state_mut().variation_bonus = bonus;
        let percent = (bonus * 100.0).round() as i64;
        battle.notices().publish(Notice::Toast(format!("Next card +{percent}%")));
        Ok(())
    }
}

/// Draw cards; gain mana if any of them is not an attack.
struct Polyphony;

#[async_trait]
impl CustomEffect for Polyphony {
    fn name(&self) -> &'static str {
        "polyphony"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        let count = 2 + (ctx.level as usize + 1) / 2;
        let drawn = battle.draw_cards(count).await;
        let mixed = drawn
            .iter()
            .any(|&card| battle.cards().kind_of(card).is_some_and(|k| k != CardKind::Attack));
        if mixed {
            battle.gain_mana(1 + i64::from(ctx.level / 2), ctx.caster);
        }
        Ok(())
    }
}

/// Three hits, plus one for each debuff on the target.
struct DoubleStop;

#[async_trait]
impl CustomEffect for DoubleStop {
    fn name(&self) -> &'static str {
        "double_stop"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        let target = living_target(battle, ctx)?;
        let debuffs = battle.unit(target).map_or(0, |u| {
            let engine = battle.status_engine();
            u32::from(engine.get_stack(u, StatusId::VULNERABLE) > 0) + u32::from(engine.has_status(u, StatusId::STUNNED))
        });
        let hits = battle.hit_count(ctx.card, 3 + debuffs);
        flurry(battle, ctx, hits, ctx.value).await;
        Ok(())
    }
}

/// Mana and a card; upgraded copies also shield the front line.
struct Upbeat;

#[async_trait]
impl CustomEffect for Upbeat {
    fn name(&self) -> &'static str {
        "upbeat"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        battle.gain_mana(1 + i64::from(ctx.level / 2), ctx.caster);
        battle.draw_cards(1).await;
        if ctx.level > 0 {
            if let Some(front) = battle.state().front_ally() {
                battle.grant_block(front, 4);
            }
        }
        Ok(())
    }
}

/// Cut the target's outgoing damage until its turn ends.
struct Weaken;

#[async_trait]
impl CustomEffect for Weaken {
    fn name(&self) -> &'static str {
        "weaken"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        let target = living_target(battle, ctx)?;
        battle.add_status(target, StatusId::WEAKENED, 2 + i64::from(ctx.level));
        Ok(())
    }
}

/// One hit per mana spent this turn.
struct Flutter;

#[async_trait]
impl CustomEffect for Flutter {
    fn name(&self) -> &'static str {
        "flutter"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        living_target(battle, ctx)?;
        let spent = u32::try_from(battle.state().counters.mana_spent.max(1)).unwrap_or(1);
        let hits = battle.hit_count(ctx.card, spent);
        flurry(battle, ctx, hits, ctx.value).await;
        Ok(())
    }
}

struct Breath;

#[async_trait]
impl CustomEffect for Breath {
    fn name(&self) -> &'static str {
        "breath"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        battle.gain_mana(2 + i64::from(ctx.level), ctx.caster);
        if ctx.level > 0 {
            battle.draw_cards(1).await;
        }
        Ok(())
    }
}

/// The front ally keeps its block through the next decay.
struct Retain;

#[async_trait]
impl CustomEffect for Retain {
    fn name(&self) -> &'static str {
        "retain"
    }

    async fn apply(&self, battle: &mut Battle, _ctx: &CustomContext) -> Result<(), EffectError> {
        let front = battle
            .state()
            .front_ally()
            .ok_or_else(|| EffectError::Failed("no front ally".into()))?;
        if let Some(unit) = battle.state_mut().unit_mut(front) {
            unit.retain_block = true;
        }
        Ok(())
    }
}

/// Bonus damage per card left in hand.
struct HandScale;

#[async_trait]
impl CustomEffect for HandScale {
    fn name(&self) -> &'static str {
        "hand_scale"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        living_target(battle, ctx)?;
        let hand = battle.state().piles.hand().len() as i64;
        let bonus = scaled(hand * 3, ctx.multiplier);
        battle.damage_enemy(ctx.caster, ctx.target_index, ctx.value + bonus, false).await;
        Ok(())
    }
}

/// Damage equal to the front ally's block.
struct Adagio;

#[async_trait]
impl CustomEffect for Adagio {
    fn name(&self) -> &'static str {
        "adagio"
    }

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError> {
        living_target(battle, ctx)?;
        let block = battle.state().front_ally().and_then(|id| battle.unit(id)).map_or(0, |u| u.block);
        battle.damage_enemy(ctx.caster, ctx.target_index, block, false).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_id() {
        let customs = custom_effects();
        assert_eq!(customs.len(), 13);
        for id in [
            DETONATE, BLOCK_STRIKE, CRESCENDO, VARIATION, POLYPHONY, DOUBLE_STOP, UPBEAT, WEAKEN, FLUTTER, BREATH,
            RETAIN, HAND_SCALE, ADAGIO,
        ] {
            assert!(customs.get(id).is_some(), "missing {id}");
        }
    }

    #[test]
    fn test_scaled_rounds_up() {
        assert_eq!(scaled(7, 1.5), 11);
        assert_eq!(scaled(0, 2.0), 0);
    }
}
