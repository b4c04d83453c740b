//! Enemy intent planning.
//!
//! Planning happens once per enemy after the enemy phase, so the player can
//! see every intent before acting. The planner is deterministic given the
//! RNG: weighted slots and the uniform fallback both draw from it.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Combatant, GameRng};

use super::behavior::{Behavior, PatternSlot};
use super::intent::{Intent, IntentKind};

/// Battle facts the planner reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanContext {
    pub turn: u32,
    pub party_level: u32,
}

impl PlanContext {
    /// Attack base for the party level: `5 + floor(level * 1.5)`.
    #[must_use]
    pub fn base_damage(&self) -> i64 {
        5 + i64::from(self.party_level) * 3 / 2
    }
}

/// Turns behavior data into intents.
pub struct EnemyPlanner;

impl EnemyPlanner {
    /// Plan the next intent for `enemy` and advance its AI memory.
    ///
    /// Rules are checked first and do not move the pattern cursor. A
    /// pattern slot is taken at `turn_index % len` and the cursor advances.
    /// Without a pattern the action is drawn uniformly from `actions`.
    pub fn plan_intent(
        enemy: &mut Combatant,
        behavior: &Behavior,
        ctx: &PlanContext,
        rng: &mut GameRng,
    ) -> Intent {
        if !enemy.is_alive() {
            return Intent::none();
        }

        let ruled = behavior
            .rules
            .iter()
            .find(|rule| rule.condition.evaluate(enemy, ctx))
            .map(|rule| Self::select(&rule.action, rng));

        let action = match ruled {
            Some(action) => action,
            None if !behavior.pattern.is_empty() => {
                let slot = &behavior.pattern[enemy.memory.turn_index % behavior.pattern.len()];
                enemy.memory.turn_index += 1;
                Self::select(slot, rng)
            }
            None => rng.choose(&behavior.actions).copied().unwrap_or(IntentKind::Attack),
        };

        enemy.memory.steps += 1;
        let intent = Self::materialize(enemy, behavior, action, ctx);
        trace!(enemy = %enemy.id, kind = ?intent.kind, value = intent.value, "intent planned");
        intent
    }

    /// Resolve a slot to an action. Weighted slots with no usable weight
    /// fall back to attack.
    fn select(slot: &PatternSlot, rng: &mut GameRng) -> IntentKind {
        match slot {
            PatternSlot::Fixed(kind) => *kind,
            PatternSlot::Weighted(choices) => {
                let weights: Vec<f64> = choices.iter().map(|(_, w)| *w).collect();
                rng.choose_weighted(&weights)
                    .map_or(IntentKind::Attack, |i| choices[i].0)
            }
        }
    }

    /// Template value for an action.
    #[must_use]
    pub fn template_value(kind: IntentKind, ctx: &PlanContext) -> i64 {
        let base = ctx.base_damage();
        match kind {
            IntentKind::Attack => base,
            IntentKind::HeavyAttack => base * 3 / 2,
            IntentKind::WeakAttack => base * 8 / 10,
            _ => 0,
        }
    }

    fn materialize(enemy: &Combatant, behavior: &Behavior, action: IntentKind, ctx: &PlanContext) -> Intent {
        let template = Self::template_value(action, ctx);
        match behavior.overrides.get(&action) {
            Some(custom) => {
                let kind = custom.kind.unwrap_or(action);
                let value = custom.value.resolve(enemy, ctx.base_damage(), template);
                let icon = custom.icon.clone().unwrap_or_else(|| kind.default_icon().to_string());
                Intent::new(kind, value).with_icon(icon)
            }
            None => Intent::new(action, template),
        }
    }
}
