//! Mutation primitives.
//!
//! Damage always runs base → source outgoing mods → target incoming mods →
//! block → HP. Every hit is followed by the terminal check and, if the
//! battle goes on, the `DamageDealt` hook.

use tracing::{debug, warn};

use crate::cards::CardId;
use crate::core::{Combatant, DamageOutcome, UnitId};
use crate::hooks::{trigger, HookEvent, ValueQuery};
use crate::status::StatusId;

use super::notice::{LogCategory, Notice};
use super::Battle;

const DAMAGE_COLOR: &str = "#ff6b6b";
const ALLY_DAMAGE_COLOR: &str = "#cc0000";
const BLOCK_COLOR: &str = "#3498db";
const HEAL_COLOR: &str = "#2ecc71";
const MANA_COLOR: &str = "#4dabf7";
const STATUS_COLOR: &str = "#e67e22";

impl Battle {
    /// Run `amount` through the damage pipeline from `source` to `target`.
    fn modified_damage(&self, source: Option<UnitId>, target: &Combatant, amount: i64) -> i64 {
        let attacker = source.and_then(|id| self.state.unit(id));
        let outgoing = match attacker {
            Some(attacker) => self.status.apply_outgoing_damage_mods(attacker, amount, Some(target)),
            None => amount.max(0),
        };
        self.status.apply_incoming_damage_mods(target, outgoing, attacker)
    }

    /// Hit the enemy at roster `index`. No-op when the battle is over or
    /// the target is missing or down.
    pub async fn damage_enemy(
        &mut self,
        source: Option<UnitId>,
        index: usize,
        amount: i64,
        pierce: bool,
    ) -> Option<DamageOutcome> {
        if self.is_over() {
            return None;
        }
        let id = self.state.enemy_id(index)?;
        let target = self.state.unit(id).filter(|u| u.is_alive())?;
        let damage = self.modified_damage(source, target, amount);

        let unit = self.state.unit_mut(id)?;
        let outcome = unit.take_damage(damage, pierce);
        let name = unit.name.clone();

        if outcome.blocked > 0 {
            self.notify(Notice::float(id, "Blocked", BLOCK_COLOR));
        }
        if outcome.hp_lost > 0 {
            self.notify(Notice::float(id, format!("-{}", outcome.hp_lost), DAMAGE_COLOR));
            self.log(format!("{name} takes {} damage", outcome.hp_lost), LogCategory::Damage);
        }
        if outcome.hp_lost > 10 {
            self.notify(Notice::Shake);
        }
        if outcome.lethal {
            debug!(enemy = %id, "enemy defeated");
        }
        self.notify(Notice::UpdateUi);

        if self.state.all_enemies_down() {
            self.win();
        } else {
            let mut event = HookEvent::DamageDealt {
                source,
                target: id,
                amount: outcome.hp_lost,
                lethal: outcome.lethal,
            };
            trigger(self, &mut event).await;
        }
        Some(outcome)
    }

    /// Hit an ally. A lethal hit fires `AllyDeath` and loses the battle
    /// when nobody is left standing.
    pub async fn damage_ally(
        &mut self,
        source: Option<UnitId>,
        ally: UnitId,
        amount: i64,
        pierce: bool,
    ) -> Option<DamageOutcome> {
        if self.is_over() {
            return None;
        }
        let target = self.state.unit(ally).filter(|u| u.is_alive())?;
        let damage = self.modified_damage(source, target, amount);

        let unit = self.state.unit_mut(ally)?;
        let outcome = unit.take_damage(damage, pierce);
        let name = unit.name.clone();

        if outcome.hp_lost > 0 {
            self.notify(Notice::float(ally, format!("-{}", outcome.hp_lost), ALLY_DAMAGE_COLOR));
            self.log(format!("{name} takes {} damage", outcome.hp_lost), LogCategory::Enemy);
            self.notify(Notice::Shake);
        } else {
            self.notify(Notice::float(ally, "Blocked!", BLOCK_COLOR));
        }
        self.notify(Notice::UpdateUi);

        let mut event = HookEvent::DamageDealt {
            source,
            target: ally,
            amount: outcome.hp_lost,
            lethal: outcome.lethal,
        };
        trigger(self, &mut event).await;

        if outcome.lethal {
            debug!(ally = %ally, "ally fell");
            self.notify(Notice::Toast(format!("{name} has fallen!")));
            trigger(self, &mut HookEvent::AllyDeath { victim: ally, killer: source }).await;
            if self.state.all_allies_dead() {
                self.lose();
            }
        }
        Some(outcome)
    }

    /// Heal one ally. Returns the HP restored.
    pub fn heal_unit(&mut self, id: UnitId, amount: i64) -> i64 {
        let Some(unit) = self.state.unit_mut(id) else {
            return 0;
        };
        let healed = unit.heal(amount);
        if healed > 0 {
            let name = unit.name.clone();
            self.notify(Notice::float(id, format!("+{healed}"), HEAL_COLOR));
            self.log(format!("{name} recovers {healed} HP"), LogCategory::Player);
        }
        healed
    }

    /// Heal the living ally with the lowest HP fraction.
    pub fn heal_lowest(&mut self, amount: i64) -> Option<UnitId> {
        let id = self.state.lowest_hp_ally()?;
        self.heal_unit(id, amount);
        self.notify(Notice::UpdateUi);
        Some(id)
    }

    /// Heal every living ally.
    pub fn heal_all(&mut self, amount: i64) {
        for id in self.state.living_allies() {
            self.heal_unit(id, amount);
        }
        self.notify(Notice::UpdateUi);
    }

    /// Add block to one living unit.
    pub fn grant_block(&mut self, id: UnitId, amount: i64) {
        let Some(unit) = self.state.unit_mut(id).filter(|u| u.is_alive()) else {
            return;
        };
        unit.gain_block(amount);
        let name = unit.name.clone();
        self.notify(Notice::float(id, format!("Block +{amount}"), BLOCK_COLOR));
        self.log(format!("{name} gains {amount} block"), LogCategory::Player);
        self.notify(Notice::UpdateUi);
    }

    /// Add block to every living ally.
    pub fn grant_block_all(&mut self, amount: i64) {
        for id in self.state.living_allies() {
            self.grant_block(id, amount);
        }
    }

    /// Add mana for this turn.
    pub fn gain_mana(&mut self, amount: i64, caster: Option<UnitId>) {
        self.state.mana.current += amount;
        if let Some(id) = caster {
            self.notify(Notice::float(id, format!("+{amount} mana"), MANA_COLOR));
        }
        self.notify(Notice::UpdateUi);
    }

    /// Apply stacks of a status to a living unit. Returns the stack count
    /// afterwards.
    pub fn add_status(&mut self, id: UnitId, status: StatusId, amount: i64) -> i64 {
        let Some(unit) = self.state.unit_mut(id).filter(|u| u.is_alive()) else {
            return 0;
        };
        let stacks = self.status.add_status(unit, status, amount);
        let holder = unit.name.clone();
        if let Some(def) = self.status.table().get(status) {
            self.notify(Notice::float(id, format!("{} {amount:+}", def.name), STATUS_COLOR));
            self.log(format!("{holder} now has {stacks} {}", def.name), LogCategory::Status);
        }
        stacks
    }

    /// Remove a status from a unit entirely.
    pub fn remove_status(&mut self, id: UnitId, status: StatusId) -> bool {
        let Some(unit) = self.state.unit_mut(id) else {
            return false;
        };
        self.status.remove_status(unit, status)
    }

    /// Hits of a multi-hit effect after `ModifyHitCount`.
    #[must_use]
    pub fn hit_count(&self, card: Option<CardId>, base: u32) -> u32 {
        let hits = self.hooks.process_value(self, &ValueQuery::HitCount { card, base }, i64::from(base));
        u32::try_from(hits.max(0)).unwrap_or(u32::MAX)
    }

    /// Clear the presentation-only dying marker once its animation ends.
    pub fn clear_dying(&mut self, id: UnitId) {
        match self.state.unit_mut(id) {
            Some(unit) => unit.dying = false,
            None => warn!(unit = %id, "clear_dying on unknown unit"),
        }
    }
}
