//! Status engine.
//!
//! Applies status definitions to units: stack bookkeeping, the two damage
//! folds, and the turn ticks. Damage always flows
//! base -> outgoing (source statuses) -> incoming (target statuses), so
//! strength and vulnerable compose the same way whichever side owns them.
//!
//! ```
//! use rust_cadence::core::{Combatant, UnitId};
//! use rust_cadence::status::{StatusEngine, StatusId, StatusTable};
//! use std::sync::Arc;
//!
//! let engine = StatusEngine::new(Arc::new(StatusTable::standard()));
//! let mut bard = Combatant::ally(UnitId::new(0), "bard", "Bard", 40);
//! let mut ogre = Combatant::enemy(UnitId::new(1), "ogre", "Ogre", 40);
//!
//! engine.add_status(&mut bard, StatusId::STRENGTH, 3);
//! engine.add_status(&mut ogre, StatusId::VULNERABLE, 1);
//!
//! let out = engine.apply_outgoing_damage_mods(&bard, 10, Some(&ogre));
//! let dealt = engine.apply_incoming_damage_mods(&ogre, out, Some(&bard));
//! assert_eq!((out, dealt), (13, 19));
//! ```

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::Combatant;

use super::definition::{StatusDefinition, StatusId, StatusTable, TickRule};

/// Applies a `StatusTable` to units.
#[derive(Clone, Debug)]
pub struct StatusEngine {
    table: Arc<StatusTable>,
}

impl StatusEngine {
    #[must_use]
    pub fn new(table: Arc<StatusTable>) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &StatusTable {
        &self.table
    }

    #[must_use]
    pub fn get_stack(&self, unit: &Combatant, status: StatusId) -> i64 {
        unit.statuses.get(status)
    }

    #[must_use]
    pub fn has_status(&self, unit: &Combatant, status: StatusId) -> bool {
        unit.statuses.contains(status)
    }

    /// Add stacks of a status. Flags always end at exactly 1; accumulating
    /// statuses add (negative amounts subtract, and a total of zero or less
    /// removes the entry). Returns the resulting stack count.
    pub fn add_status(&self, unit: &mut Combatant, status: StatusId, amount: i64) -> i64 {
        let Some(def) = self.definition(status) else {
            return unit.statuses.get(status);
        };

        let next = if def.is_flag() {
            1
        } else {
            unit.statuses.get(status) + amount
        };
        unit.statuses.set(status, next);

        debug!(unit = %unit.id, status = %def.key, amount, stacks = next.max(0), "status applied");
        unit.statuses.get(status)
    }

    /// Remove up to `amount` stacks. Returns the remaining count.
    pub fn reduce_status(&self, unit: &mut Combatant, status: StatusId, amount: i64) -> i64 {
        let next = unit.statuses.get(status) - amount.max(0);
        unit.statuses.set(status, next);
        unit.statuses.get(status)
    }

    /// Remove a status entirely. Returns whether it was present.
    pub fn remove_status(&self, unit: &mut Combatant, status: StatusId) -> bool {
        unit.statuses.remove(status)
    }

    /// Fold the source's on-deal-damage rules over `base`, floored at 0.
    #[must_use]
    pub fn apply_outgoing_damage_mods(
        &self,
        source: &Combatant,
        base: i64,
        _target: Option<&Combatant>,
    ) -> i64 {
        let damage = source.statuses.iter().fold(base, |damage, entry| {
            match self.table.get(entry.status).and_then(|d| d.on_deal_damage) {
                Some(rule) => rule.apply(damage, entry.stacks),
                None => damage,
            }
        });
        damage.max(0)
    }

    /// Fold the target's on-receive-damage rules over `base`, floored at 0.
    #[must_use]
    pub fn apply_incoming_damage_mods(
        &self,
        target: &Combatant,
        base: i64,
        _source: Option<&Combatant>,
    ) -> i64 {
        let damage = target.statuses.iter().fold(base, |damage, entry| {
            match self.table.get(entry.status).and_then(|d| d.on_receive_damage) {
                Some(rule) => rule.apply(damage, entry.stacks),
                None => damage,
            }
        });
        damage.max(0)
    }

    /// Run every turn-start tick. Returns the statuses that expired.
    pub fn process_turn_start(&self, unit: &mut Combatant) -> SmallVec<[StatusId; 4]> {
        self.tick(unit, |def| def.on_turn_start)
    }

    /// Run every turn-end tick. Returns the statuses that expired.
    pub fn process_turn_end(&self, unit: &mut Combatant) -> SmallVec<[StatusId; 4]> {
        self.tick(unit, |def| def.on_turn_end)
    }

    fn tick(
        &self,
        unit: &mut Combatant,
        rule_of: impl Fn(&StatusDefinition) -> Option<TickRule>,
    ) -> SmallVec<[StatusId; 4]> {
        let mut expired = SmallVec::new();
        for entry in unit.statuses.snapshot() {
            let Some(rule) = self.table.get(entry.status).and_then(&rule_of) else {
                continue;
            };
            let next = rule.apply(unit.statuses.get(entry.status));
            unit.statuses.set(entry.status, next);
            if next <= 0 {
                expired.push(entry.status);
            }
        }
        expired
    }

    fn definition(&self, status: StatusId) -> Option<&StatusDefinition> {
        let def = self.table.get(status);
        if def.is_none() {
            warn!(%status, "unknown status ignored");
        }
        def
    }
}
