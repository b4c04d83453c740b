//! Combatant records.
//!
//! A `Combatant` is one ally or enemy in the arena. Vitals, block and the
//! status list are plain data; the battle mutates them through the methods
//! here so the HP and block invariants hold everywhere:
//!
//! - `0 <= hp <= max_hp`, and `block >= 0`
//! - `dead` is set once and never cleared within a battle
//! - block absorbs damage before HP unless the hit pierces

use serde::{Deserialize, Serialize};

use crate::ai::{AiMemory, Intent};
use crate::status::StatusList;

use super::entity::{Side, UnitId};

/// Result of one damage application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Damage soaked by block.
    pub blocked: i64,
    /// HP actually removed.
    pub hp_lost: i64,
    /// This hit killed the unit.
    pub lethal: bool,
}

/// A unit participating in battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: UnitId,
    pub side: Side,

    /// Role key for allies, enemy kind key for enemies.
    pub key: String,
    pub name: String,

    pub hp: i64,
    pub max_hp: i64,
    pub block: i64,

    /// Keep all block through the next decay, then reset.
    pub retain_block: bool,

    pub statuses: StatusList,

    pub dead: bool,

    /// Presentation-only marker set on the killing blow.
    pub dying: bool,

    /// Enemy only.
    pub intent: Option<Intent>,

    /// Enemy only.
    pub memory: AiMemory,
}

impl Combatant {
    /// Create a combatant at full HP.
    #[must_use]
    pub fn new(id: UnitId, side: Side, key: impl Into<String>, name: impl Into<String>, max_hp: i64) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            id,
            side,
            key: key.into(),
            name: name.into(),
            hp: max_hp,
            max_hp,
            block: 0,
            retain_block: false,
            statuses: StatusList::new(),
            dead: false,
            dying: false,
            intent: None,
            memory: AiMemory::default(),
        }
    }

    #[must_use]
    pub fn ally(id: UnitId, key: impl Into<String>, name: impl Into<String>, max_hp: i64) -> Self {
        Self::new(id, Side::Ally, key, name, max_hp)
    }

    #[must_use]
    pub fn enemy(id: UnitId, key: impl Into<String>, name: impl Into<String>, max_hp: i64) -> Self {
        Self::new(id, Side::Enemy, key, name, max_hp)
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.dead && self.hp > 0
    }

    #[must_use]
    pub fn hp_fraction(&self) -> f64 {
        self.hp as f64 / self.max_hp as f64
    }

    /// Restore HP up to the maximum. Returns the amount healed.
    pub fn heal(&mut self, amount: i64) -> i64 {
        if !self.is_alive() || amount <= 0 {
            return 0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Add block. Negative amounts are ignored.
    pub fn gain_block(&mut self, amount: i64) {
        self.block += amount.max(0);
    }

    /// Apply already-modified damage: block first (unless `pierce`), then HP.
    pub fn take_damage(&mut self, damage: i64, pierce: bool) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::default();
        }

        let mut remaining = damage.max(0);
        let blocked = if pierce { 0 } else { self.block.min(remaining) };
        self.block -= blocked;
        remaining -= blocked;

        let hp_lost = remaining.min(self.hp);
        self.hp -= hp_lost;

        let lethal = self.hp == 0;
        if lethal {
            self.dead = true;
            self.dying = true;
            self.block = 0;
        }

        DamageOutcome { blocked, hp_lost, lethal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knight() -> Combatant {
        Combatant::enemy(UnitId::new(1), "discord", "Discord Knight", 30)
    }

    #[test]
    fn test_block_absorbs_first() {
        let mut k = knight();
        k.block = 4;
        let out = k.take_damage(10, false);
        assert_eq!(out, DamageOutcome { blocked: 4, hp_lost: 6, lethal: false });
        assert_eq!(k.block, 0);
        assert_eq!(k.hp, 24);
    }

    #[test]
    fn test_block_exceeds_damage() {
        let mut k = knight();
        k.block = 12;
        let out = k.take_damage(10, false);
        assert_eq!(out.hp_lost, 0);
        assert_eq!(k.block, 2);
        assert_eq!(k.hp, 30);
    }

    #[test]
    fn test_pierce_ignores_block() {
        let mut k = knight();
        k.block = 12;
        k.take_damage(10, true);
        assert_eq!(k.block, 12);
        assert_eq!(k.hp, 20);
    }

    #[test]
    fn test_lethal_clamps_and_marks() {
        let mut k = knight();
        let out = k.take_damage(99, false);
        assert!(out.lethal);
        assert_eq!(out.hp_lost, 30);
        assert_eq!(k.hp, 0);
        assert!(k.dead && k.dying);

        // Dead units ignore further damage
        assert_eq!(k.take_damage(5, false), DamageOutcome::default());
    }

    #[test]
    fn test_heal_clamps() {
        let mut k = knight();
        k.hp = 25;
        assert_eq!(k.heal(10), 5);
        assert_eq!(k.hp, 30);
    }

    #[test]
    fn test_hp_fraction() {
        let mut k = knight();
        k.hp = 15;
        assert!((k.hp_fraction() - 0.5).abs() < f64::EPSILON);
    }
}
