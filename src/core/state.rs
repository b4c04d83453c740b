//! Battle state.
//!
//! ## BattleState
//!
//! Everything the turn state machine reads and writes:
//! - Phase, turn counter and the processing lock
//! - Mana pool and per-turn play counters
//! - Card piles, selection and hover
//! - The unit arena with ordered ally and enemy rosters
//! - Integer scratch variables for roles and relics
//!
//! Units live in one arena indexed by `UnitId`. The rosters hold ids in
//! formation order: the last living ally is the front line, and enemies are
//! addressed by their position in the enemy roster.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::zones::CardPiles;

use super::combatant::Combatant;
use super::entity::{Side, UnitId};

/// Turn state machine phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Not started.
    #[default]
    Idle,
    /// Formation can be rearranged.
    Prepare,
    /// The player may select and play cards.
    Player,
    /// Enemies are acting.
    EnemyTurn,
    Victory,
    Defeat,
}

impl Phase {
    /// Victory or defeat.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Victory | Phase::Defeat)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Mana for the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPool {
    pub current: i64,
    /// Baseline refill each turn, before `ModifyTurnMana` listeners.
    pub max: i64,
    /// Cards drawn at turn start.
    pub per_turn_draw: usize,
}

impl ManaPool {
    #[must_use]
    pub const fn new(max: i64, per_turn_draw: usize) -> Self {
        Self { current: 0, max, per_turn_draw }
    }
}

/// Play statistics reset every player turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCounters {
    pub attacks_played: u32,
    pub mana_spent: i64,
    pub first_card_played: bool,
    pub cards_played: u32,
}

/// Mutable state of one battle.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BattleState {
    pub phase: Phase,
    /// Player turns started so far.
    pub turn: u32,
    pub mana: ManaPool,
    pub piles: CardPiles,

    /// Hand index of the selected card.
    pub selected: Option<usize>,
    /// Enemy index under the pointer.
    pub hovered: Option<usize>,

    /// Set while an asynchronous action runs. Player input is rejected.
    pub processing: bool,

    pub counters: TurnCounters,

    /// Attack-tagged cards played this battle.
    pub crescendo: u32,
    /// One-shot multiplier bonus consumed by the next card play.
    pub variation_bonus: f64,

    /// Scratch values that live for the whole battle.
    pub battle_vars: FxHashMap<String, i64>,
    /// Scratch values reset every player turn.
    pub turn_vars: FxHashMap<String, i64>,

    units: Vec<Combatant>,
    allies: Vec<UnitId>,
    enemies: Vec<UnitId>,
}

impl Default for ManaPool {
    fn default() -> Self {
        Self::new(3, 5)
    }
}

impl BattleState {
    /// Create an idle state with the given mana baseline.
    #[must_use]
    pub fn new(max_mana: i64, per_turn_draw: usize) -> Self {
        Self {
            mana: ManaPool::new(max_mana, per_turn_draw),
            ..Self::default()
        }
    }

    // === Units ===

    /// Add a unit built by `make` from its fresh id. Allies join at the
    /// back of the formation (the new front line).
    pub fn add_unit(&mut self, side: Side, make: impl FnOnce(UnitId) -> Combatant) -> UnitId {
        let id = UnitId::new(self.units.len() as u32);
        let mut unit = make(id);
        unit.id = id;
        unit.side = side;
        self.units.push(unit);
        match side {
            Side::Ally => self.allies.push(id),
            Side::Enemy => self.enemies.push(id),
        }
        id
    }

    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Combatant> {
        self.units.get(id.index())
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Combatant> {
        self.units.get_mut(id.index())
    }

    /// Every unit in creation order.
    pub fn units(&self) -> impl Iterator<Item = &Combatant> {
        self.units.iter()
    }

    /// Ally ids in formation order (front line last).
    #[must_use]
    pub fn allies(&self) -> &[UnitId] {
        &self.allies
    }

    /// Enemy ids in roster order.
    #[must_use]
    pub fn enemies(&self) -> &[UnitId] {
        &self.enemies
    }

    #[must_use]
    pub fn enemy_id(&self, index: usize) -> Option<UnitId> {
        self.enemies.get(index).copied()
    }

    #[must_use]
    pub fn enemy(&self, index: usize) -> Option<&Combatant> {
        self.enemy_id(index).and_then(|id| self.unit(id))
    }

    /// Roster index of an enemy.
    #[must_use]
    pub fn enemy_index(&self, id: UnitId) -> Option<usize> {
        self.enemies.iter().position(|&e| e == id)
    }

    #[must_use]
    pub fn is_enemy_alive(&self, index: usize) -> bool {
        self.enemy(index).is_some_and(Combatant::is_alive)
    }

    #[must_use]
    pub fn first_living_enemy(&self) -> Option<usize> {
        (0..self.enemies.len()).find(|&i| self.is_enemy_alive(i))
    }

    /// Roster indices of every living enemy.
    #[must_use]
    pub fn living_enemies(&self) -> Vec<usize> {
        (0..self.enemies.len()).filter(|&i| self.is_enemy_alive(i)).collect()
    }

    /// Ids of every living ally in formation order.
    #[must_use]
    pub fn living_allies(&self) -> Vec<UnitId> {
        self.allies
            .iter()
            .copied()
            .filter(|&id| self.unit(id).is_some_and(Combatant::is_alive))
            .collect()
    }

    /// The front-line ally: the last living one in formation.
    #[must_use]
    pub fn front_ally(&self) -> Option<UnitId> {
        self.allies
            .iter()
            .rev()
            .copied()
            .find(|&id| self.unit(id).is_some_and(Combatant::is_alive))
    }

    /// The living ally with the lowest HP fraction. Ties go to the earlier
    /// formation slot.
    #[must_use]
    pub fn lowest_hp_ally(&self) -> Option<UnitId> {
        self.allies
            .iter()
            .filter_map(|&id| self.unit(id).filter(|u| u.is_alive()))
            .fold(None::<&Combatant>, |best, unit| match best {
                Some(b) if b.hp_fraction() <= unit.hp_fraction() => Some(b),
                _ => Some(unit),
            })
            .map(|u| u.id)
    }

    #[must_use]
    pub fn ally_by_key(&self, key: &str) -> Option<UnitId> {
        self.allies
            .iter()
            .copied()
            .find(|&id| self.unit(id).is_some_and(|u| u.key == key))
    }

    /// Victory condition: at least one enemy and none standing.
    #[must_use]
    pub fn all_enemies_down(&self) -> bool {
        !self.enemies.is_empty() && self.enemies.iter().all(|&id| self.unit(id).map_or(true, |u| u.hp <= 0))
    }

    /// Defeat condition: no ally standing.
    #[must_use]
    pub fn all_allies_dead(&self) -> bool {
        self.allies.iter().all(|&id| self.unit(id).map_or(true, |u| u.hp <= 0))
    }

    /// Swap two formation slots. Returns false if either is out of range.
    pub fn swap_allies(&mut self, a: usize, b: usize) -> bool {
        if a >= self.allies.len() || b >= self.allies.len() {
            return false;
        }
        self.allies.swap(a, b);
        true
    }

    // === Variables ===

    #[must_use]
    pub fn battle_var(&self, key: &str) -> i64 {
        self.battle_vars.get(key).copied().unwrap_or(0)
    }

    pub fn set_battle_var(&mut self, key: impl Into<String>, value: i64) {
        self.battle_vars.insert(key.into(), value);
    }

    #[must_use]
    pub fn turn_var(&self, key: &str) -> i64 {
        self.turn_vars.get(key).copied().unwrap_or(0)
    }

    pub fn set_turn_var(&mut self, key: impl Into<String>, value: i64) {
        self.turn_vars.insert(key.into(), value);
    }

    /// Clear per-turn counters and variables.
    pub fn reset_turn(&mut self) {
        self.counters = TurnCounters::default();
        self.turn_vars.clear();
    }
}
