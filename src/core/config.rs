//! Battle configuration.
//!
//! Everything a battle needs that is not content: the resource pool, the
//! party's progression levels, the RNG seed and the pause table that paces
//! each logical step for the presentation layer.
//!
//! Configs are plain serde data so they can be loaded from JSON:
//!
//! ```
//! use rust_cadence::core::BattleConfig;
//!
//! let config = BattleConfig::from_json(r#"{ "starting_mana": 4, "seed": 9 }"#).unwrap();
//! assert_eq!(config.starting_mana, 4);
//! assert_eq!(config.draw_per_turn, 5); // default
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;

use super::error::ConfigError;

/// Pause durations in milliseconds for each suspension point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Between two drawn cards.
    pub draw: u64,
    /// Between hits of a multi-hit effect when the effect sets no interval.
    pub hit_interval: u64,
    /// Before each extra trigger of a card.
    pub trigger_stagger: u64,
    /// After the player ends the turn, before enemies act.
    pub end_turn: u64,
    /// Enemy attack wind-up before damage lands.
    pub enemy_impact: u64,
    /// After an enemy attack resolves.
    pub enemy_recovery: u64,
    /// After a non-attack enemy action.
    pub enemy_non_attack: u64,
    /// After a stunned enemy skips.
    pub enemy_stunned: u64,
    /// Between two enemies acting.
    pub enemy_gap: u64,
    /// After intents are re-planned, before the next player turn.
    pub plan_settle: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            draw: 150,
            hit_interval: 150,
            trigger_stagger: 300,
            end_turn: 800,
            enemy_impact: 600,
            enemy_recovery: 600,
            enemy_non_attack: 800,
            enemy_stunned: 1000,
            enemy_gap: 400,
            plan_settle: 600,
        }
    }
}

/// Configuration for one battle.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Mana pool maximum before role bonuses.
    pub starting_mana: i64,
    /// Cards drawn at the start of each player turn before role bonuses.
    pub draw_per_turn: usize,
    /// Party progression level; scales enemy HP and intent damage.
    pub party_level: u32,
    /// Upgrade level per card. Missing cards are level 0.
    pub card_levels: FxHashMap<CardId, u32>,
    /// Seed for the battle RNG.
    pub seed: u64,
    /// Pause table.
    pub timings: Timings,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            starting_mana: 3,
            draw_per_turn: 5,
            party_level: 1,
            card_levels: FxHashMap::default(),
            seed: 0,
            timings: Timings::default(),
        }
    }
}

impl BattleConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the starting mana maximum (builder pattern).
    #[must_use]
    pub fn with_starting_mana(mut self, mana: i64) -> Self {
        self.starting_mana = mana;
        self
    }

    /// Set the per-turn draw (builder pattern).
    #[must_use]
    pub fn with_draw_per_turn(mut self, draw: usize) -> Self {
        self.draw_per_turn = draw;
        self
    }

    /// Set the party level (builder pattern).
    #[must_use]
    pub fn with_party_level(mut self, level: u32) -> Self {
        self.party_level = level;
        self
    }

    /// Set a card's upgrade level (builder pattern).
    #[must_use]
    pub fn with_card_level(mut self, card: CardId, level: u32) -> Self {
        self.card_levels.insert(card, level);
        self
    }

    /// Set the RNG seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the pause table (builder pattern).
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Upgrade level of a card.
    #[must_use]
    pub fn card_level(&self, card: CardId) -> u32 {
        self.card_levels.get(&card).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BattleConfig::default();
        assert_eq!(config.starting_mana, 3);
        assert_eq!(config.draw_per_turn, 5);
        assert_eq!(config.timings.draw, 150);
        assert_eq!(config.card_level(CardId::new(1)), 0);
    }

    #[test]
    fn test_builder() {
        let config = BattleConfig::new()
            .with_starting_mana(5)
            .with_party_level(4)
            .with_card_level(CardId::new(18), 2)
            .with_seed(11);

        assert_eq!(config.starting_mana, 5);
        assert_eq!(config.party_level, 4);
        assert_eq!(config.card_level(CardId::new(18)), 2);
        assert_eq!(config.seed, 11);
    }

    #[test]
    fn test_from_json_partial_timings() {
        let config = BattleConfig::from_json(r#"{ "timings": { "draw": 0 } }"#).unwrap();
        assert_eq!(config.timings.draw, 0);
        assert_eq!(config.timings.end_turn, 800);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(BattleConfig::from_json("{ not json").is_err());
    }
}
