//! Enemy kinds and encounter scaling.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::behavior::Behavior;

/// Encounter tier. Multiplies enemy HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encounter {
    #[default]
    Normal,
    Elite,
    Boss,
}

impl Encounter {
    #[must_use]
    pub const fn hp_multiplier(self) -> f64 {
        match self {
            Encounter::Normal => 1.0,
            Encounter::Elite => 1.8,
            Encounter::Boss => 3.0,
        }
    }
}

/// Static data for one enemy kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub key: String,
    pub name: String,
    /// Per-kind HP factor on top of the encounter multiplier.
    pub hp_scale: f64,
    pub behavior: Arc<Behavior>,
}

impl EnemyDefinition {
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>, hp_scale: f64, behavior: Behavior) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            hp_scale,
            behavior: Arc::new(behavior),
        }
    }

    /// `floor((30 + level * 8) * encounter * hp_scale)`, at least 1.
    #[must_use]
    pub fn max_hp(&self, party_level: u32, encounter: Encounter) -> i64 {
        let base = f64::from(30 + party_level * 8) * encounter.hp_multiplier();
        ((base * self.hp_scale).floor() as i64).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_hp_scaling() {
        let noise = EnemyDefinition::new("noise", "Noise", 1.0, Behavior::new());
        assert_eq!(noise.max_hp(1, Encounter::Normal), 38);

        let dancer = EnemyDefinition::new("dancer", "Dancer", 2.0, Behavior::new());
        assert_eq!(dancer.max_hp(1, Encounter::Elite), 136); // 38 * 1.8 * 2 = 136.8

        let boss = EnemyDefinition::new("silence", "Silence", 2.5, Behavior::new());
        assert_eq!(boss.max_hp(2, Encounter::Boss), 345);
    }
}
