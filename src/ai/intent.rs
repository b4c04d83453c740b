//! Enemy intents.
//!
//! An `IntentKind` doubles as the action key used by behavior data: rules,
//! pattern slots and overrides all name actions by kind, and planning turns
//! the chosen kind into a concrete `Intent` with a magnitude and icon.

use serde::{Deserialize, Serialize};

/// Action keys an enemy can telegraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Strike the front ally for the level-scaled base.
    #[serde(alias = "atk")]
    Attack,
    /// Strike for 1.5x base.
    #[serde(alias = "atk_heavy")]
    HeavyAttack,
    /// Strike for 0.8x base.
    #[serde(alias = "atk_vuln")]
    WeakAttack,
    /// Gain block equal to 10% of max HP.
    #[serde(alias = "def")]
    Defend,
    /// Gain block equal to 25% of max HP.
    #[serde(alias = "def_block")]
    Fortify,
    /// Gain 2 strength.
    Buff,
    /// Gain 3 strength.
    #[serde(alias = "buff_str")]
    BuffStrength,
    /// Strip own vulnerable.
    #[serde(alias = "debuff")]
    Cleanse,
    /// Recover 10% of max HP.
    Heal,
    /// Nothing planned (dead, or stunned while planning).
    None,
}

impl IntentKind {
    /// Whether the action deals damage to the party.
    #[must_use]
    pub const fn is_attack(self) -> bool {
        matches!(self, IntentKind::Attack | IntentKind::HeavyAttack | IntentKind::WeakAttack)
    }

    /// Default icon reference shown by the presentation layer.
    #[must_use]
    pub const fn default_icon(self) -> &'static str {
        match self {
            IntentKind::Attack | IntentKind::WeakAttack => "intent/attack",
            IntentKind::HeavyAttack => "intent/heavy",
            IntentKind::Defend | IntentKind::Fortify => "intent/defend",
            IntentKind::Buff | IntentKind::BuffStrength => "intent/buff",
            IntentKind::Cleanse => "intent/debuff",
            IntentKind::Heal => "intent/heal",
            IntentKind::None => "intent/none",
        }
    }
}

/// A planned enemy action for the upcoming enemy turn.
///
/// `value` is the attack damage for attacks. For other kinds it is 0 unless
/// an override fixed the magnitude; the executor then computes it from the
/// enemy's state when the action resolves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub kind: IntentKind,
    pub value: i64,
    pub icon: String,
}

impl Intent {
    #[must_use]
    pub fn new(kind: IntentKind, value: i64) -> Self {
        Self {
            kind,
            value,
            icon: kind.default_icon().to_string(),
        }
    }

    /// The empty intent of a unit that will not act.
    #[must_use]
    pub fn none() -> Self {
        Self::new(IntentKind::None, 0)
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// Planner state carried on each enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMemory {
    /// Position in the pattern cycle. Rules do not advance it.
    pub turn_index: usize,
    /// Total planning calls.
    pub steps: u32,
}
