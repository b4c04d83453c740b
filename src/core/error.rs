//! Error types.
//!
//! Only rejected player input surfaces as an error to the caller. Content
//! problems (unknown statuses, missing custom effects, failing listeners) are
//! logged and skipped so a malformed card can never stall a battle.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::state::Phase;

/// Rejected player input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("another resolution is still in progress")]
    Busy,

    #[error("action not allowed during {actual:?}")]
    WrongPhase { actual: Phase },

    #[error("no card at hand index {0}")]
    HandIndex(usize),

    #[error("{0} is not in the card table")]
    UnknownCard(CardId),

    #[error("{0} needs a performer who is down")]
    PerformerDown(CardId),

    #[error("not enough mana: card costs {cost}, {available} available")]
    InsufficientMana { cost: i64, available: i64 },

    #[error("no living enemy at index {0}")]
    InvalidTarget(usize),

    #[error("no card is selected")]
    NothingSelected,

    #[error("formation slots {0} and {1} cannot be swapped")]
    InvalidFormation(usize, usize),
}

/// Failure raised by a hook listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("listener failed: {0}")]
    Listener(String),

    #[error(transparent)]
    Effect(#[from] EffectError),
}

/// Failure raised by a custom effect strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("custom effect has no living target at index {0}")]
    MissingTarget(usize),

    #[error("custom effect failed: {0}")]
    Failed(String),
}

/// Failure loading configuration or content data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_error_messages() {
        let err = BattleError::InsufficientMana { cost: 3, available: 1 };
        assert_eq!(err.to_string(), "not enough mana: card costs 3, 1 available");

        let err = BattleError::WrongPhase { actual: Phase::EnemyTurn };
        assert_eq!(err.to_string(), "action not allowed during EnemyTurn");
    }

    #[test]
    fn test_hook_error_wraps_effect_error() {
        let err: HookError = EffectError::MissingTarget(2).into();
        assert_eq!(err.to_string(), "custom effect has no living target at index 2");
    }
}
