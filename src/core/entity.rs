//! Unit identification.
//!
//! Every combatant in a battle lives in a single arena owned by
//! `BattleState` and is addressed by a stable `UnitId`. Ids are assigned in
//! join order and are never reused within a battle: dead units stay in the
//! arena as zero-HP records.
//!
//! ```
//! use rust_cadence::core::{Side, UnitId};
//!
//! let cellist = UnitId::new(0);
//! assert_eq!(cellist.index(), 0);
//! assert_eq!(format!("{}", cellist), "Unit(0)");
//! assert!(Side::Ally.opposite() == Side::Enemy);
//! ```

use serde::{Deserialize, Serialize};

/// Stable handle to a combatant in the battle arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a new unit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position of this unit in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// Which side of the battlefield a unit fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Party member controlled by the player.
    Ally,
    /// Opponent driven by the decision engine.
    Enemy,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}
