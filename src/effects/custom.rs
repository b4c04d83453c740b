//! Custom effect strategies.
//!
//! Some cards do things the declarative kinds cannot express ("damage equal
//! to your block", "one hit per mana spent"). Those cards carry an
//! `EffectKind::Custom` referencing a strategy registered here by id. A
//! strategy computes its own targets and values but must act through the
//! battle's primitives (`damage_enemy`, `grant_block`, `draw_cards`,
//! `gain_mana`, `add_status`) so the damage pipeline and hooks still apply.

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use crate::battle::Battle;
use crate::cards::CardId;
use crate::core::error::EffectError;
use crate::core::UnitId;

use super::descriptor::CustomEffectId;

/// Everything a strategy knows about the play that invoked it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CustomContext {
    pub card: Option<CardId>,
    pub caster: Option<UnitId>,
    /// Resolved value of the descriptor.
    pub value: i64,
    /// Card multiplier (level and one-shot bonus).
    pub multiplier: f64,
    /// Enemy index the card was aimed at.
    pub target_index: usize,
    /// Upgrade level of the card.
    pub level: u32,
}

/// A card behavior outside the declarative effect kinds.
#[async_trait]
pub trait CustomEffect: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn apply(&self, battle: &mut Battle, ctx: &CustomContext) -> Result<(), EffectError>;
}

/// Registered custom strategies by id.
#[derive(Clone, Default)]
pub struct CustomEffectRegistry {
    effects: FxHashMap<CustomEffectId, Arc<dyn CustomEffect>>,
}

impl CustomEffectRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy, replacing any previous one under the same id.
    pub fn register(&mut self, id: CustomEffectId, effect: Arc<dyn CustomEffect>) {
        self.effects.insert(id, effect);
    }

    /// Register a strategy (builder pattern).
    #[must_use]
    pub fn with(mut self, id: CustomEffectId, effect: impl CustomEffect + 'static) -> Self {
        self.register(id, Arc::new(effect));
        self
    }

    #[must_use]
    pub fn get(&self, id: CustomEffectId) -> Option<Arc<dyn CustomEffect>> {
        self.effects.get(&id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl std::fmt::Debug for CustomEffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.effects.iter().map(|(id, e)| (id.raw(), e.name())).collect();
        names.sort_unstable();
        f.debug_struct("CustomEffectRegistry").field("effects", &names).finish()
    }
}
