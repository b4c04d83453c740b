//! Effect descriptors.
//!
//! An `EffectDescriptor` is one atomic instruction in a card's effect list.
//! The kind says what happens; the remaining fields say how much, to whom,
//! how often and after what delay. Descriptors are plain data: behavior
//! that does not fit the declarative kinds lives in a `CustomEffect`
//! strategy referenced by id.

use serde::{Deserialize, Serialize};

use crate::status::StatusId;

/// Identifier of a registered custom effect strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomEffectId(pub u32);

impl CustomEffectId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CustomEffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Custom({})", self.0)
    }
}

/// What an effect does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Hit an enemy through the full damage pipeline.
    Damage,
    /// Restore HP to allies.
    Heal,
    /// Grant block to allies.
    Block,
    /// Draw cards.
    Draw,
    /// Gain mana this turn.
    Mana,
    /// Apply stacks of a status.
    Status {
        status: StatusId,
        message: Option<String>,
    },
    /// Cosmetic only.
    Vfx { id: String },
    /// Cosmetic only.
    Toast { message: String },
    /// Run a registered strategy.
    Custom { id: CustomEffectId },
}

impl EffectKind {
    /// Kinds that run once per living enemy when targeting `All`.
    #[must_use]
    pub const fn fans_out(&self) -> bool {
        matches!(self, EffectKind::Damage | EffectKind::Status { .. })
    }
}

/// Who an effect lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetScope {
    /// The chosen enemy for damage and status; the front ally for block;
    /// the most wounded ally for heals.
    #[default]
    Single,
    /// Every living enemy for damage and status; every living ally for
    /// heal and block.
    All,
    /// The front-line ally.
    Front,
    /// The caster.
    #[serde(rename = "self")]
    Caster,
}

/// One instruction in a card's effect list.
///
/// ```
/// use rust_cadence::effects::{EffectDescriptor, TargetScope};
///
/// let volley = EffectDescriptor::damage().scaled().hits(4).interval(120);
/// assert_eq!(volley.resolve_value(9, 1.5), 9); // inherits the card value
///
/// let ward = EffectDescriptor::block().with_value(5).scaled().target(TargetScope::All);
/// assert_eq!(ward.resolve_value(9, 1.5), 8); // ceil(5 * 1.5)
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectDescriptor {
    pub kind: EffectKind,

    /// Explicit magnitude. `None` inherits the card's computed value.
    pub value: Option<i64>,

    /// Explicit values are multiplied by the card multiplier.
    pub scale: bool,

    pub target: TargetScope,

    /// Damage hits. `None` means one.
    pub hits: Option<u32>,

    /// Pause between hits.
    pub interval_ms: Option<u64>,

    /// Pause before the effect resolves.
    pub delay_ms: Option<u64>,

    /// Damage skips block.
    pub pierce: bool,

    /// Presentation hint emitted with the effect.
    pub vfx: Option<String>,
}

impl Default for EffectDescriptor {
    fn default() -> Self {
        Self::new(EffectKind::Damage)
    }
}

impl EffectDescriptor {
    #[must_use]
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            value: None,
            scale: false,
            target: TargetScope::Single,
            hits: None,
            interval_ms: None,
            delay_ms: None,
            pierce: false,
            vfx: None,
        }
    }

    #[must_use]
    pub fn damage() -> Self {
        Self::new(EffectKind::Damage)
    }

    #[must_use]
    pub fn heal() -> Self {
        Self::new(EffectKind::Heal)
    }

    #[must_use]
    pub fn block() -> Self {
        Self::new(EffectKind::Block)
    }

    #[must_use]
    pub fn draw(count: i64) -> Self {
        Self::new(EffectKind::Draw).with_value(count)
    }

    #[must_use]
    pub fn mana(amount: i64) -> Self {
        Self::new(EffectKind::Mana).with_value(amount)
    }

    #[must_use]
    pub fn status(status: StatusId, amount: i64) -> Self {
        Self::new(EffectKind::Status { status, message: None }).with_value(amount)
    }

    #[must_use]
    pub fn vfx(id: impl Into<String>) -> Self {
        Self::new(EffectKind::Vfx { id: id.into() })
    }

    #[must_use]
    pub fn toast(message: impl Into<String>) -> Self {
        Self::new(EffectKind::Toast { message: message.into() })
    }

    #[must_use]
    pub fn custom(id: CustomEffectId) -> Self {
        Self::new(EffectKind::Custom { id })
    }

    /// Set an explicit value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Scale the explicit value by the card multiplier (builder pattern).
    #[must_use]
    pub fn scaled(mut self) -> Self {
        self.scale = true;
        self
    }

    /// Set the target scope (builder pattern).
    #[must_use]
    pub fn target(mut self, target: TargetScope) -> Self {
        self.target = target;
        self
    }

    /// Set the hit count (builder pattern).
    #[must_use]
    pub fn hits(mut self, hits: u32) -> Self {
        self.hits = Some(hits);
        self
    }

    /// Set the pause between hits (builder pattern).
    #[must_use]
    pub fn interval(mut self, ms: u64) -> Self {
        self.interval_ms = Some(ms);
        self
    }

    /// Set the pause before resolving (builder pattern).
    #[must_use]
    pub fn delay(mut self, ms: u64) -> Self {
        self.delay_ms = Some(ms);
        self
    }

    /// Make damage skip block (builder pattern).
    #[must_use]
    pub fn piercing(mut self) -> Self {
        self.pierce = true;
        self
    }

    /// Attach a presentation hint (builder pattern).
    #[must_use]
    pub fn with_vfx(mut self, vfx: impl Into<String>) -> Self {
        self.vfx = Some(vfx.into());
        self
    }

    /// Attach a toast message to a status effect (builder pattern).
    #[must_use]
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        if let EffectKind::Status { message, .. } = &mut self.kind {
            *message = Some(text.into());
        }
        self
    }

    /// Magnitude this effect resolves with.
    ///
    /// Explicit scaled values become `ceil(value * multiplier)`, explicit
    /// unscaled values pass through, and missing values inherit the card's
    /// already-computed value.
    #[must_use]
    pub fn resolve_value(&self, card_value: i64, multiplier: f64) -> i64 {
        match self.value {
            Some(value) if self.scale => (value as f64 * multiplier).ceil() as i64,
            Some(value) => value,
            None => card_value,
        }
    }
}
