//! Card effects.
//!
//! Cards are lists of effect descriptors:
//! - `EffectDescriptor` / `EffectKind`: one declarative instruction
//! - `CustomEffect`: strategy objects for behavior the kinds cannot express
//! - `EffectProcessor`: interprets descriptors against a battle
//!
//! ## Value resolution
//!
//! A descriptor without an explicit value inherits the card's computed
//! value (already hooked and multiplied). An explicit value is used as is,
//! or multiplied and rounded up when `scale` is set.

pub mod descriptor;
pub mod custom;
pub mod processor;

pub use descriptor::{CustomEffectId, EffectDescriptor, EffectKind, TargetScope};
pub use custom::{CustomContext, CustomEffect, CustomEffectRegistry};
pub use processor::{Cast, EffectProcessor};
