//! Card system: static definitions and the registry they are looked up in.
//!
//! ## Components
//!
//! - `CardDefinition`: cost, kind, base value, performers, effect list
//! - `CardRegistry`: id -> definition lookup

pub mod definition;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardKind, CardTag};
pub use registry::CardRegistry;
