//! Hook system: the extension seam for roles, relics and statuses.
//!
//! ## Components
//!
//! - `HookKind` / `HookEvent` / `ValueQuery`: typed hook points and payloads
//! - `HookRegistry`: priority-ordered listeners with bulk removal by owner
//! - `trigger` / `HookRegistry::process_value`: sequential event dispatch
//!   and left-fold value pipelines

pub mod event;
pub mod registry;

pub use event::{CardPlay, HookEvent, HookKind, SourceId, ValueQuery};
pub use registry::{
    event_fn, trigger, value_fn, EventFn, HookHost, HookListener, HookRegistry, Registration, ValueFn,
};
