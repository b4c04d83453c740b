//! Hook registry.
//!
//! Listeners are registered per hook kind with an owner and a priority.
//! Per kind they stay sorted by descending priority; equal priorities keep
//! registration order. The registry is generic over the context handed to
//! listeners, so it can be exercised without a battle.
//!
//! Dispatch takes a snapshot of the listener list first. Listeners get
//! `&mut` access to the context (which owns the registry), so the list
//! cannot be borrowed while they run.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tracing::{debug, error};

use crate::core::error::HookError;

use super::event::{HookEvent, HookKind, SourceId, ValueQuery};

/// Something that reacts to hooks.
///
/// Implement `on_event` for event hooks and `on_value` for value hooks; a
/// listener registered under both kinds of hook can implement both.
#[async_trait]
pub trait HookListener<C: Send + Sync + 'static>: Send + Sync {
    /// React to an event. May mutate the context and the payload, and may
    /// suspend.
    async fn on_event(&self, _ctx: &mut C, _event: &mut HookEvent) -> Result<(), HookError> {
        Ok(())
    }

    /// Rewrite a value. `Ok(None)` leaves it unchanged.
    fn on_value(&self, _ctx: &C, _query: &ValueQuery, _value: i64) -> Result<Option<i64>, HookError> {
        Ok(None)
    }
}

/// A listener with its owner and priority.
pub struct Registration<C: Send + Sync + 'static> {
    pub source: SourceId,
    pub priority: i32,
    pub listener: Arc<dyn HookListener<C>>,
}

impl<C: Send + Sync + 'static> Clone for Registration<C> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            priority: self.priority,
            listener: Arc::clone(&self.listener),
        }
    }
}

/// Priority-ordered listeners per hook kind.
pub struct HookRegistry<C: Send + Sync + 'static> {
    listeners: FxHashMap<HookKind, Vec<Registration<C>>>,
}

impl<C: Send + Sync + 'static> Default for HookRegistry<C> {
    fn default() -> Self {
        Self {
            listeners: FxHashMap::default(),
        }
    }
}

impl<C: Send + Sync + 'static> HookRegistry<C> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Higher priority runs first; ties run in
    /// registration order.
    pub fn register(
        &mut self,
        kind: HookKind,
        source: impl Into<SourceId>,
        listener: Arc<dyn HookListener<C>>,
        priority: i32,
    ) {
        let source = source.into();
        debug!(hook = ?kind, %source, priority, "hook registered");

        let list = self.listeners.entry(kind).or_default();
        let at = list.partition_point(|r| r.priority >= priority);
        list.insert(at, Registration { source, priority, listener });
    }

    /// Remove every listener owned by `source`. Returns how many were
    /// removed.
    pub fn unregister_all(&mut self, source: &SourceId) -> usize {
        let mut removed = 0;
        for list in self.listeners.values_mut() {
            let before = list.len();
            list.retain(|r| &r.source != source);
            removed += before - list.len();
        }
        self.listeners.retain(|_, list| !list.is_empty());
        removed
    }

    /// Snapshot of the listeners for a kind, in dispatch order.
    #[must_use]
    pub fn listeners(&self, kind: HookKind) -> Vec<Registration<C>> {
        self.listeners.get(&kind).cloned().unwrap_or_default()
    }

    /// Number of listeners for a kind.
    #[must_use]
    pub fn count(&self, kind: HookKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Fold `base` through every listener of the query's kind.
    ///
    /// A failing listener is logged and skipped; the running value is kept.
    #[must_use]
    pub fn process_value(&self, ctx: &C, query: &ValueQuery, base: i64) -> i64 {
        let Some(list) = self.listeners.get(&query.kind()) else {
            return base;
        };
        list.iter().fold(base, |value, reg| match reg.listener.on_value(ctx, query, value) {
            Ok(Some(next)) => next,
            Ok(None) => value,
            Err(err) => {
                error!(hook = ?query.kind(), source = %reg.source, error = %err, "value listener failed, continuing");
                value
            }
        })
    }
}

impl<C: Send + Sync + 'static> std::fmt::Debug for HookRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (kind, list) in &self.listeners {
            let sources: Vec<_> = list.iter().map(|r| (r.source.as_str(), r.priority)).collect();
            map.entry(kind, &sources);
        }
        map.finish()
    }
}

/// A context that owns a hook registry.
pub trait HookHost: Send + Sync + Sized + 'static {
    fn hooks(&self) -> &HookRegistry<Self>;
}

/// Run every listener of the event's kind, in priority order, awaiting
/// each. A failing listener is logged and the rest still run.
pub async fn trigger<C: HookHost>(ctx: &mut C, event: &mut HookEvent) {
    let kind = event.kind();
    for reg in ctx.hooks().listeners(kind) {
        if let Err(err) = reg.listener.on_event(ctx, event).await {
            error!(hook = ?kind, source = %reg.source, error = %err, "hook listener failed, continuing");
        }
    }
}

/// Value listener backed by a closure.
///
/// ```
/// use rust_cadence::hooks::{value_fn, HookKind, HookRegistry, ValueQuery};
///
/// struct Ctx;
/// let mut hooks: HookRegistry<Ctx> = HookRegistry::new();
/// hooks.register(HookKind::ModifyTurnMana, "baton", value_fn(|_: &Ctx, _, v| Some(v + 1)), 0);
///
/// let mana = hooks.process_value(&Ctx, &ValueQuery::TurnMana { turn: 1 }, 3);
/// assert_eq!(mana, 4);
/// ```
pub struct ValueFn<C, F> {
    f: F,
    _ctx: PhantomData<fn(&C)>,
}

/// Wrap a closure as a value listener.
pub fn value_fn<C, F>(f: F) -> Arc<dyn HookListener<C>>
where
    C: Send + Sync + 'static,
    F: Fn(&C, &ValueQuery, i64) -> Option<i64> + Send + Sync + 'static,
{
    Arc::new(ValueFn { f, _ctx: PhantomData })
}

#[async_trait]
impl<C, F> HookListener<C> for ValueFn<C, F>
where
    C: Send + Sync + 'static,
    F: Fn(&C, &ValueQuery, i64) -> Option<i64> + Send + Sync + 'static,
{
    fn on_value(&self, ctx: &C, query: &ValueQuery, value: i64) -> Result<Option<i64>, HookError> {
        Ok((self.f)(ctx, query, value))
    }
}

/// Event listener backed by a synchronous closure.
pub struct EventFn<C, F> {
    f: F,
    _ctx: PhantomData<fn(&C)>,
}

/// Wrap a closure as an event listener. Listeners that need to suspend
/// implement `HookListener` directly.
pub fn event_fn<C, F>(f: F) -> Arc<dyn HookListener<C>>
where
    C: Send + Sync + 'static,
    F: Fn(&mut C, &mut HookEvent) -> Result<(), HookError> + Send + Sync + 'static,
{
    Arc::new(EventFn { f, _ctx: PhantomData })
}

#[async_trait]
impl<C, F> HookListener<C> for EventFn<C, F>
where
    C: Send + Sync + 'static,
    F: Fn(&mut C, &mut HookEvent) -> Result<(), HookError> + Send + Sync + 'static,
{
    async fn on_event(&self, ctx: &mut C, event: &mut HookEvent) -> Result<(), HookError> {
        (self.f)(ctx, event)
    }
}
