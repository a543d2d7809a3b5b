//! # EventManager - listener registration and the fire pipeline.
//!
//! [`EventManager`] owns the listener registry and drives every fire cycle
//! through three fixed checkpoints:
//!
//! ```text
//! fire(event, attachments)
//!   │
//!   ├─► FIRED checkpoint       notify "fired" listeners with [event, attachments]
//!   │
//!   ├─► resolve                active event? (internal, or registered and not
//!   │        │                 terminated) — otherwise skip straight ahead
//!   │        ▼
//!   │    notify loop           per entry, registration order:
//!   │                            dispatch(target, attachments ++ bound)
//!   │                            listener failure → on_exception cycle, or abort
//!   │
//!   └─► TERMINATED checkpoint  lock the event (public events only), then
//!                              notify "terminated" listeners with [event]
//! ```
//!
//! The checkpoints are direct calls into the notify loop, not recursive
//! fires: a cycle cannot re-enter its own plumbing, while subscribers of the
//! three internal names still observe every cycle.
//!
//! ## Rules
//! - Listener invocation order == registration order (per event).
//! - A public event terminates after exactly one completed pass; firing it
//!   again is a silent no-op (checkpoints still run).
//! - An unhandled listener failure aborts the cycle before TERMINATED: the
//!   event stays active and may be fired again.
//! - Internal events never terminate.
//! - Listeners run inline on the firing thread; when `fire` returns, every
//!   notification for the cycle (including nested fires) has completed.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::core::builder::EventManagerBuilder;
use crate::core::config::ManagerConfig;
use crate::core::registry::{self, Listener, ListenerRegistry};
use crate::dispatch::{CallableRef, Dispatch};
use crate::error::{DispatchError, FireError};

/// In-process event notification manager.
///
/// Construction goes through [`EventManager::new`] for the defaults or
/// [`EventManager::builder`] to inject a dispatcher, handler registry, or
/// configuration. The manager is `Send + Sync`; methods take `&self`, so one
/// instance can be shared behind an `Arc` and fired from listener bodies.
pub struct EventManager {
    registry: ListenerRegistry,
    dispatcher: Arc<dyn Dispatch>,
    config: ManagerConfig,
    /// In-flight fire cycles (nested or concurrent) on this manager.
    depth: AtomicUsize,
}

impl EventManager {
    /// Internal event raised at the start of every fire cycle with
    /// `[event, attachments]`.
    pub const FIRED: &'static str = registry::FIRED;

    /// Internal event notified with an intercepted listener failure,
    /// rendered as a single string argument.
    pub const ON_EXCEPTION: &'static str = registry::ON_EXCEPTION;

    /// Internal event raised when a fire cycle completes, with `[event]`.
    pub const TERMINATED: &'static str = registry::TERMINATED;

    /// Creates a manager with default configuration and a standard
    /// [`Dispatcher`](crate::Dispatcher) holding an empty handler registry.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts a builder for dispatcher/handler/config injection.
    #[must_use]
    pub fn builder() -> EventManagerBuilder {
        EventManagerBuilder::new()
    }

    pub(crate) fn from_parts(dispatcher: Arc<dyn Dispatch>, config: ManagerConfig) -> Self {
        Self {
            registry: ListenerRegistry::new(),
            dispatcher,
            config,
            depth: AtomicUsize::new(0),
        }
    }

    /// Registers `target` as a listener for `event`, with no bound
    /// parameters.
    ///
    /// Nothing is validated here: the event does not need to exist before
    /// listeners attach to it, and an unresolvable string target only fails
    /// once the event fires. Listeners registered on a terminated event are
    /// retained but never notified.
    pub fn listen(&self, event: &str, target: impl Into<CallableRef>) {
        self.push_listener(event, target.into(), Vec::new());
    }

    /// Registers `target` with bound parameters, appended after the fire
    /// attachments on every invocation.
    ///
    /// A non-array `bound` value is wrapped into a single-element list, so
    /// `listen_with(e, t, json!("x"))` and `listen_with(e, t, json!(["x"]))`
    /// register the same entry.
    pub fn listen_with(
        &self,
        event: &str,
        target: impl Into<CallableRef>,
        bound: impl Into<Value>,
    ) {
        self.push_listener(event, target.into(), positional(bound.into()));
    }

    fn push_listener(&self, event: &str, target: CallableRef, bound: Vec<Value>) {
        trace!(event, ?target, bound = bound.len(), "listener registered");
        self.registry.insert(event, Listener::new(target, bound));
    }

    /// Returns the sorted active event names, including the three internal
    /// ones.
    ///
    /// "Active" means registered and not yet terminated; this is the same
    /// view the pipeline uses to decide whether an event resolves.
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.registry.active_events(false)
    }

    /// Returns the sorted active public event names only.
    #[must_use]
    pub fn public_events(&self) -> Vec<String> {
        self.registry.active_events(true)
    }

    /// Returns the listener entries registered under `event`, while the
    /// event is active.
    ///
    /// `None` once a public event terminates (its listeners are kept but no
    /// longer reachable) and for names never listened to. Internal events
    /// always yield `Some`, possibly empty.
    #[must_use]
    pub fn listeners(&self, event: &str) -> Option<Vec<Listener>> {
        self.registry.entries_if_active(event)
    }

    /// Fires `event` with no attachments.
    ///
    /// Equivalent to [`fire_with`](Self::fire_with) and an empty array.
    pub fn fire(&self, event: &str) -> Result<(), FireError> {
        self.run_cycle(event, Value::Array(Vec::new()))
    }

    /// Fires `event`, notifying its listeners with the given attachments.
    ///
    /// The full pipeline runs inline: when this returns, every listener
    /// notified for this cycle has already executed, including nested fires
    /// raised from listener bodies. An array attachment is splatted into
    /// positional arguments; any other value is passed as a single argument.
    ///
    /// ## Errors
    /// - [`FireError::Listener`] — a listener failed and nothing absorbed
    ///   the failure (no `on_exception` listener, or a reference-resolution
    ///   error, which the hatch never sees).
    /// - [`FireError::DepthExceeded`] — runaway nested fires hit
    ///   [`ManagerConfig::max_fire_depth`].
    pub fn fire_with(&self, event: &str, attachments: impl Into<Value>) -> Result<(), FireError> {
        self.run_cycle(event, attachments.into())
    }

    /// Drives one full fire cycle: FIRED checkpoint, resolve + notify,
    /// TERMINATED checkpoint.
    fn run_cycle(&self, event: &str, attachments: Value) -> Result<(), FireError> {
        let _depth = DepthGuard::enter(&self.depth, self.config.depth_limit())?;
        debug!(event, "fire");

        // FIRED checkpoint: observers see every cycle, including no-op fires
        // of unknown or terminated events.
        self.notify(
            registry::FIRED,
            &[Value::String(event.to_string()), attachments.clone()],
        )?;

        if self.registry.is_resolvable(event) {
            let args = positional(attachments);
            self.notify(event, &args)?;
        } else {
            trace!(event, "skipped: not an active event");
        }

        // TERMINATED checkpoint: lock first (public events only), then let
        // observers see the completed cycle.
        if self.registry.terminate(event) {
            debug!(event, "terminated");
        }
        self.notify(registry::TERMINATED, &[Value::String(event.to_string())])?;
        Ok(())
    }

    /// Notifies every listener registered under `event`, in registration
    /// order, invoking each with `args ++ bound`.
    ///
    /// Failure policy per entry: an interceptable failure is routed through
    /// one nested `on_exception` cycle when that event has listeners and is
    /// not the event currently being notified; anything else propagates and
    /// aborts the remaining entries.
    fn notify(&self, event: &str, args: &[Value]) -> Result<(), FireError> {
        let entries = self.registry.snapshot(event);
        for (index, entry) in entries.iter().enumerate() {
            let mut merged = Vec::with_capacity(args.len() + entry.bound().len());
            merged.extend_from_slice(args);
            merged.extend_from_slice(entry.bound());

            trace!(event, index, "dispatching listener");
            match self.dispatch_entry(entry, &merged) {
                Ok(_) => {}
                Err(err)
                    if err.is_interceptable()
                        && event != registry::ON_EXCEPTION
                        && self.registry.has_listeners(registry::ON_EXCEPTION) =>
                {
                    debug!(event, index, error = %err, "listener failure routed to on_exception");
                    self.run_cycle(registry::ON_EXCEPTION, failure_payload(&err))?;
                }
                Err(err) => return Err(FireError::from(err)),
            }
        }
        Ok(())
    }

    /// Dispatches one entry, converting a panic into a listener failure when
    /// [`ManagerConfig::catch_panics`] is set.
    fn dispatch_entry(&self, entry: &Listener, args: &[Value]) -> Result<Value, DispatchError> {
        if !self.config.catch_panics {
            return self.dispatcher.dispatch(entry.target(), args);
        }

        let caught = catch_unwind(AssertUnwindSafe(|| {
            self.dispatcher.dispatch(entry.target(), args)
        }));
        match caught {
            Ok(outcome) => outcome,
            Err(panic) => Err(DispatchError::listener_failure(panic_message(
                panic.as_ref(),
            ))),
        }
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard around the in-flight cycle counter.
struct DepthGuard<'a> {
    depth: &'a AtomicUsize,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a AtomicUsize, limit: Option<usize>) -> Result<Self, FireError> {
        let current = depth.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(limit) = limit {
            if current > limit {
                depth.fetch_sub(1, Ordering::Relaxed);
                return Err(FireError::DepthExceeded { limit });
            }
        }
        Ok(Self { depth })
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Positional argument list for a raw attachment value: arrays are splatted,
/// anything else becomes a single argument.
fn positional(attachments: Value) -> Vec<Value> {
    match attachments {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Attachment handed to `on_exception` listeners: the failure rendered as one
/// string argument.
fn failure_payload(err: &DispatchError) -> Value {
    match err {
        DispatchError::ListenerFailure(source) => Value::String(source.to_string()),
        other => Value::String(other.to_string()),
    }
}

/// Renders a panic payload the way the default panic handler would.
fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "listener panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_splats_arrays_only() {
        let args = positional(Value::Array(vec![Value::from(1), Value::from(2)]));
        assert_eq!(args, vec![Value::from(1), Value::from(2)]);

        let single = positional(Value::from("x"));
        assert_eq!(single, vec![Value::from("x")]);

        assert_eq!(positional(Value::Null), vec![Value::Null]);
    }

    #[test]
    fn test_depth_guard_releases_on_drop() {
        let depth = AtomicUsize::new(0);
        {
            let _a = DepthGuard::enter(&depth, Some(2)).expect("first level fits");
            let _b = DepthGuard::enter(&depth, Some(2)).expect("second level fits");
            assert!(DepthGuard::enter(&depth, Some(2)).is_err());
        }
        assert_eq!(depth.load(Ordering::Relaxed), 0, "guards must unwind fully");
    }

    #[test]
    fn test_depth_guard_unlimited_when_no_limit() {
        let depth = AtomicUsize::new(usize::MAX / 2);
        let guard = DepthGuard::enter(&depth, None);
        assert!(guard.is_ok());
    }
}
