//! # Listener registry - event state behind a single lock.
//!
//! The registry owns both pieces of manager state: the per-event listener
//! lists (append-only, registration order preserved) and the monotone set of
//! terminated public events.
//!
//! ## Event states
//! ```text
//! public:    unknown ──listen──► active ──one completed fire cycle──► terminated
//! internal:  "fired" / "on_exception" / "terminated" are always active,
//!            never terminate, never appear in the public view
//! ```
//!
//! ## Rules
//! - Methods hold the lock for one table operation only, never across a
//!   listener dispatch; recursive fires on one thread stay deadlock-free.
//! - Notification works on snapshots: listeners added mid-cycle land in the
//!   next cycle.
//! - Termination is monotone; a terminated event still accepts listeners but
//!   they are never notified.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use serde_json::Value;

use crate::dispatch::CallableRef;

/// Name of the internal event raised at the start of every fire cycle.
pub(crate) const FIRED: &str = "fired";
/// Name of the internal event carrying intercepted listener failures.
pub(crate) const ON_EXCEPTION: &str = "on_exception";
/// Name of the internal event raised when a fire cycle completes.
pub(crate) const TERMINATED: &str = "terminated";

/// The fixed internal event set. Immutable for the life of a manager.
pub(crate) const INTERNAL_EVENTS: [&str; 3] = [FIRED, ON_EXCEPTION, TERMINATED];

/// True for the three reserved lifecycle event names.
pub(crate) fn is_internal(event: &str) -> bool {
    INTERNAL_EVENTS.contains(&event)
}

/// A registered `(target, bound parameters)` pair.
#[derive(Clone, Debug)]
pub struct Listener {
    target: CallableRef,
    bound: Vec<Value>,
}

impl Listener {
    pub(crate) fn new(target: CallableRef, bound: Vec<Value>) -> Self {
        Self { target, bound }
    }

    /// The invocation target.
    #[inline]
    pub fn target(&self) -> &CallableRef {
        &self.target
    }

    /// Parameters appended after the fire attachments on every invocation.
    #[inline]
    pub fn bound(&self) -> &[Value] {
        &self.bound
    }
}

/// Mutable state guarded by the registry mutex.
#[derive(Default)]
struct Tables {
    /// Per-event listener lists in registration order.
    listeners: HashMap<String, Vec<Listener>>,
    /// Public events that completed one full notification pass.
    terminated: HashSet<String>,
}

/// Shared listener/termination state for one manager.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    tables: Mutex<Tables>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a listener under `event`.
    ///
    /// Registration never fails and does not validate the event name or the
    /// target; a terminated event accepts new listeners even though firing it
    /// stays a no-op.
    pub(crate) fn insert(&self, event: &str, listener: Listener) {
        let mut tables = self.tables.lock();
        tables
            .listeners
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    /// Snapshot of the listeners registered under `event`, in registration
    /// order.
    pub(crate) fn snapshot(&self, event: &str) -> Vec<Listener> {
        let tables = self.tables.lock();
        tables.listeners.get(event).cloned().unwrap_or_default()
    }

    /// True if at least one listener is registered under `event`.
    pub(crate) fn has_listeners(&self, event: &str) -> bool {
        let tables = self.tables.lock();
        tables
            .listeners
            .get(event)
            .map_or(false, |entries| !entries.is_empty())
    }

    /// True if firing `event` should notify its listeners: internal events
    /// are always resolvable; public events must be registered and not
    /// terminated.
    pub(crate) fn is_resolvable(&self, event: &str) -> bool {
        if is_internal(event) {
            return true;
        }
        let tables = self.tables.lock();
        tables.listeners.contains_key(event) && !tables.terminated.contains(event)
    }

    /// Marks a completed public event as terminated. Internal events and
    /// names that are not currently active are left untouched.
    ///
    /// Returns `true` when the event transitioned to terminated.
    pub(crate) fn terminate(&self, event: &str) -> bool {
        if is_internal(event) {
            return false;
        }
        let mut tables = self.tables.lock();
        if tables.listeners.contains_key(event) && !tables.terminated.contains(event) {
            tables.terminated.insert(event.to_string());
            true
        } else {
            false
        }
    }

    /// Returns the sorted list of active event names: public events that are
    /// registered and not terminated, with the three internal names unioned
    /// in unless `exclude_internals` is set.
    pub(crate) fn active_events(&self, exclude_internals: bool) -> Vec<String> {
        let tables = self.tables.lock();
        let mut events: Vec<String> = tables
            .listeners
            .keys()
            .filter(|name| {
                !is_internal(name.as_str()) && !tables.terminated.contains(name.as_str())
            })
            .cloned()
            .collect();
        drop(tables);

        if !exclude_internals {
            events.extend(INTERNAL_EVENTS.iter().map(|name| name.to_string()));
        }
        events.sort_unstable();
        events
    }

    /// Listener entries for `event`, gated on the event being active:
    /// `None` for unknown or terminated names, `Some` (possibly empty, for an
    /// internal event nobody listens to) otherwise.
    pub(crate) fn entries_if_active(&self, event: &str) -> Option<Vec<Listener>> {
        if is_internal(event) {
            return Some(self.snapshot(event));
        }
        let tables = self.tables.lock();
        if tables.terminated.contains(event) {
            return None;
        }
        tables.listeners.get(event).cloned()
    }
}
