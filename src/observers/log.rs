//! # Tracing observer for the internal lifecycle events.
//!
//! [`LogObserver`] registers listeners on `fired`, `on_exception` and
//! `terminated` that emit `tracing` events. Useful for demos and while wiring
//! a new event graph; production systems likely want their own observers with
//! richer fields.
//!
//! ## Output (with a fmt subscriber at DEBUG)
//! ```text
//! DEBUG eventfuse::observers::log: event fired event="cache.warm"
//! DEBUG eventfuse::observers::log: event terminated event="cache.warm"
//! ERROR eventfuse::observers::log: listener failure error="eviction raced"
//! ```

use serde_json::Value;
use tracing::{debug, error};

use crate::{CallableRef, EventManager};

/// Attaches tracing-emitting listeners for the three internal events.
///
/// Enabled via the `logging` feature. The listeners never fail, so they do
/// not disturb the pipeline's failure policy — with one caveat: attaching
/// registers an `on_exception` listener, which makes listener failures
/// interceptable (`fire` stops propagating them).
pub struct LogObserver;

impl LogObserver {
    /// Subscribes the observer's listeners on `manager`.
    ///
    /// Registration order matters like for any listener: attach early if the
    /// observer should run before other internal-event subscribers.
    pub fn attach(manager: &EventManager) {
        manager.listen(
            EventManager::FIRED,
            CallableRef::function(|args: &[Value]| {
                debug!(event = %label(args), "event fired");
                Ok(Value::Null)
            }),
        );
        manager.listen(
            EventManager::TERMINATED,
            CallableRef::function(|args: &[Value]| {
                debug!(event = %label(args), "event terminated");
                Ok(Value::Null)
            }),
        );
        manager.listen(
            EventManager::ON_EXCEPTION,
            CallableRef::function(|args: &[Value]| {
                error!(error = %label(args), "listener failure");
                Ok(Value::Null)
            }),
        );
    }
}

/// First argument as a display label; internal events always carry one.
fn label(args: &[Value]) -> String {
    match args.first() {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
