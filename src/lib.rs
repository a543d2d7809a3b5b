//! # eventfuse
//!
//! **Eventfuse** is a synchronous in-process event notification library for Rust.
//!
//! It provides primitives to register listeners under named events and to
//! fire those events through a fixed pipeline with one-shot termination
//! semantics. The crate is designed as a building block for plugin systems,
//! lifecycle hooks, and other decoupled-notification plumbing.
//!
//! ## Architecture
//! ### Overview
//! ```text
//! caller ──listen(event, target[, bound])──► EventManager
//!                                               │
//!                                               ▼
//!                                   ┌───────────────────────┐
//!                                   │   ListenerRegistry    │
//!                                   │   event → [Listener]  │
//!                                   │   terminated: {name}  │
//!                                   └───────────┬───────────┘
//! caller ──fire(event[, attachments])──► snapshot entries
//!                                               │
//!                                               ▼
//!                                   ┌───────────────────────┐
//!                                   │  Dispatch (seam)      │
//!                                   │  ├─ closure targets   │
//!                                   │  └─ "Type@method" ────┼──► HandlerRegistry
//!                                   └───────────────────────┘      (factories)
//! ```
//!
//! ### Fire cycle
//! ```text
//! fire(event, attachments)
//!   │
//!   ├─► FIRED checkpoint       "fired" listeners get [event, attachments]
//!   │
//!   ├─► resolve                internal event, or registered and not terminated?
//!   │     ├─ yes ─► notify loop (registration order)
//!   │     │           └─► dispatch(target, attachments ++ bound)
//!   │     │                 ├─ Ok            ─► next entry
//!   │     │                 ├─ listener fail ─► "on_exception" cycle, or abort
//!   │     │                 └─ miswired ref  ─► abort (never intercepted)
//!   │     └─ no  ─► skip (silent no-op)
//!   │
//!   └─► TERMINATED checkpoint  lock the event (public events only),
//!                              "terminated" listeners get [event]
//!
//! Aborted cycles skip the TERMINATED checkpoint: the event stays active
//! and may be fired again. Internal events never terminate.
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                |
//! |-------------------|--------------------------------------------------------------|-----------------------------------|
//! | **Listening**     | Register closures or `"Type@method"` strings per event.      | [`CallableRef`], [`Listener`]     |
//! | **Firing**        | Drive the three-checkpoint pipeline inline, to completion.   | [`EventManager`]                  |
//! | **Dispatch**      | Swap how targets are invoked (mocks, instrumentation).       | [`Dispatch`], [`Dispatcher`]      |
//! | **Handlers**      | Resolve string targets without reflection.                   | [`Handler`], [`HandlerRegistry`]  |
//! | **Errors**        | Typed errors split by pipeline vs dispatch concern.          | [`FireError`], [`DispatchError`]  |
//! | **Configuration** | Centralize pipeline guard rails.                             | [`ManagerConfig`]                 |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogObserver`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use eventfuse::{CallableRef, EventManager};
//! use serde_json::{json, Value};
//!
//! fn main() -> Result<(), eventfuse::FireError> {
//!     let manager = EventManager::new();
//!
//!     // Closure listener with a bound parameter appended after attachments.
//!     manager.listen_with(
//!         "user.created",
//!         CallableRef::function(|args: &[Value]| {
//!             println!("welcome {}, flags={:?}", args[0], &args[1..]);
//!             Ok(Value::Null)
//!         }),
//!         json!(["send-welcome-mail"]),
//!     );
//!
//!     // The internal checkpoints are ordinary subscription targets.
//!     manager.listen(
//!         EventManager::TERMINATED,
//!         CallableRef::function(|args: &[Value]| {
//!             println!("cycle done: {}", args[0]);
//!             Ok(Value::Null)
//!         }),
//!     );
//!
//!     manager.fire_with("user.created", json!(["ada"]))?;
//!
//!     // One completed cycle terminated the event: this fire is a no-op.
//!     manager.fire_with("user.created", json!(["grace"]))?;
//!     Ok(())
//! }
//! ```
mod core;
mod dispatch;
mod error;

// ---- Public re-exports ----

pub use crate::core::{EventManager, EventManagerBuilder, Listener, ManagerConfig};
pub use crate::dispatch::{
    CallableRef, Dispatch, Dispatcher, Handler, HandlerError, HandlerRegistry, ListenerFn,
};
pub use crate::error::{BoxError, DispatchError, FireError};

// Optional: expose a simple built-in tracing observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod observers;
#[cfg(feature = "logging")]
pub use observers::LogObserver;
