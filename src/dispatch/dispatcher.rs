//! # Dispatch seam between the manager and listener targets.
//!
//! [`Dispatch`] is the narrow capability the event manager depends on: given
//! a [`CallableRef`] and a positional argument list, invoke the target and
//! return its value or failure. The standard implementation is
//! [`Dispatcher`]; substitutes (mocks, instrumented wrappers) are injected at
//! manager construction via
//! [`EventManagerBuilder::with_dispatcher`](crate::EventManagerBuilder::with_dispatcher).
//!
//! ## Failure classes
//! Implementations must keep the two classes apart:
//!
//! - [`DispatchError::ListenerFailure`] — the target's own body failed;
//!   interceptable through `on_exception`.
//! - The resolution variants — the reference itself is unusable; these always
//!   propagate to the `fire` caller.

use serde_json::Value;

use crate::dispatch::callable::CallableRef;
use crate::dispatch::handlers::{HandlerError, HandlerRegistry};
use crate::error::DispatchError;

/// Contract for invoking listener targets.
pub trait Dispatch: Send + Sync {
    /// Invokes `target` positionally with `args`.
    fn dispatch(&self, target: &CallableRef, args: &[Value]) -> Result<Value, DispatchError>;
}

/// Standard dispatcher backed by a [`HandlerRegistry`] for string targets.
///
/// Closures are invoked directly; `"Type@method"` strings are split on the
/// first `@`, the type half is resolved to a fresh handler instance, and the
/// method half is routed by the handler itself.
#[derive(Clone, Debug, Default)]
pub struct Dispatcher {
    handlers: HandlerRegistry,
}

impl Dispatcher {
    /// Creates a dispatcher with an empty handler registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher resolving string targets through `handlers`.
    #[must_use]
    pub fn with_handlers(handlers: HandlerRegistry) -> Self {
        Self { handlers }
    }

    /// Splits a `"Type@method"` target on the first `@`.
    fn split_target(target: &str) -> Result<(&str, &str), DispatchError> {
        match target.split_once('@') {
            Some((ty, method)) if !ty.is_empty() && !method.is_empty() => Ok((ty, method)),
            _ => Err(DispatchError::invalid_ref(format!(
                "expected `Type@method`, got `{target}`"
            ))),
        }
    }
}

impl Dispatch for Dispatcher {
    fn dispatch(&self, target: &CallableRef, args: &[Value]) -> Result<Value, DispatchError> {
        match target {
            CallableRef::Function(f) => f(args).map_err(DispatchError::listener_failure),
            CallableRef::Target(raw) => {
                let (ty, method) = Self::split_target(raw)?;
                let handler = self.handlers.resolve(ty).ok_or_else(|| {
                    DispatchError::unresolved(
                        raw.clone(),
                        format!("no handler registered for `{ty}`"),
                    )
                })?;
                handler.call(method, args).map_err(|err| match err {
                    HandlerError::UnknownMethod { method } => DispatchError::unresolved(
                        raw.clone(),
                        format!("no method `{method}` on `{ty}`"),
                    ),
                    HandlerError::Failed(source) => DispatchError::ListenerFailure(source),
                })
            }
        }
    }
}
