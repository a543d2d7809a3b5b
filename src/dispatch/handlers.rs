//! # Handler registry for string-form targets.
//!
//! The contract behind a `"Type@method"` listener is: construct a fresh
//! instance of `Type` with no arguments, then invoke `method` on it with the
//! positional argument list. There is no reflection here; a type becomes
//! resolvable by registering a factory under the name the target string uses.
//!
//! ## Contract
//! - A handler instance lives for exactly one dispatch: the factory runs per
//!   invocation, so handlers cannot accumulate state between events.
//! - [`HandlerError::UnknownMethod`] is a resolution failure: it is reported
//!   as an unresolved target and never absorbed by the `on_exception` hatch.
//!   [`HandlerError::Failed`] is an ordinary listener failure.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::error::BoxError;

/// A named-method receiver for string-form listener targets.
///
/// # Example
/// ```
/// use eventfuse::{Handler, HandlerError};
/// use serde_json::Value;
///
/// #[derive(Default)]
/// struct Toggle;
///
/// impl Handler for Toggle {
///     fn call(&self, method: &str, args: &[Value]) -> Result<Value, HandlerError> {
///         match method {
///             "not" => {
///                 let flag = args.first().and_then(Value::as_bool).unwrap_or(false);
///                 Ok(Value::Bool(!flag))
///             }
///             other => Err(HandlerError::unknown_method(other)),
///         }
///     }
/// }
/// ```
pub trait Handler: Send + Sync {
    /// Invokes `method` with the positional argument list.
    fn call(&self, method: &str, args: &[Value]) -> Result<Value, HandlerError>;
}

/// Error signal returned by [`Handler::call`].
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The handler does not route the requested method (resolution failure).
    #[error("no method `{method}` on this handler")]
    UnknownMethod {
        /// The method name the target string asked for.
        method: String,
    },

    /// The method ran and failed (interceptable listener failure).
    #[error(transparent)]
    Failed(#[from] BoxError),
}

impl HandlerError {
    /// Signals that `method` is not routable on this handler.
    pub fn unknown_method(method: impl Into<String>) -> Self {
        HandlerError::UnknownMethod {
            method: method.into(),
        }
    }

    /// Wraps a failure raised by the method body.
    pub fn failed(source: impl Into<BoxError>) -> Self {
        HandlerError::Failed(source.into())
    }
}

/// Factory producing a fresh handler per dispatch.
type HandlerFactory = Arc<dyn Fn() -> Box<dyn Handler> + Send + Sync>;

/// Name → factory table resolving the `Type` half of string targets.
///
/// Cloning is cheap; the factories themselves are shared.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `H` under `name`, constructed through [`Default`] for every
    /// dispatch (the no-argument-construction contract).
    pub fn register<H>(&mut self, name: impl Into<String>)
    where
        H: Handler + Default + 'static,
    {
        self.register_with(name, || Box::new(H::default()));
    }

    /// Registers an explicit factory under `name`.
    ///
    /// Use this when the handler needs captured state (connections, counters)
    /// that plain construction cannot provide.
    pub fn register_with<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Handler> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Builds a fresh handler for `name`, if registered.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Box<dyn Handler>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// True if `name` has a registered factory.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Number of registered handler types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// True if no handler types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("types", &names)
            .finish()
    }
}
