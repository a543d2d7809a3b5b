//! # Callable references.
//!
//! [`CallableRef`] is the tagged reference type listeners are registered
//! under: either an in-memory closure ([`CallableRef::Function`]) or a string
//! of the form `"Type@method"` ([`CallableRef::Target`]) resolved through the
//! [`HandlerRegistry`](crate::HandlerRegistry) at dispatch time.
//!
//! String targets are deliberately unvalidated at registration; a bad type or
//! method name surfaces as a dispatch error when the event fires.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;

/// Shared handle to a listener closure.
///
/// The closure receives the merged positional argument list (fire attachments
/// first, then the parameters bound at registration) and returns a value or a
/// failure. Return [`Value::Null`] when there is nothing to report.
pub type ListenerFn = Arc<dyn Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync>;

/// Reference to an invocable listener target.
#[derive(Clone)]
pub enum CallableRef {
    /// An in-memory function value, invoked positionally.
    Function(ListenerFn),

    /// A `"Type@method"` string resolved through the handler registry.
    Target(String),
}

impl CallableRef {
    /// Wraps a closure as a callable reference.
    ///
    /// # Example
    /// ```
    /// use eventfuse::CallableRef;
    /// use serde_json::Value;
    ///
    /// let count_args = CallableRef::function(|args: &[Value]| {
    ///     Ok(Value::from(args.len()))
    /// });
    /// assert!(matches!(count_args, CallableRef::Function(_)));
    /// ```
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        CallableRef::Function(Arc::new(f))
    }

    /// References a `"Type@method"` pair resolved at dispatch time.
    pub fn target(target: impl Into<String>) -> Self {
        CallableRef::Target(target.into())
    }
}

impl fmt::Debug for CallableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallableRef::Function(_) => f.write_str("CallableRef::Function(..)"),
            CallableRef::Target(target) => {
                f.debug_tuple("CallableRef::Target").field(target).finish()
            }
        }
    }
}

impl From<&str> for CallableRef {
    fn from(target: &str) -> Self {
        CallableRef::Target(target.to_string())
    }
}

impl From<String> for CallableRef {
    fn from(target: String) -> Self {
        CallableRef::Target(target)
    }
}
