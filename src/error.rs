//! Error types used by the fire pipeline and the dispatcher.
//!
//! This module defines two main error enums:
//!
//! - [`FireError`] — errors raised by a fire cycle as a whole.
//! - [`DispatchError`] — errors raised while resolving or invoking a single
//!   listener target.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics
//! and additional utilities such as [`DispatchError::is_interceptable`].

use thiserror::Error;

/// Boxed error returned by listener closures and handler methods.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// # Errors produced by the fire pipeline.
///
/// These represent a fire cycle that could not run to completion:
/// a listener failure nothing absorbed, or the depth guard tripping
/// on runaway nested fires.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FireError {
    /// A listener failed and the failure was not absorbed by `on_exception`:
    /// either nothing listens there, or the failure was a reference-resolution
    /// error, which the hatch never sees.
    #[error(transparent)]
    Listener(#[from] DispatchError),

    /// In-flight fire cycles exceeded
    /// [`ManagerConfig::max_fire_depth`](crate::ManagerConfig::max_fire_depth).
    #[error("fire depth limit {limit} exceeded")]
    DepthExceeded {
        /// The configured limit that was hit.
        limit: usize,
    },
}

impl FireError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventfuse::FireError;
    ///
    /// let err = FireError::DepthExceeded { limit: 8 };
    /// assert_eq!(err.as_label(), "fire_depth_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FireError::Listener(err) => err.as_label(),
            FireError::DepthExceeded { .. } => "fire_depth_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            FireError::Listener(err) => err.as_message(),
            FireError::DepthExceeded { limit } => {
                format!("fire depth limit {limit} exceeded")
            }
        }
    }
}

/// # Errors produced while dispatching one listener target.
///
/// The resolution variants (`InvalidCallableRef`, `UnresolvedTarget`) mean the
/// listener itself is miswired and always propagate to the `fire` caller.
/// Only [`DispatchError::ListenerFailure`] may be absorbed by `on_exception`.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The callable reference is malformed: a string target without the
    /// `Type@method` shape.
    #[error("invalid callable reference: {reason}")]
    InvalidCallableRef {
        /// What was wrong with the reference.
        reason: String,
    },

    /// The string target names a type or method the handler registry cannot
    /// resolve.
    #[error("unresolved target `{target}`: {reason}")]
    UnresolvedTarget {
        /// The `Type@method` string as registered.
        target: String,
        /// Which half failed to resolve.
        reason: String,
    },

    /// The listener body itself failed: a closure error, a handler method
    /// failure, or a caught panic.
    #[error("listener failed: {0}")]
    ListenerFailure(#[source] BoxError),
}

impl DispatchError {
    /// Builds a [`DispatchError::InvalidCallableRef`] with the given reason.
    pub fn invalid_ref(reason: impl Into<String>) -> Self {
        DispatchError::InvalidCallableRef {
            reason: reason.into(),
        }
    }

    /// Builds a [`DispatchError::UnresolvedTarget`] for a `Type@method`
    /// string whose type or method is not registered.
    pub fn unresolved(target: impl Into<String>, reason: impl Into<String>) -> Self {
        DispatchError::UnresolvedTarget {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Wraps a failure raised by a listener body.
    pub fn listener_failure(source: impl Into<BoxError>) -> Self {
        DispatchError::ListenerFailure(source.into())
    }

    /// Indicates whether the `on_exception` hatch may absorb this error.
    ///
    /// Returns `true` only for [`DispatchError::ListenerFailure`];
    /// reference-resolution errors are never interceptable.
    ///
    /// # Example
    /// ```
    /// use eventfuse::DispatchError;
    ///
    /// let failed = DispatchError::listener_failure("boom");
    /// assert!(failed.is_interceptable()); // true
    ///
    /// let miswired = DispatchError::unresolved("Foo@bar", "no handler");
    /// assert!(!miswired.is_interceptable()); // false
    /// ```
    pub fn is_interceptable(&self) -> bool {
        matches!(self, DispatchError::ListenerFailure(_))
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventfuse::DispatchError;
    ///
    /// let err = DispatchError::unresolved("Foo@bar", "no handler registered for `Foo`");
    /// assert_eq!(err.as_label(), "unresolved_target");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::InvalidCallableRef { .. } => "invalid_callable_ref",
            DispatchError::UnresolvedTarget { .. } => "unresolved_target",
            DispatchError::ListenerFailure(_) => "listener_failure",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::InvalidCallableRef { reason } => {
                format!("invalid callable: {reason}")
            }
            DispatchError::UnresolvedTarget { target, reason } => {
                format!("cannot resolve `{target}`: {reason}")
            }
            DispatchError::ListenerFailure(source) => {
                format!("listener failure: {source}")
            }
        }
    }
}
