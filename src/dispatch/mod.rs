//! Dispatch layer: callable references, the dispatch seam, and the handler
//! registry backing string-form targets.
//!
//! Internal modules:
//! - [`callable`]: [`CallableRef`] / [`ListenerFn`], the two-variant reference
//!   type listeners are registered under;
//! - [`dispatcher`]: the [`Dispatch`] capability and its standard
//!   implementation [`Dispatcher`];
//! - [`handlers`]: [`Handler`] / [`HandlerRegistry`], type registration
//!   replacing reflection-based resolution of `"Type@method"` strings.

mod callable;
mod dispatcher;
mod handlers;

pub use callable::{CallableRef, ListenerFn};
pub use dispatcher::{Dispatch, Dispatcher};
pub use handlers::{Handler, HandlerError, HandlerRegistry};
