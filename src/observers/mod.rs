//! Cross-cutting observers for the internal lifecycle events.
//!
//! Anything that can listen can observe: the three internal events are
//! ordinary subscription targets, so logging or metrics hooks attach without
//! touching producers. This module ships one built-in observer behind the
//! `logging` feature.

mod log;

pub use log::LogObserver;
