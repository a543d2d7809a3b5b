//! Manager core: registration, the fire pipeline, and its guard rails.
//!
//! This module contains the embedded implementation of the event pipeline.
//! The public API from this module is [`EventManager`] plus the pieces needed
//! to construct and inspect one.
//!
//! Internal modules:
//! - [`manager`]: public API and the three-checkpoint fire cycle;
//! - [`registry`]: listener table, terminated set, active-event queries;
//! - [`builder`]: dispatcher/handler/config injection;
//! - [`config`]: pipeline guard-rail settings.

mod builder;
mod config;
mod manager;
mod registry;

pub use builder::EventManagerBuilder;
pub use config::ManagerConfig;
pub use manager::EventManager;
pub use registry::Listener;
