use std::sync::Arc;

use crate::core::config::ManagerConfig;
use crate::core::manager::EventManager;
use crate::dispatch::{Dispatch, Dispatcher, HandlerRegistry};

/// Builder for constructing an [`EventManager`] with optional collaborators.
///
/// # Example
/// ```
/// use eventfuse::{EventManager, HandlerRegistry, ManagerConfig};
///
/// let manager = EventManager::builder()
///     .config(ManagerConfig::default())
///     .with_handlers(HandlerRegistry::new())
///     .build();
/// assert!(manager.public_events().is_empty());
/// ```
pub struct EventManagerBuilder {
    config: ManagerConfig,
    dispatcher: Option<Arc<dyn Dispatch>>,
    handlers: HandlerRegistry,
}

impl EventManagerBuilder {
    /// Creates a builder with default configuration and the standard
    /// dispatcher.
    pub fn new() -> Self {
        Self {
            config: ManagerConfig::default(),
            dispatcher: None,
            handlers: HandlerRegistry::new(),
        }
    }

    /// Overrides the manager configuration.
    pub fn config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Injects a custom dispatch capability.
    ///
    /// The manager routes every listener invocation through this object;
    /// substitutes must uphold the [`Dispatch`] failure-class contract.
    /// When set, [`with_handlers`](Self::with_handlers) has no effect.
    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn Dispatch>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Seeds the built-in dispatcher's handler registry for `"Type@method"`
    /// targets. Ignored when a custom dispatcher is injected.
    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = handlers;
        self
    }

    /// Builds and returns the manager.
    ///
    /// This consumes the builder and wires the two collaborators together:
    /// - the listener registry (always fresh and empty)
    /// - the dispatcher (injected, or a [`Dispatcher`] over the seeded
    ///   handler registry)
    pub fn build(self) -> EventManager {
        let dispatcher = self
            .dispatcher
            .unwrap_or_else(|| Arc::new(Dispatcher::with_handlers(self.handlers)));
        EventManager::from_parts(dispatcher, self.config)
    }
}

impl Default for EventManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
