//! # Demo: log_observer
//!
//! The built-in tracing observer attached to the three internal events.
//! Attaching also registers an `on_exception` listener, so the failing
//! listener below is absorbed and logged instead of failing the fire.
//!
//! ## Run
//! ```bash
//! cargo run --example log_observer --features logging
//! ```

use eventfuse::{CallableRef, EventManager, LogObserver};
use serde_json::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let manager = EventManager::new();
    LogObserver::attach(&manager);

    manager.listen(
        "cache.warm",
        CallableRef::function(|_args: &[Value]| Ok(Value::Null)),
    );
    manager.fire("cache.warm")?;

    // Shows up through the observer's on_exception listener.
    manager.listen(
        "cache.evict",
        CallableRef::function(|_args: &[Value]| Err("eviction raced".into())),
    );
    manager.fire("cache.evict")?;

    Ok(())
}
