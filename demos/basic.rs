//! # Demo: basic
//!
//! Minimal walkthrough of the fire pipeline: one listener with a bound
//! parameter, an internal-event observer, and the one-shot termination that
//! follows a completed cycle.
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use eventfuse::{CallableRef, EventManager};
use serde_json::{json, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. A fresh manager: default configuration, empty handler registry.
    let manager = EventManager::new();

    // 2. Register a listener with a bound parameter; it is appended after
    //    the fire attachments on every invocation.
    manager.listen_with(
        "order.placed",
        CallableRef::function(|args: &[Value]| {
            println!("[order.placed] args={args:?}");
            Ok(Value::Null)
        }),
        json!(["priority"]),
    );

    // 3. Observe the internal checkpoints like any other event.
    manager.listen(
        EventManager::TERMINATED,
        CallableRef::function(|args: &[Value]| {
            println!("[terminated] {}", args[0]);
            Ok(Value::Null)
        }),
    );

    // 4. Fire: listeners run inline, in registration order.
    manager.fire_with("order.placed", json!(["#4711"]))?;

    // 5. One completed cycle closed the event; this fire is a silent no-op
    //    (the checkpoints still run).
    manager.fire_with("order.placed", json!(["#4712"]))?;

    println!("active public events: {:?}", manager.public_events());
    Ok(())
}
