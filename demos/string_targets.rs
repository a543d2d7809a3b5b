//! # Demo: string_targets
//!
//! `"Type@method"` listeners resolved through a [`HandlerRegistry`]: register
//! a factory under the name the target string uses, and the dispatcher
//! constructs a fresh handler per invocation. Unregistered types or methods
//! surface as unresolved-target errors when the event fires.
//!
//! ## Run
//! ```bash
//! cargo run --example string_targets
//! ```

use eventfuse::{EventManager, Handler, HandlerError, HandlerRegistry};
use serde_json::{json, Value};

#[derive(Default)]
struct Mailer;

impl Handler for Mailer {
    fn call(&self, method: &str, args: &[Value]) -> Result<Value, HandlerError> {
        match method {
            "deliver" => {
                println!("[Mailer@deliver] {args:?}");
                Ok(Value::Bool(true))
            }
            other => Err(HandlerError::unknown_method(other)),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut handlers = HandlerRegistry::new();
    handlers.register::<Mailer>("Mailer");

    let manager = EventManager::builder().with_handlers(handlers).build();

    // The listener is just a string; resolution happens at dispatch time.
    manager.listen_with("signup.completed", "Mailer@deliver", json!(["welcome-template"]));
    manager.fire_with("signup.completed", json!(["ada@example.com"]))?;

    // A type nobody registered fails the fire with an unresolved target.
    manager.listen("billing.failed", "Invoicer@retry");
    if let Err(err) = manager.fire("billing.failed") {
        println!("unresolved as expected: {err}");
    }

    Ok(())
}
