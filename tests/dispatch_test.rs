//! Integration tests for the dispatch seam: string targets through the
//! handler registry, and dispatcher substitution at the builder.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};

use eventfuse::{
    CallableRef, Dispatch, DispatchError, EventManager, FireError, Handler, HandlerError,
    HandlerRegistry,
};

// ---------------------------------------------------------------------------
// Test handler
// ---------------------------------------------------------------------------

struct Vault {
    log: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl Handler for Vault {
    fn call(&self, method: &str, args: &[Value]) -> Result<Value, HandlerError> {
        match method {
            "open" => {
                self.log.lock().push(args.to_vec());
                Ok(Value::Bool(true))
            }
            "jam" => Err(HandlerError::failed("jam")),
            other => Err(HandlerError::unknown_method(other)),
        }
    }
}

fn vault_manager() -> (EventManager, Arc<Mutex<Vec<Vec<Value>>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);

    let mut handlers = HandlerRegistry::new();
    handlers.register_with("Vault", move || {
        Box::new(Vault {
            log: Arc::clone(&sink),
        })
    });

    let manager = EventManager::builder().with_handlers(handlers).build();
    (manager, log)
}

// ---------------------------------------------------------------------------
// String targets end-to-end
// ---------------------------------------------------------------------------

#[test]
fn test_handler_method_receives_positional_args() {
    let (manager, log) = vault_manager();

    manager.listen_with("secret.rotated", "Vault@open", json!(["audit"]));
    manager
        .fire_with("secret.rotated", "1234")
        .expect("cycle should complete");

    assert_eq!(*log.lock(), vec![vec![json!("1234"), json!("audit")]]);
}

#[test]
fn test_unregistered_type_fails_the_fire() {
    let manager = EventManager::new();
    manager.listen("ghost", "Foo@bar");

    let err = manager
        .fire_with("ghost", json!([1, 2]))
        .expect_err("unknown type should fail");
    assert!(matches!(
        err,
        FireError::Listener(DispatchError::UnresolvedTarget { .. })
    ));
    assert!(err.to_string().contains("Foo@bar"));
}

#[test]
fn test_unknown_method_is_not_intercepted() {
    let (manager, log) = vault_manager();
    let hatch_hits = Arc::new(Mutex::new(0usize));
    let hits = Arc::clone(&hatch_hits);

    manager.listen(
        EventManager::ON_EXCEPTION,
        CallableRef::function(move |_args: &[Value]| {
            *hits.lock() += 1;
            Ok(Value::Null)
        }),
    );
    manager.listen("drill", "Vault@missing");

    let err = manager
        .fire("drill")
        .expect_err("unknown method should fail");
    assert!(matches!(
        err,
        FireError::Listener(DispatchError::UnresolvedTarget { .. })
    ));
    assert_eq!(*hatch_hits.lock(), 0, "resolution errors bypass the hatch");
    assert!(log.lock().is_empty());
}

#[test]
fn test_handler_failure_routes_to_hatch() {
    let (manager, _log) = vault_manager();
    let payloads = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&payloads);

    manager.listen(
        EventManager::ON_EXCEPTION,
        CallableRef::function(move |args: &[Value]| {
            sink.lock().push(args.to_vec());
            Ok(Value::Null)
        }),
    );
    manager.listen("drill", "Vault@jam");

    manager
        .fire("drill")
        .expect("handler-body failure should be absorbed by the hatch");
    assert_eq!(*payloads.lock(), vec![vec![json!("jam")]]);
}

#[test]
fn test_malformed_target_fails_as_invalid_ref() {
    let manager = EventManager::new();
    manager.listen("wired", "no-separator");

    let err = manager
        .fire("wired")
        .expect_err("malformed target should fail");
    assert!(matches!(
        err,
        FireError::Listener(DispatchError::InvalidCallableRef { .. })
    ));
}

// ---------------------------------------------------------------------------
// Dispatcher substitution
// ---------------------------------------------------------------------------

/// Dispatch substitute that records calls instead of resolving them.
#[derive(Default)]
struct RecordingDispatch {
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl Dispatch for RecordingDispatch {
    fn dispatch(&self, target: &CallableRef, args: &[Value]) -> Result<Value, DispatchError> {
        let shown = match target {
            CallableRef::Target(raw) => raw.clone(),
            CallableRef::Function(_) => "<fn>".to_string(),
        };
        self.calls.lock().push((shown, args.to_vec()));
        Ok(Value::Null)
    }
}

#[test]
fn test_injected_dispatcher_sees_merged_arguments() {
    let recording = Arc::new(RecordingDispatch::default());
    let manager = EventManager::builder()
        .with_dispatcher(recording.clone())
        .build();

    manager.listen_with("audit", "Sink@write", json!(["bound"]));
    manager
        .fire_with("audit", json!(["att"]))
        .expect("recording dispatcher never fails");

    let calls = recording.calls.lock();
    assert_eq!(
        *calls,
        vec![(
            "Sink@write".to_string(),
            vec![json!("att"), json!("bound")]
        )],
        "the manager merges attachments before bound parameters"
    );
}

#[test]
fn test_injected_dispatcher_handles_unregistered_targets() {
    // No handler registry involved: the substitute accepts any target, so a
    // string that the standard dispatcher would reject goes through.
    let recording = Arc::new(RecordingDispatch::default());
    let manager = EventManager::builder()
        .with_dispatcher(recording.clone())
        .build();

    manager.listen("anything", "Totally@unregistered");
    manager
        .fire("anything")
        .expect("substitute decides resolution, not the manager");
    assert_eq!(recording.calls.lock().len(), 1);
}
