//! Integration tests for function registries.

#![cfg(feature = "registry")]

mod common;

use common::{int, ints};
use lambars_dispatch::Error;
use lambars_dispatch::function::{Arity, Function};
use lambars_dispatch::registry::{EntryOptions, Registry, Resolved};
use lambars_dispatch::value::Value;
use rstest::{fixture, rstest};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn add(first: Value, second: Value) -> Value {
    Value::from(int(&first) + int(&second))
}

fn clamp(low: Value, high: Value, number: Value) -> Value {
    Value::from(int(&number).clamp(int(&low), int(&high).max(int(&low))))
}

#[fixture]
fn executions() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

#[fixture]
fn registry(executions: Arc<AtomicUsize>) -> (Registry, Arc<AtomicUsize>) {
    init_tracing();
    let counter = Arc::clone(&executions);
    let slow_square = Function::native(move |number: Value| {
        counter.fetch_add(1, Ordering::SeqCst);
        Value::from(int(&number).pow(2))
    });
    let sum = Function::variadic(1, |numbers: &[Value]| {
        Value::from(numbers.iter().map(int).sum::<i64>())
    });

    let registry = Registry::builder("math")
        .register("add", Function::native(add))
        .register("clamp", Function::native(clamp))
        .register_with("square", slow_square, EntryOptions::memoized())
        .register_with("sum", sum, EntryOptions::curry_exempt())
        .build();
    (registry, executions)
}

// =============================================================================
// Lookup
// =============================================================================

#[rstest]
fn test_registry_metadata(registry: (Registry, Arc<AtomicUsize>)) {
    let (registry, _) = registry;
    assert_eq!(registry.name(), "math");
    assert_eq!(registry.len(), 4);
    assert!(!registry.is_empty());
    assert_eq!(registry.names(), vec!["add", "clamp", "square", "sum"]);
    assert!(registry.contains("add"));
    assert!(!registry.contains("subtract"));
    assert_eq!(registry.entry("clamp").map(|entry| entry.arity()), Some(Arity::fixed(3)));
}

#[rstest]
#[case("subtract")]
#[case("")]
#[case("ADD")]
fn test_unknown_name_is_not_found(registry: (Registry, Arc<AtomicUsize>), #[case] name: &str) {
    let (registry, _) = registry;
    assert_eq!(
        registry.resolve(name),
        Err(Error::FunctionNotFound {
            name: name.to_string(),
            registry: "math".to_string(),
        })
    );
}

#[test]
fn test_not_found_message_names_function_and_registry() {
    let registry = Registry::builder("strings").build();
    let error = registry.resolve("reverse").unwrap_err();
    assert_eq!(
        error.to_string(),
        "function `reverse` is not registered in `strings`"
    );
}

// =============================================================================
// Resolution
// =============================================================================

#[rstest]
fn test_default_entries_resolve_curried(registry: (Registry, Arc<AtomicUsize>)) {
    let (registry, _) = registry;
    let clamp = registry.resolve("clamp").unwrap();

    let between = clamp.call(&ints(&[0, 10])).unwrap();
    assert_eq!(between.call(&ints(&[42])), Ok(Value::from(10)));
    assert_eq!(between.call(&ints(&[-3])), Ok(Value::from(0)));
    assert_eq!(clamp.call(&ints(&[0, 10, 5])), Ok(Value::from(5)));
}

#[rstest]
fn test_resolution_is_stable(registry: (Registry, Arc<AtomicUsize>)) {
    let (registry, _) = registry;
    let first = registry.resolve("add").unwrap();
    let second = registry.resolve("add").unwrap();
    let from_clone = registry.clone().resolve("add").unwrap();

    assert!(first.ptr_eq(&second));
    assert!(first.ptr_eq(&from_clone));
    assert_eq!(first.name(), Some("add"));
}

#[rstest]
fn test_memoized_entry_shares_one_cache_across_resolutions(
    registry: (Registry, Arc<AtomicUsize>),
) {
    let (registry, executions) = registry;

    let first = registry.resolve("square").unwrap();
    assert_eq!(first.call(&ints(&[9])), Ok(Value::from(81)));

    let second = registry.resolve("square").unwrap();
    assert_eq!(second.call(&ints(&[9])), Ok(Value::from(81)));

    assert_eq!(executions.load(Ordering::SeqCst), 1);
}

#[test]
fn test_partially_applied_handles_share_memoization() {
    let executions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&executions);
    let multiply = Function::native(move |first: Value, second: Value| {
        counter.fetch_add(1, Ordering::SeqCst);
        Value::from(int(&first) * int(&second))
    });
    let registry = Registry::builder("math")
        .register_with("mul", multiply, EntryOptions::memoized())
        .build();

    let first_triple = registry.resolve("mul").unwrap().call(&ints(&[3])).unwrap();
    let second_triple = registry.resolve("mul").unwrap().call(&ints(&[3])).unwrap();

    assert_eq!(first_triple.call(&ints(&[4])), Ok(Value::from(12)));
    assert_eq!(second_triple.call(&ints(&[4])), Ok(Value::from(12)));
    assert_eq!(executions.load(Ordering::SeqCst), 1);

    assert_eq!(registry.resolve("mul").unwrap().call(&ints(&[3, 4])), Ok(Value::from(12)));
    assert_eq!(executions.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_curry_exempt_entry_takes_all_arguments_at_once(registry: (Registry, Arc<AtomicUsize>)) {
    let (registry, _) = registry;
    let sum = registry.resolve("sum").unwrap();

    assert_eq!(sum.arity(), Arity::variadic(1));
    assert_eq!(sum.call(&ints(&[1, 2, 3, 4])), Ok(Value::from(10)));
    assert_eq!(sum.call(&[]), Ok(Value::from(0)));
}

#[test]
fn test_curry_exempt_entry_rejects_missing_arguments() {
    let registry = Registry::builder("math")
        .register_with("add", Function::native(add), EntryOptions::curry_exempt())
        .build();
    let add = registry.resolve("add").unwrap();

    assert_eq!(add.call(&ints(&[1, 2])), Ok(Value::from(3)));
    assert_eq!(
        add.call(&ints(&[1])),
        Err(Error::ArgumentCount {
            function: "add".to_string(),
            expected: 2,
            given: 1,
        })
    );
}

#[test]
fn test_memoized_curry_exempt_entry() {
    let executions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&executions);
    let join = Function::variadic(1, move |parts: &[Value]| {
        counter.fetch_add(1, Ordering::SeqCst);
        Value::from(parts.iter().map(ToString::to_string).collect::<Vec<_>>().join("-"))
    });

    let registry = Registry::builder("strings")
        .register_with("join", join, EntryOptions::memoized().with_curry_exempt(true))
        .build();
    let join = registry.resolve("join").unwrap();

    let arguments = [Value::from("a"), Value::from("b")];
    assert_eq!(join.call(&arguments), Ok(Value::from("a-b")));
    assert_eq!(join.call(&arguments), Ok(Value::from("a-b")));
    assert_eq!(executions.load(Ordering::SeqCst), 1);
}

#[test]
fn test_last_registration_wins() {
    let registry = Registry::builder("constants")
        .register("answer", Function::native(|| 41))
        .register("answer", Function::native(|| 42))
        .build();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.resolve("answer").unwrap().call(&[]), Ok(Value::from(42)));
}

#[test]
fn test_registries_do_not_share_resolutions() {
    let build = || Registry::builder("math").register("add", Function::native(add)).build();
    let left = build().resolve("add").unwrap();
    let right = build().resolve("add").unwrap();
    assert!(!left.ptr_eq(&right));
}

// =============================================================================
// Batch resolution
// =============================================================================

#[rstest]
fn test_resolve_many_single_name_is_one(registry: (Registry, Arc<AtomicUsize>)) {
    let (registry, _) = registry;
    let resolved = registry.resolve_many(&["add"]).unwrap();
    let expected = registry.resolve("add").unwrap();

    assert_eq!(resolved, Resolved::One(expected.clone()));
    assert_eq!(resolved.into_one(), Some(expected));
}

#[rstest]
fn test_resolve_many_preserves_request_order(registry: (Registry, Arc<AtomicUsize>)) {
    let (registry, _) = registry;
    let functions = registry
        .resolve_many(&["sum", "add", "sum"])
        .unwrap()
        .into_vec();

    assert_eq!(functions.len(), 3);
    assert!(functions[0].ptr_eq(&registry.resolve("sum").unwrap()));
    assert!(functions[1].ptr_eq(&registry.resolve("add").unwrap()));
    assert!(functions[0].ptr_eq(&functions[2]));
}

#[rstest]
fn test_resolve_many_empty_request(registry: (Registry, Arc<AtomicUsize>)) {
    let (registry, _) = registry;
    let resolved = registry.resolve_many(&[]).unwrap();
    assert_eq!(resolved.clone().into_one(), None);
    assert!(resolved.into_vec().is_empty());
}

#[rstest]
fn test_resolve_many_fails_on_first_unknown_name(registry: (Registry, Arc<AtomicUsize>)) {
    let (registry, _) = registry;
    assert_eq!(
        registry.resolve_many(&["add", "missing", "also_missing"]),
        Err(Error::FunctionNotFound {
            name: "missing".to_string(),
            registry: "math".to_string(),
        })
    );
}

// =============================================================================
// Concurrency
// =============================================================================

#[rstest]
fn test_concurrent_first_resolution_agrees(registry: (Registry, Arc<AtomicUsize>)) {
    let (registry, executions) = registry;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                let square = registry.resolve("square").unwrap();
                assert_eq!(square.call(&ints(&[12])), Ok(Value::from(144)));
                square
            })
        })
        .collect();

    let resolved: Vec<Function> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert!(resolved.windows(2).all(|pair| pair[0].ptr_eq(&pair[1])));
    assert_eq!(executions.load(Ordering::SeqCst), 1);
}
