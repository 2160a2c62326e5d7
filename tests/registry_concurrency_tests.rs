//! Registry behavior under concurrent registration and lookup.

mod common;

use common::*;
use endpoint_mapping::mapping::{EndpointRegistry, HandlerDescriptor, MethodDescriptor};
use endpoint_mapping::MappingError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

fn descriptor(method: &str) -> HandlerDescriptor {
    HandlerDescriptor::for_instance(Arc::new(EchoEndpoint), MethodDescriptor::new(method))
}

#[test]
fn test_same_key_race_has_one_winner() {
    const THREADS: usize = 32;
    let registry: Arc<EndpointRegistry<String>> = Arc::new(EndpointRegistry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry
                    .register("echo".to_string(), descriptor(&format!("echo_{i}")))
                    .map(|d| d.method().name().to_string())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, MappingError::Conflict { .. })));

    let stored = registry.lookup("echo").unwrap();
    assert_eq!(stored.method().name(), winners[0].as_str());
    assert_eq!(registry.stats().conflicts_rejected, (THREADS - 1) as u64);
}

#[test]
fn test_distinct_keys_do_not_interfere() {
    let registry: Arc<EndpointRegistry<String>> = Arc::new(EndpointRegistry::new());

    thread::scope(|scope| {
        for worker in 0..8 {
            let registry = &registry;
            scope.spawn(move || {
                for n in 0..50 {
                    let key = format!("w{worker}_k{n}");
                    registry.register(key.clone(), descriptor(&key)).unwrap();
                }
            });
        }
    });

    assert_eq!(registry.len(), 400);
    for key in registry.keys() {
        assert_eq!(registry.lookup(key.as_str()).unwrap().method().name(), key);
    }
}

#[test]
fn test_readers_never_observe_partial_state() {
    let registry: Arc<EndpointRegistry<String>> = Arc::new(EndpointRegistry::new());
    registry
        .register("stable".to_string(), descriptor("stable"))
        .unwrap();
    let done = Arc::new(AtomicBool::new(false));
    let observed = Arc::new(AtomicUsize::new(0));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let done = Arc::clone(&done);
            let observed = Arc::clone(&observed);
            thread::spawn(move || {
                while !done.load(Ordering::Acquire) {
                    assert_eq!(
                        registry.lookup("stable").unwrap().method().name(),
                        "stable"
                    );
                    for n in 0..100 {
                        let key = format!("late_{n}");
                        if let Some(found) = registry.lookup(key.as_str()) {
                            assert_eq!(found.method().name(), key);
                            observed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })
        })
        .collect();

    for n in 0..100 {
        let key = format!("late_{n}");
        registry.register(key.clone(), descriptor(&key)).unwrap();
    }
    done.store(true, Ordering::Release);
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(registry.len(), 101);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_lookups_from_async_tasks() {
    let mapping = Arc::new(naming_mapping());
    mapping.scan_instance(Arc::new(PingEndpoint)).unwrap();
    mapping.scan_instance(Arc::new(EchoEndpoint)).unwrap();

    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let mapping = Arc::clone(&mapping);
            tokio::spawn(async move {
                let operation = if i % 2 == 0 { "Ping" } else { "Echo" };
                let message = endpoint_mapping::InboundMessage::new().with_operation(operation);
                mapping
                    .endpoint_for(&message)
                    .unwrap()
                    .map(|d| d.type_name().to_string())
            })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        let expected = if i % 2 == 0 { "PingEndpoint" } else { "EchoEndpoint" };
        assert_eq!(task.await.unwrap().as_deref(), Some(expected));
    }
    assert_eq!(mapping.registry().stats().lookups, 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_registration_races_on_blocking_pool() {
    let registry: Arc<EndpointRegistry<String>> = Arc::new(EndpointRegistry::new());

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let registry = Arc::clone(&registry);
            tokio::task::spawn_blocking(move || {
                registry
                    .register(format!("key_{}", i % 4), descriptor(&format!("m{i}")))
                    .is_ok()
            })
        })
        .collect();

    let mut successes = 0;
    for task in tasks {
        if task.await.unwrap() {
            successes += 1;
        }
    }

    assert_eq!(successes, 4);
    assert_eq!(registry.len(), 4);
}
