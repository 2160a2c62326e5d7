//! # Endpoint Registry
//!
//! Thread-safe map from routing key to [`HandlerDescriptor`].
//!
//! ## Invariants
//!
//! - A key is mapped at most once. A second registration for the same key
//!   fails with [`MappingError::Conflict`] and leaves the existing mapping
//!   untouched, even when the new descriptor is identical.
//! - Blank keys and absent descriptors are rejected before any state changes.
//! - There is no removal; a successful mapping is returned by every later
//!   lookup for the life of the registry.
//!
//! ## Concurrency
//!
//! Backed by a sharded `DashMap`. Registration uses the entry API, so the
//! existence check and the insert happen under one shard lock and racing
//! registrations of the same key produce exactly one winner. Descriptors are
//! wrapped in `Arc` before insertion; readers clone the `Arc` and never see a
//! partially built value. Events are published after the shard lock is
//! released.
//!
//! ```rust
//! use endpoint_mapping::mapping::{EndpointRegistry, HandlerDescriptor};
//! # use endpoint_mapping::mapping::{Endpoint, MethodDescriptor, TypeDescriptor};
//! # use std::{any::Any, sync::Arc};
//! # #[derive(Debug)]
//! # struct EchoEndpoint;
//! # impl Endpoint for EchoEndpoint {
//! #     fn type_descriptor(&self) -> Arc<TypeDescriptor> {
//! #         Arc::new(TypeDescriptor::builder("EchoEndpoint").build())
//! #     }
//! #     fn as_any(&self) -> &dyn Any { self }
//! # }
//! let registry: EndpointRegistry<String> = EndpointRegistry::new();
//! let endpoint = Arc::new(EchoEndpoint);
//!
//! let first = HandlerDescriptor::for_instance(endpoint.clone(), MethodDescriptor::new("echo"));
//! let second = HandlerDescriptor::for_instance(endpoint, MethodDescriptor::new("echo_again"));
//!
//! registry.register("echo".to_string(), first).unwrap();
//! assert!(registry.register("echo".to_string(), second).is_err());
//! assert_eq!(registry.lookup("echo").unwrap().method().name(), "echo");
//! assert!(registry.lookup("missing").is_none());
//! ```

use super::descriptor::HandlerDescriptor;
use super::events::{MappingEvent, MappingEventKind, MappingEventSink};
use super::key::RoutingKey;
use crate::config::RegistryConfig;
use crate::error::{MappingError, MappingResult};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

#[derive(Debug, Default)]
struct RegistryCounters {
    instance_bound: AtomicU64,
    name_bound: AtomicU64,
    conflicts_rejected: AtomicU64,
    lookups: AtomicU64,
    lookup_misses: AtomicU64,
}

/// Registry statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total_mappings: usize,
    pub instance_bound: u64,
    pub name_bound: u64,
    pub conflicts_rejected: u64,
    pub lookups: u64,
    pub lookup_misses: u64,
}

/// Key to handler mapping with registration-time conflict detection
pub struct EndpointRegistry<K: RoutingKey> {
    endpoints: DashMap<K, Arc<HandlerDescriptor>>,
    event_sink: Option<Arc<dyn MappingEventSink>>,
    trace_lookups: bool,
    counters: RegistryCounters,
}

impl<K: RoutingKey> fmt::Debug for EndpointRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointRegistry")
            .field("mappings", &self.endpoints.len())
            .field("has_event_sink", &self.event_sink.is_some())
            .finish()
    }
}

impl<K: RoutingKey> Default for EndpointRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RoutingKey> EndpointRegistry<K> {
    /// Create an empty registry with no event sink
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            endpoints: DashMap::with_capacity(capacity),
            event_sink: None,
            trace_lookups: false,
            counters: RegistryCounters::default(),
        }
    }

    /// Create a registry sized and traced according to configuration. The
    /// sink is only attached when registration tracing is enabled.
    pub fn from_config(config: &RegistryConfig, sink: Option<Arc<dyn MappingEventSink>>) -> Self {
        let mut registry = Self::with_capacity(config.initial_capacity);
        if config.trace_registrations {
            registry.event_sink = sink;
        }
        registry.trace_lookups = config.trace_lookups;
        registry
    }

    /// Attach a diagnostic sink
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn MappingEventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Also publish lookup hit/miss events to the sink
    #[must_use]
    pub fn with_lookup_tracing(mut self, enabled: bool) -> Self {
        self.trace_lookups = enabled;
        self
    }

    pub fn has_event_sink(&self) -> bool {
        self.event_sink.is_some()
    }

    /// Map `key` onto `descriptor`.
    ///
    /// Returns the shared descriptor now stored under `key`.
    pub fn register(
        &self,
        key: K,
        descriptor: HandlerDescriptor,
    ) -> MappingResult<Arc<HandlerDescriptor>> {
        self.try_register(Some(key), Some(descriptor))
    }

    /// Registration entry point for callers holding optional inputs.
    ///
    /// Absent or blank keys fail with `InvalidArgument`. An already mapped key
    /// fails with `Conflict` before the descriptor is examined; an absent
    /// descriptor for an unmapped key fails with `InvalidArgument`.
    pub fn try_register(
        &self,
        key: Option<K>,
        descriptor: Option<HandlerDescriptor>,
    ) -> MappingResult<Arc<HandlerDescriptor>> {
        let key = match key {
            Some(key) if !key.is_blank() => key,
            Some(key) => {
                return Err(MappingError::invalid_argument(format!(
                    "Registration key [{key}] must not be blank"
                )))
            }
            None => {
                return Err(MappingError::invalid_argument(
                    "Registration key must not be absent",
                ))
            }
        };
        let descriptor = descriptor.map(Arc::new);

        let outcome = match self.endpoints.entry(key.clone()) {
            Entry::Occupied(existing) => Err(Arc::clone(existing.get())),
            Entry::Vacant(vacant) => match &descriptor {
                Some(descriptor) => {
                    vacant.insert(Arc::clone(descriptor));
                    Ok(Arc::clone(descriptor))
                }
                None => {
                    return Err(MappingError::invalid_argument(format!(
                        "Could not find endpoint for key [{key}]"
                    )))
                }
            },
        };

        match outcome {
            Ok(descriptor) => {
                if descriptor.is_instance_bound() {
                    self.counters.instance_bound.fetch_add(1, Ordering::Relaxed);
                } else {
                    self.counters.name_bound.fetch_add(1, Ordering::Relaxed);
                }
                debug!(key = %key, endpoint = %descriptor, "Mapped key onto endpoint");
                self.publish(|| {
                    MappingEvent::new(MappingEventKind::EndpointMapped, key.to_string())
                        .with_handler(descriptor.to_string())
                });
                Ok(descriptor)
            }
            Err(existing) => {
                self.counters
                    .conflicts_rejected
                    .fetch_add(1, Ordering::Relaxed);
                let new_handler = descriptor
                    .as_ref()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "<absent>".to_string());
                warn!(
                    key = %key,
                    endpoint = %new_handler,
                    existing = %existing,
                    "Rejected conflicting endpoint mapping"
                );
                self.publish(|| {
                    MappingEvent::new(MappingEventKind::MappingConflict, key.to_string())
                        .with_handler(new_handler.clone())
                        .with_existing_handler(existing.to_string())
                });
                Err(MappingError::Conflict {
                    key: key.to_string(),
                    new_handler,
                    existing_handler: existing.to_string(),
                })
            }
        }
    }

    /// The descriptor mapped under `key`, or `None`.
    pub fn lookup<Q>(&self, key: &Q) -> Option<Arc<HandlerDescriptor>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Display + ?Sized,
    {
        self.counters.lookups.fetch_add(1, Ordering::Relaxed);
        let found = self.endpoints.get(key).map(|entry| Arc::clone(entry.value()));

        match &found {
            Some(descriptor) => {
                trace!(key = %key, endpoint = %descriptor, "Endpoint lookup hit");
                if self.trace_lookups {
                    self.publish(|| {
                        MappingEvent::new(MappingEventKind::LookupHit, key.to_string())
                            .with_handler(descriptor.to_string())
                    });
                }
            }
            None => {
                self.counters.lookup_misses.fetch_add(1, Ordering::Relaxed);
                trace!(key = %key, "Endpoint lookup miss");
                if self.trace_lookups {
                    self.publish(|| {
                        MappingEvent::new(MappingEventKind::LookupMiss, key.to_string())
                    });
                }
            }
        }

        found
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.endpoints.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// All mapped keys, ordered by their display form
    pub fn keys(&self) -> Vec<K> {
        let mut keys: Vec<K> = self.endpoints.iter().map(|e| e.key().clone()).collect();
        keys.sort_by_cached_key(|k| k.to_string());
        keys
    }

    /// All mappings, ordered by key display form
    pub fn entries(&self) -> Vec<(K, Arc<HandlerDescriptor>)> {
        let mut entries: Vec<_> = self
            .endpoints
            .iter()
            .map(|e| (e.key().clone(), Arc::clone(e.value())))
            .collect();
        entries.sort_by_cached_key(|(k, _)| k.to_string());
        entries
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            total_mappings: self.endpoints.len(),
            instance_bound: self.counters.instance_bound.load(Ordering::Relaxed),
            name_bound: self.counters.name_bound.load(Ordering::Relaxed),
            conflicts_rejected: self.counters.conflicts_rejected.load(Ordering::Relaxed),
            lookups: self.counters.lookups.load(Ordering::Relaxed),
            lookup_misses: self.counters.lookup_misses.load(Ordering::Relaxed),
        }
    }

    fn publish(&self, event: impl FnOnce() -> MappingEvent) {
        if let Some(sink) = &self.event_sink {
            sink.publish(&event());
        }
    }
}
