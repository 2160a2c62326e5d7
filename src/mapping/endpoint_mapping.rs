//! # Endpoint Mapping
//!
//! Message to endpoint facade. One [`EndpointMapping`] pairs a fixed
//! [`KeyExtractor`] with a registry and the scanner that fills it.
//!
//! ## Request Flow
//!
//! ```text
//! message ──► key_from_message ──┬── Err(MalformedMessage) ──► error
//!                                ├── Ok(None) ─────────────► default endpoint
//!                                └── Ok(Some(key)) ──► lookup ──┬── hit ──► descriptor
//!                                                               └── miss ─► default endpoint
//! ```
//!
//! The extractor is moved into the mapping when it is built and cannot be
//! replaced afterwards, so every registered key and every looked-up key come
//! from the same strategy.
//!
//! ## Example
//!
//! ```rust
//! use endpoint_mapping::mapping::{EndpointMapping, InboundMessage};
//! use endpoint_mapping::mapping::extractors::NamingConventionKeyExtractor;
//! # use endpoint_mapping::mapping::{Endpoint, MethodDescriptor, TypeDescriptor};
//! # use std::{any::Any, sync::Arc};
//! # #[derive(Debug)]
//! # struct PingEndpoint;
//! # impl Endpoint for PingEndpoint {
//! #     fn type_descriptor(&self) -> Arc<TypeDescriptor> {
//! #         Arc::new(TypeDescriptor::builder("PingEndpoint")
//! #             .method(MethodDescriptor::new("handlePing"))
//! #             .build())
//! #     }
//! #     fn as_any(&self) -> &dyn Any { self }
//! # }
//!
//! let mapping = EndpointMapping::builder(NamingConventionKeyExtractor::new()).build();
//! mapping.scan_instance(Arc::new(PingEndpoint)).unwrap();
//!
//! let message = InboundMessage::new().with_operation("Ping");
//! let endpoint = mapping.endpoint_for(&message).unwrap().unwrap();
//! assert_eq!(endpoint.method().name(), "handlePing");
//! ```

use super::binder::ComponentResolver;
use super::descriptor::HandlerDescriptor;
use super::endpoint::Endpoint;
use super::events::{MappingEventSink, TracingEventSink};
use super::extractor::KeyExtractor;
use super::proxy::{DefaultProxyResolver, ProxyResolver};
use super::registry::EndpointRegistry;
use super::scanner::MethodScanner;
use crate::config::RegistryConfig;
use crate::error::MappingResult;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Order given to mappings that don't set one; sorts last in a chain
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// Resolves inbound messages to registered handler descriptors
pub struct EndpointMapping<E: KeyExtractor> {
    name: String,
    order: i32,
    extractor: Arc<E>,
    registry: Arc<EndpointRegistry<E::Key>>,
    scanner: MethodScanner<E>,
    default_endpoint: Option<Arc<HandlerDescriptor>>,
}

impl<E: KeyExtractor> fmt::Debug for EndpointMapping<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointMapping")
            .field("name", &self.name)
            .field("order", &self.order)
            .field("extractor", &self.extractor)
            .field("registry", &self.registry)
            .field("default_endpoint", &self.default_endpoint.as_ref().map(|d| d.to_string()))
            .finish()
    }
}

impl<E: KeyExtractor> EndpointMapping<E> {
    pub fn builder(extractor: E) -> EndpointMappingBuilder<E> {
        EndpointMappingBuilder::new(extractor)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn registry(&self) -> &Arc<EndpointRegistry<E::Key>> {
        &self.registry
    }

    pub fn default_endpoint(&self) -> Option<&Arc<HandlerDescriptor>> {
        self.default_endpoint.as_ref()
    }

    /// Resolve the handler for `message`.
    ///
    /// Falls back to the default endpoint when the message carries no key or
    /// the key is not mapped. A malformed message is returned as an error.
    pub fn endpoint_for(
        &self,
        message: &E::Message,
    ) -> MappingResult<Option<Arc<HandlerDescriptor>>> {
        let Some(key) = self.extractor.key_from_message(message)? else {
            debug!(mapping = %self.name, "No routing key in message");
            return Ok(self.default_endpoint.clone());
        };

        match self.registry.lookup(&key) {
            Some(descriptor) => Ok(Some(descriptor)),
            None => {
                debug!(
                    mapping = %self.name,
                    key = %key,
                    has_default = self.default_endpoint.is_some(),
                    "No endpoint mapped for key"
                );
                Ok(self.default_endpoint.clone())
            }
        }
    }

    pub fn register(
        &self,
        key: E::Key,
        descriptor: HandlerDescriptor,
    ) -> MappingResult<Arc<HandlerDescriptor>> {
        self.registry.register(key, descriptor)
    }

    pub fn lookup(&self, key: &E::Key) -> Option<Arc<HandlerDescriptor>> {
        self.registry.lookup(key)
    }

    pub fn scan_instance(&self, endpoint: Arc<dyn Endpoint>) -> MappingResult<usize> {
        self.scanner.scan_instance(endpoint)
    }

    pub fn scan_named(&self, name: &str) -> MappingResult<usize> {
        self.scanner.scan_named(name)
    }

    pub fn scan_all<I>(&self, endpoints: I) -> MappingResult<usize>
    where
        I: IntoIterator<Item = Arc<dyn Endpoint>>,
    {
        self.scanner.scan_all(endpoints)
    }
}

/// Builder for [`EndpointMapping`]
pub struct EndpointMappingBuilder<E: KeyExtractor> {
    extractor: E,
    name: Option<String>,
    order: i32,
    registry: Option<Arc<EndpointRegistry<E::Key>>>,
    registry_config: Option<RegistryConfig>,
    event_sink: Option<Arc<dyn MappingEventSink>>,
    proxy_resolver: Option<Arc<dyn ProxyResolver>>,
    component_resolver: Option<Arc<dyn ComponentResolver>>,
    default_endpoint: Option<HandlerDescriptor>,
}

impl<E: KeyExtractor> EndpointMappingBuilder<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            name: None,
            order: LOWEST_PRECEDENCE,
            registry: None,
            registry_config: None,
            event_sink: None,
            proxy_resolver: None,
            component_resolver: None,
            default_endpoint: None,
        }
    }

    /// Name used in logs and chain statistics. Defaults to the extractor's
    /// strategy name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Position in a [`MappingChain`](super::chain::MappingChain); lower runs first
    #[must_use]
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Share an existing registry instead of creating one.
    /// Takes precedence over `registry_config` and `event_sink`.
    #[must_use]
    pub fn registry(mut self, registry: Arc<EndpointRegistry<E::Key>>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Create the registry from configuration. Registration events go to
    /// `event_sink`, or to a [`TracingEventSink`] when none is given, as
    /// long as `trace_registrations` is on.
    #[must_use]
    pub fn registry_config(mut self, config: RegistryConfig) -> Self {
        self.registry_config = Some(config);
        self
    }

    #[must_use]
    pub fn event_sink(mut self, sink: Arc<dyn MappingEventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    #[must_use]
    pub fn proxy_resolver(mut self, resolver: Arc<dyn ProxyResolver>) -> Self {
        self.proxy_resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn component_resolver(mut self, resolver: Arc<dyn ComponentResolver>) -> Self {
        self.component_resolver = Some(resolver);
        self
    }

    /// Handler returned when a message has no key or its key is unmapped
    #[must_use]
    pub fn default_endpoint(mut self, descriptor: HandlerDescriptor) -> Self {
        self.default_endpoint = Some(descriptor);
        self
    }

    pub fn build(self) -> EndpointMapping<E> {
        let registry = match (self.registry, self.registry_config) {
            (Some(registry), _) => registry,
            (None, Some(config)) => {
                let sink = self
                    .event_sink
                    .unwrap_or_else(|| Arc::new(TracingEventSink) as Arc<dyn MappingEventSink>);
                Arc::new(EndpointRegistry::from_config(&config, Some(sink)))
            }
            (None, None) => {
                let registry = EndpointRegistry::new();
                Arc::new(match self.event_sink {
                    Some(sink) => registry.with_event_sink(sink),
                    None => registry,
                })
            }
        };

        let extractor = Arc::new(self.extractor);
        let proxy_resolver = self
            .proxy_resolver
            .unwrap_or_else(|| Arc::new(DefaultProxyResolver::new()));
        let mut scanner = MethodScanner::new(Arc::clone(&extractor), Arc::clone(&registry))
            .with_proxy_resolver(proxy_resolver);
        if let Some(resolver) = self.component_resolver {
            scanner = scanner.with_component_resolver(resolver);
        }

        let name = self
            .name
            .unwrap_or_else(|| extractor.strategy_name().to_string());
        debug!(mapping = %name, order = self.order, "Built endpoint mapping");

        EndpointMapping {
            name,
            order: self.order,
            extractor,
            registry,
            scanner,
            default_endpoint: self.default_endpoint.map(Arc::new),
        }
    }
}
