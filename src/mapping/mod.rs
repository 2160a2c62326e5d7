//! # Endpoint Mapping
//!
//! Keyed dispatch: routing keys derived from inbound messages are mapped onto
//! handler methods discovered from explicit method tables.
//!
//! ## Components
//!
//! - [`KeyExtractor`]: message to key and method to key, one strategy per mapping
//! - [`HandlerDescriptor`]: immutable binder plus method
//! - [`EndpointRegistry`]: key to descriptor, conflicts rejected at registration
//! - [`MethodScanner`]: walks a type's methods and registers the routable ones
//! - [`ProxyResolver`]: finds the concrete method table behind a proxy
//! - [`EndpointMapping`] and [`MappingChain`]: request-time resolution

pub mod binder;
pub mod chain;
pub mod descriptor;
pub mod endpoint;
pub mod endpoint_mapping;
pub mod events;
pub mod extractor;
pub mod extractors;
pub mod key;
pub mod message;
pub mod method;
pub mod proxy;
pub mod registry;
pub mod scanner;

pub use binder::{Binder, ComponentFactory, ComponentRegistry, ComponentResolver};
pub use chain::{MappingChain, MappingChainStats, MessageEndpointLookup};
pub use descriptor::HandlerDescriptor;
pub use endpoint::{Endpoint, ProxyKind};
pub use endpoint_mapping::{EndpointMapping, EndpointMappingBuilder, LOWEST_PRECEDENCE};
pub use events::{
    CollectingEventSink, MappingEvent, MappingEventKind, MappingEventSink, TracingEventSink,
};
pub use extractor::KeyExtractor;
pub use key::{QualifiedName, RoutingKey};
pub use message::InboundMessage;
pub use method::{Marker, MethodDescriptor, MethodOrigin, TypeDescriptor, TypeDescriptorBuilder};
pub use proxy::{DefaultProxyResolver, ProxyResolver};
pub use registry::{EndpointRegistry, RegistryStats};
pub use scanner::{eligible_methods, MethodScanner};
