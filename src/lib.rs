#![allow(clippy::doc_markdown)] // Allow technical terms like DashMap, snake_case in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Endpoint Mapping
//!
//! A keyed dispatch registry: inbound messages are routed to handler methods
//! by a routing key, with pluggable key extraction and conflict detection at
//! registration time.
//!
//! ## Overview
//!
//! Handler types describe their methods in an explicit table
//! ([`TypeDescriptor`]). At startup a [`MethodScanner`] walks those tables and
//! asks a [`KeyExtractor`] which methods are handlers and under which key.
//! Every key may be mapped once; a second mapping for the same key fails
//! loudly instead of silently replacing the first. At request time the same
//! extractor derives a key from the message and the [`EndpointRegistry`]
//! returns the handler, safely under concurrent traffic.
//!
//! ## Module Organization
//!
//! - [`mapping`] - Registry, scanner, extractors, proxies and mapping chain
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - `tracing` subscriber setup and log helpers
//! - [`constants`] - Marker names and the universal method set
//!
//! ## Quick Start
//!
//! ```rust
//! use endpoint_mapping::mapping::extractors::ActionKeyExtractor;
//! use endpoint_mapping::mapping::{
//!     Endpoint, EndpointMapping, InboundMessage, Marker, MethodDescriptor, TypeDescriptor,
//! };
//! use std::{any::Any, sync::Arc};
//!
//! #[derive(Debug)]
//! struct OrderEndpoint;
//!
//! impl Endpoint for OrderEndpoint {
//!     fn type_descriptor(&self) -> Arc<TypeDescriptor> {
//!         Arc::new(
//!             TypeDescriptor::builder("OrderEndpoint")
//!                 .method(
//!                     MethodDescriptor::new("place")
//!                         .param("PlaceOrder")
//!                         .marker(Marker::new("action").attr("value", "urn:orders:place")),
//!                 )
//!                 .build(),
//!         )
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! # fn main() -> endpoint_mapping::MappingResult<()> {
//! let mapping = EndpointMapping::builder(ActionKeyExtractor::new()).build();
//! mapping.scan_instance(Arc::new(OrderEndpoint))?;
//!
//! let message = InboundMessage::new().with_action("urn:orders:place");
//! let handler = mapping.endpoint_for(&message)?.expect("mapped");
//! assert_eq!(handler.to_string(), "OrderEndpoint#place(PlaceOrder)");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod mapping;

pub use config::{LoggingConfig, MappingConfig, NamingConfig, RegistryConfig};
pub use error::{MappingError, MappingResult};
pub use mapping::{
    Binder, ComponentRegistry, ComponentResolver, Endpoint, EndpointMapping, EndpointRegistry,
    HandlerDescriptor, InboundMessage, KeyExtractor, MappingChain, MethodDescriptor,
    MethodScanner, ProxyKind, ProxyResolver, QualifiedName, RoutingKey, TypeDescriptor,
};
