//! Endpoint fixtures shared by the integration tests.
#![allow(dead_code)]

use endpoint_mapping::mapping::extractors::{ActionKeyExtractor, NamingConventionKeyExtractor};
use endpoint_mapping::mapping::{
    Endpoint, EndpointMapping, Marker, MethodDescriptor, ProxyKind, TypeDescriptor,
};
use std::any::Any;
use std::sync::Arc;

/// One routable method (`handlePing`) next to two helpers
#[derive(Debug, Default)]
pub struct PingEndpoint;

impl PingEndpoint {
    pub fn descriptor() -> Arc<TypeDescriptor> {
        Arc::new(
            TypeDescriptor::builder("PingEndpoint")
                .method(
                    MethodDescriptor::new("handlePing")
                        .param("PingRequest")
                        .returns("PingResponse"),
                )
                .method(MethodDescriptor::new("validate").param("PingRequest"))
                .method(MethodDescriptor::new("metrics").returns("PingMetrics"))
                .with_universal_methods()
                .build(),
        )
    }
}

impl Endpoint for PingEndpoint {
    fn type_descriptor(&self) -> Arc<TypeDescriptor> {
        Self::descriptor()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Handles `echo` via `handleEcho`
#[derive(Debug, Default)]
pub struct EchoEndpoint;

impl Endpoint for EchoEndpoint {
    fn type_descriptor(&self) -> Arc<TypeDescriptor> {
        Arc::new(
            TypeDescriptor::builder("EchoEndpoint")
                .method(MethodDescriptor::new("handleEcho").param("EchoRequest"))
                .build(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Also claims `echo`, plus an unrelated `status` key
#[derive(Debug, Default)]
pub struct LegacyEchoEndpoint;

impl Endpoint for LegacyEchoEndpoint {
    fn type_descriptor(&self) -> Arc<TypeDescriptor> {
        Arc::new(
            TypeDescriptor::builder("LegacyEchoEndpoint")
                .method(MethodDescriptor::new("handle_echo").param("LegacyEchoRequest"))
                .method(MethodDescriptor::new("handleStatus"))
                .build(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Action-routed order endpoint
#[derive(Debug, Default)]
pub struct OrderEndpoint;

impl OrderEndpoint {
    pub fn descriptor() -> Arc<TypeDescriptor> {
        Arc::new(
            TypeDescriptor::builder("OrderEndpoint")
                .method(
                    MethodDescriptor::new("place")
                        .param("PlaceOrder")
                        .marker(Marker::new("action").attr("value", "urn:orders:place")),
                )
                .method(
                    MethodDescriptor::new("cancel")
                        .param("CancelOrder")
                        .marker(Marker::new("action").attr("value", "urn:orders:cancel")),
                )
                .method(MethodDescriptor::new("audit_log"))
                .build(),
        )
    }
}

impl Endpoint for OrderEndpoint {
    fn type_descriptor(&self) -> Arc<TypeDescriptor> {
        Self::descriptor()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Endpoint whose method table is supplied at construction
#[derive(Debug)]
pub struct GeneratedEndpoint {
    descriptor: Arc<TypeDescriptor>,
}

impl GeneratedEndpoint {
    pub fn new(type_name: &str, method_names: &[String]) -> Self {
        let builder = method_names
            .iter()
            .fold(TypeDescriptor::builder(type_name), |builder, name| {
                builder.method(MethodDescriptor::new(name.as_str()))
            });
        Self {
            descriptor: Arc::new(builder.with_universal_methods().build()),
        }
    }
}

impl Endpoint for GeneratedEndpoint {
    fn type_descriptor(&self) -> Arc<TypeDescriptor> {
        Arc::clone(&self.descriptor)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Interception wrapper that keeps the target's method table visible
#[derive(Debug)]
pub struct TransactionalProxy {
    target: Arc<TypeDescriptor>,
}

impl TransactionalProxy {
    pub fn wrapping(target: Arc<TypeDescriptor>) -> Self {
        Self { target }
    }
}

impl Endpoint for TransactionalProxy {
    fn type_descriptor(&self) -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor::builder("TransactionalProxy").build())
    }

    fn proxy_kind(&self) -> ProxyKind {
        ProxyKind::TargetPreserving(Arc::clone(&self.target))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Wrapper exposing only an interface
#[derive(Debug)]
pub struct InterfaceProxy;

impl Endpoint for InterfaceProxy {
    fn type_descriptor(&self) -> Arc<TypeDescriptor> {
        Arc::new(
            TypeDescriptor::builder("$Proxy12")
                .method(MethodDescriptor::new("ping"))
                .build(),
        )
    }

    fn proxy_kind(&self) -> ProxyKind {
        ProxyKind::InterfaceOnly {
            interfaces: vec!["PingService".to_string()],
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn naming_mapping() -> EndpointMapping<NamingConventionKeyExtractor> {
    EndpointMapping::builder(NamingConventionKeyExtractor::new()).build()
}

pub fn action_mapping() -> EndpointMapping<ActionKeyExtractor> {
    EndpointMapping::builder(ActionKeyExtractor::new()).build()
}
