//! Endpoint objects and the proxy wrappers that may hide them.

use super::method::TypeDescriptor;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// How an endpoint instance is wrapped by an interception layer.
#[derive(Debug, Clone)]
pub enum ProxyKind {
    /// Not proxied; the endpoint's own type descriptor is authoritative
    None,
    /// A proxy that keeps the concrete method table visible
    TargetPreserving(Arc<TypeDescriptor>),
    /// A proxy exposing only the listed interfaces; the concrete method table
    /// cannot be recovered
    InterfaceOnly { interfaces: Vec<String> },
}

impl ProxyKind {
    pub fn is_proxy(&self) -> bool {
        !matches!(self, ProxyKind::None)
    }
}

/// A live handler object.
///
/// Implementors publish their method table through [`Endpoint::type_descriptor`].
/// Invocation is performed outside this crate; `as_any` lets the invoker
/// recover the concrete type.
pub trait Endpoint: Send + Sync + fmt::Debug {
    /// The method table visible on this instance. For a proxy this is the
    /// proxy's own surface.
    fn type_descriptor(&self) -> Arc<TypeDescriptor>;

    fn proxy_kind(&self) -> ProxyKind {
        ProxyKind::None
    }

    fn as_any(&self) -> &dyn Any;
}
