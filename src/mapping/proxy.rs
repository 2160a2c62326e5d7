//! # Proxy Resolution
//!
//! Turns a possibly-proxied endpoint into the concrete [`TypeDescriptor`] the
//! scanner should enumerate.
//!
//! ```text
//! Arc<dyn Endpoint> ──► ProxyResolver::resolve ──► Arc<TypeDescriptor> ──► scan
//!                              │
//!                              └─ InterfaceOnly proxy ──► UnsupportedProxy
//! ```
//!
//! Interface-only proxies expose the proxied interfaces but not the
//! endpoint's own methods, so any routing markers on the implementation are
//! invisible. They are rejected at startup instead of silently registering
//! nothing.

use super::endpoint::{Endpoint, ProxyKind};
use super::method::TypeDescriptor;
use crate::error::{MappingError, MappingResult};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves the concrete type behind an endpoint instance.
pub trait ProxyResolver: Send + Sync + fmt::Debug {
    fn resolve(&self, endpoint: &dyn Endpoint) -> MappingResult<Arc<TypeDescriptor>>;
}

/// Unwraps target-preserving proxies and rejects interface-only ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProxyResolver;

impl DefaultProxyResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ProxyResolver for DefaultProxyResolver {
    fn resolve(&self, endpoint: &dyn Endpoint) -> MappingResult<Arc<TypeDescriptor>> {
        match endpoint.proxy_kind() {
            ProxyKind::None => Ok(endpoint.type_descriptor()),
            ProxyKind::TargetPreserving(target) => {
                debug!(
                    proxy = endpoint.type_descriptor().type_name(),
                    target = target.type_name(),
                    "Resolved proxied endpoint to target type"
                );
                Ok(target)
            }
            ProxyKind::InterfaceOnly { interfaces } => {
                let proxy_type = endpoint.type_descriptor();
                warn!(
                    proxy = proxy_type.type_name(),
                    interfaces = ?interfaces,
                    "Rejecting interface-only proxy"
                );
                Err(MappingError::UnsupportedProxy {
                    endpoint: proxy_type.type_name().to_string(),
                    restriction: format!(
                        "method endpoint mappings do not work with interface-only proxies \
                         (proxied interfaces: [{}]) because the concrete method table is hidden",
                        interfaces.join(", ")
                    ),
                    remediation: "Wrap the endpoint in a target-preserving proxy \
                                  (ProxyKind::TargetPreserving) so its declared methods \
                                  stay visible."
                        .to_string(),
                })
            }
        }
    }
}
