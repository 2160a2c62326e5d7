//! # Method Scanner
//!
//! Walks the method table of an endpoint type, asks the [`KeyExtractor`] for
//! a key per method and registers every method that yields one.
//!
//! ## Scan Flow
//!
//! ```text
//! Arc<dyn Endpoint> ──► ProxyResolver ──┐
//!                                       ├──► TypeDescriptor ──► eligible methods
//! component name ──► ComponentResolver ─┘        (sorted, universal methods removed)
//!                                                        │
//!                                       key_for_method ──┤── None ──► skipped
//!                                                        │
//!                                                        └── Some(key) ──► register
//! ```
//!
//! The first registry error stops the scan and is returned; methods after it
//! are not registered, and nothing before it is rolled back.

use super::binder::{Binder, ComponentResolver};
use super::descriptor::HandlerDescriptor;
use super::endpoint::Endpoint;
use super::extractor::KeyExtractor;
use super::method::{MethodDescriptor, MethodOrigin, TypeDescriptor};
use super::proxy::{DefaultProxyResolver, ProxyResolver};
use super::registry::EndpointRegistry;
use crate::constants::is_universal_method;
use crate::error::{MappingError, MappingResult};
use crate::logging;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Methods of `target_type` that may become endpoints, in scan order.
///
/// Universal-base methods are removed. The order is by name then parameter
/// list, independent of declaration order.
pub fn eligible_methods(target_type: &TypeDescriptor) -> Vec<&MethodDescriptor> {
    let mut methods: Vec<&MethodDescriptor> = target_type
        .methods()
        .iter()
        .filter(|m| m.origin() == MethodOrigin::Declared && !is_universal_method(m.name()))
        .collect();
    methods.sort_by(|a, b| {
        a.name()
            .cmp(b.name())
            .then_with(|| a.parameters().cmp(b.parameters()))
    });
    methods
}

/// Registers the routable methods of endpoint types into a registry
pub struct MethodScanner<E: KeyExtractor> {
    extractor: Arc<E>,
    registry: Arc<EndpointRegistry<E::Key>>,
    proxy_resolver: Arc<dyn ProxyResolver>,
    component_resolver: Option<Arc<dyn ComponentResolver>>,
}

impl<E: KeyExtractor> fmt::Debug for MethodScanner<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodScanner")
            .field("extractor", &self.extractor.strategy_name())
            .field("registry", &self.registry)
            .field("has_component_resolver", &self.component_resolver.is_some())
            .finish()
    }
}

impl<E: KeyExtractor> MethodScanner<E> {
    pub fn new(extractor: Arc<E>, registry: Arc<EndpointRegistry<E::Key>>) -> Self {
        Self {
            extractor,
            registry,
            proxy_resolver: Arc::new(DefaultProxyResolver::new()),
            component_resolver: None,
        }
    }

    #[must_use]
    pub fn with_proxy_resolver(mut self, proxy_resolver: Arc<dyn ProxyResolver>) -> Self {
        self.proxy_resolver = proxy_resolver;
        self
    }

    #[must_use]
    pub fn with_component_resolver(mut self, resolver: Arc<dyn ComponentResolver>) -> Self {
        self.component_resolver = Some(resolver);
        self
    }

    pub fn registry(&self) -> &Arc<EndpointRegistry<E::Key>> {
        &self.registry
    }

    /// Register every routable method of `target_type`, bound to `binder`.
    ///
    /// Returns the number of methods registered. The binder is cloned into
    /// each descriptor and never resolved here.
    pub fn scan(&self, target_type: &TypeDescriptor, binder: &Binder) -> MappingResult<usize> {
        let mut registered = 0;

        for method in eligible_methods(target_type) {
            let Some(key) = self.extractor.key_for_method(method) else {
                trace!(
                    endpoint_type = target_type.type_name(),
                    method = %method,
                    "Method is not a routable handler"
                );
                continue;
            };

            let descriptor =
                HandlerDescriptor::new(binder.clone(), target_type.type_name(), method.clone());
            if let Err(error) = self.registry.register(key, descriptor) {
                warn!(
                    endpoint_type = target_type.type_name(),
                    method = %method,
                    registered_before_failure = registered,
                    error = %error,
                    "Aborting endpoint scan"
                );
                return Err(error);
            }
            registered += 1;
        }

        info!(
            endpoint_type = target_type.type_name(),
            strategy = self.extractor.strategy_name(),
            bound_by_name = !binder.is_instance(),
            registered = registered,
            "Scanned endpoint type"
        );
        Ok(registered)
    }

    /// Resolve the concrete type of a live endpoint and scan it.
    pub fn scan_instance(&self, endpoint: Arc<dyn Endpoint>) -> MappingResult<usize> {
        let target_type = self.proxy_resolver.resolve(endpoint.as_ref())?;
        self.scan(&target_type, &Binder::Instance(endpoint))
    }

    /// Scan the component registered under `name`, binding handlers by name.
    ///
    /// Only the component's type is looked up; the instance is created when a
    /// handler is first invoked.
    pub fn scan_named(&self, name: &str) -> MappingResult<usize> {
        if name.trim().is_empty() {
            return Err(MappingError::invalid_argument(
                "Component name must not be empty",
            ));
        }
        let resolver = self.component_resolver.as_ref().ok_or_else(|| {
            MappingError::Configuration(format!(
                "Cannot scan component '{name}': no component resolver configured"
            ))
        })?;

        let target_type = resolver.type_of(name)?;
        debug!(
            component = name,
            endpoint_type = target_type.type_name(),
            "Scanning named component"
        );
        self.scan(&target_type, &Binder::named(name, Arc::clone(resolver)))
    }

    /// Scan several endpoints in order, stopping at the first failure.
    pub fn scan_all<I>(&self, endpoints: I) -> MappingResult<usize>
    where
        I: IntoIterator<Item = Arc<dyn Endpoint>>,
    {
        let strategy = self.extractor.strategy_name();
        let mut total = 0;
        for endpoint in endpoints {
            match self.scan_instance(endpoint) {
                Ok(registered) => total += registered,
                Err(error) => {
                    let context = format!("{total} endpoints registered before failure");
                    logging::log_error("method_scanner", "scan_all", &error, Some(&context));
                    return Err(error);
                }
            }
        }

        let details = format!("{total} endpoints registered");
        logging::log_registry_operation(
            "scan_all",
            Some(strategy),
            None,
            "completed",
            Some(&details),
        );
        Ok(total)
    }
}
