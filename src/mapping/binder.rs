//! # Binders
//!
//! A [`Binder`] is the target half of a handler descriptor: either a live
//! endpoint instance, or a component name resolved through a
//! [`ComponentResolver`] when the handler is invoked.
//!
//! Named binders let a service register handlers for components that are not
//! instantiated yet at scan time. Nothing in the registry or scanner resolves
//! them; [`Binder::resolve`] is called by the invoker.

use super::endpoint::Endpoint;
use super::method::TypeDescriptor;
use super::proxy::{DefaultProxyResolver, ProxyResolver};
use crate::error::{MappingError, MappingResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Resolves component names to types (at scan time) and instances (at
/// invocation time).
pub trait ComponentResolver: Send + Sync + fmt::Debug {
    /// The live instance registered under `name`, creating it if needed.
    fn resolve(&self, name: &str) -> MappingResult<Arc<dyn Endpoint>>;

    /// The concrete type registered under `name`, without instantiating it.
    fn type_of(&self, name: &str) -> MappingResult<Arc<TypeDescriptor>>;
}

/// Target reference of a handler descriptor.
#[derive(Clone)]
pub enum Binder {
    Instance(Arc<dyn Endpoint>),
    Named {
        name: String,
        resolver: Arc<dyn ComponentResolver>,
    },
}

impl Binder {
    pub fn instance(endpoint: Arc<dyn Endpoint>) -> Self {
        Binder::Instance(endpoint)
    }

    pub fn named(name: impl Into<String>, resolver: Arc<dyn ComponentResolver>) -> Self {
        Binder::Named {
            name: name.into(),
            resolver,
        }
    }

    pub fn is_instance(&self) -> bool {
        matches!(self, Binder::Instance(_))
    }

    /// Component name for named binders
    pub fn name(&self) -> Option<&str> {
        match self {
            Binder::Instance(_) => None,
            Binder::Named { name, .. } => Some(name),
        }
    }

    /// Produce the live target. Named binders go through their resolver on
    /// every call.
    pub fn resolve(&self) -> MappingResult<Arc<dyn Endpoint>> {
        match self {
            Binder::Instance(endpoint) => Ok(Arc::clone(endpoint)),
            Binder::Named { name, resolver } => resolver.resolve(name),
        }
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binder::Instance(endpoint) => f
                .debug_tuple("Instance")
                .field(&endpoint.type_descriptor().type_name())
                .finish(),
            Binder::Named { name, .. } => f.debug_struct("Named").field("name", name).finish(),
        }
    }
}

/// Factory for lazily created components
pub type ComponentFactory = Box<dyn Fn() -> Arc<dyn Endpoint> + Send + Sync>;

enum ComponentEntry {
    Instance {
        endpoint: Arc<dyn Endpoint>,
        target_type: Arc<TypeDescriptor>,
    },
    Lazy {
        target_type: Arc<TypeDescriptor>,
        factory: ComponentFactory,
        instance: OnceLock<Arc<dyn Endpoint>>,
    },
}

impl ComponentEntry {
    fn target_type(&self) -> Arc<TypeDescriptor> {
        match self {
            ComponentEntry::Instance { target_type, .. }
            | ComponentEntry::Lazy { target_type, .. } => Arc::clone(target_type),
        }
    }
}

/// In-memory [`ComponentResolver`] holding named instances and lazy
/// factories. Lazy components are created once, on first resolution.
pub struct ComponentRegistry {
    components: RwLock<HashMap<String, Arc<ComponentEntry>>>,
    proxy_resolver: Arc<dyn ProxyResolver>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components = self.components.read();
        let mut names: Vec<_> = components.keys().collect();
        names.sort();
        f.debug_struct("ComponentRegistry")
            .field("components", &names)
            .finish()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::with_proxy_resolver(Arc::new(DefaultProxyResolver::new()))
    }

    pub fn with_proxy_resolver(proxy_resolver: Arc<dyn ProxyResolver>) -> Self {
        Self {
            components: RwLock::new(HashMap::new()),
            proxy_resolver,
        }
    }

    /// Register a live instance. Its concrete type is resolved now, so an
    /// unsupported proxy fails here rather than at scan time.
    pub fn register_instance(
        &self,
        name: impl Into<String>,
        endpoint: Arc<dyn Endpoint>,
    ) -> MappingResult<()> {
        let name = name.into();
        let target_type = self.proxy_resolver.resolve(endpoint.as_ref())?;
        self.insert(
            name,
            ComponentEntry::Instance {
                endpoint,
                target_type,
            },
        )
    }

    /// Register a component created on first resolution.
    pub fn register_factory<F>(
        &self,
        name: impl Into<String>,
        target_type: Arc<TypeDescriptor>,
        factory: F,
    ) -> MappingResult<()>
    where
        F: Fn() -> Arc<dyn Endpoint> + Send + Sync + 'static,
    {
        self.insert(
            name.into(),
            ComponentEntry::Lazy {
                target_type,
                factory: Box::new(factory),
                instance: OnceLock::new(),
            },
        )
    }

    fn insert(&self, name: String, entry: ComponentEntry) -> MappingResult<()> {
        if name.trim().is_empty() {
            return Err(MappingError::invalid_argument(
                "Component name must not be empty",
            ));
        }

        let mut components = self.components.write();
        if components.contains_key(&name) {
            return Err(MappingError::invalid_argument(format!(
                "Component '{name}' is already registered"
            )));
        }
        debug!(component = %name, "Registered component");
        components.insert(name, Arc::new(entry));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.read().contains_key(name)
    }

    /// Whether a lazy component has been created yet. Instances always are.
    pub fn is_instantiated(&self, name: &str) -> bool {
        match self.components.read().get(name).map(|e| e.as_ref()) {
            Some(ComponentEntry::Instance { .. }) => true,
            Some(ComponentEntry::Lazy { instance, .. }) => instance.get().is_some(),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.components.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.read().is_empty()
    }

    fn entry(&self, name: &str) -> MappingResult<Arc<ComponentEntry>> {
        self.components
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| MappingError::unknown_component(name))
    }
}

impl ComponentResolver for ComponentRegistry {
    fn resolve(&self, name: &str) -> MappingResult<Arc<dyn Endpoint>> {
        // Read lock is released before a factory runs.
        let entry = self.entry(name)?;
        match entry.as_ref() {
            ComponentEntry::Instance { endpoint, .. } => Ok(Arc::clone(endpoint)),
            ComponentEntry::Lazy {
                factory, instance, ..
            } => Ok(Arc::clone(instance.get_or_init(|| {
                debug!(component = %name, "Instantiating lazy component");
                factory()
            }))),
        }
    }

    fn type_of(&self, name: &str) -> MappingResult<Arc<TypeDescriptor>> {
        Ok(self.entry(name)?.target_type())
    }
}
