//! Handler descriptors: a binder plus the method to invoke on it.

use super::binder::{Binder, ComponentResolver};
use super::endpoint::Endpoint;
use super::method::MethodDescriptor;
use crate::error::MappingResult;
use std::fmt;
use std::sync::Arc;

/// Immutable binding of a target to one of its methods.
///
/// A descriptor bound to an instance and one bound to a component name are
/// different descriptors even when they name the same method on the same type.
/// Invocation happens outside this crate; the descriptor only carries what the
/// invoker needs.
#[derive(Clone)]
pub struct HandlerDescriptor {
    binder: Binder,
    /// Type name captured at construction, used for display
    type_name: String,
    method: MethodDescriptor,
}

impl HandlerDescriptor {
    pub fn new(binder: Binder, type_name: impl Into<String>, method: MethodDescriptor) -> Self {
        Self {
            binder,
            type_name: type_name.into(),
            method,
        }
    }

    /// Bind a method of a live endpoint.
    pub fn for_instance(endpoint: Arc<dyn Endpoint>, method: MethodDescriptor) -> Self {
        let type_name = endpoint.type_descriptor().type_name().to_string();
        Self::new(Binder::Instance(endpoint), type_name, method)
    }

    /// Bind a method of a component resolved by name at invocation time.
    pub fn for_component(
        name: impl Into<String>,
        resolver: Arc<dyn ComponentResolver>,
        type_name: impl Into<String>,
        method: MethodDescriptor,
    ) -> Self {
        Self::new(Binder::named(name, resolver), type_name, method)
    }

    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    pub fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_instance_bound(&self) -> bool {
        self.binder.is_instance()
    }

    /// Component name when bound by name
    pub fn bean_name(&self) -> Option<&str> {
        self.binder.name()
    }

    /// Resolve the target for invocation.
    pub fn target(&self) -> MappingResult<Arc<dyn Endpoint>> {
        self.binder.resolve()
    }
}

impl fmt::Display for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.binder {
            Binder::Instance(_) => write!(f, "{}#{}", self.type_name, self.method),
            Binder::Named { name, .. } => write!(f, "bean:'{}'#{}", name, self.method),
        }
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("binder", &self.binder)
            .field("type_name", &self.type_name)
            .field("method", &self.method.signature())
            .finish()
    }
}
