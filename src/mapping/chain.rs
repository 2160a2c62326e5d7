//! # Mapping Chain
//!
//! Priority-ordered list of endpoint mappings sharing one message type.
//!
//! Mappings are tried by `order()`, lowest first; mappings with equal order
//! keep the order they were added in. The first mapping that returns a
//! handler wins. A malformed message stops the chain immediately.
//!
//! ```rust
//! use endpoint_mapping::mapping::{EndpointMapping, InboundMessage, MappingChain};
//! use endpoint_mapping::mapping::extractors::{ActionKeyExtractor, NamingConventionKeyExtractor};
//! use std::sync::Arc;
//!
//! let chain = MappingChain::<InboundMessage>::new()
//!     .with_mapping(Arc::new(
//!         EndpointMapping::builder(NamingConventionKeyExtractor::new()).order(20).build(),
//!     ))
//!     .with_mapping(Arc::new(
//!         EndpointMapping::builder(ActionKeyExtractor::new()).order(10).build(),
//!     ));
//!
//! assert_eq!(chain.stats().names, vec!["ActionKeyExtractor", "NamingConventionKeyExtractor"]);
//! assert!(chain.resolve(&InboundMessage::new()).unwrap().is_none());
//! ```

use super::descriptor::HandlerDescriptor;
use super::endpoint_mapping::EndpointMapping;
use super::extractor::KeyExtractor;
use super::message::InboundMessage;
use crate::error::MappingResult;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// Anything that can map a message of type `M` to a handler
pub trait MessageEndpointLookup<M: ?Sized>: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Lower values are consulted first
    fn order(&self) -> i32;

    fn resolve(&self, message: &M) -> MappingResult<Option<Arc<HandlerDescriptor>>>;
}

impl<E: KeyExtractor> MessageEndpointLookup<E::Message> for EndpointMapping<E> {
    fn name(&self) -> &str {
        EndpointMapping::name(self)
    }

    fn order(&self) -> i32 {
        EndpointMapping::order(self)
    }

    fn resolve(&self, message: &E::Message) -> MappingResult<Option<Arc<HandlerDescriptor>>> {
        self.endpoint_for(message)
    }
}

/// Ordered set of mappings consulted in turn
pub struct MappingChain<M: ?Sized + 'static = InboundMessage> {
    mappings: Vec<Arc<dyn MessageEndpointLookup<M>>>,
}

impl<M: ?Sized + 'static> Default for MappingChain<M> {
    fn default() -> Self {
        Self {
            mappings: Vec::new(),
        }
    }
}

impl<M: ?Sized + 'static> fmt::Debug for MappingChain<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingChain")
            .field("mappings", &self.mappings)
            .finish()
    }
}

impl<M: ?Sized + 'static> MappingChain<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mapping(mut self, mapping: Arc<dyn MessageEndpointLookup<M>>) -> Self {
        self.add_mapping(mapping);
        self
    }

    pub fn add_mapping(&mut self, mapping: Arc<dyn MessageEndpointLookup<M>>) {
        self.mappings.push(mapping);
        // stable: equal orders keep insertion order
        self.mappings.sort_by_key(|m| m.order());
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn mapping_names(&self) -> Vec<&str> {
        self.mappings.iter().map(|m| m.name()).collect()
    }

    /// First handler any mapping returns for `message`, in order.
    #[instrument(skip_all, fields(mappings = self.mappings.len()))]
    pub fn resolve(&self, message: &M) -> MappingResult<Option<Arc<HandlerDescriptor>>> {
        for mapping in &self.mappings {
            if let Some(descriptor) = mapping.resolve(message)? {
                debug!(
                    mapping = mapping.name(),
                    endpoint = %descriptor,
                    "Resolved endpoint"
                );
                return Ok(Some(descriptor));
            }
            trace!(mapping = mapping.name(), "No endpoint, trying next mapping");
        }

        debug!("No mapping resolved an endpoint");
        Ok(None)
    }

    pub fn stats(&self) -> MappingChainStats {
        MappingChainStats {
            mapping_count: self.mappings.len(),
            names: self.mappings.iter().map(|m| m.name().to_string()).collect(),
            orders: self.mappings.iter().map(|m| m.order()).collect(),
        }
    }
}

/// Statistics about a mapping chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingChainStats {
    pub mapping_count: usize,

    /// Names in resolution order
    pub names: Vec<String>,

    pub orders: Vec<i32>,
}
