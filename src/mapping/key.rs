//! Routing keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// A value that can key an [`EndpointRegistry`](super::EndpointRegistry).
///
/// The `Display` form is what appears in conflict errors and trace output.
pub trait RoutingKey: Eq + Hash + Clone + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Whether the key is empty and must be rejected at registration.
    fn is_blank(&self) -> bool {
        false
    }
}

impl RoutingKey for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl RoutingKey for &'static str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl RoutingKey for u16 {}
impl RoutingKey for u32 {}
impl RoutingKey for u64 {}

/// Namespace-qualified element name, e.g. the root element of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    pub namespace: String,
    pub local_part: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, local_part: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local_part: local_part.into(),
        }
    }

    /// A name without a namespace
    pub fn local(local_part: impl Into<String>) -> Self {
        Self::new(String::new(), local_part)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local_part)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local_part)
        }
    }
}

impl RoutingKey for QualifiedName {
    fn is_blank(&self) -> bool {
        self.local_part.trim().is_empty()
    }
}
