//! # Payload Root Extractor
//!
//! Routes on the qualified name of the message payload's root element.
//!
//! Methods opt in with a `payload_root` marker:
//!
//! ```rust
//! use endpoint_mapping::mapping::{KeyExtractor, Marker, MethodDescriptor, QualifiedName};
//! use endpoint_mapping::mapping::extractors::PayloadRootKeyExtractor;
//!
//! let extractor = PayloadRootKeyExtractor::new();
//! let method = MethodDescriptor::new("place_order").marker(
//!     Marker::new("payload_root")
//!         .attr("namespace", "http://example.com/orders")
//!         .attr("local_part", "OrderRequest"),
//! );
//!
//! assert_eq!(
//!     extractor.key_for_method(&method),
//!     Some(QualifiedName::new("http://example.com/orders", "OrderRequest"))
//! );
//! ```

use crate::constants::markers;
use crate::error::{MappingError, MappingResult};
use crate::mapping::extractor::KeyExtractor;
use crate::mapping::key::QualifiedName;
use crate::mapping::message::InboundMessage;
use crate::mapping::method::MethodDescriptor;
use tracing::warn;

/// Maps payload root element names onto marked methods
#[derive(Debug, Clone, Default)]
pub struct PayloadRootKeyExtractor {
    /// Namespace used when a marker omits one
    default_namespace: String,
}

impl PayloadRootKeyExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_namespace(namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: namespace.into(),
        }
    }
}

impl KeyExtractor for PayloadRootKeyExtractor {
    type Key = QualifiedName;
    type Message = InboundMessage;

    fn key_from_message(&self, message: &InboundMessage) -> MappingResult<Option<QualifiedName>> {
        match &message.payload_root {
            None => Ok(None),
            Some(root) if root.local_part.trim().is_empty() => Err(
                MappingError::malformed_message("payload root element has no local name"),
            ),
            Some(root) => Ok(Some(root.clone())),
        }
    }

    fn key_for_method(&self, method: &MethodDescriptor) -> Option<QualifiedName> {
        let marker = method.find_marker(markers::PAYLOAD_ROOT)?;
        let local_part = match marker.attribute(markers::ATTR_LOCAL_PART) {
            Some(local_part) if !local_part.trim().is_empty() => local_part,
            _ => {
                warn!(
                    method = %method,
                    "payload_root marker without local_part; method not mapped"
                );
                return None;
            }
        };
        let namespace = marker
            .attribute(markers::ATTR_NAMESPACE)
            .unwrap_or(self.default_namespace.as_str());

        Some(QualifiedName::new(namespace, local_part))
    }

    fn strategy_name(&self) -> &str {
        "PayloadRootKeyExtractor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::method::Marker;

    #[test]
    fn test_message_key_from_payload_root() {
        let extractor = PayloadRootKeyExtractor::new();
        let message = InboundMessage::new()
            .with_payload_root(QualifiedName::new("urn:orders", "OrderRequest"));

        assert_eq!(
            extractor.key_from_message(&message).unwrap(),
            Some(QualifiedName::new("urn:orders", "OrderRequest"))
        );
    }

    #[test]
    fn test_message_without_payload_has_no_route() {
        let extractor = PayloadRootKeyExtractor::new();
        assert_eq!(extractor.key_from_message(&InboundMessage::new()).unwrap(), None);
    }

    #[test]
    fn test_blank_root_name_is_malformed() {
        let extractor = PayloadRootKeyExtractor::new();
        let message = InboundMessage::new().with_payload_root(QualifiedName::new("urn:x", " "));

        assert!(matches!(
            extractor.key_from_message(&message),
            Err(MappingError::MalformedMessage { .. })
        ));
    }

    #[test]
    fn test_default_namespace_applies_to_markers_without_one() {
        let extractor = PayloadRootKeyExtractor::with_default_namespace("urn:default");
        let method = MethodDescriptor::new("ping")
            .marker(Marker::new("payload_root").attr("local_part", "PingRequest"));

        assert_eq!(
            extractor.key_for_method(&method),
            Some(QualifiedName::new("urn:default", "PingRequest"))
        );
    }

    #[test]
    fn test_unmarked_or_incomplete_methods_are_skipped() {
        let extractor = PayloadRootKeyExtractor::new();

        assert_eq!(extractor.key_for_method(&MethodDescriptor::new("helper")), None);
        let incomplete = MethodDescriptor::new("broken")
            .marker(Marker::new("payload_root").attr("namespace", "urn:x"));
        assert_eq!(extractor.key_for_method(&incomplete), None);
    }
}
