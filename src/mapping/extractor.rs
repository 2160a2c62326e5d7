//! # Key Extraction Strategy
//!
//! [`KeyExtractor`] is the single point of variation: every dispatch style
//! (payload root, action header, naming convention, ...) is a different
//! implementation, while the registry and scanner stay the same.
//!
//! ## The Two Operations
//!
//! | Operation | Used at | Absent result means |
//! |-----------|---------|---------------------|
//! | `key_from_message` | request time | no route derivable, try another mapping |
//! | `key_for_method` | scan time | method is not a routable handler |
//!
//! `key_from_message` may also fail with `MalformedMessage` when the message
//! lacks structure the strategy requires. That is a bad request, never a
//! not-found.
//!
//! ## Example: Custom Extractor
//!
//! ```rust
//! use endpoint_mapping::error::MappingResult;
//! use endpoint_mapping::mapping::{InboundMessage, KeyExtractor, MethodDescriptor};
//!
//! #[derive(Debug)]
//! struct TopicExtractor;
//!
//! impl KeyExtractor for TopicExtractor {
//!     type Key = String;
//!     type Message = InboundMessage;
//!
//!     fn key_from_message(&self, message: &InboundMessage) -> MappingResult<Option<String>> {
//!         Ok(message.header("topic").map(str::to_string))
//!     }
//!
//!     fn key_for_method(&self, method: &MethodDescriptor) -> Option<String> {
//!         method.name().strip_prefix("on_").map(str::to_string)
//!     }
//! }
//!
//! let extractor = TopicExtractor;
//! let billing = MethodDescriptor::new("on_billing");
//! assert_eq!(extractor.key_for_method(&billing), Some("billing".to_string()));
//! assert_eq!(extractor.key_for_method(&MethodDescriptor::new("helper")), None);
//! ```

use super::key::RoutingKey;
use super::method::MethodDescriptor;
use crate::error::MappingResult;
use std::fmt;

/// Pluggable, stateless routing-key strategy.
pub trait KeyExtractor: Send + Sync + fmt::Debug {
    type Key: RoutingKey;
    type Message: ?Sized;

    /// Derive the lookup key for an inbound message.
    fn key_from_message(&self, message: &Self::Message) -> MappingResult<Option<Self::Key>>;

    /// Derive the registration key for a handler method. The default treats
    /// no method as routable.
    fn key_for_method(&self, _method: &MethodDescriptor) -> Option<Self::Key> {
        None
    }

    /// Name used in logs and chain statistics
    fn strategy_name(&self) -> &str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("KeyExtractor")
    }
}
