//! Inbound message view consumed by the built-in key extractors.

use super::key::QualifiedName;
use crate::constants::headers;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the transport layer already knows about an inbound message.
///
/// The registry never parses payloads; the transport fills in the payload
/// root name, action and headers it extracted while decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub payload_root: Option<QualifiedName>,
    pub headers: HashMap<String, String>,
}

impl InboundMessage {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_payload_root(mut self, root: QualifiedName) -> Self {
        self.payload_root = Some(root);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_action(self, action: impl Into<String>) -> Self {
        self.with_header(headers::ACTION, action)
    }

    #[must_use]
    pub fn with_operation(self, operation: impl Into<String>) -> Self {
        self.with_header(headers::OPERATION, operation)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn action(&self) -> Option<&str> {
        self.header(headers::ACTION)
    }

    pub fn operation(&self) -> Option<&str> {
        self.header(headers::OPERATION)
    }
}
