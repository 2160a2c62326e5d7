//! Routes on the message action header (`action` marker on methods).

use crate::constants::markers;
use crate::error::{MappingError, MappingResult};
use crate::mapping::extractor::KeyExtractor;
use crate::mapping::message::InboundMessage;
use crate::mapping::method::MethodDescriptor;

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionKeyExtractor;

impl ActionKeyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl KeyExtractor for ActionKeyExtractor {
    type Key = String;
    type Message = InboundMessage;

    fn key_from_message(&self, message: &InboundMessage) -> MappingResult<Option<String>> {
        match message.action() {
            None => Ok(None),
            Some(action) if action.trim().is_empty() => {
                Err(MappingError::malformed_message("action header is present but blank"))
            }
            Some(action) => Ok(Some(action.trim().to_string())),
        }
    }

    fn key_for_method(&self, method: &MethodDescriptor) -> Option<String> {
        method
            .find_marker(markers::ACTION)?
            .attribute(markers::ATTR_VALUE)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn strategy_name(&self) -> &str {
        "ActionKeyExtractor"
    }
}
