//! # Naming Convention Extractor
//!
//! Treats every method whose name starts with a prefix (default `handle`) as
//! a handler. The rest of the name, in snake_case, is the key:
//!
//! | Method | Key |
//! |--------|-----|
//! | `handlePing` | `ping` |
//! | `handle_ping` | `ping` |
//! | `handleGetOrder` | `get_order` |
//! | `handler` | *(not a handler)* |
//!
//! The message key is the `operation` header, normalized the same way.

use crate::config::NamingConfig;
use crate::constants::DEFAULT_HANDLER_PREFIX;
use crate::error::{MappingError, MappingResult};
use crate::mapping::extractor::KeyExtractor;
use crate::mapping::message::InboundMessage;
use crate::mapping::method::MethodDescriptor;

#[derive(Debug, Clone)]
pub struct NamingConventionKeyExtractor {
    prefix: String,
}

impl Default for NamingConventionKeyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingConventionKeyExtractor {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_HANDLER_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &NamingConfig) -> Self {
        Self::with_prefix(config.handler_prefix.clone())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl KeyExtractor for NamingConventionKeyExtractor {
    type Key = String;
    type Message = InboundMessage;

    fn key_from_message(&self, message: &InboundMessage) -> MappingResult<Option<String>> {
        match message.operation() {
            None => Ok(None),
            Some(operation) if operation.trim().is_empty() => Err(
                MappingError::malformed_message("operation header is present but blank"),
            ),
            Some(operation) => Ok(Some(to_snake_case(operation.trim()))),
        }
    }

    fn key_for_method(&self, method: &MethodDescriptor) -> Option<String> {
        let rest = method.name().strip_prefix(self.prefix.as_str())?;
        let rest = match rest.strip_prefix('_') {
            Some(stripped) => stripped,
            // `handler`, `handled`: the prefix is part of a longer word
            None if rest.starts_with(|c: char| c.is_uppercase()) => rest,
            None => return None,
        };
        if rest.is_empty() {
            return None;
        }
        Some(to_snake_case(rest))
    }

    fn strategy_name(&self) -> &str {
        "NamingConventionKeyExtractor"
    }
}

/// `PingPong` -> `ping_pong`, `GetURL` -> `get_url`, `already_snake` unchanged
pub(crate) fn to_snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) => {
                    p.is_lowercase()
                        || p.is_ascii_digit()
                        || (p.is_uppercase() && next.is_some_and(char::is_lowercase))
                }
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
