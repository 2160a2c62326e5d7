//! Error types for endpoint mapping.
//!

use thiserror::Error;

/// Errors raised while registering, scanning or resolving endpoints.
///
/// A missing mapping is not an error: lookups return `Option` and callers
/// decide how to answer a message nobody handles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A registration key is already mapped to another handler
    #[error(
        "Cannot map endpoint [{new_handler}] on registration key [{key}]: \
         there's already endpoint [{existing_handler}] mapped"
    )]
    Conflict {
        key: String,
        new_handler: String,
        existing_handler: String,
    },

    /// Malformed registration input
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The endpoint's concrete method table is hidden behind a proxy
    #[error("Unsupported proxy for endpoint [{endpoint}]: {restriction}. {remediation}")]
    UnsupportedProxy {
        endpoint: String,
        restriction: String,
        remediation: String,
    },

    /// The inbound message lacks the structure needed to derive a key
    #[error("Malformed message: {reason}")]
    MalformedMessage { reason: String },

    /// A named component could not be found by the component resolver
    #[error("Unknown component: '{name}'")]
    UnknownComponent { name: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl MappingError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        MappingError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn malformed_message(reason: impl Into<String>) -> Self {
        MappingError::MalformedMessage {
            reason: reason.into(),
        }
    }

    pub fn unknown_component(name: impl Into<String>) -> Self {
        MappingError::UnknownComponent { name: name.into() }
    }

    /// True for errors that indicate a startup misconfiguration rather than a
    /// bad inbound message.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MappingError::Conflict { .. }
                | MappingError::UnsupportedProxy { .. }
                | MappingError::Configuration(_)
        )
    }
}

impl From<config::ConfigError> for MappingError {
    fn from(error: config::ConfigError) -> Self {
        MappingError::Configuration(error.to_string())
    }
}

pub type MappingResult<T> = std::result::Result<T, MappingError>;
