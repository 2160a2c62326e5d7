//! # Configuration
//!
//! Layered settings for registries, the naming-convention extractor and
//! logging. Sources are merged in this order, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional file (`toml`, `yaml` or `json`, chosen by extension)
//! 3. environment variables such as `ENDPOINT_MAPPING_REGISTRY__TRACE_LOOKUPS=true`
//!
//! ```toml
//! [registry]
//! initial_capacity = 256
//! trace_registrations = true
//! trace_lookups = false
//!
//! [naming]
//! handler_prefix = "handle"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_HANDLER_PREFIX};
use crate::error::{MappingError, MappingResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub registry: RegistryConfig,
    pub naming: NamingConfig,
    pub logging: LoggingConfig,
}

/// Registry sizing and diagnostic event settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Capacity reserved up front; the registry still grows past it
    pub initial_capacity: usize,
    /// Attach the event sink for mapped/conflict events
    pub trace_registrations: bool,
    /// Also publish lookup hit/miss events (noisy)
    pub trace_lookups: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            trace_registrations: true,
            trace_lookups: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub handler_prefix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            handler_prefix: DEFAULT_HANDLER_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl MappingConfig {
    /// Load defaults, then `path` if given and present, then the process
    /// environment.
    pub fn load(path: Option<&Path>) -> MappingResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Defaults overlaid with the process environment only
    pub fn from_env() -> MappingResult<Self> {
        Self::load(None)
    }

    /// Like [`load`](Self::load), reading variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> MappingResult<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            debug!(path = %path.display(), "Adding configuration file source");
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(CONFIG_ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            initial_capacity = config.registry.initial_capacity,
            trace_registrations = config.registry.trace_registrations,
            trace_lookups = config.registry.trace_lookups,
            handler_prefix = %config.naming.handler_prefix,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> MappingResult<()> {
        if self.naming.handler_prefix.trim().is_empty() {
            return Err(MappingError::Configuration(
                "naming.handler_prefix must not be empty".to_string(),
            ));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(MappingError::Configuration(format!(
                "logging.level '{}' is not one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        let format = self.logging.format.to_ascii_lowercase();
        if !LOG_FORMATS.contains(&format.as_str()) {
            return Err(MappingError::Configuration(format!(
                "logging.format '{}' is not one of: {}",
                self.logging.format,
                LOG_FORMATS.join(", ")
            )));
        }

        Ok(())
    }
}
