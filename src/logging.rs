//! # Structured Logging Module
//!
//! Environment-aware `tracing` setup plus helpers for registry-level log
//! lines. Library code only emits events; installing a subscriber is left to
//! the embedding application, which can call [`init_structured_logging`].

use crate::config::LoggingConfig;
use crate::constants::ENVIRONMENT_VARIABLES;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize logging for the detected environment with pretty console output
pub fn init_structured_logging() {
    let environment = get_environment();
    let config = LoggingConfig {
        level: get_log_level(&environment).to_string(),
        ..LoggingConfig::default()
    };
    init_with_config(&config);
}

/// Initialize logging from configuration. Only the first call has any
/// effect; `RUST_LOG` takes precedence over `config.level`.
pub fn init_with_config(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

        let layer = if config.is_json() {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        // Another subscriber may already be installed by the host application
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized, keeping it");
        }

        tracing::info!(
            environment = %environment,
            level = %config.level,
            json = config.is_json(),
            "STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Current environment, from the first non-blank variable in
/// [`ENVIRONMENT_VARIABLES`], defaulting to `development`
pub fn get_environment() -> String {
    environment_from(|name| std::env::var(name).ok())
}

fn environment_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    ENVIRONMENT_VARIABLES
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| "development".to_string())
}

/// Default filter level for an environment
pub fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "test" | "development" => "debug",
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for registry operations (scan passes, bulk loads)
pub fn log_registry_operation(
    operation: &str,
    mapping: Option<&str>,
    key: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        mapping = mapping,
        key = key,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "REGISTRY_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(
    component: &str,
    operation: &str,
    error: &dyn std::error::Error,
    context: Option<&str>,
) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MappingError;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_environment_detection_order() {
        assert_eq!(environment_from(lookup_in(&[])), "development");
        assert_eq!(
            environment_from(lookup_in(&[("APP_ENV", "production")])),
            "production"
        );
        assert_eq!(
            environment_from(lookup_in(&[
                ("ENDPOINT_MAPPING_ENV", "test"),
                ("APP_ENV", "production"),
            ])),
            "test"
        );
    }

    #[test]
    fn test_blank_variable_falls_through_to_next() {
        let lookup = lookup_in(&[("ENDPOINT_MAPPING_ENV", ""), ("APP_ENV", "production")]);
        assert_eq!(environment_from(lookup), "production");

        let lookup = lookup_in(&[("ENDPOINT_MAPPING_ENV", "  "), ("APP_ENV", "")]);
        assert_eq!(environment_from(lookup), "development");
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(get_log_level("test"), "debug");
        assert_eq!(get_log_level("development"), "debug");
        assert_eq!(get_log_level("production"), "info");
        assert_eq!(get_log_level("unknown"), "debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_with_config(&LoggingConfig::default());
        init_with_config(&LoggingConfig {
            format: "json".to_string(),
            ..LoggingConfig::default()
        });
        init_structured_logging();

        log_registry_operation("scan", Some("actions"), None, "ok", Some("3 endpoints"));
        log_error(
            "registry",
            "register",
            &MappingError::invalid_argument("blank key"),
            None,
        );
    }
}
