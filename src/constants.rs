//! # Mapping Constants
//!
//! Marker names, attribute names and the universal method set shared by the
//! scanner and the built-in key extractors.

/// Method names contributed by universal base traits rather than by the
/// handler itself. These are never eligible as endpoints.
pub const UNIVERSAL_METHOD_NAMES: &[&str] = &[
    "clone",
    "clone_from",
    "eq",
    "ne",
    "fmt",
    "hash",
    "to_string",
    "type_id",
    "drop",
    "default",
];

/// Default method-name prefix recognised by the naming-convention extractor
pub const DEFAULT_HANDLER_PREFIX: &str = "handle";

/// Declarative marker names understood by the built-in extractors
pub mod markers {
    /// Method marker carrying `local_part` and optional `namespace`
    pub const PAYLOAD_ROOT: &str = "payload_root";
    /// Method marker carrying `value`
    pub const ACTION: &str = "action";

    pub const ATTR_LOCAL_PART: &str = "local_part";
    pub const ATTR_NAMESPACE: &str = "namespace";
    pub const ATTR_VALUE: &str = "value";
}

/// Well-known message header names
pub mod headers {
    pub const ACTION: &str = "action";
    pub const OPERATION: &str = "operation";
}

/// Environment variables consulted for environment detection, in order
pub const ENVIRONMENT_VARIABLES: &[&str] = &["ENDPOINT_MAPPING_ENV", "APP_ENV"];

/// Prefix for configuration overrides taken from the environment
pub const CONFIG_ENV_PREFIX: &str = "ENDPOINT_MAPPING";

/// Returns true if `name` belongs to a universal base trait
pub fn is_universal_method(name: &str) -> bool {
    UNIVERSAL_METHOD_NAMES.contains(&name)
}
