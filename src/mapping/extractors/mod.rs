//! # Built-in Key Extractors
//!
//! ```text
//! extractors/
//! ├── PayloadRootKeyExtractor       (QualifiedName from payload root element)
//! ├── ActionKeyExtractor            (String from the action header)
//! └── NamingConventionKeyExtractor  (String from a method-name prefix)
//! ```

pub mod action;
pub mod naming;
pub mod payload_root;

pub use action::ActionKeyExtractor;
pub use naming::NamingConventionKeyExtractor;
pub use payload_root::PayloadRootKeyExtractor;
