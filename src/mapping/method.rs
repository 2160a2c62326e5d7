//! # Method Tables
//!
//! Declarative descriptions of an endpoint type's public method surface.
//!
//! Rust has no runtime reflection, so every endpoint type publishes a
//! [`TypeDescriptor`]: its name plus the list of methods it exposes, each with
//! a parameter shape and any declarative [`Marker`]s. The scanner walks this
//! table exactly as it would walk a reflected method set.
//!
//! ```rust
//! use endpoint_mapping::mapping::{Marker, MethodDescriptor, TypeDescriptor};
//!
//! let descriptor = TypeDescriptor::builder("OrderEndpoint")
//!     .method(
//!         MethodDescriptor::new("place_order")
//!             .param("OrderRequest")
//!             .returns("OrderResponse")
//!             .marker(Marker::new("action").attr("value", "urn:orders:place")),
//!     )
//!     .with_universal_methods()
//!     .build();
//!
//! assert_eq!(descriptor.methods().len(), 5);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A declarative annotation attached to a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Where a method in the table comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodOrigin {
    /// Declared by the endpoint type itself
    Declared,
    /// Inherited from a universal base trait (equality, formatting, ...)
    Universal,
}

/// Name, parameter shape and markers of a single method.
///
/// Identity is the name plus the parameter signature; the return type and
/// markers are metadata for key extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    name: String,
    parameters: Vec<String>,
    return_type: Option<String>,
    markers: Vec<Marker>,
    origin: MethodOrigin,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            markers: Vec::new(),
            origin: MethodOrigin::Declared,
        }
    }

    /// A method inherited from a universal base trait
    pub fn universal(name: impl Into<String>) -> Self {
        Self {
            origin: MethodOrigin::Universal,
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn param(mut self, type_name: impl Into<String>) -> Self {
        self.parameters.push(type_name.into());
        self
    }

    #[must_use]
    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn origin(&self) -> MethodOrigin {
        self.origin
    }

    /// First marker with the given name
    pub fn find_marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }

    pub fn has_marker(&self, name: &str) -> bool {
        self.find_marker(name).is_some()
    }

    /// `name(ParamA, ParamB)`
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.parameters.join(", "))
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameters.join(", "))
    }
}

/// The method table of a concrete endpoint type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    type_name: String,
    methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    pub fn builder(type_name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            descriptor: TypeDescriptor {
                type_name: type_name.into(),
                methods: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Methods in declaration order
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Builder for [`TypeDescriptor`].
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    descriptor: TypeDescriptor,
}

impl TypeDescriptorBuilder {
    #[must_use]
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.descriptor.methods.push(method);
        self
    }

    /// Append the methods every type picks up from `Clone`, `PartialEq`,
    /// `Debug` and `Hash`.
    #[must_use]
    pub fn with_universal_methods(mut self) -> Self {
        let type_name = self.descriptor.type_name.clone();
        self.descriptor.methods.extend([
            MethodDescriptor::universal("clone").returns(type_name.clone()),
            MethodDescriptor::universal("eq")
                .param(type_name.clone())
                .returns("bool"),
            MethodDescriptor::universal("fmt").param("Formatter"),
            MethodDescriptor::universal("hash").param("Hasher"),
        ]);
        self
    }

    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}
