//! Resource properties

use super::Value;

/// How a property participates in entity identity when no model is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// An ordinary property.
    #[default]
    Unspecified,
    /// Part of the entity key.
    Key,
    /// Part of the entity ETag.
    ETag,
    /// A dynamic property of an open type.
    Open,
}

/// A named property value on a resource.
///
/// # Example
///
/// ```
/// use odata_metadata::model::{Property, PropertyKind};
///
/// let id = Property::new("Id", 1i32).key();
/// assert_eq!(id.kind, PropertyKind::Key);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The property name.
    pub name: String,
    /// The property value.
    pub value: Value,
    /// Serialization tag used when no model is available.
    pub kind: PropertyKind,
}

impl Property {
    /// Creates a new untagged property.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: PropertyKind::Unspecified,
        }
    }

    /// Tags the property as part of the key.
    pub fn key(mut self) -> Self {
        self.kind = PropertyKind::Key;
        self
    }

    /// Tags the property as part of the ETag.
    pub fn etag(mut self) -> Self {
        self.kind = PropertyKind::ETag;
        self
    }

    /// Sets the serialization tag.
    pub fn with_kind(mut self, kind: PropertyKind) -> Self {
        self.kind = kind;
        self
    }
}
