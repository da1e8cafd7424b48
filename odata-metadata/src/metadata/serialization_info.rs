//! Out-of-band serialization descriptor

use serde::Deserialize;
use serde::Serialize;

use crate::edm::NavigationSourceKind;

/// Describes a resource when no model is available.
///
/// When a descriptor is supplied, key and ETag properties are taken from
/// the [`PropertyKind`](crate::model::PropertyKind) tags on the resource's
/// properties and nothing is discovered from a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSerializationInfo {
    /// The entity set, singleton or containment property name.
    pub navigation_source_name: Option<String>,
    /// The kind of navigation source.
    #[serde(default)]
    pub navigation_source_kind: NavigationSourceKind,
    /// The entity type declared by the navigation source.
    pub navigation_source_entity_type_name: Option<String>,
    /// The type the payload is expected to have, if narrower.
    pub expected_type_name: Option<String>,
    /// Whether the resource was read from or written to a collection.
    #[serde(default)]
    pub is_from_collection: bool,
}

impl ResourceSerializationInfo {
    /// Creates a descriptor for a resource of `entity_type` in `navigation_source`.
    pub fn new(
        navigation_source: impl Into<String>,
        kind: NavigationSourceKind,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            navigation_source_name: Some(navigation_source.into()),
            navigation_source_kind: kind,
            navigation_source_entity_type_name: Some(entity_type.into()),
            ..Self::default()
        }
    }

    /// Sets the expected type name.
    pub fn with_expected_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.expected_type_name = Some(type_name.into());
        self
    }

    /// Marks the resource as a member of a collection.
    pub fn from_collection(mut self) -> Self {
        self.is_from_collection = true;
        self
    }
}
