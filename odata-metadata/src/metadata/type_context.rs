//! Resource type context

use super::ResourceSerializationInfo;
use crate::edm::EdmModel;
use crate::edm::NavigationSourceKind;
use crate::uri::UrlConvention;

/// What is known about where a resource lives before looking at its data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTypeContext {
    /// The entity set, singleton or containment property name.
    pub navigation_source_name: Option<String>,
    /// The entity type declared by the navigation source.
    pub navigation_source_entity_type_name: Option<String>,
    /// The kind of navigation source.
    pub navigation_source_kind: NavigationSourceKind,
    /// The expected type, if narrower than the navigation source type.
    pub expected_type_name: Option<String>,
    /// Whether the resource is a media link entry.
    pub is_media_link_entry: bool,
    /// Whether the resource is a member of a collection.
    pub is_from_collection: bool,
    /// The service URL convention.
    pub url_convention: UrlConvention,
}

impl ResourceTypeContext {
    /// Builds a context from a serialization descriptor.
    ///
    /// Descriptors carry no stream information, so the resource is never
    /// treated as a media link entry.
    pub fn from_serialization_info(info: &ResourceSerializationInfo, url_convention: UrlConvention) -> Self {
        Self {
            navigation_source_name: info.navigation_source_name.clone(),
            navigation_source_entity_type_name: info.navigation_source_entity_type_name.clone(),
            navigation_source_kind: info.navigation_source_kind,
            expected_type_name: info.expected_type_name.clone(),
            is_media_link_entry: false,
            is_from_collection: info.is_from_collection,
            url_convention,
        }
    }

    /// Builds a context by looking the navigation source up in `model`.
    ///
    /// A source that is missing or cannot be found has the `Unknown` kind.
    pub fn from_model(
        model: &dyn EdmModel,
        navigation_source: Option<&str>,
        expected_type_name: Option<&str>,
        is_from_collection: bool,
        url_convention: UrlConvention,
    ) -> Self {
        let source = navigation_source.and_then(|name| model.find_navigation_source(name));
        let (kind, source_type) = match source {
            Some(source) => (source.kind, Some(source.entity_type.clone())),
            None => (NavigationSourceKind::Unknown, None),
        };

        let expected = expected_type_name.map(str::to_string);
        let is_media_link_entry = expected
            .as_deref()
            .or(source_type.as_deref())
            .and_then(|name| model.find_entity_type(name))
            .is_some_and(|ty| model.type_hierarchy(ty).iter().any(|t| t.has_stream));

        Self {
            navigation_source_name: navigation_source.map(str::to_string),
            navigation_source_entity_type_name: source_type,
            navigation_source_kind: kind,
            expected_type_name: expected,
            is_media_link_entry,
            is_from_collection,
            url_convention,
        }
    }

    /// Returns the expected type, falling back to the navigation source type.
    pub fn expected_resource_type_name(&self) -> Option<&str> {
        self.expected_type_name
            .as_deref()
            .or(self.navigation_source_entity_type_name.as_deref())
    }
}
