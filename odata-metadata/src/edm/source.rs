//! Navigation sources (entity sets, singletons, containment)

use serde::Deserialize;
use serde::Serialize;

/// The kind of navigation source a resource was reached through.
///
/// Decides which id computation applies to the resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationSourceKind {
    /// A top-level entity set.
    #[default]
    EntitySet,
    /// A container-level singleton.
    Singleton,
    /// A set reached only through a containment navigation property.
    Contained,
    /// A source that could not be resolved.
    Unknown,
}

/// A named navigation source and the entity type it declares.
///
/// For contained sources the name is the containment navigation property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSource {
    /// The source name (entity set, singleton or containment property).
    pub name: String,
    /// The kind of source.
    pub kind: NavigationSourceKind,
    /// Qualified name of the declared entity type.
    pub entity_type: String,
}

impl NavigationSource {
    /// Creates an entity set.
    pub fn entity_set(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self::new(name, NavigationSourceKind::EntitySet, entity_type)
    }

    /// Creates a singleton.
    pub fn singleton(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self::new(name, NavigationSourceKind::Singleton, entity_type)
    }

    /// Creates a contained source.
    pub fn contained(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self::new(name, NavigationSourceKind::Contained, entity_type)
    }

    /// Creates a navigation source of any kind.
    pub fn new(
        name: impl Into<String>,
        kind: NavigationSourceKind,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            entity_type: entity_type.into(),
        }
    }
}
