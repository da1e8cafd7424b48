//! Request path segments

use crate::model::Value;

/// One segment of a parsed request path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// `/People`
    EntitySet { name: String, entity_type: String },
    /// `/Me`
    Singleton { name: String, entity_type: String },
    /// `/Trips`
    NavigationProperty {
        name: String,
        target_type: String,
        is_collection: bool,
    },
    /// `/NS.Employee`
    TypeCast { type_name: String },
    /// `(1)` or `(A=1,B='x')`
    Key {
        keys: Vec<(String, Value)>,
        entity_type: String,
    },
}

impl PathSegment {
    /// Returns the entity type the segment yields.
    pub fn resource_type(&self) -> &str {
        match self {
            Self::EntitySet { entity_type, .. }
            | Self::Singleton { entity_type, .. }
            | Self::Key { entity_type, .. } => entity_type,
            Self::NavigationProperty { target_type, .. } => target_type,
            Self::TypeCast { type_name } => type_name,
        }
    }
}

/// An ordered request path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ODataPath {
    segments: Vec<PathSegment>,
}

impl ODataPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment.
    pub fn push(mut self, segment: PathSegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Appends an entity set segment.
    pub fn entity_set(self, name: &str, entity_type: &str) -> Self {
        self.push(PathSegment::EntitySet {
            name: name.to_string(),
            entity_type: entity_type.to_string(),
        })
    }

    /// Appends a singleton segment.
    pub fn singleton(self, name: &str, entity_type: &str) -> Self {
        self.push(PathSegment::Singleton {
            name: name.to_string(),
            entity_type: entity_type.to_string(),
        })
    }

    /// Appends a navigation property segment.
    pub fn navigation(self, name: &str, target_type: &str, is_collection: bool) -> Self {
        self.push(PathSegment::NavigationProperty {
            name: name.to_string(),
            target_type: target_type.to_string(),
            is_collection,
        })
    }

    /// Appends a type cast segment.
    pub fn type_cast(self, type_name: &str) -> Self {
        self.push(PathSegment::TypeCast {
            type_name: type_name.to_string(),
        })
    }

    /// Appends a key segment for the type yielded so far.
    pub fn key(self, keys: Vec<(String, Value)>) -> Self {
        let entity_type = self
            .segments
            .last()
            .map(|s| s.resource_type().to_string())
            .unwrap_or_default();
        self.push(PathSegment::Key { keys, entity_type })
    }

    /// Returns the segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Returns the prefix of `segments` that addresses the entity containing
/// the last navigation property.
///
/// Type casts right before the navigation property are dropped when the
/// type in front of the cast already declares the property.
/// `declares_navigation(type_name, property)` answers that question.
///
/// Returns `None` when the path has no navigation property segment.
pub fn containing_segments<F>(segments: &[PathSegment], declares_navigation: F) -> Option<&[PathSegment]>
where
    F: Fn(&str, &str) -> bool,
{
    let nav_index = segments
        .iter()
        .rposition(|s| matches!(s, PathSegment::NavigationProperty { .. }))?;
    let PathSegment::NavigationProperty { name, .. } = &segments[nav_index] else {
        return None;
    };

    let mut end = nav_index;
    while end >= 2 && matches!(segments[end - 1], PathSegment::TypeCast { .. }) {
        if !declares_navigation(segments[end - 2].resource_type(), name) {
            break;
        }
        log::trace!("dropping type cast in front of navigation property {name}");
        end -= 1;
    }

    Some(&segments[..end])
}
