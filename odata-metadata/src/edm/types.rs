//! Entity type descriptions

use serde::Deserialize;
use serde::Serialize;

/// Type name used for stream-valued structural properties.
pub const STREAM_TYPE_NAME: &str = "Edm.Stream";

/// Description of an entity type as declared in the model.
///
/// Inherited members are not copied into derived types; use the provided
/// methods on [`EdmModel`](super::EdmModel) to walk the hierarchy.
///
/// # Example
///
/// ```
/// use odata_metadata::edm::{EntityType, NavigationProperty, StructuralProperty};
///
/// let customer = EntityType::new("NS.Customer")
///     .with_key(&["Id"])
///     .with_property(StructuralProperty::new("Id", "Edm.Int32"))
///     .with_property(StructuralProperty::new("Name", "Edm.String"))
///     .with_navigation(NavigationProperty::collection("Orders", "NS.Order"));
///
/// assert_eq!(customer.namespace(), "NS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    /// The qualified name (e.g., "NS.Customer").
    pub name: String,

    /// The qualified name of the base type, if any.
    #[serde(default)]
    pub base_type: Option<String>,

    /// Whether the type is abstract.
    #[serde(default)]
    pub is_abstract: bool,

    /// Whether the type is open (accepts dynamic properties).
    #[serde(default)]
    pub is_open: bool,

    /// Whether instances are media link entries.
    #[serde(default)]
    pub has_stream: bool,

    /// Names of the declared key properties, in key order.
    #[serde(default)]
    pub key: Vec<String>,

    /// Declared structural properties.
    #[serde(default)]
    pub properties: Vec<StructuralProperty>,

    /// Declared navigation properties.
    #[serde(default)]
    pub navigation_properties: Vec<NavigationProperty>,
}

impl EntityType {
    /// Creates an empty entity type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: None,
            is_abstract: false,
            is_open: false,
            has_stream: false,
            key: Vec::new(),
            properties: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    /// Sets the base type.
    pub fn derived_from(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    /// Sets the key property names.
    pub fn with_key(mut self, key: &[&str]) -> Self {
        self.key = key.iter().map(|k| (*k).to_string()).collect();
        self
    }

    /// Adds a structural property.
    pub fn with_property(mut self, property: StructuralProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Adds a navigation property.
    pub fn with_navigation(mut self, navigation: NavigationProperty) -> Self {
        self.navigation_properties.push(navigation);
        self
    }

    /// Marks the type as a media link entry type.
    pub fn with_stream(mut self) -> Self {
        self.has_stream = true;
        self
    }

    /// Marks the type as open.
    pub fn open(mut self) -> Self {
        self.is_open = true;
        self
    }

    /// Marks the type as abstract.
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Returns the namespace part of the qualified name.
    pub fn namespace(&self) -> &str {
        match self.name.rfind('.') {
            Some(i) => &self.name[..i],
            None => "",
        }
    }

    /// Finds a declared (not inherited) structural property.
    pub fn declared_property(&self, name: &str) -> Option<&StructuralProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Finds a declared (not inherited) navigation property.
    pub fn declared_navigation(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigation_properties.iter().find(|p| p.name == name)
    }
}

/// Concurrency behaviour of a structural property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConcurrencyMode {
    /// Not part of the ETag.
    #[default]
    None,
    /// Part of the ETag.
    Fixed,
}

/// A structural (primitive, complex or stream) property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralProperty {
    /// Property name.
    pub name: String,

    /// Qualified type name (e.g., "Edm.String", "Edm.Stream", "NS.Address").
    #[serde(rename = "type")]
    pub type_name: String,

    /// Concurrency behaviour.
    #[serde(default)]
    pub concurrency_mode: ConcurrencyMode,
}

impl StructuralProperty {
    /// Creates a new structural property.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            concurrency_mode: ConcurrencyMode::None,
        }
    }

    /// Creates a stream property.
    pub fn stream(name: impl Into<String>) -> Self {
        Self::new(name, STREAM_TYPE_NAME)
    }

    /// Marks the property as part of the ETag.
    pub fn concurrency_token(mut self) -> Self {
        self.concurrency_mode = ConcurrencyMode::Fixed;
        self
    }

    /// Returns `true` if this is a stream property.
    pub fn is_stream(&self) -> bool {
        self.type_name == STREAM_TYPE_NAME
    }
}

/// A navigation property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationProperty {
    /// Property name.
    pub name: String,

    /// Qualified name of the target entity type.
    pub target_type: String,

    /// Whether the property is collection-valued.
    #[serde(default)]
    pub is_collection: bool,

    /// Whether the targets are contained in the declaring entity.
    #[serde(default)]
    pub contains_target: bool,
}

impl NavigationProperty {
    /// Creates a single-valued navigation property.
    pub fn single(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_type: target_type.into(),
            is_collection: false,
            contains_target: false,
        }
    }

    /// Creates a collection-valued navigation property.
    pub fn collection(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            is_collection: true,
            ..Self::single(name, target_type)
        }
    }

    /// Marks the property as a containment navigation property.
    pub fn contained(mut self) -> Self {
        self.contains_target = true;
        self
    }
}

/// A property found on an entity type, structural or navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyRef<'a> {
    /// A structural property.
    Structural(&'a StructuralProperty),
    /// A navigation property.
    Navigation(&'a NavigationProperty),
}

impl PropertyRef<'_> {
    /// Returns the property name.
    pub fn name(&self) -> &str {
        match self {
            Self::Structural(p) => &p.name,
            Self::Navigation(p) => &p.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_entity_type() {
        let json = r#"{
            "name": "NS.Order",
            "key": ["Id"],
            "properties": [
                {"name": "Id", "type": "Edm.Int32"},
                {"name": "Version", "type": "Edm.Int64", "concurrencyMode": "fixed"},
                {"name": "Receipt", "type": "Edm.Stream"}
            ],
            "navigationProperties": [
                {"name": "Lines", "targetType": "NS.Line", "isCollection": true, "containsTarget": true}
            ]
        }"#;
        let ty: EntityType = serde_json::from_str(json).unwrap();

        assert_eq!(ty.key, vec!["Id".to_string()]);
        assert_eq!(
            ty.declared_property("Version").unwrap().concurrency_mode,
            ConcurrencyMode::Fixed
        );
        assert!(ty.declared_property("Receipt").unwrap().is_stream());
        assert!(ty.declared_navigation("Lines").unwrap().contains_target);
        assert!(!ty.has_stream);
    }

    #[test]
    fn test_namespace() {
        assert_eq!(EntityType::new("My.Long.NS.Type").namespace(), "My.Long.NS");
        assert_eq!(EntityType::new("Bare").namespace(), "");
    }
}
