//! Model access trait and the in-memory model

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::EntityType;
use super::NavigationProperty;
use super::NavigationSource;
use super::OperationDefinition;
use super::OperationKind;
use super::PropertyRef;
use super::StructuralProperty;

/// A path to a property, one name per segment (e.g. `["Audit", "Version"]`).
pub type PropertyPath = Vec<String>;

/// Read access to the type system the metadata builder consults.
///
/// Implementors supply the four lookups; everything else (inheritance
/// walking, operation binding and overload resolution) is provided.
pub trait EdmModel {
    /// Finds an entity type by qualified name.
    fn find_entity_type(&self, name: &str) -> Option<&EntityType>;

    /// Finds a navigation source by name.
    fn find_navigation_source(&self, name: &str) -> Option<&NavigationSource>;

    /// Returns the optimistic concurrency property paths annotated on a navigation source.
    fn optimistic_concurrency_paths(&self, navigation_source: &str) -> Option<&[PropertyPath]>;

    /// Returns every declared operation.
    fn operations(&self) -> &[OperationDefinition];

    /// Returns the type followed by its ancestors, most derived first.
    fn type_hierarchy<'m>(&'m self, ty: &'m EntityType) -> Vec<&'m EntityType> {
        let mut hierarchy = vec![ty];
        let mut current = ty;
        while let Some(base_name) = current.base_type.as_deref() {
            let Some(base) = self.find_entity_type(base_name) else {
                break;
            };
            if hierarchy.iter().any(|t| t.name == base.name) {
                break;
            }
            hierarchy.push(base);
            current = base;
        }
        hierarchy
    }

    /// Returns the key property names, taken from the nearest type declaring a key.
    fn key_properties<'m>(&'m self, ty: &'m EntityType) -> Vec<&'m str> {
        self.type_hierarchy(ty)
            .into_iter()
            .find(|t| !t.key.is_empty())
            .map(|t| t.key.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns declared and inherited structural properties, base type members first.
    fn structural_properties<'m>(&'m self, ty: &'m EntityType) -> Vec<&'m StructuralProperty> {
        self.type_hierarchy(ty)
            .into_iter()
            .rev()
            .flat_map(|t| t.properties.iter())
            .collect()
    }

    /// Returns declared and inherited navigation properties, base type members first.
    fn navigation_properties<'m>(&'m self, ty: &'m EntityType) -> Vec<&'m NavigationProperty> {
        self.type_hierarchy(ty)
            .into_iter()
            .rev()
            .flat_map(|t| t.navigation_properties.iter())
            .collect()
    }

    /// Finds a declared or inherited property by name.
    fn find_property<'m>(&'m self, ty: &'m EntityType, name: &str) -> Option<PropertyRef<'m>> {
        self.type_hierarchy(ty).into_iter().find_map(|t| {
            t.declared_property(name)
                .map(PropertyRef::Structural)
                .or_else(|| t.declared_navigation(name).map(PropertyRef::Navigation))
        })
    }

    /// Returns `true` if `ty` is `ancestor` or derives from it.
    fn is_assignable_to(&self, ty: &EntityType, ancestor: &str) -> bool {
        self.type_hierarchy(ty).iter().any(|t| t.name == ancestor)
    }

    /// Returns the operations bound to a single instance of `ty` or one of its ancestors.
    fn bindable_operations<'m>(&'m self, ty: &'m EntityType) -> Vec<&'m OperationDefinition> {
        let hierarchy = self.type_hierarchy(ty);
        self.operations()
            .iter()
            .filter(|op| {
                op.binding_type_name()
                    .is_some_and(|binding| hierarchy.iter().any(|t| t.name == binding))
            })
            .collect()
    }

    /// Returns all overloads of a qualified operation name.
    fn find_operations<'m>(&'m self, full_name: &str) -> Vec<&'m OperationDefinition> {
        self.operations()
            .iter()
            .filter(|op| has_full_name(op, full_name))
            .collect()
    }

    /// Resolves a metadata reference fragment (`NS.Op` or `NS.Op(T1,T2)`) to operations.
    fn resolve_operations<'m>(&'m self, fragment: &str) -> Vec<&'m OperationDefinition> {
        let fragment = fragment.trim_start_matches('#');
        match split_parameter_list(fragment) {
            Some((name, types)) => self
                .find_operations(name)
                .into_iter()
                .filter(|op| {
                    op.parameters.len() == types.len()
                        && op.parameters.iter().zip(&types).all(|(p, t)| p.type_name == *t)
                })
                .collect(),
            None => self.find_operations(fragment),
        }
    }

    /// Returns the name used in an operation's metadata reference.
    ///
    /// Overloaded functions carry their parameter type list so the reference
    /// stays unambiguous.
    fn metadata_reference_name(&self, op: &OperationDefinition) -> String {
        let full_name = op.full_name();
        if op.kind == OperationKind::Function && self.find_operations(&full_name).len() > 1 {
            op.full_name_with_parameters()
        } else {
            full_name
        }
    }
}

fn has_full_name(op: &OperationDefinition, full_name: &str) -> bool {
    full_name
        .strip_prefix(op.namespace.as_str())
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|name| name == op.name)
}

fn split_parameter_list(fragment: &str) -> Option<(&str, Vec<&str>)> {
    let open = fragment.find('(')?;
    let inner = fragment[open + 1..].strip_suffix(')')?;
    let types = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(str::trim).collect()
    };
    Some((&fragment[..open], types))
}

/// A model held entirely in memory.
///
/// Can be assembled with the builder methods or deserialized from JSON.
///
/// # Example
///
/// ```
/// use odata_metadata::edm::{EdmModel, EntityType, InMemoryModel, StructuralProperty};
///
/// let model = InMemoryModel::new()
///     .with_entity_type(
///         EntityType::new("NS.Customer")
///             .with_key(&["Id"])
///             .with_property(StructuralProperty::new("Id", "Edm.Int32")),
///     )
///     .with_entity_set("Customers", "NS.Customer");
///
/// let customer = model.find_entity_type("NS.Customer").unwrap();
/// assert_eq!(model.key_properties(customer), vec!["Id"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InMemoryModel {
    #[serde(default)]
    entity_types: Vec<EntityType>,

    #[serde(default)]
    navigation_sources: Vec<NavigationSource>,

    #[serde(default)]
    operations: Vec<OperationDefinition>,

    /// Navigation source name to optimistic concurrency property paths.
    #[serde(default)]
    optimistic_concurrency: HashMap<String, Vec<PropertyPath>>,
}

impl InMemoryModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a model description from JSON.
    ///
    /// The document uses the same camelCase field names as the serialized model.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Adds an entity type.
    pub fn with_entity_type(mut self, ty: EntityType) -> Self {
        self.entity_types.push(ty);
        self
    }

    /// Adds a navigation source.
    pub fn with_navigation_source(mut self, source: NavigationSource) -> Self {
        self.navigation_sources.push(source);
        self
    }

    /// Adds an entity set.
    pub fn with_entity_set(self, name: &str, entity_type: &str) -> Self {
        self.with_navigation_source(NavigationSource::entity_set(name, entity_type))
    }

    /// Adds a singleton.
    pub fn with_singleton(self, name: &str, entity_type: &str) -> Self {
        self.with_navigation_source(NavigationSource::singleton(name, entity_type))
    }

    /// Adds a contained navigation source named after its containment property.
    pub fn with_contained(self, name: &str, entity_type: &str) -> Self {
        self.with_navigation_source(NavigationSource::contained(name, entity_type))
    }

    /// Adds an operation.
    pub fn with_operation(mut self, op: OperationDefinition) -> Self {
        self.operations.push(op);
        self
    }

    /// Annotates a navigation source with optimistic concurrency paths (`/`-separated).
    pub fn with_optimistic_concurrency(mut self, navigation_source: &str, paths: &[&str]) -> Self {
        let paths = paths
            .iter()
            .map(|p| p.split('/').map(str::to_string).collect())
            .collect();
        self.optimistic_concurrency
            .insert(navigation_source.to_string(), paths);
        self
    }

    /// Returns all entity types.
    pub fn entity_types(&self) -> &[EntityType] {
        &self.entity_types
    }

    /// Returns all navigation sources.
    pub fn navigation_sources(&self) -> &[NavigationSource] {
        &self.navigation_sources
    }
}

impl EdmModel for InMemoryModel {
    fn find_entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|t| t.name == name)
    }

    fn find_navigation_source(&self, name: &str) -> Option<&NavigationSource> {
        self.navigation_sources.iter().find(|s| s.name == name)
    }

    fn optimistic_concurrency_paths(&self, navigation_source: &str) -> Option<&[PropertyPath]> {
        self.optimistic_concurrency
            .get(navigation_source)
            .map(Vec::as_slice)
    }

    fn operations(&self) -> &[OperationDefinition] {
        &self.operations
    }
}
