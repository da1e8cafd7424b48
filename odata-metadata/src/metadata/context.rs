//! Per-resource metadata context

use std::collections::BTreeMap;

use once_cell::unsync::OnceCell;

use super::ResourceTypeContext;
use crate::edm::ConcurrencyMode;
use crate::edm::EdmModel;
use crate::edm::EntityType;
use crate::edm::NavigationProperty;
use crate::edm::OperationDefinition;
use crate::edm::SelectedProperties;
use crate::edm::StructuralProperty;
use crate::error::MetadataError;
use crate::error::Result;
use crate::model::PropertyKind;
use crate::model::Resource;
use crate::model::Value;

/// Key or ETag values in declaration order.
pub type PropertyValues = Vec<(String, Value)>;

/// Where key, ETag and selection information comes from.
enum ContextSource<'a> {
    /// Properties are classified by their serialization tags.
    WithoutModel,
    /// Properties are classified by the model.
    WithModel {
        model: &'a dyn EdmModel,
        actual_type: &'a EntityType,
        selected: SelectedProperties,
    },
}

/// A lazily computed, read-only view over one resource.
///
/// Answers which properties form the key and the ETag, and which navigation
/// properties, stream properties and bound operations are in scope. Every
/// answer is computed on first access and cached.
pub struct ResourceMetadataContext<'a> {
    resource: &'a Resource,
    type_context: ResourceTypeContext,
    source: ContextSource<'a>,
    key_properties: OnceCell<PropertyValues>,
    etag_properties: OnceCell<PropertyValues>,
    selected_navigation_properties: OnceCell<Vec<NavigationProperty>>,
    selected_stream_properties: OnceCell<BTreeMap<String, StructuralProperty>>,
    selected_bindable_operations: OnceCell<Vec<OperationDefinition>>,
}

impl std::fmt::Debug for ResourceMetadataContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceMetadataContext")
            .field("type_name", &self.resource.type_name())
            .field("type_context", &self.type_context)
            .field("has_model", &self.model().is_some())
            .finish()
    }
}

impl<'a> ResourceMetadataContext<'a> {
    /// Creates the context for `resource`.
    ///
    /// With `use_serialization_info` set, or without a model, properties are
    /// classified by their tags. Otherwise the resource type (or the
    /// expected type when the resource has none) is resolved in the model.
    pub fn create(
        resource: &'a Resource,
        type_context: ResourceTypeContext,
        use_serialization_info: bool,
        model: Option<&'a dyn EdmModel>,
        selected: SelectedProperties,
    ) -> Result<Self> {
        let source = match model {
            Some(model) if !use_serialization_info => {
                let type_name = if resource.type_name().is_empty() {
                    type_context
                        .expected_resource_type_name()
                        .ok_or(MetadataError::MissingTypeName)?
                } else {
                    resource.type_name()
                };
                let actual_type = model
                    .find_entity_type(type_name)
                    .ok_or_else(|| MetadataError::type_not_found(type_name))?;
                ContextSource::WithModel {
                    model,
                    actual_type,
                    selected,
                }
            }
            _ => ContextSource::WithoutModel,
        };

        Ok(Self {
            resource,
            type_context,
            source,
            key_properties: OnceCell::new(),
            etag_properties: OnceCell::new(),
            selected_navigation_properties: OnceCell::new(),
            selected_stream_properties: OnceCell::new(),
            selected_bindable_operations: OnceCell::new(),
        })
    }

    /// Returns the resource.
    pub fn resource(&self) -> &'a Resource {
        self.resource
    }

    /// Returns the type context.
    pub fn type_context(&self) -> &ResourceTypeContext {
        &self.type_context
    }

    /// Returns the model, if the context was built with one.
    pub fn model(&self) -> Option<&'a dyn EdmModel> {
        match &self.source {
            ContextSource::WithModel { model, .. } => Some(*model),
            ContextSource::WithoutModel => None,
        }
    }

    /// Returns the resolved entity type, if the context was built with a model.
    pub fn actual_entity_type(&self) -> Option<&'a EntityType> {
        match &self.source {
            ContextSource::WithModel { actual_type, .. } => Some(*actual_type),
            ContextSource::WithoutModel => None,
        }
    }

    /// Returns the qualified name of the resource's actual type.
    pub fn actual_entity_type_name(&self) -> Result<&str> {
        match &self.source {
            ContextSource::WithModel { actual_type, .. } => Ok(&actual_type.name),
            ContextSource::WithoutModel => {
                let name = self.resource.type_name();
                if name.is_empty() {
                    Err(MetadataError::MissingTypeName)
                } else {
                    Ok(name)
                }
            }
        }
    }

    /// Returns `true` if the resource is a media link entry.
    pub fn is_media_link_entry(&self) -> bool {
        match &self.source {
            ContextSource::WithModel {
                model, actual_type, ..
            } => {
                self.type_context.is_media_link_entry
                    || model.type_hierarchy(actual_type).iter().any(|t| t.has_stream)
            }
            ContextSource::WithoutModel => self.type_context.is_media_link_entry,
        }
    }

    /// Returns the key values in key order. Never empty.
    pub fn key_properties(&self) -> Result<&PropertyValues> {
        self.key_properties.get_or_try_init(|| {
            let type_name = self.actual_entity_type_name()?;
            let values = match &self.source {
                ContextSource::WithoutModel => self.tagged_values(PropertyKind::Key)?,
                ContextSource::WithModel {
                    model, actual_type, ..
                } => self.declared_values(model.key_properties(actual_type))?,
            };
            if values.is_empty() {
                return Err(MetadataError::no_key_properties(type_name));
            }
            if let Some((name, _)) = values.iter().find(|(_, v)| v.is_null()) {
                return Err(MetadataError::null_key_value(name, type_name));
            }
            Ok(values)
        })
    }

    /// Returns the ETag values. May be empty.
    ///
    /// With a model, an optimistic concurrency annotation on the navigation
    /// source wins over properties marked `Fixed`.
    pub fn etag_properties(&self) -> Result<&PropertyValues> {
        self.etag_properties.get_or_try_init(|| match &self.source {
            ContextSource::WithoutModel => self.tagged_values(PropertyKind::ETag),
            ContextSource::WithModel {
                model, actual_type, ..
            } => {
                let annotated: Vec<&str> = self
                    .type_context
                    .navigation_source_name
                    .as_deref()
                    .and_then(|source| model.optimistic_concurrency_paths(source))
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|path| path.last().map(String::as_str))
                    .collect();

                if !annotated.is_empty() {
                    return self.declared_values(annotated);
                }

                let fixed = model
                    .structural_properties(actual_type)
                    .into_iter()
                    .filter(|p| p.concurrency_mode == ConcurrencyMode::Fixed)
                    .map(|p| p.name.as_str())
                    .collect();
                self.declared_values(fixed)
            }
        })
    }

    /// Returns the selected navigation properties.
    pub fn selected_navigation_properties(&self) -> &[NavigationProperty] {
        self.selected_navigation_properties.get_or_init(|| match &self.source {
            ContextSource::WithoutModel => Vec::new(),
            ContextSource::WithModel {
                model,
                actual_type,
                selected,
            } => selected
                .selected_navigation_properties(*model, actual_type)
                .into_iter()
                .cloned()
                .collect(),
        })
    }

    /// Returns the selected stream properties, keyed by name.
    pub fn selected_stream_properties(&self) -> &BTreeMap<String, StructuralProperty> {
        self.selected_stream_properties.get_or_init(|| match &self.source {
            ContextSource::WithoutModel => BTreeMap::new(),
            ContextSource::WithModel {
                model,
                actual_type,
                selected,
            } => selected
                .selected_stream_properties(*model, actual_type)
                .into_iter()
                .map(|(name, p)| (name, p.clone()))
                .collect(),
        })
    }

    /// Returns the selected operations bindable to the resource type.
    pub fn selected_bindable_operations(&self) -> &[OperationDefinition] {
        self.selected_bindable_operations.get_or_init(|| match &self.source {
            ContextSource::WithoutModel => Vec::new(),
            ContextSource::WithModel {
                model,
                actual_type,
                selected,
            } => selected
                .selected_bindable_operations(*model, actual_type)
                .into_iter()
                .cloned()
                .collect(),
        })
    }

    /// Collects primitive values of properties tagged with `kind`.
    fn tagged_values(&self, kind: PropertyKind) -> Result<PropertyValues> {
        let type_name = self.actual_entity_type_name()?;
        self.resource
            .properties()
            .iter()
            .filter(|p| p.kind == kind)
            .map(|p| {
                check_primitive(&p.name, &p.value, type_name)?;
                Ok((p.name.clone(), p.value.clone()))
            })
            .collect()
    }

    /// Collects primitive values of the declared properties `names`.
    fn declared_values(&self, names: Vec<&str>) -> Result<PropertyValues> {
        let type_name = self.actual_entity_type_name()?;
        names
            .into_iter()
            .map(|name| {
                let value = self
                    .resource
                    .get(name)
                    .ok_or_else(|| MetadataError::property_not_found(name, type_name))?;
                check_primitive(name, value, type_name)?;
                Ok((name.to_string(), value.clone()))
            })
            .collect()
    }
}

fn check_primitive(name: &str, value: &Value, type_name: &str) -> Result<()> {
    if value.is_structured() {
        return Err(MetadataError::non_primitive(name, type_name));
    }
    Ok(())
}
