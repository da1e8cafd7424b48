//! Conventional metadata builder

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::HashSet;

use once_cell::unsync::OnceCell;
use url::Url;

use super::MetadataContext;
use super::MissingOperationGenerator;
use super::NavigationLinkInfo;
use super::ResourceMetadataBuilder;
use super::ResourceMetadataContext;
use super::builder::check_stream_property;
use crate::edm::NavigationSourceKind;
use crate::edm::containing_segments;
use crate::error::MetadataError;
use crate::error::Result;
use crate::model::Operation;
use crate::model::Property;
use crate::model::Resource;
use crate::model::Value;
use crate::model::WireValue;
use crate::model::types::StreamReference;
use crate::uri::ConventionalUriBuilder;
use crate::uri::LiteralFormatter;

/// Computes resource metadata following the OData URL conventions.
///
/// Each computed value is cached on first access and never recomputed.
/// A builder for a contained resource may borrow the builder of its parent
/// to derive its id.
pub struct ConventionalMetadataBuilder<'a> {
    context: ResourceMetadataContext<'a>,
    service: &'a MetadataContext<'a>,
    parent: Option<&'a ConventionalMetadataBuilder<'a>>,

    computed_id: OnceCell<Url>,
    computed_edit_link: OnceCell<Option<Url>>,
    computed_read_link: OnceCell<Option<Url>>,
    computed_etag: OnceCell<Option<String>>,
    computed_media_resource: OnceCell<Option<StreamReference>>,
    computed_stream_properties: OnceCell<Vec<Property>>,
    missing_operations: MissingOperationGenerator,

    processed_navigation_links: RefCell<HashSet<String>>,
    navigation_links: OnceCell<Vec<NavigationLinkInfo>>,
    navigation_cursor: Cell<usize>,
}

impl std::fmt::Debug for ConventionalMetadataBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConventionalMetadataBuilder")
            .field("context", &self.context)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

impl<'a> ConventionalMetadataBuilder<'a> {
    /// Creates a builder over `context`.
    pub fn new(
        context: ResourceMetadataContext<'a>,
        service: &'a MetadataContext<'a>,
        parent: Option<&'a ConventionalMetadataBuilder<'a>>,
    ) -> Self {
        Self {
            context,
            service,
            parent,
            computed_id: OnceCell::new(),
            computed_edit_link: OnceCell::new(),
            computed_read_link: OnceCell::new(),
            computed_etag: OnceCell::new(),
            computed_media_resource: OnceCell::new(),
            computed_stream_properties: OnceCell::new(),
            missing_operations: MissingOperationGenerator::new(),
            processed_navigation_links: RefCell::new(HashSet::new()),
            navigation_links: OnceCell::new(),
            navigation_cursor: Cell::new(0),
        }
    }

    /// Returns the resource metadata context.
    pub fn context(&self) -> &ResourceMetadataContext<'a> {
        &self.context
    }

    /// Returns the parent builder, if any.
    pub fn parent(&self) -> Option<&'a ConventionalMetadataBuilder<'a>> {
        self.parent
    }

    fn resource(&self) -> &'a Resource {
        self.context.resource()
    }

    fn uri_builder(&self) -> &ConventionalUriBuilder {
        self.service.uri_builder()
    }

    fn navigation_source_name(&self) -> Result<&str> {
        let type_context = self.context.type_context();
        type_context
            .navigation_source_name
            .as_deref()
            .ok_or(MetadataError::UnknownNavigationSource {
                navigation_source: None,
            })
    }

    // =========================================================================
    // Id
    // =========================================================================

    fn computed_id(&self) -> Result<&Url> {
        self.computed_id.get_or_try_init(|| {
            let id = self.compute_id()?;
            log::debug!("computed id {}", id);
            Ok(id)
        })
    }

    fn compute_id(&self) -> Result<Url> {
        let type_context = self.context.type_context();
        let uri_builder = self.uri_builder();
        match type_context.navigation_source_kind {
            NavigationSourceKind::Singleton => {
                let name = self.navigation_source_name()?;
                Ok(uri_builder.entity_set_uri(uri_builder.base_uri(), name))
            }
            NavigationSourceKind::Contained => self.compute_contained_id(),
            NavigationSourceKind::EntitySet => {
                let name = self.navigation_source_name()?;
                let set = uri_builder.entity_set_uri(uri_builder.base_uri(), name);
                uri_builder.entity_instance_uri(
                    &set,
                    self.context.key_properties()?,
                    self.context.actual_entity_type_name()?,
                )
            }
            NavigationSourceKind::Unknown => Err(MetadataError::UnknownNavigationSource {
                navigation_source: type_context.navigation_source_name.clone(),
            }),
        }
    }

    fn compute_contained_id(&self) -> Result<Url> {
        let navigation_property = self.navigation_source_name()?;
        let uri_builder = self.uri_builder();

        let parent_id = match self.parent {
            Some(parent) => parent.id()?.map(|id| (parent, id)),
            None => None,
        };
        let containing = match parent_id {
            Some((parent, id)) => match parent.containment_type_cast(navigation_property)? {
                Some(cast) => uri_builder.append_type_segment(&id, cast),
                None => id,
            },
            None => self.containing_uri_from_path()?,
        };

        let set = uri_builder.navigation_link_uri(&containing, navigation_property);
        if self.context.type_context().is_from_collection {
            uri_builder.entity_instance_uri(
                &set,
                self.context.key_properties()?,
                self.context.actual_entity_type_name()?,
            )
        } else {
            Ok(set)
        }
    }

    /// Returns the type to cast to before a contained navigation property
    /// that is only declared on this resource's derived type.
    fn containment_type_cast(&self, navigation_property: &str) -> Result<Option<&str>> {
        let actual = self.context.actual_entity_type_name()?;
        let Some(expected) = self.context.type_context().expected_resource_type_name() else {
            return Ok(None);
        };
        if expected == actual {
            return Ok(None);
        }

        let declared_on_expected = match self.context.model() {
            Some(model) => model.find_entity_type(expected).is_some_and(|ty| {
                model
                    .navigation_properties(ty)
                    .iter()
                    .any(|p| p.name == navigation_property)
            }),
            None => false,
        };
        Ok((!declared_on_expected).then_some(actual))
    }

    /// Rebuilds the URI of the entity containing this resource from the request path.
    fn containing_uri_from_path(&self) -> Result<Url> {
        let path = self.service.path().ok_or(MetadataError::MissingPathContext)?;
        let model = self.service.model();
        let prefix = containing_segments(path.segments(), |type_name, navigation_property| {
            model.is_some_and(|model| {
                model.find_entity_type(type_name).is_some_and(|ty| {
                    model
                        .navigation_properties(ty)
                        .iter()
                        .any(|p| p.name == navigation_property)
                })
            })
        })
        .ok_or(MetadataError::MissingPathContext)?;

        let uri_builder = self.uri_builder();
        uri_builder.path_uri(uri_builder.base_uri(), prefix)
    }

    // =========================================================================
    // Links
    // =========================================================================

    fn compute_edit_link(&self) -> Result<Option<Url>> {
        let id = match self.resource().id() {
            WireValue::Value(id) => id.clone(),
            WireValue::Null => return Ok(None),
            WireValue::Unset => self.computed_id()?.clone(),
        };

        let type_context = self.context.type_context();
        let actual = self.context.actual_entity_type_name()?;
        let link = match type_context.navigation_source_entity_type_name.as_deref() {
            Some(declared) if declared != actual => self.uri_builder().append_type_segment(&id, actual),
            _ => id,
        };
        log::debug!("computed edit link {}", link);
        Ok(Some(link))
    }

    fn compute_etag(&self) -> Result<Option<String>> {
        let values = self.context.etag_properties()?;
        if values.is_empty() {
            return Ok(None);
        }

        let formatter = LiteralFormatter::for_constants_without_encoding();
        let literals = values
            .iter()
            .map(|(_, value)| match value {
                Value::Null => Ok("null".to_string()),
                value => formatter.format(value),
            })
            .collect::<Result<Vec<_>>>()?;
        let etag = format!("W/\"{}\"", literals.join(","));
        log::debug!("computed etag {}", etag);
        Ok(Some(etag))
    }

    fn computed_stream_properties(&self, non_computed: &[Property]) -> &[Property] {
        self.computed_stream_properties.get_or_init(|| {
            self.context
                .selected_stream_properties()
                .keys()
                .filter(|name| !non_computed.iter().any(|p| &p.name == *name))
                .map(|name| Property::new(name.clone(), StreamReference::named(name.clone())))
                .collect()
        })
    }
}

impl ResourceMetadataBuilder for ConventionalMetadataBuilder<'_> {
    fn id(&self) -> Result<Option<Url>> {
        match self.resource().id() {
            WireValue::Value(id) => return Ok(Some(id.clone())),
            WireValue::Null => return Ok(None),
            WireValue::Unset => {}
        }
        if self.resource().is_transient() {
            return Ok(None);
        }
        Ok(Some(self.computed_id()?.clone()))
    }

    fn edit_link(&self) -> Result<Option<Url>> {
        let resource = self.resource();
        match resource.edit_link() {
            WireValue::Value(link) => return Ok(Some(link.clone())),
            WireValue::Null => return Ok(None),
            WireValue::Unset => {}
        }
        if resource.is_transient() || resource.read_link().value().is_some() {
            return Ok(None);
        }
        Ok(self
            .computed_edit_link
            .get_or_try_init(|| self.compute_edit_link())?
            .clone())
    }

    fn read_link(&self) -> Result<Option<Url>> {
        match self.resource().read_link() {
            WireValue::Value(link) => return Ok(Some(link.clone())),
            WireValue::Null => return Ok(None),
            WireValue::Unset => {}
        }
        Ok(self
            .computed_read_link
            .get_or_try_init(|| self.edit_link())?
            .clone())
    }

    fn etag(&self) -> Result<Option<String>> {
        self.resource().etag().or_compute(|| {
            Ok(self
                .computed_etag
                .get_or_try_init(|| self.compute_etag())?
                .clone())
        })
    }

    fn media_resource(&self) -> Result<Option<StreamReference>> {
        self.resource().media_resource().or_compute(|| {
            Ok(self
                .computed_media_resource
                .get_or_init(|| {
                    self.context
                        .is_media_link_entry()
                        .then(StreamReference::media_resource)
                })
                .clone())
        })
    }

    fn properties<'p>(&'p self, non_computed: &'p [Property]) -> Result<Vec<&'p Property>> {
        let computed = self.computed_stream_properties(non_computed);
        Ok(non_computed.iter().chain(computed).collect())
    }

    fn actions(&self) -> Result<Vec<&Operation>> {
        let computed = self
            .missing_operations
            .computed_actions(&self.context, self.service.metadata_document_uri())?;
        Ok(self.resource().actions().iter().chain(computed).collect())
    }

    fn functions(&self) -> Result<Vec<&Operation>> {
        let computed = self
            .missing_operations
            .computed_functions(&self.context, self.service.metadata_document_uri())?;
        Ok(self.resource().functions().iter().chain(computed).collect())
    }

    fn mark_navigation_link_processed(&self, navigation_property: &str) {
        self.processed_navigation_links
            .borrow_mut()
            .insert(navigation_property.to_string());
    }

    fn next_unprocessed_navigation_link(&self) -> Option<NavigationLinkInfo> {
        let links = self.navigation_links.get_or_init(|| {
            self.context
                .selected_navigation_properties()
                .iter()
                .map(|p| NavigationLinkInfo {
                    name: p.name.clone(),
                    is_collection: p.is_collection,
                })
                .collect()
        });

        let processed = self.processed_navigation_links.borrow();
        while let Some(link) = links.get(self.navigation_cursor.get()) {
            self.navigation_cursor.set(self.navigation_cursor.get() + 1);
            if !processed.contains(&link.name) {
                return Some(link.clone());
            }
        }
        None
    }

    fn stream_edit_link(&self, stream_property: Option<&str>) -> Result<Option<Url>> {
        check_stream_property(stream_property)?;
        Ok(self
            .edit_link()?
            .map(|base| self.uri_builder().stream_edit_link_uri(&base, stream_property)))
    }

    fn stream_read_link(&self, stream_property: Option<&str>) -> Result<Option<Url>> {
        check_stream_property(stream_property)?;
        Ok(self
            .read_link()?
            .map(|base| self.uri_builder().stream_read_link_uri(&base, stream_property)))
    }

    fn navigation_link_uri(&self, navigation_property: &str, explicit: &WireValue<Url>) -> Result<Option<Url>> {
        if let Some(value) = explicit.explicit() {
            return Ok(value.cloned());
        }
        check_navigation_property(navigation_property)?;
        Ok(self
            .edit_link()?
            .map(|base| self.uri_builder().navigation_link_uri(&base, navigation_property)))
    }

    fn association_link_uri(&self, navigation_property: &str, explicit: &WireValue<Url>) -> Result<Option<Url>> {
        if let Some(value) = explicit.explicit() {
            return Ok(value.cloned());
        }
        check_navigation_property(navigation_property)?;
        Ok(self
            .edit_link()?
            .map(|base| self.uri_builder().association_link_uri(&base, navigation_property)))
    }

    fn operation_target_uri(
        &self,
        operation_name: &str,
        binding_parameter_type_name: Option<&str>,
    ) -> Result<Option<Url>> {
        if operation_name.is_empty() {
            return Err(MetadataError::EmptyArgument {
                parameter: "operation_name",
            });
        }

        // A computed edit link may already end in a type segment.
        let binding = binding_parameter_type_name.filter(|t| !t.is_empty());
        let base = if binding.is_some() && !self.resource().edit_link().is_set() {
            self.id()?
        } else {
            self.edit_link()?
        };

        Ok(base.map(|base| {
            self.uri_builder()
                .operation_target_uri(&base, operation_name, binding)
        }))
    }

    fn id_for_serialization(&self) -> Result<WireValue<Url>> {
        if self.resource().is_transient() {
            return Ok(WireValue::Null);
        }
        Ok(self.id()?.into())
    }
}

fn check_navigation_property(navigation_property: &str) -> Result<()> {
    if navigation_property.is_empty() {
        return Err(MetadataError::EmptyArgument {
            parameter: "navigation_property",
        });
    }
    Ok(())
}
