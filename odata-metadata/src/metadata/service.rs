//! Service-level metadata context

use url::Url;

use super::ConventionalMetadataBuilder;
use super::ResourceMetadataContext;
use super::ResourceSerializationInfo;
use super::ResourceTypeContext;
use crate::config::ServiceConfig;
use crate::edm::EdmModel;
use crate::edm::NavigationSourceKind;
use crate::edm::ODataPath;
use crate::edm::SelectedProperties;
use crate::error::Result;
use crate::model::Resource;
use crate::uri::ConventionalUriBuilder;

/// Everything a builder needs to know about a resource besides its data.
#[derive(Debug, Clone, Default)]
pub struct ResourceScope {
    serialization_info: Option<ResourceSerializationInfo>,
    navigation_source: Option<String>,
    expected_type: Option<String>,
    is_from_collection: bool,
    selected: SelectedProperties,
}

impl ResourceScope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope for a resource of the named navigation source.
    pub fn for_navigation_source(name: impl Into<String>) -> Self {
        Self {
            navigation_source: Some(name.into()),
            ..Self::default()
        }
    }

    /// Scope described by a serialization descriptor instead of the model.
    pub fn for_serialization_info(info: ResourceSerializationInfo) -> Self {
        Self {
            serialization_info: Some(info),
            ..Self::default()
        }
    }

    /// Sets the expected type.
    pub fn with_expected_type(mut self, type_name: impl Into<String>) -> Self {
        self.expected_type = Some(type_name.into());
        self
    }

    /// Marks the resource as a member of a collection.
    pub fn from_collection(mut self) -> Self {
        self.is_from_collection = true;
        self
    }

    /// Sets the `$select` scope.
    pub fn with_selected(mut self, selected: SelectedProperties) -> Self {
        self.selected = selected;
        self
    }
}

/// Per-service (or per-request) state shared by all builders.
///
/// # Example
///
/// ```
/// use odata_metadata::config::ServiceConfig;
/// use odata_metadata::edm::{EntityType, InMemoryModel, StructuralProperty};
/// use odata_metadata::metadata::{MetadataContext, ResourceMetadataBuilder, ResourceScope};
/// use odata_metadata::model::{Property, Resource};
///
/// let model = InMemoryModel::new()
///     .with_entity_type(
///         EntityType::new("NS.Person")
///             .with_key(&["Id"])
///             .with_property(StructuralProperty::new("Id", "Edm.Int32")),
///     )
///     .with_entity_set("People", "NS.Person");
///
/// let config = ServiceConfig::new("http://host/service/").unwrap();
/// let service = MetadataContext::new(config).with_model(&model);
///
/// let person = Resource::new("NS.Person").with_property(Property::new("Id", 1i32));
/// let scope = ResourceScope::for_navigation_source("People").from_collection();
/// let builder = service.create_builder(&person, &scope, None).unwrap();
///
/// assert_eq!(builder.id().unwrap().unwrap().as_str(), "http://host/service/People(1)");
/// ```
pub struct MetadataContext<'a> {
    model: Option<&'a dyn EdmModel>,
    config: ServiceConfig,
    uri_builder: ConventionalUriBuilder,
    metadata_document_uri: Url,
    path: Option<ODataPath>,
}

impl std::fmt::Debug for MetadataContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataContext")
            .field("config", &self.config)
            .field("has_model", &self.model.is_some())
            .field("path", &self.path)
            .finish()
    }
}

impl<'a> MetadataContext<'a> {
    /// Creates a context without a model.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            model: None,
            uri_builder: ConventionalUriBuilder::from_config(&config),
            metadata_document_uri: config.metadata_document_uri(),
            config,
            path: None,
        }
    }

    /// Sets the model.
    pub fn with_model(mut self, model: &'a dyn EdmModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Sets the request path.
    pub fn with_path(mut self, path: ODataPath) -> Self {
        self.path = Some(path);
        self
    }

    /// Returns the model, if any.
    pub fn model(&self) -> Option<&'a dyn EdmModel> {
        self.model
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the URI builder.
    pub fn uri_builder(&self) -> &ConventionalUriBuilder {
        &self.uri_builder
    }

    /// Returns the metadata document URI.
    pub fn metadata_document_uri(&self) -> &Url {
        &self.metadata_document_uri
    }

    /// Returns the request path, if any.
    pub fn path(&self) -> Option<&ODataPath> {
        self.path.as_ref()
    }

    /// Builds the type context for `scope`.
    pub fn type_context(&self, scope: &ResourceScope) -> ResourceTypeContext {
        let convention = self.config.url_convention();
        match (&scope.serialization_info, self.model) {
            (Some(info), _) => ResourceTypeContext::from_serialization_info(info, convention),
            (None, Some(model)) => ResourceTypeContext::from_model(
                model,
                scope.navigation_source.as_deref(),
                scope.expected_type.as_deref(),
                scope.is_from_collection,
                convention,
            ),
            (None, None) => ResourceTypeContext {
                navigation_source_name: scope.navigation_source.clone(),
                expected_type_name: scope.expected_type.clone(),
                is_from_collection: scope.is_from_collection,
                navigation_source_kind: NavigationSourceKind::Unknown,
                url_convention: convention,
                ..ResourceTypeContext::default()
            },
        }
    }

    /// Creates a conventional builder for `resource`.
    pub fn create_builder(
        &'a self,
        resource: &'a Resource,
        scope: &ResourceScope,
        parent: Option<&'a ConventionalMetadataBuilder<'a>>,
    ) -> Result<ConventionalMetadataBuilder<'a>> {
        let context = ResourceMetadataContext::create(
            resource,
            self.type_context(scope),
            scope.serialization_info.is_some(),
            self.model,
            scope.selected.clone(),
        )?;
        Ok(ConventionalMetadataBuilder::new(context, self, parent))
    }
}
