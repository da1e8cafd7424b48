//! Actions and functions advertised on a resource

use url::Url;

use crate::edm::OperationKind;
use crate::error::Result;
use crate::metadata::ResourceMetadataBuilder;
use crate::model::WireValue;

/// An action or function that can be invoked on a resource.
///
/// `metadata` is the metadata reference of the operation (the metadata
/// document URI with the operation name as fragment). Title and target are
/// either supplied on the wire or resolved lazily through a metadata builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Whether this is an action or a function.
    pub kind: OperationKind,
    /// Metadata reference, e.g. `http://host/service/$metadata#NS.Approve`.
    pub metadata: Url,
    /// Title supplied on the wire.
    pub title: WireValue<String>,
    /// Target supplied on the wire.
    pub target: WireValue<Url>,
    /// Type name of the binding parameter when it differs from the resource type.
    pub binding_parameter_type_name: Option<String>,
}

impl Operation {
    /// Creates an action with the given metadata reference.
    pub fn action(metadata: Url) -> Self {
        Self::new(OperationKind::Action, metadata)
    }

    /// Creates a function with the given metadata reference.
    pub fn function(metadata: Url) -> Self {
        Self::new(OperationKind::Function, metadata)
    }

    /// Creates an operation of the given kind.
    pub fn new(kind: OperationKind, metadata: Url) -> Self {
        Self {
            kind,
            metadata,
            title: WireValue::Unset,
            target: WireValue::Unset,
            binding_parameter_type_name: None,
        }
    }

    /// Sets the wire-supplied target.
    pub fn with_target(mut self, target: Url) -> Self {
        self.target = WireValue::Value(target);
        self
    }

    /// Sets the wire-supplied title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = WireValue::Value(title.into());
        self
    }

    /// Sets the binding parameter type name.
    pub fn with_binding_parameter_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.binding_parameter_type_name = Some(type_name.into());
        self
    }

    /// Returns the metadata reference fragment, e.g. `NS.Approve` or `NS.Rank(Edm.Int32)`.
    pub fn metadata_fragment(&self) -> &str {
        self.metadata.fragment().unwrap_or_default()
    }

    /// Returns the qualified operation name, without any parameter list.
    pub fn qualified_name(&self) -> &str {
        let fragment = self.metadata_fragment();
        match fragment.find('(') {
            Some(i) => &fragment[..i],
            None => fragment,
        }
    }

    /// Returns the title, defaulting to the qualified operation name.
    pub fn title(&self) -> Option<String> {
        match &self.title {
            WireValue::Unset => Some(self.qualified_name().to_string()),
            WireValue::Null => None,
            WireValue::Value(t) => Some(t.clone()),
        }
    }

    /// Returns the target, computing it through `builder` when not supplied.
    pub fn target(&self, builder: &dyn ResourceMetadataBuilder) -> Result<Option<Url>> {
        self.target.or_compute(|| {
            builder.operation_target_uri(
                self.qualified_name(),
                self.binding_parameter_type_name.as_deref(),
            )
        })
    }
}
