//! Operation (action/function) definitions

use serde::Deserialize;
use serde::Serialize;

/// Whether an operation is an action or a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    /// Side-effecting operation.
    Action,
    /// Side-effect free operation.
    Function,
}

/// A declared operation parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationParameter {
    /// Parameter name.
    pub name: String,
    /// Qualified type name, e.g. `NS.Customer` or `Collection(NS.Customer)`.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl OperationParameter {
    /// Creates a new parameter.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Returns `true` if the parameter is collection-typed.
    pub fn is_collection(&self) -> bool {
        self.type_name.starts_with("Collection(")
    }
}

/// An action or function declared in the model.
///
/// For bound operations the first parameter is the binding parameter.
///
/// # Example
///
/// ```
/// use odata_metadata::edm::{OperationDefinition, OperationParameter};
///
/// let approve = OperationDefinition::action("NS", "Approve")
///     .bound_to(OperationParameter::new("order", "NS.Order"));
///
/// assert_eq!(approve.full_name(), "NS.Approve");
/// assert_eq!(approve.binding_type_name(), Some("NS.Order"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDefinition {
    /// Namespace of the operation.
    pub namespace: String,
    /// Unqualified name.
    pub name: String,
    /// Action or function.
    pub kind: OperationKind,
    /// Whether the operation is bound.
    #[serde(default)]
    pub is_bound: bool,
    /// Parameters, binding parameter first.
    #[serde(default)]
    pub parameters: Vec<OperationParameter>,
}

impl OperationDefinition {
    /// Creates an unbound action.
    pub fn action(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(OperationKind::Action, namespace, name)
    }

    /// Creates an unbound function.
    pub fn function(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(OperationKind::Function, namespace, name)
    }

    fn new(kind: OperationKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            is_bound: false,
            parameters: Vec::new(),
        }
    }

    /// Binds the operation, inserting the binding parameter first.
    pub fn bound_to(mut self, binding: OperationParameter) -> Self {
        self.is_bound = true;
        self.parameters.insert(0, binding);
        self
    }

    /// Adds a non-binding parameter.
    pub fn with_parameter(mut self, parameter: OperationParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Returns the namespace-qualified name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Returns the qualified name followed by the parameter type list.
    pub fn full_name_with_parameters(&self) -> String {
        let types: Vec<&str> = self.parameters.iter().map(|p| p.type_name.as_str()).collect();
        format!("{}({})", self.full_name(), types.join(","))
    }

    /// Returns the binding parameter type, if the operation is bound.
    pub fn binding_type_name(&self) -> Option<&str> {
        if !self.is_bound {
            return None;
        }
        self.parameters.first().map(|p| p.type_name.as_str())
    }
}
