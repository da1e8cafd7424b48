//! Selected properties filter (`$select` / `$expand` scope)

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::EdmModel;
use super::EntityType;
use super::NavigationProperty;
use super::OperationDefinition;
use super::StructuralProperty;

/// Which parts of an entity are in scope for metadata generation.
///
/// # Example
///
/// ```
/// use odata_metadata::edm::SelectedProperties;
///
/// let selected = SelectedProperties::parse("Name,Orders/Total,NS.*");
/// assert!(selected.is_property_selected("Orders"));
/// assert!(!selected.is_property_selected("Email"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectedProperties {
    /// Nothing is selected.
    Empty,
    /// Everything is selected (no `$select` was given).
    #[default]
    EntireSubtree,
    /// An explicit selection.
    Partial(PartialSelection),
}

/// An explicit `$select` selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialSelection {
    /// `*` was selected.
    wildcard: bool,
    /// Selected names (properties, or unqualified operation names).
    names: BTreeSet<String>,
    /// Nested selections below a navigation property.
    children: BTreeMap<String, SelectedProperties>,
    /// Namespaces selected with `NS.*`.
    operation_namespaces: BTreeSet<String>,
    /// Qualified operation names.
    operations: BTreeSet<String>,
}

impl SelectedProperties {
    /// Parses a comma separated `$select` clause.
    ///
    /// An empty clause selects nothing.
    pub fn parse(clause: &str) -> Self {
        let mut selection = PartialSelection::default();
        let mut any = false;
        for item in clause.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            any = true;
            selection.add_path(item);
        }
        if any {
            Self::Partial(selection)
        } else {
            Self::Empty
        }
    }

    /// Returns `true` if a property name is in scope.
    pub fn is_property_selected(&self, name: &str) -> bool {
        match self {
            Self::Empty => false,
            Self::EntireSubtree => true,
            Self::Partial(s) => s.wildcard || s.names.contains(name) || s.children.contains_key(name),
        }
    }

    /// Returns `true` if a bindable operation is in scope.
    ///
    /// Operations are never selected by `*`; they need `NS.*`, their
    /// qualified name, or (when `must_be_qualified` is false) their bare name.
    pub fn is_operation_selected(&self, op: &OperationDefinition, must_be_qualified: bool) -> bool {
        match self {
            Self::Empty => false,
            Self::EntireSubtree => true,
            Self::Partial(s) => {
                s.operation_namespaces.contains(&op.namespace)
                    || s.operations.contains(&op.full_name())
                    || (!must_be_qualified && s.names.contains(&op.name))
            }
        }
    }

    /// Returns the selection that applies below a navigation property.
    pub fn child(&self, navigation_property: &str) -> SelectedProperties {
        match self {
            Self::Empty => Self::Empty,
            Self::EntireSubtree => Self::EntireSubtree,
            Self::Partial(s) => match s.children.get(navigation_property) {
                Some(child) => child.clone(),
                None if s.wildcard || s.names.contains(navigation_property) => Self::EntireSubtree,
                None => Self::Empty,
            },
        }
    }

    /// Returns the selected navigation properties of `ty`.
    pub fn selected_navigation_properties<'m>(
        &self,
        model: &'m dyn EdmModel,
        ty: &'m EntityType,
    ) -> Vec<&'m NavigationProperty> {
        model
            .navigation_properties(ty)
            .into_iter()
            .filter(|p| self.is_property_selected(&p.name))
            .collect()
    }

    /// Returns the selected stream properties of `ty`, keyed by name.
    pub fn selected_stream_properties<'m>(
        &self,
        model: &'m dyn EdmModel,
        ty: &'m EntityType,
    ) -> BTreeMap<String, &'m StructuralProperty> {
        model
            .structural_properties(ty)
            .into_iter()
            .filter(|p| p.is_stream() && self.is_property_selected(&p.name))
            .map(|p| (p.name.clone(), p))
            .collect()
    }

    /// Returns the selected operations bindable to `ty`.
    pub fn selected_bindable_operations<'m>(
        &self,
        model: &'m dyn EdmModel,
        ty: &'m EntityType,
    ) -> Vec<&'m OperationDefinition> {
        let must_be_qualified = ty.is_open;
        model
            .bindable_operations(ty)
            .into_iter()
            .filter(|op| self.is_operation_selected(op, must_be_qualified))
            .collect()
    }
}

impl PartialSelection {
    fn add_path(&mut self, item: &str) {
        let (head, rest) = match item.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (item, None),
        };

        match rest {
            // A leading type cast only narrows the type; the rest applies here.
            Some(rest) if head.contains('.') => self.add_path(rest),
            Some(rest) => {
                let child = self
                    .children
                    .entry(head.to_string())
                    .or_insert_with(|| SelectedProperties::Partial(PartialSelection::default()));
                if let SelectedProperties::Partial(child) = child {
                    child.add_path(rest);
                }
            }
            None if head == "*" => self.wildcard = true,
            None => match head.strip_suffix(".*") {
                Some(namespace) => {
                    self.operation_namespaces.insert(namespace.to_string());
                }
                None if head.contains('.') => {
                    self.operations.insert(head.to_string());
                }
                None => {
                    self.names.insert(head.to_string());
                }
            },
        }
    }
}
