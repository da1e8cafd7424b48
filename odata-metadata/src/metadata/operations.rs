//! Convention-based operations missing from the payload

use std::collections::HashSet;

use once_cell::unsync::OnceCell;
use url::Url;

use super::ResourceMetadataContext;
use crate::edm::OperationKind;
use crate::error::Result;
use crate::model::Operation;

#[derive(Debug, Default)]
struct ComputedOperations {
    actions: Vec<Operation>,
    functions: Vec<Operation>,
}

/// Computes the bound actions and functions that apply to a resource but
/// were not supplied on the wire.
///
/// Both lists are produced by one pass and cached together.
#[derive(Debug, Default)]
pub struct MissingOperationGenerator {
    computed: OnceCell<ComputedOperations>,
}

impl MissingOperationGenerator {
    /// Creates a generator with nothing computed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the computed actions.
    pub fn computed_actions(
        &self,
        context: &ResourceMetadataContext<'_>,
        metadata_document_uri: &Url,
    ) -> Result<&[Operation]> {
        Ok(&self.compute(context, metadata_document_uri)?.actions)
    }

    /// Returns the computed functions.
    pub fn computed_functions(
        &self,
        context: &ResourceMetadataContext<'_>,
        metadata_document_uri: &Url,
    ) -> Result<&[Operation]> {
        Ok(&self.compute(context, metadata_document_uri)?.functions)
    }

    fn compute(
        &self,
        context: &ResourceMetadataContext<'_>,
        metadata_document_uri: &Url,
    ) -> Result<&ComputedOperations> {
        self.computed.get_or_try_init(|| {
            let Some(model) = context.model() else {
                return Ok(ComputedOperations::default());
            };
            let type_name = context.actual_entity_type_name()?;
            let resource = context.resource();

            let mut present = HashSet::new();
            for op in resource.actions().iter().chain(resource.functions()) {
                let resolved = model.resolve_operations(op.metadata_fragment());
                if resolved.is_empty() {
                    log::warn!(
                        "operation metadata reference '{}' does not resolve in the model",
                        op.metadata
                    );
                }
                present.extend(resolved.into_iter().map(|def| def.full_name_with_parameters()));
            }

            let mut computed = ComputedOperations::default();
            for def in context.selected_bindable_operations() {
                if present.contains(&def.full_name_with_parameters()) {
                    continue;
                }

                let mut metadata = metadata_document_uri.clone();
                metadata.set_fragment(Some(&model.metadata_reference_name(def)));

                let mut op = Operation::new(def.kind, metadata);
                if let Some(binding) = def.parameters.first().filter(|p| p.type_name != type_name) {
                    op = op.with_binding_parameter_type_name(binding.type_name.clone());
                }

                match def.kind {
                    OperationKind::Action => computed.actions.push(op),
                    OperationKind::Function => computed.functions.push(op),
                }
            }

            log::debug!(
                "computed {} actions and {} functions for {}",
                computed.actions.len(),
                computed.functions.len(),
                type_name
            );
            Ok(computed)
        })
    }
}
