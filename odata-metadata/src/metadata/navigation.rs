//! Navigation link descriptors

use url::Url;

use super::ResourceMetadataBuilder;
use crate::error::Result;
use crate::model::WireValue;

/// A navigation link still to be written for a resource.
///
/// The link URLs are resolved through the builder that produced the info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationLinkInfo {
    /// The navigation property name.
    pub name: String,
    /// Whether the property targets a collection.
    pub is_collection: bool,
}

impl NavigationLinkInfo {
    /// Returns the navigation link URL.
    pub fn url(&self, builder: &dyn ResourceMetadataBuilder) -> Result<Option<Url>> {
        builder.navigation_link_uri(&self.name, &WireValue::Unset)
    }

    /// Returns the association link URL.
    pub fn association_link_url(&self, builder: &dyn ResourceMetadataBuilder) -> Result<Option<Url>> {
        builder.association_link_uri(&self.name, &WireValue::Unset)
    }
}
