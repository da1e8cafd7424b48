//! Metadata builder interface

use url::Url;

use super::NavigationLinkInfo;
use crate::error::MetadataError;
use crate::error::Result;
use crate::model::Operation;
use crate::model::Property;
use crate::model::WireValue;
use crate::model::types::StreamReference;

/// Computes the metadata of one resource.
///
/// Values supplied on the wire always win; anything else is computed by
/// the implementation (or left absent). `Ok(None)` means "no value".
pub trait ResourceMetadataBuilder {
    /// Returns the id.
    fn id(&self) -> Result<Option<Url>>;

    /// Returns the edit link.
    fn edit_link(&self) -> Result<Option<Url>>;

    /// Returns the read link.
    fn read_link(&self) -> Result<Option<Url>>;

    /// Returns the ETag.
    fn etag(&self) -> Result<Option<String>>;

    /// Returns the default media stream of a media link entry.
    fn media_resource(&self) -> Result<Option<StreamReference>>;

    /// Returns `non_computed` followed by computed stream properties.
    fn properties<'p>(&'p self, non_computed: &'p [Property]) -> Result<Vec<&'p Property>>;

    /// Returns supplied actions followed by computed ones.
    fn actions(&self) -> Result<Vec<&Operation>>;

    /// Returns supplied functions followed by computed ones.
    fn functions(&self) -> Result<Vec<&Operation>>;

    /// Excludes a navigation property from
    /// [`next_unprocessed_navigation_link`](Self::next_unprocessed_navigation_link).
    fn mark_navigation_link_processed(&self, navigation_property: &str);

    /// Returns the next selected navigation link not yet processed.
    fn next_unprocessed_navigation_link(&self) -> Option<NavigationLinkInfo>;

    /// Returns the edit link of a stream; `None` addresses the default stream.
    fn stream_edit_link(&self, stream_property: Option<&str>) -> Result<Option<Url>>;

    /// Returns the read link of a stream; `None` addresses the default stream.
    fn stream_read_link(&self, stream_property: Option<&str>) -> Result<Option<Url>>;

    /// Returns the navigation link, echoing `explicit` when it was set.
    fn navigation_link_uri(&self, navigation_property: &str, explicit: &WireValue<Url>) -> Result<Option<Url>>;

    /// Returns the association link, echoing `explicit` when it was set.
    fn association_link_uri(&self, navigation_property: &str, explicit: &WireValue<Url>) -> Result<Option<Url>>;

    /// Returns the target of a bound operation.
    fn operation_target_uri(
        &self,
        operation_name: &str,
        binding_parameter_type_name: Option<&str>,
    ) -> Result<Option<Url>>;

    /// Returns the id to write. The id is always written, possibly as null.
    fn id_for_serialization(&self) -> Result<WireValue<Url>> {
        Ok(self.id()?.into())
    }
}

/// Fails with [`MetadataError::EmptyArgument`] for `Some("")`.
pub(crate) fn check_stream_property(stream_property: Option<&str>) -> Result<()> {
    match stream_property {
        Some("") => Err(MetadataError::EmptyArgument {
            parameter: "stream_property",
        }),
        _ => Ok(()),
    }
}

/// A builder that computes nothing.
///
/// Every accessor returns "no value"; explicit navigation link values are
/// echoed and supplied properties are passed through.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetadataBuilder;

impl ResourceMetadataBuilder for NullMetadataBuilder {
    fn id(&self) -> Result<Option<Url>> {
        Ok(None)
    }

    fn edit_link(&self) -> Result<Option<Url>> {
        Ok(None)
    }

    fn read_link(&self) -> Result<Option<Url>> {
        Ok(None)
    }

    fn etag(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn media_resource(&self) -> Result<Option<StreamReference>> {
        Ok(None)
    }

    fn properties<'p>(&'p self, non_computed: &'p [Property]) -> Result<Vec<&'p Property>> {
        Ok(non_computed.iter().collect())
    }

    fn actions(&self) -> Result<Vec<&Operation>> {
        Ok(Vec::new())
    }

    fn functions(&self) -> Result<Vec<&Operation>> {
        Ok(Vec::new())
    }

    fn mark_navigation_link_processed(&self, _navigation_property: &str) {}

    fn next_unprocessed_navigation_link(&self) -> Option<NavigationLinkInfo> {
        None
    }

    fn stream_edit_link(&self, _stream_property: Option<&str>) -> Result<Option<Url>> {
        Ok(None)
    }

    fn stream_read_link(&self, _stream_property: Option<&str>) -> Result<Option<Url>> {
        Ok(None)
    }

    fn navigation_link_uri(&self, _navigation_property: &str, explicit: &WireValue<Url>) -> Result<Option<Url>> {
        Ok(explicit.value().cloned())
    }

    fn association_link_uri(&self, _navigation_property: &str, explicit: &WireValue<Url>) -> Result<Option<Url>> {
        Ok(explicit.value().cloned())
    }

    fn operation_target_uri(
        &self,
        _operation_name: &str,
        _binding_parameter_type_name: Option<&str>,
    ) -> Result<Option<Url>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_builder_returns_nothing() {
        let builder = NullMetadataBuilder;
        assert_eq!(builder.id().unwrap(), None);
        assert_eq!(builder.edit_link().unwrap(), None);
        assert_eq!(builder.etag().unwrap(), None);
        assert_eq!(builder.media_resource().unwrap(), None);
        assert!(builder.actions().unwrap().is_empty());
        assert!(builder.next_unprocessed_navigation_link().is_none());
        assert_eq!(builder.id_for_serialization().unwrap(), WireValue::Null);
    }

    #[test]
    fn test_null_builder_echoes_explicit_values() {
        let builder = NullMetadataBuilder;
        let link = Url::parse("http://host/Orders(1)/Lines").unwrap();

        assert_eq!(
            builder.navigation_link_uri("Lines", &WireValue::Value(link.clone())).unwrap(),
            Some(link)
        );
        assert_eq!(builder.association_link_uri("Lines", &WireValue::Unset).unwrap(), None);

        let properties = vec![Property::new("Name", "x")];
        assert_eq!(builder.properties(&properties).unwrap().len(), 1);
    }

    #[test]
    fn test_check_stream_property() {
        assert!(check_stream_property(None).is_ok());
        assert!(check_stream_property(Some("Photo")).is_ok());
        assert_eq!(
            check_stream_property(Some("")).unwrap_err(),
            MetadataError::EmptyArgument { parameter: "stream_property" }
        );
    }
}
