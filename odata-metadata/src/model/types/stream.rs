//! Stream reference values

use url::Url;

use crate::error::Result;
use crate::metadata::ResourceMetadataBuilder;
use crate::model::WireValue;

/// A reference to a media stream: either the default media resource of a
/// media link entry, or a named stream property.
///
/// Links that were not supplied on the wire are resolved lazily through a
/// metadata builder, so a computed stream reference holds no link state of
/// its own.
///
/// # Example
///
/// ```
/// use odata_metadata::metadata::NullMetadataBuilder;
/// use odata_metadata::model::types::StreamReference;
///
/// let photo = StreamReference::named("Photo");
/// assert_eq!(photo.edit_link(&NullMetadataBuilder).unwrap(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamReference {
    /// The stream property name, or `None` for the default media resource.
    pub property_name: Option<String>,
    /// Edit link supplied on the wire.
    pub edit_link: WireValue<Url>,
    /// Read link supplied on the wire.
    pub read_link: WireValue<Url>,
    /// Content type of the stream, if known.
    pub content_type: Option<String>,
    /// ETag of the stream, if known.
    pub etag: Option<String>,
}

impl StreamReference {
    /// Creates a reference to the default media resource.
    pub fn media_resource() -> Self {
        Self::default()
    }

    /// Creates a reference to a named stream property.
    pub fn named(property_name: impl Into<String>) -> Self {
        Self {
            property_name: Some(property_name.into()),
            ..Self::default()
        }
    }

    /// Sets the edit link supplied on the wire.
    pub fn with_edit_link(mut self, link: Url) -> Self {
        self.edit_link = WireValue::Value(link);
        self
    }

    /// Sets the read link supplied on the wire.
    pub fn with_read_link(mut self, link: Url) -> Self {
        self.read_link = WireValue::Value(link);
        self
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns `true` if this references the default media resource.
    pub fn is_media_resource(&self) -> bool {
        self.property_name.is_none()
    }

    /// Returns the edit link, computing it through `builder` when not supplied.
    pub fn edit_link(&self, builder: &dyn ResourceMetadataBuilder) -> Result<Option<Url>> {
        self.edit_link
            .or_compute(|| builder.stream_edit_link(self.property_name.as_deref()))
    }

    /// Returns the read link, computing it through `builder` when not supplied.
    pub fn read_link(&self, builder: &dyn ResourceMetadataBuilder) -> Result<Option<Url>> {
        self.read_link
            .or_compute(|| builder.stream_read_link(self.property_name.as_deref()))
    }
}
