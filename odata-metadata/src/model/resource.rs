//! Resource (entry) being read or written

use url::Url;

use super::Operation;
use super::Property;
use super::Value;
use super::WireValue;
use super::types::StreamReference;

/// One entity instance being read or written.
///
/// Holds the values supplied on the wire or by the user. Metadata that was
/// not supplied (id, links, ETag, streams, operations) is computed by a
/// [`ResourceMetadataBuilder`](crate::metadata::ResourceMetadataBuilder)
/// borrowing the resource.
///
/// # Example
///
/// ```
/// use odata_metadata::model::{Property, Resource};
///
/// let customer = Resource::new("NS.Customer")
///     .with_property(Property::new("Id", 1i32).key())
///     .with_property(Property::new("Name", "Contoso"));
///
/// assert_eq!(customer.type_name(), "NS.Customer");
/// assert!(customer.property("Name").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resource {
    /// The qualified type name, possibly empty.
    pub(crate) type_name: String,

    /// Id supplied on the wire.
    pub(crate) id: WireValue<Url>,

    /// Edit link supplied on the wire.
    pub(crate) edit_link: WireValue<Url>,

    /// Read link supplied on the wire.
    pub(crate) read_link: WireValue<Url>,

    /// ETag supplied on the wire.
    pub(crate) etag: WireValue<String>,

    /// Media resource supplied on the wire.
    pub(crate) media_resource: WireValue<StreamReference>,

    /// Properties supplied on the wire.
    pub(crate) properties: Vec<Property>,

    /// Actions supplied on the wire.
    pub(crate) actions: Vec<Operation>,

    /// Functions supplied on the wire.
    pub(crate) functions: Vec<Operation>,

    /// Whether the resource has no persistent identity.
    pub(crate) is_transient: bool,
}

impl Resource {
    /// Creates a new empty resource of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the qualified type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the id supplied on the wire.
    pub fn id(&self) -> &WireValue<Url> {
        &self.id
    }

    /// Returns the edit link supplied on the wire.
    pub fn edit_link(&self) -> &WireValue<Url> {
        &self.edit_link
    }

    /// Returns the read link supplied on the wire.
    pub fn read_link(&self) -> &WireValue<Url> {
        &self.read_link
    }

    /// Returns the ETag supplied on the wire.
    pub fn etag(&self) -> &WireValue<String> {
        &self.etag
    }

    /// Returns the media resource supplied on the wire.
    pub fn media_resource(&self) -> &WireValue<StreamReference> {
        &self.media_resource
    }

    /// Returns the properties supplied on the wire.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Returns the actions supplied on the wire.
    pub fn actions(&self) -> &[Operation] {
        &self.actions
    }

    /// Returns the functions supplied on the wire.
    pub fn functions(&self) -> &[Operation] {
        &self.functions
    }

    /// Returns `true` if the resource has no persistent identity.
    pub fn is_transient(&self) -> bool {
        self.is_transient
    }

    /// Finds a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns the value of a property, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.property(name).map(|p| &p.value)
    }

    // =========================================================================
    // Builder-style setters
    // =========================================================================

    /// Sets the id (builder pattern).
    pub fn with_id(mut self, id: impl Into<WireValue<Url>>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the edit link (builder pattern).
    pub fn with_edit_link(mut self, link: impl Into<WireValue<Url>>) -> Self {
        self.edit_link = link.into();
        self
    }

    /// Sets the read link (builder pattern).
    pub fn with_read_link(mut self, link: impl Into<WireValue<Url>>) -> Self {
        self.read_link = link.into();
        self
    }

    /// Sets the ETag (builder pattern).
    pub fn with_etag(mut self, etag: impl Into<WireValue<String>>) -> Self {
        self.etag = etag.into();
        self
    }

    /// Sets the media resource (builder pattern).
    pub fn with_media_resource(mut self, stream: impl Into<WireValue<StreamReference>>) -> Self {
        self.media_resource = stream.into();
        self
    }

    /// Adds a property (builder pattern).
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Adds an action (builder pattern).
    pub fn with_action(mut self, action: Operation) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a function (builder pattern).
    pub fn with_function(mut self, function: Operation) -> Self {
        self.functions.push(function);
        self
    }

    /// Marks the resource as transient (builder pattern).
    pub fn transient(mut self) -> Self {
        self.is_transient = true;
        self
    }

    // =========================================================================
    // In-place setters
    // =========================================================================

    /// Sets the type name.
    pub fn set_type_name(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    /// Sets the id.
    pub fn set_id(&mut self, id: impl Into<WireValue<Url>>) {
        self.id = id.into();
    }

    /// Sets the edit link.
    pub fn set_edit_link(&mut self, link: impl Into<WireValue<Url>>) {
        self.edit_link = link.into();
    }

    /// Sets the read link.
    pub fn set_read_link(&mut self, link: impl Into<WireValue<Url>>) {
        self.read_link = link.into();
    }

    /// Sets the ETag.
    pub fn set_etag(&mut self, etag: impl Into<WireValue<String>>) {
        self.etag = etag.into();
    }

    /// Inserts or replaces a property.
    pub fn insert(&mut self, property: Property) {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    /// Removes a property and returns it.
    pub fn remove(&mut self, name: &str) -> Option<Property> {
        let index = self.properties.iter().position(|p| p.name == name)?;
        Some(self.properties.remove(index))
    }

    /// Sets the transient flag.
    pub fn set_transient(&mut self, transient: bool) {
        self.is_transient = transient;
    }
}

impl From<Url> for WireValue<Url> {
    fn from(v: Url) -> Self {
        WireValue::Value(v)
    }
}

impl From<String> for WireValue<String> {
    fn from(v: String) -> Self {
        WireValue::Value(v)
    }
}

impl From<&str> for WireValue<String> {
    fn from(v: &str) -> Self {
        WireValue::Value(v.to_string())
    }
}

impl From<StreamReference> for WireValue<StreamReference> {
    fn from(v: StreamReference) -> Self {
        WireValue::Value(v)
    }
}
