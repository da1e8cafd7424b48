//! Conventional URI builder

use url::Url;

use super::KeySerializer;
use super::UrlConvention;
use super::escape::push_escaped_segment;
use super::escape::push_segment;
use crate::config::ServiceConfig;
use crate::edm::PathSegment;
use crate::error::MetadataError;
use crate::error::Result;
use crate::model::Value;

/// Segment addressing the default media stream.
pub const DEFAULT_STREAM_SEGMENT: &str = "$value";

/// Segment addressing an entity reference.
pub const ENTITY_REFERENCE_SEGMENT: &str = "$ref";

/// Builds resource URIs by segment composition following the OData URL
/// conventions.
///
/// The builder holds no state besides the service root and URL convention
/// it was created with; every method takes the base URI to extend.
///
/// # Example
///
/// ```
/// use odata_metadata::model::Value;
/// use odata_metadata::uri::{ConventionalUriBuilder, UrlConvention};
/// use url::Url;
///
/// let root = Url::parse("http://host/service/").unwrap();
/// let builder = ConventionalUriBuilder::new(root, UrlConvention::Default);
///
/// let set = builder.entity_set_uri(builder.base_uri(), "People");
/// let person = builder
///     .entity_instance_uri(&set, &[("Id".to_string(), Value::Int32(1))], "NS.Person")
///     .unwrap();
/// assert_eq!(person.as_str(), "http://host/service/People(1)");
/// ```
#[derive(Debug, Clone)]
pub struct ConventionalUriBuilder {
    service_root: Url,
    convention: UrlConvention,
    key_serializer: KeySerializer,
}

impl ConventionalUriBuilder {
    /// Creates a builder for `service_root`.
    pub fn new(service_root: Url, convention: UrlConvention) -> Self {
        debug_assert!(!service_root.cannot_be_a_base());
        Self {
            service_root,
            convention,
            key_serializer: KeySerializer::new(convention),
        }
    }

    /// Creates a builder from a service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.service_root().clone(), config.url_convention())
    }

    /// Returns the service root.
    pub fn base_uri(&self) -> &Url {
        &self.service_root
    }

    /// Returns the URL convention.
    pub fn convention(&self) -> UrlConvention {
        self.convention
    }

    /// Returns the key serializer derived from the convention.
    pub fn key_serializer(&self) -> KeySerializer {
        self.key_serializer
    }

    /// `<base>/<entity set>`
    pub fn entity_set_uri(&self, base: &Url, name: &str) -> Url {
        self.with_segment(base, name)
    }

    /// `<base>(<keys>)` or `<base>/<key>`
    pub fn entity_instance_uri(
        &self,
        base: &Url,
        keys: &[(String, Value)],
        type_name: &str,
    ) -> Result<Url> {
        check_base(base);
        if keys.is_empty() {
            return Err(MetadataError::no_key_properties(type_name));
        }
        if let Some((name, _)) = keys.iter().find(|(_, value)| value.is_null()) {
            return Err(MetadataError::null_key_value(name, type_name));
        }

        let mut uri = base.clone();
        self.key_serializer.append_key_expression(&mut uri, keys, type_name)?;
        Ok(uri)
    }

    /// `<base>/<stream property>`, or `<base>/$value` for the default stream.
    pub fn stream_edit_link_uri(&self, base: &Url, stream_property: Option<&str>) -> Url {
        self.stream_uri(base, stream_property)
    }

    /// Same shape as [`stream_edit_link_uri`](Self::stream_edit_link_uri).
    pub fn stream_read_link_uri(&self, base: &Url, stream_property: Option<&str>) -> Url {
        self.stream_uri(base, stream_property)
    }

    /// `<base>/<navigation property>`
    pub fn navigation_link_uri(&self, base: &Url, navigation_property: &str) -> Url {
        self.with_segment(base, navigation_property)
    }

    /// `<base>/<navigation property>/$ref`
    pub fn association_link_uri(&self, base: &Url, navigation_property: &str) -> Url {
        let mut uri = self.with_segment(base, navigation_property);
        push_escaped_segment(&mut uri, ENTITY_REFERENCE_SEGMENT);
        uri
    }

    /// `<base>[/<binding type>]/<operation>`
    pub fn operation_target_uri(
        &self,
        base: &Url,
        operation_name: &str,
        binding_parameter_type_name: Option<&str>,
    ) -> Url {
        let mut uri = match binding_parameter_type_name.filter(|t| !t.is_empty()) {
            Some(type_name) => self.append_type_segment(base, type_name),
            None => base.clone(),
        };
        push_segment(&mut uri, operation_name);
        uri
    }

    /// `<base>/<type name>`
    pub fn append_type_segment(&self, base: &Url, type_name: &str) -> Url {
        self.with_segment(base, type_name)
    }

    /// Rebuilds the URI addressed by `segments`, starting from `base`.
    pub fn path_uri(&self, base: &Url, segments: &[PathSegment]) -> Result<Url> {
        check_base(base);
        let mut uri = base.clone();
        for segment in segments {
            log::trace!("appending path segment {:?}", segment);
            match segment {
                PathSegment::EntitySet { name, .. }
                | PathSegment::Singleton { name, .. }
                | PathSegment::NavigationProperty { name, .. } => push_segment(&mut uri, name),
                PathSegment::TypeCast { type_name } => push_segment(&mut uri, type_name),
                PathSegment::Key { keys, entity_type } => {
                    uri = self.entity_instance_uri(&uri, keys, entity_type)?;
                }
            }
        }
        Ok(uri)
    }

    fn stream_uri(&self, base: &Url, stream_property: Option<&str>) -> Url {
        match stream_property {
            Some(name) => self.with_segment(base, name),
            None => {
                check_base(base);
                let mut uri = base.clone();
                push_escaped_segment(&mut uri, DEFAULT_STREAM_SEGMENT);
                uri
            }
        }
    }

    fn with_segment(&self, base: &Url, segment: &str) -> Url {
        check_base(base);
        let mut uri = base.clone();
        push_segment(&mut uri, segment);
        uri
    }
}

fn check_base(base: &Url) {
    debug_assert!(!base.cannot_be_a_base(), "base URI must be absolute: {}", base);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edm::ODataPath;

    fn builder(convention: UrlConvention) -> ConventionalUriBuilder {
        ConventionalUriBuilder::new(Url::parse("http://host/service/").unwrap(), convention)
    }

    fn person(builder: &ConventionalUriBuilder) -> Url {
        let set = builder.entity_set_uri(builder.base_uri(), "People");
        builder
            .entity_instance_uri(&set, &[("Id".to_string(), Value::Int32(1))], "NS.Person")
            .unwrap()
    }

    #[test]
    fn test_entity_instance_uri() {
        assert_eq!(person(&builder(UrlConvention::Default)).as_str(), "http://host/service/People(1)");
        assert_eq!(person(&builder(UrlConvention::KeyAsSegment)).as_str(), "http://host/service/People/1");
    }

    #[test]
    fn test_entity_instance_uri_errors() {
        let b = builder(UrlConvention::Default);
        let set = b.entity_set_uri(b.base_uri(), "Logs");

        let err = b.entity_instance_uri(&set, &[], "NS.Log").unwrap_err();
        assert_eq!(err, MetadataError::no_key_properties("NS.Log"));

        let err = b
            .entity_instance_uri(&set, &[("Id".to_string(), Value::Null)], "NS.Log")
            .unwrap_err();
        assert_eq!(err, MetadataError::null_key_value("Id", "NS.Log"));
    }

    #[test]
    fn test_stream_links() {
        let b = builder(UrlConvention::Default);
        let base = person(&b);
        assert_eq!(b.stream_edit_link_uri(&base, None).as_str(), "http://host/service/People(1)/$value");
        assert_eq!(b.stream_read_link_uri(&base, Some("Photo")).as_str(), "http://host/service/People(1)/Photo");
    }

    #[test]
    fn test_navigation_and_association_links() {
        let b = builder(UrlConvention::Default);
        let base = person(&b);
        assert_eq!(b.navigation_link_uri(&base, "Trips").as_str(), "http://host/service/People(1)/Trips");
        assert_eq!(b.association_link_uri(&base, "Trips").as_str(), "http://host/service/People(1)/Trips/$ref");
    }

    #[test]
    fn test_operation_target_uri() {
        let b = builder(UrlConvention::Default);
        let base = person(&b);
        assert_eq!(
            b.operation_target_uri(&base, "NS.Promote", None).as_str(),
            "http://host/service/People(1)/NS.Promote"
        );
        assert_eq!(
            b.operation_target_uri(&base, "NS.Promote", Some("NS.Employee")).as_str(),
            "http://host/service/People(1)/NS.Employee/NS.Promote"
        );
        assert_eq!(
            b.operation_target_uri(&base, "NS.Promote", Some("")).as_str(),
            "http://host/service/People(1)/NS.Promote"
        );
    }

    #[test]
    fn test_escaped_names() {
        let b = builder(UrlConvention::Default);
        assert_eq!(
            b.entity_set_uri(b.base_uri(), "Order Lines").as_str(),
            "http://host/service/Order%20Lines"
        );
    }

    #[test]
    fn test_path_uri() {
        let b = builder(UrlConvention::Default);
        let path = ODataPath::new()
            .entity_set("People", "NS.Person")
            .key(vec![("Id".to_string(), Value::Int32(1))])
            .type_cast("NS.Employee")
            .navigation("Trips", "NS.Trip", true);

        let uri = b.path_uri(b.base_uri(), path.segments()).unwrap();
        assert_eq!(uri.as_str(), "http://host/service/People(1)/NS.Employee/Trips");
    }
}
