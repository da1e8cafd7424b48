//! Service configuration

use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::error::MetadataError;
use crate::error::Result;
use crate::uri::UrlConvention;

/// Per-service settings shared by every metadata builder of that service.
///
/// # Example
///
/// ```
/// use odata_metadata::config::ServiceConfig;
/// use odata_metadata::uri::UrlConvention;
///
/// let config = ServiceConfig::new("http://host/service")
///     .unwrap()
///     .with_url_convention(UrlConvention::KeyAsSegment);
///
/// assert_eq!(config.service_root().as_str(), "http://host/service/");
/// assert_eq!(config.metadata_document_uri().as_str(), "http://host/service/$metadata");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawServiceConfig")]
pub struct ServiceConfig {
    /// The service root, always ending in `/`.
    service_root: Url,

    /// How keys are written into URIs.
    ///
    /// Default: parenthesized keys
    url_convention: UrlConvention,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawServiceConfig {
    service_root: String,
    #[serde(default)]
    url_convention: UrlConvention,
}

impl TryFrom<RawServiceConfig> for ServiceConfig {
    type Error = MetadataError;

    fn try_from(raw: RawServiceConfig) -> Result<Self> {
        Ok(Self::new(&raw.service_root)?.with_url_convention(raw.url_convention))
    }
}

impl ServiceConfig {
    /// Creates a config for the service rooted at `service_root`.
    ///
    /// The root must be an absolute base URI; a trailing slash is added if
    /// missing.
    pub fn new(service_root: &str) -> Result<Self> {
        let mut url = Url::parse(service_root)
            .map_err(|e| MetadataError::invalid_service_root(service_root, e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(MetadataError::invalid_service_root(
                service_root,
                "not a base URI",
            ));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            service_root: url,
            url_convention: UrlConvention::default(),
        })
    }

    /// Sets the URL convention.
    pub fn with_url_convention(mut self, convention: UrlConvention) -> Self {
        self.url_convention = convention;
        self
    }

    /// Returns the service root.
    pub fn service_root(&self) -> &Url {
        &self.service_root
    }

    /// Returns the URL convention.
    pub fn url_convention(&self) -> UrlConvention {
        self.url_convention
    }

    /// Returns `<service root>/$metadata`.
    pub fn metadata_document_uri(&self) -> Url {
        let mut url = self.service_root.clone();
        let path = format!("{}$metadata", url.path());
        url.set_path(&path);
        url
    }
}
