//! URL conventions

use serde::Deserialize;
use serde::Serialize;

/// How entity keys are written into URIs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UrlConvention {
    /// `People(1)`, `Orders(A=1,B='x')`
    #[default]
    Default,
    /// `People/1` for single-property keys.
    KeyAsSegment,
}

impl UrlConvention {
    /// Parses an `ODataUrlConventions` header value.
    ///
    /// Matching is case-insensitive; unknown values fall back to `Default`.
    pub fn from_header_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("KeyAsSegment") {
            Self::KeyAsSegment
        } else {
            Self::Default
        }
    }

    /// Returns `true` if single-property keys are written as path segments.
    pub fn generate_key_as_segment(self) -> bool {
        matches!(self, Self::KeyAsSegment)
    }
}
