//! Key expression serialization

use url::Url;

use super::LiteralFormatter;
use super::UrlConvention;
use super::escape::escape_segment;
use super::escape::push_escaped_segment;
use super::escape::push_to_last_segment;
use crate::error::MetadataError;
use crate::error::Result;
use crate::model::Value;

/// Renders entity keys as `(lit)`, `(A=lit,B=lit)` or `/lit`.
///
/// Segment keys are only defined for single-property keys; composite keys
/// always use the parenthesized form.
///
/// # Example
///
/// ```
/// use odata_metadata::model::Value;
/// use odata_metadata::uri::{KeySerializer, UrlConvention};
///
/// let keys = vec![("Id".to_string(), Value::Int32(7))];
///
/// let parens = KeySerializer::new(UrlConvention::Default);
/// assert_eq!(parens.key_expression(&keys, "NS.Person").unwrap(), "(7)");
///
/// let segment = KeySerializer::new(UrlConvention::KeyAsSegment);
/// assert_eq!(segment.key_expression(&keys, "NS.Person").unwrap(), "/7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySerializer {
    key_as_segment: bool,
}

impl KeySerializer {
    /// Creates a serializer for the given convention.
    pub const fn new(convention: UrlConvention) -> Self {
        Self {
            key_as_segment: matches!(convention, UrlConvention::KeyAsSegment),
        }
    }

    /// Returns the escaped key expression for `keys`.
    ///
    /// `type_name` is only used to describe failures.
    pub fn key_expression(&self, keys: &[(String, Value)], type_name: &str) -> Result<String> {
        match keys {
            [] => Err(MetadataError::no_key_properties(type_name)),
            [(name, value)] if self.key_as_segment => {
                let literal = format_key(LiteralFormatter::for_keys(true), name, value, type_name)?;
                Ok(format!("/{}", literal))
            }
            [(name, value)] => {
                let literal = format_key(LiteralFormatter::for_keys(false), name, value, type_name)?;
                Ok(format!("({})", literal))
            }
            _ => {
                let formatter = LiteralFormatter::for_keys(false);
                let pairs = keys
                    .iter()
                    .map(|(name, value)| {
                        let literal = format_key(formatter, name, value, type_name)?;
                        Ok(format!("{}={}", escape_segment(name), literal))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("({})", pairs.join(",")))
            }
        }
    }

    /// Appends the key expression for `keys` to `uri`.
    pub fn append_key_expression(
        &self,
        uri: &mut Url,
        keys: &[(String, Value)],
        type_name: &str,
    ) -> Result<()> {
        let expression = self.key_expression(keys, type_name)?;
        match expression.strip_prefix('/') {
            Some(segment) => push_escaped_segment(uri, segment),
            None => push_to_last_segment(uri, &expression),
        }
        Ok(())
    }
}

fn format_key(formatter: LiteralFormatter, name: &str, value: &Value, type_name: &str) -> Result<String> {
    if value.is_null() {
        return Err(MetadataError::null_key_value(name, type_name));
    }
    Ok(escape_segment(&formatter.format(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composite() -> Vec<(String, Value)> {
        vec![
            ("A".to_string(), Value::Int32(1)),
            ("B".to_string(), Value::from("x")),
        ]
    }

    #[test]
    fn test_single_key() {
        let keys = vec![("Name".to_string(), Value::from("O'Neil"))];
        let parens = KeySerializer::new(UrlConvention::Default);
        let segment = KeySerializer::new(UrlConvention::KeyAsSegment);

        assert_eq!(parens.key_expression(&keys, "NS.T").unwrap(), "('O''Neil')");
        assert_eq!(segment.key_expression(&keys, "NS.T").unwrap(), "/O''Neil");
    }

    #[test]
    fn test_composite_key_falls_back_to_parentheses() {
        let parens = KeySerializer::new(UrlConvention::Default);
        let segment = KeySerializer::new(UrlConvention::KeyAsSegment);

        assert_eq!(parens.key_expression(&composite(), "NS.T").unwrap(), "(A=1,B='x')");
        assert_eq!(segment.key_expression(&composite(), "NS.T").unwrap(), "(A=1,B='x')");
    }

    #[test]
    fn test_key_values_are_escaped() {
        let keys = vec![("Path".to_string(), Value::from("a/b c"))];
        let parens = KeySerializer::new(UrlConvention::Default);
        assert_eq!(parens.key_expression(&keys, "NS.T").unwrap(), "('a%2Fb%20c')");
    }

    #[test]
    fn test_null_key_value() {
        let keys = vec![("A".to_string(), Value::Int32(1)), ("B".to_string(), Value::Null)];
        let err = KeySerializer::new(UrlConvention::Default)
            .key_expression(&keys, "NS.T")
            .unwrap_err();
        assert_eq!(err, MetadataError::null_key_value("B", "NS.T"));
    }

    #[test]
    fn test_no_keys() {
        let err = KeySerializer::new(UrlConvention::Default)
            .key_expression(&[], "NS.T")
            .unwrap_err();
        assert_eq!(err, MetadataError::no_key_properties("NS.T"));
    }

    #[test]
    fn test_append_key_expression() {
        let mut uri = Url::parse("http://host/service/People").unwrap();
        KeySerializer::new(UrlConvention::KeyAsSegment)
            .append_key_expression(&mut uri, &[("Id".to_string(), Value::Int32(1))], "NS.Person")
            .unwrap();
        assert_eq!(uri.as_str(), "http://host/service/People/1");

        let mut uri = Url::parse("http://host/service/People").unwrap();
        KeySerializer::new(UrlConvention::Default)
            .append_key_expression(&mut uri, &composite(), "NS.Person")
            .unwrap();
        assert_eq!(uri.as_str(), "http://host/service/People(A=1,B='x')");
    }
}
