//! URI literal formatting

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use chrono::SecondsFormat;
use chrono::TimeDelta;

use crate::error::MetadataError;
use crate::error::Result;
use crate::model::Value;
use crate::model::types::Spatial;

/// The shape a literal takes, chosen by the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralFlavor {
    /// Type prefix and quotes where required, percent-encoded.
    Default,
    /// Type prefix and quotes where required, not encoded.
    DefaultWithoutEncoding,
    /// No prefix and no quotes, for keys written as path segments.
    Segment,
}

/// Formats scalar values as OData URI literals.
///
/// # Example
///
/// ```
/// use odata_metadata::model::Value;
/// use odata_metadata::uri::LiteralFormatter;
///
/// let constants = LiteralFormatter::for_constants();
/// assert_eq!(constants.format(&Value::Double(4.0)).unwrap(), "4.0");
/// assert_eq!(constants.format(&Value::from("it's")).unwrap(), "%27it%27%27s%27");
///
/// let segment = LiteralFormatter::for_keys(true);
/// assert_eq!(segment.format(&Value::from("$top")).unwrap(), "$$top");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralFormatter {
    flavor: LiteralFlavor,
}

impl LiteralFormatter {
    /// Creates a formatter for the given flavor.
    pub const fn new(flavor: LiteralFlavor) -> Self {
        Self { flavor }
    }

    /// Formatter for constants in query options.
    pub const fn for_constants() -> Self {
        Self::new(LiteralFlavor::Default)
    }

    /// Formatter for constants that are encoded later by the caller.
    pub const fn for_constants_without_encoding() -> Self {
        Self::new(LiteralFlavor::DefaultWithoutEncoding)
    }

    /// Formatter for key values.
    pub const fn for_keys(key_as_segment: bool) -> Self {
        if key_as_segment {
            Self::new(LiteralFlavor::Segment)
        } else {
            Self::new(LiteralFlavor::DefaultWithoutEncoding)
        }
    }

    /// Returns the flavor.
    pub fn flavor(&self) -> LiteralFlavor {
        self.flavor
    }

    /// Formats `value` as a literal.
    pub fn format(&self, value: &Value) -> Result<String> {
        let text = self.shape(value)?;
        Ok(match self.flavor {
            LiteralFlavor::Default => urlencoding::encode(&text).into_owned(),
            LiteralFlavor::DefaultWithoutEncoding => text,
            LiteralFlavor::Segment => {
                if text.starts_with('$') {
                    format!("${}", text)
                } else {
                    text
                }
            }
        })
    }

    fn is_segment(&self) -> bool {
        self.flavor == LiteralFlavor::Segment
    }

    /// Wraps `body` as `prefix'body'`, or leaves it bare for segments.
    fn prefixed(&self, prefix: &str, body: String) -> String {
        if self.is_segment() {
            body
        } else {
            format!("{}'{}'", prefix, body)
        }
    }

    fn shape(&self, value: &Value) -> Result<String> {
        let text = match value {
            Value::Bool(b) => b.to_string(),
            Value::Byte(n) => n.to_string(),
            Value::SByte(n) => n.to_string(),
            Value::Int16(n) => n.to_string(),
            Value::Int32(n) => n.to_string(),
            Value::Int64(n) => n.to_string(),
            Value::Single(n) => float_text(*n),
            Value::Double(n) => {
                let text = float_text(*n);
                // Integral doubles keep a trailing ".0" outside of segments.
                if !self.is_segment() && n.is_finite() && !text.contains(['.', 'e', 'E']) {
                    format!("{}.0", text)
                } else {
                    text
                }
            }
            Value::Decimal(d) => d.to_string(),
            Value::String(s) => {
                let doubled = s.replace('\'', "''");
                self.prefixed("", doubled)
            }
            Value::Binary(bytes) => self.prefixed("binary", URL_SAFE.encode(bytes)),
            Value::Guid(g) => g.hyphenated().to_string(),
            Value::DateTimeOffset(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::TimeOfDay(t) => t.format("%H:%M:%S%.f").to_string(),
            Value::Duration(d) => self.prefixed("duration", duration_text(*d)),
            Value::Enum { type_name, value } => self.prefixed(type_name, value.clone()),
            Value::Geography(s) => self.prefixed("geography", spatial_text(s)),
            Value::Geometry(s) => self.prefixed("geometry", spatial_text(s)),
            Value::Null | Value::Resource(_) | Value::Collection(_) | Value::Stream(_) => {
                return Err(MetadataError::UnformattableLiteral {
                    type_name: value.type_name(),
                });
            }
        };
        Ok(text)
    }
}

fn float_text<F>(n: F) -> String
where
    F: Copy + Into<f64> + std::fmt::Display + std::fmt::UpperExp,
{
    let wide: f64 = n.into();
    if wide.is_nan() {
        "NaN".to_string()
    } else if wide == f64::INFINITY {
        "INF".to_string()
    } else if wide == f64::NEG_INFINITY {
        "-INF".to_string()
    } else if wide != 0.0 && !(1e-5..1e15).contains(&wide.abs()) {
        // Very large or small magnitudes switch to exponent form, e.g. 1E+300.
        let text = format!("{:E}", n);
        match text.split_once('E') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}E+{}", mantissa, exp),
            _ => text,
        }
    } else {
        n.to_string()
    }
}

fn spatial_text(spatial: &Spatial) -> String {
    spatial.to_well_known_text()
}

/// Renders an ISO 8601 day-time duration, e.g. `P1DT2H30M5.5S`.
fn duration_text(duration: TimeDelta) -> String {
    if duration.is_zero() {
        return "PT0S".to_string();
    }

    let sign = if duration < TimeDelta::zero() { "-" } else { "" };
    let abs = duration.abs();
    let total = abs.num_seconds();
    let nanos = abs.subsec_nanos();

    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;

    let mut text = format!("{}P", sign);
    if days > 0 {
        text.push_str(&format!("{}D", days));
    }
    if hours > 0 || minutes > 0 || seconds > 0 || nanos > 0 {
        text.push('T');
        if hours > 0 {
            text.push_str(&format!("{}H", hours));
        }
        if minutes > 0 {
            text.push_str(&format!("{}M", minutes));
        }
        if seconds > 0 || nanos > 0 {
            text.push_str(&seconds.to_string());
            if nanos > 0 {
                let fraction = format!("{:09}", nanos);
                text.push('.');
                text.push_str(fraction.trim_end_matches('0'));
            }
            text.push('S');
        }
    }
    text
}
