//! Value enum for resource property values

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::TimeDelta;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::Resource;
use super::types::Spatial;
use super::types::StreamReference;

/// A dynamic value held by a resource property.
///
/// Primitive variants can be rendered as URI literals; `Resource`,
/// `Collection` and `Stream` cannot, and are rejected wherever a key or
/// ETag value is required.
///
/// # Type Mapping
///
/// | EDM Type | Rust Variant |
/// |----------|--------------|
/// | null | `Null` |
/// | Edm.Boolean | `Bool` |
/// | Edm.Byte | `Byte` |
/// | Edm.SByte | `SByte` |
/// | Edm.Int16 / Int32 / Int64 | `Int16` / `Int32` / `Int64` |
/// | Edm.Single | `Single` |
/// | Edm.Double | `Double` |
/// | Edm.Decimal | `Decimal` |
/// | Edm.String | `String` |
/// | Edm.Binary | `Binary` |
/// | Edm.Guid | `Guid` |
/// | Edm.DateTimeOffset | `DateTimeOffset` |
/// | Edm.Date | `Date` |
/// | Edm.TimeOfDay | `TimeOfDay` |
/// | Edm.Duration | `Duration` |
/// | enum types | `Enum` |
/// | Edm.Geography* | `Geography` |
/// | Edm.Geometry* | `Geometry` |
/// | structured types | `Resource` |
/// | collections | `Collection` |
/// | Edm.Stream | `Stream` |
///
/// # Example
///
/// ```
/// use odata_metadata::model::Value;
///
/// let name = Value::from("Contoso");
/// let id = Value::from(42i32);
/// let empty = Value::Null;
/// assert!(id.is_primitive());
/// assert!(!empty.is_primitive());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Unsigned 8-bit integer.
    Byte(u8),
    /// Signed 8-bit integer.
    SByte(i8),
    /// 16-bit integer.
    Int16(i16),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
    /// 32-bit floating point.
    Single(f32),
    /// 64-bit floating point.
    Double(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Binary value.
    Binary(Vec<u8>),
    /// GUID value.
    Guid(Uuid),
    /// Date and time with offset.
    DateTimeOffset(DateTime<FixedOffset>),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    TimeOfDay(NaiveTime),
    /// Signed duration.
    Duration(TimeDelta),
    /// Enum member of a named enum type.
    Enum {
        /// Qualified enum type name.
        type_name: String,
        /// Member name (or comma separated flags).
        value: String,
    },
    /// Geographic spatial value.
    Geography(Spatial),
    /// Geometric spatial value.
    Geometry(Spatial),
    /// Nested structured value.
    Resource(Box<Resource>),
    /// Collection value.
    Collection(Vec<Value>),
    /// Stream reference.
    Stream(StreamReference),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a non-null primitive value.
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            Value::Null | Value::Resource(_) | Value::Collection(_) | Value::Stream(_)
        )
    }

    /// Returns `true` if this is a structured, collection or stream value.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            Value::Resource(_) | Value::Collection(_) | Value::Stream(_)
        )
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "Edm.Boolean",
            Value::Byte(_) => "Edm.Byte",
            Value::SByte(_) => "Edm.SByte",
            Value::Int16(_) => "Edm.Int16",
            Value::Int32(_) => "Edm.Int32",
            Value::Int64(_) => "Edm.Int64",
            Value::Single(_) => "Edm.Single",
            Value::Double(_) => "Edm.Double",
            Value::Decimal(_) => "Edm.Decimal",
            Value::String(_) => "Edm.String",
            Value::Binary(_) => "Edm.Binary",
            Value::Guid(_) => "Edm.Guid",
            Value::DateTimeOffset(_) => "Edm.DateTimeOffset",
            Value::Date(_) => "Edm.Date",
            Value::TimeOfDay(_) => "Edm.TimeOfDay",
            Value::Duration(_) => "Edm.Duration",
            Value::Enum { .. } => "enum",
            Value::Geography(_) => "Edm.Geography",
            Value::Geometry(_) => "Edm.Geometry",
            Value::Resource(_) => "resource",
            Value::Collection(_) => "collection",
            Value::Stream(_) => "Edm.Stream",
        }
    }

    /// Creates an enum value.
    pub fn enumeration(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Value::Enum {
            type_name: type_name.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Byte(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::SByte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Single(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::DateTimeOffset(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::TimeOfDay(v)
    }
}

impl From<TimeDelta> for Value {
    fn from(v: TimeDelta) -> Self {
        Value::Duration(v)
    }
}

impl From<Resource> for Value {
    fn from(v: Resource) -> Self {
        Value::Resource(Box::new(v))
    }
}

impl From<StreamReference> for Value {
    fn from(v: StreamReference) -> Self {
        Value::Stream(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
