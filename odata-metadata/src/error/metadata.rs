//! Metadata computation error types

/// Errors raised while computing entity metadata.
///
/// Every variant is terminal for the accessor that raised it: nothing is
/// retried or defaulted, and the first error encountered is the one surfaced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// The entity type resolves to zero key properties.
    #[error("Entity type '{type_name}' has no key properties")]
    EntityTypeWithNoKeyProperties {
        /// The qualified name of the entity type.
        type_name: String,
    },

    /// A key property holds a null value.
    #[error("Key property '{property}' of type '{type_name}' has a null value")]
    NullKeyValue {
        /// The key property name.
        property: String,
        /// The qualified name of the entity type.
        type_name: String,
    },

    /// A key or ETag property holds a structured or collection value.
    #[error("Key or ETag property '{property}' of type '{type_name}' must hold a primitive value")]
    NonPrimitiveKeyOrETagValue {
        /// The property name.
        property: String,
        /// The qualified name of the entity type.
        type_name: String,
    },

    /// A declared key or ETag property is absent from the resource.
    #[error("Property '{property}' declared on type '{type_name}' is not present on the resource")]
    PropertyNotFound {
        /// The property name.
        property: String,
        /// The qualified name of the entity type.
        type_name: String,
    },

    /// The resource type name is required but empty.
    #[error("Resource type name is required when no model is available")]
    MissingTypeName,

    /// The model has no type of the given name.
    #[error("Type '{type_name}' was not found in the model")]
    TypeNotFound {
        /// The qualified type name that failed to resolve.
        type_name: String,
    },

    /// A contained resource has no parent builder and no request path to derive its id from.
    #[error("Cannot compute the id of a contained resource without a parent id or request path")]
    MissingPathContext,

    /// The navigation source kind is unknown at id computation time.
    #[error("Navigation source metadata or serialization info is missing{}", source_suffix(.navigation_source))]
    UnknownNavigationSource {
        /// The navigation source name, if any.
        navigation_source: Option<String>,
    },

    /// A value has no defined URI literal form.
    #[error("Value of type '{type_name}' cannot be formatted as a URI literal")]
    UnformattableLiteral {
        /// The runtime type name of the value.
        type_name: &'static str,
    },

    /// An argument that must be non-empty was empty.
    #[error("Argument '{parameter}' must not be empty")]
    EmptyArgument {
        /// The parameter name.
        parameter: &'static str,
    },

    /// The configured service root cannot be used as a base URI.
    #[error("Invalid service root '{uri}': {reason}")]
    InvalidServiceRoot {
        /// The offending URI text.
        uri: String,
        /// Why it was rejected.
        reason: String,
    },
}

fn source_suffix(navigation_source: &Option<String>) -> String {
    match navigation_source {
        Some(name) => format!(" for '{}'", name),
        None => String::new(),
    }
}

impl MetadataError {
    /// Creates a missing key properties error.
    pub fn no_key_properties(type_name: impl Into<String>) -> Self {
        Self::EntityTypeWithNoKeyProperties {
            type_name: type_name.into(),
        }
    }

    /// Creates a null key value error.
    pub fn null_key_value(property: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::NullKeyValue {
            property: property.into(),
            type_name: type_name.into(),
        }
    }

    /// Creates a non-primitive key or ETag value error.
    pub fn non_primitive(property: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::NonPrimitiveKeyOrETagValue {
            property: property.into(),
            type_name: type_name.into(),
        }
    }

    /// Creates a property not found error.
    pub fn property_not_found(property: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::PropertyNotFound {
            property: property.into(),
            type_name: type_name.into(),
        }
    }

    /// Creates a type not found error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        Self::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Creates an invalid service root error.
    pub fn invalid_service_root(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidServiceRoot {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error was caused by the resource's own data
    /// (as opposed to missing model or request context).
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::NullKeyValue { .. }
                | Self::NonPrimitiveKeyOrETagValue { .. }
                | Self::PropertyNotFound { .. }
                | Self::MissingTypeName
                | Self::UnformattableLiteral { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = MetadataError::null_key_value("Id", "NS.Customer");
        assert_eq!(
            err.to_string(),
            "Key property 'Id' of type 'NS.Customer' has a null value"
        );

        let err = MetadataError::UnknownNavigationSource {
            navigation_source: Some("Orders".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Navigation source metadata or serialization info is missing for 'Orders'"
        );
    }

    #[test]
    fn test_is_data_error() {
        assert!(MetadataError::MissingTypeName.is_data_error());
        assert!(!MetadataError::MissingPathContext.is_data_error());
        assert!(!MetadataError::no_key_properties("NS.T").is_data_error());
    }
}
