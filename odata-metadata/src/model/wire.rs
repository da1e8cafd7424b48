//! Tri-state wire values

/// A value that may have been supplied explicitly on the wire or by the user.
///
/// `Unset` means nothing was supplied and the value may be computed.
/// `Null` means the value was explicitly set to null, which wins over any
/// computed value just like `Value` does.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WireValue<T> {
    /// Not supplied.
    #[default]
    Unset,
    /// Explicitly supplied as null.
    Null,
    /// Explicitly supplied value.
    Value(T),
}

impl<T> WireValue<T> {
    /// Returns `true` if a value (including an explicit null) was supplied.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Returns the supplied value, if it is not null.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }

    /// Returns `None` when unset, otherwise the explicit value or explicit null.
    pub fn explicit(&self) -> Option<Option<&T>> {
        match self {
            Self::Unset => None,
            Self::Null => Some(None),
            Self::Value(v) => Some(Some(v)),
        }
    }

    /// Converts from `&WireValue<T>` to `WireValue<&T>`.
    pub fn as_ref(&self) -> WireValue<&T> {
        match self {
            Self::Unset => WireValue::Unset,
            Self::Null => WireValue::Null,
            Self::Value(v) => WireValue::Value(v),
        }
    }
}

impl<T: Clone> WireValue<T> {
    /// Returns the explicit value if one was supplied, otherwise computes it.
    pub fn or_compute<E>(
        &self,
        compute: impl FnOnce() -> Result<Option<T>, E>,
    ) -> Result<Option<T>, E> {
        match self {
            Self::Unset => compute(),
            Self::Null => Ok(None),
            Self::Value(v) => Ok(Some(v.clone())),
        }
    }
}

impl<T> From<Option<T>> for WireValue<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => Self::Value(inner),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_null_is_set() {
        let unset: WireValue<i32> = WireValue::Unset;
        let null: WireValue<i32> = WireValue::Null;
        let value = WireValue::Value(3);

        assert!(!unset.is_set());
        assert!(null.is_set());
        assert_eq!(null.explicit(), Some(None));
        assert_eq!(value.explicit(), Some(Some(&3)));
        assert_eq!(unset.explicit(), None);
    }

    #[test]
    fn test_or_compute_only_runs_when_unset() {
        let computed: Result<Option<i32>, ()> = WireValue::Unset.or_compute(|| Ok(Some(7)));
        assert_eq!(computed, Ok(Some(7)));

        let explicit: Result<Option<i32>, ()> =
            WireValue::Null.or_compute(|| panic!("must not compute"));
        assert_eq!(explicit, Ok(None));
    }
}
