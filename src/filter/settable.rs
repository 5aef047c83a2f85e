use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FilterError;

/// A schema attribute value that may not have been supplied at all.
///
/// `Unset` means "not supplied" and is distinct from every domain value,
/// including `None`: a `Settable<Option<T>>` is `Unset`, `Set(None)` or
/// `Set(Some(v))`.
///
/// With serde, `Set(v)` serializes as `v`. Mark fields `#[serde(default)]`
/// so a missing key deserializes to `Unset`; a present key, even `null`,
/// becomes `Set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Settable<T> {
    Unset,
    Set(T),
}

impl<T> Default for Settable<T> {
    fn default() -> Self {
        Settable::Unset
    }
}

impl<T> Settable<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Settable::Set(_))
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Settable::Unset)
    }

    pub fn as_ref(&self) -> Settable<&T> {
        match self {
            Settable::Set(v) => Settable::Set(v),
            Settable::Unset => Settable::Unset,
        }
    }

    /// The value, or `None` when unset
    pub fn get(&self) -> Option<&T> {
        match self {
            Settable::Set(v) => Some(v),
            Settable::Unset => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Settable::Set(v) => Some(v),
            Settable::Unset => None,
        }
    }

    /// The value of a field that must have been supplied
    pub fn require(&self, field: &str) -> Result<&T, FilterError> {
        self.get().ok_or_else(|| FilterError::Unset {
            field: field.to_string(),
        })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Settable<U> {
        match self {
            Settable::Set(v) => Settable::Set(f(v)),
            Settable::Unset => Settable::Unset,
        }
    }

    /// `None` becomes `Unset`, anything else is `Set`
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Settable::Unset, Settable::Set)
    }
}

impl<T> From<Option<T>> for Settable<T> {
    fn from(value: Option<T>) -> Self {
        Settable::from_option(value)
    }
}

impl<T: Serialize> Serialize for Settable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Settable::Set(v) => v.serialize(serializer),
            Settable::Unset => serializer.serialize_unit(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Settable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Settable::Set)
    }
}
