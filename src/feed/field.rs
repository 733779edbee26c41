//! Presence-aware field wrapper for the loosely-typed feed document.
//!
//! Feed producers routinely omit keys, send `null`, or put a string where a
//! list belongs. Rather than failing the whole load, every field is decoded
//! into a [`Field`], so rules can distinguish "absent" from "present but
//! malformed" and report the latter as an issue.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A single feed field: missing, well-typed, or present with the wrong shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Key not present in the document
    Absent,
    /// Key present and decoded as `T`
    Present(T),
    /// Key present but `null` or not decodable as `T`; keeps the raw value
    Malformed(Value),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True when the key exists, whatever its shape.
    pub fn is_set(&self) -> bool {
        !self.is_absent()
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// The decoded value, if the field is present and well-typed.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl Field<String> {
    pub fn as_str(&self) -> Option<&str> {
        self.get().map(String::as_str)
    }

    /// The text if present and not blank.
    pub fn non_empty(&self) -> Option<&str> {
        self.as_str().filter(|s| !s.trim().is_empty())
    }
}

impl<'de, T: Shape> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        if raw.is_null() || !T::admits(&raw) {
            return Ok(Self::Malformed(raw));
        }
        match T::deserialize(&raw) {
            Ok(value) => Ok(Self::Present(value)),
            Err(_) => Ok(Self::Malformed(raw)),
        }
    }
}

/// Types that can sit inside a [`Field`].
///
/// Derived struct deserializers accept JSON arrays positionally, so object
/// shaped entities override [`Shape::admits`] to reject anything that is not
/// a JSON object before decoding.
pub trait Shape: DeserializeOwned {
    fn admits(_raw: &Value) -> bool {
        true
    }
}

impl Shape for String {}
impl Shape for f64 {}
impl Shape for i64 {}
impl Shape for Value {}
impl<T: DeserializeOwned> Shape for Vec<T> {}
impl<T: DeserializeOwned> Shape for BTreeMap<String, T> {}

/// Mark feed entity structs as object-shaped.
macro_rules! object_shape {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::feed::field::Shape for $ty {
                fn admits(raw: &serde_json::Value) -> bool {
                    raw.is_object()
                }
            }
        )*
    };
}

pub(crate) use object_shape;

/// JSON type name for a raw value
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
