//! Conversions to plain arrays and JSON.

use super::Collection;
use crate::{Array, Arrayable, JsonOptions, Result, Value, value::is_list};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de,
    ser::{SerializeMap, SerializeSeq},
};
use std::fmt;

impl<V: Arrayable> Collection<V> {
    /// Converts the collection into a plain array, recursively converting nested collections
    /// and objects that support it.
    pub fn to_array(&self) -> Array {
        self.items.iter().map(|(key, value)| (key.clone(), value.to_value())).collect()
    }

    /// Encodes [`Collection::to_array`] as JSON.
    ///
    /// The result is a JSON array when the keys are exactly `0..n` in order, and an object
    /// otherwise. NaN and infinite floats have no JSON form and fail with
    /// [`CollectionError::TypeMismatch`](crate::CollectionError::TypeMismatch).
    pub fn to_json(&self, options: JsonOptions) -> Result<String> {
        options.encode(&Value::Array(self.to_array()))
    }
}

impl Collection<Value> {
    /// Parses a JSON document into a collection.
    ///
    /// Arrays are keyed `0..n`, objects keep their keys in document order and `null` is the
    /// empty collection.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Compact JSON, as produced by [`Collection::to_json`] with default options, except that NaN
/// and infinite floats display as `null`.
impl<V: Arrayable> fmt::Display for Collection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json =
            JsonOptions::default().render(&Value::Array(self.to_array())).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<V: Serialize> Serialize for Collection<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if is_list(&self.items) {
            let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
            for value in self.items.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.items.len()))?;
            for (key, value) in &self.items {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

impl<'de> Deserialize<'de> for Collection<Value> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::new()),
            Value::Array(items) => Ok(items.into()),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(other.kind()),
                &"a JSON array or object",
            )),
        }
    }
}
