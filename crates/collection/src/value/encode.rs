//! Serde support for [`Value`].

use super::{Array, Value};
use crate::{CollectionError, Key};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
};
use std::fmt;

/// Returns `true` if the keys of `items` are exactly `0..len`, in order.
pub(crate) fn is_list<'a, V: 'a>(items: impl IntoIterator<Item = (&'a Key, V)>) -> bool {
    items.into_iter().enumerate().all(|(i, (key, _))| i64::try_from(i).is_ok_and(|i| *key == Key::Int(i)))
}

/// Fails with [`CollectionError::TypeMismatch`] if `value` holds a NaN or infinite float,
/// including inside arrays and the array form of objects.
pub(crate) fn ensure_finite(value: &Value) -> Result<(), CollectionError> {
    match value {
        Value::Float(n) if !n.is_finite() => Err(CollectionError::type_mismatch(
            "encode",
            format!("non-finite float {n} as JSON"),
        )),
        Value::Array(items) => items.values().try_for_each(ensure_finite),
        Value::Object(object) => {
            object.to_array().map_or(Ok(()), |items| items.values().try_for_each(ensure_finite))
        }
        _ => Ok(()),
    }
}

/// Serializes a [`Value`], encoding lists as sequences unless `force_object` is set.
///
/// Objects serialize through their array form when they have one, and as an empty map
/// otherwise. NaN and infinite floats serialize as `null`; [`ensure_finite`] rejects them up
/// front where that matters.
pub(crate) struct Json<'a> {
    pub(crate) value: &'a Value,
    pub(crate) force_object: bool,
}

impl<'a> Json<'a> {
    fn nested(&self, value: &'a Value) -> Self {
        Self { value, force_object: self.force_object }
    }

    fn serialize_array<S: Serializer>(&self, items: &Array, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.force_object && is_list(items) {
            let mut seq = serializer.serialize_seq(Some(items.len()))?;
            for value in items.values() {
                seq.serialize_element(&self.nested(value))?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(items.len()))?;
            for (key, value) in items {
                map.serialize_entry(key, &self.nested(value))?;
            }
            map.end()
        }
    }
}

impl Serialize for Json<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => self.serialize_array(items, serializer),
            Value::Object(object) => match object.to_array() {
                Some(items) => self.serialize_array(&items, serializer),
                None => serializer.serialize_map(Some(0))?.end(),
            },
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Json { value: self, force_object: false }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("any JSON value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
                Value::deserialize(deserializer)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
                Ok(Value::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
                Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
                Ok(Value::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
                Ok(Value::String(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
                Ok(Value::String(v))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
                let mut items = Array::with_capacity(seq.size_hint().unwrap_or_default());
                while let Some(value) = seq.next_element()? {
                    items.insert(Key::from(items.len()), value);
                }
                Ok(Value::Array(items))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
                let mut items = Array::with_capacity(map.size_hint().unwrap_or_default());
                while let Some((key, value)) = map.next_entry::<Key, Value>()? {
                    items.insert(key, value);
                }
                Ok(Value::Array(items))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
