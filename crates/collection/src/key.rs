//! Collection keys.

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};
use std::fmt;

/// The key of a collection entry: an integer index or a string.
///
/// Strings holding the canonical decimal form of an `i64` are normalized to [`Key::Int`] on
/// conversion, so `Key::from("7") == Key::from(7)` while `"07"`, `"+7"` and `" 7"` stay strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// An integer index.
    Int(i64),
    /// A string key.
    Str(String),
}

impl Key {
    /// Returns `true` if this is an integer key.
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Returns the integer index, if this is an integer key.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(index) => Some(*index),
            Self::Str(_) => None,
        }
    }

    /// Returns the string, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(key) => Some(key),
        }
    }
}

/// Parses `s` as an integer only if it is written exactly as `i64::to_string` would write it.
fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let canonical = match digits.as_bytes() {
        [] => false,
        // "-0" is a string key
        [b'0'] => digits.len() == s.len(),
        [first, ..] => *first != b'0' && digits.bytes().all(|b| b.is_ascii_digit()),
    };
    if canonical { s.parse().ok() } else { None }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Self::Int(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Self::Int(index.into())
    }
}

impl From<u32> for Key {
    fn from(index: u32) -> Self {
        Self::Int(index.into())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        i64::try_from(index).map_or_else(|_| Self::Str(index.to_string()), Self::Int)
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        canonical_int(key).map_or_else(|| Self::Str(key.to_string()), Self::Int)
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        canonical_int(&key).map_or(Self::Str(key), Self::Int)
    }
}

impl From<&String> for Key {
    fn from(key: &String) -> Self {
        key.as_str().into()
    }
}

impl From<&Key> for Key {
    fn from(key: &Self) -> Self {
        key.clone()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(index) => index.fmt(f),
            Self::Str(key) => f.write_str(key),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(index) => serializer.serialize_i64(*index),
            Self::Str(key) => serializer.serialize_str(key),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or a string key")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Key, E> {
                Ok(Key::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Key, E> {
                i64::try_from(v).map(Key::Int).map_err(|_| E::custom(format!("key {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
                Ok(v.into())
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Key, E> {
                Ok(v.into())
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}
