//! The dynamic value stored in a [`Collection`].

use crate::{Collection, CollectionError, Key, Result};
use indexmap::IndexMap;
use std::{borrow::Cow, cmp::Ordering, fmt, sync::Arc};

mod encode;
pub(crate) use encode::{Json, ensure_finite, is_list};

/// A plain ordered array: the structure produced by [`Collection::to_array`].
pub type Array = IndexMap<Key, Value>;

/// A user-defined type that can be stored inside a [`Value`].
///
/// Every method is optional. Implement [`Object::get`] to expose fields to dot paths,
/// [`Object::call`] to expose zero-argument accessors to [`Accessor::Method`](crate::Accessor),
/// and [`Object::to_array`] to have [`Collection::to_array`] convert the object into a plain
/// array.
pub trait Object: fmt::Debug + Send + Sync {
    /// Returns the field named `field`.
    fn get(&self, field: &str) -> Option<Value> {
        let _ = field;
        None
    }

    /// Invokes the zero-argument accessor named `method`.
    fn call(&self, method: &str) -> Option<Value> {
        let _ = method;
        None
    }

    /// Converts the object into a plain array, if it supports that.
    fn to_array(&self) -> Option<Array> {
        None
    }
}

/// Types that can be converted into a plain [`Value`] by [`Collection::to_array`].
///
/// Nested collections implement this by converting themselves into [`Value::Array`], which is
/// how `to_array` reaches collections inside collections.
pub trait Arrayable {
    /// Returns the plain representation of `self`.
    fn to_value(&self) -> Value;
}

/// Truthiness, as used by [`Collection::filter_truthy`] and [`Collection::pull`].
pub trait Truthy {
    /// Returns `false` for "empty" values: `null`, `false`, `0`, `0.0`, `""`, `"0"` and empty
    /// arrays.
    fn is_truthy(&self) -> bool;
}

/// A dynamically typed value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered array with integer and/or string keys.
    Array(Array),
    /// A user-defined object.
    Object(Arc<dyn Object>),
}

impl Value {
    /// Wraps `object` in a [`Value::Object`].
    pub fn object(object: impl Object + 'static) -> Self {
        Self::Object(Arc::new(object))
    }

    /// Returns the name of this value's type, as used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is a [`Value::Bool`].
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is a [`Value::Int`].
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as a float, if this is a [`Value::Int`] or a [`Value::Float`].
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string, if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the array, if this is a [`Value::Array`].
    pub const fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the field `field` of an array or object value.
    pub fn field(&self, field: &str) -> Option<Value> {
        match self {
            Self::Array(items) => items.get(&Key::from(field)).cloned(),
            Self::Object(object) => object.get(field),
            _ => None,
        }
    }

    /// Loose equality.
    ///
    /// Numbers and numeric strings compare by numeric value, a bool or null operand compares by
    /// truthiness (except null against a string, which only equals `""`), arrays compare entry
    /// by entry regardless of order, and objects only equal themselves.
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::String(s)) | (Self::String(s), Self::Null) => s.is_empty(),
            (Self::Null | Self::Bool(_), _) | (_, Self::Null | Self::Bool(_)) => {
                self.is_truthy() == other.is_truthy()
            }
            (Self::Array(a), Self::Array(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| b.get(key).is_some_and(|v| value.loose_eq(v)))
            }
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (Self::Array(_) | Self::Object(_), _) | (_, Self::Array(_) | Self::Object(_)) => false,
            _ => self.try_cmp(other).is_ok_and(Ordering::is_eq),
        }
    }

    /// Regular ordering between two values.
    ///
    /// Numbers and numeric strings compare numerically, other scalar pairs compare as strings,
    /// and a bool or null operand compares by truthiness (null against a string compares as
    /// `""`). Arrays compare by length, then entry by entry.
    ///
    /// Objects, arrays against scalars, arrays with different keys and `NaN` are incomparable
    /// and produce a [`CollectionError::TypeMismatch`].
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        let incomparable = || {
            CollectionError::type_mismatch(
                "compare",
                format!("a value of type {} with a value of type {}", self.kind(), other.kind()),
            )
        };
        match (self, other) {
            (Self::Null, Self::Null) => Ok(Ordering::Equal),
            (Self::Null, Self::String(s)) => Ok("".cmp(s.as_str())),
            (Self::String(s), Self::Null) => Ok(s.as_str().cmp("")),
            (Self::Null | Self::Bool(_), _) | (_, Self::Null | Self::Bool(_)) => {
                Ok(self.is_truthy().cmp(&other.is_truthy()))
            }
            (Self::Array(a), Self::Array(b)) => cmp_arrays(a, b),
            (Self::Object(a), Self::Object(b)) if Arc::ptr_eq(a, b) => Ok(Ordering::Equal),
            (Self::Array(_) | Self::Object(_), _) | (_, Self::Array(_) | Self::Object(_)) => {
                Err(incomparable())
            }
            _ => match (self.numeric(), other.numeric()) {
                (Some(a), Some(b)) => a.partial_cmp(b).ok_or_else(incomparable),
                _ => Ok(self.scalar_string().cmp(&other.scalar_string())),
            },
        }
    }

    /// The numeric value of a number or numeric string.
    pub(crate) fn numeric(&self) -> Option<Numeric> {
        match self {
            Self::Int(n) => Some(Numeric::Int(*n)),
            Self::Float(n) => Some(Numeric::Float(*n)),
            Self::String(s) => parse_numeric(s),
            _ => None,
        }
    }

    /// Coerces this value to a number for arithmetic: null is `0`, bools are `0` or `1`.
    pub(crate) fn to_number(&self, operation: &'static str) -> Result<Numeric> {
        match self {
            Self::Null => Ok(Numeric::Int(0)),
            Self::Bool(b) => Ok(Numeric::Int((*b).into())),
            Self::String(s) => parse_numeric(s).ok_or_else(|| {
                CollectionError::type_mismatch(operation, format!("non-numeric string {s:?}"))
            }),
            _ => self.numeric().ok_or_else(|| {
                CollectionError::type_mismatch(operation, format!("a value of type {}", self.kind()))
            }),
        }
    }

    /// The string form of a scalar value, `None` for arrays and objects.
    pub(crate) fn scalar_string(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null | Self::Bool(false) => Some(Cow::Borrowed("")),
            Self::Bool(true) => Some(Cow::Borrowed("1")),
            Self::Int(n) => Some(Cow::Owned(n.to_string())),
            Self::Float(n) => Some(Cow::Owned(n.to_string())),
            Self::String(s) => Some(Cow::Borrowed(s)),
            Self::Array(_) | Self::Object(_) => None,
        }
    }
}

fn cmp_arrays(a: &Array, b: &Array) -> Result<Ordering> {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        ordering => return Ok(ordering),
    }
    for (key, left) in a {
        let Some(right) = b.get(key) else {
            return Err(CollectionError::type_mismatch(
                "compare",
                format!("arrays with different keys (`{key}` is missing)"),
            ));
        };
        match left.try_cmp(right)? {
            Ordering::Equal => {}
            ordering => return Ok(ordering),
        }
    }
    Ok(Ordering::Equal)
}

/// A number produced by numeric coercion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub(crate) const fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(n) => n,
        }
    }

    /// Adds two numbers, promoting to float on integer overflow.
    pub(crate) fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => {
                a.checked_add(b).map_or_else(|| Self::Float(a as f64 + b as f64), Self::Int)
            }
            (a, b) => Self::Float(a.as_f64() + b.as_f64()),
        }
    }

    pub(crate) const fn into_value(self) -> Value {
        match self {
            Self::Int(n) => Value::Int(n),
            Self::Float(n) => Value::Float(n),
        }
    }

    pub(crate) fn partial_cmp(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

/// Parses a numeric string: optional surrounding whitespace, an optional sign, digits with an
/// optional fraction, and an optional exponent.
pub(crate) fn parse_numeric(s: &str) -> Option<Numeric> {
    let trimmed = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'));
    let unsigned = trimmed.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(trimmed);
    let (mantissa, exponent) = match unsigned.split_once(|c: char| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let (int_part, fraction) = match mantissa.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (mantissa, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let fraction_len = fraction.map_or(0, str::len);
    if int_part.len() + fraction_len == 0
        || !all_digits(int_part)
        || !fraction.is_none_or(all_digits)
    {
        return None;
    }
    if let Some(exponent) = exponent {
        let digits = exponent.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(exponent);
        if digits.is_empty() || !all_digits(digits) {
            return None;
        }
    }

    if fraction.is_none() && exponent.is_none() {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(Numeric::Int(n));
        }
    }
    trimmed.parse::<f64>().ok().map(Numeric::Float)
}

/// Strict equality: same variant and same contents, in the same order. Objects are equal only
/// to themselves.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a.len() == b.len() && a.iter().eq(b.iter()),
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(n) => *n != 0.0,
            Self::String(s) => !s.is_empty() && s != "0",
            Self::Array(items) => !items.is_empty(),
            Self::Object(_) => true,
        }
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for i64 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty() && self != "0"
    }
}

impl Truthy for &str {
    fn is_truthy(&self) -> bool {
        !self.is_empty() && *self != "0"
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(T::is_truthy)
    }
}

impl<V> Truthy for Collection<V> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Arrayable for Value {
    fn to_value(&self) -> Value {
        match self {
            Self::Object(object) => object.to_array().map_or_else(|| self.clone(), Self::Array),
            _ => self.clone(),
        }
    }
}

impl<V: Arrayable> Arrayable for Collection<V> {
    fn to_value(&self) -> Value {
        Value::Array(self.to_array())
    }
}

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v.into())
            }
        }

        impl Arrayable for $ty {
            fn to_value(&self) -> Value {
                Value::from(self.clone())
            }
        }
    )*};
}

scalar_conversions! {
    bool => Bool,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f64 => Float,
    String => String,
    &str => String,
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(Collection::from_values(values.into_iter().map(Into::into)).into_inner())
    }
}

impl From<Array> for Value {
    fn from(items: Array) -> Self {
        Self::Array(items)
    }
}

impl<V: Arrayable> From<Collection<V>> for Value {
    fn from(collection: Collection<V>) -> Self {
        collection.to_value()
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(index) => Self::Int(index),
            Key::Str(key) => Self::String(key),
        }
    }
}

impl From<Arc<dyn Object>> for Value {
    fn from(object: Arc<dyn Object>) -> Self {
        Self::Object(object)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(n) => Self::Int(n),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(values) => values.into(),
            serde_json::Value::Object(object) => {
                Self::Array(object.into_iter().map(|(k, v)| (Key::from(k), v.into())).collect())
            }
        }
    }
}
