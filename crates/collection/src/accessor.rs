//! Deriving a value from each entry, for sorting and summing.

use crate::{Key, Value};
use std::{fmt, str::Split};

/// Derives a value from a collection entry.
///
/// Used by [`Collection::sort_by`](crate::Collection::sort_by) to compute sort keys and by
/// [`Collection::sum`](crate::Collection::sum) to compute the number contributed by each entry.
#[derive(Clone, Copy)]
pub enum Accessor<'a> {
    /// A dot-separated field path, e.g. `"author.name"`.
    ///
    /// Each segment looks up a field of an array or object; a missing field yields
    /// [`Value::Null`]. A segment applied to a scalar leaves the scalar unchanged.
    Path(&'a str),
    /// Invokes a zero-argument accessor on [`Value::Object`] entries through
    /// [`Object::call`](crate::Object::call). Any other entry yields [`Value::Null`].
    Method(&'a str),
    /// Calls the given function.
    With(&'a dyn Fn(&Value) -> Value),
}

impl Accessor<'_> {
    /// Derives the value for `value`.
    pub fn resolve(&self, value: &Value) -> Value {
        match self {
            Self::Path(path) => resolve_path(value, path.split('.')),
            Self::Method(method) => match value {
                Value::Object(object) => object.call(method).unwrap_or_default(),
                _ => Value::Null,
            },
            Self::With(f) => f(value),
        }
    }
}

fn resolve_path(value: &Value, mut segments: Split<'_, char>) -> Value {
    let Some(segment) = segments.next() else { return value.clone() };
    match value {
        Value::Array(items) => {
            items.get(&Key::from(segment)).map_or(Value::Null, |v| resolve_path(v, segments))
        }
        Value::Object(object) => {
            object.get(segment).map_or(Value::Null, |v| resolve_path(&v, segments))
        }
        _ => resolve_path(value, segments),
    }
}

impl fmt::Debug for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Method(method) => f.debug_tuple("Method").field(method).finish(),
            Self::With(_) => f.debug_tuple("With").finish_non_exhaustive(),
        }
    }
}

impl<'a> From<&'a str> for Accessor<'a> {
    fn from(path: &'a str) -> Self {
        Self::Path(path)
    }
}
