//! Operations that derive a new collection from an existing one.

use super::Collection;
use crate::{Accessor, Array, CollectionError, Key, Result, Truthy, Value, value::Numeric};
use itertools::Itertools;
use std::collections::HashSet;

impl<V> Collection<V> {
    /// Returns the entries whose keys are listed in `keys`, in collection order.
    pub fn only<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Self
    where
        V: Clone,
    {
        let keys: HashSet<Key> = keys.into_iter().map(Into::into).collect();
        self.filter(|_, key| keys.contains(key))
    }

    /// Returns every entry except those whose keys are listed in `keys`.
    pub fn except<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Self
    where
        V: Clone,
    {
        let keys: HashSet<Key> = keys.into_iter().map(Into::into).collect();
        self.filter(|_, key| !keys.contains(key))
    }

    /// Returns every `step`-th value starting at position `offset`, keyed `0..n`.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn every(&self, step: usize, offset: usize) -> Self
    where
        V: Clone,
    {
        assert!(step > 0, "step must be non-zero");
        Self::from_values(
            self.items
                .values()
                .enumerate()
                .filter(|(position, _)| position % step == offset)
                .map(|(_, value)| value.clone()),
        )
    }

    /// Folds the values, in order, into a single value.
    pub fn reduce<T, F>(&self, f: F, initial: T) -> T
    where
        F: FnMut(T, &V) -> T,
    {
        self.items.values().fold(initial, f)
    }

    /// Returns the entries in reverse order. Integer keys are renumbered unless `preserve_keys`
    /// is set; string keys are always kept.
    pub fn reverse(&self, preserve_keys: bool) -> Self
    where
        V: Clone,
    {
        Self::from_entries(
            self.items.iter().rev().map(|(key, value)| (key.clone(), value.clone())),
            preserve_keys,
        )
    }

    /// Merges `others` into a copy of this collection.
    ///
    /// Sources are applied in order: an entry with a string key replaces the value of an
    /// earlier entry with the same key, keeping that entry's position. Entries with integer
    /// keys are appended and renumbered, including those of this collection, so the result's
    /// integer keys are `0..n` in order of appearance.
    pub fn merge<'a, I>(&'a self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        V: Clone + 'a,
    {
        let mut sources = 0usize;
        let entries = std::iter::once(self)
            .chain(others)
            .inspect(|_| sources += 1)
            .flat_map(|source| source.iter().map(|(key, value)| (key.clone(), value.clone())));
        let merged = Self::from_entries(entries, false);
        trace!(target: "collection", sources, entries = merged.count(), "merged collections");
        merged
    }

    /// Returns the entries for which `predicate` returns `true`, keeping their keys.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&V, &Key) -> bool,
        V: Clone,
    {
        self.items
            .iter()
            .filter(|&(key, value)| predicate(value, key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns the entries with truthy values.
    pub fn filter_truthy(&self) -> Self
    where
        V: Clone + Truthy,
    {
        self.filter(|value, _| value.is_truthy())
    }

    /// Returns the entries for which `predicate` returns `false`.
    pub fn reject<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&V, &Key) -> bool,
        V: Clone,
    {
        self.filter(|value, key| !predicate(value, key))
    }

    /// Transforms every value, keeping keys and order.
    pub fn map<U, F>(&self, mut f: F) -> Collection<U>
    where
        F: FnMut(&V, &Key) -> U,
    {
        let items = self.items.iter().map(|(key, value)| (key.clone(), f(value, key))).collect();
        Collection { items, next_index: self.next_index }
    }

    /// Returns a slice of the entries.
    ///
    /// A negative `offset` counts from the end. A `length` of `None` runs to the end, a
    /// negative one stops that many entries before the end. Integer keys are renumbered unless
    /// `preserve_keys` is set; string keys are always kept.
    pub fn slice(&self, offset: isize, length: Option<isize>, preserve_keys: bool) -> Self
    where
        V: Clone,
    {
        let len = self.items.len() as isize;
        let start = if offset < 0 { (len + offset).max(0) } else { offset.min(len) };
        let end = match length {
            None => len,
            Some(length) if length < 0 => len + length,
            Some(length) => start.saturating_add(length).min(len),
        }
        .max(start);

        Self::from_entries(
            self.items
                .iter()
                .skip(start as usize)
                .take((end - start) as usize)
                .map(|(key, value)| (key.clone(), value.clone())),
            preserve_keys,
        )
    }

    /// Splits the entries into consecutive collections of at most `size` entries.
    ///
    /// Each chunk is keyed `0..n` unless `preserve_keys` is set, in which case the chunks keep
    /// the original keys.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn chunk(&self, size: usize, preserve_keys: bool) -> Collection<Self>
    where
        V: Clone,
    {
        assert!(size > 0, "chunk size must be non-zero");
        let chunks = self.items.iter().chunks(size);
        let chunked = Collection::from_values(chunks.into_iter().map(|chunk| {
            let entries = chunk.map(|(key, value)| (key.clone(), value.clone()));
            if preserve_keys {
                entries.collect::<Self>()
            } else {
                Self::from_values(entries.map(|(_, value)| value))
            }
        }));
        trace!(target: "collection", size, chunks = chunked.count(), "chunked collection");
        chunked
    }
}

impl Collection<Value> {
    /// Swaps keys and values.
    ///
    /// Fails with [`CollectionError::TypeMismatch`] if a value is neither an integer nor a
    /// string. When values repeat, the last key wins, in the position of the first.
    pub fn flip(&self) -> Result<Self> {
        let mut flipped = Self::new();
        for (key, value) in &self.items {
            let new_key = match value {
                Value::Int(index) => Key::Int(*index),
                Value::String(s) => Key::from(s.as_str()),
                other => {
                    return Err(CollectionError::type_mismatch(
                        "flip",
                        format!("a value of type {} into a key", other.kind()),
                    ));
                }
            };
            flipped.put(new_key, key.clone().into());
        }
        Ok(flipped)
    }

    /// Returns the entries whose values are not loosely equal to `value`.
    pub fn reject_value(&self, value: &Value) -> Self {
        self.reject(|candidate, _| candidate.loose_eq(value))
    }

    /// Returns `value[field]` for every entry, or null where the entry has no such field.
    pub fn lists(&self, field: &str) -> Vec<Value> {
        self.items.values().map(|value| value.field(field).unwrap_or_default()).collect()
    }

    /// Extracts the `value` field of every entry that has one.
    ///
    /// With a `key` field, each extracted value is stored under that entry's `key` field when
    /// it is an integer or string, and appended otherwise. Without one, values are keyed
    /// `0..n`. Later entries overwrite earlier ones with the same key. A value that would be
    /// appended after the key `i64::MAX` is skipped.
    pub fn pluck(&self, value: &str, key: Option<&str>) -> Array {
        let mut plucked = Self::new();
        for row in self.items.values() {
            let Some(extracted) = row.field(value) else { continue };
            match key.and_then(|key| row.field(key)) {
                Some(Value::Int(index)) => plucked.put(index, extracted),
                Some(Value::String(s)) => plucked.put(s, extracted),
                _ => {
                    if let Err(err) = plucked.push(extracted) {
                        debug!(target: "collection", %err, "skipped plucked value");
                    }
                }
            }
        }
        plucked.into_inner()
    }

    /// Sums the values, or the values derived from each entry by `accessor`.
    ///
    /// Null counts as `0` and bools as `0` or `1`; numeric strings are parsed. Any other value
    /// fails with [`CollectionError::TypeMismatch`]. The result is an integer unless a float
    /// was involved or the integer sum overflowed.
    pub fn sum(&self, accessor: Option<Accessor<'_>>) -> Result<Value> {
        self.items
            .values()
            .try_fold(Numeric::Int(0), |total, value| {
                let number = match accessor {
                    Some(accessor) => accessor.resolve(value).to_number("sum")?,
                    None => value.to_number("sum")?,
                };
                Ok::<_, CollectionError>(total.add(number))
            })
            .map(Numeric::into_value)
    }
}
