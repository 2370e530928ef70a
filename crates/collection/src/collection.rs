//! The [`Collection`] type: construction, access and in-place mutation.

use crate::{CollectionError, Key, Result, Truthy, Value};
use indexmap::{IndexMap, map};
use std::ops::{ControlFlow, Index, IndexMut};

mod json;
mod sort;
mod transform;

/// An ordered key-value collection.
///
/// Entries keep their insertion order. Re-inserting an existing key replaces its value in
/// place. Integer keys handed out by [`Collection::push`] continue after the largest integer
/// key the collection has held.
#[derive(Clone, Debug)]
pub struct Collection<V = Value> {
    items: IndexMap<Key, V>,
    /// The key the next [`Collection::push`] uses, `None` once `i64::MAX` has been used.
    next_index: Option<i64>,
}

impl<V> Default for Collection<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Collection<V> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self { items: IndexMap::new(), next_index: Some(0) }
    }

    /// Creates a collection from key-value pairs.
    pub fn make<K, I>(items: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        items.into_iter().collect()
    }

    /// Creates a collection keyed `0..n` from a sequence of values.
    pub fn from_values(values: impl IntoIterator<Item = V>) -> Self {
        values.into_iter().zip(0i64..).map(|(value, index)| (index, value)).collect()
    }

    /// Rebuilds a collection from `entries`. Integer keys are renumbered unless `preserve_keys`
    /// is set; string keys are always kept.
    pub(crate) fn from_entries(
        entries: impl IntoIterator<Item = (Key, V)>,
        preserve_keys: bool,
    ) -> Self {
        let mut collection = Self::new();
        let mut index = 0i64;
        for (key, value) in entries {
            match key {
                Key::Int(_) if !preserve_keys => {
                    collection.put(index, value);
                    index += 1;
                }
                key => collection.put(key, value),
            }
        }
        collection
    }

    /// Returns the backing mapping.
    pub const fn all(&self) -> &IndexMap<Key, V> {
        &self.items
    }

    /// Consumes the collection, returning the backing mapping.
    pub fn into_inner(self) -> IndexMap<Key, V> {
        self.items
    }

    /// Returns the number of entries.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the first value in insertion order.
    pub fn first(&self) -> Option<&V> {
        self.items.first().map(|(_, value)| value)
    }

    /// Returns the first value, or `default` if the collection is empty.
    pub fn first_or(&self, default: V) -> V
    where
        V: Clone,
    {
        self.first().cloned().unwrap_or(default)
    }

    /// Returns the last value in insertion order.
    pub fn last(&self) -> Option<&V> {
        self.items.last().map(|(_, value)| value)
    }

    /// Returns the value at `key`.
    pub fn get(&self, key: impl Into<Key>) -> Option<&V> {
        self.items.get(&key.into())
    }

    /// Returns the value at `key`, or `default` if there is none.
    pub fn get_or(&self, key: impl Into<Key>, default: V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Returns the value at `key`, failing with [`CollectionError::KeyNotFound`] if it is absent.
    pub fn at(&self, key: impl Into<Key>) -> Result<&V> {
        let key = key.into();
        self.items.get(&key).ok_or(CollectionError::KeyNotFound(key))
    }

    /// Mutable variant of [`Collection::at`].
    pub fn at_mut(&mut self, key: impl Into<Key>) -> Result<&mut V> {
        let key = key.into();
        self.items.get_mut(&key).ok_or(CollectionError::KeyNotFound(key))
    }

    /// Returns `true` if an entry exists at `key`.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.items.contains_key(&key.into())
    }

    /// Sets the value at `key`, replacing any existing value in place.
    pub fn put(&mut self, key: impl Into<Key>, value: V) {
        let key = key.into();
        if let (Key::Int(index), Some(next)) = (&key, self.next_index)
            && *index >= next
        {
            self.next_index = index.checked_add(1);
        }
        self.items.insert(key, value);
    }

    /// Appends `value` under the next integer key.
    ///
    /// Fails with [`CollectionError::KeyOverflow`], leaving the collection unchanged, once the
    /// collection has held the key `i64::MAX`.
    pub fn push(&mut self, value: V) -> Result<()> {
        let index = self.next_index.ok_or(CollectionError::KeyOverflow)?;
        self.put(index, value);
        Ok(())
    }

    /// Removes the entry at `key`, if any, keeping the order of the remaining entries.
    pub fn forget(&mut self, key: impl Into<Key>) {
        self.items.shift_remove(&key.into());
    }

    /// Removes and returns the last value.
    pub fn pop(&mut self) -> Option<V> {
        let (key, value) = self.items.pop()?;
        if let Key::Int(index) = key
            && self.next_index.map_or(i64::MAX, |next| next - 1) == index
            && index >= 0
        {
            self.next_index = Some(index);
        }
        Some(value)
    }

    /// Removes and returns the first value. Remaining integer keys are renumbered from `0`.
    pub fn shift(&mut self) -> Option<V> {
        let (_, value) = self.items.shift_remove_index(0)?;
        let items = std::mem::take(&mut self.items);
        *self = Self::from_entries(items, false);
        trace!(target: "collection", remaining = self.count(), "re-indexed after shift");
        Some(value)
    }

    /// Removes and returns the value at `key`. Returns `default` instead if the key is absent or
    /// its value is falsy.
    pub fn pull(&mut self, key: impl Into<Key>, default: V) -> V
    where
        V: Truthy,
    {
        match self.items.shift_remove(&key.into()) {
            Some(value) if value.is_truthy() => value,
            _ => default,
        }
    }

    /// Calls `f` with each value and key in order. Stops early when `f` returns `false` or
    /// [`ControlFlow::Break`].
    pub fn each<F, R>(&self, mut f: F) -> &Self
    where
        F: FnMut(&V, &Key) -> R,
        R: Continue,
    {
        for (key, value) in &self.items {
            if !f(value, key).proceed() {
                break;
            }
        }
        self
    }

    /// Returns an iterator over the entries in order.
    pub fn iter(&self) -> map::Iter<'_, Key, V> {
        self.items.iter()
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> map::Keys<'_, Key, V> {
        self.items.keys()
    }

    /// Returns an iterator over the values in order.
    pub fn values(&self) -> map::Values<'_, Key, V> {
        self.items.values()
    }
}

/// Return values accepted from [`Collection::each`] callbacks.
pub trait Continue {
    /// Returns `false` to stop the iteration.
    fn proceed(self) -> bool;
}

impl Continue for () {
    fn proceed(self) -> bool {
        true
    }
}

impl Continue for bool {
    fn proceed(self) -> bool {
        self
    }
}

impl<B> Continue for ControlFlow<B> {
    fn proceed(self) -> bool {
        self.is_continue()
    }
}

/// Entries compare in order.
impl<V: PartialEq> PartialEq for Collection<V> {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len() && self.items.iter().eq(other.items.iter())
    }
}

impl<V, K: Into<Key>> FromIterator<(K, V)> for Collection<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<V, K: Into<Key>> Extend<(K, V)> for Collection<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> From<Vec<V>> for Collection<V> {
    fn from(values: Vec<V>) -> Self {
        Self::from_values(values)
    }
}

impl<V> From<IndexMap<Key, V>> for Collection<V> {
    fn from(items: IndexMap<Key, V>) -> Self {
        items.into_iter().collect()
    }
}

impl<V, K: Into<Key>, const N: usize> From<[(K, V); N]> for Collection<V> {
    fn from(items: [(K, V); N]) -> Self {
        items.into_iter().collect()
    }
}

impl<V> IntoIterator for Collection<V> {
    type Item = (Key, V);
    type IntoIter = map::IntoIter<Key, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Collection<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = map::Iter<'a, Key, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Direct indexed access.
///
/// # Panics
///
/// Panics with the [`CollectionError::KeyNotFound`] message if the key is absent. Use
/// [`Collection::at`] or [`Collection::get`] to handle that case.
impl<V, K: Into<Key>> Index<K> for Collection<V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        match self.at(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<V, K: Into<Key>> IndexMut<K> for Collection<V> {
    fn index_mut(&mut self, key: K) -> &mut V {
        match self.at_mut(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}
