//! In-place sorting.

use super::Collection;
use crate::{Accessor, Result, SortOptions, Value};
use std::cmp::Ordering;

impl<V> Collection<V> {
    /// Sorts the values with `cmp`, keeping each value's key. The sort is stable.
    pub fn sort<F>(&mut self, mut cmp: F) -> &mut Self
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        self.items.sort_by(|_, a, _, b| cmp(a, b));
        self
    }
}

impl Collection<Value> {
    /// Sorts the entries by the value `accessor` derives from each one, keeping keys.
    ///
    /// The sort is stable in both directions: entries with equal sort keys keep their relative
    /// order. If two sort keys cannot be compared under `options` this fails with
    /// [`CollectionError::TypeMismatch`](crate::CollectionError::TypeMismatch) and the
    /// collection is left unchanged.
    pub fn sort_by(
        &mut self,
        accessor: Accessor<'_>,
        options: SortOptions,
        descending: bool,
    ) -> Result<&mut Self> {
        let sort_keys: Vec<Value> = self.items.values().map(|value| accessor.resolve(value)).collect();
        let order = merge_sort(sort_keys.len(), |a, b| {
            let ordering = options.compare(&sort_keys[a], &sort_keys[b])?;
            Ok(if descending { ordering.reverse() } else { ordering })
        })?;

        let mut items: Vec<_> = std::mem::take(&mut self.items).into_iter().map(Some).collect();
        self.items = order.into_iter().filter_map(|index| items[index].take()).collect();
        trace!(target: "collection", ?accessor, ?options, descending, entries = self.count(), "sorted collection");
        Ok(self)
    }

    /// [`Collection::sort_by`] in descending order.
    pub fn sort_by_desc(&mut self, accessor: Accessor<'_>, options: SortOptions) -> Result<&mut Self> {
        self.sort_by(accessor, options, true)
    }
}

/// Stable merge sort of the indices `0..len` under a fallible comparison.
///
/// Returns the sorted indices, or the first comparison error.
fn merge_sort<F>(len: usize, mut cmp: F) -> Result<Vec<usize>>
where
    F: FnMut(usize, usize) -> Result<Ordering>,
{
    let mut order: Vec<usize> = (0..len).collect();
    let mut buf = Vec::with_capacity(len);
    let mut width = 1;
    while width < len {
        buf.clear();
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                // Take from the right run only when strictly smaller.
                if cmp(order[j], order[i])?.is_lt() {
                    buf.push(order[j]);
                    j += 1;
                } else {
                    buf.push(order[i]);
                    i += 1;
                }
            }
            buf.extend_from_slice(&order[i..mid]);
            buf.extend_from_slice(&order[j..end]);
        }
        std::mem::swap(&mut order, &mut buf);
        width *= 2;
    }
    Ok(order)
}
