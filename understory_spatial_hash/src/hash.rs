// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `SpatialHash` API: insertion, removal, and point/rect/line queries.

use core::fmt::Debug;
use core::hash::Hash;

use indexmap::IndexMap;
use kurbo::{Point, Vec2};
use rustc_hash::FxBuildHasher;

use crate::bucket::{Bucket, ValueSet};
use crate::grid::{CellKey, CellSpan};
use crate::line::GridLine;

/// Bucket size used by [`SpatialHash::default`].
pub const DEFAULT_BUCKET_SIZE: f64 = 64.0;

/// A uniform spatial hash from cells to buckets of values.
///
/// Values are opaque handles (`T: Clone + Eq + Hash`); the hash never inspects
/// them beyond set membership. Buckets are created on first touch by any
/// operation, queries included, and are never removed, so the set of known
/// cells only grows over the lifetime of the index.
///
/// Queries reuse one result buffer owned by the index and return a [`Hits`]
/// view into it. The view borrows the index, so it must be dropped before the
/// next query or mutation.
pub struct SpatialHash<T> {
    bucket_size: f64,
    buckets: IndexMap<CellKey, Bucket<T>, FxBuildHasher>,
    hits: ValueSet<T>,
}

impl<T> SpatialHash<T> {
    /// Create an empty index with cells of `bucket_size × bucket_size`.
    ///
    /// `bucket_size` must be positive and finite.
    pub fn new(bucket_size: f64) -> Self {
        Self::with_capacity(bucket_size, 0)
    }

    /// Create an empty index with room for `cells` buckets.
    pub fn with_capacity(bucket_size: f64, cells: usize) -> Self {
        debug_assert!(
            bucket_size > 0.0 && bucket_size.is_finite(),
            "bucket size must be positive and finite"
        );
        Self {
            bucket_size,
            buckets: IndexMap::with_capacity_and_hasher(cells, FxBuildHasher),
            hits: ValueSet::with_hasher(FxBuildHasher),
        }
    }

    /// Edge length of one cell.
    pub fn bucket_size(&self) -> f64 {
        self.bucket_size
    }

    /// Key of the cell containing `position`.
    #[inline]
    pub fn cell_of(&self, position: Point) -> CellKey {
        CellKey::from_point(position, self.bucket_size)
    }

    /// Number of materialized buckets, empty ones included.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Keys of all materialized buckets, in order of first touch.
    pub fn cells(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.buckets.keys().copied()
    }

    /// The bucket for `key`, if one has been materialized. Does not create one.
    pub fn bucket(&self, key: CellKey) -> Option<&Bucket<T>> {
        self.buckets.get(&key)
    }

    /// The bucket for `key`, created empty if absent.
    pub fn bucket_mut(&mut self, key: CellKey) -> &mut Bucket<T> {
        self.buckets.entry(key).or_default()
    }

    /// Result of the most recent query (empty after [`clear_hits`](Self::clear_hits)).
    pub fn hits(&self) -> Hits<'_, T> {
        Hits { set: &self.hits }
    }

    /// Clear the shared result buffer.
    pub fn clear_hits(&mut self) {
        self.hits.clear();
    }
}

impl<T: Clone + Eq + Hash> SpatialHash<T> {
    /// Store `value` in the cell containing `position`.
    pub fn insert_point(&mut self, value: T, position: Point) {
        let key = self.cell_of(position);
        self.bucket_mut(key).insert(value);
    }

    /// Store `value` in every cell of the rectangle at `position` with `size`.
    ///
    /// The covered span is widened by half a cell on each side before snapping
    /// (see [`CellSpan::biased`]); [`query_rect`](Self::query_rect) uses the same
    /// span.
    pub fn insert_rect(&mut self, value: T, position: Point, size: Vec2) {
        for key in CellSpan::biased(position, size, self.bucket_size).iter() {
            self.bucket_mut(key).insert(value.clone());
        }
    }

    /// Remove `value` from the cell containing `position`. No-op if absent.
    pub fn remove_point(&mut self, value: &T, position: Point) {
        let key = self.cell_of(position);
        self.bucket_mut(key).remove(value);
    }

    /// Remove `value` from the cells walked from `position` to `position + size`.
    ///
    /// The walk steps one cell at a time from `position` without the half-cell
    /// widening used by [`insert_rect`](Self::insert_rect), so it can leave the
    /// value behind in the margin cells insertion claimed. Pass the exact
    /// `position` and `size` used at insertion. Use
    /// [`remove_rect_biased`](Self::remove_rect_biased) to undo an insertion
    /// completely.
    pub fn remove_rect(&mut self, value: &T, position: Point, size: Vec2) {
        self.remove_span(value, CellSpan::walked(position, size, self.bucket_size));
    }

    /// Remove `value` from exactly the cells [`insert_rect`](Self::insert_rect)
    /// would have stored it in.
    pub fn remove_rect_biased(&mut self, value: &T, position: Point, size: Vec2) {
        self.remove_span(value, CellSpan::biased(position, size, self.bucket_size));
    }

    fn remove_span(&mut self, value: &T, span: CellSpan) {
        for key in span.iter() {
            self.bucket_mut(key).remove(value);
        }
    }

    /// Values stored in the cell containing `position`.
    pub fn query_point(&mut self, position: Point) -> Hits<'_, T> {
        self.hits.clear();
        self.gather(self.cell_of(position));
        self.hits()
    }

    /// Values stored in any cell of the rectangle at `position` with `size`.
    ///
    /// Conservative: a value is reported if it shares a cell with the query,
    /// whether or not its own geometry intersects it. Each value appears once.
    pub fn query_rect(&mut self, position: Point, size: Vec2) -> Hits<'_, T> {
        self.hits.clear();
        for key in CellSpan::biased(position, size, self.bucket_size).iter() {
            self.gather(key);
        }
        self.hits()
    }

    /// Values stored in any cell the segment from `start` to `end` passes through.
    ///
    /// The cells of both endpoints are always included; the cells in between
    /// come from a [`GridLine`] traversal.
    pub fn query_line(&mut self, start: Point, end: Point) -> Hits<'_, T> {
        self.hits.clear();
        self.gather(self.cell_of(start));
        self.gather(self.cell_of(end));
        for sample in GridLine::new(start, end, self.bucket_size) {
            self.gather(self.cell_of(sample));
        }
        self.hits()
    }

    // Materializes the bucket as a side effect, like every other cell touch.
    fn gather(&mut self, key: CellKey) {
        let bucket = self.buckets.entry(key).or_default();
        for value in bucket.iter() {
            self.hits.insert(value.clone());
        }
    }
}

impl<T> Default for SpatialHash<T> {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_SIZE)
    }
}

impl<T> Debug for SpatialHash<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let entries: usize = self.buckets.values().map(Bucket::len).sum();
        let occupied = self.buckets.values().filter(|b| !b.is_empty()).count();
        f.debug_struct("SpatialHash")
            .field("bucket_size", &self.bucket_size)
            .field("cells", &self.buckets.len())
            .field("occupied", &occupied)
            .field("entries", &entries)
            .field("hits", &self.hits.len())
            .finish_non_exhaustive()
    }
}

/// Borrowed view of the most recent query result.
///
/// Values are unique and in order of discovery.
pub struct Hits<'a, T> {
    set: &'a ValueSet<T>,
}

impl<'a, T> Hits<'a, T> {
    /// Number of values found.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// True if the query found nothing.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// The `i`-th value found.
    pub fn get(&self, i: usize) -> Option<&'a T> {
        self.set.get_index(i)
    }

    /// Iterate the values found.
    pub fn iter(&self) -> indexmap::set::Iter<'a, T> {
        self.set.iter()
    }
}

impl<T: Eq + Hash> Hits<'_, T> {
    /// Whether `value` was found.
    pub fn contains(&self, value: &T) -> bool {
        self.set.contains(value)
    }
}

impl<T: Clone> Hits<'_, T> {
    /// Copy the values out so they survive the next query.
    pub fn to_vec(self) -> alloc::vec::Vec<T> {
        self.set.iter().cloned().collect()
    }
}

impl<T> Clone for Hits<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Hits<'_, T> {}

impl<'a, T> IntoIterator for Hits<'a, T> {
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}

impl<T: Debug> Debug for Hits<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.set.iter()).finish()
    }
}
