// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Buckets: the deduplicated value sets stored per cell.

use core::fmt::Debug;
use core::hash::Hash;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Insertion-ordered set used for buckets and for query results.
pub(crate) type ValueSet<T> = IndexSet<T, FxBuildHasher>;

/// The set of values stored in one cell.
///
/// Membership is deduplicated. Iteration follows insertion order; removing a
/// value keeps the relative order of the rest.
#[derive(Clone)]
pub struct Bucket<T> {
    values: ValueSet<T>,
}

impl<T> Bucket<T> {
    /// Create an empty bucket.
    pub fn new() -> Self {
        Self {
            values: ValueSet::with_hasher(FxBuildHasher),
        }
    }

    /// Number of values in the bucket.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the bucket holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate the values in insertion order.
    pub fn iter(&self) -> indexmap::set::Iter<'_, T> {
        self.values.iter()
    }
}

impl<T: Eq + Hash> Bucket<T> {
    /// Add `value`. Returns `false` if it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.values.insert(value)
    }

    /// Remove `value`. Returns `false` if it was absent.
    pub fn remove(&mut self, value: &T) -> bool {
        self.values.shift_remove(value)
    }

    /// Whether `value` is in the bucket.
    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }
}

impl<T> Default for Bucket<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Bucket<T> {
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Debug> Debug for Bucket<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.values.iter()).finish()
    }
}
