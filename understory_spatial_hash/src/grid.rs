// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid indexing: mapping continuous coordinates onto the bucket lattice.
//!
//! Every other part of the crate agrees on cells through [`CellKey::from_point`],
//! so the mapping is a pure function of the position and the bucket size.

use core::ops::RangeInclusive;

use kurbo::{Point, Vec2};

/// Canonical key of one `bucket_size × bucket_size` cell.
///
/// The key stores the lattice index `(floor(x / s), floor(y / s))`. The snapped
/// world-space corner of the cell is available from [`CellKey::origin`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Column index.
    pub x: i64,
    /// Row index.
    pub y: i64,
}

impl CellKey {
    /// Create a key from lattice indices.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Key of the cell containing `p` for the given bucket size.
    #[inline]
    pub fn from_point(p: Point, bucket_size: f64) -> Self {
        debug_assert!(bucket_size > 0.0, "bucket size must be positive");
        Self {
            x: floor_to_i64(p.x / bucket_size),
            y: floor_to_i64(p.y / bucket_size),
        }
    }

    /// World-space minimum corner of this cell, `floor(p / s) * s`.
    pub fn origin(self, bucket_size: f64) -> Point {
        Point::new(self.x as f64 * bucket_size, self.y as f64 * bucket_size)
    }
}

#[inline]
fn floor_to_i64(v: f64) -> i64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Cell indices saturate at the i64 range; such coordinates are outside any useful grid."
    )]
    let i = v as i64;
    if (i as f64) > v { i - 1 } else { i }
}

/// Inclusive rectangular span of cells.
///
/// Iteration is row-major: `y` in the outer loop, `x` in the inner one. A span
/// whose `min` exceeds `max` on either axis is empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellSpan {
    /// First cell (lowest column and row).
    pub min: CellKey,
    /// Last cell (highest column and row), inclusive.
    pub max: CellKey,
}

impl CellSpan {
    /// Span from `min` to `max` inclusive.
    pub const fn new(min: CellKey, max: CellKey) -> Self {
        Self { min, max }
    }

    /// Every cell between the cells of two corners, inclusive.
    pub fn covering(min: Point, max: Point, bucket_size: f64) -> Self {
        Self {
            min: CellKey::from_point(min, bucket_size),
            max: CellKey::from_point(max, bucket_size),
        }
    }

    /// Span used by rectangle insertion and rectangle queries.
    ///
    /// The min corner is pulled back and the max corner pushed out by half a cell
    /// before snapping, so a rectangle edge within half a cell of a boundary also
    /// claims the neighbouring cell.
    pub fn biased(position: Point, size: Vec2, bucket_size: f64) -> Self {
        let half = Vec2::new(bucket_size * 0.5, bucket_size * 0.5);
        Self::covering(position - half, position + size + half, bucket_size)
    }

    /// Span used by rectangle removal.
    ///
    /// Covers the cells of the sample points `position + k * bucket_size` for
    /// `k = 0 ..= floor(size / bucket_size)` on each axis, with no bias. A negative
    /// size yields an empty span.
    pub fn walked(position: Point, size: Vec2, bucket_size: f64) -> Self {
        let min = CellKey::from_point(position, bucket_size);
        let steps_x = floor_to_i64(size.x / bucket_size);
        let steps_y = floor_to_i64(size.y / bucket_size);
        Self {
            min,
            max: CellKey::new(min.x.saturating_add(steps_x), min.y.saturating_add(steps_y)),
        }
    }

    /// Number of columns covered.
    pub fn columns(&self) -> u64 {
        extent(self.min.x, self.max.x)
    }

    /// Number of rows covered.
    pub fn rows(&self) -> u64 {
        extent(self.min.y, self.max.y)
    }

    /// Total number of cells covered.
    pub fn len(&self) -> u64 {
        self.columns().saturating_mul(self.rows())
    }

    /// True if the span covers no cell.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` lies inside the span.
    pub fn contains(&self, key: CellKey) -> bool {
        (self.min.x..=self.max.x).contains(&key.x) && (self.min.y..=self.max.y).contains(&key.y)
    }

    /// Iterate the covered cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellKey> + use<> {
        let xs: RangeInclusive<i64> = self.min.x..=self.max.x;
        (self.min.y..=self.max.y).flat_map(move |y| xs.clone().map(move |x| CellKey::new(x, y)))
    }
}

fn extent(min: i64, max: i64) -> u64 {
    if max < min {
        0
    } else {
        max.abs_diff(min) + 1
    }
}
