// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_spatial_hash --heading-base-level=0

//! Understory Spatial Hash: a uniform-grid broad phase keyed by cell.
//!
//! Understory Spatial Hash maps 2D positions onto square cells of a fixed size and keeps a
//! bucket of caller values per cell.
//!
//! - Insert and remove values at points or over axis-aligned rectangles.
//! - Query by point, rectangle, or line segment.
//! - Line queries walk the grid with Bresenham's algorithm, so diagonal segments never skip a cell.
//!
//! Values are opaque handles (`T: Clone + Eq + Hash`), for example entity ids or slab keys.
//! Coordinates are [`kurbo::Point`] positions and [`kurbo::Vec2`] sizes.
//!
//! Results are conservative: a query reports every value sharing a cell with the query shape.
//! Exact intersection tests are left to the caller.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_spatial_hash::SpatialHash;
//!
//! let mut hash: SpatialHash<u32> = SpatialHash::new(100.0);
//! hash.insert_point(1, Point::new(20.0, 20.0));
//! hash.insert_point(2, Point::new(350.0, 350.0));
//! hash.insert_rect(3, Point::new(150.0, 20.0), Vec2::new(20.0, 20.0));
//!
//! // Point queries report everything in the cell.
//! assert_eq!(hash.query_point(Point::new(10.0, 10.0)).to_vec(), [1]);
//!
//! // A diagonal line crosses the cells of both points.
//! let hits = hash.query_line(Point::new(0.0, 0.0), Point::new(400.0, 400.0));
//! assert!(hits.contains(&1) && hits.contains(&2));
//! ```
//!
//! ## Shared result buffer
//!
//! Queries take `&mut self` and return a [`Hits`] view of a buffer owned by the index.
//! Each query clears that buffer first, so copy the values out with [`Hits::to_vec`]
//! if you need them after the next query:
//!
//! ```rust
//! use kurbo::Point;
//! use understory_spatial_hash::SpatialHash;
//!
//! let mut hash = SpatialHash::new(64.0);
//! hash.insert_point("a", Point::new(10.0, 10.0));
//! hash.insert_point("b", Point::new(100.0, 10.0));
//!
//! let first = hash.query_point(Point::new(1.0, 1.0)).to_vec();
//! let second = hash.query_point(Point::new(70.0, 1.0)).to_vec();
//! assert_eq!(first, ["a"]);
//! assert_eq!(second, ["b"]);
//! ```
//!
//! ## Cell materialization
//!
//! Every operation that touches a cell creates its bucket if needed, queries included.
//! Buckets are never removed, even when empty, so [`SpatialHash::bucket_count`] only grows.
//! Use [`SpatialHash::bucket`] to inspect a cell without creating it.
//!
//! ## Rectangles
//!
//! [`SpatialHash::insert_rect`] and [`SpatialHash::query_rect`] widen the rectangle by half a
//! cell on every side before snapping (see [`CellSpan::biased`]).
//! [`SpatialHash::remove_rect`] walks cell-sized steps from the rectangle origin without that
//! widening, so it must be given the same position and size as the insertion and may leave the
//! value behind in margin cells. [`SpatialHash::remove_rect_biased`] removes from exactly the
//! cells insertion used.
//!
//! ### Float semantics
//!
//! Coordinates are assumed finite. The bucket size must be positive and finite; debug builds assert.

#![no_std]

extern crate alloc;

pub mod bucket;
pub mod grid;
pub mod hash;
pub mod line;

pub use bucket::Bucket;
pub use grid::{CellKey, CellSpan};
pub use hash::{DEFAULT_BUCKET_SIZE, Hits, SpatialHash};
pub use line::{GridLine, MajorAxis};
