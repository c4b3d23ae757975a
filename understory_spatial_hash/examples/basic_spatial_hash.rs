// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Spatial Hash: insert, query, remove.

use kurbo::{Point, Vec2};
use understory_spatial_hash::SpatialHash;

fn main() {
    let mut hash: SpatialHash<u32> = SpatialHash::new(64.0);
    hash.insert_point(40, Point::new(20.0, 20.0));
    hash.insert_point(100, Point::new(40.0, 40.0));
    hash.insert_rect(7, Point::new(100.0, 0.0), Vec2::new(80.0, 40.0));

    // Both points share the first cell.
    let hits = hash.query_point(Point::new(10.0, 10.0));
    println!("hits at (10,10): {:?}", hits);

    hash.remove_point(&100, Point::new(40.0, 40.0));
    let hits = hash.query_rect(Point::new(0.0, 0.0), Vec2::new(128.0, 64.0));
    println!("hits in (0,0)+(128,64): {:?}", hits);

    println!("{:?}", hash);
}
