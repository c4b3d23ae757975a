// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving rectangles.
//!
//! Move a box across the grid each frame by removing it from its old cells and
//! inserting it at the new position, then look up neighbours.
//!
//! Run:
//! - `cargo run -p understory_examples --example spatial_hash_moving_rects`

use kurbo::{Point, Vec2};
use understory_spatial_hash::SpatialHash;

fn main() {
    let size = Vec2::new(30.0, 30.0);
    let mut hash: SpatialHash<&'static str> = SpatialHash::new(50.0);
    hash.insert_rect("wall", Point::new(200.0, 0.0), Vec2::new(20.0, 200.0));

    let mut pos = Point::new(0.0, 40.0);
    hash.insert_rect("player", pos, size);
    for frame in 0..6 {
        let next = pos + Vec2::new(40.0, 0.0);
        // Mirror the insertion span so no stale copies stay behind.
        hash.remove_rect_biased(&"player", pos, size);
        hash.insert_rect("player", next, size);
        pos = next;

        let near = hash.query_rect(pos, size);
        println!("frame {frame}: player at {pos:?}, near {:?}", near);
    }
    println!("{:?}", hash);
}
