// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line-of-sight candidates.
//!
//! Scatter a few obstacles, then collect the ones a ray might hit. The hash
//! reports every obstacle sharing a cell with the ray; an exact segment test
//! narrows the candidates down.
//!
//! Run:
//! - `cargo run -p understory_examples --example spatial_hash_line_of_sight`

use kurbo::{Line, ParamCurveNearest, Point, Rect, Vec2};
use understory_spatial_hash::SpatialHash;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct Obstacle(u32);

fn main() {
    let obstacles = [
        (Obstacle(0), Rect::new(40.0, 40.0, 70.0, 70.0)),
        (Obstacle(1), Rect::new(180.0, 150.0, 240.0, 190.0)),
        (Obstacle(2), Rect::new(330.0, 20.0, 360.0, 60.0)),
        (Obstacle(3), Rect::new(300.0, 300.0, 340.0, 340.0)),
    ];

    let mut hash = SpatialHash::new(100.0);
    for (id, rect) in obstacles {
        hash.insert_rect(id, rect.origin(), rect.size().to_vec2());
    }

    let ray = Line::new(Point::new(10.0, 10.0), Point::new(390.0, 390.0));
    let candidates = hash.query_line(ray.p0, ray.p1).to_vec();
    println!("broad phase: {:?}", candidates);

    // Narrow phase: keep obstacles whose center lies within half their diagonal of the ray.
    let hits: Vec<_> = candidates
        .iter()
        .filter_map(|id| obstacles.iter().find(|(o, _)| o == id))
        .filter(|(_, rect)| {
            let center = rect.center();
            let nearest = ray.nearest(center, 1e-6);
            let reach = Vec2::new(rect.width(), rect.height()).hypot() * 0.5;
            nearest.distance_sq <= reach * reach
        })
        .map(|(id, _)| *id)
        .collect();
    println!("narrow phase: {:?}", hits);
    assert!(hits.contains(&Obstacle(0)) && hits.contains(&Obstacle(3)));
}
