// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use understory_spatial_hash::SpatialHash;

fn gen_grid_points(n: usize, spacing: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point::new(x as f64 * spacing, y as f64 * spacing));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, world: f64, max_side: f64) -> Vec<(Point, Vec2)> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (world - max_side).max(1.0);
        let y0 = rng.next_f64() * (world - max_side).max(1.0);
        let w = 1.0 + rng.next_f64() * max_side;
        let h = 1.0 + rng.next_f64() * max_side;
        out.push((Point::new(x0, y0), Vec2::new(w, h)));
    }
    out
}

fn gen_random_segments(count: usize, world: f64) -> Vec<(Point, Point)> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    for _ in 0..count {
        let a = Point::new(rng.next_f64() * world, rng.next_f64() * world);
        let b = Point::new(rng.next_f64() * world, rng.next_f64() * world);
        out.push((a, b));
    }
    out
}

fn populated(bucket_size: f64, points: &[Point], rects: &[(Point, Vec2)]) -> SpatialHash<u32> {
    let mut hash = SpatialHash::new(bucket_size);
    for (i, p) in points.iter().copied().enumerate() {
        hash.insert_point(i as u32, p);
    }
    let base = points.len();
    for (i, (p, s)) in rects.iter().copied().enumerate() {
        hash.insert_rect((base + i) as u32, p, s);
    }
    hash
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[32usize, 64, 128] {
        let points = gen_grid_points(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("insert_point_n{}", n), |b| {
            b.iter_batched(
                || SpatialHash::<u32>::new(32.0),
                |mut hash| {
                    for (i, p) in points.iter().copied().enumerate() {
                        hash.insert_point(i as u32, p);
                    }
                    black_box(hash.bucket_count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    let rects = gen_random_rects(4096, 2000.0, 48.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("insert_rect_random", |b| {
        b.iter_batched(
            || SpatialHash::<u32>::new(32.0),
            |mut hash| {
                for (i, (p, s)) in rects.iter().copied().enumerate() {
                    hash.insert_rect(i as u32, p, s);
                }
                black_box(hash.bucket_count());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let points = gen_grid_points(128, 10.0);
    let rects = gen_random_rects(4096, 2000.0, 48.0);
    for &bucket_size in &[16.0_f64, 32.0, 64.0] {
        let mut hash = populated(bucket_size, &points, &rects);
        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("point_b{}", bucket_size), |b| {
            b.iter(|| {
                let hits = hash.query_point(black_box(Point::new(640.0, 640.0)));
                black_box(hits.len());
            })
        });
        group.bench_function(format!("rect_b{}", bucket_size), |b| {
            b.iter(|| {
                let hits = hash.query_rect(
                    black_box(Point::new(800.0, 800.0)),
                    black_box(Vec2::new(400.0, 400.0)),
                );
                black_box(hits.len());
            })
        });
        let segments = gen_random_segments(256, 2000.0);
        group.throughput(Throughput::Elements(segments.len() as u64));
        group.bench_function(format!("line_b{}", bucket_size), |b| {
            b.iter(|| {
                let mut total = 0;
                for &(a, e) in &segments {
                    total += hash.query_line(a, e).len();
                }
                black_box(total);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_queries);
criterion_main!(benches);
