// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid traversal of line segments.
//!
//! [`GridLine`] is Bresenham's line algorithm with each "pixel" being one
//! `step`-wide cell. It yields world-space sample points, one per cell along the
//! major axis, such that consecutive samples never skip a cell the segment
//! passes through diagonally.
//!
//! The decision term is kept in world units. Scaling both `du` and `dv` by the
//! cell size scales every term of the Bresenham error by the same factor, so
//! the sign tests are identical to stepping in cell units.
//!
//! The sample count is computed up front, and each sample is placed at
//! `origin + k * step` rather than by repeated addition, so the traversal is
//! bounded even where `step` is small next to the float spacing of the
//! coordinates. It stops strictly before the major coordinate of the far
//! endpoint; callers that need the final cell sample it themselves.

use core::iter::FusedIterator;

use kurbo::Point;

/// Axis along which a [`GridLine`] advances one cell per step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MajorAxis {
    /// Shallow segment, `|dy| < |dx|`.
    X,
    /// Steep segment, `|dy| >= |dx|`.
    Y,
}

/// Iterator over the cell sample points of a line segment.
#[derive(Clone, Debug)]
pub struct GridLine {
    axis: MajorAxis,
    // Origin along the major (u) and minor (v) axes.
    u0: f64,
    v0: f64,
    du: f64,
    dv: f64,
    v_step: f64,
    step: f64,
    d: f64,
    // Samples emitted so far, samples in total, minor steps taken.
    taken: u64,
    count: u64,
    minor: u64,
}

impl GridLine {
    /// Plan the traversal of the segment from `start` to `end`.
    ///
    /// Endpoints are reordered so the major coordinate increases. The number of
    /// samples is fixed here: one per `step` strictly before the far endpoint's
    /// major coordinate. Non-finite endpoints or a non-positive `step` produce an
    /// empty traversal.
    pub fn new(start: Point, end: Point, step: f64) -> Self {
        let delta = end - start;
        let axis = if delta.y.abs() < delta.x.abs() {
            MajorAxis::X
        } else {
            MajorAxis::Y
        };
        let to_uv = |p: Point| match axis {
            MajorAxis::X => (p.x, p.y),
            MajorAxis::Y => (p.y, p.x),
        };
        let (mut a, mut b) = (to_uv(start), to_uv(end));
        if a.0 > b.0 {
            core::mem::swap(&mut a, &mut b);
        }

        let du = b.0 - a.0;
        let (dv, v_step) = if b.1 - a.1 < 0.0 {
            (a.1 - b.1, -step)
        } else {
            (b.1 - a.1, step)
        };

        let usable = step > 0.0 && step.is_finite() && du.is_finite() && dv.is_finite();
        Self {
            axis,
            u0: a.0,
            v0: a.1,
            du,
            dv,
            v_step,
            step,
            d: 2.0 * dv - du,
            taken: 0,
            count: if usable { ceil_to_u64(du / step) } else { 0 },
            minor: 0,
        }
    }

    /// The axis this traversal advances along.
    pub fn major_axis(&self) -> MajorAxis {
        self.axis
    }

    fn point(&self) -> Point {
        let u = self.u0 + self.taken as f64 * self.step;
        let v = self.v0 + self.minor as f64 * self.v_step;
        match self.axis {
            MajorAxis::X => Point::new(u, v),
            MajorAxis::Y => Point::new(v, u),
        }
    }

    fn remaining(&self) -> u64 {
        self.count - self.taken
    }
}

// Smallest `n` with `n >= v`, for finite non-negative `v`.
fn ceil_to_u64(v: f64) -> u64 {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Step counts saturate at u64::MAX; the input is finite and non-negative."
    )]
    let n = v as u64;
    if (n as f64) < v { n.saturating_add(1) } else { n }
}

impl Iterator for GridLine {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.taken >= self.count {
            return None;
        }
        let sample = self.point();
        if self.d > 0.0 {
            self.minor += 1;
            self.d += 2.0 * (self.dv - self.du);
        } else {
            self.d += 2.0 * self.dv;
        }
        self.taken += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for GridLine {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellKey;
    use alloc::vec::Vec;

    fn cells(start: Point, end: Point, step: f64) -> Vec<CellKey> {
        GridLine::new(start, end, step)
            .map(|p| CellKey::from_point(p, step))
            .collect()
    }

    #[test]
    fn horizontal_walks_every_column() {
        let got = cells(Point::new(20.0, 20.0), Point::new(520.0, 20.0), 100.0);
        let want: Vec<_> = (0..5).map(|x| CellKey::new(x, 0)).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn vertical_uses_y_axis() {
        let line = GridLine::new(Point::new(20.0, 20.0), Point::new(20.0, 520.0), 100.0);
        assert_eq!(line.major_axis(), MajorAxis::Y);
        let got: Vec<_> = line.map(|p| CellKey::from_point(p, 100.0)).collect();
        let want: Vec<_> = (0..5).map(|y| CellKey::new(0, y)).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn exact_diagonal_is_steep_and_stays_on_diagonal() {
        let line = GridLine::new(Point::new(0.0, 0.0), Point::new(400.0, 400.0), 100.0);
        assert_eq!(line.major_axis(), MajorAxis::Y);
        let got: Vec<_> = line.map(|p| CellKey::from_point(p, 100.0)).collect();
        let want: Vec<_> = (0..4).map(|i| CellKey::new(i, i)).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn swapped_endpoints_visit_same_cells() {
        let a = Point::new(10.0, 310.0);
        let b = Point::new(720.0, 40.0);
        let mut fwd = cells(a, b, 100.0);
        let mut rev = cells(b, a, 100.0);
        fwd.sort();
        rev.sort();
        assert_eq!(fwd, rev);
    }

    #[test]
    fn shallow_line_never_skips_a_row() {
        let got = cells(Point::new(0.0, 0.0), Point::new(900.0, 300.0), 100.0);
        assert_eq!(got.len(), 9);
        for pair in got.windows(2) {
            assert_eq!(pair[1].x - pair[0].x, 1);
            assert!((0..=1).contains(&(pair[1].y - pair[0].y)));
        }
    }

    #[test]
    fn descending_minor_axis_steps_down() {
        let got = cells(Point::new(0.0, 300.0), Point::new(900.0, 0.0), 100.0);
        assert_eq!(got.first(), Some(&CellKey::new(0, 3)));
        assert!(got.windows(2).all(|w| w[1].y <= w[0].y));
    }

    #[test]
    fn degenerate_inputs_are_empty() {
        let p = Point::new(5.0, 5.0);
        assert_eq!(GridLine::new(p, p, 10.0).count(), 0);
        assert_eq!(GridLine::new(p, Point::new(50.0, 5.0), 0.0).count(), 0);
        assert_eq!(GridLine::new(p, Point::new(f64::INFINITY, 5.0), 10.0).count(), 0);
        assert_eq!(GridLine::new(p, Point::new(f64::NAN, 5.0), 10.0).count(), 0);
    }

    #[test]
    fn far_from_origin_line_is_bounded() {
        // At 1e16 adding 1.0 does not change an f64.
        let line = GridLine::new(Point::new(1e16, 0.0), Point::new(1e16 + 100.0, 0.0), 1.0);
        assert_eq!(line.size_hint(), (100, Some(100)));
        assert_eq!(line.take(1_000).count(), 100);
    }

    #[test]
    fn fractional_step_has_no_extra_sample() {
        let line = GridLine::new(Point::new(0.0, 0.0), Point::new(1.0, 0.3), 0.1);
        assert_eq!(line.major_axis(), MajorAxis::X);
        let samples: Vec<_> = line.collect();
        assert_eq!(samples.len(), 10);
        assert!(samples.iter().all(|p| p.x < 1.0));
    }
}
