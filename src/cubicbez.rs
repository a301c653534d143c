// Copyright 2024 the Bezapprox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use crate::common::bernstein3;
use crate::{ParamCurve, Point};

/// A single cubic Bézier segment.
///
/// Segments produced by fitting start and end on input samples; `p1` and
/// `p2` are the fitted inner control points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// Start point, on the first sample of the fitted range.
    pub p0: Point,
    /// First inner control point, along the start tangent.
    pub p1: Point,
    /// Second inner control point, along the end tangent.
    pub p2: Point,
    /// End point, on the last sample of the fitted range.
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// A degenerate segment with all four control points at `p`.
    ///
    /// Evaluates to `p` for every `t`.
    #[inline]
    pub fn from_point(p: Point) -> Self {
        Self {
            p0: p,
            p1: p,
            p2: p,
            p3: p,
        }
    }

    /// The four control points in order.
    #[inline]
    pub fn points(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Is this cubic Bézier curve finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.points().iter().all(|p| p.is_finite())
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let [b0, b1, b2, b3] = bernstein3(t);
        Point::new(
            b0 * self.p0.x + b1 * self.p1.x + b2 * self.p2.x + b3 * self.p3.x,
            b0 * self.p0.y + b1 * self.p1.y + b2 * self.p2.y + b3 * self.p3.y,
        )
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }
}

#[cfg(test)]
mod tests {
    use crate::{CubicBez, ParamCurve, Point};

    // A reference curve and samples of it at known parameters.
    const SAMPLES: [(f64, (f64, f64)); 8] = [
        (0.0, (50.0, 300.0)),
        (0.05, (65.0, 240.12)),
        (0.2, (110.0, 139.6)),
        (0.4, (170.0, 132.8)),
        (0.6, (230.0, 181.2)),
        (0.8, (290.0, 186.4)),
        (0.95, (335.0, 102.76)),
        (1.0, (350.0, 50.0)),
    ];

    #[test]
    fn cubicbez_eval_reference() {
        let c = CubicBez::new((50.0, 300.0), (150.0, -150.0), (250.0, 450.0), (350.0, 50.0));
        for (t, expected) in SAMPLES {
            let p = c.eval(t);
            let expected = Point::from(expected);
            assert!(
                (p.x - expected.x).abs() < 0.05 && (p.y - expected.y).abs() < 0.05,
                "at t = {t}: expected {expected:?}, got {p:?}"
            );
        }
    }

    #[test]
    fn cubicbez_eval_endpoints_exact() {
        let c = CubicBez::new((0.1, -3.7), (1.0, 2.0), (2.0, 2.0), (3.3, 1e-7));
        assert_eq!(c.eval(0.0), c.p0);
        assert_eq!(c.eval(1.0), c.p3);
        assert_eq!(c.start(), c.p0);
        assert_eq!(c.end(), c.p3);
    }

    #[test]
    fn cubicbez_eval_extrapolates() {
        // Uniformly spaced control points on a line give a linear curve.
        let c = CubicBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0));
        let p = c.eval(2.0);
        assert!((p.x - 6.0).abs() < 1e-12 && (p.y - 6.0).abs() < 1e-12);
        let p = c.eval(-1.0);
        assert!((p.x + 3.0).abs() < 1e-12 && (p.y + 3.0).abs() < 1e-12);
    }

    #[test]
    fn cubicbez_from_point() {
        let p = Point::new(2.0, -7.5);
        let c = CubicBez::from_point(p);
        for t in [0.0, 0.25, 0.5, 1.0] {
            let q = c.eval(t);
            assert!((q.x - p.x).abs() < 1e-12 && (q.y - p.y).abs() < 1e-12);
        }
        assert_eq!(c.eval(0.0), p);
    }
}
