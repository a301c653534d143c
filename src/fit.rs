// Copyright 2024 the Bezapprox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Least-squares fitting of a single cubic Bézier segment to a range of
//! samples, and measurement of how well a segment fits.
//!
//! The endpoints of the segment are pinned to the first and last sample of
//! the range and the inner control points are constrained to rays along the
//! given end tangents:
//!
//! ```text
//! p1 = p0 + z1 e1
//! p2 = p3 + z2 e2
//! ```
//!
//! Sample `i` is assigned the parameter `t_i` from the chord-length table,
//! normalized to the range. Minimizing the summed squared distance between
//! `B(t_i)` and the samples over `(z1, z2)` gives the 2×2 normal equations
//!
//! ```text
//! | Σ b1²             (e1·e2) Σ b1 b2 | |z1|   | Σ b1 (e1 · d_i) |
//! | (e1·e2) Σ b1 b2   Σ b2²           | |z2| = | Σ b2 (e2 · d_i) |
//! ```
//!
//! where `b0..b3` are the cubic Bernstein weights at `t_i` and
//! `d_i = s_i - p0 (b0 + b1) - p3 (b2 + b3)`.

use core::ops::RangeInclusive;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::common::{bernstein3, ZERO_THRESHOLD};
use crate::{ChordLengths, CubicBez, FitError, ParamCurve, Point, Vec2};

/// The worst-fitting sample of a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deviation {
    /// Euclidean distance between the sample and the segment evaluated at
    /// the sample's parameter.
    pub distance: f64,
    /// Index of the sample. Ties resolve to the lowest index.
    pub index: usize,
}

/// Fit one cubic Bézier to `points[first..=last]` without subdivision.
///
/// The end tangents are taken from the first two and the last two samples
/// of the range, and the chord-length parameterization is computed over the
/// range alone, so the result does not depend on samples outside it.
///
/// # Errors
///
/// - [`FitError::NotEnoughPoints`] if `last <= first`.
/// - [`FitError::OutOfBounds`] if `last` is not a valid index.
/// - [`FitError::NonFinitePoint`] if a sample in the range is not finite.
/// - [`FitError::DegenerateTangent`] if an end tangent has zero length.
/// - [`FitError::DegenerateSpan`] if the samples of the range coincide.
///
/// # Examples
///
/// ```
/// use bezapprox::{fit_single_segment, ParamCurve, Point};
///
/// let pts = [
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 2.0),
///     Point::new(3.0, 2.5),
///     Point::new(4.0, 0.0),
/// ];
/// let c = fit_single_segment(&pts, 0, 3).unwrap();
/// assert_eq!(c.eval(0.0), pts[0]);
/// assert_eq!(c.eval(1.0), pts[3]);
/// ```
pub fn fit_single_segment(
    points: &[Point],
    first: usize,
    last: usize,
) -> Result<CubicBez, FitError> {
    if last <= first {
        return Err(FitError::NotEnoughPoints {
            required: 2,
            actual: usize::from(last == first),
        });
    }
    if last >= points.len() {
        return Err(FitError::OutOfBounds {
            index: last,
            len: points.len(),
        });
    }
    let samples = &points[first..=last];
    if let Some(i) = samples.iter().position(|p| !p.is_finite()) {
        return Err(FitError::NonFinitePoint { index: first + i });
    }
    let n = samples.len();
    let e1 = unit_tangent(samples[1] - samples[0], first, ZERO_THRESHOLD)?;
    let e2 = unit_tangent(samples[n - 2] - samples[n - 1], last, ZERO_THRESHOLD)?;
    let chords = ChordLengths::new(samples)?;
    fit_with_tangents(samples, &(0..=n - 1), e1, e2, &chords, ZERO_THRESHOLD)
}

/// Find the sample of `range` farthest from `segment`.
///
/// Each sample is compared against the segment evaluated at its local
/// chord-length parameter. The scan runs left to right and only a strictly
/// larger distance replaces the current worst, so ties keep the first index.
///
/// # Errors
///
/// - [`FitError::NotEnoughPoints`] if the range is empty.
/// - [`FitError::OutOfBounds`] if the range reaches past `points` or `chords`.
/// - [`FitError::DegenerateSpan`] if the range has no chord length.
pub fn max_deviation(
    segment: &CubicBez,
    points: &[Point],
    range: RangeInclusive<usize>,
    chords: &ChordLengths,
    threshold: f64,
) -> Result<Deviation, FitError> {
    if range.is_empty() {
        return Err(FitError::NotEnoughPoints {
            required: 1,
            actual: 0,
        });
    }
    let len = points.len().min(chords.len());
    if *range.end() >= len {
        return Err(FitError::OutOfBounds {
            index: *range.end(),
            len,
        });
    }
    let mut worst = Deviation {
        distance: -1.0,
        index: *range.start(),
    };
    for i in range.clone() {
        let t = chords.local_t(i, &range, threshold)?;
        let distance = segment.eval(t).distance(points[i]);
        if distance > worst.distance {
            worst = Deviation { distance, index: i };
        }
    }
    Ok(worst)
}

/// Normalize a difference of samples into a tangent direction.
///
/// `index` names the sample the tangent is attached to, for error reporting.
pub(crate) fn unit_tangent(v: Vec2, index: usize, threshold: f64) -> Result<Vec2, FitError> {
    v.try_normalize(threshold)
        .ok_or(FitError::DegenerateTangent { index })
}

/// Least-squares fit of one segment over `range` with fixed end tangents.
///
/// `e1` is the direction leaving the first sample and `e2` the direction
/// entering the last sample, pointing back toward the interior. Both must be
/// unit vectors. The range must lie within `points` and `chords`.
pub(crate) fn fit_with_tangents(
    points: &[Point],
    range: &RangeInclusive<usize>,
    e1: Vec2,
    e2: Vec2,
    chords: &ChordLengths,
    threshold: f64,
) -> Result<CubicBez, FitError> {
    let (first, last) = (*range.start(), *range.end());
    let count = last.saturating_add(1).saturating_sub(first);
    if count < 2 {
        return Err(FitError::NotEnoughPoints {
            required: 2,
            actual: count,
        });
    }
    let p0 = points[first];
    let p3 = points[last];

    let (z1, z2) = if count == 2 {
        (1.0, 1.0)
    } else {
        let mut a11 = 0.0;
        let mut a12 = 0.0;
        let mut a22 = 0.0;
        let mut d1 = 0.0;
        let mut d2 = 0.0;
        for i in first..=last {
            let t = chords.local_t(i, range, threshold)?;
            let [b0, b1, b2, b3] = bernstein3(t);
            a11 += b1 * b1;
            a12 += b1 * b2;
            a22 += b2 * b2;
            let d = points[i].to_vec2() - p0.to_vec2() * (b0 + b1) - p3.to_vec2() * (b2 + b3);
            d1 += b1 * e1.dot(d);
            d2 += b2 * e2.dot(d);
        }
        a12 *= e1.dot(e2);
        let det = a11 * a22 - a12 * a12;
        if det.abs() < threshold {
            log::trace!("singular system on {first}..={last} (det {det:e}), using unit offsets");
            (1.0, 1.0)
        } else {
            ((a22 * d1 - a12 * d2) / det, (a11 * d2 - a12 * d1) / det)
        }
    };

    Ok(CubicBez::new(p0, p0 + z1 * e1, p3 + z2 * e2, p3))
}

#[cfg(test)]
mod tests {
    use super::{fit_with_tangents, max_deviation, unit_tangent, Deviation};
    use crate::common::ZERO_THRESHOLD;
    use crate::{fit_single_segment, ChordLengths, CubicBez, FitError, ParamCurve, Point, Vec2};

    fn scenario_points() -> [Point; 8] {
        [
            Point::new(50.00, 300.00),
            Point::new(65.00, 240.12),
            Point::new(110.00, 139.60),
            Point::new(170.00, 132.80),
            Point::new(230.00, 181.20),
            Point::new(290.00, 186.40),
            Point::new(335.00, 102.76),
            Point::new(350.00, 50.00),
        ]
    }

    /// Summed squared distance of samples to a segment at chord-length parameters.
    fn sse(c: &CubicBez, points: &[Point]) -> f64 {
        let chords = ChordLengths::new(points).unwrap();
        let range = 0..=points.len() - 1;
        range
            .clone()
            .map(|i| {
                let t = chords.local_t(i, &range, ZERO_THRESHOLD).unwrap();
                c.eval(t).distance_squared(points[i])
            })
            .sum()
    }

    #[test]
    fn two_points_use_unit_offsets() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let chords = ChordLengths::new(&pts).unwrap();
        let c = fit_with_tangents(
            &pts,
            &(0..=1),
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
            &chords,
            ZERO_THRESHOLD,
        )
        .unwrap();
        assert_eq!(
            c,
            CubicBez::new((0.0, 0.0), (1.0, 0.0), (9.0, 0.0), (10.0, 0.0))
        );
    }

    #[test]
    fn fewer_than_two_points_rejected() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let chords = ChordLengths::new(&pts).unwrap();
        let err = fit_with_tangents(
            &pts,
            &(1..=1),
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
            &chords,
            ZERO_THRESHOLD,
        );
        assert_eq!(
            err,
            Err(FitError::NotEnoughPoints {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn singular_system_falls_back_to_unit_offsets() {
        // One interior sample makes the normal equations rank deficient.
        let pts = [
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ];
        let c = fit_single_segment(&pts, 0, 2).unwrap();
        let e = Vec2::new(1.0, 1.0).normalize();
        assert!((c.p1 - (pts[0] + e)).hypot() < 1e-12);
        assert!((c.p2 - (pts[2] + (-e))).hypot() < 1e-12);
        assert!(c.eval(0.5).distance(pts[1]) < 1e-12);
    }

    #[test]
    fn collinear_samples_fit_exactly() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(6.0, 0.0),
        ];
        let c = fit_single_segment(&pts, 0, 3).unwrap();
        let chords = ChordLengths::new(&pts).unwrap();
        let dev = max_deviation(&c, &pts, 0..=3, &chords, ZERO_THRESHOLD).unwrap();
        assert!(dev.distance < 1e-9, "deviation {dev:?}");
    }

    #[test]
    fn scenario_single_segment() {
        let pts = scenario_points();
        let c = fit_single_segment(&pts, 0, pts.len() - 1).unwrap();
        assert_eq!(c.p0, pts[0]);
        assert_eq!(c.p3, pts[7]);
        // Inner control points stay on the end tangent lines.
        assert!((c.p1 - c.p0).cross(pts[1] - pts[0]).abs() < 1e-6);
        assert!((c.p2 - c.p3).cross(pts[6] - pts[7]).abs() < 1e-6);
        assert!(c.is_finite());
    }

    #[test]
    fn least_squares_is_a_minimum() {
        let pts = scenario_points();
        let c = fit_single_segment(&pts, 0, pts.len() - 1).unwrap();
        let e1 = (pts[1] - pts[0]).normalize();
        let e2 = (pts[6] - pts[7]).normalize();
        let best = sse(&c, &pts);
        for (dz1, dz2) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0), (0.5, -0.5)] {
            let other = CubicBez::new(c.p0, c.p1 + dz1 * e1, c.p2 + dz2 * e2, c.p3);
            assert!(best <= sse(&other, &pts), "perturbation ({dz1}, {dz2}) fits better");
        }
    }

    #[test]
    fn sub_range_ignores_outside_samples() {
        let pts = scenario_points();
        let from_range = fit_single_segment(&pts, 2, 5).unwrap();
        let from_slice = fit_single_segment(&pts[2..=5], 0, 3).unwrap();
        assert_eq!(from_range, from_slice);
    }

    #[test]
    fn single_segment_errors() {
        let pts = scenario_points();
        assert_eq!(
            fit_single_segment(&pts, 3, 3),
            Err(FitError::NotEnoughPoints {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            fit_single_segment(&pts, 5, 2),
            Err(FitError::NotEnoughPoints {
                required: 2,
                actual: 0
            })
        );
        assert_eq!(
            fit_single_segment(&pts, 0, 8),
            Err(FitError::OutOfBounds { index: 8, len: 8 })
        );
        assert_eq!(
            fit_single_segment(&pts, usize::MAX, usize::MAX),
            Err(FitError::NotEnoughPoints {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            fit_single_segment(&pts, 0, usize::MAX),
            Err(FitError::OutOfBounds {
                index: usize::MAX,
                len: 8
            })
        );

        let dup = [
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(4.0, 2.0),
        ];
        assert_eq!(
            fit_single_segment(&dup, 0, 2),
            Err(FitError::DegenerateTangent { index: 0 })
        );
        let nan = [Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        assert_eq!(
            fit_single_segment(&nan, 0, 1),
            Err(FitError::NonFinitePoint { index: 1 })
        );
    }

    #[test]
    fn deviation_ties_pick_first() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(3.0, -1.0),
            Point::new(4.0, 0.0),
        ];
        let line = CubicBez::new((0.0, 0.0), (4.0 / 3.0, 0.0), (8.0 / 3.0, 0.0), (4.0, 0.0));
        let chords = ChordLengths::new(&pts).unwrap();
        let dev = max_deviation(&line, &pts, 0..=3, &chords, ZERO_THRESHOLD).unwrap();
        assert_eq!(
            dev,
            Deviation {
                distance: 1.0,
                index: 1
            }
        );
    }

    #[test]
    fn deviation_range_checks() {
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let chords = ChordLengths::new(&pts).unwrap();
        let c = CubicBez::from_point(pts[0]);
        let mut empty = 0..=0;
        assert_eq!(empty.next(), Some(0));
        assert!(matches!(
            max_deviation(&c, &pts, empty, &chords, ZERO_THRESHOLD),
            Err(FitError::NotEnoughPoints { .. })
        ));
        assert_eq!(
            max_deviation(&c, &pts, 0..=2, &chords, ZERO_THRESHOLD),
            Err(FitError::OutOfBounds { index: 2, len: 2 })
        );
    }

    #[test]
    fn tangent_of_coincident_samples() {
        assert_eq!(
            unit_tangent(Vec2::ZERO, 3, ZERO_THRESHOLD),
            Err(FitError::DegenerateTangent { index: 3 })
        );
    }
}
