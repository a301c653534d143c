// Copyright 2024 the Bezapprox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive subdivision: fit a whole sample sequence with as few cubic
//! segments as the precision allows.
//!
//! The full range is fitted first. Whenever a fitted range has a sample
//! farther than `precision` from the curve, the range is split at its
//! worst sample and both halves are refitted, with a shared tangent at the
//! split point estimated from the split sample's two neighbors. Pending
//! ranges live on an explicit stack whose size never exceeds `n - 1`, the
//! number of adjacent sample pairs, so memory stays bounded regardless of
//! how the input bends.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::common::ZERO_THRESHOLD;
use crate::fit::{fit_with_tangents, max_deviation, unit_tangent};
use crate::{ChordLengths, CubicBez, FitError, Point, Vec2};

/// Options for fitting sample sequences.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FitOptions {
    zero_threshold: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            zero_threshold: ZERO_THRESHOLD,
        }
    }
}

impl FitOptions {
    /// Set the threshold below which tangent lengths, chord spans and the
    /// least-squares determinant count as zero.
    ///
    /// Defaults to [`ZERO_THRESHOLD`](crate::common::ZERO_THRESHOLD).
    #[must_use]
    pub fn zero_threshold(mut self, zero_threshold: f64) -> Self {
        self.zero_threshold = zero_threshold;
        self
    }

    /// The current zero threshold.
    pub fn get_zero_threshold(&self) -> f64 {
        self.zero_threshold
    }
}

/// A range awaiting its error check, with the segment already fitted to it.
struct WorkItem {
    range: RangeInclusive<usize>,
    e1: Vec2,
    e2: Vec2,
    segment: CubicBez,
}

/// Check that a range can be split at `index`.
///
/// Fitted segments pass exactly through the samples at both ends of their
/// range, and the deviation scan only replaces its worst sample on a strictly
/// larger distance, so with finite input the worst sample of a failing range
/// is always interior and this never errors.
fn interior_split(index: usize, range: &RangeInclusive<usize>) -> Result<usize, FitError> {
    if index <= *range.start() || index >= *range.end() {
        return Err(FitError::SplitAtEndpoint { index });
    }
    Ok(index)
}

/// Fit `points` with piecewise cubic Béziers.
///
/// Every sample ends up within `precision` of the segment covering it,
/// measured at the sample's chord-length parameter. Segments are returned
/// left to right; each starts where the previous one ends.
///
/// A single sample produces one segment with all control points on it.
///
/// # Errors
///
/// See [`fit_points_with`].
///
/// # Examples
///
/// ```
/// use bezapprox::{fit_points, ParamCurve, Point};
///
/// let pts: Vec<Point> = (0..20)
///     .map(|i| {
///         let x = i as f64 * 0.25;
///         Point::new(x, x.sin())
///     })
///     .collect();
/// let segments = fit_points(&pts, 0.01).unwrap();
/// assert_eq!(segments[0].eval(0.0), pts[0]);
/// assert_eq!(segments.last().unwrap().eval(1.0), pts[19]);
/// ```
pub fn fit_points(points: &[Point], precision: f64) -> Result<Vec<CubicBez>, FitError> {
    fit_points_with(points, precision, &FitOptions::default())
}

/// Fit `points` with piecewise cubic Béziers, with explicit options.
///
/// # Errors
///
/// - [`FitError::NotEnoughPoints`] if `points` is empty.
/// - [`FitError::InvalidPrecision`] if `precision` is negative or NaN.
/// - [`FitError::NonFinitePoint`] if a sample is infinite or NaN.
/// - [`FitError::DegenerateTangent`] if an end or split tangent would be
///   computed from coincident samples.
/// - [`FitError::DegenerateSpan`] if a range to be fitted consists of
///   coincident samples.
/// - [`FitError::SplitAtEndpoint`] if a range fails the precision check at
///   one of its endpoints.
/// - [`FitError::Allocation`] if the working buffers cannot be allocated.
pub fn fit_points_with(
    points: &[Point],
    precision: f64,
    opts: &FitOptions,
) -> Result<Vec<CubicBez>, FitError> {
    let n = points.len();
    if n == 0 {
        return Err(FitError::NotEnoughPoints {
            required: 1,
            actual: 0,
        });
    }
    if precision.is_nan() || precision < 0.0 {
        return Err(FitError::InvalidPrecision(precision));
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(FitError::NonFinitePoint { index });
    }
    if n == 1 {
        let mut segments = Vec::new();
        segments
            .try_reserve_exact(1)
            .map_err(|_| FitError::Allocation)?;
        segments.push(CubicBez::from_point(points[0]));
        return Ok(segments);
    }

    let threshold = opts.zero_threshold;
    let e1 = unit_tangent(points[1] - points[0], 0, threshold)?;
    let e2 = unit_tangent(points[n - 2] - points[n - 1], n - 1, threshold)?;
    let chords = ChordLengths::new(points)?;

    // Pending ranges are disjoint apart from shared endpoints, and so are
    // accepted ones, so neither can hold more than n - 1 entries.
    let capacity = n - 1;
    let mut stack: Vec<WorkItem> = Vec::new();
    stack
        .try_reserve_exact(capacity)
        .map_err(|_| FitError::Allocation)?;
    let mut accepted: Vec<(usize, CubicBez)> = Vec::new();
    accepted
        .try_reserve_exact(capacity)
        .map_err(|_| FitError::Allocation)?;

    log::debug!(
        "fitting {n} samples, length {:.3}, precision {precision}",
        chords.total()
    );

    let range = 0..=n - 1;
    let segment = fit_with_tangents(points, &range, e1, e2, &chords, threshold)?;
    stack.push(WorkItem {
        range,
        e1,
        e2,
        segment,
    });

    while let Some(item) = stack.pop() {
        let (first, last) = (*item.range.start(), *item.range.end());
        let worst = max_deviation(&item.segment, points, item.range.clone(), &chords, threshold)?;
        if worst.distance <= precision {
            log::trace!("accepted {first}..={last}, deviation {:e}", worst.distance);
            debug_assert!(accepted.len() < capacity, "more segments than sample pairs");
            accepted.push((first, item.segment));
            continue;
        }

        let split = interior_split(worst.index, &item.range)?;
        log::trace!(
            "splitting {first}..={last} at {split}, deviation {:e}",
            worst.distance
        );
        let e_split = unit_tangent(points[split + 1] - points[split - 1], split, threshold)?;

        // Right half goes in first so the left half is popped next.
        let right = split..=last;
        let right_fit = fit_with_tangents(points, &right, e_split, item.e2, &chords, threshold)?;
        stack.push(WorkItem {
            range: right,
            e1: e_split,
            e2: item.e2,
            segment: right_fit,
        });
        let left = first..=split;
        let left_fit = fit_with_tangents(points, &left, item.e1, -e_split, &chords, threshold)?;
        stack.push(WorkItem {
            range: left,
            e1: item.e1,
            e2: -e_split,
            segment: left_fit,
        });
        debug_assert!(stack.len() <= capacity, "work stack exceeded n - 1");
    }

    // Stack order is an implementation detail; the output is ordered by
    // where each range starts.
    accepted.sort_unstable_by_key(|&(start, _)| start);
    let mut segments = Vec::new();
    segments
        .try_reserve_exact(accepted.len())
        .map_err(|_| FitError::Allocation)?;
    segments.extend(accepted.into_iter().map(|(_, c)| c));

    log::debug!("fitted {n} samples with {} segments", segments.len());
    Ok(segments)
}

/// Fit `points` and write the segments into a caller-supplied buffer.
///
/// On success the first `k` entries of `out` hold the segments and `k` is
/// returned. If `out` is shorter than `k`, nothing is written and
/// [`FitError::BufferTooSmall`] reports `k`, so the call can be repeated
/// with a large enough buffer. A buffer of `points.len().max(1)` entries is
/// always sufficient.
///
/// # Errors
///
/// [`FitError::BufferTooSmall`], or any error of [`fit_points`].
///
/// # Examples
///
/// ```
/// use bezapprox::{fit_points_into, CubicBez, FitError, Point};
///
/// let pts = [Point::new(0.0, 0.0), Point::new(1.0, 3.0), Point::new(4.0, 4.0)];
/// let mut buf: Vec<CubicBez> = Vec::new();
/// let n = loop {
///     match fit_points_into(&pts, 0.1, &mut buf) {
///         Ok(n) => break n,
///         Err(FitError::BufferTooSmall { required }) => {
///             buf.resize(required, CubicBez::from_point(Point::ZERO));
///         }
///         Err(e) => panic!("{e}"),
///     }
/// };
/// assert!(n >= 1);
/// ```
pub fn fit_points_into(
    points: &[Point],
    precision: f64,
    out: &mut [CubicBez],
) -> Result<usize, FitError> {
    let segments = fit_points(points, precision)?;
    let required = segments.len();
    let Some(dest) = out.get_mut(..required) else {
        return Err(FitError::BufferTooSmall { required });
    };
    dest.copy_from_slice(&segments);
    Ok(required)
}
