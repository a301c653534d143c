// Copyright 2024 the Bezapprox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chord-length parameterization of a sample sequence.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::{FitError, Point};

/// Cumulative chord lengths of a sample sequence.
///
/// Entry `i` is the length of the polyline through samples `0..=i`, so the
/// table starts at zero and never decreases. It is built once per fit and
/// shared by every range fitted afterwards; each range normalizes it locally
/// with [`local_t`](Self::local_t).
#[derive(Clone, Debug)]
pub struct ChordLengths(Vec<f64>);

impl ChordLengths {
    /// Build the table for `points`.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::Allocation`] if the table cannot be allocated.
    pub fn new(points: &[Point]) -> Result<Self, FitError> {
        let mut table = Vec::new();
        table
            .try_reserve_exact(points.len())
            .map_err(|_| FitError::Allocation)?;
        let mut total = 0.0;
        let mut prev = points.first().copied();
        for &p in points {
            if let Some(q) = prev {
                total += p.distance(q);
            }
            table.push(total);
            prev = Some(p);
        }
        Ok(Self(table))
    }

    /// The parameter of sample `i` within `range`, in [0, 1].
    ///
    /// # Errors
    ///
    /// - [`FitError::OutOfBounds`] if `range` reaches past the table, or `i`
    ///   is not inside `range`.
    /// - [`FitError::DegenerateSpan`] when the chord length of the range is at
    ///   or below `threshold`.
    #[inline]
    pub fn local_t(
        &self,
        i: usize,
        range: &RangeInclusive<usize>,
        threshold: f64,
    ) -> Result<f64, FitError> {
        let (first, last) = (*range.start(), *range.end());
        let len = self.0.len();
        let (Some(&start), Some(&end), Some(&at)) =
            (self.0.get(first), self.0.get(last), self.0.get(i))
        else {
            return Err(FitError::OutOfBounds {
                index: first.max(last).max(i),
                len,
            });
        };
        if !range.contains(&i) {
            return Err(FitError::OutOfBounds { index: i, len });
        }
        let span = end - start;
        if span.is_nan() || span <= threshold {
            return Err(FitError::DegenerateSpan { first, last });
        }
        Ok((at - start) / span)
    }

    /// Total length of the polyline.
    pub fn total(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }

    /// Number of entries, equal to the number of samples.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw cumulative lengths.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::common::ZERO_THRESHOLD;
    use crate::{ChordLengths, FitError, Point};

    #[test]
    fn cumulative_lengths() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(3.0, 4.0),
            Point::new(3.0, 10.0),
        ];
        let chords = ChordLengths::new(&pts).unwrap();
        assert_eq!(chords.as_slice(), &[0.0, 5.0, 5.0, 11.0]);
        assert_eq!(chords.total(), 11.0);
        assert_eq!(chords.len(), 4);
    }

    #[test]
    fn single_and_empty() {
        let chords = ChordLengths::new(&[Point::new(1.0, 1.0)]).unwrap();
        assert_eq!(chords.as_slice(), &[0.0]);
        let chords = ChordLengths::new(&[]).unwrap();
        assert!(chords.is_empty());
        assert_eq!(chords.total(), 0.0);
    }

    #[test]
    fn local_parameter_normalized_per_range() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(6.0, 0.0),
        ];
        let chords = ChordLengths::new(&pts).unwrap();
        let whole = 0..=3;
        assert_eq!(chords.local_t(0, &whole, ZERO_THRESHOLD).unwrap(), 0.0);
        assert_eq!(chords.local_t(2, &whole, ZERO_THRESHOLD).unwrap(), 0.5);
        assert_eq!(chords.local_t(3, &whole, ZERO_THRESHOLD).unwrap(), 1.0);
        let tail = 1..=3;
        assert_eq!(chords.local_t(1, &tail, ZERO_THRESHOLD).unwrap(), 0.0);
        assert_eq!(chords.local_t(2, &tail, ZERO_THRESHOLD).unwrap(), 0.4);
    }

    #[test]
    fn coincident_range_is_rejected() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 2.0),
        ];
        let chords = ChordLengths::new(&pts).unwrap();
        assert_eq!(
            chords.local_t(1, &(1..=2), ZERO_THRESHOLD),
            Err(FitError::DegenerateSpan { first: 1, last: 2 })
        );
    }

    #[test]
    fn indices_outside_table_or_range() {
        let chords = ChordLengths::new(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).unwrap();
        assert_eq!(
            chords.local_t(5, &(0..=1), ZERO_THRESHOLD),
            Err(FitError::OutOfBounds { index: 5, len: 2 })
        );
        assert_eq!(
            chords.local_t(0, &(0..=7), ZERO_THRESHOLD),
            Err(FitError::OutOfBounds { index: 7, len: 2 })
        );
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        let chords = ChordLengths::new(&pts).unwrap();
        assert_eq!(
            chords.local_t(0, &(1..=2), ZERO_THRESHOLD),
            Err(FitError::OutOfBounds { index: 0, len: 3 })
        );
        assert_eq!(chords.local_t(1, &(0..=2), ZERO_THRESHOLD), Ok(0.5));
    }
}
