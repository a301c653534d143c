// Copyright 2024 the Bezapprox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by curve fitting.

use thiserror::Error;

/// Errors that can occur while fitting Bézier segments to samples.
///
/// Every variant maps onto one of four legacy integer status codes; see
/// [`FitError::code`].
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FitError {
    /// The worst-fitting sample of a range is one of its endpoints, so the
    /// range cannot be split any further.
    #[error("cannot split range at endpoint sample {index}")]
    SplitAtEndpoint {
        /// Index of the worst-fitting sample.
        index: usize,
    },

    /// The work stack or result buffer could not be allocated.
    #[error("failed to allocate fitting buffers")]
    Allocation,

    /// A tangent was derived from two coincident samples.
    #[error("zero-length tangent at sample {index}")]
    DegenerateTangent {
        /// Index of the sample the tangent belongs to.
        index: usize,
    },

    /// All samples of a fit range lie on top of each other, so the range
    /// has no chord length to parameterize.
    #[error("samples {first}..={last} span no distance")]
    DegenerateSpan {
        /// First sample of the range.
        first: usize,
        /// Last sample of the range.
        last: usize,
    },

    /// The requested precision is negative or NaN.
    #[error("precision must be a non-negative number, got {0}")]
    InvalidPrecision(f64),

    /// A sample has an infinite or NaN coordinate.
    #[error("sample {index} is not finite")]
    NonFinitePoint {
        /// Index of the offending sample.
        index: usize,
    },

    /// A sample index is past the end of the input.
    #[error("sample index {index} out of bounds for {len} samples")]
    OutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of samples.
        len: usize,
    },

    /// The input or range has too few samples.
    #[error("need at least {required} samples, got {actual}")]
    NotEnoughPoints {
        /// Minimum number of samples.
        required: usize,
        /// Number of samples supplied.
        actual: usize,
    },

    /// The destination buffer cannot hold the fitted segments.
    ///
    /// Retry with a buffer of at least `required` segments.
    #[error("buffer too small: {required} segments required")]
    BufferTooSmall {
        /// Number of segments produced by the fit.
        required: usize,
    },
}

impl FitError {
    /// Generic failure.
    pub const FAILED: i32 = -1;
    /// Invalid arguments or degenerate geometry.
    pub const ARGUMENTS_ERROR: i32 = -2;
    /// Not enough samples.
    pub const NOT_ENOUGH_POINTS: i32 = -3;
    /// Destination buffer too small.
    pub const BUFFER_TOO_SMALL: i32 = -4;

    /// The integer status code of this error.
    ///
    /// Success is `0` and is never produced by an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bezapprox::FitError;
    ///
    /// assert_eq!(FitError::BufferTooSmall { required: 3 }.code(), -4);
    /// assert_eq!(FitError::DegenerateTangent { index: 0 }.code(), -2);
    /// ```
    pub fn code(&self) -> i32 {
        match self {
            Self::SplitAtEndpoint { .. } | Self::Allocation => Self::FAILED,
            Self::DegenerateTangent { .. }
            | Self::DegenerateSpan { .. }
            | Self::InvalidPrecision(_)
            | Self::NonFinitePoint { .. }
            | Self::OutOfBounds { .. } => Self::ARGUMENTS_ERROR,
            Self::NotEnoughPoints { .. } => Self::NOT_ENOUGH_POINTS,
            Self::BufferTooSmall { .. } => Self::BUFFER_TOO_SMALL,
        }
    }

    /// Whether the caller can retry the same call and expect it to succeed.
    ///
    /// Only [`FitError::BufferTooSmall`] is recoverable, by supplying a
    /// larger buffer.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::BufferTooSmall { .. })
    }

    /// The buffer size needed to retry, if this is a buffer error.
    pub fn required_capacity(&self) -> Option<usize> {
        match self {
            Self::BufferTooSmall { required } => Some(*required),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FitError;

    #[test]
    fn codes() {
        assert_eq!(FitError::SplitAtEndpoint { index: 4 }.code(), -1);
        assert_eq!(FitError::Allocation.code(), -1);
        assert_eq!(FitError::DegenerateSpan { first: 1, last: 2 }.code(), -2);
        assert_eq!(FitError::InvalidPrecision(-1.0).code(), -2);
        assert_eq!(FitError::NonFinitePoint { index: 0 }.code(), -2);
        assert_eq!(FitError::OutOfBounds { index: 9, len: 3 }.code(), -2);
        assert_eq!(
            FitError::NotEnoughPoints {
                required: 2,
                actual: 1
            }
            .code(),
            -3
        );
    }

    #[test]
    fn only_buffer_errors_are_recoverable() {
        let err = FitError::BufferTooSmall { required: 7 };
        assert!(err.is_recoverable());
        assert_eq!(err.required_capacity(), Some(7));
        assert!(!FitError::Allocation.is_recoverable());
        assert_eq!(FitError::Allocation.required_capacity(), None);
    }

    #[test]
    fn messages() {
        assert_eq!(
            FitError::BufferTooSmall { required: 3 }.to_string(),
            "buffer too small: 3 segments required"
        );
        assert_eq!(
            FitError::DegenerateSpan { first: 2, last: 5 }.to_string(),
            "samples 2..=5 span no distance"
        );
    }
}
