// Copyright 2024 the Bezapprox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting sampled 2D points with piecewise cubic Bézier curves.
//!
//! Given an ordered run of samples and a precision, [`fit_points`] returns
//! a short sequence of [`CubicBez`] segments such that every sample lies
//! within the precision of the segment covering it. Samples are assigned
//! curve parameters by cumulative chord length; each segment is a
//! least-squares fit whose inner control points lie on the tangent lines at
//! its ends; ranges that fit badly are split at their worst sample and
//! refitted.
//!
//! # Examples
//!
//! ```
//! use bezapprox::{fit_points, ParamCurve, Point};
//!
//! let pts = [
//!     Point::new(50.0, 300.0),
//!     Point::new(65.0, 240.12),
//!     Point::new(110.0, 139.6),
//!     Point::new(170.0, 132.8),
//!     Point::new(230.0, 181.2),
//!     Point::new(290.0, 186.4),
//!     Point::new(335.0, 102.76),
//!     Point::new(350.0, 50.0),
//! ];
//! let segments = fit_points(&pts, 5.0).unwrap();
//! assert_eq!(segments[0].start(), pts[0]);
//! assert_eq!(segments[segments.len() - 1].end(), pts[7]);
//! for pair in segments.windows(2) {
//!     assert_eq!(pair[0].p3, pair[1].p0);
//! }
//! ```
//!
//! Fitting a single segment over part of the input, without subdivision:
//!
//! ```
//! use bezapprox::{fit_single_segment, Point};
//!
//! let pts = [
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(2.0, 1.5),
//!     Point::new(3.0, 1.0),
//!     Point::new(4.0, 0.0),
//! ];
//! let c = fit_single_segment(&pts, 1, 4).unwrap();
//! assert_eq!(c.p0, pts[1]);
//! assert_eq!(c.p3, pts[4]);
//! ```
//!
//! # Logging
//!
//! Progress is reported through the [`log`] facade: one `debug` record at
//! the start and end of each fit and a `trace` record for every range that
//! is accepted or split. No logger is installed by this crate.
//!
//! # Feature Flags
//!
//! The following crate [feature flags](https://doc.rust-lang.org/cargo/reference/features.html#dependency-features) are available:
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//!   This is useful for `no_std` environments.
//!   However, note that the `libm` crate is not as efficient as the standard library.
//! - `mint`: Enable `From`/`Into` conversion of point and vector types with [mint][].
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on the geometry
//!   types and [`FitOptions`].
//! - `schemars`: Add best-effort support for using the geometry types in JSON schemas
//!   using [schemars][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//! Note that this crate does require that an allocator is available (i.e. it uses [alloc]).

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("bezapprox requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

mod chord;
pub mod common;
mod cubicbez;
mod error;
mod fit;
mod param_curve;
mod point;
mod subdivide;
mod svg;
mod vec2;

pub use crate::chord::ChordLengths;
pub use crate::cubicbez::CubicBez;
pub use crate::error::FitError;
pub use crate::fit::{fit_single_segment, max_deviation, Deviation};
pub use crate::param_curve::ParamCurve;
pub use crate::point::Point;
pub use crate::subdivide::{fit_points, fit_points_into, fit_points_with, FitOptions};
pub use crate::svg::{to_svg, SvgPath};
pub use crate::vec2::Vec2;
