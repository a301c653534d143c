// Copyright 2024 the Bezapprox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path representation of fitted segments.

use alloc::string::{String, ToString};
use core::fmt;

use crate::CubicBez;

/// Display adapter that writes a run of segments as SVG path data.
///
/// Created by [`SvgPath::new`]; see [`to_svg`] for the common case.
#[derive(Clone, Copy, Debug)]
pub struct SvgPath<'a>(&'a [CubicBez]);

impl<'a> SvgPath<'a> {
    /// Wrap a slice of segments.
    pub fn new(segments: &'a [CubicBez]) -> Self {
        Self(segments)
    }
}

impl fmt::Display for SvgPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = None;
        for c in self.0 {
            if current != Some(c.p0) {
                if current.is_some() {
                    write!(f, " ")?;
                }
                write!(f, "M{} {}", c.p0.x, c.p0.y)?;
            }
            write!(
                f,
                " C{} {} {} {} {} {}",
                c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y
            )?;
            current = Some(c.p3);
        }
        Ok(())
    }
}

/// Convert fitted segments to an SVG path data string.
///
/// Consecutive segments that share an endpoint are joined into one subpath;
/// a gap starts a new `M` command. The current implementation doesn't take
/// any special care to produce a short string.
///
/// # Examples
///
/// ```
/// use bezapprox::{to_svg, CubicBez};
///
/// let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
/// assert_eq!(to_svg(&[c]), "M0 0 C1 2 3 2 4 0");
/// ```
pub fn to_svg(segments: &[CubicBez]) -> String {
    SvgPath::new(segments).to_string()
}
