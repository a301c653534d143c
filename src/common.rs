// Copyright 2024 the Bezapprox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

/// Lengths, spans and determinants at or below this value are treated as zero.
pub const ZERO_THRESHOLD: f64 = 1.0e-9;

/// Binomial coefficients of the cubic Bernstein basis.
pub const BINOMIAL_3: [f64; 4] = [1.0, 3.0, 3.0, 1.0];

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs: Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("bezapprox requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn hypot(self, other: Self) -> Self => hypot;
}

/// The four cubic Bernstein basis values at parameter `t`.
///
/// The weights sum to one for any `t`. At `t = 0` the result is exactly
/// `[1, 0, 0, 0]` and at `t = 1` exactly `[0, 0, 0, 1]`, so evaluating a
/// curve there reproduces its endpoints bit for bit.
///
/// # Examples
///
/// ```
/// use bezapprox::common::bernstein3;
///
/// assert_eq!(bernstein3(0.0), [1.0, 0.0, 0.0, 0.0]);
/// assert_eq!(bernstein3(0.5), [0.125, 0.375, 0.375, 0.125]);
/// ```
#[inline]
pub fn bernstein3(t: f64) -> [f64; 4] {
    let mt = 1.0 - t;
    let t_pows = [1.0, t, t * t, t * t * t];
    let mt_pows = [1.0, mt, mt * mt, mt * mt * mt];
    let mut weights = [0.0; 4];
    for (j, w) in weights.iter_mut().enumerate() {
        *w = BINOMIAL_3[j] * mt_pows[3 - j] * t_pows[j];
    }
    weights
}
