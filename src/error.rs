//! Errors from parsing handle names and validating options.
//!
//! The geometry itself never fails: degenerate input produces a
//! degenerate (zero) crop instead.

use thiserror::Error;

/// Invalid input to one of the fallible constructors.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum CropError {
    /// A handle name other than `n`, `s`, `e`, `w`, `nw`, `ne`, `se` or `sw`.
    #[error("unknown handle ordinate, expected one of n, s, e, w, nw, ne, se, sw")]
    InvalidOrdinate,
    /// Aspect ratio that is zero, negative, or not finite.
    #[error("aspect ratio must be a finite positive number, got {0}")]
    InvalidAspect(f64),
}
