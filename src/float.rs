//! Floating-point abstraction trait for generic numeric operations.

use core::cmp::PartialOrd;
use core::ops::{Add, Sub, Mul, Div, Neg};

/// Trait abstracting the floating-point operations the spring math needs.
///
/// Implemented for `f32` and `f64`. Transcendentals go through `libm` so the
/// crate builds without `std`.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Two (2.0).
    fn two() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Sine.
    fn sin(self) -> Self;
    /// Cosine.
    fn cos(self) -> Self;
    /// Natural exponential (e^self).
    fn exp(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// `true` unless the value is NaN or infinite.
    fn is_finite(self) -> bool;
    /// Convert from f32 (for constants and configuration).
    fn from_f32(v: f32) -> Self;
    /// Convert from f64 (for clock readings).
    fn from_f64(v: f64) -> Self;

    /// Minimum of two values. Returns `other` when `self` is NaN.
    fn min(self, other: Self) -> Self {
        if self < other { self } else { other }
    }

    /// Maximum of two values. Returns `other` when `self` is NaN.
    fn max(self, other: Self) -> Self {
        if self > other { self } else { other }
    }

    /// Clamp self to [min, max]. NaN collapses to `min`.
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Check if approximately zero within epsilon.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn two() -> Self { 2.0 }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn sin(self) -> Self { libm::sinf(self) }
    fn cos(self) -> Self { libm::cosf(self) }
    fn exp(self) -> Self { libm::expf(self) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn is_finite(self) -> bool { f32::is_finite(self) }
    fn from_f32(v: f32) -> Self { v }
    fn from_f64(v: f64) -> Self { v as f32 }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn two() -> Self { 2.0 }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn sin(self) -> Self { libm::sin(self) }
    fn cos(self) -> Self { libm::cos(self) }
    fn exp(self) -> Self { libm::exp(self) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn is_finite(self) -> bool { f64::is_finite(self) }
    fn from_f32(v: f32) -> Self { v as f64 }
    fn from_f64(v: f64) -> Self { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_absorbs_nan() {
        assert_eq!(Float::clamp(f32::NAN, 0.0, 1.0), 0.0);
        assert_eq!(Float::clamp(f64::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(Float::clamp(2.5f64, 0.0, 1.0), 1.0);
        assert_eq!(Float::clamp(-0.5f64, 0.0, 1.0), 0.0);
        assert_eq!(Float::clamp(0.25f32, 0.0, 1.0), 0.25);
    }

    #[test]
    fn finite_checks() {
        assert!(<f64 as Float>::is_finite(1.0));
        assert!(!<f64 as Float>::is_finite(f64::INFINITY));
        assert!(!<f32 as Float>::is_finite(f32::NAN));
    }
}
