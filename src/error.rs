//! Error types for strict spring configuration.
//!
//! Spring operations themselves never fail: out-of-range inputs are clamped.
//! These errors only surface from [`SpringConfig::validate`](crate::SpringConfig::validate),
//! for callers that would rather reject bad tuning than have it clamped.

use core::fmt;

/// Reasons a spring configuration would be altered by sanitization.
#[derive(Debug, Clone, PartialEq)]
pub enum SpringError {
    /// Speed is NaN or infinite.
    NonFiniteSpeed,
    /// Speed must be zero or positive.
    NegativeSpeed,
    /// Damper is NaN or infinite.
    NonFiniteDamper,
    /// Damper must be in [0, 1].
    DamperOutOfRange,
}

impl fmt::Display for SpringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpringError::NonFiniteSpeed => write!(f, "speed must be finite"),
            SpringError::NegativeSpeed => write!(f, "speed must not be negative"),
            SpringError::NonFiniteDamper => write!(f, "damper must be finite"),
            SpringError::DamperOutOfRange => write!(f, "damper must be in [0, 1]"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SpringError {}
