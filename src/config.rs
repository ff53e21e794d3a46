//! Configuration types for springs.

use crate::error::SpringError;
use crate::float::Float;

/// What `set_target` stores as the new anchor velocity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RetargetVelocity {
    /// Keep the velocity stored at the previous anchor, not the one resolved
    /// at the retarget time. Every other mutator resolves velocity; this one
    /// historically does not, and springs default to it for parity.
    #[default]
    Stored,
    /// Store the velocity resolved at the retarget time, like every other
    /// mutator. Velocity stays continuous across target changes.
    Resolved,
}

/// Tuning shared by scalar and vector springs.
///
/// # Builder Pattern
/// ```
/// use clockspring::config::{RetargetVelocity, SpringConfig};
///
/// let config: SpringConfig<f32> = SpringConfig::new()
///     .with_speed(6.0)
///     .with_damper(0.4)
///     .with_retarget(RetargetVelocity::Resolved);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringConfig<F: Float> {
    /// Natural frequency. 0 freezes the spring in place. Default: 1.
    pub speed: F,
    /// Damping ratio in [0, 1]. 0 oscillates forever, 1 is critical. Default: 1.
    pub damper: F,
    /// Velocity handling on target changes. Default: [`RetargetVelocity::Stored`].
    pub retarget: RetargetVelocity,
}

impl<F: Float> SpringConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SpringConfig {
            speed: F::one(),
            damper: F::one(),
            retarget: RetargetVelocity::Stored,
        }
    }

    /// Set the natural frequency.
    pub fn with_speed(mut self, speed: F) -> Self {
        self.speed = speed;
        self
    }

    /// Set the damping ratio.
    pub fn with_damper(mut self, damper: F) -> Self {
        self.damper = damper;
        self
    }

    /// Set how retargeting treats velocity.
    pub fn with_retarget(mut self, retarget: RetargetVelocity) -> Self {
        self.retarget = retarget;
        self
    }

    /// Reject values that springs would otherwise clamp.
    pub fn validate(&self) -> Result<(), SpringError> {
        if !self.speed.is_finite() {
            return Err(SpringError::NonFiniteSpeed);
        }
        if self.speed < F::zero() {
            return Err(SpringError::NegativeSpeed);
        }
        if !self.damper.is_finite() {
            return Err(SpringError::NonFiniteDamper);
        }
        if self.damper < F::zero() || self.damper > F::one() {
            return Err(SpringError::DamperOutOfRange);
        }
        Ok(())
    }
}

impl<F: Float> Default for SpringConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_unit_critical_spring() {
        let config: SpringConfig<f64> = SpringConfig::default();
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.damper, 1.0);
        assert_eq!(config.retarget, RetargetVelocity::Stored);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_each_bad_field() {
        let base: SpringConfig<f32> = SpringConfig::new();
        assert_eq!(base.with_speed(f32::NAN).validate(), Err(SpringError::NonFiniteSpeed));
        assert_eq!(base.with_speed(f32::INFINITY).validate(), Err(SpringError::NonFiniteSpeed));
        assert_eq!(base.with_speed(-1.0).validate(), Err(SpringError::NegativeSpeed));
        assert_eq!(base.with_damper(f32::NAN).validate(), Err(SpringError::NonFiniteDamper));
        assert_eq!(base.with_damper(1.5).validate(), Err(SpringError::DamperOutOfRange));
        assert_eq!(base.with_damper(-0.1).validate(), Err(SpringError::DamperOutOfRange));
    }

    #[test]
    fn boundary_values_are_valid() {
        let config: SpringConfig<f64> = SpringConfig::new().with_speed(0.0).with_damper(0.0);
        assert!(config.validate().is_ok());
        assert!(config.with_damper(1.0).validate().is_ok());
    }
}
