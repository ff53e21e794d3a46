//! Analytic damped springs evaluated in closed form at any query time.
//!
//! A spring stores only its anchor: the position and velocity it had at the
//! last write. Every read solves
//!
//! ```text
//! p'' + 2·damper·speed·p' + speed²·p = speed²·target
//! ```
//!
//! from that anchor to the query time, so queries may skip frames or go
//! backwards without any drift building up.

use log::{debug, trace};

use crate::clock::Clock;
use crate::config::{RetargetVelocity, SpringConfig};
use crate::float::Float;
use crate::observer::{Mutation, NoOpObserver, SpringObserver};

/// Position, velocity and acceleration of a spring at one query time.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Motion<F: Float> {
    pub position: F,
    pub velocity: F,
    pub acceleration: F,
}

/// The `(time, position, velocity)` triple a trajectory is solved from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Anchor<F: Float> {
    pub time: F,
    pub position: F,
    pub velocity: F,
}

/// Which closed form a spring is evaluated with.
///
/// Derived from `(speed, damper)` on every query; a spring never stores it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Regime {
    /// `speed == 0`: frozen in place, velocity reads as zero.
    Inert,
    /// `damper < 1`: decaying oscillation around the target.
    Underdamped,
    /// `damper == 1`: fastest return without overshoot.
    CriticallyDamped,
}

/// One spring axis with every operation taking the time explicitly.
///
/// Reads (`sample`, `position_at`, ...) never touch the anchor. Writes resolve
/// the motion at `t` under the current parameters, store it as the new anchor
/// at `t`, then apply their change, so position is continuous across every
/// write except `set_position`/`reset`/`snap_to_target`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringState<F: Float> {
    anchor: Anchor<F>,
    target: F,
    speed: F,
    damper: F,
    retarget: RetargetVelocity,
}

impl<F: Float> SpringState<F> {
    /// A spring resting at `initial`, which is also its target.
    pub fn new(time: F, initial: F, speed: F, damper: F) -> Self {
        let config = SpringConfig::new().with_speed(speed).with_damper(damper);
        Self::with_config(time, initial, &config)
    }

    pub fn with_config(time: F, initial: F, config: &SpringConfig<F>) -> Self {
        SpringState {
            anchor: Anchor { time, position: initial, velocity: F::zero() },
            target: initial,
            speed: sanitize_speed(config.speed),
            damper: sanitize_damper(config.damper),
            retarget: config.retarget,
        }
    }

    pub fn anchor(&self) -> Anchor<F> { self.anchor }
    pub fn target(&self) -> F { self.target }
    pub fn speed(&self) -> F { self.speed }
    pub fn damper(&self) -> F { self.damper }
    pub fn retarget(&self) -> RetargetVelocity { self.retarget }

    /// Change how `set_target` treats velocity. Does not re-anchor: the
    /// trajectory is unaffected until the next retarget.
    pub fn set_retarget(&mut self, retarget: RetargetVelocity) {
        self.retarget = retarget;
    }

    pub fn regime(&self) -> Regime {
        if self.speed == F::zero() {
            Regime::Inert
        } else if self.damper < F::one() && oscillation_scale(self.damper) > F::zero() {
            Regime::Underdamped
        } else {
            Regime::CriticallyDamped
        }
    }

    /// Full motion at time `t`.
    pub fn sample(&self, t: F) -> Motion<F> {
        let (position, velocity) = self.resolve(t);
        let acceleration = match self.regime() {
            Regime::Inert => F::zero(),
            // The ODE itself, evaluated on the closed-form solution, is its
            // exact second derivative.
            _ => {
                let speed = self.speed;
                speed * speed * (self.target - position)
                    - F::two() * self.damper * speed * velocity
            }
        };
        Motion { position, velocity, acceleration }
    }

    pub fn position_at(&self, t: F) -> F { self.resolve(t).0 }
    pub fn velocity_at(&self, t: F) -> F { self.resolve(t).1 }
    pub fn acceleration_at(&self, t: F) -> F { self.sample(t).acceleration }

    /// Whether the spring is within `eps_position` of its target and moving
    /// slower than `eps_velocity` at time `t`.
    pub fn is_settled(&self, t: F, eps_position: F, eps_velocity: F) -> bool {
        let (position, velocity) = self.resolve(t);
        (position - self.target).abs() < eps_position && velocity.abs() < eps_velocity
    }

    /// Teleport to `position`, keeping the velocity resolved at `t`.
    pub fn set_position(&mut self, t: F, position: F) {
        let (_, velocity) = self.resolve(t);
        self.reanchor(t, position, velocity, Mutation::Position);
    }

    pub fn set_velocity(&mut self, t: F, velocity: F) {
        let (position, _) = self.resolve(t);
        self.reanchor(t, position, velocity, Mutation::Velocity);
    }

    /// Push the spring: `impulse` is added to the velocity resolved at `t`.
    pub fn accelerate(&mut self, t: F, impulse: F) {
        let (position, velocity) = self.resolve(t);
        self.reanchor(t, position, velocity + impulse, Mutation::Impulse);
    }

    /// Same as [`accelerate`](Self::accelerate).
    pub fn set_acceleration(&mut self, t: F, impulse: F) {
        self.accelerate(t, impulse);
    }

    /// Move the equilibrium. Position is resolved at `t`; velocity follows
    /// [`RetargetVelocity`].
    pub fn set_target(&mut self, t: F, target: F) {
        let (position, resolved) = self.resolve(t);
        let velocity = match self.retarget {
            RetargetVelocity::Stored => self.anchor.velocity,
            RetargetVelocity::Resolved => resolved,
        };
        self.reanchor(t, position, velocity, Mutation::Target);
        self.target = target;
    }

    /// Negative values become 0, non-finite values become 0.
    pub fn set_speed(&mut self, t: F, speed: F) {
        let (position, velocity) = self.resolve(t);
        self.reanchor(t, position, velocity, Mutation::Speed);
        self.speed = sanitize_speed(speed);
    }

    /// Clamped to [0, 1]; NaN becomes 0.
    pub fn set_damper(&mut self, t: F, damper: F) {
        let (position, velocity) = self.resolve(t);
        self.reanchor(t, position, velocity, Mutation::Damper);
        self.damper = sanitize_damper(damper);
    }

    /// Place the spring at `position` at rest. The target is unchanged.
    pub fn reset(&mut self, t: F, position: F) {
        self.reanchor(t, position, F::zero(), Mutation::Reset);
    }

    pub fn snap_to_target(&mut self, t: F) {
        self.reanchor(t, self.target, F::zero(), Mutation::Reset);
    }

    fn reanchor(&mut self, time: F, position: F, velocity: F, mutation: Mutation) {
        trace!(
            "spring re-anchored by {:?} at t={:?}: position={:?} velocity={:?}",
            mutation, time, position, velocity,
        );
        self.anchor = Anchor { time, position, velocity };
    }

    fn resolve(&self, t: F) -> (F, F) {
        let Anchor { time, position, velocity } = self.anchor;
        let speed = self.speed;
        let damper = self.damper;
        let x = t - time;
        let c0 = position - self.target;

        match self.regime() {
            Regime::Inert => (position, F::zero()),
            Regime::Underdamped => {
                let c = oscillation_scale(damper);
                let c1 = (velocity / speed + damper * c0) / c;
                let phase = c * speed * x;
                let co = phase.cos();
                let si = phase.sin();
                let decay = (-(damper * speed * x)).exp();

                let p = self.target + (c0 * co + c1 * si) * decay;
                let v = speed * ((c * c1 - damper * c0) * co - (c * c0 + damper * c1) * si) * decay;
                (p, v)
            }
            Regime::CriticallyDamped => {
                let c1 = velocity / speed + c0;
                let sx = speed * x;
                let decay = (-sx).exp();

                let p = self.target + (c0 + c1 * sx) * decay;
                let v = speed * (c1 - c0 - c1 * sx) * decay;
                (p, v)
            }
        }
    }
}

/// `sqrt(1 - damper²)`: damped frequency as a fraction of `speed`.
fn oscillation_scale<F: Float>(damper: F) -> F {
    (F::one() - damper * damper).max(F::zero()).sqrt()
}

fn sanitize_speed<F: Float>(speed: F) -> F {
    let sanitized = if speed.is_finite() { speed.max(F::zero()) } else { F::zero() };
    if sanitized != speed {
        debug!("spring speed {:?} clamped to {:?}", speed, sanitized);
    }
    sanitized
}

fn sanitize_damper<F: Float>(damper: F) -> F {
    let sanitized = damper.clamp(F::zero(), F::one());
    if sanitized != damper {
        debug!("spring damper {:?} clamped to {:?}", damper, sanitized);
    }
    sanitized
}

/// A single spring axis that reads its time from a [`Clock`].
///
/// ```
/// use clockspring::{ManualClock, ScalarSpring};
///
/// let clock = ManualClock::new(0.0f64);
/// let mut spring = ScalarSpring::new(0.0, 1.0, 1.0, &clock);
/// spring.set_target(10.0);
/// assert_eq!(spring.value(), 0.0);
///
/// clock.advance(30.0);
/// assert!((spring.value() - 10.0).abs() < 1e-6);
/// ```
#[derive(Clone, Debug)]
pub struct ScalarSpring<F: Float, C, O = NoOpObserver> {
    state: SpringState<F>,
    clock: C,
    observer: O,
}

impl<F: Float, C: Clock<F>> ScalarSpring<F, C> {
    /// Anchor at `clock.now()`, resting at `initial`.
    pub fn new(initial: F, speed: F, damper: F, clock: C) -> Self {
        let state = SpringState::new(clock.now(), initial, speed, damper);
        ScalarSpring { state, clock, observer: NoOpObserver }
    }

    pub fn with_config(initial: F, config: &SpringConfig<F>, clock: C) -> Self {
        let state = SpringState::with_config(clock.now(), initial, config);
        ScalarSpring { state, clock, observer: NoOpObserver }
    }
}

impl<F: Float, C: Clock<F>, O: SpringObserver<F>> ScalarSpring<F, C, O> {
    /// Replace the observer notified after every write.
    pub fn with_observer<P: SpringObserver<F>>(self, observer: P) -> ScalarSpring<F, C, P> {
        ScalarSpring { state: self.state, clock: self.clock, observer }
    }

    pub fn state(&self) -> &SpringState<F> { &self.state }
    pub fn clock(&self) -> &C { &self.clock }
    pub fn observer(&self) -> &O { &self.observer }
    pub fn observer_mut(&mut self) -> &mut O { &mut self.observer }

    pub fn motion(&self) -> Motion<F> { self.state.sample(self.clock.now()) }
    pub fn value(&self) -> F { self.state.position_at(self.clock.now()) }
    pub fn velocity(&self) -> F { self.state.velocity_at(self.clock.now()) }
    pub fn acceleration(&self) -> F { self.state.acceleration_at(self.clock.now()) }
    pub fn target(&self) -> F { self.state.target() }
    pub fn speed(&self) -> F { self.state.speed() }
    pub fn damper(&self) -> F { self.state.damper() }
    pub fn regime(&self) -> Regime { self.state.regime() }

    pub fn is_settled(&self, eps_position: F, eps_velocity: F) -> bool {
        self.state.is_settled(self.clock.now(), eps_position, eps_velocity)
    }

    pub fn set_value(&mut self, value: F) {
        self.write(Mutation::Position, |state, now| state.set_position(now, value));
    }

    pub fn set_velocity(&mut self, velocity: F) {
        self.write(Mutation::Velocity, |state, now| state.set_velocity(now, velocity));
    }

    /// Same as [`accelerate`](Self::accelerate).
    pub fn set_acceleration(&mut self, impulse: F) {
        self.accelerate(impulse);
    }

    /// Push the spring by adding `impulse` to its current velocity.
    pub fn accelerate(&mut self, impulse: F) {
        self.write(Mutation::Impulse, |state, now| state.accelerate(now, impulse));
    }

    pub fn set_target(&mut self, target: F) {
        self.write(Mutation::Target, |state, now| state.set_target(now, target));
    }

    pub fn set_speed(&mut self, speed: F) {
        self.write(Mutation::Speed, |state, now| state.set_speed(now, speed));
    }

    pub fn set_damper(&mut self, damper: F) {
        self.write(Mutation::Damper, |state, now| state.set_damper(now, damper));
    }

    pub fn set_retarget(&mut self, retarget: RetargetVelocity) {
        self.state.set_retarget(retarget);
    }

    pub fn reset(&mut self, position: F) {
        self.write(Mutation::Reset, |state, now| state.reset(now, position));
    }

    pub fn snap_to_target(&mut self) {
        self.write(Mutation::Reset, |state, now| state.snap_to_target(now));
    }

    fn write(&mut self, mutation: Mutation, apply: impl FnOnce(&mut SpringState<F>, F)) {
        let now = self.clock.now();
        apply(&mut self.state, now);
        self.observer.on_reanchor(mutation, &self.state.anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_follows_parameters() {
        assert_eq!(SpringState::new(0.0f64, 0.0, 0.0, 0.5).regime(), Regime::Inert);
        assert_eq!(SpringState::new(0.0f64, 0.0, 2.0, 0.5).regime(), Regime::Underdamped);
        assert_eq!(SpringState::new(0.0f64, 0.0, 2.0, 0.0).regime(), Regime::Underdamped);
        assert_eq!(SpringState::new(0.0f64, 0.0, 2.0, 1.0).regime(), Regime::CriticallyDamped);
        assert_eq!(SpringState::new(0.0f64, 0.0, 2.0, 3.0).regime(), Regime::CriticallyDamped);
    }

    #[test]
    fn construction_sanitizes_inputs() {
        let state = SpringState::new(0.0f32, 1.0, -3.0, 2.0);
        assert_eq!(state.speed(), 0.0);
        assert_eq!(state.damper(), 1.0);

        let state = SpringState::new(0.0f64, 1.0, f64::NAN, f64::NAN);
        assert_eq!(state.speed(), 0.0);
        assert_eq!(state.damper(), 0.0);

        let state = SpringState::new(0.0f64, 1.0, f64::INFINITY, -0.25);
        assert_eq!(state.speed(), 0.0);
        assert_eq!(state.damper(), 0.0);
    }

    #[test]
    fn fresh_spring_rests_at_initial() {
        let state = SpringState::new(2.0f64, 7.5, 3.0, 0.4);
        let motion = state.sample(2.0);
        assert_eq!(motion.position, 7.5);
        assert_eq!(motion.velocity, 0.0);
        assert_eq!(motion.acceleration, 0.0);
        assert_eq!(state.target(), 7.5);
        assert_eq!(state.anchor(), Anchor { time: 2.0, position: 7.5, velocity: 0.0 });
    }

    #[test]
    fn reads_do_not_move_the_anchor() {
        let mut state = SpringState::new(0.0f64, 0.0, 4.0, 0.3);
        state.set_target(0.0, 10.0);
        let anchor = state.anchor();
        let first = state.sample(1.25);
        for _ in 0..10 {
            assert_eq!(state.sample(1.25), first);
        }
        let _ = state.position_at(50.0);
        let _ = state.velocity_at(-3.0);
        assert_eq!(state.anchor(), anchor);
    }

    #[test]
    fn near_unit_damper_matches_critical_form() {
        let mut near = SpringState::new(0.0f32, 0.0, 3.0, 1.0 - f32::EPSILON / 2.0);
        let mut critical = SpringState::new(0.0f32, 0.0, 3.0, 1.0);
        near.set_target(0.0, 1.0);
        critical.set_target(0.0, 1.0);
        assert_eq!(near.regime(), Regime::Underdamped);

        let p = near.position_at(0.5);
        assert!(p.is_finite());
        assert!((p - critical.position_at(0.5)).abs() < 1e-3);
    }

    #[test]
    fn retarget_mode_switch_keeps_anchor() {
        let mut state = SpringState::new(0.0f64, 1.0, 2.0, 0.5);
        state.set_velocity(0.0, 3.0);
        let anchor = state.anchor();
        state.set_retarget(RetargetVelocity::Resolved);
        assert_eq!(state.anchor(), anchor);
        assert_eq!(state.retarget(), RetargetVelocity::Resolved);
    }
}
