//! Three independent spring axes driven as one 3D value.

use crate::clock::Clock;
use crate::config::{RetargetVelocity, SpringConfig};
use crate::float::Float;
use crate::observer::{Mutation, NoOpObserver, SpringObserver};
use crate::spring::SpringState;
use crate::vec::{Axis, Vec3};

/// A 3D spring made of three uncoupled [`SpringState`] axes.
///
/// Each operation reads the clock once and forwards to the x, y and z axes in
/// turn. `speed()` and `damper()` report the x axis; their setters assign all
/// three, which keeps the axes in sync.
#[derive(Clone, Debug)]
pub struct VectorSpring<F: Float, C, O = NoOpObserver> {
    axes: [SpringState<F>; 3],
    clock: C,
    observer: O,
}

impl<F: Float, C: Clock<F>> VectorSpring<F, C> {
    pub fn new(initial: Vec3<F>, speed: F, damper: F, clock: C) -> Self {
        let config = SpringConfig::new().with_speed(speed).with_damper(damper);
        Self::with_config(initial, &config, clock)
    }

    pub fn with_config(initial: Vec3<F>, config: &SpringConfig<F>, clock: C) -> Self {
        let now = clock.now();
        let axes = Axis::ALL.map(|axis| SpringState::with_config(now, initial[axis], config));
        VectorSpring { axes, clock, observer: NoOpObserver }
    }
}

impl<F: Float, C: Clock<F>, O: SpringObserver<F>> VectorSpring<F, C, O> {
    pub fn with_observer<P: SpringObserver<F>>(self, observer: P) -> VectorSpring<F, C, P> {
        VectorSpring { axes: self.axes, clock: self.clock, observer }
    }

    pub fn axis(&self, axis: Axis) -> &SpringState<F> { &self.axes[axis.index()] }
    pub fn clock(&self) -> &C { &self.clock }
    pub fn observer(&self) -> &O { &self.observer }
    pub fn observer_mut(&mut self) -> &mut O { &mut self.observer }

    pub fn position(&self) -> Vec3<F> { self.read(SpringState::position_at) }
    pub fn velocity(&self) -> Vec3<F> { self.read(SpringState::velocity_at) }
    pub fn acceleration(&self) -> Vec3<F> { self.read(SpringState::acceleration_at) }
    pub fn target(&self) -> Vec3<F> { self.read(|state, _| state.target()) }

    pub fn speed(&self) -> F { self.axes[0].speed() }
    pub fn damper(&self) -> F { self.axes[0].damper() }

    /// Within `eps_position` of the target and slower than `eps_velocity`,
    /// measured as vector lengths.
    pub fn is_settled(&self, eps_position: F, eps_velocity: F) -> bool {
        let now = self.clock.now();
        let mut offset = Vec3::zero();
        let mut velocity = Vec3::zero();
        for (state, axis) in self.axes.iter().zip(Axis::ALL) {
            let motion = state.sample(now);
            offset[axis] = motion.position - state.target();
            velocity[axis] = motion.velocity;
        }
        offset.length_sq() < eps_position * eps_position
            && velocity.length_sq() < eps_velocity * eps_velocity
    }

    pub fn set_position(&mut self, position: Vec3<F>) {
        self.write(Mutation::Position, |state, now, axis| state.set_position(now, position[axis]));
    }

    pub fn set_velocity(&mut self, velocity: Vec3<F>) {
        self.write(Mutation::Velocity, |state, now, axis| state.set_velocity(now, velocity[axis]));
    }

    /// Same as [`accelerate`](Self::accelerate).
    pub fn set_acceleration(&mut self, impulse: Vec3<F>) {
        self.accelerate(impulse);
    }

    /// Push every axis by its component of `impulse`.
    pub fn accelerate(&mut self, impulse: Vec3<F>) {
        self.write(Mutation::Impulse, |state, now, axis| state.accelerate(now, impulse[axis]));
    }

    pub fn set_target(&mut self, target: Vec3<F>) {
        self.write(Mutation::Target, |state, now, axis| state.set_target(now, target[axis]));
    }

    /// Retarget a single axis; the other two keep their anchors.
    pub fn set_axis_target(&mut self, axis: Axis, target: F) {
        let now = self.clock.now();
        let state = &mut self.axes[axis.index()];
        state.set_target(now, target);
        self.observer.on_reanchor(Mutation::Target, &state.anchor());
    }

    pub fn set_speed(&mut self, speed: F) {
        self.write(Mutation::Speed, |state, now, _| state.set_speed(now, speed));
    }

    pub fn set_damper(&mut self, damper: F) {
        self.write(Mutation::Damper, |state, now, _| state.set_damper(now, damper));
    }

    pub fn set_retarget(&mut self, retarget: RetargetVelocity) {
        for state in self.axes.iter_mut() {
            state.set_retarget(retarget);
        }
    }

    pub fn reset(&mut self, position: Vec3<F>) {
        self.write(Mutation::Reset, |state, now, axis| state.reset(now, position[axis]));
    }

    pub fn snap_to_target(&mut self) {
        self.write(Mutation::Reset, |state, now, _| state.snap_to_target(now));
    }

    fn read(&self, component: impl Fn(&SpringState<F>, F) -> F) -> Vec3<F> {
        let now = self.clock.now();
        Vec3::new(
            component(&self.axes[0], now),
            component(&self.axes[1], now),
            component(&self.axes[2], now),
        )
    }

    fn write(&mut self, mutation: Mutation, mut apply: impl FnMut(&mut SpringState<F>, F, Axis)) {
        let now = self.clock.now();
        for (state, axis) in self.axes.iter_mut().zip(Axis::ALL) {
            apply(state, now, axis);
            self.observer.on_reanchor(mutation, &state.anchor());
        }
    }
}
