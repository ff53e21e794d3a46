//! Observer trait for monitoring spring re-anchoring.

use crate::float::Float;
use crate::spring::Anchor;

/// The write that caused a spring to re-anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    Position,
    Velocity,
    /// Velocity impulse from `accelerate` or `set_acceleration`.
    Impulse,
    Target,
    Speed,
    Damper,
    /// `reset` or `snap_to_target`.
    Reset,
}

/// Trait for observing spring mutations.
///
/// Implement this to watch a spring being driven (debug overlays, replay
/// capture, profiling). Reads never notify; only writes re-anchor.
pub trait SpringObserver<F: Float> {
    /// Called after a write has stored its new anchor. Vector springs call
    /// this once per axis, in x, y, z order.
    fn on_reanchor(&mut self, _mutation: Mutation, _anchor: &Anchor<F>) {}
}

/// A no-op observer. Springs use it unless another is attached.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOpObserver;

impl<F: Float> SpringObserver<F> for NoOpObserver {}
