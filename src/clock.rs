//! Time sources that springs read their query time from.
//!
//! Springs never keep a timer of their own. Each read or write asks a
//! [`Clock`] for the current time in seconds and evaluates the closed form
//! there, so any monotonic source works: a frame clock, a fixed-step
//! simulation counter, or a [`ManualClock`] in tests.

use crate::float::Float;
use core::cell::Cell;

/// A source of "now", in seconds.
pub trait Clock<F: Float> {
    /// The current time in seconds.
    fn now(&self) -> F;
}

impl<F: Float, C: Clock<F> + ?Sized> Clock<F> for &C {
    fn now(&self) -> F {
        (**self).now()
    }
}

/// A clock that only moves when told to.
///
/// Interior mutability lets many springs hold `&ManualClock` while the driver
/// advances it between frames.
///
/// ```
/// use clockspring::{Clock, ManualClock};
///
/// let clock = ManualClock::new(0.0f32);
/// clock.advance(0.5);
/// assert_eq!(clock.now(), 0.5);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock<F: Float> {
    now: Cell<F>,
}

impl<F: Float> ManualClock<F> {
    pub fn new(start: F) -> Self {
        ManualClock { now: Cell::new(start) }
    }

    /// Jump to an absolute time. Going backwards is allowed.
    pub fn set(&self, time: F) {
        self.now.set(time);
    }

    /// Move forward by `dt` seconds.
    pub fn advance(&self, dt: F) {
        self.now.set(self.now.get() + dt);
    }
}

impl<F: Float> Clock<F> for ManualClock<F> {
    fn now(&self) -> F {
        self.now.get()
    }
}

/// Wall-clock seconds elapsed since the clock was created.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug)]
pub struct InstantClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl InstantClock {
    pub fn new() -> Self {
        InstantClock { start: std::time::Instant::now() }
    }

    /// The instant that reads as time zero.
    pub fn start(&self) -> std::time::Instant {
        self.start
    }
}

#[cfg(feature = "std")]
impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl<F: Float> Clock<F> for InstantClock {
    fn now(&self) -> F {
        F::from_f64(self.start.elapsed().as_secs_f64())
    }
}
