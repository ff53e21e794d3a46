//! Analytic damped springs for animating values toward moving targets.
//!
//! `clockspring` stores a spring as an anchor (time, position, velocity) and
//! solves the damped harmonic oscillator in closed form whenever it is read.
//! There is no `update(dt)` to call: ask for the value at any time, in any
//! order, and get the exact answer with no integration drift.
//!
//! # Features
//!
//! - **Closed-form evaluation**: underdamped and critically damped regimes,
//!   plus an inert regime for zero speed
//! - **Continuous re-tuning**: changing target, speed or damper re-anchors at
//!   the current time, so the value never jumps
//! - **Injected time**: springs read a [`Clock`]; tests drive a [`ManualClock`]
//! - **3D springs**: [`VectorSpring`] runs three uncoupled axes off one clock read
//! - **Observable**: watch every re-anchor through [`SpringObserver`]
//! - **`no_std` compatible**: disable the default `std` feature

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod float;
pub mod vec;
pub mod clock;
pub mod spring;
pub mod vector;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Axis, Vec3};
#[cfg(feature = "std")]
pub use clock::InstantClock;
pub use clock::{Clock, ManualClock};
pub use spring::{Anchor, Motion, Regime, ScalarSpring, SpringState};
pub use vector::VectorSpring;
pub use config::{RetargetVelocity, SpringConfig};
pub use observer::{Mutation, NoOpObserver, SpringObserver};
pub use error::SpringError;
