//! A fixed-step driver that retunes a 3D spring every tick, retargets it on a
//! schedule, and prints the position it would apply to a transform.
//!
//! Run with `cargo run --example follow_target`.

use clockspring::{Clock, ManualClock, Vec3, VectorSpring};

const TICK: f64 = 1.0 / 50.0;

fn main() {
    let clock = ManualClock::new(0.0f64);
    let mut spring = VectorSpring::new(Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0, &clock);

    let targets = [
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(-0.6, -0.48, 0.64),
        Vec3::new(0.0, 0.0, -1.0),
    ];

    for tick in 0..450u32 {
        // Tuning sweeps between a slow critical spring and a fast wobbly one.
        let phase = f64::from(tick) / 450.0;
        spring.set_speed(1.0 + 5.0 * phase);
        spring.set_damper(1.0 - 0.8 * phase);

        if tick % 150 == 0 {
            let target = targets[(tick / 150) as usize];
            spring.set_target(target);
            println!("t={:.2}s retarget -> ({:.2}, {:.2}, {:.2})", clock.now(), target.x, target.y, target.z);
        }

        if tick % 25 == 0 {
            let p = spring.position();
            println!("t={:.2}s position ({:+.3}, {:+.3}, {:+.3})", clock.now(), p.x, p.y, p.z);
        }

        clock.advance(TICK);
    }
}
