//! Advances every body's kinematics by one timestep.
//!
//! Grounded on the two-function split in `physics::simple` (force
//! integration, then pose integration), collapsed into a single pass here
//! since this crate has no separate "next frame" staging buffer — each
//! `RigidBody` integrates itself in place.

use crate::arena::Arena;
use crate::body::RigidBody;
use crate::Real;

/// Integrate every body in `bodies` forward by `dt` seconds, semi-implicit
/// Euler. Static bodies are integrated too (a no-op, since nothing ever
/// accumulates a force or velocity on them).
pub fn integrate_all(bodies: &mut Arena<RigidBody>, dt: Real) {
    assert!(dt > 0., "dt must be positive: {}", dt);
    for (_, body) in bodies.iter_mut() {
        body.integrate(dt);
    }
}
