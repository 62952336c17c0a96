//! `Farm`: the world. Owns every body and the set of live pairs between
//! them, and drives one tick (integrate, report, resolve).

use log::{debug, trace};

use crate::arena::{Arena, BodyHandle};
use crate::body::{CircleSeed, PolygonSeed, RigidBody};
use crate::integrator::integrate_all;
use crate::narrowphase::report;
use crate::pair::BodyPair;
use crate::solver::resolve_all;
use crate::Real;

/// Owns the live bodies and the unordered pairs between them, and advances
/// them one tick at a time.
#[derive(Debug, Default)]
pub struct Farm {
    bodies: Arena<RigidBody>,
    pairs: Vec<BodyPair>,
}

impl Farm {
    /// Create an empty world.
    pub fn new() -> Self {
        Self {
            bodies: Arena::new(),
            pairs: Vec::new(),
        }
    }

    /// Number of live bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of live pairs.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Borrow a live body.
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Construct a circular body from `seed`, pair it against every
    /// existing body, and add it to the world.
    pub fn grow_circular(&mut self, seed: CircleSeed) -> BodyHandle {
        self.grow(seed.into_body())
    }

    /// Construct a polygon body from `seed`, pair it against every existing
    /// body, and add it to the world.
    pub fn grow_polygon(&mut self, seed: PolygonSeed) -> BodyHandle {
        self.grow(seed.into_body())
    }

    fn grow(&mut self, body: RigidBody) -> BodyHandle {
        let existing: Vec<BodyHandle> = self.bodies.iter().map(|(handle, _)| handle).collect();
        let handle = self.bodies.insert(body);
        for other in existing {
            self.pairs.push(BodyPair::new(handle, other));
        }
        debug!("grew body {:?}, {} pair(s) now live", handle, self.pairs.len());
        handle
    }

    /// Remove a body and every pair that references it.
    pub fn destroy(&mut self, handle: BodyHandle) {
        if self.bodies.remove(handle).is_none() {
            return;
        }
        self.pairs.retain(|pair| !pair.contains(handle));
        debug!("destroyed body {:?}, {} pair(s) remain", handle, self.pairs.len());
    }

    /// Advance the world by one tick: integrate every body, run the narrow
    /// phase over all pairs, then resolve the resulting contacts.
    ///
    /// `dt` must be positive.
    pub fn update(&mut self, dt: Real) {
        assert!(dt > 0., "dt must be positive: {}", dt);
        integrate_all(&mut self.bodies, dt);
        let contacts = report(&self.bodies, &self.pairs);
        trace!("{} contact(s) this tick", contacts.len());
        resolve_all(&mut self.bodies, &contacts);
    }
}
