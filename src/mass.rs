//! Mass and moment of inertia, with static-body (infinite mass) handling.

use crate::Real;

/// Mass and 2D (scalar) moment of inertia for a rigid body.
///
/// A body is static iff its mass is infinite. Rather than relying on IEEE
/// `1. / f64::INFINITY == 0.` semantics propagating correctly through every
/// solver expression, the inverse mass and inverse moment of inertia are
/// computed once at construction and stored directly, so every downstream
/// formula that multiplies by `inverse_mass()` naturally treats a static
/// body as immovable without special-casing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass {
    mass: Real,
    inverse_mass: Real,
    moment_of_inertia: Real,
    inverse_moment_of_inertia: Real,
}

impl Mass {
    /// Create a new mass with zero moment of inertia.
    pub fn new(mass: Real) -> Self {
        Self::with_inertia(mass, 0.)
    }

    /// Create a new mass with the given moment of inertia.
    ///
    /// `mass` must be finite and positive, or `Real::INFINITY` for a static
    /// body. `moment_of_inertia` must be finite and non-negative, or
    /// `Real::INFINITY`.
    pub fn with_inertia(mass: Real, moment_of_inertia: Real) -> Self {
        assert!(
            mass > 0.,
            "mass must be positive (or +infinity for a static body): {}",
            mass
        );
        assert!(
            moment_of_inertia >= 0.,
            "moment of inertia must be non-negative: {}",
            moment_of_inertia
        );
        let inverse_mass = if mass.is_infinite() { 0. } else { 1. / mass };
        let inverse_moment_of_inertia = if moment_of_inertia == 0. || moment_of_inertia.is_infinite()
        {
            0.
        } else {
            1. / moment_of_inertia
        };
        Self {
            mass,
            inverse_mass,
            moment_of_inertia,
            inverse_moment_of_inertia,
        }
    }

    /// A static (infinite mass, infinite inertia) body.
    pub fn infinite() -> Self {
        Self {
            mass: Real::INFINITY,
            inverse_mass: 0.,
            moment_of_inertia: Real::INFINITY,
            inverse_moment_of_inertia: 0.,
        }
    }

    /// Derive a mass + moment of inertia from a density and a pre-computed
    /// area/second-moment pair, as the `Farm::grow_*` seed builders do when
    /// given a density instead of an explicit mass.
    pub fn from_density(density: Real, area: Real, unit_moment_of_inertia: Real) -> Self {
        Self::with_inertia(density * area, density * unit_moment_of_inertia)
    }

    /// The mass, or `Real::INFINITY` for a static body.
    pub fn mass(&self) -> Real {
        self.mass
    }

    /// `1 / mass`, or `0` for a static body.
    pub fn inverse_mass(&self) -> Real {
        self.inverse_mass
    }

    /// The moment of inertia, or `Real::INFINITY` for a static body.
    pub fn moment_of_inertia(&self) -> Real {
        self.moment_of_inertia
    }

    /// `1 / moment_of_inertia`, or `0` for a static body.
    pub fn inverse_moment_of_inertia(&self) -> Real {
        self.inverse_moment_of_inertia
    }

    /// True iff this mass represents a static (immovable) body.
    pub fn is_static(&self) -> bool {
        self.mass.is_infinite()
    }
}
