//! Rigid bodies: the circular/polygon variant, the body state shared by
//! both, and the seed parameter bundles used to construct them.
//!
//! Despecialized from the `CollisionShape`/`BodyPose`/`Mass` split the
//! teacher spreads across `collide::primitives` and `physics::mass`: here a
//! body owns its shape directly (a tagged `Shape` enum rather than a
//! generic `Primitive` + `SupportFunction`), since this crate has no
//! GJK/EPA narrow phase to justify the extra indirection.

use crate::mass::Mass;
use crate::shape::{CircleShape, PolygonShape};
use crate::vector::{Point2D, Point2DExt, Vector2D};
use crate::Real;

/// The shape a [`RigidBody`] carries. No virtual dispatch: the narrow phase
/// matches on this directly (CC/CP/PP).
#[derive(Debug, Clone)]
pub enum Shape {
    /// A circle.
    Circle(CircleShape),
    /// A convex polygon.
    Polygon(PolygonShape),
}

/// A rigid body: linear and angular state, mass properties, shape, and
/// restitution.
#[derive(Debug, Clone)]
pub struct RigidBody {
    position: Point2D,
    velocity: Vector2D,
    acceleration: Vector2D,
    angle: Real,
    angular_velocity: Real,
    angular_acceleration: Real,
    mass: Mass,
    coefficient_of_restitution: Real,
    shape: Shape,
}

impl RigidBody {
    /// Construct a new body. Polygon shapes have their world-space
    /// vertices/normals synchronized with `position`/`angle` immediately.
    pub fn new(
        position: Point2D,
        velocity: Vector2D,
        angle: Real,
        angular_velocity: Real,
        mass: Mass,
        coefficient_of_restitution: Real,
        mut shape: Shape,
    ) -> Self {
        assert!(
            (0. ..=1.).contains(&coefficient_of_restitution),
            "coefficient of restitution must be in [0, 1]: {}",
            coefficient_of_restitution
        );
        if let Shape::Polygon(ref mut polygon) = shape {
            polygon.update_world(position, angle);
        }
        Self {
            position,
            velocity,
            acceleration: Vector2D::new(0., 0.),
            angle,
            angular_velocity,
            angular_acceleration: 0.,
            mass,
            coefficient_of_restitution,
            shape,
        }
    }

    /// Current position.
    pub fn position(&self) -> Point2D {
        self.position
    }

    /// Current linear velocity.
    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    /// Current orientation, in radians.
    pub fn angle(&self) -> Real {
        self.angle
    }

    /// Current angular velocity, in radians/second.
    pub fn angular_velocity(&self) -> Real {
        self.angular_velocity
    }

    /// The body's mass properties.
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// The body's restitution coefficient.
    pub fn coefficient_of_restitution(&self) -> Real {
        self.coefficient_of_restitution
    }

    /// True iff this body has infinite mass and is never moved by the
    /// solver or integrator.
    pub fn is_static(&self) -> bool {
        self.mass.is_static()
    }

    /// The body's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// True iff `point` lies within the body's shape.
    pub fn contains_point(&self, point: Point2D) -> bool {
        match &self.shape {
            Shape::Circle(circle) => self.position.distance_to(point) < circle.radius(),
            Shape::Polygon(polygon) => {
                let normals = polygon.normals();
                let vertices = polygon.vertices();
                normals.iter().zip(vertices).all(|(n, v)| {
                    let to_point = point - *v;
                    to_point.x * n.x + to_point.y * n.y < 0.
                })
            }
        }
    }

    /// The minimum dot product of any point on this body's shape with `axis`
    /// (`axis` need not be normalized by the caller, but the narrow phase
    /// always passes unit axes).
    pub fn min_coordinate_along(&self, axis: Vector2D) -> Real {
        match &self.shape {
            Shape::Circle(circle) => {
                (self.position.x * axis.x + self.position.y * axis.y) - circle.radius()
            }
            Shape::Polygon(polygon) => polygon
                .vertices()
                .iter()
                .map(|v| v.x * axis.x + v.y * axis.y)
                .fold(Real::INFINITY, Real::min),
        }
    }

    /// Set the position directly, bypassing the integrator. Used by tests
    /// and by the solver's positional-correction phase.
    pub fn set_position(&mut self, position: Point2D) {
        self.position = position;
        if let Shape::Polygon(ref mut polygon) = self.shape {
            polygon.update_world(position, self.angle);
        }
    }

    /// Set the linear velocity directly.
    pub fn set_velocity(&mut self, velocity: Vector2D) {
        self.velocity = velocity;
    }

    /// Set the orientation directly (in radians), bypassing the integrator.
    pub fn set_angle(&mut self, angle: Real) {
        self.angle = angle;
        if let Shape::Polygon(ref mut polygon) = self.shape {
            polygon.update_world(self.position, angle);
        }
    }

    /// Set the angular velocity directly.
    pub fn set_angular_velocity(&mut self, angular_velocity: Real) {
        self.angular_velocity = angular_velocity;
    }

    /// Accumulate a force, to be consumed (as `force / mass`) by the next
    /// integration step.
    ///
    /// Panics if called on a static body: static bodies have no usable
    /// inverse mass to convert the force into an acceleration.
    pub fn apply_force(&mut self, force: Vector2D) {
        assert!(!self.is_static(), "cannot apply a force to a static body");
        self.acceleration = self.acceleration + force * self.mass.inverse_mass();
    }

    /// Advance this body's kinematics by `dt` using semi-implicit Euler.
    /// Called once per tick by the integrator, for every body including
    /// static ones (a no-op for them, since their velocities are never
    /// written elsewhere and their accelerations stay zero).
    pub(crate) fn integrate(&mut self, dt: Real) {
        self.velocity = self.velocity + self.acceleration * dt;
        self.acceleration = Vector2D::new(0., 0.);
        self.position = self.position + self.velocity * dt;

        self.angular_velocity += self.angular_acceleration * dt;
        self.angular_acceleration = 0.;
        self.angle += self.angular_velocity * dt;

        if let Shape::Polygon(ref mut polygon) = self.shape {
            polygon.update_world(self.position, self.angle);
        }
    }

    /// Apply a linear impulse (already divided by nothing; this method does
    /// the division by mass) to this body's velocity. A no-op on static
    /// bodies since their inverse mass is zero.
    pub(crate) fn apply_linear_impulse(&mut self, impulse: Vector2D) {
        self.velocity = self.velocity + impulse * self.mass.inverse_mass();
    }

    /// Apply an angular impulse (scalar, pre-cross-product) to this body's
    /// angular velocity.
    pub(crate) fn apply_angular_impulse(&mut self, impulse: Real) {
        self.angular_velocity += impulse * self.mass.inverse_moment_of_inertia();
    }

    /// Translate the position directly by `delta`, without touching
    /// velocity or re-deriving it from a force. Used by the solver's
    /// positional-correction phase, which intentionally does not refresh
    /// polygon world vertices/normals until the next integration step.
    pub(crate) fn nudge_position(&mut self, delta: Vector2D) {
        self.position = self.position + delta;
    }
}

/// Parameters shared by both seed kinds.
///
/// Mirrors the seed/builder convention this crate lineage uses to keep
/// construction out of the `grow*` call sites: callers fill in a plain data
/// struct and let `Farm` turn it into a live body.
#[derive(Debug, Clone)]
pub struct BodySeed {
    /// Initial position. Defaults to the origin.
    pub position: Point2D,
    /// Initial linear velocity. Defaults to zero.
    pub velocity: Vector2D,
    /// Initial orientation, in radians. Defaults to zero.
    pub angle: Real,
    /// Initial angular velocity. Defaults to zero.
    pub angular_velocity: Real,
    /// Coefficient of restitution. Defaults to 0.5.
    pub coefficient_of_restitution: Real,
    /// How the body's mass is determined.
    pub mass: MassSpec,
}

impl Default for BodySeed {
    fn default() -> Self {
        Self {
            position: Point2D::new(0., 0.),
            velocity: Vector2D::new(0., 0.),
            angle: 0.,
            angular_velocity: 0.,
            coefficient_of_restitution: 0.5,
            mass: MassSpec::Density(1.0),
        }
    }
}

/// How a seed specifies the mass of the body it describes.
#[derive(Debug, Clone, Copy)]
pub enum MassSpec {
    /// An explicit mass and moment of inertia.
    Explicit { mass: Real, moment_of_inertia: Real },
    /// A density, from which mass and moment of inertia are derived using
    /// the shape's area and unit (density = 1) moment of inertia.
    Density(Real),
    /// A static body: infinite mass and inertia.
    Static,
}

/// Parameters for [`crate::farm::Farm::grow_circular`].
#[derive(Debug, Clone)]
pub struct CircleSeed {
    /// Shared body parameters.
    pub body: BodySeed,
    /// The circle's radius.
    pub radius: Real,
}

impl CircleSeed {
    pub(crate) fn into_body(self) -> RigidBody {
        let area = std::f64::consts::PI * self.radius * self.radius;
        // Unit (density = 1) moment of inertia of a solid disc about its
        // center: (1/2) m r^2 with m = area (density folded in separately).
        let unit_moment_of_inertia = 0.5 * area * self.radius * self.radius;
        let mass = resolve_mass(self.body.mass, area, unit_moment_of_inertia);
        RigidBody::new(
            self.body.position,
            self.body.velocity,
            self.body.angle,
            self.body.angular_velocity,
            mass,
            self.body.coefficient_of_restitution,
            Shape::Circle(CircleShape::new(self.radius)),
        )
    }
}

/// Parameters for [`crate::farm::Farm::grow_polygon`].
#[derive(Debug, Clone)]
pub struct PolygonSeed {
    /// Shared body parameters.
    pub body: BodySeed,
    /// Body-local vertex offsets, in winding order (see [`PolygonShape`]).
    pub relative_vertices: Vec<Point2D>,
}

impl PolygonSeed {
    pub(crate) fn into_body(self) -> RigidBody {
        let polygon = PolygonShape::new(self.relative_vertices.clone());
        let (area, unit_moment_of_inertia) = polygon_area_and_unit_inertia(&self.relative_vertices);
        let mass = resolve_mass(self.body.mass, area, unit_moment_of_inertia);
        RigidBody::new(
            self.body.position,
            self.body.velocity,
            self.body.angle,
            self.body.angular_velocity,
            mass,
            self.body.coefficient_of_restitution,
            Shape::Polygon(polygon),
        )
    }
}

fn resolve_mass(spec: MassSpec, area: Real, unit_moment_of_inertia: Real) -> Mass {
    match spec {
        MassSpec::Explicit { mass, moment_of_inertia } => Mass::with_inertia(mass, moment_of_inertia),
        MassSpec::Density(density) => Mass::from_density(density, area, unit_moment_of_inertia),
        MassSpec::Static => Mass::infinite(),
    }
}

/// Signed area and unit (density = 1) moment of inertia about the centroid
/// for a polygon given by its body-local vertices, via the standard shoelace
/// decomposition into triangles from the origin.
fn polygon_area_and_unit_inertia(vertices: &[Point2D]) -> (Real, Real) {
    let n = vertices.len();
    let mut area = 0.;
    let mut inertia = 0.;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        area += cross;
        inertia += cross * (a.x * a.x + a.y * a.y + a.x * b.x + b.x * b.x + a.y * b.y + b.y * b.y);
    }
    let area = area.abs() * 0.5;
    let inertia = (inertia / 12.).abs();
    (area, inertia)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle_body(position: Point2D, radius: Real) -> RigidBody {
        CircleSeed {
            body: BodySeed {
                position,
                ..BodySeed::default()
            },
            radius,
        }
        .into_body()
    }

    fn square_body(position: Point2D, half_extent: Real) -> RigidBody {
        PolygonSeed {
            body: BodySeed {
                position,
                ..BodySeed::default()
            },
            relative_vertices: vec![
                Point2D::new(half_extent, half_extent),
                Point2D::new(half_extent, -half_extent),
                Point2D::new(-half_extent, -half_extent),
                Point2D::new(-half_extent, half_extent),
            ],
        }
        .into_body()
    }

    #[test]
    fn circle_contains_point() {
        let body = circle_body(Point2D::new(0., 0.), 1.0);
        assert!(body.contains_point(Point2D::new(0.5, 0.)));
        assert!(!body.contains_point(Point2D::new(2.0, 0.)));
    }

    #[test]
    fn polygon_contains_point() {
        let body = square_body(Point2D::new(0., 0.), 1.0);
        assert!(body.contains_point(Point2D::new(0.5, 0.5)));
        assert!(!body.contains_point(Point2D::new(2.0, 0.0)));
    }

    #[test]
    fn min_coordinate_along_axis_for_circle() {
        let body = circle_body(Point2D::new(5., 0.), 1.0);
        assert_relative_eq!(body.min_coordinate_along(Vector2D::new(1., 0.)), 4.0);
    }

    #[test]
    fn min_coordinate_along_axis_for_polygon() {
        let body = square_body(Point2D::new(0., 0.), 1.0);
        assert_relative_eq!(body.min_coordinate_along(Vector2D::new(1., 0.)), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn integrate_applies_semi_implicit_euler() {
        let mut body = circle_body(Point2D::new(0., 0.), 1.0);
        body.apply_force(Vector2D::new(2.0, 0.));
        body.integrate(1.0);
        assert_relative_eq!(body.velocity().x, 2.0);
        assert_relative_eq!(body.position().x, 2.0);
    }

    #[test]
    #[should_panic]
    fn applying_force_to_static_body_panics() {
        let mut body = CircleSeed {
            body: BodySeed {
                mass: MassSpec::Static,
                ..BodySeed::default()
            },
            radius: 1.0,
        }
        .into_body();
        body.apply_force(Vector2D::new(1.0, 0.));
    }

    #[test]
    fn static_body_has_zero_inverse_mass_and_is_static() {
        let body = CircleSeed {
            body: BodySeed {
                mass: MassSpec::Static,
                ..BodySeed::default()
            },
            radius: 1.0,
        }
        .into_body();
        assert!(body.is_static());
        assert_eq!(body.mass().inverse_mass(), 0.);
    }
}
