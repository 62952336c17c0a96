//! Shape geometry: circles and convex polygons.
//!
//! Despecialized from `collide/primitives/primitive2d/{circle,polygon}.rs`:
//! the teacher exposes these as `SupportFunction` implementors for GJK/EPA.
//! This narrow phase uses SAT directly on min/max projections instead, so
//! the only queries a shape needs to answer are containment and the
//! min/max projection onto an axis.

use cgmath::InnerSpace;
use log::warn;

use crate::vector::{Point2D, Point2DExt, Vector2D, Vector2DExt};

/// A circle, defined by its radius around the owning body's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    radius: f64,
}

impl CircleShape {
    /// Create a new circle shape. `radius` must be finite and positive.
    pub fn new(radius: f64) -> Self {
        assert!(radius > 0. && radius.is_finite(), "radius must be positive and finite: {}", radius);
        Self { radius }
    }

    /// The circle's radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// `radius * radius`, used by the circle/circle test to avoid a sqrt.
    pub fn radius_squared(&self) -> f64 {
        self.radius * self.radius
    }
}

/// A convex polygon, defined by body-local (relative) vertices in a
/// consistent winding order, with world-space vertices/normals recomputed
/// once per integration step.
///
/// Winding convention: edge normals are computed as `(vertex[i] -
/// vertex[i+1]).rotated(-90°)`, normalized. For that rotation to produce
/// *outward*-facing normals, vertices must be wound clockwise in a
/// y-up frame (equivalently, counter-clockwise in a y-down frame). A
/// polygon wound the other way still constructs successfully (normals
/// simply point inward, silently inverting collisions as noted in the
/// design notes) but logs a warning.
#[derive(Debug, Clone)]
pub struct PolygonShape {
    relative_vertices: Vec<Point2D>,
    relative_normals: Vec<Vector2D>,
    vertices: Vec<Point2D>,
    normals: Vec<Vector2D>,
}

impl PolygonShape {
    /// Create a new convex polygon from body-local vertices.
    ///
    /// Panics if fewer than 3 vertices are given, if any vertex is
    /// non-finite, or if the vertices do not describe a convex polygon.
    /// Logs a warning (does not panic) if the winding is the opposite of
    /// this crate's documented convention.
    pub fn new(relative_vertices: Vec<Point2D>) -> Self {
        assert!(
            relative_vertices.len() >= 3,
            "a polygon needs at least 3 vertices, got {}",
            relative_vertices.len()
        );
        for v in &relative_vertices {
            assert!(v.x.is_finite() && v.y.is_finite(), "polygon vertex must be finite: {:?}", v);
        }
        assert!(is_convex(&relative_vertices), "polygon vertices must be convex: {:?}", relative_vertices);
        if signed_area(&relative_vertices) > 0. {
            warn!(
                "polygon vertices appear to be wound counter-clockwise (in a y-up frame); \
                 this crate's convention is clockwise, so normals will point inward"
            );
        }

        let relative_normals = compute_normals(&relative_vertices);
        let vertices = relative_vertices.clone();
        let normals = relative_normals.clone();
        Self {
            relative_vertices,
            relative_normals,
            vertices,
            normals,
        }
    }

    /// Recompute world-space vertices and normals from the owning body's
    /// current position and angle. Called by the integrator once per step.
    pub fn update_world(&mut self, position: Point2D, angle: f64) {
        for (world, relative) in self.vertices.iter_mut().zip(&self.relative_vertices) {
            *world = position + relative.rotated(angle).to_vec_from_origin();
        }
        for (world, relative) in self.normals.iter_mut().zip(&self.relative_normals) {
            *world = relative.rotated(angle);
        }
    }

    /// Number of vertices (and edges/normals).
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// World-space vertices.
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// World-space outward edge normals, `normals[i]` belonging to the edge
    /// from `vertices[i]` to `vertices[(i + 1) % n]`.
    pub fn normals(&self) -> &[Vector2D] {
        &self.normals
    }
}

trait ToVecFromOrigin {
    fn to_vec_from_origin(self) -> Vector2D;
}

impl ToVecFromOrigin for Point2D {
    fn to_vec_from_origin(self) -> Vector2D {
        Vector2D::new(self.x, self.y)
    }
}

fn compute_normals(relative_vertices: &[Point2D]) -> Vec<Vector2D> {
    let n = relative_vertices.len();
    (0..n)
        .map(|i| {
            let next = (i + 1) % n;
            let edge = Vector2D::new(
                relative_vertices[i].x - relative_vertices[next].x,
                relative_vertices[i].y - relative_vertices[next].y,
            );
            edge.rotated(-std::f64::consts::FRAC_PI_2).normalize()
        })
        .collect()
}

fn signed_area(vertices: &[Point2D]) -> f64 {
    let n = vertices.len();
    let mut area = 0.;
    for i in 0..n {
        let next = (i + 1) % n;
        area += vertices[i].x * vertices[next].y - vertices[next].x * vertices[i].y;
    }
    area * 0.5
}

fn is_convex(vertices: &[Point2D]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross.abs() < 1e-12 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square_cw() -> Vec<Point2D> {
        // Clockwise in a y-up frame: (1,1) -> (1,-1) -> (-1,-1) -> (-1,1)
        vec![
            Point2D::new(1.0, 1.0),
            Point2D::new(1.0, -1.0),
            Point2D::new(-1.0, -1.0),
            Point2D::new(-1.0, 1.0),
        ]
    }

    #[test]
    fn normals_are_unit_length_and_outward() {
        let square = PolygonShape::new(unit_square_cw());
        for n in square.normals() {
            assert_relative_eq!((n.x * n.x + n.y * n.y).sqrt(), 1.0, epsilon = 1e-9);
        }
        // Edge from (1,1) to (1,-1) is the +x face; its normal should point +x.
        assert_relative_eq!(square.normals()[0].x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(square.normals()[0].y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn update_world_translates_and_rotates() {
        let mut square = PolygonShape::new(unit_square_cw());
        square.update_world(Point2D::new(5.0, 0.0), 0.0);
        assert_relative_eq!(square.vertices()[0].x, 6.0, epsilon = 1e-9);
        assert_relative_eq!(square.vertices()[0].y, 1.0, epsilon = 1e-9);
    }

    #[test]
    #[should_panic]
    fn fewer_than_three_vertices_panics() {
        PolygonShape::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
    }

    #[test]
    #[should_panic]
    fn non_convex_vertices_panic() {
        // A simple non-convex quad (arrow/dart shape).
        PolygonShape::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 2.0),
        ]);
    }

    #[test]
    fn circle_radius_squared() {
        let c = CircleShape::new(2.0);
        assert_relative_eq!(c.radius_squared(), 4.0);
    }
}
