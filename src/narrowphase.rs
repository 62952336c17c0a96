//! The narrow phase: turns a [`BodyPair`] into zero or one [`Contact`],
//! dispatching on the shape kinds involved (circle/circle, circle/polygon,
//! polygon/polygon) and, for the polygon cases, running the Separating Axis
//! Theorem probe followed by Sutherland-Hodgman-style incident-edge
//! clipping.
//!
//! Grounded in the SAT/clipping vocabulary common to box2d-derived 2D
//! engines (`referenceEdge`/`incidentEdge`, `clipSegmentToLine`), adapted
//! here to operate on this crate's own `RigidBody`/`PolygonShape` rather
//! than a box2d-style `Body`/`Polygon` pair.

use cgmath::InnerSpace;

use crate::arena::{Arena, BodyHandle};
use crate::body::{RigidBody, Shape};
use crate::contact::Contact;
use crate::pair::BodyPair;
use crate::shape::PolygonShape;
use crate::vector::{Point2D, Vector2D};
use crate::Real;

/// Run the narrow phase over every live pair, skipping static/static pairs,
/// and return the contacts for interpenetrating pairs in pair order.
pub fn report(bodies: &Arena<RigidBody>, pairs: &[BodyPair]) -> Vec<Contact> {
    pairs
        .iter()
        .filter_map(|pair| {
            let a = bodies.get(pair.a())?;
            let b = bodies.get(pair.b())?;
            if a.is_static() && b.is_static() {
                return None;
            }
            detect(pair.a(), a, pair.b(), b)
        })
        .collect()
}

fn detect(handle_a: BodyHandle, a: &RigidBody, handle_b: BodyHandle, b: &RigidBody) -> Option<Contact> {
    match (a.shape(), b.shape()) {
        (Shape::Circle(ca), Shape::Circle(cb)) => {
            circle_vs_circle(handle_a, a, ca.radius(), handle_b, b, cb.radius())
        }
        (Shape::Circle(ca), Shape::Polygon(pb)) => {
            circle_vs_polygon(handle_b, b, pb, handle_a, a, ca.radius())
        }
        (Shape::Polygon(pa), Shape::Circle(cb)) => {
            circle_vs_polygon(handle_a, a, pa, handle_b, b, cb.radius())
        }
        (Shape::Polygon(pa), Shape::Polygon(pb)) => {
            polygon_vs_polygon(handle_a, a, pa, handle_b, b, pb)
        }
    }
}

fn circle_vs_circle(
    handle_a: BodyHandle,
    a: &RigidBody,
    radius_a: Real,
    handle_b: BodyHandle,
    b: &RigidBody,
    radius_b: Real,
) -> Option<Contact> {
    let delta = b.position() - a.position();
    let distance_squared = delta.dot(delta);
    let radius_sum = radius_a + radius_b;
    if distance_squared >= radius_sum * radius_sum {
        return None;
    }
    // Coincident centers: degenerate normal. Decision recorded in the
    // design notes -- treat as "no contact" rather than guessing a
    // direction.
    if distance_squared == 0. {
        return None;
    }
    let distance = distance_squared.sqrt();
    let depth = radius_sum - distance;
    let normal = delta / distance;
    let point = b.position() - normal * radius_b;
    Some(Contact::new(handle_a, handle_b, normal, depth, vec![point]))
}

fn circle_vs_polygon(
    polygon_handle: BodyHandle,
    polygon_body: &RigidBody,
    polygon: &PolygonShape,
    circle_handle: BodyHandle,
    circle_body: &RigidBody,
    circle_radius: Real,
) -> Option<Contact> {
    let (index, depth) = sat_probe(polygon, circle_body)?;
    let normal = polygon.normals()[index];
    let point = circle_body.position() - normal * circle_radius;
    Some(Contact::new(polygon_handle, circle_handle, normal, depth, vec![point]))
}

/// The SAT probe ("contactTemplate"): for each edge normal of `polygon`,
/// compute the penetration depth against `other`'s minimum projection.
/// Returns `None` if any normal is a separating axis, else the index of
/// the normal with the smallest positive depth and that depth. Ties are
/// broken by the lower index (strict `<` in the min search).
fn sat_probe(polygon: &PolygonShape, other: &RigidBody) -> Option<(usize, Real)> {
    let mut best: Option<(usize, Real)> = None;
    for i in 0..polygon.vertex_count() {
        let normal = polygon.normals()[i];
        let edge_coord = polygon.vertices()[i].dot_with(normal);
        let min_coord = other.min_coordinate_along(normal);
        let proposed_depth = edge_coord - min_coord;
        if proposed_depth <= 0. {
            return None;
        }
        best = match best {
            Some((_, best_depth)) if proposed_depth < best_depth => Some((i, proposed_depth)),
            Some(existing) => Some(existing),
            None => Some((i, proposed_depth)),
        };
    }
    best
}

trait DotWithVector {
    fn dot_with(self, v: Vector2D) -> Real;
}

impl DotWithVector for Point2D {
    fn dot_with(self, v: Vector2D) -> Real {
        self.x * v.x + self.y * v.y
    }
}

fn polygon_vs_polygon(
    handle_a: BodyHandle,
    body_a: &RigidBody,
    polygon_a: &PolygonShape,
    handle_b: BodyHandle,
    body_b: &RigidBody,
    polygon_b: &PolygonShape,
) -> Option<Contact> {
    let (index_a, depth_a) = sat_probe(polygon_a, body_b)?;
    let (index_b, depth_b) = sat_probe(polygon_b, body_a)?;

    let (reference_handle, reference, reference_index, incident_handle, incident, incident_index, depth) =
        if depth_b < depth_a {
            (handle_b, polygon_b, index_b, handle_a, polygon_a, index_a, depth_b)
        } else {
            (handle_a, polygon_a, index_a, handle_b, polygon_b, index_b, depth_a)
        };

    let normal = reference.normals()[reference_index];
    let points = clip_incident_edge(reference, reference_index, incident, incident_index);
    if points.is_empty() {
        return None;
    }
    Some(Contact::new(reference_handle, incident_handle, normal, depth, points))
}

fn clip_incident_edge(
    reference: &PolygonShape,
    reference_index: usize,
    incident: &PolygonShape,
    incident_index: usize,
) -> Vec<Point2D> {
    let reference_vertex_count = reference.vertex_count();
    let reference_left = reference.vertices()[reference_index];
    let reference_right = reference.vertices()[(reference_index + 1) % reference_vertex_count];
    let reference_normal = reference.normals()[reference_index];

    let incident_vertex_count = incident.vertex_count();
    let incident_left = incident.vertices()[incident_index];
    let incident_right = incident.vertices()[(incident_index + 1) % incident_vertex_count];

    let tangent = (reference_right - reference_left).normalize();

    let mut points = [incident_left, incident_right];
    clip_against_plane(&mut points, reference_left, tangent);
    clip_against_plane(&mut points, reference_right, -tangent);

    let neg_normal = -reference_normal;
    let threshold = reference_left.dot_with(neg_normal);
    let mut result: Vec<Point2D> = points
        .iter()
        .copied()
        .filter(|p| p.dot_with(neg_normal) - threshold >= 0.)
        .collect();

    // The spec guarantees at least one point survives for a genuine
    // (depth > 0) contact; if float error clips both, fall back to the
    // deeper of the two rather than returning an empty manifold.
    if result.is_empty() {
        let deepest = if points[0].dot_with(neg_normal) >= points[1].dot_with(neg_normal) {
            points[0]
        } else {
            points[1]
        };
        result.push(deepest);
    }
    result
}

/// Clip `points` (a 2-point segment) against the half-plane through
/// `plane_point` with inward direction `axis`: a point is kept as-is if
/// `dot(point - plane_point, axis) >= 0`, else it is replaced by the point
/// on the plane along the segment to its (kept) partner.
fn clip_against_plane(points: &mut [Point2D; 2], plane_point: Point2D, axis: Vector2D) {
    let rel = [
        (points[0] - plane_point).dot(axis),
        (points[1] - plane_point).dot(axis),
    ];
    if rel[0] < 0. && rel[1] >= 0. {
        let t = rel[0] / (rel[0] - rel[1]);
        points[0] = lerp(points[0], points[1], t);
    } else if rel[1] < 0. && rel[0] >= 0. {
        let t = rel[1] / (rel[1] - rel[0]);
        points[1] = lerp(points[1], points[0], t);
    }
}

fn lerp(from: Point2D, to: Point2D, t: Real) -> Point2D {
    from + (to - from) * t
}
