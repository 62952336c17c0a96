//! The contact handler: per-contact-point impulse resolution followed by
//! split positional correction.
//!
//! Grounded on `physics::resolution::resolve_contact`'s shape (impulse
//! first, then a positional-correction pass touching only position), but
//! the correction formula here is the one this crate documents and tests
//! rather than the teacher's Baumgarte `percent`/`k_slop` scheme: full
//! depth split by mass ratio, `correction = normal * depth * 0.5`, with the
//! literal (and, on the static-body branch, asymmetric) treatment the
//! design notes call out rather than silently rebalanced away.

use cgmath::InnerSpace;

use crate::arena::Arena;
use crate::body::RigidBody;
use crate::contact::Contact;
use crate::vector::Vector2D;
use crate::Real;

/// Resolve every contact, in list order: one impulse pass across all of a
/// contact's points, then one positional-correction pass.
pub fn resolve_all(bodies: &mut Arena<RigidBody>, contacts: &[Contact]) {
    for contact in contacts {
        resolve_impulses(bodies, contact);
        correct_position(bodies, contact);
    }
}

fn resolve_impulses(bodies: &mut Arena<RigidBody>, contact: &Contact) {
    let normal = contact.normal();
    for &point in contact.points() {
        let (Some(a), Some(b)) = bodies.get_two_mut(contact.reference(), contact.incident()) else {
            continue;
        };

        let r_a = (point - a.position()).rotated_minus_90();
        let r_b = (point - b.position()).rotated_minus_90();

        let vel_a_at_point = a.velocity() + r_a * a.angular_velocity();
        let vel_b_at_point = b.velocity() + r_b * b.angular_velocity();
        let relative_velocity = vel_a_at_point - vel_b_at_point;

        let smashing_speed = relative_velocity.dot(normal);
        if smashing_speed <= 0. {
            continue;
        }

        let restitution = a.coefficient_of_restitution().min(b.coefficient_of_restitution());

        let r_a_dot_n = r_a.dot(normal);
        let r_b_dot_n = r_b.dot(normal);
        let denom = a.mass().inverse_mass()
            + b.mass().inverse_mass()
            + r_a_dot_n * r_a_dot_n * a.mass().inverse_moment_of_inertia()
            + r_b_dot_n * r_b_dot_n * b.mass().inverse_moment_of_inertia();
        if denom == 0. {
            continue;
        }

        let impulse_magnitude = (1. + restitution) * smashing_speed / denom;
        let impulse = normal * impulse_magnitude;

        a.apply_linear_impulse(-impulse);
        b.apply_linear_impulse(impulse);
        a.apply_angular_impulse(-r_a.dot(impulse));
        b.apply_angular_impulse(r_b.dot(impulse));
    }
}

fn correct_position(bodies: &mut Arena<RigidBody>, contact: &Contact) {
    let normal = contact.normal();
    let correction = normal * (contact.depth() * 0.5);

    let (Some(a), Some(b)) = bodies.get_two_mut(contact.reference(), contact.incident()) else {
        return;
    };

    if a.is_static() {
        // Literal per the documented source behavior: the static branch
        // moves only the non-static body, by `correction` (half depth),
        // rather than the full depth the non-static/non-static branch
        // distributes. See the design notes for why this asymmetry is
        // kept rather than "fixed".
        b.nudge_position(correction);
    } else if b.is_static() {
        a.nudge_position(-correction);
    } else {
        let total_mass = a.mass().mass() + b.mass().mass();
        a.nudge_position(-correction * (b.mass().mass() / total_mass));
        b.nudge_position(correction * (a.mass().mass() / total_mass));
    }
}

/// `ω × r` as a `Vector2D`, via a quarter-turn rotation, used to express
/// `r_a`/`r_b` (the perpendicular contact-point offset) in the impulse
/// phase.
trait RotatedMinus90 {
    fn rotated_minus_90(self) -> Self;
}

impl RotatedMinus90 for Vector2D {
    fn rotated_minus_90(self) -> Self {
        Vector2D::new(self.y, -self.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::body::{BodySeed, CircleSeed, MassSpec};
    use crate::pair::BodyPair;
    use crate::vector::Point2D;
    use approx::assert_relative_eq;

    fn circle(position: Point2D, velocity: Vector2D, mass: Real, restitution: Real) -> RigidBody {
        CircleSeed {
            body: BodySeed {
                position,
                velocity,
                coefficient_of_restitution: restitution,
                mass: MassSpec::Explicit { mass, moment_of_inertia: 1.0 },
                ..BodySeed::default()
            },
            radius: 1.0,
        }
        .into_body()
    }

    #[test]
    fn head_on_equal_mass_elastic_collision_swaps_velocities() {
        let mut arena = Arena::new();
        let a = arena.insert(circle(Point2D::new(-1.5, 0.0), Vector2D::new(1.0, 0.0), 1.0, 1.0));
        let b = arena.insert(circle(Point2D::new(1.5, 0.0), Vector2D::new(-1.0, 0.0), 1.0, 1.0));

        let contact = Contact::new(a, b, Vector2D::new(1.0, 0.0), 0.5, vec![Point2D::new(0.5, 0.0)]);
        resolve_all(&mut arena, &[contact]);

        assert_relative_eq!(arena.get(a).unwrap().velocity().x, -1.0, epsilon = 1e-9);
        assert_relative_eq!(arena.get(b).unwrap().velocity().x, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn separating_contact_point_is_skipped() {
        let mut arena = Arena::new();
        let a = arena.insert(circle(Point2D::new(-1.5, 0.0), Vector2D::new(-1.0, 0.0), 1.0, 1.0));
        let b = arena.insert(circle(Point2D::new(1.5, 0.0), Vector2D::new(1.0, 0.0), 1.0, 1.0));

        let contact = Contact::new(a, b, Vector2D::new(1.0, 0.0), 0.5, vec![Point2D::new(0.5, 0.0)]);
        resolve_all(&mut arena, &[contact]);

        assert_relative_eq!(arena.get(a).unwrap().velocity().x, -1.0, epsilon = 1e-9);
        assert_relative_eq!(arena.get(b).unwrap().velocity().x, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn asymmetric_restitution_uses_minimum() {
        let mut arena = Arena::new();
        let a = arena.insert(circle(Point2D::new(-1.5, 0.0), Vector2D::new(1.0, 0.0), 1.0, 1.0));
        let b = arena.insert(circle(Point2D::new(1.5, 0.0), Vector2D::new(-1.0, 0.0), 1.0, 0.0));

        let contact = Contact::new(a, b, Vector2D::new(1.0, 0.0), 0.5, vec![Point2D::new(0.5, 0.0)]);
        resolve_all(&mut arena, &[contact]);

        let relative_normal_velocity =
            (arena.get(a).unwrap().velocity().x) - (arena.get(b).unwrap().velocity().x);
        assert_relative_eq!(relative_normal_velocity, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn static_branch_moves_only_dynamic_body_by_half_depth() {
        let mut arena = Arena::new();
        let static_handle = arena.insert(CircleSeed {
            body: BodySeed { mass: MassSpec::Static, ..BodySeed::default() },
            radius: 1.0,
        }.into_body());
        let dynamic_handle = arena.insert(circle(Point2D::new(0.0, 0.0), Vector2D::new(0.0, 0.0), 1.0, 0.5));

        let contact = Contact::new(
            static_handle,
            dynamic_handle,
            Vector2D::new(1.0, 0.0),
            2.0,
            vec![Point2D::new(0.0, 0.0)],
        );
        correct_position(&mut arena, &contact);

        assert_relative_eq!(arena.get(dynamic_handle).unwrap().position().x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(arena.get(static_handle).unwrap().position().x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn mass_ratio_split_sums_to_full_depth() {
        let mut arena = Arena::new();
        let a = arena.insert(circle(Point2D::new(0.0, 0.0), Vector2D::new(0.0, 0.0), 1.0, 0.5));
        let b = arena.insert(circle(Point2D::new(0.0, 0.0), Vector2D::new(0.0, 0.0), 3.0, 0.5));

        let contact = Contact::new(a, b, Vector2D::new(1.0, 0.0), 1.0, vec![Point2D::new(0.0, 0.0)]);
        correct_position(&mut arena, &contact);

        let a_pos = arena.get(a).unwrap().position().x;
        let b_pos = arena.get(b).unwrap().position().x;
        assert_relative_eq!(b_pos - a_pos, 1.0, epsilon = 1e-9);
    }
}
