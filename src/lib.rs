//! # farm2d
//!
//! A small 2D impulse-based rigid-body physics kernel: a [`Farm`] advances
//! a population of convex rigid bodies through time, detects penetrating
//! contacts between them (circle/circle, circle/polygon, polygon/polygon
//! via the Separating Axis Theorem with Sutherland-Hodgman-style incident
//! edge clipping), and resolves those contacts with a sequential impulse
//! pass and split positional correction.
//!
//! Uses [`cgmath`](https://github.com/rustgd/cgmath/) for vector/point
//! arithmetic and [`log`](https://github.com/rust-lang/log) for structured
//! diagnostics; this crate never installs a logging backend itself.
//!
//! Deliberately out of scope: friction, warm-starting, position-solver
//! iteration, continuous collision detection, sleeping/islands,
//! non-convex geometry, broad-phase acceleration structures, and
//! multi-threaded solving. Every `Farm::update` is a single-step,
//! single-iteration explicit-Euler integration with one impulse pass and
//! one positional-correction pass per contact point.
//!
//! # Example
//!
//! ```rust
//! use farm2d::{BodySeed, CircleSeed, Farm, MassSpec, Point2D, Vector2D};
//!
//! let mut farm = Farm::new();
//! farm.grow_circular(CircleSeed {
//!     body: BodySeed {
//!         position: Point2D::new(-1.5, 0.0),
//!         velocity: Vector2D::new(1.0, 0.0),
//!         mass: MassSpec::Explicit { mass: 1.0, moment_of_inertia: 1.0 },
//!         coefficient_of_restitution: 1.0,
//!         ..BodySeed::default()
//!     },
//!     radius: 1.0,
//! });
//! farm.grow_circular(CircleSeed {
//!     body: BodySeed {
//!         position: Point2D::new(1.5, 0.0),
//!         velocity: Vector2D::new(-1.0, 0.0),
//!         mass: MassSpec::Explicit { mass: 1.0, moment_of_inertia: 1.0 },
//!         coefficient_of_restitution: 1.0,
//!         ..BodySeed::default()
//!     },
//!     radius: 1.0,
//! });
//! farm.update(1.0);
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

/// The floating-point precision used throughout this crate.
pub type Real = f64;

mod arena;
mod body;
mod contact;
mod farm;
mod integrator;
mod mass;
mod narrowphase;
mod pair;
mod shape;
mod solver;
mod vector;

pub use arena::{Arena, BodyHandle};
pub use body::{BodySeed, CircleSeed, MassSpec, PolygonSeed, RigidBody, Shape};
pub use contact::{Contact, MAX_CONTACT_POINTS};
pub use farm::Farm;
pub use mass::Mass;
pub use pair::BodyPair;
pub use shape::{CircleShape, PolygonShape};
pub use vector::{Cross, Point2D, Point2DExt, Vector2D, Vector2DExt};
