//! # Bounce Core
//!
//! The numerical simulation engine shared by a set of educational 2D
//! physics demos: bouncing balls in a box, integrated with a pluggable
//! time-integration method and resolved with impulse-based circle
//! collisions.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec2, Body, Bounds, snapshots)
//! - `integrator`: Numerical integration (Euler, semi-implicit, RK4, Verlet)
//! - `collision`: Circle-circle and boundary detection and resolution
//! - `world`: Main orchestrator — sub-stepping, collision timing, tuning
//! - `scenes`: YAML-based scene configuration loader
//!
//! The presentation layer (canvas, widgets, input) is external: it calls
//! [`World::step`](world::World::step) once per frame and draws whatever
//! [`World::snapshot`](world::World::snapshot) returns.

pub mod collision;
pub mod integrator;
pub mod scenes;
pub mod types;
pub mod world;

pub use integrator::IntegrationMethod;
pub use types::{Body, BodySnapshot, Bounds, Vec2};
pub use world::{CollisionPolicy, SimState, World, WorldError};
