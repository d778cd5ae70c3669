//! Core types for the 2D ball simulation.
//!
//! All quantities are in simulation units:
//! - Position: metres (the demos use a ~20x12 m box)
//! - Velocity: metres per second (m/s)
//! - Mass: kilograms (kg)
//!
//! `Vec2` is a plain value type: every operation returns a new vector, so
//! state can never be corrupted by two bodies aliasing the same vector
//! instance.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vec2 - 2D Vector
// =============================================================================

/// A 2D vector used for positions, velocities, and gravity.
///
/// Coordinate system:
/// - X: horizontal (positive to the right)
/// - Y: vertical (positive upward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is zero
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < constants::EPSILON {
            Self::ZERO
        } else {
            *self / mag
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Distance between two points
    pub fn distance(&self, other: &Self) -> f64 {
        (*other - *self).magnitude()
    }
}

// Operator overloads for Vec2
impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    fn mul(self, vec: Vec2) -> Vec2 {
        vec * self
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

// =============================================================================
// Body
// =============================================================================

/// Mutable state of one simulated ball.
///
/// A body's identity is its index in the world's body vector; indices are
/// stable from the moment the body is added until the next `reset()`.
///
/// `prev_pos` is Verlet position history. It is `None` until the Verlet
/// integrator seeds it on its first advance, and the world clears it again
/// whenever the integration method changes, so history can never leak
/// between methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub prev_pos: Option<Vec2>,
    pub radius: f64,
    pub mass: f64,
    /// Per-body restitution override; `None` means use the world value.
    pub restitution: Option<f64>,
    pub colour: [u8; 3],
}

impl Body {
    pub fn new(radius: f64, mass: f64, pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            prev_pos: None,
            radius,
            mass,
            restitution: None,
            colour: [200, 200, 200],
        }
    }

    /// Spawn-style constructor used for mouse-click spawning: mass is
    /// proportional to the disc area, matching the demo scenes.
    pub fn from_radius(radius: f64, pos: Vec2, vel: Vec2) -> Self {
        Self::new(radius, std::f64::consts::PI * radius * radius, pos, vel)
    }

    pub fn with_colour(mut self, colour: [u8; 3]) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = Some(restitution);
        self
    }

    /// Translational kinetic energy, 0.5 * m * |v|^2
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.magnitude_squared()
    }

    pub fn inv_mass(&self) -> f64 {
        1.0 / self.mass
    }
}

// =============================================================================
// Bounds
// =============================================================================

/// Axis-aligned rectangle the boundary-collision check operates against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box with its bottom-left corner at the origin, the demo default.
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True when a circle of the given radius fits entirely inside.
    pub fn contains_circle(&self, centre: Vec2, radius: f64) -> bool {
        centre.x - radius >= self.min.x
            && centre.x + radius <= self.max.x
            && centre.y - radius >= self.min.y
            && centre.y + radius <= self.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        // Good aspect ratio for a 1024x720 canvas, per the demos
        Self::from_size(20.0, 12.0)
    }
}

// =============================================================================
// Render snapshot
// =============================================================================

/// Read-only view of one body, taken after `step` completes, for the
/// external presentation layer to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub colour: [u8; 3],
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            x: body.pos.x,
            y: body.pos.y,
            radius: body.radius,
            colour: body.colour,
        }
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Constants shared across the demos.
pub mod constants {
    use super::Vec2;

    /// Default gravity vector (m/s²), pointing down
    pub const GRAVITY: Vec2 = Vec2::new(0.0, -10.0);

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================
