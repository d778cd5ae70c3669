//! The simulation world: owns the bodies, drives the per-frame loop.
//!
//! One external caller (the render/tick loop) invokes [`World::step`] once
//! per frame. The step subdivides `dt` into sub-steps, integrates every
//! body, and resolves collisions according to the timing policy:
//!
//! ```text
//! PerSubstep:                      PostAllSubsteps:
//!   repeat N times:                  repeat N times:
//!     integrate all bodies             integrate all bodies
//!     resolve pairs + bounds         resolve pairs + bounds (once)
//! ```
//!
//! `PerSubstep` catches overlaps while they are still shallow at N times
//! the resolution cost; `PostAllSubsteps` only sees the end-of-frame
//! configuration, so fast bodies can tunnel or resolve against stale
//! separations. Both are supported so the demos can show the difference.
//!
//! Everything here is single-threaded and synchronous: `step` runs to
//! completion on the caller's stack and the world assumes exclusive
//! access. A concurrent host must wrap the whole `World` in one lock.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision;
use crate::integrator::IntegrationMethod;
use crate::types::{constants, Body, BodySnapshot, Bounds, Vec2};

/// When the collision pass runs relative to sub-stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Integrate all sub-steps, then resolve once. Cheap, may tunnel.
    PostAllSubsteps,
    /// Resolve after every sub-step. Accurate, N times the cost.
    #[default]
    PerSubstep,
}

/// Operational state: Idle worlds ignore `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimState {
    Idle,
    Running,
}

/// Precondition violations. These are caller bugs, not transient
/// conditions: nothing is clamped or retried, and the world state is left
/// untouched by the failed call.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WorldError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("restitution must be in [0, 1], got {0}")]
    InvalidRestitution(f64),
    #[error("sub-step count must be at least 1")]
    InvalidSubSteps,
    #[error("body radius must be positive, got {0}")]
    InvalidRadius(f64),
    #[error("body mass must be positive, got {0}")]
    InvalidMass(f64),
    #[error("bounds must have positive width and height")]
    InvalidBounds,
}

/// The simulation world. Sole owner of every [`Body`]; the integrator and
/// the collision resolver only ever borrow them for the duration of one
/// call.
#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<Body>,
    gravity: Vec2,
    bounds: Bounds,
    restitution: f64,
    sub_steps: u32,
    method: IntegrationMethod,
    policy: CollisionPolicy,
    state: SimState,
}

impl World {
    /// New, empty, Idle world. Call [`World::start`] to make `step` act.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bodies: Vec::new(),
            gravity: constants::GRAVITY,
            bounds,
            restitution: 1.0,
            sub_steps: 1,
            method: IntegrationMethod::default(),
            policy: CollisionPolicy::default(),
            state: SimState::Idle,
        }
    }

    // -------------------------------------------------------------------------
    // State machine
    // -------------------------------------------------------------------------

    pub fn start(&mut self) {
        self.state = SimState::Running;
    }

    pub fn pause(&mut self) {
        self.state = SimState::Idle;
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Clear the body set and return to Idle. Valid from either state;
    /// all body handles are invalidated.
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.state = SimState::Idle;
    }

    // -------------------------------------------------------------------------
    // Bodies
    // -------------------------------------------------------------------------

    /// Spawn a ball (the mouse-click use case). Mass defaults to the disc
    /// area; use [`World::add`] for full control. Returns the body's
    /// stable index.
    pub fn add_body(&mut self, pos: Vec2, vel: Vec2, radius: f64) -> Result<usize, WorldError> {
        self.add(Body::from_radius(radius, pos, vel))
    }

    /// Add a fully-specified body after validating its invariants.
    pub fn add(&mut self, body: Body) -> Result<usize, WorldError> {
        if !(body.radius > 0.0) || !body.radius.is_finite() {
            return Err(WorldError::InvalidRadius(body.radius));
        }
        if !(body.mass > 0.0) || !body.mass.is_finite() {
            return Err(WorldError::InvalidMass(body.mass));
        }
        if let Some(e) = body.restitution {
            if !(0.0..=1.0).contains(&e) {
                return Err(WorldError::InvalidRestitution(e));
            }
        }
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Ordered render view, one entry per body, same order as the body
    /// indices. Taken after `step` completes.
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(BodySnapshot::from).collect()
    }

    // -------------------------------------------------------------------------
    // Live-tunable parameters
    // -------------------------------------------------------------------------
    //
    // All of these take effect on the next `step`; since a step runs to
    // completion before returning, there is no torn state to guard.

    pub fn set_integration_method(&mut self, method: IntegrationMethod) {
        if method != self.method {
            // Verlet history belongs to the method that wrote it; drop it
            // so a later switch back reseeds from the then-current velocity.
            for body in &mut self.bodies {
                body.prev_pos = None;
            }
        }
        self.method = method;
    }

    pub fn integration_method(&self) -> IntegrationMethod {
        self.method
    }

    pub fn set_collision_policy(&mut self, policy: CollisionPolicy) {
        self.policy = policy;
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn set_restitution(&mut self, restitution: f64) -> Result<(), WorldError> {
        if !(0.0..=1.0).contains(&restitution) {
            return Err(WorldError::InvalidRestitution(restitution));
        }
        self.restitution = restitution;
        Ok(())
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn set_sub_steps(&mut self, sub_steps: u32) -> Result<(), WorldError> {
        if sub_steps < 1 {
            return Err(WorldError::InvalidSubSteps);
        }
        self.sub_steps = sub_steps;
        Ok(())
    }

    pub fn sub_steps(&self) -> u32 {
        self.sub_steps
    }

    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<(), WorldError> {
        if !(bounds.width() > 0.0) || !(bounds.height() > 0.0) {
            return Err(WorldError::InvalidBounds);
        }
        self.bounds = bounds;
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    // -------------------------------------------------------------------------
    // Stepping
    // -------------------------------------------------------------------------

    /// Advance the simulation by one frame's time delta.
    ///
    /// A non-positive or non-finite `dt` is a precondition violation and
    /// fails fast without touching any state. While Idle, a valid `dt` is
    /// an `Ok` no-op, so callers may keep ticking a paused world.
    pub fn step(&mut self, dt: f64) -> Result<(), WorldError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(WorldError::InvalidTimeStep(dt));
        }
        if self.state == SimState::Idle {
            return Ok(());
        }

        let sdt = dt / f64::from(self.sub_steps);

        match self.policy {
            CollisionPolicy::PerSubstep => {
                for _ in 0..self.sub_steps {
                    self.integrate_all(sdt);
                    self.resolve(sdt);
                }
            }
            CollisionPolicy::PostAllSubsteps => {
                for _ in 0..self.sub_steps {
                    self.integrate_all(sdt);
                }
                self.resolve(sdt);
            }
        }

        Ok(())
    }

    fn integrate_all(&mut self, sdt: f64) {
        for body in &mut self.bodies {
            self.method.advance(body, self.gravity, sdt);
        }
    }

    fn resolve(&mut self, sdt: f64) {
        collision::resolve_all(&mut self.bodies, &self.bounds, self.restitution);

        // Under Verlet the authoritative state is the position pair, so
        // impulse and clamp results have to be folded back into the
        // history: prev = pos - vel*dt. When nothing collided this
        // reproduces the existing history exactly.
        if self.method == IntegrationMethod::Verlet {
            for body in &mut self.bodies {
                body.prev_pos = Some(body.pos - body.vel * sdt);
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

// =============================================================================
// Tests
// =============================================================================
