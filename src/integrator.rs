//! Numerical integrators for advancing a body in time.
//!
//! The demos exist to show that the choice of integrator materially changes
//! long-run behaviour, so all four methods are kept side by side:
//!
//! - **Euler** (explicit): moves the position with the *pre-update*
//!   velocity. Gains energy under repeated application; kept deliberately
//!   to show divergence.
//! - **Semi-implicit Euler** (symplectic): same cost as Euler with the two
//!   updates reversed, so the *updated* velocity moves the position. Stable
//!   over long runs; the default method.
//! - **RK4**: four derivative evaluations with the classic
//!   (k1 + 2k2 + 2k3 + k4)/6 weighting. For a constant gravity field this
//!   buys nothing over semi-implicit Euler at 4x the cost, which is the
//!   point: the staged technique only pays off for state-dependent forces.
//! - **Verlet** (position form): advances from the last two positions;
//!   velocity is derived, not authoritative.
//!
//! Selection is a runtime strategy swap at world level. Each body carries
//! its own Verlet history, so switching methods mid-run cannot corrupt
//! other bodies.

use serde::{Deserialize, Serialize};

use crate::types::{Body, Vec2};

/// Integration method, selectable per world and swappable mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMethod {
    /// Explicit (forward) Euler. Unstable by design; see module docs.
    Euler,
    /// Symplectic Euler, the default production method.
    #[default]
    SemiImplicitEuler,
    /// Classic 4th-order Runge-Kutta.
    Rk4,
    /// Position Verlet with per-body history.
    Verlet,
}

impl IntegrationMethod {
    /// Advance one body by one sub-step of size `dt` under constant
    /// gravity, mutating position and velocity (and `prev_pos` for Verlet)
    /// in place.
    ///
    /// `dt` must be positive and finite; `World::step` is the validating
    /// gate, so a bad `dt` here is a caller bug.
    pub fn advance(&self, body: &mut Body, gravity: Vec2, dt: f64) {
        debug_assert!(dt.is_finite() && dt > 0.0, "non-positive dt: {}", dt);

        match self {
            IntegrationMethod::Euler => {
                // Position first, with the stale velocity. This ordering is
                // the whole difference from the symplectic variant.
                body.pos += body.vel * dt;
                body.vel += gravity * dt;
            }
            IntegrationMethod::SemiImplicitEuler => {
                body.vel += gravity * dt;
                body.pos += body.vel * dt;
            }
            IntegrationMethod::Rk4 => {
                // State derivative is (velocity, acceleration). Gravity is
                // constant so a1..a4 are all equal, but the four stages are
                // written out to show the general shape.
                let v1 = body.vel;
                let a1 = gravity;

                let v2 = body.vel + a1 * (dt / 2.0);
                let a2 = gravity;

                let v3 = body.vel + a2 * (dt / 2.0);
                let a3 = gravity;

                let v4 = body.vel + a3 * dt;
                let a4 = gravity;

                body.pos += (v1 + v2 * 2.0 + v3 * 2.0 + v4) * (dt / 6.0);
                body.vel += (a1 + a2 * 2.0 + a3 * 2.0 + a4) * (dt / 6.0);
            }
            IntegrationMethod::Verlet => {
                // Lazy seed: fabricate the previous position so the first
                // advance respects the initial velocity.
                let prev = body.prev_pos.unwrap_or(body.pos - body.vel * dt);

                let new_pos = body.pos * 2.0 - prev + gravity * (dt * dt);
                body.prev_pos = Some(body.pos);
                body.pos = new_pos;

                // Velocity is derived from the position history. Anything
                // reading body.vel (the collision resolver, snapshots) gets
                // this, never a stale field.
                body.vel = (body.pos - body.prev_pos.unwrap()) / dt;
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
