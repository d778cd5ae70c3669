//! Impulse-based collision response with restitution.
//!
//! Two kinds of response, both mutating bodies in place:
//!
//! - **Pairwise**: positional correction pushes the circles apart along the
//!   contact normal in proportion to inverse mass (so the heavy body moves
//!   less), then an impulse
//!   `j = -(1+e) * (v_rel . n) / (1/m_a + 1/m_b)`
//!   adjusts both velocities — but only when the bodies are approaching,
//!   so a pair already separating is left alone.
//! - **Boundary**: clamp the offending coordinate back inside the box and
//!   reflect that velocity component, scaled by restitution. Axes are
//!   resolved independently, x before y; the order is observable when a
//!   body lands exactly in a corner and must stay fixed.
//!
//! Restitution `e` is in [0, 1]: 1 reflects the full normal velocity
//! (elastic), 0 kills it (perfectly inelastic). When both bodies carry an
//! override the pair uses the *minimum* of the two effective values, i.e.
//! the deader ball wins.

use crate::types::{Body, Bounds};

use super::detection;

/// Restitution a single body uses, falling back to the world value.
fn body_restitution(body: &Body, world_restitution: f64) -> f64 {
    body.restitution.unwrap_or(world_restitution)
}

/// Effective restitution for a pair of bodies.
fn pair_restitution(a: &Body, b: &Body, world_restitution: f64) -> f64 {
    body_restitution(a, world_restitution).min(body_restitution(b, world_restitution))
}

/// Detect and resolve one pair. Returns true when an overlap was resolved.
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f64) -> bool {
    let Some(contact) = detection::circle_circle(a, b) else {
        return false;
    };

    let normal = contact.normal;
    let w_a = a.inv_mass();
    let w_b = b.inv_mass();
    let w_sum = w_a + w_b;

    // Positional correction: total separation equals the penetration,
    // split by inverse mass. Eliminates the overlap outright so the pass
    // does not need to re-run detection.
    a.pos -= normal * (contact.penetration * w_a / w_sum);
    b.pos += normal * (contact.penetration * w_b / w_sum);

    // Velocity correction, only for approaching bodies.
    let rel_vel = b.vel - a.vel;
    let vel_along_normal = rel_vel.dot(&normal);
    if vel_along_normal < 0.0 {
        let impulse = -(1.0 + restitution) * vel_along_normal / w_sum;
        a.vel -= normal * (impulse * w_a);
        b.vel += normal * (impulse * w_b);
    }

    true
}

/// Clamp a body back inside the bounds and reflect the offending velocity
/// component. Axes are handled independently, x first.
pub fn resolve_bounds(body: &mut Body, bounds: &Bounds, restitution: f64) {
    // Left edge
    if body.pos.x - body.radius < bounds.min.x {
        body.pos.x = bounds.min.x + body.radius;
        body.vel.x = -body.vel.x * restitution;
    }
    // Right edge
    if body.pos.x + body.radius > bounds.max.x {
        body.pos.x = bounds.max.x - body.radius;
        body.vel.x = -body.vel.x * restitution;
    }
    // Bottom edge
    if body.pos.y - body.radius < bounds.min.y {
        body.pos.y = bounds.min.y + body.radius;
        body.vel.y = -body.vel.y * restitution;
    }
    // Top edge
    if body.pos.y + body.radius > bounds.max.y {
        body.pos.y = bounds.max.y - body.radius;
        body.vel.y = -body.vel.y * restitution;
    }
}

/// One full resolution pass: every unordered pair (i, j), i < j, in index
/// order, then the boundary check for every body. Pair k+1 sees positions
/// pair k already corrected, which keeps the pass deterministic and
/// penetration-free without iterating to a fixed point.
pub fn resolve_all(bodies: &mut [Body], bounds: &Bounds, world_restitution: f64) {
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            // Two disjoint &mut out of one slice, split at the second index
            let (head, tail) = bodies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let restitution = pair_restitution(a, b, world_restitution);
            resolve_pair(a, b, restitution);
        }
    }

    for body in bodies.iter_mut() {
        let restitution = body_restitution(body, world_restitution);
        resolve_bounds(body, bounds, restitution);
    }
}

// =============================================================================
// Tests
// =============================================================================
