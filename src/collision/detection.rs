//! Circle-circle overlap detection.
//!
//! Works on the positions the bodies have at the moment of the call. The
//! resolution pass walks pairs in index order and resolves each overlap as
//! it finds it, so later pairs in the same pass see already-corrected
//! positions.

use crate::types::{constants, Body, Vec2};

/// An overlap between two circles.
///
/// The normal points from the first body toward the second and always has
/// unit length; `penetration` is the total overlap depth along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vec2,
    pub penetration: f64,
}

/// Test two circles for overlap on their current positions.
///
/// Returns `None` when the circles are separated or exactly touching.
/// When the centres coincide there is no meaningful direction to separate
/// along, so a fixed unit-x normal is used instead of dividing by zero;
/// the choice is arbitrary but must stay deterministic.
pub fn circle_circle(a: &Body, b: &Body) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let dist = delta.magnitude();
    let penetration = (a.radius + b.radius) - dist;

    if penetration <= 0.0 {
        return None;
    }

    let normal = if dist < constants::EPSILON {
        Vec2::new(1.0, 0.0)
    } else {
        delta / dist
    };

    Some(Contact {
        normal,
        penetration,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f64, y: f64, radius: f64) -> Body {
        Body::new(radius, 1.0, Vec2::new(x, y), Vec2::ZERO)
    }

    #[test]
    fn test_separated_circles_no_contact() {
        let a = ball_at(0.0, 0.0, 1.0);
        let b = ball_at(3.0, 0.0, 1.0);
        assert!(circle_circle(&a, &b).is_none());
    }

    #[test]
    fn test_touching_circles_no_contact() {
        let a = ball_at(0.0, 0.0, 1.0);
        let b = ball_at(2.0, 0.0, 1.0);
        assert!(circle_circle(&a, &b).is_none());
    }

    #[test]
    fn test_overlap_normal_and_depth() {
        let a = ball_at(0.0, 0.0, 1.0);
        let b = ball_at(1.5, 0.0, 1.0);

        let contact = circle_circle(&a, &b).expect("overlapping circles");
        assert!((contact.penetration - 0.5).abs() < 1e-12);
        assert!((contact.normal.x - 1.0).abs() < 1e-12);
        assert!(contact.normal.y.abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_normal_is_unit() {
        let a = ball_at(0.0, 0.0, 1.0);
        let b = ball_at(1.0, 1.0, 1.0);

        let contact = circle_circle(&a, &b).expect("overlapping circles");
        assert!((contact.normal.magnitude() - 1.0).abs() < 1e-12);
        // Normal points from a toward b
        assert!(contact.normal.x > 0.0 && contact.normal.y > 0.0);
    }

    #[test]
    fn test_coincident_centres_fallback_normal() {
        let a = ball_at(2.0, 2.0, 1.0);
        let b = ball_at(2.0, 2.0, 0.5);

        let contact = circle_circle(&a, &b).expect("fully overlapping circles");
        assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
        assert!((contact.penetration - 1.5).abs() < 1e-12);
    }
}
