//! Collision detection and resolution for the ball simulation.
//!
//! This module handles:
//! - **Detection**: circle-circle overlap tests on current positions
//! - **Resolution**: impulse-based response with restitution, plus
//!   boundary clamp-and-reflect
//!
//! Detection is deliberately discrete and O(n²): the demos run at small n,
//! and whether overlaps are caught per sub-step or only once per frame is
//! the trade-off the world's collision-timing policy exists to show. A
//! fast body can tunnel under the cheap policy; that is the lesson, not a
//! bug to engineer away with swept tests or broad-phase structures.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
