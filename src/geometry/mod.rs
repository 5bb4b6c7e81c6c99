//! 2D geometry kernel: rectangles, segments, rays and their intersections
//!
//! All primitives use double precision (`glam::DVec2`) and compare
//! coordinates with an epsilon tolerance to absorb round-off from the
//! repeated subtraction and scaling the sweep performs.

mod edge;
mod half_edge;
mod rect;

pub use edge::Edge;
pub use half_edge::{HalfEdge, Support};
pub use rect::Rect;

use glam::DVec2;

/// Tolerance for coordinate comparisons
pub const EPSILON: f64 = 1e-5;

/// Epsilon equality of two points
#[inline]
pub fn approx_eq(a: DVec2, b: DVec2) -> bool {
    a.abs_diff_eq(b, EPSILON)
}
