//! Rays and their algebraic support lines
//!
//! A [`HalfEdge`] represents an unfinished bisector between two sites: a head
//! point plus a growth direction. Its [`Support`] is the underlying line in
//! algebraic form, which makes line/line and line/rectangle intersection a
//! small exact computation instead of a parametric one.

use glam::DVec2;

use super::{approx_eq, Rect, EPSILON};
use crate::error::{Result, VoronoiError};

/// The support line of a ray, as a closed tagged union
///
/// Intersections dispatch on the pair of tags, so every combination is
/// checked exhaustively at compile time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Support {
    /// y = slope * x + intercept
    Affine { slope: f64, intercept: f64 },
    /// x = constant
    Vertical { x: f64 },
}

impl Support {
    /// Intersect two support lines.
    ///
    /// Parallel, non-coincident lines yield `None`; coincident lines yield a
    /// single arbitrary point on the common line. Slope comparison uses the
    /// global epsilon so near-parallel pairs do not produce a wild far-away
    /// intersection.
    pub fn intersect(&self, other: &Support) -> Option<DVec2> {
        match (*self, *other) {
            (
                Support::Affine { slope: s1, intercept: i1 },
                Support::Affine { slope: s2, intercept: i2 },
            ) => {
                if (s1 - s2).abs() < EPSILON {
                    if (i1 - i2).abs() < EPSILON {
                        // coincident: any shared point will do
                        Some(DVec2::new(0.0, i1))
                    } else {
                        None
                    }
                } else {
                    let x = (i2 - i1) / (s1 - s2);
                    Some(DVec2::new(x, s1 * x + i1))
                }
            }
            (Support::Affine { slope, intercept }, Support::Vertical { x })
            | (Support::Vertical { x }, Support::Affine { slope, intercept }) => {
                Some(DVec2::new(x, slope * x + intercept))
            }
            (Support::Vertical { x: x1 }, Support::Vertical { x: x2 }) => {
                if (x1 - x2).abs() < EPSILON {
                    Some(DVec2::new(x1, 0.0))
                } else {
                    None
                }
            }
        }
    }

    /// Intersect the support line with a rectangle boundary.
    ///
    /// Returns zero, one (tangent corner) or two points.
    pub fn intersect_rect(&self, rect: &Rect) -> Vec<DVec2> {
        let mut points: Vec<DVec2> = Vec::with_capacity(2);
        fn push_distinct(p: DVec2, points: &mut Vec<DVec2>) {
            if !points.iter().any(|&q| approx_eq(p, q)) {
                points.push(p);
            }
        }

        match *self {
            Support::Vertical { x } => {
                if x >= rect.x - EPSILON && x <= rect.right() + EPSILON {
                    points.push(DVec2::new(x, rect.y));
                    points.push(DVec2::new(x, rect.top()));
                }
            }
            Support::Affine { slope, intercept } => {
                let y_at = |x: f64| slope * x + intercept;

                for x in [rect.x, rect.right()] {
                    let y = y_at(x);
                    if y >= rect.y - EPSILON && y <= rect.top() + EPSILON {
                        push_distinct(DVec2::new(x, y), &mut points);
                    }
                }
                if slope.abs() >= EPSILON {
                    for y in [rect.y, rect.top()] {
                        let x = (y - intercept) / slope;
                        if x >= rect.x - EPSILON && x <= rect.right() + EPSILON {
                            push_distinct(DVec2::new(x, y), &mut points);
                        }
                    }
                }
                points.truncate(2);
            }
        }
        points
    }
}

/// A ray: head point plus growth direction
///
/// While the sweep runs, a half-edge traces the bisector between two adjacent
/// cells whose far endpoint is not yet known. The support line is derived
/// once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfEdge {
    /// Fixed end of the ray
    pub head: DVec2,
    /// Growth direction (not necessarily normalized)
    pub direction: DVec2,
    /// Algebraic support line
    pub support: Support,
}

impl HalfEdge {
    /// Create a ray from its head and direction.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateInput` if both direction components are below the
    /// epsilon tolerance: a ray needs a direction.
    pub fn new(head: DVec2, direction: DVec2) -> Result<Self> {
        if direction.x.abs() < EPSILON && direction.y.abs() < EPSILON {
            return Err(VoronoiError::DegenerateInput(format!(
                "half-edge direction too small: {:?}",
                direction
            )));
        }

        let support = if direction.x.abs() < EPSILON {
            Support::Vertical { x: head.x }
        } else {
            let slope = direction.y / direction.x;
            Support::Affine {
                slope,
                intercept: head.y - slope * head.x,
            }
        };

        Ok(Self {
            head,
            direction,
            support,
        })
    }

    /// Whether a point on the support line lies in the ray's forward
    /// direction (at or ahead of the head).
    #[inline]
    fn is_forward(&self, p: DVec2) -> bool {
        (p - self.head).dot(self.direction) >= -EPSILON
    }

    /// Intersect two rays.
    ///
    /// The support lines are intersected first; the candidate is rejected if
    /// it lies behind either head.
    pub fn intersect_half_edge(&self, other: &HalfEdge) -> Option<DVec2> {
        let p = self.support.intersect(&other.support)?;
        if self.is_forward(p) && other.is_forward(p) {
            Some(p)
        } else {
            None
        }
    }

    /// Intersect the ray with a rectangle boundary.
    ///
    /// If the head lies inside the rectangle only the forward crossing is
    /// kept; otherwise the raw support-line crossings are returned.
    pub fn intersect_rect(&self, rect: &Rect) -> Vec<DVec2> {
        let points = self.support.intersect_rect(rect);
        if points.is_empty() || !rect.contains(self.head) {
            return points;
        }
        points
            .into_iter()
            .find(|&p| self.is_forward(p))
            .into_iter()
            .collect()
    }
}
