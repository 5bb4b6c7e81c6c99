//! Finite line segment

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A finite segment between two points, immutable once created
///
/// The length is computed at construction and cached.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// First endpoint
    pub a: DVec2,
    /// Second endpoint
    pub b: DVec2,
    /// Cached euclidean length
    pub length: f64,
}

impl Edge {
    /// Create a segment between two points
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            a,
            b,
            length: a.distance(b),
        }
    }

    /// Midpoint of the segment
    pub fn midpoint(&self) -> DVec2 {
        (self.a + self.b) * 0.5
    }
}
