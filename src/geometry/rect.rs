//! Axis-aligned bounding rectangle

use glam::DVec2;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::EPSILON;

/// Axis-aligned box delimiting the diagram
///
/// Defined by its bottom-left corner (smallest x and y) and its dimensions.
/// Used for containment tests, edge clipping and site sampling.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Create a rectangle from its bottom-left corner and dimensions
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Containment test, padded by the global epsilon so that clipped
    /// points computed to lie exactly on the boundary are kept.
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x - EPSILON
            && p.x <= self.x + self.w + EPSILON
            && p.y >= self.y - EPSILON
            && p.y <= self.y + self.h + EPSILON
    }

    /// The four corners: bottom-left, bottom-right, top-right, top-left
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.x, self.y),
            DVec2::new(self.x + self.w, self.y),
            DVec2::new(self.x + self.w, self.y + self.h),
            DVec2::new(self.x, self.y + self.h),
        ]
    }

    /// y-coordinate of the top boundary
    #[inline]
    pub fn top(&self) -> f64 {
        self.y + self.h
    }

    /// x-coordinate of the right boundary
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Diagonal length, used as the scale for convergence thresholds
    pub fn diagonal(&self) -> f64 {
        (self.w * self.w + self.h * self.h).sqrt()
    }

    /// Surface area
    #[inline]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Sample a uniform point inside the rectangle
    pub fn sample<R: Rng>(&self, rng: &mut R) -> DVec2 {
        DVec2::new(
            self.x + rng.gen::<f64>() * self.w,
            self.y + rng.gen::<f64>() * self.h,
        )
    }
}
