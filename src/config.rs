//! Map generation parameters

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};
use crate::geometry::Rect;

/// Everything needed to reproduce a map
///
/// Two runs with the same config produce identical maps. Construct directly
/// or through [`MapConfigBuilder`] for validated setup.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Seed for site sampling
    pub seed: u64,
    /// Width of the map rectangle
    pub width: f64,
    /// Height of the map rectangle
    pub height: f64,
    /// Number of sites to sample
    pub site_count: usize,
    /// Lloyd relaxation rounds; zero skips relaxation
    pub lloyd_iterations: usize,
    /// Early-stop threshold for relaxation as a fraction of the map
    /// diagonal; zero always runs the full number of rounds
    pub lloyd_convergence: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 100.0,
            height: 100.0,
            site_count: 100,
            lloyd_iterations: 2,
            lloyd_convergence: 0.0,
        }
    }
}

impl MapConfig {
    /// The map rectangle, anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Validating builder for [`MapConfig`]
///
/// Starts from the defaults with a random seed; every setter checks its
/// argument so an invalid config is caught where it is written, not deep in
/// generation.
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    config: MapConfig,
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MapConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: MapConfig {
                seed: rand::random(),
                ..MapConfig::default()
            },
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the map dimensions. Both must be positive and finite.
    pub fn dimensions(mut self, width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(VoronoiError::InvalidConfig(format!(
                "dimensions must be positive and finite, got {}x{}",
                width, height
            )));
        }
        self.config.width = width;
        self.config.height = height;
        Ok(self)
    }

    /// Set the number of sites. Must be at least one.
    pub fn site_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(VoronoiError::InvalidConfig(
                "site count must be at least 1".to_string(),
            ));
        }
        self.config.site_count = count;
        Ok(self)
    }

    pub fn lloyd_iterations(mut self, iterations: usize) -> Self {
        self.config.lloyd_iterations = iterations;
        self
    }

    /// Set the relaxation early-stop threshold. Must be non-negative.
    pub fn lloyd_convergence(mut self, threshold: f64) -> Result<Self> {
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(VoronoiError::InvalidConfig(format!(
                "convergence threshold must be non-negative, got {}",
                threshold
            )));
        }
        self.config.lloyd_convergence = threshold;
        Ok(self)
    }

    pub fn build(self) -> MapConfig {
        self.config
    }
}
