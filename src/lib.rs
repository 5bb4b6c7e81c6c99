//! Planar Voronoi diagrams via Fortune's sweep line
//!
//! A standalone library for generating Voronoi maps clipped to a rectangle,
//! with seeded site sampling and Lloyd relaxation for evenly sized cells.
//!
//! # Quick Start
//!
//! ```rust
//! use voronoi_map::*;
//!
//! // Generate a map
//! let config = MapConfigBuilder::new()
//!     .seed(42)
//!     .dimensions(200.0, 100.0).unwrap()
//!     .site_count(50).unwrap()
//!     .lloyd_iterations(2)
//!     .build();
//!
//! let map = VoronoiMap::generate(config).unwrap();
//! println!("Generated {} cells", map.cell_count());
//!
//! // Or build a diagram straight from your own sites
//! let sites = vec![DVec2::new(25.0, 50.0), DVec2::new(75.0, 50.0)];
//! let diagram = Voronoi::build(&sites, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
//! assert_eq!(diagram.cells().len(), 2);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-cell lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, cells and geometry

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod cell;
pub mod fortune;
pub mod generation;
pub mod map;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{Result, VoronoiError};
pub use config::{MapConfig, MapConfigBuilder};
pub use geometry::{Edge, HalfEdge, Rect, Support, EPSILON};
pub use cell::VoronoiCell;
pub use fortune::Voronoi;
pub use generation::{
    lloyd_relaxation, lloyd_relaxation_with_options, sample_sites, LloydOptions,
};
pub use map::VoronoiMap;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
