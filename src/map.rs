//! The generated map: cells, edges and lookup structures in one place

#[cfg(feature = "spatial-index")]
use glam::DVec2;

use crate::cell::VoronoiCell;
use crate::config::MapConfig;
use crate::error::Result;
use crate::generation::generate_diagram;
use crate::geometry::{Edge, Rect};
#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A finished Voronoi map
///
/// Produced by [`VoronoiMap::generate`] from a [`MapConfig`]; immutable
/// afterwards. Cell ids are indices into [`cells`](Self::cells) and stay
/// stable for the lifetime of the map.
pub struct VoronoiMap {
    config: MapConfig,
    bounds: Rect,
    cells: Vec<VoronoiCell>,
    edges: Vec<Edge>,
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl VoronoiMap {
    /// Run the full generation pipeline for the given config.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidConfig` for impossible parameters and any error
    /// raised by diagram construction.
    pub fn generate(config: MapConfig) -> Result<Self> {
        eprintln!(
            "[map] generating {} sites in {}x{} (seed {})",
            config.site_count, config.width, config.height, config.seed
        );

        let bounds = config.bounds();
        let diagram = generate_diagram(&config)?;
        let (cells, edges) = diagram.into_parts();

        eprintln!("[map] done: {} cells, {} edges", cells.len(), edges.len());

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let sites: Vec<DVec2> = cells.iter().map(|c| c.site).collect();
            SpatialIndex::new(&sites)
        };

        Ok(Self {
            config,
            bounds,
            cells,
            edges,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    pub fn get_cell(&self, id: usize) -> Option<&VoronoiCell> {
        self.cells.get(id)
    }

    /// Unique edges of the map, each shared by two cells.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Id of the cell containing the given position, or `None` outside the
    /// map rectangle.
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: DVec2) -> Option<usize> {
        if !self.bounds.contains(position) {
            return None;
        }
        Some(self.spatial_index.find_nearest(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> MapConfig {
        MapConfig {
            seed: 42,
            width: 100.0,
            height: 100.0,
            site_count: 20,
            lloyd_iterations: 1,
            lloyd_convergence: 0.0,
        }
    }

    #[test]
    fn test_generate_produces_requested_cells() {
        let map = VoronoiMap::generate(small_config()).unwrap();
        assert_eq!(map.cell_count(), 20);
        assert!(map.get_cell(0).is_some());
        assert!(map.get_cell(20).is_none());
    }

    #[test]
    fn test_cells_tile_the_map() {
        let map = VoronoiMap::generate(small_config()).unwrap();
        let total: f64 = map.cells().iter().map(|c| c.area).sum();
        assert!((total - map.bounds().area()).abs() < 1.0);
    }

    #[test]
    fn test_generation_is_reproducible() {
        let a = VoronoiMap::generate(small_config()).unwrap();
        let b = VoronoiMap::generate(small_config()).unwrap();
        assert_eq!(a.cell_count(), b.cell_count());
        for (ca, cb) in a.cells().iter().zip(b.cells()) {
            assert_eq!(ca.site, cb.site);
            assert_eq!(ca.area, cb.area);
        }
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_cell_at_site_returns_its_cell() {
        let map = VoronoiMap::generate(small_config()).unwrap();
        for (id, cell) in map.cells().iter().enumerate() {
            assert_eq!(map.find_cell_at(cell.site), Some(id));
        }
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_cell_at_outside_is_none() {
        let map = VoronoiMap::generate(small_config()).unwrap();
        assert_eq!(map.find_cell_at(DVec2::new(-10.0, 50.0)), None);
        assert_eq!(map.find_cell_at(DVec2::new(50.0, 200.0)), None);
    }
}
