//! Voronoi cells and their construction
//!
//! During the sweep a cell is a [`CellBuilder`] accumulating edges and box
//! corners in arbitrary order. Once the sweep is done the builder is frozen
//! into a [`VoronoiCell`] with an ordered vertex ring and precomputed
//! polygon measures.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{approx_eq, Edge, EPSILON};

/// A finished Voronoi cell: a convex polygon around its site
///
/// Vertices are sorted counterclockwise around the site. Area, perimeter
/// and centroid are computed once when the cell is finalized.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct VoronoiCell {
    /// The site this cell grew around
    pub site: DVec2,
    /// Polygon vertices in counterclockwise order
    pub vertices: Vec<DVec2>,
    /// Polygon surface area
    pub area: f64,
    /// Closed polygon boundary length
    pub perimeter: f64,
    /// Polygon centroid; equals the vertex mean for degenerate slivers and
    /// the site itself when the cell has no vertices
    pub centroid: DVec2,
}

impl VoronoiCell {
    /// Bounded edges of the cell polygon, walking the vertex ring.
    pub fn boundary(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Edge::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// Accumulates a cell's geometry while the sweep runs
#[derive(Debug)]
pub(crate) struct CellBuilder {
    site: DVec2,
    edges: Vec<Edge>,
    corners: Vec<DVec2>,
}

impl CellBuilder {
    pub fn new(site: DVec2) -> Self {
        Self {
            site,
            edges: Vec::new(),
            corners: Vec::new(),
        }
    }

    pub fn site(&self) -> DVec2 {
        self.site
    }

    /// Record a finished edge bordering this cell.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Record a bounding-box corner owned by this cell.
    pub fn add_corner(&mut self, corner: DVec2) {
        self.corners.push(corner);
    }

    /// Freeze the builder into a cell.
    ///
    /// Collects edge endpoints and corners, drops epsilon-duplicates, sorts
    /// the survivors counterclockwise around the site and derives the
    /// polygon measures.
    pub fn finalize(self) -> VoronoiCell {
        let mut vertices: Vec<DVec2> = Vec::with_capacity(2 * self.edges.len() + 4);
        for edge in &self.edges {
            for p in [edge.a, edge.b] {
                if !vertices.iter().any(|&q| approx_eq(p, q)) {
                    vertices.push(p);
                }
            }
        }
        for &corner in &self.corners {
            if !vertices.iter().any(|&q| approx_eq(corner, q)) {
                vertices.push(corner);
            }
        }

        let site = self.site;
        vertices.sort_by(|a, b| {
            let ta = (a.y - site.y).atan2(a.x - site.x);
            let tb = (b.y - site.y).atan2(b.x - site.x);
            ta.total_cmp(&tb)
        });

        let (area, perimeter, centroid) = polygon_measures(site, &vertices);

        VoronoiCell {
            site,
            vertices,
            area,
            perimeter,
            centroid,
        }
    }
}

/// Shoelace area, boundary length and centroid of a vertex ring.
fn polygon_measures(site: DVec2, vertices: &[DVec2]) -> (f64, f64, DVec2) {
    if vertices.is_empty() {
        return (0.0, 0.0, site);
    }

    let n = vertices.len();
    let mut area2 = 0.0;
    let mut perimeter = 0.0;
    let mut weighted = DVec2::ZERO;
    for i in 0..n {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        area2 += cross;
        weighted += (p + q) * cross;
        perimeter += p.distance(q);
    }

    let area = (area2 / 2.0).abs();
    let centroid = if area < EPSILON {
        // sliver: fall back to the vertex mean
        vertices.iter().copied().sum::<DVec2>() / n as f64
    } else {
        weighted / (3.0 * area2)
    };

    (area, perimeter, centroid)
}
