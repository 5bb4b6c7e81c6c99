//! Lloyd relaxation
//!
//! Repeatedly rebuilds the diagram and moves every site to the centroid of
//! its cell. A few rounds turn arbitrary site sets into a blue-noise-like
//! distribution with evenly sized cells.

use glam::DVec2;

use crate::error::Result;
use crate::fortune::Voronoi;
use crate::geometry::Rect;

/// Tuning for [`lloyd_relaxation_with_options`]
#[derive(Debug, Clone, Copy)]
pub struct LloydOptions {
    /// Upper bound on relaxation rounds
    pub max_iterations: usize,
    /// Early-stop threshold as a fraction of the bounds diagonal: stop once
    /// no site moved further than this in a round. Zero disables the check
    /// and always runs `max_iterations` rounds.
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_threshold: 0.01,
        }
    }
}

/// Run a fixed number of relaxation rounds.
pub fn lloyd_relaxation(sites: Vec<DVec2>, bounds: Rect, iterations: usize) -> Result<Vec<DVec2>> {
    lloyd_relaxation_with_options(
        sites,
        bounds,
        &LloydOptions {
            max_iterations: iterations,
            convergence_threshold: 0.0,
        },
    )
}

/// Relax sites toward the centroids of their cells.
///
/// Coincident input sites collapse during diagram construction, so the
/// returned set can be smaller than the input.
pub fn lloyd_relaxation_with_options(
    mut sites: Vec<DVec2>,
    bounds: Rect,
    options: &LloydOptions,
) -> Result<Vec<DVec2>> {
    let threshold = options.convergence_threshold * bounds.diagonal();

    for iteration in 0..options.max_iterations {
        let diagram = Voronoi::build(&sites, bounds)?;

        // measure per cell: the caller's input order does not survive
        // diagram construction, but every cell carries its own site
        let max_shift = max_site_shift(&diagram);
        sites = diagram.centroids();

        eprintln!(
            "[lloyd] iteration {}/{}: max site shift {:.4}",
            iteration + 1,
            options.max_iterations,
            max_shift
        );
        if threshold > 0.0 && max_shift < threshold {
            eprintln!("[lloyd] converged after {} iterations", iteration + 1);
            break;
        }
    }

    Ok(sites)
}

/// Largest distance from any cell's site to that same cell's centroid.
fn max_site_shift(diagram: &Voronoi) -> f64 {
    diagram
        .cells()
        .iter()
        .map(|c| c.site.distance(c.centroid))
        .fold(0.0, f64::max)
}
