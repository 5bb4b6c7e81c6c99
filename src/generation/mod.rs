//! Diagram generation pipeline: sample sites, relax, build

mod lloyd;
mod points;

pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions};
pub use points::sample_sites;

use crate::config::MapConfig;
use crate::error::Result;
use crate::fortune::Voronoi;

/// Run the full pipeline described by a [`MapConfig`].
///
/// Samples seeded sites, optionally relaxes them and builds the final
/// diagram.
pub fn generate_diagram(config: &MapConfig) -> Result<Voronoi> {
    let bounds = config.bounds();
    let mut sites = sample_sites(&bounds, config.site_count, config.seed);

    if config.lloyd_iterations > 0 {
        eprintln!(
            "[generation] relaxing {} sites for up to {} iterations",
            sites.len(),
            config.lloyd_iterations
        );
        let options = LloydOptions {
            max_iterations: config.lloyd_iterations,
            convergence_threshold: config.lloyd_convergence,
        };
        sites = lloyd_relaxation_with_options(sites, bounds, &options)?;
    }

    Voronoi::build(&sites, bounds)
}
