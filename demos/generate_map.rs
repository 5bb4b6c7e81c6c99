//! Example: Generate a Voronoi map
//!
//! Demonstrates the basic usage of the generation pipeline.

use voronoi_map::*;

fn main() {
    println!("Voronoi Map Generation Example");
    println!("==============================\n");

    // Create a configuration for a small map
    let config = MapConfigBuilder::new()
        .seed(42)
        .dimensions(400.0, 300.0)
        .unwrap()
        .site_count(150)
        .unwrap()
        .lloyd_iterations(3)
        .build();

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Dimensions: {}x{}", config.width, config.height);
    println!("  Site Count: {}", config.site_count);
    println!("  Lloyd Iterations: {}", config.lloyd_iterations);
    println!();

    println!("Generating map...");
    let map = VoronoiMap::generate(config).expect("Failed to generate map");
    println!(
        "Generated {} cells and {} edges\n",
        map.cell_count(),
        map.edges().len()
    );

    // Analyze the generated cells
    let total_vertices: usize = map.cells().iter().map(|c| c.vertices.len()).sum();
    let avg_vertices = total_vertices as f64 / map.cell_count() as f64;
    let avg_area: f64 =
        map.cells().iter().map(|c| c.area).sum::<f64>() / map.cell_count() as f64;

    println!("Statistics:");
    println!("  Average vertices per cell: {:.2}", avg_vertices);
    println!("  Average cell area: {:.2}", avg_area);
    println!();

    // Show details for first few cells
    println!("Sample cells:");
    for (id, cell) in map.cells().iter().take(5).enumerate() {
        println!(
            "  Cell {}: site=({:.2}, {:.2}), vertices={}, area={:.2}, perimeter={:.2}",
            id,
            cell.site.x,
            cell.site.y,
            cell.vertices.len(),
            cell.area,
            cell.perimeter
        );
    }

    #[cfg(feature = "spatial-index")]
    {
        let query = DVec2::new(200.0, 150.0);
        if let Some(id) = map.find_cell_at(query) {
            println!("\nPoint ({}, {}) lies in cell {}", query.x, query.y, id);
        }
    }

    println!("\nGeneration complete!");
}
