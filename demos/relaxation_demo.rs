//! Example: Lloyd relaxation
//!
//! Shows how relaxation evens out cell sizes by comparing the area spread
//! of a raw random diagram against a relaxed one.

use voronoi_map::*;

fn area_spread(diagram: &Voronoi) -> f64 {
    let areas: Vec<f64> = diagram.cells().iter().map(|c| c.area).collect();
    let mean = areas.iter().sum::<f64>() / areas.len() as f64;
    let variance =
        areas.iter().map(|a| (a - mean) * (a - mean)).sum::<f64>() / areas.len() as f64;
    variance.sqrt() / mean
}

fn main() {
    println!("Lloyd Relaxation Example");
    println!("========================\n");

    let bounds = Rect::new(0.0, 0.0, 500.0, 500.0);
    let sites = sample_sites(&bounds, 200, 7);

    let raw = Voronoi::build(&sites, bounds).expect("Failed to build diagram");
    println!(
        "Raw diagram: {} cells, relative area spread {:.3}",
        raw.cells().len(),
        area_spread(&raw)
    );

    for iterations in [1, 3, 6] {
        let relaxed =
            lloyd_relaxation(sites.clone(), bounds, iterations).expect("Relaxation failed");
        let diagram = Voronoi::build(&relaxed, bounds).expect("Failed to build diagram");
        println!(
            "After {} iteration(s): relative area spread {:.3}",
            iterations,
            area_spread(&diagram)
        );
    }

    println!("\nDone!");
}
