//! Debug tool for inspecting coastline extraction
//! Prints per-feature polyline stats and stage timings for one seed

use std::time::Instant;

use coastmap::coastline::{self, BoundaryKind};
use coastmap::params::MapParams;
use coastmap::seeds::MapSeeds;
use coastmap::{diagram, features, terrain};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1337);
    let params = MapParams { seed, ..MapParams::default() };
    let seeds = MapSeeds::from_master(seed);
    let (width, height) = (params.width as f64, params.height as f64);

    println!("=== Coastline Debug ===");
    println!("{}", seeds);
    println!("Map size: {}x{}", params.width, params.height);
    println!();

    let start = Instant::now();
    let built = diagram::build_voronoi(width, height, params.pds_max_distance, seeds.sites);
    let diagram = match built {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to build diagram: {}", e);
            return;
        }
    };
    println!(
        "Diagram: {} cells, {} edges in {:?}",
        diagram.sites.len(),
        diagram.edges.len(),
        start.elapsed()
    );

    let start = Instant::now();
    let elevation = terrain::generate_elevation(
        &diagram.sites,
        width,
        height,
        &params.elevation,
        seeds.elevation,
    );
    println!("Elevation: {:?}", start.elapsed());

    let start = Instant::now();
    let cells = features::classify_cells(&diagram, &elevation, params.sea_level);
    let summary = features::summarize(&cells);
    println!(
        "Features: {} oceans, {} lands, {} lakes in {:?}",
        summary.oceans, summary.lands, summary.lakes, start.elapsed()
    );

    let start = Instant::now();
    let segments = coastline::collect_boundary_segments(&diagram, &cells, params.sea_level);
    println!("Boundary segments: {} in {:?}", segments.len(), start.elapsed());

    let start = Instant::now();
    let polylines = coastline::stitch_coastlines(&segments);
    println!("Stitching: {} polylines in {:?}", polylines.len(), start.elapsed());
    println!();

    for kind in BoundaryKind::ALL {
        println!("{} features:", kind.display_name());
        for line in polylines.iter().filter(|p| p.kind == kind) {
            println!(
                "  #{:<4} {:>5} points  length {:>8.1}  {}",
                line.feature_number,
                line.points.len(),
                line.length(),
                if line.closed { "closed" } else { "OPEN" }
            );
        }
    }

    let stats = coastline::CoastlineStats::from_polylines(&polylines);
    println!();
    println!("Closed: {}  Open: {}  Points: {}", stats.closed, stats.open, stats.points);
}
