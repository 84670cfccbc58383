use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use coastmap::params::MapParams;
use coastmap::world::MapWorld;

#[derive(Parser, Debug)]
#[command(name = "coastmap")]
#[command(about = "Generate procedural Voronoi maps with traced coastlines")]
struct Args {
    /// JSON parameter file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the map in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Height of the map in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Random seed (uses the configured seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pick a random seed
    #[arg(long, conflicts_with = "seed")]
    random_seed: bool,

    /// Elevation threshold between water and land (0..1)
    #[arg(long)]
    sea_level: Option<f32>,

    /// Output SVG path
    #[arg(short, long, default_value = "map.svg")]
    output: PathBuf,

    /// Also export a PNG raster to this path
    #[arg(long)]
    png: Option<PathBuf>,

    /// Skip coastline strokes
    #[arg(long)]
    no_coastline: bool,

    /// Draw the Delaunay triangulation
    #[arg(long)]
    triangles: bool,

    /// Write the effective parameters as JSON and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

fn build_params(args: &Args) -> Result<MapParams, Box<dyn Error>> {
    let mut params = match &args.config {
        Some(path) => MapParams::load(path)?,
        None => MapParams::default(),
    };

    if let Some(width) = args.width {
        params.width = width;
    }
    if let Some(height) = args.height {
        params.height = height;
    }
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    if args.random_seed {
        params.seed = rand::random();
    }
    if let Some(sea_level) = args.sea_level {
        params.sea_level = sea_level;
    }
    if args.no_coastline {
        params.render.draw_coastline = false;
    }
    if args.triangles {
        params.render.draw_triangles = true;
    }

    params.validate()?;
    Ok(params)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let params = build_params(&args)?;

    if let Some(path) = &args.dump_config {
        params.save(path)?;
        println!("Wrote parameters to {}", path.display());
        return Ok(());
    }

    println!("Generating map with seed: {}", params.seed);
    println!("Map size: {}x{}", params.width, params.height);

    println!("Building diagram, elevation and features...");
    let world = MapWorld::generate(&params)?;
    println!("Created {} cells", world.diagram.sites.len());

    let summary = world.feature_summary();
    println!(
        "Found {} oceans, {} lands, {} lakes",
        summary.oceans, summary.lands, summary.lakes
    );

    let stats = world.coastline_stats();
    println!(
        "Traced {} land coasts and {} lake shores ({} points)",
        stats.land_polylines, stats.lake_polylines, stats.points
    );
    if stats.open > 0 {
        println!("  {} coastlines did not close", stats.open);
    }

    world.write_svg(&args.output)?;
    println!("Saved SVG to {}", args.output.display());

    let png_path = args
        .png
        .clone()
        .or_else(|| params.export_png.then(|| args.output.with_extension("png")));
    if let Some(path) = png_path {
        world.export_png(&path)?;
        println!("Saved PNG to {}", path.display());
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
