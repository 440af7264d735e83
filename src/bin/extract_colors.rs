use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flavor_wheel_colors::{
    ColorClusterExtractor, ColorOrder, ColorReport, DEFAULT_COLOR_COUNT, DEFAULT_COLORS_OUTPUT,
    DEFAULT_IMAGE_PATH, DEFAULT_MAX_DIMENSION, DEFAULT_RUNS, DEFAULT_SEED, ExtractionConfig,
    logger, output,
};
use tracing::info;

/// Extract the dominant colors of the flavor wheel image with k-means.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Source image
    #[arg(long, default_value = DEFAULT_IMAGE_PATH)]
    image: PathBuf,

    /// Where to write the JSON report (overwritten)
    #[arg(long, default_value = DEFAULT_COLORS_OUTPUT)]
    output: PathBuf,

    /// Number of colors to find
    #[arg(short = 'k', long = "colors", default_value_t = DEFAULT_COLOR_COUNT)]
    n_colors: usize,

    /// Longest side of the image that gets clustered
    #[arg(long, default_value_t = DEFAULT_MAX_DIMENSION)]
    max_dimension: u32,

    /// Seed of the first k-means run; later runs use the following seeds
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of k-means runs, the lowest-score one wins
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    runs: usize,

    /// Order of the reported colors
    #[arg(long, value_enum, default_value_t = ColorOrder::Cluster)]
    order: ColorOrder,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init();

    let image = std::path::absolute(&args.image)
        .with_context(|| format!("resolving {}", args.image.display()))?;
    let output_path = std::path::absolute(&args.output)
        .with_context(|| format!("resolving {}", args.output.display()))?;

    let config = ExtractionConfig::builder()
        .n_colors(args.n_colors)
        .max_dimension(args.max_dimension)
        .seed(args.seed)
        .runs(args.runs)
        .order(args.order)
        .build();
    info!("{:?}", config);
    let extractor = ColorClusterExtractor::new(config)?;

    println!("Extracting dominant colors from flavor wheel image...");
    let colors = extractor.extract_file(&image)?;

    println!("\nFound {} dominant colors:", colors.len());
    for (i, color) in colors.iter().enumerate() {
        println!("{:2}. {}", i + 1, color.hex());
    }

    output::write_json(&output_path, &ColorReport::from_colors(&colors))?;

    println!("\nColors saved to: {}", output_path.display());
    println!("\nNote: These are dominant colors from the entire image.");
    println!("For accurate category-specific colors, use a color picker tool");
    println!("on the actual image to sample from each specific region.");

    Ok(())
}
