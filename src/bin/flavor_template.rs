use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flavor_wheel_colors::{
    DEFAULT_IMAGE_PATH, DEFAULT_TEMPLATE_OUTPUT, logger,
    template::{self, GUIDANCE},
};

/// Write a placeholder JSON template for hand-picked flavor wheel colors.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Source image, only opened to report its size
    #[arg(long, default_value = DEFAULT_IMAGE_PATH)]
    image: PathBuf,

    /// Where to write the template (overwritten)
    #[arg(long, default_value = DEFAULT_TEMPLATE_OUTPUT)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init();

    let image = std::path::absolute(&args.image)
        .with_context(|| format!("resolving {}", args.image.display()))?;
    let output = std::path::absolute(&args.output)
        .with_context(|| format!("resolving {}", args.output.display()))?;

    let summary = template::scaffold(&image, &output)?;

    println!("Image size: {}x{}", summary.width, summary.height);
    println!("\n{GUIDANCE}");
    println!("\nColor template structure saved to: {}", output.display());
    println!("Please fill in the HEX values using a color picker tool.");

    Ok(())
}
