//! Representative colors from a flavor wheel chart.
//!
//! Two independent tools share this crate:
//!
//! * [`ColorClusterExtractor`] downsamples an image, runs seeded k-means over
//!   its pixels and reports `{"dominant_colors": ["#RRGGBB", ...]}`.
//! * [`template::scaffold`] writes a fixed JSON skeleton of flavor categories
//!   whose values are all [`template::PLACEHOLDER`], to be filled in by hand.

pub mod color;
pub mod error;
pub mod extract;
pub mod logger;
pub mod output;
pub mod source;
pub mod template;

pub use color::{parse_hex, to_hex};
pub use error::{PaletteError, Result};
pub use extract::{
    ColorClusterExtractor, ColorOrder, ColorReport, DominantColor, ExtractionConfig,
    ExtractionConfigBuilder,
};
pub use template::{FlavorWheelTemplate, ImageSummary, PLACEHOLDER};

pub const DEFAULT_IMAGE_PATH: &str = "assets/coffee_flavor_wheel.jpg";
pub const DEFAULT_COLORS_OUTPUT: &str = "assets/extracted_colors.json";
pub const DEFAULT_TEMPLATE_OUTPUT: &str = "assets/flavor_wheel_colors_template.json";

pub const DEFAULT_COLOR_COUNT: usize = 30;
pub const DEFAULT_MAX_DIMENSION: u32 = 500;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_RUNS: usize = 10;

/// Cluster assignments are stored as `u8`.
pub const MAX_COLORS: usize = 256;
