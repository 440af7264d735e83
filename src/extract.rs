//! Dominant colors of an image via seeded k-means over its pixels.

use std::collections::HashMap;
use std::path::Path;

use clap::ValueEnum;
use image::RgbImage;
use kmeans_colors::{Kmeans, get_kmeans};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::{channel_to_u8, to_hex};
use crate::error::{PaletteError, Result};
use crate::{DEFAULT_COLOR_COUNT, DEFAULT_MAX_DIMENSION, DEFAULT_RUNS, DEFAULT_SEED, MAX_COLORS};
use crate::source;

/// Order of the colors in the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorOrder {
    /// Cluster index order, as the clustering produced them.
    #[default]
    Cluster,
    /// Most assigned pixels first.
    Frequency,
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub n_colors: usize,
    pub max_dimension: u32,
    pub seed: u64,
    pub runs: usize,
    pub max_iterations: usize,
    pub convergence: f32,
    pub order: ColorOrder,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            n_colors: DEFAULT_COLOR_COUNT,
            max_dimension: DEFAULT_MAX_DIMENSION,
            seed: DEFAULT_SEED,
            runs: DEFAULT_RUNS,
            max_iterations: 100,
            convergence: 1e-5,
            order: ColorOrder::Cluster,
        }
    }
}

impl ExtractionConfig {
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct ExtractionConfigBuilder {
    n_colors: Option<usize>,
    max_dimension: Option<u32>,
    seed: Option<u64>,
    runs: Option<usize>,
    max_iterations: Option<usize>,
    convergence: Option<f32>,
    order: Option<ColorOrder>,
}

impl ExtractionConfigBuilder {
    pub fn n_colors(mut self, n_colors: usize) -> Self {
        self.n_colors = Some(n_colors);
        self
    }

    pub fn max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = Some(max_dimension);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn runs(mut self, runs: usize) -> Self {
        self.runs = Some(runs);
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn convergence(mut self, convergence: f32) -> Self {
        self.convergence = Some(convergence);
        self
    }

    pub fn order(mut self, order: ColorOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn build(self) -> ExtractionConfig {
        let default = ExtractionConfig::default();
        ExtractionConfig {
            n_colors: self.n_colors.unwrap_or(default.n_colors),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension).max(1),
            seed: self.seed.unwrap_or(default.seed),
            runs: self.runs.unwrap_or(default.runs).max(1),
            max_iterations: self.max_iterations.unwrap_or(default.max_iterations),
            convergence: self.convergence.unwrap_or(default.convergence),
            order: self.order.unwrap_or(default.order),
        }
    }
}

/// A representative color and how many (downscaled) pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantColor {
    pub rgb: Srgb<u8>,
    pub pixel_count: usize,
}

impl DominantColor {
    pub fn hex(&self) -> String {
        to_hex(self.rgb)
    }
}

/// The `{"dominant_colors": [...]}` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReport {
    pub dominant_colors: Vec<String>,
}

impl ColorReport {
    pub fn from_colors(colors: &[DominantColor]) -> Self {
        Self {
            dominant_colors: colors.iter().map(DominantColor::hex).collect(),
        }
    }
}

pub struct ColorClusterExtractor {
    config: ExtractionConfig,
}

impl ColorClusterExtractor {
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        if config.n_colors == 0 || config.n_colors > MAX_COLORS {
            return Err(PaletteError::InvalidColorCount(config.n_colors));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Checks the decoder and the input path, then decodes and clusters.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<DominantColor>> {
        source::check_decoder(path)?;
        source::ensure_exists(path)?;
        let img = source::load_rgb(path)?;
        Ok(self.extract_image(img))
    }

    /// Always returns exactly `n_colors` entries.
    pub fn extract_image(&self, img: RgbImage) -> Vec<DominantColor> {
        let img = source::downscale(img, self.config.max_dimension);
        let (w, h) = img.dimensions();
        info!("Clustering {}x{} pixels into {} colors", w, h, self.config.n_colors);

        let mut histogram: HashMap<[u8; 3], usize> = HashMap::new();
        for pixel in img.pixels() {
            *histogram.entry(pixel.0).or_insert(0) += 1;
        }

        // k-means++ seeding needs more distinct points than clusters.
        let mut colors = if histogram.len() <= self.config.n_colors {
            debug!(
                "Only {} distinct colors, skipping k-means",
                histogram.len()
            );
            self.distinct_colors(histogram)
        } else {
            self.cluster_colors(&img)
        };

        if self.config.order == ColorOrder::Frequency {
            colors.sort_by(|a, b| b.pixel_count.cmp(&a.pixel_count));
        }
        colors
    }

    fn cluster_colors(&self, img: &RgbImage) -> Vec<DominantColor> {
        let pixels: Vec<Srgb> = img
            .pixels()
            .map(|p| Srgb::new(p[0], p[1], p[2]).into_format())
            .collect();

        let (best, best_inertia) = self.best_run(&pixels);
        info!(
            "Best k-means inertia {:.6} over {} runs",
            best_inertia, self.config.runs
        );

        let mut counts = vec![0usize; best.centroids.len()];
        for &idx in &best.indices {
            counts[idx as usize] += 1;
        }

        best.centroids
            .iter()
            .zip(counts)
            .map(|(c, pixel_count)| DominantColor {
                rgb: Srgb::new(
                    channel_to_u8(c.red),
                    channel_to_u8(c.green),
                    channel_to_u8(c.blue),
                ),
                pixel_count,
            })
            .collect()
    }

    /// Runs k-means once per seed and keeps the run with the lowest inertia.
    fn best_run(&self, pixels: &[Srgb]) -> (Kmeans<Srgb>, f64) {
        let cfg = &self.config;
        let run = |seed: u64| {
            let result = get_kmeans(
                cfg.n_colors,
                cfg.max_iterations,
                cfg.convergence,
                false,
                pixels,
                seed,
            );
            let run_inertia = inertia(pixels, &result.centroids, &result.indices);
            debug!("k-means seed {} inertia {:.6}", seed, run_inertia);
            (result, run_inertia)
        };

        let mut best = run(cfg.seed);
        for i in 1..cfg.runs {
            let candidate = run(cfg.seed.wrapping_add(i as u64));
            if candidate.1 < best.1 {
                best = candidate;
            }
        }
        best
    }

    /// Every distinct color, most frequent first, cycled until there are `n_colors`.
    fn distinct_colors(&self, histogram: HashMap<[u8; 3], usize>) -> Vec<DominantColor> {
        let mut distinct: Vec<([u8; 3], usize)> = histogram.into_iter().collect();
        distinct.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut colors: Vec<DominantColor> = distinct
            .iter()
            .map(|&([r, g, b], pixel_count)| DominantColor {
                rgb: Srgb::new(r, g, b),
                pixel_count,
            })
            .collect();

        let padding: Vec<DominantColor> = colors
            .iter()
            .cycle()
            .take(self.config.n_colors - colors.len())
            .map(|c| DominantColor {
                pixel_count: 0,
                ..*c
            })
            .collect();
        colors.extend(padding);
        colors
    }
}

/// Sum of squared distances from each pixel to its assigned centroid.
fn inertia(pixels: &[Srgb], centroids: &[Srgb], indices: &[u8]) -> f64 {
    pixels
        .iter()
        .zip(indices)
        .map(|(p, &idx)| {
            let c = centroids[idx as usize];
            let (dr, dg, db) = (p.red - c.red, p.green - c.green, p.blue - c.blue);
            f64::from(dr * dr + dg * dg + db * db)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn extractor(n_colors: usize) -> ColorClusterExtractor {
        ColorClusterExtractor::new(ExtractionConfig::builder().n_colors(n_colors).build()).unwrap()
    }

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| {
            Rgb([(x * 6) as u8, (y * 8) as u8, ((x + y) * 3) as u8])
        })
    }

    fn hexes(colors: &[DominantColor]) -> Vec<String> {
        ColorReport::from_colors(colors).dominant_colors
    }

    #[test]
    fn test_config_builder() {
        let config = ExtractionConfig::builder()
            .n_colors(12)
            .max_dimension(0)
            .seed(7)
            .runs(0)
            .order(ColorOrder::Frequency)
            .build();

        assert_eq!(config.n_colors, 12);
        assert_eq!(config.max_dimension, 1);
        assert_eq!(config.seed, 7);
        assert_eq!(config.runs, 1);
        assert_eq!(config.order, ColorOrder::Frequency);
    }

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.n_colors, 30);
        assert_eq!(config.max_dimension, 500);
        assert_eq!(config.seed, 42);
        assert_eq!(config.runs, 10);
        assert_eq!(config.order, ColorOrder::Cluster);
    }

    #[test]
    fn test_rejects_bad_color_count() {
        for n in [0, MAX_COLORS + 1] {
            let config = ExtractionConfig::builder().n_colors(n).build();
            assert!(matches!(
                ColorClusterExtractor::new(config),
                Err(PaletteError::InvalidColorCount(got)) if got == n
            ));
        }
    }

    #[test]
    fn test_all_black_degenerates() {
        let img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let colors = extractor(2).extract_image(img);
        assert_eq!(hexes(&colors), vec!["#000000", "#000000"]);
        assert_eq!(colors[0].pixel_count, 100);
        assert_eq!(colors[1].pixel_count, 0);
    }

    #[test]
    fn test_few_distinct_colors_are_exact() {
        let img = RgbImage::from_fn(10, 10, |x, _| {
            if x < 7 { Rgb([200, 10, 10]) } else { Rgb([10, 200, 10]) }
        });
        let colors = extractor(3).extract_image(img);
        assert_eq!(hexes(&colors), vec!["#C80A0A", "#0AC80A", "#C80A0A"]);
    }

    #[test]
    fn test_output_length_matches_n() {
        for n in [1, 4, 7] {
            let colors = extractor(n).extract_image(gradient(40, 30));
            assert_eq!(colors.len(), n);
            assert!(hexes(&colors).iter().all(|h| h.len() == 7 && h.starts_with('#')));
        }
    }

    #[test]
    fn test_pixel_counts_cover_image() {
        let colors = extractor(5).extract_image(gradient(40, 30));
        let total: usize = colors.iter().map(|c| c.pixel_count).sum();
        assert_eq!(total, 40 * 30);
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let config = ExtractionConfig::builder().n_colors(4).runs(3).build();
        let extractor = ColorClusterExtractor::new(config).unwrap();

        let first = extractor.extract_image(gradient(40, 30));
        let second = extractor.extract_image(gradient(40, 30));
        assert_eq!(hexes(&first), hexes(&second));
    }

    #[test]
    fn test_frequency_order() {
        let img = RgbImage::from_fn(10, 10, |x, y| match (x, y) {
            (0..=2, _) => Rgb([255, 255, 255]),
            (_, 0..=4) => Rgb([0, 0, 0]),
            _ => Rgb([2, 2, 2]),
        });
        let config = ExtractionConfig::builder()
            .n_colors(2)
            .order(ColorOrder::Frequency)
            .build();
        let colors = ColorClusterExtractor::new(config).unwrap().extract_image(img);

        assert_eq!(colors[0].pixel_count, 70);
        assert_eq!(colors[1].pixel_count, 30);
        assert!(colors[0].hex().starts_with("#0"));
        assert_eq!(colors[1].hex(), "#FFFFFF");
    }

    #[test]
    fn test_large_image_is_downscaled_first() {
        let config = ExtractionConfig::builder().n_colors(1).max_dimension(50).build();
        let extractor = ColorClusterExtractor::new(config).unwrap();
        let colors = extractor.extract_image(RgbImage::from_pixel(600, 400, Rgb([9, 9, 9])));

        assert_eq!(colors[0].pixel_count, 50 * 33);
        assert_eq!(colors[0].hex(), "#090909");
    }

    #[test]
    fn test_best_run_has_lowest_inertia() {
        let img = RgbImage::from_fn(60, 40, |x, y| {
            Rgb([(x * 4) as u8, (y * 6) as u8, ((x * y) % 256) as u8])
        });
        let pixels: Vec<Srgb> = img
            .pixels()
            .map(|p| Srgb::new(p[0], p[1], p[2]).into_format())
            .collect();

        let config = ExtractionConfig::builder().n_colors(12).runs(6).build();
        let extractor = ColorClusterExtractor::new(config.clone()).unwrap();
        let (best, best_inertia) = extractor.best_run(&pixels);

        assert_eq!(best_inertia, inertia(&pixels, &best.centroids, &best.indices));
        for i in 0..config.runs {
            let run = get_kmeans(
                config.n_colors,
                config.max_iterations,
                config.convergence,
                false,
                &pixels,
                config.seed + i as u64,
            );
            let run_inertia = inertia(&pixels, &run.centroids, &run.indices);
            assert!(best_inertia <= run_inertia, "seed {} beat the chosen run", config.seed + i as u64);
        }
    }

    #[test]
    fn test_inertia_of_exact_centroids_is_zero() {
        let pixels = [Srgb::new(0.0, 0.0, 0.0), Srgb::new(1.0, 1.0, 1.0)];
        assert_eq!(inertia(&pixels, &pixels, &[0, 1]), 0.0);
        assert!((inertia(&pixels, &pixels[..1], &[0, 0]) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.jpg");
        assert!(matches!(
            extractor(2).extract_file(&missing),
            Err(PaletteError::MissingInputFile(p)) if p == missing
        ));
    }

    #[test]
    fn test_extract_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("black.png");
        RgbImage::from_pixel(10, 10, Rgb([0, 0, 0])).save(&input).unwrap();

        let colors = extractor(2).extract_file(&input).unwrap();
        assert_eq!(hexes(&colors), vec!["#000000", "#000000"]);
    }
}
