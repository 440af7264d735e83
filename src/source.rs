//! Getting a source image into memory as an 8-bit RGB bitmap.

use std::path::Path;

use image::{ImageFormat, RgbImage, imageops::FilterType};
use tracing::{debug, info};

use crate::error::{PaletteError, Result};

/// Fails with [`PaletteError::MissingDependency`] when the decoder for the
/// format implied by `path`'s extension was not compiled into `image`.
///
/// Paths without a recognizable extension pass; their format is sniffed from
/// the content at decode time.
pub fn check_decoder(path: &Path) -> Result<()> {
    let Ok(format) = ImageFormat::from_path(path) else {
        debug!("No known extension on {}, skipping decoder check", path.display());
        return Ok(());
    };

    check_format(format, format.reading_enabled())
}

fn check_format(format: ImageFormat, reading_enabled: bool) -> Result<()> {
    if reading_enabled {
        return Ok(());
    }

    Err(PaletteError::MissingDependency {
        format: format!("{format:?}"),
        feature: cargo_feature(format).to_string(),
    })
}

fn cargo_feature(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::Gif => "gif",
        ImageFormat::WebP => "webp",
        ImageFormat::Tiff => "tiff",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Ico => "ico",
        ImageFormat::Tga => "tga",
        ImageFormat::Dds => "dds",
        ImageFormat::Hdr => "hdr",
        ImageFormat::OpenExr => "exr",
        ImageFormat::Pnm => "pnm",
        ImageFormat::Farbfeld => "ff",
        ImageFormat::Avif => "avif-native",
        ImageFormat::Qoi => "qoi",
        _ => "default-formats",
    }
}

/// Fails with [`PaletteError::MissingInputFile`] unless `path` is an existing file.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(PaletteError::MissingInputFile(path.to_path_buf()))
    }
}

/// Decodes `path`, converting palette, grayscale, alpha and 16-bit sources to RGB8.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| PaletteError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    let rgb = img.into_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(PaletteError::EmptyImage);
    }
    Ok(rgb)
}

/// Target size for fitting `width`x`height` inside a `bound`x`bound` box.
///
/// Only ever shrinks. The longest side becomes `bound` and the other side is
/// scaled by the same ratio, rounded, and kept at least 1.
pub fn fit_within(width: u32, height: u32, bound: u32) -> (u32, u32) {
    let bound = bound.max(1);
    if width <= bound && height <= bound {
        return (width, height);
    }

    let ratio = bound as f64 / width.max(height) as f64;
    let scale = |side: u32| ((side as f64 * ratio).round() as u32).clamp(1, bound);
    (scale(width), scale(height))
}

/// Shrinks `img` so neither side exceeds `bound`, preserving aspect ratio.
pub fn downscale(img: RgbImage, bound: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    let (new_w, new_h) = fit_within(w, h, bound);
    if (new_w, new_h) == (w, h) {
        return img;
    }

    debug!("Resizing {}x{} -> {}x{}", w, h, new_w, new_h);
    image::imageops::resize(&img, new_w, new_h, FilterType::Triangle)
}
