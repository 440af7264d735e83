use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Image not found at {}", .0.display())]
    MissingInputFile(PathBuf),

    #[error("Missing image decoder for {format}: rebuild with the `{feature}` feature of the image crate")]
    MissingDependency { format: String, feature: String },

    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Color count must be between 1 and {max}, got {0}", max = crate::MAX_COLORS)]
    InvalidColorCount(usize),

    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
