use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{PaletteError, Result};

/// Writes `value` as 2-space indented JSON, replacing whatever is at `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let write_err = |source: std::io::Error| PaletteError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(write_err)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(write_err)?;

    info!("Wrote {}", path.display());
    Ok(())
}
