//! Canonical `#RRGGBB` text form of an RGB color.

use palette::Srgb;

use crate::error::{PaletteError, Result};

/// Formats a color as `#RRGGBB` with uppercase hex digits.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

/// Parses `#RRGGBB` (the `#` is optional, either case) back into a color.
pub fn parse_hex(s: &str) -> Result<Srgb<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PaletteError::InvalidHex(s.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| PaletteError::InvalidHex(s.to_string()))
    };
    Ok(Srgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Converts a normalized channel to 0..=255, truncating toward zero.
///
/// Centroids come back as `f32` means, so a cluster made of a single value can
/// land a hair under it (199.99998 for 200); that slack is absorbed first.
pub(crate) fn channel_to_u8(value: f32) -> u8 {
    (value * 255.0 + 1e-3).clamp(0.0, 255.0) as u8
}
