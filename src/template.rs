//! Placeholder skeleton for hand-picking the flavor wheel colors.
//!
//! Every leaf is [`PLACEHOLDER`]; the structure is fixed and never derived
//! from the image, which is only opened to report its size.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{output, source};

/// Stands in for a color someone still has to pick by hand.
pub const PLACEHOLDER: &str = "#HEX_VALUE";

/// Declares a section of string slots whose `Default` is all placeholders.
macro_rules! placeholder_section {
    ($(#[$meta:meta])* $name:ident { $($(#[$field_meta:meta])* $field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $($(#[$field_meta])* pub $field: String,)+
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: PLACEHOLDER.to_string(),)+
                }
            }
        }
    };
}

placeholder_section!(Fruity { berry, citrus, stone_fruit, tropical, dried_fruit });
placeholder_section!(Sweet { chocolate, caramel, honey, vanilla });
placeholder_section!(Spicy { warm_spice, pungent, nut, roasted });
placeholder_section!(Earthy { soil, wood, tobacco, vegetal });
placeholder_section!(Body { light, medium, heavy });
placeholder_section!(
    /// The two-column adjective table, top to bottom.
    Adjectives {
        /// light blue
        row1_left,
        /// light gray
        row1_right,
        /// light purple
        row2_left,
        /// light green
        row2_right,
        /// dark purple
        row3_left,
        /// light pink
        row3_right,
        /// light orange
        row4_left,
        /// light brown
        row4_right,
        /// dark gray
        row5_left,
        /// light blue
        row5_right,
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorWheel {
    pub fruity: Fruity,
    pub floral: String,
    pub sweet: Sweet,
    pub spicy: Spicy,
    pub earthy: Earthy,
}

impl Default for FlavorWheel {
    fn default() -> Self {
        Self {
            fruity: Fruity::default(),
            floral: PLACEHOLDER.to_string(),
            sweet: Sweet::default(),
            spicy: Spicy::default(),
            earthy: Earthy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlavorWheelTemplate {
    pub flavor_wheel: FlavorWheel,
    pub body: Body,
    pub adjectives: Adjectives,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
}

pub const GUIDANCE: &str = "\
To extract accurate colors:
1. Open the image in an image editor (GIMP, Photoshop, etc.)
2. Use the color picker tool on each category
3. Record the HEX values

Alternatively, use an online tool like:
- https://imagecolorpicker.com/
- https://html-color-codes.info/colors-from-image/";

/// Decodes `path` (after the decoder and existence checks) and reports its size.
pub fn inspect(path: &Path) -> Result<ImageSummary> {
    source::check_decoder(path)?;
    source::ensure_exists(path)?;
    let img = source::load_rgb(path)?;
    Ok(ImageSummary {
        width: img.width(),
        height: img.height(),
    })
}

/// Inspects `path`, then writes the placeholder template to `output_path`.
pub fn scaffold(path: &Path, output_path: &Path) -> Result<ImageSummary> {
    let summary = inspect(path)?;
    output::write_json(output_path, &FlavorWheelTemplate::default())?;
    Ok(summary)
}
