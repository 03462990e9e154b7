use crate::common::*;
use ab_glyph::FontVec;
use std::fs;

const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Loads the first usable font from the common system font locations.
pub fn load_system_font() -> Result<FontVec> {
    for path in FONT_PATHS {
        if let Ok(data) = fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(data) {
                return Ok(font);
            }
        }
    }
    bail!("no usable font found in {:?}", FONT_PATHS)
}
