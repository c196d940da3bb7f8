//! The fixed visual theme of generated decks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    /// Six upper-case hex digits, as OOXML `srgbClr` expects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Title, body and accent colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub title: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
}

/// The blue scheme every deck uses.
pub const BLUE: ColorScheme = ColorScheme {
    title: Rgb(0, 112, 192),
    text: Rgb(0, 0, 0),
    accent: Rgb(79, 129, 189),
};

// Font sizes per role, in points.
pub const TITLE_PT: u32 = 32;
pub const SUBTITLE_PT: u32 = 24;
pub const BULLET_PT: u32 = 20;
pub const SECTION_PT: u32 = 28;
pub const PARAGRAPH_PT: u32 = 20;
pub const CONCLUSION_PT: u32 = 22;
pub const TAKEAWAY_PT: u32 = 24;

/// Space before every content paragraph after the first.
pub const PARAGRAPH_SPACING_PT: u32 = 12;

/// Space before the blank line that precedes the key takeaway.
pub const TAKEAWAY_SPACER_PT: u32 = 20;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// 4:3 slide, 10in x 7.5in.
pub const SLIDE_WIDTH: i64 = 10 * EMU_PER_INCH;
pub const SLIDE_HEIGHT: i64 = 7 * EMU_PER_INCH + EMU_PER_INCH / 2;
