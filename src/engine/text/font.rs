//! Font capability consumed by the text engine.
//!
//! The engine never parses font files. It asks a [`Font`] for per-codepoint
//! glyphs and metrics, and a [`FontProvider`] for variants requested by
//! markup (another family, size, weight...).

use std::fmt;
use std::rc::Rc;

/// A rasterized glyph owned by the font's cache.
///
/// `advance` is stored in 1/64 pixel units so kerning can be applied before
/// rounding. `coverage` is an 8-bit alpha mask of `black_box_x * black_box_y`.
#[derive(Clone, PartialEq, Eq)]
pub struct Glyph {
    pub id: u32,
    /// black box width
    pub black_box_x: u16,
    /// black box height
    pub black_box_y: u16,
    /// left bearing, pixels from pen to black box
    pub origin_x: i16,
    /// pixels from the baseline up to the black box top
    pub origin_y: i16,
    /// horizontal advance in 1/64 pixels
    pub advance: i32,
    pub coverage: Vec<u8>,
}

impl Glyph {
    /// Advance rounded to whole pixels.
    pub fn advance_px(&self) -> i32 {
        (self.advance + 32) >> 6
    }
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glyph")
            .field("id", &self.id)
            .field("black_box", &(self.black_box_x, self.black_box_y))
            .field("origin", &(self.origin_x, self.origin_y))
            .field("advance", &self.advance)
            .finish()
    }
}

/// Shared, immutable handle to a glyph.
pub type GlyphRef = Rc<Glyph>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: Self = Self(100);
    pub const NORMAL: Self = Self(400);
    pub const BOLD: Self = Self(700);
    pub const BLACK: Self = Self(900);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Generic font family, used when no specific face is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Fantasy,
}

/// Everything needed to look a font up again with one attribute changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontDescription {
    /// Specific face name (None = pick by family)
    pub face: Option<String>,
    pub family: FontFamily,
    /// Size in pixels
    pub size_px: i32,
    pub style: FontStyle,
    pub weight: FontWeight,
}

impl Default for FontDescription {
    fn default() -> Self {
        Self {
            face: None,
            family: FontFamily::default(),
            size_px: 14,
            style: FontStyle::default(),
            weight: FontWeight::default(),
        }
    }
}

/// Glyph and metrics source for one face at one size.
pub trait Font {
    fn description(&self) -> &FontDescription;

    /// Line height in pixels.
    fn height(&self) -> i32;

    /// Distance from the line top to the baseline.
    fn baseline(&self) -> i32;

    /// Advance of U+0020, in pixels.
    fn space_width(&self) -> i32;

    fn is_fixed_pitch(&self) -> bool;

    /// `None` if the font has nothing to draw for `ch`.
    fn glyph(&self, ch: char) -> Option<GlyphRef>;

    fn has_kerning(&self) -> bool {
        false
    }

    /// Pair adjustment in 1/64 pixels.
    fn kerning(&self, _prev: char, _cur: char) -> i32 {
        0
    }
}

pub type FontRef = Rc<dyn Font>;

impl fmt::Debug for dyn Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Font({:?})", self.description())
    }
}

/// Resolves font variants requested by markup.
pub trait FontProvider {
    fn font(&self, desc: &FontDescription) -> Option<FontRef>;
}

pub type FontProviderRef = Rc<dyn FontProvider>;

/// Fonts compare by identity; two handles to the same face are equal.
pub(crate) fn same_font(a: &FontRef, b: &FontRef) -> bool {
    Rc::ptr_eq(a, b)
}
