//! Fallback font.
//!
//! This implementation does not rely on any font engine.
//! Every printable character gets a box glyph with a fixed advance derived
//! from the pixel size. Intended for testing, bring-up, and environments
//! without system fonts.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::font::{Font, FontDescription, FontProvider, FontRef, Glyph, GlyphRef};

#[derive(Debug)]
pub struct FallbackFont {
    desc: FontDescription,
    char_width: i32,
    space_width: i32,
    fixed_pitch: bool,
    advances: HashMap<char, i32>,
    kerning: HashMap<(char, char), i32>,
    missing: Vec<char>,
    glyphs: RefCell<HashMap<char, GlyphRef>>,
}

impl FallbackFont {
    /// Heuristic metrics: advance = 0.6 * size.
    pub fn new(size_px: i32) -> Self {
        let size_px = size_px.max(1);
        let w = ((size_px * 3 + 2) / 5).max(1);
        Self::with_metrics(size_px, w, w)
    }

    pub fn with_metrics(size_px: i32, char_width: i32, space_width: i32) -> Self {
        Self {
            desc: FontDescription {
                size_px: size_px.max(1),
                ..FontDescription::default()
            },
            char_width,
            space_width,
            fixed_pitch: true,
            advances: HashMap::new(),
            kerning: HashMap::new(),
            missing: Vec::new(),
            glyphs: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_description(mut self, desc: FontDescription) -> Self {
        self.desc = desc;
        self
    }

    /// Overrides the advance of one character (makes the font proportional).
    pub fn with_advance(mut self, ch: char, width: i32) -> Self {
        self.advances.insert(ch, width);
        self.fixed_pitch = false;
        self
    }

    /// Pair kerning in 1/64 pixels.
    pub fn with_kerning(mut self, prev: char, cur: char, adjust: i32) -> Self {
        self.kerning.insert((prev, cur), adjust);
        self.fixed_pitch = false;
        self
    }

    /// Makes `glyph(ch)` return `None`.
    pub fn without_glyph(mut self, ch: char) -> Self {
        self.missing.push(ch);
        self
    }

    pub fn into_ref(self) -> FontRef {
        Rc::new(self)
    }

    fn advance_of(&self, ch: char) -> i32 {
        if ch == ' ' {
            return self.space_width;
        }
        self.advances.get(&ch).copied().unwrap_or(self.char_width)
    }

    fn make_glyph(&self, ch: char) -> Glyph {
        let advance = self.advance_of(ch);
        let size = self.desc.size_px;
        let bw = (advance - 2).max(if ch == ' ' { 0 } else { 1 });
        let bh = if ch == ' ' {
            0
        } else if ch.is_lowercase() {
            (size / 2).max(1)
        } else {
            (size * 3 / 4).max(1)
        };
        // hollow box so overlapping glyphs stay distinguishable
        let (bw_u, bh_u) = (bw as usize, bh as usize);
        let mut coverage = vec![0u8; bw_u * bh_u];
        for y in 0..bh_u {
            for x in 0..bw_u {
                if x == 0 || y == 0 || x + 1 == bw_u || y + 1 == bh_u {
                    coverage[y * bw_u + x] = 255;
                }
            }
        }
        Glyph {
            id: ch as u32,
            black_box_x: bw as u16,
            black_box_y: bh as u16,
            origin_x: 1,
            origin_y: bh as i16,
            advance: advance << 6,
            coverage,
        }
    }
}

impl Font for FallbackFont {
    fn description(&self) -> &FontDescription {
        &self.desc
    }

    fn height(&self) -> i32 {
        self.desc.size_px * 6 / 5
    }

    fn baseline(&self) -> i32 {
        self.desc.size_px
    }

    fn space_width(&self) -> i32 {
        self.space_width
    }

    fn is_fixed_pitch(&self) -> bool {
        self.fixed_pitch
    }

    fn glyph(&self, ch: char) -> Option<GlyphRef> {
        if ch.is_control() || self.missing.contains(&ch) {
            return None;
        }
        let mut cache = self.glyphs.borrow_mut();
        let g = cache
            .entry(ch)
            .or_insert_with(|| Rc::new(self.make_glyph(ch)));
        Some(g.clone())
    }

    fn has_kerning(&self) -> bool {
        !self.kerning.is_empty()
    }

    fn kerning(&self, prev: char, cur: char) -> i32 {
        self.kerning.get(&(prev, cur)).copied().unwrap_or(0)
    }
}

/// Hands out [`FallbackFont`]s for any description, one instance per description.
#[derive(Debug, Default)]
pub struct FallbackFontProvider {
    fonts: RefCell<HashMap<FontDescription, FontRef>>,
}

impl FallbackFontProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FontProvider for FallbackFontProvider {
    fn font(&self, desc: &FontDescription) -> Option<FontRef> {
        let mut fonts = self.fonts.borrow_mut();
        let f = fonts.entry(desc.clone()).or_insert_with(|| {
            FallbackFont::new(desc.size_px)
                .with_description(desc.clone())
                .into_ref()
        });
        Some(f.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_metrics_simple() {
        let font = FallbackFont::new(10);
        assert_eq!(font.space_width(), 6);
        assert_eq!(font.height(), 12);
        let g = font.glyph('a').expect("glyph");
        assert_eq!(g.advance_px(), 6);
        assert!(font.glyph('\u{1}').is_none());
    }

    #[test]
    fn glyphs_are_cached_by_identity() {
        let font = FallbackFont::new(10);
        let a = font.glyph('x').unwrap();
        let b = font.glyph('x').unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn provider_reuses_instances() {
        let p = FallbackFontProvider::new();
        let d = FontDescription {
            size_px: 20,
            ..Default::default()
        };
        let a = p.font(&d).unwrap();
        let b = p.font(&d).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.height(), 24);
    }
}
