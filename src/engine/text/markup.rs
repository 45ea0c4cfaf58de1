//! Inline markup: attribute spans over a line and their resolution into
//! uniformly styled fragments.
//!
//! # Data Flow
//!
//! ```text
//! LineMarkup (sorted, nested units) + base style
//!     -> resolve()  -> (start, end, style) fragments, left to right
//! ```
//!
//! Units form a tree of ranges. The innermost unit wins for the one field it
//! sets; everything else falls through from the enclosing units. Styles are
//! passed down by value, so siblings always start from the same ancestor.

use super::font::{FontDescription, FontFamily, FontStyle, FontWeight};
use super::style::{TextDecoration, TextLayoutStyle, TextStyle, TextTransform};
use crate::engine::types::Color;

/// One attribute, closed set.
#[derive(Debug, Clone, PartialEq)]
pub enum TextAttr {
    Foreground(Color),
    Background(Color),
    FontFace(String),
    FontFamily(FontFamily),
    FontSize(i32),
    FontStyle(FontStyle),
    FontWeight(FontWeight),
    TabSize(u8),
    Decoration(TextDecoration),
    Transform(TextTransform),
}

impl TextAttr {
    /// Whether the attribute changes glyph metrics.
    pub fn affects_layout(&self) -> bool {
        matches!(
            self,
            TextAttr::FontFace(_)
                | TextAttr::FontFamily(_)
                | TextAttr::FontSize(_)
                | TextAttr::FontStyle(_)
                | TextAttr::FontWeight(_)
                | TextAttr::TabSize(_)
                | TextAttr::Transform(_)
        )
    }
}

/// An attribute over `[start, start + count)`, offsets in codepoints.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupUnit {
    pub start: usize,
    pub count: usize,
    pub attribute: TextAttr,
}

impl MarkupUnit {
    pub fn new(start: usize, count: usize, attribute: TextAttr) -> Self {
        Self {
            start,
            count,
            attribute,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.count
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineMarkup {
    units: Vec<MarkupUnit>,
    prepared: bool,
}

impl LineMarkup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units(units: Vec<MarkupUnit>) -> Self {
        let mut m = Self {
            units,
            prepared: false,
        };
        m.prepare();
        m
    }

    pub fn set(&mut self, start: usize, count: usize, attribute: TextAttr) {
        if count == 0 {
            return;
        }
        self.units.push(MarkupUnit::new(start, count, attribute));
        self.prepared = false;
    }

    pub fn clear(&mut self) {
        self.units.clear();
        self.prepared = true;
    }

    /// Sorts units by start; at equal starts the longer (enclosing) unit comes
    /// first. Insertion order is kept for identical ranges.
    pub fn prepare(&mut self) {
        if self.prepared {
            return;
        }
        self.units.retain(|u| u.count > 0);
        self.units
            .sort_by(|a, b| a.start.cmp(&b.start).then(b.count.cmp(&a.count)));
        self.prepared = true;
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn units(&self) -> &[MarkupUnit] {
        debug_assert!(self.prepared, "LineMarkup used before prepare()");
        &self.units
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn affects_layout(&self) -> bool {
        self.units.iter().any(|u| u.attribute.affects_layout())
    }
}

/// A style markup attributes can be applied to.
pub trait ApplyAttr: Clone {
    fn apply_attr(&mut self, attr: &TextAttr);
}

/// Looks up `font` with `edit` applied to its description.
macro_rules! refont {
    ($style:expr, |$d:ident| $edit:expr) => {{
        let mut $d: FontDescription = $style.font.description().clone();
        $edit;
        if let Some(fonts) = &$style.fonts {
            match fonts.font(&$d) {
                Some(f) => $style.font = f,
                None => log::debug!(target: "Markup", "no font for {:?}, keeping {:?}", $d, $style.font.description()),
            }
        }
    }};
}

impl ApplyAttr for TextLayoutStyle {
    fn apply_attr(&mut self, attr: &TextAttr) {
        match attr {
            TextAttr::FontFace(face) => refont!(self, |d| d.face = Some(face.clone())),
            TextAttr::FontFamily(family) => refont!(self, |d| {
                d.family = *family;
                d.face = None
            }),
            TextAttr::FontSize(size) => refont!(self, |d| d.size_px = (*size).max(1)),
            TextAttr::FontStyle(style) => refont!(self, |d| d.style = *style),
            TextAttr::FontWeight(weight) => refont!(self, |d| d.weight = *weight),
            TextAttr::TabSize(n) => self.tab_size = *n,
            TextAttr::Transform(t) => self.transform = *t,
            TextAttr::Foreground(_) | TextAttr::Background(_) | TextAttr::Decoration(_) => {}
        }
    }
}

impl ApplyAttr for TextStyle {
    fn apply_attr(&mut self, attr: &TextAttr) {
        match attr {
            TextAttr::Foreground(c) => self.color = *c,
            TextAttr::Background(c) => self.background = *c,
            TextAttr::Decoration(d) => self.decoration = *d,
            TextAttr::FontFace(face) => refont!(self, |d| d.face = Some(face.clone())),
            TextAttr::FontFamily(family) => refont!(self, |d| {
                d.family = *family;
                d.face = None
            }),
            TextAttr::FontSize(size) => refont!(self, |d| d.size_px = (*size).max(1)),
            TextAttr::FontStyle(style) => refont!(self, |d| d.style = *style),
            TextAttr::FontWeight(weight) => refont!(self, |d| d.weight = *weight),
            TextAttr::TabSize(n) => self.tab_size = *n,
            TextAttr::Transform(t) => self.transform = *t,
        }
    }
}

/// Partitions `[start, end)` into maximal uniformly styled fragments and
/// calls `f(start, end, style)` for each, left to right.
///
/// `units` must be prepared (sorted by start).
pub fn resolve<S, F>(units: &[MarkupUnit], start: usize, end: usize, style: &S, f: &mut F)
where
    S: ApplyAttr,
    F: FnMut(usize, usize, &S),
{
    if start >= end {
        return;
    }
    let mut pos = start;
    for (i, unit) in units.iter().enumerate() {
        if unit.start >= end {
            break;
        }
        let unit_end = unit.end();
        if unit_end <= pos {
            continue;
        }
        let s = unit.start.max(pos);
        let e = unit_end.min(end);
        if s > pos {
            f(pos, s, style);
        }
        let mut inner = style.clone();
        inner.apply_attr(&unit.attribute);
        // later units that start inside this one are its children
        resolve(&units[i + 1..], s, e, &inner, f);
        pos = e;
        if pos >= end {
            return;
        }
    }
    if pos < end {
        f(pos, end, style);
    }
}
