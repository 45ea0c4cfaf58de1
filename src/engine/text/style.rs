//! Text styles.
//!
//! [`TextLayoutStyle`] holds only what changes glyph metrics; [`TextStyle`]
//! adds the paint-time fields. Both are plain values: markup resolution
//! clones and overrides them, it never mutates a shared ancestor.

use std::fmt;

use bitflags::bitflags;

use super::font::{FontProviderRef, FontRef, same_font};
use crate::engine::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
    Justify,
}

bitflags! {
    /// Decoration lines, combinable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct DecorLine: u8 {
        const OVER = 0b001;
        const UNDER = 0b010;
        const THROUGH = 0b100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecorStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextDecoration {
    pub line: DecorLine,
    /// None = use the text color
    pub color: Option<Color>,
    pub style: DecorStyle,
}

impl TextDecoration {
    pub const fn new(line: DecorLine) -> Self {
        Self {
            line,
            color: None,
            style: DecorStyle::Solid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextOverflow {
    #[default]
    Clip,
    Ellipsis,
    EllipsisMiddle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTransform {
    #[default]
    None,
    Capitalize,
    Uppercase,
    Lowercase,
}

/// How `&` hotkey marks are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextHotkey {
    /// `&` is an ordinary character
    #[default]
    Ignore,
    /// marks take no space and are not drawn
    Hidden,
    /// like `Hidden`, and the marked character is underlined
    Underline,
}

pub const DEFAULT_TAB_SIZE: u8 = 4;

/// The subset of styling that affects measurement.
#[derive(Clone)]
pub struct TextLayoutStyle {
    pub font: FontRef,
    /// Needed to resolve font attributes in markup
    pub fonts: Option<FontProviderRef>,
    /// Tab stop in spaces
    pub tab_size: u8,
    pub transform: TextTransform,
    pub hotkey: TextHotkey,
}

impl TextLayoutStyle {
    pub fn new(font: FontRef) -> Self {
        Self {
            font,
            fonts: None,
            tab_size: DEFAULT_TAB_SIZE,
            transform: TextTransform::None,
            hotkey: TextHotkey::Ignore,
        }
    }
}

impl PartialEq for TextLayoutStyle {
    fn eq(&self, other: &Self) -> bool {
        same_font(&self.font, &other.font)
            && match (&self.fonts, &other.fonts) {
                (None, None) => true,
                (Some(a), Some(b)) => std::rc::Rc::ptr_eq(a, b),
                _ => false,
            }
            && self.tab_size == other.tab_size
            && self.transform == other.transform
            && self.hotkey == other.hotkey
    }
}

impl fmt::Debug for TextLayoutStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLayoutStyle")
            .field("font", self.font.description())
            .field("tab_size", &self.tab_size)
            .field("transform", &self.transform)
            .field("hotkey", &self.hotkey)
            .finish()
    }
}

/// Full paint style for a line.
#[derive(Clone)]
pub struct TextStyle {
    pub font: FontRef,
    pub fonts: Option<FontProviderRef>,
    pub tab_size: u8,
    pub transform: TextTransform,
    pub hotkey: TextHotkey,
    pub align: TextAlign,
    pub decoration: TextDecoration,
    pub overflow: TextOverflow,
    pub color: Color,
    pub background: Color,
    /// Mnemonic: underline only this codepoint
    pub underlined_char: Option<usize>,
    /// Wrap rows to the box width when drawing
    pub wrap: bool,
}

impl TextStyle {
    pub fn new(font: FontRef) -> Self {
        Self {
            font,
            fonts: None,
            tab_size: DEFAULT_TAB_SIZE,
            transform: TextTransform::None,
            hotkey: TextHotkey::Ignore,
            align: TextAlign::Start,
            decoration: TextDecoration::default(),
            overflow: TextOverflow::Clip,
            color: Color::BLACK,
            background: Color::TRANSPARENT,
            underlined_char: None,
            wrap: false,
        }
    }

    pub fn layout(&self) -> TextLayoutStyle {
        TextLayoutStyle {
            font: self.font.clone(),
            fonts: self.fonts.clone(),
            tab_size: self.tab_size,
            transform: self.transform,
            hotkey: self.hotkey,
        }
    }

    pub fn decoration_color(&self) -> Color {
        self.decoration.color.unwrap_or(self.color)
    }
}

impl From<&TextStyle> for TextLayoutStyle {
    fn from(s: &TextStyle) -> Self {
        s.layout()
    }
}

impl fmt::Debug for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStyle")
            .field("font", self.font.description())
            .field("tab_size", &self.tab_size)
            .field("transform", &self.transform)
            .field("hotkey", &self.hotkey)
            .field("align", &self.align)
            .field("decoration", &self.decoration)
            .field("overflow", &self.overflow)
            .field("color", &self.color)
            .field("background", &self.background)
            .field("underlined_char", &self.underlined_char)
            .field("wrap", &self.wrap)
            .finish()
    }
}
