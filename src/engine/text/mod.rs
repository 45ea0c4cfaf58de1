//! Text layout and rendering.
//!
//! # Data Flow
//!
//! ```text
//! chars + TextLayoutStyle
//!     -> measure   per-codepoint FragmentGlyph (tabs, kerning, hotkeys)
//!     -> wrap      LineSpan rows for a box width
//!     -> draw      markup fragments -> alignment / elision / decorations
//!                  -> DrawBuf
//! ```

pub mod cache;
pub mod fallback;
pub mod font;
pub mod line;
pub mod markup;
pub mod measure;
pub mod render;
pub mod simple;
pub mod style;
pub mod wrap;

pub use cache::{TextCache, TextCacheConfig};
pub use fallback::{FallbackFont, FallbackFontProvider};
pub use font::{
    Font, FontDescription, FontFamily, FontProvider, FontProviderRef, FontRef, FontStyle,
    FontWeight, Glyph, GlyphRef,
};
pub use line::TextLine;
pub use markup::{LineMarkup, MarkupUnit, TextAttr};
pub use measure::FragmentGlyph;
pub use simple::SimpleText;
pub use style::{
    DecorLine, DecorStyle, TextAlign, TextDecoration, TextHotkey, TextLayoutStyle, TextOverflow,
    TextStyle, TextTransform,
};
pub use wrap::LineSpan;
