//! Line measurer: codepoints + layout style -> per-glyph advances.

use super::font::GlyphRef;
use super::style::{TextHotkey, TextLayoutStyle, TextTransform};
use crate::engine::types::Size;

/// One measured glyph slot. A `None` glyph with a nonzero width is a tab
/// stop; with a zero width it is a filtered or missing character.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentGlyph {
    pub glyph: Option<GlyphRef>,
    pub width: i32,
    pub height: i32,
    pub baseline: i32,
}

/// Pen state carried between runs of one line, so that tab stops, kerning
/// and hotkey marks see the line as a whole even when markup splits it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PenState {
    /// Pen x from the line start
    pub x: i32,
    prev: Option<char>,
    after_mark: bool,
    in_word: bool,
}

impl PenState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Width of the gap from `x` to the next tab stop. Already-aligned pens
/// still advance a full stop.
pub fn tab_advance(x: i32, tab_size: u8, space_width: i32) -> i32 {
    let stop = tab_size.max(1) as i32 * space_width;
    if stop <= 0 {
        return 0;
    }
    stop - x.rem_euclid(stop)
}

pub(crate) fn transform_char(ch: char, transform: TextTransform, word_start: bool) -> char {
    // multi-char mappings keep the first char: one slot per codepoint
    match transform {
        TextTransform::None => ch,
        TextTransform::Uppercase => ch.to_uppercase().next().unwrap_or(ch),
        TextTransform::Lowercase => ch.to_lowercase().next().unwrap_or(ch),
        TextTransform::Capitalize if word_start => ch.to_uppercase().next().unwrap_or(ch),
        TextTransform::Capitalize => ch,
    }
}

/// Whether `chars[i]` is a hotkey mark under `hotkey`.
pub fn is_hotkey_mark(chars: &[char], i: usize, hotkey: TextHotkey) -> bool {
    if hotkey == TextHotkey::Ignore || chars.get(i) != Some(&'&') {
        return false;
    }
    // "&&" is an escaped ampersand: only the first one is a mark
    let mut run = 0;
    let mut j = i;
    while j > 0 && chars[j - 1] == '&' {
        run += 1;
        j -= 1;
    }
    run % 2 == 0
}

/// Index of the character carrying the hotkey underline, if any.
pub fn hotkey_index(chars: &[char], hotkey: TextHotkey) -> Option<usize> {
    if hotkey != TextHotkey::Underline {
        return None;
    }
    (0..chars.len())
        .find(|&i| {
            is_hotkey_mark(chars, i, hotkey) && chars.get(i + 1).is_some_and(|&c| c != '&')
        })
        .map(|i| i + 1)
}

/// Measures `chars` into `out` (same length), continuing from `pen`.
/// Returns the run's width and its tallest fragment.
pub fn measure_run(
    chars: &[char],
    style: &TextLayoutStyle,
    pen: &mut PenState,
    out: &mut [FragmentGlyph],
) -> Size {
    debug_assert_eq!(chars.len(), out.len());

    let font = &style.font;
    let height = font.height();
    let baseline = font.baseline();
    let kerning = font.has_kerning() && !font.is_fixed_pitch();
    let start_x = pen.x;
    let mut max_height = 0;

    for (ch, slot) in chars.iter().copied().zip(out.iter_mut()) {
        let mut fg = FragmentGlyph {
            glyph: None,
            width: 0,
            height,
            baseline,
        };

        if ch == '\t' {
            fg.width = tab_advance(pen.x, style.tab_size, font.space_width());
            pen.prev = None;
            pen.in_word = false;
            pen.after_mark = false;
        } else if ch == '&' && style.hotkey != TextHotkey::Ignore && !pen.after_mark {
            pen.after_mark = true;
        } else if ch.is_control() {
            pen.prev = None;
            pen.after_mark = false;
        } else {
            pen.after_mark = false;
            let word_start = !pen.in_word;
            pen.in_word = !ch.is_whitespace();
            let shown = transform_char(ch, style.transform, word_start);
            if let Some(glyph) = font.glyph(shown) {
                let mut advance = glyph.advance;
                if kerning && let Some(prev) = pen.prev {
                    advance += font.kerning(prev, shown);
                }
                fg.width = ((advance + 32) >> 6).max(0);
                fg.glyph = Some(glyph);
                pen.prev = Some(shown);
            } else {
                pen.prev = None;
            }
        }

        pen.x += fg.width;
        max_height = max_height.max(fg.height);
        *slot = fg;
    }

    Size::new(pen.x - start_x, max_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::text::fallback::FallbackFont;

    fn style(font: FallbackFont) -> TextLayoutStyle {
        TextLayoutStyle::new(font.into_ref())
    }

    fn measure(s: &str, st: &TextLayoutStyle) -> (Vec<FragmentGlyph>, Size) {
        let chars: Vec<char> = s.chars().collect();
        let mut out = vec![FragmentGlyph::default(); chars.len()];
        let mut pen = PenState::new();
        let size = measure_run(&chars, st, &mut pen, &mut out);
        (out, size)
    }

    fn widths(g: &[FragmentGlyph]) -> Vec<i32> {
        g.iter().map(|g| g.width).collect()
    }

    #[test]
    fn tab_reaches_next_stop() {
        let st = style(FallbackFont::with_metrics(10, 10, 10));
        let (g, size) = measure("a\tb", &st);
        assert_eq!(widths(&g), vec![10, 30, 10]);
        assert!(g[1].glyph.is_none());
        assert_eq!(size.width, 50);
    }

    #[test]
    fn aligned_tab_still_advances_full_stop() {
        let st = style(FallbackFont::with_metrics(10, 10, 10));
        let (g, _) = measure("abcd\tx", &st);
        assert_eq!(g[4].width, 40);
    }

    #[test]
    fn missing_glyph_is_zero_width_slot() {
        let st = style(FallbackFont::with_metrics(10, 10, 10).without_glyph('z'));
        let (g, size) = measure("azb", &st);
        assert_eq!(widths(&g), vec![10, 0, 10]);
        assert!(g[1].glyph.is_none());
        assert_eq!(size.width, 20);
    }

    #[test]
    fn control_chars_are_filtered() {
        let st = style(FallbackFont::with_metrics(10, 10, 10));
        let (g, _) = measure("a\u{7}b", &st);
        assert_eq!(widths(&g), vec![10, 0, 10]);
    }

    #[test]
    fn kerning_added_before_rounding() {
        // -5px between A and V
        let font = FallbackFont::with_metrics(10, 10, 10).with_kerning('A', 'V', -5 * 64);
        let st = style(font);
        let (g, _) = measure("AVA", &st);
        assert_eq!(widths(&g), vec![10, 5, 10]);
    }

    #[test]
    fn hotkey_marks_are_hidden() {
        let mut st = style(FallbackFont::with_metrics(10, 10, 10));
        st.hotkey = TextHotkey::Hidden;
        let (g, size) = measure("&File && x", &st);
        assert_eq!(g[0].width, 0);
        // escaped ampersand: first hidden, second drawn
        assert_eq!(g[6].width, 0);
        assert_eq!(g[7].width, 10);
        assert_eq!(size.width, 80);
    }

    #[test]
    fn hotkey_index_skips_escapes() {
        let chars: Vec<char> = "a&&b&cd".chars().collect();
        assert_eq!(hotkey_index(&chars, TextHotkey::Underline), Some(5));
        assert_eq!(hotkey_index(&chars, TextHotkey::Hidden), None);
    }

    #[test]
    fn uppercase_transform_changes_glyph() {
        let font = FallbackFont::with_metrics(10, 10, 10).with_advance('A', 14);
        let mut st = style(font);
        st.transform = TextTransform::Uppercase;
        let (g, _) = measure("aa", &st);
        assert_eq!(widths(&g), vec![14, 14]);
        st.transform = TextTransform::Capitalize;
        let (g, _) = measure("aa aa", &st);
        assert_eq!(widths(&g), vec![14, 10, 10, 14, 10]);
    }
}
