//! Line wrapper: splits a measured line into rows no wider than a box.

use super::measure::FragmentGlyph;

/// One physical row of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineSpan {
    /// First codepoint
    pub start: usize,
    /// One past the last codepoint
    pub end: usize,
    /// Drawn width, trailing whitespace excluded
    pub width: i32,
    pub height: i32,
    /// Horizontal alignment offset, set when drawing
    pub offset: i32,
}

impl LineSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

fn is_break_space(ch: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '\u{3000}'
}

fn span_height(glyphs: &[FragmentGlyph], default_height: i32) -> i32 {
    glyphs
        .iter()
        .map(|g| g.height)
        .max()
        .unwrap_or(default_height)
}

/// Greedy wrap of `glyphs` (measured from `chars`) into `box_width`.
///
/// Returns an empty vector when the whole line fits, or when `box_width`
/// is not positive; callers treat that as the single implicit span.
/// Otherwise spans partition `[0, len)` in order.
pub fn wrap_line(
    chars: &[char],
    glyphs: &[FragmentGlyph],
    box_width: i32,
    default_height: i32,
) -> Vec<LineSpan> {
    debug_assert_eq!(chars.len(), glyphs.len());
    let len = glyphs.len();
    if box_width <= 0 || len == 0 {
        return Vec::new();
    }
    let total: i32 = glyphs.iter().map(|g| g.width).sum();
    if total <= box_width {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut x = 0i32;
    // pen x where the current word ended, valid while inside whitespace
    let mut word_end_x = 0i32;
    let mut in_space = false;
    // (break index after a whitespace run, width before that run)
    let mut candidate: Option<(usize, i32)> = None;

    let mut i = 0usize;
    while i < len {
        let w = glyphs[i].width;
        if is_break_space(chars[i]) {
            if !in_space {
                word_end_x = x;
                in_space = true;
            }
            candidate = Some((i + 1, word_end_x));
            x += w;
            i += 1;
            continue;
        }
        in_space = false;

        if x + w > box_width && i > start {
            let (end, width) = match candidate {
                Some((brk, wx)) if brk > start && wx >= box_width / 3 => (brk, wx),
                _ => (i, x),
            };
            spans.push(LineSpan {
                start,
                end,
                width,
                height: span_height(&glyphs[start..end], default_height),
                offset: 0,
            });
            start = end;
            x = 0;
            candidate = None;
            i = start;
            continue;
        }

        x += w;
        i += 1;
    }

    let width = if in_space { word_end_x } else { x };
    spans.push(LineSpan {
        start,
        end: len,
        width,
        height: span_height(&glyphs[start..len], default_height),
        offset: 0,
    });
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(s: &str, w: i32, space: i32) -> (Vec<char>, Vec<FragmentGlyph>) {
        let chars: Vec<char> = s.chars().collect();
        let g = chars
            .iter()
            .map(|&c| FragmentGlyph {
                glyph: None,
                width: if c == ' ' { space } else { w },
                height: 12,
                baseline: 10,
            })
            .collect();
        (chars, g)
    }

    fn text(chars: &[char], s: &LineSpan) -> String {
        chars[s.start..s.end].iter().collect()
    }

    #[test]
    fn breaks_after_last_fitting_word() {
        let (chars, g) = glyphs("hello world foo", 10, 10);
        let spans = wrap_line(&chars, &g, 120, 12);
        assert_eq!(spans.len(), 2);
        assert_eq!(text(&chars, &spans[0]), "hello world ");
        assert_eq!(spans[0].width, 110);
        assert_eq!(text(&chars, &spans[1]), "foo");
        assert_eq!(spans[1].width, 30);
    }

    #[test]
    fn fitting_line_has_no_spans() {
        let (chars, g) = glyphs("hello", 10, 10);
        assert!(wrap_line(&chars, &g, 50, 12).is_empty());
        assert!(wrap_line(&chars, &g, 0, 12).is_empty());
        assert!(wrap_line(&chars, &g, -5, 12).is_empty());
    }

    #[test]
    fn long_word_is_hard_broken() {
        let (chars, g) = glyphs("abcdefghij", 10, 10);
        let spans = wrap_line(&chars, &g, 35, 12);
        let parts: Vec<String> = spans.iter().map(|s| text(&chars, s)).collect();
        assert_eq!(parts, vec!["abc", "def", "ghi", "j"]);
    }

    #[test]
    fn tiny_first_word_falls_back_to_hard_break() {
        // "a" ends at 10 < 90/3, so the break goes mid-word
        let (chars, g) = glyphs("a bcdefghijkl", 10, 10);
        let spans = wrap_line(&chars, &g, 90, 12);
        assert_eq!(text(&chars, &spans[0]), "a bcdefgh");
        assert_eq!(spans[0].end, spans[1].start);
    }

    #[test]
    fn glyph_wider_than_box_still_progresses() {
        let (chars, g) = glyphs("abc", 50, 10);
        let spans = wrap_line(&chars, &g, 20, 12);
        assert_eq!(spans.len(), 3);
        assert!(spans.iter().all(|s| s.len() == 1));
    }
}
