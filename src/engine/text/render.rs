//! Line renderer: alignment, overflow elision, decoration geometry and glyph
//! placement into a [`DrawBuf`].

use super::font::{Font, GlyphRef};
use super::markup::{LineMarkup, resolve};
use super::measure::FragmentGlyph;
use super::style::{DecorLine, DecorStyle, TextAlign, TextOverflow, TextStyle};
use super::wrap::LineSpan;
use crate::engine::raster::DrawBuf;
use crate::engine::types::{Color, Rect};

/// Horizontal offset of a row of `line_width` inside `box_width`.
pub fn alignment_offset(align: TextAlign, line_width: i32, box_width: i32) -> i32 {
    match align {
        TextAlign::Center if line_width < box_width => (box_width - line_width) / 2,
        TextAlign::End => (box_width - line_width).max(0),
        TextAlign::Start | TextAlign::Justify | TextAlign::Center => 0,
    }
}

/* ==== ellipsis ==== */

/// The glyphs drawn in place of elided text: `…`, or three dots when the
/// font lacks it.
#[derive(Debug, Clone, Default)]
pub struct Ellipsis {
    glyphs: Vec<GlyphRef>,
    width: i32,
}

impl Ellipsis {
    pub fn for_font(font: &dyn Font) -> Self {
        if let Some(g) = font.glyph('\u{2026}')
            && g.advance_px() > 0
        {
            return Self {
                width: g.advance_px(),
                glyphs: vec![g],
            };
        }
        match font.glyph('.') {
            Some(g) => Self {
                width: g.advance_px() * 3,
                glyphs: vec![g.clone(), g.clone(), g],
            },
            None => Self::default(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    fn draw(&self, buf: &mut dyn DrawBuf, x: i32, row: &RowPaint, color: Color) {
        let mut pen = x;
        for g in &self.glyphs {
            buf.draw_glyph(
                pen + g.origin_x as i32,
                row.top + row.baseline - g.origin_y as i32,
                g,
                color,
            );
            pen += g.advance_px();
        }
    }
}

/// Which glyphs of an overflowing row survive, indices relative to the row.
///
/// Drawn: `[0, head_end)` at x 0, the ellipsis at `ellipsis_x`, and
/// `[tail_start, len)` starting at `tail_x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elision {
    pub head_end: usize,
    pub tail_start: usize,
    pub tail_x: i32,
    pub ellipsis_x: Option<i32>,
}

impl Elision {
    /// Keeps everything.
    pub fn none(len: usize) -> Self {
        Self {
            head_end: len,
            tail_start: len,
            tail_x: 0,
            ellipsis_x: None,
        }
    }

    /// Drops everything; used when not even the ellipsis fits.
    fn empty(len: usize) -> Self {
        Self {
            head_end: 0,
            tail_start: len,
            tail_x: 0,
            ellipsis_x: None,
        }
    }
}

/// Leading glyphs whose widths fit in `limit`: (count, width).
fn fit_head(glyphs: &[FragmentGlyph], limit: i32) -> (usize, i32) {
    let mut x = 0;
    let mut n = 0;
    for g in glyphs {
        if x + g.width > limit {
            break;
        }
        x += g.width;
        n += 1;
    }
    (n, x)
}

/// Plans the elision of a row wider than `box_width`.
pub fn elide(
    glyphs: &[FragmentGlyph],
    box_width: i32,
    overflow: TextOverflow,
    ellipsis_width: i32,
) -> Elision {
    let len = glyphs.len();
    if overflow == TextOverflow::Clip {
        return Elision::none(len);
    }
    if box_width < ellipsis_width || box_width <= 0 {
        return Elision::empty(len);
    }
    match overflow {
        TextOverflow::Ellipsis => {
            let (head_end, head_x) = fit_head(glyphs, box_width - ellipsis_width);
            Elision {
                head_end,
                tail_start: len,
                tail_x: head_x + ellipsis_width,
                ellipsis_x: Some(head_x),
            }
        }
        TextOverflow::EllipsisMiddle => {
            let (head_end, head_x) = fit_head(glyphs, (box_width - ellipsis_width) / 2);
            let room = box_width - ellipsis_width - head_x;
            let mut tail_start = len;
            let mut tail_w = 0;
            // never walks back past the head
            while tail_start > head_end {
                let w = glyphs[tail_start - 1].width;
                if tail_w + w > room {
                    break;
                }
                tail_w += w;
                tail_start -= 1;
            }
            let gap = box_width - head_x - tail_w;
            Elision {
                head_end,
                tail_start,
                tail_x: box_width - tail_w,
                ellipsis_x: Some(head_x + (gap - ellipsis_width) / 2),
            }
        }
        TextOverflow::Clip => Elision::none(len),
    }
}

/* ==== decorations ==== */

/// Decoration line positions, relative to the row top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationGeometry {
    pub thickness: i32,
    pub overline_y: i32,
    pub underline_y: i32,
    pub strike_y: i32,
}

pub fn decoration_geometry(font: &dyn Font, height: i32, baseline: i32) -> DecorationGeometry {
    let thickness = (height / 24).max(1);
    let x_height = font
        .glyph('x')
        .map(|g| g.black_box_y as i32)
        .unwrap_or(height / 2);
    let bottom = (height - thickness).max(0);
    DecorationGeometry {
        thickness,
        overline_y: 0,
        underline_y: (baseline + thickness * 2).min(bottom),
        strike_y: (baseline - x_height / 2 - thickness).clamp(0, bottom),
    }
}

/// Horizontal decoration stroke over `[x0, x1)`. Dash phase is anchored at
/// x = 0 so adjacent fragments continue the same pattern.
pub fn draw_decoration_line(
    buf: &mut dyn DrawBuf,
    x0: i32,
    x1: i32,
    y: i32,
    thickness: i32,
    color: Color,
    style: DecorStyle,
) {
    if x0 >= x1 {
        return;
    }
    let (on, off) = match style {
        DecorStyle::Solid => {
            buf.fill_rect(Rect::new(x0, y, x1, y + thickness), color);
            return;
        }
        DecorStyle::Dotted => (thickness, thickness),
        DecorStyle::Dashed => (thickness * 3, thickness * 2),
    };
    let period = on + off;
    let mut x = x0 - x0.rem_euclid(period);
    while x < x1 {
        let (a, b) = (x.max(x0), (x + on).min(x1));
        if a < b {
            buf.fill_rect(Rect::new(a, y, b, y + thickness), color);
        }
        x += period;
    }
}

/* ==== painting ==== */

/// Vertical placement of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPaint {
    pub top: i32,
    pub height: i32,
    pub baseline: i32,
}

/// Paints one uniformly styled run at pen `x` and returns its width.
///
/// Order: background, over/underline, glyphs, strikethrough. `mnemonic` is
/// an index into `glyphs` to underline on its own.
pub fn draw_fragment(
    buf: &mut dyn DrawBuf,
    glyphs: &[FragmentGlyph],
    x: i32,
    row: &RowPaint,
    style: &TextStyle,
    mnemonic: Option<usize>,
) -> i32 {
    let width: i32 = glyphs.iter().map(|g| g.width).sum();
    if glyphs.is_empty() {
        return 0;
    }
    if !style.background.is_transparent() {
        buf.fill_rect(Rect::new(x, row.top, x + width, row.top + row.height), style.background);
    }

    let decor = style.decoration;
    let need_geometry = !decor.line.is_empty() || mnemonic.is_some();
    let geo = need_geometry.then(|| decoration_geometry(&*style.font, row.height, row.baseline));
    let decor_color = style.decoration_color();

    if let Some(geo) = geo {
        let line = |buf: &mut dyn DrawBuf, y: i32| {
            draw_decoration_line(
                buf,
                x,
                x + width,
                row.top + y,
                geo.thickness,
                decor_color,
                decor.style,
            )
        };
        if decor.line.contains(DecorLine::OVER) {
            line(buf, geo.overline_y);
        }
        if decor.line.contains(DecorLine::UNDER) {
            line(buf, geo.underline_y);
        } else if let Some(i) = mnemonic.filter(|&i| i < glyphs.len()) {
            let gx = x + glyphs[..i].iter().map(|g| g.width).sum::<i32>();
            buf.fill_rect(
                Rect::new(
                    gx,
                    row.top + geo.underline_y,
                    gx + glyphs[i].width,
                    row.top + geo.underline_y + geo.thickness,
                ),
                style.color,
            );
        }
    }

    let mut pen = x;
    for fg in glyphs {
        if let Some(g) = &fg.glyph {
            buf.draw_glyph(
                pen + g.origin_x as i32,
                row.top + row.baseline - g.origin_y as i32,
                g,
                style.color,
            );
        }
        pen += fg.width;
    }

    if let Some(geo) = geo
        && decor.line.contains(DecorLine::THROUGH)
    {
        draw_decoration_line(
            buf,
            x,
            x + width,
            row.top + geo.strike_y,
            geo.thickness,
            decor_color,
            decor.style,
        );
    }
    width
}

/// Paints `[start, end)` of a line, split by markup when present.
#[allow(clippy::too_many_arguments)]
fn paint_range(
    buf: &mut dyn DrawBuf,
    glyphs: &[FragmentGlyph],
    markup: Option<&LineMarkup>,
    start: usize,
    end: usize,
    x: i32,
    row: &RowPaint,
    style: &TextStyle,
    mnemonic: Option<usize>,
) {
    if start >= end {
        return;
    }
    let local = |s: usize, e: usize| mnemonic.filter(|i| (s..e).contains(i)).map(|i| i - s);
    match markup.filter(|m| !m.is_empty()) {
        Some(m) => {
            let mut pen = x;
            resolve(m.units(), start, end, style, &mut |s, e, st: &TextStyle| {
                pen += draw_fragment(buf, &glyphs[s..e], pen, row, st, local(s, e));
            });
        }
        None => {
            draw_fragment(buf, &glyphs[start..end], x, row, style, local(start, end));
        }
    }
}

/// Everything needed to paint the rows of one measured line.
pub struct LinePaint<'a> {
    pub glyphs: &'a [FragmentGlyph],
    pub markup: Option<&'a LineMarkup>,
    pub style: &'a TextStyle,
    /// Line index of the single underlined character
    pub mnemonic: Option<usize>,
    pub ellipsis: &'a Ellipsis,
}

/// Paints one row. `span.offset` must already hold the alignment offset.
pub fn draw_row(buf: &mut dyn DrawBuf, line: &LinePaint<'_>, span: &LineSpan, x: i32, y: i32, box_width: i32) {
    let row_glyphs = &line.glyphs[span.start..span.end];
    let row = RowPaint {
        top: y,
        height: span.height,
        baseline: row_glyphs
            .iter()
            .map(|g| g.baseline)
            .max()
            .unwrap_or_else(|| line.style.font.baseline()),
    };
    let x = x + span.offset;
    let style = line.style;

    let elision = if style.overflow != TextOverflow::Clip && box_width > 0 && span.width > box_width {
        let e = elide(row_glyphs, box_width, style.overflow, line.ellipsis.width());
        log::debug!(target: "TextLine::Draw", "elide [{}, {}) in {}px: {:?}", span.start, span.end, box_width, e);
        e
    } else {
        Elision::none(row_glyphs.len())
    };

    paint_range(
        buf,
        line.glyphs,
        line.markup,
        span.start,
        span.start + elision.head_end,
        x,
        &row,
        style,
        line.mnemonic,
    );
    if let Some(ex) = elision.ellipsis_x {
        line.ellipsis.draw(buf, x + ex, &row, style.color);
    }
    if elision.tail_start < row_glyphs.len() {
        paint_range(
            buf,
            line.glyphs,
            line.markup,
            span.start + elision.tail_start,
            span.end,
            x + elision.tail_x,
            &row,
            style,
            line.mnemonic,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::raster::ArgbBuf;
    use crate::engine::text::fallback::FallbackFont;
    use crate::engine::text::style::TextDecoration;

    fn fixed(n: usize, w: i32) -> Vec<FragmentGlyph> {
        vec![
            FragmentGlyph {
                glyph: None,
                width: w,
                height: 12,
                baseline: 10,
            };
            n
        ]
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(alignment_offset(TextAlign::Center, 60, 100), 20);
        assert_eq!(alignment_offset(TextAlign::End, 60, 100), 40);
        assert_eq!(alignment_offset(TextAlign::End, 160, 100), 0);
        assert_eq!(alignment_offset(TextAlign::Center, 160, 100), 0);
        assert_eq!(alignment_offset(TextAlign::Justify, 60, 100), 0);
        for a in [TextAlign::Start, TextAlign::Center, TextAlign::End] {
            assert_eq!(alignment_offset(a, 100, 100), 0);
        }
    }

    #[test]
    fn end_ellipsis_keeps_fitting_head() {
        let g = fixed(10, 10);
        let e = elide(&g, 55, TextOverflow::Ellipsis, 10);
        assert_eq!(e.head_end, 4);
        assert_eq!(e.ellipsis_x, Some(40));
        assert_eq!(e.tail_start, 10);
    }

    #[test]
    fn middle_ellipsis_splits_head_and_tail() {
        let g = fixed(10, 10);
        let e = elide(&g, 65, TextOverflow::EllipsisMiddle, 10);
        // head limit (65 - 10) / 2 = 27 -> 2 glyphs
        assert_eq!(e.head_end, 2);
        // room 65 - 10 - 20 = 35 -> 3 glyphs
        assert_eq!(e.tail_start, 7);
        assert_eq!(e.tail_x, 35);
        let ex = e.ellipsis_x.unwrap();
        assert!(ex >= 20 && ex + 10 <= e.tail_x);
    }

    #[test]
    fn middle_ellipsis_tail_never_crosses_head() {
        let g = fixed(3, 10);
        let e = elide(&g, 1000, TextOverflow::EllipsisMiddle, 10);
        assert!(e.tail_start >= e.head_end);
        assert_eq!((e.head_end, e.tail_start), (3, 3));
    }

    #[test]
    fn box_narrower_than_ellipsis_draws_nothing() {
        let g = fixed(5, 10);
        for mode in [TextOverflow::Ellipsis, TextOverflow::EllipsisMiddle] {
            let e = elide(&g, 6, mode, 10);
            assert_eq!(e.head_end, 0);
            assert_eq!(e.tail_start, 5);
            assert_eq!(e.ellipsis_x, None);
        }
    }

    #[test]
    fn decoration_lines_fall_inside_the_row() {
        let font = FallbackFont::with_metrics(10, 10, 10);
        let geo = decoration_geometry(&font, 12, 10);
        assert_eq!(geo.thickness, 1);
        assert_eq!(geo.overline_y, 0);
        assert_eq!(geo.underline_y, 11);
        // x black box is 5 high
        assert_eq!(geo.strike_y, 7);
        let geo = decoration_geometry(&font, 48, 30);
        assert_eq!(geo.thickness, 2);
        assert_eq!(geo.underline_y, 34);
    }

    #[test]
    fn fragment_paints_background_and_underline() {
        let font = FallbackFont::with_metrics(10, 10, 10).into_ref();
        let mut style = TextStyle::new(font.clone());
        style.background = Color::BLUE;
        style.decoration = TextDecoration::new(DecorLine::UNDER);
        style.decoration.color = Some(Color::RED);
        let g: Vec<FragmentGlyph> = ['a', 'b']
            .iter()
            .map(|&c| FragmentGlyph {
                glyph: font.glyph(c),
                width: 10,
                height: 12,
                baseline: 10,
            })
            .collect();
        let mut buf = ArgbBuf::new(30, 12);
        let row = RowPaint {
            top: 0,
            height: 12,
            baseline: 10,
        };
        let w = draw_fragment(&mut buf, &g, 0, &row, &style, None);
        assert_eq!(w, 20);
        assert_eq!(buf.pixel(0, 11), Color::RED);
        assert_eq!(buf.pixel(19, 11), Color::RED);
        assert_eq!(buf.pixel(0, 0), Color::BLUE);
        assert_eq!(buf.pixel(20, 0), Color::TRANSPARENT);
        // glyph ink: box corner at (1, 5)
        assert_eq!(buf.pixel(1, 5), Color::BLACK);
    }

    #[test]
    fn strikethrough_is_drawn_over_ink() {
        let font = FallbackFont::with_metrics(10, 10, 10).into_ref();
        let mut style = TextStyle::new(font.clone());
        style.decoration = TextDecoration::new(DecorLine::THROUGH);
        style.decoration.color = Some(Color::RED);
        let g = vec![FragmentGlyph {
            glyph: font.glyph('x'),
            width: 10,
            height: 12,
            baseline: 10,
        }];
        let mut buf = ArgbBuf::new(10, 12);
        let row = RowPaint {
            top: 0,
            height: 12,
            baseline: 10,
        };
        draw_fragment(&mut buf, &g, 0, &row, &style, None);
        // left edge of the 'x' box crosses the strike row
        assert_eq!(buf.pixel(1, 7), Color::RED);
        assert_eq!(buf.pixel(1, 6), Color::BLACK);
    }

    #[test]
    fn mnemonic_underlines_one_glyph() {
        let font = FallbackFont::with_metrics(10, 10, 10).into_ref();
        let style = TextStyle::new(font);
        let g = fixed(3, 10);
        let mut buf = ArgbBuf::new(30, 12);
        let row = RowPaint {
            top: 0,
            height: 12,
            baseline: 10,
        };
        draw_fragment(&mut buf, &g, 0, &row, &style, Some(1));
        assert_eq!(buf.pixel(9, 11), Color::TRANSPARENT);
        assert_eq!(buf.pixel(10, 11), Color::BLACK);
        assert_eq!(buf.pixel(19, 11), Color::BLACK);
        assert_eq!(buf.pixel(20, 11), Color::TRANSPARENT);
    }

    #[test]
    fn dotted_line_alternates() {
        let mut buf = ArgbBuf::new(10, 2);
        draw_decoration_line(&mut buf, 0, 10, 0, 1, Color::RED, DecorStyle::Dotted);
        assert_eq!(buf.pixel(0, 0), Color::RED);
        assert_eq!(buf.pixel(1, 0), Color::TRANSPARENT);
        assert_eq!(buf.pixel(2, 0), Color::RED);
    }
}
