//! One logical line: text, optional markup, measured glyphs and wrapped rows.

use std::rc::Rc;
use std::slice;

use super::markup::{LineMarkup, resolve};
use super::measure::{FragmentGlyph, PenState, hotkey_index, measure_run};
use super::render::{Ellipsis, LinePaint, alignment_offset, draw_row};
use super::style::{TextAlign, TextLayoutStyle, TextOverflow, TextStyle};
use super::wrap::{LineSpan, wrap_line};
use crate::engine::raster::DrawBuf;
use crate::engine::types::{Point, Rect, Size};

#[derive(Debug, Default)]
pub struct TextLine {
    text: Vec<char>,
    markup: Option<Rc<LineMarkup>>,
    glyphs: Vec<FragmentGlyph>,
    /// Empty when the line is a single unwrapped row
    spans: Vec<LineSpan>,
    default_span: LineSpan,
    size: Size,
    measured: bool,
    last_style: Option<TextLayoutStyle>,
    wrap_width: Option<i32>,
    wrap_passes: usize,
}

impl TextLine {
    pub fn new(text: &str) -> Self {
        Self::from_chars(text.chars().collect())
    }

    pub fn from_chars(text: Vec<char>) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn to_text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().collect();
        self.invalidate();
    }

    pub fn markup(&self) -> Option<&LineMarkup> {
        self.markup.as_deref()
    }

    /// Attaches shared markup. Unprepared markup is prepared on a private copy.
    pub fn set_markup(&mut self, markup: Rc<LineMarkup>) {
        let markup = if markup.is_prepared() {
            markup
        } else {
            let mut m = (*markup).clone();
            m.prepare();
            Rc::new(m)
        };
        self.markup = Some(markup);
        self.invalidate();
    }

    pub fn reset_markup(&mut self) {
        if self.markup.take().is_some() {
            self.invalidate();
        }
    }

    fn invalidate(&mut self) {
        self.measured = false;
        self.last_style = None;
        self.spans.clear();
        self.wrap_width = None;
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn glyphs(&self) -> &[FragmentGlyph] {
        &self.glyphs
    }

    /// Size after the last measure or wrap.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Physical rows; a single implicit row when unwrapped.
    pub fn spans(&self) -> &[LineSpan] {
        if self.spans.is_empty() {
            slice::from_ref(&self.default_span)
        } else {
            &self.spans
        }
    }

    fn spans_mut(&mut self) -> &mut [LineSpan] {
        if self.spans.is_empty() {
            slice::from_mut(&mut self.default_span)
        } else {
            &mut self.spans
        }
    }

    /// Number of times wrapping actually ran.
    pub fn wrap_passes(&self) -> usize {
        self.wrap_passes
    }

    /// Measures glyphs; a no-op while text and style are unchanged.
    pub fn measure(&mut self, style: &TextLayoutStyle) -> Size {
        if self.measured && self.last_style.as_ref() == Some(style) {
            return self.size;
        }
        let len = self.text.len();
        let mut glyphs = vec![FragmentGlyph::default(); len];
        let mut pen = PenState::new();
        let mut height = 0;

        match self.markup.as_deref().filter(|m| m.affects_layout()) {
            Some(m) => {
                let text = &self.text;
                resolve(m.units(), 0, len, style, &mut |s, e, st: &TextLayoutStyle| {
                    let sz = measure_run(&text[s..e], st, &mut pen, &mut glyphs[s..e]);
                    height = height.max(sz.height);
                });
            }
            None => {
                height = measure_run(&self.text, style, &mut pen, &mut glyphs).height;
            }
        }
        if len == 0 {
            height = style.font.height();
        }

        self.glyphs = glyphs;
        self.default_span = LineSpan {
            start: 0,
            end: len,
            width: pen.x,
            height,
            offset: 0,
        };
        self.spans.clear();
        self.wrap_width = None;
        self.size = Size::new(pen.x, height);
        self.measured = true;
        self.last_style = Some(style.clone());
        log::debug!(target: "TextLine::Measure", "{} chars -> {:?}", len, self.size);
        self.size
    }

    /// Wraps into `width` and returns the resulting height. A no-op for a
    /// non-positive width or the same width as last time.
    pub fn wrap(&mut self, width: i32) -> i32 {
        debug_assert!(self.measured, "TextLine::wrap before measure");
        if width <= 0 || self.wrap_width == Some(width) {
            return self.size.height;
        }
        self.wrap_passes += 1;
        self.spans = wrap_line(&self.text, &self.glyphs, width, self.default_span.height);
        self.wrap_width = Some(width);
        self.size = if self.spans.is_empty() {
            Size::new(self.default_span.width, self.default_span.height)
        } else {
            Size::new(
                self.spans.iter().map(|s| s.width).max().unwrap_or(0),
                self.spans.iter().map(|s| s.height).sum(),
            )
        };
        log::debug!(
            target: "TextLine::Wrap",
            "width {} -> {} rows, {:?}",
            width,
            self.spans().len(),
            self.size
        );
        self.size.height
    }

    /// Sets every row's alignment offset.
    pub fn align(&mut self, align: TextAlign, box_width: i32) {
        for span in self.spans_mut() {
            span.offset = alignment_offset(align, span.width, box_width);
        }
    }

    /// Paints the line with its top-left at (x, y) and returns the first
    /// row's alignment offset.
    pub fn draw(
        &mut self,
        buf: &mut dyn DrawBuf,
        x: i32,
        y: i32,
        box_width: i32,
        style: &TextStyle,
    ) -> i32 {
        debug_assert!(self.measured, "TextLine::draw before measure");
        if !self.measured {
            self.measure(&style.layout());
        }
        if style.wrap {
            self.wrap(box_width);
        }
        self.align(style.align, box_width);

        let ellipsis = if style.overflow == TextOverflow::Clip {
            Ellipsis::default()
        } else {
            Ellipsis::for_font(&*style.font)
        };
        let mnemonic = style
            .underlined_char
            .or_else(|| hotkey_index(&self.text, style.hotkey));
        let paint = LinePaint {
            glyphs: &self.glyphs,
            markup: self.markup.as_deref(),
            style,
            mnemonic,
            ellipsis: &ellipsis,
        };

        let rows = self.spans();
        let mut pen_y = y;
        for span in rows {
            draw_row(buf, &paint, span, x, pen_y, box_width);
            pen_y += span.height;
        }
        rows.first().map_or(0, |s| s.offset)
    }

    /// Row holding `pos` and the y of its top. Row ends belong to the next row.
    fn row_of(&self, pos: usize) -> (&LineSpan, i32) {
        let rows = self.spans();
        let mut y = 0;
        for (i, row) in rows.iter().enumerate() {
            if pos < row.end || i + 1 == rows.len() {
                return (row, y);
            }
            y += row.height;
        }
        (&self.default_span, 0)
    }

    /// Box of the glyph at `pos`, relative to the line's top-left. The
    /// end-of-line position yields a zero-width box.
    pub fn text_pos_to_client(&self, pos: usize) -> Rect {
        let pos = pos.min(self.text.len());
        let (row, y) = self.row_of(pos);
        let pos = pos.max(row.start);
        let x = row.offset + self.glyphs[row.start..pos].iter().map(|g| g.width).sum::<i32>();
        let w = if pos < row.end { self.glyphs[pos].width } else { 0 };
        Rect::from_xywh(x, y, w, row.height)
    }

    /// Codepoint index closest to `pt` (relative to the line's top-left):
    /// the first glyph of the hit row whose midpoint is at or after `pt.x`.
    pub fn client_to_text_pos(&self, pt: Point) -> usize {
        let rows = self.spans();
        let mut top = 0;
        let mut row = &rows[rows.len() - 1];
        for r in rows {
            if pt.y < top + r.height {
                row = r;
                break;
            }
            top += r.height;
        }
        let mut x = row.offset;
        for i in row.start..row.end {
            let w = self.glyphs[i].width;
            if x + w / 2 >= pt.x {
                return i;
            }
            x += w;
        }
        row.end
    }
}
