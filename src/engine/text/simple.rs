//! Multi-line text: one [`TextLine`] per `\n`-separated line.

use std::rc::Rc;

use super::line::TextLine;
use super::markup::LineMarkup;
use super::style::{TextLayoutStyle, TextStyle};
use crate::engine::raster::DrawBuf;
use crate::engine::types::{Point, Rect, Size};

#[derive(Debug, Default)]
pub struct SimpleText {
    lines: Vec<TextLine>,
    size: Size,
}

impl SimpleText {
    pub fn new(text: &str) -> Self {
        let mut t = Self::default();
        t.set_text(text);
        t
    }

    /// Replaces the content; `\r\n` counts as one break.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text
            .split('\n')
            .map(|l| TextLine::new(l.strip_suffix('\r').unwrap_or(l)))
            .collect();
        self.size = Size::default();
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(TextLine::to_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&TextLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// Returns `false` when `line` is out of range.
    pub fn set_markup(&mut self, line: usize, markup: Rc<LineMarkup>) -> bool {
        match self.lines.get_mut(line) {
            Some(l) => {
                l.set_markup(markup);
                true
            }
            None => false,
        }
    }

    pub fn reset_markup(&mut self, line: usize) -> bool {
        match self.lines.get_mut(line) {
            Some(l) => {
                l.reset_markup();
                true
            }
            None => false,
        }
    }

    pub fn is_measured(&self) -> bool {
        self.lines.iter().all(TextLine::is_measured)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn update_size(&mut self) {
        self.size = Size::new(
            self.lines.iter().map(|l| l.size().width).max().unwrap_or(0),
            self.lines.iter().map(|l| l.size().height).sum(),
        );
    }

    pub fn measure(&mut self, style: &TextLayoutStyle) -> Size {
        for line in &mut self.lines {
            line.measure(style);
        }
        self.update_size();
        self.size
    }

    /// Wraps every line; returns the total height.
    pub fn wrap(&mut self, width: i32) -> i32 {
        for line in &mut self.lines {
            line.wrap(width);
        }
        self.update_size();
        self.size.height
    }

    /// Paints all lines downward from (x, y); returns the height painted.
    pub fn draw(
        &mut self,
        buf: &mut dyn DrawBuf,
        x: i32,
        y: i32,
        box_width: i32,
        style: &TextStyle,
    ) -> i32 {
        let mut pen_y = y;
        for line in &mut self.lines {
            line.draw(buf, x, pen_y, box_width, style);
            pen_y += line.size().height;
        }
        pen_y - y
    }

    fn line_top(&self, index: usize) -> i32 {
        self.lines[..index].iter().map(|l| l.size().height).sum()
    }

    /// Box of (line, column), relative to the text's top-left.
    pub fn text_pos_to_client(&self, line: usize, col: usize) -> Rect {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return Rect::default();
        };
        let line = line.min(last);
        let top = self.line_top(line);
        self.lines[line].text_pos_to_client(col).offset(0, top)
    }

    /// (line, column) under `pt`, relative to the text's top-left.
    pub fn client_to_text_pos(&self, pt: Point) -> (usize, usize) {
        let mut top = 0;
        for (i, line) in self.lines.iter().enumerate() {
            let h = line.size().height;
            if pt.y < top + h || i + 1 == self.lines.len() {
                return (i, line.client_to_text_pos(Point::new(pt.x, pt.y - top)));
            }
            top += h;
        }
        (0, 0)
    }
}
