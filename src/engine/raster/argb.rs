use super::blend::blend_argb;
use super::draw_buf::{DrawBuf, DrawState, PixelFormat};
use crate::engine::types::Color;

/// 32-bit `0xAARRGGBB` buffer, rows packed with no padding.
#[derive(Debug, Clone)]
pub struct ArgbBuf {
    width: i32,
    height: i32,
    pixels: Vec<u32>,
    state: DrawState,
}

impl ArgbBuf {
    /// Transparent buffer. Negative sizes give a null buffer.
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            width: w,
            height: h,
            pixels: vec![0; (w as usize) * (h as usize)],
            state: DrawState::new(w, h),
        }
    }

    /// Wraps existing pixels; `None` when the length does not match.
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<u32>) -> Option<Self> {
        if width < 0 || height < 0 || pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            state: DrawState::new(width, height),
        })
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn row(&self, y: i32) -> &[u32] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Reallocates, dropping content and state.
    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl DrawBuf for ArgbBuf {
    fn format(&self) -> PixelFormat {
        PixelFormat::Argb32
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn state(&self) -> &DrawState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Color::TRANSPARENT;
        }
        Color::from_argb(self.pixels[self.index(x, y)])
    }

    fn blend_row(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        debug_assert!(y >= 0 && y < self.height && x0 >= 0 && x1 <= self.width);
        if x0 >= x1 {
            return;
        }
        let (a, b) = (self.index(x0, y), self.index(x1, y));
        let row = &mut self.pixels[a..b];
        if color.3 == 255 {
            row.fill(color.to_argb());
        } else {
            for p in row {
                *p = blend_argb(*p, color);
            }
        }
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{Insets, Rect};

    #[test]
    fn fill_respects_clip() {
        let mut buf = ArgbBuf::new(100, 100);
        buf.set_clip_rect(Rect::new(50, 50, 200, 200));
        assert_eq!(buf.clip_rect(), Rect::new(50, 50, 100, 100));
        buf.fill_rect(Rect::new(0, 0, 100, 100), Color::RED);
        assert_eq!(buf.pixel(49, 50), Color::TRANSPARENT);
        assert_eq!(buf.pixel(50, 49), Color::TRANSPARENT);
        assert_eq!(buf.pixel(50, 50), Color::RED);
        assert_eq!(buf.pixel(99, 99), Color::RED);
    }

    #[test]
    fn global_alpha_scales_source() {
        let mut buf = ArgbBuf::new(2, 1);
        buf.clear(Color::WHITE);
        buf.set_alpha(128);
        buf.fill_rect(Rect::new(0, 0, 1, 1), Color::BLACK);
        assert_eq!(buf.pixel(0, 0), Color(127, 127, 127, 255));
        assert_eq!(buf.pixel(1, 0), Color::WHITE);
    }

    #[test]
    fn stale_clip_is_bounded_by_the_buffer() {
        let mut buf = ArgbBuf::new(4, 4);
        buf.state_mut().clip = Rect::new(-5, -5, 50, 50);
        assert_eq!(buf.clip_rect(), Rect::new(0, 0, 4, 4));
        buf.fill_rect(Rect::new(-10, -10, 10, 10), Color::RED);
        buf.fill_span(3, -2, 9, Color::BLUE);
        assert_eq!(buf.pixel(3, 3), Color::BLUE);
        assert_eq!(buf.pixel(0, 0), Color::RED);
    }

    #[test]
    fn frame_has_per_edge_widths() {
        let mut buf = ArgbBuf::new(6, 6);
        buf.draw_frame(Rect::new(0, 0, 6, 6), Color::RED, Insets::new(1, 2, 1, 2));
        assert_eq!(buf.pixel(1, 1), Color::RED);
        assert_eq!(buf.pixel(0, 3), Color::RED);
        assert_eq!(buf.pixel(5, 3), Color::RED);
        assert_eq!(buf.pixel(2, 3), Color::TRANSPARENT);
        assert_eq!(buf.pixel(3, 4), Color::RED);

        let mut empty = ArgbBuf::new(6, 6);
        empty.draw_frame(Rect::new(0, 0, 6, 6), Color::RED, Insets::default());
        assert!(empty.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn null_buffer_ignores_everything() {
        let mut buf = ArgbBuf::new(0, -3);
        assert!(buf.is_null());
        buf.fill_rect(Rect::new(-10, -10, 10, 10), Color::RED);
        assert_eq!(buf.pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(ArgbBuf::from_pixels(2, 2, vec![0; 3]).is_none());
        let buf = ArgbBuf::from_pixels(2, 1, vec![0xFF00FF00, 0]).unwrap();
        assert_eq!(buf.pixel(0, 0), Color(0, 255, 0, 255));
    }
}
