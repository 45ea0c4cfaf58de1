use super::blend::blend_gray;
use super::draw_buf::{DrawBuf, DrawState, PixelFormat};
use crate::engine::types::Color;

/// 8-bit luminance buffer. Reads back as opaque gray.
#[derive(Debug, Clone)]
pub struct GrayBuf {
    width: i32,
    height: i32,
    pixels: Vec<u8>,
    state: DrawState,
}

impl GrayBuf {
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            width: w,
            height: h,
            pixels: vec![0; (w as usize) * (h as usize)],
            state: DrawState::new(w, h),
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl DrawBuf for GrayBuf {
    fn format(&self) -> PixelFormat {
        PixelFormat::Gray8
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
        let l = self.pixels[self.index(x, y)];
        Color(l, l, l, 255)
    }

    fn blend_row(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        debug_assert!(y >= 0 && y < self.height && x0 >= 0 && x1 <= self.width);
        if x0 >= x1 {
            return;
        }
        let (a, b) = (self.index(x0, y), self.index(x1, y));
        let row = &mut self.pixels[a..b];
        if color.3 == 255 {
            row.fill(color.luma());
        } else {
            for p in row {
                *p = blend_gray(*p, color);
            }
        }
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.luma());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::raster::draw_buf::create_draw_buf;
    use crate::engine::types::Rect;

    #[test]
    fn stores_luma() {
        let mut buf = GrayBuf::new(4, 4);
        buf.fill_rect(Rect::new(1, 1, 3, 3), Color::WHITE);
        assert_eq!(buf.pixels()[0], 0);
        assert_eq!(buf.pixel(1, 1), Color(255, 255, 255, 255));
    }

    #[test]
    fn factory_picks_format() {
        let buf = create_draw_buf(PixelFormat::Gray8, 3, 2);
        assert_eq!(buf.format(), PixelFormat::Gray8);
        assert_eq!(buf.bounds(), Rect::new(0, 0, 3, 2));
        let buf = create_draw_buf(PixelFormat::Argb32, 3, 2);
        assert_eq!(buf.format(), PixelFormat::Argb32);
    }
}
