//! The raster target contract.
//!
//! Concrete pixel formats implement a handful of required pixel/row
//! primitives; clipping, global alpha and every composite operation are
//! provided once on top of them, so the algorithms never dispatch on the
//! pixel format.

use super::argb::ArgbBuf;
use super::blend::combine_alpha;
use super::gray::GrayBuf;
use super::nine_patch::{self, NinePatch};
use crate::engine::text::font::Glyph;
use crate::engine::types::{Color, Insets, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32-bit `0xAARRGGBB`
    Argb32,
    /// 8-bit luminance
    Gray8,
}

/// Mutable drawing state shared by all formats.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    /// Kept inside the buffer bounds by the `DrawBuf` setters
    pub(crate) clip: Rect,
    /// Global opacity applied to every op
    pub alpha: u8,
    pub nine_patch: Option<NinePatch>,
}

impl DrawState {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            clip: Rect::new(0, 0, width.max(0), height.max(0)),
            alpha: 255,
            nine_patch: None,
        }
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }
}

/// Creates an empty buffer of the requested format.
pub fn create_draw_buf(format: PixelFormat, width: i32, height: i32) -> Box<dyn DrawBuf> {
    match format {
        PixelFormat::Argb32 => Box::new(ArgbBuf::new(width, height)),
        PixelFormat::Gray8 => Box::new(GrayBuf::new(width, height)),
    }
}

pub trait DrawBuf {
    fn format(&self) -> PixelFormat;
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn state(&self) -> &DrawState;
    fn state_mut(&mut self) -> &mut DrawState;

    /// Reads a pixel; outside the buffer reads as transparent.
    fn pixel(&self, x: i32, y: i32) -> Color;

    /// Source-over blend of `color` into `[x0, x1)` on row `y`.
    ///
    /// The run must already be clipped; `color` alpha is final.
    fn blend_row(&mut self, y: i32, x0: i32, x1: i32, color: Color);

    /// Source-over blend of one in-bounds pixel.
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.blend_row(y, x, x + 1, color);
    }

    /// Fills the whole buffer, ignoring clip and alpha.
    fn clear(&mut self, color: Color);

    // ---- state ----

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width().max(0), self.height().max(0))
    }

    fn is_null(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Current clip; never extends past the buffer even after a resize.
    fn clip_rect(&self) -> Rect {
        self.state().clip.intersect(&self.bounds())
    }

    /// Sets the clip, intersected with the buffer bounds.
    fn set_clip_rect(&mut self, r: Rect) {
        let clip = r.intersect(&self.bounds());
        self.state_mut().clip = clip;
    }

    /// Narrows the current clip.
    fn intersect_clip_rect(&mut self, r: Rect) {
        let clip = self.clip_rect().intersect(&r).intersect(&self.bounds());
        self.state_mut().clip = clip;
    }

    fn reset_clip(&mut self) {
        let b = self.bounds();
        self.state_mut().clip = b;
    }

    fn alpha(&self) -> u8 {
        self.state().alpha
    }

    fn set_alpha(&mut self, alpha: u8) {
        self.state_mut().alpha = alpha;
    }

    /// Multiplies another opacity into the global alpha.
    fn add_alpha(&mut self, alpha: u8) {
        let a = combine_alpha(self.alpha(), alpha);
        self.state_mut().alpha = a;
    }

    /// Starts a batch: opaque, unclipped.
    fn before_drawing(&mut self) {
        self.set_alpha(255);
        self.reset_clip();
    }

    fn after_drawing(&mut self) {}

    /// Color with the global alpha folded in.
    fn apply_alpha(&self, color: Color) -> Color {
        color.with_alpha(combine_alpha(color.3, self.alpha()))
    }

    fn nine_patch(&self) -> Option<&NinePatch> {
        self.state().nine_patch.as_ref()
    }

    fn set_nine_patch(&mut self, patch: Option<NinePatch>) {
        self.state_mut().nine_patch = patch;
    }

    /// Scans the 1-pixel marker border and installs the patch if found.
    fn detect_nine_patch(&mut self) -> bool {
        match nine_patch::detect(self) {
            Some(p) => {
                self.set_nine_patch(Some(p));
                true
            }
            None => false,
        }
    }

    // ---- primitives ----

    /// Blends a run clipped against the clip rect. `color` alpha is final.
    fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        let clip = self.clip_rect();
        if y < clip.top || y >= clip.bottom {
            return;
        }
        let (x0, x1) = (x0.max(clip.left), x1.min(clip.right));
        if x0 < x1 {
            self.blend_row(y, x0, x1, color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let color = self.apply_alpha(color);
        if color.is_transparent() {
            return;
        }
        let r = rect.intersect(&self.clip_rect());
        if r.is_empty() {
            return;
        }
        for y in r.top..r.bottom {
            self.blend_row(y, r.left, r.right, color);
        }
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        if !self.clip_rect().contains(x, y) {
            return;
        }
        let color = self.apply_alpha(color);
        if !color.is_transparent() {
            self.blend_pixel(x, y, color);
        }
    }

    /// Frame inside `rect` with per-edge widths.
    fn draw_frame(&mut self, rect: Rect, color: Color, widths: Insets) {
        if rect.is_empty() || widths.is_zero() {
            return;
        }
        let inner = rect.shrink(&widths);
        let top = inner.top.clamp(rect.top, rect.bottom);
        let bottom = inner.bottom.clamp(top, rect.bottom);
        self.fill_rect(Rect::new(rect.left, rect.top, rect.right, top), color);
        self.fill_rect(Rect::new(rect.left, bottom, rect.right, rect.bottom), color);
        let left = inner.left.clamp(rect.left, rect.right);
        let right = inner.right.clamp(left, rect.right);
        self.fill_rect(Rect::new(rect.left, top, left, bottom), color);
        self.fill_rect(Rect::new(right, top, rect.right, bottom), color);
    }

    /// Composites a glyph's coverage mask with its black box top-left at (x, y).
    fn draw_glyph(&mut self, x: i32, y: i32, glyph: &Glyph, color: Color) {
        let color = self.apply_alpha(color);
        if color.is_transparent() {
            return;
        }
        let (bw, bh) = (glyph.black_box_x as i32, glyph.black_box_y as i32);
        let dst = Rect::from_xywh(x, y, bw, bh).intersect(&self.clip_rect());
        if dst.is_empty() || glyph.coverage.len() < (bw * bh) as usize {
            return;
        }
        for py in dst.top..dst.bottom {
            let row = ((py - y) * bw) as usize;
            let cov_row = &glyph.coverage[row..row + bw as usize];
            for px in dst.left..dst.right {
                let cov = cov_row[(px - x) as usize];
                if cov == 0 {
                    continue;
                }
                let a = combine_alpha(cov, color.3);
                self.blend_pixel(px, py, color.with_alpha(a));
            }
        }
    }
}
