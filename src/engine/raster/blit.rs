//! Image blits: copy, nearest-neighbor rescale and 9-patch.

use super::blend::combine_alpha;
use super::draw_buf::DrawBuf;
use crate::engine::types::Rect;

/// Source index for each destination index in `[clip_lo, clip_hi)` of the
/// destination run `[dst_start, dst_start + dst_len)`, 16.16 fixed point.
fn index_map(
    dst_start: i32,
    dst_len: i32,
    src_start: i32,
    src_len: i32,
    clip_lo: i32,
    clip_hi: i32,
) -> Vec<i32> {
    let step = ((src_len as i64) << 16) / dst_len as i64;
    (clip_lo..clip_hi)
        .map(|d| src_start + (((d - dst_start) as i64 * step) >> 16) as i32)
        .collect()
}

/// Splits `total` into two insets; crossing insets meet at the midpoint.
fn collapse(lo: i32, hi: i32, total: i32) -> (i32, i32) {
    let (lo, hi) = (lo.max(0), hi.max(0));
    if lo + hi >= total {
        let half = total / 2;
        (half, total - half)
    } else {
        (lo, hi)
    }
}

/// Blit operations, available on every [`DrawBuf`].
pub trait Blit: DrawBuf {
    /// Copies all of `src` with its top-left at (x, y).
    fn draw_image(&mut self, x: i32, y: i32, src: &dyn DrawBuf) {
        let r = src.bounds();
        self.draw_fragment(x, y, src, r);
    }

    /// Copies `src_rect` of `src` unscaled with its top-left at (x, y).
    fn draw_fragment(&mut self, x: i32, y: i32, src: &dyn DrawBuf, src_rect: Rect) {
        let src_rect = src_rect.intersect(&src.bounds());
        let dst = Rect::from_xywh(x, y, src_rect.width(), src_rect.height());
        self.draw_rescaled(dst, src, src_rect);
    }

    /// Nearest-neighbor scale of `src_rect` into `dst_rect`.
    fn draw_rescaled(&mut self, dst_rect: Rect, src: &dyn DrawBuf, src_rect: Rect) {
        if dst_rect.is_empty() || src_rect.is_empty() {
            return;
        }
        let dst = dst_rect.intersect(&self.clip_rect());
        if dst.is_empty() {
            return;
        }
        let xs = index_map(
            dst_rect.left,
            dst_rect.width(),
            src_rect.left,
            src_rect.width(),
            dst.left,
            dst.right,
        );
        let ys = index_map(
            dst_rect.top,
            dst_rect.height(),
            src_rect.top,
            src_rect.height(),
            dst.top,
            dst.bottom,
        );
        let alpha = self.alpha();
        for (dy, &sy) in (dst.top..dst.bottom).zip(&ys) {
            for (dx, &sx) in (dst.left..dst.right).zip(&xs) {
                let c = src.pixel(sx, sy);
                let a = combine_alpha(c.3, alpha);
                if a != 0 {
                    self.blend_pixel(dx, dy, c.with_alpha(a));
                }
            }
        }
    }

    /// Scales `src` into `dst_rect` using its 9-patch; a source without a
    /// patch is rescaled as a whole.
    fn draw_nine_patch(&mut self, dst_rect: Rect, src: &dyn DrawBuf) {
        let Some(patch) = src.nine_patch().copied() else {
            self.draw_rescaled(dst_rect, src, src.bounds());
            return;
        };
        if dst_rect.is_empty() {
            return;
        }
        let s = patch.source;
        let (sl, sr) = collapse(patch.frame.left, patch.frame.right, s.width());
        let (st, sb) = collapse(patch.frame.top, patch.frame.bottom, s.height());
        let (dl, dr) = collapse(sl, sr, dst_rect.width());
        let (dt, db) = collapse(st, sb, dst_rect.height());

        let sx = [s.left, s.left + sl, s.right - sr, s.right];
        let sy = [s.top, s.top + st, s.bottom - sb, s.bottom];
        let dx = [
            dst_rect.left,
            dst_rect.left + dl,
            dst_rect.right - dr,
            dst_rect.right,
        ];
        let dy = [
            dst_rect.top,
            dst_rect.top + dt,
            dst_rect.bottom - db,
            dst_rect.bottom,
        ];
        for row in 0..3 {
            for col in 0..3 {
                self.draw_rescaled(
                    Rect::new(dx[col], dy[row], dx[col + 1], dy[row + 1]),
                    src,
                    Rect::new(sx[col], sy[row], sx[col + 1], sy[row + 1]),
                );
            }
        }
    }
}

impl<T: DrawBuf + ?Sized> Blit for T {}
