//! 9-patch metadata and border-marker detection.
//!
//! The marker convention: a 1-pixel border around the image, where opaque
//! near-black runs on the top/left edges mark the stretchable region and
//! runs on the bottom/right edges mark the content area.

use super::draw_buf::DrawBuf;
use crate::engine::types::{Color, Insets, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NinePatch {
    /// Non-scalable frame widths, relative to `source`
    pub frame: Insets,
    /// Content padding, relative to `source`
    pub padding: Insets,
    /// Image region the patch covers (excludes the marker border)
    pub source: Rect,
}

impl NinePatch {
    pub fn new(frame: Insets, padding: Insets, source: Rect) -> Self {
        Self {
            frame,
            padding,
            source,
        }
    }
}

fn is_marker(c: Color) -> bool {
    c.3 >= 0xC0 && c.0 < 0x40 && c.1 < 0x40 && c.2 < 0x40
}

/// First contiguous marker run in `[from, to)`, end exclusive.
fn find_run(from: i32, to: i32, pixel: impl Fn(i32) -> Color) -> Option<(i32, i32)> {
    let start = (from..to).find(|&i| is_marker(pixel(i)))?;
    let end = (start..to).find(|&i| !is_marker(pixel(i))).unwrap_or(to);
    Some((start, end))
}

/// Insets before and after a run on an edge of `len` pixels (border included).
fn run_insets(run: (i32, i32), len: i32) -> (i32, i32) {
    (run.0 - 1, (len - 1) - run.1)
}

/// Infers frame and padding from the border markers.
///
/// Fails only when no edge carries a run. An axis without a stretch marker
/// has no fixed frame; missing content markers default the padding to the
/// frame.
pub fn detect<B: DrawBuf + ?Sized>(img: &B) -> Option<NinePatch> {
    let (w, h) = (img.width(), img.height());
    if w < 3 || h < 3 {
        return None;
    }
    let top = find_run(1, w - 1, |x| img.pixel(x, 0));
    let left = find_run(1, h - 1, |y| img.pixel(0, y));
    let bottom = find_run(1, w - 1, |x| img.pixel(x, h - 1));
    let right = find_run(1, h - 1, |y| img.pixel(w - 1, y));

    if top.is_none() && left.is_none() && bottom.is_none() && right.is_none() {
        log::debug!(target: "NinePatch", "no markers on {}x{} image", w, h);
        return None;
    }

    // inner image spans [1, w - 1) x [1, h - 1)
    let frame_x = top.map_or((0, 0), |r| run_insets(r, w));
    let frame_y = left.map_or((0, 0), |r| run_insets(r, h));
    let pad_x = bottom.map_or(frame_x, |r| run_insets(r, w));
    let pad_y = right.map_or(frame_y, |r| run_insets(r, h));

    let patch = NinePatch {
        frame: Insets::new(frame_x.0, frame_y.0, frame_x.1, frame_y.1),
        padding: Insets::new(pad_x.0, pad_y.0, pad_x.1, pad_y.1),
        source: Rect::new(1, 1, w - 1, h - 1),
    };
    log::debug!(
        target: "NinePatch",
        "detected {:?} (top={:?} left={:?} bottom={:?} right={:?})",
        patch, top, left, bottom, right
    );
    Some(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::raster::argb::ArgbBuf;

    /// 10x10 image; `edges` = top, left, bottom, right markers at [3, 7).
    fn marked(edges: [bool; 4]) -> ArgbBuf {
        let mut buf = ArgbBuf::new(10, 10);
        buf.clear(Color::WHITE.with_alpha(0));
        for i in 3..7 {
            let spots = [(i, 0), (0, i), (i, 9), (9, i)];
            for (on, (x, y)) in edges.into_iter().zip(spots) {
                if on {
                    buf.draw_pixel(x, y, Color::BLACK);
                }
            }
        }
        buf
    }

    #[test]
    fn detects_symmetric_markers() {
        let mut buf = marked([true; 4]);
        assert!(buf.detect_nine_patch());
        let p = buf.nine_patch().copied().unwrap();
        assert_eq!(p.frame, Insets::uniform(2));
        assert_eq!(p.padding, Insets::uniform(2));
        assert_eq!(p.source, Rect::new(1, 1, 9, 9));
    }

    #[test]
    fn content_markers_are_optional() {
        let mut buf = ArgbBuf::new(10, 10);
        for x in 2..5 {
            buf.draw_pixel(x, 0, Color::BLACK);
        }
        for y in 3..7 {
            buf.draw_pixel(0, y, Color::BLACK);
        }
        assert!(buf.detect_nine_patch());
        let p = buf.nine_patch().copied().unwrap();
        assert_eq!(p.frame, Insets::new(1, 2, 4, 2));
        assert_eq!(p.padding, p.frame);
    }

    #[test]
    fn axis_without_stretch_marker_has_no_frame() {
        let p = detect(&marked([true, false, false, true])).unwrap();
        assert_eq!(p.frame, Insets::new(2, 0, 2, 0));
        assert_eq!(p.padding, Insets::new(2, 2, 2, 2));
    }

    #[test]
    fn unmarked_image_fails_and_installs_nothing() {
        let mut buf = marked([false; 4]);
        assert!(!buf.detect_nine_patch());
        assert!(buf.nine_patch().is_none());
    }

    #[test]
    fn gray_pixels_are_not_markers() {
        assert!(!is_marker(Color(128, 128, 128, 255)));
        assert!(!is_marker(Color(0, 0, 0, 0x80)));
        assert!(is_marker(Color(0x10, 0x10, 0x10, 0xFF)));
    }
}
