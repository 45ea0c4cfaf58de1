//! Clipping: scoped clip/alpha state, Cohen–Sutherland for 1px lines and
//! Sutherland–Hodgman for triangles against the rectangular clip.

use std::ops::{Deref, DerefMut};

use super::draw_buf::DrawBuf;
use crate::engine::types::{Point, PointF, Rect, RectF};

/* ==== scoped state ==== */

/// Saves clip and alpha on creation and restores them on drop.
///
/// ```ignore
/// {
///     let mut g = DrawStateGuard::new(&mut buf);
///     g.intersect_clip_rect(cell);
///     g.add_alpha(128);
///     g.fill_rect(cell, color);
/// } // clip and alpha restored
/// ```
pub struct DrawStateGuard<'a, B: DrawBuf + ?Sized> {
    buf: &'a mut B,
    clip: Rect,
    alpha: u8,
}

impl<'a, B: DrawBuf + ?Sized> DrawStateGuard<'a, B> {
    pub fn new(buf: &'a mut B) -> Self {
        let clip = buf.state().clip();
        let alpha = buf.alpha();
        Self { buf, clip, alpha }
    }
}

impl<B: DrawBuf + ?Sized> Deref for DrawStateGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.buf
    }
}

impl<B: DrawBuf + ?Sized> DerefMut for DrawStateGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.buf
    }
}

impl<B: DrawBuf + ?Sized> Drop for DrawStateGuard<'_, B> {
    fn drop(&mut self) {
        self.buf.state_mut().clip = self.clip;
        self.buf.set_alpha(self.alpha);
    }
}

/* ==== Cohen–Sutherland ==== */

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

/// Out-code against the inclusive pixel range of `r`.
fn out_code(r: &Rect, x: i64, y: i64) -> u8 {
    let mut code = INSIDE;
    if x < r.left as i64 {
        code |= LEFT;
    } else if x > r.right as i64 - 1 {
        code |= RIGHT;
    }
    if y < r.top as i64 {
        code |= TOP;
    } else if y > r.bottom as i64 - 1 {
        code |= BOTTOM;
    }
    code
}

/// Clips the segment `p0..=p1` to the pixels of `r`.
pub fn clip_line(r: &Rect, p0: Point, p1: Point) -> Option<(Point, Point)> {
    if r.is_empty() {
        return None;
    }
    let (xmin, ymin) = (r.left as i64, r.top as i64);
    let (xmax, ymax) = (r.right as i64 - 1, r.bottom as i64 - 1);
    let (mut x0, mut y0, mut x1, mut y1) = (p0.x as i64, p0.y as i64, p1.x as i64, p1.y as i64);
    let mut c0 = out_code(r, x0, y0);
    let mut c1 = out_code(r, x1, y1);

    // each pass moves one endpoint onto a clip edge; four edges bound it
    for _ in 0..8 {
        if c0 | c1 == INSIDE {
            return Some((Point::new(x0 as i32, y0 as i32), Point::new(x1 as i32, y1 as i32)));
        }
        if c0 & c1 != INSIDE {
            return None;
        }
        let out = if c0 != INSIDE { c0 } else { c1 };
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (x, y) = if out & TOP != 0 {
            (x0 + dx * (ymin - y0) / dy, ymin)
        } else if out & BOTTOM != 0 {
            (x0 + dx * (ymax - y0) / dy, ymax)
        } else if out & RIGHT != 0 {
            (xmax, y0 + dy * (xmax - x0) / dx)
        } else {
            (xmin, y0 + dy * (xmin - x0) / dx)
        };
        if out == c0 {
            (x0, y0) = (x, y);
            c0 = out_code(r, x0, y0);
        } else {
            (x1, y1) = (x, y);
            c1 = out_code(r, x1, y1);
        }
    }
    None
}

/* ==== Sutherland–Hodgman ==== */

#[derive(Clone, Copy)]
enum Edge {
    Left(f32),
    Right(f32),
    Top(f32),
    Bottom(f32),
}

impl Edge {
    fn inside(self, p: PointF) -> bool {
        match self {
            Edge::Left(v) => p.x >= v,
            Edge::Right(v) => p.x <= v,
            Edge::Top(v) => p.y >= v,
            Edge::Bottom(v) => p.y <= v,
        }
    }

    fn intersect(self, a: PointF, b: PointF) -> PointF {
        match self {
            Edge::Left(v) | Edge::Right(v) => {
                let t = (v - a.x) / (b.x - a.x);
                PointF::new(v, a.y + (b.y - a.y) * t)
            }
            Edge::Top(v) | Edge::Bottom(v) => {
                let t = (v - a.y) / (b.y - a.y);
                PointF::new(a.x + (b.x - a.x) * t, v)
            }
        }
    }
}

/// Clips a convex polygon to `r`. Output may be empty.
pub fn clip_convex(points: &[PointF], r: &RectF) -> Vec<PointF> {
    if r.is_empty() {
        return Vec::new();
    }
    let mut poly: Vec<PointF> = points.to_vec();
    for edge in [
        Edge::Left(r.left),
        Edge::Right(r.right),
        Edge::Top(r.top),
        Edge::Bottom(r.bottom),
    ] {
        if poly.is_empty() {
            break;
        }
        let input = std::mem::take(&mut poly);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            match (edge.inside(prev), edge.inside(cur)) {
                (true, true) => poly.push(cur),
                (true, false) => poly.push(edge.intersect(prev, cur)),
                (false, true) => {
                    poly.push(edge.intersect(prev, cur));
                    poly.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }
    }
    poly
}

/// Clips a triangle to `r`, returning 0..=5 triangles fanned from the
/// clipped polygon (each clipped corner adds at most one).
pub fn clip_triangle(tri: [PointF; 3], r: &RectF) -> Vec<[PointF; 3]> {
    let all_inside = tri
        .iter()
        .all(|p| p.x >= r.left && p.x <= r.right && p.y >= r.top && p.y <= r.bottom);
    if all_inside {
        return vec![tri];
    }
    let poly = clip_convex(&tri, r);
    if poly.len() < 3 {
        return Vec::new();
    }
    (1..poly.len() - 1)
        .map(|i| [poly[0], poly[i], poly[i + 1]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::raster::argb::ArgbBuf;
    use crate::engine::types::Color;

    #[test]
    fn guard_restores_state() {
        let mut buf = ArgbBuf::new(20, 20);
        {
            let mut g = DrawStateGuard::new(&mut buf);
            g.intersect_clip_rect(Rect::new(5, 5, 10, 10));
            g.add_alpha(128);
            {
                let mut inner = DrawStateGuard::new(&mut *g);
                inner.intersect_clip_rect(Rect::new(0, 0, 7, 7));
                assert_eq!(inner.clip_rect(), Rect::new(5, 5, 7, 7));
            }
            assert_eq!(g.clip_rect(), Rect::new(5, 5, 10, 10));
            assert_eq!(g.alpha(), 128);
            g.fill_rect(Rect::new(0, 0, 20, 20), Color::BLACK);
        }
        assert_eq!(buf.clip_rect(), buf.bounds());
        assert_eq!(buf.alpha(), 255);
        assert_eq!(buf.pixel(4, 4), Color::TRANSPARENT);
        assert_eq!(buf.pixel(5, 5).3, 128);
    }

    #[test]
    fn line_inside_is_untouched() {
        let r = Rect::new(0, 0, 10, 10);
        let l = clip_line(&r, Point::new(1, 1), Point::new(8, 3));
        assert_eq!(l, Some((Point::new(1, 1), Point::new(8, 3))));
    }

    #[test]
    fn line_crossing_is_cut_to_edges() {
        let r = Rect::new(0, 0, 10, 10);
        let (a, b) = clip_line(&r, Point::new(-10, 5), Point::new(20, 5)).unwrap();
        assert_eq!((a, b), (Point::new(0, 5), Point::new(9, 5)));
        let (a, b) = clip_line(&r, Point::new(-5, -5), Point::new(15, 15)).unwrap();
        assert_eq!((a, b), (Point::new(0, 0), Point::new(9, 9)));
    }

    #[test]
    fn line_outside_is_rejected() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(clip_line(&r, Point::new(-5, -1), Point::new(20, -1)).is_none());
        assert!(clip_line(&r, Point::new(12, -3), Point::new(20, 5)).is_none());
        assert!(clip_line(&Rect::default(), Point::new(0, 0), Point::new(1, 1)).is_none());
    }

    #[test]
    fn triangle_corner_clip_adds_pieces() {
        let r = RectF::new(0.0, 0.0, 10.0, 10.0);
        let inside = [PointF::new(1.0, 1.0), PointF::new(5.0, 1.0), PointF::new(1.0, 5.0)];
        assert_eq!(clip_triangle(inside, &r).len(), 1);

        // one corner sticks out past the right edge
        let tri = [PointF::new(2.0, 2.0), PointF::new(14.0, 5.0), PointF::new(2.0, 8.0)];
        let pieces = clip_triangle(tri, &r);
        assert_eq!(pieces.len(), 2);
        for t in &pieces {
            for p in t {
                assert!(p.x <= 10.0 + 1e-4);
            }
        }

        let outside = [PointF::new(20.0, 20.0), PointF::new(30.0, 20.0), PointF::new(20.0, 30.0)];
        assert!(clip_triangle(outside, &r).is_empty());
    }
}
