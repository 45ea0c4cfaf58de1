//! Vector primitives, CPU scanline based.
//!
//! Every shape is reduced to triangles clipped against the clip rect, then
//! scan-converted with pixel-center sampling over half-open spans, so
//! triangles sharing an edge never double-blend a pixel.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::clip::{clip_line, clip_triangle};
use super::draw_buf::DrawBuf;
use crate::engine::types::{Color, Point, PointF, Rect, RectF};

/// Corner radii of a rounded rect, clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub const fn uniform(r: f32) -> Self {
        Self {
            top_left: r,
            top_right: r,
            bottom_right: r,
            bottom_left: r,
        }
    }

    /// Clamps every radius so no two corners on one side overlap.
    pub fn clamped(&self, width: f32, height: f32) -> Self {
        let limit = (width / 2.0).min(height / 2.0).max(0.0);
        let c = |r: f32| if r.is_finite() { r.clamp(0.0, limit) } else { 0.0 };
        Self {
            top_left: c(self.top_left),
            top_right: c(self.top_right),
            bottom_right: c(self.bottom_right),
            bottom_left: c(self.bottom_left),
        }
    }
}

/* ==== geometry helpers ==== */

const EPS: f32 = 1e-4;

fn is_finite(p: PointF) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Intersection of the infinite lines `p + t*d` and `q + s*e`.
pub fn line_intersection(p: PointF, d: PointF, q: PointF, e: PointF) -> Option<PointF> {
    let denom = d.cross(e);
    if denom.abs() < EPS {
        return None;
    }
    let t = q.sub(p).cross(e) / denom;
    Some(p.add(d.scale(t)))
}

fn signed_area(points: &[PointF]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].cross(points[(i + 1) % n]))
        .sum::<f32>()
        / 2.0
}

fn in_triangle(p: PointF, a: PointF, b: PointF, c: PointF) -> bool {
    let d1 = b.sub(a).cross(p.sub(a));
    let d2 = c.sub(b).cross(p.sub(b));
    let d3 = a.sub(c).cross(p.sub(c));
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}

/// Drops non-finite points and consecutive duplicates; with `closed`, also
/// a last point repeating the first.
fn dedup_points(points: &[PointF], closed: bool) -> Vec<PointF> {
    let mut out: Vec<PointF> = Vec::with_capacity(points.len());
    for &p in points {
        if !is_finite(p) {
            continue;
        }
        if out.last().is_none_or(|q| q.sub(p).length() > EPS) {
            out.push(p);
        }
    }
    while closed && out.len() > 1 && out[0].sub(out[out.len() - 1]).length() <= EPS {
        out.pop();
    }
    out
}

/// Ear-clipping triangulation of a simple polygon.
///
/// Self-intersecting input stops finding ears; the remainder is fanned.
pub fn triangulate(points: &[PointF]) -> Vec<[PointF; 3]> {
    let mut pts = dedup_points(points, true);
    if pts.len() < 3 {
        return Vec::new();
    }
    if signed_area(&pts) < 0.0 {
        pts.reverse();
    }
    let mut idx: Vec<usize> = (0..pts.len()).collect();
    let mut tris = Vec::with_capacity(pts.len() - 2);

    while idx.len() > 3 {
        let m = idx.len();
        let mut clipped = false;
        for i in 0..m {
            let (ia, ib, ic) = (idx[(i + m - 1) % m], idx[i], idx[(i + 1) % m]);
            let (a, b, c) = (pts[ia], pts[ib], pts[ic]);
            let cross = b.sub(a).cross(c.sub(b));
            if cross.abs() <= EPS {
                // collinear vertex adds no area
                idx.remove(i);
                clipped = true;
                break;
            }
            if cross < 0.0 {
                continue;
            }
            let blocked = idx
                .iter()
                .filter(|&&j| j != ia && j != ib && j != ic)
                .any(|&j| in_triangle(pts[j], a, b, c));
            if blocked {
                continue;
            }
            tris.push([a, b, c]);
            idx.remove(i);
            clipped = true;
            break;
        }
        if !clipped {
            for k in 1..idx.len() - 1 {
                tris.push([pts[idx[0]], pts[idx[k]], pts[idx[k + 1]]]);
            }
            return tris;
        }
    }
    let (a, b, c) = (pts[idx[0]], pts[idx[1]], pts[idx[2]]);
    if b.sub(a).cross(c.sub(b)).abs() > EPS {
        tris.push([a, b, c]);
    }
    tris
}

fn arc_steps(r: f32) -> usize {
    ((r * 0.75).ceil() as usize).clamp(2, 32)
}

fn push_arc(out: &mut Vec<PointF>, center: PointF, rx: f32, ry: f32, from: f32, sweep: f32) {
    if rx <= 0.0 || ry <= 0.0 {
        out.push(center);
        return;
    }
    let n = arc_steps(rx.max(ry));
    for i in 0..=n {
        let t = from + sweep * i as f32 / n as f32;
        out.push(PointF::new(center.x + rx * t.cos(), center.y + ry * t.sin()));
    }
}

/// Outline of a rounded rect, clockwise on screen, starting at the top-left arc.
pub fn rounded_rect_path(rect: RectF, radii: CornerRadii) -> Vec<PointF> {
    if rect.is_empty() {
        return Vec::new();
    }
    let r = radii.clamped(rect.width(), rect.height());
    let mut path = Vec::new();
    let (l, t, rt, b) = (rect.left, rect.top, rect.right, rect.bottom);
    let tl = r.top_left;
    push_arc(&mut path, PointF::new(l + tl, t + tl), tl, tl, PI, FRAC_PI_2);
    let tr = r.top_right;
    push_arc(&mut path, PointF::new(rt - tr, t + tr), tr, tr, PI * 1.5, FRAC_PI_2);
    let br = r.bottom_right;
    push_arc(&mut path, PointF::new(rt - br, b - br), br, br, 0.0, FRAC_PI_2);
    let bl = r.bottom_left;
    push_arc(&mut path, PointF::new(l + bl, b - bl), bl, bl, FRAC_PI_2, FRAC_PI_2);
    dedup_points(&path, true)
}

pub fn ellipse_path(center: PointF, rx: f32, ry: f32) -> Vec<PointF> {
    if !(rx > 0.0 && ry > 0.0) || !is_finite(center) {
        return Vec::new();
    }
    let n = ((rx.max(ry) * 1.5).ceil() as usize).clamp(12, 180);
    (0..n)
        .map(|i| {
            let t = TAU * i as f32 / n as f32;
            PointF::new(center.x + rx * t.cos(), center.y + ry * t.sin())
        })
        .collect()
}

/// Outline of a polyline stroked `width` wide, as triangles.
///
/// Joints are mitered where the miter stays within four half-widths of the
/// joint; sharper corners get a bevel instead.
pub fn stroke_triangles(points: &[PointF], width: f32, closed: bool) -> Vec<[PointF; 3]> {
    let pts = dedup_points(points, closed);
    if pts.len() < 2 || !(width > 0.0) {
        return Vec::new();
    }
    let hw = width / 2.0;
    let seg_count = if closed && pts.len() > 2 { pts.len() } else { pts.len() - 1 };
    let seg = |i: usize| (pts[i], pts[(i + 1) % pts.len()]);

    // per segment: direction and offset normal
    let mut dirs = Vec::with_capacity(seg_count);
    for i in 0..seg_count {
        let (a, b) = seg(i);
        match b.sub(a).normalized() {
            Some(d) => dirs.push(d),
            None => return Vec::new(),
        }
    }
    let normal = |i: usize| dirs[i].perp().scale(hw);

    // outline points at the start and end of every segment
    let mut starts = vec![(PointF::default(), PointF::default()); seg_count];
    let mut ends = starts.clone();
    let mut tris = Vec::new();

    for i in 0..seg_count {
        let (a, b) = seg(i);
        let n = normal(i);
        starts[i] = (a.add(n), a.sub(n));
        ends[i] = (b.add(n), b.sub(n));
    }

    let joint_count = if closed && pts.len() > 2 { seg_count } else { seg_count - 1 };
    for j in 0..joint_count {
        let (prev, next) = (j, (j + 1) % seg_count);
        let p = seg(next).0;
        let (np, nn) = (normal(prev), normal(next));
        let left = line_intersection(p.add(np), dirs[prev], p.add(nn), dirs[next]);
        let right = line_intersection(p.sub(np), dirs[prev], p.sub(nn), dirs[next]);
        match (left, right) {
            (Some(l), Some(r))
                if l.sub(p).length() <= hw * 4.0 && r.sub(p).length() <= hw * 4.0 =>
            {
                ends[prev] = (l, r);
                starts[next] = (l, r);
            }
            _ => {
                // bevel: fill the wedge on both sides, the inner one is covered anyway
                tris.push([p, p.add(np), p.add(nn)]);
                tris.push([p, p.sub(nn), p.sub(np)]);
            }
        }
    }

    for i in 0..seg_count {
        let (sl, sr) = starts[i];
        let (el, er) = ends[i];
        tris.push([sl, el, er]);
        tris.push([sl, er, sr]);
    }
    tris
}

/* ==== rasterization ==== */

/// Vector drawing, available on every [`DrawBuf`].
pub trait VectorDraw: DrawBuf {
    /// 1px Bresenham line, both endpoints included.
    fn draw_line(&mut self, p0: Point, p1: Point, color: Color) {
        let color = self.apply_alpha(color);
        if color.is_transparent() {
            return;
        }
        let Some((a, b)) = clip_line(&self.clip_rect(), p0, p1) else {
            return;
        };
        let (dx, dy) = ((b.x - a.x).abs(), -(b.y - a.y).abs());
        let (sx, sy) = (if a.x < b.x { 1 } else { -1 }, if a.y < b.y { 1 } else { -1 });
        let (mut x, mut y, mut err) = (a.x, a.y, dx + dy);
        loop {
            self.blend_pixel(x, y, color);
            if x == b.x && y == b.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fills one triangle clipped to the clip rect.
    fn fill_triangle(&mut self, a: PointF, b: PointF, c: PointF, color: Color) {
        let color = self.apply_alpha(color);
        if color.is_transparent() || ![a, b, c].into_iter().all(is_finite) {
            return;
        }
        let clip = self.clip_rect();
        if clip.is_empty() {
            return;
        }
        let clip: RectF = clip.into();
        for tri in clip_triangle([a, b, c], &clip) {
            scan_triangle(self, tri, color);
        }
    }

    /// Fills a simple polygon by ear clipping.
    fn fill_polygon(&mut self, points: &[PointF], color: Color) {
        let color = self.apply_alpha(color);
        if color.is_transparent() || self.clip_rect().is_empty() {
            return;
        }
        let clip: RectF = self.clip_rect().into();
        for tri in triangulate(points) {
            for piece in clip_triangle(tri, &clip) {
                scan_triangle(self, piece, color);
            }
        }
    }

    /// Thick line with square-cut ends.
    fn draw_thick_line(&mut self, p0: PointF, p1: PointF, width: f32, color: Color) {
        self.draw_polyline(&[p0, p1], width, color, false);
    }

    fn draw_polyline(&mut self, points: &[PointF], width: f32, color: Color, closed: bool) {
        let color = self.apply_alpha(color);
        if color.is_transparent() || self.clip_rect().is_empty() {
            return;
        }
        let clip: RectF = self.clip_rect().into();
        // joint triangles overlap, so merge coverage per row before blending
        let tris = stroke_triangles(points, width, closed);
        if tris.is_empty() {
            return;
        }
        let mut mask = SpanMask::new(self.clip_rect());
        for tri in tris {
            for piece in clip_triangle(tri, &clip) {
                mask.add_triangle(piece);
            }
        }
        mask.flush(self, color);
    }

    fn fill_rounded_rect(&mut self, rect: RectF, radii: CornerRadii, color: Color) {
        let path = rounded_rect_path(rect, radii);
        self.fill_polygon(&path, color);
    }

    fn stroke_rounded_rect(&mut self, rect: RectF, radii: CornerRadii, width: f32, color: Color) {
        let path = rounded_rect_path(rect, radii);
        self.draw_polyline(&path, width, color, true);
    }

    fn fill_ellipse(&mut self, center: PointF, rx: f32, ry: f32, color: Color) {
        let path = ellipse_path(center, rx, ry);
        self.fill_polygon(&path, color);
    }

    fn stroke_ellipse(&mut self, center: PointF, rx: f32, ry: f32, width: f32, color: Color) {
        let path = ellipse_path(center, rx, ry);
        self.draw_polyline(&path, width, color, true);
    }
}

impl<T: DrawBuf + ?Sized> VectorDraw for T {}

/// Horizontal pixel span `[x0, x1)` covered by a triangle on row `y`,
/// sampling at pixel centers.
fn triangle_row(tri: &[PointF; 3], y: i32) -> Option<(i32, i32)> {
    let yc = y as f32 + 0.5;
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for i in 0..3 {
        let (mut p, mut q) = (tri[i], tri[(i + 1) % 3]);
        if p.y > q.y {
            std::mem::swap(&mut p, &mut q);
        }
        if p.y == q.y || yc < p.y || yc >= q.y {
            continue;
        }
        let x = p.x + (yc - p.y) * (q.x - p.x) / (q.y - p.y);
        lo = lo.min(x);
        hi = hi.max(x);
    }
    if lo > hi {
        return None;
    }
    let x0 = (lo - 0.5).ceil() as i32;
    let x1 = (hi - 0.5).ceil() as i32;
    (x0 < x1).then_some((x0, x1))
}

fn triangle_rows(tri: &[PointF; 3]) -> (i32, i32) {
    let min_y = tri.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = tri.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    ((min_y - 0.5).ceil() as i32, (max_y - 0.5).ceil() as i32)
}

fn scan_triangle<B: DrawBuf + ?Sized>(buf: &mut B, tri: [PointF; 3], color: Color) {
    let (y0, y1) = triangle_rows(&tri);
    for y in y0..y1 {
        if let Some((x0, x1)) = triangle_row(&tri, y) {
            buf.fill_span(y, x0, x1, color);
        }
    }
}

/// Per-row coverage of a set of triangles, merged so overlaps blend once.
struct SpanMask {
    top: i32,
    rows: Vec<Vec<(i32, i32)>>,
}

impl SpanMask {
    fn new(clip: Rect) -> Self {
        Self {
            top: clip.top,
            rows: vec![Vec::new(); clip.height().max(0) as usize],
        }
    }

    fn add_triangle(&mut self, tri: [PointF; 3]) {
        let (y0, y1) = triangle_rows(&tri);
        for y in y0..y1 {
            let Some(row) = usize::try_from(y - self.top)
                .ok()
                .and_then(|i| self.rows.get_mut(i))
            else {
                continue;
            };
            if let Some(span) = triangle_row(&tri, y) {
                row.push(span);
            }
        }
    }

    fn flush<B: DrawBuf + ?Sized>(mut self, buf: &mut B, color: Color) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            if row.is_empty() {
                continue;
            }
            row.sort_unstable();
            let y = self.top + i as i32;
            let (mut s, mut e) = row[0];
            for &(a, b) in &row[1..] {
                if a <= e {
                    e = e.max(b);
                } else {
                    buf.fill_span(y, s, e, color);
                    (s, e) = (a, b);
                }
            }
            buf.fill_span(y, s, e, color);
        }
    }
}
