//! Filled and stroked shapes on a half-transparent layer.

use anyhow::Result;
use glyphline::engine::raster::{ArgbBuf, CornerRadii, DrawBuf, VectorDraw};
use glyphline::engine::types::{Color, Point, PointF, RectF};
use glyphline::platform::image::save_png;
use std::path::Path;

fn star(cx: f32, cy: f32, r: f32) -> Vec<PointF> {
    (0..10)
        .map(|i| {
            let a = std::f32::consts::PI * i as f32 / 5.0 - std::f32::consts::FRAC_PI_2;
            let rr = if i % 2 == 0 { r } else { r * 0.45 };
            PointF::new(cx + rr * a.cos(), cy + rr * a.sin())
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let mut buf = ArgbBuf::new(240, 160);
    buf.clear(Color::WHITE);

    buf.fill_polygon(&star(60.0, 60.0, 50.0), Color::rgb(240, 180, 0));
    buf.draw_polyline(&star(60.0, 60.0, 50.0), 2.0, Color::BLACK, true);

    buf.set_alpha(160);
    buf.fill_rounded_rect(
        RectF::new(100.0, 20.0, 220.0, 100.0),
        CornerRadii::uniform(16.0),
        Color::BLUE,
    );
    buf.set_alpha(255);
    buf.stroke_ellipse(PointF::new(160.0, 120.0), 60.0, 24.0, 3.0, Color::RED);
    buf.draw_line(Point::new(0, 159), Point::new(239, 0), Color::GREEN);

    save_png(&buf, Path::new("polygon_draw.png"))?;
    Ok(())
}
