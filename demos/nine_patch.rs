//! Builds a 9-patch image in memory and stretches it to several sizes.

use anyhow::{Result, bail};
use glyphline::engine::raster::{ArgbBuf, Blit, DrawBuf};
use glyphline::engine::types::{Color, Rect};
use glyphline::platform::image::save_png;
use std::path::Path;

/// 12x12 image: 1px marker border, 10x10 content with 3px corners.
fn button() -> ArgbBuf {
    let mut img = ArgbBuf::new(12, 12);
    img.fill_rect(Rect::new(1, 1, 11, 11), Color::rgb(90, 120, 200));
    img.fill_rect(Rect::new(4, 4, 8, 8), Color::rgb(170, 190, 240));
    // stretch markers on all four edges
    img.fill_rect(Rect::new(4, 0, 8, 1), Color::BLACK);
    img.fill_rect(Rect::new(0, 4, 1, 8), Color::BLACK);
    img.fill_rect(Rect::new(4, 11, 8, 12), Color::BLACK);
    img.fill_rect(Rect::new(11, 4, 12, 8), Color::BLACK);
    img
}

fn main() -> Result<()> {
    env_logger::init();

    let mut src = button();
    if !src.detect_nine_patch() {
        bail!("markers were not recognised");
    }
    log::info!("nine patch: {:?}", src.nine_patch());

    let mut buf = ArgbBuf::new(220, 80);
    buf.clear(Color::WHITE);
    buf.draw_nine_patch(Rect::from_xywh(10, 10, 40, 20), &src);
    buf.draw_nine_patch(Rect::from_xywh(60, 10, 150, 30), &src);
    buf.draw_nine_patch(Rect::from_xywh(10, 50, 4, 4), &src);

    save_png(&buf, Path::new("nine_patch.png"))?;
    Ok(())
}
