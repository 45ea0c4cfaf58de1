//! Draws one line three times into narrow boxes: clipped, tail ellipsis, middle ellipsis.

use anyhow::{Context, Result};
use glyphline::engine::raster::{ArgbBuf, DrawBuf, DrawStateGuard};
use glyphline::engine::text::{FallbackFont, TextLine, TextOverflow, TextStyle};
use glyphline::engine::types::{Color, Insets, Rect};
use glyphline::platform::image::save_png;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let mut buf = ArgbBuf::new(200, 90);
    buf.clear(Color::WHITE);

    let mut style = TextStyle::new(FallbackFont::new(14).into_ref());
    let modes = [TextOverflow::Clip, TextOverflow::Ellipsis, TextOverflow::EllipsisMiddle];
    for (i, mode) in modes.into_iter().enumerate() {
        style.overflow = mode;
        let y = 8 + i as i32 * 26;
        let frame = Rect::from_xywh(8, y, 120, 20);
        buf.draw_frame(frame, Color::rgb(200, 200, 200), Insets::uniform(1));

        let mut guard = DrawStateGuard::new(&mut buf);
        guard.intersect_clip_rect(frame);
        let mut line = TextLine::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf");
        line.measure(&style.layout());
        line.draw(&mut *guard, 10, y + 2, 116, &style);
    }

    let out = Path::new("text_clip.png");
    save_png(&buf, out).with_context(|| format!("writing {}", out.display()))?;
    log::info!("wrote {}", out.display());
    Ok(())
}
