use anyhow::{Context, Result};
use glyphline::engine::raster::{ArgbBuf, CornerRadii, DrawBuf, VectorDraw};
use glyphline::engine::text::{
    DecorLine, FallbackFontProvider, FontDescription, FontProvider, FontProviderRef, LineMarkup,
    SimpleText, TextAlign, TextAttr, TextDecoration, TextHotkey, TextOverflow, TextStyle,
};
use glyphline::engine::types::{Color, Rect, RectF};
use glyphline::platform::{font::FontdueProvider, image::save_png};
use std::env;
use std::path::PathBuf;
use std::rc::Rc;

const SAMPLE: &str = "Glyphline &renders\ttabbed, wrapped and decorated text into plain pixel buffers.\n\
A second paragraph that is long enough to be cut short with an ellipsis at the end";

fn fonts() -> FontProviderRef {
    match FontdueProvider::from_system() {
        Ok(p) => Rc::new(p),
        Err(e) => {
            log::warn!("falling back to the built-in font: {}", e);
            Rc::new(FallbackFontProvider::new())
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let output = PathBuf::from(args.get(1).map_or("glyphline.png", String::as_str));
    let width: i32 = match args.get(2) {
        Some(w) => w.parse().with_context(|| format!("invalid width {:?}", w))?,
        None => 360,
    };

    let fonts = fonts();
    let font = fonts
        .font(&FontDescription::default())
        .context("no font available")?;

    let mut style = TextStyle::new(font);
    style.fonts = Some(fonts.clone());
    style.hotkey = TextHotkey::Underline;
    style.align = TextAlign::Start;
    style.overflow = TextOverflow::Ellipsis;

    let mut text = SimpleText::new(SAMPLE);
    let mut markup = LineMarkup::new();
    markup.set(0, 9, TextAttr::FontSize(20));
    markup.set(10, 7, TextAttr::Foreground(Color::BLUE));
    markup.set(
        19,
        6,
        TextAttr::Decoration(TextDecoration::new(DecorLine::UNDER)),
    );
    text.set_markup(0, Rc::new(markup));

    text.measure(&style.layout());
    let pad = 12;
    let inner = width - pad * 2;
    let height = text.wrap(inner) + pad * 2;

    let mut buf = ArgbBuf::new(width, height);
    buf.clear(Color::WHITE);
    buf.fill_rounded_rect(
        RectF::from(Rect::from_xywh(2, 2, width - 4, height - 4)),
        CornerRadii::uniform(8.0),
        Color::rgb(240, 244, 250),
    );
    let painted = text.draw(&mut buf, pad, pad, inner, &style);
    log::info!("painted {} px of text into {}x{}", painted, width, height);

    save_png(&buf, &output).with_context(|| format!("failed to write {}", output.display()))?;
    println!("{}", output.display());
    Ok(())
}
