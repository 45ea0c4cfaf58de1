use glyphline::engine::raster::{ArgbBuf, DrawBuf};
use glyphline::engine::text::{FontDescription, FontProvider, TextLine, TextStyle};
use glyphline::engine::types::Color;
use glyphline::platform::font::{FontdueProvider, default_font_path};

#[test]
fn system_font_measures_and_draws() {
    let path = match default_font_path() {
        Some(p) => p,
        None => {
            eprintln!("skipping system font test: no system font found");
            return;
        }
    };
    let bytes = std::fs::read(&path).expect("read font");
    let mut provider = FontdueProvider::new();
    provider
        .load_from_bytes("t", Default::default(), &bytes)
        .expect("load font");

    let font = provider
        .font(&FontDescription {
            size_px: 16,
            ..Default::default()
        })
        .expect("font");
    assert!(font.height() > 0);
    assert!(font.baseline() > 0 && font.baseline() <= font.height());

    let style = TextStyle::new(font);
    let mut line = TextLine::new("Hello, world!");
    let size = line.measure(&style.layout());
    println!("measured w={} h={}", size.width, size.height);
    assert!(size.width > 0);

    let mut buf = ArgbBuf::new(size.width + 4, size.height);
    line.draw(&mut buf, 2, 0, size.width, &style);
    let inked = buf.pixels().iter().filter(|&&p| Color::from_argb(p).alpha() > 0).count();
    assert!(inked > 0);
}

#[test]
fn same_description_returns_same_font() {
    let Some(path) = default_font_path() else {
        eprintln!("skipping system font test: no system font found");
        return;
    };
    let mut provider = FontdueProvider::new();
    provider
        .load_file(&path, Default::default())
        .expect("load font");
    let d = FontDescription::default();
    let a = provider.font(&d).expect("font");
    let b = provider.font(&d).expect("font");
    assert!(std::rc::Rc::ptr_eq(&a, &b));
}
