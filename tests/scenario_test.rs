use glyphline::engine::raster::{ArgbBuf, DrawBuf};
use glyphline::engine::text::markup::resolve;
use glyphline::engine::text::{
    FallbackFont, FontRef, LineMarkup, TextAttr, TextLayoutStyle, TextLine, TextStyle,
};
use glyphline::engine::types::{Color, Rect};

/// 10px glyphs and 10px spaces.
fn font() -> FontRef {
    FallbackFont::with_metrics(10, 10, 10).into_ref()
}

fn widths(line: &TextLine) -> Vec<i32> {
    line.glyphs().iter().map(|g| g.width).collect()
}

#[test]
fn tab_advances_to_next_stop() {
    let mut st = TextLayoutStyle::new(font());
    st.tab_size = 4;
    let mut line = TextLine::new("a\tb");
    let size = line.measure(&st);
    assert_eq!(widths(&line), vec![10, 30, 10]);
    assert_eq!(size.width, 50);
    assert!(line.glyphs()[1].glyph.is_none());
}

#[test]
fn tab_at_a_stop_takes_a_full_stop() {
    let mut st = TextLayoutStyle::new(font());
    st.tab_size = 2;
    let mut line = TextLine::new("ab\tc");
    line.measure(&st);
    // already at x=20, the 20px stop width is still consumed
    assert_eq!(widths(&line), vec![10, 10, 20, 10]);
}

#[test]
fn wraps_after_last_fitting_word() {
    let st = TextLayoutStyle::new(font());
    let mut line = TextLine::new("hello world foo");
    line.measure(&st);
    assert_eq!(line.size().width, 150);
    line.wrap(120);

    let rows: Vec<String> = line
        .spans()
        .iter()
        .map(|s| line.text()[s.start..s.end].iter().collect())
        .collect();
    assert_eq!(rows, vec!["hello world ", "foo"]);
    assert_eq!(line.spans()[0].width, 110);
    assert_eq!(line.spans()[1].width, 30);
}

#[test]
fn nested_markup_overrides_then_restores() {
    let mut markup = LineMarkup::new();
    markup.set(0, 10, TextAttr::Foreground(Color::RED));
    markup.set(2, 3, TextAttr::Foreground(Color::BLUE));
    markup.prepare();

    let base = TextStyle::new(font());
    let mut frags = Vec::new();
    resolve(markup.units(), 0, 10, &base, &mut |s, e, st: &TextStyle| {
        frags.push((s, e, st.color))
    });
    assert_eq!(
        frags,
        vec![(0, 2, Color::RED), (2, 5, Color::BLUE), (5, 10, Color::RED)]
    );
}

#[test]
fn fill_is_limited_to_clip() {
    let mut buf = ArgbBuf::new(100, 100);
    buf.set_clip_rect(Rect::new(50, 50, 200, 200));
    assert_eq!(buf.clip_rect(), Rect::new(50, 50, 100, 100));
    buf.fill_rect(Rect::new(0, 0, 100, 100), Color::RED);

    for y in 0..100 {
        for x in 0..100 {
            let expected = if x >= 50 && y >= 50 {
                Color::RED
            } else {
                Color::TRANSPARENT
            };
            assert_eq!(buf.pixel(x, y), expected, "pixel ({x}, {y})");
        }
    }
}
