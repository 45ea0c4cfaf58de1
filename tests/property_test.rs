use glyphline::engine::raster::{ArgbBuf, DrawBuf, VectorDraw};
use glyphline::engine::text::render::{alignment_offset, elide};
use glyphline::engine::text::{
    FallbackFont, FontRef, TextAlign, TextLayoutStyle, TextLine, TextOverflow, TextStyle,
};
use glyphline::engine::types::{Color, Point, PointF, Rect};
use proptest::prelude::*;

fn font(char_w: i32, space_w: i32) -> FontRef {
    FallbackFont::with_metrics(12, char_w, space_w).into_ref()
}

fn measured(text: &str, char_w: i32, space_w: i32) -> TextLine {
    let mut line = TextLine::new(text);
    line.measure(&TextLayoutStyle::new(font(char_w, space_w)));
    line
}

proptest! {
    #[test]
    fn wrap_spans_partition_the_line(
        text in "[a-z ]{1,60}",
        char_w in 1i32..16,
        space_w in 1i32..10,
        box_width in 1i32..200,
    ) {
        let mut line = measured(&text, char_w, space_w);
        line.wrap(box_width);
        let spans = line.spans();
        prop_assert_eq!(spans[0].start, 0);
        prop_assert_eq!(spans[spans.len() - 1].end, line.len());
        for pair in spans.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
            prop_assert!(pair[0].start < pair[0].end);
        }
    }

    #[test]
    fn wrap_is_idempotent(text in "[a-z ]{1,60}", box_width in 1i32..200) {
        let mut line = measured(&text, 7, 4);
        line.wrap(box_width);
        let first = line.spans().to_vec();
        let passes = line.wrap_passes();
        line.wrap(box_width);
        prop_assert_eq!(line.spans(), &first[..]);
        prop_assert_eq!(line.wrap_passes(), passes);
    }

    #[test]
    fn hit_test_round_trips(text in "[a-zA-Z ]{0,40}", char_w in 1i32..16, space_w in 1i32..10) {
        let line = measured(&text, char_w, space_w);
        for i in 0..=line.len() {
            let r = line.text_pos_to_client(i);
            prop_assert_eq!(line.client_to_text_pos(Point::new(r.left, r.top)), i);
        }
    }

    #[test]
    fn equal_widths_need_no_alignment(width in 0i32..10_000) {
        for align in [TextAlign::Start, TextAlign::Center, TextAlign::End, TextAlign::Justify] {
            prop_assert_eq!(alignment_offset(align, width, width), 0);
        }
    }

    #[test]
    fn ellipsis_stays_inside_the_box(
        text in "[a-z ]{2,40}",
        char_w in 1i32..16,
        box_width in 0i32..200,
    ) {
        let line = measured(&text, char_w, 5);
        prop_assume!(box_width < line.size().width);
        let ellipsis_w = char_w;
        let e = elide(line.glyphs(), box_width, TextOverflow::Ellipsis, ellipsis_w);
        if let Some(ex) = e.ellipsis_x {
            let head: i32 = line.glyphs()[..e.head_end].iter().map(|g| g.width).sum();
            prop_assert_eq!(head, ex);
            prop_assert!(ex + ellipsis_w <= box_width);
        } else {
            prop_assert_eq!(e.head_end, 0);
        }
    }

    #[test]
    fn drawn_ellipsis_never_passes_the_box(text in "[a-z]{5,30}", box_width in 1i32..120) {
        let mut style = TextStyle::new(font(8, 4));
        style.overflow = TextOverflow::Ellipsis;
        let mut line = TextLine::new(&text);
        line.measure(&style.layout());
        prop_assume!(box_width < line.size().width);

        let mut buf = ArgbBuf::new(300, 20);
        line.draw(&mut buf, 0, 0, box_width, &style);
        for y in 0..20 {
            for x in box_width..300 {
                prop_assert_eq!(buf.pixel(x, y), Color::TRANSPARENT);
            }
        }
    }

    #[test]
    fn drawing_stays_inside_clip(
        cl in -40i32..80, ct in -40i32..80, cw in -10i32..80, ch in -10i32..80,
        x0 in -50i32..100, y0 in -50i32..100, x1 in -50i32..100, y1 in -50i32..100,
        prim in 0u8..5,
    ) {
        let mut buf = ArgbBuf::new(48, 40);
        let clip = Rect::from_xywh(cl, ct, cw, ch);
        buf.set_clip_rect(clip);
        let allowed = clip.intersect(&buf.bounds());
        let (a, b) = (PointF::new(x0 as f32, y0 as f32), PointF::new(x1 as f32, y1 as f32));
        match prim {
            0 => buf.fill_rect(Rect::new(x0, y0, x1, y1), Color::RED),
            1 => buf.draw_line(Point::new(x0, y0), Point::new(x1, y1), Color::RED),
            2 => buf.fill_triangle(a, b, PointF::new(x0 as f32, y1 as f32), Color::RED),
            3 => buf.draw_thick_line(a, b, 5.0, Color::RED),
            _ => buf.fill_ellipse(a, (x1 - x0).abs() as f32, (y1 - y0).abs() as f32, Color::RED),
        }
        for y in 0..40 {
            for x in 0..48 {
                if !allowed.contains(x, y) {
                    prop_assert_eq!(buf.pixel(x, y), Color::TRANSPARENT, "({}, {})", x, y);
                }
            }
        }
    }
}
