use super::*;

#[test]
fn intersect_overlapping_and_disjoint() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(5, -3, 10, 6);
    assert_eq!(a.intersect(b), Rect::new(5, 0, 5, 3));

    let far = Rect::new(20, 20, 4, 4);
    let none = a.intersect(far);
    assert!(!none.is_valid());
    assert_eq!(none, Rect::INVALID);

    let touching = Rect::new(10, 0, 4, 4);
    assert!(!a.intersect(touching).is_valid());
}

#[test]
fn from_edges_saturates_out_of_range_spans() {
    let r = Rect::from_edges(-5, 0, 1 << 40, 3);
    assert_eq!(r, Rect::new(-5, 0, u32::MAX, 3));
    let r = Rect::from_edges(i64::from(i32::MIN) - 10, 0, 0, 1);
    assert_eq!(r, Rect::new(i32::MIN, 0, 1 << 31, 1));
    assert!(!Rect::from_edges(4, 0, 4, 9).is_valid());
}

#[test]
fn cutout_splits_into_four_sides() {
    let outer = Rect::new(0, 0, 10, 8);
    let inner = Rect::new(2, 3, 4, 2);
    let [top, bottom, left, right] = outer.cutout(inner);
    assert_eq!(top, Rect::new(0, 0, 10, 3));
    assert_eq!(bottom, Rect::new(0, 5, 10, 3));
    assert_eq!(left, Rect::new(0, 3, 2, 2));
    assert_eq!(right, Rect::new(6, 3, 4, 2));

    let area: u32 = [top, bottom, left, right]
        .iter()
        .map(|r| r.width * r.height)
        .sum();
    assert_eq!(area + inner.width * inner.height, outer.width * outer.height);
}

#[test]
fn cutout_marks_empty_sides_invalid() {
    let outer = Rect::new(0, 0, 10, 8);
    let [top, bottom, left, right] = outer.cutout(Rect::new(0, 0, 10, 4));
    assert!(!top.is_valid());
    assert_eq!(bottom, Rect::new(0, 4, 10, 4));
    assert!(!left.is_valid());
    assert!(!right.is_valid());

    let [top, bottom, left, right] = outer.cutout(Rect::new(-5, -5, 30, 30));
    assert!(!top.is_valid() && !bottom.is_valid() && !left.is_valid() && !right.is_valid());
}

#[test]
fn cutout_with_disjoint_inner_returns_whole_outer() {
    let outer = Rect::new(1, 1, 4, 4);
    let parts = outer.cutout(Rect::new(50, 50, 2, 2));
    assert_eq!(parts[0], outer);
    assert!(parts[1..].iter().all(|r| !r.is_valid()));
}

#[test]
fn point_and_size_sentinels() {
    assert!(!Point::INVALID.is_valid());
    assert!(Point::new(-3, 4).is_valid());
    assert!(!Size::INVALID.is_valid());
    assert!(Rect::new(0, 0, 1, 1).contains(Point::new(0, 0)));
    assert!(!Rect::new(0, 0, 1, 1).contains(Point::new(1, 0)));
}

#[test]
fn argb_packing_and_memory_layout() {
    let px = Argb::from_u32(0x8011_2233);
    assert_eq!(px, Argb::new(0x80, 0x11, 0x22, 0x33));
    assert_eq!(px.to_u32(), 0x8011_2233);
    assert_eq!(px.to_bytes(), 0x8011_2233u32.to_le_bytes());
    assert_eq!(Argb::from_bytes(px.to_bytes()), px);
}

#[test]
fn blend_boundaries_are_exact() {
    let bg = Argb::new(0x40, 10, 20, 30);
    let opaque = Argb::new(0xff, 200, 100, 50);
    assert_eq!(bg.blend(opaque), opaque);

    let clear = Argb::new(0, 200, 100, 50);
    assert_eq!(bg.blend(clear), bg);
}

#[test]
fn blend_interpolates_within_one() {
    let bg = Argb::new(0xff, 0, 100, 255);
    let fg = Argb::new(0x80, 255, 200, 0);
    let out = bg.blend(fg);
    assert_eq!(out.a, 0xff);

    let expect = |f: f64, b: f64| f * 128.0 / 255.0 + b * (1.0 - 128.0 / 255.0);
    for (got, want) in [
        (out.r, expect(255.0, 0.0)),
        (out.g, expect(200.0, 100.0)),
        (out.b, expect(0.0, 255.0)),
    ] {
        assert!((f64::from(got) - want).abs() <= 1.0, "{got} vs {want}");
    }

    let half_bg = Argb::new(0x10, 0, 0, 0);
    assert_eq!(half_bg.blend(fg).a, 0x80);
}

#[test]
fn blend_divides_the_weighted_sum_once() {
    let bg = Argb::new(0xff, 0, 100, 255);
    let fg = Argb::new(0x80, 255, 200, 0);
    assert_eq!(bg.blend(fg), Argb::new(0xff, 128, 150, 127));

    let faint = Argb::new(1, 128, 128, 128);
    assert_eq!(Argb::new(0xff, 100, 100, 100).blend(faint), Argb::new(0xff, 100, 100, 100));
}
