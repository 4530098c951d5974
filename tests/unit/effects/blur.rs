use super::*;
use crate::foundation::core::{Argb, Rect};
use crate::pixmap::{PixelFormat, Pixmap};

#[test]
fn radii_follow_three_box_construction() {
    assert_eq!(box_radii(20.0), [19, 19, 20]);
    assert_eq!(box_radii(2.0), [1, 1, 2]);
    assert_eq!(box_radii(0.5), [0, 0, 0]);
}

#[test]
#[should_panic]
fn zero_sigma_is_rejected() {
    let _ = box_radii(0.0);
}

#[test]
fn box_line_spreads_and_clamps_edges() {
    let src = [0u8, 0, 90, 0, 0];
    let mut dst = [0u8; 5];
    box_line(&src, &mut dst, 1, 1);
    assert_eq!(dst, [0, 30, 30, 30, 0]);

    let src = [60u8, 0, 0];
    box_line(&src, &mut dst[..3], 1, 1);
    assert_eq!(&dst[..3], &[40, 20, 0]);
}

#[test]
fn box_line_handles_radius_past_u32_sums() {
    let src = [255u8, 255, 255, 0];
    let mut dst = [0u8; 4];
    box_line(&src, &mut dst, 1, 20_000_000);
    // Almost every tap reads a clamped edge pixel: half white, half black.
    assert_eq!(dst, [128, 128, 128, 127]);

    let src = [255u8; 3];
    box_line(&src, &mut dst[..3], 1, 40_000_000);
    assert_eq!(&dst[..3], &[255, 255, 255]);
}

#[test]
fn huge_sigma_keeps_solid_regions_solid() {
    let color = Argb::new(0xff, 250, 251, 252);
    let mut pm = Pixmap::filled(PixelFormat::Argb, 4, 3, color);
    BoxBlur::new(3.0e7).apply(&mut pm.region_mut());
    assert_eq!(pm, Pixmap::filled(PixelFormat::Argb, 4, 3, color));
}

#[test]
fn box_line_treats_channels_independently() {
    let src = [10u8, 200, 10, 200, 10, 200];
    let mut dst = [0u8; 6];
    box_line(&src, &mut dst, 2, 4);
    assert_eq!(dst, src);
}

#[test]
fn solid_region_is_unchanged() {
    let color = Argb::new(0xff, 40, 80, 120);
    let mut pm = Pixmap::filled(PixelFormat::Argb, 9, 6, color);
    BoxBlur::new(3.0).apply(&mut pm.region_mut());
    assert_eq!(pm, Pixmap::filled(PixelFormat::Argb, 9, 6, color));
}

#[test]
fn dot_spreads_symmetrically() {
    let mut pm = Pixmap::filled(PixelFormat::Argb, 11, 11, Argb::BLACK);
    pm.set(5, 5, Argb::WHITE);
    BoxBlur::new(1.5).apply(&mut pm.region_mut());
    let center = pm.at(5, 5).r;
    assert!(center > 0 && center < 0xff);
    assert_eq!(pm.at(4, 5), pm.at(6, 5));
    assert_eq!(pm.at(5, 4), pm.at(5, 6));
    assert!(pm.at(4, 5).r <= center);
    assert_eq!(pm.at(0, 0), Argb::BLACK);
}

#[test]
fn apply_all_leaves_the_hole_alone() {
    let pool = ThreadPool::new(2).unwrap();
    let mut pm = Pixmap::new(PixelFormat::Argb, 12, 10);
    let rect = pm.rect();
    pm.grid(rect, 1, Argb::BLACK, Argb::WHITE);
    let reference = pm.clone();

    let hole = Rect::new(3, 3, 5, 4);
    let blur = BoxBlur::new(2.0);
    blur.apply_all(&pool, pm.cutout_mut(hole));

    for y in 3..7 {
        for x in 3..8 {
            assert_eq!(pm.at(x, y), reference.at(x, y));
        }
    }
    assert_ne!(pm.at(0, 0), reference.at(0, 0));
}
