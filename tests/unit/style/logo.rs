use super::*;

use image::RgbaImage;

fn black_raster(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]))
}

#[test]
fn logo_lands_centered_inside_a_white_safety_box() {
    let raster = black_raster(100, 100);
    let logo = RgbaImage::from_pixel(10, 10, Rgba([200, 0, 0, 255]));
    let out = embed_logo(&raster, &logo, 0.2).unwrap();

    // logo is 20x20 at (40, 40); box inflates 5 px per side.
    assert_eq!(out.get_pixel(50, 50).0, [200, 0, 0, 255]);
    assert_eq!(out.get_pixel(37, 37).0, [255, 255, 255, 255]);
    assert_eq!(out.get_pixel(30, 30).0, [0, 0, 0, 255]);
}

#[test]
fn nothing_is_drawn_outside_the_safety_box() {
    let raster = black_raster(100, 100);
    let logo = RgbaImage::from_pixel(16, 16, Rgba([0, 128, 255, 255]));
    let out = embed_logo(&raster, &logo, 0.2).unwrap();

    // Bounding region: 20 px logo + 5 px padding centered on 100 px.
    let (lo, hi) = (35, 65);
    for (x, y, px) in out.enumerate_pixels() {
        let inside_box = (lo..hi).contains(&x) && (lo..hi).contains(&y);
        if !inside_box {
            assert_eq!(px.0, [0, 0, 0, 255], "pixel ({x}, {y}) was touched");
        }
    }
}

#[test]
fn logo_aspect_ratio_is_preserved() {
    let raster = black_raster(100, 100);
    let wide_logo = RgbaImage::from_pixel(20, 10, Rgba([10, 200, 10, 255]));
    let out = embed_logo(&raster, &wide_logo, 0.2).unwrap();

    // Scaled to 20x10: the box is 30 wide but only 20 tall.
    assert_eq!(out.get_pixel(50, 50).0, [10, 200, 10, 255]);
    assert_eq!(out.get_pixel(50, 41).0, [255, 255, 255, 255]);
    assert_eq!(out.get_pixel(50, 38).0, [0, 0, 0, 255]);
}

#[test]
fn degenerate_transparent_logo_draws_only_the_safety_box() {
    let raster = black_raster(100, 100);
    let logo = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
    let out = embed_logo(&raster, &logo, 0.2).unwrap();

    for (x, y, px) in out.enumerate_pixels() {
        if px.0 != [0, 0, 0, 255] {
            // Anything that changed must be the white box, inside bounds.
            assert_eq!(px.0, [255, 255, 255, 255]);
            assert!((35..65).contains(&x) && (35..65).contains(&y));
        }
    }
    // The box itself did get drawn.
    assert_eq!(out.get_pixel(50, 50).0, [255, 255, 255, 255]);
}

#[test]
fn empty_inputs_are_rejected() {
    let raster = black_raster(100, 100);
    let empty = RgbaImage::new(0, 0);
    assert!(embed_logo(&raster, &empty, 0.2).is_err());

    let logo = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
    assert!(embed_logo(&RgbaImage::new(0, 0), &logo, 0.2).is_err());
}

#[test]
fn wild_logo_size_is_clamped_not_fatal() {
    let raster = black_raster(100, 100);
    let logo = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));

    let out = embed_logo(&raster, &logo, f32::NAN).unwrap();
    assert_eq!(out.get_pixel(50, 50).0, [9, 9, 9, 255]);

    // 0.9 cap: the logo grows to 90 px but stays inside the raster.
    let out = embed_logo(&raster, &logo, 10.0).unwrap();
    assert_eq!(out.dimensions(), (100, 100));
    assert_eq!(out.get_pixel(50, 50).0, [9, 9, 9, 255]);
    assert_eq!(out.get_pixel(2, 2).0, [255, 255, 255, 255]);
}
