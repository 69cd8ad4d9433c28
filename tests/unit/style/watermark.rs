use super::*;

use image::{Rgba, RgbaImage};

fn white_raster(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))
}

#[test]
fn empty_text_passes_through_without_needing_a_font() {
    let raster = white_raster(64, 64);
    let opts = WatermarkOptions {
        text: "   ".to_owned(),
        font_path: None,
    };
    let out = apply_watermark(&raster, &opts).unwrap();
    assert_eq!(out, raster);
}

#[test]
fn bogus_font_path_is_an_error_for_the_pipeline_to_downgrade() {
    let raster = white_raster(64, 64);
    let opts = WatermarkOptions {
        text: "brand".to_owned(),
        font_path: Some("no/such/font.ttf".into()),
    };
    assert!(apply_watermark(&raster, &opts).is_err());
}

#[test]
fn watermark_darkens_the_bottom_right_region_when_a_font_exists() {
    let opts = WatermarkOptions::default();
    if load_font(&opts).is_err() {
        // Host has none of the candidate faces; nothing to assert.
        return;
    }

    let raster = white_raster(400, 400);
    let out = apply_watermark(&raster, &opts).unwrap();

    // Some pixel in the bottom-right quadrant got darker.
    let mut touched = 0usize;
    for y in 200..400 {
        for x in 200..400 {
            if out.get_pixel(x, y).0[0] < 255 {
                touched += 1;
            }
        }
    }
    assert!(touched > 0, "no glyph coverage in the bottom-right quadrant");

    // The top half of the raster stays untouched.
    for y in 0..200 {
        for x in 0..400 {
            assert_eq!(out.get_pixel(x, y).0, [255, 255, 255, 255]);
        }
    }
}

#[test]
fn watermark_is_semi_transparent_not_solid_black() {
    let opts = WatermarkOptions::default();
    if load_font(&opts).is_err() {
        return;
    }

    let raster = white_raster(400, 400);
    let out = apply_watermark(&raster, &opts).unwrap();

    // 70% black over white floors at roughly 25% gray, never 0.
    for px in out.pixels() {
        assert!(px.0[0] >= 60, "watermark overshot its 70% opacity");
    }
}
