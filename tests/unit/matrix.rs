use super::*;

use crate::options::StyleOptions;

#[test]
fn encode_renders_requested_width_with_light_quiet_zone() {
    let opts = StyleOptions::default();
    let bitmap = encode("HELLO", &opts).unwrap();
    assert_eq!(bitmap.raster().dimensions(), (256, 256));

    // The quiet zone puts light pixels in all four corners.
    let light = opts.color.light.to_pixel();
    let last = bitmap.width() - 1;
    for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
        assert_eq!(*bitmap.raster().get_pixel(x, y), light);
    }

    // And there is actual dark content somewhere.
    let dark = opts.color.dark.to_pixel();
    assert!(bitmap.raster().pixels().any(|px| *px == dark));
}

#[test]
fn raster_and_grid_always_agree() {
    let opts = StyleOptions {
        width: 99, // deliberately not a multiple of the module count
        ..StyleOptions::default()
    };
    let bitmap = encode("https://example.com/agreement", &opts).unwrap();
    let dark = opts.color.dark.to_pixel();
    for (x, y, px) in bitmap.raster().enumerate_pixels() {
        assert_eq!(
            bitmap.grid().is_dark_px(x, y),
            *px == dark,
            "disagreement at ({x}, {y})"
        );
    }
}

#[test]
fn tiny_requested_width_is_bumped_to_one_pixel_per_module() {
    let opts = StyleOptions {
        width: 1,
        ..StyleOptions::default()
    };
    let bitmap = encode("HELLO", &opts).unwrap();
    let total = bitmap.grid().total_modules();
    assert_eq!(bitmap.width(), total);
    assert!(bitmap.width() >= 21 + 8); // version 1 plus two 4-module margins
}

#[test]
fn empty_payload_is_an_encode_error() {
    let err = encode("", &StyleOptions::default()).unwrap_err();
    assert!(matches!(err, QrForgeError::Encode(_)));
}

#[test]
fn oversized_payload_reports_encode_error() {
    let huge = "x".repeat(8000);
    let err = encode(&huge, &StyleOptions::default()).unwrap_err();
    assert!(matches!(err, QrForgeError::Encode(_)));
}

#[test]
fn module_rect_partition_matches_pixel_classification() {
    let opts = StyleOptions {
        width: 130,
        margin: 2,
        ..StyleOptions::default()
    };
    let bitmap = encode("partition", &opts).unwrap();
    let grid = bitmap.grid();

    for row in [0, 1, grid.side() / 2, grid.side() - 1] {
        for col in [0, 1, grid.side() / 2, grid.side() - 1] {
            let (x0, y0, x1, y1) = grid.module_rect_px(col, row);
            assert!(x0 < x1 && y0 < y1);
            for y in y0..y1 {
                for x in x0..x1 {
                    assert_eq!(grid.module_at_px(x, y), Some((col, row)));
                }
            }
        }
    }
}

#[test]
fn quiet_zone_pixels_classify_as_light() {
    let bitmap = encode("HELLO", &StyleOptions::default()).unwrap();
    let grid = bitmap.grid();
    assert_eq!(grid.module_at_px(0, 0), None);
    assert!(!grid.is_dark_px(0, 0));
}

#[test]
fn finder_modules_sit_in_the_three_corners() {
    let bitmap = encode("HELLO", &StyleOptions::default()).unwrap();
    let grid = bitmap.grid();
    let s = grid.side();

    assert!(grid.is_finder_module(0, 0));
    assert!(grid.is_finder_module(s - 1, 0));
    assert!(grid.is_finder_module(0, s - 1));
    assert!(!grid.is_finder_module(s - 1, s - 1));
    assert!(!grid.is_finder_module(s / 2, s / 2));
}

#[test]
fn grid_construction_rejects_mismatched_lengths() {
    assert!(ModuleGrid::new(3, 0, 9, vec![true; 9]).is_ok());
    assert!(ModuleGrid::new(3, 0, 9, vec![true; 8]).is_err());
    assert!(ModuleGrid::new(0, 0, 9, Vec::new()).is_err());
}

#[test]
fn custom_colors_are_rendered_verbatim() {
    let opts = StyleOptions {
        color: crate::options::ColorPair {
            dark: crate::foundation::color::Rgba8::rgb(10, 20, 30),
            light: crate::foundation::color::Rgba8::rgb(250, 240, 230),
        },
        ..StyleOptions::default()
    };
    let bitmap = encode("HELLO", &opts).unwrap();
    let corner = *bitmap.raster().get_pixel(0, 0);
    assert_eq!(corner.0, [250, 240, 230, 255]);
    assert!(
        bitmap
            .raster()
            .pixels()
            .any(|px| px.0 == [10, 20, 30, 255])
    );
}
