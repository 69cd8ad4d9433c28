use super::*;

use crate::{foundation::color::Rgba8, options::ModuleStyle};

fn uniform_grid(side: u32, px_per_module: u32) -> (ModuleGrid, RgbaImage) {
    let w = side * px_per_module;
    let grid = ModuleGrid::new(side, 0, w, vec![true; (side * side) as usize]).unwrap();
    let raster = RgbaImage::from_pixel(w, w, Rgba8::BLACK.to_pixel());
    (grid, raster)
}

#[test]
fn square_square_is_identity() {
    let (grid, raster) = uniform_grid(8, 8);
    let out = apply_module_style(&grid, &raster, ModuleStyle::Square, ModuleStyle::Square).unwrap();
    assert_eq!(out, raster);
}

#[test]
fn circle_pattern_carves_cell_corners() {
    let (grid, raster) = uniform_grid(10, 10);
    let out =
        apply_module_style(&grid, &raster, ModuleStyle::Circle, ModuleStyle::Circle).unwrap();

    // Cell (8, 8) spans pixels 80..90 in both axes: its corner pixel is
    // outside the inscribed disc, its center inside.
    assert_eq!(out.get_pixel(80, 80).0[3], 0);
    assert_eq!(*out.get_pixel(85, 85), Rgba8::BLACK.to_pixel());
}

#[test]
fn module_color_is_sampled_from_the_current_raster() {
    // A pre-recolored raster: the restyled disc must keep the cell's color,
    // not reset it to the base dark color.
    let (grid, mut raster) = uniform_grid(10, 10);
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            raster.put_pixel(x, y, image::Rgba([10, 99, 200, 255]));
        }
    }
    let out =
        apply_module_style(&grid, &raster, ModuleStyle::Circle, ModuleStyle::Circle).unwrap();
    assert_eq!(out.get_pixel(85, 85).0, [10, 99, 200, 255]);
}

#[test]
fn finder_and_data_modules_use_their_own_styles() {
    let (grid, raster) = uniform_grid(10, 10);
    let out =
        apply_module_style(&grid, &raster, ModuleStyle::Square, ModuleStyle::Circle).unwrap();

    // (0, 0) is a finder module: restyled, corner transparent.
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
    // (8, 8) is a data module: untouched square.
    assert_eq!(*out.get_pixel(80, 80), Rgba8::BLACK.to_pixel());
}

#[test]
fn rounded_style_keeps_edge_midpoints_and_carves_corners() {
    let (grid, raster) = uniform_grid(10, 10);
    let out =
        apply_module_style(&grid, &raster, ModuleStyle::Rounded, ModuleStyle::Rounded).unwrap();

    // Edge midpoint of cell (8, 8) survives rounding; the corner does not.
    assert_eq!(*out.get_pixel(85, 80), Rgba8::BLACK.to_pixel());
    assert_eq!(out.get_pixel(80, 80).0[3], 0);
}

#[test]
fn light_modules_are_left_alone() {
    let w = 40;
    let grid = ModuleGrid::new(4, 0, w, vec![false; 16]).unwrap();
    let raster = RgbaImage::from_pixel(w, w, Rgba8::WHITE.to_pixel());
    let out =
        apply_module_style(&grid, &raster, ModuleStyle::Circle, ModuleStyle::Circle).unwrap();
    assert_eq!(out, raster);
}

#[test]
fn mismatched_raster_dimensions_are_rejected() {
    let (grid, _) = uniform_grid(8, 8);
    let wrong = RgbaImage::new(10, 10);
    assert!(apply_module_style(&grid, &wrong, ModuleStyle::Circle, ModuleStyle::Circle).is_err());
}
