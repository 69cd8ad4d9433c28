use image::{Rgba, RgbaImage};

use crate::{
    foundation::error::{QrForgeError, QrForgeResult},
    matrix::ModuleGrid,
    options::ModuleStyle,
};

/// Re-render dark modules as discs or rounded squares.
///
/// `pattern` styles the data modules, `corner` the three finder patterns.
/// The stage runs after the gradient recolor, so each module keeps whatever
/// color its pixels currently carry; the parts of a restyled cell outside
/// the disc become transparent.
pub fn apply_module_style(
    grid: &ModuleGrid,
    raster: &RgbaImage,
    pattern: ModuleStyle,
    corner: ModuleStyle,
) -> QrForgeResult<RgbaImage> {
    if raster.width() != grid.width_px() || raster.height() != grid.width_px() {
        return Err(QrForgeError::validation(
            "raster dimensions do not match the module grid",
        ));
    }
    if pattern == ModuleStyle::Square && corner == ModuleStyle::Square {
        return Ok(raster.clone());
    }

    let mut out = raster.clone();
    for row in 0..grid.side() {
        for col in 0..grid.side() {
            if !grid.is_dark_module(col, row) {
                continue;
            }
            let style = if grid.is_finder_module(col, row) {
                corner
            } else {
                pattern
            };
            if style == ModuleStyle::Square {
                continue;
            }

            let (x0, y0, x1, y1) = grid.module_rect_px(col, row);
            if x1 <= x0 || y1 <= y0 {
                continue;
            }
            let color = *raster.get_pixel((x0 + x1) / 2, (y0 + y1) / 2);
            restyle_cell(&mut out, x0, y0, x1, y1, style, color);
        }
    }
    Ok(out)
}

fn restyle_cell(
    out: &mut RgbaImage,
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
    style: ModuleStyle,
    color: Rgba<u8>,
) {
    let w = (x1 - x0) as f32;
    let h = (y1 - y0) as f32;
    let cx = x0 as f32 + w / 2.0;
    let cy = y0 as f32 + h / 2.0;

    for y in y0..y1 {
        for x in x0..x1 {
            // Half-pixel centers keep small discs symmetric.
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let inside = match style {
                ModuleStyle::Square => true,
                ModuleStyle::Circle => {
                    let r = w.min(h) / 2.0;
                    let dx = px - cx;
                    let dy = py - cy;
                    dx * dx + dy * dy <= r * r
                }
                ModuleStyle::Rounded => in_rounded_rect(px, py, x0 as f32, y0 as f32, w, h),
            };
            let cell_px = if inside { color } else { Rgba([0, 0, 0, 0]) };
            out.put_pixel(x, y, cell_px);
        }
    }
}

fn in_rounded_rect(px: f32, py: f32, x0: f32, y0: f32, w: f32, h: f32) -> bool {
    let r = (w.min(h) * 0.3).max(0.5);
    let lx = (px - x0).clamp(0.0, w);
    let ly = (py - y0).clamp(0.0, h);

    let near_left = lx < r;
    let near_right = lx > w - r;
    let near_top = ly < r;
    let near_bottom = ly > h - r;
    if !(near_left || near_right) || !(near_top || near_bottom) {
        return true;
    }

    let corner_x = if near_left { r } else { w - r };
    let corner_y = if near_top { r } else { h - r };
    let dx = lx - corner_x;
    let dy = ly - corner_y;
    dx * dx + dy * dy <= r * r
}

#[cfg(test)]
#[path = "../../tests/unit/style/pattern.rs"]
mod tests;
