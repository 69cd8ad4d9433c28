use image::RgbaImage;

use crate::{
    foundation::{
        color::Rgba8,
        error::{QrForgeError, QrForgeResult},
        math::lerp_u8,
    },
    matrix::QrBitmap,
    options::GradientDirection,
};

/// Recolor every dark-module pixel with the linear-gradient sample at its
/// position. Light-module pixels keep their original background color.
///
/// A single-entry color list degenerates to a flat recolor. Classification
/// goes through the module grid, so custom base colors cannot confuse it.
pub fn apply_gradient(
    bitmap: &QrBitmap,
    colors: &[Rgba8],
    direction: GradientDirection,
) -> QrForgeResult<RgbaImage> {
    if colors.is_empty() {
        return Err(QrForgeError::validation(
            "gradient needs at least one color",
        ));
    }

    let src = bitmap.raster();
    let (w, h) = src.dimensions();
    let grid = bitmap.grid();

    let mut out = src.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        if !grid.is_dark_px(x, y) {
            continue;
        }
        let t = axis_position(x, y, w, h, direction);
        *px = sample_stops(colors, t).to_pixel();
    }
    Ok(out)
}

/// Normalized position of a pixel along the gradient axis, in `[0, 1]`.
fn axis_position(x: u32, y: u32, w: u32, h: u32, direction: GradientDirection) -> f32 {
    let span_x = w.saturating_sub(1) as f32;
    let span_y = h.saturating_sub(1) as f32;
    match direction {
        GradientDirection::Horizontal => {
            if span_x <= 0.0 {
                0.0
            } else {
                x as f32 / span_x
            }
        }
        GradientDirection::Vertical => {
            if span_y <= 0.0 {
                0.0
            } else {
                y as f32 / span_y
            }
        }
        GradientDirection::Diagonal => {
            let span = span_x + span_y;
            if span <= 0.0 {
                0.0
            } else {
                (x + y) as f32 / span
            }
        }
    }
}

/// Sample an evenly spaced multi-stop gradient at `t` in `[0, 1]`.
fn sample_stops(colors: &[Rgba8], t: f32) -> Rgba8 {
    if colors.len() == 1 {
        return colors[0];
    }

    let segments = colors.len() - 1;
    let pos = t.clamp(0.0, 1.0) * segments as f32;
    let i = (pos.floor() as usize).min(segments - 1);
    let frac = pos - i as f32;

    let a = colors[i];
    let b = colors[i + 1];
    Rgba8 {
        r: lerp_u8(a.r, b.r, frac),
        g: lerp_u8(a.g, b.g, frac),
        b: lerp_u8(a.b, b.b, frac),
        a: lerp_u8(a.a, b.a, frac),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/gradient.rs"]
mod tests;
