use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::RgbaImage;

use crate::{
    foundation::{
        error::{QrForgeError, QrForgeResult},
        math::mul_div255_u8,
    },
    options::WatermarkOptions,
};

/// Watermark opacity (70% black, as in the product).
const WATERMARK_ALPHA: u16 = 179;
/// Distance from the right and bottom raster edges, in pixels.
const EDGE_INSET: f32 = 10.0;

/// Candidate faces tried when no explicit font path is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Draw right-aligned branding text near the bottom-right corner.
///
/// Font size scales with the raster (`max(10, width * 0.02)`); color is 70%
/// black. The text may land on active modules or the quiet zone — placement
/// is not scan-aware.
///
/// Watermarking is cosmetic: failure to find a usable font face is an
/// error the pipeline converts into pass-through.
pub fn apply_watermark(raster: &RgbaImage, options: &WatermarkOptions) -> QrForgeResult<RgbaImage> {
    if options.text.trim().is_empty() {
        return Ok(raster.clone());
    }
    let font = load_font(options)?;

    let (w, h) = raster.dimensions();
    let font_size = (w as f32 * 0.02).max(10.0);
    let scale = PxScale::from(font_size);
    let scaled = font.as_scaled(scale);

    let text_width: f32 = options
        .text
        .chars()
        .map(|c| scaled.h_advance(scaled.glyph_id(c)))
        .sum();

    let baseline_y = h as f32 - EDGE_INSET;
    let mut x_offset = (w as f32 - EDGE_INSET - text_width).max(0.0);

    let mut out = raster.clone();
    for ch in options.text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        let advance = scaled.h_advance(glyph_id);
        let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(x_offset, baseline_y));
        x_offset += advance;

        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue; // whitespace has no outline
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            if coverage <= 0.0 {
                return;
            }
            let px = bounds.min.x as i32 + gx as i32;
            let py = bounds.min.y as i32 + gy as i32;
            if px < 0 || py < 0 || px as u32 >= w || py as u32 >= h {
                return;
            }

            let alpha = mul_div255_u8((coverage * 255.0) as u16, WATERMARK_ALPHA);
            let bg = out.get_pixel_mut(px as u32, py as u32);
            let inv = 255 - u16::from(alpha);
            // Text color is black, so blending reduces to scaling the
            // background by the inverse coverage.
            bg.0[0] = mul_div255_u8(u16::from(bg.0[0]), inv);
            bg.0[1] = mul_div255_u8(u16::from(bg.0[1]), inv);
            bg.0[2] = mul_div255_u8(u16::from(bg.0[2]), inv);
            bg.0[3] = bg.0[3].max(alpha);
        });
    }
    Ok(out)
}

fn load_font(options: &WatermarkOptions) -> QrForgeResult<FontVec> {
    let candidates: Vec<std::path::PathBuf> = match &options.font_path {
        Some(path) => vec![path.clone()],
        None => SYSTEM_FONTS.iter().map(std::path::PathBuf::from).collect(),
    };

    for path in &candidates {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        match FontVec::try_from_vec(bytes) {
            Ok(font) => return Ok(font),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "unusable watermark font");
            }
        }
    }
    Err(QrForgeError::validation(
        "no usable watermark font face found",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/style/watermark.rs"]
mod tests;
