use image::{Rgba, RgbaImage, imageops};

use crate::foundation::error::{QrForgeError, QrForgeResult};

/// Padding of the white safety box around the logo, in pixels per side.
const SAFETY_PAD_PX: u32 = 5;

/// Overlay a logo at the raster center: a white safety box sized to the
/// logo plus 5 px padding per side, then the logo scaled to
/// `logo_size x width`, aspect ratio preserved.
///
/// The embedder does not check the occluded area against the
/// error-correction budget; callers pairing logos with low correction
/// levels get codes that may not decode. It also does not keep the box out
/// of the quiet zone or finder patterns for oversized fractions; both are
/// deliberately the caller's problem.
pub fn embed_logo(raster: &RgbaImage, logo: &RgbaImage, logo_size: f32) -> QrForgeResult<RgbaImage> {
    let (w, h) = raster.dimensions();
    if w == 0 || h == 0 {
        return Err(QrForgeError::validation("cannot embed a logo into an empty raster"));
    }
    if logo.width() == 0 || logo.height() == 0 {
        return Err(QrForgeError::validation("logo image is empty"));
    }

    let logo_size = if logo_size.is_finite() {
        logo_size.clamp(0.01, 0.9)
    } else {
        0.2
    };

    let logo_w = ((w as f32 * logo_size).round() as u32).clamp(1, w);
    let logo_h = (((f64::from(logo.height()) * f64::from(logo_w)) / f64::from(logo.width()))
        .round() as u32)
        .clamp(1, h);

    let x = (w - logo_w) / 2;
    let y = (h - logo_h) / 2;

    let mut out = raster.clone();

    let box_x0 = x.saturating_sub(SAFETY_PAD_PX);
    let box_y0 = y.saturating_sub(SAFETY_PAD_PX);
    let box_x1 = (x + logo_w + SAFETY_PAD_PX).min(w);
    let box_y1 = (y + logo_h + SAFETY_PAD_PX).min(h);
    for by in box_y0..box_y1 {
        for bx in box_x0..box_x1 {
            out.put_pixel(bx, by, Rgba([255, 255, 255, 255]));
        }
    }

    let scaled = if logo.dimensions() == (logo_w, logo_h) {
        logo.clone()
    } else {
        imageops::resize(logo, logo_w, logo_h, imageops::FilterType::Triangle)
    };
    imageops::overlay(&mut out, &scaled, i64::from(x), i64::from(y));

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/style/logo.rs"]
mod tests;
