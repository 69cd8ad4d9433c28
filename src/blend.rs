//! The photo blend engine: merge an arbitrary photograph with a QR bitmap
//! so the photograph stays clearly visible while the code still decodes.
//!
//! Naive alpha blending destroys scannability — natural photographs lack
//! the local contrast variance a decoder keys on. Instead the engine
//! re-injects the contrast signal asymmetrically: pixels under dark QR
//! modules are darkened hard, pixels under light modules are brightened,
//! so the decoder sees a strong low/high luminance lattice over the photo.

use image::{RgbaImage, imageops};

use crate::{
    foundation::{
        color::is_dark_pixel,
        error::{QrForgeError, QrForgeResult},
    },
    matrix::QrBitmap,
    options::BlendOptions,
};

/// Multiplier applied (after the opacity factor) to photo pixels under
/// dark QR modules. Dark regions end up far darker than the raw photo.
const DARKEN_FACTOR: f32 = 0.3;
/// Per-channel boost for photo pixels under light QR modules.
const LIGHT_BOOST: u8 = 50;

/// Blend a photograph into a freshly encoded QR bitmap, classifying
/// modules exactly through the bitmap's grid.
pub fn blend_photo(
    qr: &QrBitmap,
    photo: &RgbaImage,
    options: &BlendOptions,
) -> QrForgeResult<RgbaImage> {
    blend_with(qr.raster().dimensions(), photo, options, |x, y| {
        qr.grid().is_dark_px(x, y)
    })
}

/// Blend a photograph into an already-rendered QR raster (e.g. one
/// re-loaded from a data URI), classifying by pixel threshold: dark when
/// the red channel is below 128.
pub fn blend_photo_rasters(
    qr_raster: &RgbaImage,
    photo: &RgbaImage,
    options: &BlendOptions,
) -> QrForgeResult<RgbaImage> {
    blend_with(qr_raster.dimensions(), photo, options, |x, y| {
        is_dark_pixel(*qr_raster.get_pixel(x, y))
    })
}

fn blend_with(
    (w, h): (u32, u32),
    photo: &RgbaImage,
    options: &BlendOptions,
    is_dark: impl Fn(u32, u32) -> bool,
) -> QrForgeResult<RgbaImage> {
    if w == 0 || h == 0 {
        return Err(QrForgeError::validation("qr raster is empty"));
    }
    if photo.width() == 0 || photo.height() == 0 {
        return Err(QrForgeError::validation("photo is empty"));
    }

    let mut layer = cover_fit(photo, w, h);
    if options.enhance_contrast {
        filter_contrast_brightness(&mut layer, options.contrast_level, options.brightness);
    }

    let opacity = options.overlay_opacity.clamp(0.0, 1.0);
    let dark_factor = (1.0 - opacity) * DARKEN_FACTOR;

    for (x, y, px) in layer.enumerate_pixels_mut() {
        if is_dark(x, y) {
            for c in &mut px.0[..3] {
                *c = (f32::from(*c) * dark_factor).floor() as u8;
            }
        } else {
            for c in &mut px.0[..3] {
                *c = c.saturating_add(LIGHT_BOOST);
            }
        }
        px.0[3] = 255;
    }
    Ok(layer)
}

/// Cover-fit: scale the photo so it fully covers `w x h`, then center-crop
/// the overflow dimension (as opposed to contain fitting, which letterboxes).
pub fn cover_fit(photo: &RgbaImage, w: u32, h: u32) -> RgbaImage {
    let (pw, ph) = photo.dimensions();
    let photo_aspect = f64::from(pw) / f64::from(ph);
    let target_aspect = f64::from(w) / f64::from(h);

    let (draw_w, draw_h) = if photo_aspect > target_aspect {
        // Wider than the target: fit height, crop left/right.
        let dw = (f64::from(h) * photo_aspect).round() as u32;
        (dw.max(w), h)
    } else {
        // Taller than the target: fit width, crop top/bottom.
        let dh = (f64::from(w) / photo_aspect).round() as u32;
        (w, dh.max(h))
    };

    let scaled = if (draw_w, draw_h) == (pw, ph) {
        photo.clone()
    } else {
        imageops::resize(photo, draw_w, draw_h, imageops::FilterType::Triangle)
    };

    let x0 = (draw_w - w) / 2;
    let y0 = (draw_h - h) / 2;
    imageops::crop_imm(&scaled, x0, y0, w, h).to_image()
}

/// Per-channel contrast-then-brightness pre-filter with CSS filter
/// semantics: contrast pivots around mid-gray, brightness is a straight
/// multiplier.
fn filter_contrast_brightness(layer: &mut RgbaImage, contrast: f32, brightness: f32) {
    for px in layer.pixels_mut() {
        for c in &mut px.0[..3] {
            let v = (f32::from(*c) - 128.0) * contrast + 128.0;
            *c = (v.clamp(0.0, 255.0) * brightness).clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/blend.rs"]
mod tests;
