//! Fixed-order orchestration of the compositing stages.
//!
//! Within one generation request the stages run strictly sequentially:
//! gradient -> pattern/corner styling -> shape clip -> logo. Each stage's
//! output is the next stage's input, so there is no legal reordering —
//! clipping before recoloring, for instance, would gradient-color only the
//! clipped region, a different visual.
//!
//! Cosmetic stages (gradient, pattern, shape, watermark) must never block
//! generation: on failure they log a warning and pass the raster through
//! unchanged, so the caller still gets a valid plain QR. Stages the user
//! explicitly asked for (logo, photo blend) propagate their errors instead
//! — silently dropping a requested logo would violate user intent.

use image::RgbaImage;

use crate::{
    assets::{ImageSource, decode_source},
    blend,
    foundation::error::{QrForgeResult, SourceKind},
    matrix::{self, QrBitmap},
    options::{BlendOptions, ClipShape, ModuleStyle, StyleOptions, WatermarkOptions},
    style,
};

/// Run a cosmetic stage, falling back to the unmodified input on failure.
fn cosmetic(
    stage: &'static str,
    input: RgbaImage,
    f: impl FnOnce(&RgbaImage) -> QrForgeResult<RgbaImage>,
) -> RgbaImage {
    match f(&input) {
        Ok(out) => out,
        Err(err) => {
            tracing::warn!(stage, error = %err, "styling stage failed; keeping unstyled raster");
            input
        }
    }
}

/// Generate a styled QR raster for `text`.
///
/// Equivalent to [`generate_bitmap`] followed by [`apply_styling`].
pub fn generate(text: &str, options: &StyleOptions) -> QrForgeResult<RgbaImage> {
    let bitmap = generate_bitmap(text, options)?;
    apply_styling(&bitmap, options)
}

/// Encode the payload into an unstyled bitmap (validating options first).
pub fn generate_bitmap(text: &str, options: &StyleOptions) -> QrForgeResult<QrBitmap> {
    options.validate()?;
    matrix::encode(text, &options.normalized())
}

/// Apply the configured styling stages, in pipeline order, to an encoded
/// bitmap.
#[tracing::instrument(skip(bitmap, options))]
pub fn apply_styling(bitmap: &QrBitmap, options: &StyleOptions) -> QrForgeResult<RgbaImage> {
    let options = options.normalized();
    let mut raster = bitmap.raster().clone();

    if options.gradient_colors.len() > 1 {
        raster = cosmetic("gradient", raster, |_| {
            style::apply_gradient(bitmap, &options.gradient_colors, options.gradient_direction)
        });
    }

    if options.pattern_style != ModuleStyle::Square || options.corner_style != ModuleStyle::Square {
        raster = cosmetic("module-style", raster, |r| {
            style::apply_module_style(bitmap.grid(), r, options.pattern_style, options.corner_style)
        });
    }

    if options.shape != ClipShape::Square {
        raster = cosmetic("shape", raster, |r| style::clip_to_shape(r, options.shape));
    }

    if let Some(logo_src) = &options.logo {
        let source = ImageSource::from_user_str(logo_src);
        let logo = decode_source(SourceKind::Logo, &source)?;
        raster = style::embed_logo(&raster, &logo, options.logo_size)?;
    }

    Ok(raster)
}

/// Generate a styled QR raster and serialize it as a PNG data URI, the
/// output contract towards presentation layers.
pub fn generate_data_uri(text: &str, options: &StyleOptions) -> QrForgeResult<String> {
    let raster = generate(text, options)?;
    crate::assets::png_data_uri(&raster)
}

/// Generate a photo-blended QR: encode the payload, decode the photo, and
/// run the blend engine against the fresh bitmap's module grid.
///
/// The blend is a user-requested operation; photo decode failures
/// propagate as [`crate::QrForgeError::SourceDecode`] naming the photo.
pub fn generate_photo_blend(
    text: &str,
    photo: &ImageSource,
    options: &StyleOptions,
) -> QrForgeResult<RgbaImage> {
    let bitmap = generate_bitmap(text, options)?;
    let photo = decode_source(SourceKind::UserPhoto, photo)?;
    blend::blend_photo(&bitmap, &photo, &BlendOptions::from(options))
}

/// Blend a photo into an already-rendered QR image (both supplied as
/// sources). Both images are decoded before any compositing starts; the
/// first decode failure rejects the operation and names the source.
pub fn blend_from_sources(
    qr: &ImageSource,
    photo: &ImageSource,
    options: &BlendOptions,
) -> QrForgeResult<RgbaImage> {
    let (qr_raster, photo_raster) = crate::assets::decode_pair(
        (SourceKind::QrImage, qr),
        (SourceKind::UserPhoto, photo),
    )?;
    blend::blend_photo_rasters(&qr_raster, &photo_raster, options)
}

/// Overlay the branding watermark. Cosmetic: failures (typically no usable
/// font face on the host) log and return the input unchanged.
pub fn watermarked(raster: RgbaImage, options: &WatermarkOptions) -> RgbaImage {
    cosmetic("watermark", raster, |r| style::apply_watermark(r, options))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
