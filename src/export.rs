use anyhow::Context;
use image::{Rgb, RgbImage, RgbaImage, imageops};

use crate::foundation::error::{QrForgeError, QrForgeResult};

/// Serialization target for a finished raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless RGBA (alpha preserved).
    Png,
    /// Lossy RGB; transparency is flattened onto white first since JPEG
    /// carries no alpha channel.
    Jpeg,
    /// Lossless WebP.
    WebP,
    /// An SVG document embedding the raster as a base64 `<image>` — a
    /// vector wrapper, not a vector re-trace.
    Svg,
    /// An A4-page raster (595x842 @ 72 DPI) with the QR centered on white —
    /// a print-ready page image, not a genuine PDF document.
    Pdf,
}

/// Encoder quality for lossy JPEG output.
const JPEG_QUALITY: u8 = 90;
/// A4 page size in pixels at 72 DPI.
const PAGE_W: u32 = 595;
const PAGE_H: u32 = 842;
/// Largest QR edge placed on the simulated page.
const PAGE_QR_MAX: u32 = 400;

impl ExportFormat {
    /// Parse a format name.
    pub fn parse(s: &str) -> QrForgeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            "webp" => Ok(ExportFormat::WebP),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(QrForgeError::validation(format!(
                "unknown export format '{other}'"
            ))),
        }
    }

    /// File extension for the serialized bytes. The PDF-like page is a PNG
    /// raster and is labeled as one.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png | ExportFormat::Pdf => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::WebP => "webp",
            ExportFormat::Svg => "svg",
        }
    }
}

/// Serialize a finished raster to the requested format.
pub fn export_raster(raster: &RgbaImage, format: ExportFormat) -> QrForgeResult<Vec<u8>> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(QrForgeError::validation("cannot export an empty raster"));
    }
    match format {
        ExportFormat::Png => encode_with(raster, image::ImageFormat::Png),
        ExportFormat::WebP => encode_with(raster, image::ImageFormat::WebP),
        ExportFormat::Jpeg => {
            let flat = flatten_onto_white(raster);
            let mut bytes = Vec::new();
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                std::io::Cursor::new(&mut bytes),
                JPEG_QUALITY,
            );
            encoder.encode_image(&flat).context("encode jpeg")?;
            Ok(bytes)
        }
        ExportFormat::Svg => {
            let uri = crate::assets::png_data_uri(raster)?;
            let (w, h) = raster.dimensions();
            Ok(svg_wrapper(w, h, &uri).into_bytes())
        }
        ExportFormat::Pdf => {
            let page = page_raster(raster);
            encode_with(&page, image::ImageFormat::Png)
        }
    }
}

fn encode_with(raster: &RgbaImage, format: image::ImageFormat) -> QrForgeResult<Vec<u8>> {
    let mut bytes = Vec::new();
    raster
        .write_to(&mut std::io::Cursor::new(&mut bytes), format)
        .with_context(|| format!("encode {format:?}"))?;
    Ok(bytes)
}

/// Composite a transparent raster over an opaque white matte.
fn flatten_onto_white(raster: &RgbaImage) -> RgbImage {
    let (w, h) = raster.dimensions();
    let mut flat = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
    for (x, y, px) in raster.enumerate_pixels() {
        let a = u16::from(px.0[3]);
        if a == 0 {
            continue;
        }
        let inv = 255 - a;
        let out = flat.get_pixel_mut(x, y);
        for c in 0..3 {
            out.0[c] = ((u16::from(px.0[c]) * a + u16::from(out.0[c]) * inv + 127) / 255) as u8;
        }
    }
    flat
}

fn svg_wrapper(w: u32, h: u32, data_uri: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n  <image href=\"{data_uri}\" width=\"{w}\" height=\"{h}\"/>\n</svg>\n"
    )
}

fn page_raster(raster: &RgbaImage) -> RgbaImage {
    let qr_size = raster.width().max(raster.height()).min(PAGE_QR_MAX);
    let scaled = if raster.dimensions() == (qr_size, qr_size) {
        raster.clone()
    } else {
        imageops::resize(raster, qr_size, qr_size, imageops::FilterType::Triangle)
    };

    let mut page = RgbaImage::from_pixel(PAGE_W, PAGE_H, image::Rgba([255, 255, 255, 255]));
    let x = i64::from((PAGE_W - qr_size) / 2);
    let y = i64::from((PAGE_H - qr_size) / 2);
    imageops::overlay(&mut page, &scaled, x, y);
    page
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
