use std::path::PathBuf;

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::RgbaImage;

use crate::foundation::error::{QrForgeError, QrForgeResult, SourceKind};

/// Where an input image (photo, logo, pre-rendered QR) comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk.
    Path(PathBuf),
    /// A `data:image/...;base64,` URI.
    DataUri(String),
    /// Already-read encoded bytes.
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Interpret a CLI/user string: `data:` URIs stay URIs, anything else
    /// is a file path.
    pub fn from_user_str(s: &str) -> Self {
        if s.starts_with("data:") {
            ImageSource::DataUri(s.to_owned())
        } else {
            ImageSource::Path(PathBuf::from(s))
        }
    }
}

/// Decode encoded image bytes into a straight RGBA8 buffer.
pub fn decode_image(bytes: &[u8]) -> QrForgeResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Decode one image input, attributing any failure to `kind`.
pub fn decode_source(kind: SourceKind, source: &ImageSource) -> QrForgeResult<RgbaImage> {
    let bytes = match source {
        ImageSource::Path(path) => std::fs::read(path).map_err(|e| {
            QrForgeError::source_decode(kind, format!("read '{}': {e}", path.display()))
        })?,
        ImageSource::DataUri(uri) => data_uri_bytes(uri)
            .map_err(|e| QrForgeError::source_decode(kind, e.to_string()))?,
        ImageSource::Bytes(bytes) => bytes.clone(),
    };

    image::load_from_memory(&bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| QrForgeError::source_decode(kind, e.to_string()))
}

/// Decode both inputs of a two-image operation before any compositing
/// starts. The first failure rejects the whole operation and names the
/// offending source; there is no partial-result path.
pub fn decode_pair(
    a: (SourceKind, &ImageSource),
    b: (SourceKind, &ImageSource),
) -> QrForgeResult<(RgbaImage, RgbaImage)> {
    let first = decode_source(a.0, a.1)?;
    let second = decode_source(b.0, b.1)?;
    Ok((first, second))
}

/// Extract the payload bytes of a base64 `data:` URI.
fn data_uri_bytes(uri: &str) -> anyhow::Result<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .context("not a data: URI")?;
    let (_media_type, payload) = rest
        .split_once(";base64,")
        .context("only base64 data URIs are supported")?;
    STANDARD.decode(payload).context("decode base64 payload")
}

/// Serialize a raster to a PNG `data:` URI, the core's output contract.
pub fn png_data_uri(raster: &RgbaImage) -> QrForgeResult<String> {
    let mut bytes = Vec::new();
    raster
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .context("encode png")?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
}

/// Contain-fit resize: scale down (never up) so the image fits inside
/// `max_width x max_height`, preserving aspect ratio.
pub fn resize_to_fit(img: &RgbaImage, max_width: u32, max_height: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || max_width == 0 || max_height == 0 {
        return img.clone();
    }

    let (new_w, new_h) = if w > h {
        if w > max_width {
            (max_width, ((h as u64 * max_width as u64) / w as u64) as u32)
        } else {
            (w, h)
        }
    } else if h > max_height {
        (((w as u64 * max_height as u64) / h as u64) as u32, max_height)
    } else {
        (w, h)
    };

    if (new_w, new_h) == (w, h) {
        return img.clone();
    }
    image::imageops::resize(
        img,
        new_w.max(1),
        new_h.max(1),
        image::imageops::FilterType::Triangle,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
