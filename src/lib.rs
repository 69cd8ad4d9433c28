//! qrforge is a QR code styling and compositing engine.
//!
//! The pipeline turns a payload string into a branded, still-scannable
//! raster:
//!
//! 1. **Encode**: `qrcode` produces the module matrix, rendered to an RGBA
//!    raster with the module grid carried alongside ([`encode`]).
//! 2. **Style**: optional gradient recolor, module restyling, geometric
//!    clip and logo overlay, applied strictly in that order
//!    ([`apply_styling`]).
//! 3. **Blend** (alternative path): merge a photograph into the bitmap
//!    while re-injecting the contrast a decoder needs ([`blend_photo`]).
//! 4. **Export**: watermark and serialize to PNG/JPEG/WebP/SVG-wrapper or
//!    a print-page raster ([`export_raster`]).
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Immutable rasters**: every stage emits a fresh buffer; nothing is
//!   composited in place across stages.
//! - **Exact classification**: dark/light decisions go through the
//!   encoder's [`ModuleGrid`] wherever one is available, falling back to
//!   the red-channel threshold only for re-loaded rasters.
//! - **Cosmetic stages never block generation**: styling failures degrade
//!   to the unstyled raster with a warning; user-requested overlays (logo,
//!   photo) propagate their errors.
#![forbid(unsafe_code)]

mod assets;
mod blend;
mod export;
mod foundation;
mod matrix;
mod options;
mod payload;
mod pipeline;
mod style;

pub use assets::{
    ImageSource, decode_image, decode_pair, decode_source, png_data_uri, resize_to_fit,
};
pub use blend::{blend_photo, blend_photo_rasters, cover_fit};
pub use export::{ExportFormat, export_raster};
pub use foundation::color::{DARK_THRESHOLD, Rgba8, is_dark_pixel, luminance};
pub use foundation::error::{QrForgeError, QrForgeResult, SourceKind};
pub use matrix::{ModuleGrid, QrBitmap, encode};
pub use options::{
    BlendOptions, ClipShape, ColorPair, EcLevel, GradientDirection, ModuleStyle, StyleOptions,
    WatermarkOptions,
};
pub use payload::{
    ContactCard, UpiPayment, WifiNetwork, WifiSecurity, mailto, sms, upi, vcard, wifi,
};
pub use pipeline::{
    apply_styling, blend_from_sources, generate, generate_bitmap, generate_data_uri,
    generate_photo_blend, watermarked,
};
pub use style::{
    apply_gradient, apply_module_style, apply_watermark, clip_to_shape, embed_logo, shape_path,
};
