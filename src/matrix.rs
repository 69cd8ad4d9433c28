use image::RgbaImage;

use crate::{
    foundation::error::{QrForgeError, QrForgeResult},
    options::StyleOptions,
};

/// The encoder's boolean module grid, carried through the pipeline next to
/// the rendered raster.
///
/// Styling stages classify pixels through this grid instead of re-deriving
/// "dark" from luminance thresholds on scaled pixels, so classification
/// stays exact regardless of the configured module colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleGrid {
    side: u32,
    margin: u32,
    width_px: u32,
    dark: Vec<bool>,
}

impl ModuleGrid {
    pub(crate) fn new(side: u32, margin: u32, width_px: u32, dark: Vec<bool>) -> QrForgeResult<Self> {
        if side == 0 || width_px == 0 {
            return Err(QrForgeError::validation("module grid must be non-empty"));
        }
        if dark.len() != (side as usize) * (side as usize) {
            return Err(QrForgeError::validation(
                "module grid length must be side * side",
            ));
        }
        Ok(Self {
            side,
            margin,
            width_px,
            dark,
        })
    }

    /// Modules per side, quiet zone excluded.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Quiet-zone width in modules on each edge.
    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Rendered raster width/height in pixels.
    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    /// Modules per side including the quiet zone on both edges.
    pub fn total_modules(&self) -> u32 {
        self.side + 2 * self.margin
    }

    /// Whether the data module at `(col, row)` is dark. Quiet-zone and
    /// out-of-range coordinates are light.
    pub fn is_dark_module(&self, col: u32, row: u32) -> bool {
        if col >= self.side || row >= self.side {
            return false;
        }
        self.dark[(row as usize) * (self.side as usize) + (col as usize)]
    }

    /// Map a raster pixel to its module column/row (quiet zone excluded).
    /// Returns `None` for quiet-zone pixels.
    pub fn module_at_px(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        let total = u64::from(self.total_modules());
        let w = u64::from(self.width_px);
        let col = (u64::from(x) * total / w) as i64 - i64::from(self.margin);
        let row = (u64::from(y) * total / w) as i64 - i64::from(self.margin);
        if col < 0 || row < 0 || col >= i64::from(self.side) || row >= i64::from(self.side) {
            return None;
        }
        Some((col as u32, row as u32))
    }

    /// Exact dark/light classification of a raster pixel.
    pub fn is_dark_px(&self, x: u32, y: u32) -> bool {
        match self.module_at_px(x, y) {
            Some((col, row)) => self.is_dark_module(col, row),
            None => false,
        }
    }

    /// Pixel extent `[x0, x1) x [y0, y1)` of the data module at
    /// `(col, row)`. The partition agrees exactly with [`Self::module_at_px`].
    pub fn module_rect_px(&self, col: u32, row: u32) -> (u32, u32, u32, u32) {
        let total = u64::from(self.total_modules());
        let w = u64::from(self.width_px);
        let edge = |m: u64| -> u32 { ((m * w).div_ceil(total)) as u32 };

        let mc = u64::from(col + self.margin);
        let mr = u64::from(row + self.margin);
        (edge(mc), edge(mr), edge(mc + 1), edge(mr + 1))
    }

    /// Whether the module lies in one of the three 7x7 corner finder
    /// patterns.
    pub fn is_finder_module(&self, col: u32, row: u32) -> bool {
        let s = self.side;
        let in_tl = col < 7 && row < 7;
        let in_tr = col + 7 >= s && row < 7;
        let in_bl = col < 7 && row + 7 >= s;
        in_tl || in_tr || in_bl
    }
}

/// An immutable rendered QR bitmap: the RGBA raster plus the module grid it
/// was rendered from. Every pipeline stage emits a fresh raster; the
/// bitmap itself is never mutated in place.
#[derive(Clone, Debug)]
pub struct QrBitmap {
    raster: RgbaImage,
    grid: ModuleGrid,
}

impl QrBitmap {
    /// The rendered raster.
    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    /// The module grid the raster was rendered from.
    pub fn grid(&self) -> &ModuleGrid {
        &self.grid
    }

    /// Raster width (== height) in pixels.
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Consume the bitmap, keeping only the raster.
    pub fn into_raster(self) -> RgbaImage {
        self.raster
    }

    /// Assemble a bitmap from parts; the caller guarantees raster and grid
    /// agree. Test-only.
    #[cfg(test)]
    pub(crate) fn from_parts(raster: RgbaImage, grid: ModuleGrid) -> Self {
        Self { raster, grid }
    }
}

/// Encode payload text into a rendered QR bitmap.
///
/// This is the pipeline's bitmap source: `qrcode` produces the module
/// matrix, which is rendered to an exact `width x width` RGBA raster in the
/// configured dark/light colors with `margin` quiet-zone modules per edge.
///
/// A requested width too small to give every module at least one pixel is
/// bumped to one pixel per module rather than rejected.
pub fn encode(text: &str, options: &StyleOptions) -> QrForgeResult<QrBitmap> {
    options.validate()?;
    if text.is_empty() {
        return Err(QrForgeError::encode("payload must be non-empty"));
    }

    let code =
        qrcode::QrCode::with_error_correction_level(text, options.error_correction_level.to_qrcode())
            .map_err(|e| QrForgeError::encode(format!("payload does not fit a QR code: {e}")))?;

    let side = code.width() as u32;
    let dark: Vec<bool> = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    let total = side + 2 * options.margin;
    let width_px = options.width.max(total);
    if width_px > options.width {
        tracing::debug!(
            requested = options.width,
            rendered = width_px,
            "requested width below one pixel per module; bumped"
        );
    }

    let grid = ModuleGrid::new(side, options.margin, width_px, dark)?;

    let dark_px = options.color.dark.to_pixel();
    let light_px = options.color.light.to_pixel();
    let mut raster = RgbaImage::new(width_px, width_px);
    for (x, y, px) in raster.enumerate_pixels_mut() {
        *px = if grid.is_dark_px(x, y) { dark_px } else { light_px };
    }

    Ok(QrBitmap { raster, grid })
}

#[cfg(test)]
#[path = "../tests/unit/matrix.rs"]
mod tests;
