use std::path::PathBuf;

use crate::foundation::{
    color::Rgba8,
    error::{QrForgeError, QrForgeResult},
};

/// QR error correction level.
///
/// The level sets the redundancy budget and therefore bounds how much of
/// the pattern a logo or photo overlay may occlude while the code stays
/// decodable (L≈7%, M≈15%, Q≈25%, H≈30%).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EcLevel {
    /// ~7% recoverable.
    L,
    /// ~15% recoverable.
    #[default]
    M,
    /// ~25% recoverable.
    Q,
    /// ~30% recoverable. Required in practice when embedding logos.
    H,
}

impl EcLevel {
    pub(crate) fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }

    /// Parse from a single-letter level name.
    pub fn parse(s: &str) -> QrForgeResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            other => Err(QrForgeError::validation(format!(
                "unknown error correction level '{other}' (expected L, M, Q or H)"
            ))),
        }
    }
}

/// Axis of a linear gradient across the raster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left corner to bottom-right corner.
    #[default]
    Diagonal,
}

impl GradientDirection {
    /// Parse a direction name; a missing/empty value normalizes to diagonal.
    pub fn parse(s: &str) -> QrForgeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "diagonal" => Ok(GradientDirection::Diagonal),
            "horizontal" => Ok(GradientDirection::Horizontal),
            "vertical" => Ok(GradientDirection::Vertical),
            other => Err(QrForgeError::validation(format!(
                "unknown gradient direction '{other}'"
            ))),
        }
    }
}

/// Geometric clip applied to the finished raster.
///
/// `Square` is the identity (no clipping). The aggressive shapes (star,
/// spiral, cross) clip into the corner finder patterns at the standard clip
/// radius and degrade scannability; that tradeoff is surfaced to the user,
/// not corrected here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClipShape {
    /// No clipping.
    #[default]
    Square,
    /// Inscribed circle.
    Circle,
    /// Rounded square, corner radius 20% of the clip radius.
    RoundedSquare,
    /// Heart built from four cubic beziers.
    Heart,
    /// Five-point star, inner/outer radius ratio 0.4.
    Star,
    /// Axis-aligned rhombus.
    Diamond,
    /// Regular hexagon.
    Hexagon,
    /// Regular octagon.
    Octagon,
    /// Regular triangle.
    Triangle,
    /// Two overlapping rectangles.
    Cross,
    /// Right-pointing arrow.
    Arrow,
    /// Badge/shield outline.
    Shield,
    /// Two-arc leaf.
    Leaf,
    /// Six-petal flower with a center disc.
    Flower,
    /// Archimedean spiral, three turns, stroked and filled.
    Spiral,
}

impl ClipShape {
    /// Parse a kebab-case shape name.
    pub fn parse(s: &str) -> QrForgeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(ClipShape::Square),
            "circle" => Ok(ClipShape::Circle),
            "rounded-square" | "rounded_square" | "roundedsquare" => Ok(ClipShape::RoundedSquare),
            "heart" => Ok(ClipShape::Heart),
            "star" => Ok(ClipShape::Star),
            "diamond" => Ok(ClipShape::Diamond),
            "hexagon" => Ok(ClipShape::Hexagon),
            "octagon" => Ok(ClipShape::Octagon),
            "triangle" => Ok(ClipShape::Triangle),
            "cross" => Ok(ClipShape::Cross),
            "arrow" => Ok(ClipShape::Arrow),
            "shield" => Ok(ClipShape::Shield),
            "leaf" => Ok(ClipShape::Leaf),
            "flower" => Ok(ClipShape::Flower),
            "spiral" => Ok(ClipShape::Spiral),
            other => Err(QrForgeError::validation(format!(
                "unknown clip shape '{other}'"
            ))),
        }
    }
}

/// How individual dark modules are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStyle {
    /// Solid squares (the encoder's native rendering).
    #[default]
    Square,
    /// Rounded squares.
    Rounded,
    /// Inscribed discs.
    Circle,
}

impl ModuleStyle {
    /// Parse a style name.
    pub fn parse(s: &str) -> QrForgeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(ModuleStyle::Square),
            "rounded" => Ok(ModuleStyle::Rounded),
            "circle" => Ok(ModuleStyle::Circle),
            other => Err(QrForgeError::validation(format!(
                "unknown module style '{other}'"
            ))),
        }
    }
}

/// Base dark/light module colors, before any gradient or blend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorPair {
    /// Color of dark modules.
    pub dark: Rgba8,
    /// Color of light modules and the quiet zone.
    pub light: Rgba8,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            dark: Rgba8::BLACK,
            light: Rgba8::WHITE,
        }
    }
}

/// Full styling configuration for one generation request.
///
/// A pure data model (serde/JSON) in the style of a composition document;
/// every cosmetic field has a default so a minimal document is just the
/// payload text plus whatever the caller wants to override.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Redundancy budget for the encoder.
    pub error_correction_level: EcLevel,
    /// Quiet-zone width in modules around the pattern.
    pub margin: u32,
    /// Target raster size in pixels (the bitmap is square).
    pub width: u32,
    /// Base dark/light colors.
    pub color: ColorPair,
    /// Geometric clip; `square` means no clipping.
    pub shape: ClipShape,
    /// Gradient stops for dark modules; empty means no gradient, a single
    /// color degenerates to a flat recolor.
    pub gradient_colors: Vec<Rgba8>,
    /// Gradient axis; defaults to diagonal.
    pub gradient_direction: GradientDirection,
    /// Rendering style for the three corner finder patterns.
    pub corner_style: ModuleStyle,
    /// Rendering style for data modules.
    pub pattern_style: ModuleStyle,
    /// Optional logo source: a file path or a `data:image/...;base64,` URI.
    pub logo: Option<String>,
    /// Logo width as a fraction of the raster width.
    pub logo_size: f32,
    /// Photo-blend opacity knob: how hard dark modules are stamped into
    /// the photo (their darken multiplier is `(1 - overlay_opacity) * 0.3`,
    /// so raising the knob darkens harder and favors scan reliability,
    /// lowering it lets the photo through). The name reads inverted from
    /// typical alpha semantics; it is kept as-is from the product surface —
    /// renaming it is not this crate's call.
    pub overlay_opacity: f32,
    /// Contrast multiplier pre-applied to the photo layer before blending.
    pub contrast_level: f32,
    /// Brightness multiplier pre-applied to the photo layer before blending.
    pub brightness: f32,
    /// Whether the contrast/brightness pre-filter runs at all.
    pub enhance_contrast: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            error_correction_level: EcLevel::M,
            margin: 4,
            width: 256,
            color: ColorPair::default(),
            shape: ClipShape::Square,
            gradient_colors: Vec::new(),
            gradient_direction: GradientDirection::Diagonal,
            corner_style: ModuleStyle::Square,
            pattern_style: ModuleStyle::Square,
            logo: None,
            logo_size: 0.2,
            overlay_opacity: 0.7,
            contrast_level: 1.5,
            brightness: 0.8,
            enhance_contrast: true,
        }
    }
}

impl StyleOptions {
    /// Check the non-cosmetic invariants.
    ///
    /// Cosmetic degenerates (odd logo size, out-of-range opacity) are not
    /// errors; [`StyleOptions::normalized`] clamps those instead.
    pub fn validate(&self) -> QrForgeResult<()> {
        if self.width == 0 {
            return Err(QrForgeError::validation("width must be > 0"));
        }
        if self.width > 8192 {
            return Err(QrForgeError::validation("width must be <= 8192"));
        }
        if self.margin > 64 {
            return Err(QrForgeError::validation("margin must be <= 64 modules"));
        }
        Ok(())
    }

    /// Clamp cosmetic knobs into their working ranges.
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        out.logo_size = if out.logo_size.is_finite() {
            out.logo_size.clamp(0.01, 0.9)
        } else {
            0.2
        };
        out.overlay_opacity = if out.overlay_opacity.is_finite() {
            out.overlay_opacity.clamp(0.0, 1.0)
        } else {
            0.7
        };
        out.contrast_level = if out.contrast_level.is_finite() && out.contrast_level > 0.0 {
            out.contrast_level.min(4.0)
        } else {
            1.5
        };
        out.brightness = if out.brightness.is_finite() && out.brightness > 0.0 {
            out.brightness.min(4.0)
        } else {
            0.8
        };
        out
    }
}

/// Tuning knobs for the photo blend engine, extracted from [`StyleOptions`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendOptions {
    /// See [`StyleOptions::overlay_opacity`] for the inverted semantics.
    pub overlay_opacity: f32,
    /// Contrast multiplier for the photo pre-filter.
    pub contrast_level: f32,
    /// Brightness multiplier for the photo pre-filter.
    pub brightness: f32,
    /// Whether the pre-filter runs.
    pub enhance_contrast: bool,
}

impl Default for BlendOptions {
    fn default() -> Self {
        Self {
            overlay_opacity: 0.7,
            contrast_level: 1.5,
            brightness: 0.8,
            enhance_contrast: true,
        }
    }
}

impl From<&StyleOptions> for BlendOptions {
    fn from(opts: &StyleOptions) -> Self {
        let opts = opts.normalized();
        Self {
            overlay_opacity: opts.overlay_opacity,
            contrast_level: opts.contrast_level,
            brightness: opts.brightness,
            enhance_contrast: opts.enhance_contrast,
        }
    }
}

/// Branding text drawn near the bottom-right corner of a finished raster.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WatermarkOptions {
    /// Text to draw.
    pub text: String,
    /// Explicit font file; when unset, common system faces are tried.
    pub font_path: Option<PathBuf>,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            text: "Made with qrforge".to_owned(),
            font_path: None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/options.rs"]
mod tests;
