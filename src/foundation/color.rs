use image::Rgba;
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA color used throughout the pipeline.
///
/// Serializes as `#RRGGBB` / `#RRGGBBAA` hex, which is how style documents
/// and the CLI spell colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

/// Classification threshold between dark and light pixels, per channel.
pub const DARK_THRESHOLD: u8 = 128;

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Build an opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string (leading `#` optional).
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        match s.len() {
            6 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: 255,
            }),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
        }
    }

    /// Render as lowercase hex, omitting the alpha byte when opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Convert to the `image` crate's pixel type.
    pub fn to_pixel(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Integer rec.601 luma approximation on a 0-255 scale.
pub fn luminance(px: Rgba<u8>) -> u8 {
    let [r, g, b, _] = px.0;
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000) as u8
}

/// Threshold classifier for QR rasters: dark when the red channel is
/// below [`DARK_THRESHOLD`]. Only meaningful on rasters whose dark modules
/// were rendered in a genuinely dark color; stages that still hold a
/// [`crate::ModuleGrid`] should classify through it instead.
pub fn is_dark_pixel(px: Rgba<u8>) -> bool {
    px.0[0] < DARK_THRESHOLD
}
