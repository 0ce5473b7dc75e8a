//! Color representation and matching support.
//!
//! Colors carry an alpha channel because the source artwork does; the color
//! snapper decides what partially transparent paint means for a device that
//! may or may not have a water/dip tool.

use serde::{Deserialize, Serialize};

/// An RGBA color. Channels are 8-bit, alpha is normalized to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha, 0 = fully transparent, 1 = opaque.
    pub a: f32,
}

impl Color {
    /// Create an opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with explicit alpha.
    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rrggbb` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let s = hex.strip_prefix('#')?;
        if s.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// A copy of this color with alpha forced to 1.
    pub fn opaque(&self) -> Self {
        Self { a: 1.0, ..*self }
    }

    /// Squared RGB distance to another color. Alpha is ignored; callers
    /// normalize alpha before matching.
    pub fn distance_sq(&self, other: &Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        dr * dr + dg * dg + db * db
    }

    /// Perceptual luminosity in `0.0..=255.0` (Rec. 601 weights).
    pub fn luminosity(&self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    /// True if the color is visible at all (non-zero alpha).
    pub fn is_visible(&self) -> bool {
        self.a != 0.0
    }
}
