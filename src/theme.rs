//! Colors and the demo palette
//!
//! Colors are written as `#RRGGBB` or `#RRGGBBAA` in YAML configuration.

use serde::{Deserialize, Serialize};

use crate::panel::DrawerEdge;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Scale the alpha channel by `factor` in `[0, 1]`
    pub fn scale_alpha(&self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)) as u8;
        self.with_alpha(a)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|hex| u8::from_str_radix(hex, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#RRGGBBAA"
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Palette used by the demo host to paint panels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_content")]
    pub content: Color,
    #[serde(default = "default_content_stripe")]
    pub content_stripe: Color,
    #[serde(default = "default_left")]
    pub left: Color,
    #[serde(default = "default_right")]
    pub right: Color,
    #[serde(default = "default_bottom")]
    pub bottom: Color,
}

fn default_content() -> Color {
    Color::rgb(0xF2, 0xF2, 0xF2)
}

fn default_content_stripe() -> Color {
    Color::rgb(0xDD, 0xDD, 0xDD)
}

fn default_left() -> Color {
    Color::rgb(0x2B, 0x2D, 0x30)
}

fn default_right() -> Color {
    Color::rgb(0x3C, 0x5A, 0x99)
}

fn default_bottom() -> Color {
    Color::rgb(0x4E, 0x8A, 0x5B)
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            content: default_content(),
            content_stripe: default_content_stripe(),
            left: default_left(),
            right: default_right(),
            bottom: default_bottom(),
        }
    }
}

impl Theme {
    pub fn drawer(&self, edge: DrawerEdge) -> Color {
        match edge {
            DrawerEdge::Left => self.left,
            DrawerEdge::Right => self.right,
            DrawerEdge::Bottom => self.bottom,
        }
    }
}
