//! Colours and the fixed four-slot palette every tile is painted with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};

/// An 8-bit straight-alpha RGBA colour.
///
/// Serialized as `#rrggbb` (opaque) or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Reference boundary drawn along two edges of a user tile.
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Compare the RGB channels only.
    #[inline]
    pub fn same_rgb(&self, other: &Color) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    /// Premultiplied pixel value, as stored in a pixmap.
    pub fn to_premultiplied(self) -> tiny_skia::PremultipliedColorU8 {
        tiny_skia::ColorU8::from_rgba(self.r, self.g, self.b, self.a).premultiply()
    }
}

impl From<tiny_skia::ColorU8> for Color {
    fn from(c: tiny_skia::ColorU8) -> Self {
        Color::rgba(c.red(), c.green(), c.blue(), c.alpha())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TileError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl TryFrom<String> for Color {
    type Error = TileError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Four colours, indexed 0..4.
///
/// Slots by convention:
/// - 0 accent (gold by default)
/// - 1 dark; also the wall colour for user-tile flood fills and the stroke colour
/// - 2 light; the user-tile background
/// - 3 secondary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Palette(pub [Color; 4]);

impl Palette {
    pub const ACCENT: usize = 0;
    pub const DARK: usize = 1;
    pub const LIGHT: usize = 2;
    pub const SECONDARY: usize = 3;

    pub const fn new(colors: [Color; 4]) -> Self {
        Self(colors)
    }

    /// Colour at `index`. Indices wrap modulo 4.
    #[inline]
    pub fn get(&self, index: usize) -> Color {
        self.0[index % 4]
    }

    pub fn accent(&self) -> Color {
        self.0[Self::ACCENT]
    }

    pub fn dark(&self) -> Color {
        self.0[Self::DARK]
    }

    pub fn light(&self) -> Color {
        self.0[Self::LIGHT]
    }

    pub fn secondary(&self) -> Color {
        self.0[Self::SECONDARY]
    }

    /// Colour that blocks flood fills on a user tile.
    pub fn boundary(&self) -> Color {
        self.dark()
    }

    /// Copy with one slot replaced.
    pub fn with(mut self, index: usize, color: Color) -> Self {
        self.0[index % 4] = color;
        self
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette([
            Color::rgb(255, 180, 0),
            Color::rgb(0, 20, 60),
            Color::WHITE,
            Color::rgb(0, 200, 210),
        ])
    }
}

/// Parses four comma-separated colours, e.g. `#ffb400,#00143c,#ffffff,#00c8d2`.
impl FromStr for Palette {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self> {
        let colors = s
            .split(',')
            .map(str::parse::<Color>)
            .collect::<Result<Vec<_>>>()?;
        let colors: [Color; 4] = colors
            .try_into()
            .map_err(|_| TileError::InvalidPalette(s.to_string()))?;
        Ok(Palette(colors))
    }
}
