//! Error types for tile rendering.

use std::fmt;

/// Errors that can occur while building or rendering a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    /// A drawing surface could not be allocated (one of the dimensions is zero).
    EmptySurface { width: u32, height: u32 },
    /// A colour string was not `#rrggbb` or `#rrggbbaa`.
    InvalidColor(String),
    /// A palette string did not hold exactly four colours.
    InvalidPalette(String),
    /// No tile kind is registered under this name.
    UnknownKind(String),
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::EmptySurface { width, height } => {
                write!(f, "Cannot allocate a {}x{} surface", width, height)
            }
            TileError::InvalidColor(text) => write!(f, "Invalid color: {:?}", text),
            TileError::InvalidPalette(text) => {
                write!(f, "Palette needs exactly 4 colors, got {:?}", text)
            }
            TileError::UnknownKind(name) => write!(f, "Unknown tile kind: {}", name),
        }
    }
}

impl std::error::Error for TileError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TileError>;
