//! YAML tiling configuration.
//!
//! A config file names the tile to render and the viewport to tile it
//! across. Every field is optional:
//!
//! ```yaml
//! tile:
//!   kind: octagram1
//!   size: 200
//!   palette: ["#ffb400", "#00143c", "#ffffff", "#00c8d2"]
//!   params:
//!     star_inset: 0.7
//! viewport:
//!   width: 800
//!   height: 600
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tessera::{Palette, TileDescriptor, TileKind};

/// Top-level tiling configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingConfig {
    /// Tile to repeat
    pub tile: TileDescriptor,

    /// Output dimensions
    pub viewport: ViewportConfig,
}

/// Pixel dimensions of a tiled output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    600
}

fn default_height() -> u32 {
    450
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { width: default_width(), height: default_height() }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub kind: Option<TileKind>,
    pub size: Option<u32>,
    pub palette: Option<Palette>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl TilingConfig {
    /// Load a config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config YAML {}", path.display()))
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply(&mut self, overrides: &Overrides) {
        let tile = &mut self.tile;
        if let Some(kind) = overrides.kind {
            tile.kind = kind;
        }
        if let Some(size) = overrides.size {
            tile.size = size;
        }
        if let Some(palette) = overrides.palette {
            tile.palette = palette;
        }
        if let Some(width) = overrides.width {
            self.viewport.width = width;
        }
        if let Some(height) = overrides.height {
            self.viewport.height = height;
        }
    }
}
