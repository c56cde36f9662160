//! Tile descriptors: everything a render needs to know, as one comparable value.

use serde::{Deserialize, Serialize};

use crate::palette::Palette;
use crate::patterns::TileKind;

/// Default edge length of a tile in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 150;

/// Pattern-specific scalars.
///
/// Each field only matters to the kinds noted on it; the rest ignore it.
/// Recursion depth for the fractal kinds is not here because it follows
/// from the tile size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileParams {
    /// Inner/outer radius ratio for the octagram kinds. `None` keeps the kind's own ratio.
    pub star_inset: Option<f64>,
    /// Cells per side for labyrinth, Truchet and Wang tiles.
    pub grid_cells: u32,
    /// Sides of the polygon fractal's seed shape.
    pub polygon_sides: u32,
    /// How far each polygon fractal level shrinks towards its centre.
    pub polygon_reduction: f64,
    /// Grid intervals per quadrant of the lattice tile.
    pub lattice_lines: u32,
    /// Growth of each square spiral arm, in pixels.
    pub spiral_step: u32,
    pub web_sectors: u32,
    pub web_rings: u32,
}

impl Default for TileParams {
    fn default() -> Self {
        Self {
            star_inset: None,
            grid_cells: 8,
            polygon_sides: 4,
            polygon_reduction: 0.5,
            lattice_lines: 3,
            spiral_step: 6,
            web_sectors: 12,
            web_rings: 6,
        }
    }
}

/// What to render: kind, edge length, colours and parameters.
///
/// Descriptors are plain values. Changing any field means building a new
/// descriptor, and the compositor compares whole descriptors to decide
/// whether its cached raster is still valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileDescriptor {
    pub kind: TileKind,
    pub size: u32,
    pub palette: Palette,
    pub params: TileParams,
}

impl TileDescriptor {
    /// Descriptor with the default palette and parameters.
    pub fn new(kind: TileKind, size: u32) -> Self {
        Self { kind, size, palette: Palette::default(), params: TileParams::default() }
    }

    pub fn with_palette(self, palette: Palette) -> Self {
        Self { palette, ..self }
    }

    pub fn with_params(self, params: TileParams) -> Self {
        Self { params, ..self }
    }

    pub fn with_size(self, size: u32) -> Self {
        Self { size, ..self }
    }

    pub fn with_kind(self, kind: TileKind) -> Self {
        Self { kind, ..self }
    }
}

impl Default for TileDescriptor {
    fn default() -> Self {
        Self::new(TileKind::Greek, DEFAULT_TILE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;

    #[test]
    fn builders_produce_unequal_descriptors() {
        let base = TileDescriptor::new(TileKind::Octagram1, 150);
        assert_ne!(base, base.clone().with_size(151));
        assert_ne!(base, base.clone().with_kind(TileKind::Octagram2));
        assert_ne!(base, base.clone().with_palette(Palette::default().with(0, Color::BLACK)));
        assert_eq!(base, TileDescriptor::new(TileKind::Octagram1, 150));
    }

    #[test]
    fn yaml_fills_in_defaults() {
        let yaml = "kind: hilbert\n";
        let desc: TileDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(desc.kind, TileKind::Hilbert);
        assert_eq!(desc.size, DEFAULT_TILE_SIZE);
        assert_eq!(desc.params, TileParams::default());
    }

    #[test]
    fn yaml_overrides_single_params() {
        let yaml = "kind: spider-web\nsize: 200\nparams:\n  web_sectors: 8\n";
        let desc: TileDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(desc.params.web_sectors, 8);
        assert_eq!(desc.params.web_rings, TileParams::default().web_rings);
    }

    #[test]
    fn yaml_without_kind_uses_default_descriptor() {
        let desc: TileDescriptor = serde_yaml::from_str("size: 90\n").unwrap();
        assert_eq!(desc, TileDescriptor::default().with_size(90));
    }
}
