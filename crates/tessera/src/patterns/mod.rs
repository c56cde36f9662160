//! Tile generators.
//!
//! Each generator paints one square tile into a [`Surface`] at the origin
//! and size given by its [`TileContext`]. Generators never allocate
//! surfaces and never touch pixels outside their tile unless the motif is
//! meant to bleed into the neighbour (those clip first).
//!
//! [`TileKind`] is the closed set of kinds; [`TileKind::paint`] is the one
//! place that maps a kind to its generator.

pub mod util;

mod fractal;
mod lattice;
mod motifs;
mod polygons;
mod stars;
mod truchet;
mod wang;

pub use fractal::{
    block_fractal_cells, block_level, generate_block_fractal_tile, generate_hilbert_tile,
    generate_polygon_fractal_tile, hilbert_level, hilbert_path, hilbert_segments, polygon_depth,
    polygon_fractal_lines,
};
pub use lattice::{
    generate_lattice_tile, generate_spider_web_tile, generate_square_spiral_tile, spider_web_lines,
    square_spiral_lines,
};
pub use motifs::{generate_crossed_tile, generate_interlaced_tile, generate_interlocking_tile};
pub use polygons::{
    generate_checkered_tile, generate_greek_tile, generate_octagon_tile, generate_squares_tile,
    generate_tartan_tile, octagon_ratio,
};
pub use stars::{
    generate_islamic_eightfold_tile, generate_islamic_layered_tile, generate_islamic_quartered_tile,
    generate_octagram_tile, OCTAGRAM_NARROW_INSET, OCTAGRAM_WIDE_INSET,
};
pub use truchet::{cell_choices, generate_labyrinth_tile, generate_truchet_cross_tile, generate_truchet_tile};
pub use wang::{generate_wang_tile, WangGrid, WangTile, WANG_LABELS};

pub use util::TileContext;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::{paint_user_tile, ActionLog};
use crate::error::TileError;
use crate::raster::Surface;

/// Display information for a kind.
#[derive(Debug, Clone, Copy)]
pub struct KindMetadata {
    /// Title shown in galleries and listings
    pub title: &'static str,
    /// One-line summary of the motif
    pub description: &'static str,
}

impl KindMetadata {
    pub const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }
}

/// Every kind of tile the engine can produce.
///
/// `User` is the hand-drawn tile. Painted through [`TileKind::paint`] it
/// shows the empty drawing area; the compositor replays the action log on
/// top of that instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TileKind {
    User,
    Greek,
    IslamicLayered,
    IslamicQuartered,
    IslamicEightfold,
    Crossed,
    Interlaced,
    Interlocking,
    Octagram1,
    Octagram2,
    Octagon,
    Squares,
    Checkered,
    Tartan,
    Labyrinth,
    Truchet,
    TruchetCross,
    Wang,
    BlockFractal,
    Hilbert,
    PolygonFractal,
    Lattice,
    SquareSpiral,
    SpiderWeb,
}

impl TileKind {
    /// All kinds, in gallery order.
    pub fn all() -> &'static [TileKind] {
        &[
            TileKind::User,
            TileKind::Greek,
            TileKind::IslamicLayered,
            TileKind::IslamicQuartered,
            TileKind::IslamicEightfold,
            TileKind::Crossed,
            TileKind::Interlaced,
            TileKind::Interlocking,
            TileKind::Octagram1,
            TileKind::Octagram2,
            TileKind::Octagon,
            TileKind::Squares,
            TileKind::Checkered,
            TileKind::Tartan,
            TileKind::Labyrinth,
            TileKind::Truchet,
            TileKind::TruchetCross,
            TileKind::Wang,
            TileKind::BlockFractal,
            TileKind::Hilbert,
            TileKind::PolygonFractal,
            TileKind::Lattice,
            TileKind::SquareSpiral,
            TileKind::SpiderWeb,
        ]
    }

    /// Kinds with a procedural generator (everything except `User`).
    pub fn procedural() -> impl Iterator<Item = TileKind> {
        Self::all().iter().copied().filter(|k| *k != TileKind::User)
    }

    /// Stable identifier used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            TileKind::User => "user",
            TileKind::Greek => "greek",
            TileKind::IslamicLayered => "islamic-layered",
            TileKind::IslamicQuartered => "islamic-quartered",
            TileKind::IslamicEightfold => "islamic-eightfold",
            TileKind::Crossed => "crossed",
            TileKind::Interlaced => "interlaced",
            TileKind::Interlocking => "interlocking",
            TileKind::Octagram1 => "octagram1",
            TileKind::Octagram2 => "octagram2",
            TileKind::Octagon => "octagon",
            TileKind::Squares => "squares",
            TileKind::Checkered => "checkered",
            TileKind::Tartan => "tartan",
            TileKind::Labyrinth => "labyrinth",
            TileKind::Truchet => "truchet",
            TileKind::TruchetCross => "truchet-cross",
            TileKind::Wang => "wang",
            TileKind::BlockFractal => "block-fractal",
            TileKind::Hilbert => "hilbert",
            TileKind::PolygonFractal => "polygon-fractal",
            TileKind::Lattice => "lattice",
            TileKind::SquareSpiral => "square-spiral",
            TileKind::SpiderWeb => "spider-web",
        }
    }

    pub fn title(&self) -> &'static str {
        self.metadata().title
    }

    /// True for kinds that draw from the seeded random source.
    ///
    /// Their output is still reproducible; the flag is informational.
    pub fn is_randomized(&self) -> bool {
        matches!(self, TileKind::Labyrinth | TileKind::Truchet | TileKind::TruchetCross | TileKind::Wang)
    }

    pub fn metadata(&self) -> KindMetadata {
        match self {
            TileKind::User => KindMetadata::new("User Mode", "Hand-drawn lines, arcs and fills"),
            TileKind::Greek => KindMetadata::new("Greek Pattern", "Meander band on an 8x8 lattice"),
            TileKind::IslamicLayered =>
                KindMetadata::new("Layered Islamic Star", "Octagram with two nested eight-point stars"),
            TileKind::IslamicQuartered =>
                KindMetadata::new("Quartered Islamic Star", "Eight-point star with four-point stars at the corners"),
            TileKind::IslamicEightfold =>
                KindMetadata::new("Eightfold Islamic Star", "Eight-point star ringed by eight small stars"),
            TileKind::Crossed => KindMetadata::new("Crossed Square", "Diagonals through a centred square"),
            TileKind::Interlaced => KindMetadata::new("Interlaced Circles", "Inscribed circle woven with corner arcs"),
            TileKind::Interlocking =>
                KindMetadata::new("Interlocking Squares", "Rounded loop over and under crossing bands"),
            TileKind::Octagram1 => KindMetadata::new("Large Octagram", "Wide eight-point star"),
            TileKind::Octagram2 => KindMetadata::new("Narrow Octagram", "Slender eight-point star"),
            TileKind::Octagon => KindMetadata::new("Octagon & Rectangles", "Octagon with squares on its sides"),
            TileKind::Squares => KindMetadata::new("Squares and Rhombus", "Tilted squares around rhombus gaps"),
            TileKind::Checkered => KindMetadata::new("Checkered", "Two-by-two checkerboard"),
            TileKind::Tartan => KindMetadata::new("Tartan", "Translucent crossing bands with threads"),
            TileKind::Labyrinth => KindMetadata::new("Labyrinth", "Random diagonal per cell"),
            TileKind::Truchet => KindMetadata::new("Truchet Arcs", "Quarter arcs in two orientations"),
            TileKind::TruchetCross => KindMetadata::new("Truchet Crossings", "Quarter arcs or a straight cross"),
            TileKind::Wang => KindMetadata::new("Wang Tiles", "Edge-matched two-colour Wang grid"),
            TileKind::BlockFractal => KindMetadata::new("Block Fractal", "Five-of-nine square subdivision"),
            TileKind::Hilbert => KindMetadata::new("Hilbert Curve", "Space-filling Hilbert walk"),
            TileKind::PolygonFractal => KindMetadata::new("Polygon Fractal", "Nested polygons and trapezoids"),
            TileKind::Lattice => KindMetadata::new("Square & Circle Lattice", "Woven grid with two-tone discs"),
            TileKind::SquareSpiral => KindMetadata::new("Square Spiral", "Right-angled spiral from the centre"),
            TileKind::SpiderWeb => KindMetadata::new("Spider Web", "Spokes with polygonal rings"),
        }
    }

    /// Paint this kind into `surface` at the tile described by `ctx`.
    pub fn paint(&self, surface: &mut Surface, ctx: &TileContext<'_>) {
        match self {
            TileKind::User => paint_user_tile(surface, ctx.origin, ctx.size, ctx.palette, &ActionLog::new()),
            TileKind::Greek => generate_greek_tile(surface, ctx),
            TileKind::IslamicLayered => generate_islamic_layered_tile(surface, ctx),
            TileKind::IslamicQuartered => generate_islamic_quartered_tile(surface, ctx),
            TileKind::IslamicEightfold => generate_islamic_eightfold_tile(surface, ctx),
            TileKind::Crossed => generate_crossed_tile(surface, ctx),
            TileKind::Interlaced => generate_interlaced_tile(surface, ctx),
            TileKind::Interlocking => generate_interlocking_tile(surface, ctx),
            TileKind::Octagram1 => {
                generate_octagram_tile(surface, ctx, ctx.params.star_inset.unwrap_or(OCTAGRAM_WIDE_INSET))
            }
            TileKind::Octagram2 => {
                generate_octagram_tile(surface, ctx, ctx.params.star_inset.unwrap_or(OCTAGRAM_NARROW_INSET))
            }
            TileKind::Octagon => generate_octagon_tile(surface, ctx),
            TileKind::Squares => generate_squares_tile(surface, ctx),
            TileKind::Checkered => generate_checkered_tile(surface, ctx),
            TileKind::Tartan => generate_tartan_tile(surface, ctx),
            TileKind::Labyrinth => generate_labyrinth_tile(surface, ctx),
            TileKind::Truchet => generate_truchet_tile(surface, ctx),
            TileKind::TruchetCross => generate_truchet_cross_tile(surface, ctx),
            TileKind::Wang => generate_wang_tile(surface, ctx),
            TileKind::BlockFractal => generate_block_fractal_tile(surface, ctx),
            TileKind::Hilbert => generate_hilbert_tile(surface, ctx),
            TileKind::PolygonFractal => generate_polygon_fractal_tile(surface, ctx),
            TileKind::Lattice => generate_lattice_tile(surface, ctx),
            TileKind::SquareSpiral => generate_square_spiral_tile(surface, ctx),
            TileKind::SpiderWeb => generate_spider_web_tile(surface, ctx),
        }
    }

    /// Parse a kind from its name, ignoring case. A few aliases are accepted.
    pub fn from_name(name: &str) -> Option<TileKind> {
        let lowered = name.trim().to_lowercase().replace('_', "-");
        match lowered.as_str() {
            "user" | "custom" => Some(TileKind::User),
            "greek" | "greek-key" | "meander" => Some(TileKind::Greek),
            "islamic-layered" | "islamic1" => Some(TileKind::IslamicLayered),
            "islamic-quartered" | "islamic2" => Some(TileKind::IslamicQuartered),
            "islamic-eightfold" | "islamic3" => Some(TileKind::IslamicEightfold),
            "crossed" => Some(TileKind::Crossed),
            "interlaced" => Some(TileKind::Interlaced),
            "interlocking" => Some(TileKind::Interlocking),
            "octagram1" | "octagram" => Some(TileKind::Octagram1),
            "octagram2" => Some(TileKind::Octagram2),
            "octagon" => Some(TileKind::Octagon),
            "squares" => Some(TileKind::Squares),
            "checkered" | "checkerboard" => Some(TileKind::Checkered),
            "tartan" | "plaid" => Some(TileKind::Tartan),
            "labyrinth" | "maze" => Some(TileKind::Labyrinth),
            "truchet" => Some(TileKind::Truchet),
            "truchet-cross" | "truchet3" => Some(TileKind::TruchetCross),
            "wang" => Some(TileKind::Wang),
            "block-fractal" | "vicsek" => Some(TileKind::BlockFractal),
            "hilbert" => Some(TileKind::Hilbert),
            "polygon-fractal" => Some(TileKind::PolygonFractal),
            "lattice" | "grid-circles" => Some(TileKind::Lattice),
            "square-spiral" | "spiral" => Some(TileKind::SquareSpiral),
            "spider-web" | "web" => Some(TileKind::SpiderWeb),
            _ => None,
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileKind {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TileKind::from_name(s).ok_or_else(|| TileError::UnknownKind(s.to_string()))
    }
}

impl TryFrom<String> for TileKind {
    type Error = TileError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TileKind> for String {
    fn from(kind: TileKind) -> String {
        kind.name().to_string()
    }
}
