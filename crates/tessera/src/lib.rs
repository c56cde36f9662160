//! # tessera
//!
//! Square tile generation and vector-editing engine.
//!
//! Procedural tiles (stars, polygons, interlocking motifs, Wang grids,
//! space-filling fractals, Truchet mazes) and hand-drawn tiles (lines, arcs
//! and flood fills) are rasterized into one fixed-size pixmap each, cached,
//! and repeated across a viewport.
//!
//! ```ignore
//! use tessera::{Compositor, TileDescriptor, TileKind};
//!
//! let mut compositor = Compositor::new(TileDescriptor::new(TileKind::Octagram1, 150));
//! let tiling = compositor.export_composite(600, 450)?;
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod action;
pub mod compositor;
pub mod editor;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod palette;
pub mod patterns;
pub mod raster;
pub mod rng;
pub mod tile;

// Re-export common types at crate root for convenience.
pub use action::{paint_user_tile, ActionLog, DrawAction, REFERENCE_SIZE};
pub use compositor::{render_tile, render_user_tile, CacheStats, Compositor};
pub use editor::{Editor, EditorState, StrokeKind, StrokeOutcome, MIN_STROKE_LENGTH};
pub use error::{Result, TileError};
pub use fill::flood_fill;
pub use geometry::{Line, Point, Polygon};
pub use palette::{Color, Palette};
pub use patterns::{KindMetadata, TileContext, TileKind};
pub use raster::{Pen, Surface};
pub use rng::SeededRng;
pub use tile::{TileDescriptor, TileParams, DEFAULT_TILE_SIZE};

pub use tiny_skia::Pixmap;

/// Copy a pixmap into a straight-alpha `image` buffer for encoding.
pub fn to_rgba_image(pixmap: &Pixmap) -> image::RgbaImage {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    image::RgbaImage::from_fn(width, pixmap.height(), |x, y| {
        let c = pixels[(y * width + x) as usize].demultiply();
        image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
    })
}
