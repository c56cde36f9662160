//! Gallery command: one tile of every procedural kind on a single sheet.
//!
//! Tiles are painted straight onto the sheet at their grid offsets, in
//! `TileKind::all()` order, so the sheet doubles as a visual index of what
//! `tessera patterns` lists.

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Args;
use log::{debug, info};
use tessera::{Color, Palette, Point, Surface, TileContext, TileKind, TileParams};

use super::render::save_png;

/// Space between tiles
const GUTTER: u32 = 8;
/// Sheet margin
const MARGIN: u32 = 16;

const DEFAULT_SIZE: u32 = 120;
const DEFAULT_COLUMNS: u32 = 6;

const SHEET_BACKGROUND: Color = Color::rgb(0xee, 0xee, 0xee);

#[derive(Args, Debug)]
pub struct GalleryArgs {
    /// Output PNG path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Edge length of each tile in pixels
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub size: u32,

    /// Tiles per row
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: u32,

    /// Four comma-separated colours: accent,dark,light,secondary
    #[arg(long, value_name = "C0,C1,C2,C3")]
    pub palette: Option<Palette>,
}

/// Pixel size of a sheet holding `count` tiles.
pub fn sheet_size(count: u32, size: u32, columns: u32) -> (u32, u32) {
    let rows = count.div_ceil(columns);
    let span = |n: u32| 2 * MARGIN + n * size + n.saturating_sub(1) * GUTTER;
    (span(columns.min(count)), span(rows))
}

/// Top-left corner of the `index`-th tile.
fn cell_origin(index: u32, size: u32, columns: u32) -> Point {
    let (col, row) = (index % columns, index / columns);
    Point::new(
        (MARGIN + col * (size + GUTTER)) as f64,
        (MARGIN + row * (size + GUTTER)) as f64,
    )
}

/// Paint the gallery sheet.
pub fn render_gallery(size: u32, columns: u32, palette: &Palette) -> Result<Surface> {
    ensure!(size > 0, "Tile size must be positive");
    ensure!(columns > 0, "Need at least one column");

    let kinds: Vec<TileKind> = TileKind::procedural().collect();
    let (width, height) = sheet_size(kinds.len() as u32, size, columns);
    let mut sheet = Surface::new(width, height)?;
    sheet.clear(SHEET_BACKGROUND);

    let params = TileParams::default();
    for (i, kind) in kinds.iter().enumerate() {
        let origin = cell_origin(i as u32, size, columns);
        debug!("{} at ({}, {})", kind.name(), origin.x, origin.y);
        let ctx = TileContext::new(origin, size as f64, palette, &params);
        sheet.clip_rect(origin.x, origin.y, size as f64, size as f64);
        kind.paint(&mut sheet, &ctx);
        sheet.reset_clip();
    }

    Ok(sheet)
}

/// Execute the gallery command.
pub fn cmd_gallery(args: &GalleryArgs) -> Result<()> {
    let palette = args.palette.unwrap_or_default();
    let sheet = render_gallery(args.size, args.columns, &palette)?;
    info!("Gallery sheet is {}x{}", sheet.width(), sheet.height());

    save_png(sheet.pixmap(), &args.output)?;
    println!("Wrote {} tiles to {}", TileKind::procedural().count(), args.output.display());
    Ok(())
}
