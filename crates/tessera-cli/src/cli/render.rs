//! Render command: one descriptor to a tiled PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use tessera::{to_rgba_image, Compositor, Palette, Pixmap, TileKind};

use super::config::{Overrides, TilingConfig};

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// YAML tiling config to start from
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tile kind (see `tessera patterns`)
    #[arg(short = 'p', long = "pattern", value_name = "KIND")]
    pub kind: Option<TileKind>,

    /// Tile edge length in pixels
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Four comma-separated colours: accent,dark,light,secondary
    #[arg(long, value_name = "C0,C1,C2,C3")]
    pub palette: Option<Palette>,

    /// Write the single tile instead of the tiling
    #[arg(long)]
    pub tile_only: bool,

    /// Output PNG path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

impl RenderArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            kind: self.kind,
            size: self.size,
            palette: self.palette,
            width: self.width,
            height: self.height,
        }
    }
}

/// Execute the render command.
pub fn cmd_render(args: &RenderArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => TilingConfig::load(path)?,
        None => TilingConfig::default(),
    };
    config.apply(&args.overrides());

    let tile = &config.tile;
    info!("Rendering {} at {}px", tile.kind, tile.size);

    let mut compositor = Compositor::new(tile.clone());
    let pixmap = if args.tile_only {
        compositor.render_tile()?.clone()
    } else {
        compositor.export_composite(config.viewport.width, config.viewport.height)?
    };

    save_png(&pixmap, &args.output)?;
    println!("Wrote {}x{} {} to {}", pixmap.width(), pixmap.height(), tile.kind, args.output.display());
    Ok(())
}

/// Encode a pixmap as PNG.
pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    to_rgba_image(pixmap)
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))
}
