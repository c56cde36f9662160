//! tessera - square tile generator
//!
//! Renders procedural and hand-drawn tiles and repeats them across an image.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tessera::TileKind;

use cli::{
    cmd_benchmark, cmd_gallery, cmd_render, cmd_sketch, init_logging, BenchArgs, GalleryArgs,
    LoggingConfig, RenderArgs, SketchArgs,
};

#[derive(Parser, Debug)]
#[command(name = "tessera", author, version, about = "Generate and tile square pattern tiles")]
struct Cli {
    /// Debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Warnings and errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available tile kinds
    Patterns,
    /// Render a tile and tile it across an image
    Render(RenderArgs),
    /// Replay an editor script and export the tiling
    Sketch(SketchArgs),
    /// Write one tile of every procedural kind to a sheet
    Gallery(GalleryArgs),
    /// Time tile generation
    #[command(alias = "benchmark")]
    Bench(BenchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_flags(cli.verbose, cli.quiet));

    match &cli.command {
        Command::Patterns => cmd_patterns(),
        Command::Render(args) => cmd_render(args)?,
        Command::Sketch(args) => cmd_sketch(args)?,
        Command::Gallery(args) => cmd_gallery(args)?,
        Command::Bench(args) => cmd_benchmark(args)?,
    }
    Ok(())
}

fn cmd_patterns() {
    println!("Available patterns:");
    for kind in TileKind::all() {
        let marker = if kind.is_randomized() { "*" } else { " " };
        println!("  {:<18} {} {}", kind.name(), marker, kind.title());
    }
    println!();
    println!("* randomized from a fixed seed");
}
