//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `patterns` - List available tile kinds
//! - `render` - Render a tile descriptor to a tiled PNG
//! - `sketch` - Replay an editor script and export the result
//! - `gallery` - One tile of every kind on a sheet
//! - `bench` - Time tile generation
//!
//! `config` and `logging` hold the shared YAML and logger setup.

pub mod config;
pub mod logging;
pub mod render;
pub mod sketch;
pub mod gallery;
pub mod benchmark;

pub use benchmark::{cmd_benchmark, BenchArgs};
pub use gallery::{cmd_gallery, GalleryArgs};
pub use logging::{init_logging, LoggingConfig};
pub use render::{cmd_render, RenderArgs};
pub use sketch::{cmd_sketch, SketchArgs};
