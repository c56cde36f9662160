//! Octagram and Islamic star tiles.
//!
//! All of these are built from [`star`] polygons centred on the tile or on
//! its corners and edge midpoints. Corner and edge stars are clipped so the
//! four quarters that meet at a corner assemble into one star once the tile
//! repeats.

use std::f64::consts::PI;

use crate::geometry::{star, Point};
use crate::palette::Palette;
use crate::raster::{Pen, Surface};

use super::util::{scaled_width, TileContext};

/// Inner/outer ratio of the large octagram.
pub const OCTAGRAM_WIDE_INSET: f64 = 0.384;
/// Inner/outer ratio of the narrow octagram.
pub const OCTAGRAM_NARROW_INSET: f64 = 0.27;

/// Eight-point star filling the tile, outlined in the light colour.
///
/// The star's outer radius is half the tile, its inner radius `inset * size`.
pub fn generate_octagram_tile(surface: &mut Surface, ctx: &TileContext<'_>, inset: f64) {
    ctx.fill_background(surface, Palette::DARK);

    let s = star(ctx.center(), ctx.size * inset, ctx.size * 0.5, 8, 0.0);
    surface.fill_polygon(&s, ctx.color(Palette::ACCENT));
    surface.stroke_polygon(&s, ctx.color(Palette::LIGHT), Pen::new(scaled_width(ctx.size, 60.0, 1.0)));
}

/// Large octagram with two nested eight-point stars layered on top.
pub fn generate_islamic_layered_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    generate_octagram_tile(surface, ctx, OCTAGRAM_WIDE_INSET);

    let c = ctx.center();
    let middle = star(c, ctx.size * 0.287, ctx.size * 0.375, 8, PI / 8.0);
    surface.fill_polygon(&middle, ctx.color(Palette::SECONDARY));

    let inner = star(c, ctx.size * 0.155, ctx.size * 0.287, 8, 0.0);
    surface.fill_polygon(&inner, ctx.color(Palette::DARK));
}

/// Wide star with four-point stars quartered across the corners.
pub fn generate_islamic_quartered_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::SECONDARY);
    ctx.clip(surface);

    let c = ctx.center();
    let dark = ctx.color(Palette::DARK);
    surface.fill_polygon(&star(c, ctx.size * 0.27, ctx.size * 0.5, 8, 0.0), dark);

    let r = ctx.size * 0.21;
    for corner in corners(ctx) {
        let s = star(corner, r * 0.5, r, 4, PI / 4.0);
        surface.fill_polygon(&s, dark);
        surface.stroke_polygon(&s, dark, Pen::default());
    }

    let inner = star(c, ctx.size * 0.207, ctx.size * 0.27, 8, PI / 8.0);
    surface.fill_polygon(&inner, ctx.color(Palette::ACCENT));
    surface.reset_clip();
}

/// Central star ringed by small four-point stars on every corner and edge.
pub fn generate_islamic_eightfold_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::DARK);
    ctx.clip(surface);

    let pen = Pen::new(scaled_width(ctx.size, 80.0, 1.5));
    let light = ctx.color(Palette::LIGHT);
    let r = ctx.size * 0.15;

    let diagonal = corners(ctx).map(|p| star(p, r * 0.5, r, 4, PI / 4.0));
    let upright = edge_midpoints(ctx).map(|p| star(p, r * 0.5, r, 4, 0.0));
    for s in diagonal.iter().chain(upright.iter()) {
        surface.fill_polygon(s, light);
        surface.stroke_polygon(s, light, pen);
    }

    let main = star(ctx.center(), ctx.size * 0.19, ctx.size * 0.35, 8, 0.0);
    surface.fill_polygon(&main, ctx.color(Palette::ACCENT));
    surface.stroke_polygon(&main, light, pen);
    surface.reset_clip();
}

fn corners(ctx: &TileContext<'_>) -> [Point; 4] {
    [ctx.at(0.0, 0.0), ctx.at(1.0, 0.0), ctx.at(0.0, 1.0), ctx.at(1.0, 1.0)]
}

fn edge_midpoints(ctx: &TileContext<'_>) -> [Point; 4] {
    [ctx.at(0.5, 0.0), ctx.at(0.5, 1.0), ctx.at(0.0, 0.5), ctx.at(1.0, 0.5)]
}
