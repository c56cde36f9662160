//! Grid-built tiles: square & circle lattice, square spiral, spider web.

use std::f64::consts::PI;

use crate::geometry::{Line, Point};
use crate::palette::{Color, Palette};
use crate::raster::{Pen, Surface};

use super::util::{scaled_width, TileContext};

/// Four quadrants of alternating grid lines with a two-coloured disc at each crossing.
///
/// Quadrants on one diagonal grow their vertical strokes upward and turn
/// the discs by 90° relative to the other diagonal, so the tile reads as
/// woven when repeated.
pub fn generate_lattice_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::SECONDARY);

    let n = ctx.params.lattice_lines.max(1) as i64;
    let half = ctx.size_px() / 2;
    let cell = half / (n + 1);
    let pen = Pen::new((cell / 12).max(1) as f64);
    let r = cell / 7;

    let quadrants = [(0, 0, true), (half, 0, false), (0, half, false), (half, half, true)];
    for (qx, qy, mirror) in quadrants {
        let grid = LatticeQuadrant { n, cell, r, mirror, offset: (qx + cell / 2, qy + cell / 2) };
        grid.paint(surface, ctx, pen);
    }
}

struct LatticeQuadrant {
    n: i64,
    cell: i64,
    /// Disc radius
    r: i64,
    mirror: bool,
    /// Tile-local position of the first crossing
    offset: (i64, i64),
}

impl LatticeQuadrant {
    fn paint(&self, surface: &mut Surface, ctx: &TileContext<'_>, pen: Pen) {
        let (first, second) = (ctx.color(Palette::DARK), ctx.color(Palette::LIGHT));
        let n = self.n;
        let cell = self.cell as f64;

        for row in 0..=n {
            for col in 0..=n {
                let p = self.crossing(ctx, row, col);
                let color = if (row + col) % 2 == 0 { first } else { second };
                if col < n {
                    surface.stroke_line(p, p.offset(cell, 0.0), color, pen);
                }
                if self.mirror && row > 0 {
                    surface.stroke_line(p, p.offset(0.0, -cell), color, pen);
                } else if !self.mirror && row < n {
                    surface.stroke_line(p, p.offset(0.0, cell), color, pen);
                }
            }
        }

        // Disc colouring alternates in reading order, carried across rows.
        let r = self.r as f64;
        let turn = if self.mirror { 135.0 } else { 45.0 };
        let mut invert = false;
        for row in 0..=n {
            for col in 0..=n {
                let c = self.crossing(ctx, row, col);
                for start in [0.0, 180.0] {
                    let color: Color = if (start == 0.0) == invert { first } else { second };
                    surface.fill_pie(c.x - r, c.y - r, 2.0 * r, 2.0 * r, start + turn, 180.0, color);
                }
                invert = !invert;
            }
        }
    }

    fn crossing(&self, ctx: &TileContext<'_>, row: i64, col: i64) -> Point {
        ctx.origin.offset(
            (self.offset.0 + col * self.cell) as f64,
            (self.offset.1 + row * self.cell) as f64,
        )
    }
}

/// Segments of a square spiral that starts at `center` heading east and
/// turns clockwise (on screen), each arm `increment` longer than the last.
pub fn square_spiral_lines(center: Point, increment: f64, turns: usize) -> Vec<Line> {
    let mut lines = Vec::with_capacity(turns);
    let mut pos = center;
    let mut side = increment;
    for i in 0..turns {
        let next = match i % 4 {
            0 => pos.offset(side, 0.0),
            1 => pos.offset(0.0, side),
            2 => pos.offset(-side, 0.0),
            _ => pos.offset(0.0, -side),
        };
        lines.push(Line::between(pos, next));
        pos = next;
        side += increment;
    }
    lines
}

pub fn generate_square_spiral_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::LIGHT);

    let increment = ctx.params.spiral_step.max(1) as i64;
    let size = ctx.size_px();
    let turns = (size / increment - 1).max(0) as usize;
    let center = ctx.origin.offset((size / 2) as f64, (size / 2) as f64);

    let lines = square_spiral_lines(center, increment as f64, turns);
    surface.stroke_segments(&lines, ctx.color(Palette::DARK), Pen::new(increment as f64));
}

/// Spokes from `center` out to the enclosing square of half-width `r`, plus
/// `rings` chords per sector at evenly spaced radii.
///
/// Spokes come first, then the rings, sector by sector.
pub fn spider_web_lines(center: Point, r: f64, sectors: usize, rings: usize) -> Vec<Line> {
    let sectors = sectors.max(1);
    let step = 2.0 * PI / sectors as f64;
    let mut spokes = Vec::with_capacity(sectors);
    let mut chords = Vec::with_capacity(sectors * rings);

    for i in 0..sectors {
        let (sin, cos) = (i as f64 * step).sin_cos();
        let (sin2, cos2) = ((i + 1) as f64 * step).sin_cos();

        let reach = |c: f64| if c.abs() > 1e-9 { r / c.abs() } else { f64::INFINITY };
        let dist = reach(cos).min(reach(sin));
        spokes.push(Line::between(center, center.offset(cos * dist, sin * dist)));

        for j in 1..=rings {
            let radius = r * j as f64 / rings as f64;
            chords.push(Line::between(
                center.offset(cos * radius, sin * radius),
                center.offset(cos2 * radius, sin2 * radius),
            ));
        }
    }

    spokes.extend(chords);
    spokes
}

pub fn generate_spider_web_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::LIGHT);

    let lines = spider_web_lines(
        ctx.center(),
        ctx.size / 2.0,
        ctx.params.web_sectors as usize,
        ctx.params.web_rings as usize,
    );
    let pen = Pen::new(scaled_width(ctx.size, 80.0, 1.5));
    surface.stroke_segments(&lines, ctx.color(Palette::DARK), pen);
}
