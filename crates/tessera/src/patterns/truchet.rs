//! Truchet tiles and the diagonal labyrinth.
//!
//! The tile is cut into `grid_cells x grid_cells` square cells and each cell
//! gets one randomly chosen motif. Every motif touches the cell border only
//! at edge midpoints (or corners, for the labyrinth), so neighbouring cells
//! and neighbouring tiles always join up into continuous paths.
//!
//! Choices come from a [`SeededRng`] created per call, so a given descriptor
//! always produces the same maze.

use rand::Rng;

use crate::geometry::Line;
use crate::palette::Palette;
use crate::raster::{Pen, Surface};
use crate::rng::SeededRng;

use super::util::{scaled_width, TileContext};

/// One randomly oriented diagonal per cell, forming a maze of corridors.
pub fn generate_labyrinth_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::ACCENT);
    ctx.clip(surface);

    let n = cells(ctx);
    let cell = ctx.size / n as f64;
    let mut rng = SeededRng::for_pattern();

    let mut lines = Vec::with_capacity(n * n);
    for col in 0..n {
        for row in 0..n {
            let x = ctx.x() + col as f64 * cell;
            let y = ctx.y() + row as f64 * cell;
            if rng.random_bool(0.5) {
                lines.push(Line::new(x, y, x + cell, y + cell));
            } else {
                lines.push(Line::new(x, y + cell, x + cell, y));
            }
        }
    }

    surface.stroke_segments(&lines, ctx.color(Palette::DARK), Pen::new(scaled_width(ctx.size, 150.0, 1.0)));
    surface.reset_clip();
}

/// Classic two-way Truchet: each cell holds a pair of quarter arcs in one of two orientations.
pub fn generate_truchet_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    paint_truchet(surface, ctx, 2);
}

/// Three-way Truchet: the two arc orientations plus a straight crossing.
pub fn generate_truchet_cross_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    paint_truchet(surface, ctx, 3);
}

fn paint_truchet(surface: &mut Surface, ctx: &TileContext<'_>, variants: usize) {
    ctx.fill_background(surface, Palette::ACCENT);
    ctx.clip(surface);

    let n = cells(ctx);
    let c = ctx.size / n as f64;
    let h = c / 2.0;
    let color = ctx.color(Palette::DARK);
    let pen = Pen::new(scaled_width(c, 10.0, 1.0));

    for (index, variant) in cell_choices(n, variants).into_iter().enumerate() {
        // Column-major, matching the order the choices were drawn in
        let (col, row) = (index / n, index % n);
        let x = ctx.x() + col as f64 * c;
        let y = ctx.y() + row as f64 * c;
        match variant {
            // top-mid to right-mid, bottom-mid to left-mid
            0 => {
                surface.stroke_arc(x + h, y - h, c, c, 180.0, 90.0, color, pen);
                surface.stroke_arc(x - h, y + h, c, c, 0.0, 90.0, color, pen);
            }
            // left-mid to top-mid, right-mid to bottom-mid
            1 => {
                surface.stroke_arc(x - h, y - h, c, c, 270.0, 90.0, color, pen);
                surface.stroke_arc(x + h, y + h, c, c, 90.0, 90.0, color, pen);
            }
            _ => {
                let lines = [
                    Line::new(x, y + h, x + c, y + h),
                    Line::new(x + h, y + c, x + h, y),
                ];
                surface.stroke_segments(&lines, color, pen);
            }
        }
    }
    surface.reset_clip();
}

/// Motif index for each of `n * n` cells, column-major, each in `0..variants`.
pub fn cell_choices(n: usize, variants: usize) -> Vec<usize> {
    let mut rng = SeededRng::for_pattern();
    (0..n * n).map(|_| rng.random_range(0..variants)).collect()
}

fn cells(ctx: &TileContext<'_>) -> usize {
    ctx.params.grid_cells.max(1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::tile::TileParams;

    fn render(size: u32, cells: u32, f: impl Fn(&mut Surface, &TileContext<'_>)) -> Surface {
        let palette = Palette::default();
        let params = TileParams { grid_cells: cells, ..TileParams::default() };
        let mut surface = Surface::square(size).unwrap();
        let ctx = TileContext::new(Point::new(0.0, 0.0), size as f64, &palette, &params);
        f(&mut surface, &ctx);
        surface
    }

    #[test]
    fn choices_are_reproducible() {
        assert_eq!(cell_choices(8, 3), cell_choices(8, 3));
    }

    #[test]
    fn choices_cover_every_variant() {
        let choices = cell_choices(8, 3);
        assert_eq!(choices.len(), 64);
        for v in 0..3 {
            assert!(choices.contains(&v), "variant {} never chosen", v);
        }
        assert!(choices.iter().all(|&v| v < 3));
    }

    #[test]
    fn labyrinth_is_deterministic() {
        let a = render(120, 6, generate_labyrinth_tile);
        let b = render(120, 6, generate_labyrinth_tile);
        assert_eq!(a.pixmap().data(), b.pixmap().data());
    }

    #[test]
    fn labyrinth_marks_every_cell_centre() {
        let s = render(120, 6, generate_labyrinth_tile);
        // Either diagonal of cell (0, 0) touches the pixel at its centre
        assert_ne!(s.pixel(10, 10), Some(Palette::default().accent()));
    }

    #[test]
    fn truchet_paths_hit_edge_midpoints() {
        let s = render(160, 4, generate_truchet_tile);
        let dark = Palette::default().dark();
        // Every cell has a path leaving through the middle of each of its edges
        for k in 0..4 {
            let mid = k * 40 + 20;
            assert_eq!(s.pixel(mid, 0), Some(dark), "top edge at x={}", mid);
            assert_eq!(s.pixel(0, mid), Some(dark), "left edge at y={}", mid);
        }
    }

    #[test]
    fn cross_variant_differs_from_two_way() {
        let two = render(160, 8, generate_truchet_tile);
        let three = render(160, 8, generate_truchet_cross_tile);
        assert_ne!(two.pixmap().data(), three.pixmap().data());
    }
}
