//! Straight-edged tiles: Greek meander, octagons, rotated squares, checks and tartan.

use std::f64::consts::{PI, SQRT_2};

use crate::geometry::{regular_polygon, rotated_square, Polygon};
use crate::palette::Palette;
use crate::raster::{Pen, Surface};

use super::util::TileContext;

/// Meander outline on an 8x8 lattice, in lattice units.
const GREEK_PATH: [(f64, f64); 18] = [
    (0.0, 1.0), (1.0, 1.0), (1.0, 7.0), (6.0, 7.0), (6.0, 4.0), (5.0, 4.0),
    (5.0, 6.0), (2.0, 6.0), (2.0, 1.0), (8.0, 1.0), (8.0, 2.0), (3.0, 2.0),
    (3.0, 5.0), (4.0, 5.0), (4.0, 3.0), (7.0, 3.0), (7.0, 8.0), (0.0, 8.0),
];

/// Octagon side as a fraction of the tile edge.
///
/// With this ratio the octagon and the squares on its straight sides exactly
/// span the tile, so neighbouring tiles share the squares.
pub fn octagon_ratio() -> f64 {
    1.0 / (3.0 + SQRT_2)
}

/// Greek key: one meander band whose ends line up with the next tile.
pub fn generate_greek_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::LIGHT);

    let step = ctx.size / 8.0;
    let meander = Polygon::new(
        GREEK_PATH
            .iter()
            .map(|&(gx, gy)| ctx.origin.offset(gx * step, gy * step))
            .collect(),
    );
    let dark = ctx.color(Palette::DARK);
    surface.fill_polygon(&meander, dark);
    surface.stroke_polygon(&meander, dark, Pen::default());
}

/// Central octagon with squares on its four axis-aligned sides.
pub fn generate_octagon_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::DARK);

    let c = ctx.center();
    let side = ctx.size * octagon_ratio();
    let accent = ctx.color(Palette::ACCENT);
    let octagon = regular_polygon(c, side, 8, 0.0);
    surface.fill_polygon(&octagon, accent);
    surface.stroke_polygon(&octagon, accent, Pen::default());

    ctx.clip(surface);
    let offset = side * (1.0 + 1.0 / SQRT_2);
    let secondary = ctx.color(Palette::SECONDARY);
    for (dx, dy) in [(0.0, offset), (0.0, -offset), (-offset, 0.0), (offset, 0.0)] {
        let square = regular_polygon(c.offset(dx, dy), side, 4, 0.0);
        surface.fill_polygon(&square, secondary);
        surface.stroke_polygon(&square, secondary, Pen::default());
    }
    surface.reset_clip();
}

/// Four squares tilted by ±30° whose corners touch, leaving rhombus gaps.
pub fn generate_squares_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::DARK);

    let a = PI / 6.0;
    let (sin_t, cos_t) = a.sin_cos();
    let side = ctx.size / (2.0 * (cos_t + sin_t));
    let offset = (side / 2.0) * (cos_t + sin_t);

    let c = ctx.center();
    let placements = [(-offset, -offset, a), (offset, -offset, -a), (-offset, offset, -a), (offset, offset, a)];
    let secondary = ctx.color(Palette::SECONDARY);
    for (dx, dy, angle) in placements {
        surface.fill_polygon(&rotated_square(c.offset(dx, dy), side, angle), secondary);
    }
}

/// 2x2 checkerboard.
pub fn generate_checkered_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    let size = ctx.size_px() as f64;
    let half = (ctx.size_px() / 2) as f64;
    // Second row/column absorbs the odd pixel so the tile is fully covered.
    let spans = [(0.0, half), (half, size - half)];
    for (i, &(x0, w)) in spans.iter().enumerate() {
        for (j, &(y0, h)) in spans.iter().enumerate() {
            let slot = if i == j { Palette::DARK } else { Palette::LIGHT };
            surface.fill_rect(ctx.x() + x0, ctx.y() + y0, w, h, ctx.color(slot));
        }
    }
}

/// Half-transparent crossing bands with a thin accent thread through each.
pub fn generate_tartan_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::SECONDARY);

    let half = (ctx.size_px() / 2) as f64;
    let band = ctx.color(Palette::DARK).with_alpha(128);
    surface.fill_rect(ctx.x(), ctx.y(), half, ctx.size, band);
    surface.fill_rect(ctx.x(), ctx.y(), ctx.size, half, band);

    let quarter = (ctx.size_px() / 4) as f64;
    let thread = ctx.color(Palette::ACCENT);
    let pen = Pen::new(2.0);
    surface.stroke_line(
        ctx.origin.offset(quarter, 0.0),
        ctx.origin.offset(quarter, ctx.size),
        thread,
        pen,
    );
    surface.stroke_line(
        ctx.origin.offset(0.0, quarter),
        ctx.origin.offset(ctx.size, quarter),
        thread,
        pen,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::palette::Color;
    use crate::tile::TileParams;

    fn render(size: u32, f: impl Fn(&mut Surface, &TileContext<'_>)) -> Surface {
        let palette = Palette::default();
        let params = TileParams::default();
        let mut surface = Surface::square(size).unwrap();
        let ctx = TileContext::new(Point::new(0.0, 0.0), size as f64, &palette, &params);
        f(&mut surface, &ctx);
        surface
    }

    #[test]
    fn greek_band_enters_and_leaves_on_opposite_edges() {
        let s = render(160, generate_greek_tile);
        let dark = Palette::default().dark();
        // The band runs along the bottom row (y in 7..8 lattice units)...
        assert_eq!(s.pixel(80, 150), Some(dark));
        // ...and exits the right edge at y in 1..2
        assert_eq!(s.pixel(158, 30), Some(dark));
        // Lattice cell (0, 0) is background
        assert_eq!(s.pixel(5, 5), Some(Palette::default().light()));
    }

    #[test]
    fn octagon_ratio_spans_the_tile() {
        let d = octagon_ratio();
        // octagon width + two square sides = 1
        let octagon_width = d * (1.0 + SQRT_2);
        assert!((octagon_width + 2.0 * d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn octagon_edges_show_squares() {
        let s = render(150, generate_octagon_tile);
        let p = Palette::default();
        assert_eq!(s.pixel(75, 75), Some(p.accent()));
        assert_eq!(s.pixel(75, 2), Some(p.secondary()));
        assert_eq!(s.pixel(2, 75), Some(p.secondary()));
        assert_eq!(s.pixel(2, 2), Some(p.dark()));
    }

    #[test]
    fn checkered_covers_odd_sizes() {
        let s = render(151, generate_checkered_tile);
        let p = Palette::default();
        assert_eq!(s.pixel(150, 150), Some(p.dark()));
        assert_eq!(s.pixel(150, 0), Some(p.light()));
        assert_eq!(s.pixel(0, 0), Some(p.dark()));
    }

    #[test]
    fn tartan_overlap_is_darker_than_single_band() {
        let s = render(100, generate_tartan_tile);
        let overlap = s.pixel(10, 10).unwrap();
        let single = s.pixel(80, 10).unwrap();
        let plain = s.pixel(80, 80).unwrap();
        assert_eq!(plain, Palette::default().secondary());
        let lum = |c: Color| c.r as u32 + c.g as u32 + c.b as u32;
        assert!(lum(overlap) < lum(single));
        assert!(lum(single) < lum(plain));
    }

    #[test]
    fn squares_leave_center_gap() {
        let s = render(150, generate_squares_tile);
        let p = Palette::default();
        assert_eq!(s.pixel(75, 75), Some(p.dark()));
        assert_eq!(s.pixel(40, 40), Some(p.secondary()));
    }
}
