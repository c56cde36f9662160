//! Line-and-arc motifs: crossed square, interlaced circles, interlocking loops.

use crate::palette::{Color, Palette};
use crate::raster::{Pen, Surface};

use super::util::{scaled_width, TileContext};

/// Both diagonals with a half-size square outline in the middle.
pub fn generate_crossed_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::DARK);

    let pen = Pen::new(scaled_width(ctx.size, 30.0, 1.0));
    let accent = ctx.color(Palette::ACCENT);
    surface.stroke_line(ctx.at(0.0, 0.0), ctx.at(1.0, 1.0), accent, pen);
    surface.stroke_line(ctx.at(1.0, 0.0), ctx.at(0.0, 1.0), accent, pen);

    let size = ctx.size_px();
    let quarter = (size / 4) as f64;
    let half = (size / 2) as f64;
    surface.stroke_rect(ctx.x() + quarter, ctx.y() + quarter, half, half, ctx.color(Palette::LIGHT), pen);
}

/// Quarter circles centred on each corner around an inscribed circle.
///
/// Repeated, the corner arcs join into full circles that interlace with
/// the inscribed ones.
pub fn generate_interlaced_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::DARK);

    let pen = Pen::new(scaled_width(ctx.size, 40.0, 1.0));
    let accent = ctx.color(Palette::ACCENT);
    let size = ctx.size;
    let r = (ctx.size_px() / 2) as f64;
    let (x, y) = (ctx.x(), ctx.y());

    surface.stroke_arc(x - r, y - r, size, size, 0.0, -90.0, accent, pen);
    surface.stroke_arc(x + r, y - r, size, size, 180.0, 90.0, accent, pen);
    surface.stroke_arc(x - r, y + r, size, size, 0.0, 90.0, accent, pen);
    surface.stroke_arc(x + r, y + r, size, size, 180.0, -90.0, accent, pen);

    surface.stroke_oval(x, y, size, size, ctx.color(Palette::LIGHT), pen);
}

/// Rounded loop threaded through two vertical and two horizontal bands.
///
/// Laid out on an integer grid of `size / 16` pixel strokes. The short
/// "patch" segments repaint the band crossings so each band alternately
/// passes over and under the loop.
pub fn generate_interlocking_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::LIGHT);

    let size = ctx.size_px();
    let stroke = size / 16;
    let stroke2 = stroke * 2;
    let stroke3 = stroke * 3;
    let dim = size - stroke2 * 2;
    let pen = Pen::new(stroke.max(1) as f64);

    let vertical = ctx.color(Palette::ACCENT);
    let x1 = dim / 2 + stroke;
    let x2 = dim / 2 + stroke3;
    seg(surface, ctx, (x1, 0), (x1, size), vertical, pen);
    seg(surface, ctx, (x2, 0), (x2, size), vertical, pen);

    let horizontal = ctx.color(Palette::SECONDARY);
    let y1 = dim / 2 + stroke;
    let y2 = dim / 2 + stroke3;
    seg(surface, ctx, (0, y1), (size, y1), horizontal, pen);
    seg(surface, ctx, (0, y2), (size, y2), horizontal, pen);

    let loop_color = ctx.color(Palette::DARK);
    let arc = dim / 3;
    surface.stroke_round_rect(
        ctx.x() + stroke2 as f64,
        ctx.y() + stroke2 as f64,
        dim as f64,
        dim as f64,
        arc as f64,
        loop_color,
        pen,
    );

    let r = arc / 2;
    let corner_arcs = [
        (stroke3 - r - 1, dim - r + stroke, 90.0),
        (stroke - r + dim, dim - r + stroke, 180.0),
        (stroke - r + dim, stroke3 - r, 270.0),
        (stroke3 - r, stroke3 - r, 0.0),
    ];
    for (ax, ay, start) in corner_arcs {
        surface.stroke_arc(
            ctx.x() + ax as f64,
            ctx.y() + ay as f64,
            arc as f64,
            arc as f64,
            start,
            -90.0,
            loop_color,
            pen,
        );
    }

    let patches = [
        ((0, stroke3 + r), (stroke2 + 1, stroke3 + r)),
        ((0, dim - r + stroke), (stroke, dim - r + stroke)),
        ((stroke3 + r, 0), (stroke3 + r, stroke)),
        ((stroke3 + r, dim + stroke2), (stroke3 + r, size)),
        ((dim - stroke, 0), (dim - stroke, stroke2 + 1)),
        ((dim - stroke, dim + stroke3), (dim - stroke, size)),
        ((dim + stroke3, stroke3 + r), (size, stroke3 + r)),
        ((size, dim - r + stroke), (dim + stroke2, dim - r + stroke)),
    ];
    for (a, b) in patches {
        seg(surface, ctx, a, b, loop_color, pen);
    }

    seg(surface, ctx, (x1, stroke), (x1, stroke3), vertical, pen);
    seg(surface, ctx, (x1, y2), (x1, y2 + stroke), vertical, pen);
    seg(surface, ctx, (x2, dim + stroke), (x2, dim + stroke3), vertical, pen);
    seg(surface, ctx, (x2, y1), (x2, y1 + stroke), vertical, pen);

    seg(surface, ctx, (dim, y1), (dim + stroke3, y1), horizontal, pen);
    seg(surface, ctx, (stroke, y2), (stroke3, y2), horizontal, pen);
}

/// Segment between two tile-local integer grid points.
fn seg(surface: &mut Surface, ctx: &TileContext<'_>, a: (i64, i64), b: (i64, i64), color: Color, pen: Pen) {
    surface.stroke_line(
        ctx.origin.offset(a.0 as f64, a.1 as f64),
        ctx.origin.offset(b.0 as f64, b.1 as f64),
        color,
        pen,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
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
    fn crossed_diagonals_meet_in_the_middle() {
        let s = render(150, generate_crossed_tile);
        let p = Palette::default();
        assert_eq!(s.pixel(75, 75), Some(p.accent()));
        assert_eq!(s.pixel(75, 10), Some(p.dark()));
    }

    #[test]
    fn interlaced_circle_touches_edge_midpoints() {
        let s = render(160, generate_interlaced_tile);
        let p = Palette::default();
        // Inscribed circle crosses the top edge midpoint
        assert_eq!(s.pixel(80, 0), Some(p.light()));
        // Tile centre stays background
        assert_eq!(s.pixel(80, 80), Some(p.dark()));
    }

    #[test]
    fn interlocking_bands_cross_the_tile() {
        let s = render(160, generate_interlocking_tile);
        let p = Palette::default();
        // stroke 10, dim 120: vertical bands at x = 70 and 90 run edge to edge
        assert_eq!(s.pixel(70, 0), Some(p.accent()));
        assert_eq!(s.pixel(90, 159), Some(p.accent()));
        // horizontal bands at y = 70 and 90
        assert_eq!(s.pixel(0, 70), Some(p.secondary()));
        assert_eq!(s.pixel(5, 5), Some(p.light()));
    }
}
