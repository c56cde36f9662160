//! Self-similar tiles: block fractal, Hilbert curve and nested polygons.
//!
//! Recursion depth is not a parameter. It grows with the logarithm of the
//! tile size so the finest detail stays a few pixels wide at any size.

use crate::geometry::{inscribed_polygon, Line, Point, Polygon};
use crate::palette::Palette;
use crate::raster::{Pen, Surface};

use super::util::{scaled_width, TileContext};

/// Compass heading of the Hilbert turtle, as the index used for turning.
///
/// 0 = east, 1 = north, 2 = west, 3 = south (y grows downward).
const HEADINGS: [(f64, f64); 4] = [(1.0, 0.0), (0.0, -1.0), (-1.0, 0.0), (0.0, 1.0)];

fn log_level(size: f64, unit: f64, base: f64, max: i64) -> u32 {
    let raw = ((size / unit).ln() / base.ln()).floor();
    // NaN and negative logs (tiny tiles) fall back to a single level
    let level = if raw.is_finite() { raw as i64 } else { 1 };
    level.clamp(1, max) as u32
}

/// Hilbert recursion level for a tile: `floor(log2(size / 8))`, in 1..=7.
pub fn hilbert_level(size: f64) -> u32 {
    log_level(size, 8.0, 2.0, 7)
}

/// Block fractal recursion level: `floor(log3(size / 4))`, in 1..=6.
pub fn block_level(size: f64) -> u32 {
    log_level(size, 4.0, 3.0, 6)
}

/// Polygon fractal recursion depth: `floor(log2(size / 20))`, in 1..=5.
pub fn polygon_depth(size: f64) -> u32 {
    log_level(size, 20.0, 2.0, 5)
}

// ============================================================================
// BLOCK FRACTAL
// ============================================================================

/// Squares left after `level` rounds of keeping the four corners and centre of a 3x3 split.
///
/// Returns `(x, y, side)` for each of the `5^level` squares.
pub fn block_fractal_cells(origin: Point, size: f64, level: u32) -> Vec<(f64, f64, f64)> {
    let mut cells = Vec::with_capacity(5usize.pow(level));
    collect_blocks(origin.x, origin.y, size, level, &mut cells);
    cells
}

fn collect_blocks(x: f64, y: f64, size: f64, level: u32, out: &mut Vec<(f64, f64, f64)>) {
    if level == 0 {
        out.push((x, y, size));
        return;
    }
    let s3 = size / 3.0;
    for (i, j) in [(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (0.0, 2.0), (2.0, 2.0)] {
        collect_blocks(x + i * s3, y + j * s3, s3, level - 1, out);
    }
}

pub fn generate_block_fractal_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::LIGHT);

    let dark = ctx.color(Palette::DARK);
    for (x, y, s) in block_fractal_cells(ctx.origin, ctx.size, block_level(ctx.size)) {
        surface.fill_rect(x, y, s, s, dark);
    }
}

// ============================================================================
// HILBERT CURVE
// ============================================================================

/// Segments of a level-`level` Hilbert curve over a `size` square at `origin`.
///
/// The walk starts in the centre of the bottom-left cell heading east and
/// visits the centre of every one of the `4^level` cells, so it emits
/// `4^level - 1` segments of length `size / 2^level`.
pub fn hilbert_path(origin: Point, size: f64, level: u32) -> Vec<Line> {
    let step = size / 2f64.powi(level as i32);
    let start = origin.offset(step / 2.0, size - step / 2.0);
    let mut lines = Vec::with_capacity(hilbert_segments(level));
    hilbert_walk(level, 1, 0, start, step, &mut lines);
    lines
}

/// Number of segments in a level-`level` walk.
pub fn hilbert_segments(level: u32) -> usize {
    4usize.pow(level) - 1
}

/// One recursive step of the turtle walk.
///
/// `rot` is +1 or -1 and mirrors the sub-curve. `dir` is this call's own
/// heading; callees get a copy, so their turns never leak back here.
fn hilbert_walk(level: u32, rot: i32, dir: i32, pos: Point, step: f64, out: &mut Vec<Line>) -> Point {
    if level == 0 {
        return pos;
    }
    let mut dir = (dir + rot).rem_euclid(4);
    let mut pos = hilbert_walk(level - 1, -rot, dir, pos, step, out);
    pos = forward(dir, pos, step, out);
    dir = (dir - rot).rem_euclid(4);
    pos = hilbert_walk(level - 1, rot, dir, pos, step, out);
    pos = forward(dir, pos, step, out);
    pos = hilbert_walk(level - 1, rot, dir, pos, step, out);
    dir = (dir - rot).rem_euclid(4);
    pos = forward(dir, pos, step, out);
    hilbert_walk(level - 1, -rot, dir, pos, step, out)
}

fn forward(dir: i32, pos: Point, step: f64, out: &mut Vec<Line>) -> Point {
    let (dx, dy) = HEADINGS[dir.rem_euclid(4) as usize];
    let next = pos.offset(dx * step, dy * step);
    out.push(Line::between(pos, next));
    next
}

pub fn generate_hilbert_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::LIGHT);

    let level = hilbert_level(ctx.size);
    let lines = hilbert_path(ctx.origin, ctx.size, level);
    let step = ctx.size / 2f64.powi(level as i32);
    surface.stroke_segments(&lines, ctx.color(Palette::DARK), Pen::new(scaled_width(step, 3.0, 1.0)));
}

// ============================================================================
// POLYGON FRACTAL
// ============================================================================

/// Edges of a polygon recursively split into a shrunken copy plus one
/// trapezoid per side.
///
/// Each level draws the spokes joining outer and inner vertices along with
/// both rings, then recurses into the inner polygon and every trapezoid.
pub fn polygon_fractal_lines(seed: &Polygon, depth: u32, reduction: f64) -> Vec<Line> {
    let mut lines = Vec::new();
    subdivide(seed, depth, reduction, &mut lines);
    lines
}

fn subdivide(outer: &Polygon, depth: u32, reduction: f64, out: &mut Vec<Line>) {
    if depth == 0 {
        return;
    }
    let Some(center) = outer.centroid() else {
        return;
    };
    let inner = outer.scaled_towards(center, reduction);
    let n = outer.len();
    let (ov, iv) = (&outer.vertices, &inner.vertices);

    for i in 0..n {
        let j = (i + 1) % n;
        out.push(Line::between(ov[i], iv[i]));
        out.push(Line::between(ov[i], ov[j]));
        out.push(Line::between(iv[i], iv[j]));
    }

    subdivide(&inner, depth - 1, reduction, out);

    for i in 0..n {
        let j = (i + 1) % n;
        let trapezoid = Polygon::new(vec![ov[i], ov[j], iv[j], iv[i]]);
        subdivide(&trapezoid, depth - 1, reduction, out);
    }
}

pub fn generate_polygon_fractal_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    ctx.fill_background(surface, Palette::LIGHT);

    let sides = ctx.params.polygon_sides.max(3) as usize;
    let seed = inscribed_polygon(ctx.center(), ctx.size * 0.5, sides);
    let lines = polygon_fractal_lines(&seed, polygon_depth(ctx.size), ctx.params.polygon_reduction);
    surface.stroke_segments(&lines, ctx.color(Palette::DARK), Pen::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn levels_follow_size_logarithmically() {
        assert_eq!(hilbert_level(16.0), 1);
        assert_eq!(hilbert_level(150.0), 4);
        assert_eq!(hilbert_level(256.0), 5);
        assert_eq!(block_level(150.0), 3);
        assert_eq!(block_level(12.0), 1);
        assert_eq!(polygon_depth(160.0), 3);
    }

    #[test]
    fn levels_are_clamped() {
        assert_eq!(hilbert_level(1.0), 1);
        assert_eq!(hilbert_level(0.0), 1);
        assert_eq!(hilbert_level(1.0e9), 7);
        assert_eq!(block_level(2.0), 1);
        assert_eq!(block_level(1.0e9), 6);
        assert_eq!(polygon_depth(1.0e9), 5);
    }

    #[test]
    fn hilbert_visits_every_cell_once() {
        for level in 1..=4 {
            let size = 2f64.powi(level as i32) * 10.0;
            let lines = hilbert_path(Point::new(0.0, 0.0), size, level);
            assert_eq!(lines.len(), hilbert_segments(level));

            let mut visited = HashSet::new();
            visited.insert(cell_of(lines[0].start()));
            for l in &lines {
                assert!((l.length() - 10.0).abs() < 1e-9);
                assert!(visited.insert(cell_of(l.end())), "cell revisited at level {}", level);
            }
            assert_eq!(visited.len(), 4usize.pow(level));
        }
    }

    #[test]
    fn hilbert_path_is_connected_and_ends_bottom_right() {
        let lines = hilbert_path(Point::new(0.0, 0.0), 80.0, 3);
        for pair in lines.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        assert_eq!(lines[0].start(), Point::new(5.0, 75.0));
        assert_eq!(lines[lines.len() - 1].end(), Point::new(75.0, 75.0));
    }

    fn cell_of(p: Point) -> (i64, i64) {
        ((p.x / 10.0).floor() as i64, (p.y / 10.0).floor() as i64)
    }

    #[test]
    fn block_fractal_keeps_five_of_nine() {
        let cells = block_fractal_cells(Point::new(0.0, 0.0), 81.0, 2);
        assert_eq!(cells.len(), 25);
        assert!(cells.iter().all(|&(_, _, s)| (s - 9.0).abs() < 1e-9));
        // Edge-centre block of the first split is empty
        assert!(!cells.iter().any(|&(x, y, _)| x >= 27.0 && x < 54.0 && y < 27.0));
    }

    #[test]
    fn polygon_fractal_line_counts() {
        let seed = inscribed_polygon(Point::new(50.0, 50.0), 50.0, 4);
        assert_eq!(polygon_fractal_lines(&seed, 0, 0.5).len(), 0);
        assert_eq!(polygon_fractal_lines(&seed, 1, 0.5).len(), 12);
        // One level down: the inner square plus four trapezoids, 12 lines each
        assert_eq!(polygon_fractal_lines(&seed, 2, 0.5).len(), 12 + 5 * 12);
    }
}
