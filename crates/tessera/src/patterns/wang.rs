//! Wang tiles: edge-labelled squares assembled so every shared edge matches.
//!
//! The tile set is all 16 ways of labelling four edges with two labels. A
//! grid is filled row by row; each cell must agree with the cell above and
//! the cell to its left, and the last row and column must also agree with
//! the first ones so the finished grid wraps around seamlessly.
//!
//! Each cell is drawn as four triangles meeting in its centre, coloured by
//! the label of the edge they sit on.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::geometry::triangle;
use crate::palette::Palette;
use crate::raster::Surface;
use crate::rng::SeededRng;

use super::util::TileContext;

/// Number of distinct edge labels.
pub const WANG_LABELS: u8 = 2;

/// One square with a label on each edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WangTile {
    pub top: u8,
    pub right: u8,
    pub bottom: u8,
    pub left: u8,
}

impl WangTile {
    /// Every labelling of the four edges.
    pub fn full_set() -> Vec<WangTile> {
        let n = WANG_LABELS;
        let mut set = Vec::with_capacity((n as usize).pow(4));
        for top in 0..n {
            for right in 0..n {
                for bottom in 0..n {
                    for left in 0..n {
                        set.push(WangTile { top, right, bottom, left });
                    }
                }
            }
        }
        set
    }
}

/// Labels a new cell must respect. `None` means unconstrained.
#[derive(Debug, Clone, Copy)]
struct Constraints {
    top: u8,
    left: u8,
    right: Option<u8>,
    bottom: Option<u8>,
}

impl Constraints {
    fn allows(&self, t: &WangTile) -> bool {
        t.top == self.top
            && t.left == self.left
            && self.right.is_none_or(|r| t.right == r)
            && self.bottom.is_none_or(|b| t.bottom == b)
    }
}

/// A square grid of Wang tiles, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WangGrid {
    n: usize,
    cells: Vec<WangTile>,
}

impl WangGrid {
    /// Solve an `n x n` grid (at least 1x1) with the fixed pattern seed.
    pub fn generate(n: usize) -> WangGrid {
        Self::generate_with(n, &mut SeededRng::for_pattern())
    }

    /// Solve an `n x n` grid drawing choices from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> WangGrid {
        let n = n.max(1);
        let tile_set = WangTile::full_set();
        let mut cells: Vec<WangTile> = Vec::with_capacity(n * n);

        for row in 0..n {
            for col in 0..n {
                let top = if row > 0 { cells[(row - 1) * n + col].bottom } else { rng.random_range(0..WANG_LABELS) };
                let left = if col > 0 { cells[row * n + col - 1].right } else { rng.random_range(0..WANG_LABELS) };
                // In a one-wide grid the wrap partner is the cell itself.
                let right = (col == n - 1).then(|| if col == 0 { left } else { cells[row * n].left });
                let bottom = (row == n - 1).then(|| if row == 0 { top } else { cells[col].top });
                let constraints = Constraints { top, left, right, bottom };

                let candidates: Vec<WangTile> = tile_set.iter().copied().filter(|t| constraints.allows(t)).collect();
                // With both labels available on every edge some tile always fits.
                let Some(&tile) = candidates.choose(rng) else {
                    unreachable!("no Wang tile satisfies {:?}", constraints);
                };
                cells.push(tile);
            }
        }

        WangGrid { n, cells }
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> Option<WangTile> {
        if row >= self.n || col >= self.n {
            return None;
        }
        self.cells.get(row * self.n + col).copied()
    }

    pub fn cells(&self) -> &[WangTile] {
        &self.cells
    }

    /// True when every pair of neighbours agrees, wrapping at the edges.
    pub fn is_seamless(&self) -> bool {
        let n = self.n;
        (0..n).all(|row| {
            (0..n).all(|col| {
                let here = self.cells[row * n + col];
                let east = self.cells[row * n + (col + 1) % n];
                let south = self.cells[((row + 1) % n) * n + col];
                here.right == east.left && here.bottom == south.top
            })
        })
    }
}

/// Draw a freshly solved `grid_cells x grid_cells` Wang grid across the tile.
pub fn generate_wang_tile(surface: &mut Surface, ctx: &TileContext<'_>) {
    let grid = WangGrid::generate(ctx.params.grid_cells as usize);
    let t = ctx.size / grid.size() as f64;
    let mid = t * 0.5;

    ctx.fill_background(surface, Palette::LIGHT);
    // Neighbouring triangles must not leave anti-aliased seams between them.
    surface.set_anti_alias(false);
    for row in 0..grid.size() {
        for col in 0..grid.size() {
            let Some(tile) = grid.get(row, col) else { continue };
            let o = ctx.origin.offset(col as f64 * t, row as f64 * t);
            let center = o.offset(mid, mid);
            let (tl, tr, bl, br) = (o, o.offset(t, 0.0), o.offset(0.0, t), o.offset(t, t));

            surface.fill_polygon(&triangle(tl, center, tr), ctx.color(tile.top as usize));
            surface.fill_polygon(&triangle(tr, center, br), ctx.color(tile.right as usize));
            surface.fill_polygon(&triangle(bl, center, br), ctx.color(tile.bottom as usize));
            surface.fill_polygon(&triangle(tl, center, bl), ctx.color(tile.left as usize));
        }
    }
    surface.set_anti_alias(true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::tile::TileParams;

    #[test]
    fn full_set_has_sixteen_distinct_tiles() {
        let set = WangTile::full_set();
        assert_eq!(set.len(), 16);
        let unique: std::collections::HashSet<_> = set.iter().collect();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn grids_are_seamless_for_many_sizes() {
        for n in 1..=12 {
            let grid = WangGrid::generate(n);
            assert_eq!(grid.cells().len(), n * n);
            assert!(grid.is_seamless(), "{}x{} grid has a mismatched edge", n, n);
        }
    }

    #[test]
    fn grids_are_seamless_for_other_seeds() {
        for seed in 1..50 {
            let grid = WangGrid::generate_with(7, &mut SeededRng::new(seed));
            assert!(grid.is_seamless(), "seed {}", seed);
        }
    }

    #[test]
    fn every_cell_comes_from_the_tile_set() {
        let set = WangTile::full_set();
        let grid = WangGrid::generate(8);
        assert!(grid.cells().iter().all(|t| set.contains(t)));
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(WangGrid::generate(9), WangGrid::generate(9));
    }

    #[test]
    fn out_of_range_lookup_is_none() {
        let grid = WangGrid::generate(3);
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 3).is_none());
        assert!(grid.get(2, 2).is_some());
    }

    #[test]
    fn triangles_use_edge_label_colours() {
        let palette = Palette::default();
        let params = TileParams { grid_cells: 4, ..TileParams::default() };
        let mut surface = Surface::square(160).unwrap();
        let ctx = TileContext::new(Point::new(0.0, 0.0), 160.0, &palette, &params);
        generate_wang_tile(&mut surface, &ctx);

        let grid = WangGrid::generate(4);
        let cell = grid.get(0, 0).unwrap();
        // Cell (0, 0) spans 0..40; sample just inside each edge's triangle
        assert_eq!(surface.pixel(20, 3), Some(palette.get(cell.top as usize)));
        assert_eq!(surface.pixel(36, 20), Some(palette.get(cell.right as usize)));
        assert_eq!(surface.pixel(20, 36), Some(palette.get(cell.bottom as usize)));
        assert_eq!(surface.pixel(3, 20), Some(palette.get(cell.left as usize)));
    }
}
