//! Boundary-aware flood fill for hand-drawn tiles.
//!
//! The fill reads a snapshot of the tile and writes into a separate
//! transparent patch of the same size, so the result can be stored as one
//! action and blitted over the tile later.
//!
//! ## Rust Lesson #25: VecDeque as a Work Queue
//!
//! `VecDeque` is a ring buffer: `push_back` and `pop_front` are both O(1),
//! which makes it the standard queue for breadth-first walks. A plain `Vec`
//! used as a stack would fill the same region in a different order.

use std::collections::VecDeque;

use tiny_skia::Pixmap;

use crate::error::{Result, TileError};
use crate::geometry::Point;
use crate::palette::Color;

/// Fill the 4-connected region of `snapshot` around `seed` with `fill`.
///
/// Pixels whose RGB equals `boundary` are walls; alpha is ignored in that
/// comparison. Returns a transparent pixmap the size of `snapshot` holding
/// only the filled pixels. A seed outside the snapshot or on a wall gives
/// an empty patch.
pub fn flood_fill(snapshot: &Pixmap, seed: Point, fill: Color, boundary: Color) -> Result<Pixmap> {
    let (w, h) = (snapshot.width(), snapshot.height());
    let mut patch = Pixmap::new(w, h).ok_or(TileError::EmptySurface { width: w, height: h })?;

    let (sx, sy) = (seed.x.floor(), seed.y.floor());
    if sx < 0.0 || sy < 0.0 || sx >= w as f64 || sy >= h as f64 {
        return Ok(patch);
    }

    let (wu, hu) = (w as usize, h as usize);
    let source = snapshot.pixels();
    let is_wall = |idx: usize| Color::from(source[idx].demultiply()).same_rgb(&boundary);

    let seed_idx = sy as usize * wu + sx as usize;
    if is_wall(seed_idx) {
        return Ok(patch);
    }

    let paint = fill.to_premultiplied();
    let out = patch.pixels_mut();
    let mut visited = vec![false; wu * hu];
    let mut queue = VecDeque::with_capacity(wu.max(hu) * 4);
    visited[seed_idx] = true;
    queue.push_back(seed_idx);

    while let Some(idx) = queue.pop_front() {
        out[idx] = paint;
        let (x, y) = (idx % wu, idx / wu);

        let mut visit = |n: usize| {
            if !visited[n] && !is_wall(n) {
                visited[n] = true;
                queue.push_back(n);
            }
        };
        if x + 1 < wu {
            visit(idx + 1);
        }
        if x > 0 {
            visit(idx - 1);
        }
        if y + 1 < hu {
            visit(idx + wu);
        }
        if y > 0 {
            visit(idx - wu);
        }
    }

    Ok(patch)
}

/// Number of non-transparent pixels in a patch.
pub fn filled_pixels(patch: &Pixmap) -> usize {
    patch.pixels().iter().filter(|p| p.alpha() > 0).count()
}
