//! Shared setup for tile generators.

use crate::geometry::Point;
use crate::palette::{Color, Palette};
use crate::raster::Surface;
use crate::tile::TileParams;

/// Where and how a generator paints one tile.
///
/// Every generator receives the tile's top-left corner and edge length, so
/// the same code can paint at the surface origin (the cached tile) or at an
/// offset (gallery sheets).
///
/// # Example
/// ```ignore
/// let ctx = TileContext::new(Point::new(0.0, 0.0), 150.0, &palette, &params);
/// ctx.fill_background(surface, Palette::DARK);
/// let c = ctx.center(); // (75, 75)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TileContext<'a> {
    /// Top-left corner of the tile
    pub origin: Point,
    /// Edge length in pixels
    pub size: f64,
    pub palette: &'a Palette,
    pub params: &'a TileParams,
}

impl<'a> TileContext<'a> {
    pub fn new(origin: Point, size: f64, palette: &'a Palette, params: &'a TileParams) -> Self {
        Self { origin, size, palette, params }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.origin.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.origin.y
    }

    /// Centre of the tile.
    #[inline]
    pub fn center(&self) -> Point {
        self.origin.offset(self.size / 2.0, self.size / 2.0)
    }

    /// Point at fractions (fx, fy) of the tile, measured from the origin.
    #[inline]
    pub fn at(&self, fx: f64, fy: f64) -> Point {
        self.origin.offset(fx * self.size, fy * self.size)
    }

    #[inline]
    pub fn color(&self, index: usize) -> Color {
        self.palette.get(index)
    }

    /// Fill the whole tile with palette slot `index`.
    pub fn fill_background(&self, surface: &mut Surface, index: usize) {
        surface.fill_rect(self.x(), self.y(), self.size, self.size, self.color(index));
    }

    /// Clip further drawing to the tile square.
    pub fn clip(&self, surface: &mut Surface) {
        surface.clip_rect(self.x(), self.y(), self.size, self.size);
    }

    /// Integer edge length, truncated the way the pixel-grid formulas expect.
    #[inline]
    pub fn size_px(&self) -> i64 {
        self.size as i64
    }
}

/// Stroke width that grows with the tile but never drops below `min`.
#[inline]
pub fn scaled_width(size: f64, divisor: f64, min: f64) -> f64 {
    (size / divisor).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_and_fractions() {
        let palette = Palette::default();
        let params = TileParams::default();
        let ctx = TileContext::new(Point::new(10.0, 20.0), 100.0, &palette, &params);
        assert_eq!(ctx.center(), Point::new(60.0, 70.0));
        assert_eq!(ctx.at(0.25, 1.0), Point::new(35.0, 120.0));
    }

    #[test]
    fn scaled_width_has_floor() {
        assert_eq!(scaled_width(30.0, 60.0, 1.0), 1.0);
        assert_eq!(scaled_width(300.0, 60.0, 1.0), 5.0);
    }
}
