//! Tile cache and compositor.
//!
//! The [`Compositor`] owns the current descriptor, the editor and a single
//! cached tile raster. Rendering a viewport never re-runs a generator as
//! long as nothing that affects the tile has changed: the tile is painted
//! once and then blitted at every multiple of the tile size.
//!
//! ## Rust Lesson #26: Returning Borrows from `&mut self`
//!
//! [`Compositor::render_tile`] may have to fill the cache before it can
//! hand out a reference into it. `Option::insert` stores the value and
//! returns a reference to it in one step, so there is no separate
//! "look it up again" path that could fail.

use log::{debug, trace};
use tiny_skia::Pixmap;

use crate::action::{paint_user_tile, ActionLog, DrawAction, REFERENCE_SIZE};
use crate::editor::{Editor, StrokeKind, StrokeOutcome};
use crate::error::Result;
use crate::geometry::Point;
use crate::palette::{Color, Palette};
use crate::patterns::{TileContext, TileKind};
use crate::raster::{Pen, Surface};
use crate::tile::{TileDescriptor, TileParams};

/// Width of the in-progress stroke preview, in viewport pixels.
pub const GHOST_WIDTH: f64 = 2.0;

/// Render one tile of a procedural kind (or an empty user tile).
pub fn render_tile(desc: &TileDescriptor) -> Result<Pixmap> {
    let mut surface = Surface::square(desc.size)?;
    let ctx = TileContext::new(Point::default(), desc.size as f64, &desc.palette, &desc.params);
    desc.kind.paint(&mut surface, &ctx);
    Ok(surface.into_pixmap())
}

/// Render a hand-drawn tile of edge `size` by replaying `log`.
pub fn render_user_tile(log: &ActionLog, size: u32, palette: &Palette) -> Result<Pixmap> {
    let mut surface = Surface::square(size)?;
    paint_user_tile(&mut surface, Point::default(), size as f64, palette, log);
    Ok(surface.into_pixmap())
}

/// What the cached raster was produced from.
#[derive(Debug, Clone, PartialEq)]
enum CacheKey {
    Procedural(TileDescriptor),
    User { revision: u64, size: u32, palette: Palette },
}

struct CachedTile {
    key: CacheKey,
    tile: Pixmap,
}

/// Counters for cache behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered from the cache
    pub hits: u64,
    /// Requests that ran a generator or replayed the log
    pub renders: u64,
}

/// Current tile, editor and cached raster.
pub struct Compositor {
    descriptor: TileDescriptor,
    editor: Editor,
    cache: Option<CachedTile>,
    stats: CacheStats,
}

impl Compositor {
    pub fn new(descriptor: TileDescriptor) -> Self {
        Self { descriptor, editor: Editor::new(), cache: None, stats: CacheStats::default() }
    }

    pub fn descriptor(&self) -> &TileDescriptor {
        &self.descriptor
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn log(&self) -> &ActionLog {
        self.editor.log()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// True if the next [`Compositor::render_tile`] will be a cache hit.
    pub fn is_cached(&self) -> bool {
        self.cache.as_ref().is_some_and(|c| c.key == self.current_key())
    }

    // ------------------------------------------------------------------
    // Descriptor changes
    // ------------------------------------------------------------------

    pub fn set_descriptor(&mut self, descriptor: TileDescriptor) {
        if descriptor != self.descriptor {
            self.descriptor = descriptor;
            self.invalidate();
        }
    }

    pub fn set_kind(&mut self, kind: TileKind) {
        self.set_descriptor(self.descriptor.clone().with_kind(kind));
    }

    pub fn set_size(&mut self, size: u32) {
        self.set_descriptor(self.descriptor.clone().with_size(size));
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.set_descriptor(self.descriptor.clone().with_palette(palette));
    }

    pub fn set_params(&mut self, params: TileParams) {
        self.set_descriptor(self.descriptor.clone().with_params(params));
    }

    /// Drop the cached raster.
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            trace!("Tile cache cleared");
        }
    }

    // ------------------------------------------------------------------
    // Editing (points are viewport pixels; the tile repeats every `size`)
    // ------------------------------------------------------------------

    fn to_tile(&self, viewport: Point) -> Point {
        Editor::to_tile_point(viewport, self.descriptor.size as f64)
    }

    pub fn begin_stroke(&mut self, kind: StrokeKind, at: Point) {
        let p = self.to_tile(at);
        self.editor.begin_stroke(kind, p);
    }

    pub fn update_stroke(&mut self, at: Point) {
        let p = self.to_tile(at);
        self.editor.update_stroke(p);
    }

    /// Release the drag. Strokes take the palette's boundary colour so later
    /// fills stop at them.
    pub fn commit_stroke(&mut self, at: Point) -> StrokeOutcome {
        let p = self.to_tile(at);
        let color = self.descriptor.palette.boundary();
        let outcome = self.editor.commit_stroke(p, color);
        if outcome == StrokeOutcome::Committed {
            self.invalidate();
        }
        outcome
    }

    pub fn complete_arc(&mut self, through: Point) -> bool {
        let p = self.to_tile(through);
        let done = self.editor.complete_arc(p);
        if done {
            self.invalidate();
        }
        done
    }

    pub fn fill_at(&mut self, at: Point, color: Color) -> Result<Option<DrawAction>> {
        let p = self.to_tile(at);
        let action = self.editor.fill_at(p, color, &self.descriptor.palette)?;
        if action.is_some() {
            self.invalidate();
        }
        Ok(action)
    }

    pub fn undo(&mut self) -> bool {
        let before = self.editor.log().revision();
        let removed = self.editor.undo();
        if self.editor.log().revision() != before {
            self.invalidate();
        }
        removed
    }

    pub fn clear(&mut self) {
        let before = self.editor.log().revision();
        self.editor.clear();
        if self.editor.log().revision() != before {
            self.invalidate();
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn current_key(&self) -> CacheKey {
        match self.descriptor.kind {
            TileKind::User => CacheKey::User {
                revision: self.editor.log().revision(),
                size: self.descriptor.size,
                palette: self.descriptor.palette,
            },
            _ => CacheKey::Procedural(self.descriptor.clone()),
        }
    }

    /// The current tile, rendered only if the cached one is stale.
    pub fn render_tile(&mut self) -> Result<&Pixmap> {
        let key = self.current_key();
        let cached = match self.cache.take() {
            Some(cached) if cached.key == key => {
                self.stats.hits += 1;
                trace!("Tile cache hit for {}", self.descriptor.kind);
                cached
            }
            _ => {
                debug!("Rendering {} tile at {}px", self.descriptor.kind, self.descriptor.size);
                let tile = match self.descriptor.kind {
                    TileKind::User => render_user_tile(self.editor.log(), self.descriptor.size, &self.descriptor.palette)?,
                    _ => render_tile(&self.descriptor)?,
                };
                self.stats.renders += 1;
                CachedTile { key, tile }
            }
        };
        Ok(&self.cache.insert(cached).tile)
    }

    /// A `width x height` raster with the tile repeated from the top-left corner.
    pub fn composite(&mut self, width: u32, height: u32) -> Result<Pixmap> {
        let mut out = Surface::new(width, height)?;
        let tile = self.render_tile()?;
        let step = tile.width().max(1) as usize;
        for y in (0..height).step_by(step) {
            for x in (0..width).step_by(step) {
                out.draw_pixmap(tile, x as i32, y as i32);
            }
        }
        Ok(out.into_pixmap())
    }

    /// Like [`Compositor::composite`], plus the in-progress stroke drawn
    /// over every tile copy. The cache is not touched by the overlay.
    pub fn paint_viewport(&mut self, width: u32, height: u32) -> Result<Pixmap> {
        let pixmap = self.composite(width, height)?;
        let Some(ghost) = self.editor.ghost() else {
            return Ok(pixmap);
        };
        if self.descriptor.kind != TileKind::User {
            return Ok(pixmap);
        }

        let mut surface = Surface::from_pixmap(pixmap);
        let size = self.descriptor.size as f64;
        let scale = size / REFERENCE_SIZE as f64;
        let (from, to) = (ghost.start().scaled(scale), ghost.end().scaled(scale));
        let color = self.descriptor.palette.boundary();
        let pen = Pen::new(GHOST_WIDTH);

        let step = self.descriptor.size.max(1) as usize;
        for y in (0..height).step_by(step) {
            for x in (0..width).step_by(step) {
                let (dx, dy) = (x as f64, y as f64);
                surface.stroke_line(from.offset(dx, dy), to.offset(dx, dy), color, pen);
            }
        }
        Ok(surface.into_pixmap())
    }

    /// Final image for export: the tiling without any preview overlay.
    pub fn export_composite(&mut self, width: u32, height: u32) -> Result<Pixmap> {
        self.composite(width, height)
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(TileDescriptor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;

    fn user(size: u32) -> Compositor {
        Compositor::new(TileDescriptor::new(TileKind::User, size))
    }

    fn line(c: &mut Compositor, from: (f64, f64), to: (f64, f64)) -> StrokeOutcome {
        c.begin_stroke(StrokeKind::Line, Point::new(from.0, from.1));
        c.update_stroke(Point::new(to.0, to.1));
        c.commit_stroke(Point::new(to.0, to.1))
    }

    #[test]
    fn repeated_renders_hit_the_cache() {
        let mut c = Compositor::new(TileDescriptor::new(TileKind::Octagram1, 150));
        c.render_tile().unwrap();
        c.render_tile().unwrap();
        c.composite(400, 300).unwrap();
        assert_eq!(c.stats(), CacheStats { hits: 2, renders: 1 });
    }

    #[test]
    fn descriptor_changes_invalidate() {
        let mut c = Compositor::new(TileDescriptor::new(TileKind::Greek, 100));
        c.render_tile().unwrap();
        c.set_size(120);
        assert!(!c.is_cached());
        assert_eq!(c.render_tile().unwrap().width(), 120);
        c.set_palette(Palette::default().with(1, Color::BLACK));
        c.render_tile().unwrap();
        c.set_kind(TileKind::Hilbert);
        c.render_tile().unwrap();
        assert_eq!(c.stats().renders, 4);
    }

    #[test]
    fn setting_the_same_descriptor_keeps_the_cache() {
        let desc = TileDescriptor::new(TileKind::Tartan, 90);
        let mut c = Compositor::new(desc.clone());
        c.render_tile().unwrap();
        c.set_descriptor(desc);
        assert!(c.is_cached());
    }

    #[test]
    fn log_changes_invalidate_user_tiles() {
        let mut c = user(150);
        c.render_tile().unwrap();
        assert_eq!(line(&mut c, (10.0, 10.0), (100.0, 10.0)), StrokeOutcome::Committed);
        assert!(!c.is_cached());
        c.render_tile().unwrap();
        assert!(c.undo());
        assert!(!c.is_cached());
        c.render_tile().unwrap();
        assert_eq!(c.stats().renders, 3);
    }

    #[test]
    fn drag_preview_does_not_touch_the_cache() {
        let mut c = user(150);
        c.render_tile().unwrap();
        c.begin_stroke(StrokeKind::Line, Point::new(10.0, 75.0));
        c.update_stroke(Point::new(140.0, 75.0));
        let view = c.paint_viewport(300, 150).unwrap();
        assert!(c.is_cached());

        // Ghost shows in both tile copies in the boundary colour
        let boundary = Palette::default().boundary();
        let at = |x, y| Color::from(view.pixel(x, y).unwrap().demultiply());
        assert_eq!(at(75, 75), boundary);
        assert_eq!(at(225, 75), boundary);

        // Export leaves it out
        let export = c.export_composite(300, 150).unwrap();
        assert_eq!(Color::from(export.pixel(75, 75).unwrap().demultiply()), Palette::default().light());
    }

    #[test]
    fn composite_repeats_the_tile() {
        let mut c = Compositor::new(TileDescriptor::new(TileKind::Checkered, 50));
        let out = c.composite(125, 100).unwrap();
        let p = Palette::default();
        let at = |x, y| Color::from(out.pixel(x, y).unwrap().demultiply());
        assert_eq!(at(10, 10), p.dark());
        assert_eq!(at(60, 10), p.dark());
        assert_eq!(at(110, 60), p.dark());
        assert_eq!(at(35, 10), p.light());
        assert_eq!(at(85, 10), p.light());
    }

    #[test]
    fn viewport_points_wrap_onto_the_tile() {
        let mut c = user(150);
        // Drawn in the second tile copy
        line(&mut c, (160.0, 20.0), (290.0, 20.0));
        match c.log().get(0) {
            Some(DrawAction::Line { from, to, .. }) => {
                assert_eq!(*from, Point::new(10.0, 20.0));
                assert_eq!(*to, Point::new(140.0, 20.0));
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn zero_size_is_an_error() {
        let mut c = Compositor::new(TileDescriptor::new(TileKind::Greek, 0));
        assert!(c.render_tile().is_err());
        assert!(render_tile(&TileDescriptor::new(TileKind::Greek, 0)).is_err());
    }
}
