//! Hand-drawn tile content: the action log and how it is rendered.
//!
//! Actions are recorded in reference-tile coordinates, a fixed
//! [`REFERENCE_SIZE`] square, and scaled to whatever size the tile is
//! rendered at. A log is append-only apart from undo (drop the newest
//! action) and clear (drop everything).
//!
//! ## Rust Lesson #24: Arc for Shared Buffers
//!
//! A fill action carries a whole pixmap. Wrapping it in
//! [`std::sync::Arc`] means cloning the log, or handing an action back to
//! the caller, bumps a reference count instead of copying pixels.

use std::sync::Arc;

use tiny_skia::Pixmap;

use crate::geometry::Point;
use crate::palette::{Color, Palette};
use crate::raster::{Pen, Surface};

/// Edge length of the coordinate space actions are recorded in.
pub const REFERENCE_SIZE: u32 = 150;

/// Width of hand-drawn lines and arcs, in output pixels.
pub const STROKE_WIDTH: f64 = 3.0;

/// One committed drawing operation.
#[derive(Debug, Clone)]
pub enum DrawAction {
    Line { from: Point, to: Point, color: Color },
    /// Curve from `start` to `end` passing through `through`; a bare chord when `through` is `None`.
    Arc { start: Point, end: Point, through: Option<Point>, color: Color },
    /// Reference-size transparent pixmap holding only the filled pixels.
    Fill { patch: Arc<Pixmap> },
}

impl DrawAction {
    /// Draw at the surface origin with reference coordinates multiplied by `scale`.
    pub fn render(&self, surface: &mut Surface, scale: f64) {
        self.render_at(surface, Point::default(), scale);
    }

    /// Draw with the reference tile's corner placed at `origin`.
    pub fn render_at(&self, surface: &mut Surface, origin: Point, scale: f64) {
        let place = |p: Point| {
            let s = p.scaled(scale);
            origin.offset(s.x, s.y)
        };
        let pen = Pen::round(STROKE_WIDTH);
        match self {
            DrawAction::Line { from, to, color } => {
                surface.stroke_line(place(*from), place(*to), *color, pen);
            }
            DrawAction::Arc { start, end, through: Some(through), color } => {
                let ctrl = quad_control(*start, *end, *through);
                surface.stroke_quad(place(*start), place(ctrl), place(*end), *color, pen);
            }
            DrawAction::Arc { start, end, through: None, color } => {
                surface.stroke_line(place(*start), place(*end), *color, pen);
            }
            DrawAction::Fill { patch } => {
                surface.draw_pixmap_scaled(patch, origin.x, origin.y, scale);
            }
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            DrawAction::Line { color, .. } | DrawAction::Arc { color, .. } => Some(*color),
            DrawAction::Fill { .. } => None,
        }
    }
}

/// Control point of the quadratic Bézier from `start` to `end` that
/// passes through `through` at t = 1/2.
pub fn quad_control(start: Point, end: Point, through: Point) -> Point {
    let mid = start.midpoint(end);
    Point::new(2.0 * through.x - mid.x, 2.0 * through.y - mid.y)
}

/// Ordered list of committed actions.
///
/// Every mutation bumps [`ActionLog::revision`], so a cache can tell two
/// states of the log apart without comparing pixmaps.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    actions: Vec<DrawAction>,
    revision: u64,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: DrawAction) {
        self.actions.push(action);
        self.revision += 1;
    }

    /// Drop the newest action. Returns `None` and changes nothing when empty.
    pub fn undo(&mut self) -> Option<DrawAction> {
        let action = self.actions.pop()?;
        self.revision += 1;
        Some(action)
    }

    /// Drop every action. No-op on an empty log.
    pub fn clear(&mut self) {
        if self.actions.is_empty() {
            return;
        }
        self.actions.clear();
        self.revision += 1;
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawAction> {
        self.actions.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DrawAction> {
        self.actions.get(index)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl<'a> IntoIterator for &'a ActionLog {
    type Item = &'a DrawAction;
    type IntoIter = std::slice::Iter<'a, DrawAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// Paint a hand-drawn tile: light ground, grey top and left edge marks,
/// then every action in order, all scaled from reference to `size`.
pub fn paint_user_tile(surface: &mut Surface, origin: Point, size: f64, palette: &Palette, log: &ActionLog) {
    surface.fill_rect(origin.x, origin.y, size, size, palette.light());
    surface.fill_rect(origin.x, origin.y, size, 1.0, Color::GRAY);
    surface.fill_rect(origin.x, origin.y, 1.0, size, Color::GRAY);

    surface.clip_rect(origin.x, origin.y, size, size);
    let scale = size / REFERENCE_SIZE as f64;
    for action in log {
        action.render_at(surface, origin, scale);
    }
    surface.reset_clip();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> DrawAction {
        DrawAction::Line { from: Point::new(x1, y1), to: Point::new(x2, y2), color: Color::BLACK }
    }

    #[test]
    fn undo_drops_newest_first() {
        let mut log = ActionLog::new();
        log.push(line(0.0, 0.0, 10.0, 0.0));
        log.push(line(0.0, 5.0, 10.0, 5.0));
        log.push(line(0.0, 9.0, 10.0, 9.0));
        log.undo();
        log.undo();
        assert_eq!(log.len(), 1);
        match log.get(0) {
            Some(DrawAction::Line { from, .. }) => assert_eq!(*from, Point::new(0.0, 0.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_undo_and_clear_keep_revision() {
        let mut log = ActionLog::new();
        assert!(log.undo().is_none());
        log.clear();
        assert_eq!(log.revision(), 0);

        log.push(line(0.0, 0.0, 1.0, 1.0));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.revision(), 2);
    }

    #[test]
    fn quad_control_puts_midpoint_on_through() {
        let (s, e, t) = (Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(50.0, 40.0));
        let c = quad_control(s, e, t);
        assert_eq!(c, Point::new(50.0, 80.0));
        // B(1/2) = (s + 2c + e) / 4
        let mid = Point::new((s.x + 2.0 * c.x + e.x) / 4.0, (s.y + 2.0 * c.y + e.y) / 4.0);
        assert_eq!(mid, t);
    }

    #[test]
    fn empty_user_tile_has_grey_edges() {
        let palette = Palette::default();
        let mut surface = Surface::square(150).unwrap();
        paint_user_tile(&mut surface, Point::new(0.0, 0.0), 150.0, &palette, &ActionLog::new());
        assert_eq!(surface.pixel(70, 0), Some(Color::GRAY));
        assert_eq!(surface.pixel(0, 70), Some(Color::GRAY));
        assert_eq!(surface.pixel(70, 70), Some(palette.light()));
        assert_eq!(surface.pixel(149, 149), Some(palette.light()));
    }

    #[test]
    fn lines_scale_with_the_tile() {
        let palette = Palette::default();
        let mut log = ActionLog::new();
        log.push(line(10.0, 10.0, 140.0, 140.0));
        let mut surface = Surface::square(300).unwrap();
        paint_user_tile(&mut surface, Point::new(0.0, 0.0), 300.0, &palette, &log);

        for t in [20, 100, 150, 279] {
            assert_eq!(surface.pixel(t, t), Some(Color::BLACK), "diagonal at {}", t);
        }
        assert_eq!(surface.pixel(14, 14), Some(palette.light()));
        assert_eq!(surface.pixel(286, 286), Some(palette.light()));
        assert_eq!(surface.pixel(100, 200), Some(palette.light()));
    }

    #[test]
    fn fill_patch_is_scaled() {
        let mut patch = Pixmap::new(150, 150).unwrap();
        patch.fill_rect(
            tiny_skia::Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap(),
            &tiny_skia::Paint::default(),
            tiny_skia::Transform::identity(),
            None,
        );
        let action = DrawAction::Fill { patch: Arc::new(patch) };
        let mut surface = Surface::square(300).unwrap();
        action.render(&mut surface, 2.0);
        // Default paint is opaque black
        assert_eq!(surface.pixel(19, 19), Some(Color::BLACK));
        assert_eq!(surface.pixel(21, 21), Some(Color::TRANSPARENT));
    }
}
