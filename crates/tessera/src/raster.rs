//! Drawing surface the tile generators paint into.
//!
//! A thin wrapper over a tiny-skia [`Pixmap`] that speaks in this crate's
//! geometry types and adds the handful of primitives the patterns need:
//! polygons, segments, elliptical arcs and pies, ovals, rounded rectangles
//! and scaled pixmap blits.
//!
//! Arc angles follow the screen-independent convention used by the pattern
//! formulas: degrees, zero at 3 o'clock, positive extents run
//! counter-clockwise as seen on screen.

use lyon_geom::{Angle, Arc, point, vector};
use tiny_skia::{
    FillRule, FilterQuality, LineCap, LineJoin, Mask, Paint, Path, PathBuilder, Pixmap,
    PixmapPaint, Rect, Stroke, Transform,
};

use crate::error::{Result, TileError};
use crate::geometry::{Line, Point, Polygon};
use crate::palette::Color;

/// Stroke settings for outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Pen {
    /// Square caps, mitred joins.
    pub fn new(width: f64) -> Self {
        Self { width, cap: LineCap::Square, join: LineJoin::Miter }
    }

    /// Round caps and joins, used for hand-drawn strokes.
    pub fn round(width: f64) -> Self {
        Self { width, cap: LineCap::Round, join: LineJoin::Round }
    }

    fn to_stroke(self) -> Stroke {
        Stroke {
            width: self.width as f32,
            line_cap: self.cap,
            line_join: self.join,
            miter_limit: 10.0,
            ..Stroke::default()
        }
    }
}

impl Default for Pen {
    fn default() -> Self {
        Pen::new(1.0)
    }
}

/// An RGBA raster with an optional rectangular clip.
pub struct Surface {
    pixmap: Pixmap,
    clip: Option<Mask>,
    anti_alias: bool,
}

impl Surface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(TileError::EmptySurface { width, height })?;
        Ok(Self::from_pixmap(pixmap))
    }

    pub fn square(size: u32) -> Result<Self> {
        Self::new(size, size)
    }

    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap, clip: None, anti_alias: true }
    }

    /// Turn edge smoothing on or off for subsequent drawing.
    ///
    /// With it off every touched pixel gets the exact paint colour, which is
    /// what the flood fill needs to recognise walls.
    pub fn set_anti_alias(&mut self, on: bool) {
        self.anti_alias = on;
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Restrict drawing to the given rectangle until [`Surface::reset_clip`].
    pub fn clip_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let Some(rect) = rect(x, y, w, h) else {
            return;
        };
        let Some(mut mask) = Mask::new(self.width(), self.height()) else {
            return;
        };
        mask.fill_path(&PathBuilder::from_rect(rect), FillRule::Winding, false, Transform::identity());
        self.clip = Some(mask);
    }

    pub fn reset_clip(&mut self) {
        self.clip = None;
    }

    /// Replace every pixel with `color`, ignoring the clip.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        if let Some(r) = rect(x, y, w, h) {
            let paint = self.paint(color);
            self.pixmap.fill_rect(r, &paint, Transform::identity(), self.clip.as_ref());
        }
    }

    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, pen: Pen) {
        if let Some(r) = rect(x, y, w, h) {
            self.stroke(&PathBuilder::from_rect(r), color, pen);
        }
    }

    pub fn fill_polygon(&mut self, polygon: &Polygon, color: Color) {
        if let Some(path) = polygon_path(polygon) {
            self.fill(&path, color);
        }
    }

    pub fn stroke_polygon(&mut self, polygon: &Polygon, color: Color, pen: Pen) {
        if let Some(path) = polygon_path(polygon) {
            self.stroke(&path, color, pen);
        }
    }

    pub fn stroke_line(&mut self, from: Point, to: Point, color: Color, pen: Pen) {
        self.stroke_segments(&[Line::between(from, to)], color, pen);
    }

    /// Stroke a batch of independent segments in one pass.
    pub fn stroke_segments(&mut self, lines: &[Line], color: Color, pen: Pen) {
        let mut pb = PathBuilder::new();
        for line in lines {
            pb.move_to(line.x1 as f32, line.y1 as f32);
            pb.line_to(line.x2 as f32, line.y2 as f32);
        }
        if let Some(path) = pb.finish() {
            self.stroke(&path, color, pen);
        }
    }

    /// Stroke a quadratic Bézier from `from` to `to` with control point `ctrl`.
    pub fn stroke_quad(&mut self, from: Point, ctrl: Point, to: Point, color: Color, pen: Pen) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.quad_to(ctrl.x as f32, ctrl.y as f32, to.x as f32, to.y as f32);
        if let Some(path) = pb.finish() {
            self.stroke(&path, color, pen);
        }
    }

    /// Stroke an open elliptical arc of the ellipse inscribed in (x, y, w, h).
    pub fn stroke_arc(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        start_deg: f64,
        extent_deg: f64,
        color: Color,
        pen: Pen,
    ) {
        let mut pb = PathBuilder::new();
        let arc = ellipse_arc(x, y, w, h, start_deg, extent_deg);
        let from = arc.from();
        pb.move_to(from.x as f32, from.y as f32);
        push_arc(&mut pb, &arc);
        if let Some(path) = pb.finish() {
            self.stroke(&path, color, pen);
        }
    }

    /// Fill a pie wedge: the arc closed through the ellipse centre.
    pub fn fill_pie(&mut self, x: f64, y: f64, w: f64, h: f64, start_deg: f64, extent_deg: f64, color: Color) {
        let mut pb = PathBuilder::new();
        let arc = ellipse_arc(x, y, w, h, start_deg, extent_deg);
        pb.move_to(arc.center.x as f32, arc.center.y as f32);
        let from = arc.from();
        pb.line_to(from.x as f32, from.y as f32);
        push_arc(&mut pb, &arc);
        pb.close();
        if let Some(path) = pb.finish() {
            self.fill(&path, color);
        }
    }

    pub fn stroke_oval(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, pen: Pen) {
        if let Some(path) = rect(x, y, w, h).and_then(PathBuilder::from_oval) {
            self.stroke(&path, color, pen);
        }
    }

    /// Stroke a rectangle whose corners are quarter ellipses `arc` pixels across.
    pub fn stroke_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, arc: f64, color: Color, pen: Pen) {
        let r = (arc / 2.0).min(w / 2.0).min(h / 2.0).max(0.0);
        let mut pb = PathBuilder::new();
        pb.move_to((x + r) as f32, y as f32);
        pb.line_to((x + w - r) as f32, y as f32);
        push_arc(&mut pb, &corner(x + w - r, y + r, r, -90.0));
        pb.line_to((x + w) as f32, (y + h - r) as f32);
        push_arc(&mut pb, &corner(x + w - r, y + h - r, r, 0.0));
        pb.line_to((x + r) as f32, (y + h) as f32);
        push_arc(&mut pb, &corner(x + r, y + h - r, r, 90.0));
        pb.line_to(x as f32, (y + r) as f32);
        push_arc(&mut pb, &corner(x + r, y + r, r, 180.0));
        pb.close();
        if let Some(path) = pb.finish() {
            self.stroke(&path, color, pen);
        }
    }

    /// Blit `src` with its top-left corner at (x, y), unscaled.
    pub fn draw_pixmap(&mut self, src: &Pixmap, x: i32, y: i32) {
        self.pixmap.draw_pixmap(
            x,
            y,
            src.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            self.clip.as_ref(),
        );
    }

    /// Blit `src` scaled by `scale` with its top-left corner at (x, y).
    pub fn draw_pixmap_scaled(&mut self, src: &Pixmap, x: f64, y: f64, scale: f64) {
        let paint = PixmapPaint { quality: FilterQuality::Nearest, ..PixmapPaint::default() };
        let transform = Transform::from_scale(scale as f32, scale as f32).post_translate(x as f32, y as f32);
        self.pixmap.draw_pixmap(0, 0, src.as_ref(), &paint, transform, self.clip.as_ref());
    }

    /// Straight-alpha colour of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixmap.pixel(x, y).map(|p| Color::from(p.demultiply()))
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = self.anti_alias;
        paint
    }

    fn fill(&mut self, path: &Path, color: Color) {
        let paint = self.paint(color);
        self.pixmap.fill_path(path, &paint, FillRule::Winding, Transform::identity(), self.clip.as_ref());
    }

    fn stroke(&mut self, path: &Path, color: Color, pen: Pen) {
        let paint = self.paint(color);
        self.pixmap.stroke_path(path, &paint, &pen.to_stroke(), Transform::identity(), self.clip.as_ref());
    }
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Option<Rect> {
    Rect::from_xywh(x as f32, y as f32, w as f32, h as f32)
}

fn polygon_path(polygon: &Polygon) -> Option<Path> {
    let (first, rest) = polygon.vertices.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.close();
    pb.finish()
}

/// Arc of the ellipse inscribed in (x, y, w, h).
///
/// Angles are flipped into y-down space: a positive extent turns
/// counter-clockwise on screen.
fn ellipse_arc(x: f64, y: f64, w: f64, h: f64, start_deg: f64, extent_deg: f64) -> Arc<f64> {
    Arc {
        center: point(x + w / 2.0, y + h / 2.0),
        radii: vector(w / 2.0, h / 2.0),
        start_angle: Angle::degrees(-start_deg),
        sweep_angle: Angle::degrees(-extent_deg),
        x_rotation: Angle::zero(),
    }
}

/// Clockwise (on screen) quarter circle of radius `r`, starting at `start_deg` in y-down space.
fn corner(cx: f64, cy: f64, r: f64, start_deg: f64) -> Arc<f64> {
    Arc {
        center: point(cx, cy),
        radii: vector(r, r),
        start_angle: Angle::degrees(start_deg),
        sweep_angle: Angle::degrees(90.0),
        x_rotation: Angle::zero(),
    }
}

fn push_arc(pb: &mut PathBuilder, arc: &Arc<f64>) {
    arc.for_each_cubic_bezier(&mut |c| {
        pb.cubic_to(
            c.ctrl1.x as f32,
            c.ctrl1.y as f32,
            c.ctrl2.x as f32,
            c.ctrl2.y as f32,
            c.to.x as f32,
            c.to.y as f32,
        );
    });
}
