//! Geometry kit: points, segments and the closed polygons every tile is built from.
//!
//! All coordinates are in pixels with the origin at the top-left corner and
//! y growing downward, which is the raster convention used by the surface.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! `#[derive(Clone, Copy)]` on a small struct like `Point` means it is copied
//! bit-for-bit whenever it is passed by value. No borrow juggling needed.

use std::f64::consts::PI;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A closed polygon. The last vertex implicitly connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point halfway between `self` and `other`.
    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Multiply both coordinates by `factor`.
    #[inline]
    pub fn scaled(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Segment from `a` to `b`.
    #[inline]
    pub fn between(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Bounding box as (min_x, min_y, max_x, max_y), or `None` when empty.
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        if self.vertices.is_empty() {
            return None;
        }

        let min_x = self.vertices.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = self.vertices.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = self.vertices.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = self.vertices.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Some((min_x, min_y, max_x, max_y))
    }

    /// Average of the vertices.
    pub fn centroid(&self) -> Option<Point> {
        if self.vertices.is_empty() {
            return None;
        }
        let n = self.vertices.len() as f64;
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// Copy of this polygon with every vertex pulled towards `center`.
    ///
    /// `factor` 1.0 leaves the polygon unchanged, 0.0 collapses it onto `center`.
    pub fn scaled_towards(&self, center: Point, factor: f64) -> Polygon {
        Polygon::new(
            self.vertices
                .iter()
                .map(|p| {
                    Point::new(
                        center.x + (p.x - center.x) * factor,
                        center.y + (p.y - center.y) * factor,
                    )
                })
                .collect(),
        )
    }

    /// Edges as segments, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Line::between(self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

// ============================================================================
// SHAPE CONSTRUCTORS
// ============================================================================

/// Star with `points` arms around `center`.
///
/// Produces `2 * points` vertices alternating between `outer_radius` (even
/// indices) and `inner_radius` (odd indices). Vertex `i` sits at angle
/// `i * PI / points + rotation`. Callers pass `points >= 2`.
pub fn star(center: Point, inner_radius: f64, outer_radius: f64, points: usize, rotation: f64) -> Polygon {
    let vertices = (0..2 * points)
        .map(|i| {
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            let a = i as f64 * PI / points as f64 + rotation;
            Point::new(center.x + a.cos() * r, center.y + a.sin() * r)
        })
        .collect();
    Polygon::new(vertices)
}

/// Regular polygon with the given side length.
///
/// The circumradius is `side_length / (2 * sin(PI / sides))` and the first
/// vertex sits at `rotation - PI / sides`, so with zero rotation a flat edge
/// faces the +x direction.
pub fn regular_polygon(center: Point, side_length: f64, sides: usize, rotation: f64) -> Polygon {
    let n = sides as f64;
    let radius = side_length * 0.5 / (PI / n).sin();
    let start = rotation - PI / n;
    let vertices = (0..sides)
        .map(|i| {
            let a = 2.0 * i as f64 * PI / n + start;
            Point::new(center.x + a.cos() * radius, center.y + a.sin() * radius)
        })
        .collect();
    Polygon::new(vertices)
}

/// Polygon with its vertices on a circle of `radius`, first vertex at -45 degrees.
pub fn inscribed_polygon(center: Point, radius: f64, sides: usize) -> Polygon {
    let vertices = (0..sides)
        .map(|i| {
            let a = 2.0 * PI * i as f64 / sides as f64 - PI / 4.0;
            Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect();
    Polygon::new(vertices)
}

/// Axis-aligned square of side `side`, rotated by `angle` around its centre.
pub fn rotated_square(center: Point, side: f64, angle: f64) -> Polygon {
    let half = side / 2.0;
    let (sin_a, cos_a) = angle.sin_cos();
    let corners = [(-half, -half), (half, -half), (half, half), (-half, half)];
    let vertices = corners
        .iter()
        .map(|&(rx, ry)| {
            Point::new(
                center.x + rx * cos_a - ry * sin_a,
                center.y + rx * sin_a + ry * cos_a,
            )
        })
        .collect();
    Polygon::new(vertices)
}

pub fn triangle(a: Point, b: Point, c: Point) -> Polygon {
    Polygon::new(vec![a, b, c])
}

// ============================================================================
// TESTS
// ============================================================================
