//! Pure geometry helpers: points, axis-aligned rects, padding, triangle
//! area, point-to-segment distance, shadow padding and rotated extents.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, Sub};

/// A 2D point in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    pub fn distance_squared_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rect from two opposite corners in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self::new(min_x, min_y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.y)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.bottom())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Grows the rect uniformly on every side.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Grows the rect by per-side padding.
    pub fn pad(&self, padding: &Padding) -> Rect {
        Rect::new(
            self.x - padding.left,
            self.y - padding.top,
            self.width + padding.width(),
            self.height + padding.height(),
        )
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Smallest rect enclosing every point. `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<Rect> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

/// Per-side padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const fn uniform(amount: f64) -> Self {
        Self {
            top: amount,
            right: amount,
            bottom: amount,
            left: amount,
        }
    }

    pub fn width(&self) -> f64 {
        self.left + self.right
    }

    pub fn height(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Unsigned area of the triangle `abc`.
pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    ((a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) / 2.0).abs()
}

/// Vertices of the apex-anchored triangle: apex, bottom-right, bottom-left.
pub fn triangle_vertices(apex: Point, radius: f64) -> [Point; 3] {
    [
        apex,
        Point::new(apex.x + radius, apex.y + radius),
        Point::new(apex.x - radius, apex.y + radius),
    ]
}

/// Area-sum containment: `p` is inside when the three sub-triangles it forms
/// add up to the whole triangle within `epsilon`.
pub fn point_in_triangle(p: Point, vertices: &[Point; 3], epsilon: f64) -> bool {
    let [a, b, c] = *vertices;
    let total = triangle_area(a, b, c);
    if total <= 0.0 {
        return false;
    }
    let parts = triangle_area(p, b, c) + triangle_area(a, p, c) + triangle_area(a, b, p);
    (total - parts).abs() < epsilon
}

/// Distance from `p` to the segment `ab`.
///
/// Returns `None` for a zero-length segment; callers skip those.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> Option<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq <= f64::EPSILON {
        return None;
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * dx, a.y + t * dy);
    Some(p.distance_to(&closest))
}

/// Extra room a drop shadow needs around a shape.
///
/// The padding is asymmetric: an offset to the right shrinks the left side
/// and grows the right side by the same amount.
pub fn shadow_padding(offset: Point, blur: f64) -> Padding {
    Padding {
        left: (blur - offset.x).max(0.0),
        right: (blur + offset.x).max(0.0),
        top: (blur - offset.y).max(0.0),
        bottom: (blur + offset.y).max(0.0),
    }
}

/// Axis-aligned extent of a `width` x `height` box rotated by `degrees`.
pub fn rotated_extent(width: f64, height: f64, degrees: f64) -> (f64, f64) {
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    (cos * width + sin * height, sin * width + cos * height)
}

/// Vertices of a regular polygon, first vertex pointing straight up.
pub fn regular_polygon_vertices(center: Point, radius: f64, sides: u32) -> Vec<Point> {
    let sides = sides.max(3);
    let step = PI * 2.0 / sides as f64;
    let start = -PI / 2.0;
    (0..sides)
        .map(|i| {
            let angle = start + step * i as f64;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Even-odd containment against a closed polygon.
pub fn point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > p.y) != (vj.y > p.y) && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Endpoints of a linear gradient crossing `rect` through its center at
/// `degrees`, spanning half the diagonal on each side.
pub fn gradient_line(rect: &Rect, degrees: f64) -> (Point, Point) {
    let center = rect.center();
    let half = (rect.width * rect.width + rect.height * rect.height).sqrt() / 2.0;
    let theta = degrees.to_radians();
    let (dx, dy) = (theta.cos() * half, theta.sin() * half);
    (
        Point::new(center.x - dx, center.y - dy),
        Point::new(center.x + dx, center.y + dy),
    )
}
