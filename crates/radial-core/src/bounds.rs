//! Bounding boxes: the raw, variant-specific geometry of a shape.

use serde::{Deserialize, Serialize};

use crate::collision::CollisionBody;
use crate::geometry::{regular_polygon_vertices, triangle_vertices, Point, Rect};
use crate::types::{SceneId, ShapeKind};

/// Size descriptor carried by a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Extent {
    Radius(f64),
    Polygon { radius: f64, sides: u32 },
    Size { width: f64, height: f64 },
    /// Absolute points of an open polyline.
    Polyline { points: Vec<Point>, line_width: f64 },
}

/// Geometry of a shape plus a non-owning reference to its scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub extent: Extent,
    pub scene: SceneId,
}

impl BoundingBox {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_radius(&self) -> bool {
        self.kind.is_radius()
    }

    /// Tight axis-aligned outline of the geometry, ignoring border, shadow and
    /// transform.
    pub fn outline(&self) -> Rect {
        match &self.extent {
            Extent::Radius(radius) if self.kind == ShapeKind::Triangle => {
                Rect::new(self.x - radius, self.y, radius * 2.0, *radius)
            }
            Extent::Radius(radius) | Extent::Polygon { radius, .. } => {
                Rect::new(self.x - radius, self.y - radius, radius * 2.0, radius * 2.0)
            }
            Extent::Size { width, height } => Rect::new(self.x, self.y, *width, *height),
            Extent::Polyline { points, line_width } => Rect::enclosing(points)
                .map(|r| r.inflate(line_width / 2.0))
                .unwrap_or_else(|| Rect::new(self.x, self.y, 0.0, 0.0)),
        }
    }

    /// Body used by the pairwise collision test, before border inflation.
    pub fn collision_body(&self) -> CollisionBody {
        match &self.extent {
            Extent::Radius(radius) | Extent::Polygon { radius, .. } if self.is_radius() => {
                CollisionBody::Circle {
                    center: self.position(),
                    radius: *radius,
                }
            }
            _ => CollisionBody::Rect(self.outline()),
        }
    }

    /// Corner points of the drawn outline where the variant has them.
    pub fn vertices(&self) -> Vec<Point> {
        match &self.extent {
            Extent::Radius(radius) if self.kind == ShapeKind::Triangle => {
                triangle_vertices(self.position(), *radius).to_vec()
            }
            Extent::Polygon { radius, sides } => {
                regular_polygon_vertices(self.position(), *radius, *sides)
            }
            Extent::Polyline { points, .. } => points.clone(),
            Extent::Size { .. } => {
                let r = self.outline();
                vec![r.top_left(), r.top_right(), r.bottom_right(), r.bottom_left()]
            }
            Extent::Radius(_) => Vec::new(),
        }
    }
}
