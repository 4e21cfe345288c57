use radial_core::geometry::triangle_vertices;
use radial_core::{AttrKey, Color, Extent, Point, ShapeError, ShapeKind};

use super::{dimension, replace, ShapeModel};
use crate::attrs::Attr;
use crate::surface::DrawingSurface;

/// Isosceles triangle hanging from its apex at the shape position.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleShape {
    pub radius: f64,
}

impl TriangleShape {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl ShapeModel for TriangleShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn extent(&self, _origin: Point) -> Extent {
        Extent::Radius(self.radius)
    }

    fn attr(&self, key: AttrKey) -> Option<Attr> {
        match key {
            AttrKey::Radius => Some(Attr::Radius(self.radius)),
            _ => None,
        }
    }

    fn apply(&mut self, attr: &Attr) -> Result<bool, ShapeError> {
        match attr {
            Attr::Radius(r) => Ok(replace(&mut self.radius, dimension(AttrKey::Radius, *r)?)),
            other => Err(self.not_applicable(other.key())),
        }
    }

    fn draw(&self, origin: Point, _fill: Color, surface: &mut dyn DrawingSurface) {
        let [apex, right, left] = triangle_vertices(origin, self.radius);
        surface.begin_path();
        surface.move_to(apex.x, apex.y);
        surface.line_to(right.x, right.y);
        surface.line_to(left.x, left.y);
        surface.close_path();
        surface.fill();
    }
}
