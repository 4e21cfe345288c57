use radial_core::geometry::regular_polygon_vertices;
use radial_core::{AttrKey, Color, Extent, Point, ShapeError, ShapeKind};

use super::{dimension, replace, ShapeModel};
use crate::attrs::Attr;
use crate::surface::DrawingSurface;

/// Largest side count a polygon accepts.
pub const MAX_SIDES: u32 = 1024;

/// Regular N-gon inscribed in a circle around the shape position.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub radius: f64,
    pub sides: u32,
}

impl PolygonShape {
    /// Side counts are clamped into `3..=MAX_SIDES`.
    pub fn new(radius: f64, sides: u32) -> Self {
        Self {
            radius,
            sides: sides.clamp(3, MAX_SIDES),
        }
    }
}

impl ShapeModel for PolygonShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn extent(&self, _origin: Point) -> Extent {
        Extent::Polygon {
            radius: self.radius,
            sides: self.sides,
        }
    }

    fn attr(&self, key: AttrKey) -> Option<Attr> {
        match key {
            AttrKey::Radius => Some(Attr::Radius(self.radius)),
            AttrKey::Sides => Some(Attr::Sides(self.sides)),
            _ => None,
        }
    }

    fn apply(&mut self, attr: &Attr) -> Result<bool, ShapeError> {
        match attr {
            Attr::Radius(r) => Ok(replace(&mut self.radius, dimension(AttrKey::Radius, *r)?)),
            Attr::Sides(sides) if *sides < 3 => Err(ShapeError::TooFewSides { sides: *sides }),
            Attr::Sides(sides) if *sides > MAX_SIDES => Err(ShapeError::TooManySides {
                sides: *sides,
                max: MAX_SIDES,
            }),
            Attr::Sides(sides) => Ok(replace(&mut self.sides, *sides)),
            other => Err(self.not_applicable(other.key())),
        }
    }

    fn draw(&self, origin: Point, _fill: Color, surface: &mut dyn DrawingSurface) {
        let vertices = regular_polygon_vertices(origin, self.radius, self.sides);
        surface.begin_path();
        for (i, v) in vertices.iter().enumerate() {
            if i == 0 {
                surface.move_to(v.x, v.y);
            } else {
                surface.line_to(v.x, v.y);
            }
        }
        surface.close_path();
        surface.fill();
    }
}
