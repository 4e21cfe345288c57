use radial_core::{AttrKey, Color, Extent, Point, ShapeError, ShapeKind};
use std::f64::consts::TAU;

use super::{dimension, replace, ShapeModel};
use crate::attrs::Attr;
use crate::surface::DrawingSurface;

/// Circle centered on the shape position.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub radius: f64,
}

impl CircleShape {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl ShapeModel for CircleShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
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
        surface.begin_path();
        surface.arc(origin.x, origin.y, self.radius, 0.0, TAU);
        surface.close_path();
        surface.fill();
    }
}
