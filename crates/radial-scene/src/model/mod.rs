//! Variant geometry and draw hooks.
//!
//! Each variant owns its size descriptor and knows how to trace itself onto a
//! drawing surface. Style, transform and border handling live in the shared
//! render path, so a hook only emits the path (and fills or strokes it).

use radial_core::{AttrKey, Color, Extent, Point, ShapeError, ShapeKind};

use crate::attrs::Attr;
use crate::surface::DrawingSurface;

mod circle;
mod image;
mod line;
mod polygon;
mod rect;
mod triangle;

pub use circle::CircleShape;
pub use image::ImageShape;
pub use line::LineShape;
pub use polygon::{PolygonShape, MAX_SIDES};
pub use rect::RectShape;
pub use triangle::TriangleShape;

pub trait ShapeModel {
    fn kind(&self) -> ShapeKind;

    /// Size descriptor with the shape positioned at `origin`.
    fn extent(&self, origin: Point) -> Extent;

    /// Current value of a geometry key owned by this variant.
    fn attr(&self, key: AttrKey) -> Option<Attr>;

    /// Applies a geometry attribute. Returns whether the value changed.
    fn apply(&mut self, attr: &Attr) -> Result<bool, ShapeError>;

    fn draw(&self, origin: Point, fill: Color, surface: &mut dyn DrawingSurface);

    fn not_applicable(&self, key: AttrKey) -> ShapeError {
        ShapeError::AttrNotApplicable {
            kind: self.kind(),
            key,
        }
    }
}

/// Rejects negative and non-finite sizes.
pub(crate) fn dimension(key: AttrKey, value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::InvalidDimension { key, value })
    }
}

/// Rejects NaN and infinite positions, angles and scale factors.
pub(crate) fn finite(key: AttrKey, value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ShapeError::NotFinite { key, value })
    }
}

/// Checks every coordinate of a point list.
pub(crate) fn finite_points(key: AttrKey, points: &[Point]) -> Result<(), ShapeError> {
    for p in points {
        finite(key, p.x)?;
        finite(key, p.y)?;
    }
    Ok(())
}

pub(crate) fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[derive(Debug, Clone)]
pub enum ShapeGeometry {
    Circle(CircleShape),
    Rect(RectShape),
    Triangle(TriangleShape),
    Line(LineShape),
    Polygon(PolygonShape),
    Image(ImageShape),
}

impl ShapeGeometry {
    fn model(&self) -> &dyn ShapeModel {
        match self {
            ShapeGeometry::Circle(s) => s,
            ShapeGeometry::Rect(s) => s,
            ShapeGeometry::Triangle(s) => s,
            ShapeGeometry::Line(s) => s,
            ShapeGeometry::Polygon(s) => s,
            ShapeGeometry::Image(s) => s,
        }
    }

    fn model_mut(&mut self) -> &mut dyn ShapeModel {
        match self {
            ShapeGeometry::Circle(s) => s,
            ShapeGeometry::Rect(s) => s,
            ShapeGeometry::Triangle(s) => s,
            ShapeGeometry::Line(s) => s,
            ShapeGeometry::Polygon(s) => s,
            ShapeGeometry::Image(s) => s,
        }
    }
}

impl ShapeModel for ShapeGeometry {
    fn kind(&self) -> ShapeKind {
        self.model().kind()
    }

    fn extent(&self, origin: Point) -> Extent {
        self.model().extent(origin)
    }

    fn attr(&self, key: AttrKey) -> Option<Attr> {
        self.model().attr(key)
    }

    fn apply(&mut self, attr: &Attr) -> Result<bool, ShapeError> {
        self.model_mut().apply(attr)
    }

    fn draw(&self, origin: Point, fill: Color, surface: &mut dyn DrawingSurface) {
        self.model().draw(origin, fill, surface)
    }
}
