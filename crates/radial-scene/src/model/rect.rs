use radial_core::{AttrKey, Color, Extent, Point, Rect, ShapeError, ShapeKind};
use std::f64::consts::{FRAC_PI_2, PI};

use super::{dimension, replace, ShapeModel};
use crate::attrs::Attr;
use crate::surface::DrawingSurface;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
}

impl RectShape {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            corner_radius: 0.0,
        }
    }

    pub fn rounded(width: f64, height: f64, corner_radius: f64) -> Self {
        Self {
            width,
            height,
            corner_radius,
        }
    }

    fn trace_rounded(&self, r: Rect, radius: f64, surface: &mut dyn DrawingSurface) {
        surface.move_to(r.x + radius, r.y);
        surface.line_to(r.right() - radius, r.y);
        surface.arc(r.right() - radius, r.y + radius, radius, -FRAC_PI_2, 0.0);
        surface.line_to(r.right(), r.bottom() - radius);
        surface.arc(r.right() - radius, r.bottom() - radius, radius, 0.0, FRAC_PI_2);
        surface.line_to(r.x + radius, r.bottom());
        surface.arc(r.x + radius, r.bottom() - radius, radius, FRAC_PI_2, PI);
        surface.line_to(r.x, r.y + radius);
        surface.arc(r.x + radius, r.y + radius, radius, PI, PI + FRAC_PI_2);
        surface.close_path();
    }
}

impl ShapeModel for RectShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rect
    }

    fn extent(&self, _origin: Point) -> Extent {
        Extent::Size {
            width: self.width,
            height: self.height,
        }
    }

    fn attr(&self, key: AttrKey) -> Option<Attr> {
        match key {
            AttrKey::Width => Some(Attr::Width(self.width)),
            AttrKey::Height => Some(Attr::Height(self.height)),
            AttrKey::CornerRadius => Some(Attr::CornerRadius(self.corner_radius)),
            _ => None,
        }
    }

    fn apply(&mut self, attr: &Attr) -> Result<bool, ShapeError> {
        match attr {
            Attr::Width(w) => Ok(replace(&mut self.width, dimension(AttrKey::Width, *w)?)),
            Attr::Height(h) => Ok(replace(&mut self.height, dimension(AttrKey::Height, *h)?)),
            Attr::CornerRadius(r) => Ok(replace(
                &mut self.corner_radius,
                dimension(AttrKey::CornerRadius, *r)?,
            )),
            other => Err(self.not_applicable(other.key())),
        }
    }

    fn draw(&self, origin: Point, _fill: Color, surface: &mut dyn DrawingSurface) {
        let r = Rect::new(origin.x, origin.y, self.width, self.height);
        let radius = self
            .corner_radius
            .min(self.width / 2.0)
            .min(self.height / 2.0);
        surface.begin_path();
        if radius > 0.0 {
            self.trace_rounded(r, radius, surface);
        } else {
            surface.rect(r);
        }
        surface.fill();
    }
}
