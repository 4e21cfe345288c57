use radial_core::{AttrKey, Color, Extent, Point, ShapeError, ShapeKind};

use super::{dimension, finite_points, replace, ShapeModel};
use crate::attrs::{Attr, LineStyle};
use crate::surface::DrawingSurface;

/// Open polyline. Points are relative to the shape position; the line is
/// stroked with the fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub points: Vec<Point>,
    pub line_width: f64,
    pub style: LineStyle,
}

impl LineShape {
    pub fn new(points: Vec<Point>, line_width: f64) -> Self {
        Self {
            points,
            line_width,
            style: LineStyle::default(),
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn absolute_points(&self, origin: Point) -> Vec<Point> {
        self.points.iter().map(|p| *p + origin).collect()
    }
}

impl ShapeModel for LineShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn extent(&self, origin: Point) -> Extent {
        Extent::Polyline {
            points: self.absolute_points(origin),
            line_width: self.line_width,
        }
    }

    fn attr(&self, key: AttrKey) -> Option<Attr> {
        match key {
            AttrKey::Points => Some(Attr::Points(self.points.clone())),
            AttrKey::LineWidth => Some(Attr::LineWidth(self.line_width)),
            AttrKey::LineCap => Some(Attr::LineCap(self.style.cap)),
            AttrKey::LineJoin => Some(Attr::LineJoin(self.style.join)),
            AttrKey::Dash => Some(Attr::Dash(self.style.dash.clone())),
            _ => None,
        }
    }

    fn apply(&mut self, attr: &Attr) -> Result<bool, ShapeError> {
        match attr {
            Attr::Points(points) => {
                finite_points(AttrKey::Points, points)?;
                Ok(replace(&mut self.points, points.clone()))
            }
            Attr::LineWidth(w) => Ok(replace(
                &mut self.line_width,
                dimension(AttrKey::LineWidth, *w)?,
            )),
            Attr::LineCap(cap) => Ok(replace(&mut self.style.cap, *cap)),
            Attr::LineJoin(join) => Ok(replace(&mut self.style.join, *join)),
            Attr::Dash(dash) => {
                for d in dash {
                    dimension(AttrKey::Dash, *d)?;
                }
                Ok(replace(&mut self.style.dash, dash.clone()))
            }
            other => Err(self.not_applicable(other.key())),
        }
    }

    fn draw(&self, origin: Point, fill: Color, surface: &mut dyn DrawingSurface) {
        let mut points = self.absolute_points(origin).into_iter();
        let Some(first) = points.next() else {
            return;
        };
        surface.begin_path();
        surface.move_to(first.x, first.y);
        for p in points {
            surface.line_to(p.x, p.y);
        }
        surface.set_stroke(fill, self.line_width);
        surface.set_line_style(&self.style);
        surface.stroke();
    }
}
