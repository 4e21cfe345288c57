//! Typed shape attributes.
//!
//! Every recognised [`AttrKey`] has exactly one [`Attr`] variant carrying its
//! value, so reads and writes are checked at compile time instead of going
//! through a string-keyed bag.

use radial_core::{AttrKey, Color, Point};
use serde::{Deserialize, Serialize};

/// Outline stroke drawn after the fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub width: f64,
    pub color: Color,
    #[serde(default = "full_opacity")]
    pub opacity: f64,
}

impl Border {
    pub fn new(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            opacity: 1.0,
        }
    }

    /// Stroke color with the border opacity folded into the alpha channel.
    pub fn stroke_color(&self) -> Color {
        self.color.with_alpha_factor(self.opacity.clamp(0.0, 1.0) as f32)
    }
}

fn full_opacity() -> f64 {
    1.0
}

/// Drop shadow. Blur widens the bounding rect; the offset shifts it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Color,
    pub blur: f64,
    #[serde(default)]
    pub offset: Point,
}

/// Linear gradient across the outline diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub from: Color,
    pub to: Color,
    /// Degrees, 0 runs left to right.
    #[serde(default)]
    pub angle: f64,
}

/// End cap of an open stroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Corner style where two stroke segments meet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke style of a polyline.
///
/// `dash` alternates dash and gap lengths; an empty list draws a solid line.
/// An odd-length list is repeated once, as a 2D canvas does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub cap: LineCap,
    pub join: LineJoin,
    pub dash: Vec<f64>,
}

impl LineStyle {
    /// Dash pattern with an even number of entries, or `None` for a solid line.
    pub fn dash_pattern(&self) -> Option<Vec<f64>> {
        if self.dash.is_empty() || self.dash.iter().all(|d| *d == 0.0) {
            return None;
        }
        let mut pattern = self.dash.clone();
        if pattern.len() % 2 == 1 {
            pattern.extend_from_within(..);
        }
        Some(pattern)
    }
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum Attr {
    X(f64),
    Y(f64),
    Radius(f64),
    Width(f64),
    Height(f64),
    CornerRadius(f64),
    Sides(u32),
    Points(Vec<Point>),
    LineWidth(f64),
    LineCap(LineCap),
    LineJoin(LineJoin),
    Dash(Vec<f64>),
    Fill(Color),
    Border(Option<Border>),
    Shadow(Option<Shadow>),
    Gradient(Option<Gradient>),
    Opacity(f64),
    Rotation(f64),
    Scale(f64, f64),
    Visible(bool),
    Draggable(bool),
    Ignored(bool),
    Collision(bool),
    Closest(Option<f64>),
}

impl Attr {
    pub fn key(&self) -> AttrKey {
        match self {
            Attr::X(_) => AttrKey::X,
            Attr::Y(_) => AttrKey::Y,
            Attr::Radius(_) => AttrKey::Radius,
            Attr::Width(_) => AttrKey::Width,
            Attr::Height(_) => AttrKey::Height,
            Attr::CornerRadius(_) => AttrKey::CornerRadius,
            Attr::Sides(_) => AttrKey::Sides,
            Attr::Points(_) => AttrKey::Points,
            Attr::LineWidth(_) => AttrKey::LineWidth,
            Attr::LineCap(_) => AttrKey::LineCap,
            Attr::LineJoin(_) => AttrKey::LineJoin,
            Attr::Dash(_) => AttrKey::Dash,
            Attr::Fill(_) => AttrKey::Fill,
            Attr::Border(_) => AttrKey::Border,
            Attr::Shadow(_) => AttrKey::Shadow,
            Attr::Gradient(_) => AttrKey::Gradient,
            Attr::Opacity(_) => AttrKey::Opacity,
            Attr::Rotation(_) => AttrKey::Rotation,
            Attr::Scale(..) => AttrKey::Scale,
            Attr::Visible(_) => AttrKey::Visible,
            Attr::Draggable(_) => AttrKey::Draggable,
            Attr::Ignored(_) => AttrKey::Ignored,
            Attr::Collision(_) => AttrKey::Collision,
            Attr::Closest(_) => AttrKey::Closest,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Attr::X(v)
            | Attr::Y(v)
            | Attr::Radius(v)
            | Attr::Width(v)
            | Attr::Height(v)
            | Attr::CornerRadius(v)
            | Attr::LineWidth(v)
            | Attr::Opacity(v)
            | Attr::Rotation(v) => Some(*v),
            Attr::Sides(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Attr::Visible(v)
            | Attr::Draggable(v)
            | Attr::Ignored(v)
            | Attr::Collision(v) => Some(*v),
            _ => None,
        }
    }
}
