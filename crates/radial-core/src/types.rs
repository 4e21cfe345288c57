//! Identifiers and closed enumerations shared across the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a shape inside its owning scene.
///
/// Ids are allocated by the scene and never reused, so a stale id of a
/// destroyed shape cannot alias a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// Non-owning handle back to a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(u64);

impl SceneId {
    /// Allocates a process-unique scene id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

/// Variant tag of a shape. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Rect,
    Triangle,
    Line,
    Polygon,
    Image,
}

impl ShapeKind {
    /// Radius-based kinds use circle logic in the collision test.
    pub fn is_radius(&self) -> bool {
        matches!(self, ShapeKind::Circle | ShapeKind::Polygon)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Rect => "Rect",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Line => "Line",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Image => "Image",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The recognised attribute keys of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttrKey {
    X,
    Y,
    Radius,
    Width,
    Height,
    CornerRadius,
    Sides,
    Points,
    LineWidth,
    LineCap,
    LineJoin,
    Dash,
    Fill,
    Border,
    Shadow,
    Gradient,
    Opacity,
    Rotation,
    Scale,
    Visible,
    Draggable,
    Ignored,
    Collision,
    Closest,
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
