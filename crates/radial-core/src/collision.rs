//! Pairwise overlap tests between collision bodies.
//!
//! Bodies are either circles or axis-aligned rects. Rotation and scale are
//! not taken into account here; they only affect the bounding rect.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Simplified geometry used by the collision sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionBody {
    Circle { center: Point, radius: f64 },
    Rect(Rect),
}

impl CollisionBody {
    /// Grows the body by half the border width on every side.
    pub fn with_border(self, border_width: f64) -> Self {
        let half = border_width.max(0.0) / 2.0;
        if half == 0.0 {
            return self;
        }
        match self {
            CollisionBody::Circle { center, radius } => CollisionBody::Circle {
                center,
                radius: radius + half,
            },
            CollisionBody::Rect(rect) => CollisionBody::Rect(rect.inflate(half)),
        }
    }

    pub fn center(&self) -> Point {
        match self {
            CollisionBody::Circle { center, .. } => *center,
            CollisionBody::Rect(rect) => rect.center(),
        }
    }
}

/// Circles overlap when their center distance is at most the sum of radii.
pub fn circles_collide(a_center: Point, a_radius: f64, b_center: Point, b_radius: f64) -> bool {
    a_center.distance_to(&b_center) <= a_radius + b_radius
}

/// Clamps the circle center into the rect and compares the distance to the
/// clamp point against the radius. Never panics, even on NaN input.
pub fn circle_rect_collide(center: Point, radius: f64, rect: &Rect) -> bool {
    let closest = Point::new(
        center.x.max(rect.x).min(rect.right()),
        center.y.max(rect.y).min(rect.bottom()),
    );
    center.distance_squared_to(&closest) <= radius * radius
}

/// Negated separation test; touching edges count as overlap.
pub fn rects_collide(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.x || a.x > b.right() || a.bottom() < b.y || a.y > b.bottom())
}

pub fn bodies_collide(a: &CollisionBody, b: &CollisionBody) -> bool {
    match (a, b) {
        (
            CollisionBody::Circle {
                center: ac,
                radius: ar,
            },
            CollisionBody::Circle {
                center: bc,
                radius: br,
            },
        ) => circles_collide(*ac, *ar, *bc, *br),
        (CollisionBody::Circle { center, radius }, CollisionBody::Rect(rect))
        | (CollisionBody::Rect(rect), CollisionBody::Circle { center, radius }) => {
            circle_rect_collide(*center, *radius, rect)
        }
        (CollisionBody::Rect(a), CollisionBody::Rect(b)) => rects_collide(a, b),
    }
}
