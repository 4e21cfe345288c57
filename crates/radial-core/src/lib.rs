//! # Radial Core
//!
//! Core types, geometry utilities, collision tests and the error taxonomy
//! shared by the Radial scene engine.
//!
//! Everything in this crate is pure: no drawing surface, no event wiring.
//! The scene crate builds its shape model, hit testing and collision sweep
//! on top of these functions.

pub mod bounds;
pub mod collision;
pub mod color;
pub mod error;
pub mod geometry;
pub mod types;

pub use bounds::{BoundingBox, Extent};
pub use collision::{bodies_collide, circle_rect_collide, circles_collide, rects_collide, CollisionBody};
pub use color::Color;
pub use error::{ColorError, ConfigError, Error, Result, SceneError, ShapeError, SurfaceError};
pub use geometry::{Padding, Point, Rect};
pub use types::{AttrKey, SceneId, ShapeId, ShapeKind};
