//! # Radial Scene
//!
//! A retained-mode 2D scene graph drawn onto a pluggable surface.
//!
//! ## Features
//!
//! - **Shapes**: circles, rects (optionally rounded), triangles, polylines,
//!   regular polygons and images, each with fill, border, shadow, gradient,
//!   opacity and a rotate/scale transform
//! - **Pointer events**: per-shape and scene-wide listeners, with hover
//!   tracking and throttled dragging
//! - **Collisions**: a pairwise sweep before every repaint reporting
//!   overlaps and nearest neighbours
//! - **Transformer**: a selection overlay with side and corner handles that
//!   moves and resizes shapes
//!
//! ## Drawing
//!
//! Rendering goes through the [`DrawingSurface`] trait. [`PixmapSurface`]
//! rasterizes with tiny-skia; [`RecordingSurface`] records the calls and is
//! what the tests assert against.

pub mod attrs;
pub mod clock;
pub mod config;
pub mod delegate;
pub mod events;
pub mod frame;
pub mod model;
pub mod scene;
pub mod shape;
pub mod surface;
pub mod sweep;
pub mod transformer;

pub use attrs::{Attr, Border, Gradient, LineCap, LineJoin, LineStyle, Shadow};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{RadialConfig, SceneConfig, TransformerConfig};
pub use events::{
    EventData, EventKind, HandlerId, PointerEvent, PointerKind, SceneEvent, ShapeEvent,
};
pub use hit_test::is_point_in_shape;
pub use model::{ShapeGeometry, ShapeModel};
pub use scene::Scene;
pub use shape::{CollisionState, Shape, ShapeDelegate, ShapeOptions};
pub use surface::{DrawingSurface, Paint, PixmapSurface, RecordingSurface};
pub use transformer::{AnchorPosition, ResizeEvent, ResizeHandle, SidePosition, Transformer};
